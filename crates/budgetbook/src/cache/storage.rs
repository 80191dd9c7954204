//! Passive holder of the three day-keyed cache maps.

use std::collections::HashMap;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use budgetbook_core::expense::Expense;

/// The three date-keyed cache maps, each behind an independent lock.
///
/// A present key means "complete and authoritative for that day at the time
/// it was written"; an absent key means the store must be asked. Presence of
/// a day in one map implies nothing about the other two, since each map is
/// filled by its own background job.
///
/// Every method acquires only the lock of the map it touches and releases it
/// before returning, so contention on one aggregate never blocks readers of
/// another, and no lock is ever held across a store call.
#[derive(Debug, Default)]
pub struct CacheStorage {
    expenses: RwLock<HashMap<NaiveDate, Vec<Expense>>>,
    balances: RwLock<HashMap<NaiveDate, f64>>,
    checked_balances: RwLock<HashMap<NaiveDate, f64>>,
}

impl CacheStorage {
    /// Creates empty cache maps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the cached expense list for a day, if present.
    pub async fn expenses_for_day(&self, day: NaiveDate) -> Option<Vec<Expense>> {
        self.expenses.read().await.get(&day).cloned()
    }

    /// Stores the complete expense list for a single day.
    pub async fn put_expenses(&self, day: NaiveDate, expenses: Vec<Expense>) {
        self.expenses.write().await.insert(day, expenses);
    }

    /// Returns true if the expense list for a day is cached.
    pub async fn contains_expenses_for_day(&self, day: NaiveDate) -> bool {
        self.expenses.read().await.contains_key(&day)
    }

    /// Gets the cached balance for a day, if present.
    pub async fn balance_for_day(&self, day: NaiveDate) -> Option<f64> {
        self.balances.read().await.get(&day).copied()
    }

    /// Stores the balance for a single day.
    pub async fn put_balance(&self, day: NaiveDate, balance: f64) {
        self.balances.write().await.insert(day, balance);
    }

    /// Returns true if the balance for a day is cached.
    pub async fn contains_balance_for_day(&self, day: NaiveDate) -> bool {
        self.balances.read().await.contains_key(&day)
    }

    /// Gets the cached checked balance for a day, if present.
    pub async fn checked_balance_for_day(&self, day: NaiveDate) -> Option<f64> {
        self.checked_balances.read().await.get(&day).copied()
    }

    /// Stores the checked balance for a single day.
    pub async fn put_checked_balance(&self, day: NaiveDate, balance: f64) {
        self.checked_balances.write().await.insert(day, balance);
    }

    /// Returns true if the checked balance for a day is cached.
    pub async fn contains_checked_balance_for_day(&self, day: NaiveDate) -> bool {
        self.checked_balances.read().await.contains_key(&day)
    }

    /// Clears all three maps, each under its own lock, one after another.
    pub async fn wipe(&self) {
        tracing::debug!("wiping all cached day data");

        self.balances.write().await.clear();
        self.expenses.write().await.clear();
        self.checked_balances.write().await.clear();
    }

    /// Number of days with a cached expense list.
    pub async fn expense_days(&self) -> usize {
        self.expenses.read().await.len()
    }

    /// Number of days with a cached balance.
    pub async fn balance_days(&self) -> usize {
        self.balances.read().await.len()
    }

    /// Number of days with a cached checked balance.
    pub async fn checked_balance_days(&self) -> usize {
        self.checked_balances.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[tokio::test]
    async fn test_put_and_get_expenses() {
        let cache = CacheStorage::new();
        let expenses = vec![Expense::new("Coffee", -3.50, day(15)).with_id(1)];

        cache.put_expenses(day(15), expenses.clone()).await;

        assert_eq!(cache.expenses_for_day(day(15)).await, Some(expenses));
        assert!(cache.contains_expenses_for_day(day(15)).await);
        assert!(!cache.contains_expenses_for_day(day(16)).await);
    }

    #[tokio::test]
    async fn test_empty_list_is_a_present_entry() {
        let cache = CacheStorage::new();

        cache.put_expenses(day(1), Vec::new()).await;

        // An empty list means "no expenses that day", not "unknown".
        assert_eq!(cache.expenses_for_day(day(1)).await, Some(Vec::new()));
        assert!(cache.contains_expenses_for_day(day(1)).await);
    }

    #[tokio::test]
    async fn test_maps_are_independent() {
        let cache = CacheStorage::new();

        cache.put_balance(day(3), -120.0).await;

        assert!(cache.contains_balance_for_day(day(3)).await);
        assert!(!cache.contains_expenses_for_day(day(3)).await);
        assert!(!cache.contains_checked_balance_for_day(day(3)).await);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_day_value() {
        let cache = CacheStorage::new();

        cache.put_balance(day(3), -120.0).await;
        cache.put_balance(day(3), -80.0).await;

        assert_eq!(cache.balance_for_day(day(3)).await, Some(-80.0));
    }

    #[tokio::test]
    async fn test_wipe_clears_all_three_maps() {
        let cache = CacheStorage::new();
        cache.put_expenses(day(1), Vec::new()).await;
        cache.put_balance(day(2), 10.0).await;
        cache.put_checked_balance(day(3), 5.0).await;

        cache.wipe().await;

        assert_eq!(cache.expense_days().await, 0);
        assert_eq!(cache.balance_days().await, 0);
        assert_eq!(cache.checked_balance_days().await, 0);
    }
}
