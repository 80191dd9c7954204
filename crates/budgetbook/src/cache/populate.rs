//! Background jobs that fill one cache map for an entire calendar month.
//!
//! Each job scans the days of its target month in ascending order, querying
//! the wrapped store one day at a time and writing each result into the cache
//! as soon as it is computed, so partially-completed progress is visible to
//! concurrent readers before the whole month finishes.
//!
//! The idempotency guard at the top of each job is a check-then-act without
//! mutual exclusion: two jobs for the same month may both pass it and both
//! scan. That redundant work is tolerated; each day is simply overwritten
//! with a freshly computed value for the same date.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use budgetbook_core::store::ExpenseStore;

use super::CacheStorage;

/// Fills the expense-list cache for the month starting at `month_start`.
///
/// A store failure aborts the remaining scan; days already written stay
/// cached, days not yet visited remain absent and will fall back to the miss
/// path on a later read. The caller that scheduled the job is never notified.
pub async fn populate_expenses_for_month<S>(
    store: Arc<S>,
    cache: Arc<CacheStorage>,
    month_start: NaiveDate,
) where
    S: ExpenseStore,
{
    if cache.contains_expenses_for_day(month_start).await {
        return;
    }

    let month = month_start.month();
    tracing::debug!(%month_start, "caching expenses for month");

    let mut current = month_start;
    while current.month() == month {
        let expenses = match store.expenses_for_day(current).await {
            Ok(expenses) => expenses,
            Err(error) => {
                tracing::warn!(day = %current, %error, "aborting expense cache fill");
                return;
            }
        };

        cache.put_expenses(current, expenses).await;

        current = match current.succ_opt() {
            Some(next) => next,
            None => return,
        };
    }

    tracing::debug!(%month_start, "expenses cached for month");
}

/// Fills the balance cache for the month starting at `month_start`.
///
/// Same scan and failure behavior as [`populate_expenses_for_month`].
pub async fn populate_balances_for_month<S>(
    store: Arc<S>,
    cache: Arc<CacheStorage>,
    month_start: NaiveDate,
) where
    S: ExpenseStore,
{
    if cache.contains_balance_for_day(month_start).await {
        return;
    }

    let month = month_start.month();
    tracing::debug!(%month_start, "caching balances for month");

    let mut current = month_start;
    while current.month() == month {
        let balance = match store.balance_for_day(current).await {
            Ok(balance) => balance,
            Err(error) => {
                tracing::warn!(day = %current, %error, "aborting balance cache fill");
                return;
            }
        };

        cache.put_balance(current, balance).await;

        current = match current.succ_opt() {
            Some(next) => next,
            None => return,
        };
    }

    tracing::debug!(%month_start, "balances cached for month");
}

/// Fills the checked-balance cache for the month starting at `month_start`.
///
/// Same scan and failure behavior as [`populate_expenses_for_month`].
pub async fn populate_checked_balances_for_month<S>(
    store: Arc<S>,
    cache: Arc<CacheStorage>,
    month_start: NaiveDate,
) where
    S: ExpenseStore,
{
    if cache.contains_checked_balance_for_day(month_start).await {
        return;
    }

    let month = month_start.month();
    tracing::debug!(%month_start, "caching checked balances for month");

    let mut current = month_start;
    while current.month() == month {
        let balance = match store.checked_balance_for_day(current).await {
            Ok(balance) => balance,
            Err(error) => {
                tracing::warn!(day = %current, %error, "aborting checked balance cache fill");
                return;
            }
        };

        cache.put_checked_balance(current, balance).await;

        current = match current.succ_opt() {
            Some(next) => next,
            None => return,
        };
    }

    tracing::debug!(%month_start, "checked balances cached for month");
}

#[cfg(test)]
mod tests {
    use super::*;

    use budgetbook_core::expense::Expense;
    use budgetbook_core::store::start_of_month;

    use crate::storage::inmemory::InMemoryExpenseStore;

    async fn seeded_store() -> Arc<InMemoryExpenseStore> {
        let store = Arc::new(InMemoryExpenseStore::new());
        let feb_10 = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let feb_29 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        store
            .persist_expense(Expense::new("Groceries", -55.0, feb_10))
            .await
            .unwrap();
        store
            .persist_expense(Expense::new("Salary", 2500.0, feb_29).checked())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_expense_fill_covers_exactly_the_target_month() {
        let store = seeded_store().await;
        let cache = Arc::new(CacheStorage::new());
        let feb_1 = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        populate_expenses_for_month(Arc::clone(&store), Arc::clone(&cache), feb_1).await;

        // Every day of the leap-year February, 1st through 29th, is present.
        assert_eq!(cache.expense_days().await, 29);
        for day in 1..=29 {
            let date = NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
            assert!(cache.contains_expenses_for_day(date).await);
        }
        // Neither January nor March leaked in.
        let jan_31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let mar_1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(!cache.contains_expenses_for_day(jan_31).await);
        assert!(!cache.contains_expenses_for_day(mar_1).await);
    }

    #[tokio::test]
    async fn test_filled_days_match_the_store() {
        let store = seeded_store().await;
        let cache = Arc::new(CacheStorage::new());
        let feb_1 = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let feb_10 = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();

        populate_expenses_for_month(Arc::clone(&store), Arc::clone(&cache), feb_1).await;

        let cached = cache.expenses_for_day(feb_10).await.unwrap();
        let direct = store.expenses_for_day(feb_10).await.unwrap();
        assert_eq!(cached, direct);
        assert_eq!(cached.len(), 1);

        // Days with no expenses get an (authoritative) empty list.
        let feb_2 = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap();
        assert_eq!(cache.expenses_for_day(feb_2).await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_balance_fill_is_cumulative() {
        let store = seeded_store().await;
        let cache = Arc::new(CacheStorage::new());
        let feb_1 = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        populate_balances_for_month(Arc::clone(&store), Arc::clone(&cache), feb_1).await;

        let feb_9 = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
        let feb_29 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(cache.balance_for_day(feb_9).await, Some(0.0));
        assert_eq!(cache.balance_for_day(feb_29).await, Some(2445.0));
    }

    #[tokio::test]
    async fn test_checked_balance_fill_only_counts_checked() {
        let store = seeded_store().await;
        let cache = Arc::new(CacheStorage::new());
        let feb_1 = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        populate_checked_balances_for_month(Arc::clone(&store), Arc::clone(&cache), feb_1).await;

        let feb_29 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(cache.checked_balance_for_day(feb_29).await, Some(2500.0));
    }

    #[tokio::test]
    async fn test_guard_skips_an_already_populated_month() {
        let store = seeded_store().await;
        let cache = Arc::new(CacheStorage::new());
        let feb_1 = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        // Mark the month start as present with a sentinel the scan would
        // otherwise overwrite.
        let sentinel = vec![Expense::new("Sentinel", -1.0, feb_1).with_id(99)];
        cache.put_expenses(feb_1, sentinel.clone()).await;

        populate_expenses_for_month(Arc::clone(&store), Arc::clone(&cache), feb_1).await;

        assert_eq!(cache.expenses_for_day(feb_1).await, Some(sentinel));
        assert_eq!(cache.expense_days().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_jobs_for_one_month_are_harmless() {
        let store = seeded_store().await;
        let cache = Arc::new(CacheStorage::new());
        let feb_1 = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        let first = tokio::spawn(populate_expenses_for_month(
            Arc::clone(&store),
            Arc::clone(&cache),
            feb_1,
        ));
        let second = tokio::spawn(populate_expenses_for_month(
            Arc::clone(&store),
            Arc::clone(&cache),
            feb_1,
        ));
        first.await.unwrap();
        second.await.unwrap();

        // Whichever interleaving happened, every day equals the store's value.
        assert_eq!(cache.expense_days().await, 29);
        for day in 1..=29 {
            let date = NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
            assert_eq!(
                cache.expenses_for_day(date).await.unwrap(),
                store.expenses_for_day(date).await.unwrap()
            );
        }
    }
}
