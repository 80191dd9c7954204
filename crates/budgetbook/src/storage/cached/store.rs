//! Cached expense store decorator.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use budgetbook_core::expense::{Expense, RecurringExpense};
use budgetbook_core::store::{start_of_month, ExpenseStore, Result};

use crate::cache::{
    populate_balances_for_month, populate_checked_balances_for_month, populate_expenses_for_month,
    CacheStorage,
};

/// Caching decorator over an [`ExpenseStore`].
///
/// Per-day reads are served from [`CacheStorage`] when present. A miss
/// answers from the wrapped store directly and, independently, spawns a
/// fire-and-forget job that backfills the whole containing month; the job's
/// outcome is never observed by the caller. Every successful mutation wipes
/// all cached data rather than computing the precise set of invalidated days.
///
/// # Known limitation
///
/// A populate job scheduled before a write may still be scanning when the
/// write's wipe completes. Days the job writes afterwards reflect store state
/// read before (or during) the write, so a wipe can be followed by stale
/// entries reappearing. Those entries stay visible until the next wipe. This
/// trades a staleness window that closes on the next write for not
/// serializing population against writes.
pub struct CachedExpenseStore<S>
where
    S: ExpenseStore + 'static,
{
    store: Arc<S>,
    cache: Arc<CacheStorage>,
}

impl<S> CachedExpenseStore<S>
where
    S: ExpenseStore + 'static,
{
    /// Creates a new cached store wrapping `store`.
    pub fn new(store: Arc<S>, cache: Arc<CacheStorage>) -> Self {
        Self { store, cache }
    }

    fn spawn_expense_population(&self, day: NaiveDate) {
        let store = Arc::clone(&self.store);
        let cache = Arc::clone(&self.cache);
        let month_start = start_of_month(day);
        tokio::spawn(populate_expenses_for_month(store, cache, month_start));
    }

    fn spawn_balance_population(&self, day: NaiveDate) {
        let store = Arc::clone(&self.store);
        let cache = Arc::clone(&self.cache);
        let month_start = start_of_month(day);
        tokio::spawn(populate_balances_for_month(store, cache, month_start));
    }

    fn spawn_checked_balance_population(&self, day: NaiveDate) {
        let store = Arc::clone(&self.store);
        let cache = Arc::clone(&self.cache);
        let month_start = start_of_month(day);
        tokio::spawn(populate_checked_balances_for_month(store, cache, month_start));
    }
}

#[async_trait]
impl<S> ExpenseStore for CachedExpenseStore<S>
where
    S: ExpenseStore + 'static,
{
    async fn ensure_created(&self) -> Result<()> {
        self.store.ensure_created().await
    }

    async fn force_flush(&self) -> Result<()> {
        self.store.force_flush().await
    }

    async fn has_expense_for_day(&self, day: NaiveDate) -> Result<bool> {
        if let Some(expenses) = self.cache.expenses_for_day(day).await {
            tracing::trace!(%day, "cache hit for day expenses");
            return Ok(!expenses.is_empty());
        }

        tracing::trace!(%day, "cache miss for day expenses");
        self.spawn_expense_population(day);
        self.store.has_expense_for_day(day).await
    }

    async fn has_unchecked_expense_for_day(&self, day: NaiveDate) -> Result<bool> {
        if let Some(expenses) = self.cache.expenses_for_day(day).await {
            tracing::trace!(%day, "cache hit for day expenses");
            return Ok(expenses.iter().any(|e| !e.checked));
        }

        tracing::trace!(%day, "cache miss for day expenses");
        self.spawn_expense_population(day);
        self.store.has_unchecked_expense_for_day(day).await
    }

    async fn expenses_for_day(&self, day: NaiveDate) -> Result<Vec<Expense>> {
        if let Some(expenses) = self.cache.expenses_for_day(day).await {
            tracing::trace!(%day, count = expenses.len(), "cache hit for day expenses");
            return Ok(expenses);
        }

        tracing::trace!(%day, "cache miss for day expenses");
        self.spawn_expense_population(day);
        self.store.expenses_for_day(day).await
    }

    async fn expenses_for_month(&self, month_start: NaiveDate) -> Result<Vec<Expense>> {
        self.store.expenses_for_month(month_start).await
    }

    async fn balance_for_day(&self, day: NaiveDate) -> Result<f64> {
        if let Some(balance) = self.cache.balance_for_day(day).await {
            tracing::trace!(%day, "cache hit for day balance");
            return Ok(balance);
        }

        tracing::trace!(%day, "cache miss for day balance");
        self.spawn_balance_population(day);
        self.store.balance_for_day(day).await
    }

    async fn checked_balance_for_day(&self, day: NaiveDate) -> Result<f64> {
        if let Some(balance) = self.cache.checked_balance_for_day(day).await {
            tracing::trace!(%day, "cache hit for day checked balance");
            return Ok(balance);
        }

        tracing::trace!(%day, "cache miss for day checked balance");
        self.spawn_checked_balance_population(day);
        self.store.checked_balance_for_day(day).await
    }

    async fn persist_expense(&self, expense: Expense) -> Result<Expense> {
        let persisted = self.store.persist_expense(expense).await?;

        self.cache.wipe().await;

        Ok(persisted)
    }

    async fn delete_expense(&self, expense: &Expense) -> Result<()> {
        self.store.delete_expense(expense).await?;

        self.cache.wipe().await;

        Ok(())
    }

    async fn persist_recurring_expense(
        &self,
        recurring_expense: RecurringExpense,
    ) -> Result<RecurringExpense> {
        self.store.persist_recurring_expense(recurring_expense).await
    }

    async fn delete_recurring_expense(&self, recurring_expense: &RecurringExpense) -> Result<()> {
        self.store.delete_recurring_expense(recurring_expense).await?;

        self.cache.wipe().await;

        Ok(())
    }

    async fn all_expenses_for_recurring(
        &self,
        recurring_expense: &RecurringExpense,
    ) -> Result<Vec<Expense>> {
        self.store.all_expenses_for_recurring(recurring_expense).await
    }

    async fn delete_all_expenses_for_recurring(
        &self,
        recurring_expense: &RecurringExpense,
    ) -> Result<()> {
        self.store
            .delete_all_expenses_for_recurring(recurring_expense)
            .await?;

        self.cache.wipe().await;

        Ok(())
    }

    async fn all_expenses_for_recurring_after(
        &self,
        recurring_expense: &RecurringExpense,
        after_date: NaiveDate,
    ) -> Result<Vec<Expense>> {
        self.store
            .all_expenses_for_recurring_after(recurring_expense, after_date)
            .await
    }

    async fn delete_all_expenses_for_recurring_after(
        &self,
        recurring_expense: &RecurringExpense,
        after_date: NaiveDate,
    ) -> Result<()> {
        self.store
            .delete_all_expenses_for_recurring_after(recurring_expense, after_date)
            .await?;

        self.cache.wipe().await;

        Ok(())
    }

    async fn all_expenses_for_recurring_before(
        &self,
        recurring_expense: &RecurringExpense,
        before_date: NaiveDate,
    ) -> Result<Vec<Expense>> {
        self.store
            .all_expenses_for_recurring_before(recurring_expense, before_date)
            .await
    }

    async fn delete_all_expenses_for_recurring_before(
        &self,
        recurring_expense: &RecurringExpense,
        before_date: NaiveDate,
    ) -> Result<()> {
        self.store
            .delete_all_expenses_for_recurring_before(recurring_expense, before_date)
            .await?;

        self.cache.wipe().await;

        Ok(())
    }

    async fn has_expenses_for_recurring_before(
        &self,
        recurring_expense: &RecurringExpense,
        before_date: NaiveDate,
    ) -> Result<bool> {
        self.store
            .has_expenses_for_recurring_before(recurring_expense, before_date)
            .await
    }

    async fn find_recurring_expense_for_id(
        &self,
        recurring_expense_id: i64,
    ) -> Result<Option<RecurringExpense>> {
        self.store
            .find_recurring_expense_for_id(recurring_expense_id)
            .await
    }

    async fn oldest_expense(&self) -> Result<Option<Expense>> {
        self.store.oldest_expense().await
    }

    async fn mark_all_entries_as_checked_before(&self, before_date: NaiveDate) -> Result<()> {
        self.store
            .mark_all_entries_as_checked_before(before_date)
            .await?;

        self.cache.wipe().await;

        Ok(())
    }
}
