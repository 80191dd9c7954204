use async_trait::async_trait;
use chrono::NaiveDate;

use crate::expense::{Expense, RecurringExpense};

use super::Result;

/// The read/write contract every expense store provides.
///
/// Both the persistent backends and the caching decorator implement this
/// trait, so a caching layer can stand in transparently for the store it
/// wraps. All dates are calendar days with no time-of-day component.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Ensures the underlying storage exists and is ready to serve queries.
    async fn ensure_created(&self) -> Result<()>;

    /// Forces any buffered writes out to durable storage.
    async fn force_flush(&self) -> Result<()>;

    /// Returns true if at least one expense exists on the given day.
    async fn has_expense_for_day(&self, day: NaiveDate) -> Result<bool>;

    /// Returns true if at least one unreconciled expense exists on the given day.
    async fn has_unchecked_expense_for_day(&self, day: NaiveDate) -> Result<bool>;

    /// Gets all expenses for the given day.
    async fn expenses_for_day(&self, day: NaiveDate) -> Result<Vec<Expense>>;

    /// Gets all expenses for the month starting at `month_start`.
    async fn expenses_for_month(&self, month_start: NaiveDate) -> Result<Vec<Expense>>;

    /// Gets the cumulative balance as of the end of the given day.
    async fn balance_for_day(&self, day: NaiveDate) -> Result<f64>;

    /// Gets the cumulative balance of reconciled expenses as of the end of
    /// the given day.
    async fn checked_balance_for_day(&self, day: NaiveDate) -> Result<f64>;

    /// Persists an expense, returning a copy with its assigned identifier.
    async fn persist_expense(&self, expense: Expense) -> Result<Expense>;

    /// Deletes an expense.
    async fn delete_expense(&self, expense: &Expense) -> Result<()>;

    /// Persists a recurring expense, returning a copy with its assigned
    /// identifier.
    async fn persist_recurring_expense(
        &self,
        recurring_expense: RecurringExpense,
    ) -> Result<RecurringExpense>;

    /// Deletes a recurring expense template. Generated occurrences are not
    /// touched; callers delete those explicitly.
    async fn delete_recurring_expense(&self, recurring_expense: &RecurringExpense) -> Result<()>;

    /// Gets all expenses generated from the given recurring expense.
    async fn all_expenses_for_recurring(
        &self,
        recurring_expense: &RecurringExpense,
    ) -> Result<Vec<Expense>>;

    /// Deletes all expenses generated from the given recurring expense.
    async fn delete_all_expenses_for_recurring(
        &self,
        recurring_expense: &RecurringExpense,
    ) -> Result<()>;

    /// Gets the generated expenses dated strictly after `after_date`.
    async fn all_expenses_for_recurring_after(
        &self,
        recurring_expense: &RecurringExpense,
        after_date: NaiveDate,
    ) -> Result<Vec<Expense>>;

    /// Deletes the generated expenses dated strictly after `after_date`.
    async fn delete_all_expenses_for_recurring_after(
        &self,
        recurring_expense: &RecurringExpense,
        after_date: NaiveDate,
    ) -> Result<()>;

    /// Gets the generated expenses dated strictly before `before_date`.
    async fn all_expenses_for_recurring_before(
        &self,
        recurring_expense: &RecurringExpense,
        before_date: NaiveDate,
    ) -> Result<Vec<Expense>>;

    /// Deletes the generated expenses dated strictly before `before_date`.
    async fn delete_all_expenses_for_recurring_before(
        &self,
        recurring_expense: &RecurringExpense,
        before_date: NaiveDate,
    ) -> Result<()>;

    /// Returns true if the given recurring expense has generated expenses
    /// dated strictly before `before_date`.
    async fn has_expenses_for_recurring_before(
        &self,
        recurring_expense: &RecurringExpense,
        before_date: NaiveDate,
    ) -> Result<bool>;

    /// Finds a recurring expense by its identifier.
    async fn find_recurring_expense_for_id(
        &self,
        recurring_expense_id: i64,
    ) -> Result<Option<RecurringExpense>>;

    /// Gets the expense with the earliest date, if any.
    async fn oldest_expense(&self) -> Result<Option<Expense>>;

    /// Marks every expense dated strictly before `before_date` as reconciled.
    async fn mark_all_entries_as_checked_before(&self, before_date: NaiveDate) -> Result<()>;
}
