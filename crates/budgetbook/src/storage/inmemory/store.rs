//! In-memory expense store implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use budgetbook_core::expense::{Expense, RecurringExpense};
use budgetbook_core::store::{end_of_month, ExpenseStore, Result, StoreError};

/// In-memory storage backend for testing.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access. Data is
/// not persisted and will be lost when the store is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryExpenseStore {
    expenses: Arc<RwLock<HashMap<i64, Expense>>>,
    recurring: Arc<RwLock<HashMap<i64, RecurringExpense>>>,
    next_expense_id: Arc<AtomicI64>,
    next_recurring_id: Arc<AtomicI64>,
}

impl Default for InMemoryExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryExpenseStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            expenses: Arc::new(RwLock::new(HashMap::new())),
            recurring: Arc::new(RwLock::new(HashMap::new())),
            next_expense_id: Arc::new(AtomicI64::new(1)),
            next_recurring_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Returns all expenses on the given day, ordered by identifier.
    async fn collect_for_day(&self, day: NaiveDate) -> Vec<Expense> {
        let expenses = self.expenses.read().await;
        let mut matching: Vec<Expense> = expenses
            .values()
            .filter(|e| e.date == day)
            .cloned()
            .collect();
        matching.sort_by_key(|e| e.id);
        matching
    }
}

fn recurring_id(recurring_expense: &RecurringExpense) -> Result<i64> {
    recurring_expense
        .id
        .ok_or_else(|| StoreError::InvalidData("recurring expense has no id".to_string()))
}

#[async_trait]
impl ExpenseStore for InMemoryExpenseStore {
    async fn ensure_created(&self) -> Result<()> {
        Ok(())
    }

    async fn force_flush(&self) -> Result<()> {
        Ok(())
    }

    async fn has_expense_for_day(&self, day: NaiveDate) -> Result<bool> {
        let expenses = self.expenses.read().await;
        Ok(expenses.values().any(|e| e.date == day))
    }

    async fn has_unchecked_expense_for_day(&self, day: NaiveDate) -> Result<bool> {
        let expenses = self.expenses.read().await;
        Ok(expenses.values().any(|e| e.date == day && !e.checked))
    }

    async fn expenses_for_day(&self, day: NaiveDate) -> Result<Vec<Expense>> {
        Ok(self.collect_for_day(day).await)
    }

    async fn expenses_for_month(&self, month_start: NaiveDate) -> Result<Vec<Expense>> {
        let month_end = end_of_month(month_start);
        let expenses = self.expenses.read().await;
        let mut matching: Vec<Expense> = expenses
            .values()
            .filter(|e| e.date >= month_start && e.date <= month_end)
            .cloned()
            .collect();
        matching.sort_by_key(|e| (e.date, e.id));
        Ok(matching)
    }

    async fn balance_for_day(&self, day: NaiveDate) -> Result<f64> {
        let expenses = self.expenses.read().await;
        Ok(expenses
            .values()
            .filter(|e| e.date <= day)
            .map(|e| e.amount)
            .sum())
    }

    async fn checked_balance_for_day(&self, day: NaiveDate) -> Result<f64> {
        let expenses = self.expenses.read().await;
        Ok(expenses
            .values()
            .filter(|e| e.checked && e.date <= day)
            .map(|e| e.amount)
            .sum())
    }

    async fn persist_expense(&self, expense: Expense) -> Result<Expense> {
        let mut expenses = self.expenses.write().await;
        let id = expense
            .id
            .unwrap_or_else(|| self.next_expense_id.fetch_add(1, Ordering::SeqCst));
        let stored = Expense {
            id: Some(id),
            ..expense
        };
        expenses.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_expense(&self, expense: &Expense) -> Result<()> {
        let id = expense
            .id
            .ok_or_else(|| StoreError::InvalidData("expense has no id".to_string()))?;
        let mut expenses = self.expenses.write().await;
        if expenses.remove(&id).is_none() {
            return Err(StoreError::NotFound {
                entity_type: "Expense",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn persist_recurring_expense(
        &self,
        recurring_expense: RecurringExpense,
    ) -> Result<RecurringExpense> {
        let mut recurring = self.recurring.write().await;
        let id = recurring_expense
            .id
            .unwrap_or_else(|| self.next_recurring_id.fetch_add(1, Ordering::SeqCst));
        let stored = RecurringExpense {
            id: Some(id),
            ..recurring_expense
        };
        recurring.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_recurring_expense(&self, recurring_expense: &RecurringExpense) -> Result<()> {
        let id = recurring_id(recurring_expense)?;
        let mut recurring = self.recurring.write().await;
        if recurring.remove(&id).is_none() {
            return Err(StoreError::NotFound {
                entity_type: "RecurringExpense",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn all_expenses_for_recurring(
        &self,
        recurring_expense: &RecurringExpense,
    ) -> Result<Vec<Expense>> {
        let id = recurring_id(recurring_expense)?;
        let expenses = self.expenses.read().await;
        let mut matching: Vec<Expense> = expenses
            .values()
            .filter(|e| e.recurring_expense_id == Some(id))
            .cloned()
            .collect();
        matching.sort_by_key(|e| (e.date, e.id));
        Ok(matching)
    }

    async fn delete_all_expenses_for_recurring(
        &self,
        recurring_expense: &RecurringExpense,
    ) -> Result<()> {
        let id = recurring_id(recurring_expense)?;
        let mut expenses = self.expenses.write().await;
        expenses.retain(|_, e| e.recurring_expense_id != Some(id));
        Ok(())
    }

    async fn all_expenses_for_recurring_after(
        &self,
        recurring_expense: &RecurringExpense,
        after_date: NaiveDate,
    ) -> Result<Vec<Expense>> {
        let id = recurring_id(recurring_expense)?;
        let expenses = self.expenses.read().await;
        let mut matching: Vec<Expense> = expenses
            .values()
            .filter(|e| e.recurring_expense_id == Some(id) && e.date > after_date)
            .cloned()
            .collect();
        matching.sort_by_key(|e| (e.date, e.id));
        Ok(matching)
    }

    async fn delete_all_expenses_for_recurring_after(
        &self,
        recurring_expense: &RecurringExpense,
        after_date: NaiveDate,
    ) -> Result<()> {
        let id = recurring_id(recurring_expense)?;
        let mut expenses = self.expenses.write().await;
        expenses.retain(|_, e| !(e.recurring_expense_id == Some(id) && e.date > after_date));
        Ok(())
    }

    async fn all_expenses_for_recurring_before(
        &self,
        recurring_expense: &RecurringExpense,
        before_date: NaiveDate,
    ) -> Result<Vec<Expense>> {
        let id = recurring_id(recurring_expense)?;
        let expenses = self.expenses.read().await;
        let mut matching: Vec<Expense> = expenses
            .values()
            .filter(|e| e.recurring_expense_id == Some(id) && e.date < before_date)
            .cloned()
            .collect();
        matching.sort_by_key(|e| (e.date, e.id));
        Ok(matching)
    }

    async fn delete_all_expenses_for_recurring_before(
        &self,
        recurring_expense: &RecurringExpense,
        before_date: NaiveDate,
    ) -> Result<()> {
        let id = recurring_id(recurring_expense)?;
        let mut expenses = self.expenses.write().await;
        expenses.retain(|_, e| !(e.recurring_expense_id == Some(id) && e.date < before_date));
        Ok(())
    }

    async fn has_expenses_for_recurring_before(
        &self,
        recurring_expense: &RecurringExpense,
        before_date: NaiveDate,
    ) -> Result<bool> {
        let id = recurring_id(recurring_expense)?;
        let expenses = self.expenses.read().await;
        Ok(expenses
            .values()
            .any(|e| e.recurring_expense_id == Some(id) && e.date < before_date))
    }

    async fn find_recurring_expense_for_id(
        &self,
        recurring_expense_id: i64,
    ) -> Result<Option<RecurringExpense>> {
        let recurring = self.recurring.read().await;
        Ok(recurring.get(&recurring_expense_id).cloned())
    }

    async fn oldest_expense(&self) -> Result<Option<Expense>> {
        let expenses = self.expenses.read().await;
        Ok(expenses.values().min_by_key(|e| (e.date, e.id)).cloned())
    }

    async fn mark_all_entries_as_checked_before(&self, before_date: NaiveDate) -> Result<()> {
        let mut expenses = self.expenses.write().await;
        for expense in expenses.values_mut() {
            if expense.date < before_date {
                expense.checked = true;
            }
        }
        Ok(())
    }
}
