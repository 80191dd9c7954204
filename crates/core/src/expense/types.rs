use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single ledger entry for one calendar day.
///
/// An expense is immutable once persisted, except for the `checked` flag
/// which is only ever mutated through store operations. Negative amounts are
/// spendings, positive amounts are incomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned identifier. `None` until the expense is persisted.
    pub id: Option<i64>,
    pub title: String,
    pub amount: f64,
    pub date: NaiveDate,
    /// Whether the user has reconciled this expense against their account.
    pub checked: bool,
    /// Identifier of the recurring template this expense was generated from,
    /// if any.
    pub recurring_expense_id: Option<i64>,
}

impl Expense {
    /// Creates a new unpersisted expense.
    pub fn new(title: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: None,
            title: title.into(),
            amount,
            date,
            checked: false,
            recurring_expense_id: None,
        }
    }

    /// Sets a specific ID for this expense (useful for testing).
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Marks this expense as reconciled.
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Links this expense to a recurring template.
    pub fn with_recurring(mut self, recurring_expense_id: i64) -> Self {
        self.recurring_expense_id = Some(recurring_expense_id);
        self
    }

    /// Returns true if this expense was generated from a recurring template.
    pub fn is_recurring(&self) -> bool {
        self.recurring_expense_id.is_some()
    }
}

/// How often a recurring expense repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecurringInterval {
    Weekly,
    BiWeekly,
    Monthly,
    Yearly,
}

/// A template from which concrete [`Expense`] rows are generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    /// Store-assigned identifier. `None` until persisted.
    pub id: Option<i64>,
    pub title: String,
    pub amount: f64,
    /// Day the recurrence starts on.
    pub start_date: NaiveDate,
    /// Whether any generated occurrence was edited individually.
    pub modified: bool,
    pub interval: RecurringInterval,
}

impl RecurringExpense {
    /// Creates a new unpersisted recurring expense.
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        start_date: NaiveDate,
        interval: RecurringInterval,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            amount,
            start_date,
            modified: false,
            interval,
        }
    }

    /// Sets a specific ID for this recurring expense (useful for testing).
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
