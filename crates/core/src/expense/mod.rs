mod types;

pub use types::{Expense, RecurringExpense, RecurringInterval};
