//! Expense ledger storage backends with a day-granular caching decorator.
//!
//! The [`storage`] module provides concrete implementations of the
//! [`budgetbook_core::store::ExpenseStore`] contract; the [`cache`] module
//! holds the day-keyed cache maps and the background jobs that fill them one
//! calendar month at a time.

pub mod cache;
pub mod storage;
