//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of the
//! [`budgetbook_core::store::ExpenseStore`] contract that keeps all data in
//! HashMaps wrapped in `Arc<RwLock<_>>`. This is useful for testing and
//! development scenarios where persistence is not required.

mod store;

pub use store::InMemoryExpenseStore;
