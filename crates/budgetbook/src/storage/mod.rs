//! Storage backend implementations.
//!
//! This module provides concrete implementations of the
//! [`budgetbook_core::store::ExpenseStore`] contract:
//!
//! - [`inmemory`]: HashMap-backed store for tests and development
//! - [`cached`]: decorator that adds a day-granular cache in front of any
//!   other implementation

pub mod cached;
pub mod inmemory;

pub use cached::CachedExpenseStore;
pub use inmemory::InMemoryExpenseStore;
