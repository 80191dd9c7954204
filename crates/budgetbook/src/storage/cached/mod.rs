//! Cached store decorator.
//!
//! This module provides a decorator that wraps any [`ExpenseStore`]
//! implementation with a day-granular cache:
//!
//! - **Reads**: answer from the cache when the day is present; on a miss,
//!   schedule a background job that fills the whole containing month and
//!   answer from the wrapped store directly in the meantime
//! - **Writes**: persist to the wrapped store, then wipe all cached data
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryExpenseStore::new());
//! let cache = Arc::new(CacheStorage::new());
//!
//! let cached_store = CachedExpenseStore::new(store, cache);
//! ```
//!
//! [`ExpenseStore`]: budgetbook_core::store::ExpenseStore

mod store;

pub use store::CachedExpenseStore;
