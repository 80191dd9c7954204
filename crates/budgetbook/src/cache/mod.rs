//! Day-keyed cache maps and the background jobs that populate them.
//!
//! [`CacheStorage`] is a passive holder of three date-keyed maps, one per
//! cached aggregate (expense list, balance, checked balance), each behind its
//! own lock. The `populate_*_for_month` jobs fill one map for an entire
//! calendar month, one day at a time, and are spawned fire-and-forget by the
//! cached store decorator on a cache miss.

mod populate;
mod storage;

pub use populate::{
    populate_balances_for_month, populate_checked_balances_for_month, populate_expenses_for_month,
};
pub use storage::CacheStorage;
