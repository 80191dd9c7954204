//! Core domain model and store contract for the budgetbook project.
//!
//! This crate defines the types shared by every storage backend: the expense
//! domain model, the [`store::ExpenseStore`] trait that backends and
//! decorators implement, and the error types they return.

pub mod expense;
pub mod store;
