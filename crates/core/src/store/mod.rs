mod error;
mod traits;
mod types;

pub use error::{Result, StoreError};
pub use traits::ExpenseStore;
pub use types::{end_of_month, start_of_month};
