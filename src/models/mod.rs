//! Core data models and value objects

pub mod category;
pub mod date_range;
pub mod expense;
pub mod money;

pub use category::Category;
pub use date_range::DateRange;
pub use expense::Expense;
pub use money::{Money, MoneyParseError};
