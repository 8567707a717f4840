//! Database connection provisioning and the expense repository

pub mod error;
pub mod factory;
pub mod handle;
pub mod providers;
pub mod repository;

pub use error::ConnectionError;
pub use factory::ConnectionFactory;
pub use handle::ConnectionHandle;
pub use providers::{ConnectionStrategy, ProviderRegistry, UnopenedConnection};
pub use repository::{ExpenseRecord, ExpenseRepository};
