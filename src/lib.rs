//! Expense Tracker - CLI expense tracking with database-backed persistence
//!
//! This library provides the core functionality for the expense tracker. It
//! resolves database configuration from local settings with a remote secret
//! store fallback, provisions database connections through pluggable provider
//! strategies, and exposes CLI command handlers for recording and reviewing
//! expenses.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings, secret store client, and database config resolution
//! - `db`: Provider strategies, connection factory, and the expense repository
//! - `cancel`: Cooperative cancellation token for in-flight connection opens
//! - `cli`: Command argument types and handlers
//! - `models`: Core data models (expenses, categories, money, date ranges)
//! - `error`: Custom error types

pub mod cancel;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use error::{ExpenseError, ExpenseResult};
