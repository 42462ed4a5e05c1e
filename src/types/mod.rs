//! Types module
//!
//! Contains core data structures used throughout the application:
//! - `account`: the account entity and its two variants
//! - `error`: error types for the bank management system

pub mod account;
pub mod error;

pub use account::{Account, AccountKind, AccountNumber};
pub use error::BankError;
