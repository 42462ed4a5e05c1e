//! Bank Management Library
//! # Overview
//!
//! This library manages savings and checking accounts held in memory and
//! persisted to a flat text file, one account per line.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, AccountKind, BankError)
//! - [`cli`] - CLI arguments parsing and the interactive menu
//! - [`core`] - Business logic components:
//!   - [`core::store`] - Account collection, CRUD operations and persistence
//!   - [`core::top_k`] - Bounded selection of the highest balances
//! - [`io`] - Line codec and backing file access
//!
//! # Account Variants
//!
//! - **Savings**: a withdrawal may not take the balance below the minimum balance
//! - **Checking**: a withdrawal may take the balance down to minus the overdraft limit
//!
//! Deposits always succeed for non-negative amounts.
//!
//! # File Format
//!
//! ```text
//! S,100,Alice,500,100
//! C,200,Bob,-80,100
//! ```
//!
//! Type tag, account number, holder name, balance, then the minimum balance
//! (savings) or overdraft limit (checking). Lines that do not parse are skipped
//! on load.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{AccountStore, DEFAULT_ACCOUNTS_FILE};
pub use types::{Account, AccountKind, AccountNumber, BankError};
