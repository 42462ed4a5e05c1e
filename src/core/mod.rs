//! Core business logic module
//!
//! This module contains the account management components:
//! - `store` - The file-backed account collection and its CRUD operations
//! - `top_k` - Bounded selection of the highest balances

pub mod store;
pub mod top_k;

pub use store::{AccountStore, DEFAULT_ACCOUNTS_FILE};
pub use top_k::top_k;
