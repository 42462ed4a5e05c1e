//! I/O module
//!
//! Handles the backing file.
//!
//! # Components
//!
//! - `text_codec` - Line format handling (record decoding, line encoding)
//! - `account_file` - Streaming reader and truncating writer for the backing file

pub mod account_file;
pub mod text_codec;

pub use account_file::{write_accounts, AccountFileReader};
pub use text_codec::{decode_line, encode_line};
