//! Backing file access
//!
//! [`AccountFileReader`] streams decoded accounts out of the backing file, one
//! line at a time, yielding `Err` for lines the codec rejects so the caller can
//! decide what to do with them. [`write_accounts`] truncates and rewrites the
//! whole file.
//!
//! ```no_run
//! use bank_management::io::account_file::AccountFileReader;
//! use std::path::Path;
//!
//! let reader = AccountFileReader::new(Path::new("accounts.txt")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(account) => println!("{}", account),
//!         Err(e) => eprintln!("skipping: {}", e),
//!     }
//! }
//! ```
//!
//! Writes are not atomic: a crash in the middle of [`write_accounts`] can leave
//! a truncated file behind.

use crate::io::text_codec::{decode_record, encode_line, reader_builder};
use crate::types::{Account, BankError};
use csv::StringRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Streaming reader over the records of a backing file
#[derive(Debug)]
pub struct AccountFileReader {
    reader: csv::Reader<File>,
    record: StringRecord,
    finished: bool,
}

impl AccountFileReader {
    /// Open the backing file for reading
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be opened (missing, unreadable).
    pub fn new(path: &Path) -> Result<Self, BankError> {
        let file = File::open(path).map_err(|e| BankError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;

        Ok(Self {
            reader: reader_builder().from_reader(file),
            record: StringRecord::new(),
            finished: false,
        })
    }
}

impl Iterator for AccountFileReader {
    type Item = Result<Account, BankError>;

    /// Decode the next non-empty line
    ///
    /// Undecodable lines (for example invalid UTF-8) are yielded as
    /// `MalformedRecord` and iteration continues. An I/O error ends iteration.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(decode_record(&self.record)),
            Ok(false) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = e.is_io_error();
                Some(Err(BankError::from(e)))
            }
        }
    }
}

/// Truncate `path` and write every account to it, one line each
///
/// # Errors
///
/// Returns `IoError` if the file cannot be created or written.
pub fn write_accounts(path: &Path, accounts: &[Account]) -> Result<(), BankError> {
    let file = File::create(path).map_err(|e| BankError::IoError {
        message: format!("Failed to create file '{}': {}", path.display(), e),
    })?;
    let mut writer = BufWriter::new(file);

    for account in accounts {
        writeln!(writer, "{}", encode_line(account))?;
    }

    writer.flush()?;
    Ok(())
}
