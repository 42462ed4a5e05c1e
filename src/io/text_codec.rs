//! Line format handling for account records
//!
//! One account is one line of five comma-separated fields:
//!
//! ```text
//! <type:S|C>,<number>,<holder>,<balance>,<parameter>
//! ```
//!
//! There is no header and no quoting, so a holder name containing a comma
//! cannot be read back. All functions here are pure (no file I/O).

use crate::types::{Account, AccountKind, AccountNumber, BankError};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Number of fields in a well-formed record
pub const FIELD_COUNT: usize = 5;

/// Raw record as it appears in the backing file
///
/// Decimal fields stay as strings here and are parsed in [`convert_record`],
/// so a bad amount produces a descriptive error instead of a serde one.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AccountRecord {
    pub account_type: String,
    pub number: AccountNumber,
    pub holder: String,
    pub balance: String,
    pub parameter: String,
}

/// Reader configuration shared by line and file decoding
pub fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All);
    builder
}

/// Convert a raw record into an [`Account`]
///
/// Fails on an unknown type tag or an unparseable balance/parameter.
pub fn convert_record(record: AccountRecord) -> Result<Account, BankError> {
    let balance = parse_decimal(&record.balance).ok_or_else(|| {
        BankError::malformed_record(None, format!("invalid balance '{}'", record.balance))
    })?;
    let parameter = parse_decimal(&record.parameter).ok_or_else(|| {
        BankError::malformed_record(None, format!("invalid parameter '{}'", record.parameter))
    })?;

    let mut tag = record.account_type.chars();
    let kind = match (tag.next(), tag.next()) {
        (Some(tag), None) => AccountKind::from_tag(tag, parameter),
        _ => None,
    }
    .ok_or_else(|| {
        BankError::malformed_record(
            None,
            format!("unknown account type '{}'", record.account_type),
        )
    })?;

    Ok(Account::new(record.number, record.holder, balance, kind))
}

/// Decode an already-split record, checking the field count first
pub fn decode_record(record: &StringRecord) -> Result<Account, BankError> {
    let line = record.position().map(|pos| pos.line());

    if record.len() != FIELD_COUNT {
        return Err(BankError::malformed_record(
            line,
            format!("expected {} fields, found {}", FIELD_COUNT, record.len()),
        ));
    }

    let raw: AccountRecord = record.deserialize(None).map_err(|e| {
        BankError::malformed_record(line, e.to_string())
    })?;

    convert_record(raw).map_err(|e| match e {
        BankError::MalformedRecord { line: None, message } => {
            BankError::MalformedRecord { line, message }
        }
        other => other,
    })
}

/// Decode a single line
pub fn decode_line(line: &str) -> Result<Account, BankError> {
    let mut reader = reader_builder().from_reader(line.as_bytes());
    let mut record = StringRecord::new();

    if !reader.read_record(&mut record)? {
        return Err(BankError::malformed_record(None, "empty line"));
    }

    decode_record(&record)
}

/// Encode an account as a single line, without the trailing newline
pub fn encode_line(account: &Account) -> String {
    format!(
        "{},{},{},{},{}",
        account.tag(),
        account.number,
        account.holder,
        account.balance.normalize(),
        account.kind.parameter().normalize()
    )
}

/// Parse a decimal amount, accepting scientific notation such as `1e+06`
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}
