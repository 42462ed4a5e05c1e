//! Error types for the bank management system
//!
//! Every failure an account operation can hit is a variant of [`BankError`].
//! The shell turns them into user-facing messages; nothing is retried.
//!
//! # Error Categories
//!
//! - **Lookup Errors**: unknown account number, duplicate account number
//! - **Balance Errors**: rejected withdrawals, negative amounts, overflow
//! - **Storage Errors**: malformed records and I/O failures on the backing file

use super::account::AccountNumber;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bank management system
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// No account with the given number exists in the store
    #[error("Account {number} not found")]
    AccountNotFound {
        /// The account number that was looked up
        number: AccountNumber,
    },

    /// A withdrawal would take the balance below the account's floor
    ///
    /// The account is left unchanged.
    #[error("Withdrawal of {requested} from account {number} rejected: balance {balance}, floor {floor}")]
    WithdrawalRejected {
        number: AccountNumber,
        balance: Decimal,
        requested: Decimal,
        /// Minimum balance for savings, minus the overdraft limit for checking
        floor: Decimal,
    },

    /// A line of the backing file could not be parsed
    ///
    /// Raised by the codec and swallowed by the store during load.
    #[error("Malformed record{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    MalformedRecord {
        /// Line number in the backing file (if known)
        line: Option<u64>,
        message: String,
    },

    /// An account with this number is already in the store
    #[error("Account number {number} already exists")]
    DuplicateAccountNumber { number: AccountNumber },

    /// Deposit and withdrawal amounts must not be negative
    #[error("Invalid amount {amount}: must not be negative")]
    InvalidAmount { amount: Decimal },

    /// Balance arithmetic would overflow
    #[error("Arithmetic overflow in {operation} for account {number}")]
    ArithmeticOverflow {
        operation: String,
        number: AccountNumber,
    },

    /// Top-K was requested but the store holds no accounts
    #[error("No accounts available")]
    NoAccounts,

    /// I/O error while reading or writing the backing file
    #[error("I/O error: {message}")]
    IoError { message: String },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        if error.is_io_error() {
            return BankError::IoError {
                message: error.to_string(),
            };
        }
        let line = error.position().map(|pos| pos.line());

        BankError::MalformedRecord {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    pub fn account_not_found(number: AccountNumber) -> Self {
        BankError::AccountNotFound { number }
    }

    pub fn withdrawal_rejected(
        number: AccountNumber,
        balance: Decimal,
        requested: Decimal,
        floor: Decimal,
    ) -> Self {
        BankError::WithdrawalRejected {
            number,
            balance,
            requested,
            floor,
        }
    }

    pub fn malformed_record(line: Option<u64>, message: impl Into<String>) -> Self {
        BankError::MalformedRecord {
            line,
            message: message.into(),
        }
    }

    pub fn duplicate_account_number(number: AccountNumber) -> Self {
        BankError::DuplicateAccountNumber { number }
    }

    pub fn invalid_amount(amount: Decimal) -> Self {
        BankError::InvalidAmount { amount }
    }

    pub fn arithmetic_overflow(operation: &str, number: AccountNumber) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            number,
        }
    }
}
