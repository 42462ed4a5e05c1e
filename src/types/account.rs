//! Account-related types for the bank management system
//!
//! This module defines the [`Account`] structure and its two variants. Variant
//! behaviour (withdrawal rule, display label, file tag) is selected by matching
//! on [`AccountKind`].

use super::error::BankError;
use rust_decimal::Decimal;
use std::fmt;

/// Account identifier, supplied by the caller when the account is created
pub type AccountNumber = u32;

/// The variant of an account together with its variant-specific parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Balance may never be withdrawn below `minimum_balance`
    Savings { minimum_balance: Decimal },

    /// Balance may go negative, down to `-overdraft_limit`
    Checking { overdraft_limit: Decimal },
}

impl AccountKind {
    /// Single-letter tag used in the backing file and the account listing
    pub fn tag(&self) -> char {
        match self {
            AccountKind::Savings { .. } => 'S',
            AccountKind::Checking { .. } => 'C',
        }
    }

    /// Build a kind from its file tag and parameter
    ///
    /// Returns `None` for any tag other than `S` or `C`.
    pub fn from_tag(tag: char, parameter: Decimal) -> Option<Self> {
        match tag {
            'S' => Some(AccountKind::Savings {
                minimum_balance: parameter,
            }),
            'C' => Some(AccountKind::Checking {
                overdraft_limit: parameter,
            }),
            _ => None,
        }
    }

    /// The variant parameter (minimum balance or overdraft limit)
    pub fn parameter(&self) -> Decimal {
        match *self {
            AccountKind::Savings { minimum_balance } => minimum_balance,
            AccountKind::Checking { overdraft_limit } => overdraft_limit,
        }
    }

    /// Replace the variant parameter, keeping the variant itself
    pub fn with_parameter(self, parameter: Decimal) -> Self {
        match self {
            AccountKind::Savings { .. } => AccountKind::Savings {
                minimum_balance: parameter,
            },
            AccountKind::Checking { .. } => AccountKind::Checking {
                overdraft_limit: parameter,
            },
        }
    }

    /// Lowest balance a withdrawal is allowed to leave behind
    pub fn floor(&self) -> Decimal {
        match *self {
            AccountKind::Savings { minimum_balance } => minimum_balance,
            AccountKind::Checking { overdraft_limit } => -overdraft_limit,
        }
    }

    fn parameter_label(&self) -> &'static str {
        match self {
            AccountKind::Savings { .. } => "MinBal",
            AccountKind::Checking { .. } => "Overdraft",
        }
    }
}

/// A single bank account
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique key within the store
    pub number: AccountNumber,

    /// Account holder name. Must not contain a comma to survive a save/load cycle.
    pub holder: String,

    /// Current balance; negative only for overdrawn checking accounts
    pub balance: Decimal,

    pub kind: AccountKind,
}

impl Account {
    pub fn new(
        number: AccountNumber,
        holder: impl Into<String>,
        balance: Decimal,
        kind: AccountKind,
    ) -> Self {
        Account {
            number,
            holder: holder.into(),
            balance,
            kind,
        }
    }

    pub fn savings(
        number: AccountNumber,
        holder: impl Into<String>,
        balance: Decimal,
        minimum_balance: Decimal,
    ) -> Self {
        Self::new(number, holder, balance, AccountKind::Savings { minimum_balance })
    }

    pub fn checking(
        number: AccountNumber,
        holder: impl Into<String>,
        balance: Decimal,
        overdraft_limit: Decimal,
    ) -> Self {
        Self::new(number, holder, balance, AccountKind::Checking { overdraft_limit })
    }

    pub fn tag(&self) -> char {
        self.kind.tag()
    }

    pub fn floor(&self) -> Decimal {
        self.kind.floor()
    }

    /// Credit funds to the account
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is negative
    /// - `ArithmeticOverflow` if the new balance does not fit in a `Decimal`
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), BankError> {
        if amount < Decimal::ZERO {
            return Err(BankError::invalid_amount(amount));
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("deposit", self.number))?;

        Ok(())
    }

    /// Debit funds from the account if the variant's floor allows it
    ///
    /// Savings accounts must stay at or above their minimum balance, checking
    /// accounts at or above minus their overdraft limit. A rejected withdrawal
    /// leaves the balance untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is negative
    /// - `WithdrawalRejected` if the balance would drop below the floor
    /// - `ArithmeticOverflow` if the subtraction overflows
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), BankError> {
        if amount < Decimal::ZERO {
            return Err(BankError::invalid_amount(amount));
        }

        let remaining = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("withdrawal", self.number))?;

        let floor = self.floor();
        if remaining < floor {
            return Err(BankError::withdrawal_rejected(
                self.number,
                self.balance,
                amount,
                floor,
            ));
        }

        self.balance = remaining;
        Ok(())
    }
}

/// Fixed-width summary row: number, name, type, balance and the variant parameter
impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10}{:<20}{:<6}{:.2}  ({}={:.2})",
            self.number,
            self.holder,
            self.tag(),
            self.balance,
            self.kind.parameter_label(),
            self.kind.parameter()
        )
    }
}
