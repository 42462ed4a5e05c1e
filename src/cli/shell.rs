//! Interactive menu
//!
//! [`Shell`] reads one answer per line from any `BufRead` and writes prompts and
//! results to any `Write`, so it runs the same against a terminal or a scripted
//! buffer. Each menu entry maps to one [`AccountStore`] operation.

use crate::core::AccountStore;
use crate::io::text_codec::parse_decimal;
use crate::types::{Account, AccountKind, AccountNumber, BankError};
use log::debug;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

const MENU: &str = "\n===== BANK MANAGEMENT SYSTEM =====\n\
1. New Account\n\
2. Deposit Amount\n\
3. Withdraw Amount\n\
4. Balance Enquiry\n\
5. All Accounts List\n\
6. Close An Account\n\
7. Modify An Account\n\
8. Show Top Accounts by Balance\n\
9. Exit\n";

/// Shell settings, built from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellConfig {
    /// Count used when the top-K prompt is answered with an empty line
    pub top_k_default: i64,
    /// Print the menu before each option prompt
    pub show_menu: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            top_k_default: 5,
            show_menu: true,
        }
    }
}

/// Why an action stopped before completing
#[derive(Debug)]
enum Interrupt {
    /// Input ended
    Eof,
    /// An answer could not be parsed; the message names the field
    Invalid(String),
    Io(io::Error),
}

impl From<io::Error> for Interrupt {
    fn from(error: io::Error) -> Self {
        Interrupt::Io(error)
    }
}

type Step<T> = Result<T, Interrupt>;

/// Menu-driven front end over an [`AccountStore`]
pub struct Shell<'a, R, W> {
    store: &'a mut AccountStore,
    input: R,
    output: W,
    config: ShellConfig,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a mut AccountStore, input: R, output: W, config: ShellConfig) -> Self {
        Shell {
            store,
            input,
            output,
            config,
        }
    }

    /// Run the menu loop until option 9 or end of input
    ///
    /// The store is saved once more on the way out.
    ///
    /// # Errors
    ///
    /// Only I/O errors on the shell's own input or output end the loop early.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            if self.config.show_menu {
                write!(self.output, "{}", MENU)?;
            }
            let choice = match self.prompt("Select Your Option (1-9): ") {
                Ok(choice) => choice,
                Err(Interrupt::Io(e)) => return Err(e),
                Err(_) => break,
            };

            let step = match choice.as_str() {
                "1" => self.create_account(),
                "2" => self.deposit(),
                "3" => self.withdraw(),
                "4" => self.balance_enquiry(),
                "5" => self.list_all(),
                "6" => self.close_account(),
                "7" => self.modify_account(),
                "8" => self.show_top_accounts(),
                "9" => {
                    writeln!(self.output, "Exiting...")?;
                    break;
                }
                _ => {
                    writeln!(self.output, "Invalid option.")?;
                    Ok(())
                }
            };

            match step {
                Ok(()) => {}
                Err(Interrupt::Invalid(message)) => {
                    writeln!(self.output, "Invalid input: {}", message)?
                }
                Err(Interrupt::Eof) => break,
                Err(Interrupt::Io(e)) => return Err(e),
            }
        }

        if let Err(e) = self.store.save() {
            writeln!(self.output, "Error: {}", e)?;
        }
        self.output.flush()
    }

    fn create_account(&mut self) -> Step<()> {
        let number = self.prompt_number("\nEnter Account Number: ")?;
        let holder = self.prompt("Enter Account Holder Name: ")?;
        let account_type = self.prompt("Enter Account Type (S for Savings, C for Checking): ")?;
        let balance = self.prompt_amount("Enter Initial Balance: ")?;

        // Anything other than S opens a checking account
        let kind = if account_type.to_ascii_uppercase().starts_with('S') {
            AccountKind::Savings {
                minimum_balance: self.prompt_amount("Enter Minimum Balance: ")?,
            }
        } else {
            AccountKind::Checking {
                overdraft_limit: self.prompt_amount("Enter Overdraft Limit: ")?,
            }
        };

        match self.store.create(Account::new(number, holder, balance, kind)) {
            Ok(()) => writeln!(self.output, "Account created successfully.")?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn deposit(&mut self) -> Step<()> {
        let Some((number, _)) = self.prompt_existing("Enter account no: ")? else {
            return Ok(());
        };
        let amount = self.prompt_amount("Enter amount to deposit: ")?;

        match self.store.deposit(number, amount) {
            Ok(balance) => {
                debug!("Account {} balance now {}", number, balance);
                writeln!(self.output, "Deposit successful.")?
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn withdraw(&mut self) -> Step<()> {
        let Some((number, _)) = self.prompt_existing("Enter account no: ")? else {
            return Ok(());
        };
        let amount = self.prompt_amount("Enter amount to withdraw: ")?;

        match self.store.withdraw(number, amount) {
            Ok(balance) => {
                debug!("Account {} balance now {}", number, balance);
                writeln!(self.output, "Withdrawal successful.")?
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn balance_enquiry(&mut self) -> Step<()> {
        let number = self.prompt_number("Enter account no: ")?;

        match self.store.find(number) {
            Some(account) => writeln!(self.output, "\nAccount Details:\n{}", account)?,
            None => self.report(&BankError::account_not_found(number))?,
        }
        Ok(())
    }

    fn list_all(&mut self) -> Step<()> {
        writeln!(
            self.output,
            "{:<10}{:<20}{:<6}Balance (plus params)",
            "AccNo", "Name", "Type"
        )?;
        writeln!(self.output, "{}", "-".repeat(60))?;
        for row in self.store.list_all() {
            writeln!(self.output, "{}", row)?;
        }
        Ok(())
    }

    fn close_account(&mut self) -> Step<()> {
        let number = self.prompt_number("Enter account no: ")?;

        match self.store.close(number) {
            Ok(_) => writeln!(self.output, "Account closed.")?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn modify_account(&mut self) -> Step<()> {
        let Some((number, kind)) = self.prompt_existing("Enter account no: ")? else {
            return Ok(());
        };

        let holder = self.prompt("Enter new holder name: ")?;
        let balance = self.prompt_amount("Enter new balance: ")?;
        let parameter = match kind {
            AccountKind::Savings { .. } => self.prompt_amount("Enter new minimum balance: ")?,
            AccountKind::Checking { .. } => self.prompt_amount("Enter new overdraft limit: ")?,
        };

        match self.store.modify(number, holder, balance, parameter) {
            Ok(()) => writeln!(self.output, "Account modified.")?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn show_top_accounts(&mut self) -> Step<()> {
        let answer = self.prompt("Enter number of top accounts to display: ")?;
        let k = if answer.is_empty() {
            self.config.top_k_default
        } else {
            answer
                .parse::<i64>()
                .map_err(|_| Interrupt::Invalid(format!("'{}' is not a count", answer)))?
        };

        let top = match self.store.top_k(k) {
            Ok(top) => top,
            Err(e) => {
                self.report(&e)?;
                return Ok(());
            }
        };

        writeln!(self.output, "\nTop {} Accounts by Balance:", top.len())?;
        writeln!(
            self.output,
            "{:<10}{:<20}{:<6}Balance",
            "AccNo", "Name", "Type"
        )?;
        writeln!(self.output, "{}", "-".repeat(50))?;
        for account in top {
            writeln!(self.output, "{}", account)?;
        }
        Ok(())
    }

    /// Print a user-facing message for a failed operation
    fn report(&mut self, error: &BankError) -> io::Result<()> {
        match error {
            BankError::AccountNotFound { .. } => writeln!(self.output, "Account not found."),
            BankError::WithdrawalRejected { .. } => {
                writeln!(self.output, "Withdrawal failed (limits reached).")
            }
            BankError::NoAccounts => writeln!(self.output, "No accounts available."),
            other => writeln!(self.output, "Error: {}", other),
        }
    }

    /// Print `label` and read one trimmed line
    fn prompt(&mut self, label: &str) -> Step<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Interrupt::Eof);
        }
        Ok(line.trim().to_string())
    }

    fn prompt_number(&mut self, label: &str) -> Step<AccountNumber> {
        let answer = self.prompt(label)?;
        answer
            .parse()
            .map_err(|_| Interrupt::Invalid(format!("'{}' is not an account number", answer)))
    }

    /// Ask for an account number and report "not found" straight away
    ///
    /// Yields the number together with the account's current variant.
    fn prompt_existing(&mut self, label: &str) -> Step<Option<(AccountNumber, AccountKind)>> {
        let number = self.prompt_number(label)?;
        match self.store.find(number) {
            Some(account) => Ok(Some((number, account.kind))),
            None => {
                self.report(&BankError::account_not_found(number))?;
                Ok(None)
            }
        }
    }

    fn prompt_amount(&mut self, label: &str) -> Step<Decimal> {
        let answer = self.prompt(label)?;
        parse_decimal(&answer)
            .ok_or_else(|| Interrupt::Invalid(format!("'{}' is not an amount", answer)))
    }
}
