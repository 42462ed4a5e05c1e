//! Account store
//!
//! This module provides the [`AccountStore`], the in-memory ordered collection
//! of accounts backed by a flat file.
//!
//! The AccountStore is responsible for:
//! - Loading the backing file once at start-up, skipping malformed lines
//! - Keeping account numbers unique
//! - Rewriting the whole file after every successful mutation, and rolling
//!   the mutation back when that write fails
//! - Answering lookups, listings and top-K queries in insertion order

use crate::core::top_k::top_k;
use crate::io::account_file::{write_accounts, AccountFileReader};
use crate::types::{Account, AccountNumber, BankError};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default backing file name
pub const DEFAULT_ACCOUNTS_FILE: &str = "accounts.txt";

/// In-memory account collection persisted to a flat file
#[derive(Debug)]
pub struct AccountStore {
    path: PathBuf,
    /// Accounts in insertion order
    accounts: Vec<Account>,
}

impl AccountStore {
    /// Open the store at `path` and load whatever it already holds
    ///
    /// A missing or unreadable file is not an error: the store simply starts
    /// empty and the file is created by the first save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = AccountStore {
            path: path.into(),
            accounts: Vec::new(),
        };
        store.load();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory collection with the contents of the backing file
    ///
    /// Lines the codec rejects are skipped, as are lines repeating an account
    /// number seen earlier in the file. Both are logged, never surfaced.
    ///
    /// # Returns
    ///
    /// The number of accounts loaded
    pub fn load(&mut self) -> usize {
        self.accounts.clear();

        let reader = match AccountFileReader::new(&self.path) {
            Ok(reader) => reader,
            Err(e) => {
                if self.path.exists() {
                    warn!("Cannot read {}, starting empty: {}", self.path.display(), e);
                } else {
                    info!("No accounts file at {}, starting empty", self.path.display());
                }
                return 0;
            }
        };

        let mut seen = HashSet::new();
        for result in reader {
            match result {
                Ok(account) if !seen.insert(account.number) => {
                    warn!(
                        "Skipping duplicate account number {} in {}",
                        account.number,
                        self.path.display()
                    );
                }
                Ok(account) => self.accounts.push(account),
                Err(e) => warn!("Skipping record in {}: {}", self.path.display(), e),
            }
        }

        debug!(
            "Loaded {} accounts from {}",
            self.accounts.len(),
            self.path.display()
        );
        self.accounts.len()
    }

    /// Truncate the backing file and write every account to it
    pub fn save(&self) -> Result<(), BankError> {
        write_accounts(&self.path, &self.accounts)?;
        debug!(
            "Saved {} accounts to {}",
            self.accounts.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Write the collection, undoing the last mutation if the write fails
    fn save_or_rollback(
        &mut self,
        rollback: impl FnOnce(&mut Vec<Account>),
    ) -> Result<(), BankError> {
        if let Err(e) = self.save() {
            warn!("Save to {} failed, rolling back: {}", self.path.display(), e);
            rollback(&mut self.accounts);
            return Err(e);
        }
        Ok(())
    }

    /// Add a new account and persist
    ///
    /// The holder name is trimmed and line breaks in it become spaces.
    ///
    /// # Errors
    ///
    /// - `DuplicateAccountNumber` if the number is already taken
    /// - `IoError` if the file cannot be written; the account is not added
    pub fn create(&mut self, mut account: Account) -> Result<(), BankError> {
        if self.find(account.number).is_some() {
            return Err(BankError::duplicate_account_number(account.number));
        }
        account.holder = normalize_holder(&account.holder);

        info!("Creating account {}", account.number);
        self.accounts.push(account);
        self.save_or_rollback(|accounts| {
            accounts.pop();
        })
    }

    /// Look up an account by number
    pub fn find(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|account| account.number == number)
    }

    fn position(&self, number: AccountNumber) -> Result<usize, BankError> {
        self.accounts
            .iter()
            .position(|account| account.number == number)
            .ok_or_else(|| BankError::account_not_found(number))
    }

    /// Apply `change` to one account and persist, restoring it if the save fails
    fn update<T>(
        &mut self,
        number: AccountNumber,
        change: impl FnOnce(&mut Account) -> Result<T, BankError>,
    ) -> Result<T, BankError> {
        let index = self.position(number)?;
        let previous = self.accounts[index].clone();
        let result = change(&mut self.accounts[index])?;

        self.save_or_rollback(|accounts| accounts[index] = previous)?;
        Ok(result)
    }

    /// Deposit into an account and persist
    ///
    /// # Returns
    ///
    /// The new balance
    pub fn deposit(
        &mut self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Decimal, BankError> {
        self.update(number, |account| {
            account.deposit(amount)?;
            Ok(account.balance)
        })
    }

    /// Withdraw from an account and persist
    ///
    /// A rejected withdrawal changes nothing and writes nothing.
    ///
    /// # Returns
    ///
    /// The new balance
    pub fn withdraw(
        &mut self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Decimal, BankError> {
        self.update(number, |account| {
            account.withdraw(amount)?;
            Ok(account.balance)
        })
    }

    /// Overwrite holder name, balance and variant parameter, then persist
    ///
    /// The account keeps its variant. No floor check is made here: modify is an
    /// administrative override and may leave the balance below the floor.
    pub fn modify(
        &mut self,
        number: AccountNumber,
        holder: impl Into<String>,
        balance: Decimal,
        parameter: Decimal,
    ) -> Result<(), BankError> {
        let holder = normalize_holder(&holder.into());

        self.update(number, |account| {
            account.holder = holder;
            account.balance = balance;
            account.kind = account.kind.with_parameter(parameter);

            if account.balance < account.floor() {
                warn!(
                    "Account {} modified to balance {} below its floor {}",
                    number,
                    account.balance,
                    account.floor()
                );
            }
            Ok(())
        })
    }

    /// Remove every account with this number and persist
    ///
    /// # Returns
    ///
    /// How many accounts were removed (at most one while numbers stay unique)
    pub fn close(&mut self, number: AccountNumber) -> Result<usize, BankError> {
        if self.find(number).is_none() {
            return Err(BankError::account_not_found(number));
        }

        let previous = self.accounts.clone();
        self.accounts.retain(|account| account.number != number);
        let removed = previous.len() - self.accounts.len();

        self.save_or_rollback(|accounts| *accounts = previous)?;
        info!("Closed account {}", number);
        Ok(removed)
    }

    /// Display rows for every account, in insertion order
    pub fn list_all(&self) -> Vec<String> {
        self.accounts.iter().map(Account::to_string).collect()
    }

    /// Up to `k` accounts ordered by descending balance
    ///
    /// # Errors
    ///
    /// Returns `NoAccounts` when the store is empty, whatever `k` is.
    /// A non-positive `k` on a non-empty store yields an empty list.
    pub fn top_k(&self, k: i64) -> Result<Vec<&Account>, BankError> {
        if self.accounts.is_empty() {
            return Err(BankError::NoAccounts);
        }
        if k <= 0 {
            return Ok(Vec::new());
        }

        let k = usize::try_from(k).unwrap_or(usize::MAX);
        Ok(top_k(&self.accounts, k))
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Trim a holder name and fold any line breaks into single spaces
///
/// The backing file trims every field and holds one record per line, so
/// anything else would not load back as written. Commas are kept but logged:
/// such a record is dropped on the next load.
fn normalize_holder(holder: &str) -> String {
    let normalized = holder
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if normalized != holder {
        debug!("Holder name {:?} stored as {:?}", holder, normalized);
    }
    if normalized.contains(',') {
        warn!(
            "Holder name '{}' contains a comma and will not load back correctly",
            normalized
        );
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    /// Empty store backed by a fresh temp directory
    fn empty_store() -> (TempDir, AccountStore) {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = AccountStore::open(dir.path().join(DEFAULT_ACCOUNTS_FILE));
        (dir, store)
    }

    fn store_with(content: &str) -> (TempDir, AccountStore) {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(DEFAULT_ACCOUNTS_FILE);
        fs::write(&path, content).expect("Failed to seed accounts file");
        let store = AccountStore::open(path);
        (dir, store)
    }

    fn file_content(store: &AccountStore) -> String {
        fs::read_to_string(store.path()).unwrap()
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let (_dir, store) = empty_store();
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let (_dir, store) = store_with(
            "S,100,Alice,500,100\n\
             garbage\n\
             X,5,Nobody,1,1\n\
             C,200,Bob,0,100\n\
             S,300,Smith, John,1,1\n",
        );

        assert_eq!(store.len(), 2);
        assert_eq!(store.accounts()[0].number, 100);
        assert_eq!(store.accounts()[1].number, 200);
    }

    #[test]
    fn test_load_keeps_first_of_duplicate_numbers() {
        let (_dir, store) = store_with("S,1,First,10,0\nC,1,Second,20,0\n");

        assert_eq!(store.len(), 1);
        assert_eq!(store.find(1).unwrap().holder, "First");
    }

    #[test]
    fn test_create_persists_immediately() {
        let (_dir, mut store) = empty_store();

        store
            .create(Account::savings(100, "Alice", dec(500), dec(100)))
            .unwrap();

        assert_eq!(file_content(&store), "S,100,Alice,500,100\n");
    }

    #[test]
    fn test_create_rejects_duplicate_number() {
        let (_dir, mut store) = empty_store();
        store
            .create(Account::savings(100, "Alice", dec(500), dec(100)))
            .unwrap();

        let result = store.create(Account::checking(100, "Mallory", dec(1), dec(1)));

        assert_eq!(result, Err(BankError::duplicate_account_number(100)));
        assert_eq!(store.len(), 1);
        assert_eq!(file_content(&store), "S,100,Alice,500,100\n");
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_dir, mut store) = empty_store();
        let accounts = vec![
            Account::savings(100, "Alice", Decimal::new(50025, 2), dec(100)),
            Account::checking(200, "Bob Jones", dec(-80), Decimal::new(1005, 1)),
            Account::savings(7, "Eve", dec(0), dec(0)),
        ];
        for account in accounts.clone() {
            store.create(account).unwrap();
        }

        let reopened = AccountStore::open(store.path());

        assert_eq!(reopened.accounts(), accounts.as_slice());
    }

    #[test]
    fn test_find() {
        let (_dir, store) = store_with("S,100,Alice,500,100\n");

        assert_eq!(store.find(100).map(|a| a.holder.as_str()), Some("Alice"));
        assert!(store.find(101).is_none());
    }

    #[test]
    fn test_savings_scenario_through_store() {
        let (_dir, mut store) = empty_store();
        store
            .create(Account::savings(100, "Alice", dec(500), dec(100)))
            .unwrap();

        let rejected = store.withdraw(100, dec(450));
        assert!(matches!(rejected, Err(BankError::WithdrawalRejected { .. })));
        assert_eq!(file_content(&store), "S,100,Alice,500,100\n");

        assert_eq!(store.withdraw(100, dec(300)), Ok(dec(200)));
        assert_eq!(file_content(&store), "S,100,Alice,200,100\n");
    }

    #[test]
    fn test_checking_scenario_through_store() {
        let (_dir, mut store) = empty_store();
        store
            .create(Account::checking(200, "Bob", dec(0), dec(100)))
            .unwrap();

        assert_eq!(store.withdraw(200, dec(80)), Ok(dec(-80)));
        assert!(matches!(
            store.withdraw(200, dec(30)),
            Err(BankError::WithdrawalRejected { .. })
        ));
        assert_eq!(store.find(200).unwrap().balance, dec(-80));
    }

    #[test]
    fn test_deposit_persists_new_balance() {
        let (_dir, mut store) = store_with("C,200,Bob,-80,100\n");

        assert_eq!(store.deposit(200, Decimal::new(1050, 1)), Ok(Decimal::new(250, 1)));
        assert_eq!(file_content(&store), "C,200,Bob,25,100\n");
    }

    #[test]
    fn test_operations_on_unknown_account() {
        let (_dir, mut store) = store_with("S,100,Alice,500,100\n");
        let not_found = Err(BankError::account_not_found(9));

        assert_eq!(store.deposit(9, dec(1)), not_found);
        assert_eq!(store.withdraw(9, dec(1)), not_found);
        assert_eq!(store.modify(9, "X", dec(1), dec(1)), Err(BankError::account_not_found(9)));
        assert_eq!(store.close(9), Err(BankError::account_not_found(9)));
        assert_eq!(store.len(), 1);
        assert_eq!(file_content(&store), "S,100,Alice,500,100\n");
    }

    #[test]
    fn test_modify_keeps_variant_and_skips_floor_check() {
        let (_dir, mut store) = store_with("S,100,Alice,500,100\nC,200,Bob,0,100\n");

        store.modify(100, "Alice Cooper", dec(50), dec(75)).unwrap();
        store.modify(200, "Robert", dec(-10), dec(20)).unwrap();

        assert_eq!(
            store.find(100).unwrap(),
            &Account::savings(100, "Alice Cooper", dec(50), dec(75))
        );
        assert_eq!(
            store.find(200).unwrap(),
            &Account::checking(200, "Robert", dec(-10), dec(20))
        );
        assert_eq!(
            file_content(&store),
            "S,100,Alice Cooper,50,75\nC,200,Robert,-10,20\n"
        );
    }

    #[test]
    fn test_close_removes_and_persists() {
        let (_dir, mut store) = store_with("S,1,A,1,0\nS,2,B,2,0\nS,3,C,3,0\n");

        assert_eq!(store.close(2), Ok(1));

        assert_eq!(store.len(), 2);
        assert!(store.find(2).is_none());
        assert_eq!(file_content(&store), "S,1,A,1,0\nS,3,C,3,0\n");
    }

    #[test]
    fn test_list_all_in_insertion_order() {
        let (_dir, store) = store_with("S,300,Zed,1,0\nC,100,Amy,2,5\n");

        let rows = store.list_all();

        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("300"));
        assert!(rows[1].starts_with("100"));
        assert!(rows[1].ends_with("(Overdraft=5.00)"));
    }

    #[test]
    fn test_top_k_scenario() {
        let (_dir, store) = store_with("S,1,A,100,0\nS,2,B,500,0\nS,3,C,250,0\n");

        let top: Vec<AccountNumber> = store.top_k(2).unwrap().iter().map(|a| a.number).collect();

        assert_eq!(top, vec![2, 3]);
    }

    #[test]
    fn test_top_k_edge_cases() {
        let (_dir, empty) = empty_store();
        assert_eq!(empty.top_k(3), Err(BankError::NoAccounts));
        assert_eq!(empty.top_k(0), Err(BankError::NoAccounts));

        let (_dir2, store) = store_with("S,1,A,100,0\nS,2,B,500,0\n");
        assert!(store.top_k(0).unwrap().is_empty());
        assert!(store.top_k(-4).unwrap().is_empty());
        assert_eq!(store.top_k(10).unwrap().len(), 2);
    }

    #[test]
    fn test_failed_create_is_rolled_back() {
        let dir = tempdir().unwrap();
        let mut store = AccountStore::open(dir.path().join("missing_dir").join("accounts.txt"));

        let result = store.create(Account::savings(1, "A", dec(1), dec(0)));

        assert!(matches!(result, Err(BankError::IoError { .. })));
        assert!(store.is_empty());

        // Retrying hits the same I/O error, not a duplicate number
        let retry = store.create(Account::savings(1, "A", dec(1), dec(0)));
        assert!(matches!(retry, Err(BankError::IoError { .. })));
    }

    /// Store loaded from disk whose backing path is then replaced by a directory
    fn unwritable_store(content: &str) -> (TempDir, AccountStore) {
        let (dir, store) = store_with(content);
        fs::remove_file(store.path()).unwrap();
        fs::create_dir(store.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_failed_balance_changes_are_rolled_back() {
        let (_dir, mut store) = unwritable_store("S,1,Ann,10,0\n");
        let before = store.find(1).cloned();

        assert!(matches!(store.deposit(1, dec(1)), Err(BankError::IoError { .. })));
        assert_eq!(store.find(1).cloned(), before);

        assert!(matches!(store.withdraw(1, dec(5)), Err(BankError::IoError { .. })));
        assert_eq!(store.find(1).cloned(), before);
    }

    #[test]
    fn test_failed_modify_and_close_are_rolled_back() {
        let (_dir, mut store) = unwritable_store("S,1,Ann,10,0\nC,2,Ben,5,50\n");
        let before = store.accounts().to_vec();

        let modified = store.modify(2, "Benjamin", dec(-20), dec(25));
        assert!(matches!(modified, Err(BankError::IoError { .. })));
        assert_eq!(store.accounts(), before.as_slice());

        assert!(matches!(store.close(1), Err(BankError::IoError { .. })));
        assert_eq!(store.accounts(), before.as_slice());
    }

    #[test]
    fn test_holder_names_are_normalized_for_round_trip() {
        let (_dir, mut store) = empty_store();

        store
            .create(Account::savings(1, " Ann ", dec(1), dec(0)))
            .unwrap();
        store
            .create(Account::checking(2, "Ben\nLee\r\n", dec(2), dec(0)))
            .unwrap();
        store.create(Account::savings(3, "Cy", dec(3), dec(0))).unwrap();
        store.modify(3, "\tCy Young  ", dec(3), dec(0)).unwrap();

        assert_eq!(store.find(1).unwrap().holder, "Ann");
        assert_eq!(store.find(2).unwrap().holder, "Ben Lee");
        assert_eq!(store.find(3).unwrap().holder, "Cy Young");

        let reopened = AccountStore::open(store.path());
        assert_eq!(reopened.accounts(), store.accounts());
    }
}
