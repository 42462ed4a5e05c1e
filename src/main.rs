//! Bank Management CLI
//!
//! Interactive menu for managing savings and checking accounts.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --file /var/lib/bank/accounts.txt
//! RUST_LOG=debug cargo run -- --quiet < script.txt
//! ```
//!
//! Accounts are loaded from the file at start-up and the file is rewritten after
//! every change. Diagnostics go to stderr; set `RUST_LOG` to see more.
//!
//! # Exit Codes
//!
//! - 0: Menu exit or end of input
//! - 1: Console I/O failure

use bank_management::cli::{self, Shell};
use bank_management::AccountStore;
use std::io;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = cli::parse_args();
    let mut store = AccountStore::open(&args.accounts_file);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(
        &mut store,
        stdin.lock(),
        stdout.lock(),
        args.to_shell_config(),
    );

    if let Err(e) = shell.run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
