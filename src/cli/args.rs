use crate::cli::shell::ShellConfig;
use crate::core::DEFAULT_ACCOUNTS_FILE;
use clap::Parser;
use std::path::PathBuf;

/// Manage savings and checking accounts stored in a flat file
#[derive(Parser, Debug)]
#[command(name = "bank-management")]
#[command(about = "Manage savings and checking accounts stored in a flat file", long_about = None)]
pub struct CliArgs {
    /// Backing file holding one account per line
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        env = "BANK_ACCOUNTS_FILE",
        default_value = DEFAULT_ACCOUNTS_FILE,
        help = "Path to the accounts file (created on first save)"
    )]
    pub accounts_file: PathBuf,

    /// Count used when the top-K prompt is left blank
    #[arg(
        long = "top-k-default",
        value_name = "N",
        default_value_t = 5,
        help = "Number of accounts shown when the top-K prompt is left blank"
    )]
    pub top_k_default: i64,

    /// Do not print the menu before each prompt
    #[arg(short = 'q', long = "quiet", help = "Suppress the menu listing")]
    pub quiet: bool,
}

impl CliArgs {
    /// Build the shell configuration from the parsed arguments
    pub fn to_shell_config(&self) -> ShellConfig {
        ShellConfig {
            top_k_default: self.top_k_default,
            show_menu: !self.quiet,
        }
    }
}
