// CLI module
// Command-line argument parsing and the interactive menu

mod args;
pub mod shell;

pub use args::CliArgs;
pub use shell::{Shell, ShellConfig};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments or `--help`), clap prints the error or
/// help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
