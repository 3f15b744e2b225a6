//! Command-line front door: flags handled before the TUI starts.
//!
//! ```ignore
//! use judgeflow::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! let options = match run_cli_command(command) {
//!     Ok(options) => options,
//!     Err(code) => std::process::exit(code),
//! };
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, LaunchOptions};
pub use version::{version_line, VERSION};

pub const USAGE: &str = "\
Usage: judgeflow [OPTIONS]

Options:
  --api-url <URL>   Backend base URL (default: $JUDGEFLOW_API_URL or http://localhost:8000/api)
  --open <FILE>     Load a source file into the playground
  -V, --version     Print version
  -h, --help        Print this help";

/// Handle non-TUI commands. Returns the launch options for `RunTui`, or the
/// process exit code when the command was fully handled here.
pub fn run_cli_command(command: CliCommand) -> Result<LaunchOptions, i32> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Err(0)
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Err(0)
        }
        CliCommand::Invalid(message) => {
            eprintln!("error: {}\n\n{}", message, USAGE);
            Err(2)
        }
        CliCommand::RunTui(options) => Ok(options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_tui_passes_options_through() {
        let options = LaunchOptions {
            api_url: Some("http://x/api".into()),
            open: None,
        };
        assert_eq!(
            run_cli_command(CliCommand::RunTui(options.clone())),
            Ok(options)
        );
    }

    #[test]
    fn test_version_is_handled_without_tui() {
        assert_eq!(run_cli_command(CliCommand::Version), Err(0));
    }

    #[test]
    fn test_invalid_exits_with_usage_code() {
        assert_eq!(run_cli_command(CliCommand::Invalid("bad".into())), Err(2));
    }
}
