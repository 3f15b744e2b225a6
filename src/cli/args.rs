//! Command-line argument parsing.

use std::path::PathBuf;

/// Options that shape the interactive session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchOptions {
    /// Overrides `JUDGEFLOW_API_URL` and the built-in default.
    pub api_url: Option<String>,
    /// Source file to load into the playground on startup.
    pub open: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Version,
    Help,
    /// Run the TUI (default).
    RunTui(LaunchOptions),
    /// Unknown flag or a flag missing its value.
    Invalid(String),
}

/// Parse command-line arguments. The first item is the program name.
///
/// ```
/// use judgeflow::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["judgeflow".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut options = LaunchOptions::default();
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--api-url" => match args.next() {
                Some(url) => options.api_url = Some(url),
                None => return CliCommand::Invalid("--api-url requires a value".into()),
            },
            "--open" => match args.next() {
                Some(path) => options.open = Some(PathBuf::from(path)),
                None => return CliCommand::Invalid("--open requires a file path".into()),
            },
            other => {
                if let Some(url) = other.strip_prefix("--api-url=") {
                    options.api_url = Some(url.to_string());
                } else if let Some(path) = other.strip_prefix("--open=") {
                    options.open = Some(PathBuf::from(path));
                } else {
                    return CliCommand::Invalid(format!("unknown argument: {}", other));
                }
            }
        }
    }
    CliCommand::RunTui(options)
}
