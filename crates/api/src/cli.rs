//! Command-line interface.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "integration-app", version, about = "Integration backend API server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run migrations and serve the HTTP API (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// Check database connectivity and print the effective configuration
    Health,
}

impl Cli {
    /// The subcommand to run; `serve` when none is given.
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::try_parse_from(["integration-app"]).unwrap();
        assert_eq!(cli.command(), Command::Serve);
    }

    #[test]
    fn test_parses_subcommands() {
        let cli = Cli::try_parse_from(["integration-app", "migrate"]).unwrap();
        assert_eq!(cli.command(), Command::Migrate);

        let cli = Cli::try_parse_from(["integration-app", "health"]).unwrap();
        assert_eq!(cli.command(), Command::Health);
    }

    #[test]
    fn test_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["integration-app", "dance"]).is_err());
    }
}
