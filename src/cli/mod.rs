//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Sluice using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Sluice - Sailthru to BigQuery ETL Tool
#[derive(Parser, Debug)]
#[command(name = "sluice")]
#[command(version, about, long_about = None)]
#[command(author = "Sluice Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        default_value = "sluice.toml",
        env = "SLUICE_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "SLUICE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Debug logging (same as --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run everything but skip the BigQuery loads
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Level to initialize logging with
    ///
    /// `--log-level` wins over `--verbose`, which wins over the configured level.
    pub fn effective_log_level(&self, configured: Option<&str>) -> String {
        if let Some(level) = &self.log_level {
            return level.clone();
        }
        if self.verbose {
            return "debug".to_string();
        }
        configured.unwrap_or("info").to_string()
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export one blast's recipient data into BigQuery
    Blast(commands::blast::BlastArgs),

    /// Export campaign metadata for a status and date range
    Campaigns(commands::campaigns::CampaignsArgs),

    /// Daily export: sent campaigns, then every recent blast
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CampaignStatus;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["sluice", "export"]);
        assert_eq!(cli.config, "sluice.toml");
        assert!(!cli.dry_run);
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["sluice", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["sluice", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_blast() {
        let cli = Cli::parse_from(["sluice", "blast", "--blast_id", "8260012"]);
        match cli.command {
            Commands::Blast(args) => assert_eq!(args.blast_id.as_str(), "8260012"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_blast_dash_alias() {
        let cli = Cli::parse_from(["sluice", "blast", "--blast-id", "17"]);
        assert!(matches!(cli.command, Commands::Blast(ref a) if a.blast_id.as_str() == "17"));
    }

    #[test]
    fn test_cli_rejects_bad_blast_id() {
        assert!(Cli::try_parse_from(["sluice", "blast", "--blast_id", "1;drop"]).is_err());
        assert!(Cli::try_parse_from(["sluice", "blast"]).is_err());
    }

    #[test]
    fn test_cli_parse_campaigns() {
        let cli = Cli::parse_from([
            "sluice",
            "campaigns",
            "--status",
            "sent",
            "--start_date",
            "January 1 2017",
            "--end_date",
            "January 13 2017",
        ]);
        match cli.command {
            Commands::Campaigns(args) => {
                assert_eq!(args.status, CampaignStatus::Sent);
                assert_eq!(args.start_date, "January 1 2017");
                assert_eq!(args.end_date, "January 13 2017");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_status() {
        let result = Cli::try_parse_from([
            "sluice",
            "campaigns",
            "--status",
            "archived",
            "--start-date",
            "January 1 2017",
            "--end-date",
            "January 13 2017",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_verbose_after_subcommand() {
        let cli = Cli::parse_from(["sluice", "export", "-v", "--dry-run"]);
        assert!(cli.verbose);
        assert!(cli.dry_run);
        assert_eq!(cli.effective_log_level(Some("warn")), "debug");
    }

    #[test]
    fn test_effective_log_level_precedence() {
        let cli = Cli::parse_from(["sluice", "-v", "-l", "trace", "export"]);
        assert_eq!(cli.effective_log_level(Some("warn")), "trace");

        let cli = Cli::parse_from(["sluice", "export"]);
        assert_eq!(cli.effective_log_level(Some("warn")), "warn");
        assert_eq!(cli.effective_log_level(None), "info");
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["sluice", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["sluice", "init", "--output", "out.toml", "--force"]);
        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.output, "out.toml");
                assert!(args.force);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
