//! Integration tests for the command-line surface

use clap::Parser;
use sluice::cli::{Cli, Commands};
use sluice::domain::CampaignStatus;

#[test]
fn test_campaigns_accepts_dashed_aliases() {
    let cli = Cli::parse_from([
        "sluice",
        "--config",
        "/etc/sluice/prod.toml",
        "campaigns",
        "--status",
        "scheduled",
        "--start-date",
        "March 1 2018",
        "--end-date",
        "March 31 2018",
    ]);

    assert_eq!(cli.config, "/etc/sluice/prod.toml");
    match cli.command {
        Commands::Campaigns(args) => {
            assert_eq!(args.status, CampaignStatus::Scheduled);
            assert_eq!(args.start_date, "March 1 2018");
            assert_eq!(args.end_date, "March 31 2018");
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_campaigns_requires_all_arguments() {
    let result = Cli::try_parse_from(["sluice", "campaigns", "--status", "sent"]);
    assert!(result.is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "sluice",
        "blast",
        "--blast_id",
        "8260012",
        "--dry-run",
        "-c",
        "other.toml",
    ]);
    assert!(cli.dry_run);
    assert_eq!(cli.config, "other.toml");
}

#[test]
fn test_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["sluice", "status"]).is_err());
}

#[tokio::test]
async fn test_init_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sluice.toml");
    let path_str = path.to_str().unwrap();

    let cli = Cli::parse_from(["sluice", "init", "--output", path_str]);
    let Commands::Init(init) = cli.command else {
        panic!("expected init");
    };
    assert_eq!(init.execute().await.unwrap(), 0);
    assert!(path.exists());

    // The sample references unset credentials, so validation reports a
    // configuration error until they are provided.
    let contents = std::fs::read_to_string(&path)
        .unwrap()
        .replace("${SAILTHRU_API_KEY}", "key")
        .replace("${SAILTHRU_API_SECRET}", "secret");
    std::fs::write(&path, contents).unwrap();

    let cli = Cli::parse_from(["sluice", "--config", path_str, "validate-config"]);
    let Commands::ValidateConfig(validate) = cli.command else {
        panic!("expected validate-config");
    };
    assert_eq!(validate.execute(&cli.config).await.unwrap(), 0);
}
