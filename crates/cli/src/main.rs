use clap::{Parser, Subcommand};

mod commands;

use commands::{RunArgs, SnapshotArgs};

#[derive(Parser)]
#[command(name = "tse-options")]
#[command(about = "Options screener for the Tehran Stock Exchange", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh the market snapshot on a fixed interval until interrupted
    Run(RunArgs),
    /// Run one refresh cycle and print the table
    Snapshot(SnapshotArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON and CSV output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => commands::run_refresh(args).await,
        Commands::Snapshot(args) => commands::run_snapshot(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::OutputFormat;
    use tse_options_core::{Column, SortOrder};

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["tse-options", "run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.config, "config/Config.toml");
        assert_eq!(args.top, None);
    }

    #[test]
    fn test_parse_run_with_top() {
        let cli =
            Cli::try_parse_from(["tse-options", "run", "-c", "x.toml", "--top", "5"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.config, "x.toml");
        assert_eq!(args.top, Some(5));
    }

    #[test]
    fn test_parse_snapshot_options() {
        let cli = Cli::try_parse_from([
            "tse-options",
            "snapshot",
            "--filter",
            "dte:0:30",
            "--sort",
            "daily_return_pct:desc",
            "--format",
            "json",
            "--options-only",
        ])
        .unwrap();
        let Commands::Snapshot(args) = cli.command else {
            panic!("expected snapshot");
        };

        let filter = args.filter.unwrap();
        assert_eq!(filter.column, Column::Dte);
        assert!((filter.max - 30.0).abs() < f64::EPSILON);

        let sort = args.sort.unwrap();
        assert_eq!(sort.column, Column::DailyReturnPct);
        assert_eq!(sort.order, SortOrder::Descending);

        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.options_only);
    }

    #[test]
    fn test_parse_snapshot_rejects_unknown_column() {
        let result = Cli::try_parse_from(["tse-options", "snapshot", "--sort", "volume"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_snapshot_defaults_to_table() {
        let cli = Cli::try_parse_from(["tse-options", "snapshot"]).unwrap();
        let Commands::Snapshot(args) = cli.command else {
            panic!("expected snapshot");
        };
        assert_eq!(args.format, OutputFormat::Table);
        assert!(args.filter.is_none());
        assert!(args.sort.is_none());
    }
}
