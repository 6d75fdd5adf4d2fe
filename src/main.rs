use anyhow::{Context, Result};
use clap::Parser;
use palette_analyzer::{Config, WorkspaceAnalyzer, WorkspaceSnapshot};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

/// Analyze a React or Vue workspace and print its snapshot
#[derive(Debug, Parser)]
#[command(name = "palette-analyzer", version = VERSION, about)]
struct Cli {
    /// Workspace root to analyze
    #[arg(required_unless_present = "schema")]
    root: Option<PathBuf>,

    /// Configuration file (TOML); defaults to the platform config location
    #[arg(long, env = "PALETTE_CONFIG")]
    config: Option<PathBuf>,

    /// Print the prompt context instead of JSON
    #[arg(long)]
    summary: bool,

    /// Maximum number of components listed by --summary
    #[arg(long, default_value_t = 50)]
    limit: usize,

    /// Print the JSON schema of the snapshot and exit
    #[arg(long)]
    schema: bool,

    /// Keep running and re-analyze after every change
    #[arg(long)]
    watch: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_env_overrides();
            config.validate()?;
            config
        }
        None => Config::new()?,
    };
    Ok(config)
}

fn print_snapshot(snapshot: &WorkspaceSnapshot, cli: &Cli) -> Result<()> {
    if cli.summary {
        println!("{}", snapshot.prompt_context(cli.limit));
    } else {
        println!("{}", snapshot.to_json()?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.schema {
        let schema = WorkspaceSnapshot::json_schema();
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let root = cli.root.clone().context("A workspace root is required")?;
    let config = load_config(cli.config.as_ref())?;
    let analyzer = WorkspaceAnalyzer::with_config(&root, config)?;

    let snapshot = analyzer.analyze_workspace().await?;
    print_snapshot(&snapshot, &cli)?;

    if !cli.watch {
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let watch = {
        let analyzer = analyzer.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { analyzer.watch_until(cancel, Some(tx)).await })
    };

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, shutting down");
                cancel.cancel();
                break;
            }
            update = rx.recv() => match update {
                Some(snapshot) => print_snapshot(&snapshot, &cli)?,
                None => break,
            },
        }
    }

    watch.await.context("Watch task failed")??;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_root_and_flags() {
        let cli = Cli::parse_from(["palette-analyzer", "./app", "--summary", "--limit", "5"]);
        assert_eq!(cli.root, Some(PathBuf::from("./app")));
        assert!(cli.summary);
        assert_eq!(cli.limit, 5);
        assert!(!cli.watch);
    }

    #[test]
    fn schema_does_not_need_a_root() {
        let cli = Cli::parse_from(["palette-analyzer", "--schema"]);
        assert!(cli.schema);
        assert!(cli.root.is_none());
    }

    #[test]
    fn root_is_required_otherwise() {
        assert!(Cli::try_parse_from(["palette-analyzer", "--watch"]).is_err());
    }
}
