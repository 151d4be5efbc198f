/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: JSON results of KuCoin REST operations on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kucoin_cli::{CliConfig, Command};

#[derive(Parser, Debug)]
#[command(name = "kucoin-cli", version, about = "KuCoin spot and futures REST client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: PathBuf,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Validate configuration and build the client without calling the API
    #[arg(long = "dry-run")]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    info!(
        config_path = %args.config_path.display(),
        dry_run = args.dry_run,
        "starting kucoin-cli"
    );

    let config = load_config(&args.config_path)?;
    let credentials = config.resolve_credentials(|name| std::env::var(name).ok());
    let client = config.build_client(credentials)?;
    info!(
        spot = %client.endpoints().spot,
        futures = %client.endpoints().futures,
        authenticated = client.is_authenticated(),
        "client configured"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let Some(command) = args.command else {
        bail!("no command given; see --help");
    };
    if command.is_mutating() {
        info!(?command, "sending state-changing request");
    }

    let cancel = CancellationToken::new();
    setup_signal_handler(cancel.clone());

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(kucoin_adapter::KucoinError::Cancelled),
        result = command.run(&client) => result,
    };

    match result {
        Ok(value) => {
            let rendered = serde_json::to_string_pretty(&value).context("render result")?;
            println!("{rendered}");
            Ok(())
        }
        Err(err) => {
            if let Some(code) = err.api_code() {
                warn!(code, message = %err, "request rejected");
            }
            Err(anyhow!(err)).context("request failed")
        }
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<CliConfig> {
    let path_str = path.to_str().context("config path must be valid utf-8")?;
    CliConfig::from_file(path_str).context("load config")
}

fn setup_signal_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT; abandoning request");
        cancel.cancel();
    });
}
