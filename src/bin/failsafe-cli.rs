use clap::{Parser, Subcommand};
use std::path::PathBuf;

use scaling_failsafe::config::{load_config, FailsafeConfig};
use scaling_failsafe::failsafe::{CircuitBreaker, Initiator};
use scaling_failsafe::lifecycle::startup;
use scaling_failsafe::observability::logging;

#[derive(Parser)]
#[command(name = "failsafe-cli")]
#[command(about = "Operator CLI for the scaling failsafe circuit breaker", long_about = None)]
struct Cli {
    /// Path to the daemon's TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the persisted failsafe state
    Status,
    /// Place every running daemon in failsafe mode
    Enable,
    /// Clear failsafe mode and permit scaling again
    Disable,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FailsafeConfig::default(),
    };
    logging::init_logging(&config.observability);

    let breaker = CircuitBreaker::new(startup::build_breaker_config(&config)?);
    let cluster = breaker.config().notification.cluster_identifier.clone();
    let mut state = breaker
        .config()
        .store
        .read_state(&cluster)
        .await?
        .unwrap_or_default();

    match cli.command {
        Commands::Status => {
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Commands::Enable => {
            let already_enabled = state.failsafe_mode;
            breaker.set_failsafe_mode(&mut state, true, Initiator::Operator).await?;
            println!("{}", enable_message(&cluster, already_enabled));
        }
        Commands::Disable => {
            breaker.set_failsafe_mode(&mut state, false, Initiator::Operator).await?;
            println!("Cluster {} exited failsafe mode; scaling is permitted", cluster);
        }
    }

    Ok(())
}

fn enable_message(cluster: &str, already_enabled: bool) -> String {
    if already_enabled {
        format!("Cluster {} is already in failsafe mode", cluster)
    } else {
        format!("Cluster {} placed in failsafe mode; no scaling will be permitted", cluster)
    }
}
