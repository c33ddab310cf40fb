//! One-shot reconciler CLI.
//!
//! A provisioning run is `zk-reconcile apply`: merge the static config file,
//! then reconcile live ensemble membership. `diff` and `members` are
//! read-only views for operators.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zk_reconcile::config::loader::load_config;
use zk_reconcile::reconcile::{dynamic, static_config};
use zk_reconcile::zk::ZkCli;

#[derive(Parser)]
#[command(name = "zk-reconcile")]
#[command(about = "Reconcile ZooKeeper static config and ensemble membership", long_about = None)]
struct Cli {
    /// Path to the reconciler settings file
    #[arg(short, long, default_value = "/etc/zk-reconcile.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the static config file, then reconcile ensemble membership
    Apply,
    /// Print the merged static config without writing anything
    Diff,
    /// Print the live ensemble membership
    Members {
        /// Emit members as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zk_reconcile=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let settings = load_config(&cli.config)?;

    tracing::info!(
        conf_path = %settings.conf_path().display(),
        nodes = settings.node_pairs().len(),
        "Settings loaded"
    );

    match cli.command {
        Commands::Apply => {
            let outcome = static_config::reconcile(&settings)?;
            tracing::info!(outcome = ?outcome, "Static config pass done");

            // One CLI context per run; at most one reconfig goes through it.
            let zk = ZkCli::new(&settings.zk);
            let outcome = dynamic::reconcile(&zk, &settings).await?;
            tracing::info!(outcome = ?outcome, "Membership pass done");
        }
        Commands::Diff => {
            let merged = static_config::render(&settings)?;
            println!("{}", merged);
        }
        Commands::Members { json } => {
            let zk = ZkCli::new(&settings.zk);
            let live = dynamic::live_members(&zk).await?;
            if json {
                let members: Vec<_> = live.iter().collect();
                println!("{}", serde_json::to_string_pretty(&members)?);
            } else {
                println!("{}", live.serialize());
            }
        }
    }

    Ok(())
}
