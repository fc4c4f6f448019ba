use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dv_routing::{RoutingEngine, TopologyCatalog, UpdatePolicy};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    InPlace,
    Snapshot,
}

impl From<Policy> for UpdatePolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::InPlace => UpdatePolicy::InPlace,
            Policy::Snapshot => UpdatePolicy::Snapshot,
        }
    }
}

#[derive(Parser)]
#[command(name = "dv_routing", about = "Distance-vector routing table simulation")]
struct Cli {
    /// JSON topology catalog; the built-in topologies are used when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Topology to load (defaults to the first one in the catalog)
    #[arg(long)]
    topology: Option<String>,

    /// Exchange rounds to run
    #[arg(long, default_value_t = 1)]
    rounds: usize,

    /// Run rounds until the tables stop changing
    #[arg(long, conflicts_with = "rounds")]
    converge: bool,

    #[arg(long, value_enum, default_value_t = Policy::InPlace)]
    policy: Policy,

    /// Print links and tables as JSON
    #[arg(long)]
    json: bool,

    /// List topology names and exit
    #[arg(long)]
    list: bool,

    /// Compare the tables against shortest path costs
    #[arg(long)]
    check: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = match &cli.catalog {
        Some(path) => TopologyCatalog::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => TopologyCatalog::builtin(),
    };

    if cli.list {
        for name in catalog.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let name = match &cli.topology {
        Some(name) => name.clone(),
        None => catalog
            .default_name()
            .context("Catalog has no topologies")?
            .to_string(),
    };
    let matrix = catalog.get(&name)?;
    let mut engine = RoutingEngine::with_policy(matrix, cli.policy.into())
        .with_context(|| format!("Invalid topology {}", name))?;
    info!(
        "Loaded topology {} ({} routers, {:?} updates)",
        name,
        engine.topology().router_count(),
        engine.policy()
    );

    if cli.converge {
        // N-1 rounds reach the fixed point; one more confirms it.
        let max_rounds = engine.router_count().max(1);
        let outcome = engine.converge(max_rounds);
        if !outcome.converged {
            warn!("Tables still changing after {} rounds", outcome.rounds);
        }
    } else {
        for _ in 0..cli.rounds {
            engine.relax();
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&engine.report())?);
    } else {
        let mut output = String::new();
        engine.render(&mut output)?;
        print!("{}", output);
    }

    if cli.check {
        let discrepancies = engine.discrepancies();
        if discrepancies.is_empty() {
            info!("All tables match shortest path costs after {} rounds", engine.rounds());
        }
        for d in &discrepancies {
            warn!(
                "Router {} -> {}: table {:?}, shortest {:?}",
                d.router, d.destination, d.table_cost, d.shortest_cost
            );
        }
    }

    Ok(())
}
