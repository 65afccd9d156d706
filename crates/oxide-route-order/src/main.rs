//! oxide-route-order CLI
//!
//! Prints the registration order a route manifest builds into.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use oxide_route_order::{BuildOptions, Manifest};

/// Show the order routes are registered in.
#[derive(Parser)]
#[command(name = "oxide-route-order")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON manifest of route declarations.
    manifest: PathBuf,

    /// Try shallower paths first when priority and parameters tie.
    #[arg(long, conflicts_with = "depth_first")]
    shallow_first: bool,

    /// Try deeper paths first when priority and parameters tie (default).
    #[arg(long)]
    depth_first: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Flags win over the manifest's own options.
    fn options(&self, manifest: &Manifest) -> Option<BuildOptions> {
        if self.shallow_first {
            Some(BuildOptions::shallow_first())
        } else if self.depth_first {
            Some(BuildOptions::depth_first())
        } else {
            manifest.options
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let source = std::fs::read_to_string(&cli.manifest)
        .with_context(|| format!("reading {}", cli.manifest.display()))?;
    let manifest = Manifest::from_json(&source)
        .with_context(|| format!("parsing {}", cli.manifest.display()))?;
    debug!(
        routes = manifest.routes.len(),
        params = manifest.params.len(),
        middleware = manifest.middleware.len(),
        "manifest loaded"
    );

    let plan = manifest.plan_table().build(cli.options(&manifest));
    for emission in plan.emissions() {
        println!("{emission}");
    }

    Ok(())
}
