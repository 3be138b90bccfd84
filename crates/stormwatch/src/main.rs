//! Storm risk lookups from the command line.
//!
//! ```text
//! stormwatch "Alerts for TX"
//! stormwatch --json CA
//! stormwatch --interactive
//! ```

mod report;

use std::sync::Arc;

use clap::Parser;
use orchestrator::{Orchestrator, QueryOutcome, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stormwatch")]
#[command(about = "Check active weather alerts and their risk to power plants in a region")]
struct Args {
    /// Region code or query, e.g. "TX" or "Alerts for CA"
    query: Option<String>,

    /// Read queries from stdin, one per line
    #[arg(long, short)]
    interactive: bool,

    /// Print outcomes as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let orchestrator = Orchestrator::from_env()?;

    if args.interactive {
        return interactive(orchestrator, args.json).await;
    }

    let query = args
        .query
        .ok_or("Missing query (pass a region code such as TX, or use --interactive)")?;
    let outcome = orchestrator.run(&query).await;
    print_outcome(&outcome, args.json)?;

    if outcome.is_fatal() {
        std::process::exit(1);
    }
    Ok(())
}

/// Submit each stdin line as a query. A new line supersedes any query still running.
async fn interactive(
    orchestrator: Orchestrator,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Arc::new(Session::new(orchestrator));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Vec<JoinHandle<()>> = Vec::new();

    eprintln!("Enter a region code or query (\"quit\" to exit).");

    while let Some(line) = lines.next_line().await? {
        let query = line.trim().to_string();
        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            break;
        }

        pending.retain(|task| !task.is_finished());
        let session = session.clone();
        pending.push(tokio::spawn(async move {
            match session.submit(&query).await {
                Some(outcome) => {
                    if let Err(e) = print_outcome(&outcome, json) {
                        eprintln!("Failed to print outcome: {}", e);
                    }
                }
                None => debug!("Query {:?} was superseded", query),
            }
        }));
    }

    for task in pending {
        let _ = task.await;
    }
    info!("Session ended after {} queries", session.latest_sequence());
    Ok(())
}

fn print_outcome(outcome: &QueryOutcome, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        print!("{}", report::Report(outcome));
    }
    Ok(())
}
