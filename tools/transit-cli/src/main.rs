use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use transport_catalogue::prelude::*;

mod output;
mod requests;

use output::{answer_requests, write_json};
use requests::{read_snapshot, write_snapshot, InputDocument};

#[derive(Parser, Debug)]
#[command(
    name = "transit-cli",
    author,
    version,
    about = "Answer bus network queries from a JSON request document",
    long_about = "Loads stops, road distances and bus lines from the base_requests of a \
                  JSON document, then answers its stat_requests: bus statistics, buses \
                  serving a stop, and fastest routes between stops.\n\n\
                  The network can also be saved to the file named in \
                  serialization_settings and queried later without rebuilding it."
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Input JSON document (stdin when omitted)
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Output file for responses (stdout when omitted)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Load base requests and answer stat requests in one pass
    Process,
    /// Load base requests and save the network snapshot
    MakeBase,
    /// Answer stat requests against a saved snapshot
    ProcessRequests,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let input = read_input(args.input.as_deref())?;
    let doc = InputDocument::parse(&input)?;
    log::debug!(
        "{} base requests, {} stat requests",
        doc.base_requests.len(),
        doc.stat_requests.len()
    );

    match args.command {
        Command::Process => {
            let catalogue = doc.build_catalogue()?;
            answer(&doc, &catalogue, doc.routing_settings, &args)
        }
        Command::MakeBase => {
            let catalogue = doc.build_catalogue()?;
            let path = doc.snapshot_path()?;
            let snapshot = CatalogueSnapshot::capture(&catalogue, doc.routing_settings);

            write_snapshot(&snapshot, path)?;
            log::info!(
                "Saved {} stops and {} buses to {}",
                catalogue.stop_count(),
                catalogue.bus_count(),
                path.display()
            );
            Ok(())
        }
        Command::ProcessRequests => {
            let path = doc.snapshot_path()?;
            let snapshot = read_snapshot(path)?;
            let catalogue = snapshot
                .restore()
                .with_context(|| format!("Snapshot {} is inconsistent", path.display()))?;
            log::info!(
                "Restored {} stops and {} buses from {}",
                catalogue.stop_count(),
                catalogue.bus_count(),
                path.display()
            );

            // Settings in the request document override the saved ones
            let settings = doc.routing_settings.or(snapshot.routing_settings);
            answer(&doc, &catalogue, settings, &args)
        }
    }
}

fn answer(
    doc: &InputDocument,
    catalogue: &TransportCatalogue,
    settings: Option<RoutingSettings>,
    args: &Args,
) -> Result<()> {
    // The graph is only worth building when someone asks for a route
    let router = match settings {
        Some(settings) if doc.has_route_requests() => {
            let router = RouteBuilder::new(catalogue, settings)
                .context("Failed to build route graph")?;
            log::debug!(
                "Route graph: {} vertices, {} edges",
                router.vertex_count(),
                router.edge_count()
            );
            Some(router)
        }
        _ => None,
    };

    let responses = answer_requests(catalogue, router.as_ref(), &doc.stat_requests);
    write_json(&responses, args.output.as_deref(), args.pretty)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin"),
    }
}
