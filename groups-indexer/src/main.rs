use std::collections::HashMap;
use std::env;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use groups_indexer::{ApiResponse, Dependencies, IndexingError};

#[derive(Parser)]
#[command(name = "groups-indexer")]
#[command(about = "Keeps the public groups search in sync with the membership API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bulk-write all public groups into the search index
    UpdateIndex,
    /// Write all community groups and search fields as one snapshot object
    SyncGroups,
    /// Search the index
    Search {
        /// Request parameter, e.g. `--param q=yoga --param groupTypeId=3`
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// List the search fields
    SearchFields,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<ExitCode, IndexingError> {
    let dependencies = Dependencies::from_env()?;

    match command {
        Commands::UpdateIndex => {
            info!("Updating groups index");
            let summary = dependencies.index_pipeline().await?.run().await?;
            println!("{}", summary.completion_token());
            Ok(ExitCode::SUCCESS)
        }
        Commands::SyncGroups => {
            info!("Syncing groups snapshot");
            let summary = dependencies.snapshot_pipeline()?.run().await?;
            println!("{}", summary.completion_token());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Search { params } => {
            let handler = dependencies.groups_search_handler().await?;
            let params: HashMap<String, String> = params.into_iter().collect();
            let params = (!params.is_empty()).then_some(&params);
            Ok(print_response(handler.handle(params).await))
        }
        Commands::SearchFields => {
            let handler = dependencies.search_fields_handler()?;
            Ok(print_response(handler.handle().await))
        }
    }
}

fn print_response(response: ApiResponse) -> ExitCode {
    println!("{}", response.body);

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
