mod ephemeris;
mod feed;
mod geocode;
mod web;

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::ephemeris::time::{format_epoch, parse_reference};
use crate::feed::{FeedDocument, FeedLoader};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "iss-tracker")]
#[command(about = "ISS state-vector ephemeris service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the feed and serve the query API
    Serve {
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Print the sample nearest to a reference time
    Now {
        #[arg(short, long)]
        config: Option<String>,
        /// Feed-format or RFC3339 time; defaults to the current time
        #[arg(long)]
        at: Option<String>,
    },
    /// Print epoch identifiers, one per line
    Epochs {
        #[arg(short, long)]
        config: Option<String>,
        #[arg(long)]
        offset: Option<String>,
        #[arg(long)]
        limit: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Now { config, at } => now(config.as_deref(), at.as_deref()).await,
        Commands::Epochs {
            config,
            offset,
            limit,
        } => epochs(config.as_deref(), offset.as_deref(), limit.as_deref()).await,
    }
}

async fn serve(config_path: Option<&str>) -> ExitCode {
    let config = match Config::load(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn now(config_path: Option<&str>, at: Option<&str>) -> ExitCode {
    let reference = match at.map(parse_reference).transpose() {
        Ok(t) => t.unwrap_or_else(Utc::now),
        Err(e) => {
            eprintln!("Invalid reference time: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(document) = fetch(config_path).await else {
        return ExitCode::FAILURE;
    };

    let store = ephemeris::EphemerisStore::new();
    store.load(document.series);
    log::info!("Resolving nearest epoch to {}", format_epoch(&reference));

    let result = match store.nearest(reference) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Query error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&result) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn epochs(config_path: Option<&str>, offset: Option<&str>, limit: Option<&str>) -> ExitCode {
    let Some(document) = fetch(config_path).await else {
        return ExitCode::FAILURE;
    };

    let store = ephemeris::EphemerisStore::new();
    store.load(document.series);

    match store.slice(offset, limit) {
        Ok(epochs) => {
            for epoch in epochs {
                println!("{}", epoch);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Query error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn fetch(config_path: Option<&str>) -> Option<FeedDocument> {
    let config = match Config::load(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            return None;
        }
    };

    let loader = match FeedLoader::from_config(&config.feed) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Feed client error: {}", e);
            return None;
        }
    };

    match loader.fetch().await {
        Ok(document) => Some(document),
        Err(e) => {
            eprintln!("Feed error: {}", e);
            None
        }
    }
}
