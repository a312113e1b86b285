//! Main entry point for the ordering service.
//!
//! This binary accepts customer order submissions over HTTP, persists them in
//! an embedded database, and exposes token-gated admin operations for
//! listing, inspecting, updating and deleting orders. A bundled front-end is
//! served for every route the API does not claim.

use clap::Parser;
use ordering_config::Config;
use ordering_storage::implementations::memory::MemoryStore;
use ordering_storage::implementations::sqlite::SqliteStore;
use ordering_storage::{OrderStore, StorageError};
use std::path::PathBuf;
use std::sync::Arc;

mod apis;
mod auth;
mod server;

/// Command-line arguments for the ordering service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the ordering service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the configured storage backend
/// 5. Serves the API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	// Create env filter with default from args
	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	tracing::info!("Started ordering service");

	// Load configuration; a missing file runs on built-in defaults so the
	// service works with zero setup.
	let config = if args.config.exists() {
		Config::from_file(&args.config)?
	} else {
		tracing::warn!(
			"Config file {} not found, using defaults",
			args.config.display()
		);
		Config::default()
	};

	let store = build_store(&config).await?;

	server::start_server(config, store).await?;

	tracing::info!("Stopped ordering service");
	Ok(())
}

/// Builds the order store selected by the configuration.
async fn build_store(config: &Config) -> Result<Arc<dyn OrderStore>, StorageError> {
	match config.storage.backend.as_str() {
		"sqlite" => {
			let store = SqliteStore::connect(&config.storage.path).await?;
			tracing::info!("Using sqlite storage at {}", config.storage.path);
			Ok(Arc::new(store))
		},
		"memory" => {
			tracing::info!("Using in-memory storage");
			Ok(Arc::new(MemoryStore::new()))
		},
		other => Err(StorageError::Backend(format!(
			"Unknown storage backend '{}'",
			other
		))),
	}
}
