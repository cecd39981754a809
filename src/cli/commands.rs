//! CLI command implementations
//!
//! Every command loads and validates the config file first. `init` is the
//! only command that may create the store; the others refuse to run on an
//! uninitialized data directory.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::classifier::Classifier;
use crate::dna::{validate_dna, DnaGrid};
use crate::http_server::{DnaRequest, DnaResponse, HttpServer, HttpServerConfig};
use crate::observability::{log_event, log_event_with_fields, Event, Logger, MetricsRegistry, Severity};
use crate::stats::StatsAggregator;
use crate::storage::{store_path, FileStore, Store};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    /// HTTP listener settings (optional)
    #[serde(default)]
    pub http: HttpServerConfig,

    /// Seconds a `/stats` response is reused (optional, default 10)
    #[serde(default = "default_stats_cache_ttl")]
    pub stats_cache_ttl_secs: u64,

    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_stats_cache_ttl() -> u64 {
    10
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        log_event_with_fields(Event::ConfigLoaded, &[("data_dir", config.data_dir.as_str())]);
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        self.log_severity()?;

        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    pub fn stats_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.stats_cache_ttl_secs)
    }

    pub fn log_severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
        Command::Classify { config } => classify(&config),
        Command::Stats { config } => stats(&config),
    }
}

/// Initialize a new data directory
///
/// Creates `<data_dir>/data/` and an empty store file. Does not start the
/// server.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let data_dir = config.data_path();

    if is_initialized(data_dir) {
        return Err(CliError::already_initialized());
    }

    let store = FileStore::open(data_dir)?;
    log_event_with_fields(
        Event::DataDirInitialized,
        &[("path", store_path(store.data_dir()).display().to_string().as_str())],
    );

    write_response(json!({"initialized": true}))?;

    Ok(())
}

/// Start the HTTP API
///
/// Opens the store (rebuilding its index), then serves until the process
/// is stopped.
pub fn start(config_path: &Path) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = load_config(config_path)?;
    let store = open_store(&config)?;
    let metrics = Arc::new(MetricsRegistry::new());

    let server = HttpServer::new(
        config.http.clone(),
        store,
        metrics,
        config.stats_cache_ttl(),
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    log_event(Event::BootComplete);

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Classify a single request read from stdin and exit
///
/// Input: `{"dna": ["ATGC", ...]}`. Output: `{"is_mutant": .., "message": ..}`.
pub fn classify(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config)?;
    let classifier = Classifier::new(store);

    let request = read_request()?;
    let response = classify_request(&classifier, request)?;

    write_response(serde_json::to_value(response)?)?;

    Ok(())
}

/// Print outcome counts and exit
pub fn stats(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config)?;

    let snapshot = StatsAggregator::new(store).snapshot()?;

    write_response(serde_json::to_value(snapshot)?)?;

    Ok(())
}

/// Validate and classify one JSON request.
pub fn classify_request<S: Store>(classifier: &Classifier<S>, request: Value) -> CliResult<DnaResponse> {
    let request: DnaRequest = serde_json::from_value(request)
        .map_err(|e| CliError::invalid_input(format!("Invalid request: {}", e)))?;

    if let Err(e) = validate_dna(&request.dna) {
        classifier.metrics().increment_inputs_rejected();
        log_event_with_fields(Event::InputRejected, &[("reason", e.to_string().as_str())]);
        return Err(CliError::invalid_input(e.to_string()));
    }

    let grid = DnaGrid::from_rows(&request.dna).map_err(|e| CliError::invalid_input(e.to_string()))?;
    let is_mutant = classifier.classify(&grid)?;

    Ok(DnaResponse::new(is_mutant))
}

/// Load config and apply its log level.
fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.log_severity()?);
    Ok(config)
}

fn open_store(config: &Config) -> CliResult<Arc<FileStore>> {
    let data_dir = config.data_path();
    if !is_initialized(data_dir) {
        return Err(CliError::not_initialized());
    }

    let store = FileStore::open(data_dir)
        .map_err(|e| CliError::boot_failed(format!("Failed to open store: {}", e)))?;
    Ok(Arc::new(store))
}

fn is_initialized(data_dir: &Path) -> bool {
    store_path(data_dir).exists()
}
