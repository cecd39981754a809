//! # HTTP Server Module
//!
//! Axum server exposing the classifier.
//!
//! # Endpoints
//!
//! - `POST /mutant` - Classify a DNA grid (200 mutant, 403 human, 400 invalid)
//! - `GET /stats` - Outcome counts and ratio
//! - `GET /` - Status line
//! - `GET /health` - Health check
//! - `GET /metrics` - Operational counters

pub mod config;
pub mod errors;
pub mod mutant_routes;
pub mod observability_routes;
pub mod server;
mod stats_cache;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use mutant_routes::{DnaRequest, DnaResponse, MutantState, STATUS_MESSAGE};
pub use server::HttpServer;
pub use stats_cache::StatsCache;
