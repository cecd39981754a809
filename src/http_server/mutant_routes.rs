//! Classification HTTP Routes
//!
//! - `POST /mutant` classifies a DNA grid: 200 for a mutant, 403 for a human
//! - `GET /stats` reports outcome counts
//! - `GET /` answers with a status line

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::Classifier;
use crate::dna::{validate_dna, DnaGrid};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::stats::{StatsAggregator, StatsSnapshot};
use crate::storage::Store;

use super::errors::{ApiError, ApiResult};
use super::stats_cache::StatsCache;

/// Status line served at `/`.
pub const STATUS_MESSAGE: &str = "Mutant detector API is running";

// ==================
// Shared State
// ==================

/// State shared by the classification handlers
pub struct MutantState<S: Store> {
    pub classifier: Arc<Classifier<S>>,
    pub stats: StatsAggregator<S>,
    pub stats_cache: StatsCache,
}

impl<S: Store> MutantState<S> {
    pub fn new(store: Arc<S>, metrics: Arc<MetricsRegistry>, stats_ttl: Duration) -> Self {
        Self {
            classifier: Arc::new(Classifier::with_metrics(Arc::clone(&store), metrics)),
            stats: StatsAggregator::new(store),
            stats_cache: StatsCache::new(stats_ttl),
        }
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        self.classifier.metrics()
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct DnaRequest {
    #[serde(default)]
    pub dna: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DnaResponse {
    pub is_mutant: bool,
    pub message: String,
}

impl DnaResponse {
    pub fn new(is_mutant: bool) -> Self {
        let message = if is_mutant {
            "Mutant detected"
        } else {
            "Human detected"
        };
        Self {
            is_mutant,
            message: message.to_string(),
        }
    }

    /// 200 for a mutant, 403 for a human.
    pub fn status(&self) -> StatusCode {
        if self.is_mutant {
            StatusCode::OK
        } else {
            StatusCode::FORBIDDEN
        }
    }
}

// ==================
// Routes
// ==================

pub fn mutant_routes<S: Store + 'static>(state: Arc<MutantState<S>>) -> Router {
    Router::new()
        .route("/", get(status_handler))
        .route("/mutant", post(mutant_handler::<S>))
        .route("/stats", get(stats_handler::<S>))
        .with_state(state)
}

async fn status_handler() -> &'static str {
    STATUS_MESSAGE
}

async fn mutant_handler<S: Store + 'static>(
    State(state): State<Arc<MutantState<S>>>,
    payload: Result<Json<DnaRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DnaResponse>)> {
    let request_id = Uuid::new_v4().to_string();

    let grid = match payload
        .map_err(|e| ApiError::InvalidBody(e.body_text()))
        .and_then(|Json(request)| parse_grid(&request.dna))
    {
        Ok(grid) => grid,
        Err(err) => {
            state.metrics().increment_inputs_rejected();
            log_event_with_fields(
                Event::InputRejected,
                &[
                    ("request_id", request_id.as_str()),
                    ("reason", err.to_string().as_str()),
                ],
            );
            return Err(err);
        }
    };

    let classifier = Arc::clone(&state.classifier);
    let classification = tokio::task::spawn_blocking(move || classifier.classify_detailed(&grid))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    log_event_with_fields(
        Event::RequestServed,
        &[
            ("request_id", request_id.as_str()),
            ("is_mutant", if classification.is_mutant { "true" } else { "false" }),
            ("source", classification.source.as_str()),
        ],
    );

    let body = DnaResponse::new(classification.is_mutant);
    Ok((body.status(), Json(body)))
}

async fn stats_handler<S: Store + 'static>(
    State(state): State<Arc<MutantState<S>>>,
) -> ApiResult<Json<StatsSnapshot>> {
    state.metrics().increment_stats_queries();

    let snapshot = tokio::task::spawn_blocking(move || {
        state
            .stats_cache
            .get_or_refresh(|| state.stats.snapshot())
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(snapshot))
}

fn parse_grid(rows: &[String]) -> ApiResult<DnaGrid> {
    validate_dna(rows)?;
    Ok(DnaGrid::from_rows(rows)?)
}
