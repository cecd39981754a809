//! Observability
//!
//! - Structured JSON logging with deterministic key order
//! - Typed lifecycle and request events
//! - Atomic operational counters
//!
//! Observability is read-only: it never changes the outcome of the
//! operation being observed, and a failed log write is ignored.
//!
//! ```ignore
//! use mutant_detector::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::ConfigLoaded, &[("data_dir", "/var/lib/mutant")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_scans();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Severity an event is logged at.
pub fn event_severity(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else if event.is_failure() {
        Severity::Error
    } else if event.is_per_request() {
        Severity::Trace
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event_severity(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event_severity(event), event.as_str(), fields);
}
