//! Observable events
//!
//! Every structured log line names one of these.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    BootStart,
    /// Ready to serve
    BootComplete,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Data directory initialized
    DataDirInitialized,
    /// HTTP listener bound
    ServerListening,

    // Store
    /// Store opened and index rebuilt
    StoreOpened,
    /// Append to the store failed
    StoreWriteFailed,
    /// Partial frame from an earlier failed append cut off
    StoreTailTruncated,
    /// Corrupt record found while opening the store (FATAL)
    StoreCorruption,

    // Classification
    /// Served from the in-memory cache
    ClassifyCacheHit,
    /// Served from a persisted record
    ClassifyStoreHit,
    /// Computed by a full scan and recorded
    ClassifyScanComplete,
    /// Classification failed
    ClassifyFailed,
    /// Input rejected before classification
    InputRejected,
    /// HTTP classification request answered
    RequestServed,

    // Stats
    /// Stats snapshot computed from store counts
    StatsComputed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::BootComplete => "BOOT_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DataDirInitialized => "DATA_DIR_INITIALIZED",
            Event::ServerListening => "SERVER_LISTENING",
            Event::StoreOpened => "STORE_OPENED",
            Event::StoreWriteFailed => "STORE_WRITE_FAILED",
            Event::StoreTailTruncated => "STORE_TAIL_TRUNCATED",
            Event::StoreCorruption => "STORE_CORRUPTION",
            Event::ClassifyCacheHit => "CLASSIFY_CACHE_HIT",
            Event::ClassifyStoreHit => "CLASSIFY_STORE_HIT",
            Event::ClassifyScanComplete => "CLASSIFY_SCAN_COMPLETE",
            Event::ClassifyFailed => "CLASSIFY_FAILED",
            Event::InputRejected => "INPUT_REJECTED",
            Event::RequestServed => "REQUEST_SERVED",
            Event::StatsComputed => "STATS_COMPUTED",
        }
    }

    /// Whether this event means the process cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::StoreCorruption)
    }

    /// Whether this event reports a failed operation.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::StoreWriteFailed | Event::ClassifyFailed | Event::StoreCorruption
        )
    }

    /// High-volume per-request events, logged at TRACE.
    pub fn is_per_request(&self) -> bool {
        matches!(
            self,
            Event::ClassifyCacheHit
                | Event::ClassifyStoreHit
                | Event::ClassifyScanComplete
                | Event::RequestServed
                | Event::StatsComputed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
