//! Aggregate reporting over recorded outcomes.

mod aggregator;

pub use aggregator::{StatsAggregator, StatsError, StatsSnapshot};
