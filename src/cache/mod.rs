//! Result memoization
//!
//! The single shared mutable structure in the classification path. Owned by a
//! [`crate::classifier::Classifier`]; there is no process-wide instance.

mod result_cache;

pub use result_cache::{CacheStats, ResultCache};
