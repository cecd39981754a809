//! Classification orchestration
//!
//! Ties the scanner, the result cache and the store together behind one
//! blocking, thread-safe entry point.

mod classifier;
mod errors;

pub use classifier::{Classification, Classifier, OutcomeSource};
pub use errors::{ClassifyError, ClassifyResult};
