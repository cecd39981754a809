//! mutant-detector - memoized DNA sequence classification
//!
//! A grid of `A`, `T`, `C`, `G` is a mutant when it holds more than one
//! straight run of four identical bases. Outcomes are cached in memory and
//! persisted, so a grid is scanned at most once per process.

pub mod cache;
pub mod classifier;
pub mod cli;
pub mod dna;
pub mod http_server;
pub mod observability;
pub mod scanner;
pub mod stats;
pub mod storage;
