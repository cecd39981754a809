//! Input validation for submitted DNA.
//!
//! Runs at the API boundary, before a grid ever reaches the classifier:
//! - at least 4 rows
//! - NxN
//! - only the bases A, T, C, G

use std::sync::OnceLock;

use regex::Regex;

use super::errors::ValidationError;
use super::grid::RUN_LENGTH;

fn base_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[ATCG]+$").expect("static regex is valid"))
}

/// Validate raw DNA rows.
///
/// Reports the first violation found, scanning rows top to bottom.
pub fn validate_dna<S: AsRef<str>>(rows: &[S]) -> Result<(), ValidationError> {
    if rows.is_empty() {
        return Err(ValidationError::Empty);
    }

    let size = rows.len();
    if size < RUN_LENGTH {
        return Err(ValidationError::TooSmall(size));
    }

    for (index, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != size {
            return Err(ValidationError::NotSquare {
                row: index,
                expected: size,
                actual: row.len(),
            });
        }
        if !base_pattern().is_match(row) {
            return Err(ValidationError::InvalidBase { row: index });
        }
    }

    Ok(())
}
