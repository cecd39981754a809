//! DNA input model
//!
//! The grid type the classifier operates on, plus the validation the API
//! layer runs before constructing one.

mod errors;
mod grid;
mod validator;

pub use errors::{GridError, GridResult, ValidationError};
pub use grid::{DnaGrid, KEY_SEPARATOR, RUN_LENGTH};
pub use validator::validate_dna;
