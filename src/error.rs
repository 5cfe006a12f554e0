//! Error types for the bsvol library.
//!
//! Fallible operations return `Result<T, BsVolError>` rather than panicking.
//! Economically meaningless requests (a negative or out-of-band market price
//! handed to the implied-vol solver) are not errors: they come back as
//! `Ok(None)`.

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, BsVolError>;

/// Errors raised by the pricer, the implied-vol solver and the surface checks.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BsVolError {
    /// Input data is invalid (e.g., non-positive spot, negative vol, ragged surface).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Implied-vol root search could not find a sign-changing bracket.
    #[error("bracketing failed: {message} (vol_low={vol_low}, vol_high={vol_high})")]
    BracketingError {
        message: String,
        /// Lower end of the last bracket tried.
        vol_low: f64,
        /// Upper end of the last bracket tried, after expansion.
        vol_high: f64,
    },

    /// Numerical computation produced a non-finite value.
    #[error("numerical error: {message}")]
    NumericalError { message: String },
}
