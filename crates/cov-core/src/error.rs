//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CovError` as one variant
//! via `#[from]` so configuration failures propagate with `?`.

use thiserror::Error;

/// The top-level error type for `cov-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CovError {
    #[error("activation rate {0} is outside [0, 1]")]
    ActivationRate(f64),

    #[error("tick rate {0} must be finite and non-negative")]
    TickRate(f64),
}

/// Shorthand result type for `cov-core`.
pub type CovResult<T> = Result<T, CovError>;
