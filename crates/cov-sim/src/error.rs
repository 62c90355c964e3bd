use cov_core::CovError;
use cov_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CovError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

impl SimError {
    /// `true` if the error is an occupancy invariant violation raised during
    /// a tick, rather than a problem with the inputs.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, SimError::Grid(e) if e.is_invariant_violation())
    }
}

pub type SimResult<T> = Result<T, SimError>;
