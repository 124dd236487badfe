//! Error type shared by the simulation and configuration layers

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Frame-to-frame time step was zero, negative, NaN or infinite
    #[error("invalid time step: {0} s")]
    InvalidTimeStep(f64),

    /// Requested population size below one
    #[error("invalid body count: {0} (need at least 1)")]
    InvalidBodyCount(i64),

    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
