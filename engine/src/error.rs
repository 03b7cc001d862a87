use glam::IVec2;
use thiserror::Error;

/// Errors from level queries, digging and content placement.
///
/// None of these are fatal, the worst outcome of any of them is that an
/// action had no effect.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum Error {
    #[error("position {0} is outside the level")]
    OutOfBounds(IVec2),

    /// Tried to dig an open cell or a position outside the level.
    #[error("nothing to dig at {0}")]
    NotDiggable(IVec2),

    /// Random placement ran out of retries.
    #[error("no placement found after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("hazard limit of {0} reached")]
    HazardCap(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for failing with an `InvalidConfig` error.
pub fn config_err<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::InvalidConfig(msg.into()))
}
