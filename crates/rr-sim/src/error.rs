use rr_road::CircuitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("circuit construction failed: {0}")]
    Circuit(#[from] CircuitError),
}

pub type SimResult<T> = Result<T, SimError>;
