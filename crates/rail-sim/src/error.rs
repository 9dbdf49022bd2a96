use rail_topology::TopologyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("corridor topology error: {0}")]
    Topology(#[from] TopologyError),
}

pub type SimResult<T> = Result<T, SimError>;
