use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("duplicate station name {0:?}")]
    DuplicateStation(String),

    #[error("station {0:?} has zero anchoring slots")]
    ZeroCapacity(String),

    #[error("station {0:?} has a non-finite or negative position")]
    BadPosition(String),
}

pub type TopologyResult<T> = Result<T, TopologyError>;
