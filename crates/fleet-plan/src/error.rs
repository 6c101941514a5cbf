use fleet_core::Cell;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("plan parse error: {0}")]
    Parse(String),

    #[error("geometry parse error: {0}")]
    Geometry(String),

    #[error("no plan entry for connected device {0:?}")]
    MissingAgent(String),

    #[error("empty path for device {0:?}")]
    EmptyPath(String),

    #[error("cell {cell} in the path for device {device:?} is outside the {width}×{height} grid")]
    OutOfBounds {
        device: String,
        cell:   Cell,
        width:  u32,
        height: u32,
    },

    #[error("devices {first:?} and {second:?} share start cell {cell}")]
    DuplicateStart {
        first:  String,
        second: String,
        cell:   Cell,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PlanResult<T> = Result<T, PlanError>;
