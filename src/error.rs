use thiserror::Error;

/// Errors raised while validating a topology or loading a catalog.
#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("negative link cost {cost} at ({row}, {col})")]
    NegativeCost { row: usize, col: usize, cost: i64 },

    #[error("unknown topology: {0}")]
    UnknownTopology(String),

    #[error("catalog i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TopologyError>;
