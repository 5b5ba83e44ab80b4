//! Error types for kiwi

use thiserror::Error;

/// Main error type for kiwi operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias for kiwi operations
pub type Result<T> = std::result::Result<T, Error>;
