//! Error types shared by both binaries.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tag read/write error (wraps lofty::error::LoftyError)
    #[error("Tag error: {0}")]
    Tag(#[from] lofty::error::LoftyError),

    /// Exclusion pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
