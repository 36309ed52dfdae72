//! Errors raised by the core library.

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors for core operations.
///
/// Scoring never produces one of these: degenerate inputs degrade to a
/// sentinel float instead.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A caller-supplied argument violated a precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
