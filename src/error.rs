use core::fmt;
use grid_util::point::Point;

/// Errors raised while building a grid or validating the endpoints of a search.
/// An unreachable goal is not an error, see [SearchOutcome](crate::SearchOutcome).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The terrain matrix or map text could not be turned into a grid.
    InvalidGrid(String),
    /// The start or end of a search is out of bounds or not walkable.
    InvalidEndpoints { position: Point, reason: String },
}

impl Error {
    pub(crate) fn invalid_grid(reason: impl Into<String>) -> Error {
        Error::InvalidGrid(reason.into())
    }
    pub(crate) fn invalid_endpoint(position: Point, reason: impl Into<String>) -> Error {
        Error::InvalidEndpoints {
            position,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidGrid(reason) => write!(f, "invalid grid: {reason}"),
            Error::InvalidEndpoints { position, reason } => {
                write!(f, "invalid endpoint ({}, {}): {reason}", position.x, position.y)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
