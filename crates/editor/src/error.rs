use crate::geom::GeomError;
use crate::PointId;

use thiserror::Error;

/// Errors returned by the curve's mutations and queries.
///
/// Mutations that fail leave the curve untouched.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EditError {
    #[error("Invalid argument: {0}.")]
    InvalidArgument(&'static str),
    #[error("Invalid state: {0}.")]
    InvalidState(&'static str),
    #[error("No control point with id {0:?}.")]
    UnknownPoint(PointId),
}

impl From<GeomError> for EditError {
    fn from(value: GeomError) -> Self {
        match value {
            GeomError::InvalidArgument(msg) => EditError::InvalidArgument(msg),
            GeomError::InvalidState(msg) => EditError::InvalidState(msg),
        }
    }
}
