use thiserror::Error;

/// Inputs rejected by the curve math.
///
/// Numerical corner cases (flat derivatives, zero-width ranges, non-invertible views)
/// are not errors: they resolve to a deterministic fallback and are reported through
/// [`SolveStatus`](crate::SolveStatus) or [`ViewTransform::is_invertible`](crate::ViewTransform::is_invertible).
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeomError {
    #[error("Invalid argument: {0}.")]
    InvalidArgument(&'static str),
    #[error("Invalid state: {0}.")]
    InvalidState(&'static str),
}
