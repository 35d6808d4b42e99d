//! Geometry-subsystem error types.

use thiserror::Error;

/// Fatal region configuration errors, reported while building a
/// [`RegionSet`][crate::RegionSet].
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("region configuration error: {0}")]
    Config(String),

    #[error("{region} has {count} vertices; at least {minimum} required")]
    TooFewVertices {
        region:  String,
        count:   usize,
        minimum: usize,
    },

    #[error("{region} has zero area")]
    ZeroArea { region: String },

    #[error("{region} contains a non-finite coordinate")]
    NonFinite { region: String },
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// A bounded rejection-sampling loop ran out of attempts.
///
/// This is a per-call outcome, not a configuration error: the caller decides
/// whether to hold position for the tick or to abort setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("no {constraint} candidate found after {attempts} attempts")]
    Exhausted {
        constraint: &'static str,
        attempts:   u32,
    },
}
