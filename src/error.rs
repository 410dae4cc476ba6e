//! Error types for color extraction.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// k-means was asked for zero clusters.
    #[error("cluster count must be at least 1")]
    ZeroClusters,

    /// Clustering was attempted on an empty point set.
    #[error("cannot cluster an empty point set")]
    EmptyInput,

    /// A configuration value is out of its accepted range.
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// The caller's interrupt fired between iterations.
    #[error("extraction cancelled")]
    Cancelled,

    /// The input bytes could not be decoded as an image.
    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),
}
