//! Error types for diagram construction.

use thiserror::Error;

/// Errors that can occur while building a Voronoi diagram.
///
/// Degenerate geometry (duplicates, collinear sets, solo inputs) is *not*
/// an error: it is surfaced per site through
/// [`PolygonStatus`](crate::voronoi::PolygonStatus). Only malformed
/// construction arguments fail fast.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoronoiError {
    /// The input point sequence is empty.
    #[error("cannot build a diagram from an empty point sequence")]
    NoSites,

    /// The clip rectangle is malformed (min >= max on an axis).
    #[error("invalid clip rectangle: min must be strictly below max on both axes")]
    InvalidBounds,

    /// A site coordinate is NaN or infinite.
    #[error("site {index} has a non-finite coordinate")]
    NonFiniteSite {
        /// Index of the offending site in the input sequence.
        index: usize,
    },
}
