//! Errors raised while chunking a route into HOS-compliant legs.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced by [`crate::chunk_route`] (spec §7).
#[derive(Debug, Error)]
pub enum ChunkerError {
    /// `segments` was empty while the route geometry carried waypoints, or the
    /// segments' total distance disagreed with the polyline length beyond tolerance.
    #[error("segments inconsistent with route geometry: {reason}")]
    InconsistentSegments { reason: String },

    /// A segment reported `duration <= 0` while `distance > 0` (undefined speed).
    #[error("segment {index} has non-positive duration {duration}h with distance {distance}mi")]
    NonPositiveDuration {
        index: usize,
        duration: Decimal,
        distance: Decimal,
    },

    /// The starting HOS state was invalid (propagated from [`hos_state`]).
    #[error(transparent)]
    State(#[from] hos_state::HosStateError),
}
