//! Cumulative-distance geometry index over a decoded route polyline (spec component C1).
//!
//! Built once from the routing provider's waypoints, then queried read-only by the
//! HOS chunker for the coordinate and polyline slice of every leg it emits.

use hos_core::geo::{self, LonLat};
use thiserror::Error;

/// Errors raised while building or querying the geometry index.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// The index was constructed from fewer than one waypoint.
    #[error("geometry index requires at least one waypoint")]
    EmptyGeometry,
}

/// A geographic point in `(latitude, longitude)` order, the display-tier convention
/// used everywhere downstream of the geometry index (spec §6).
pub type LatLon = (f64, f64);

/// One entry of the cumulative-mileage index: distance travelled so far along the
/// route, paired with the waypoint at that distance.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexEntry {
    cum_miles: f64,
    point: LonLat,
}

/// Cumulative-distance index built by Haversine summation over route waypoints.
///
/// `cum_miles` is strictly non-decreasing and `cum_miles[0] == 0.0`; the last entry's
/// `cum_miles` is the total route distance (spec §3 invariant).
#[derive(Debug, Clone)]
pub struct GeometryIndex {
    entries: Vec<IndexEntry>,
}

impl GeometryIndex {
    /// Build the index from an ordered sequence of `(lon, lat)` waypoints.
    pub fn build(waypoints: &[LonLat]) -> Result<Self, GeometryError> {
        if waypoints.is_empty() {
            return Err(GeometryError::EmptyGeometry);
        }

        let mut entries = Vec::with_capacity(waypoints.len());
        entries.push(IndexEntry {
            cum_miles: 0.0,
            point: waypoints[0],
        });

        let mut total = 0.0;
        for pair in waypoints.windows(2) {
            total += geo::haversine_miles(pair[0], pair[1]);
            entries.push(IndexEntry {
                cum_miles: total,
                point: pair[1],
            });
        }

        Ok(Self { entries })
    }

    /// Total route distance in miles (the last index entry's cumulative mileage).
    pub fn total_miles(&self) -> f64 {
        self.entries.last().expect("built from >=1 waypoint").cum_miles
    }

    /// Interpolated `(lon, lat)` at `target_miles` along the route.
    ///
    /// Clamps below zero to the first waypoint and beyond the total to the last.
    pub fn point_at(&self, target_miles: f64) -> LonLat {
        let first = self.entries.first().expect("built from >=1 waypoint");
        let last = self.entries.last().expect("built from >=1 waypoint");

        if target_miles <= first.cum_miles {
            return first.point;
        }
        if target_miles >= last.cum_miles {
            return last.point;
        }

        for pair in self.entries.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.cum_miles <= target_miles && target_miles <= b.cum_miles {
                let span = b.cum_miles - a.cum_miles;
                let t = if span > 0.0 {
                    (target_miles - a.cum_miles) / span
                } else {
                    0.0
                };
                return geo::lerp(a.point, b.point, t);
            }
        }

        last.point
    }

    /// Ordered `(lat, lon)` points of every index entry whose cumulative mileage
    /// falls within `[m_from, m_to]`, preserving provider precision (no resampling).
    pub fn slice(&self, m_from: f64, m_to: f64) -> Vec<LatLon> {
        self.entries
            .iter()
            .filter(|e| e.cum_miles >= m_from && e.cum_miles <= m_to)
            .map(|e| (e.point.1, e.point.0))
            .collect()
    }
}
