//! Core units, constants, and shared primitives for the HOS trip planner workspace.

/// Physical and regulatory constants shared across crates.
pub mod constants {
    /// Earth radius used for Haversine great-circle distance (statute miles).
    pub const EARTH_RADIUS_MILES: f64 = 3958.8;
    /// Seconds per hour, used when converting duty-hour durations to wall-clock time.
    pub const SECONDS_PER_HOUR: f64 = 3600.0;
}

/// Great-circle geometry helpers.
pub mod geo {
    use super::constants::EARTH_RADIUS_MILES;

    /// A geographic point in `(longitude, latitude)` order, matching the routing-provider wire format.
    pub type LonLat = (f64, f64);

    /// Haversine distance between two `(lon, lat)` points, in statute miles.
    ///
    /// `a = sin²(Δφ/2) + cos φ₁·cos φ₂·sin²(Δλ/2); d = 2R·atan2(√a, √(1−a))`
    pub fn haversine_miles(a: LonLat, b: LonLat) -> f64 {
        let (lon1, lat1) = a;
        let (lon2, lat2) = b;
        let phi1 = lat1.to_radians();
        let phi2 = lat2.to_radians();
        let d_phi = (lat2 - lat1).to_radians();
        let d_lambda = (lon2 - lon1).to_radians();

        let sin_d_phi = (d_phi / 2.0).sin();
        let sin_d_lambda = (d_lambda / 2.0).sin();
        let h = sin_d_phi * sin_d_phi + phi1.cos() * phi2.cos() * sin_d_lambda * sin_d_lambda;
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
        EARTH_RADIUS_MILES * c
    }

    /// Linear interpolation between two points, `t` clamped to `[0, 1]`.
    pub fn lerp(a: LonLat, b: LonLat, t: f64) -> LonLat {
        let t = t.clamp(0.0, 1.0);
        (a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1))
    }
}

/// Exact-arithmetic helpers for regulatory hour accounting.
pub mod decimal_ext {
    use rust_decimal::Decimal;

    /// Convert a `Decimal` count of hours into whole seconds, rounding half-away-from-zero.
    ///
    /// The chunker and timeline assigner must agree on this rounding so that
    /// `arrival = departure + duration` stays exact to the second (spec §4.4).
    pub fn hours_to_seconds(hours: Decimal) -> i64 {
        let seconds = hours * Decimal::from(3600);
        seconds.round().try_into().unwrap_or(i64::MAX)
    }
}
