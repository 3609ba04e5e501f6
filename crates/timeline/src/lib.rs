//! Wall-clock timestamp assigner (spec component C4).
//!
//! Walks an ordered leg list and stamps each with a departure/arrival instant,
//! starting from the trip's departure time. `arrival_i = departure_i +
//! duration_hours_i`; `departure_{i+1} = arrival_i` (spec §4.4).

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use hos_chunker::Leg;
use hos_core::decimal_ext::hours_to_seconds;
use thiserror::Error;

/// Errors raised while assigning a timeline to a leg sequence.
#[derive(Debug, Error, PartialEq)]
pub enum TimelineError {
    /// A leg reported a negative duration, which would make timestamps non-monotonic.
    #[error("leg {order} has a negative duration of {hours}h")]
    NegativeDuration {
        order: usize,
        hours: rust_decimal::Decimal,
    },
}

/// Stamp every leg in `legs` with `departure_time`/`arrival_time`, starting
/// from `departure`. Legs are timestamped in order; the first leg's
/// `departure_time` is exactly `departure`.
pub fn assign_timeline(legs: &mut [Leg], departure: DateTime<Tz>) -> Result<(), TimelineError> {
    let mut cursor = departure;
    for leg in legs.iter_mut() {
        if leg.duration_hours < rust_decimal::Decimal::ZERO {
            return Err(TimelineError::NegativeDuration {
                order: leg.order,
                hours: leg.duration_hours,
            });
        }
        let seconds = hours_to_seconds(leg.duration_hours);
        let arrival = cursor + chrono::Duration::seconds(seconds);
        leg.departure_time = Some(cursor);
        leg.arrival_time = Some(arrival);
        cursor = arrival;
    }
    Ok(())
}

/// Convenience constructor for a timezone-aware instant from a naive local
/// date and time plus an IANA zone, matching how scenario fixtures express
/// trip departure times.
pub fn local_datetime(
    tz: Tz,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Option<DateTime<Tz>> {
    tz.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
}
