//! HOS-compliant leg chunker (spec component C3).
//!
//! Consumes routing-provider segments plus the route's geometry index and
//! emits an ordered [`Leg`] list: driving chunks sized to the tightest of
//! four regulatory headrooms, with mandatory break/rest/reset/fuel/pickup/
//! dropoff events inserted at the correct mileage.

mod error;
mod leg;

pub use error::ChunkerError;
pub use leg::{DutyStatus, Leg, LegKind, RouteStep};

use hos_geometry::GeometryIndex;
use hos_state::{EventDurations, HosLimits, HosState};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// One routing-provider segment: a contiguous partition of the route between
/// two anchor points, with its own distance, duration, and turn-by-turn steps.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    pub distance_miles: Decimal,
    pub duration_hours: Decimal,
    pub steps: Vec<RouteStep>,
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn min4(a: Decimal, b: Decimal, c: Decimal, d: Decimal) -> Decimal {
    a.min(b).min(c).min(d)
}

/// Slice `segments` into HOS-compliant legs (spec §4.3).
///
/// `geometry` must already be built from the route's full waypoint list.
/// `start_cycle_hours` seeds the driver's rolling 70-hour cycle counter.
pub fn chunk_route(
    segments: &[RouteSegment],
    geometry: &GeometryIndex,
    start_cycle_hours: Decimal,
    limits: &HosLimits,
    durations: &EventDurations,
) -> Result<Vec<Leg>, ChunkerError> {
    if segments.is_empty() {
        return Err(ChunkerError::InconsistentSegments {
            reason: "no route segments supplied".to_string(),
        });
    }

    let total_segment_distance: Decimal = segments.iter().map(|s| s.distance_miles).sum();
    let geometry_total =
        Decimal::from_f64(geometry.total_miles()).unwrap_or(total_segment_distance);
    let tolerance = (total_segment_distance * Decimal::new(2, 2)).max(Decimal::new(5, 0));
    if (total_segment_distance - geometry_total).abs() > tolerance {
        return Err(ChunkerError::InconsistentSegments {
            reason: format!(
                "segment distances sum to {total_segment_distance}mi, route geometry totals {geometry_total}mi"
            ),
        });
    }

    for (index, segment) in segments.iter().enumerate() {
        if segment.distance_miles > Decimal::ZERO && segment.duration_hours <= Decimal::ZERO {
            return Err(ChunkerError::NonPositiveDuration {
                index,
                duration: segment.duration_hours,
                distance: segment.distance_miles,
            });
        }
    }

    let mut state = HosState::new(start_cycle_hours, limits)?;
    let mut legs: Vec<Leg> = Vec::new();
    let mut progress_miles = Decimal::ZERO;
    let mut pickup_inserted = false;
    let mut order = 0usize;

    let mut push_event = |legs: &mut Vec<Leg>,
                           order: &mut usize,
                           kind: LegKind,
                           duration_hours: Decimal,
                           notes: &str,
                           progress_miles: Decimal| {
        let coord = geometry.point_at(decimal_to_f64(progress_miles));
        legs.push(Leg {
            order: *order,
            kind,
            distance_miles: Decimal::ZERO,
            duration_hours,
            start_coord: (coord.1, coord.0),
            end_coord: (coord.1, coord.0),
            polyline_slice: None,
            notes: notes.to_string(),
            segment_index: None,
            steps: Vec::new(),
            departure_time: None,
            arrival_time: None,
            start_label: None,
            end_label: None,
        });
        *order += 1;
    };

    for (segment_index, segment) in segments.iter().enumerate() {
        let speed_ratio = if segment.distance_miles > Decimal::ZERO {
            segment.duration_hours / segment.distance_miles
        } else {
            Decimal::ZERO
        };

        let mut dist_left = segment.distance_miles;
        while dist_left > Decimal::ZERO {
            // Step 1: 30-minute break after 8 hours of driving since the last one.
            if state.needs_break(limits) {
                push_event(
                    &mut legs,
                    &mut order,
                    LegKind::Break30,
                    durations.break30_hours,
                    "30-minute required HOS break",
                    progress_miles,
                );
                state.apply_break30(durations);
            }

            // Step 2: 34-hour cycle reset, re-evaluated from the top afterward.
            if state.needs_reset(limits) {
                push_event(
                    &mut legs,
                    &mut order,
                    LegKind::Reset34,
                    durations.reset34_hours,
                    "34-hour off-duty reset to restart 70-hour cycle",
                    progress_miles,
                );
                state.apply_reset34(durations);
                continue;
            }

            // Step 3: 10-hour rest once the daily drive or duty window is exhausted.
            if state.needs_rest(limits) {
                let suppressed = legs.last().map(|l| l.kind) == Some(LegKind::Rest10);
                if !suppressed {
                    push_event(
                        &mut legs,
                        &mut order,
                        LegKind::Rest10,
                        durations.rest10_hours,
                        "Required 10-hour rest break",
                        progress_miles,
                    );
                }
                state.apply_rest10(durations);
            }

            // Step 4: fuel stop every 1000 miles.
            if state.needs_fuel(limits) {
                push_event(
                    &mut legs,
                    &mut order,
                    LegKind::Fuel,
                    durations.fuel_hours,
                    "Fuel stop required every 1000 miles",
                    progress_miles,
                );
                state.apply_fuel(durations);
            }

            // Step 5: size the next driving chunk to the tightest headroom.
            let (chunk_miles, chunk_hours) = if speed_ratio == Decimal::ZERO {
                (dist_left, Decimal::ZERO)
            } else {
                let fuel_miles_left = state.fuel_headroom_miles(limits);
                let daily_drive_miles_left = state.daily_drive_headroom_hours(limits) / speed_ratio;
                let break_miles_left = state.break_headroom_hours(limits) / speed_ratio;
                let chunk_miles = min4(
                    dist_left,
                    fuel_miles_left,
                    daily_drive_miles_left,
                    break_miles_left,
                );
                (chunk_miles, chunk_miles * speed_ratio)
            };

            // Step 6: emit the drive leg and advance progress.
            let start = geometry.point_at(decimal_to_f64(progress_miles));
            let end = geometry.point_at(decimal_to_f64(progress_miles + chunk_miles));
            let slice = geometry.slice(
                decimal_to_f64(progress_miles),
                decimal_to_f64(progress_miles + chunk_miles),
            );
            legs.push(Leg {
                order,
                kind: LegKind::Drive,
                distance_miles: chunk_miles,
                duration_hours: chunk_hours,
                start_coord: (start.1, start.0),
                end_coord: (end.1, end.0),
                polyline_slice: Some(slice),
                notes: String::new(),
                segment_index: Some(segment_index),
                steps: segment.steps.clone(),
                departure_time: None,
                arrival_time: None,
                start_label: None,
                end_label: None,
            });
            order += 1;

            progress_miles += chunk_miles;
            state.apply_drive(chunk_miles, chunk_hours);

            // Step 7: this segment has that much less distance remaining.
            dist_left -= chunk_miles;

            // Step 8: tight-boundary fuel stop if the chunk landed exactly on 1000 miles.
            if state.needs_fuel(limits) {
                push_event(
                    &mut legs,
                    &mut order,
                    LegKind::Fuel,
                    durations.fuel_hours,
                    "Fuel stop required every 1000 miles",
                    progress_miles,
                );
                state.apply_fuel(durations);
            }
        }

        if segment_index == 0 && !pickup_inserted {
            push_event(
                &mut legs,
                &mut order,
                LegKind::Pickup,
                durations.pickup_dropoff_hours,
                "1-hour stop for pickup",
                progress_miles,
            );
            state.apply_pickup_dropoff(durations);
            pickup_inserted = true;
        }
    }

    push_event(
        &mut legs,
        &mut order,
        LegKind::Dropoff,
        durations.pickup_dropoff_hours,
        "1-hour stop for dropoff",
        progress_miles,
    );
    state.apply_pickup_dropoff(durations);

    Ok(legs)
}
