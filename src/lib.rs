//! HOS trip planner: wires the geometry index, HOS chunker, timeline
//! assigner, label resolver, and daily log builder (spec components
//! C1–C6) into one pipeline, and aggregates their per-phase errors into
//! a single top-level error type (spec §10.1).

pub use hos_chunker::{DutyStatus, Leg, LegKind, RouteSegment, RouteStep};
pub use hos_dutylog::{DailyLog, DailyLogError, DutyPeriod};
pub use hos_geometry::{GeometryError, GeometryIndex, LatLon};
pub use hos_state::{EventDurations, HosLimits, HosStateError};

use chrono::DateTime;
use chrono_tz::Tz;
use hos_core::geo::LonLat;
use rust_decimal::Decimal;
use thiserror::Error;

/// Aggregated error across every pipeline phase.
#[derive(Debug, Error)]
pub enum TripPlanError {
    #[error("geometry index failed: {0}")]
    Geometry(#[from] GeometryError),
    #[error("chunking failed: {0}")]
    Chunker(#[from] hos_chunker::ChunkerError),
    #[error("timeline assignment failed: {0}")]
    Timeline(#[from] hos_timeline::TimelineError),
    #[error("daily log build failed: {0}")]
    DailyLog(#[from] DailyLogError),
}

/// Trip-level inputs to the planner (spec §3 "Route input" + "Trip input").
#[derive(Debug, Clone)]
pub struct TripRequest {
    pub segments: Vec<RouteSegment>,
    pub waypoints: Vec<LonLat>,
    pub departure_time: DateTime<Tz>,
    pub current_cycle_hours: Decimal,
}

/// The complete output of a trip-planning run: the leg timeline plus the
/// per-day duty logs derived from it.
#[derive(Debug, Clone)]
pub struct TripPlan {
    pub legs: Vec<Leg>,
    pub daily_logs: Vec<DailyLog>,
}

/// Run the full pipeline (C1→C6) with the default FMCSA 395 limits and
/// event durations.
pub fn plan_trip(request: &TripRequest) -> Result<TripPlan, TripPlanError> {
    plan_trip_with(request, &HosLimits::default(), &EventDurations::default())
}

/// Run the full pipeline with caller-supplied limits and event durations.
pub fn plan_trip_with(
    request: &TripRequest,
    limits: &HosLimits,
    durations: &EventDurations,
) -> Result<TripPlan, TripPlanError> {
    let geometry = GeometryIndex::build(&request.waypoints)?;

    let mut legs = hos_chunker::chunk_route(
        &request.segments,
        &geometry,
        request.current_cycle_hours,
        limits,
        durations,
    )?;

    hos_timeline::assign_timeline(&mut legs, request.departure_time)?;
    hos_labels::assign_leg_labels(&mut legs);
    let (from_location, to_location) = hos_labels::trip_endpoints(&legs);

    let daily_logs = hos_dutylog::build_daily_logs(&legs, &from_location, &to_location)?;

    Ok(TripPlan { legs, daily_logs })
}
