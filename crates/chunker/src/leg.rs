//! The leg entity produced by the chunker (spec §3 "Leg (core output entity)").

use chrono::DateTime;
use chrono_tz::Tz;
use hos_geometry::LatLon;
use rust_decimal::Decimal;

/// The kind of a trip leg. Drive legs cover distance; every other kind is a
/// zero-distance mandatory event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LegKind {
    Drive,
    Rest10,
    Reset34,
    Break30,
    Fuel,
    Pickup,
    Dropoff,
}

impl LegKind {
    /// Whether this leg kind is a driving leg (as opposed to a mandatory event).
    pub fn is_drive(self) -> bool {
        matches!(self, LegKind::Drive)
    }

    /// Whether this leg kind is a rest-class event, for the adjacent-rest suppression rule.
    pub fn is_rest(self) -> bool {
        matches!(self, LegKind::Rest10 | LegKind::Reset34)
    }

    /// Derived duty status by fixed mapping (spec §3):
    /// drive→driving; pickup/dropoff/fuel→on_duty; break30→off_duty;
    /// rest10→sleeper_berth; reset34→off_duty (per §9 Open Questions resolution).
    pub fn duty_status(self) -> DutyStatus {
        match self {
            LegKind::Drive => DutyStatus::Driving,
            LegKind::Pickup | LegKind::Dropoff | LegKind::Fuel => DutyStatus::OnDuty,
            LegKind::Break30 => DutyStatus::OffDuty,
            LegKind::Rest10 => DutyStatus::SleeperBerth,
            LegKind::Reset34 => DutyStatus::OffDuty,
        }
    }
}

/// The four duty-status rows on a driver log sheet, ordered here by their
/// grid-fill priority number (spec §4.5 Phase A): lower wins on overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DutyStatus {
    SleeperBerth = 1,
    OffDuty = 2,
    Driving = 3,
    OnDuty = 4,
}

/// A routing-provider turn-by-turn instruction, carried unmodified onto the
/// drive leg it belongs to (spec §10.6: supplemented, not reprocessed).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStep {
    pub waypoint_start_index: usize,
    pub waypoint_end_index: usize,
    pub instruction: String,
    pub distance_m: f64,
    pub duration_s: f64,
}

/// One leg of the planned trip: either a driving chunk or a zero-distance mandatory event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    pub order: usize,
    pub kind: LegKind,
    pub distance_miles: Decimal,
    pub duration_hours: Decimal,
    pub start_coord: LatLon,
    pub end_coord: LatLon,
    /// Polyline slice for drive legs only; `None` for event legs.
    pub polyline_slice: Option<Vec<LatLon>>,
    pub notes: String,
    /// Which original route segment this chunk belongs to; `None` for event legs.
    pub segment_index: Option<usize>,
    /// Turn-by-turn steps inherited from the originating segment (drive legs only).
    pub steps: Vec<RouteStep>,
    /// Wall-clock departure, timezone-local to the trip (spec §4.4). `None` until
    /// the timeline assigner has run.
    pub departure_time: Option<DateTime<Tz>>,
    /// Wall-clock arrival; always `departure_time + duration_hours` exactly to the second.
    pub arrival_time: Option<DateTime<Tz>>,
    /// Human-readable start label, assigned by the label resolver (spec §4.6).
    pub start_label: Option<String>,
    /// Human-readable end label, assigned by the label resolver (spec §4.6).
    pub end_label: Option<String>,
}

impl Leg {
    pub fn duty_status(&self) -> DutyStatus {
        self.kind.duty_status()
    }
}
