//! Label resolver (spec component C6).
//!
//! Assigns human-readable `start_label`/`end_label` strings to each leg by
//! kind and route position, then derives the trip-wide `from`/`to` strings
//! the daily log builder stamps on every day record.

use hos_chunker::{Leg, LegKind};

/// Assign `start_label`/`end_label` to every leg in place (spec §4.6).
///
/// Event legs get a fixed display label per kind. Drive legs are numbered
/// `"Pickup Leg K"` while `segment_index == 0` (the current→pickup portion
/// of the route) and `"Dropoff Leg K"` afterward, each counter starting at 1.
pub fn assign_leg_labels(legs: &mut [Leg]) {
    let mut pickup_count = 1usize;
    let mut dropoff_count = 1usize;

    for leg in legs.iter_mut() {
        let label = match leg.kind {
            LegKind::Drive if leg.segment_index == Some(0) => {
                let label = format!("Pickup Leg {pickup_count}");
                pickup_count += 1;
                label
            }
            LegKind::Drive => {
                let label = format!("Dropoff Leg {dropoff_count}");
                dropoff_count += 1;
                label
            }
            LegKind::Rest10 => "Rest Break".to_string(),
            LegKind::Reset34 => "Cycle Reset".to_string(),
            LegKind::Break30 => "30-min Break".to_string(),
            LegKind::Fuel => "Fuel Stop".to_string(),
            LegKind::Pickup => "Pickup Stop".to_string(),
            LegKind::Dropoff => "Dropoff Stop".to_string(),
        };
        leg.start_label = Some(label.clone());
        leg.end_label = Some(label);
    }
}

/// Derive the trip-wide `(from, to)` location strings from the first leg's
/// `start_label` and the last leg's `end_label` (spec §4.6). Every day's
/// `from_location`/`to_location` uses these same two strings, not per-day
/// endpoints, matching driver-log-sheet convention.
pub fn trip_endpoints(legs: &[Leg]) -> (String, String) {
    let from = legs
        .first()
        .and_then(|leg| leg.start_label.as_deref())
        .map(|label| clean_label(label, false))
        .unwrap_or_default();
    let to = legs
        .last()
        .and_then(|leg| leg.end_label.as_deref())
        .map(|label| clean_label(label, true))
        .unwrap_or_default();
    (from, to)
}

/// Strip the routing-provider prefixes `"From "`, `"Start:"`, `"Pickup:"`,
/// `"Dropoff:"` from a label. A `"From X to Y"` label splits on `" to "`;
/// `arrival_side` selects `Y` (matching driver-log convention for
/// `to_location`) over `X`.
fn clean_label(label: &str, arrival_side: bool) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lower = trimmed.to_lowercase();

    if lower.starts_with("from ") {
        let rest = &trimmed[5..];
        let mut parts = rest.splitn(2, " to ");
        let origin = parts.next().unwrap_or(rest).trim();
        let destination = parts.next().map(str::trim);
        return if arrival_side {
            destination.unwrap_or(origin).to_string()
        } else {
            origin.to_string()
        };
    }

    for prefix in ["pickup:", "dropoff:", "start:"] {
        if lower.starts_with(prefix) {
            if let Some(idx) = trimmed.find(':') {
                return trimmed[idx + 1..].trim().to_string();
            }
        }
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn bare_leg(kind: LegKind, segment_index: Option<usize>) -> Leg {
        Leg {
            order: 0,
            kind,
            distance_miles: if kind.is_drive() {
                Decimal::from(10)
            } else {
                Decimal::ZERO
            },
            duration_hours: Decimal::ONE,
            start_coord: (0.0, 0.0),
            end_coord: (0.0, 0.0),
            polyline_slice: None,
            notes: String::new(),
            segment_index,
            steps: Vec::new(),
            departure_time: None,
            arrival_time: None,
            start_label: None,
            end_label: None,
        }
    }

    #[test]
    fn drive_legs_numbered_by_segment_class() {
        let mut legs = vec![
            bare_leg(LegKind::Drive, Some(0)),
            bare_leg(LegKind::Drive, Some(0)),
            bare_leg(LegKind::Pickup, None),
            bare_leg(LegKind::Drive, Some(1)),
            bare_leg(LegKind::Dropoff, None),
        ];
        assign_leg_labels(&mut legs);

        assert_eq!(legs[0].start_label.as_deref(), Some("Pickup Leg 1"));
        assert_eq!(legs[1].start_label.as_deref(), Some("Pickup Leg 2"));
        assert_eq!(legs[2].start_label.as_deref(), Some("Pickup Stop"));
        assert_eq!(legs[3].start_label.as_deref(), Some("Dropoff Leg 1"));
        assert_eq!(legs[4].start_label.as_deref(), Some("Dropoff Stop"));
    }

    #[test]
    fn event_legs_get_fixed_display_labels() {
        let mut legs = vec![
            bare_leg(LegKind::Rest10, None),
            bare_leg(LegKind::Reset34, None),
            bare_leg(LegKind::Break30, None),
            bare_leg(LegKind::Fuel, None),
        ];
        assign_leg_labels(&mut legs);
        assert_eq!(legs[0].start_label.as_deref(), Some("Rest Break"));
        assert_eq!(legs[1].start_label.as_deref(), Some("Cycle Reset"));
        assert_eq!(legs[2].start_label.as_deref(), Some("30-min Break"));
        assert_eq!(legs[3].start_label.as_deref(), Some("Fuel Stop"));
    }

    #[test]
    fn trip_endpoints_pass_through_plain_labels() {
        let mut legs = vec![bare_leg(LegKind::Drive, Some(0)), bare_leg(LegKind::Dropoff, None)];
        assign_leg_labels(&mut legs);
        let (from, to) = trip_endpoints(&legs);
        assert_eq!(from, "Pickup Leg 1");
        assert_eq!(to, "Dropoff Stop");
    }

    #[test]
    fn trip_endpoints_strip_from_to_prefix_preferring_arrival_side() {
        let mut legs = vec![bare_leg(LegKind::Drive, Some(0))];
        legs[0].start_label = Some("From Chicago to Dallas".to_string());
        legs[0].end_label = Some("From Chicago to Dallas".to_string());
        let (from, to) = trip_endpoints(&legs);
        assert_eq!(from, "Chicago");
        assert_eq!(to, "Dallas");
    }

    #[test]
    fn trip_endpoints_strip_colon_prefixes() {
        let mut legs = vec![bare_leg(LegKind::Drive, Some(0))];
        legs[0].start_label = Some("Start: Warehouse A".to_string());
        legs[0].end_label = Some("Dropoff: Warehouse B".to_string());
        let (from, to) = trip_endpoints(&legs);
        assert_eq!(from, "Warehouse A");
        assert_eq!(to, "Warehouse B");
    }
}
