//! Property-style tests over the spec's testable invariants (§8), driven
//! through the top-level `plan_trip` pipeline rather than any single crate.

use chrono::TimeZone;
use chrono_tz::Tz;
use hos_trip_planner::{LegKind, RouteSegment, TripRequest, plan_trip};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

fn chicago(y: i32, m: u32, d: u32, h: u32, min: u32) -> chrono::DateTime<Tz> {
    chrono_tz::America::Chicago
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
}

fn straight_geometry(total_miles: f64) -> Vec<(f64, f64)> {
    let degrees = total_miles / 69.17;
    vec![(0.0, 0.0), (degrees, 0.0)]
}

fn seg(distance: i64, duration: i64) -> RouteSegment {
    RouteSegment {
        distance_miles: Decimal::from(distance),
        duration_hours: Decimal::from(duration),
        steps: Vec::new(),
    }
}

fn request(segments: Vec<RouteSegment>, total_miles: f64, start_cycle: i64) -> TripRequest {
    TripRequest {
        waypoints: straight_geometry(total_miles),
        segments,
        departure_time: chicago(2026, 1, 5, 6, 0),
        current_cycle_hours: Decimal::from(start_cycle),
    }
}

/// P1: total drive distance matches the route distance within 0.01 mi.
#[test]
fn p1_total_drive_distance_matches_route_total() {
    let plan = plan_trip(&request(vec![seg(550, 11), seg(50, 1)], 600.0, 0)).unwrap();
    let total_drive: Decimal = plan
        .legs
        .iter()
        .filter(|l| l.kind == LegKind::Drive)
        .map(|l| l.distance_miles)
        .sum();
    assert_eq!(total_drive, Decimal::from(600));
}

/// P3: no two adjacent legs are both rest10.
#[test]
fn p3_no_adjacent_rest10_legs() {
    let plan = plan_trip(&request(vec![seg(2000, 40)], 2000.0, 0)).unwrap();
    for pair in plan.legs.windows(2) {
        assert!(!(pair[0].kind == LegKind::Rest10 && pair[1].kind == LegKind::Rest10));
    }
}

/// P4: timestamps are monotone and arrival = departure + duration exactly in seconds.
#[test]
fn p4_timestamps_are_monotone_and_exact() {
    let plan = plan_trip(&request(vec![seg(400, 8), seg(100, 2)], 500.0, 0)).unwrap();
    let mut prev_arrival = None;
    for leg in &plan.legs {
        let departure = leg.departure_time.unwrap();
        let arrival = leg.arrival_time.unwrap();
        if let Some(prev) = prev_arrival {
            assert_eq!(departure, prev);
        }
        let expected_seconds = (leg.duration_hours * Decimal::from(3600))
            .round()
            .to_i64()
            .unwrap();
        assert_eq!((arrival - departure).num_seconds(), expected_seconds);
        prev_arrival = Some(arrival);
    }
}

/// P5: daily periods per day are contiguous, non-overlapping, and cover
/// [00:00, 24:00] after quantization, with start < end for every period.
#[test]
fn p5_daily_periods_cover_the_full_day() {
    let plan = plan_trip(&request(vec![seg(550, 11), seg(50, 1)], 600.0, 0)).unwrap();
    for day in &plan.daily_logs {
        assert_eq!(day.periods.first().unwrap().start, "00:00");
        assert_eq!(day.periods.last().unwrap().end, "24:00");
        for pair in day.periods.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "gap or overlap between periods");
            assert_ne!(pair[0].status, pair[1].status, "adjacent periods should differ");
        }
        for period in &day.periods {
            assert!(period.start < period.end);
        }
    }
}

/// P6: sum of per-status totals equals total_hours within 0.01h.
#[test]
fn p6_status_totals_sum_to_total_hours() {
    let plan = plan_trip(&request(vec![seg(1200, 20)], 1200.0, 65)).unwrap();
    for day in &plan.daily_logs {
        let sum = day.off_duty_hours + day.sleeper_berth_hours + day.driving_hours + day.on_duty_hours;
        assert!((sum - day.total_hours).abs() <= Decimal::new(1, 2));
    }
}

/// P7: running the pipeline twice on identical input is deterministic.
#[test]
fn p7_pipeline_is_idempotent() {
    let req = request(vec![seg(550, 11), seg(50, 1)], 600.0, 0);
    let plan_a = plan_trip(&req).unwrap();
    let plan_b = plan_trip(&req).unwrap();

    assert_eq!(plan_a.legs.len(), plan_b.legs.len());
    for (a, b) in plan_a.legs.iter().zip(plan_b.legs.iter()) {
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.distance_miles, b.distance_miles);
        assert_eq!(a.departure_time, b.departure_time);
        assert_eq!(a.notes, b.notes);
    }
    assert_eq!(plan_a.daily_logs, plan_b.daily_logs);
}

/// Scenario 1: short trip with no HOS events.
#[test]
fn scenario_short_trip_no_hos_events() {
    let plan = plan_trip(&request(vec![seg(100, 2)], 100.0, 0)).unwrap();
    let kinds: Vec<LegKind> = plan.legs.iter().map(|l| l.kind).collect();
    assert_eq!(kinds, vec![LegKind::Drive, LegKind::Pickup, LegKind::Dropoff]);

    let day = &plan.daily_logs[0];
    assert_eq!(day.driving_hours, Decimal::from(2));
    assert_eq!(day.on_duty_hours, Decimal::from(2));
}

/// Scenario 5: cycle reset at 70 hours.
#[test]
fn scenario_cycle_reset_at_seventy_hours() {
    let plan = plan_trip(&request(vec![seg(500, 10)], 500.0, 65)).unwrap();
    assert!(plan.legs.iter().any(|l| l.kind == LegKind::Reset34));
    let total_drive: Decimal = plan
        .legs
        .iter()
        .filter(|l| l.kind == LegKind::Drive)
        .map(|l| l.distance_miles)
        .sum();
    assert_eq!(total_drive, Decimal::from(500));
}

/// Scenario 6: a trip spanning midnight clamps day A and closes day B at arrival.
#[test]
fn scenario_daily_log_clamping_across_midnight() {
    let req = TripRequest {
        waypoints: straight_geometry(310.0),
        segments: vec![seg(310, 30)],
        departure_time: chicago(2026, 1, 5, 2, 0),
        current_cycle_hours: Decimal::ZERO,
    };
    let plan = plan_trip(&req).unwrap();
    assert!(plan.daily_logs.len() >= 2);

    let first_day = &plan.daily_logs[0];
    assert_eq!(first_day.periods.last().unwrap().end, "24:00");

    let last_day = plan.daily_logs.last().unwrap();
    assert_eq!(last_day.periods.last().unwrap().end, "24:00");
}
