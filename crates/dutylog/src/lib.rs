//! Daily duty-status log builder (spec component C5).
//!
//! Projects a timestamped, labeled leg sequence onto a per-day 15-minute
//! grid (Phase A), compresses the grid into status runs (Phase B),
//! quantizes and pads those runs to calendar-day boundaries (Phase C), and
//! totals hours and miles per status (Phase D). See spec §4.5.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Timelike};
use chrono_tz::Tz;
use hos_chunker::{DutyStatus, Leg};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while building daily logs from a leg sequence.
#[derive(Debug, Error, PartialEq)]
pub enum DailyLogError {
    #[error("cannot build daily logs from an empty leg sequence")]
    NoLegs,
    #[error("leg {order} has not been timestamped; run the timeline assigner first")]
    MissingTimestamps { order: usize },
}

/// One contiguous span of a single duty status within a calendar day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DutyPeriod {
    pub status: DutyStatus,
    pub start: String,
    pub end: String,
}

/// One calendar day's duty-status record (spec §3 "Daily log").
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyLog {
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub day: u32,
    pub from_location: String,
    pub to_location: String,
    pub periods: Vec<DutyPeriod>,
    pub off_duty_hours: Decimal,
    pub sleeper_berth_hours: Decimal,
    pub driving_hours: Decimal,
    pub on_duty_hours: Decimal,
    pub total_hours: Decimal,
    pub total_miles: Decimal,
}

/// Build one `DailyLog` per calendar date touched by `legs`, in ascending
/// date order. `from_location`/`to_location` are stamped on every day
/// (spec §4.5 "Labels"): they are the trip-wide endpoints, not per-day ones.
pub fn build_daily_logs(
    legs: &[Leg],
    from_location: &str,
    to_location: &str,
) -> Result<Vec<DailyLog>, DailyLogError> {
    if legs.is_empty() {
        return Err(DailyLogError::NoLegs);
    }
    for leg in legs {
        if leg.departure_time.is_none() || leg.arrival_time.is_none() {
            return Err(DailyLogError::MissingTimestamps { order: leg.order });
        }
    }

    let mut grid: BTreeMap<NaiveDate, BTreeMap<i64, DutyStatus>> = BTreeMap::new();
    let mut hours_by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    let mut miles_by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

    for leg in legs {
        let departure = leg.departure_time.expect("checked above");
        let arrival = leg.arrival_time.expect("checked above");
        fill_grid_for_leg(&mut grid, &mut hours_by_day, &mut miles_by_day, leg, departure, arrival);
    }

    let final_leg = legs.last().expect("checked non-empty above");
    let final_arrival = final_leg.arrival_time.expect("checked above");
    let final_day = final_arrival.date_naive();
    let final_arrival_minute = minutes_from(day_start(final_arrival), final_arrival);

    let mut logs = Vec::with_capacity(grid.len());
    for (date, slots) in grid.iter() {
        let raw = compress_day(slots, *date == final_day, final_arrival_minute);
        let raw = quantize_day(raw);
        let totals = totalize(&raw);
        let periods = raw
            .into_iter()
            .map(|p| DutyPeriod {
                status: p.status,
                start: format_minute(p.start),
                end: format_minute(p.end),
            })
            .collect();
        let total_miles = miles_by_day.get(date).copied().unwrap_or(Decimal::ZERO).round_dp(2);

        logs.push(DailyLog {
            date: *date,
            year: date.year(),
            month: date.month(),
            month_name: month_name(date.month()),
            day: date.day(),
            from_location: from_location.to_string(),
            to_location: to_location.to_string(),
            periods,
            off_duty_hours: totals.off_duty,
            sleeper_berth_hours: totals.sleeper_berth,
            driving_hours: totals.driving,
            on_duty_hours: totals.on_duty,
            total_hours: totals.total,
            total_miles,
        });
    }

    Ok(logs)
}

/// Local midnight on `dt`'s calendar day, found by subtracting its
/// time-of-day offset rather than reconstructing a naive datetime, so it
/// never hits a DST-ambiguous `LocalResult`.
fn day_start(dt: DateTime<Tz>) -> DateTime<Tz> {
    dt - chrono::Duration::seconds(dt.time().num_seconds_from_midnight() as i64)
}

fn minutes_from(start_of_day: DateTime<Tz>, t: DateTime<Tz>) -> i64 {
    (t - start_of_day).num_minutes()
}

fn ceil_to_quarter(minute: i64) -> i64 {
    let rem = minute.rem_euclid(15);
    if rem == 0 { minute } else { minute + (15 - rem) }
}

/// Phase A: splits `[departure, arrival)` at local midnights and marks
/// every 15-minute slot whose start falls in each sub-interval with the
/// leg's duty status, honoring the priority rule (lower wins).
fn fill_grid_for_leg(
    grid: &mut BTreeMap<NaiveDate, BTreeMap<i64, DutyStatus>>,
    hours_by_day: &mut BTreeMap<NaiveDate, Decimal>,
    miles_by_day: &mut BTreeMap<NaiveDate, Decimal>,
    leg: &Leg,
    departure: DateTime<Tz>,
    arrival: DateTime<Tz>,
) {
    let status = leg.duty_status();
    let mut cursor = departure;
    while cursor < arrival {
        let day = cursor.date_naive();
        let start_of_day = day_start(cursor);
        let next_midnight = start_of_day + chrono::Duration::days(1);
        let sub_end = next_midnight.min(arrival);

        let sub_seconds = (sub_end - cursor).num_seconds();
        let sub_hours = Decimal::from(sub_seconds) / Decimal::from(3600);
        *hours_by_day.entry(day).or_insert(Decimal::ZERO) += sub_hours;

        if leg.duration_hours > Decimal::ZERO {
            let sub_miles = leg.distance_miles * sub_hours / leg.duration_hours;
            *miles_by_day.entry(day).or_insert(Decimal::ZERO) += sub_miles;
        }

        let start_minute = minutes_from(start_of_day, cursor);
        let end_minute = minutes_from(start_of_day, sub_end);
        let day_grid = grid.entry(day).or_default();
        let mut minute = ceil_to_quarter(start_minute);
        while minute < end_minute {
            match day_grid.get(&minute) {
                Some(existing) if *existing < status => {}
                _ => {
                    day_grid.insert(minute, status);
                }
            }
            minute += 15;
        }

        cursor = sub_end;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawPeriod {
    status: DutyStatus,
    start: i64,
    end: i64,
}

/// Phase B: sorts a day's slots and folds consecutive equal-status entries
/// into runs. The trailing run closes at the real arrival minute on the
/// trip's final day, or is clamped to `23:59` (which rounds up to `24:00`
/// in Phase C) on every other day.
fn compress_day(
    slots: &BTreeMap<i64, DutyStatus>,
    is_final_day: bool,
    final_arrival_minute: i64,
) -> Vec<RawPeriod> {
    let mut periods = Vec::new();
    let mut run_start: Option<i64> = None;
    let mut run_status: Option<DutyStatus> = None;
    let mut prev_key: Option<i64> = None;

    for (&key, &status) in slots.iter() {
        let contiguous = prev_key == Some(key - 15);
        let same_run = contiguous && run_status == Some(status);
        if !same_run {
            if let (Some(s), Some(start), Some(prev)) = (run_status, run_start, prev_key) {
                periods.push(RawPeriod { status: s, start, end: prev + 15 });
            }
            run_start = Some(key);
            run_status = Some(status);
        }
        prev_key = Some(key);
    }

    if let (Some(s), Some(start)) = (run_status, run_start) {
        let end = if is_final_day { final_arrival_minute } else { 1439 };
        periods.push(RawPeriod { status: s, start, end });
    }

    periods.into_iter().filter(|p| p.start != p.end).collect()
}

/// Phase C: rounds every boundary to the nearest 15 minutes, pads the day
/// to `[00:00, 24:00]` with `off_duty`, and merges adjacent same-status runs.
fn quantize_day(periods: Vec<RawPeriod>) -> Vec<RawPeriod> {
    let mut rounded: Vec<RawPeriod> = periods
        .into_iter()
        .map(|p| RawPeriod {
            status: p.status,
            start: round_to_quarter(p.start),
            end: round_to_quarter(p.end),
        })
        .filter(|p| p.start != p.end)
        .collect();

    match rounded.first() {
        Some(first) if first.start > 0 => {
            rounded.insert(0, RawPeriod { status: DutyStatus::OffDuty, start: 0, end: first.start });
        }
        None => rounded.push(RawPeriod { status: DutyStatus::OffDuty, start: 0, end: 1440 }),
        _ => {}
    }

    if let Some(last) = rounded.last() {
        if last.end < 1440 {
            rounded.push(RawPeriod { status: DutyStatus::OffDuty, start: last.end, end: 1440 });
        }
    }

    let mut merged: Vec<RawPeriod> = Vec::with_capacity(rounded.len());
    for period in rounded {
        if let Some(last) = merged.last_mut() {
            if last.status == period.status && last.end == period.start {
                last.end = period.end;
                continue;
            }
        }
        merged.push(period);
    }

    merged.into_iter().filter(|p| p.start != p.end).collect()
}

fn round_to_quarter(minute: i64) -> i64 {
    let rem = minute.rem_euclid(15);
    let down = minute - rem;
    if rem < 8 { down } else { down + 15 }
}

fn format_minute(minute: i64) -> String {
    if minute >= 1440 {
        "24:00".to_string()
    } else {
        format!("{:02}:{:02}", minute / 60, minute % 60)
    }
}

struct Totals {
    off_duty: Decimal,
    sleeper_berth: Decimal,
    driving: Decimal,
    on_duty: Decimal,
    total: Decimal,
}

/// Phase D: per-status hour totals, each rounded to the nearest 0.25h.
fn totalize(periods: &[RawPeriod]) -> Totals {
    let mut off_duty = Decimal::ZERO;
    let mut sleeper_berth = Decimal::ZERO;
    let mut driving = Decimal::ZERO;
    let mut on_duty = Decimal::ZERO;

    for period in periods {
        let hours = Decimal::from(period.end - period.start) / Decimal::from(60);
        match period.status {
            DutyStatus::OffDuty => off_duty += hours,
            DutyStatus::SleeperBerth => sleeper_berth += hours,
            DutyStatus::Driving => driving += hours,
            DutyStatus::OnDuty => on_duty += hours,
        }
    }

    let round_quarter_hour = |v: Decimal| (v * Decimal::from(4)).round() / Decimal::from(4);
    let off_duty = round_quarter_hour(off_duty);
    let sleeper_berth = round_quarter_hour(sleeper_berth);
    let driving = round_quarter_hour(driving);
    let on_duty = round_quarter_hour(on_duty);
    let total = off_duty + sleeper_berth + driving + on_duty;

    Totals { off_duty, sleeper_berth, driving, on_duty, total }
}

fn month_name(month: u32) -> String {
    const NAMES: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ];
    NAMES
        .get((month.saturating_sub(1)) as usize)
        .copied()
        .unwrap_or("")
        .to_string()
}
