//! FMCSA Hours-of-Service counters, hard limits, and reset rules (spec component C2).
//!
//! Distances, durations, and cycle hours use [`rust_decimal::Decimal`] throughout: the
//! spec requires exact arithmetic for regulatory headroom, since comparisons like
//! `drive_h_since_break >= 8` must never drift due to floating-point rounding.

use rust_decimal::Decimal;
use thiserror::Error;

/// Hard FMCSA 395 limits. Immutable configuration, not counter state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HosLimits {
    /// Maximum consecutive driving hours before a 10-hour rest is required.
    pub max_drive_hours: Decimal,
    /// Maximum on-duty window hours before a 10-hour rest is required.
    pub max_duty_hours: Decimal,
    /// Driving hours after which a 30-minute break is required.
    pub break_after_hours: Decimal,
    /// Rolling cycle hours after which a 34-hour reset is required.
    pub cycle_limit_hours: Decimal,
    /// Miles between mandatory fuel stops.
    pub fuel_interval_miles: Decimal,
}

impl Default for HosLimits {
    fn default() -> Self {
        Self {
            max_drive_hours: Decimal::new(11, 0),
            max_duty_hours: Decimal::new(14, 0),
            break_after_hours: Decimal::new(8, 0),
            cycle_limit_hours: Decimal::new(70, 0),
            fuel_interval_miles: Decimal::new(1000, 0),
        }
    }
}

/// Fixed durations of each mandatory event (spec §4.2 event-effects table).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventDurations {
    pub rest10_hours: Decimal,
    pub reset34_hours: Decimal,
    pub break30_hours: Decimal,
    pub fuel_hours: Decimal,
    pub pickup_dropoff_hours: Decimal,
}

impl Default for EventDurations {
    fn default() -> Self {
        Self {
            rest10_hours: Decimal::new(10, 0),
            reset34_hours: Decimal::new(34, 0),
            break30_hours: Decimal::new(5, 1),
            fuel_hours: Decimal::new(25, 2),
            pickup_dropoff_hours: Decimal::new(1, 0),
        }
    }
}

/// Errors raised while constructing or driving HOS state.
#[derive(Debug, Error, PartialEq)]
pub enum HosStateError {
    /// `start_cycle_hours` exceeded the 70-hour cycle limit on entry; this is a
    /// caller precondition violation, not something the chunker can recover from.
    #[error("starting cycle hours {0} exceed the 70-hour cycle limit")]
    CycleExceeded(Decimal),
}

/// The five running HOS counters tracked for a single trip (spec §4.2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HosState {
    pub cycle_h: Decimal,
    pub drive_h_daily: Decimal,
    pub duty_h_since_rest: Decimal,
    pub drive_h_since_break: Decimal,
    pub miles_since_fuel: Decimal,
}

impl HosState {
    /// Start state for a trip: `cycle_h` seeded from the driver's accumulated cycle
    /// hours, every other counter at zero.
    pub fn new(start_cycle_hours: Decimal, limits: &HosLimits) -> Result<Self, HosStateError> {
        if start_cycle_hours > limits.cycle_limit_hours {
            return Err(HosStateError::CycleExceeded(start_cycle_hours));
        }
        Ok(Self {
            cycle_h: start_cycle_hours,
            drive_h_daily: Decimal::ZERO,
            duty_h_since_rest: Decimal::ZERO,
            drive_h_since_break: Decimal::ZERO,
            miles_since_fuel: Decimal::ZERO,
        })
    }

    /// Whether a 30-minute break is due (`drive_h_since_break >= break_after_hours`).
    pub fn needs_break(&self, limits: &HosLimits) -> bool {
        self.drive_h_since_break >= limits.break_after_hours
    }

    /// Whether a 34-hour cycle reset is due (`cycle_h >= cycle_limit_hours`).
    pub fn needs_reset(&self, limits: &HosLimits) -> bool {
        self.cycle_h >= limits.cycle_limit_hours
    }

    /// Whether a 10-hour rest is due (daily drive or duty window exhausted).
    pub fn needs_rest(&self, limits: &HosLimits) -> bool {
        self.drive_h_daily >= limits.max_drive_hours || self.duty_h_since_rest >= limits.max_duty_hours
    }

    /// Whether a fuel stop is due (`miles_since_fuel >= fuel_interval_miles`).
    pub fn needs_fuel(&self, limits: &HosLimits) -> bool {
        self.miles_since_fuel >= limits.fuel_interval_miles
    }

    /// Remaining miles before the next mandatory fuel stop (never negative).
    pub fn fuel_headroom_miles(&self, limits: &HosLimits) -> Decimal {
        (limits.fuel_interval_miles - self.miles_since_fuel).max(Decimal::ZERO)
    }

    /// Remaining hours before the daily drive limit is hit (never negative).
    pub fn daily_drive_headroom_hours(&self, limits: &HosLimits) -> Decimal {
        (limits.max_drive_hours - self.drive_h_daily).max(Decimal::ZERO)
    }

    /// Remaining hours before a 30-minute break is required (never negative).
    pub fn break_headroom_hours(&self, limits: &HosLimits) -> Decimal {
        (limits.break_after_hours - self.drive_h_since_break).max(Decimal::ZERO)
    }

    /// Apply a driving chunk: every counter that accumulates with time or distance moves.
    pub fn apply_drive(&mut self, miles: Decimal, hours: Decimal) {
        self.cycle_h += hours;
        self.drive_h_daily += hours;
        self.duty_h_since_rest += hours;
        self.drive_h_since_break += hours;
        self.miles_since_fuel += miles;
    }

    /// Apply a 10-hour rest: resets the daily drive/duty/break counters, keeps fuel.
    pub fn apply_rest10(&mut self, durations: &EventDurations) {
        self.cycle_h += durations.rest10_hours;
        self.drive_h_daily = Decimal::ZERO;
        self.duty_h_since_rest = Decimal::ZERO;
        self.drive_h_since_break = Decimal::ZERO;
    }

    /// Apply a 34-hour cycle reset: zeroes every counter, including fuel.
    pub fn apply_reset34(&mut self, _durations: &EventDurations) {
        self.cycle_h = Decimal::ZERO;
        self.drive_h_daily = Decimal::ZERO;
        self.duty_h_since_rest = Decimal::ZERO;
        self.drive_h_since_break = Decimal::ZERO;
        self.miles_since_fuel = Decimal::ZERO;
    }

    /// Apply a 30-minute break: counts toward cycle/duty, resets the break counter only.
    pub fn apply_break30(&mut self, durations: &EventDurations) {
        self.cycle_h += durations.break30_hours;
        self.duty_h_since_rest += durations.break30_hours;
        self.drive_h_since_break = Decimal::ZERO;
    }

    /// Apply a fuel stop: counts toward cycle/duty, resets the fuel-distance counter.
    pub fn apply_fuel(&mut self, durations: &EventDurations) {
        self.cycle_h += durations.fuel_hours;
        self.duty_h_since_rest += durations.fuel_hours;
        self.miles_since_fuel = Decimal::ZERO;
    }

    /// Apply a pickup or dropoff stop: counts toward cycle/duty only.
    pub fn apply_pickup_dropoff(&mut self, durations: &EventDurations) {
        self.cycle_h += durations.pickup_dropoff_hours;
        self.duty_h_since_rest += durations.pickup_dropoff_hours;
    }
}
