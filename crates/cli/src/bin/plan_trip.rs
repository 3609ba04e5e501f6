use std::path::PathBuf;

use clap::Parser;
use hos_config::ScenarioConfig;
use hos_export::{daily_log, legs};
use hos_trip_planner::{RouteSegment, RouteStep, TripRequest, plan_trip};

#[derive(Parser)]
#[command(author, version, about = "HOS-compliant trip planner CLI")]
struct Cli {
    /// Path to a scenario fixture file (YAML or TOML).
    scenario: PathBuf,

    /// Write the leg timeline as CSV to this path (`-` for stdout).
    #[arg(long)]
    legs_out: Option<PathBuf>,

    /// Write the per-day duty logs as CSV to this path (`-` for stdout).
    #[arg(long)]
    daily_log_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let scenario = hos_config::load_scenario(&cli.scenario)?;
    let request = build_request(&scenario)?;

    let plan = plan_trip(&request)?;

    println!("=== Trip Plan ===");
    println!("Legs: {}", plan.legs.len());
    for leg in &plan.legs {
        println!(
            "  #{:<3} {:?} {:>8} mi {:>6}h  {}",
            leg.order,
            leg.kind,
            leg.distance_miles,
            leg.duration_hours,
            leg.start_label.as_deref().unwrap_or(""),
        );
    }

    println!("\nDaily logs: {}", plan.daily_logs.len());
    for log in &plan.daily_logs {
        println!(
            "  {} {} {}, {} -- driving {:.2}h, on-duty {:.2}h, off-duty {:.2}h, sleeper {:.2}h, {:.2} mi",
            log.month_name,
            log.day,
            log.year,
            log.date.format("%A"),
            log.driving_hours,
            log.on_duty_hours,
            log.off_duty_hours,
            log.sleeper_berth_hours,
            log.total_miles,
        );
    }

    if let Some(path) = &cli.legs_out {
        let mut writer = legs::writer_for_path(path)?;
        legs::write_legs(writer.as_mut(), &plan.legs)?;
    }

    if let Some(path) = &cli.daily_log_out {
        let mut writer = daily_log::writer_for_path(path)?;
        daily_log::write_daily_logs(writer.as_mut(), &plan.daily_logs)?;
    }

    Ok(())
}

fn build_request(scenario: &ScenarioConfig) -> anyhow::Result<TripRequest> {
    let departure_time = scenario.trip.departure_time()?;
    let segments = scenario
        .route
        .segments
        .iter()
        .map(|segment| RouteSegment {
            distance_miles: segment.distance_miles,
            duration_hours: segment.duration_hours,
            steps: segment
                .steps
                .iter()
                .map(|step| RouteStep {
                    waypoint_start_index: step.waypoint_start_index,
                    waypoint_end_index: step.waypoint_end_index,
                    instruction: step.instruction.clone(),
                    distance_m: step.distance_m,
                    duration_s: step.duration_s,
                })
                .collect(),
        })
        .collect();

    Ok(TripRequest {
        segments,
        waypoints: scenario.route.waypoints.clone(),
        departure_time,
        current_cycle_hours: scenario.trip.current_cycle_hours,
    })
}
