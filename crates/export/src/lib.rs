//! Export helpers for CSV trip-planner artifacts.
//!
//! These are the concrete edges of the "persistence store" and
//! "schema/serialization layer" named as external collaborators in the
//! core spec (§1, §6) — enough to drive the CLI demonstrator and
//! integration tests end to end, not the production persistence layer.

pub mod legs {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use hos_chunker::Leg;

    const HEADER: &str = "order,kind,distance_miles,duration_hours,start_lat,start_lon,end_lat,end_lon,segment_index,departure_time,arrival_time,start_label,end_label,notes";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard leg-export CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// Write every leg as one CSV row, in order.
    pub fn write_legs(writer: &mut dyn Write, legs: &[Leg]) -> io::Result<()> {
        write_header(writer)?;
        for leg in legs {
            write_leg(writer, leg)?;
        }
        Ok(())
    }

    fn write_leg(writer: &mut dyn Write, leg: &Leg) -> io::Result<()> {
        let departure = leg
            .departure_time
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        let arrival = leg
            .arrival_time
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        let segment_index = leg
            .segment_index
            .map(|i| i.to_string())
            .unwrap_or_default();

        writeln!(
            writer,
            "{},{:?},{},{},{:.6},{:.6},{:.6},{:.6},{},{},{},{},{},{}",
            leg.order,
            leg.kind,
            leg.distance_miles,
            leg.duration_hours,
            leg.start_coord.0,
            leg.start_coord.1,
            leg.end_coord.0,
            leg.end_coord.1,
            segment_index,
            departure,
            arrival,
            csv_quote(leg.start_label.as_deref().unwrap_or_default()),
            csv_quote(leg.end_label.as_deref().unwrap_or_default()),
            csv_quote(&leg.notes),
        )
    }

    /// Wrap a field in double quotes if it contains a comma, quote, or newline,
    /// doubling any embedded quotes per RFC 4180.
    fn csv_quote(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

pub mod daily_log {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use hos_dutylog::DailyLog;

    const HEADER: &str = "date,month_name,day,year,from_location,to_location,off_duty_hours,sleeper_berth_hours,driving_hours,on_duty_hours,total_hours,total_miles,periods";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard daily-log-export CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// Write every daily log as one CSV row, in ascending date order.
    pub fn write_daily_logs(writer: &mut dyn Write, logs: &[DailyLog]) -> io::Result<()> {
        write_header(writer)?;
        for log in logs {
            write_daily_log(writer, log)?;
        }
        Ok(())
    }

    fn write_daily_log(writer: &mut dyn Write, log: &DailyLog) -> io::Result<()> {
        let periods = log
            .periods
            .iter()
            .map(|p| format!("{:?}:{}-{}", p.status, p.start, p.end))
            .collect::<Vec<_>>()
            .join(";");

        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{},{},{},\"{}\"",
            log.date,
            log.month_name,
            log.day,
            log.year,
            quote(&log.from_location),
            quote(&log.to_location),
            log.off_duty_hours,
            log.sleeper_berth_hours,
            log.driving_hours,
            log.on_duty_hours,
            log.total_hours,
            log.total_miles,
            periods.replace('"', "\"\""),
        )
    }

    fn quote(field: &str) -> String {
        if field.contains(',') || field.contains('"') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hos_chunker::{Leg, LegKind};
    use hos_dutylog::{DailyLog, DutyPeriod};
    use hos_chunker::DutyStatus;
    use rust_decimal::Decimal;

    fn sample_leg() -> Leg {
        let tz = chrono_tz::America::Chicago;
        let start = chrono::TimeZone::with_ymd_and_hms(&tz, 2026, 1, 5, 8, 0, 0).unwrap();
        Leg {
            order: 0,
            kind: LegKind::Drive,
            distance_miles: Decimal::from(100),
            duration_hours: Decimal::from(2),
            start_coord: (41.8781, -87.6298),
            end_coord: (39.7817, -89.6501),
            polyline_slice: None,
            notes: String::new(),
            segment_index: Some(0),
            steps: Vec::new(),
            departure_time: Some(start),
            arrival_time: Some(start + chrono::Duration::hours(2)),
            start_label: Some("Pickup Leg 1".to_string()),
            end_label: Some("Pickup Leg 1".to_string()),
        }
    }

    #[test]
    fn legs_csv_round_trips_header_and_row_count() {
        let legs = vec![sample_leg()];
        let mut buf = Vec::new();
        legs::write_legs(&mut buf, &legs).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("order,kind"));
        assert!(lines[1].starts_with("0,Drive,100,2"));
    }

    #[test]
    fn legs_csv_quotes_commas_in_notes() {
        let mut leg = sample_leg();
        leg.notes = "Fuel stop, required every 1000 miles".to_string();
        let mut buf = Vec::new();
        legs::write_legs(&mut buf, std::slice::from_ref(&leg)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"Fuel stop, required every 1000 miles\""));
    }

    #[test]
    fn daily_log_csv_includes_period_summary() {
        let log = DailyLog {
            date: chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            year: 2026,
            month: 1,
            month_name: "January".to_string(),
            day: 5,
            from_location: "Chicago".to_string(),
            to_location: "Springfield".to_string(),
            periods: vec![DutyPeriod {
                status: DutyStatus::Driving,
                start: "08:00".to_string(),
                end: "10:00".to_string(),
            }],
            off_duty_hours: Decimal::from(22),
            sleeper_berth_hours: Decimal::ZERO,
            driving_hours: Decimal::from(2),
            on_duty_hours: Decimal::ZERO,
            total_hours: Decimal::from(24),
            total_miles: Decimal::from(100),
        };

        let mut buf = Vec::new();
        daily_log::write_daily_logs(&mut buf, &[log]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Driving:08:00-10:00"));
        assert!(text.contains("2026-01-05,January,5,2026"));
    }
}
