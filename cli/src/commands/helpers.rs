use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use std::process;

use fitlife_core::models::{parse_log_date, parse_log_time};

/// Resolve a `--date` argument against `today`: a keyword or any date format
/// the logs accept.
fn resolve_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    let Some(raw) = raw else {
        return Ok(today);
    };
    match raw.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        "tomorrow" => Ok(today + Duration::days(1)),
        _ => parse_log_date(raw).with_context(|| {
            format!("Invalid date '{raw}'. Use YYYY-MM-DD or today/yesterday/tomorrow")
        }),
    }
}

pub(crate) fn parse_date(date_str: Option<String>) -> Result<NaiveDate> {
    resolve_date(date_str.as_deref(), Local::now().date_naive())
}

/// `HH:MM` or `HH:MM:SS`; defaults to the current time, to the second.
pub(crate) fn parse_time(time_str: Option<String>) -> Result<NaiveTime> {
    match time_str {
        None => {
            let now = Local::now().time();
            Ok(now.with_nanosecond(0).unwrap_or(now))
        }
        Some(s) => {
            parse_log_time(&s).with_context(|| format!("Invalid time '{s}'. Use HH:MM or HH:MM:SS"))
        }
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn json_error(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

/// Report a "nothing to show" condition and exit with status 2.
pub(crate) fn exit_no_data(message: &str, json: bool) -> ! {
    if json {
        println!("{}", json_error(message));
    } else {
        eprintln!("{message}");
    }
    process::exit(2);
}

/// Turn `-0.0` into `0.0` so tables never print "-0".
pub(crate) fn no_neg_zero(v: f64) -> f64 {
    v + 0.0
}

/// Cut a cell to `max` characters, marking the cut with "...".
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// `12.0` → "12", `1.5` → "1.5".
pub(crate) fn fmt_qty(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}
