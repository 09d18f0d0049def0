use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitlife_core::FitLifeService;

use super::helpers::{exit_no_data, fmt_qty, parse_date, parse_time, print_json, truncate};

pub(crate) fn cmd_exercise_search(svc: &FitLifeService, query: &str, json: bool) -> Result<()> {
    let hits = svc.search_exercises(query);
    if hits.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No activities found for '{query}'");
        }
        process::exit(2);
    }

    if json {
        return print_json(&hits);
    }

    #[derive(Tabled)]
    struct ActivityRow {
        #[tabled(rename = "#")]
        idx: usize,
        #[tabled(rename = "Activity")]
        description: String,
        #[tabled(rename = "MET")]
        met: String,
    }

    let rows: Vec<ActivityRow> = hits
        .iter()
        .enumerate()
        .map(|(i, a)| ActivityRow {
            idx: i + 1,
            description: truncate(&a.description, 50),
            met: format!("{:.1}", a.met),
        })
        .collect();
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
    Ok(())
}

pub(crate) fn cmd_exercise_log(
    svc: &FitLifeService,
    activity: &str,
    minutes: f64,
    date: Option<String>,
    time: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    let entry = svc.log_exercise(date, time, activity, minutes)?;

    if json {
        print_json(&entry)?;
    } else {
        println!(
            "Logged {} min of {} on {}: ~{:.0} kcal burnt",
            fmt_qty(entry.duration_min),
            entry.activity,
            entry.date.format("%Y-%m-%d"),
            entry.calories_burnt
        );
    }
    Ok(())
}

pub(crate) fn cmd_exercise_history(
    svc: &FitLifeService,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut entries = svc.exercise_history()?;
    if let Some(n) = limit {
        entries.truncate(n);
    }

    if json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        exit_no_data(
            "No workouts logged yet. Use `fitlife exercise log` to record one.",
            false,
        );
    }

    #[derive(Tabled)]
    struct WorkoutRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Time")]
        time: String,
        #[tabled(rename = "Activity")]
        activity: String,
        #[tabled(rename = "Minutes")]
        minutes: String,
        #[tabled(rename = "Burnt (kcal)")]
        burnt: String,
    }

    let rows: Vec<WorkoutRow> = entries
        .iter()
        .map(|e| WorkoutRow {
            date: e.date.format("%Y-%m-%d").to_string(),
            time: e.time.format("%H:%M").to_string(),
            activity: truncate(&e.activity, 40),
            minutes: fmt_qty(e.duration_min),
            burnt: format!("{:.0}", e.calories_burnt),
        })
        .collect();
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
    Ok(())
}
