use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitlife_core::FitLifeService;
use fitlife_core::models::WeightLogEntry;

use super::helpers::{exit_no_data, no_neg_zero, parse_date, print_json};

pub(crate) fn cmd_weight_log(
    svc: &mut FitLifeService,
    weight_kg: f64,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let entry = svc.log_weight(date, weight_kg)?;

    if json {
        print_json(&entry)?;
    } else {
        println!(
            "Logged {:.1} kg for {}",
            entry.weight_kg,
            entry.date.format("%Y-%m-%d")
        );
        if let Some(profile) = svc.profile() {
            let change = profile.current_weight_kg - profile.start_weight_kg;
            println!("  Change since start: {:+.1} kg", no_neg_zero(change));
        }
    }
    Ok(())
}

/// Entries from the last `days` days ending at `today`; all of them when `days` is `None`.
fn within_days(
    entries: Vec<WeightLogEntry>,
    today: NaiveDate,
    days: Option<u32>,
) -> Vec<WeightLogEntry> {
    match days {
        Some(days) => {
            let since = today - Duration::days(i64::from(days));
            entries.into_iter().filter(|e| e.date > since).collect()
        }
        None => entries,
    }
}

pub(crate) fn cmd_weight_history(svc: &FitLifeService, days: Option<u32>, json: bool) -> Result<()> {
    let entries = within_days(svc.weight_history()?, Local::now().date_naive(), days);

    if json {
        return print_json(&entries);
    }
    let Some(first) = entries.first().map(|e| e.weight_kg) else {
        exit_no_data(
            "No weight entries found. Use `fitlife weight log` to record your weight.",
            false,
        );
    };

    #[derive(Tabled)]
    struct WeightRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Weight (kg)")]
        kg: String,
        #[tabled(rename = "Change (kg)")]
        change: String,
    }

    let rows: Vec<WeightRow> = entries
        .iter()
        .map(|e| WeightRow {
            date: e.date.format("%Y-%m-%d").to_string(),
            kg: format!("{:.1}", e.weight_kg),
            change: format!("{:+.1}", no_neg_zero(e.weight_kg - first)),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
    Ok(())
}
