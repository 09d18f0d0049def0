use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitlife_core::FitLifeService;

use super::helpers::{exit_no_data, parse_date, parse_time, print_json};

pub(crate) fn cmd_water_log(
    svc: &FitLifeService,
    volume: f64,
    beverage: &str,
    date: Option<String>,
    time: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    let entry = svc.log_beverage(date, time, beverage, volume)?;

    if json {
        print_json(&entry)?;
    } else {
        println!(
            "Logged {:.0} ml {} ({:.0} ml effective) on {}",
            entry.volume_ml,
            entry.beverage,
            entry.effective_ml,
            entry.date.format("%Y-%m-%d")
        );
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn cmd_water_show(svc: &FitLifeService, date: Option<String>, json: bool) -> Result<()> {
    let date = parse_date(date)?;
    let summary = svc.hydration_for(date)?;

    if json {
        return print_json(&summary);
    }
    if summary.entries.is_empty() {
        exit_no_data(&format!("No drinks logged for {}", date.format("%Y-%m-%d")), false);
    }

    #[derive(Tabled)]
    struct DrinkRow {
        #[tabled(rename = "Time")]
        time: String,
        #[tabled(rename = "Beverage")]
        beverage: String,
        #[tabled(rename = "Volume (ml)")]
        volume: String,
        #[tabled(rename = "Effective (ml)")]
        effective: String,
    }

    let rows: Vec<DrinkRow> = summary
        .entries
        .iter()
        .map(|e| DrinkRow {
            time: e.time.format("%H:%M").to_string(),
            beverage: e.beverage.clone(),
            volume: format!("{:.0}", e.volume_ml),
            effective: format!("{:.0}", e.effective_ml),
        })
        .collect();
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    let pct = if summary.goal_ml > 0 {
        (summary.effective_ml / summary.goal_ml as f64 * 100.0).min(100.0)
    } else {
        0.0
    };
    println!(
        "Effective hydration: {:.0} / {} ml ({pct:.0}%)",
        summary.effective_ml, summary.goal_ml
    );
    Ok(())
}
