use anyhow::Result;
use chrono::Local;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitlife_core::FitLifeService;
use fitlife_core::insights::Severity;

use super::helpers::{exit_no_data, no_neg_zero, parse_date, print_json};

const NO_PROFILE: &str = "No profile found. Use `fitlife profile create` to set one up.";

pub(crate) fn cmd_dashboard(svc: &FitLifeService, json: bool) -> Result<()> {
    if svc.profile().is_none() {
        exit_no_data(NO_PROFILE, json);
    }
    let dash = svc.dashboard(Local::now().date_naive())?;

    if json {
        return print_json(&dash);
    }

    let s = &dash.stats;
    println!("=== {} ===\n", dash.date.format("%Y-%m-%d"));
    println!(
        "  Eaten:     {:.0} kcal (target {})",
        no_neg_zero(s.eaten),
        dash.calorie_target
    );
    println!("  Burnt:     {:.0} kcal", no_neg_zero(s.burnt));
    println!("  Net:       {:.0} kcal", no_neg_zero(s.net));
    println!("  Remaining: {:.0} kcal", no_neg_zero(dash.remaining));
    println!(
        "  Protein:   {:.0} g (goal {} g)",
        no_neg_zero(s.protein),
        dash.protein_target
    );
    println!(
        "  Hydration: {:.0} ml (goal {} ml)",
        no_neg_zero(s.hydration_ml),
        dash.water_target
    );
    println!();
    println!("  Streak:    {} day(s)", dash.streak);
    println!(
        "  Weight:    {:.1} kg ({:+.1} kg since start)",
        dash.current_weight_kg,
        no_neg_zero(dash.weight_change_kg)
    );
    Ok(())
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Alert => "[!]",
        Severity::Success => "[ok]",
        Severity::Nudge => "[>]",
        Severity::Tip => "[i]",
    }
}

pub(crate) fn cmd_insights(svc: &FitLifeService, json: bool) -> Result<()> {
    let insights = svc.insights(Local::now().naive_local())?;

    if json {
        return print_json(&insights);
    }
    for insight in &insights {
        println!(
            "{} {}: {}",
            severity_tag(insight.severity),
            insight.title,
            insight.message
        );
    }
    Ok(())
}

pub(crate) fn cmd_nutrition(svc: &FitLifeService, json: bool) -> Result<()> {
    if svc.profile().is_none() {
        exit_no_data(NO_PROFILE, json);
    }
    let plan = svc.nutrition_plan()?;

    if json {
        return print_json(&plan);
    }
    println!("  Calories: {} kcal", plan.calories);
    println!(
        "  Protein:  {} g | Carbs: {} g | Fats: {} g",
        plan.protein_g, plan.carbs_g, plan.fats_g
    );
    println!("  BMI:      {:.1}", plan.bmi);
    println!("  Tip:      {}", plan.tip);
    Ok(())
}

pub(crate) fn cmd_analytics(svc: &FitLifeService, date: Option<String>, json: bool) -> Result<()> {
    if svc.profile().is_none() {
        exit_no_data(NO_PROFILE, json);
    }
    let date = parse_date(date)?;
    let analytics = svc.analytics(date)?;

    if json {
        return print_json(&analytics);
    }
    if analytics.daily.is_empty() {
        exit_no_data("No data available. Log some meals first.", false);
    }

    #[derive(Tabled)]
    struct CalorieRow {
        #[tabled(rename = "Period")]
        period: String,
        #[tabled(rename = "Calories")]
        calories: String,
    }

    println!("Daily calorie intake");
    let daily: Vec<CalorieRow> = analytics
        .daily
        .iter()
        .map(|d| CalorieRow {
            period: d.date.format("%Y-%m-%d").to_string(),
            calories: format!("{:.0}", no_neg_zero(d.calories)),
        })
        .collect();
    print_right_aligned(&daily);

    println!("\nWeekly summaries");
    let weekly: Vec<CalorieRow> = analytics
        .weekly
        .iter()
        .map(|w| CalorieRow {
            period: w.label.clone(),
            calories: format!("{:.0}", no_neg_zero(w.calories)),
        })
        .collect();
    print_right_aligned(&weekly);

    #[derive(Tabled)]
    struct MacroRow {
        #[tabled(rename = "Macro")]
        name: &'static str,
        #[tabled(rename = "Actual (g)")]
        actual: String,
        #[tabled(rename = "Target (g)")]
        target: String,
    }

    println!("\nMacros for {}", date.format("%Y-%m-%d"));
    let a = &analytics.actual;
    let t = &analytics.target;
    let macros = vec![
        MacroRow {
            name: "Protein",
            actual: format!("{:.0}", no_neg_zero(a.protein)),
            target: t.protein_g.to_string(),
        },
        MacroRow {
            name: "Carbs",
            actual: format!("{:.0}", no_neg_zero(a.carbs)),
            target: t.carbs_g.to_string(),
        },
        MacroRow {
            name: "Fats",
            actual: format!("{:.0}", no_neg_zero(a.fats)),
            target: t.fats_g.to_string(),
        },
    ];
    print_right_aligned(&macros);
    Ok(())
}

fn print_right_aligned<T: Tabled>(rows: &[T]) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}
