use anyhow::Result;

use fitlife_core::FitLifeService;

use super::helpers::{exit_no_data, print_json};

pub(crate) fn cmd_symptom_list(svc: &FitLifeService, json: bool) -> Result<()> {
    let symptoms = svc.symptoms();
    if symptoms.is_empty() {
        exit_no_data("No symptom table found in the reference directory.", json);
    }
    if json {
        return print_json(&symptoms);
    }
    for s in &symptoms {
        println!("{s}");
    }
    Ok(())
}

pub(crate) fn cmd_symptom_show(svc: &FitLifeService, symptom: &str, json: bool) -> Result<()> {
    let Some(advice) = svc.symptom_advice(symptom) else {
        exit_no_data(&format!("No advice found for '{symptom}'"), json);
    };

    if json {
        return print_json(advice);
    }
    println!("=== {} ===\n", advice.symptom);
    println!(
        "  Severity: {} | Recovery: {}",
        advice.severity, advice.time_to_relief
    );
    println!("  Causes:   {}", advice.possible_causes);
    println!("  Remedies: {}", advice.remedies);
    println!("  Avoid:    {}", advice.foods_to_avoid);
    println!("  Diet:     {}", advice.preferred_meal);
    println!();
    println!("  Home remedy: {}", advice.home_remedy);
    println!("  Tip:         {}", advice.tip);
    println!("  Screen time: {}", advice.screen_time);
    Ok(())
}
