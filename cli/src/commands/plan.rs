use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitlife_core::FitLifeService;
use fitlife_core::meal_plan::{DietPreference, MealPlanOptions};

use super::helpers::{exit_no_data, fmt_qty, print_json, truncate};

pub(crate) fn cmd_plan(
    svc: &FitLifeService,
    days: u32,
    diet: &str,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    if svc.profile().is_none() {
        exit_no_data(
            "No profile found. Use `fitlife profile create` to set one up.",
            json,
        );
    }
    let diet: DietPreference = diet.parse()?;
    let plan = svc.meal_plan(diet, days, MealPlanOptions { seed })?;

    if json {
        return print_json(&plan);
    }

    #[derive(Tabled)]
    struct MealRow {
        #[tabled(rename = "Meal")]
        meal: String,
        #[tabled(rename = "Dish")]
        dish: String,
        #[tabled(rename = "Qty")]
        qty: String,
        #[tabled(rename = "Diet")]
        diet: String,
        #[tabled(rename = "Calories")]
        calories: String,
    }

    for day in &plan {
        println!("Day {} ({} kcal)", day.day, day.total_calories);
        let rows: Vec<MealRow> = day
            .meals
            .iter()
            .map(|m| MealRow {
                meal: m.meal.to_string(),
                dish: truncate(&m.dish, 35),
                qty: format!("{} {}", fmt_qty(m.quantity), m.unit),
                diet: m.diet.to_string(),
                calories: m.calories.to_string(),
            })
            .collect();
        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(4..)).with(Alignment::right()))
            .to_string();
        println!("{table}\n");
    }
    Ok(())
}
