use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitlife_core::FitLifeService;
use fitlife_core::models::{Diet, FoodItem, MealType, NewCustomFood};

use super::helpers::{exit_no_data, fmt_qty, parse_date, parse_time, print_json, truncate};

pub(crate) fn cmd_food_search(svc: &FitLifeService, query: &str, json: bool) -> Result<()> {
    let hits = svc.search_foods(query);
    if hits.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No foods found for '{query}'");
        }
        std::process::exit(2);
    }

    if json {
        print_json(&hits)?;
    } else {
        print_food_table(&hits);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_food_log(
    svc: &FitLifeService,
    dish: &str,
    quantity: f64,
    meal: &str,
    date: Option<String>,
    time: Option<String>,
    json: bool,
) -> Result<()> {
    let meal_type: MealType = meal.parse()?;
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    let entry = svc.log_food(date, time, dish, meal_type, quantity)?;

    if json {
        print_json(&entry)?;
    } else {
        println!(
            "Logged {} x {} ({}) on {}: {:.0} kcal | P:{:.0}g C:{:.0}g F:{:.0}g",
            fmt_qty(entry.quantity),
            entry.dish,
            entry.meal_type,
            entry.date.format("%Y-%m-%d"),
            entry.calories,
            entry.protein,
            entry.carbs,
            entry.fats
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_food_add(
    svc: &mut FitLifeService,
    name: &str,
    calories: f64,
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
    non_veg: bool,
    json: bool,
) -> Result<()> {
    let food = NewCustomFood {
        dish_name: name.trim().to_string(),
        calories,
        protein: protein.unwrap_or(0.0),
        carbs: carbs.unwrap_or(0.0),
        fats: fat.unwrap_or(0.0),
        diet: if non_veg { Diet::NonVeg } else { Diet::Veg },
    };
    svc.add_custom_food(&food)?;

    if json {
        print_json(&food)?;
    } else {
        println!(
            "Added custom food: {} ({:.0} kcal per serving, {})",
            food.dish_name, food.calories, food.diet
        );
    }
    Ok(())
}

/// Food entries for one day, in log order.
pub(crate) fn cmd_food_today(svc: &FitLifeService, date: Option<String>, json: bool) -> Result<()> {
    let date = parse_date(date)?;
    let entries: Vec<_> = svc
        .food_log()?
        .into_iter()
        .filter(|e| e.date == date)
        .collect();

    if json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        exit_no_data(&format!("No food entries for {}", date.format("%Y-%m-%d")), false);
    }

    #[derive(Tabled)]
    struct EntryRow {
        #[tabled(rename = "Time")]
        time: String,
        #[tabled(rename = "Meal")]
        meal: String,
        #[tabled(rename = "Dish")]
        dish: String,
        #[tabled(rename = "Qty")]
        qty: String,
        #[tabled(rename = "Calories")]
        calories: String,
        #[tabled(rename = "Protein")]
        protein: String,
    }

    let rows: Vec<EntryRow> = entries
        .iter()
        .map(|e| EntryRow {
            time: e.time.format("%H:%M").to_string(),
            meal: e.meal_type.to_string(),
            dish: truncate(&e.dish, 35),
            qty: fmt_qty(e.quantity),
            calories: format!("{:.0}", e.calories),
            protein: format!("{:.0}g", e.protein),
        })
        .collect();
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
    Ok(())
}

pub(crate) fn print_food_table(foods: &[&FoodItem]) {
    #[derive(Tabled)]
    struct FoodRow {
        #[tabled(rename = "#")]
        idx: usize,
        #[tabled(rename = "Dish")]
        name: String,
        #[tabled(rename = "Diet")]
        diet: String,
        #[tabled(rename = "Cal/svg")]
        calories: String,
        #[tabled(rename = "P (g)")]
        protein: String,
        #[tabled(rename = "C (g)")]
        carbs: String,
        #[tabled(rename = "F (g)")]
        fat: String,
        #[tabled(rename = "Source")]
        source: &'static str,
    }

    let rows: Vec<FoodRow> = foods
        .iter()
        .enumerate()
        .map(|(i, f)| FoodRow {
            idx: i + 1,
            name: truncate(&f.dish_name, 35),
            diet: f.diet.to_string(),
            calories: format!("{:.0}", f.calories),
            protein: format!("{:.1}", f.protein),
            carbs: format!("{:.1}", f.carbs),
            fat: format!("{:.1}", f.fats),
            source: if f.custom { "custom" } else { "reference" },
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..7)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}
