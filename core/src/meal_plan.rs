use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::models::{Diet, FoodItem, Goal, MealType};

pub const MAX_PLAN_DAYS: u32 = 7;

/// Candidate window around each slot's calorie budget, in kcal.
const CANDIDATE_WINDOW: f64 = 150.0;
const MIN_QUANTITY: f64 = 0.5;
const MAX_QUANTITY: f64 = 3.0;

/// Share of the daily target given to each slot, in serving order.
pub const SLOT_SHARES: &[(MealType, f64)] = &[
    (MealType::Breakfast, 0.25),
    (MealType::Lunch, 0.35),
    (MealType::Dinner, 0.30),
    (MealType::Snack, 0.10),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DietPreference {
    Vegetarian,
    NonVegetarian,
}

impl FromStr for DietPreference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "veg" | "vegetarian" => Ok(DietPreference::Vegetarian),
            "nonveg" | "nonvegetarian" => Ok(DietPreference::NonVegetarian),
            _ => bail!("Invalid diet '{s}'. Must be one of: vegetarian, non-vegetarian"),
        }
    }
}

impl fmt::Display for DietPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietPreference::Vegetarian => f.write_str("Vegetarian"),
            DietPreference::NonVegetarian => f.write_str("Non-Vegetarian"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MealPlanOptions {
    /// Fixed seed for a reproducible plan; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedMeal {
    pub meal: MealType,
    pub dish: String,
    pub quantity: f64,
    pub unit: String,
    pub calories: i64,
    pub diet: Diet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub day: u32,
    pub meals: Vec<PlannedMeal>,
    pub total_calories: i64,
}

/// Build a `days`-day plan from `foods`, seeded per `options`.
pub fn generate(
    foods: &[FoodItem],
    target_calories: i64,
    goal: Goal,
    diet: DietPreference,
    days: u32,
    options: MealPlanOptions,
) -> Result<Vec<DayPlan>> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    generate_with_rng(foods, target_calories, goal, diet, days, &mut rng)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn generate_with_rng<R: Rng>(
    foods: &[FoodItem],
    target_calories: i64,
    goal: Goal,
    diet: DietPreference,
    days: u32,
    rng: &mut R,
) -> Result<Vec<DayPlan>> {
    if !(1..=MAX_PLAN_DAYS).contains(&days) {
        bail!("Plan length must be between 1 and {MAX_PLAN_DAYS} days");
    }

    let mut pool: Vec<&FoodItem> = foods
        .iter()
        .filter(|f| diet == DietPreference::NonVegetarian || f.diet == Diet::Veg)
        .collect();
    if pool.is_empty() {
        bail!("No foods available for a {diet} meal plan");
    }

    match goal {
        Goal::MuscleGain => pool.sort_by(|a, b| b.protein.total_cmp(&a.protein)),
        Goal::WeightLoss => pool.sort_by(|a, b| a.calories.total_cmp(&b.calories)),
        Goal::WeightGain | Goal::Maintain => {}
    }

    let target = target_calories as f64;
    let mut plan = Vec::with_capacity(days as usize);
    for day in 1..=days {
        let mut meals = Vec::with_capacity(SLOT_SHARES.len());
        for &(meal, share) in SLOT_SHARES {
            let budget = target * share;
            let in_window: Vec<&FoodItem> = pool
                .iter()
                .copied()
                .filter(|f| (f.calories - budget).abs() <= CANDIDATE_WINDOW)
                .collect();
            let candidates = if in_window.is_empty() { &pool } else { &in_window };

            let food = candidates[rng.random_range(0..candidates.len())];
            let quantity = round1(budget / food.calories).clamp(MIN_QUANTITY, MAX_QUANTITY);
            meals.push(PlannedMeal {
                meal,
                dish: food.dish_name.clone(),
                quantity,
                unit: food.serving_unit.clone(),
                calories: (food.calories * quantity).trunc() as i64,
                diet: food.diet,
            });
        }
        let total_calories = meals.iter().map(|m| m.calories).sum();
        plan.push(DayPlan {
            day,
            meals,
            total_calories,
        });
    }
    Ok(plan)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
