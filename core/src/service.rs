use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use tracing::info;

use crate::insights::{self, Insight, InsightContext};
use crate::meal_plan::{self, DayPlan, DietPreference, MealPlanOptions};
use crate::models::{
    ExerciseActivity, ExerciseLogEntry, FoodItem, FoodLogEntry, MealType, NewCustomFood, Profile,
    ProfileInput, ProfileUpdate, SymptomAdvice, WaterLogEntry, WeightLogEntry, canonical_beverage,
    effective_hydration, validate_custom_food, validate_duration, validate_profile_input,
    validate_quantity, validate_volume, validate_weight,
};
use crate::reference::{ExerciseTable, FoodTable, SymptomTable};
use crate::stats::{self, DailyStats, DailyTotal, MacroTotals, WeeklyTotal};
use crate::store::{LogKind, Store};
use crate::targets::{self, NutritionPlan, TargetInputs};

/// Today's snapshot: intake against targets, streak and weight progress.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub date: NaiveDate,
    pub stats: DailyStats,
    pub calorie_target: i64,
    pub protein_target: i64,
    pub water_target: i64,
    pub remaining: f64,
    pub streak: u32,
    pub current_weight_kg: f64,
    pub weight_change_kg: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HydrationSummary {
    pub date: NaiveDate,
    pub volume_ml: f64,
    pub effective_ml: f64,
    pub goal_ml: i64,
    pub entries: Vec<WaterLogEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Analytics {
    pub date: NaiveDate,
    pub daily: Vec<DailyTotal>,
    pub weekly: Vec<WeeklyTotal>,
    pub actual: MacroTotals,
    pub target: NutritionPlan,
}

/// Session context: storage, loaded reference tables and the current profile.
pub struct FitLifeService {
    store: Store,
    foods: FoodTable,
    exercises: ExerciseTable,
    symptoms: SymptomTable,
    profile: Option<Profile>,
}

impl FitLifeService {
    pub fn open(data_dir: &Path, reference_dir: &Path) -> Result<Self> {
        let store = Store::open(data_dir, reference_dir)?;
        let foods = store.load_food_table()?;
        let exercises = store.load_exercise_table()?;
        let symptoms = store.load_symptom_table()?;
        let profile = store.load_profile()?;
        Ok(Self {
            store,
            foods,
            exercises,
            symptoms,
            profile,
        })
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    // --- Profile ---

    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    fn require_profile(&self) -> Result<&Profile> {
        self.profile
            .as_ref()
            .context("No profile found. Create a profile first.")
    }

    /// Create (or overwrite) the profile and seed the weight log.
    pub fn create_profile(&mut self, input: &ProfileInput, today: NaiveDate) -> Result<Profile> {
        validate_profile_input(input)?;
        let profile = build_profile(input, input.weight_kg);
        self.store.save_profile(&profile)?;

        if self.store.weight_log()?.is_empty() {
            self.store.append_weight(&WeightLogEntry {
                date: today,
                weight_kg: input.weight_kg,
            })?;
        }

        info!(name = %profile.name, calories = profile.targets.calories, "created profile");
        self.profile = Some(profile.clone());
        Ok(profile)
    }

    /// Apply a settings edit and recompute every target. A changed weight is
    /// also recorded in the weight log.
    pub fn update_profile(&mut self, update: &ProfileUpdate, today: NaiveDate) -> Result<Profile> {
        let current = self.require_profile()?;
        let input = ProfileInput {
            name: current.name.clone(),
            age: update.age.unwrap_or(current.age),
            gender: current.gender,
            height_cm: update.height_cm.unwrap_or(current.height_cm),
            weight_kg: update.weight_kg.unwrap_or(current.current_weight_kg),
            activity: update
                .activity
                .clone()
                .unwrap_or_else(|| current.activity.clone()),
            goal: update.goal.unwrap_or(current.goal),
            water_goal_ml: update.water_goal_ml.unwrap_or(current.targets.water_ml),
        };
        validate_profile_input(&input)?;

        let weight_changed = (input.weight_kg - current.current_weight_kg).abs() > f64::EPSILON;
        let profile = build_profile(&input, current.start_weight_kg);
        self.store.save_profile(&profile)?;
        if weight_changed {
            self.store.append_weight(&WeightLogEntry {
                date: today,
                weight_kg: input.weight_kg,
            })?;
        }

        info!(calories = profile.targets.calories, "updated profile");
        self.profile = Some(profile.clone());
        Ok(profile)
    }

    // --- Food ---

    #[must_use]
    pub fn foods(&self) -> &FoodTable {
        &self.foods
    }

    #[must_use]
    pub fn search_foods(&self, query: &str) -> Vec<&FoodItem> {
        self.foods.search(query)
    }

    /// Log `quantity` servings of a known dish; macros scale with quantity.
    pub fn log_food(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        dish: &str,
        meal_type: MealType,
        quantity: f64,
    ) -> Result<FoodLogEntry> {
        validate_quantity(quantity)?;
        let Some(food) = self.foods.find(dish) else {
            bail!("Unknown food '{dish}'. Search the food table or add it as a custom food.");
        };

        let entry = FoodLogEntry {
            date,
            time,
            dish: food.dish_name.clone(),
            meal_type,
            quantity,
            calories: food.calories * quantity,
            protein: food.protein * quantity,
            carbs: food.carbs * quantity,
            fats: food.fats * quantity,
        };
        self.store.append_food(&entry)?;
        info!(dish = %entry.dish, %meal_type, calories = entry.calories, "logged food");
        Ok(entry)
    }

    pub fn add_custom_food(&mut self, food: &NewCustomFood) -> Result<()> {
        validate_custom_food(food)?;
        self.store.add_custom_food(food)?;
        self.foods = self.store.load_food_table()?;
        info!(dish = %food.dish_name, "added custom food");
        Ok(())
    }

    pub fn food_log(&self) -> Result<Vec<FoodLogEntry>> {
        self.store.food_log()
    }

    // --- Hydration ---

    pub fn log_beverage(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        beverage: &str,
        volume_ml: f64,
    ) -> Result<WaterLogEntry> {
        validate_volume(volume_ml)?;
        let entry = WaterLogEntry {
            date,
            time,
            beverage: canonical_beverage(beverage),
            volume_ml,
            effective_ml: effective_hydration(beverage, volume_ml),
        };
        self.store.append_water(&entry)?;
        info!(beverage = %entry.beverage, effective = entry.effective_ml, "logged beverage");
        Ok(entry)
    }

    pub fn hydration_for(&self, date: NaiveDate) -> Result<HydrationSummary> {
        let goal_ml = self.require_profile()?.targets.water_ml;
        let entries: Vec<WaterLogEntry> = self
            .store
            .water_log()?
            .into_iter()
            .filter(|e| e.date == date)
            .collect();
        Ok(HydrationSummary {
            date,
            volume_ml: entries.iter().map(|e| e.volume_ml).sum(),
            effective_ml: entries.iter().map(|e| e.effective_ml).sum(),
            goal_ml,
            entries,
        })
    }

    // --- Exercise ---

    #[must_use]
    pub fn search_exercises(&self, query: &str) -> Vec<&ExerciseActivity> {
        self.exercises.search(query)
    }

    /// Log a workout; the burn is estimated from the activity's MET value and
    /// the profile's current weight.
    pub fn log_exercise(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        activity: &str,
        minutes: f64,
    ) -> Result<ExerciseLogEntry> {
        validate_duration(minutes)?;
        let weight = self.require_profile()?.current_weight_kg;
        let Some(found) = self.exercises.find(activity) else {
            bail!("Unknown activity '{activity}'. Search the exercise table first.");
        };

        let entry = ExerciseLogEntry {
            date,
            time,
            activity: found.description.clone(),
            duration_min: minutes,
            calories_burnt: targets::estimate_burn(found.met, weight, minutes),
        };
        self.store.append_exercise(&entry)?;
        info!(activity = %entry.activity, burnt = entry.calories_burnt, "logged exercise");
        Ok(entry)
    }

    /// Exercise log, most recent first.
    pub fn exercise_history(&self) -> Result<Vec<ExerciseLogEntry>> {
        let mut log = self.store.exercise_log()?;
        log.reverse();
        Ok(log)
    }

    // --- Weight ---

    /// Record a weigh-in and make it the profile's current weight.
    pub fn log_weight(&mut self, date: NaiveDate, weight_kg: f64) -> Result<WeightLogEntry> {
        validate_weight(weight_kg)?;
        let mut profile = self.require_profile()?.clone();

        let entry = WeightLogEntry { date, weight_kg };
        self.store.append_weight(&entry)?;

        profile.current_weight_kg = weight_kg;
        self.store.save_profile(&profile)?;
        self.profile = Some(profile);
        info!(weight_kg, "logged weight");
        Ok(entry)
    }

    /// Weight log, oldest first.
    pub fn weight_history(&self) -> Result<Vec<WeightLogEntry>> {
        let mut log = self.store.weight_log()?;
        log.sort_by_key(|e| e.date);
        Ok(log)
    }

    // --- Aggregates ---

    pub fn daily_stats(&self, date: NaiveDate) -> Result<DailyStats> {
        Ok(stats::daily_stats(
            &self.store.food_log()?,
            &self.store.exercise_log()?,
            &self.store.water_log()?,
            date,
        ))
    }

    pub fn dashboard(&self, today: NaiveDate) -> Result<Dashboard> {
        let profile = self.require_profile()?;
        let food = self.store.food_log()?;
        let day = stats::daily_stats(
            &food,
            &self.store.exercise_log()?,
            &self.store.water_log()?,
            today,
        );
        let calorie_target = profile.targets.calories;

        #[allow(clippy::cast_precision_loss)]
        let remaining = (calorie_target as f64 - day.net).max(0.0);

        Ok(Dashboard {
            date: today,
            stats: day,
            calorie_target,
            protein_target: profile.targets.protein_g,
            water_target: profile.targets.water_ml,
            remaining,
            streak: stats::logging_streak(food.iter().map(|e| e.date), today),
            current_weight_kg: profile.current_weight_kg,
            weight_change_kg: profile.current_weight_kg - profile.start_weight_kg,
        })
    }

    /// Rule-based insights for `now`. Without a profile this is a single
    /// prompt to create one.
    pub fn insights(&self, now: NaiveDateTime) -> Result<Vec<Insight>> {
        let Some(profile) = self.profile.as_ref() else {
            return Ok(vec![Insight::no_profile()]);
        };
        let food = self.store.food_log()?;
        let exercise = self.store.exercise_log()?;
        let water = self.store.water_log()?;
        Ok(insights::generate_insights(&InsightContext {
            now,
            targets: &profile.targets,
            food: &food,
            exercise: &exercise,
            water: &water,
        }))
    }

    pub fn nutrition_plan(&self) -> Result<NutritionPlan> {
        Ok(targets::nutrition_plan(self.require_profile()?))
    }

    /// Calorie series plus actual vs recommended macros for `date`.
    pub fn analytics(&self, date: NaiveDate) -> Result<Analytics> {
        let target = self.nutrition_plan()?;
        let food = self.store.food_log()?;
        Ok(Analytics {
            date,
            daily: stats::daily_calories(&food),
            weekly: stats::weekly_calories(&food),
            actual: stats::macro_totals(&food, date),
            target,
        })
    }

    pub fn meal_plan(
        &self,
        diet: DietPreference,
        days: u32,
        options: MealPlanOptions,
    ) -> Result<Vec<DayPlan>> {
        let profile = self.require_profile()?;
        meal_plan::generate(
            self.foods.items(),
            profile.targets.calories,
            profile.goal,
            diet,
            days,
            options,
        )
    }

    // --- Symptoms ---

    #[must_use]
    pub fn symptoms(&self) -> Vec<String> {
        self.symptoms.symptoms()
    }

    #[must_use]
    pub fn symptom_advice(&self, symptom: &str) -> Option<&SymptomAdvice> {
        self.symptoms.lookup(symptom)
    }

    // --- Data management ---

    pub fn export_log(&self, kind: LogKind) -> Result<Vec<u8>> {
        self.store.export_log(kind)
    }

    /// Wipe all user data and forget the in-memory profile.
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset()?;
        self.profile = None;
        self.foods = self.store.load_food_table()?;
        Ok(())
    }
}

fn build_profile(input: &ProfileInput, start_weight_kg: f64) -> Profile {
    let targets = targets::compute_targets(&TargetInputs {
        gender: input.gender,
        age: input.age,
        height_cm: input.height_cm,
        weight_kg: input.weight_kg,
        activity: &input.activity,
        goal: input.goal,
        water_goal_ml: input.water_goal_ml,
    });
    Profile {
        name: input.name.trim().to_string(),
        age: input.age,
        gender: input.gender,
        height_cm: input.height_cm,
        start_weight_kg,
        current_weight_kg: input.weight_kg,
        activity: input.activity.clone(),
        goal: input.goal,
        targets,
    }
}
