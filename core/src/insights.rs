use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::models::{ExerciseLogEntry, FoodLogEntry, MealType, Targets, WaterLogEntry};
use crate::stats;

const CALORIE_TOLERANCE: f64 = 500.0;
const AVERAGE_WINDOW_DAYS: u32 = 3;
const MIN_BREAKFAST_PROTEIN_G: f64 = 15.0;
/// Hydration is checked once the local hour is past this.
const HYDRATION_CHECK_HOUR: u32 = 18;
const MAX_REST_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InsightKind {
    HighCalorie,
    UnderEating,
    OnTrack,
    ProteinBoost,
    Dehydration,
    GetMoving,
    LateSnacking,
    AllGood,
    NoProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Alert,
    Success,
    Nudge,
    Tip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, severity: Severity, title: &str, message: String) -> Self {
        Self {
            kind,
            severity,
            title: title.to_string(),
            message,
        }
    }

    #[must_use]
    pub fn no_profile() -> Self {
        Self::new(
            InsightKind::NoProfile,
            Severity::Tip,
            "Welcome",
            "Please create your profile first.".to_string(),
        )
    }
}

/// Everything the rules look at. `now` is local wall-clock time.
pub struct InsightContext<'a> {
    pub now: NaiveDateTime,
    pub targets: &'a Targets,
    pub food: &'a [FoodLogEntry],
    pub exercise: &'a [ExerciseLogEntry],
    pub water: &'a [WaterLogEntry],
}

/// Run every rule in order. Never returns an empty list.
#[must_use]
pub fn generate_insights(ctx: &InsightContext<'_>) -> Vec<Insight> {
    let mut insights: Vec<Insight> = [
        calorie_balance(ctx),
        breakfast_protein(ctx),
        hydration(ctx),
        workout_gap(ctx),
        late_snacking(ctx),
    ]
    .into_iter()
    .flatten()
    .collect();

    if insights.is_empty() {
        insights.push(Insight::new(
            InsightKind::AllGood,
            Severity::Success,
            "Great Job",
            "Your logs look balanced. Stick to your plan!".to_string(),
        ));
    }
    insights
}

#[allow(clippy::cast_precision_loss)]
/// Averages the last three calendar days up to today; entries dated after
/// today are not counted.
fn calorie_balance(ctx: &InsightContext<'_>) -> Option<Insight> {
    let today = ctx.now.date();
    let window_start = today - Duration::days(i64::from(AVERAGE_WINDOW_DAYS) - 1);
    if !ctx
        .food
        .iter()
        .any(|e| e.date >= window_start && e.date <= today)
    {
        return None;
    }

    let average = stats::calorie_average(ctx.food, today, AVERAGE_WINDOW_DAYS);
    let target = ctx.targets.calories;
    let diff = average - target as f64;

    let insight = if diff > CALORIE_TOLERANCE {
        Insight::new(
            InsightKind::HighCalorie,
            Severity::Alert,
            "High Calorie Alert",
            format!(
                "You are averaging {average:.0} kcal (target: {target}). Try smaller portions at dinner."
            ),
        )
    } else if diff < -CALORIE_TOLERANCE {
        Insight::new(
            InsightKind::UnderEating,
            Severity::Alert,
            "Under-eating",
            format!(
                "You are averaging {average:.0} kcal. You might lose muscle; add a healthy snack like nuts or yogurt."
            ),
        )
    } else {
        Insight::new(
            InsightKind::OnTrack,
            Severity::Success,
            "Calorie Control",
            "You are within range of your calorie goal. Keep it up!".to_string(),
        )
    };
    Some(insight)
}

#[allow(clippy::cast_precision_loss)]
fn breakfast_protein(ctx: &InsightContext<'_>) -> Option<Insight> {
    let proteins: Vec<f64> = ctx
        .food
        .iter()
        .filter(|e| e.meal_type == MealType::Breakfast)
        .map(|e| e.protein)
        .collect();
    if proteins.is_empty() {
        return None;
    }
    let average = proteins.iter().sum::<f64>() / proteins.len() as f64;
    (average < MIN_BREAKFAST_PROTEIN_G).then(|| {
        Insight::new(
            InsightKind::ProteinBoost,
            Severity::Tip,
            "Protein Boost Needed",
            format!(
                "Your breakfasts average only {average:.0}g protein. Add eggs, paneer or a protein shake."
            ),
        )
    })
}

#[allow(clippy::cast_precision_loss)]
fn hydration(ctx: &InsightContext<'_>) -> Option<Insight> {
    if ctx.now.hour() <= HYDRATION_CHECK_HOUR {
        return None;
    }
    let drunk = stats::hydration_on(ctx.water, ctx.now.date());
    let half_goal = ctx.targets.water_ml as f64 * 0.5;
    (drunk < half_goal).then(|| {
        Insight::new(
            InsightKind::Dehydration,
            Severity::Alert,
            "Dehydration Risk",
            format!("It's late and you've only had {drunk:.0} ml. Drink two glasses of water now."),
        )
    })
}

fn workout_gap(ctx: &InsightContext<'_>) -> Option<Insight> {
    let last = ctx.exercise.iter().map(|e| e.date).max()?;
    let days_since = (ctx.now.date() - last).num_days();
    (days_since > MAX_REST_DAYS).then(|| {
        Insight::new(
            InsightKind::GetMoving,
            Severity::Nudge,
            "Get Moving",
            format!(
                "You haven't logged a workout in {days_since} days. Even a 15-minute walk today counts!"
            ),
        )
    })
}

fn late_snacking(ctx: &InsightContext<'_>) -> Option<Insight> {
    let cutoff = NaiveTime::from_hms_opt(22, 0, 0)?;
    ctx.food.iter().any(|e| e.time > cutoff).then(|| {
        Insight::new(
            InsightKind::LateSnacking,
            Severity::Tip,
            "Late Snacking",
            "Food was logged after 10 PM. Late eating can disrupt sleep and digestion; try herbal tea instead."
                .to_string(),
        )
    })
}
