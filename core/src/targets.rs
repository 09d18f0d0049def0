use serde::Serialize;

use crate::models::{ActivityLevel, Gender, Goal, MacroSplit, Profile, Targets};

/// Attributes the daily targets are derived from.
#[derive(Debug, Clone)]
pub struct TargetInputs<'a> {
    pub gender: Gender,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity: &'a str,
    pub goal: Goal,
    pub water_goal_ml: i64,
}

/// Basal metabolic rate (Mifflin-St Jeor), kcal/day.
#[must_use]
pub fn bmr(gender: Gender, weight_kg: f64, height_cm: f64, age: u32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

#[must_use]
pub fn tdee(bmr: f64, activity: &str) -> f64 {
    bmr * ActivityLevel::from_label(activity).factor()
}

/// Daily calorie adjustment applied on top of TDEE.
#[must_use]
pub fn goal_adjustment(goal: Goal) -> f64 {
    match goal {
        Goal::WeightLoss => -500.0,
        Goal::WeightGain => 500.0,
        Goal::MuscleGain => 250.0,
        Goal::Maintain => 0.0,
    }
}

#[must_use]
pub fn macro_split(goal: Goal) -> MacroSplit {
    match goal {
        Goal::WeightLoss => MacroSplit::new(40, 40, 20),
        Goal::WeightGain => MacroSplit::new(50, 25, 25),
        Goal::MuscleGain => MacroSplit::new(45, 35, 20),
        Goal::Maintain => MacroSplit::new(50, 20, 30),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#[must_use]
pub fn compute_targets(inputs: &TargetInputs<'_>) -> Targets {
    let bmr = bmr(inputs.gender, inputs.weight_kg, inputs.height_cm, inputs.age);
    let target = tdee(bmr, inputs.activity) + goal_adjustment(inputs.goal);
    let split = macro_split(inputs.goal);
    let protein_g = target * split.protein_pct as f64 / 100.0 / 4.0;

    Targets {
        calories: target.trunc() as i64,
        protein_g: protein_g.trunc() as i64,
        water_ml: inputs.water_goal_ml,
        macro_split: split,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NutritionPlan {
    pub calories: i64,
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fats_g: i64,
    pub macro_split: MacroSplit,
    pub bmi: f64,
    pub tip: &'static str,
}

#[must_use]
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let h = height_cm / 100.0;
    if h <= 0.0 {
        return 0.0;
    }
    weight_kg / (h * h)
}

#[must_use]
pub fn bmi_tip(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Increase calorie intake with nutrient-dense foods."
    } else if bmi > 25.0 {
        "Include more vegetables and lean protein for fat loss."
    } else {
        "Maintain balanced meals & steady exercise."
    }
}

/// Gram targets for the profile's stored calories and split.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#[must_use]
pub fn nutrition_plan(profile: &Profile) -> NutritionPlan {
    let cal = profile.targets.calories as f64;
    let split = profile.targets.macro_split;
    let grams = |pct: i64, kcal_per_g: f64| (cal * pct as f64 / 100.0 / kcal_per_g).round() as i64;
    let bmi = bmi(profile.current_weight_kg, profile.height_cm);

    NutritionPlan {
        calories: profile.targets.calories,
        protein_g: grams(split.protein_pct, 4.0),
        carbs_g: grams(split.carbs_pct, 4.0),
        fats_g: grams(split.fat_pct, 9.0),
        macro_split: split,
        bmi,
        tip: bmi_tip(bmi),
    }
}

/// Calories burnt for an activity: MET x kg x hours.
#[must_use]
pub fn estimate_burn(met: f64, weight_kg: f64, minutes: f64) -> f64 {
    met * weight_kg * minutes / 60.0
}
