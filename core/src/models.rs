use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

// --- Profile ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
}

impl From<String> for Gender {
    fn from(label: String) -> Self {
        if label.trim().eq_ignore_ascii_case("male") {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("Male"),
            Gender::Female => f.write_str("Female"),
        }
    }
}

/// Activity tier, matched on the first word of a free-text label such as
/// "Sedentary (Office)" or "Moderately Active".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityLevel {
    Sedentary,
    Lightly,
    Moderately,
    Very,
    Super,
}

impl ActivityLevel {
    pub const LABELS: &'static [&'static str] = &[
        "Sedentary (Office)",
        "Lightly Active",
        "Moderately Active",
        "Very Active",
        "Super Active",
    ];

    /// Unmatched labels fall back to `Sedentary`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.split_whitespace().next().unwrap_or("") {
            "Lightly" => ActivityLevel::Lightly,
            "Moderately" => ActivityLevel::Moderately,
            "Very" => ActivityLevel::Very,
            "Super" => ActivityLevel::Super,
            _ => ActivityLevel::Sedentary,
        }
    }

    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Lightly => 1.375,
            ActivityLevel::Moderately => 1.55,
            ActivityLevel::Very => 1.725,
            ActivityLevel::Super => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Goal {
    WeightLoss,
    WeightGain,
    MuscleGain,
    Maintain,
}

impl Goal {
    pub const LABELS: &'static [&'static str] =
        &["Weight Loss", "Weight Gain", "Muscle Gain", "Maintain"];

    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "weight loss" => Goal::WeightLoss,
            "weight gain" => Goal::WeightGain,
            "muscle gain" => Goal::MuscleGain,
            _ => Goal::Maintain,
        }
    }
}

impl From<String> for Goal {
    fn from(label: String) -> Self {
        Goal::from_label(&label)
    }
}

impl From<Goal> for String {
    fn from(goal: Goal) -> Self {
        goal.to_string()
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::WeightGain => "Weight Gain",
            Goal::MuscleGain => "Muscle Gain",
            Goal::Maintain => "Maintain",
        };
        f.write_str(label)
    }
}

/// Macro split in percent, persisted as a `[carbs, protein, fat]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i64, i64, i64)", into = "(i64, i64, i64)")]
pub struct MacroSplit {
    pub carbs_pct: i64,
    pub protein_pct: i64,
    pub fat_pct: i64,
}

impl MacroSplit {
    #[must_use]
    pub const fn new(carbs_pct: i64, protein_pct: i64, fat_pct: i64) -> Self {
        Self {
            carbs_pct,
            protein_pct,
            fat_pct,
        }
    }
}

impl From<(i64, i64, i64)> for MacroSplit {
    fn from((carbs_pct, protein_pct, fat_pct): (i64, i64, i64)) -> Self {
        Self::new(carbs_pct, protein_pct, fat_pct)
    }
}

impl From<MacroSplit> for (i64, i64, i64) {
    fn from(split: MacroSplit) -> Self {
        (split.carbs_pct, split.protein_pct, split.fat_pct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    #[serde(rename = "Calories")]
    pub calories: i64,
    #[serde(rename = "Protein")]
    pub protein_g: i64,
    #[serde(rename = "Water")]
    pub water_ml: i64,
    #[serde(rename = "Macros_Split")]
    pub macro_split: MacroSplit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Height")]
    pub height_cm: f64,
    #[serde(rename = "Start_Weight")]
    pub start_weight_kg: f64,
    #[serde(rename = "Current_Weight")]
    pub current_weight_kg: f64,
    #[serde(rename = "Activity")]
    pub activity: String,
    #[serde(rename = "Goal")]
    pub goal: Goal,
    #[serde(rename = "Targets")]
    pub targets: Targets,
}

/// User attributes a profile (and its targets) is computed from.
#[derive(Debug, Clone)]
pub struct ProfileInput {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity: String,
    pub goal: Goal,
    pub water_goal_ml: i64,
}

/// Partial settings edit. Anything left `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity: Option<String>,
    pub goal: Option<Goal>,
    pub water_goal_ml: Option<i64>,
}

pub fn validate_profile_input(input: &ProfileInput) -> Result<()> {
    if input.name.trim().is_empty() {
        bail!("Please enter your name");
    }
    if !(10..=100).contains(&input.age) {
        bail!("Age must be between 10 and 100");
    }
    validate_weight(input.weight_kg)?;
    if !(100.0..=250.0).contains(&input.height_cm) {
        bail!("Height must be between 100 and 250 cm");
    }
    if !(1000..=5000).contains(&input.water_goal_ml) {
        bail!("Daily water goal must be between 1000 and 5000 ml");
    }
    Ok(())
}

// --- Logs ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

pub const MEAL_TYPES: &[MealType] = &[
    MealType::Breakfast,
    MealType::Lunch,
    MealType::Dinner,
    MealType::Snack,
];

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        };
        f.write_str(label)
    }
}

impl FromStr for MealType {
    type Err = anyhow::Error;

    fn from_str(meal: &str) -> Result<Self> {
        match meal.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => bail!(
                "Invalid meal type '{meal}'. Must be one of: breakfast, lunch, dinner, snack"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodLogEntry {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Time", serialize_with = "serialize_time")]
    pub time: NaiveTime,
    #[serde(rename = "Dish")]
    pub dish: String,
    #[serde(rename = "Meal Type")]
    pub meal_type: MealType,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    #[serde(rename = "Calories")]
    pub calories: f64,
    #[serde(rename = "Protein")]
    pub protein: f64,
    #[serde(rename = "Carbs")]
    pub carbs: f64,
    #[serde(rename = "Fats")]
    pub fats: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseLogEntry {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Time", serialize_with = "serialize_time")]
    pub time: NaiveTime,
    #[serde(rename = "Activity")]
    pub activity: String,
    #[serde(rename = "Duration")]
    pub duration_min: f64,
    #[serde(rename = "Calories Burnt")]
    pub calories_burnt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterLogEntry {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Time", serialize_with = "serialize_time")]
    pub time: NaiveTime,
    #[serde(rename = "Beverage")]
    pub beverage: String,
    #[serde(rename = "Volume_ml")]
    pub volume_ml: f64,
    #[serde(rename = "Effective_Hydration_ml")]
    pub effective_ml: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightLogEntry {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Weight")]
    pub weight_kg: f64,
}

fn serialize_time<S: serde::Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&time.format("%H:%M:%S").to_string())
}

/// Column headers of the four logs, in file order.
pub const FOOD_LOG_HEADERS: &[&str] = &[
    "Date",
    "Time",
    "Dish",
    "Meal Type",
    "Quantity",
    "Calories",
    "Protein",
    "Carbs",
    "Fats",
];
pub const EXERCISE_LOG_HEADERS: &[&str] =
    &["Date", "Time", "Activity", "Duration", "Calories Burnt"];
pub const WATER_LOG_HEADERS: &[&str] = &[
    "Date",
    "Time",
    "Beverage",
    "Volume_ml",
    "Effective_Hydration_ml",
];
pub const WEIGHT_LOG_HEADERS: &[&str] = &["Date", "Weight"];

// --- Hydration ---

/// Absorption factor relative to plain water.
pub const HYDRATION_FACTORS: &[(&str, f64)] = &[
    ("Water", 1.0),
    ("Milk", 0.99),
    ("Tea", 0.98),
    ("Coffee", 0.90),
    ("Juice", 0.95),
    ("Soda", 0.90),
    ("Alcohol", 0.80),
    ("Sports Drink", 1.0),
];

/// Unknown beverages count as plain water.
#[must_use]
pub fn hydration_factor(beverage: &str) -> f64 {
    HYDRATION_FACTORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(beverage.trim()))
        .map_or(1.0, |(_, factor)| *factor)
}

/// Canonical beverage name if known, otherwise the trimmed input.
#[must_use]
pub fn canonical_beverage(beverage: &str) -> String {
    HYDRATION_FACTORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(beverage.trim()))
        .map_or_else(|| beverage.trim().to_string(), |(name, _)| (*name).to_string())
}

#[must_use]
pub fn effective_hydration(beverage: &str, volume_ml: f64) -> f64 {
    volume_ml * hydration_factor(beverage)
}

// --- Reference data ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diet {
    #[serde(rename = "Veg")]
    Veg,
    #[serde(rename = "Non-Veg")]
    NonVeg,
}

const NON_VEG_KEYWORDS: &[&str] = &["chicken", "egg", "fish", "mutton"];

impl Diet {
    /// Guess the diet tag from a dish name when the table carries none.
    #[must_use]
    pub fn infer(dish_name: &str) -> Self {
        let lower = dish_name.to_lowercase();
        if NON_VEG_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Diet::NonVeg
        } else {
            Diet::Veg
        }
    }

    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "veg" | "vegetarian" => Some(Diet::Veg),
            "nonveg" | "nonvegetarian" => Some(Diet::NonVeg),
            _ => None,
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diet::Veg => f.write_str("Veg"),
            Diet::NonVeg => f.write_str("Non-Veg"),
        }
    }
}

/// A row of the food nutrition table (reference or custom overlay).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodItem {
    pub dish_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub diet: Diet,
    pub serving_unit: String,
    pub custom: bool,
}

/// A user-defined food, appended to the custom-food overlay.
#[derive(Debug, Clone, Serialize)]
pub struct NewCustomFood {
    #[serde(rename = "Dish Name")]
    pub dish_name: String,
    #[serde(rename = "Calories per Serving")]
    pub calories: f64,
    #[serde(rename = "Protein per Serving (g)")]
    pub protein: f64,
    #[serde(rename = "Carbohydrates (g)")]
    pub carbs: f64,
    #[serde(rename = "Fats (g)")]
    pub fats: f64,
    #[serde(rename = "Diet")]
    pub diet: Diet,
}

pub fn validate_custom_food(food: &NewCustomFood) -> Result<()> {
    if food.dish_name.trim().is_empty() {
        bail!("Food name must not be empty");
    }
    if food.calories < 0.0 {
        bail!("Calories must not be negative");
    }
    if food.protein < 0.0 || food.carbs < 0.0 || food.fats < 0.0 {
        bail!("Macros must not be negative");
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseActivity {
    pub description: String,
    pub met: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SymptomSeverity {
    High,
    Moderate,
    Low,
    Unrated,
}

impl SymptomSeverity {
    /// Classify a free-text severity label ("High", "Mild to Moderate", ...) by its first word.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.split_whitespace().next().unwrap_or("") {
            "High" => SymptomSeverity::High,
            "Moderate" => SymptomSeverity::Moderate,
            "Low" | "Mild" => SymptomSeverity::Low,
            _ => SymptomSeverity::Unrated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymptomAdvice {
    pub symptom: String,
    pub severity: String,
    pub severity_level: SymptomSeverity,
    pub time_to_relief: String,
    pub possible_causes: String,
    pub remedies: String,
    pub foods_to_avoid: String,
    pub preferred_meal: String,
    pub home_remedy: String,
    pub tip: String,
    pub screen_time: String,
}

// --- Input validation ---

pub fn validate_quantity(quantity: f64) -> Result<()> {
    if !quantity.is_finite() || quantity <= 0.0 {
        bail!("Quantity must be greater than 0");
    }
    Ok(())
}

pub fn validate_volume(volume_ml: f64) -> Result<()> {
    if !volume_ml.is_finite() || volume_ml <= 0.0 {
        bail!("Volume must be greater than 0 ml");
    }
    Ok(())
}

pub fn validate_duration(minutes: f64) -> Result<()> {
    if !minutes.is_finite() || minutes <= 0.0 {
        bail!("Duration must be greater than 0 minutes");
    }
    Ok(())
}

/// The same 30-200 kg range a profile accepts, so a weigh-in can never leave
/// the profile in a state that fails its own validation.
pub fn validate_weight(weight_kg: f64) -> Result<()> {
    if !(30.0..=200.0).contains(&weight_kg) {
        bail!("Weight must be between 30 and 200 kg");
    }
    Ok(())
}

// --- Date / time parsing ---

/// Parse a log date. Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `M/D/YYYY` and a
/// `YYYY-MM-DD HH:MM:SS` timestamp (date part kept).
#[must_use]
pub fn parse_log_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    None
}

#[must_use]
pub fn parse_log_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    ["%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_meal_types() {
        assert_eq!("breakfast".parse::<MealType>().unwrap(), MealType::Breakfast);
        assert_eq!("Lunch".parse::<MealType>().unwrap(), MealType::Lunch);
        assert_eq!("DINNER".parse::<MealType>().unwrap(), MealType::Dinner);
        assert_eq!(" snack ".parse::<MealType>().unwrap(), MealType::Snack);
    }

    #[test]
    fn test_invalid_meal_type() {
        assert!("brunch".parse::<MealType>().is_err());
        assert!("".parse::<MealType>().is_err());
    }

    #[test]
    fn test_activity_level_first_word() {
        assert_eq!(
            ActivityLevel::from_label("Sedentary (Office)"),
            ActivityLevel::Sedentary
        );
        assert_eq!(
            ActivityLevel::from_label("Lightly Active"),
            ActivityLevel::Lightly
        );
        assert_eq!(
            ActivityLevel::from_label("Moderately Active"),
            ActivityLevel::Moderately
        );
        assert_eq!(ActivityLevel::from_label("Very Active"), ActivityLevel::Very);
        assert_eq!(ActivityLevel::from_label("Super Active"), ActivityLevel::Super);
    }

    #[test]
    fn test_activity_level_unmatched_falls_back() {
        assert_eq!(ActivityLevel::from_label("couch"), ActivityLevel::Sedentary);
        assert_eq!(ActivityLevel::from_label(""), ActivityLevel::Sedentary);
        assert!((ActivityLevel::from_label("???").factor() - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_goal_labels() {
        assert_eq!(Goal::from_label("Weight Loss"), Goal::WeightLoss);
        assert_eq!(Goal::from_label("weight-gain"), Goal::WeightGain);
        assert_eq!(Goal::from_label("muscle_gain"), Goal::MuscleGain);
        assert_eq!(Goal::from_label("Maintain"), Goal::Maintain);
        assert_eq!(Goal::from_label("get shredded"), Goal::Maintain);
        for label in Goal::LABELS {
            assert_eq!(Goal::from_label(label).to_string(), *label);
        }
    }

    #[test]
    fn test_gender_from_label() {
        assert_eq!(Gender::from("Male".to_string()), Gender::Male);
        assert_eq!(Gender::from("male".to_string()), Gender::Male);
        assert_eq!(Gender::from("Female".to_string()), Gender::Female);
        assert_eq!(Gender::from("other".to_string()), Gender::Female);
    }

    #[test]
    fn test_macro_split_serializes_as_triple() {
        let split = MacroSplit::new(40, 40, 20);
        assert_eq!(serde_json::to_string(&split).unwrap(), "[40,40,20]");
        let back: MacroSplit = serde_json::from_str("[45,35,20]").unwrap();
        assert_eq!(back.carbs_pct, 45);
        assert_eq!(back.protein_pct, 35);
        assert_eq!(back.fat_pct, 20);
    }

    #[test]
    fn test_hydration_factors() {
        assert!((effective_hydration("Coffee", 250.0) - 225.0).abs() < 1e-9);
        assert!((effective_hydration("coffee", 250.0) - 225.0).abs() < 1e-9);
        assert!((effective_hydration("Water", 500.0) - 500.0).abs() < 1e-9);
        assert!((effective_hydration("Alcohol", 100.0) - 80.0).abs() < 1e-9);
        assert!((effective_hydration("Kombucha", 300.0) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_canonical_beverage() {
        assert_eq!(canonical_beverage("sports drink"), "Sports Drink");
        assert_eq!(canonical_beverage(" Kombucha "), "Kombucha");
    }

    #[test]
    fn test_diet_inference() {
        assert_eq!(Diet::infer("Butter Chicken"), Diet::NonVeg);
        assert_eq!(Diet::infer("Egg Curry"), Diet::NonVeg);
        assert_eq!(Diet::infer("Fish Fry"), Diet::NonVeg);
        assert_eq!(Diet::infer("Mutton Biryani"), Diet::NonVeg);
        assert_eq!(Diet::infer("Paneer Tikka"), Diet::Veg);
    }

    #[test]
    fn test_diet_parse() {
        assert_eq!(Diet::parse("Veg"), Some(Diet::Veg));
        assert_eq!(Diet::parse("Non-Veg"), Some(Diet::NonVeg));
        assert_eq!(Diet::parse("non veg"), Some(Diet::NonVeg));
        assert_eq!(Diet::parse("vegetarian"), Some(Diet::Veg));
        assert_eq!(Diet::parse(""), None);
    }

    #[test]
    fn test_symptom_severity() {
        assert_eq!(SymptomSeverity::from_label("High"), SymptomSeverity::High);
        assert_eq!(
            SymptomSeverity::from_label("Moderate to High"),
            SymptomSeverity::Moderate
        );
        assert_eq!(SymptomSeverity::from_label("Mild"), SymptomSeverity::Low);
        assert_eq!(SymptomSeverity::from_label("Unknown"), SymptomSeverity::Unrated);
        assert_eq!(SymptomSeverity::from_label(""), SymptomSeverity::Unrated);
    }

    #[test]
    fn test_parse_log_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_log_date("2024-01-15"), Some(expected));
        assert_eq!(parse_log_date("2024/01/15"), Some(expected));
        assert_eq!(parse_log_date("1/15/2024"), Some(expected));
        assert_eq!(parse_log_date("2024-01-15 08:30:00"), Some(expected));
        assert_eq!(parse_log_date("not-a-date"), None);
        assert_eq!(parse_log_date(""), None);
    }

    #[test]
    fn test_parse_log_time() {
        assert_eq!(
            parse_log_time("22:15:30"),
            NaiveTime::from_hms_opt(22, 15, 30)
        );
        assert_eq!(parse_log_time("07:05"), NaiveTime::from_hms_opt(7, 5, 0));
        assert_eq!(
            parse_log_time("12:00:00.250"),
            NaiveTime::from_hms_milli_opt(12, 0, 0, 250)
        );
        assert!(parse_log_time("noon").is_none());
    }

    #[test]
    fn test_validate_profile_input() {
        let mut input = ProfileInput {
            name: "Asha".to_string(),
            age: 25,
            gender: Gender::Female,
            height_cm: 165.0,
            weight_kg: 60.0,
            activity: "Lightly Active".to_string(),
            goal: Goal::Maintain,
            water_goal_ml: 2500,
        };
        assert!(validate_profile_input(&input).is_ok());

        input.name = "  ".to_string();
        assert!(validate_profile_input(&input).is_err());

        input.name = "Asha".to_string();
        input.water_goal_ml = 200;
        assert!(validate_profile_input(&input).is_err());
    }

    #[test]
    fn test_validate_quantities() {
        assert!(validate_quantity(1.5).is_ok());
        assert!(validate_quantity(0.0).is_err());
        assert!(validate_quantity(f64::NAN).is_err());
        assert!(validate_volume(-5.0).is_err());
        assert!(validate_duration(30.0).is_ok());
        assert!(validate_weight(0.0).is_err());
        assert!(validate_weight(72.5).is_ok());
        assert!(validate_weight(210.0).is_err());
        assert!(validate_weight(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_custom_food() {
        let mut food = NewCustomFood {
            dish_name: "Sprout Salad".to_string(),
            calories: 180.0,
            protein: 12.0,
            carbs: 25.0,
            fats: 3.0,
            diet: Diet::Veg,
        };
        assert!(validate_custom_food(&food).is_ok());
        food.calories = -1.0;
        assert!(validate_custom_food(&food).is_err());
    }
}
