use std::collections::HashSet;
use std::io::Read;

use anyhow::{Context, Result, bail};
use csv::StringRecord;

use crate::models::{Diet, ExerciseActivity, FoodItem, SymptomAdvice, SymptomSeverity};

/// Serving unit shown when the food table has no `Serving Unit` column.
pub const DEFAULT_SERVING_UNIT: &str = "svg";

/// Case-insensitive header lookup for a CSV table.
pub(crate) struct Columns {
    headers: StringRecord,
}

impl Columns {
    pub(crate) fn new(headers: StringRecord) -> Self {
        Self { headers }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.headers.iter().all(|h| h.trim().is_empty())
    }

    pub(crate) fn get(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    pub(crate) fn require(&self, name: &str) -> Result<usize> {
        match self.get(name) {
            Some(idx) => Ok(idx),
            None => bail!("Missing required column: {name}"),
        }
    }
}

pub(crate) fn cell(record: &StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| record.get(i)).map_or("", str::trim)
}

/// Numeric cell; blanks and garbage read as 0.
pub(crate) fn number(record: &StringRecord, idx: Option<usize>) -> f64 {
    cell(record, idx)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn text_or(record: &StringRecord, idx: Option<usize>, default: &str) -> String {
    let value = cell(record, idx);
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        default.to_string()
    } else {
        value.to_string()
    }
}

pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

// --- Food ---

/// Parse a food nutrition table.
///
/// Expected header:
/// `Dish Name,Calories per Serving,Protein per Serving (g),Carbohydrates (g),Fats (g)`
/// with optional `Diet` and `Serving Unit` columns.
pub fn parse_food_table<R: Read>(reader: R, custom: bool) -> Result<Vec<FoodItem>> {
    let mut rdr = csv_reader(reader);
    let columns = Columns::new(rdr.headers().context("Failed to read CSV headers")?.clone());
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let idx_name = columns.require("Dish Name")?;
    let idx_cal = columns.get("Calories per Serving");
    let idx_protein = columns.get("Protein per Serving (g)");
    let idx_carbs = columns.get("Carbohydrates (g)");
    let idx_fats = columns.get("Fats (g)");
    let idx_diet = columns.get("Diet");
    let idx_unit = columns.get("Serving Unit");

    let mut items = Vec::new();
    for (line_num, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to parse CSV row {}", line_num + 2))?;
        let dish_name = cell(&record, Some(idx_name)).to_string();
        if dish_name.is_empty() {
            continue;
        }
        let diet = Diet::parse(cell(&record, idx_diet)).unwrap_or_else(|| Diet::infer(&dish_name));
        items.push(FoodItem {
            calories: number(&record, idx_cal),
            protein: number(&record, idx_protein),
            carbs: number(&record, idx_carbs),
            fats: number(&record, idx_fats),
            diet,
            serving_unit: text_or(&record, idx_unit, DEFAULT_SERVING_UNIT),
            custom,
            dish_name,
        });
    }
    Ok(items)
}

/// Reference foods with the user's custom foods layered in front.
#[derive(Debug, Clone, Default)]
pub struct FoodTable {
    items: Vec<FoodItem>,
}

impl FoodTable {
    #[must_use]
    pub fn merged(custom: Vec<FoodItem>, reference: Vec<FoodItem>) -> Self {
        let mut items = custom;
        items.extend(reference);
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Dishes whose name contains `query` (case-insensitive), one per distinct name.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&FoodItem> {
        let needle = query.trim().to_lowercase();
        let mut seen = HashSet::new();
        self.items
            .iter()
            .filter(|f| f.dish_name.to_lowercase().contains(&needle))
            .filter(|f| seen.insert(f.dish_name.to_lowercase()))
            .collect()
    }

    /// First row with exactly this dish name; custom foods win.
    #[must_use]
    pub fn find(&self, dish_name: &str) -> Option<&FoodItem> {
        let name = dish_name.trim();
        self.items
            .iter()
            .find(|f| f.dish_name.eq_ignore_ascii_case(name))
    }
}

// --- Exercise ---

/// Parse an exercise MET table (`Description`, `MET Value`).
pub fn parse_exercise_table<R: Read>(reader: R) -> Result<Vec<ExerciseActivity>> {
    let mut rdr = csv_reader(reader);
    let columns = Columns::new(rdr.headers().context("Failed to read CSV headers")?.clone());
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let idx_desc = columns.require("Description")?;
    let idx_met = columns.get("MET Value");

    let mut activities = Vec::new();
    for (line_num, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to parse CSV row {}", line_num + 2))?;
        let description = cell(&record, Some(idx_desc)).to_string();
        if description.is_empty() {
            continue;
        }
        activities.push(ExerciseActivity {
            description,
            met: number(&record, idx_met),
        });
    }
    Ok(activities)
}

#[derive(Debug, Clone, Default)]
pub struct ExerciseTable {
    activities: Vec<ExerciseActivity>,
}

impl ExerciseTable {
    #[must_use]
    pub fn new(activities: Vec<ExerciseActivity>) -> Self {
        Self { activities }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&ExerciseActivity> {
        let needle = query.trim().to_lowercase();
        let mut seen = HashSet::new();
        self.activities
            .iter()
            .filter(|a| a.description.to_lowercase().contains(&needle))
            .filter(|a| seen.insert(a.description.to_lowercase()))
            .collect()
    }

    #[must_use]
    pub fn find(&self, description: &str) -> Option<&ExerciseActivity> {
        let description = description.trim();
        self.activities
            .iter()
            .find(|a| a.description.eq_ignore_ascii_case(description))
    }
}

// --- Symptoms ---

/// Parse the symptom advisory table. Only `Symptom` is required; every other
/// column falls back to placeholder advice.
pub fn parse_symptom_table<R: Read>(reader: R) -> Result<Vec<SymptomAdvice>> {
    let mut rdr = csv_reader(reader);
    let columns = Columns::new(rdr.headers().context("Failed to read CSV headers")?.clone());
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let idx_symptom = columns.require("Symptom")?;
    let idx_severity = columns.get("Severity Level");
    let idx_relief = columns.get("Time to Relief");
    let idx_causes = columns.get("Possible Causes");
    let idx_remedies = columns.get("Remedies");
    let idx_avoid = columns.get("Foods to Avoid");
    let idx_meal = columns.get("Preferred Indian Meal");
    let idx_home = columns.get("Home Remedy Option");
    let idx_tip = columns.get("Tips / General Medicine");
    let idx_screen = columns.get("Screen Time Link");

    let mut rows = Vec::new();
    for (line_num, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to parse CSV row {}", line_num + 2))?;
        let symptom = cell(&record, Some(idx_symptom)).to_string();
        if symptom.is_empty() {
            continue;
        }
        let severity = text_or(&record, idx_severity, "Unknown");
        rows.push(SymptomAdvice {
            symptom,
            severity_level: SymptomSeverity::from_label(&severity),
            severity,
            time_to_relief: text_or(&record, idx_relief, "Varies"),
            possible_causes: text_or(&record, idx_causes, "Consult a doctor for diagnosis."),
            remedies: text_or(
                &record,
                idx_remedies,
                "Rest and hydration are usually recommended.",
            ),
            foods_to_avoid: text_or(&record, idx_avoid, "Processed and spicy foods."),
            preferred_meal: text_or(&record, idx_meal, "Light, home-cooked meals."),
            home_remedy: text_or(&record, idx_home, "Not available"),
            tip: text_or(&record, idx_tip, "Consult a specialist if symptoms persist."),
            screen_time: text_or(&record, idx_screen, "Limit screen time if necessary."),
        });
    }
    Ok(rows)
}

#[derive(Debug, Clone, Default)]
pub struct SymptomTable {
    rows: Vec<SymptomAdvice>,
}

impl SymptomTable {
    #[must_use]
    pub fn new(rows: Vec<SymptomAdvice>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct symptom names, sorted.
    #[must_use]
    pub fn symptoms(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rows.iter().map(|r| r.symptom.clone()).collect();
        names.sort();
        names.dedup();
        names
    }

    #[must_use]
    pub fn lookup(&self, symptom: &str) -> Option<&SymptomAdvice> {
        let symptom = symptom.trim();
        self.rows
            .iter()
            .find(|r| r.symptom.eq_ignore_ascii_case(symptom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOOD_CSV: &str = "\
Dish Name,Calories per Serving,Protein per Serving (g),Carbohydrates (g),Fats (g),Serving Unit
Paneer Tikka,260,18,8,17,plate
Butter Chicken,490,30,14,34,bowl
Masala Dosa,390,8,58,14,
Egg Bhurji,210,14,4,15,plate
";

    #[test]
    fn test_parse_food_table_basic() {
        let items = parse_food_table(FOOD_CSV.as_bytes(), false).unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].dish_name, "Paneer Tikka");
        assert!((items[0].calories - 260.0).abs() < f64::EPSILON);
        assert!((items[0].protein - 18.0).abs() < f64::EPSILON);
        assert_eq!(items[0].serving_unit, "plate");
        assert!(!items[0].custom);
    }

    #[test]
    fn test_parse_food_table_infers_diet() {
        let items = parse_food_table(FOOD_CSV.as_bytes(), false).unwrap();
        assert_eq!(items[0].diet, Diet::Veg);
        assert_eq!(items[1].diet, Diet::NonVeg);
        assert_eq!(items[2].diet, Diet::Veg);
        assert_eq!(items[3].diet, Diet::NonVeg);
    }

    #[test]
    fn test_parse_food_table_explicit_diet_wins() {
        let csv = "\
Dish Name,Calories per Serving,Diet
Eggless Cake,300,Veg
Veg Cutlet,200,Non-Veg
";
        let items = parse_food_table(csv.as_bytes(), true).unwrap();
        assert_eq!(items[0].diet, Diet::Veg);
        assert_eq!(items[1].diet, Diet::NonVeg);
        assert!(items[0].custom);
    }

    #[test]
    fn test_parse_food_table_defaults_missing_values() {
        let csv = "\
Dish Name,Calories per Serving
Khichdi,abc
";
        let items = parse_food_table(csv.as_bytes(), false).unwrap();
        assert_eq!(items.len(), 1);
        assert!((items[0].calories - 0.0).abs() < f64::EPSILON);
        assert!((items[0].protein - 0.0).abs() < f64::EPSILON);
        assert_eq!(items[0].serving_unit, DEFAULT_SERVING_UNIT);
    }

    #[test]
    fn test_parse_food_table_missing_name_column() {
        let csv = "Calories per Serving\n100\n";
        let err = parse_food_table(csv.as_bytes(), false).unwrap_err();
        assert!(err.to_string().contains("Dish Name"));
    }

    #[test]
    fn test_parse_food_table_empty_input() {
        assert!(parse_food_table("".as_bytes(), false).unwrap().is_empty());
    }

    #[test]
    fn test_food_table_custom_first() {
        let reference = parse_food_table(FOOD_CSV.as_bytes(), false).unwrap();
        let custom = parse_food_table(
            "Dish Name,Calories per Serving,Diet\nPaneer Tikka,200,Veg\n".as_bytes(),
            true,
        )
        .unwrap();
        let table = FoodTable::merged(custom, reference);

        let found = table.find("paneer tikka").unwrap();
        assert!(found.custom);
        assert!((found.calories - 200.0).abs() < f64::EPSILON);

        let hits = table.search("PANEER");
        assert_eq!(hits.len(), 1);
        assert!(hits[0].custom);
    }

    #[test]
    fn test_food_table_search_substring() {
        let table = FoodTable::merged(
            Vec::new(),
            parse_food_table(FOOD_CSV.as_bytes(), false).unwrap(),
        );
        let hits: Vec<&str> = table
            .search("a")
            .iter()
            .map(|f| f.dish_name.as_str())
            .collect();
        assert_eq!(hits, vec!["Paneer Tikka", "Masala Dosa"]);
        assert!(table.search("pizza").is_empty());
    }

    #[test]
    fn test_exercise_table() {
        let csv = "\
Description,MET Value
Running 6 mph,9.8
Walking 3 mph,3.5
Running 6 mph,10.0
";
        let table = ExerciseTable::new(parse_exercise_table(csv.as_bytes()).unwrap());
        let hits = table.search("running");
        assert_eq!(hits.len(), 1);
        assert!((hits[0].met - 9.8).abs() < f64::EPSILON);
        assert!(table.find("walking 3 mph").is_some());
        assert!(table.find("swimming").is_none());
    }

    #[test]
    fn test_symptom_table_defaults() {
        let csv = "\
Symptom,Severity Level,Remedies
Headache,Mild,Drink water and rest
Acidity,,
";
        let table = SymptomTable::new(parse_symptom_table(csv.as_bytes()).unwrap());
        assert_eq!(table.symptoms(), vec!["Acidity", "Headache"]);

        let headache = table.lookup("headache").unwrap();
        assert_eq!(headache.severity_level, SymptomSeverity::Low);
        assert_eq!(headache.remedies, "Drink water and rest");
        assert_eq!(headache.time_to_relief, "Varies");

        let acidity = table.lookup("Acidity").unwrap();
        assert_eq!(acidity.severity, "Unknown");
        assert_eq!(acidity.severity_level, SymptomSeverity::Unrated);
        assert_eq!(acidity.remedies, "Rest and hydration are usually recommended.");
        assert_eq!(acidity.home_remedy, "Not available");
    }

    #[test]
    fn test_symptom_table_requires_symptom_column() {
        let csv = "Severity Level\nHigh\n";
        assert!(parse_symptom_table(csv.as_bytes()).is_err());
    }
}
