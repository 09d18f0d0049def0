use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::StringRecord;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::models::{
    EXERCISE_LOG_HEADERS, ExerciseLogEntry, FOOD_LOG_HEADERS, FoodLogEntry, MealType,
    NewCustomFood, Profile, WATER_LOG_HEADERS, WEIGHT_LOG_HEADERS, WaterLogEntry, WeightLogEntry,
    parse_log_date, parse_log_time,
};
use crate::reference::{
    Columns, ExerciseTable, FoodTable, SymptomTable, cell, csv_reader, number,
    parse_exercise_table, parse_food_table, parse_symptom_table,
};

pub const PROFILE_FILE: &str = "profile.json";
pub const CUSTOM_FOOD_FILE: &str = "custom_foods.csv";
pub const FOOD_DB_FILE: &str = "food_nutrition.csv";
pub const EXERCISE_DB_FILE: &str = "exercise_met.csv";
pub const SYMPTOM_DB_FILE: &str = "symptom_advice.csv";

const CUSTOM_FOOD_HEADERS: &[&str] = &[
    "Dish Name",
    "Calories per Serving",
    "Protein per Serving (g)",
    "Carbohydrates (g)",
    "Fats (g)",
    "Diet",
];

/// Weight assumed for legacy profiles that never recorded one.
const LEGACY_DEFAULT_WEIGHT_KG: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Food,
    Exercise,
    Water,
    Weight,
}

impl LogKind {
    pub const ALL: &'static [LogKind] = &[
        LogKind::Food,
        LogKind::Exercise,
        LogKind::Water,
        LogKind::Weight,
    ];

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            LogKind::Food => "food_log.csv",
            LogKind::Exercise => "exercise_log.csv",
            LogKind::Water => "water_log_detailed.csv",
            LogKind::Weight => "weight_log.csv",
        }
    }

    #[must_use]
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            LogKind::Food => FOOD_LOG_HEADERS,
            LogKind::Exercise => EXERCISE_LOG_HEADERS,
            LogKind::Water => WATER_LOG_HEADERS,
            LogKind::Weight => WEIGHT_LOG_HEADERS,
        }
    }
}

/// Flat-file storage: a data directory holding the profile, the four logs and
/// the custom-food overlay, plus a read-only reference directory.
pub struct Store {
    data_dir: PathBuf,
    reference_dir: PathBuf,
}

impl Store {
    pub fn open(data_dir: &Path, reference_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        let store = Store {
            data_dir: data_dir.to_path_buf(),
            reference_dir: reference_dir.to_path_buf(),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Create any missing log as a header-only file.
    fn initialize(&self) -> Result<()> {
        for &kind in LogKind::ALL {
            let path = self.log_path(kind);
            if !path.exists() {
                write_header(&path, kind.headers())?;
                debug!(path = %path.display(), "created empty log");
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn reference_dir(&self) -> &Path {
        &self.reference_dir
    }

    #[must_use]
    pub fn log_path(&self, kind: LogKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    fn profile_path(&self) -> PathBuf {
        self.data_dir.join(PROFILE_FILE)
    }

    fn custom_food_path(&self) -> PathBuf {
        self.data_dir.join(CUSTOM_FOOD_FILE)
    }

    // --- Profile ---

    /// Load the profile, upgrading legacy records that only carry `Weight`.
    pub fn load_profile(&self) -> Result<Option<Profile>> {
        let path = self.profile_path();
        let Some(raw) = read_optional(&path)? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let mut value: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse profile: {}", path.display()))?;

        let mut upgraded = false;
        if let Some(obj) = value.as_object_mut() {
            if !obj.contains_key("Start_Weight") {
                let weight = obj
                    .get("Weight")
                    .and_then(serde_json::Value::as_f64)
                    .unwrap_or(LEGACY_DEFAULT_WEIGHT_KG);
                obj.insert("Start_Weight".to_string(), weight.into());
                obj.insert("Current_Weight".to_string(), weight.into());
                upgraded = true;
            } else if !obj.contains_key("Current_Weight") {
                let start = obj.get("Start_Weight").cloned().unwrap_or_default();
                obj.insert("Current_Weight".to_string(), start);
                upgraded = true;
            }
        }

        let profile: Profile = serde_json::from_value(value)
            .with_context(|| format!("Invalid profile record: {}", path.display()))?;
        if upgraded {
            info!("upgraded legacy profile record");
            self.save_profile(&profile)?;
        }
        Ok(Some(profile))
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        let path = self.profile_path();
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write profile: {}", path.display()))?;
        info!(name = %profile.name, "saved profile");
        Ok(())
    }

    // --- Appends ---

    pub fn append_food(&self, entry: &FoodLogEntry) -> Result<()> {
        self.append(&self.log_path(LogKind::Food), entry)
    }

    pub fn append_exercise(&self, entry: &ExerciseLogEntry) -> Result<()> {
        self.append(&self.log_path(LogKind::Exercise), entry)
    }

    pub fn append_water(&self, entry: &WaterLogEntry) -> Result<()> {
        self.append(&self.log_path(LogKind::Water), entry)
    }

    pub fn append_weight(&self, entry: &WeightLogEntry) -> Result<()> {
        self.append(&self.log_path(LogKind::Weight), entry)
    }

    pub fn add_custom_food(&self, food: &NewCustomFood) -> Result<()> {
        let path = self.custom_food_path();
        if is_missing_or_empty(&path) {
            write_header(&path, CUSTOM_FOOD_HEADERS)?;
        }
        self.append(&path, food)
    }

    /// Append one row; the header is written first when the file is new or empty.
    fn append<T: Serialize>(&self, path: &Path, row: &T) -> Result<()> {
        let write_headers = is_missing_or_empty(path);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(write_headers)
            .from_writer(file);
        wtr.serialize(row)
            .with_context(|| format!("Failed to append to {}", path.display()))?;
        wtr.flush()?;
        debug!(path = %path.display(), "appended row");
        Ok(())
    }

    // --- Log reads ---

    pub fn food_log(&self) -> Result<Vec<FoodLogEntry>> {
        self.read_log(LogKind::Food, |columns, record, date| {
            let time = row_time(columns, record);
            let meal = cell(record, columns.get("Meal Type"));
            Some(FoodLogEntry {
                date,
                time,
                dish: cell(record, columns.get("Dish")).to_string(),
                meal_type: meal.parse().unwrap_or(MealType::Snack),
                quantity: number(record, columns.get("Quantity")),
                calories: number(record, columns.get("Calories")),
                protein: number(record, columns.get("Protein")),
                carbs: number(record, columns.get("Carbs")),
                fats: number(record, columns.get("Fats")),
            })
        })
    }

    pub fn exercise_log(&self) -> Result<Vec<ExerciseLogEntry>> {
        self.read_log(LogKind::Exercise, |columns, record, date| {
            Some(ExerciseLogEntry {
                date,
                time: row_time(columns, record),
                activity: cell(record, columns.get("Activity")).to_string(),
                duration_min: number(record, columns.get("Duration")),
                calories_burnt: number(record, columns.get("Calories Burnt")),
            })
        })
    }

    pub fn water_log(&self) -> Result<Vec<WaterLogEntry>> {
        self.read_log(LogKind::Water, |columns, record, date| {
            Some(WaterLogEntry {
                date,
                time: row_time(columns, record),
                beverage: cell(record, columns.get("Beverage")).to_string(),
                volume_ml: number(record, columns.get("Volume_ml")),
                effective_ml: number(record, columns.get("Effective_Hydration_ml")),
            })
        })
    }

    pub fn weight_log(&self) -> Result<Vec<WeightLogEntry>> {
        self.read_log(LogKind::Weight, |columns, record, date| {
            let raw = cell(record, columns.get("Weight"));
            let weight_kg = raw.parse::<f64>().ok().filter(|w| *w > 0.0)?;
            Some(WeightLogEntry { date, weight_kg })
        })
    }

    /// Read a log, normalizing dates at ingestion. Rows whose date does not
    /// parse are skipped; a missing or header-only file reads as empty.
    /// Bytes that are not UTF-8 are replaced rather than failing the read.
    fn read_log<T>(
        &self,
        kind: LogKind,
        parse: impl Fn(&Columns, &StringRecord, chrono::NaiveDate) -> Option<T>,
    ) -> Result<Vec<T>> {
        let path = self.log_path(kind);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to open {}", path.display()));
            }
        };

        let mut rdr = csv_reader(file);
        let columns = Columns::new(StringRecord::from_byte_record_lossy(
            rdr.byte_headers()
                .with_context(|| format!("Failed to read headers of {}", path.display()))?
                .clone(),
        ));
        if columns.is_empty() {
            return Ok(Vec::new());
        }
        let idx_date = columns.get("Date");

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for (line_num, result) in rdr.byte_records().enumerate() {
            let record = StringRecord::from_byte_record_lossy(result.with_context(|| {
                format!("Failed to parse {} row {}", kind.file_name(), line_num + 2)
            })?);
            if record.iter().all(str::is_empty) {
                continue;
            }
            let Some(date) = parse_log_date(cell(&record, idx_date)) else {
                skipped += 1;
                continue;
            };
            match parse(&columns, &record, date) {
                Some(row) => rows.push(row),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(file = kind.file_name(), skipped, "skipped malformed log rows");
        }
        debug!(file = kind.file_name(), rows = rows.len(), "read log");
        Ok(rows)
    }

    // --- Reference tables ---

    /// Reference food table with the custom-food overlay in front.
    pub fn load_food_table(&self) -> Result<FoodTable> {
        let custom = load_reference(&self.custom_food_path(), |f| parse_food_table(f, true))?;
        let reference = load_reference(&self.reference_dir.join(FOOD_DB_FILE), |f| {
            parse_food_table(f, false)
        })?;
        Ok(FoodTable::merged(custom, reference))
    }

    pub fn load_exercise_table(&self) -> Result<ExerciseTable> {
        let activities =
            load_reference(&self.reference_dir.join(EXERCISE_DB_FILE), parse_exercise_table)?;
        Ok(ExerciseTable::new(activities))
    }

    pub fn load_symptom_table(&self) -> Result<SymptomTable> {
        let rows = load_reference(&self.reference_dir.join(SYMPTOM_DB_FILE), parse_symptom_table)?;
        Ok(SymptomTable::new(rows))
    }

    // --- Export / reset ---

    /// Raw bytes of a log, exactly as stored.
    pub fn export_log(&self, kind: LogKind) -> Result<Vec<u8>> {
        let path = self.log_path(kind);
        fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Delete the profile, every log and the custom-food overlay. Reference
    /// tables are never touched. Logs are recreated empty afterwards.
    pub fn reset(&self) -> Result<()> {
        let mut targets = vec![self.profile_path(), self.custom_food_path()];
        targets.extend(LogKind::ALL.iter().map(|&k| self.log_path(k)));
        for path in targets {
            match fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "removed"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to remove {}", path.display()));
                }
            }
        }
        info!(data_dir = %self.data_dir.display(), "reset all user data");
        self.initialize()
    }
}

fn row_time(columns: &Columns, record: &StringRecord) -> chrono::NaiveTime {
    parse_log_time(cell(record, columns.get("Time"))).unwrap_or(chrono::NaiveTime::MIN)
}

fn write_header(path: &Path, headers: &[&str]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    wtr.write_record(headers)?;
    wtr.flush()?;
    Ok(())
}

fn is_missing_or_empty(path: &Path) -> bool {
    fs::metadata(path).map_or(true, |m| m.len() == 0)
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Load a reference table. A missing file reads as empty, and so does one
/// that fails to parse, so one broken table never blocks the others.
fn load_reference<T>(
    path: &Path,
    parse: impl FnOnce(File) -> Result<Vec<T>>,
) -> Result<Vec<T>> {
    let Some(file) = open_optional(path)? else {
        debug!(path = %path.display(), "no reference table");
        return Ok(Vec::new());
    };
    match parse(file) {
        Ok(rows) => Ok(rows),
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %format!("{e:#}"),
                "unreadable table, loaded as empty"
            );
            Ok(Vec::new())
        }
    }
}

fn open_optional(path: &Path) -> Result<Option<File>> {
    match File::open(path) {
        Ok(f) => Ok(Some(f)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to open {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Diet, Gender, Goal, MacroSplit, Targets};
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;

    fn open_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(&dir.path().join("data"), &dir.path().join("reference")).unwrap();
        (dir, store)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_profile() -> Profile {
        Profile {
            name: "Ravi".to_string(),
            age: 25,
            gender: Gender::Male,
            height_cm: 170.0,
            start_weight_kg: 70.0,
            current_weight_kg: 70.0,
            activity: "Sedentary (Office)".to_string(),
            goal: Goal::WeightLoss,
            targets: Targets {
                calories: 1502,
                protein_g: 150,
                water_ml: 2500,
                macro_split: MacroSplit::new(40, 40, 20),
            },
        }
    }

    fn sample_food_entry(day: NaiveDate) -> FoodLogEntry {
        FoodLogEntry {
            date: day,
            time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            dish: "Poha".to_string(),
            meal_type: MealType::Breakfast,
            quantity: 1.5,
            calories: 270.0,
            protein: 6.0,
            carbs: 45.0,
            fats: 7.5,
        }
    }

    #[test]
    fn test_open_creates_header_only_logs() {
        let (_dir, store) = open_store();
        for &kind in LogKind::ALL {
            let raw = fs::read_to_string(store.log_path(kind)).unwrap();
            assert_eq!(raw.trim_end(), kind.headers().join(","));
        }
        assert!(store.food_log().unwrap().is_empty());
        assert!(store.weight_log().unwrap().is_empty());
    }

    #[test]
    fn test_profile_missing_is_none() {
        let (_dir, store) = open_store();
        assert!(store.load_profile().unwrap().is_none());
    }

    #[test]
    fn test_profile_round_trip_is_identical() {
        let (_dir, store) = open_store();
        let profile = sample_profile();
        store.save_profile(&profile).unwrap();

        let loaded = store.load_profile().unwrap().unwrap();
        assert_eq!(loaded, profile);

        store.save_profile(&loaded).unwrap();
        let reloaded = store.load_profile().unwrap().unwrap();
        assert_eq!(reloaded, loaded);
    }

    #[test]
    fn test_profile_json_uses_record_keys() {
        let (_dir, store) = open_store();
        store.save_profile(&sample_profile()).unwrap();
        let raw = fs::read_to_string(store.data_dir().join(PROFILE_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["Name"], "Ravi");
        assert_eq!(value["Goal"], "Weight Loss");
        assert_eq!(value["Targets"]["Calories"], 1502);
        assert_eq!(value["Targets"]["Macros_Split"], serde_json::json!([40, 40, 20]));
    }

    #[test]
    fn test_legacy_profile_is_upgraded() {
        let (_dir, store) = open_store();
        let legacy = serde_json::json!({
            "Name": "Old", "Age": 30, "Gender": "Female", "Height": 160,
            "Weight": 58.5, "Activity": "Very Active", "Goal": "Maintain",
            "Targets": {"Calories": 2000, "Protein": 100, "Water": 2000, "Macros_Split": [50, 20, 30]}
        });
        fs::write(store.data_dir().join(PROFILE_FILE), legacy.to_string()).unwrap();

        let profile = store.load_profile().unwrap().unwrap();
        assert!((profile.start_weight_kg - 58.5).abs() < f64::EPSILON);
        assert!((profile.current_weight_kg - 58.5).abs() < f64::EPSILON);

        let raw = fs::read_to_string(store.data_dir().join(PROFILE_FILE)).unwrap();
        assert!(raw.contains("Start_Weight"));
    }

    #[test]
    fn test_append_and_read_food() {
        let (_dir, store) = open_store();
        let entry = sample_food_entry(date(2024, 6, 15));
        store.append_food(&entry).unwrap();
        store.append_food(&entry).unwrap();

        let rows = store.food_log().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], entry);

        let raw = fs::read_to_string(store.log_path(LogKind::Food)).unwrap();
        assert_eq!(raw.lines().count(), 3);
        assert!(raw.lines().nth(1).unwrap().starts_with("2024-06-15,08:30:00,Poha,Breakfast,"));
    }

    #[test]
    fn test_append_writes_header_to_empty_file() {
        let (_dir, store) = open_store();
        fs::write(store.log_path(LogKind::Weight), "").unwrap();
        store
            .append_weight(&WeightLogEntry {
                date: date(2024, 6, 15),
                weight_kg: 71.2,
            })
            .unwrap();
        let raw = fs::read_to_string(store.log_path(LogKind::Weight)).unwrap();
        assert_eq!(raw, "Date,Weight\n2024-06-15,71.2\n");
    }

    #[test]
    fn test_malformed_dates_are_dropped() {
        let (_dir, store) = open_store();
        fs::write(
            store.log_path(LogKind::Food),
            "Date,Time,Dish,Meal Type,Quantity,Calories,Protein,Carbs,Fats\n\
             2024-06-15,08:00:00,Idli,Breakfast,2,150,4,30,1\n\
             yesterday-ish,09:00:00,Vada,Breakfast,1,200,5,20,10\n\
             2024-06-16,22:30:00,Chips,snack,1,300,3,30,18\n",
        )
        .unwrap();

        let rows = store.food_log().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].dish, "Idli");
        assert_eq!(rows[1].meal_type, MealType::Snack);
        assert_eq!(rows[1].time, NaiveTime::from_hms_opt(22, 30, 0).unwrap());
    }

    #[test]
    fn test_non_utf8_row_does_not_fail_the_log() {
        let (_dir, store) = open_store();
        let mut raw = b"Date,Time,Dish,Meal Type,Quantity,Calories,Protein,Carbs,Fats\n".to_vec();
        raw.extend_from_slice(b"2024-06-15,08:00:00,Caf\xe9 Latte,Breakfast,1,120,6,10,5\n");
        raw.extend_from_slice(b"2024-06-15,13:00:00,Poha,Lunch,1,250,5,45,6\n");
        fs::write(store.log_path(LogKind::Food), raw).unwrap();

        let rows = store.food_log().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].dish.starts_with("Caf"));
        assert!((rows[0].calories - 120.0).abs() < f64::EPSILON);
        assert_eq!(rows[1].dish, "Poha");
    }

    #[test]
    fn test_unreadable_reference_table_loads_empty() {
        let (_dir, store) = open_store();
        fs::create_dir_all(store.reference_dir()).unwrap();
        fs::write(
            store.reference_dir().join(SYMPTOM_DB_FILE),
            "Condition,Remedies\nCold,Rest\n",
        )
        .unwrap();
        assert!(store.load_symptom_table().unwrap().is_empty());
    }

    #[test]
    fn test_missing_log_file_reads_empty() {
        let (_dir, store) = open_store();
        fs::remove_file(store.log_path(LogKind::Exercise)).unwrap();
        assert!(store.exercise_log().unwrap().is_empty());
        fs::write(store.log_path(LogKind::Water), "").unwrap();
        assert!(store.water_log().unwrap().is_empty());
    }

    #[test]
    fn test_reference_tables_missing_are_empty() {
        let (_dir, store) = open_store();
        assert!(store.load_food_table().unwrap().is_empty());
        assert!(store.load_exercise_table().unwrap().is_empty());
        assert!(store.load_symptom_table().unwrap().is_empty());
    }

    #[test]
    fn test_custom_food_overlay() {
        let (_dir, store) = open_store();
        fs::create_dir_all(store.reference_dir()).unwrap();
        fs::write(
            store.reference_dir().join(FOOD_DB_FILE),
            "Dish Name,Calories per Serving,Protein per Serving (g),Carbohydrates (g),Fats (g)\n\
             Dal Tadka,180,9,22,6\n",
        )
        .unwrap();
        store
            .add_custom_food(&NewCustomFood {
                dish_name: "Dal Tadka".to_string(),
                calories: 150.0,
                protein: 10.0,
                carbs: 18.0,
                fats: 4.0,
                diet: Diet::Veg,
            })
            .unwrap();

        let table = store.load_food_table().unwrap();
        assert_eq!(table.items().len(), 2);
        let dal = table.find("Dal Tadka").unwrap();
        assert!(dal.custom);
        assert!((dal.calories - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_export_is_byte_for_byte() {
        let (_dir, store) = open_store();
        let raw = "Date,Weight\n2024-06-15,70\n2024-06-16,69.8\n";
        fs::write(store.log_path(LogKind::Weight), raw).unwrap();
        assert_eq!(store.export_log(LogKind::Weight).unwrap(), raw.as_bytes());
    }

    #[test]
    fn test_reset_removes_user_data_only() {
        let (_dir, store) = open_store();
        fs::create_dir_all(store.reference_dir()).unwrap();
        let food_db = store.reference_dir().join(FOOD_DB_FILE);
        fs::write(&food_db, "Dish Name,Calories per Serving\nRoti,120\n").unwrap();

        store.save_profile(&sample_profile()).unwrap();
        store.append_food(&sample_food_entry(date(2024, 6, 15))).unwrap();

        store.reset().unwrap();

        assert!(store.load_profile().unwrap().is_none());
        assert!(store.food_log().unwrap().is_empty());
        assert!(food_db.exists());
        assert!(store.log_path(LogKind::Food).exists());
    }
}
