use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::{ExerciseLogEntry, FoodLogEntry, WaterLogEntry};

/// Totals for a single calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailyStats {
    pub eaten: f64,
    pub protein: f64,
    pub burnt: f64,
    pub hydration_ml: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub calories: f64,
}

/// Calories for a week ending on `week_ending` (a Sunday).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyTotal {
    pub week_ending: NaiveDate,
    pub label: String,
    pub calories: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacroTotals {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

#[must_use]
pub fn daily_stats(
    food: &[FoodLogEntry],
    exercise: &[ExerciseLogEntry],
    water: &[WaterLogEntry],
    day: NaiveDate,
) -> DailyStats {
    let (eaten, protein) = food
        .iter()
        .filter(|e| e.date == day)
        .fold((0.0, 0.0), |(cal, prot), e| (cal + e.calories, prot + e.protein));
    let burnt: f64 = exercise
        .iter()
        .filter(|e| e.date == day)
        .map(|e| e.calories_burnt)
        .sum();

    DailyStats {
        eaten,
        protein,
        burnt,
        hydration_ml: hydration_on(water, day),
        net: eaten - burnt,
    }
}

/// Effective hydration logged on `day`.
#[must_use]
pub fn hydration_on(water: &[WaterLogEntry], day: NaiveDate) -> f64 {
    water
        .iter()
        .filter(|e| e.date == day)
        .map(|e| e.effective_ml)
        .sum()
}

fn calories_by_date(food: &[FoodLogEntry]) -> BTreeMap<NaiveDate, f64> {
    let mut by_date = BTreeMap::new();
    for entry in food {
        *by_date.entry(entry.date).or_insert(0.0) += entry.calories;
    }
    by_date
}

/// Per-date calorie sums, oldest first.
#[must_use]
pub fn daily_calories(food: &[FoodLogEntry]) -> Vec<DailyTotal> {
    calories_by_date(food)
        .into_iter()
        .map(|(date, calories)| DailyTotal { date, calories })
        .collect()
}

/// The Sunday closing the week `date` falls in.
#[must_use]
pub fn week_ending(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = 6 - i64::from(date.weekday().num_days_from_monday());
    date + Duration::days(days_to_sunday)
}

/// Calorie sums per Sunday-ending week, contiguous from the first logged week
/// to the last. Weeks without entries are reported as 0.
#[must_use]
pub fn weekly_calories(food: &[FoodLogEntry]) -> Vec<WeeklyTotal> {
    let mut by_week: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for entry in food {
        *by_week.entry(week_ending(entry.date)).or_insert(0.0) += entry.calories;
    }

    let (Some(&first), Some(&last)) = (by_week.keys().next(), by_week.keys().next_back()) else {
        return Vec::new();
    };

    let mut weeks = Vec::new();
    let mut sunday = first;
    while sunday <= last {
        weeks.push(WeeklyTotal {
            week_ending: sunday,
            label: format!("Week of {}", sunday.format("%Y-%m-%d")),
            calories: by_week.get(&sunday).copied().unwrap_or(0.0),
        });
        sunday += Duration::days(7);
    }
    weeks
}

#[must_use]
pub fn macro_totals(food: &[FoodLogEntry], day: NaiveDate) -> MacroTotals {
    food.iter()
        .filter(|e| e.date == day)
        .fold(MacroTotals::default(), |acc, e| MacroTotals {
            protein: acc.protein + e.protein,
            carbs: acc.carbs + e.carbs,
            fats: acc.fats + e.fats,
        })
}

/// Mean of per-day calorie sums over the `days` days ending at `today`,
/// counting only days that have entries. 0 when there are none.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn calorie_average(food: &[FoodLogEntry], today: NaiveDate, days: u32) -> f64 {
    if days == 0 {
        return 0.0;
    }
    let start = today - Duration::days(i64::from(days) - 1);
    let window: Vec<f64> = calories_by_date(food)
        .range(start..=today)
        .map(|(_, cal)| *cal)
        .collect();
    if window.is_empty() {
        return 0.0;
    }
    window.iter().sum::<f64>() / window.len() as f64
}

/// Consecutive logged days ending today, or ending yesterday when nothing is
/// logged yet today. A gap ends the streak.
#[must_use]
pub fn logging_streak<I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let logged: BTreeSet<NaiveDate> = dates.into_iter().collect();
    let yesterday = today - Duration::days(1);

    let start = if logged.contains(&today) {
        today
    } else if logged.contains(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut streak = 0;
    let mut day = start;
    while logged.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealType;
    use chrono::NaiveTime;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn food(date: NaiveDate, calories: f64, protein: f64) -> FoodLogEntry {
        FoodLogEntry {
            date,
            time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            dish: "Rice".to_string(),
            meal_type: MealType::Lunch,
            quantity: 1.0,
            calories,
            protein,
            carbs: 10.0,
            fats: 2.0,
        }
    }

    fn workout(date: NaiveDate, burnt: f64) -> ExerciseLogEntry {
        ExerciseLogEntry {
            date,
            time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            activity: "Running".to_string(),
            duration_min: 30.0,
            calories_burnt: burnt,
        }
    }

    fn drink(date: NaiveDate, effective: f64) -> WaterLogEntry {
        WaterLogEntry {
            date,
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            beverage: "Water".to_string(),
            volume_ml: effective,
            effective_ml: effective,
        }
    }

    #[test]
    fn test_daily_stats_filters_by_day() {
        let today = d(2024, 6, 15);
        let food_log = vec![
            food(today, 500.0, 20.0),
            food(today, 300.0, 10.0),
            food(d(2024, 6, 14), 900.0, 40.0),
        ];
        let exercise = vec![workout(today, 250.0), workout(d(2024, 6, 14), 100.0)];
        let water = vec![drink(today, 500.0), drink(today, 225.0)];

        let stats = daily_stats(&food_log, &exercise, &water, today);
        assert!((stats.eaten - 800.0).abs() < 1e-9);
        assert!((stats.protein - 30.0).abs() < 1e-9);
        assert!((stats.burnt - 250.0).abs() < 1e-9);
        assert!((stats.hydration_ml - 725.0).abs() < 1e-9);
        assert!((stats.net - 550.0).abs() < 1e-9);
    }

    #[test]
    fn test_daily_stats_empty() {
        let stats = daily_stats(&[], &[], &[], d(2024, 6, 15));
        assert_eq!(stats, DailyStats::default());
    }

    #[test]
    fn test_daily_calories_sorted() {
        let log = vec![
            food(d(2024, 6, 16), 100.0, 0.0),
            food(d(2024, 6, 14), 200.0, 0.0),
            food(d(2024, 6, 16), 50.0, 0.0),
        ];
        let series = daily_calories(&log);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, d(2024, 6, 14));
        assert!((series[1].calories - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_week_ending_is_sunday() {
        // 2024-06-10 is a Monday
        assert_eq!(week_ending(d(2024, 6, 10)), d(2024, 6, 16));
        assert_eq!(week_ending(d(2024, 6, 16)), d(2024, 6, 16));
        assert_eq!(week_ending(d(2024, 6, 17)), d(2024, 6, 23));
    }

    #[test]
    fn test_weekly_calories_fills_gaps() {
        let log = vec![
            food(d(2024, 6, 10), 1000.0, 0.0),
            food(d(2024, 6, 16), 500.0, 0.0),
            food(d(2024, 6, 26), 700.0, 0.0),
        ];
        let weeks = weekly_calories(&log);
        assert_eq!(weeks.len(), 3);
        assert_eq!(weeks[0].label, "Week of 2024-06-16");
        assert!((weeks[0].calories - 1500.0).abs() < 1e-9);
        assert_eq!(weeks[1].week_ending, d(2024, 6, 23));
        assert!(weeks[1].calories.abs() < 1e-9);
        assert_eq!(weeks[2].label, "Week of 2024-06-30");
    }

    #[test]
    fn test_weekly_calories_empty() {
        assert!(weekly_calories(&[]).is_empty());
    }

    #[test]
    fn test_macro_totals() {
        let day = d(2024, 6, 15);
        let log = vec![food(day, 100.0, 5.0), food(day, 100.0, 7.0)];
        let totals = macro_totals(&log, day);
        assert!((totals.protein - 12.0).abs() < 1e-9);
        assert!((totals.carbs - 20.0).abs() < 1e-9);
        assert!((totals.fats - 4.0).abs() < 1e-9);
        assert_eq!(macro_totals(&log, d(2024, 6, 1)), MacroTotals::default());
    }

    #[test]
    fn test_calorie_average_counts_logged_days_only() {
        let today = d(2024, 6, 15);
        let log = vec![
            food(today, 2000.0, 0.0),
            food(d(2024, 6, 13), 1000.0, 0.0),
            food(d(2024, 6, 13), 500.0, 0.0),
            food(d(2024, 6, 10), 9000.0, 0.0),
        ];
        assert!((calorie_average(&log, today, 3) - 1750.0).abs() < 1e-9);
        assert!(calorie_average(&[], today, 3).abs() < 1e-9);
    }

    #[test]
    fn test_streak_from_today() {
        let today = d(2024, 6, 15);
        let dates = vec![today, d(2024, 6, 14), d(2024, 6, 13), today];
        assert_eq!(logging_streak(dates, today), 3);
    }

    #[test]
    fn test_streak_from_yesterday() {
        let today = d(2024, 6, 15);
        let dates = vec![d(2024, 6, 14), d(2024, 6, 13)];
        assert_eq!(logging_streak(dates, today), 2);
    }

    #[test]
    fn test_streak_gap_truncates() {
        let today = d(2024, 6, 15);
        let dates = vec![today, d(2024, 6, 14), d(2024, 6, 12), d(2024, 6, 11)];
        assert_eq!(logging_streak(dates, today), 2);
    }

    #[test]
    fn test_streak_stale_is_zero() {
        let today = d(2024, 6, 15);
        assert_eq!(logging_streak(vec![d(2024, 6, 13)], today), 0);
        assert_eq!(logging_streak(Vec::new(), today), 0);
    }
}
