mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::commands::{
    CreateArgs, UpdateArgs, cmd_analytics, cmd_dashboard, cmd_exercise_history, cmd_exercise_log,
    cmd_exercise_search, cmd_export, cmd_food_add, cmd_food_log, cmd_food_search, cmd_food_today,
    cmd_insights, cmd_nutrition, cmd_plan, cmd_profile_create, cmd_profile_show,
    cmd_profile_update, cmd_reset, cmd_symptom_list, cmd_symptom_show, cmd_water_log,
    cmd_water_show, cmd_weight_history, cmd_weight_log,
};
use crate::config::Config;
use fitlife_core::FitLifeService;

#[derive(Parser)]
#[command(
    name = "fitlife",
    version,
    about = "A local-first health tracker: meals, water, workouts, weight and advice"
)]
struct Cli {
    /// Directory holding the profile and logs
    #[arg(long, global = true, env = "FITLIFE_DATA_DIR", value_name = "PATH")]
    data_dir: Option<PathBuf>,
    /// Directory holding the food, exercise and symptom reference tables
    #[arg(long, global = true, env = "FITLIFE_REFERENCE_DIR", value_name = "PATH")]
    reference_dir: Option<PathBuf>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, show or update your profile and targets
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Search, log and add foods
    Food {
        #[command(subcommand)]
        command: FoodCommands,
    },
    /// Track drinks and effective hydration
    Water {
        #[command(subcommand)]
        command: WaterCommands,
    },
    /// Search activities and log workouts
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Track body weight
    Weight {
        #[command(subcommand)]
        command: WeightCommands,
    },
    /// Show today's snapshot
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show advice based on recent logs
    Insights {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show calorie trends and macros for a day
    Analytics {
        /// Date for the macro breakdown (YYYY-MM-DD or today/yesterday, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show recommended daily macros in grams
    Nutrition {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a meal plan
    Plan {
        /// Number of days (1-7)
        #[arg(short, long, default_value = "3")]
        days: u32,
        /// Diet: vegetarian or non-vegetarian
        #[arg(long, default_value = "vegetarian")]
        diet: String,
        /// Seed for a reproducible plan
        #[arg(long)]
        seed: Option<u64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up symptom advice
    Symptom {
        #[command(subcommand)]
        command: SymptomCommands,
    },
    /// Export a log as CSV
    Export {
        /// Log to export: food, exercise, weight
        log: String,
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Delete the profile and all logs (reference tables are kept)
    Reset {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Create a profile and compute targets
    Create {
        /// Your name
        #[arg(long)]
        name: String,
        /// Age in years (10-100)
        #[arg(long)]
        age: u32,
        /// Gender: male or female
        #[arg(long)]
        gender: String,
        /// Height in cm (100-250)
        #[arg(long)]
        height: f64,
        /// Weight in kg (30-200)
        #[arg(long)]
        weight: f64,
        /// Activity: sedentary, lightly, moderately, very, super
        #[arg(long, default_value = "sedentary")]
        activity: String,
        /// Goal: weight-loss, weight-gain, muscle-gain, maintain
        #[arg(long, default_value = "maintain")]
        goal: String,
        /// Daily water goal in ml (1000-5000)
        #[arg(long, default_value = "2500")]
        water: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the profile and targets
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change settings and recompute targets
    Update {
        /// Age in years
        #[arg(long)]
        age: Option<u32>,
        /// Height in cm
        #[arg(long)]
        height: Option<f64>,
        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,
        /// Activity: sedentary, lightly, moderately, very, super
        #[arg(long)]
        activity: Option<String>,
        /// Goal: weight-loss, weight-gain, muscle-gain, maintain
        #[arg(long)]
        goal: Option<String>,
        /// Daily water goal in ml
        #[arg(long)]
        water: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum FoodCommands {
    /// Search the food table (custom foods first)
    Search {
        /// Part of a dish name
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log servings of a dish
    Log {
        /// Exact dish name (see `food search`)
        dish: String,
        /// Number of servings
        #[arg(short, long, default_value = "1")]
        quantity: f64,
        /// Meal type: breakfast, lunch, dinner, snack
        #[arg(short, long, default_value = "snack")]
        meal: String,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Time (HH:MM, default: now)
        #[arg(long)]
        time: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a custom food (per serving)
    Add {
        /// Dish name
        name: String,
        /// Calories per serving
        #[arg(long)]
        calories: f64,
        /// Protein per serving (g)
        #[arg(long)]
        protein: Option<f64>,
        /// Carbs per serving (g)
        #[arg(long)]
        carbs: Option<f64>,
        /// Fat per serving (g)
        #[arg(long)]
        fat: Option<f64>,
        /// Mark as non-vegetarian
        #[arg(long)]
        non_veg: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List food entries for a day
    List {
        /// Date (YYYY-MM-DD or today/yesterday, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum WaterCommands {
    /// Log a drink
    Log {
        /// Volume in ml
        volume: f64,
        /// Beverage: water, milk, tea, coffee, juice, soda, alcohol, sports drink
        #[arg(short, long, default_value = "Water")]
        beverage: String,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Time (HH:MM, default: now)
        #[arg(long)]
        time: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show drinks and effective hydration for a day
    Show {
        /// Date (YYYY-MM-DD or today/yesterday, default: today)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ExerciseCommands {
    /// Search the activity table
    Search {
        /// Part of an activity description
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log a workout
    Log {
        /// Exact activity description (see `exercise search`)
        activity: String,
        /// Duration in minutes
        #[arg(short, long, default_value = "30")]
        minutes: f64,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Time (HH:MM, default: now)
        #[arg(long)]
        time: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show logged workouts, newest first
    History {
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum WeightCommands {
    /// Log a weight entry
    Log {
        /// Weight in kg (30-200)
        weight: f64,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show weight history
    History {
        /// Number of days to show (default: all)
        #[arg(short, long)]
        days: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SymptomCommands {
    /// List known symptoms
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show advice for a symptom
    Show {
        /// Symptom name
        symptom: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[allow(clippy::too_many_lines)]
fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.data_dir, cli.reference_dir)?;
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        reference_dir = %config.reference_dir.display(),
        "resolved directories"
    );
    let mut svc = FitLifeService::open(&config.data_dir, &config.reference_dir)?;

    match cli.command {
        Commands::Profile { command } => match command {
            ProfileCommands::Create {
                name,
                age,
                gender,
                height,
                weight,
                activity,
                goal,
                water,
                json,
            } => cmd_profile_create(
                &mut svc,
                CreateArgs {
                    name,
                    age,
                    gender,
                    height,
                    weight,
                    activity,
                    goal,
                    water,
                },
                json,
            ),
            ProfileCommands::Show { json } => cmd_profile_show(&svc, json),
            ProfileCommands::Update {
                age,
                height,
                weight,
                activity,
                goal,
                water,
                json,
            } => cmd_profile_update(
                &mut svc,
                UpdateArgs {
                    age,
                    height,
                    weight,
                    activity,
                    goal,
                    water,
                },
                json,
            ),
        },
        Commands::Food { command } => match command {
            FoodCommands::Search { query, json } => cmd_food_search(&svc, &query, json),
            FoodCommands::Log {
                dish,
                quantity,
                meal,
                date,
                time,
                json,
            } => cmd_food_log(&svc, &dish, quantity, &meal, date, time, json),
            FoodCommands::Add {
                name,
                calories,
                protein,
                carbs,
                fat,
                non_veg,
                json,
            } => cmd_food_add(
                &mut svc, &name, calories, protein, carbs, fat, non_veg, json,
            ),
            FoodCommands::List { date, json } => cmd_food_today(&svc, date, json),
        },
        Commands::Water { command } => match command {
            WaterCommands::Log {
                volume,
                beverage,
                date,
                time,
                json,
            } => cmd_water_log(&svc, volume, &beverage, date, time, json),
            WaterCommands::Show { date, json } => cmd_water_show(&svc, date, json),
        },
        Commands::Exercise { command } => match command {
            ExerciseCommands::Search { query, json } => cmd_exercise_search(&svc, &query, json),
            ExerciseCommands::Log {
                activity,
                minutes,
                date,
                time,
                json,
            } => cmd_exercise_log(&svc, &activity, minutes, date, time, json),
            ExerciseCommands::History { limit, json } => cmd_exercise_history(&svc, limit, json),
        },
        Commands::Weight { command } => match command {
            WeightCommands::Log { weight, date, json } => {
                cmd_weight_log(&mut svc, weight, date, json)
            }
            WeightCommands::History { days, json } => cmd_weight_history(&svc, days, json),
        },
        Commands::Dashboard { json } => cmd_dashboard(&svc, json),
        Commands::Insights { json } => cmd_insights(&svc, json),
        Commands::Analytics { date, json } => cmd_analytics(&svc, date, json),
        Commands::Nutrition { json } => cmd_nutrition(&svc, json),
        Commands::Plan {
            days,
            diet,
            seed,
            json,
        } => cmd_plan(&svc, days, &diet, seed.or(config.meal_plan_seed), json),
        Commands::Symptom { command } => match command {
            SymptomCommands::List { json } => cmd_symptom_list(&svc, json),
            SymptomCommands::Show { symptom, json } => cmd_symptom_show(&svc, &symptom, json),
        },
        Commands::Export { log, output } => cmd_export(&svc, &log, output.as_deref()),
        Commands::Reset { yes, json } => cmd_reset(&mut svc, yes, json),
    }
}
