use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

/// Optional `settings.json` in the data directory.
#[derive(Debug, Default, Deserialize)]
struct Settings {
    reference_dir: Option<PathBuf>,
    meal_plan_seed: Option<u64>,
}

pub struct Config {
    pub data_dir: PathBuf,
    pub reference_dir: PathBuf,
    pub meal_plan_seed: Option<u64>,
}

impl Config {
    /// Resolve directories: explicit flags win, then `settings.json`, then the
    /// platform data directory.
    pub fn load(data_dir: Option<PathBuf>, reference_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", "fitlife")
                .context("Could not determine home directory")?
                .data_dir()
                .to_path_buf(),
        };
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let settings = load_settings(&data_dir)?;
        let reference_dir = reference_dir
            .or(settings.reference_dir)
            .map_or_else(
                || data_dir.join("reference"),
                |dir| {
                    if dir.is_relative() {
                        data_dir.join(dir)
                    } else {
                        dir
                    }
                },
            );

        Ok(Config {
            data_dir,
            reference_dir,
            meal_plan_seed: settings.meal_plan_seed,
        })
    }
}

fn load_settings(data_dir: &Path) -> Result<Settings> {
    let path = data_dir.join(SETTINGS_FILE);
    if !path.exists() {
        return Ok(Settings::default());
    }
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_json::from_str(&raw).with_context(|| format!("Invalid settings file: {}", path.display()))
}
