mod dashboard;
mod data;
mod exercise;
mod food;
mod helpers;
mod plan;
mod profile;
mod symptom;
mod water;
mod weight;

pub(crate) use dashboard::{cmd_analytics, cmd_dashboard, cmd_insights, cmd_nutrition};
pub(crate) use data::{cmd_export, cmd_reset};
pub(crate) use exercise::{cmd_exercise_history, cmd_exercise_log, cmd_exercise_search};
pub(crate) use food::{cmd_food_add, cmd_food_log, cmd_food_search, cmd_food_today};
pub(crate) use plan::cmd_plan;
pub(crate) use profile::{CreateArgs, UpdateArgs, cmd_profile_create, cmd_profile_show, cmd_profile_update};
pub(crate) use symptom::{cmd_symptom_list, cmd_symptom_show};
pub(crate) use water::{cmd_water_log, cmd_water_show};
pub(crate) use weight::{cmd_weight_history, cmd_weight_log};
