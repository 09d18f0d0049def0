use anyhow::{Result, bail};
use chrono::Local;
use tabled::{Table, Tabled, settings::Style};

use fitlife_core::FitLifeService;
use fitlife_core::models::{
    ActivityLevel, Gender, Goal, Profile, ProfileInput, ProfileUpdate,
};

use super::helpers::{exit_no_data, fmt_qty, print_json};

fn parse_goal(label: &str) -> Result<Goal> {
    let goal = Goal::from_label(label);
    if goal == Goal::Maintain && !label.trim().eq_ignore_ascii_case("maintain") {
        bail!(
            "Invalid goal '{label}'. Must be one of: {}",
            Goal::LABELS.join(", ")
        );
    }
    Ok(goal)
}

fn parse_gender(label: &str) -> Result<Gender> {
    match label.trim().to_lowercase().as_str() {
        "male" | "m" => Ok(Gender::Male),
        "female" | "f" => Ok(Gender::Female),
        _ => bail!("Invalid gender '{label}'. Use male or female"),
    }
}

/// Map a short activity name ("moderately") onto its canonical label.
fn activity_label(input: &str) -> String {
    let first = input.split_whitespace().next().unwrap_or("");
    ActivityLevel::LABELS
        .iter()
        .find(|l| {
            l.split_whitespace()
                .next()
                .is_some_and(|w| w.eq_ignore_ascii_case(first))
        })
        .map_or_else(|| input.to_string(), |l| (*l).to_string())
}

pub(crate) struct CreateArgs {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub activity: String,
    pub goal: String,
    pub water: i64,
}

pub(crate) fn cmd_profile_create(
    svc: &mut FitLifeService,
    args: CreateArgs,
    json: bool,
) -> Result<()> {
    let input = ProfileInput {
        name: args.name,
        age: args.age,
        gender: parse_gender(&args.gender)?,
        height_cm: args.height,
        weight_kg: args.weight,
        activity: activity_label(&args.activity),
        goal: parse_goal(&args.goal)?,
        water_goal_ml: args.water,
    };
    let profile = svc.create_profile(&input, Local::now().date_naive())?;

    if json {
        print_json(&profile)?;
    } else {
        println!("Profile created for {}", profile.name);
        print_profile(&profile);
    }
    Ok(())
}

pub(crate) fn cmd_profile_show(svc: &FitLifeService, json: bool) -> Result<()> {
    let Some(profile) = svc.profile() else {
        exit_no_data("No profile found. Use `fitlife profile create` to set one up.", json);
    };
    if json {
        print_json(profile)?;
    } else {
        print_profile(profile);
    }
    Ok(())
}

pub(crate) struct UpdateArgs {
    pub age: Option<u32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub activity: Option<String>,
    pub goal: Option<String>,
    pub water: Option<i64>,
}

pub(crate) fn cmd_profile_update(
    svc: &mut FitLifeService,
    args: UpdateArgs,
    json: bool,
) -> Result<()> {
    let update = ProfileUpdate {
        age: args.age,
        height_cm: args.height,
        weight_kg: args.weight,
        activity: args.activity.as_deref().map(activity_label),
        goal: args.goal.as_deref().map(parse_goal).transpose()?,
        water_goal_ml: args.water,
    };
    let profile = svc.update_profile(&update, Local::now().date_naive())?;

    if json {
        print_json(&profile)?;
    } else {
        println!("Profile updated");
        print_profile(&profile);
    }
    Ok(())
}

fn print_profile(p: &Profile) {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Field")]
        field: &'static str,
        #[tabled(rename = "Value")]
        value: String,
    }

    let split = p.targets.macro_split;
    let rows = vec![
        Row { field: "Name", value: p.name.clone() },
        Row { field: "Age", value: p.age.to_string() },
        Row { field: "Gender", value: p.gender.to_string() },
        Row { field: "Height", value: format!("{} cm", fmt_qty(p.height_cm)) },
        Row { field: "Start weight", value: format!("{:.1} kg", p.start_weight_kg) },
        Row { field: "Current weight", value: format!("{:.1} kg", p.current_weight_kg) },
        Row { field: "Activity", value: p.activity.clone() },
        Row { field: "Goal", value: p.goal.to_string() },
        Row { field: "Calories", value: format!("{} kcal", p.targets.calories) },
        Row { field: "Protein", value: format!("{} g", p.targets.protein_g) },
        Row { field: "Water", value: format!("{} ml", p.targets.water_ml) },
        Row {
            field: "Macros (C/P/F)",
            value: format!("{}% / {}% / {}%", split.carbs_pct, split.protein_pct, split.fat_pct),
        },
    ];

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_goal() {
        assert_eq!(parse_goal("weight-loss").unwrap(), Goal::WeightLoss);
        assert_eq!(parse_goal("Maintain").unwrap(), Goal::Maintain);
        assert!(parse_goal("bulk").is_err());
    }

    #[test]
    fn test_parse_gender() {
        assert_eq!(parse_gender("M").unwrap(), Gender::Male);
        assert_eq!(parse_gender("female").unwrap(), Gender::Female);
        assert!(parse_gender("x").is_err());
    }

    #[test]
    fn test_activity_label() {
        assert_eq!(activity_label("moderately"), "Moderately Active");
        assert_eq!(activity_label("sedentary"), "Sedentary (Office)");
        assert_eq!(activity_label("couch potato"), "couch potato");
    }
}
