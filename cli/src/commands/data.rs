use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::Path;

use fitlife_core::FitLifeService;
use fitlife_core::store::LogKind;

pub(crate) fn parse_log_kind(name: &str) -> Result<LogKind> {
    match name.trim().to_lowercase().as_str() {
        "food" => Ok(LogKind::Food),
        "exercise" => Ok(LogKind::Exercise),
        "weight" => Ok(LogKind::Weight),
        _ => bail!("Invalid log '{name}'. Must be one of: food, exercise, weight"),
    }
}

/// Write a log's raw bytes to `output`, or to stdout.
pub(crate) fn cmd_export(svc: &FitLifeService, log: &str, output: Option<&Path>) -> Result<()> {
    let kind = parse_log_kind(log)?;
    let bytes = svc.export_log(kind)?;

    match output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported {} to {}", kind.file_name(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

pub(crate) fn cmd_reset(svc: &mut FitLifeService, yes: bool, json: bool) -> Result<()> {
    if !yes {
        bail!("Reset deletes your profile and every log. Re-run with --yes to confirm");
    }
    svc.reset()?;

    if json {
        println!("{}", serde_json::json!({ "reset": true }));
    } else {
        println!("All user data deleted. Reference tables were kept.");
    }
    Ok(())
}
