use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use refdiff_core::{decode_blueprint_plan, resolve_subtasks, RefdiffBlueprintPlan};

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read plan from stdin")?;
            Ok(buf)
        }
    }
}

/// Subtask names carried in `tasks` are checked too, since the engine
/// rejects unknown ones at run time.
fn check_tasks(plan: &RefdiffBlueprintPlan) -> Result<()> {
    for (idx, entry) in plan.entries().enumerate() {
        let Some(tasks) = entry.options.extra.get("tasks") else {
            continue;
        };
        let names: Vec<String> = serde_json::from_value(tasks.clone())
            .with_context(|| format!("task {idx}: tasks must be a list of strings"))?;
        resolve_subtasks(Some(names.as_slice())).with_context(|| format!("task {idx}"))?;
    }
    Ok(())
}

pub fn run(file: Option<&Path>, json: bool) -> Result<()> {
    let input = read_input(file)?;
    let plan = decode_blueprint_plan(&input)?;
    check_tasks(&plan)?;
    let summary = plan.summary();

    if json {
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    println!("{} Plan is valid", style("●").green());
    println!("  Stages: {}", summary.stages);
    println!("  Tasks: {}", summary.tasks);
    println!("  Ref pairs: {}", summary.pairs);
    for repo in &summary.repo_ids {
        println!("  {}", style(repo).bold());
    }
    Ok(())
}
