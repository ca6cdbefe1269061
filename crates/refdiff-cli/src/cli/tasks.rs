use anyhow::Result;
use console::style;
use refdiff_core::resolve_subtasks;

pub fn run(select: &[String]) -> Result<()> {
    let subtasks = resolve_subtasks(Some(select))?;

    for subtask in subtasks {
        println!(
            "  {} {}",
            style(subtask.name).bold(),
            style(subtask.description).dim()
        );
    }

    Ok(())
}
