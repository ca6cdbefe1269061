//! Placing refdiff tasks into pipeline plans built by data-source plugins.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::options::RefdiffOptions;
use crate::plan::{PipelinePlan, PlanEntry, REFDIFF_PLUGIN};

/// Builds the refdiff task for one repository from a scope-level template.
///
/// The template's `repoId` is replaced by `repo_id`.
pub fn refdiff_task(template: &RefdiffOptions, repo_id: &str) -> Result<PlanEntry<Value>> {
    let mut options = template.clone();
    options.repo_id = repo_id.to_string();
    options.validate()?;
    Ok(PlanEntry::new(REFDIFF_PLUGIN, serde_json::to_value(options)?))
}

/// Puts `entry` in the stage after `stage_index`, appending a stage when the
/// plan ends there. Tasks already in that stage stay.
///
/// `stage_index` must name an existing stage.
pub fn attach_after(
    plan: &mut PipelinePlan,
    stage_index: usize,
    entry: PlanEntry<Value>,
) -> Result<()> {
    let stages = plan.stages_mut();
    if stage_index >= stages.len() {
        return Err(Error::invalid(format!(
            "stage {stage_index} does not exist (plan has {} stages)",
            stages.len()
        )));
    }
    let target = stage_index + 1;
    if target == stages.len() {
        stages.push(Vec::new());
    }
    tracing::debug!(
        plugin = %entry.plugin,
        stage = target,
        "attaching task to pipeline plan"
    );
    stages[target].push(entry);
    Ok(())
}

impl PipelinePlan {
    /// Decodes the options of every refdiff task in the plan, in stage order.
    pub fn refdiff_options(&self) -> Result<Vec<RefdiffOptions>> {
        self.entries()
            .filter(|e| e.is_refdiff())
            .map(|e| {
                let options: RefdiffOptions = serde_json::from_value(e.options.clone())
                    .map_err(|err| Error::from_decode(&err))?;
                options.validate()?;
                Ok(options)
            })
            .collect()
    }
}
