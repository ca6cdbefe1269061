use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::options::ComparisonOptions;

/// Plugin name every refdiff plan entry carries.
pub const REFDIFF_PLUGIN: &str = "refdiff";

/// One task configuration inside a plan stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry<O> {
    pub plugin: String,
    pub options: O,
}

impl<O> PlanEntry<O> {
    pub fn new(plugin: impl Into<String>, options: O) -> Self {
        Self {
            plugin: plugin.into(),
            options,
        }
    }

    pub fn is_refdiff(&self) -> bool {
        self.plugin == REFDIFF_PLUGIN
    }
}

pub type BlueprintPlanEntry = PlanEntry<ComparisonOptions>;

/// Tasks that may run together. Order inside a stage carries no meaning.
pub type PipelineStage<O> = Vec<PlanEntry<O>>;

/// Stages run in order; serialized as a bare array of arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan<O> {
    stages: Vec<PipelineStage<O>>,
}

/// Request body of the refdiff blueprint-plan route.
pub type RefdiffBlueprintPlan = Plan<ComparisonOptions>;

/// Plan mixing tasks of any plugin, options left untyped.
pub type PipelinePlan = Plan<Value>;

impl<O> Default for Plan<O> {
    fn default() -> Self {
        Self { stages: Vec::new() }
    }
}

impl<O> From<Vec<PipelineStage<O>>> for Plan<O> {
    fn from(stages: Vec<PipelineStage<O>>) -> Self {
        Self { stages }
    }
}

impl<O> Plan<O> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stages(&self) -> &[PipelineStage<O>] {
        &self.stages
    }

    pub(crate) fn stages_mut(&mut self) -> &mut Vec<PipelineStage<O>> {
        &mut self.stages
    }

    pub fn push_stage(&mut self, stage: PipelineStage<O>) {
        self.stages.push(stage);
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn task_count(&self) -> usize {
        self.stages.iter().map(Vec::len).sum()
    }

    /// True when no stage holds a task.
    pub fn is_empty(&self) -> bool {
        self.stages.iter().all(Vec::is_empty)
    }

    pub fn entries(&self) -> impl Iterator<Item = &PlanEntry<O>> {
        self.stages.iter().flatten()
    }

    pub fn into_stages(self) -> Vec<PipelineStage<O>> {
        self.stages
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub stages: usize,
    pub tasks: usize,
    pub pairs: usize,
    pub repo_ids: Vec<String>,
}

impl RefdiffBlueprintPlan {
    pub fn validate(&self) -> Result<()> {
        for (stage_idx, stage) in self.stages.iter().enumerate() {
            for (task_idx, entry) in stage.iter().enumerate() {
                if !entry.is_refdiff() {
                    return Err(Error::invalid(format!(
                        "stage {stage_idx} task {task_idx}: expected plugin '{REFDIFF_PLUGIN}', got '{}'",
                        entry.plugin
                    )));
                }
                entry.options.validate().map_err(|e| match e {
                    Error::InvalidConfiguration(reason) => Error::invalid(format!(
                        "stage {stage_idx} task {task_idx}: {reason}"
                    )),
                    other => other,
                })?;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.entries().map(|e| e.options.pairs.len()).sum()
    }

    #[must_use]
    pub fn summary(&self) -> PlanSummary {
        let repo_ids: BTreeSet<&str> = self
            .entries()
            .map(|e| e.options.repo_id.as_str())
            .collect();
        PlanSummary {
            stages: self.stage_count(),
            tasks: self.task_count(),
            pairs: self.pair_count(),
            repo_ids: repo_ids.into_iter().map(String::from).collect(),
        }
    }
}

pub fn decode_blueprint_plan(input: &str) -> Result<RefdiffBlueprintPlan> {
    let plan: RefdiffBlueprintPlan =
        serde_json::from_str(input).map_err(|e| Error::from_decode(&e))?;
    finish_decode(plan)
}

pub fn decode_blueprint_plan_value(input: Value) -> Result<RefdiffBlueprintPlan> {
    let plan: RefdiffBlueprintPlan =
        serde_json::from_value(input).map_err(|e| Error::from_decode(&e))?;
    finish_decode(plan)
}

fn finish_decode(plan: RefdiffBlueprintPlan) -> Result<RefdiffBlueprintPlan> {
    plan.validate()?;
    tracing::debug!(
        stages = plan.stage_count(),
        tasks = plan.task_count(),
        pairs = plan.pair_count(),
        "decoded refdiff blueprint plan"
    );
    Ok(plan)
}
