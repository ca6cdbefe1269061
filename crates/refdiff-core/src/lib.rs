#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod apidoc;
pub mod blueprint;
pub mod domain_id;
pub mod error;
pub mod options;
pub mod plan;
pub mod refs;
pub mod subtask;

pub use apidoc::{openapi_document, routes, ApiInfo, ApiRoute, Method, REFDIFF_TAG};
pub use blueprint::{attach_after, refdiff_task};
pub use domain_id::DomainId;
pub use error::{Error, Result};
pub use options::{
    decode_comparison_options, decode_refdiff_options, ComparisonOptions, RefdiffOptions,
    TagSelection,
};
pub use plan::{
    decode_blueprint_plan, decode_blueprint_plan_value, BlueprintPlanEntry, PipelinePlan,
    PipelineStage, Plan, PlanEntry, PlanSummary, RefdiffBlueprintPlan, REFDIFF_PLUGIN,
};
pub use refs::{RefCommitPair, RefPair, RefPairList};
pub use subtask::{find_subtask, resolve_subtasks, SubtaskMeta, SUBTASKS};
