use serde::Serialize;

use crate::error::{Error, Result};

/// Closest-match threshold for "did you mean" hints.
const SUGGESTION_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub enabled_by_default: bool,
}

/// Subtasks of the refdiff plugin, in the order the engine runs them.
pub const SUBTASKS: &[SubtaskMeta] = &[
    SubtaskMeta {
        name: "calculateCommitsDiff",
        description: "Calculate diff commits between refs",
        enabled_by_default: true,
    },
    SubtaskMeta {
        name: "calculateIssuesDiff",
        description: "Calculate diff issues between refs",
        enabled_by_default: true,
    },
    SubtaskMeta {
        name: "calculatePrCherryPick",
        description: "Calculate pr cherry pick",
        enabled_by_default: true,
    },
    SubtaskMeta {
        name: "calculateProjectDeploymentCommitsDiff",
        description: "Calculate diff commits between project deployments",
        enabled_by_default: true,
    },
];

#[must_use]
pub fn find_subtask(name: &str) -> Option<&'static SubtaskMeta> {
    SUBTASKS.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

fn suggest(name: &str) -> Option<String> {
    let lowered = name.to_ascii_lowercase();
    SUBTASKS
        .iter()
        .map(|s| {
            let score = strsim::jaro_winkler(&lowered, &s.name.to_ascii_lowercase());
            (s.name, score)
        })
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(n, _)| n.to_string())
}

/// Picks the subtasks to run for a `tasks` option.
///
/// Unset or empty selects every subtask enabled by default. Names are
/// matched case-insensitively and the result keeps catalog order.
pub fn resolve_subtasks(tasks: Option<&[String]>) -> Result<Vec<&'static SubtaskMeta>> {
    let requested = match tasks {
        Some(names) if !names.is_empty() => names,
        _ => return Ok(SUBTASKS.iter().filter(|s| s.enabled_by_default).collect()),
    };

    let mut selected = vec![false; SUBTASKS.len()];
    for name in requested {
        let idx = SUBTASKS
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownSubtask {
                name: name.clone(),
                suggestion: suggest(name),
            })?;
        selected[idx] = true;
    }

    Ok(SUBTASKS
        .iter()
        .zip(selected)
        .filter_map(|(s, keep)| keep.then_some(s))
        .collect())
}
