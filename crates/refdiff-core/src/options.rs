use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::refs::{RefCommitPair, RefPair};

fn check_repo_id(repo_id: &str) -> Result<()> {
    if repo_id.trim().is_empty() {
        return Err(Error::invalid("repoId must not be empty"));
    }
    Ok(())
}

fn add_unique_pair(pairs: &mut Vec<RefPair>, new_ref: &str, old_ref: &str) -> Result<()> {
    let pair = RefPair::new(new_ref, old_ref);
    pair.validate()?;
    if pair.is_identity() {
        return Err(Error::IdenticalRefs(pair.new_ref));
    }
    if !pairs.iter().any(|p| p.matches(new_ref, old_ref)) {
        pairs.push(pair);
    }
    Ok(())
}

/// The engine marshals unset slices as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn remove_matching_pair(pairs: &mut Vec<RefPair>, new_ref: &str, old_ref: &str) -> bool {
    let before = pairs.len();
    pairs.retain(|p| !p.matches(new_ref, old_ref));
    pairs.len() != before
}

/// Options carried by a refdiff entry of a blueprint plan.
///
/// Keys other than `repoId` and `pairs` are kept as-is so a plan survives a
/// decode/encode round-trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonOptions {
    #[serde(alias = "RepoId")]
    pub repo_id: String,
    #[serde(default, alias = "Pairs", deserialize_with = "null_as_empty")]
    pub pairs: Vec<RefPair>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ComparisonOptions {
    #[must_use]
    pub fn new(repo_id: impl Into<String>) -> Self {
        Self {
            repo_id: repo_id.into(),
            pairs: Vec::new(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_pair(mut self, new_ref: impl Into<String>, old_ref: impl Into<String>) -> Self {
        self.pairs.push(RefPair::new(new_ref, old_ref));
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_repo_id(&self.repo_id)?;
        self.pairs.iter().try_for_each(RefPair::validate)
    }

    /// Appends a pair. Blank or self-comparing pairs are errors; a pair
    /// already listed is left as is.
    pub fn add_pair(&mut self, new_ref: &str, old_ref: &str) -> Result<()> {
        add_unique_pair(&mut self.pairs, new_ref, old_ref)
    }

    pub fn remove_pair(&mut self, new_ref: &str, old_ref: &str) -> bool {
        remove_matching_pair(&mut self.pairs, new_ref, old_ref)
    }
}

/// Full per-task configuration handed to the pipeline engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefdiffOptions {
    #[serde(alias = "RepoId")]
    pub repo_id: String,
    #[serde(rename = "tasks", alias = "Tasks", skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<String>>,
    #[serde(default, alias = "Pairs", deserialize_with = "null_as_empty")]
    pub pairs: Vec<RefPair>,
    #[serde(default, alias = "TagsPattern", skip_serializing_if = "Option::is_none")]
    pub tags_pattern: Option<String>,
    #[serde(default, alias = "TagsLimit", skip_serializing_if = "Option::is_none")]
    pub tags_limit: Option<u32>,
    #[serde(default, alias = "TagsOrder", skip_serializing_if = "Option::is_none")]
    pub tags_order: Option<String>,
    #[serde(
        default,
        alias = "AllPairs",
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub all_pairs: Vec<RefCommitPair>,
    #[serde(default, alias = "ProjectName", skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

impl RefdiffOptions {
    #[must_use]
    pub fn new(repo_id: impl Into<String>) -> Self {
        Self {
            repo_id: repo_id.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_repo_id(&self.repo_id)?;
        self.pairs.iter().try_for_each(RefPair::validate)
    }

    pub fn add_pair(&mut self, new_ref: &str, old_ref: &str) -> Result<()> {
        add_unique_pair(&mut self.pairs, new_ref, old_ref)
    }

    pub fn remove_pair(&mut self, new_ref: &str, old_ref: &str) -> bool {
        remove_matching_pair(&mut self.pairs, new_ref, old_ref)
    }

    /// Wire-format projection used in blueprint plans.
    #[must_use]
    pub fn comparison(&self) -> ComparisonOptions {
        ComparisonOptions {
            repo_id: self.repo_id.clone(),
            pairs: self.pairs.clone(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn tag_selection(&self) -> TagSelection<'_> {
        TagSelection {
            pattern: self.tags_pattern.as_deref(),
            limit: self.tags_limit,
            order: self.tags_order.as_deref(),
        }
    }
}

/// Tag-based pair selection settings. Matching and ordering are done by the
/// engine; this only carries the values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSelection<'a> {
    pub pattern: Option<&'a str>,
    pub limit: Option<u32>,
    pub order: Option<&'a str>,
}

impl TagSelection<'_> {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.pattern.is_some_and(|p| !p.is_empty())
    }
}

pub fn decode_comparison_options(input: &str) -> Result<ComparisonOptions> {
    let options: ComparisonOptions =
        serde_json::from_str(input).map_err(|e| Error::from_decode(&e))?;
    options.validate()?;
    Ok(options)
}

pub fn decode_refdiff_options(input: &str) -> Result<RefdiffOptions> {
    let options: RefdiffOptions =
        serde_json::from_str(input).map_err(|e| Error::from_decode(&e))?;
    options.validate()?;
    Ok(options)
}
