use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Platform-wide id of a collected record: `<plugin>:<model>:<connection>:<source id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainId {
    pub plugin: String,
    pub model: String,
    pub connection_id: u64,
    pub source_id: String,
}

/// Repository model name per data-source plugin.
const REPO_MODELS: &[(&str, &str)] = &[
    ("github", "GithubRepo"),
    ("gitlab", "GitlabProject"),
    ("bitbucket", "BitbucketRepo"),
    ("bitbucket_server", "BitbucketServerRepo"),
    ("gitee", "GiteeRepo"),
    ("azuredevops_go", "AzuredevopsRepo"),
];

impl DomainId {
    #[must_use]
    pub fn new(
        plugin: impl Into<String>,
        model: impl Into<String>,
        connection_id: u64,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            plugin: plugin.into(),
            model: model.into(),
            connection_id,
            source_id: source_id.into(),
        }
    }

    /// Repo id for a data-source plugin, e.g. `github:GithubRepo:1:484251804`.
    pub fn repo(plugin: &str, connection_id: u64, source_id: impl Into<String>) -> Result<Self> {
        let model = REPO_MODELS
            .iter()
            .find(|(p, _)| *p == plugin)
            .map(|(_, m)| *m)
            .ok_or_else(|| Error::UnknownRepoPlugin(plugin.to_string()))?;
        Ok(Self::new(plugin, model, connection_id, source_id))
    }

    #[must_use]
    pub fn repo_plugins() -> impl Iterator<Item = &'static str> {
        REPO_MODELS.iter().map(|(p, _)| *p)
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.plugin, self.model, self.connection_id, self.source_id
        )
    }
}

impl FromStr for DomainId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let [plugin, model, connection, source] = parts.as_slice() else {
            return Err(Error::InvalidDomainId(format!(
                "'{s}' must have 4 colon-separated parts"
            )));
        };
        if [plugin, model, connection, source].iter().any(|p| p.is_empty()) {
            return Err(Error::InvalidDomainId(format!("'{s}' has an empty part")));
        }
        let connection_id = connection.parse::<u64>().map_err(|_| {
            Error::InvalidDomainId(format!("'{s}' has a non-numeric connection id"))
        })?;
        Ok(Self::new(*plugin, *model, connection_id, *source))
    }
}

impl TryFrom<String> for DomainId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DomainId> for String {
    fn from(id: DomainId) -> Self {
        id.to_string()
    }
}
