use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Identifier of a GitHub Actions workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One completed execution of a CI workflow, as reported by the provider
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkflowRun {
    pub id: RunId,
    #[serde(default)]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub conclusion: Option<String>,
}

impl WorkflowRun {
    /// Creation date in `YYYY-MM-DD` form, used in progress messages
    pub fn created_date(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }
}

/// Opaque handle used to download an artifact archive
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DownloadHandle(String);

impl DownloadHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An artifact attached to a workflow run
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArtifactDescriptor {
    pub id: u64,
    pub name: String,
    #[serde(rename = "archive_download_url")]
    pub download_handle: DownloadHandle,
    #[serde(rename = "size_in_bytes", default)]
    pub size: u64,
    #[serde(default)]
    pub expired: bool,
}
