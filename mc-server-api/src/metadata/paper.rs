use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_derive::Deserialize;

#[derive(Deserialize, Debug)]
pub struct PaperProject {
    pub project_id: String,
    pub project_name: String,
    #[serde(default)]
    pub version_groups: Vec<String>,
    pub versions: Vec<String>,
}

impl PaperProject {
    /// Versions are reported oldest first.
    pub fn newest_version(&self) -> Option<&str> {
        self.versions.last().map(String::as_str)
    }

    pub fn has_version(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v == version)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BuildChannel {
    Default,
    Experimental,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BuildDownload {
    pub name: String,
    pub sha256: String,
}

#[derive(Deserialize, Debug)]
pub struct PaperBuild {
    pub build: u32,
    pub time: DateTime<Utc>,
    pub channel: BuildChannel,
    #[serde(default)]
    pub promoted: bool,
    pub downloads: HashMap<String, BuildDownload>,
}

impl PaperBuild {
    /// The server jar itself, as opposed to mojang-mappings sidecars.
    pub fn application(&self) -> Option<&BuildDownload> {
        self.downloads.get("application")
    }
}

#[derive(Deserialize, Debug)]
pub struct PaperBuilds {
    pub project_id: String,
    pub project_name: String,
    pub version: String,
    pub builds: Vec<PaperBuild>,
}

impl PaperBuilds {
    /// Builds are reported oldest first.
    pub fn latest(&self) -> Option<&PaperBuild> {
        self.builds.last()
    }

    pub fn latest_stable(&self) -> Option<&PaperBuild> {
        self.builds
            .iter()
            .rev()
            .find(|build| build.channel == BuildChannel::Default)
    }
}
