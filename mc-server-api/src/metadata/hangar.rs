use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_derive::Deserialize;
use url::Url;

/// Server flavor a plugin build targets, as the directory spells it in
/// download maps and query parameters.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    #[default]
    Paper,
    Velocity,
    Waterfall,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paper => "PAPER",
            Self::Velocity => "VELOCITY",
            Self::Waterfall => "WATERFALL",
        }
    }
}

/// Paging cursor for directory searches.
#[derive(Debug, Clone, Copy)]
pub struct SearchPage {
    pub limit: u32,
    pub offset: u32,
}

impl Default for SearchPage {
    fn default() -> Self {
        Self {
            limit: 5,
            offset: 0,
        }
    }
}

impl SearchPage {
    pub fn first(limit: u32) -> Self {
        Self { limit, offset: 0 }
    }

    pub fn next(self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset + self.limit,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
    pub count: u32,
}

#[derive(Deserialize, Debug)]
pub struct ProjectsPage {
    pub pagination: Pagination,
    pub result: Vec<Project>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AdminTools,
    Chat,
    DevTools,
    Economy,
    Gameplay,
    Games,
    Protection,
    RolePlaying,
    WorldManagement,
    #[serde(other)]
    Misc,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AdminTools => "admin_tools",
            Self::Chat => "chat",
            Self::DevTools => "dev_tools",
            Self::Economy => "economy",
            Self::Gameplay => "gameplay",
            Self::Games => "games",
            Self::Protection => "protection",
            Self::RolePlaying => "role_playing",
            Self::WorldManagement => "world_management",
            Self::Misc => "misc",
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProjectNamespace {
    pub owner: String,
    pub slug: String,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub views: u64,
    pub downloads: u64,
    pub recent_views: u64,
    pub recent_downloads: u64,
    pub stars: u64,
    pub watchers: u64,
}

/// A plugin entry from the directory. The directory may omit most fields
/// depending on project visibility, so everything beyond paging is optional.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub created_at: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub namespace: Option<ProjectNamespace>,
    pub stats: Option<ProjectStats>,
    pub category: Option<Category>,
    pub last_updated: Option<DateTime<Utc>>,
    pub visibility: Option<String>,
    pub avatar_url: Option<Url>,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Channel {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    pub size_bytes: u64,
    pub sha256_hash: Option<String>,
}

/// One downloadable artifact of a release, for one platform.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlatformDownload {
    pub file_info: Option<FileInfo>,
    pub external_url: Option<Url>,
    pub download_url: Option<Url>,
}

/// A published release version of a plugin, keyed maps per platform name.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProjectVersion {
    pub created_at: Option<DateTime<Utc>>,
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub channel: Option<Channel>,
    #[serde(default)]
    pub downloads: HashMap<String, PlatformDownload>,
    #[serde(default)]
    pub platform_dependencies: HashMap<String, Vec<String>>,
}

impl ProjectVersion {
    /// A game version is only rejected when the release declares platform
    /// dependencies for `platform` and the version is not among them.
    pub fn supports(&self, platform: Platform, game_version: &str) -> bool {
        match self.platform_dependencies.get(platform.as_str()) {
            Some(deps) => deps.iter().any(|dep| dep == game_version),
            None => true,
        }
    }

    pub fn download_for(&self, platform: Platform) -> Option<&PlatformDownload> {
        self.downloads.get(platform.as_str())
    }
}
