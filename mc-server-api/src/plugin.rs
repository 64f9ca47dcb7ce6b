use std::path::{Path, PathBuf};

use futures_util::{stream, StreamExt, TryStreamExt};
use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    download::Manager,
    metadata::hangar::{Platform, PlatformDownload, Project, ProjectsPage, SearchPage},
    resources::{fetch_latest_release, fetch_project_version, search_projects},
};

/// Plugins worth installing on a freshly provisioned server.
pub static CURATED_PLUGINS: &[&str] = &[
    "GetMeHome",
    "Geyser",
    "Floodgate",
    "GriefPrevention",
    "LoginSecurity",
    "LuckPerms",
    "SkinsRestorer",
    "Vault",
    "ViaBackwards",
    "ViaVersion",
    "ViaRewind",
    "WorldEdit",
    "WorldGuard",
    "EssentialsX",
    "DeathChest",
    "OrzMC",
];

const JAR_SUFFIX: &str = ".jar";

fn jar_file_name(name: &str) -> String {
    if name.ends_with(JAR_SUFFIX) {
        name.to_owned()
    } else {
        format!("{}{}", name, JAR_SUFFIX)
    }
}

/// A resolved (source URL, destination file) pair for one plugin artifact.
#[derive(Debug, Clone)]
pub struct DownloadItem {
    pub source_url: Url,
    pub dest_file: PathBuf,
    pub size: Option<u64>,
}

impl DownloadItem {
    /// Destination file name is the artifact's reported name, falling back to
    /// the plugin name, with a `.jar` suffix ensured.
    pub fn from_download(
        download: &PlatformDownload,
        fallback_name: Option<&str>,
        output_dir: &Path,
    ) -> Option<Self> {
        let source_url = download.download_url.clone()?;
        let name = download
            .file_info
            .as_ref()
            .map(|info| info.name.as_str())
            .or(fallback_name)?;
        Some(Self {
            source_url,
            dest_file: output_dir.join(jar_file_name(name)),
            size: download.file_info.as_ref().map(|info| info.size_bytes),
        })
    }
}

/// Thin query handle over the plugin directory, pinned to one platform.
#[derive(Debug, Default)]
pub struct PluginDirectory {
    client: Client,
    platform: Platform,
}

impl PluginDirectory {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            platform: Platform::default(),
        }
    }

    pub fn with_platform(client: Client, platform: Platform) -> Self {
        Self { client, platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    #[instrument(skip(self))]
    pub async fn search(&self, text: &str, page: SearchPage) -> crate::Result<ProjectsPage> {
        search_projects(&self.client, text, self.platform, page).await
    }

    /// Pages through search results until `wanted` projects are gathered or
    /// the directory reports no more matches.
    #[instrument(skip(self))]
    pub async fn search_collect(&self, text: &str, wanted: usize) -> crate::Result<Vec<Project>> {
        let mut projects = Vec::new();
        let mut page = SearchPage::default();
        loop {
            let chunk = self.search(text, page).await?;
            let total = chunk.pagination.count as usize;
            if chunk.result.is_empty() {
                break;
            }
            projects.extend(chunk.result);
            if projects.len() >= wanted || projects.len() >= total {
                break;
            }
            page = page.next();
        }
        projects.truncate(wanted);
        Ok(projects)
    }

    /// Exact-name lookup, one directory hit wide.
    #[instrument(skip(self))]
    pub async fn find(&self, name: &str) -> crate::Result<Option<Project>> {
        let page = self.search(name, SearchPage::first(1)).await?;
        Ok(page
            .result
            .into_iter()
            .find(|project| project.name.as_deref() == Some(name)))
    }

    /// Artifact of the latest release version of `project` for this platform.
    ///
    /// Resolves to `None` when any link of the chain is missing: the project
    /// has no name, no release, the release has no download for the platform,
    /// or `game_version` is requested but not among the release's declared
    /// platform dependencies.
    #[instrument(skip(self, project))]
    pub async fn latest_release_download(
        &self,
        project: &Project,
        game_version: Option<&str>,
    ) -> crate::Result<Option<PlatformDownload>> {
        let Some(name) = project.name.as_deref() else {
            return Ok(None);
        };
        let Some(latest) = fetch_latest_release(&self.client, name).await? else {
            return Ok(None);
        };
        let Some(version) = fetch_project_version(&self.client, name, &latest).await? else {
            return Ok(None);
        };
        if let Some(target) = game_version {
            if !version.supports(self.platform, target) {
                debug!(name, target, "latest release does not list the game version");
                return Ok(None);
            }
        }
        Ok(version.download_for(self.platform).cloned())
    }

    /// Fetches the curated plugin set, skipping names the directory does not
    /// resolve to an exact match.
    #[instrument(skip(self))]
    pub async fn curated(&self) -> crate::Result<Vec<Project>> {
        let mut projects = Vec::new();
        for name in CURATED_PLUGINS {
            match self.find(name).await? {
                Some(project) => projects.push(project),
                None => warn!(name, "not found in the plugin directory"),
            }
        }
        Ok(projects)
    }

    #[instrument(skip(self, project))]
    pub async fn download_item(
        &self,
        project: &Project,
        output_dir: &Path,
        game_version: Option<&str>,
    ) -> crate::Result<Option<DownloadItem>> {
        let Some(download) = self.latest_release_download(project, game_version).await? else {
            return Ok(None);
        };
        Ok(DownloadItem::from_download(
            &download,
            project.name.as_deref(),
            output_dir,
        ))
    }

    #[instrument(skip(self, items, downloader))]
    pub async fn download_all(
        &self,
        items: &[DownloadItem],
        downloader: &Manager,
        concurrency: usize,
        force: bool,
    ) -> crate::Result<()> {
        stream::iter(items)
            .map(Ok)
            .try_for_each_concurrent(concurrency, |item| async move {
                downloader
                    .download_file_if_absent(
                        item.source_url.clone(),
                        &item.dest_file,
                        item.size,
                        force,
                    )
                    .await?;
                Ok(())
            })
            .await
    }
}
