use reqwest::{Client, StatusCode};

use crate::metadata::{
    fabric::{GameVersion, InstallerVersion, LoaderVersion},
    hangar::{Platform, ProjectVersion, ProjectsPage, SearchPage},
    manifest::VersionsManifest,
    paper::{PaperBuilds, PaperProject},
};

pub static VERSIONS_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";
pub static HANGAR_API_URL: &str = "https://hangar.papermc.io/api/v1";
pub static PAPER_API_URL: &str = "https://api.papermc.io/v2";
pub static FABRIC_META_URL: &str = "https://meta.fabricmc.net/v2";

pub async fn fetch_manifest(client: &Client) -> crate::Result<VersionsManifest> {
    Ok(client
        .get(VERSIONS_MANIFEST_URL)
        .send()
        .await?
        .json()
        .await?)
}

pub async fn search_projects(
    client: &Client,
    query: &str,
    platform: Platform,
    page: SearchPage,
) -> crate::Result<ProjectsPage> {
    Ok(client
        .get(format!("{}/projects", HANGAR_API_URL))
        .query(&[("q", query), ("platform", platform.as_str())])
        .query(&[("limit", page.limit), ("offset", page.offset)])
        .send()
        .await?
        .json()
        .await?)
}

/// Name of the newest release-channel version of a project, reported by the
/// directory as a plain-text body. A project without any release yields `None`.
pub async fn fetch_latest_release(
    client: &Client,
    project: &str,
) -> crate::Result<Option<String>> {
    let response = client
        .get(format!("{}/projects/{}/latestrelease", HANGAR_API_URL, project))
        .send()
        .await?;
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let name = response.error_for_status()?.text().await?;
    Ok(Some(name.trim().to_owned()))
}

pub async fn fetch_project_version(
    client: &Client,
    project: &str,
    version: &str,
) -> crate::Result<Option<ProjectVersion>> {
    let response = client
        .get(format!(
            "{}/projects/{}/versions/{}",
            HANGAR_API_URL, project, version
        ))
        .send()
        .await?;
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    Ok(Some(response.error_for_status()?.json().await?))
}

pub async fn fetch_paper_project(client: &Client, project: &str) -> crate::Result<PaperProject> {
    Ok(client
        .get(format!("{}/projects/{}", PAPER_API_URL, project))
        .send()
        .await?
        .json()
        .await?)
}

pub async fn fetch_paper_builds(
    client: &Client,
    project: &str,
    version: &str,
) -> crate::Result<PaperBuilds> {
    Ok(client
        .get(format!(
            "{}/projects/{}/versions/{}/builds",
            PAPER_API_URL, project, version
        ))
        .send()
        .await?
        .json()
        .await?)
}

pub fn paper_download_url(project: &str, version: &str, build: u32, file: &str) -> String {
    format!(
        "{}/projects/{}/versions/{}/builds/{}/downloads/{}",
        PAPER_API_URL, project, version, build, file
    )
}

pub async fn fetch_loader_versions(client: &Client) -> crate::Result<Vec<LoaderVersion>> {
    Ok(client
        .get(format!("{}/versions/loader", FABRIC_META_URL))
        .send()
        .await?
        .json()
        .await?)
}

pub async fn fetch_installer_versions(client: &Client) -> crate::Result<Vec<InstallerVersion>> {
    Ok(client
        .get(format!("{}/versions/installer", FABRIC_META_URL))
        .send()
        .await?
        .json()
        .await?)
}

pub async fn fetch_game_versions(client: &Client) -> crate::Result<Vec<GameVersion>> {
    Ok(client
        .get(format!("{}/versions/game", FABRIC_META_URL))
        .send()
        .await?
        .json()
        .await?)
}

pub fn fabric_server_jar_url(game: &str, loader: &str, installer: &str) -> String {
    format!(
        "{}/versions/loader/{}/{}/{}/server/jar",
        FABRIC_META_URL, game, loader, installer
    )
}
