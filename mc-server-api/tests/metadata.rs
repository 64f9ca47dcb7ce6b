use mc_server_api::{
    metadata::{
        fabric::{GameVersion, InstallerVersion, LoaderVersion},
        hangar::{Category, Platform, ProjectVersion, ProjectsPage},
        manifest::VersionsManifest,
        paper::{BuildChannel, PaperBuilds, PaperProject},
    },
    resources::{fabric_server_jar_url, paper_download_url},
};

static PROJECTS_PAGE: &str = r#"{
    "pagination": { "limit": 5, "offset": 0, "count": 3 },
    "result": [
        {
            "createdAt": "2022-12-22T14:04:48.773082Z",
            "name": "WorldEdit",
            "namespace": { "owner": "EngineHub", "slug": "WorldEdit" },
            "stats": {
                "views": 1271,
                "downloads": 530,
                "recentViews": 12,
                "recentDownloads": 5,
                "stars": 4,
                "watchers": 3
            },
            "category": "world_management",
            "lastUpdated": "2023-02-06T14:23:48.229920Z",
            "visibility": "public",
            "avatarUrl": "https://hangar.papermc.io/api/internal/avatar/project/1.webp",
            "description": "In-game world editing"
        },
        {
            "name": "Oddball",
            "category": "left_field_experiments",
            "visibility": "public"
        },
        {
            "name": "Hidden",
            "visibility": "needsApproval"
        }
    ]
}"#;

static PROJECT_VERSION: &str = r#"{
    "createdAt": "2023-01-11T09:30:00.000000Z",
    "name": "7.2.15",
    "description": "Bug fixes",
    "author": "EngineHub",
    "channel": { "name": "Release", "color": "00E1E1" },
    "downloads": {
        "PAPER": {
            "fileInfo": {
                "name": "worldedit-bukkit-7.2.15.jar",
                "sizeBytes": 5204618,
                "sha256Hash": "6c9edcd1e86fcbbd2c51672c5f43884bcf2b3e4011768a95f86e9c6ffe7e0f04"
            },
            "externalUrl": null,
            "downloadUrl": "https://hangar.papermc.io/api/v1/projects/WorldEdit/versions/7.2.15/PAPER/download"
        }
    },
    "platformDependencies": { "PAPER": ["1.19", "1.19.2", "1.19.3"] }
}"#;

#[test]
fn parse_projects_page() {
    let page: ProjectsPage = serde_json::from_str(PROJECTS_PAGE).unwrap();
    assert_eq!(page.pagination.count, 3);
    assert_eq!(page.result.len(), 3);

    let worldedit = &page.result[0];
    assert_eq!(worldedit.name.as_deref(), Some("WorldEdit"));
    assert_eq!(worldedit.category, Some(Category::WorldManagement));
    assert_eq!(worldedit.stats.unwrap().downloads, 530);
    assert_eq!(worldedit.namespace.as_ref().unwrap().owner, "EngineHub");

    // unknown categories fall back instead of failing the whole page
    assert_eq!(page.result[1].category, Some(Category::Misc));

    let hidden = &page.result[2];
    assert!(hidden.description.is_none());
    assert!(hidden.stats.is_none());
    assert!(hidden.created_at.is_none());
}

#[test]
fn parse_project_version() {
    let version: ProjectVersion = serde_json::from_str(PROJECT_VERSION).unwrap();
    assert_eq!(version.name, "7.2.15");
    assert_eq!(version.channel.as_ref().unwrap().name, "Release");

    let download = version.download_for(Platform::Paper).unwrap();
    let info = download.file_info.as_ref().unwrap();
    assert_eq!(info.name, "worldedit-bukkit-7.2.15.jar");
    assert_eq!(info.size_bytes, 5204618);
    assert!(download.download_url.is_some());
    assert!(download.external_url.is_none());
    assert!(version.download_for(Platform::Velocity).is_none());
}

#[test]
fn game_version_support() {
    let version: ProjectVersion = serde_json::from_str(PROJECT_VERSION).unwrap();
    assert!(version.supports(Platform::Paper, "1.19.2"));
    assert!(!version.supports(Platform::Paper, "1.18"));
    // no dependency declaration for the platform means no rejection
    assert!(version.supports(Platform::Velocity, "1.18"));
}

#[test]
fn parse_versions_manifest() {
    let manifest: VersionsManifest = serde_json::from_str(
        r#"{
            "latest": { "release": "1.20.1", "snapshot": "23w31a" },
            "versions": [
                {
                    "id": "23w31a",
                    "type": "snapshot",
                    "url": "https://piston-meta.mojang.com/v1/packages/a/23w31a.json",
                    "time": "2023-08-01T11:03:13+00:00",
                    "releaseTime": "2023-08-01T10:03:13+00:00"
                },
                {
                    "id": "1.20.1",
                    "type": "release",
                    "url": "https://piston-meta.mojang.com/v1/packages/b/1.20.1.json",
                    "time": "2023-06-12T13:25:51+00:00",
                    "releaseTime": "2023-06-12T13:25:51+00:00"
                }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(manifest.latest_release().unwrap().id, "1.20.1");
    assert_eq!(manifest.latest_snapshot().unwrap().id, "23w31a");
    assert!(manifest.get_version("1.8.9").is_none());
    assert_eq!(manifest.releases().count(), 1);
}

#[test]
fn parse_paper_project_and_builds() {
    let project: PaperProject = serde_json::from_str(
        r#"{
            "project_id": "paper",
            "project_name": "Paper",
            "version_groups": ["1.19", "1.20"],
            "versions": ["1.19.4", "1.20", "1.20.1"]
        }"#,
    )
    .unwrap();
    assert_eq!(project.newest_version(), Some("1.20.1"));
    assert!(project.has_version("1.19.4"));
    assert!(!project.has_version("1.8.8"));

    let builds: PaperBuilds = serde_json::from_str(
        r#"{
            "project_id": "paper",
            "project_name": "Paper",
            "version": "1.20.1",
            "builds": [
                {
                    "build": 45,
                    "time": "2023-07-08T12:06:46.610Z",
                    "channel": "default",
                    "promoted": false,
                    "downloads": {
                        "application": {
                            "name": "paper-1.20.1-45.jar",
                            "sha256": "7f2b8fc94d89364f8cdb2969c9e9ecf569c1b5112d0c3b27c79e4b16a3aff053"
                        }
                    }
                },
                {
                    "build": 46,
                    "time": "2023-07-09T18:13:31.577Z",
                    "channel": "experimental",
                    "promoted": false,
                    "downloads": {
                        "application": {
                            "name": "paper-1.20.1-46.jar",
                            "sha256": "90cbee15889b812f4e6e83e46c0097e213f4544f2c1a2d45f61ac317b83dcd17"
                        }
                    }
                }
            ]
        }"#,
    )
    .unwrap();

    let latest = builds.latest().unwrap();
    assert_eq!(latest.build, 46);
    assert_eq!(latest.channel, BuildChannel::Experimental);
    let stable = builds.latest_stable().unwrap();
    assert_eq!(stable.build, 45);
    assert_eq!(stable.application().unwrap().name, "paper-1.20.1-45.jar");
}

#[test]
fn parse_fabric_versions() {
    let loaders: Vec<LoaderVersion> = serde_json::from_str(
        r#"[
            { "separator": ".", "build": 2, "maven": "net.fabricmc:fabric-loader:0.15.0", "version": "0.15.0", "stable": false },
            { "separator": ".", "build": 21, "maven": "net.fabricmc:fabric-loader:0.14.21", "version": "0.14.21", "stable": true }
        ]"#,
    )
    .unwrap();
    assert_eq!(
        loaders.iter().find(|loader| loader.stable).unwrap().version,
        "0.14.21"
    );

    let installers: Vec<InstallerVersion> = serde_json::from_str(
        r#"[
            { "url": "https://maven.fabricmc.net/net/fabricmc/fabric-installer/0.11.2/fabric-installer-0.11.2.jar", "maven": "net.fabricmc:fabric-installer:0.11.2", "version": "0.11.2", "stable": true }
        ]"#,
    )
    .unwrap();
    assert!(installers[0].stable);

    let games: Vec<GameVersion> = serde_json::from_str(
        r#"[
            { "version": "1.20.2-rc1", "stable": false },
            { "version": "1.20.1", "stable": true }
        ]"#,
    )
    .unwrap();
    assert_eq!(
        games.iter().find(|game| game.stable).unwrap().version,
        "1.20.1"
    );
}

#[test]
fn download_url_builders() {
    assert_eq!(
        paper_download_url("paper", "1.20.1", 46, "paper-1.20.1-46.jar"),
        "https://api.papermc.io/v2/projects/paper/versions/1.20.1/builds/46/downloads/paper-1.20.1-46.jar"
    );
    assert_eq!(
        fabric_server_jar_url("1.20.1", "0.14.21", "0.11.2"),
        "https://meta.fabricmc.net/v2/versions/loader/1.20.1/0.14.21/0.11.2/server/jar"
    );
}
