use serde_derive::Deserialize;
use url::Url;

#[derive(Deserialize, Debug, Clone)]
pub struct LoaderVersion {
    pub separator: String,
    pub build: u32,
    pub maven: String,
    pub version: String,
    pub stable: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct InstallerVersion {
    pub url: Url,
    pub maven: String,
    pub version: String,
    pub stable: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GameVersion {
    pub version: String,
    pub stable: bool,
}
