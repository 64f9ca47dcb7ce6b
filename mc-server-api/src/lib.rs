use std::{io, result};

pub mod download;
pub mod metadata;
pub mod plugin;
pub mod resources;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error("unknown game version {0}")]
    UnknownVersion(String),
}

pub type Result<T> = result::Result<T, Error>;
