use std::{
    fmt::Debug,
    path::Path,
    sync::atomic::{AtomicU64, Ordering},
};

use reqwest::{Client, IntoUrl};
use tokio::{
    fs::{self, create_dir_all, File},
    io::{AsyncWrite, AsyncWriteExt, BufWriter},
};
use tracing::{debug, info, instrument, trace};

#[derive(Debug, Default)]
pub struct Manager {
    client: Client,
    downloaded_bytes: AtomicU64,
}

impl Manager {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            downloaded_bytes: AtomicU64::new(0),
        }
    }

    pub fn downloaded_bytes(&self) -> u64 {
        self.downloaded_bytes.load(Ordering::Relaxed)
    }

    #[instrument(skip(self, writer))]
    pub async fn download<U, W>(&self, url: U, writer: &mut W) -> crate::Result<()>
    where
        U: IntoUrl + Debug,
        W: AsyncWrite + Unpin + Debug,
    {
        let mut response = self.client.get(url).send().await?.error_for_status()?;
        debug!(?response, "Remote responded");
        while let Some(chunk) = response.chunk().await? {
            let len = chunk.len();
            trace!(len, "New chunk arrived");
            writer.write_all(&chunk).await?;
            self.downloaded_bytes
                .fetch_add(len as u64, Ordering::Relaxed);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn download_file<U, P>(&self, url: U, path: P) -> crate::Result<()>
    where
        U: IntoUrl + Debug,
        P: AsRef<Path> + Debug,
    {
        const BUF_SIZE: usize = 1024 * 1024; //  1mb

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            create_dir_all(parent).await?;
        }
        let file = File::create(&path).await?;
        let mut output = BufWriter::with_capacity(BUF_SIZE, file);
        self.download(url, &mut output).await?;
        output.flush().await?;

        Ok(())
    }

    /// Skips the transfer when the file already exists with the expected size,
    /// unless `force` is set. Returns whether a transfer happened.
    #[instrument(skip(self))]
    pub async fn download_file_if_absent<U, P>(
        &self,
        url: U,
        path: P,
        expected_size: Option<u64>,
        force: bool,
    ) -> crate::Result<bool>
    where
        U: IntoUrl + Debug,
        P: AsRef<Path> + Debug,
    {
        let path = path.as_ref();
        if !force && validate_file(path, expected_size).await? {
            info!(?path, "File already exists");
            return Ok(false);
        }
        self.download_file(url, path).await?;
        info!(?path, "File downloaded");
        Ok(true)
    }
}

async fn validate_file(path: &Path, expected_size: Option<u64>) -> crate::Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    match expected_size {
        Some(expected) => {
            let metadata = fs::metadata(path).await?;
            Ok(metadata.len() == expected)
        }
        None => Ok(true),
    }
}
