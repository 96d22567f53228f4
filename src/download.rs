//! Jar download
//!
//! Fetches a single artifact over HTTP(S) into the fixture layout's jar
//! directory. A destination that already exists is never touched; the caller
//! is told about it through [`DownloadOutcome::AlreadyExists`].
//!
//! The body is streamed into a sibling `.part` file and renamed into place
//! once complete, so an interrupted transfer cannot leave a truncated jar at
//! the destination.

use crate::artifact::jar_file_name;
use crate::error::{Error, Result};
use crate::layout::FixtureLayout;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Bytes written to disk per write call.
pub const CHUNK_SIZE: usize = 1024;

/// Process exit code used when the destination jar is already present.
pub const EXIT_ALREADY_EXISTS: i32 = 255;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

const USER_AGENT: &str = concat!("iceberg-fixtures/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded { path: PathBuf, bytes: u64 },
    AlreadyExists(PathBuf),
}

impl DownloadOutcome {
    pub fn path(&self) -> &Path {
        match self {
            DownloadOutcome::Downloaded { path, .. } => path,
            DownloadOutcome::AlreadyExists(path) => path,
        }
    }
}

pub struct JarDownloader {
    client: Client,
    show_progress: bool,
}

impl JarDownloader {
    /// Certificate verification stays at reqwest's default (enabled).
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Destination of `url` inside the layout's jar directory.
    pub fn destination(url: &str, layout: &FixtureLayout) -> Result<PathBuf> {
        Ok(layout.jar_path(&jar_file_name(url)?))
    }

    pub async fn download(&self, url: &str, layout: &FixtureLayout) -> Result<DownloadOutcome> {
        let dest = Self::destination(url, layout)?;
        if dest.is_file() {
            info!("File already exists: {}", dest.display());
            return Ok(DownloadOutcome::AlreadyExists(dest));
        }

        fs::create_dir_all(layout.jar_dir()).await?;

        let part = part_path(&dest);
        let result = async {
            let bytes = self.stream_to(url, &part).await?;
            fs::rename(&part, &dest).await?;
            Ok::<u64, Error>(bytes)
        }
        .await;
        let bytes = match result {
            Ok(bytes) => bytes,
            Err(e) => {
                let _ = fs::remove_file(&part).await;
                return Err(e);
            }
        };

        info!("Jar downloaded to: {} ({} bytes)", dest.display(), bytes);
        Ok(DownloadOutcome::Downloaded { path: dest, bytes })
    }

    async fn stream_to(&self, url: &str, part: &Path) -> Result<u64> {
        debug!("Downloading {} to {}", url, part.display());

        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let progress = self.progress_bar(response.content_length());
        let mut file = fs::File::create(part).await?;
        let mut written: u64 = 0;

        while let Some(chunk) = response.chunk().await? {
            if chunk.is_empty() {
                continue;
            }
            for piece in chunk.chunks(CHUNK_SIZE) {
                file.write_all(piece).await?;
            }
            written += chunk.len() as u64;
            progress.set_position(written);
        }

        file.flush().await?;
        file.sync_all().await?;
        progress.finish_and_clear();

        debug!("Received {} bytes from {}", written, url);
        Ok(written)
    }

    fn progress_bar(&self, total: Option<u64>) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        match total {
            Some(len) => {
                let bar = ProgressBar::new(len);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.cyan} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("#>-"),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.cyan} {bytes} received")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            }
        }
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}
