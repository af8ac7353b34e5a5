use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{MediaError, MediaKind, MediaResult};

/// Answers "does this media file exist?".
///
/// `Ok(false)` means the file is absent. `Err` means the check itself
/// could not be completed and the answer is unknown.
#[async_trait]
pub trait MediaExistence: Send + Sync {
    async fn exists(&self, kind: MediaKind, filename: &str) -> MediaResult<bool>;
}

/// File details reported by the check endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct MediaInfo {
    pub filename: String,
    pub path: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    /// Public path the file is served under.
    pub url: String,
}

/// Media laid out on disk:
///
/// ```text
/// {root}/images/projects/*   → /images/projects/*
/// {root}/images/*            → /images/*
/// {root}/images/gifs/*       → /gifs/*
/// ```
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory mounted at `/images`.
    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    /// Directory mounted at `/gifs`.
    pub fn gifs_dir(&self) -> PathBuf {
        self.root.join("images").join("gifs")
    }

    fn locations(&self, kind: MediaKind) -> Vec<(PathBuf, &'static str)> {
        match kind {
            MediaKind::Image => vec![
                (self.images_dir().join("projects"), "/images/projects"),
                (self.images_dir(), "/images"),
            ],
            MediaKind::Animated => vec![(self.gifs_dir(), "/gifs")],
        }
    }

    /// Every path `stat` looks at, in order.
    pub fn candidate_paths(&self, kind: MediaKind, filename: &str) -> Vec<PathBuf> {
        self.locations(kind)
            .into_iter()
            .map(|(dir, _)| dir.join(filename))
            .collect()
    }

    /// First matching file for `kind`, `None` when absent everywhere.
    pub async fn stat(&self, kind: MediaKind, filename: &str) -> MediaResult<Option<MediaInfo>> {
        validate_filename(filename)?;

        for (dir, url_prefix) in self.locations(kind) {
            let path = dir.join(filename);
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => {
                    return Ok(Some(MediaInfo {
                        filename: filename.to_string(),
                        path: path.display().to_string(),
                        size: meta.len(),
                        created: meta.created().ok().map(DateTime::<Utc>::from),
                        modified: meta.modified().ok().map(DateTime::<Utc>::from),
                        url: format!("{url_prefix}/{filename}"),
                    }));
                }
                Ok(_) => continue,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "media stat failed");
                    return Err(err.into());
                }
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl MediaExistence for FsMediaStore {
    async fn exists(&self, kind: MediaKind, filename: &str) -> MediaResult<bool> {
        Ok(self.stat(kind, filename).await?.is_some())
    }
}

/// A single path segment; nothing that could walk out of the media root.
pub fn validate_filename(filename: &str) -> MediaResult<()> {
    if filename.is_empty() {
        return Err(MediaError::invalid("filename must not be empty"));
    }
    if filename == "." || filename == ".." {
        return Err(MediaError::invalid(format!("'{filename}' is not a file name")));
    }
    if filename.contains(['/', '\\', '\0']) {
        return Err(MediaError::invalid(format!(
            "'{}' must not contain path separators",
            filename.escape_default()
        )));
    }
    Ok(())
}
