//! Extraction tool invocation
//!
//! Shells out to a yt-dlp compatible tool asking it to identify the target
//! and write one `.info.json` per item without downloading any media. Each
//! run gets its own working directory under the configured temp root, named
//! by a random integer, and the directory is removed on every exit path.
//!
//! Install yt-dlp:
//! - Windows: `winget install yt-dlp`
//! - macOS: `brew install yt-dlp`
//! - Linux: `pipx install yt-dlp` or your distribution's package

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, SystemTime};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;

use super::dto::InfoJson;
use crate::resolve::domain::ResolveError;

/// Suffix of the metadata files written by the tool.
pub const INFO_JSON_SUFFIX: &str = ".info.json";

/// Identify only, write metadata, never download. `%(id)s` keeps file names
/// short and unique per item.
const BASE_ARGS: [&str; 4] = [
    "--output",
    "%(id)s.%(ext)s",
    "--write-info-json",
    "--skip-download",
];

/// How to run the extraction tool.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Executable name or path
    pub program: String,
    /// Arguments placed before ours (e.g. `["-m", "yt_dlp"]` for `python3`)
    pub program_args: Vec<String>,
    /// Parent of the per-invocation working directories
    pub temp_root: PathBuf,
    /// Deadline for a single invocation
    pub timeout: Duration,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            program: "yt-dlp".to_string(),
            program_args: Vec::new(),
            temp_root: std::env::temp_dir().join("jukebox-resolver"),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Runs the extraction tool and collects the documents it writes.
pub struct YtDlp {
    config: ExtractorConfig,
}

impl YtDlp {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Arguments for one run, after `program_args`.
    ///
    /// Provider flags become `--key` (plus `value` when non-blank). The
    /// target follows `--` so user input can never be read as an option.
    pub fn command_args(&self, target: &str, extra_args: &[(&str, &str)]) -> Vec<String> {
        let mut args: Vec<String> = BASE_ARGS.iter().map(|s| s.to_string()).collect();
        for (key, value) in extra_args {
            args.push(format!("--{key}"));
            if !value.trim().is_empty() {
                args.push(value.to_string());
            }
        }
        args.push("--".to_string());
        args.push(target.to_string());
        args
    }

    /// Run the tool on `target` and return every leaf document it wrote,
    /// oldest file first.
    ///
    /// Only failing to create the working directory, failing to start the
    /// tool, or missing the deadline are errors. A non-zero exit status is
    /// logged and whatever was written is still returned.
    pub async fn invoke(
        &self,
        target: &str,
        extra_args: &[(&str, &str)],
    ) -> Result<Vec<InfoJson>, ResolveError> {
        let workdir = WorkingDirectory::create(&self.config.temp_root)?;
        let args = self.command_args(target, extra_args);

        tracing::info!("Resolving {:?} with {}", target, self.config.program);
        tracing::debug!(
            "Running in {:?}: {} {} {}",
            workdir.path(),
            self.config.program,
            self.config.program_args.join(" "),
            args.join(" ")
        );

        let mut child = Command::new(&self.config.program)
            .args(&self.config.program_args)
            .args(&args)
            .current_dir(workdir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ResolveError::Spawn {
                program: self.config.program.clone(),
                source,
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match tokio::time::timeout(self.config.timeout, child.wait()).await {
            Ok(status) => status.map_err(|source| ResolveError::Spawn {
                program: self.config.program.clone(),
                source,
            })?,
            Err(_) => {
                // Reap the child before the working directory is removed
                if let Err(e) = child.kill().await {
                    tracing::warn!("Failed to kill {}: {}", self.config.program, e);
                }
                return Err(ResolveError::Timeout {
                    what: self.config.program.clone(),
                    after: self.config.timeout,
                });
            }
        };

        let stdout = String::from_utf8_lossy(&stdout.await.unwrap_or_default()).into_owned();
        let stderr = String::from_utf8_lossy(&stderr.await.unwrap_or_default()).into_owned();
        tracing::debug!("{} stdout: {}", self.config.program, stdout.trim());
        if !status.success() {
            tracing::warn!(
                "{} exited with {}: {}",
                self.config.program,
                status,
                stderr.trim()
            );
        } else if !stderr.trim().is_empty() {
            tracing::debug!("{} stderr: {}", self.config.program, stderr.trim());
        }

        let dir = workdir.path().to_path_buf();
        let docs = tokio::task::spawn_blocking(move || collect_documents(&dir))
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Reading extractor output failed: {}", e);
                Vec::new()
            });

        tracing::debug!("{} document(s) for {:?}", docs.len(), target);
        Ok(docs)
    }

    /// `<tool> --version`, for diagnostics.
    pub async fn version(&self) -> Option<String> {
        let run = Command::new(&self.config.program)
            .args(&self.config.program_args)
            .arg("--version")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        tokio::time::timeout(Duration::from_secs(10), run)
            .await
            .ok()?
            .ok()
            .filter(|o| o.status.success())
            .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
    }
}

/// Read a child pipe to the end on its own task, so a chatty tool never
/// blocks on a full pipe while we wait for it.
fn drain<R>(pipe: Option<R>) -> JoinHandle<Vec<u8>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe
            && let Err(e) = pipe.read_to_end(&mut buf).await
        {
            tracing::debug!("Failed to read extractor output: {}", e);
        }
        buf
    })
}

/// A per-invocation directory, removed when dropped.
///
/// Dropping also covers early returns, panics and cancelled futures, so
/// cleanup does not depend on the happy path.
#[derive(Debug)]
pub struct WorkingDirectory {
    path: PathBuf,
}

impl WorkingDirectory {
    /// Create a fresh randomly named directory under `root`.
    pub fn create(root: &Path) -> Result<Self, ResolveError> {
        Self::create_named(root, &rand::random::<u64>().to_string())
    }

    /// Create `root/name`, failing if it already exists.
    pub fn create_named(root: &Path, name: &str) -> Result<Self, ResolveError> {
        std::fs::create_dir_all(root).map_err(|source| ResolveError::WorkingDirectory {
            path: root.to_path_buf(),
            source,
        })?;

        let path = root.join(name);
        // create_dir (not create_dir_all) so a name collision is an error
        std::fs::create_dir(&path)
            .map_err(|source| ResolveError::WorkingDirectory { path: path.clone(), source })?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WorkingDirectory {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!("Failed to remove working directory {:?}: {}", self.path, e);
        }
    }
}

/// Read every `.info.json` in `dir`, oldest first, skipping playlists and
/// anything unreadable.
fn collect_documents(dir: &Path) -> Vec<InfoJson> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Could not list {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut files: Vec<(SystemTime, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(INFO_JSON_SUFFIX))
        .map(|entry| {
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, entry.path())
        })
        .collect();

    // Playlist items are written in order; ties fall back to the name
    files.sort();

    files
        .into_iter()
        .filter_map(|(_, path)| read_document(&path))
        .collect()
}

/// Parse one metadata file; `None` for containers and malformed files.
fn read_document(path: &Path) -> Option<InfoJson> {
    let contents = std::fs::read_to_string(path)
        .inspect_err(|e| tracing::warn!("Skipping unreadable {:?}: {}", path, e))
        .ok()?;

    let doc: InfoJson = serde_json::from_str(&contents)
        .inspect_err(|e| tracing::warn!("Skipping malformed {:?}: {}", path, e))
        .ok()?;

    if doc.is_playlist() {
        tracing::debug!("Skipping playlist container {:?}", path);
        return None;
    }

    if doc.url().is_none() {
        tracing::warn!("Skipping {:?}: no URL in document", path);
        return None;
    }

    Some(doc)
}
