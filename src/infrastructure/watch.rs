//! Filesystem watch subscription (via `notify`)
//!
//! Recursive watch of the project root. Build artifacts and user ignore
//! patterns are filtered out, and so are events that leave file content
//! unchanged (editor auto-save noise).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use sha2::{Digest, Sha256};

use crate::config::BUILD_ARTIFACT_DIR;
use crate::error::{StagehandError, StagehandResult};

/// Decides which paths under the root are watched
#[derive(Debug, Clone)]
pub struct WatchFilter {
    root: PathBuf,
    ignore: Gitignore,
}

impl WatchFilter {
    /// Always excludes the build-artifact directory, plus `patterns`
    /// (gitignore syntax, relative to `root`).
    pub fn new(root: &Path, patterns: &[String]) -> StagehandResult<Self> {
        let mut builder = GitignoreBuilder::new(root);
        let lines = std::iter::once(format!("{BUILD_ARTIFACT_DIR}/"))
            .chain(patterns.iter().cloned());
        for line in lines {
            builder
                .add_line(None, &line)
                .map_err(|e| StagehandError::Watch {
                    path: root.to_path_buf(),
                    message: format!("invalid ignore pattern '{line}': {e}"),
                })?;
        }
        let ignore = builder.build().map_err(|e| StagehandError::Watch {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self {
            root: root.to_path_buf(),
            ignore,
        })
    }

    /// True when `path` or any directory above it (up to the root) is excluded
    pub fn is_ignored(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };

        let mut current = Some(relative);
        let mut is_dir = path.is_dir();
        while let Some(candidate) = current {
            if candidate.as_os_str().is_empty() {
                break;
            }
            if self.ignore.matched(candidate, is_dir).is_ignore() {
                return true;
            }
            current = candidate.parent();
            is_dir = true;
        }
        false
    }
}

/// Remembers the last seen content hash per file
#[derive(Debug, Default)]
pub struct ContentTracker {
    hashes: HashMap<PathBuf, String>,
}

impl ContentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current content of `path`; true when it differs from last time.
    ///
    /// Unreadable paths (deleted files, directories) always count as changed.
    pub fn observe(&mut self, path: &Path) -> bool {
        match std::fs::read(path) {
            Ok(bytes) => {
                let hash = compute_content_hash(&bytes);
                match self.hashes.insert(path.to_path_buf(), hash.clone()) {
                    Some(previous) => previous != hash,
                    None => true,
                }
            }
            Err(_) => {
                self.hashes.remove(path);
                true
            }
        }
    }
}

pub fn compute_content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

fn is_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Any | EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// Live watch subscription. Dropping it stops the watch.
pub struct FsWatch {
    _watcher: RecommendedWatcher,
}

/// Start watching `root` recursively, calling `on_change` once per changed path.
///
/// Returns once the subscription is established (the "ready" point).
pub fn subscribe<F>(root: &Path, filter: WatchFilter, mut on_change: F) -> StagehandResult<FsWatch>
where
    F: FnMut(PathBuf) + Send + 'static,
{
    let mut tracker = ContentTracker::new();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) if is_change(&event.kind) => {
                for path in event.paths {
                    if filter.is_ignored(&path) {
                        continue;
                    }
                    if !tracker.observe(&path) {
                        tracing::trace!(path = %path.display(), "content unchanged, skipping");
                        continue;
                    }
                    on_change(path);
                }
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("watch error: {e}"),
        },
        Config::default(),
    )
    .map_err(|e| StagehandError::Watch {
        path: root.to_path_buf(),
        message: e.to_string(),
    })?;

    watcher
        .watch(root, RecursiveMode::Recursive)
        .map_err(|e| StagehandError::Watch {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!(root = %root.display(), "watch subscription ready");
    Ok(FsWatch { _watcher: watcher })
}
