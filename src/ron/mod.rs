//! Utilities for loading RON files and watching directories for changes.
//!
//! Block definitions and client settings live in small RON files under
//! `data/`. This module reads every `.ron` file of a directory into a typed
//! value and offers a watcher resource whose shared flag flips to `true` when
//! something in that directory is modified, so systems can reload on the fly.

use bevy::log::{debug, warn};
use bevy::prelude::Resource;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// File-watcher resource for RON hot-reload.
#[derive(Resource)]
pub struct RonWatcher {
    pub changed: Arc<Mutex<bool>>, // Set to `true` by the OS watcher thread, cleared by the consumer.
    _watcher: Option<RecommendedWatcher>, // Kept alive for the lifetime of the resource.
}

impl RonWatcher {
    /// A watcher with no OS backing; `changed` never flips on its own.
    ///
    /// Used as the fallback when the platform watcher cannot be created.
    #[must_use]
    pub fn stub() -> Self {
        RonWatcher {
            changed: Arc::new(Mutex::new(false)),
            _watcher: None,
        }
    }

    /// Read and clear the change flag.
    ///
    /// # Return
    /// `true` when at least one modification was observed since the last call.
    pub fn take_changed(&self) -> bool {
        let mut flag = match self.changed.lock() {
            Ok(flag) => flag,
            Err(poisoned) => {
                warn!("ron watcher mutex poisoned, recovering");
                poisoned.into_inner()
            }
        };
        std::mem::replace(&mut *flag, false)
    }
}

/// Load all `.ron` files from a directory and deserialize them into `T`.
///
/// Files are visited in name order so the result is stable across runs.
///
/// # Arguments
/// * `path` - Directory path to scan for `.ron` files.
///
/// # Return
/// Every successfully parsed item. Unreadable or malformed files are logged
/// and skipped; a missing directory yields an empty vector.
#[must_use]
pub fn load_ron_files<T: DeserializeOwned>(path: &str) -> Vec<T> {
    let Ok(entries) = std::fs::read_dir(path) else {
        debug!("ron directory '{path}' not found, nothing to load");
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    files.sort();

    let mut items = Vec::with_capacity(files.len());
    for file in files {
        match std::fs::read_to_string(&file) {
            Ok(content) => match ron::from_str::<T>(&content) {
                Ok(item) => items.push(item),
                Err(e) => warn!("failed to parse {}: {e}", file.display()),
            },
            Err(e) => warn!("failed to read {}: {e}", file.display()),
        }
    }

    items
}

/// Create a `RonWatcher` that watches a directory for modifications.
///
/// # Arguments
/// * `path` - Directory path to watch for `.ron` file changes.
///
/// # Errors
/// Returns a `notify::Error` if the platform watcher cannot be created or the
/// directory cannot be registered.
pub fn setup_ron_watcher(path: &str) -> Result<RonWatcher, notify::Error> {
    let changed = Arc::new(Mutex::new(false));
    let changed_clone = Arc::clone(&changed);
    let watched_path: PathBuf = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, notify::EventKind::Modify(_) | notify::EventKind::Create(_)) {
                    return;
                }
                let relevant = event.paths.iter().any(|p| {
                    let p_canon = std::fs::canonicalize(p).unwrap_or_else(|_| p.clone());
                    p_canon.starts_with(&watched_path)
                });
                if relevant {
                    match changed_clone.lock() {
                        Ok(mut flag) => *flag = true,
                        Err(poisoned) => *poisoned.into_inner() = true,
                    }
                }
            }
            Err(e) => warn!("watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(Path::new(path), RecursiveMode::NonRecursive)?;
    Ok(RonWatcher { changed, _watcher: Some(watcher) })
}
