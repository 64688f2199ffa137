//! Settings loading and hot-reloading.
//!
//! Settings are read from RON files in `data/settings`. With several files
//! present the first one (by name) that parses wins; with none the defaults
//! are used.
use crate::ron_loader::{load_ron_files, setup_ron_watcher};
use crate::settings::Settings;
use bevy::log::info;
use bevy::prelude::{Res, ResMut, Resource};

pub const SETTINGS_DIR: &str = "data/settings";

#[derive(Resource)]
pub struct SettingsWatcher(pub crate::ron::RonWatcher);

impl SettingsWatcher {
    #[must_use]
    pub fn stub() -> Self {
        SettingsWatcher(crate::ron::RonWatcher::stub())
    }
}

/// Load settings from the directory `path`, falling back to defaults.
///
/// # Example
/// ```
/// let settings = pixelcide::settings::loader::load_settings_from_dir("data/settings");
/// assert!(settings.network.update_rate_hz > 0.0);
/// ```
#[must_use]
pub fn load_settings_from_dir(path: &str) -> Settings {
    load_ron_files::<Settings>(path).into_iter().next().unwrap_or_else(|| {
        info!("no settings found in '{path}', using defaults");
        Settings::default()
    })
}

/// Create a watcher for the settings directory (hot-reload).
///
/// # Errors
/// Returns a `notify::Error` if the directory cannot be watched.
pub fn setup_settings_watcher(path: &str) -> Result<SettingsWatcher, notify::Error> {
    setup_ron_watcher(path).map(SettingsWatcher)
}

/// Reload the settings resource when files change.
#[allow(clippy::needless_pass_by_value)]
pub fn check_settings_changes(watcher: Res<SettingsWatcher>, mut settings: ResMut<Settings>) {
    if watcher.0.take_changed() {
        info!("settings changed, reloading");
        *settings = load_settings_from_dir(SETTINGS_DIR);
    }
}
