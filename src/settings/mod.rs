//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are hot-reloadable
//! using the RON watcher utilities (see `ron::setup_ron_watcher`). Every field
//! has a serde default so partial files are fine.
use bevy::prelude::{KeyCode, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsSettings {
    #[serde(default = "GraphicsSettings::default_vsync")]
    pub vsync: bool, // Cap FPS to the display refresh rate.
    #[serde(default = "GraphicsSettings::default_effect_overlay")]
    pub effect_overlay: bool, // Tint the screen for death/teleport/explosion/fall effects.
}

impl GraphicsSettings {
    fn default_vsync() -> bool { true }
    fn default_effect_overlay() -> bool { true }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            vsync: Self::default_vsync(),
            effect_overlay: Self::default_effect_overlay(),
        }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default)]
    pub invert_y: bool,
    #[serde(default)]
    pub invert_x: bool,
    #[serde(default = "ControlsSettings::default_sensitivity")]
    pub mouse_sensitivity: f32,
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Action name -> key identifier
}

impl ControlsSettings {
    fn default_sensitivity() -> f32 { 20.0 }

    fn default_keybinds() -> HashMap<String, String> {
        [
            ("forward", "W"),
            ("back", "S"),
            ("left", "A"),
            ("right", "D"),
            ("jump", "Space"),
            ("sprint", "LShift"),
            ("kill", "K"),
            ("pause", "Escape"),
        ]
        .into_iter()
        .map(|(action, key)| (action.to_string(), key.to_string()))
        .collect()
    }

    /// Key bound to `action`, or `default` when unbound or unparsable.
    #[must_use]
    pub fn key_for(&self, action: &str, default: KeyCode) -> KeyCode {
        self.keybinds
            .get(action)
            .and_then(|name| keycode_from_str(name))
            .unwrap_or(default)
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            invert_y: false,
            invert_x: false,
            mouse_sensitivity: Self::default_sensitivity(),
            keybinds: Self::default_keybinds(),
        }
    }
}

/// Loopback feed standing in for the network while no server is attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    #[serde(default = "NetworkSettings::default_loopback_bots")]
    pub loopback_bots: u32, // Number of simulated remote players.
    #[serde(default = "NetworkSettings::default_update_rate")]
    pub update_rate_hz: f32, // Position updates per second per bot.
    #[serde(default = "NetworkSettings::default_jitter")]
    pub jitter: f32, // Arrival jitter as a fraction of the update interval.
}

impl NetworkSettings {
    fn default_loopback_bots() -> u32 { 3 }
    fn default_update_rate() -> f32 { 10.0 }
    fn default_jitter() -> f32 { 0.3 }

    /// Nominal seconds between two updates of one bot.
    #[must_use]
    pub fn update_interval(&self) -> f32 {
        1.0 / self.update_rate_hz.max(0.1)
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            loopback_bots: Self::default_loopback_bots(),
            update_rate_hz: Self::default_update_rate(),
            jitter: Self::default_jitter(),
        }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub graphics: GraphicsSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub network: NetworkSettings,
}

/// Convert a key identifier from `controls.keybinds` (e.g. "W", "Space",
/// "LShift", "F1") into a `KeyCode`.
#[must_use]
pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
    let s = name.to_ascii_uppercase();
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return match c {
            'A'..='Z' => letter_key(c),
            '0'..='9' => digit_key(c),
            _ => None,
        };
    }

    Some(match s.as_str() {
        "F1" => KeyCode::F1,
        "F2" => KeyCode::F2,
        "F3" => KeyCode::F3,
        "F4" => KeyCode::F4,
        "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
        "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
        "UP" | "ARROWUP" => KeyCode::ArrowUp,
        "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,
        "ESC" | "ESCAPE" => KeyCode::Escape,
        "SPACE" => KeyCode::Space,
        "TAB" => KeyCode::Tab,
        "ENTER" | "RETURN" => KeyCode::Enter,
        "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
        "RSHIFT" => KeyCode::ShiftRight,
        "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
        "RCTRL" => KeyCode::ControlRight,
        "LALT" | "ALT" => KeyCode::AltLeft,
        "RALT" => KeyCode::AltRight,
        _ => return None,
    })
}

fn letter_key(c: char) -> Option<KeyCode> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE,
        KeyCode::KeyF, KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ,
        KeyCode::KeyK, KeyCode::KeyL, KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO,
        KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR, KeyCode::KeyS, KeyCode::KeyT,
        KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX, KeyCode::KeyY,
        KeyCode::KeyZ,
    ];
    let index = (c as usize).checked_sub('A' as usize)?;
    LETTERS.get(index).copied()
}

fn digit_key(c: char) -> Option<KeyCode> {
    const DIGITS: [KeyCode; 10] = [
        KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
        KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
    ];
    let index = c.to_digit(10)?;
    DIGITS.get(usize::try_from(index).ok()?).copied()
}

pub mod loader;
