//! Camera look and cursor helpers.
//!
//! `PlayerLook` holds yaw and pitch; the movement code reads its look and
//! right vectors to turn key input into a world-space direction.
//! `camera_look` applies accumulated mouse motion, `cursor_grab` locks and
//! releases the cursor.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::player::KineticBody;
use crate::settings::{ControlsSettings, Settings};

const CAMERA_MAX_PITCH_DEG: f32 = 85.0;

/// The player's look orientation in radians.
///
/// - `yaw`: rotation around the Y axis, `0` looks down `-Z`.
/// - `pitch`: rotation around the X axis, clamped short of straight up/down.
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct PlayerLook {
    pub yaw: f32,
    pub pitch: f32,
}

impl PlayerLook {
    /// Apply a raw mouse delta (updates yaw/pitch and clamps pitch).
    pub fn apply_delta(&mut self, delta: Vec2, controls: &ControlsSettings) {
        let max_pitch = CAMERA_MAX_PITCH_DEG.to_radians();
        let scale = controls.mouse_sensitivity / 10000.0;

        self.yaw -= delta.x * scale;
        self.pitch = (self.pitch - delta.y * scale).clamp(-max_pitch, max_pitch);
    }

    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Unit vector the camera looks along.
    #[must_use]
    pub fn look_vector(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Unit vector pointing to the camera's right.
    #[must_use]
    pub fn right_vector(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }
}

/// Apply mouse-look to the player while the cursor is captured.
#[allow(clippy::needless_pass_by_value)]
pub fn camera_look(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut motion_events: EventReader<MouseMotion>,
    mut query: Query<(&mut Transform, &mut PlayerLook), With<KineticBody>>,
    settings: Res<Settings>,
) {
    let controls = &settings.controls;
    let mut delta = Vec2::ZERO;
    for ev in motion_events.read() {
        let mut axis = ev.delta;
        if controls.invert_x { axis.x = -axis.x; }
        if controls.invert_y { axis.y = -axis.y; }
        delta += axis;
    }

    if delta == Vec2::ZERO {
        return;
    }

    let Ok(window) = windows.get_single() else { return };
    if window.cursor.visible {
        return;
    }

    for (mut transform, mut look) in &mut query {
        look.apply_delta(delta, controls);
        transform.rotation = look.rotation();
    }
}

/// Lock the cursor on left click, release it on the pause key.
#[allow(clippy::needless_pass_by_value)]
pub fn cursor_grab(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mb: Res<ButtonInput<MouseButton>>,
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    let Ok(mut window) = windows.get_single_mut() else { return };
    if mb.just_pressed(MouseButton::Left) {
        window.cursor.grab_mode = CursorGrabMode::Locked;
        window.cursor.visible = false;
    }

    if kb.just_pressed(settings.controls.key_for("pause", KeyCode::Escape)) {
        window.cursor.grab_mode = CursorGrabMode::None;
        window.cursor.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_look_faces_negative_z() {
        let look = PlayerLook::default();
        assert!((look.look_vector() - Vec3::NEG_Z).length() < 1e-6);
        assert!((look.right_vector() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn quarter_turn_left_faces_negative_x() {
        let look = PlayerLook { yaw: std::f32::consts::FRAC_PI_2, pitch: 0.0 };
        assert!((look.look_vector() - Vec3::NEG_X).length() < 1e-5);
        assert!((look.right_vector() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut look = PlayerLook::default();
        let controls = ControlsSettings::default();
        look.apply_delta(Vec2::new(0.0, -1.0e7), &controls);
        assert!((look.pitch - CAMERA_MAX_PITCH_DEG.to_radians()).abs() < 1e-6);
        look.apply_delta(Vec2::new(0.0, 1.0e7), &controls);
        assert!((look.pitch + CAMERA_MAX_PITCH_DEG.to_radians()).abs() < 1e-6);
    }
}
