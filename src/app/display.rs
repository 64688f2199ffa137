//! Display systems: the full-screen effect overlay and vsync.
use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use pixelcide::player::{KineticBody, ScreenEffectKind, ScreenEffectState};
use pixelcide::settings::Settings;

#[derive(Component)]
pub struct EffectOverlay;

/// Transparent node covering the window, tinted by the active screen effect.
pub fn spawn_effect_overlay(mut commands: Commands) {
    commands.spawn((
        NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            background_color: BackgroundColor(Color::NONE),
            ..default()
        },
        EffectOverlay,
    ));
}

fn tint(kind: ScreenEffectKind) -> (f32, f32, f32) {
    match kind {
        ScreenEffectKind::None => (0.0, 0.0, 0.0),
        ScreenEffectKind::Death => (0.5, 0.0, 0.0),
        ScreenEffectKind::Teleport => (0.6, 0.3, 1.0),
        ScreenEffectKind::Explosion => (1.0, 0.9, 0.6),
        ScreenEffectKind::Fall => (0.9, 0.1, 0.1),
    }
}

/// Overlay opacity for `effect`, zero when the overlay is switched off.
fn overlay_alpha(effect: &ScreenEffectState, enabled: bool) -> f32 {
    match effect.kind {
        _ if !enabled || !effect.is_active() => 0.0,
        // death stays opaque-ish until respawn
        ScreenEffectKind::Death => 0.6,
        _ => effect.intensity() * 0.8,
    }
}

/// Copy the local body's screen effect into the overlay colour.
#[allow(clippy::needless_pass_by_value)]
pub fn update_effect_overlay(
    settings: Res<Settings>,
    bodies: Query<&KineticBody>,
    mut overlays: Query<&mut BackgroundColor, With<EffectOverlay>>,
) {
    let Ok(body) = bodies.get_single() else { return };
    let effect = body.screen_effect;
    let (r, g, b) = tint(effect.kind);
    let alpha = overlay_alpha(&effect, settings.graphics.effect_overlay);
    for mut color in &mut overlays {
        color.0 = Color::srgba(r, g, b, alpha);
    }
}

/// Apply `graphics.vsync` to the primary window whenever it changes.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_vsync_settings(
    settings: Res<Settings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut applied: Local<Option<bool>>,
) {
    let vsync = settings.graphics.vsync;
    if *applied == Some(vsync) {
        return;
    }
    for mut window in &mut windows {
        window.present_mode = if vsync { PresentMode::AutoVsync } else { PresentMode::AutoNoVsync };
    }
    *applied = Some(vsync);
}
