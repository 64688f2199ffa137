//! Reactions to kinetic events: sound cues, the kill command and respawn.
use bevy::prelude::*;
use pixelcide::player::{DeathCause, KineticBody, KineticEvent, ScreenEffectKind};
use pixelcide::settings::Settings;
use pixelcide::world::arena;

/// Seconds the death screen stays up before respawning.
pub const RESPAWN_DELAY: f32 = 3.0;

/// Forward events to audio and the kill feed. No audio backend is wired in
/// yet, so cues are logged.
pub fn forward_kinetic_events(mut events: EventReader<KineticEvent>) {
    for ev in events.read() {
        match ev {
            KineticEvent::GroundImpact => info!("sound: ground impact"),
            KineticEvent::JumpPad => info!("sound: jump pad"),
            KineticEvent::Died(cause) => info!("you were {cause}"),
        }
    }
}

/// The kill key: self-inflicted death.
#[allow(clippy::needless_pass_by_value)]
pub fn kill_command(
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut events: EventWriter<KineticEvent>,
    mut query: Query<&mut KineticBody>,
) {
    if !kb.just_pressed(settings.controls.key_for("kill", KeyCode::KeyK)) {
        return;
    }
    for mut body in &mut query {
        if body.alive {
            events.send(body.kill(DeathCause::Pixelcide));
        }
    }
}

/// Bring dead bodies back at the arena spawn once the death screen has
/// been shown long enough.
pub fn respawn_dead(mut query: Query<(&mut KineticBody, &mut Transform)>) {
    for (mut body, mut transform) in &mut query {
        let effect = body.screen_effect;
        if !body.alive && effect.kind == ScreenEffectKind::Death && effect.counter >= RESPAWN_DELAY {
            body.respawn(arena::spawn_point());
            transform.translation = body.position;
            info!("respawned");
        }
    }
}
