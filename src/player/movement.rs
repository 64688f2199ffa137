//! Horizontal movement with sliding collision.
//!
//! The move vector comes from the input intent relative to the camera. It is
//! tried as a whole first, then restricted to the Z axis, then to the X axis;
//! the first attempt that is not blocked wins, which makes the body slide
//! along walls.

use crate::block::{contact_effect, SurfaceEffect, ROAD_MULTIPLIER};
use crate::player::camera::PlayerLook;
use crate::player::physics::is_grounded;
use crate::player::{KineticBody, KineticEvent};
use crate::settings::ControlsSettings;
use crate::world::VoxelQuery;
use bevy::prelude::*;

pub const MOVE_SPEED: f32 = 3.5;
pub const SPRINT_MULTIPLIER: f32 = 1.5;
/// How far past the move distance the body probes for obstacles.
pub const PROBE_REACH: f32 = 0.1;
/// Vertical offsets of the body probes from the eye: upper body, mid body
/// and lower body.
pub const BODY_PROBES: [f32; 3] = [0.0, -0.7, -1.4];
/// Lift given when starting a climb from the ground.
pub const CLIMB_NUDGE: f32 = 0.1;

/// What the player asks the body to do this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveIntent {
    /// `1` forward, `-1` backward.
    pub forward: f32,
    /// `1` right, `-1` left.
    pub strafe: f32,
    pub sprint: bool,
    pub jump: bool,
    /// Camera look direction.
    pub look: Vec3,
    /// Camera right direction.
    pub right: Vec3,
}

impl MoveIntent {
    /// Read the movement keys.
    ///
    /// # Arguments
    /// * `kb` - keyboard state
    /// * `controls` - keybinds mapping action names to keys
    /// * `look` - camera orientation providing the look/right vectors
    #[must_use]
    pub fn from_keys(kb: &ButtonInput<KeyCode>, controls: &ControlsSettings, look: &PlayerLook) -> Self {
        let pressed = |action: &str, default: KeyCode| kb.pressed(controls.key_for(action, default));
        let axis = |pos: bool, neg: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));

        Self {
            forward: axis(pressed("forward", KeyCode::KeyW), pressed("back", KeyCode::KeyS)),
            strafe: axis(pressed("right", KeyCode::KeyD), pressed("left", KeyCode::KeyA)),
            sprint: pressed("sprint", KeyCode::ShiftLeft),
            jump: kb.just_pressed(controls.key_for("jump", KeyCode::Space)),
            look: look.look_vector(),
            right: look.right_vector(),
        }
    }

    /// Unit direction on the horizontal plane, zero when not moving.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        let mut dir = self.look * self.forward + self.right * self.strafe;
        dir.y = 0.0;
        dir.normalize_or_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveOutcome {
    /// No horizontal input.
    #[default]
    Idle,
    Moved,
    /// Stopped by a block that did something (ladder climb, lava).
    Handled,
    /// Every attempt hit a wall; the body did not move.
    Blocked,
    Died,
}

/// Horizontal displacement requested for this tick.
#[must_use]
pub fn move_vector(body: &KineticBody, intent: &MoveIntent, dt: f32) -> Vec3 {
    let mut mv = intent.direction() * MOVE_SPEED * dt;
    if intent.sprint {
        mv *= SPRINT_MULTIPLIER;
    }
    if body.on_road {
        mv *= ROAD_MULTIPLIER;
    }
    mv
}

/// Move `body` horizontally for one tick.
///
/// # Arguments
/// * `body` - the body to move
/// * `intent` - input for this tick
/// * `world` - terrain to collide against
/// * `dt` - tick length in seconds
/// * `events` - receives a death notification when walking into lava
pub fn movement_step<W: VoxelQuery + ?Sized>(
    body: &mut KineticBody,
    intent: &MoveIntent,
    world: &W,
    dt: f32,
    events: &mut Vec<KineticEvent>,
) -> MoveOutcome {
    let mv = move_vector(body, intent, dt);
    if mv == Vec3::ZERO {
        return MoveOutcome::Idle;
    }

    for candidate in [mv, Vec3::new(0.0, 0.0, mv.z), Vec3::new(mv.x, 0.0, 0.0)] {
        match try_move(body, candidate, world, events) {
            MoveOutcome::Blocked => continue,
            outcome => return outcome,
        }
    }
    MoveOutcome::Blocked
}

/// One collision attempt along `mv`.
fn try_move<W: VoxelQuery + ?Sized>(
    body: &mut KineticBody,
    mv: Vec3,
    world: &W,
    events: &mut Vec<KineticEvent>,
) -> MoveOutcome {
    let distance = mv.length();
    if distance <= f32::EPSILON {
        return MoveOutcome::Blocked;
    }

    let reach = body.position + mv / distance * (distance + PROBE_REACH);
    let probes = BODY_PROBES.map(|dy| reach + Vec3::Y * dy);

    if !probes.iter().any(|&p| world.is_solid_for_body(p)) {
        body.position += mv;
        return MoveOutcome::Moved;
    }

    let mut climb = None;
    for probe in probes {
        match contact_effect(world.block_at(probe)) {
            SurfaceEffect::Kill(cause) => {
                events.push(body.kill(cause));
                return MoveOutcome::Died;
            }
            SurfaceEffect::ClimbVelocity(v) => climb = climb.or(Some(v)),
            _ => {}
        }
    }

    if let Some(v) = climb {
        body.velocity.y = v;
        if is_grounded(world, body.position) {
            body.position.y += CLIMB_NUDGE;
        }
        return MoveOutcome::Handled;
    }

    MoveOutcome::Blocked
}
