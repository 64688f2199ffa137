//! Vertical kinetics: gravity, grounding, fall damage and surface effects.
//!
//! Two point probes decide contact with terrain: one under the feet and one
//! just above the eyes. Any contact is a grounding event. Landing too fast
//! hurts or kills, the block under the feet may launch, speed up or burn the
//! body, and the block at the head may kill it. The resolver calls
//! [`physics_step`] first each tick; horizontal movement comes after.

use crate::block::{head_effect, surface_effect, SurfaceEffect};
use crate::player::{DeathCause, KineticBody, KineticEvent};
use crate::world::VoxelQuery;
use bevy::prelude::*;

pub const GRAVITY: f32 = -8.0;
/// Landing speed that is exactly lethal.
pub const DIE_VELOCITY: f32 = 15.0;
pub const JUMP_VELOCITY: f32 = 4.0;
/// Bodies below this height have fallen out of the world.
pub const VOID_FLOOR: f32 = -30.0;

/// Foot probe offset from the eye position.
pub const FOOT_PROBE: f32 = -1.5;
/// Head probe offset from the eye position.
pub const HEAD_PROBE: f32 = 0.1;
/// Distance kept below a ceiling after a head bump.
pub const HEAD_SNAP: f32 = 0.15;
/// Eye height above the top face of the block stood on.
pub const FOOT_SNAP: f32 = 1.45;

/// Damage below this is ignored.
pub const HURT_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalOutcome {
    #[default]
    Airborne,
    /// Standing on something this tick.
    Grounded,
    Died,
}

/// Damage of landing with vertical velocity `vy`, `1.0` being lethal.
#[must_use]
pub fn fall_damage(vy: f32) -> f32 {
    if vy < 0.0 { -vy / DIE_VELOCITY } else { 0.0 }
}

#[must_use]
pub fn foot_probe(position: Vec3) -> Vec3 {
    position + Vec3::Y * FOOT_PROBE
}

#[must_use]
pub fn head_probe(position: Vec3) -> Vec3 {
    position + Vec3::Y * HEAD_PROBE
}

/// Whether the body currently stands on something solid.
pub fn is_grounded<W: VoxelQuery + ?Sized>(world: &W, position: Vec3) -> bool {
    world.is_solid_for_body(foot_probe(position))
}

/// Step the vertical physics of `body` by `dt` seconds.
///
/// Events are appended to `events` in the order they happen. A death stops
/// the step immediately: nothing about the body changes after it.
///
/// # Arguments
/// * `body` - the body to advance
/// * `jump` - whether a jump was requested this tick
/// * `world` - terrain to collide against
/// * `dt` - tick length in seconds
/// * `events` - receives impact, jump pad and death notifications
pub fn physics_step<W: VoxelQuery + ?Sized>(
    body: &mut KineticBody,
    jump: bool,
    world: &W,
    dt: f32,
    events: &mut Vec<KineticEvent>,
) -> VerticalOutcome {
    body.velocity.y += GRAVITY * dt;

    let foot = foot_probe(body.position);
    let head = head_probe(body.position);
    let foot_solid = world.is_solid_for_body(foot);
    let head_solid = world.is_solid_for_body(head);

    let mut outcome = VerticalOutcome::Airborne;
    if foot_solid || head_solid {
        let foot_kind = world.block_at(foot);
        let head_kind = world.block_at(head);

        if !foot_kind.is_empty() && body.velocity.y < 0.0 {
            let damage = fall_damage(body.velocity.y);
            if damage > HURT_THRESHOLD {
                events.push(KineticEvent::GroundImpact);
            }
            if damage >= 1.0 {
                events.push(body.kill(DeathCause::Gravity));
                return VerticalOutcome::Died;
            }
            if damage > HURT_THRESHOLD {
                body.screen_effect.fall(damage);
            }
        }

        if head_solid {
            body.position.y = head.y.floor() - HEAD_SNAP;
        }
        if foot_solid {
            body.position.y = foot.y.floor() + 1.0 + FOOT_SNAP;
        }
        body.velocity.y = 0.0;
        body.on_road = false;

        let mut launched = false;
        match surface_effect(foot_kind) {
            SurfaceEffect::JumpBoost(multiplier) => {
                body.velocity.y = multiplier * JUMP_VELOCITY;
                events.push(KineticEvent::JumpPad);
                launched = true;
            }
            SurfaceEffect::SpeedMultiplier(_) => body.on_road = true,
            SurfaceEffect::Kill(cause) => {
                events.push(body.kill(cause));
                return VerticalOutcome::Died;
            }
            SurfaceEffect::None | SurfaceEffect::ClimbVelocity(_) => {}
        }

        if let SurfaceEffect::Kill(cause) = head_effect(head_kind) {
            events.push(body.kill(cause));
            return VerticalOutcome::Died;
        }

        if foot_solid {
            outcome = VerticalOutcome::Grounded;
            if jump && !launched {
                body.velocity.y = JUMP_VELOCITY;
            }
        }
    }

    body.position += body.velocity * dt;

    if body.position.y < VOID_FLOOR {
        events.push(body.kill(DeathCause::Misadventure));
        return VerticalOutcome::Died;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{blocks, BlockRegistry};
    use crate::player::ScreenEffectKind;
    use crate::world::{BlockQuery, World};

    const DT: f32 = 1.0 / 60.0;

    /// Flat 8x8 floor whose top face is y = 2; a body standing on it has its
    /// eye at 3.45.
    fn floor_of(id: u8) -> World {
        let mut world = World::new();
        world.fill(IVec3::new(0, 0, 0), IVec3::new(7, 1, 7), blocks::STONE);
        world.fill(IVec3::new(0, 1, 0), IVec3::new(7, 1, 7), id);
        world
    }

    /// Body whose foot probe sits 0.1 inside the floor, falling at `vy`
    /// before gravity is applied.
    fn landing(vy: f32) -> KineticBody {
        let mut body = KineticBody::new(Vec3::new(4.5, 3.4, 4.5));
        body.velocity.y = vy;
        body
    }

    fn step(world: &World, body: &mut KineticBody, jump: bool) -> (VerticalOutcome, Vec<KineticEvent>) {
        let registry = BlockRegistry::builtin();
        let query = BlockQuery::new(world, &registry);
        let mut events = Vec::new();
        let outcome = physics_step(body, jump, &query, DT, &mut events);
        (outcome, events)
    }

    #[test]
    fn free_fall_accelerates() {
        let world = World::new();
        let mut body = KineticBody::new(Vec3::new(0.5, 40.0, 0.5));
        let (outcome, events) = step(&world, &mut body, false);
        assert_eq!(outcome, VerticalOutcome::Airborne);
        assert!(events.is_empty());
        assert!((body.velocity.y - GRAVITY * DT).abs() < 1e-6);
        assert!(body.position.y < 40.0);
    }

    #[test]
    fn standing_still_is_stable() {
        let world = floor_of(blocks::STONE);
        let mut body = KineticBody::new(Vec3::new(4.5, 3.45, 4.5));
        for _ in 0..120 {
            let (outcome, events) = step(&world, &mut body, false);
            assert_eq!(outcome, VerticalOutcome::Grounded);
            assert!(events.is_empty());
        }
        assert!((body.position.y - 3.45).abs() < 1e-5);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn soft_landings_leave_no_mark() {
        let world = floor_of(blocks::STONE);
        // damage after gravity stays under 0.5
        for vy in [-0.5, -3.0, -7.0] {
            let mut body = landing(vy);
            let (outcome, events) = step(&world, &mut body, false);
            assert_eq!(outcome, VerticalOutcome::Grounded);
            assert!(events.is_empty());
            assert_eq!(body.screen_effect.kind, ScreenEffectKind::None);
            assert!((body.position.y - 3.45).abs() < 1e-5);
        }
    }

    #[test]
    fn hard_landing_shows_fall_effect() {
        let world = floor_of(blocks::STONE);
        let mut body = landing(-11.0);
        let damage = fall_damage(-11.0 + GRAVITY * DT);
        let (outcome, events) = step(&world, &mut body, false);
        assert_eq!(outcome, VerticalOutcome::Grounded);
        assert_eq!(events, vec![KineticEvent::GroundImpact]);
        assert_eq!(body.screen_effect.kind, ScreenEffectKind::Fall);
        assert!((body.screen_effect.counter - (2.0 - (damage - 0.5) * 4.0)).abs() < 1e-5);
        assert!(body.alive);
    }

    #[test]
    fn lethal_landing_stops_the_tick() {
        let world = floor_of(blocks::STONE);
        let mut body = landing(-16.0);
        let (outcome, events) = step(&world, &mut body, false);
        assert_eq!(outcome, VerticalOutcome::Died);
        assert_eq!(
            events,
            vec![KineticEvent::GroundImpact, KineticEvent::Died(DeathCause::Gravity)]
        );
        // untouched after the death point: no snap, no velocity reset
        assert_eq!(body.position, Vec3::new(4.5, 3.4, 4.5));
        assert!((body.velocity.y - (-16.0 + GRAVITY * DT)).abs() < 1e-6);
        assert!(!body.alive);
        assert_eq!(body.screen_effect.kind, ScreenEffectKind::Death);
    }

    #[test]
    fn jump_pad_launches() {
        let world = floor_of(blocks::JUMP);
        let mut body = landing(0.0);
        let (outcome, events) = step(&world, &mut body, false);
        assert_eq!(outcome, VerticalOutcome::Grounded);
        assert_eq!(events, vec![KineticEvent::JumpPad]);
        assert_eq!(body.velocity.y, 10.0);
        assert!((body.position.y - (3.45 + 10.0 * DT)).abs() < 1e-5);
    }

    #[test]
    fn road_marks_the_body() {
        let world = floor_of(blocks::ROAD);
        let mut body = landing(0.0);
        step(&world, &mut body, false);
        assert!(body.on_road);

        let world = floor_of(blocks::STONE);
        step(&world, &mut body, false);
        assert!(!body.on_road);
    }

    #[test]
    fn lava_floor_incinerates() {
        let world = floor_of(blocks::LAVA);
        let mut body = landing(0.0);
        let (outcome, events) = step(&world, &mut body, false);
        assert_eq!(outcome, VerticalOutcome::Died);
        assert_eq!(events, vec![KineticEvent::Died(DeathCause::Lava)]);
    }

    #[test]
    fn head_bumps() {
        for (id, cause) in [(blocks::SHOCK, DeathCause::Electrocution), (blocks::LAVA, DeathCause::Lava)] {
            let mut world = World::new();
            world.set_block(0, 10, 0, id);
            let mut body = KineticBody::new(Vec3::new(0.5, 9.95, 0.5));
            body.velocity.y = 3.0;
            let (outcome, events) = step(&world, &mut body, false);
            assert_eq!(outcome, VerticalOutcome::Died);
            assert_eq!(events, vec![KineticEvent::Died(cause)]);
        }
    }

    #[test]
    fn ceiling_pushes_down_and_stops_the_rise() {
        let mut world = World::new();
        world.set_block(0, 10, 0, blocks::STONE);
        let mut body = KineticBody::new(Vec3::new(0.5, 9.95, 0.5));
        body.velocity.y = 3.0;
        let (outcome, _) = step(&world, &mut body, false);
        assert_eq!(outcome, VerticalOutcome::Airborne);
        assert_eq!(body.velocity.y, 0.0);
        assert!((body.position.y - (10.0 - HEAD_SNAP)).abs() < 1e-5);
    }

    #[test]
    fn wedged_between_floor_and_ceiling_the_floor_wins() {
        // floor top at y = 2, stone at y = 3 right around the head probe
        let mut world = floor_of(blocks::STONE);
        world.set_block(4, 3, 4, blocks::STONE);
        let mut body = landing(0.0);
        let (outcome, events) = step(&world, &mut body, false);
        assert_eq!(outcome, VerticalOutcome::Grounded);
        assert!(events.is_empty());
        assert_eq!(body.velocity.y, 0.0);
        assert!((body.position.y - (2.0 + FOOT_SNAP)).abs() < 1e-5);
    }

    #[test]
    fn jump_request_only_from_the_ground() {
        let world = floor_of(blocks::STONE);
        let mut body = landing(0.0);
        step(&world, &mut body, true);
        assert_eq!(body.velocity.y, JUMP_VELOCITY);

        let mut falling = KineticBody::new(Vec3::new(0.5, 40.0, 0.5));
        step(&World::new(), &mut falling, true);
        assert!(falling.velocity.y < 0.0);
    }

    #[test]
    fn falling_out_of_the_world() {
        let world = World::new();
        let mut body = KineticBody::new(Vec3::new(0.5, -29.999, 0.5));
        body.velocity.y = -1.0;
        let (outcome, events) = step(&world, &mut body, false);
        assert_eq!(outcome, VerticalOutcome::Died);
        assert_eq!(events, vec![KineticEvent::Died(DeathCause::Misadventure)]);
        assert!(body.position.y < VOID_FLOOR);
    }
}
