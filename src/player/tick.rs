//! The per-tick movement and collision resolver, and the system driving it.

use crate::block::BlockRegistry;
use crate::player::movement::movement_step;
use crate::player::physics::{physics_step, VerticalOutcome};
use crate::player::{DeathCause, KineticBody, KineticEvent, MoveIntent, MoveOutcome, PlayerLook};
use crate::settings::Settings;
use crate::world::{BlockQuery, VoxelQuery, World};
use bevy::log::debug;
use bevy::prelude::*;

/// Everything that happened to a body during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Notifications in the order they occurred.
    pub events: Vec<KineticEvent>,
    pub vertical: VerticalOutcome,
    pub horizontal: MoveOutcome,
}

impl TickReport {
    #[must_use]
    pub fn death(&self) -> Option<DeathCause> {
        self.events.iter().find_map(|ev| match ev {
            KineticEvent::Died(cause) => Some(*cause),
            _ => None,
        })
    }
}

/// Advance `body` by one tick of `dt` seconds.
///
/// Vertical physics run first, horizontal movement second. A death ends the
/// tick where it happens. Dead bodies are left alone until respawned.
pub fn resolve_tick<W: VoxelQuery + ?Sized>(
    body: &mut KineticBody,
    intent: &MoveIntent,
    world: &W,
    dt: f32,
) -> TickReport {
    let mut report = TickReport::default();
    if !body.alive {
        return report;
    }

    report.vertical = physics_step(body, intent.jump, world, dt, &mut report.events);
    if report.vertical == VerticalOutcome::Died {
        return report;
    }

    report.horizontal = movement_step(body, intent, world, dt, &mut report.events);
    report
}

/// Drive the local body once per frame from keyboard input.
#[allow(clippy::needless_pass_by_value)]
pub fn player_tick(
    time: Res<Time>,
    world: Res<World>,
    registry: Res<BlockRegistry>,
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut events: EventWriter<KineticEvent>,
    mut query: Query<(&mut Transform, &mut KineticBody, &PlayerLook)>,
) {
    let dt = time.delta_seconds();
    let terrain = BlockQuery::new(&world, &registry);

    for (mut transform, mut body, look) in &mut query {
        body.screen_effect.advance(dt);
        body.cool_down(dt);

        let intent = MoveIntent::from_keys(&kb, &settings.controls, look);
        let report = resolve_tick(&mut body, &intent, &terrain, dt);
        transform.translation = body.position;

        for ev in report.events {
            debug!("kinetic event: {ev:?}");
            events.send(ev);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::blocks;
    use crate::player::physics::GRAVITY;
    use crate::player::ScreenEffectKind;

    const DT: f32 = 1.0 / 60.0;

    /// 16x16 two-block-thick floor, top face at y = 2, with a road strip
    /// at z = 8.
    fn arena() -> World {
        let mut world = World::new();
        world.fill(IVec3::new(0, 0, 0), IVec3::new(15, 1, 15), blocks::STONE);
        world.fill(IVec3::new(0, 1, 8), IVec3::new(15, 1, 8), blocks::ROAD);
        world
    }

    fn tick(world: &World, body: &mut KineticBody, intent: &MoveIntent) -> TickReport {
        let registry = BlockRegistry::builtin();
        resolve_tick(body, intent, &BlockQuery::new(world, &registry), DT)
    }

    fn walking_east() -> MoveIntent {
        MoveIntent { forward: 1.0, look: Vec3::X, right: Vec3::Z, ..Default::default() }
    }

    #[test]
    fn road_doubles_horizontal_distance() {
        let world = arena();
        let intent = walking_east();

        let mut plain = KineticBody::new(Vec3::new(4.5, 3.45, 4.5));
        let mut road = KineticBody::new(Vec3::new(4.5, 3.45, 8.5));
        let before_plain = plain.position;
        let before_road = road.position;
        tick(&world, &mut plain, &intent);
        tick(&world, &mut road, &intent);

        let plain_dx = plain.position.x - before_plain.x;
        let road_dx = road.position.x - before_road.x;
        assert!(plain_dx > 0.0);
        assert!((road_dx - 2.0 * plain_dx).abs() < 1e-5);
        assert!(road.on_road);
    }

    #[test]
    fn fatal_fall_reports_once_and_freezes_the_body() {
        let world = arena();
        let mut body = KineticBody::new(Vec3::new(4.5, 3.4, 4.5));
        body.velocity.y = -16.0;
        let report = tick(&world, &mut body, &walking_east());

        assert_eq!(report.death(), Some(DeathCause::Gravity));
        assert_eq!(report.vertical, VerticalOutcome::Died);
        assert_eq!(report.horizontal, MoveOutcome::Idle);
        let impacts = report.events.iter().filter(|e| **e == KineticEvent::GroundImpact).count();
        assert_eq!(impacts, 1);
        assert_eq!(body.position, Vec3::new(4.5, 3.4, 4.5));
        assert!((body.velocity.y - (-16.0 + GRAVITY * DT)).abs() < 1e-6);
    }

    #[test]
    fn fall_damage_bands() {
        let world = arena();
        for step in 0..40 {
            // pre-gravity landing speeds from 0 to ~19.5 u/s
            let vy = -(step as f32) * 0.5;
            let mut body = KineticBody::new(Vec3::new(4.5, 3.4, 4.5));
            body.velocity.y = vy;
            let damage = -(vy + GRAVITY * DT) / 15.0;
            let report = tick(&world, &mut body, &MoveIntent::default());

            if damage >= 1.0 {
                assert_eq!(report.death(), Some(DeathCause::Gravity), "damage {damage}");
            } else if damage > 0.5 {
                assert!(report.death().is_none());
                assert_eq!(body.screen_effect.kind, ScreenEffectKind::Fall);
                let expected = 2.0 - (damage - 0.5) * 4.0;
                assert!((body.screen_effect.counter - expected).abs() < 1e-4, "damage {damage}");
            } else {
                assert!(report.events.is_empty(), "damage {damage}");
                assert_eq!(body.screen_effect.kind, ScreenEffectKind::None);
            }
        }
    }

    #[test]
    fn dead_bodies_do_not_move() {
        let world = arena();
        let mut body = KineticBody::new(Vec3::new(4.5, 3.45, 4.5));
        body.kill(DeathCause::Pixelcide);
        let report = tick(&world, &mut body, &walking_east());
        assert_eq!(report, TickReport::default());
        assert_eq!(body.position, Vec3::new(4.5, 3.45, 4.5));
    }

    #[test]
    fn void_death_skips_horizontal_movement() {
        let mut body = KineticBody::new(Vec3::new(0.5, -29.999, 0.5));
        body.velocity.y = -1.0;
        let report = tick(&World::new(), &mut body, &walking_east());
        assert_eq!(report.death(), Some(DeathCause::Misadventure));
        assert_eq!(report.horizontal, MoveOutcome::Idle);
        assert_eq!(body.position.x, 0.5);
    }

    #[test]
    fn climbing_a_ladder_over_several_ticks() {
        let mut world = arena();
        world.fill(IVec3::new(8, 2, 0), IVec3::new(8, 9, 15), blocks::LADDER);
        let mut body = KineticBody::new(Vec3::new(7.6, 3.45, 4.5));
        let intent = walking_east();

        let start_y = body.position.y;
        for _ in 0..30 {
            let report = tick(&world, &mut body, &intent);
            assert!(report.death().is_none());
        }
        assert!(body.position.y > start_y + 0.5, "climbed to {}", body.position.y);
    }
}
