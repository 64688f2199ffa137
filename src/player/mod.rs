//! Local player kinetics: body state, camera look, and the per-tick
//! movement and collision resolver.
//!
//! # Example:
//!
//! ```
//! use bevy::math::Vec3;
//! use pixelcide::block::{blocks, BlockRegistry};
//! use pixelcide::player::{resolve_tick, KineticBody, MoveIntent};
//! use pixelcide::world::{arena, BlockQuery, World};
//!
//! let mut world = World::new();
//! arena::build_arena(&mut world);
//! let registry = BlockRegistry::builtin();
//!
//! let mut body = KineticBody::new(arena::spawn_point());
//! let intent = MoveIntent { forward: 1.0, look: Vec3::Z, right: Vec3::X, ..Default::default() };
//! let report = resolve_tick(&mut body, &intent, &BlockQuery::new(&world, &registry), 1.0 / 60.0);
//! assert!(report.death().is_none());
//! ```
pub mod camera;
pub mod effect;
pub mod events;
pub mod movement;
pub mod physics;
pub mod tick;

use bevy::prelude::*;

pub use camera::*;
pub use effect::{ScreenEffectKind, ScreenEffectState};
pub use events::{DeathCause, KineticEvent};
pub use movement::{MoveIntent, MoveOutcome};
pub use tick::{player_tick, resolve_tick, TickReport};

/// Physical state of the locally controlled player.
#[derive(Component, Debug, Clone)]
pub struct KineticBody {
    /// Eye position in world units.
    pub position: Vec3,
    /// Only `y` is integrated; horizontal motion is applied directly per tick.
    pub velocity: Vec3,
    /// Seconds until the mining tool can be used again.
    pub tool_cooldown: f32,
    pub screen_effect: ScreenEffectState,
    /// Landed on a road at the last grounding event.
    pub on_road: bool,
    pub alive: bool,
}

impl KineticBody {
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            tool_cooldown: 0.0,
            screen_effect: ScreenEffectState::default(),
            on_road: false,
            alive: true,
        }
    }

    /// Mark the body dead and start the death effect. Returns the event the
    /// caller must forward.
    pub fn kill(&mut self, cause: DeathCause) -> KineticEvent {
        self.alive = false;
        self.screen_effect.trigger(ScreenEffectKind::Death);
        KineticEvent::Died(cause)
    }

    /// Put the body back into play at `at` with a fresh state.
    pub fn respawn(&mut self, at: Vec3) {
        *self = Self::new(at);
    }

    /// Count the tool cooldown down by `dt`.
    pub fn cool_down(&mut self, dt: f32) {
        self.tool_cooldown = (self.tool_cooldown - dt).max(0.0);
    }

    #[must_use]
    pub fn can_use_tool(&self) -> bool {
        self.alive && self.tool_cooldown <= 0.0
    }
}
