//! What a block does to a body touching it.
//!
//! The resolver never branches on block kinds directly: it asks this table
//! for an effect descriptor and applies the descriptor. Three contact points
//! exist: the block under the feet, the block bumped with the head and the
//! blocks walked into.

use super::BlockKind;
use crate::player::DeathCause;

/// Multiplier applied to the jump velocity by a jump pad.
pub const JUMP_PAD_MULTIPLIER: f32 = 2.5;
/// Horizontal speed multiplier while standing on a road.
pub const ROAD_MULTIPLIER: f32 = 2.0;
/// Upward velocity given by a ladder.
pub const CLIMB_VELOCITY: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEffect {
    None,
    Kill(DeathCause),
    SpeedMultiplier(f32),
    ClimbVelocity(f32),
    /// Multiplier applied to `JUMP_VELOCITY`.
    JumpBoost(f32),
}

/// Effect of the block directly under the feet after landing.
#[must_use]
pub fn surface_effect(kind: BlockKind) -> SurfaceEffect {
    match kind {
        BlockKind::Jump => SurfaceEffect::JumpBoost(JUMP_PAD_MULTIPLIER),
        BlockKind::Road => SurfaceEffect::SpeedMultiplier(ROAD_MULTIPLIER),
        BlockKind::Lava => SurfaceEffect::Kill(DeathCause::Lava),
        BlockKind::Empty | BlockKind::Ground | BlockKind::Shock | BlockKind::Ladder => SurfaceEffect::None,
    }
}

/// Effect of the block the head is pushed against.
#[must_use]
pub fn head_effect(kind: BlockKind) -> SurfaceEffect {
    match kind {
        BlockKind::Shock => SurfaceEffect::Kill(DeathCause::Electrocution),
        BlockKind::Lava => SurfaceEffect::Kill(DeathCause::Lava),
        BlockKind::Empty | BlockKind::Ground | BlockKind::Road | BlockKind::Jump | BlockKind::Ladder => {
            SurfaceEffect::None
        }
    }
}

/// Effect of a block hit while moving horizontally.
#[must_use]
pub fn contact_effect(kind: BlockKind) -> SurfaceEffect {
    match kind {
        BlockKind::Lava => SurfaceEffect::Kill(DeathCause::Lava),
        BlockKind::Ladder => SurfaceEffect::ClimbVelocity(CLIMB_VELOCITY),
        BlockKind::Empty | BlockKind::Ground | BlockKind::Road | BlockKind::Jump | BlockKind::Shock => {
            SurfaceEffect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feet_table() {
        assert_eq!(surface_effect(BlockKind::Jump), SurfaceEffect::JumpBoost(2.5));
        assert_eq!(surface_effect(BlockKind::Road), SurfaceEffect::SpeedMultiplier(2.0));
        assert_eq!(surface_effect(BlockKind::Lava), SurfaceEffect::Kill(DeathCause::Lava));
        assert_eq!(surface_effect(BlockKind::Shock), SurfaceEffect::None);
        assert_eq!(surface_effect(BlockKind::Ground), SurfaceEffect::None);
    }

    #[test]
    fn head_table() {
        assert_eq!(head_effect(BlockKind::Shock), SurfaceEffect::Kill(DeathCause::Electrocution));
        assert_eq!(head_effect(BlockKind::Lava), SurfaceEffect::Kill(DeathCause::Lava));
        assert_eq!(head_effect(BlockKind::Jump), SurfaceEffect::None);
        assert_eq!(head_effect(BlockKind::Road), SurfaceEffect::None);
    }

    #[test]
    fn contact_table() {
        assert_eq!(contact_effect(BlockKind::Ladder), SurfaceEffect::ClimbVelocity(CLIMB_VELOCITY));
        assert_eq!(contact_effect(BlockKind::Lava), SurfaceEffect::Kill(DeathCause::Lava));
        // shock only hurts heads
        assert_eq!(contact_effect(BlockKind::Shock), SurfaceEffect::None);
    }
}
