//! The practice arena loaded by the client when no map is streamed in.
//!
//! One chunk wide: a two-block stone floor with a road strip, a lava pool,
//! a jump pad under a shock ceiling and a ladder tower. Every special block
//! the movement code reacts to appears at least once.

use super::World;
use crate::block::blocks;
use bevy::math::{IVec3, Vec3};

/// Top face of the floor.
pub const FLOOR_TOP: i32 = 2;

/// Eye position of a body standing at the spawn column.
#[must_use]
pub fn spawn_point() -> Vec3 {
    // floor block y = FLOOR_TOP - 1 and the body rests 1.45 above its top face
    #[allow(clippy::cast_precision_loss)]
    let y = FLOOR_TOP as f32 + 1.45;
    Vec3::new(16.5, y, 8.5)
}

/// Build the arena into `world`.
pub fn build_arena(world: &mut World) {
    world.fill(IVec3::new(0, 0, 0), IVec3::new(31, FLOOR_TOP - 1, 31), blocks::STONE);

    // road strip crossing the arena
    world.fill(IVec3::new(2, FLOOR_TOP - 1, 16), IVec3::new(29, FLOOR_TOP - 1, 17), blocks::ROAD);

    // lava pool
    world.fill(IVec3::new(3, FLOOR_TOP - 1, 3), IVec3::new(6, FLOOR_TOP - 1, 6), blocks::LAVA);

    // jump pad with a shock ceiling above it
    world.set_block(24, FLOOR_TOP - 1, 24, blocks::JUMP);
    world.fill(IVec3::new(23, FLOOR_TOP + 6, 23), IVec3::new(25, FLOOR_TOP + 6, 25), blocks::SHOCK);

    // ladder tower: stone core, ladder face on its -z side, platform on top
    world.fill(IVec3::new(8, FLOOR_TOP, 26), IVec3::new(10, FLOOR_TOP + 7, 28), blocks::STONE);
    world.fill(IVec3::new(9, FLOOR_TOP, 25), IVec3::new(9, FLOOR_TOP + 7, 25), blocks::LADDER);

    // perimeter wall
    for i in 0..32 {
        for y in FLOOR_TOP..FLOOR_TOP + 3 {
            world.set_block(i, y, 0, blocks::DIRT);
            world.set_block(i, y, 31, blocks::DIRT);
            world.set_block(0, y, i, blocks::DIRT);
            world.set_block(31, y, i, blocks::DIRT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockKind, BlockRegistry};
    use crate::world::{BlockQuery, VoxelQuery};

    #[test]
    fn spawn_stands_on_plain_floor() {
        let mut world = World::new();
        build_arena(&mut world);
        let registry = BlockRegistry::builtin();
        let query = BlockQuery::new(&world, &registry);
        let spawn = spawn_point();
        let feet = spawn - Vec3::Y * 1.5;
        assert_eq!(query.block_at(feet), BlockKind::Ground);
        assert!(!query.is_solid_for_body(spawn));
        assert!(!query.is_solid_for_body(spawn - Vec3::Y * 1.4));
    }

    #[test]
    fn every_special_block_is_placed() {
        let mut world = World::new();
        build_arena(&mut world);
        let placed: std::collections::HashSet<u8> =
            world.chunks.values().flat_map(|c| c.blocks.iter().copied()).collect();
        for id in [blocks::ROAD, blocks::JUMP, blocks::LAVA, blocks::SHOCK, blocks::LADDER] {
            assert!(placed.contains(&id), "arena lacks block id {id}");
        }
    }
}
