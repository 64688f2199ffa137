//! World storage and block queries.
//!
//! The `World` resource owns the loaded chunks keyed by `(chunk_x, chunk_z)`.
//! Movement code does not touch it directly: it goes through the
//! [`VoxelQuery`] trait, implemented here by [`BlockQuery`] which pairs the
//! world with the `BlockRegistry` to answer solidity and block kind at any
//! point in world space.
//!
//! # Example:
//!
//! ```
//! use bevy::math::Vec3;
//! use pixelcide::block::{blocks, BlockKind, BlockRegistry};
//! use pixelcide::world::{BlockQuery, VoxelQuery, World};
//!
//! let mut world = World::new();
//! world.set_block(3, 1, -2, blocks::LAVA);
//! let registry = BlockRegistry::builtin();
//! let query = BlockQuery::new(&world, &registry);
//! assert_eq!(query.block_at(Vec3::new(3.5, 1.9, -1.5)), BlockKind::Lava);
//! assert!(!query.is_solid_for_body(Vec3::new(3.5, 2.1, -1.5)));
//! ```

pub mod arena;

use crate::block::{blocks, BlockId, BlockKind, BlockRegistry};
use crate::chunk::{Chunk, CHUNK_SIZE};
use bevy::math::{IVec3, Vec3};
use bevy::prelude::*;
use std::collections::HashMap;

/// Maximum world build height (exclusive upper bound).
pub const MAX_HEIGHT: usize = 64;

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const CHUNK_SIZE_I32: i32 = CHUNK_SIZE as i32;
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const MAX_HEIGHT_I32: i32 = MAX_HEIGHT as i32;

/// Read-only view answering what occupies a point of world space.
///
/// Implementations must accept any coordinate, including non-finite ones and
/// regions that were never generated, and answer "empty" there.
pub trait VoxelQuery {
    /// Whether a body collides with whatever occupies `point`.
    fn is_solid_for_body(&self, point: Vec3) -> bool;
    /// Kind of the block occupying `point`.
    fn block_at(&self, point: Vec3) -> BlockKind;
}

/// Voxel cell containing `point`, or `None` when it has no integer cell.
#[must_use]
pub fn voxel_of(point: Vec3) -> Option<IVec3> {
    Some(IVec3::new(floor_to_i32(point.x)?, floor_to_i32(point.y)?, floor_to_i32(point.z)?))
}

#[allow(clippy::cast_possible_truncation)]
fn floor_to_i32(v: f32) -> Option<i32> {
    let f = v.floor();
    // i32::MAX is not representable in f32; 2^31 is the first value out of range.
    (f.is_finite() && f >= -2_147_483_648.0 && f < 2_147_483_648.0).then(|| f as i32)
}

/// The `World` resource holds loaded chunks keyed by `(chunk_x, chunk_z)`.
#[derive(Resource, Default)]
pub struct World {
    pub chunks: HashMap<(i32, i32), Chunk>,
}

impl World {
    #[must_use]
    pub fn new() -> Self {
        World {
            chunks: HashMap::new(),
        }
    }

    fn locate(x: i32, y: i32, z: i32) -> Option<((i32, i32), (usize, usize, usize))> {
        if !(0..MAX_HEIGHT_I32).contains(&y) {
            return None;
        }
        let cx = x.div_euclid(CHUNK_SIZE_I32);
        let cz = z.div_euclid(CHUNK_SIZE_I32);
        let lx = usize::try_from(x.rem_euclid(CHUNK_SIZE_I32)).ok()?;
        let ly = usize::try_from(y).ok()?;
        let lz = usize::try_from(z.rem_euclid(CHUNK_SIZE_I32)).ok()?;
        Some(((cx, cz), (lx, ly, lz)))
    }

    /// Block id at world coordinates, `AIR` when unloaded or out of range.
    #[must_use]
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockId {
        Self::locate(x, y, z).map_or(blocks::AIR, |(key, (lx, ly, lz))| {
            self.chunks.get(&key).map_or(blocks::AIR, |c| c.get(lx, ly, lz))
        })
    }

    /// Set a block at world coordinates, allocating an empty chunk if needed.
    ///
    /// # Return
    /// The `(chunk_x, chunk_z)` written to, or `None` when `y` is out of range.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockId) -> Option<(i32, i32)> {
        let (key, (lx, ly, lz)) = Self::locate(x, y, z)?;
        self.chunks.entry(key).or_default().set(lx, ly, lz, block);
        Some(key)
    }

    /// Fill the inclusive box `min..=max` with `block`.
    pub fn fill(&mut self, min: IVec3, max: IVec3, block: BlockId) {
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.set_block(x, y, z, block);
                }
            }
        }
    }
}

/// `VoxelQuery` over a `World` and the registry describing its ids.
pub struct BlockQuery<'a> {
    world: &'a World,
    registry: &'a BlockRegistry,
}

impl<'a> BlockQuery<'a> {
    #[must_use]
    pub fn new(world: &'a World, registry: &'a BlockRegistry) -> Self {
        Self { world, registry }
    }

    fn id_at(&self, point: Vec3) -> BlockId {
        voxel_of(point).map_or(blocks::AIR, |v| self.world.get_block(v.x, v.y, v.z))
    }
}

impl VoxelQuery for BlockQuery<'_> {
    fn is_solid_for_body(&self, point: Vec3) -> bool {
        self.registry.is_solid(self.id_at(point))
    }

    fn block_at(&self, point: Vec3) -> BlockKind {
        self.registry.kind_of(self.id_at(point))
    }
}
