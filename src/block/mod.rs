//! Block kinds, definitions and the per-kind effect table.
//!
//! Chunks store compact `BlockId`s. The `BlockRegistry` maps each id to a
//! `Block` definition whose `kind` is one of the closed `BlockKind` set the
//! movement code reacts to. Definitions ship built in and can be extended or
//! overridden from RON files under `data/blocks/`.
//!
//! Example:
//!
//! ```rust
//! use pixelcide::block::{blocks, BlockKind, BlockRegistry};
//!
//! let registry = BlockRegistry::builtin();
//! assert_eq!(registry.kind_of(blocks::AIR), BlockKind::Empty);
//! assert_eq!(registry.kind_of(registry.id_for_name("lava").unwrap()), BlockKind::Lava);
//! ```

pub mod effect;
pub use effect::{
    contact_effect, head_effect, surface_effect, SurfaceEffect, CLIMB_VELOCITY, JUMP_PAD_MULTIPLIER,
    ROAD_MULTIPLIER,
};

/// Compact block identifier stored in chunks.
pub type BlockId = u8;

/// Well-known ids of the built-in block set.
pub mod blocks {
    use super::BlockId;

    /// Empty space.
    pub const AIR: BlockId = 0;
    pub const STONE: BlockId = 1;
    pub const DIRT: BlockId = 2;
    pub const ROAD: BlockId = 3;
    pub const JUMP: BlockId = 4;
    pub const LAVA: BlockId = 5;
    pub const SHOCK: BlockId = 6;
    pub const LADDER: BlockId = 7;
}

/// Gameplay category of a block. Movement only ever distinguishes these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum BlockKind {
    /// Nothing there (air, unloaded or out of range space).
    #[default]
    Empty,
    /// Plain terrain: stone, dirt, team walls.
    Ground,
    /// Doubles horizontal speed while standing on it.
    Road,
    /// Launches the body upwards on contact.
    Jump,
    /// Kills on contact from any side.
    Lava,
    /// Kills when bumped with the head.
    Shock,
    /// Climbable when walked into.
    Ladder,
}

impl BlockKind {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == BlockKind::Empty
    }
}

/// Loader/watchers for block RON files.
pub mod loader;

/// Block registry and definitions.
pub mod registry;

pub use registry::{Block, BlockRegistry};
