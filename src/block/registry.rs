//! This module defines the `Block` definition and the `BlockRegistry` that
//! resolves chunk ids to definitions.
//!
//! Example:
//! ```rust
//! use pixelcide::block::registry::{Block, BlockRegistry};
//! use pixelcide::block::BlockKind;
//!
//! let mut registry = BlockRegistry::builtin();
//! registry.register(Block {
//!     name: "red_wall".to_string(),
//!     id: 20,
//!     kind: BlockKind::Ground,
//!     solid: true,
//! });
//! assert!(registry.is_solid(20));
//! ```
//!
use super::{blocks, BlockId, BlockKind};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    pub id: BlockId,
    #[serde(default = "Block::default_kind")]
    pub kind: BlockKind,
    #[serde(default = "Block::default_solid")]
    pub solid: bool, // Whether bodies collide with it
}

impl Block {
    fn default_kind() -> BlockKind { BlockKind::Ground }
    fn default_solid() -> bool { true }

    fn builtin(name: &str, id: BlockId, kind: BlockKind) -> Self {
        Self {
            name: name.to_string(),
            id,
            kind,
            solid: !kind.is_empty(),
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::builtin("stone", blocks::STONE, BlockKind::Ground)
    }
}

#[derive(Resource, Default, Clone)]
pub struct BlockRegistry {
    pub blocks: HashMap<String, Block>,
    pub blocks_by_id: HashMap<BlockId, String>,
}

impl BlockRegistry {
    /// The block set every arena relies on.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for block in [
            Block::builtin("air", blocks::AIR, BlockKind::Empty),
            Block::builtin("stone", blocks::STONE, BlockKind::Ground),
            Block::builtin("dirt", blocks::DIRT, BlockKind::Ground),
            Block::builtin("road", blocks::ROAD, BlockKind::Road),
            Block::builtin("jump", blocks::JUMP, BlockKind::Jump),
            Block::builtin("lava", blocks::LAVA, BlockKind::Lava),
            Block::builtin("shock", blocks::SHOCK, BlockKind::Shock),
            Block::builtin("ladder", blocks::LADDER, BlockKind::Ladder),
        ] {
            registry.register(block);
        }
        registry
    }

    /// Insert or replace a definition. A definition reusing an id replaces
    /// the previous owner of that id.
    pub fn register(&mut self, block: Block) {
        if let Some(previous) = self.blocks_by_id.insert(block.id, block.name.clone())
            && previous != block.name
        {
            self.blocks.remove(&previous);
        }
        self.blocks.insert(block.name.clone(), block);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Block> {
        self.blocks.get(name)
    }

    #[must_use]
    pub fn get_by_id(&self, id: BlockId) -> Option<&Block> {
        self.blocks_by_id
            .get(&id)
            .and_then(|name| self.blocks.get(name))
    }

    /// Lookup numeric ID for a block `name`.
    #[must_use]
    pub fn id_for_name(&self, name: &str) -> Option<BlockId> {
        self.blocks.get(name).map(|b| b.id)
    }

    /// Kind of the block with `id`; unknown ids count as empty.
    #[must_use]
    pub fn kind_of(&self, id: BlockId) -> BlockKind {
        self.get_by_id(id).map_or(BlockKind::Empty, |b| b.kind)
    }

    /// Whether bodies collide with `id`; unknown ids are passable.
    #[must_use]
    pub fn is_solid(&self, id: BlockId) -> bool {
        self.get_by_id(id).is_some_and(|b| b.solid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_set_is_complete() {
        let registry = BlockRegistry::builtin();
        assert_eq!(registry.kind_of(blocks::AIR), BlockKind::Empty);
        assert!(!registry.is_solid(blocks::AIR));
        for id in [blocks::STONE, blocks::ROAD, blocks::JUMP, blocks::LAVA, blocks::SHOCK, blocks::LADDER] {
            assert!(registry.is_solid(id), "builtin id {id} should be solid");
        }
        assert_eq!(registry.kind_of(blocks::LADDER), BlockKind::Ladder);
    }

    #[test]
    fn unknown_ids_are_empty_and_passable() {
        let registry = BlockRegistry::builtin();
        assert_eq!(registry.kind_of(200), BlockKind::Empty);
        assert!(!registry.is_solid(200));
    }

    #[test]
    fn reregistering_an_id_replaces_the_old_name() {
        let mut registry = BlockRegistry::builtin();
        registry.register(Block {
            name: "glass".to_string(),
            id: blocks::DIRT,
            kind: BlockKind::Ground,
            solid: false,
        });
        assert!(registry.get("dirt").is_none());
        assert_eq!(registry.id_for_name("glass"), Some(blocks::DIRT));
        assert!(!registry.is_solid(blocks::DIRT));
    }

    #[test]
    fn ron_definition_defaults_to_solid_ground() {
        let block: Block = ron::from_str("(name: \"granite\", id: 12)").unwrap();
        assert_eq!(block.kind, BlockKind::Ground);
        assert!(block.solid);
    }
}
