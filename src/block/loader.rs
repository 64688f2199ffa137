//! Block loader and watcher for block definitions stored as RON files,
//! with hot reloading while the client runs.
//! # Example
//! ```no_run
//! use bevy::prelude::*;
//! use pixelcide::block::loader as block_loader;
//!
//! let mut app = App::new();
//! app.insert_resource(block_loader::load_blocks_from_dir("data/blocks"));
//! app.insert_resource(
//!     block_loader::setup_block_watcher("data/blocks")
//!         .unwrap_or_else(|_| block_loader::BlockWatcher::stub()),
//! );
//! app.add_systems(Update, block_loader::check_block_changes);
//! ```

use super::{Block, BlockRegistry};
use crate::ron_loader::{load_ron_files, setup_ron_watcher};
use bevy::log::info;
use bevy::prelude::{Res, ResMut, Resource};

pub const BLOCKS_DIR: &str = "data/blocks";

#[derive(Resource)]
pub struct BlockWatcher(pub crate::ron::RonWatcher);

impl BlockWatcher {
    #[must_use]
    pub fn stub() -> Self {
        BlockWatcher(crate::ron::RonWatcher::stub())
    }
}

/// Build the registry: built-in blocks first, then every definition found
/// in `path` layered on top.
///
/// # Arguments
/// * `path` - directory holding block RON files (e.g. `data/blocks`)
#[must_use]
pub fn load_blocks_from_dir(path: &str) -> BlockRegistry {
    let mut registry = BlockRegistry::builtin();
    let defs: Vec<Block> = load_ron_files(path);
    let count = defs.len();
    for block in defs {
        registry.register(block);
    }
    info!("block registry: {} definitions ({count} from '{path}')", registry.blocks.len());
    registry
}

/// Watch the block directory for edits.
///
/// # Errors
/// Returns a `notify::Error` if the underlying file watcher could not be created or configured.
pub fn setup_block_watcher(path: &str) -> Result<BlockWatcher, notify::Error> {
    setup_ron_watcher(path).map(BlockWatcher)
}

/// Reload the registry when the watcher saw a change.
#[allow(clippy::needless_pass_by_value)]
pub fn check_block_changes(watcher: Res<BlockWatcher>, mut registry: ResMut<BlockRegistry>) {
    if watcher.0.take_changed() {
        info!("block definitions changed, reloading");
        *registry = load_blocks_from_dir(BLOCKS_DIR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{blocks, BlockKind};

    #[test]
    fn missing_dir_gives_builtin_set() {
        let registry = load_blocks_from_dir("/no/such/blocks/dir");
        assert_eq!(registry.kind_of(blocks::JUMP), BlockKind::Jump);
        assert_eq!(registry.blocks.len(), BlockRegistry::builtin().blocks.len());
    }

    #[test]
    fn files_extend_the_builtin_set() {
        let dir = std::env::temp_dir().join(format!("pixelcide-blocks-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("vine.ron"),
            "(name: \"vine\", id: 30, kind: Ladder)",
        )
        .unwrap();

        let registry = load_blocks_from_dir(dir.to_str().unwrap());
        assert_eq!(registry.kind_of(30), BlockKind::Ladder);
        assert!(registry.is_solid(30));
        assert_eq!(registry.kind_of(blocks::LAVA), BlockKind::Lava);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
