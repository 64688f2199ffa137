//! Chunk storage.
//!
//! A `Chunk` is a `CHUNK_SIZE x MAX_HEIGHT x CHUNK_SIZE` column of block ids.
//! Reads outside the column answer `AIR`, writes outside are ignored.
//!
//! # Example
//! ```
//! use pixelcide::chunk::Chunk;
//! use pixelcide::block::blocks;
//!
//! let mut chunk = Chunk::new();
//! chunk.set(1, 2, 3, blocks::STONE);
//! assert_eq!(chunk.get(1, 2, 3), blocks::STONE);
//! assert_eq!(chunk.get(99, 2, 3), blocks::AIR);
//! ```

use crate::block::{blocks, BlockId};
use crate::world::MAX_HEIGHT;

pub const CHUNK_SIZE: usize = 32;

#[derive(Clone)]
pub struct Chunk {
    pub blocks: Vec<BlockId>,
}

impl Chunk {
    /// Create a chunk filled with `AIR`.
    #[must_use]
    pub fn new() -> Self {
        Chunk {
            blocks: vec![blocks::AIR; CHUNK_SIZE * MAX_HEIGHT * CHUNK_SIZE],
        }
    }

    #[inline]
    fn index(x: usize, y: usize, z: usize) -> Option<usize> {
        (x < CHUNK_SIZE && y < MAX_HEIGHT && z < CHUNK_SIZE)
            .then(|| x + y * CHUNK_SIZE + z * CHUNK_SIZE * MAX_HEIGHT)
    }

    /// Read a block ID at local chunk coordinates, `AIR` if out of bounds.
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockId {
        Self::index(x, y, z).map_or(blocks::AIR, |i| self.blocks[i])
    }

    /// Write a block ID at local chunk coordinates.
    pub fn set(&mut self, x: usize, y: usize, z: usize, block: BlockId) {
        if let Some(i) = Self::index(x, y, z) {
            self.blocks[i] = block;
        }
    }

    /// Number of non-air cells, logged when the arena is spawned.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.blocks.iter().filter(|&&b| b != blocks::AIR).count()
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}
