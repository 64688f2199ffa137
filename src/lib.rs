pub mod block;
pub mod chunk;
pub mod player;
pub mod remote;
pub mod ron;
pub use crate::ron as ron_loader;
pub mod settings;
pub mod world;
