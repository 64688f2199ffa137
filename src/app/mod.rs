pub mod display;
pub mod feedback;
pub mod loopback;
pub mod setup;

pub use display::{spawn_effect_overlay, sync_vsync_settings, update_effect_overlay};
pub use feedback::{forward_kinetic_events, kill_command, respawn_dead};
pub use loopback::start_loopback;
pub use setup::{setup, setup_remote_appearance, spawn_arena_geometry};
