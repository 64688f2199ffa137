use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use pixelcide::block::loader as block_loader;
use pixelcide::player::{camera_look, cursor_grab, player_tick, KineticEvent};
use pixelcide::remote::{spawn_remote_players, sync_remote_transforms, RemoteRegistry};
use pixelcide::settings::loader as settings_loader;
use pixelcide::world::{arena, World};

mod app;
use app::{
    forward_kinetic_events,
    kill_command,
    respawn_dead,
    setup,
    setup_remote_appearance,
    spawn_arena_geometry,
    spawn_effect_overlay,
    start_loopback,
    sync_vsync_settings,
    update_effect_overlay,
};

fn main() {
    let settings = settings_loader::load_settings_from_dir(settings_loader::SETTINGS_DIR);
    let settings_watcher = settings_loader::setup_settings_watcher(settings_loader::SETTINGS_DIR)
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());

    let mut world = World::new();
    arena::build_arena(&mut world);

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "pixelcide".to_string(),
                position: WindowPosition::Centered(MonitorSelection::Primary),
                present_mode: PresentMode::AutoNoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(LogDiagnosticsPlugin::default());

    app.add_event::<KineticEvent>();

    app.insert_resource(world);
    app.insert_resource(RemoteRegistry::new());
    app.insert_resource(block_loader::load_blocks_from_dir(block_loader::BLOCKS_DIR));
    app.insert_resource(
        block_loader::setup_block_watcher(block_loader::BLOCKS_DIR).unwrap_or_else(|_| {
            block_loader::BlockWatcher::stub()
        }),
    );

    app.insert_resource(settings);
    app.insert_resource(settings_watcher);

    app.add_systems(Startup, setup);
    app.add_systems(Startup, spawn_arena_geometry);
    app.add_systems(Startup, setup_remote_appearance);
    app.add_systems(Startup, spawn_effect_overlay);
    app.add_systems(Startup, start_loopback);

    app.add_systems(Update, block_loader::check_block_changes);
    app.add_systems(Update, settings_loader::check_settings_changes);
    app.add_systems(Update, sync_vsync_settings);

    app.add_systems(Update, cursor_grab);
    app.add_systems(
        Update,
        (camera_look, kill_command, player_tick, respawn_dead, forward_kinetic_events).chain(),
    );
    app.add_systems(Update, (spawn_remote_players, sync_remote_transforms).chain());
    app.add_systems(Update, update_effect_overlay.after(player_tick));

    app.run();
}
