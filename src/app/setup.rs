//! Startup systems: the local player, lighting, placeholder arena geometry
//! and the shared look of remote players.
use bevy::prelude::*;
use pixelcide::block::{BlockKind, BlockRegistry};
use pixelcide::chunk::{Chunk, CHUNK_SIZE};
use pixelcide::player::{KineticBody, PlayerLook};
use pixelcide::remote::RemoteAppearance;
use pixelcide::world::{arena, World};
use std::collections::HashMap;

/// Spawn the camera carrying the local body, and a sun.
pub fn setup(mut commands: Commands) {
    let spawn = arena::spawn_point();
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(spawn),
            ..default()
        },
        KineticBody::new(spawn),
        PlayerLook::default(),
    ));

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: false,
            ..default()
        },
        transform: Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -1.0, 0.4, 0.0)),
        ..default()
    });
}

fn kind_color(kind: BlockKind) -> Color {
    match kind {
        BlockKind::Empty | BlockKind::Ground => Color::srgb(0.45, 0.45, 0.42),
        BlockKind::Road => Color::srgb(0.15, 0.15, 0.18),
        BlockKind::Jump => Color::srgb(0.2, 0.8, 0.3),
        BlockKind::Lava => Color::srgb(0.95, 0.35, 0.05),
        BlockKind::Shock => Color::srgb(0.3, 0.6, 1.0),
        BlockKind::Ladder => Color::srgb(0.6, 0.4, 0.2),
    }
}

/// Spawn a unit cube for every block with air above it. Stand-in for the
/// chunk mesher, which lives outside this client core.
#[allow(clippy::needless_pass_by_value, clippy::cast_precision_loss)]
pub fn spawn_arena_geometry(
    mut commands: Commands,
    world: Res<World>,
    registry: Res<BlockRegistry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let cube = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let mut palette: HashMap<BlockKind, Handle<StandardMaterial>> = HashMap::new();
    let mut spawned = 0usize;

    for (&(cx, cz), chunk) in &world.chunks {
        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                for y in 0..pixelcide::world::MAX_HEIGHT {
                    let id = chunk.get(x, y, z);
                    let kind = registry.kind_of(id);
                    if kind.is_empty() || registry.is_solid(chunk.get(x, y + 1, z)) {
                        continue;
                    }
                    let material = palette
                        .entry(kind)
                        .or_insert_with(|| materials.add(StandardMaterial::from(kind_color(kind))))
                        .clone();
                    let origin = Vec3::new(
                        (cx * CHUNK_SIZE as i32) as f32 + x as f32,
                        y as f32,
                        (cz * CHUNK_SIZE as i32) as f32 + z as f32,
                    );
                    commands.spawn(PbrBundle {
                        mesh: cube.clone(),
                        material,
                        transform: Transform::from_translation(origin + Vec3::splat(0.5)),
                        ..default()
                    });
                    spawned += 1;
                }
            }
        }
    }
    let filled: usize = world.chunks.values().map(Chunk::filled).sum();
    info!("arena geometry: {spawned} surface blocks of {filled} in {} chunks", world.chunks.len());
}

/// Mesh and material used for every remote player.
pub fn setup_remote_appearance(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(RemoteAppearance {
        mesh: meshes.add(Cuboid::new(0.6, 1.8, 0.6)),
        material: materials.add(StandardMaterial::from(Color::srgb(0.85, 0.1, 0.1))),
    });
}
