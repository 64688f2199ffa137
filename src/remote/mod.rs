//! Remote players: interpolation buffers, the shared registry fed by the
//! network, and the systems that place remote entities each frame.
//!
//! # Example
//!
//! ```
//! use bevy::math::Vec3;
//! use pixelcide::remote::{InterpolationSample, RemoteId, RemoteRegistry};
//!
//! let registry = RemoteRegistry::new();
//! let feed = registry.clone(); // handed to the network thread
//! feed.ingest(RemoteId(7), InterpolationSample::new(Vec3::new(1.0, 4.0, 2.0), 0.0));
//! assert_eq!(registry.render_position(RemoteId(7), 0.1), Some(Vec3::new(1.0, 4.0, 2.0)));
//! ```

pub mod buffer;
pub mod registry;

pub use buffer::{InterpolationBuffer, InterpolationSample, RemoteTrack, WINDOW};
pub use registry::RemoteRegistry;

use bevy::log::info;
use bevy::prelude::*;
use bevy::time::Real;
use std::collections::HashSet;

/// Server-assigned identifier of a remote player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemoteId(pub u32);

/// Marks the entity drawing a remote player.
#[derive(Component, Debug, Clone, Copy)]
pub struct RemotePlayer {
    pub id: RemoteId,
}

/// Shared look of remote player entities, set up by the client.
#[derive(Resource, Clone, Default)]
pub struct RemoteAppearance {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Spawn an entity for every id that appeared in the registry and despawn
/// entities whose id was removed.
#[allow(clippy::needless_pass_by_value)]
pub fn spawn_remote_players(
    mut commands: Commands,
    registry: Res<RemoteRegistry>,
    appearance: Res<RemoteAppearance>,
    existing: Query<(Entity, &RemotePlayer)>,
) {
    let known: HashSet<RemoteId> = registry.ids().into_iter().collect();
    let mut shown = HashSet::new();

    for (entity, remote) in &existing {
        if known.contains(&remote.id) {
            shown.insert(remote.id);
        } else {
            info!("remote player {:?} left", remote.id);
            commands.entity(entity).despawn_recursive();
        }
    }

    for id in known.difference(&shown) {
        info!("remote player {id:?} joined");
        commands.spawn((
            PbrBundle {
                mesh: appearance.mesh.clone(),
                material: appearance.material.clone(),
                ..default()
            },
            RemotePlayer { id: *id },
        ));
    }
}

/// Move remote entities to their interpolated position for this frame.
///
/// Render time is read from `Time<Real>`, the clock samples are stamped on.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_remote_transforms(
    time: Res<Time<Real>>,
    registry: Res<RemoteRegistry>,
    mut query: Query<(&RemotePlayer, &mut Transform)>,
) {
    let now = time.elapsed_seconds_f64();
    for (remote, mut transform) in &mut query {
        if let Some(position) = registry.render_position(remote.id, now) {
            transform.translation = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::{TimePlugin, TimeUpdateStrategy};
    use std::time::Duration;

    #[test]
    fn render_time_follows_the_real_clock_across_long_frames() {
        let registry = RemoteRegistry::new();
        let mut app = App::new();
        app.add_plugins(TimePlugin)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(600)))
            .insert_resource(registry.clone())
            .add_systems(Update, sync_remote_transforms);
        let id = RemoteId(1);
        let entity = app.world_mut().spawn((RemotePlayer { id }, Transform::default())).id();

        // one 600 ms frame: the virtual clock only advances 250 ms of it
        app.update();
        app.update();
        let wall = app.world().resource::<Time<Real>>().elapsed_seconds_f64();
        assert!((wall - 0.6).abs() < 1e-9);

        for i in 0..10u32 {
            let t = wall - 0.1 * f64::from(9 - i);
            #[allow(clippy::cast_precision_loss)]
            registry.ingest(id, InterpolationSample::new(Vec3::new(i as f32, 0.0, 0.0), t));
        }

        // 50 ms after the newest sample arrived
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)));
        app.update();

        let rendered = app.world().get::<Transform>(entity).map(|t| t.translation.x);
        assert_eq!(rendered, Some(9.0));
    }
}
