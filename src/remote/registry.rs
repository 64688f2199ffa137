//! Shared table of remote tracks.
//!
//! The network receive path and the render systems run on different
//! threads. Both hold a clone of the same `RemoteRegistry`: the table lock
//! is only held to find or create a track, and each track has its own lock
//! so an ingest and a render-position read of one entity never interleave.

use super::buffer::{InterpolationSample, RemoteTrack};
use super::RemoteId;
use bevy::log::warn;
use bevy::math::Vec3;
use bevy::prelude::Resource;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

pub type SharedTrack = Arc<Mutex<RemoteTrack>>;

#[derive(Resource, Clone, Default)]
pub struct RemoteRegistry {
    tracks: Arc<Mutex<HashMap<RemoteId, SharedTrack>>>,
}

fn lock_or_recover<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("{what} mutex poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

impl RemoteRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<RemoteId, SharedTrack>> {
        lock_or_recover(&self.tracks, "remote table")
    }

    /// Track for `id`, if any sample was ever received for it.
    #[must_use]
    pub fn track(&self, id: RemoteId) -> Option<SharedTrack> {
        self.table().get(&id).cloned()
    }

    /// Record an update for `id`, creating its track on first contact.
    pub fn ingest(&self, id: RemoteId, sample: InterpolationSample) {
        let track = Arc::clone(self.table().entry(id).or_default());
        lock_or_recover(&track, "remote track").ingest(sample);
    }

    /// Where to draw `id` at `now`.
    #[must_use]
    pub fn render_position(&self, id: RemoteId, now: f64) -> Option<Vec3> {
        let track = self.track(id)?;
        let position = lock_or_recover(&track, "remote track").render_position(now);
        Some(position)
    }

    /// Forget `id` (player left or timed out).
    pub fn remove(&self, id: RemoteId) -> bool {
        self.table().remove(&id).is_some()
    }

    /// Known ids, in no particular order.
    #[must_use]
    pub fn ids(&self) -> Vec<RemoteId> {
        self.table().keys().copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }
}
