//! Per-entity position history and render-time smoothing.
//!
//! Network updates arrive at a variable rate. Each remote entity keeps its
//! last [`WINDOW`] samples in arrival order; once the window is full the
//! render position moves from the second-newest towards the newest sample
//! at the window's average update rate, so a single late packet does not
//! make the entity stutter. Until the window is full the entity snaps to
//! whatever arrived last.

use bevy::math::Vec3;
use std::collections::VecDeque;

/// Samples kept per remote entity.
pub const WINDOW: usize = 10;

/// One received position update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationSample {
    pub position: Vec3,
    /// Seconds, on the same clock as the render time.
    pub timestamp: f64,
}

impl InterpolationSample {
    #[must_use]
    pub fn new(position: Vec3, timestamp: f64) -> Self {
        Self { position, timestamp }
    }
}

/// Bounded FIFO of samples, oldest first. Never re-sorted.
#[derive(Debug, Clone, Default)]
pub struct InterpolationBuffer {
    samples: VecDeque<InterpolationSample>,
}

impl InterpolationBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self { samples: VecDeque::with_capacity(WINDOW) }
    }

    /// Append `sample`, evicting the oldest one when over capacity.
    pub fn push(&mut self, sample: InterpolationSample) {
        if self.samples.len() == WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.samples.len() == WINDOW
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterpolationSample> {
        self.samples.iter()
    }

    #[must_use]
    pub fn newest(&self) -> Option<&InterpolationSample> {
        self.samples.back()
    }

    /// Smoothed position at `now`, `None` until the window is full.
    #[must_use]
    pub fn sample_at(&self, now: f64) -> Option<Vec3> {
        if !self.is_full() {
            return None;
        }
        let oldest = self.samples.front()?;
        let b = self.newest()?;
        let a = self.samples.get(WINDOW - 2)?;

        #[allow(clippy::cast_precision_loss)]
        let time_scale = (b.timestamp - oldest.timestamp) / (WINDOW - 1) as f64;
        if time_scale <= 0.0 {
            return Some(b.position);
        }

        let fraction = ((now - a.timestamp) / time_scale).clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation)]
        let fraction = fraction as f32;
        Some(a.position + (b.position - a.position) * fraction)
    }
}

/// What the client knows about one remote entity.
#[derive(Debug, Clone, Default)]
pub struct RemoteTrack {
    buffer: InterpolationBuffer,
    /// Position shown while the window is still filling.
    latest: Vec3,
}

impl RemoteTrack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a received update.
    pub fn ingest(&mut self, sample: InterpolationSample) {
        let filling = !self.buffer.is_full();
        self.buffer.push(sample);
        if filling {
            self.latest = sample.position;
        }
    }

    /// Smoothed position, only once the window is full.
    #[must_use]
    pub fn compute_render_position(&self, now: f64) -> Option<Vec3> {
        self.buffer.sample_at(now)
    }

    /// Position to draw at `now`.
    #[must_use]
    pub fn render_position(&self, now: f64) -> Vec3 {
        self.compute_render_position(now).unwrap_or(self.latest)
    }

    #[must_use]
    pub fn buffer(&self) -> &InterpolationBuffer {
        &self.buffer
    }
}
