//! Loopback stand-in for the network receive path.
//!
//! A background thread plays a few bots circling the arena and pushes their
//! positions into the shared `RemoteRegistry` at the configured rate, with
//! jittered send times so the interpolator sees realistic arrival gaps.
use bevy::prelude::*;
use bevy::time::Real;
use pixelcide::remote::{InterpolationSample, RemoteId, RemoteRegistry};
use pixelcide::settings::{NetworkSettings, Settings};
use pixelcide::world::arena;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Small deterministic generator for arrival jitter.
struct Lcg(u32);

impl Lcg {
    /// Next value in `[0, 1)`.
    fn next_unit(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        #[allow(clippy::cast_precision_loss)]
        let v = ((self.0 >> 8) & 0xffff) as f32 / 65_536.0;
        v
    }
}

#[allow(clippy::cast_precision_loss)]
fn bot_position(bot: u32, t: f32) -> Vec3 {
    let centre = arena::spawn_point() + Vec3::new(0.0, 0.0, 8.0);
    let radius = 3.0 + bot as f32 * 2.0;
    let phase = bot as f32 * 2.1 + t * (0.6 / (1.0 + bot as f32 * 0.3));
    centre + Vec3::new(phase.cos() * radius, 0.0, phase.sin() * radius)
}

/// Handle to the running feed thread. Dropping it stops the feed.
#[derive(Resource)]
pub struct LoopbackFeed {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl LoopbackFeed {
    /// Ask the thread to stop and wait for it.
    ///
    /// # Return
    /// `false` if the thread panicked.
    pub fn stop(mut self) -> bool {
        self.stop.store(true, Ordering::Relaxed);
        self.handle.take().is_none_or(|h| h.join().is_ok())
    }
}

impl Drop for LoopbackFeed {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Start the feed thread. `clock_origin` is the real game clock reading at
/// the moment of the call so samples share the render clock.
///
/// # Return
/// `None` when no bots are configured or the thread could not be spawned.
pub fn spawn_loopback(registry: RemoteRegistry, network: NetworkSettings, clock_origin: f64) -> Option<LoopbackFeed> {
    if network.loopback_bots == 0 {
        return None;
    }
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);
    let bots = network.loopback_bots;
    let rate = network.update_rate_hz;

    let spawned = thread::Builder::new()
        .name("loopback-feed".to_string())
        .spawn(move || {
            let start = Instant::now();
            let interval = network.update_interval();
            let mut rng = Lcg(0x1234_5678);
            while !stop_flag.load(Ordering::Relaxed) {
                let elapsed = start.elapsed().as_secs_f32();
                for bot in 0..network.loopback_bots {
                    let sample = InterpolationSample::new(
                        bot_position(bot, elapsed),
                        clock_origin + start.elapsed().as_secs_f64(),
                    );
                    registry.ingest(RemoteId(bot + 1), sample);
                }
                let jitter = (rng.next_unit() * 2.0 - 1.0) * network.jitter;
                let wait = (interval * (1.0 + jitter)).max(0.001);
                thread::sleep(Duration::from_secs_f32(wait));
            }
        });
    match spawned {
        Ok(handle) => {
            info!("loopback feed: {bots} bots at {rate} Hz");
            Some(LoopbackFeed { stop, handle: Some(handle) })
        }
        Err(e) => {
            error!("loopback feed thread failed to start: {e}");
            None
        }
    }
}

/// Startup system wiring the loopback feed to the registry resource.
#[allow(clippy::needless_pass_by_value)]
pub fn start_loopback(
    mut commands: Commands,
    time: Res<Time<Real>>,
    registry: Res<RemoteRegistry>,
    settings: Res<Settings>,
) {
    let origin = time.elapsed_seconds_f64();
    if let Some(feed) = spawn_loopback(registry.clone(), settings.network.clone(), origin) {
        commands.insert_resource(feed);
    }
}
