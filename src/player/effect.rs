//! Transient full-screen feedback (death, teleport, explosion, hard landing).
//!
//! The state is tiny: which effect is showing and for how long. Rendering
//! reads `intensity()` to fade an overlay; the resolver and the driver write
//! it. Everything but `Death` fades out on its own after
//! [`EFFECT_DURATION`] seconds.

/// Seconds after which a self-clearing effect returns to `None`.
pub const EFFECT_DURATION: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenEffectKind {
    #[default]
    None,
    Death,
    Teleport,
    Explosion,
    Fall,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenEffectState {
    pub kind: ScreenEffectKind,
    /// Seconds since the effect started.
    pub counter: f32,
}

impl ScreenEffectState {
    /// Start `kind` from the beginning.
    pub fn trigger(&mut self, kind: ScreenEffectKind) {
        self.kind = kind;
        self.counter = 0.0;
    }

    /// Show a hard landing. `damage` in `(0.5, 1)` maps linearly onto a
    /// counter in `(2, 0)`: the harder the fall, the further from fading out
    /// the effect starts.
    pub fn fall(&mut self, damage: f32) {
        self.kind = ScreenEffectKind::Fall;
        self.counter = EFFECT_DURATION - (damage - 0.5) * 4.0;
    }

    /// Advance by `dt` seconds, clearing expired effects.
    pub fn advance(&mut self, dt: f32) {
        if self.kind == ScreenEffectKind::None {
            return;
        }
        self.counter += dt;
        let self_clearing = matches!(
            self.kind,
            ScreenEffectKind::Teleport | ScreenEffectKind::Explosion | ScreenEffectKind::Fall
        );
        if self_clearing && self.counter > EFFECT_DURATION {
            *self = Self::default();
        }
    }

    /// Overlay strength in `[0, 1]`.
    #[must_use]
    pub fn intensity(&self) -> f32 {
        match self.kind {
            ScreenEffectKind::None => 0.0,
            _ => (1.0 - self.counter / EFFECT_DURATION).clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.kind != ScreenEffectKind::None
    }
}
