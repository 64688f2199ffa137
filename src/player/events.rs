//! Discrete notifications produced while resolving a tick.
//!
//! The resolver never plays sounds or talks to the network itself. It
//! reports what happened and the driver forwards these to audio and, for
//! deaths, to the server.

use bevy::prelude::Event;
use std::fmt;

/// Why a body died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeathCause {
    Gravity,
    Lava,
    Electrocution,
    Misadventure,
    /// Self-inflicted through the kill command.
    Pixelcide,
}

impl DeathCause {
    /// Message shown in the kill feed.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            DeathCause::Gravity => "killed by gravity",
            DeathCause::Lava => "incinerated by lava",
            DeathCause::Electrocution => "electrocuted",
            DeathCause::Misadventure => "killed by misadventure",
            DeathCause::Pixelcide => "committed pixelcide",
        }
    }
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum KineticEvent {
    /// Hard landing, strong enough to hurt.
    GroundImpact,
    /// Launched by a jump pad.
    JumpPad,
    Died(DeathCause),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn causes_render_their_kill_feed_message() {
        assert_eq!(DeathCause::Gravity.to_string(), "killed by gravity");
        assert_eq!(DeathCause::Lava.to_string(), "incinerated by lava");
        assert_eq!(DeathCause::Electrocution.to_string(), "electrocuted");
        assert_eq!(DeathCause::Misadventure.to_string(), "killed by misadventure");
    }
}
