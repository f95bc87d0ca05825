//! Events into and out of the runner.
//!
//! Hosts translate devices into [`InputEvent`]s. The runner never plays
//! audio or writes logs itself: it queues [`RunnerEvent`]s and the host
//! drains them after each call.

use crate::audio::SoundId;
use crate::entities::obstacle::ObstacleKind;

/// Abstract player input, independent of keyboard, mouse or touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    JumpPressed,
    JumpReleased,
    DuckPressed,
    DuckReleased,
    RestartRequested,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunnerEvent {
    /// Play a sound effect.
    Sound(SoundId),
    /// First activation: the host should start decoding sounds.
    LoadSounds,
    /// First landing; the viewport starts expanding.
    IntroStarted,
    /// Intro finished, obstacles will follow after the clear time.
    GameStarted { play_count: u32 },
    /// A distance milestone was passed.
    Achievement { distance: u32 },
    /// The t-rex ran into `obstacle`.
    Crashed {
        distance: u32,
        obstacle: ObstacleKind,
    },
    NewHighScore { distance: u32 },
    Restarted { play_count: u32 },
    Paused,
    Resumed,
}

impl RunnerEvent {
    /// Short line for the event log. Sound cues are not logged.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Sound(_) => None,
            Self::LoadSounds => Some("Loading sounds".to_string()),
            Self::IntroStarted => Some("Here we go!".to_string()),
            Self::GameStarted { play_count } => Some(format!("Run #{} started", play_count)),
            Self::Achievement { distance } => Some(format!("Reached {}!", distance)),
            Self::Crashed { distance, obstacle } => Some(match obstacle {
                ObstacleKind::CactusSmall => format!("Hit a small cactus at {}", distance),
                ObstacleKind::CactusLarge => format!("Hit a large cactus at {}", distance),
            }),
            Self::NewHighScore { distance } => Some(format!("New high score: {}", distance)),
            Self::Restarted { play_count } => Some(format!("Restart (run #{})", play_count)),
            Self::Paused => Some("Paused".to_string()),
            Self::Resumed => Some("Resumed".to_string()),
        }
    }
}
