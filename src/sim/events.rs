//! Outbound simulation events
//!
//! Cross-component wiring is an explicit tagged union instead of callbacks:
//! subsystems queue events during the frame, the orchestrator fans them out
//! (tricks feed the scoring system, zones start special modes) and returns
//! the drained queue to the host for UI/audio reactions.

use super::level::{CollectibleKind, ZoneKind};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A trick was landed; `score` already includes combo scaling and the
    /// physics bonus
    TrickPerformed {
        trick_id: &'static str,
        score: u32,
        combo: u32,
    },
    /// A burst trick's animation finished, or a continuous trick ended
    TrickEnded { trick_id: &'static str },
    /// A continuous trick (grind, tube ride) accrued another second
    TrickScoreTick { trick_id: &'static str, points: u32 },
    /// The character controller's combo window lapsed (length > 1 only)
    ComboEnded { length: u32 },
    /// The scoring system banked its combo payout (independent window)
    ComboBanked { points: u64, length: u32 },
    CollectibleCollected {
        kind: CollectibleKind,
        value: u32,
        x: f32,
        y: f32,
    },
    ZoneEntered { zone: ZoneKind },
    SpecialModeStarted { multiplier: f32 },
    SpecialModeEnded,
    /// All objectives met; fired exactly once per level instance
    LevelCompleted { score: u64 },
    /// The level's time limit ran out
    TimeExpired { score: u64 },
}
