//! Session state: modes, phases, and the per-level subsystem aggregate
//!
//! A `GameSession` is one level attempt. All four subsystems are built fresh
//! per attempt (start, restart, advance); only the selected mode and the
//! persisted high scores outlive a session.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::character::{CharacterController, CharacterState, Facing};
use super::level::{Collectible, LevelSystem, Obstacle, SpecialZone};
use super::physics::PhysicsController;
use super::scoring::{ScoreSnapshot, ScoringSystem};
use crate::tuning::levels::{LevelDef, level_def, levels_for_mode};

/// Selectable game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    #[default]
    Skate,
    Surf,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Skate => "skate",
            GameMode::Surf => "surf",
        }
    }

    /// Parse a mode name. Unknown names are a configuration miss: logged and
    /// substituted with skate.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "skate" => GameMode::Skate,
            "surf" => GameMode::Surf,
            other => {
                log::warn!("unknown game mode '{}', defaulting to skate", other);
                GameMode::Skate
            }
        }
    }
}

/// Level difficulty; drives the terrain generator's variation amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl Difficulty {
    /// Maximum ramp delta per terrain segment
    pub fn variation(&self) -> f32 {
        match self {
            Difficulty::Low => 20.0,
            Difficulty::Medium => 40.0,
            Difficulty::High => 60.0,
        }
    }
}

/// Session phase. Pause is a gate around the update call: render continues,
/// frame-counted timers simply stop advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    LevelComplete,
    GameOver,
}

/// Read-only character snapshot for the UI collaborator
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSnapshot {
    pub state: CharacterState,
    pub facing: Facing,
    pub trick_in_progress: bool,
    pub combo_counter: u32,
    pub pos_x: f32,
    pub pos_y: f32,
    pub grounded: bool,
}

/// One level attempt: the four core subsystems plus session-scoped counters
#[derive(Debug)]
pub struct GameSession {
    pub mode: GameMode,
    pub level_index: usize,
    pub def: &'static LevelDef,
    pub phase: GamePhase,
    pub physics: PhysicsController,
    pub character: CharacterController,
    pub level: LevelSystem,
    pub scoring: ScoringSystem,
    /// Frames left before the run fails
    pub time_remaining: u32,
    pub frame: u64,
    pub seed: u64,
}

impl GameSession {
    pub fn new(mode: GameMode, level_index: usize, seed: u64) -> Self {
        let def = level_def(mode, level_index);
        let mut rng = Pcg32::seed_from_u64(seed.wrapping_add(level_index as u64));
        let level = LevelSystem::generate(def, mode, &mut rng);
        let physics = PhysicsController::new(mode, level.spawn_point());

        log::info!(
            "session start: {} level {} '{}' (seed {})",
            mode.as_str(),
            level_index,
            def.name,
            seed
        );

        Self {
            mode,
            level_index,
            def,
            phase: GamePhase::Playing,
            physics,
            character: CharacterController::new(mode),
            level,
            scoring: ScoringSystem::new(&def.objectives),
            time_remaining: def.time_limit_secs * 60,
            frame: 0,
            seed,
        }
    }

    /// Whether another authored level follows this one
    pub fn has_next_level(&self) -> bool {
        self.level_index + 1 < levels_for_mode(self.mode).len()
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.time_remaining / 60
    }

    // --- read-only snapshots for the rendering/UI collaborator ---

    pub fn score_state(&self) -> ScoreSnapshot {
        self.scoring.snapshot()
    }

    pub fn character_state(&self) -> CharacterSnapshot {
        CharacterSnapshot {
            state: self.character.state(),
            facing: self.character.facing(),
            trick_in_progress: self.character.trick_in_progress(),
            combo_counter: self.character.combo_counter(),
            pos_x: self.physics.pos.x,
            pos_y: self.physics.pos.y,
            grounded: self.physics.grounded,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.level.obstacles()
    }

    pub fn collectibles(&self) -> &[Collectible] {
        self.level.collectibles()
    }

    pub fn zones(&self) -> &[SpecialZone] {
        self.level.zones()
    }

    pub fn camera_x(&self) -> f32 {
        self.level.camera_x()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_defaults_to_skate() {
        assert_eq!(GameMode::from_name("surf"), GameMode::Surf);
        assert_eq!(GameMode::from_name("SKATE"), GameMode::Skate);
        assert_eq!(GameMode::from_name("snowboard"), GameMode::Skate);
    }

    #[test]
    fn test_difficulty_variation_table() {
        assert_eq!(Difficulty::Low.variation(), 20.0);
        assert_eq!(Difficulty::Medium.variation(), 40.0);
        assert_eq!(Difficulty::High.variation(), 60.0);
    }

    #[test]
    fn test_session_builds_fresh() {
        let session = GameSession::new(GameMode::Skate, 0, 1234);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.scoring.score(), 0);
        assert_eq!(session.frame, 0);
        assert_eq!(session.time_remaining, session.def.time_limit_secs * 60);
        assert!(session.has_next_level());
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = GameSession::new(GameMode::Skate, 0, 42);
        let b = GameSession::new(GameMode::Skate, 0, 42);

        assert_eq!(a.obstacles().len(), b.obstacles().len());
        for (oa, ob) in a.obstacles().iter().zip(b.obstacles()) {
            assert_eq!(oa.kind, ob.kind);
            assert_eq!(oa.aabb, ob.aabb);
        }
        assert_eq!(a.collectibles().len(), b.collectibles().len());
    }

    #[test]
    fn test_last_level_has_no_next() {
        let count = levels_for_mode(GameMode::Surf).len();
        let session = GameSession::new(GameMode::Surf, count - 1, 7);
        assert!(!session.has_next_level());
    }
}
