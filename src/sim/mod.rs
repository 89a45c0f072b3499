//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic for a given input stream:
//! - One update per rendered frame, wall-clock dt clamped before integration
//! - Seeded RNG only (level generation)
//! - No rendering or platform dependencies; wall-clock time arrives as a
//!   parameter, never from an ambient source

pub mod aabb;
pub mod character;
pub mod events;
pub mod level;
pub mod physics;
pub mod scoring;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use character::{CharacterController, CharacterCtx, CharacterState, Facing};
pub use events::GameEvent;
pub use level::{
    BackgroundLayer, Collectible, CollectibleKind, CollisionReport, LevelSystem, Obstacle,
    ObstacleKind, SpecialZone, WaveKind, ZoneKind,
};
pub use physics::{CollisionResponse, PhysicsConfig, PhysicsController};
pub use scoring::{ScoreSnapshot, ScoreSource, ScoringSystem};
pub use state::{CharacterSnapshot, Difficulty, GameMode, GamePhase, GameSession};
pub use tick::tick;
