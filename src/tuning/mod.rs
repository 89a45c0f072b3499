//! Data-driven game balance
//!
//! Static authored tables: trick definitions keyed by (mode, trick id) and
//! level definitions keyed by (mode, index). Lookup misses are logged and
//! substituted with safe defaults; they never abort the frame loop.

pub mod levels;
pub mod tricks;

pub use levels::{FixedObstacle, GoalDef, GoalKind, Layout, LevelDef, Objectives, ZoneDef};
pub use levels::{level_def, levels_for_mode};
pub use tricks::{TrickDef, find_trick, tricks_for_mode};
