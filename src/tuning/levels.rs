//! Authored level definitions, keyed by (mode, index).
//!
//! A level definition is pure data: objectives, layout knobs for the
//! procedural generator, and fixed obstacles/zones the generator merges in.

use crate::sim::level::{ObstacleKind, WaveKind, ZoneKind};
use crate::sim::state::{Difficulty, GameMode};

/// Objective goal kinds tracked by the scoring system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalKind {
    /// Perform the named trick `target` times
    PerformTrick { trick_id: &'static str },
    /// Land a combo of at least `target` tricks
    Combo,
    /// Gather `target` collectibles
    Collectibles,
    /// Spend `target` seconds riding tubes (surf)
    TubeTime,
}

/// A single special goal with its completion target
#[derive(Debug, Clone, Copy)]
pub struct GoalDef {
    pub kind: GoalKind,
    pub target: u32,
    pub label: &'static str,
}

/// Level completion requirements
#[derive(Debug, Clone, Copy)]
pub struct Objectives {
    pub score_target: Option<u64>,
    pub collectibles_target: Option<u32>,
    pub special_goals: &'static [GoalDef],
}

/// Knobs for the procedural generator
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    /// World length in units
    pub length: f32,
    /// Higher frequency = denser obstacles (spacing = 500 / frequency)
    pub obstacle_frequency: f32,
    /// Higher frequency = denser collectibles (spacing = 150 / frequency)
    pub collectible_frequency: f32,
    /// Scales wave segment amplitudes (surf; ignored for skate)
    pub wave_height: f32,
}

/// An author-placed obstacle merged into the generated level
#[derive(Debug, Clone, Copy)]
pub struct FixedObstacle {
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Moving obstacles oscillate horizontally on wall-clock time
    pub moving: bool,
}

/// An author-placed wave section (surf levels); overrides the procedural
/// roll for the segments it covers
#[derive(Debug, Clone, Copy)]
pub struct WaveSectionDef {
    pub kind: WaveKind,
    pub start_x: f32,
    pub end_x: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

/// An author-placed special zone
#[derive(Debug, Clone, Copy)]
pub struct ZoneDef {
    pub kind: ZoneKind,
    pub x: f32,
    pub width: f32,
}

/// A complete authored level
#[derive(Debug)]
pub struct LevelDef {
    pub id: &'static str,
    pub name: &'static str,
    pub difficulty: Difficulty,
    /// Run fails when this many seconds elapse
    pub time_limit_secs: u32,
    pub objectives: Objectives,
    pub layout: Layout,
    pub fixed_obstacles: &'static [FixedObstacle],
    pub wave_sections: &'static [WaveSectionDef],
    pub special_zones: &'static [ZoneDef],
}

pub static SKATE_LEVELS: [LevelDef; 3] = [
    LevelDef {
        id: "warehouse",
        name: "Warehouse Park",
        difficulty: Difficulty::Low,
        time_limit_secs: 120,
        objectives: Objectives {
            score_target: Some(2500),
            collectibles_target: Some(5),
            special_goals: &[GoalDef {
                kind: GoalKind::PerformTrick { trick_id: "ollie" },
                target: 3,
                label: "Ollie 3 times",
            }],
        },
        layout: Layout {
            length: 4000.0,
            obstacle_frequency: 1.0,
            collectible_frequency: 1.0,
            wave_height: 1.0,
        },
        fixed_obstacles: &[
            FixedObstacle {
                kind: ObstacleKind::Rail { trick_bonus: 50 },
                x: 600.0,
                y: 380.0,
                w: 180.0,
                h: 12.0,
                moving: false,
            },
            FixedObstacle {
                kind: ObstacleKind::Ramp {
                    launch_velocity: 10.0,
                },
                x: 1400.0,
                y: 360.0,
                w: 80.0,
                h: 40.0,
                moving: false,
            },
        ],
        wave_sections: &[],
        special_zones: &[ZoneDef {
            kind: ZoneKind::ScoreBoost {
                multiplier: 2.0,
                duration_secs: 8.0,
            },
            x: 2200.0,
            width: 300.0,
        }],
    },
    LevelDef {
        id: "downtown",
        name: "Downtown Rails",
        difficulty: Difficulty::Medium,
        time_limit_secs: 150,
        objectives: Objectives {
            score_target: Some(6000),
            collectibles_target: Some(10),
            special_goals: &[
                GoalDef {
                    kind: GoalKind::PerformTrick {
                        trick_id: "boardslide",
                    },
                    target: 2,
                    label: "Grind 2 rails",
                },
                GoalDef {
                    kind: GoalKind::Combo,
                    target: 3,
                    label: "Land a 3-trick combo",
                },
            ],
        },
        layout: Layout {
            length: 5500.0,
            obstacle_frequency: 1.4,
            collectible_frequency: 1.2,
            wave_height: 1.0,
        },
        fixed_obstacles: &[
            FixedObstacle {
                kind: ObstacleKind::Rail { trick_bonus: 75 },
                x: 900.0,
                y: 375.0,
                w: 240.0,
                h: 12.0,
                moving: false,
            },
            FixedObstacle {
                kind: ObstacleKind::Rail { trick_bonus: 75 },
                x: 2800.0,
                y: 370.0,
                w: 200.0,
                h: 12.0,
                moving: false,
            },
            FixedObstacle {
                kind: ObstacleKind::Ledge,
                x: 1900.0,
                y: 365.0,
                w: 120.0,
                h: 35.0,
                moving: false,
            },
        ],
        wave_sections: &[],
        special_zones: &[],
    },
    LevelDef {
        id: "mega-ramp",
        name: "Mega Ramp",
        difficulty: Difficulty::High,
        time_limit_secs: 180,
        objectives: Objectives {
            score_target: Some(12000),
            collectibles_target: Some(15),
            special_goals: &[
                GoalDef {
                    kind: GoalKind::PerformTrick {
                        trick_id: "kickflip",
                    },
                    target: 5,
                    label: "Kickflip 5 times",
                },
                GoalDef {
                    kind: GoalKind::Combo,
                    target: 4,
                    label: "Land a 4-trick combo",
                },
            ],
        },
        layout: Layout {
            length: 7000.0,
            obstacle_frequency: 1.8,
            collectible_frequency: 1.5,
            wave_height: 1.0,
        },
        fixed_obstacles: &[FixedObstacle {
            kind: ObstacleKind::Ramp {
                launch_velocity: 14.0,
            },
            x: 3200.0,
            y: 340.0,
            w: 120.0,
            h: 60.0,
            moving: false,
        }],
        wave_sections: &[],
        special_zones: &[ZoneDef {
            kind: ZoneKind::SpeedBoost { push: 0.4 },
            x: 3000.0,
            width: 250.0,
        }],
    },
];

pub static SURF_LEVELS: [LevelDef; 2] = [
    LevelDef {
        id: "glass-point",
        name: "Glass Point",
        difficulty: Difficulty::Low,
        time_limit_secs: 120,
        objectives: Objectives {
            score_target: Some(3000),
            collectibles_target: Some(5),
            special_goals: &[GoalDef {
                kind: GoalKind::PerformTrick {
                    trick_id: "cutback",
                },
                target: 2,
                label: "Cut back twice",
            }],
        },
        layout: Layout {
            length: 4500.0,
            obstacle_frequency: 0.8,
            collectible_frequency: 1.0,
            wave_height: 1.0,
        },
        fixed_obstacles: &[FixedObstacle {
            kind: ObstacleKind::Buoy,
            x: 1600.0,
            y: 280.0,
            w: 30.0,
            h: 30.0,
            moving: true,
        }],
        wave_sections: &[WaveSectionDef {
            kind: WaveKind::Normal,
            start_x: 0.0,
            end_x: 800.0,
            amplitude: 22.0,
            frequency: 1.2,
        }],
        special_zones: &[ZoneDef {
            kind: ZoneKind::Tube,
            x: 2400.0,
            width: 400.0,
        }],
    },
    LevelDef {
        id: "thunder-reef",
        name: "Thunder Reef",
        difficulty: Difficulty::High,
        time_limit_secs: 150,
        objectives: Objectives {
            score_target: Some(9000),
            collectibles_target: Some(12),
            special_goals: &[
                GoalDef {
                    kind: GoalKind::TubeTime,
                    target: 6,
                    label: "Ride tubes for 6 seconds",
                },
                GoalDef {
                    kind: GoalKind::Combo,
                    target: 3,
                    label: "Land a 3-trick combo",
                },
            ],
        },
        layout: Layout {
            length: 6000.0,
            obstacle_frequency: 1.5,
            collectible_frequency: 1.3,
            wave_height: 1.4,
        },
        fixed_obstacles: &[
            FixedObstacle {
                kind: ObstacleKind::Rock,
                x: 2000.0,
                y: 310.0,
                w: 60.0,
                h: 50.0,
                moving: false,
            },
            FixedObstacle {
                kind: ObstacleKind::Buoy,
                x: 3500.0,
                y: 275.0,
                w: 30.0,
                h: 30.0,
                moving: true,
            },
        ],
        wave_sections: &[WaveSectionDef {
            kind: WaveKind::Breaking,
            start_x: 2200.0,
            end_x: 3000.0,
            amplitude: 48.0,
            frequency: 2.0,
        }],
        special_zones: &[
            ZoneDef {
                kind: ZoneKind::Tube,
                x: 2300.0,
                width: 500.0,
            },
            ZoneDef {
                kind: ZoneKind::ScoreBoost {
                    multiplier: 3.0,
                    duration_secs: 6.0,
                },
                x: 4200.0,
                width: 300.0,
            },
        ],
    },
];

/// All authored levels for a mode
pub fn levels_for_mode(mode: GameMode) -> &'static [LevelDef] {
    match mode {
        GameMode::Skate => &SKATE_LEVELS,
        GameMode::Surf => &SURF_LEVELS,
    }
}

/// Look up a level by index. Out-of-range indices are a configuration miss:
/// logged and substituted with the first level.
pub fn level_def(mode: GameMode, index: usize) -> &'static LevelDef {
    let levels = levels_for_mode(mode);
    match levels.get(index) {
        Some(def) => def,
        None => {
            log::warn!(
                "level index {} out of range for {:?} mode, using first level",
                index,
                mode
            );
            &levels[0]
        }
    }
}
