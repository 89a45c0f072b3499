//! Trick definition tables, one per game mode.

use crate::sim::state::GameMode;

/// A static trick definition. `duration == 0` means the trick's length is
/// determined externally (grinds last while rail contact holds, tube rides
/// last while inside the tube zone); those tricks score per second instead
/// of as a single burst.
#[derive(Debug)]
pub struct TrickDef {
    pub id: &'static str,
    pub name: &'static str,
    pub base_score: u32,
    pub difficulty: u8,
    /// Frames the trick animation runs; 0 = externally determined
    pub duration: u32,
    pub air_only: bool,
    pub grind_trick: bool,
    pub wave_required: bool,
    pub tube_trick: bool,
    /// Continuous tricks accrue this once per full second
    pub score_per_second: u32,
}

const BURST: TrickDef = TrickDef {
    id: "",
    name: "",
    base_score: 0,
    difficulty: 1,
    duration: 0,
    air_only: false,
    grind_trick: false,
    wave_required: false,
    tube_trick: false,
    score_per_second: 0,
};

pub static SKATE_TRICKS: [TrickDef; 5] = [
    TrickDef {
        id: "kickflip",
        name: "Kickflip",
        base_score: 100,
        difficulty: 2,
        duration: 30,
        air_only: true,
        ..BURST
    },
    TrickDef {
        id: "heelflip",
        name: "Heelflip",
        base_score: 110,
        difficulty: 2,
        duration: 32,
        air_only: true,
        ..BURST
    },
    TrickDef {
        id: "pop-shuvit",
        name: "Pop Shuvit",
        base_score: 90,
        difficulty: 1,
        duration: 26,
        air_only: true,
        ..BURST
    },
    TrickDef {
        id: "ollie",
        name: "Ollie",
        base_score: 50,
        difficulty: 1,
        duration: 18,
        air_only: true,
        ..BURST
    },
    TrickDef {
        id: "boardslide",
        name: "Boardslide",
        base_score: 80,
        difficulty: 3,
        duration: 0,
        grind_trick: true,
        score_per_second: 60,
        ..BURST
    },
];

pub static SURF_TRICKS: [TrickDef; 5] = [
    TrickDef {
        id: "cutback",
        name: "Cutback",
        base_score: 120,
        difficulty: 2,
        duration: 36,
        wave_required: true,
        ..BURST
    },
    TrickDef {
        id: "snap",
        name: "Snap",
        base_score: 110,
        difficulty: 2,
        duration: 30,
        wave_required: true,
        ..BURST
    },
    TrickDef {
        id: "roundhouse",
        name: "Roundhouse",
        base_score: 150,
        difficulty: 3,
        duration: 48,
        wave_required: true,
        ..BURST
    },
    TrickDef {
        id: "bottom-turn",
        name: "Bottom Turn",
        base_score: 60,
        difficulty: 1,
        duration: 24,
        wave_required: true,
        ..BURST
    },
    TrickDef {
        id: "tube-ride",
        name: "Tube Ride",
        base_score: 100,
        difficulty: 4,
        duration: 0,
        wave_required: true,
        tube_trick: true,
        score_per_second: 100,
        ..BURST
    },
];

/// All tricks performable in the given mode
pub fn tricks_for_mode(mode: GameMode) -> &'static [TrickDef] {
    match mode {
        GameMode::Skate => &SKATE_TRICKS,
        GameMode::Surf => &SURF_TRICKS,
    }
}

/// Look up a trick by id. Unknown ids are a configuration miss: logged and
/// treated as "no trick" rather than an error.
pub fn find_trick(mode: GameMode, id: &str) -> Option<&'static TrickDef> {
    let found = tricks_for_mode(mode).iter().find(|t| t.id == id);
    if found.is_none() {
        log::warn!("unknown trick id '{}' for {:?} mode", id, mode);
    }
    found
}
