//! Shredwave - a side-scrolling skate & surf trick arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, character tricks, levels, scoring)
//! - `tuning`: Data-driven game balance (trick tables, level definitions)
//! - `game`: Outer app flow (menus, session lifecycle, high-score persistence)
//! - `platform`: Browser/native wall-clock abstraction
//! - `persistence`: Key-value score store (LocalStorage on web, file on native)

pub mod game;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Reference frame rate; all per-frame constants are tuned against this
    pub const FRAME_RATE: f32 = 60.0;
    /// Upper bound on the wall-clock delta applied to one update (stall clamp)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player bounding box (world units)
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Default terrain heights (y grows downward)
    pub const GROUND_LEVEL: f32 = 400.0;
    pub const WATER_LEVEL: f32 = 300.0;

    /// Terrain segment length for both ground and wave profiles
    pub const SEGMENT_LENGTH: f32 = 200.0;
    /// Camera trails the player by this much
    pub const CAMERA_OFFSET: f32 = 200.0;

    /// Character-side combo window (frames between tricks)
    pub const COMBO_WINDOW_FRAMES: u32 = 90;
    /// Scoring-side combo window; intentionally NOT the same as above
    pub const SCORE_COMBO_WINDOW_FRAMES: u32 = 120;

    /// Surf tricks require the player this close to the wave face
    pub const WAVE_FACE_TOLERANCE: f32 = 20.0;

    /// Minimum gap kept between procedurally scattered obstacles
    pub const MIN_OBSTACLE_GAP: f32 = 60.0;

    /// Global wave animation (wall-clock driven, surf mode visual undulation)
    pub const WAVE_ANIM_FREQUENCY: f32 = 1.5;
    pub const WAVE_ANIM_AMPLITUDE: f32 = 30.0;

    /// Falling speed cap (units per reference frame)
    pub const TERMINAL_FALL_SPEED: f32 = 15.0;
}

/// Browser-side logging and panic hook setup; the host page calls this once
/// before driving `Game::frame`
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn init_wasm() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Seconds of wall-clock delta expressed in 60 Hz reference frames
#[inline]
pub fn dt_to_frames(dt: f32) -> f32 {
    dt * consts::FRAME_RATE
}
