//! Player physics: integration, mode constants, collision resolution
//!
//! Velocities and accelerations are tuned in units-per-frame at the 60 Hz
//! reference rate; `update` converts the clamped wall-clock delta into
//! fractional frames before applying them. The surf-mode wave force runs on
//! wall-clock time, not simulation time: `wave_height`/`wave_slope` here are
//! the global wave animation, distinct from the level's positional
//! `wave_y_at` terrain query.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::level::ObstacleKind;
use super::state::GameMode;
use crate::consts::*;
use crate::dt_to_frames;

/// Mode-specific movement constants (per reference frame)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub friction: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub jump_force: f32,
    /// Horizontal nudge strength from the global wave slope (surf only)
    pub wave_push: f32,
}

impl PhysicsConfig {
    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Skate => Self {
                gravity: 0.55,
                friction: 0.94,
                max_speed: 8.0,
                acceleration: 0.5,
                jump_force: 12.0,
                wave_push: 0.0,
            },
            GameMode::Surf => Self {
                gravity: 0.38,
                friction: 0.965,
                max_speed: 10.0,
                acceleration: 0.42,
                jump_force: 9.0,
                wave_push: 0.35,
            },
        }
    }
}

/// Transient record of the most recent obstacle resolution. Lives exactly one
/// frame: the orchestrator's collision pass clears it before dispatching new
/// resolutions, so the character controller reads the previous frame's value
/// when checking grind eligibility.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResponse {
    pub kind: ObstacleKind,
    pub overlap: Aabb,
}

/// The player's physics body. Position is anchored at the feet midpoint;
/// y grows downward.
#[derive(Debug)]
pub struct PhysicsController {
    pub pos: Vec2,
    pub vel: Vec2,
    pub grounded: bool,
    mode: GameMode,
    config: PhysicsConfig,
    response: Option<CollisionResponse>,
}

impl PhysicsController {
    pub fn new(mode: GameMode, start: Vec2) -> Self {
        Self {
            pos: start,
            vel: Vec2::ZERO,
            grounded: false,
            mode,
            config: PhysicsConfig::for_mode(mode),
            response: None,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Advance by one frame's worth of wall-clock time. `dt` is clamped to
    /// the stall bound before it reaches the integrator.
    pub fn update(&mut self, dt: f32, now_ms: f64) {
        let frames = dt_to_frames(dt.min(MAX_FRAME_DT));

        if !self.grounded {
            self.vel.y = (self.vel.y + self.config.gravity * frames).min(TERMINAL_FALL_SPEED);
        }

        self.vel.x *= self.config.friction.powf(frames);

        if self.mode == GameMode::Surf {
            self.vel.x += wave_slope(now_ms) * self.config.wave_push * frames;
            self.vel.x = self.vel.x.clamp(-self.config.max_speed, self.config.max_speed);
        }

        self.pos += self.vel * frames;
    }

    /// Accelerate toward -max_speed. Called at most once per frame.
    pub fn move_left(&mut self) {
        self.vel.x = (self.vel.x - self.config.acceleration).max(-self.config.max_speed);
    }

    /// Accelerate toward +max_speed. Called at most once per frame.
    pub fn move_right(&mut self) {
        self.vel.x = (self.vel.x + self.config.acceleration).min(self.config.max_speed);
    }

    /// Jump if grounded. Returns whether the jump happened; a refused jump
    /// leaves all state untouched.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel.y = -self.config.jump_force;
        self.grounded = false;
        true
    }

    /// Snap to the terrain surface
    pub fn handle_ground_collision(&mut self, ground_y: f32) {
        self.pos.y = ground_y;
        self.vel.y = 0.0;
        self.grounded = true;
    }

    /// The player left the terrain surface (walked off a ledge, wave trough)
    pub fn leave_ground(&mut self) {
        self.grounded = false;
    }

    /// Resolve an obstacle overlap along the axis of minimum penetration and
    /// record the transient response for downstream readers.
    pub fn handle_obstacle_collision(&mut self, kind: ObstacleKind, overlap: Aabb) {
        let player_center = self.player_aabb().center();
        let overlap_center = overlap.center();

        if overlap.w < overlap.h {
            // Horizontal push-out
            let push_left = overlap_center.x > player_center.x;

            // Ramps convert forward speed into a launch instead of a wall hit
            if let ObstacleKind::Ramp { launch_velocity } = kind {
                if (self.vel.x > 0.0 && push_left) || (self.vel.x < 0.0 && !push_left) {
                    self.vel.y = -launch_velocity;
                    self.grounded = false;
                    self.response = Some(CollisionResponse { kind, overlap });
                    return;
                }
            }

            if push_left {
                self.pos.x -= overlap.w;
                if self.vel.x > 0.0 {
                    self.vel.x = 0.0;
                }
            } else {
                self.pos.x += overlap.w;
                if self.vel.x < 0.0 {
                    self.vel.x = 0.0;
                }
            }
        } else {
            // Vertical push-out
            if overlap_center.y > player_center.y {
                // Landed on top of the obstacle
                self.pos.y -= overlap.h;
                self.vel.y = 0.0;
                self.grounded = true;
            } else {
                // Bumped it from below
                self.pos.y += overlap.h;
                self.vel.y = self.vel.y.max(0.0);
            }
        }

        self.response = Some(CollisionResponse { kind, overlap });
    }

    /// Most recent obstacle resolution, if any survived the last clear
    pub fn collision_response(&self) -> Option<&CollisionResponse> {
        self.response.as_ref()
    }

    /// Cleared once per frame by the orchestrator's collision pass
    pub fn clear_collision_response(&mut self) {
        self.response = None;
    }

    /// Whether the last collision response was against a grindable rail
    pub fn on_rail(&self) -> bool {
        matches!(
            self.response,
            Some(CollisionResponse {
                kind: ObstacleKind::Rail { .. },
                ..
            })
        )
    }

    /// Trick bonus carried by the rail currently being contacted
    pub fn rail_bonus(&self) -> Option<u32> {
        match self.response {
            Some(CollisionResponse {
                kind: ObstacleKind::Rail { trick_bonus },
                ..
            }) => Some(trick_bonus),
            _ => None,
        }
    }

    /// The player's collision box
    pub fn player_aabb(&self) -> Aabb {
        Aabb::from_feet(self.pos, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Mode-dependent bonus for a trick performed right now: skate rewards
    /// height above the reference line, surf rewards wave steepness, both add
    /// a speed term. Floored to an integer.
    pub fn calculate_trick_score(&self, now_ms: f64) -> u32 {
        let speed_term = self.vel.x.abs() * 2.0;
        let bonus = match self.mode {
            GameMode::Skate => (GROUND_LEVEL - self.pos.y).max(0.0) * 0.5 + speed_term,
            GameMode::Surf => wave_slope(now_ms).abs() * 150.0 + speed_term,
        };
        bonus.floor() as u32
    }
}

/// Global wave animation height at a wall-clock instant (surf visuals)
pub fn wave_height(now_ms: f64) -> f32 {
    let t = (now_ms * 0.001) as f32;
    (t * WAVE_ANIM_FREQUENCY).sin() * WAVE_ANIM_AMPLITUDE
}

/// Global wave slope at a wall-clock instant, in [-1, 1]; drives the surf
/// horizontal nudge and the surf trick bonus
pub fn wave_slope(now_ms: f64) -> f32 {
    let t = (now_ms * 0.001) as f32;
    (t * WAVE_ANIM_FREQUENCY).cos()
}
