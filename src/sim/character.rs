//! Character controller: movement intent and the trick state machine
//!
//! Interprets abstract input actions into physics calls and trick execution.
//! Trick and combo lifetimes are frame-counted fields decremented here, one
//! tick per frame. The combo window in this controller (90 frames) is
//! deliberately distinct from the scoring system's 120-frame window; see the
//! scoring module.

use serde::Serialize;

use super::events::GameEvent;
use super::physics::PhysicsController;
use super::state::GameMode;
use crate::consts::*;
use crate::input::{Action, InputState};
use crate::tuning::tricks::{TrickDef, find_trick};

/// Discrete character states; a trick in progress is its own state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CharacterState {
    Idle,
    Moving,
    Jumping,
    Trick(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Facing {
    Left,
    Right,
}

/// Per-frame context the orchestrator computes before the character runs
#[derive(Debug, Clone, Copy)]
pub struct CharacterCtx {
    pub now_ms: f64,
    /// Terrain height under the player (wave height in surf mode)
    pub surface_y: f32,
    /// Player overlapped a tube zone last frame (surf)
    pub in_tube: bool,
}

#[derive(Debug)]
pub struct CharacterController {
    mode: GameMode,
    state: CharacterState,
    facing: Facing,
    trick_in_progress: bool,
    /// Frames left on a burst trick; unused for continuous tricks
    trick_timer: u32,
    current_trick: Option<&'static TrickDef>,
    /// Frames the current continuous trick has been held
    trick_elapsed: u32,
    combo_counter: u32,
    combo_timer: u32,
    events: Vec<GameEvent>,
}

impl CharacterController {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            state: CharacterState::Idle,
            facing: Facing::Right,
            trick_in_progress: false,
            trick_timer: 0,
            current_trick: None,
            trick_elapsed: 0,
            combo_counter: 0,
            combo_timer: 0,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> CharacterState {
        self.state
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn combo_counter(&self) -> u32 {
        self.combo_counter
    }

    pub fn trick_in_progress(&self) -> bool {
        self.trick_in_progress
    }

    pub fn current_trick(&self) -> Option<&'static TrickDef> {
        self.current_trick
    }

    /// Events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// One frame: movement polling, trick initiation/progress, combo window
    pub fn update(
        &mut self,
        physics: &mut PhysicsController,
        input: &InputState,
        ctx: &CharacterCtx,
    ) {
        // Movement is polled every frame, trick or not (air control included)
        if input.held(Action::Left) {
            physics.move_left();
        }
        if input.held(Action::Right) {
            physics.move_right();
        }
        if input.just_pressed(Action::Jump) {
            physics.jump();
        }

        // Facing follows velocity outside a small hysteresis band
        if physics.vel.x > 0.1 {
            self.facing = Facing::Right;
        } else if physics.vel.x < -0.1 {
            self.facing = Facing::Left;
        }

        if self.trick_in_progress {
            self.advance_trick(physics, ctx);
        } else if !self.try_start_trick_from_input(physics, input, ctx) {
            self.state = Self::base_state(physics, input);
        }

        // Character-side combo window (90 frames)
        if self.combo_counter > 0 {
            self.combo_timer = self.combo_timer.saturating_sub(1);
            if self.combo_timer == 0 {
                if self.combo_counter > 1 {
                    self.events.push(GameEvent::ComboEnded {
                        length: self.combo_counter,
                    });
                }
                self.combo_counter = 0;
            }
        }
    }

    fn base_state(physics: &PhysicsController, input: &InputState) -> CharacterState {
        if !physics.grounded {
            CharacterState::Jumping
        } else if input.held(Action::Left) || input.held(Action::Right) {
            CharacterState::Moving
        } else {
            CharacterState::Idle
        }
    }

    /// Burst tricks run their timer down; continuous tricks hold while
    /// eligibility lasts and accrue score once per full second
    fn advance_trick(&mut self, physics: &PhysicsController, ctx: &CharacterCtx) {
        let Some(trick) = self.current_trick else {
            self.trick_in_progress = false;
            return;
        };

        if trick.duration > 0 {
            self.trick_timer = self.trick_timer.saturating_sub(1);
            if self.trick_timer == 0 {
                self.end_trick(physics);
            }
            return;
        }

        // Continuous: grind needs rail contact, tube ride needs the zone
        let eligible = if trick.grind_trick {
            physics.on_rail()
        } else if trick.tube_trick {
            ctx.in_tube && self.on_wave_face(physics, ctx)
        } else {
            false
        };

        if !eligible {
            self.end_trick(physics);
            return;
        }

        self.trick_elapsed += 1;
        if self.trick_elapsed % FRAME_RATE as u32 == 0 && trick.score_per_second > 0 {
            self.events.push(GameEvent::TrickScoreTick {
                trick_id: trick.id,
                points: trick.score_per_second,
            });
        }
    }

    fn end_trick(&mut self, physics: &PhysicsController) {
        if let Some(trick) = self.current_trick.take() {
            self.events.push(GameEvent::TrickEnded { trick_id: trick.id });
        }
        self.trick_in_progress = false;
        self.trick_timer = 0;
        self.trick_elapsed = 0;
        self.state = if !physics.grounded {
            CharacterState::Jumping
        } else if physics.vel.x.abs() > 0.1 {
            CharacterState::Moving
        } else {
            CharacterState::Idle
        };
    }

    fn on_wave_face(&self, physics: &PhysicsController, ctx: &CharacterCtx) -> bool {
        (physics.pos.y - ctx.surface_y).abs() < WAVE_FACE_TOLERANCE
    }

    /// Mode-specific input-to-trick mapping; first matching chord wins,
    /// exclusive per frame, edge-triggered
    fn try_start_trick_from_input(
        &mut self,
        physics: &mut PhysicsController,
        input: &InputState,
        ctx: &CharacterCtx,
    ) -> bool {
        let chord = |a: Action, b: Action| {
            (input.just_pressed(a) && input.held(b)) || (input.just_pressed(b) && input.held(a))
        };

        let trick_id = match self.mode {
            GameMode::Skate => {
                if !physics.grounded {
                    if input.just_pressed(Action::Trick1) {
                        Some("kickflip")
                    } else if input.just_pressed(Action::Trick2) {
                        Some("heelflip")
                    } else if input.just_pressed(Action::Trick3) {
                        Some("pop-shuvit")
                    } else if input.just_pressed(Action::Down) {
                        Some("ollie")
                    } else {
                        None
                    }
                } else if physics.on_rail() && input.just_pressed(Action::Trick1) {
                    Some("boardslide")
                } else {
                    None
                }
            }
            GameMode::Surf => {
                if !self.on_wave_face(physics, ctx) {
                    None
                } else if chord(Action::Up, Action::Left) {
                    Some("cutback")
                } else if chord(Action::Down, Action::Right) {
                    Some("snap")
                } else if chord(Action::Left, Action::Right) {
                    Some("roundhouse")
                } else if input.just_pressed(Action::Down) {
                    Some("bottom-turn")
                } else {
                    None
                }
            }
        };

        match trick_id {
            Some(id) => self.perform_trick(id, physics, ctx).is_some(),
            None => false,
        }
    }

    /// Attempt a trick by id. Returns the awarded score, or None when the
    /// trick is unknown or ineligible right now (state is left untouched).
    pub fn perform_trick(
        &mut self,
        trick_id: &str,
        physics: &mut PhysicsController,
        ctx: &CharacterCtx,
    ) -> Option<u32> {
        let trick = find_trick(self.mode, trick_id)?;

        if trick.air_only && physics.grounded {
            return None;
        }
        if trick.grind_trick && !physics.on_rail() {
            return None;
        }
        if trick.wave_required && !self.on_wave_face(physics, ctx) {
            return None;
        }
        if trick.tube_trick && !ctx.in_tube {
            return None;
        }

        self.combo_counter += 1;
        self.combo_timer = COMBO_WINDOW_FRAMES;

        let combo_scale = (1.0 + 0.5 * (self.combo_counter - 1) as f32).min(4.0);
        let mut score = (trick.base_score as f32 * combo_scale) as u32
            + physics.calculate_trick_score(ctx.now_ms);
        if trick.grind_trick {
            if let Some(bonus) = physics.rail_bonus() {
                score += bonus;
            }
        }

        self.state = CharacterState::Trick(trick.id);
        self.trick_in_progress = true;
        self.trick_timer = trick.duration;
        self.trick_elapsed = 0;
        self.current_trick = Some(trick);

        self.events.push(GameEvent::TrickPerformed {
            trick_id: trick.id,
            score,
            combo: self.combo_counter,
        });

        Some(score)
    }

    /// Tube rides start automatically on zone entry while on the wave face
    pub fn try_start_tube_ride(&mut self, physics: &mut PhysicsController, ctx: &CharacterCtx) {
        if self.mode == GameMode::Surf && !self.trick_in_progress && self.on_wave_face(physics, ctx)
        {
            self.perform_trick("tube-ride", physics, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::aabb::Aabb;
    use crate::sim::level::ObstacleKind;
    use glam::Vec2;

    fn setup(mode: GameMode) -> (CharacterController, PhysicsController, CharacterCtx) {
        let character = CharacterController::new(mode);
        let physics = PhysicsController::new(mode, Vec2::new(100.0, GROUND_LEVEL));
        let ctx = CharacterCtx {
            now_ms: 0.0,
            surface_y: match mode {
                GameMode::Skate => GROUND_LEVEL,
                GameMode::Surf => WATER_LEVEL,
            },
            in_tube: false,
        };
        (character, physics, ctx)
    }

    #[test]
    fn test_air_only_trick_rejected_on_ground() {
        let (mut ch, mut ph, ctx) = setup(GameMode::Skate);
        ph.grounded = true;

        assert!(ch.perform_trick("kickflip", &mut ph, &ctx).is_none());
        assert_eq!(ch.combo_counter(), 0);
        assert_eq!(ch.state(), CharacterState::Idle);
        assert!(!ch.trick_in_progress());
    }

    #[test]
    fn test_air_trick_accepted_airborne() {
        let (mut ch, mut ph, ctx) = setup(GameMode::Skate);
        ph.grounded = false;
        ph.pos.y = GROUND_LEVEL - 100.0;

        let score = ch.perform_trick("kickflip", &mut ph, &ctx).expect("accepted");
        assert!(score >= 100);
        assert_eq!(ch.combo_counter(), 1);
        assert_eq!(ch.state(), CharacterState::Trick("kickflip"));

        let events = ch.drain_events();
        assert!(matches!(
            events[0],
            GameEvent::TrickPerformed {
                trick_id: "kickflip",
                combo: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_grind_rejected_without_rail() {
        let (mut ch, mut ph, ctx) = setup(GameMode::Skate);
        ph.grounded = true;

        assert!(ch.perform_trick("boardslide", &mut ph, &ctx).is_none());
        assert_eq!(ch.combo_counter(), 0);
    }

    #[test]
    fn test_grind_accepted_on_rail_with_bonus() {
        let (mut ch, mut ph, ctx) = setup(GameMode::Skate);
        ph.grounded = true;
        ph.handle_obstacle_collision(
            ObstacleKind::Rail { trick_bonus: 50 },
            Aabb::new(90.0, 395.0, 20.0, 3.0),
        );

        let score = ch.perform_trick("boardslide", &mut ph, &ctx).expect("accepted");
        // base 80 + rail bonus 50, plus whatever the physics bonus adds
        assert!(score >= 130);
        assert_eq!(ch.state(), CharacterState::Trick("boardslide"));
    }

    #[test]
    fn test_unknown_trick_is_config_miss() {
        let (mut ch, mut ph, ctx) = setup(GameMode::Skate);
        ph.grounded = false;
        assert!(ch.perform_trick("900-mctwist", &mut ph, &ctx).is_none());
        assert_eq!(ch.combo_counter(), 0);
    }

    #[test]
    fn test_combo_scale_caps_at_four() {
        let (mut ch, mut ph, mut ctx) = setup(GameMode::Surf);
        ph.pos.y = WATER_LEVEL;
        ph.vel.x = 0.0;
        ctx.surface_y = WATER_LEVEL;

        // now_ms chosen so the wave slope (and thus the physics bonus) is 0:
        // cos(t * freq) = 0 at t = pi/2 / freq
        let t = std::f32::consts::FRAC_PI_2 / WAVE_ANIM_FREQUENCY;
        ctx.now_ms = (t * 1000.0) as f64;
        let physics_bonus = ph.calculate_trick_score(ctx.now_ms);
        assert_eq!(physics_bonus, 0);

        let mut last = 0;
        for i in 1..=10 {
            let score = ch
                .perform_trick("cutback", &mut ph, &ctx)
                .expect("on wave face");
            ch.current_trick = None;
            ch.trick_in_progress = false;
            let scale = (1.0 + 0.5 * (i - 1) as f32).min(4.0);
            assert_eq!(score, (120.0 * scale) as u32);
            last = score;
        }
        assert_eq!(last, 480);
    }

    #[test]
    fn test_wave_trick_rejected_off_face() {
        let (mut ch, mut ph, ctx) = setup(GameMode::Surf);
        ph.pos.y = WATER_LEVEL - 100.0;

        assert!(ch.perform_trick("cutback", &mut ph, &ctx).is_none());
    }

    #[test]
    fn test_burst_trick_runs_out_and_reverts() {
        let (mut ch, mut ph, ctx) = setup(GameMode::Skate);
        ph.grounded = false;
        ph.pos.y = GROUND_LEVEL - 80.0;

        ch.perform_trick("ollie", &mut ph, &ctx).expect("accepted");
        let input = InputState::new();

        // Ollie runs 18 frames, then reverts to Jumping while airborne
        for _ in 0..18 {
            assert!(ch.trick_in_progress());
            ch.update(&mut ph, &input, &ctx);
        }
        assert!(!ch.trick_in_progress());
        assert_eq!(ch.state(), CharacterState::Jumping);

        let events = ch.drain_events();
        assert!(events.contains(&GameEvent::TrickEnded { trick_id: "ollie" }));
    }

    #[test]
    fn test_grind_ends_when_rail_contact_lost() {
        let (mut ch, mut ph, ctx) = setup(GameMode::Skate);
        ph.grounded = true;
        ph.handle_obstacle_collision(
            ObstacleKind::Rail { trick_bonus: 50 },
            Aabb::new(90.0, 395.0, 20.0, 3.0),
        );
        ch.perform_trick("boardslide", &mut ph, &ctx).expect("accepted");

        let input = InputState::new();
        ch.update(&mut ph, &input, &ctx);
        assert!(ch.trick_in_progress());

        // Rail contact gone next frame
        ph.clear_collision_response();
        ch.update(&mut ph, &input, &ctx);
        assert!(!ch.trick_in_progress());
    }

    #[test]
    fn test_continuous_trick_ticks_per_second() {
        let (mut ch, mut ph, mut ctx) = setup(GameMode::Surf);
        ph.pos.y = WATER_LEVEL;
        ctx.in_tube = true;

        ch.try_start_tube_ride(&mut ph, &ctx);
        assert!(ch.trick_in_progress());
        ch.drain_events();

        let input = InputState::new();
        for _ in 0..60 {
            ch.update(&mut ph, &input, &ctx);
            // Hold the player on the face; physics isn't integrating here
        }
        let events = ch.drain_events();
        let ticks: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::TrickScoreTick { .. }))
            .collect();
        assert_eq!(ticks.len(), 1);
        assert_eq!(
            *ticks[0],
            GameEvent::TrickScoreTick {
                trick_id: "tube-ride",
                points: 100
            }
        );

        // Leaving the tube ends the ride
        ctx.in_tube = false;
        ch.update(&mut ph, &input, &ctx);
        assert!(!ch.trick_in_progress());
    }

    #[test]
    fn test_character_combo_window_is_90_frames() {
        let (mut ch, mut ph, ctx) = setup(GameMode::Skate);
        ph.grounded = false;
        ph.pos.y = GROUND_LEVEL - 50.0;

        ch.perform_trick("kickflip", &mut ph, &ctx).expect("accepted");
        ch.perform_trick("heelflip", &mut ph, &ctx);
        // Force the trick state clear so the window can lapse
        ch.current_trick = None;
        ch.trick_in_progress = false;
        ch.drain_events();

        let input = InputState::new();
        for _ in 0..COMBO_WINDOW_FRAMES {
            ch.update(&mut ph, &input, &ctx);
        }
        assert_eq!(ch.combo_counter(), 0);
        let events = ch.drain_events();
        assert!(events.contains(&GameEvent::ComboEnded { length: 2 }));
    }

    #[test]
    fn test_facing_hysteresis() {
        let (mut ch, mut ph, ctx) = setup(GameMode::Skate);
        ph.grounded = true;
        let input = InputState::new();

        ph.vel.x = 0.5;
        ch.update(&mut ph, &input, &ctx);
        assert_eq!(ch.facing(), Facing::Right);

        // Inside the hysteresis band: facing sticks
        ph.vel.x = -0.05;
        ch.update(&mut ph, &input, &ctx);
        assert_eq!(ch.facing(), Facing::Right);

        ph.vel.x = -0.5;
        ch.update(&mut ph, &input, &ctx);
        assert_eq!(ch.facing(), Facing::Left);
    }

    #[test]
    fn test_state_transitions() {
        let (mut ch, mut ph, ctx) = setup(GameMode::Skate);
        ph.grounded = true;
        let mut input = InputState::new();

        ch.update(&mut ph, &input, &ctx);
        assert_eq!(ch.state(), CharacterState::Idle);

        input.apply(Action::Right, true);
        ch.update(&mut ph, &input, &ctx);
        assert_eq!(ch.state(), CharacterState::Moving);
        assert!(ph.vel.x > 0.0);

        ph.grounded = false;
        ch.update(&mut ph, &input, &ctx);
        assert_eq!(ch.state(), CharacterState::Jumping);
    }

    #[test]
    fn test_perform_trick_second_in_combo_resets_window() {
        let (mut ch, mut ph, ctx) = setup(GameMode::Skate);
        ph.grounded = false;
        ph.pos.y = GROUND_LEVEL - 50.0;

        ch.perform_trick("kickflip", &mut ph, &ctx).expect("accepted");
        ch.current_trick = None;
        ch.trick_in_progress = false;

        let input = InputState::new();
        for _ in 0..50 {
            ch.update(&mut ph, &input, &ctx);
        }
        assert_eq!(ch.combo_counter(), 1);

        ch.perform_trick("heelflip", &mut ph, &ctx).expect("accepted");
        assert_eq!(ch.combo_counter(), 2);
        ch.current_trick = None;
        ch.trick_in_progress = false;

        // The window restarted: 50 more frames don't lapse it
        for _ in 0..50 {
            ch.update(&mut ph, &input, &ctx);
        }
        assert_eq!(ch.combo_counter(), 2);
    }
}
