//! Abstract input actions
//!
//! The host's input capture (keyboard/touch/gamepad) is out of scope; it
//! feeds `(action, active)` transitions into an `InputState`. Movement is
//! polled as held state every frame; trick initiation and pause are
//! edge-triggered, and the orchestrator clears edges at the end of the frame.

use serde::{Deserialize, Serialize};

/// The closed action set the simulation consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Trick1,
    Trick2,
    Trick3,
    Pause,
    Menu,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::Jump,
        Action::Trick1,
        Action::Trick2,
        Action::Trick3,
        Action::Pause,
        Action::Menu,
    ];

    fn index(self) -> usize {
        match self {
            Action::Left => 0,
            Action::Right => 1,
            Action::Up => 2,
            Action::Down => 3,
            Action::Jump => 4,
            Action::Trick1 => 5,
            Action::Trick2 => 6,
            Action::Trick3 => 7,
            Action::Pause => 8,
            Action::Menu => 9,
        }
    }

    /// Parse a provider action name. Unknown names are logged and dropped.
    pub fn from_name(name: &str) -> Option<Action> {
        let action = match name {
            "left" => Action::Left,
            "right" => Action::Right,
            "up" => Action::Up,
            "down" => Action::Down,
            "jump" => Action::Jump,
            "trick1" => Action::Trick1,
            "trick2" => Action::Trick2,
            "trick3" => Action::Trick3,
            "pause" => Action::Pause,
            "menu" => Action::Menu,
            other => {
                log::warn!("unknown input action '{}'", other);
                return None;
            }
        };
        Some(action)
    }
}

/// Held state plus one-frame press edges
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; 10],
    pressed: [bool; 10],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one `(action, active)` transition from the input provider
    pub fn apply(&mut self, action: Action, active: bool) {
        let i = action.index();
        if active && !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = active;
    }

    /// Level-triggered query (movement polling)
    pub fn held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Edge-triggered query (trick initiation, pause); true until the
    /// orchestrator ends the frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }

    /// Consume the press edges after a frame has seen them
    pub fn end_frame(&mut self) {
        self.pressed = [false; 10];
    }
}
