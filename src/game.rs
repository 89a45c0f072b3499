//! Outer game flow
//!
//! Wraps sessions with the menu state machine: Title (mode select) → InGame
//! → Results → Title. Owns the input state, settings, and the score store;
//! persists a new per-mode high score exactly when a level first completes
//! with a score beating the stored one.

use crate::highscores::HighScores;
use crate::input::{Action, InputState};
use crate::persistence::{ScoreStore, load_high_score, save_high_score};
use crate::settings::Settings;
use crate::sim::events::GameEvent;
use crate::sim::state::{GameMode, GamePhase, GameSession};
use crate::sim::tick::tick;

/// Top-level UI screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    /// Mode select: left/right toggles skate/surf, jump starts a run
    Title,
    InGame,
    /// Run over; jump or menu returns to the title
    Results { final_score: u64, completed: bool },
}

pub struct Game {
    store: Box<dyn ScoreStore>,
    pub settings: Settings,
    mode: GameMode,
    screen: Screen,
    session: Option<GameSession>,
    input: InputState,
}

impl Game {
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        let settings = Settings::load(store.as_ref());
        Self {
            store,
            settings,
            mode: GameMode::Skate,
            screen: Screen::Title,
            session: None,
            input: InputState::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// The running session, for the rendering collaborator's snapshots
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Feed one `(action, active)` transition from the input provider
    pub fn apply_input(&mut self, action_name: &str, active: bool) {
        if let Some(action) = Action::from_name(action_name) {
            self.input.apply(action, active);
        }
    }

    /// Typed input access for hosts that skip the string layer
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn high_score(&self, mode: GameMode) -> u64 {
        load_high_score(self.store.as_ref(), mode)
    }

    pub fn leaderboard(&self, mode: GameMode) -> HighScores {
        HighScores::load(self.store.as_ref(), mode)
    }

    pub fn save_settings(&mut self) {
        // Clone to keep the borrow checker happy about store + settings
        let settings = self.settings.clone();
        settings.save(self.store.as_mut());
    }

    /// One host frame. Drives whichever screen is active and consumes the
    /// input edges afterward.
    pub fn frame(&mut self, dt: f32, now_ms: f64) -> Vec<GameEvent> {
        let events = match self.screen {
            Screen::Title => {
                self.title_frame(now_ms);
                Vec::new()
            }
            Screen::InGame => self.play_frame(dt, now_ms),
            Screen::Results { .. } => {
                if self.input.just_pressed(Action::Jump) || self.input.just_pressed(Action::Menu) {
                    self.screen = Screen::Title;
                }
                Vec::new()
            }
        };
        self.input.end_frame();
        events
    }

    fn title_frame(&mut self, now_ms: f64) {
        if self.input.just_pressed(Action::Left) || self.input.just_pressed(Action::Right) {
            self.mode = match self.mode {
                GameMode::Skate => GameMode::Surf,
                GameMode::Surf => GameMode::Skate,
            };
            log::info!("mode selected: {}", self.mode.as_str());
        }
        if self.input.just_pressed(Action::Jump) {
            self.start_session(0, now_ms);
        }
    }

    fn start_session(&mut self, level_index: usize, now_ms: f64) {
        let seed = now_ms as u64;
        self.session = Some(GameSession::new(self.mode, level_index, seed));
        self.screen = Screen::InGame;
    }

    fn play_frame(&mut self, dt: f32, now_ms: f64) -> Vec<GameEvent> {
        let Some(session) = self.session.as_mut() else {
            self.screen = Screen::Title;
            return Vec::new();
        };

        // While paused, menu restarts the level from scratch
        if session.phase == GamePhase::Paused && self.input.just_pressed(Action::Menu) {
            let level_index = session.level_index;
            log::info!("restarting level {}", level_index);
            self.start_session(level_index, now_ms);
            return Vec::new();
        }

        let events = tick(session, &self.input, dt, now_ms);

        for event in &events {
            if let GameEvent::LevelCompleted { score } = event {
                let best = load_high_score(self.store.as_ref(), self.mode);
                if *score > best {
                    save_high_score(self.store.as_mut(), self.mode, *score);
                    log::info!("new {} high score: {}", self.mode.as_str(), score);
                }
            }
        }

        match session.phase {
            GamePhase::LevelComplete => {
                let score = session.scoring.score();
                let level_index = session.level_index;
                let has_next = session.has_next_level();
                self.record_run(score, level_index as u32, now_ms);

                if has_next {
                    self.start_session(level_index + 1, now_ms);
                } else {
                    self.session = None;
                    self.screen = Screen::Results {
                        final_score: score,
                        completed: true,
                    };
                }
            }
            GamePhase::GameOver => {
                let score = session.scoring.score();
                let level_index = session.level_index;
                self.record_run(score, level_index as u32, now_ms);
                self.session = None;
                self.screen = Screen::Results {
                    final_score: score,
                    completed: false,
                };
            }
            _ => {}
        }

        events
    }

    fn record_run(&mut self, score: u64, level: u32, now_ms: f64) {
        let mut board = HighScores::load(self.store.as_ref(), self.mode);
        if board.add_score(score, level, now_ms).is_some() {
            board.save(self.store.as_mut(), self.mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::scoring::ScoreSource;
    use crate::tuning::levels::levels_for_mode;
    use crate::tuning::tricks::find_trick;

    fn game() -> Game {
        Game::new(Box::new(MemoryStore::new()))
    }

    fn press(game: &mut Game, action: Action, now_ms: f64) -> Vec<GameEvent> {
        game.input_mut().apply(action, true);
        let events = game.frame(1.0 / 60.0, now_ms);
        game.input_mut().apply(action, false);
        events
    }

    /// Drive the active session's scoring to completion
    fn force_complete(game: &mut Game) {
        let session = game.session.as_mut().expect("in game");
        let def = session.def;
        let scoring = &mut session.scoring;

        if let Some(n) = def.objectives.collectibles_target {
            for _ in 0..n {
                scoring.record_collectible(10);
            }
        }
        for goal in def.objectives.special_goals {
            use crate::tuning::levels::GoalKind;
            match goal.kind {
                GoalKind::PerformTrick { trick_id } => {
                    let trick = find_trick(session.mode, trick_id).unwrap();
                    for _ in 0..goal.target {
                        scoring.record_trick(trick, 10);
                    }
                }
                GoalKind::Combo => {
                    let trick = &crate::tuning::tricks::tricks_for_mode(session.mode)[0];
                    for _ in 0..goal.target.max(3) {
                        scoring.record_trick(trick, 10);
                    }
                }
                GoalKind::Collectibles => {
                    for _ in 0..goal.target {
                        scoring.record_collectible(1);
                    }
                }
                GoalKind::TubeTime => {
                    for _ in 0..goal.target {
                        scoring.record_trick_tick("tube-ride", 10);
                    }
                }
            }
        }
        if let Some(target) = def.objectives.score_target {
            scoring.add_points(target, ScoreSource::Generic);
        }
        assert!(scoring.level_complete());
    }

    #[test]
    fn test_title_mode_toggle_and_start() {
        let mut g = game();
        assert_eq!(g.screen(), Screen::Title);
        assert_eq!(g.mode(), GameMode::Skate);

        press(&mut g, Action::Right, 0.0);
        assert_eq!(g.mode(), GameMode::Surf);
        press(&mut g, Action::Left, 0.0);
        assert_eq!(g.mode(), GameMode::Skate);

        press(&mut g, Action::Jump, 1000.0);
        assert_eq!(g.screen(), Screen::InGame);
        assert!(g.session().is_some());
    }

    #[test]
    fn test_level_complete_persists_high_score_and_advances() {
        let mut g = game();
        press(&mut g, Action::Jump, 1000.0);
        force_complete(&mut g);
        let score = g.session().unwrap().scoring.score();

        g.frame(1.0 / 60.0, 2000.0);

        // High score persisted, next level started fresh
        assert_eq!(g.high_score(GameMode::Skate), score);
        let session = g.session().expect("advanced to next level");
        assert_eq!(session.level_index, 1);
        assert_eq!(session.scoring.score(), 0);
        assert!(g.leaderboard(GameMode::Skate).top_score().is_some());
    }

    #[test]
    fn test_high_score_only_improves() {
        let mut g = game();
        save_high_score(g.store.as_mut(), GameMode::Skate, 1_000_000);

        press(&mut g, Action::Jump, 1000.0);
        force_complete(&mut g);
        g.frame(1.0 / 60.0, 2000.0);

        assert_eq!(g.high_score(GameMode::Skate), 1_000_000);
    }

    #[test]
    fn test_completing_last_level_ends_run() {
        let mut g = game();
        press(&mut g, Action::Right, 0.0); // surf
        press(&mut g, Action::Jump, 1000.0);

        let last = levels_for_mode(GameMode::Surf).len() - 1;
        // Jump straight to the last level
        g.session = Some(GameSession::new(GameMode::Surf, last, 7));
        force_complete(&mut g);
        g.frame(1.0 / 60.0, 2000.0);

        match g.screen() {
            Screen::Results { completed, .. } => assert!(completed),
            other => panic!("expected results screen, got {:?}", other),
        }
        assert!(g.session().is_none());

        // Jump returns to title
        press(&mut g, Action::Jump, 3000.0);
        assert_eq!(g.screen(), Screen::Title);
    }

    #[test]
    fn test_time_out_reaches_results() {
        let mut g = game();
        press(&mut g, Action::Jump, 1000.0);
        g.session.as_mut().unwrap().time_remaining = 2;

        g.frame(1.0 / 60.0, 1100.0);
        g.frame(1.0 / 60.0, 1200.0);
        g.frame(1.0 / 60.0, 1300.0);

        match g.screen() {
            Screen::Results { completed, .. } => assert!(!completed),
            other => panic!("expected results screen, got {:?}", other),
        }
    }

    #[test]
    fn test_restart_while_paused() {
        let mut g = game();
        press(&mut g, Action::Jump, 1000.0);

        // Play a little, then pause
        for i in 0..30 {
            g.frame(1.0 / 60.0, 1000.0 + i as f64 * 16.0);
        }
        let frame_before = g.session().unwrap().frame;
        assert!(frame_before > 0);
        press(&mut g, Action::Pause, 2000.0);
        assert_eq!(g.session().unwrap().phase, GamePhase::Paused);

        press(&mut g, Action::Menu, 3000.0);
        let session = g.session().expect("restarted");
        assert_eq!(session.frame, 0);
        assert_eq!(session.level_index, 0);
        assert_eq!(session.phase, GamePhase::Playing);
    }
}
