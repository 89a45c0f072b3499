//! Shredwave entry point
//!
//! The native binary runs a short scripted headless session as a smoke
//! check; real hosts embed the library and drive `Game::frame` from their
//! own render loop.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shredwave (native) starting...");

    use shredwave::game::Game;
    use shredwave::persistence::{FileStore, MemoryStore, ScoreStore};
    use shredwave::platform;
    use shredwave::sim::GameMode;

    let store: Box<dyn ScoreStore> = match FileStore::open_default() {
        Ok(s) => Box::new(s),
        Err(e) => {
            log::warn!("score store unavailable ({}), scores are session-only", e);
            Box::new(MemoryStore::new())
        }
    };
    let mut game = Game::new(store);

    // Scripted demo: start a skate run, ride right, jump and flip on a cycle
    game.apply_input("jump", true);
    game.frame(1.0 / 60.0, platform::now_ms());
    game.apply_input("jump", false);
    game.apply_input("right", true);

    for frame in 0..600u32 {
        match frame % 90 {
            0 => game.apply_input("jump", true),
            2 => {
                game.apply_input("jump", false);
                game.apply_input("trick1", true);
            }
            4 => game.apply_input("trick1", false),
            _ => {}
        }
        for event in game.frame(1.0 / 60.0, platform::now_ms()) {
            log::debug!("{:?}", event);
        }
    }

    if let Some(session) = game.session() {
        let scores = session.score_state();
        println!(
            "demo run: {} points, x{:.1} multiplier, {} collectibles, {} remaining seconds",
            scores.score,
            scores.multiplier,
            scores.collectibles,
            session.seconds_remaining()
        );
    }
    println!("best skate score: {}", game.high_score(GameMode::Skate));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts load the cdylib and call shredwave::init_wasm instead
}
