//! Per-frame orchestration
//!
//! One call per rendered frame. Sequencing is fixed: physics integrates,
//! the character interprets input and issues trick calls, the level runs its
//! collision pass, collision handlers resolve, the level advances (camera,
//! moving obstacles, pruning), scoring counts its timers down, and finally
//! every queued event fans out - trick events into the scoring system, the
//! whole drained queue back to the host.

use super::character::CharacterCtx;
use super::events::GameEvent;
use super::level::ZoneKind;
use super::scoring::ScoreSource;
use super::state::{GamePhase, GameSession};
use crate::consts::MAX_FRAME_DT;
use crate::input::{Action, InputState};
use crate::tuning::tricks::find_trick;

/// Advance one session by one frame of wall-clock time. Returns the events
/// the frame produced, in the order they occurred.
pub fn tick(session: &mut GameSession, input: &InputState, dt: f32, now_ms: f64) -> Vec<GameEvent> {
    // Pause is a boolean gate around the update: no subsystem advances, the
    // frame-counted timers simply stop.
    if input.just_pressed(Action::Pause) {
        match session.phase {
            GamePhase::Playing => {
                session.phase = GamePhase::Paused;
                log::info!("paused");
                return Vec::new();
            }
            GamePhase::Paused => {
                session.phase = GamePhase::Playing;
                log::info!("resumed");
            }
            _ => {}
        }
    }

    match session.phase {
        GamePhase::Paused | GamePhase::LevelComplete | GamePhase::GameOver => return Vec::new(),
        GamePhase::Playing => {}
    }

    session.frame += 1;
    let dt = dt.min(MAX_FRAME_DT);

    // 1. Physics integration
    session.physics.update(dt, now_ms);

    // 2. Character: movement, trick initiation, trick/combo timers
    let ctx = CharacterCtx {
        now_ms,
        surface_y: session.level.surface_y_at(session.physics.pos.x, now_ms),
        in_tube: session.level.in_tube_zone(session.physics.pos.x),
    };
    session.character.update(&mut session.physics, input, &ctx);

    // 3. Collision pass against the player's box
    let player = session.physics.player_aabb();
    let report = session.level.check_collisions(&player, now_ms);

    // 4. Physics collision handlers. The transient response is cleared here,
    // once per frame, so the character read the previous frame's response
    // above (grind eligibility). Upward motion passes through the surface:
    // a jump's launch frame must not be re-grounded.
    if report.ground_contact && session.physics.vel.y >= 0.0 {
        session.physics.handle_ground_collision(report.ground_y);
    } else {
        session.physics.leave_ground();
    }

    session.physics.clear_collision_response();
    for (kind, overlap) in &report.obstacle_hits {
        session.physics.handle_obstacle_collision(*kind, *overlap);
    }

    // Speed-boost zones push along the direction of travel while inside
    if let Some(push) = session.level.speed_boost_at(session.physics.pos.x) {
        if session.physics.vel.x != 0.0 {
            session.physics.vel.x += push * session.physics.vel.x.signum();
        }
    }

    let mut events = Vec::new();

    // 5. Collectibles feed scoring
    for pickup in &report.collected {
        session.scoring.record_collectible(pickup.value);
        events.push(GameEvent::CollectibleCollected {
            kind: pickup.kind,
            value: pickup.value,
            x: pickup.x,
            y: pickup.y,
        });
    }

    // 6. Newly entered zones
    for zone in &report.entered_zones {
        events.push(GameEvent::ZoneEntered { zone: *zone });
        match zone {
            ZoneKind::ScoreBoost {
                multiplier,
                duration_secs,
            } => session.scoring.start_special_mode(*duration_secs, *multiplier),
            ZoneKind::Tube => {
                // ctx predates the collision pass; the player is in the
                // tube as of this event
                let tube_ctx = CharacterCtx {
                    in_tube: true,
                    ..ctx
                };
                session
                    .character
                    .try_start_tube_ride(&mut session.physics, &tube_ctx);
            }
            ZoneKind::SpeedBoost { .. } => {}
        }
    }

    // 7. Level bookkeeping: camera, moving obstacles, pruning
    session.level.update(session.physics.pos.x, now_ms);

    // 8. Scoring timers (combo window, special mode) count down
    session.scoring.tick();

    // 9. Fan the character's trick events into the scoring system
    for event in session.character.drain_events() {
        match &event {
            GameEvent::TrickPerformed {
                trick_id, score, ..
            } => {
                session.scoring.add_points(*score as u64, ScoreSource::Trick);
                if let Some(trick) = find_trick(session.mode, trick_id) {
                    session.scoring.record_trick(trick, *score);
                }
            }
            GameEvent::TrickScoreTick { trick_id, points } => {
                session.scoring.record_trick_tick(trick_id, *points);
            }
            _ => {}
        }
        events.push(event);
    }
    events.extend(session.scoring.drain_events());

    // 10. Phase transitions
    if session.scoring.level_complete() {
        session.phase = GamePhase::LevelComplete;
    } else {
        session.time_remaining = session.time_remaining.saturating_sub(1);
        if session.time_remaining == 0 {
            session.phase = GamePhase::GameOver;
            let score = session.scoring.score();
            events.push(GameEvent::TimeExpired { score });
            log::info!("time expired at {} points", score);
        }
    }

    events
}
