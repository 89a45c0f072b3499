//! Level state: terrain profiles, obstacles, collectibles, special zones
//!
//! Built once per level from an authored definition plus seeded procedural
//! generation, then queried every frame: terrain height at an x position,
//! AABB collisions against the player, camera follow. Collectibles are
//! marked on hit and pruned lazily on the next `update` call.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::state::GameMode;
use crate::consts::*;
use crate::lerp;
use crate::tuning::levels::LevelDef;

/// Horizontal oscillation applied to obstacles flagged `moving`
const MOVING_OBSTACLE_RANGE: f32 = 40.0;
const MOVING_OBSTACLE_FREQUENCY: f32 = 1.0;

/// Obstacle kinds, with kind-specific fixed fields instead of property bags
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Grindable; the bonus is added when a grind starts on it
    Rail { trick_bonus: u32 },
    /// Riding into the face launches the player upward
    Ramp { launch_velocity: f32 },
    Ledge,
    Rock,
    Buoy,
    Driftwood,
}

impl ObstacleKind {
    pub fn is_grindable(&self) -> bool {
        matches!(self, ObstacleKind::Rail { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub aabb: Aabb,
    pub moving: bool,
    base_x: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    Gem,
}

impl CollectibleKind {
    pub fn value(&self) -> u32 {
        match self {
            CollectibleKind::Coin => 10,
            CollectibleKind::Gem => 25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub aabb: Aabb,
    pub value: u32,
    pub collected: bool,
}

/// Special zone subtypes with their presets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZoneKind {
    /// Entering starts a timed global score multiplier
    ScoreBoost { multiplier: f32, duration_secs: f32 },
    /// Horizontal push applied while inside
    SpeedBoost { push: f32 },
    /// Tube rides are eligible while inside (surf)
    Tube,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialZone {
    pub kind: ZoneKind,
    pub x: f32,
    pub width: f32,
    /// Player currently inside the span
    pub active: bool,
}

impl SpecialZone {
    pub fn contains(&self, x: f32) -> bool {
        x >= self.x && x < self.x + self.width
    }
}

/// Wave segment character (surf terrain)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveKind {
    Normal,
    Breaking,
    Choppy,
}

/// A parallax background layer; pure data the renderer scrolls against the
/// camera, the simulation never reads it back
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BackgroundLayer {
    pub depth: u8,
    /// Fraction of camera movement this layer scrolls at
    pub parallax: f32,
}

/// A skate terrain segment; ramps interpolate linearly between the ends
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GroundSegment {
    pub start_x: f32,
    pub end_x: f32,
    pub start_y: f32,
    pub end_y: f32,
}

/// A surf terrain segment carrying its own sinusoid parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaveSegment {
    pub kind: WaveKind,
    pub start_x: f32,
    pub end_x: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

/// A collectible the player just touched
#[derive(Debug, Clone, Copy)]
pub struct CollectedPickup {
    pub kind: CollectibleKind,
    pub value: u32,
    pub x: f32,
    pub y: f32,
}

/// Everything `check_collisions` found this frame
#[derive(Debug, Default)]
pub struct CollisionReport {
    pub ground_contact: bool,
    pub ground_y: f32,
    /// Every non-ground obstacle overlapping the player, with the overlap rect
    pub obstacle_hits: Vec<(ObstacleKind, Aabb)>,
    pub collected: Vec<CollectedPickup>,
    /// Zones the player entered this frame
    pub entered_zones: Vec<ZoneKind>,
}

#[derive(Debug)]
pub struct LevelSystem {
    mode: GameMode,
    length: f32,
    background_layers: Vec<BackgroundLayer>,
    ground_segments: Vec<GroundSegment>,
    wave_segments: Vec<WaveSegment>,
    obstacles: Vec<Obstacle>,
    collectibles: Vec<Collectible>,
    zones: Vec<SpecialZone>,
    camera_x: f32,
    next_id: u32,
}

impl LevelSystem {
    /// Build the level: mode-specific terrain profile, authored obstacles,
    /// procedural scatter, collectibles, special zones.
    pub fn generate<R: Rng>(def: &LevelDef, mode: GameMode, rng: &mut R) -> Self {
        let mut level = Self {
            mode,
            length: def.layout.length,
            background_layers: background_for_mode(mode),
            ground_segments: Vec::new(),
            wave_segments: Vec::new(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            zones: Vec::new(),
            camera_x: 0.0,
            next_id: 1,
        };

        match mode {
            GameMode::Skate => level.generate_ground_profile(def, rng),
            GameMode::Surf => level.generate_wave_profile(def, rng),
        }

        for fixed in def.fixed_obstacles {
            let id = level.next_id();
            level.obstacles.push(Obstacle {
                id,
                kind: fixed.kind,
                aabb: Aabb::new(fixed.x, fixed.y, fixed.w, fixed.h),
                moving: fixed.moving,
                base_x: fixed.x,
            });
        }

        level.scatter_obstacles(def, rng);
        level.scatter_collectibles(def, rng);
        level.place_zones(def, rng);

        log::info!(
            "level '{}' generated: {} obstacles, {} collectibles, {} zones",
            def.id,
            level.obstacles.len(),
            level.collectibles.len(),
            level.zones.len()
        );

        level
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Segmented ground: 70% flat, 15% ramp up, 15% ramp down, deltas
    /// bounded by the difficulty's variation amount
    fn generate_ground_profile<R: Rng>(&mut self, def: &LevelDef, rng: &mut R) {
        let variation = def.difficulty.variation();
        let mut y = GROUND_LEVEL;
        let mut x = 0.0;

        while x < self.length {
            let end_x = (x + SEGMENT_LENGTH).min(self.length);
            let roll: f32 = rng.random();
            let end_y = if roll < 0.7 {
                y
            } else if roll < 0.85 {
                (y - rng.random_range(0.0..=variation)).max(GROUND_LEVEL - 150.0)
            } else {
                (y + rng.random_range(0.0..=variation)).min(GROUND_LEVEL + 80.0)
            };

            self.ground_segments.push(GroundSegment {
                start_x: x,
                end_x,
                start_y: y,
                end_y,
            });

            y = end_y;
            x = end_x;
        }
    }

    /// Wave segments: authored sections win, the rest rolls
    /// normal/breaking/choppy with kind-specific amplitude and frequency
    fn generate_wave_profile<R: Rng>(&mut self, def: &LevelDef, rng: &mut R) {
        let height_scale = def.layout.wave_height;
        let mut x = 0.0;

        while x < self.length {
            let end_x = (x + SEGMENT_LENGTH).min(self.length);
            let mid = (x + end_x) / 2.0;

            let authored = def
                .wave_sections
                .iter()
                .find(|s| mid >= s.start_x && mid < s.end_x);

            let segment = match authored {
                Some(s) => WaveSegment {
                    kind: s.kind,
                    start_x: x,
                    end_x,
                    amplitude: s.amplitude,
                    frequency: s.frequency,
                },
                None => {
                    let roll: f32 = rng.random();
                    let (kind, amplitude, frequency) = if roll < 0.6 {
                        (
                            WaveKind::Normal,
                            rng.random_range(20.0..35.0),
                            rng.random_range(1.0..2.0),
                        )
                    } else if roll < 0.85 {
                        (
                            WaveKind::Breaking,
                            rng.random_range(35.0..55.0),
                            rng.random_range(1.5..2.5),
                        )
                    } else {
                        (
                            WaveKind::Choppy,
                            rng.random_range(12.0..22.0),
                            rng.random_range(2.5..4.0),
                        )
                    };
                    WaveSegment {
                        kind,
                        start_x: x,
                        end_x,
                        amplitude: amplitude * height_scale,
                        frequency,
                    }
                }
            };

            self.wave_segments.push(segment);
            x = end_x;
        }
    }

    /// Scatter procedural obstacles at the layout's average spacing, skipping
    /// placements too close to an existing obstacle
    fn scatter_obstacles<R: Rng>(&mut self, def: &LevelDef, rng: &mut R) {
        let spacing = (500.0 / def.layout.obstacle_frequency).floor();
        let mut x = spacing;

        while x < self.length - SEGMENT_LENGTH {
            let too_close = self
                .obstacles
                .iter()
                .any(|o| (o.aabb.center().x - x).abs() < MIN_OBSTACLE_GAP);
            if too_close {
                x += spacing;
                continue;
            }

            let (kind, w, h, y) = match self.mode {
                GameMode::Skate => {
                    let roll: f32 = rng.random();
                    if roll < 0.4 {
                        let w = rng.random_range(40.0..80.0);
                        let h = rng.random_range(20.0..40.0);
                        (ObstacleKind::Ledge, w, h, self.ground_y_at(x) - h)
                    } else if roll < 0.7 {
                        let w = rng.random_range(120.0..220.0);
                        (
                            ObstacleKind::Rail { trick_bonus: 50 },
                            w,
                            12.0,
                            self.ground_y_at(x) - 24.0,
                        )
                    } else {
                        let w = rng.random_range(60.0..100.0);
                        let h = rng.random_range(30.0..50.0);
                        (
                            ObstacleKind::Ramp {
                                launch_velocity: rng.random_range(8.0..12.0),
                            },
                            w,
                            h,
                            self.ground_y_at(x) - h,
                        )
                    }
                }
                GameMode::Surf => {
                    let roll: f32 = rng.random();
                    if roll < 0.5 {
                        let w = rng.random_range(40.0..70.0);
                        let h = rng.random_range(30.0..60.0);
                        (ObstacleKind::Rock, w, h, WATER_LEVEL + 10.0)
                    } else if roll < 0.8 {
                        (ObstacleKind::Buoy, 30.0, 30.0, WATER_LEVEL - 25.0)
                    } else {
                        let w = rng.random_range(80.0..140.0);
                        (ObstacleKind::Driftwood, w, 15.0, WATER_LEVEL - 5.0)
                    }
                }
            };

            let moving = kind == ObstacleKind::Buoy;
            let id = self.next_id();
            self.obstacles.push(Obstacle {
                id,
                kind,
                aabb: Aabb::new(x, y, w, h),
                moving,
                base_x: x,
            });

            x += spacing;
        }
    }

    /// Scatter collectibles: 80% common coins, 20% higher-value gems, with
    /// ±50 unit jitter around the average spacing
    fn scatter_collectibles<R: Rng>(&mut self, def: &LevelDef, rng: &mut R) {
        let spacing = (150.0 / def.layout.collectible_frequency).floor();
        let mut x = spacing;

        while x < self.length - 100.0 {
            let jittered = x + rng.random_range(-50.0..=50.0);
            let kind = if rng.random::<f32>() < 0.8 {
                CollectibleKind::Coin
            } else {
                CollectibleKind::Gem
            };

            let base_y = match self.mode {
                GameMode::Skate => self.ground_y_at(jittered),
                GameMode::Surf => WATER_LEVEL,
            };
            let y = base_y - rng.random_range(30.0..120.0);

            let id = self.next_id();
            self.collectibles.push(Collectible {
                id,
                kind,
                aabb: Aabb::new(jittered, y, 20.0, 20.0),
                value: kind.value(),
                collected: false,
            });

            x += spacing;
        }
    }

    /// Authored zones win; otherwise five random zones with subtype presets
    fn place_zones<R: Rng>(&mut self, def: &LevelDef, rng: &mut R) {
        if !def.special_zones.is_empty() {
            for z in def.special_zones {
                self.zones.push(SpecialZone {
                    kind: z.kind,
                    x: z.x,
                    width: z.width,
                    active: false,
                });
            }
            return;
        }

        for _ in 0..5 {
            let (kind, width) = match self.mode {
                GameMode::Skate => {
                    if rng.random::<f32>() < 0.6 {
                        (
                            ZoneKind::ScoreBoost {
                                multiplier: 2.0,
                                duration_secs: 8.0,
                            },
                            300.0,
                        )
                    } else {
                        (ZoneKind::SpeedBoost { push: 0.35 }, 250.0)
                    }
                }
                GameMode::Surf => {
                    let roll: f32 = rng.random();
                    if roll < 0.4 {
                        (ZoneKind::Tube, 400.0)
                    } else if roll < 0.75 {
                        (
                            ZoneKind::ScoreBoost {
                                multiplier: 2.0,
                                duration_secs: 8.0,
                            },
                            300.0,
                        )
                    } else {
                        (ZoneKind::SpeedBoost { push: 0.3 }, 250.0)
                    }
                }
            };
            let max_x = (self.length - width - 300.0).max(301.0);
            let x = rng.random_range(300.0..max_x);
            self.zones.push(SpecialZone {
                kind,
                x,
                width,
                active: false,
            });
        }
    }

    /// Terrain height under an x position (skate): linear interpolation
    /// across the containing segment, default level outside any segment
    pub fn ground_y_at(&self, x: f32) -> f32 {
        for seg in &self.ground_segments {
            if x >= seg.start_x && x < seg.end_x {
                let t = (x - seg.start_x) / (seg.end_x - seg.start_x);
                return lerp(seg.start_y, seg.end_y, t);
            }
        }
        GROUND_LEVEL
    }

    /// Wave height under an x position (surf), using the containing
    /// segment's own amplitude and frequency
    pub fn wave_y_at(&self, x: f32, now_ms: f64) -> f32 {
        for seg in &self.wave_segments {
            if x >= seg.start_x && x < seg.end_x {
                let normalized = (x - seg.start_x) / (seg.end_x - seg.start_x);
                let phase =
                    std::f32::consts::TAU * normalized * seg.frequency + (now_ms * 0.001) as f32;
                return WATER_LEVEL + phase.sin() * seg.amplitude;
            }
        }
        WATER_LEVEL
    }

    /// Mode-appropriate terrain height
    pub fn surface_y_at(&self, x: f32, now_ms: f64) -> f32 {
        match self.mode {
            GameMode::Skate => self.ground_y_at(x),
            GameMode::Surf => self.wave_y_at(x, now_ms),
        }
    }

    /// One collision pass against the player's box: terrain contact, every
    /// overlapping obstacle with its overlap rectangle, collectibles hit for
    /// the first time, and zones newly entered.
    pub fn check_collisions(&mut self, player: &Aabb, now_ms: f64) -> CollisionReport {
        let mut report = CollisionReport::default();
        let center_x = player.center().x;

        report.ground_y = self.surface_y_at(center_x, now_ms);
        report.ground_contact = player.max().y >= report.ground_y;

        for obs in &self.obstacles {
            if let Some(overlap) = player.overlap(&obs.aabb) {
                report.obstacle_hits.push((obs.kind, overlap));
            }
        }

        for c in &mut self.collectibles {
            if !c.collected && player.intersects(&c.aabb) {
                c.collected = true;
                report.collected.push(CollectedPickup {
                    kind: c.kind,
                    value: c.value,
                    x: c.aabb.x,
                    y: c.aabb.y,
                });
            }
        }

        for zone in &mut self.zones {
            let inside = zone.contains(center_x);
            if inside && !zone.active {
                zone.active = true;
                report.entered_zones.push(zone.kind);
            } else if !inside && zone.active {
                zone.active = false;
            }
        }

        report
    }

    /// Per-frame bookkeeping: camera follow, moving-obstacle oscillation,
    /// pruning of collected collectibles
    pub fn update(&mut self, player_x: f32, now_ms: f64) {
        self.camera_x = player_x - CAMERA_OFFSET;

        let t = (now_ms * 0.001) as f32;
        for obs in &mut self.obstacles {
            if obs.moving {
                obs.aabb.x = obs.base_x + (t * MOVING_OBSTACLE_FREQUENCY).sin() * MOVING_OBSTACLE_RANGE;
            }
        }

        self.collectibles.retain(|c| !c.collected);
    }

    /// Whether an x position lies inside a tube zone (surf trick eligibility)
    pub fn in_tube_zone(&self, x: f32) -> bool {
        self.zones
            .iter()
            .any(|z| z.kind == ZoneKind::Tube && z.contains(x))
    }

    /// Horizontal push from any speed-boost zone containing `x`
    pub fn speed_boost_at(&self, x: f32) -> Option<f32> {
        self.zones.iter().find_map(|z| match z.kind {
            ZoneKind::SpeedBoost { push } if z.contains(x) => Some(push),
            _ => None,
        })
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn camera_x(&self) -> f32 {
        self.camera_x
    }

    pub fn background_layers(&self) -> &[BackgroundLayer] {
        &self.background_layers
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn zones(&self) -> &[SpecialZone] {
        &self.zones
    }

    pub fn ground_segments(&self) -> &[GroundSegment] {
        &self.ground_segments
    }

    pub fn wave_segments(&self) -> &[WaveSegment] {
        &self.wave_segments
    }

    /// Player spawn point for this level
    pub fn spawn_point(&self) -> Vec2 {
        match self.mode {
            GameMode::Skate => Vec2::new(100.0, self.ground_y_at(100.0)),
            GameMode::Surf => Vec2::new(100.0, WATER_LEVEL),
        }
    }
}

fn background_for_mode(mode: GameMode) -> Vec<BackgroundLayer> {
    match mode {
        GameMode::Skate => vec![
            BackgroundLayer { depth: 0, parallax: 0.1 },
            BackgroundLayer { depth: 1, parallax: 0.3 },
            BackgroundLayer { depth: 2, parallax: 0.6 },
        ],
        GameMode::Surf => vec![
            BackgroundLayer { depth: 0, parallax: 0.05 },
            BackgroundLayer { depth: 1, parallax: 0.25 },
            BackgroundLayer { depth: 2, parallax: 0.5 },
        ],
    }
}
