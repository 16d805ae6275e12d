//! Game state and core simulation types
//!
//! Everything the per-frame loop mutates lives here. The `GameState` owns
//! every entity collection outright; entities never reference each other,
//! all interaction is resolved by scanning collections in `tick`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::chain::Chain;
use super::rect::Rect;
use crate::consts::*;

/// Coarse phase of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start input; nothing simulates
    Menu,
    /// Active play
    Running,
    /// All chains destroyed. Terminal until the next start input.
    Won,
    /// Out of lives. Terminal until the next start input.
    Lost,
}

/// A static hit-point-bearing blocker
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    /// Remaining hits before it is destroyed
    pub hits_left: u8,
}

impl Obstacle {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            hits_left: OBSTACLE_MAX_HITS,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(OBSTACLE_SIZE))
    }

    /// Absorb one projectile hit
    pub fn take_hit(&mut self) {
        self.hits_left = self.hits_left.saturating_sub(1);
    }

    pub fn alive(&self) -> bool {
        self.hits_left > 0
    }
}

/// A short-lived shot moving straight up
#[derive(Debug, Clone)]
pub struct Projectile {
    /// Top-left corner
    pub pos: Vec2,
}

impl Projectile {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_LENGTH))
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.y -= PROJECTILE_SPEED * dt;
    }

    /// True once the projectile has fully left the play area
    pub fn is_gone(&self) -> bool {
        self.pos.y < PROJECTILE_CULL_Y
    }
}

/// An independently random-walking enemy
#[derive(Debug, Clone)]
pub struct Roamer {
    /// Top-left corner
    pub pos: Vec2,
    pub alive: bool,
    dir: Vec2,
    change_timer: f32,
    change_interval: f32,
}

impl Roamer {
    pub fn new(rng: &mut Pcg32) -> Self {
        let mut roamer = Self {
            pos: Vec2::new(ROAMER_START_X, ROAMER_START_Y),
            alive: true,
            dir: Vec2::ZERO,
            change_timer: 0.0,
            change_interval: rng.random_range(ROAMER_MIN_INTERVAL..ROAMER_MAX_INTERVAL),
        };
        roamer.randomize_direction(rng);
        roamer
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(ROAMER_SIZE))
    }

    /// Put the roamer back at its start position. Wander direction and the
    /// direction-change timer carry over.
    pub fn reset(&mut self) {
        self.pos = Vec2::new(ROAMER_START_X, ROAMER_START_Y);
        self.alive = true;
    }

    fn randomize_direction(&mut self, rng: &mut Pcg32) {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        self.dir = Vec2::new(angle.cos(), angle.sin());
    }

    /// Random-walk one timestep: re-roll the direction when the interval
    /// expires, re-roll speed every frame, bounce off the field bounds by
    /// sign-flipping the offending axis.
    pub fn update(&mut self, dt: f32, rng: &mut Pcg32) {
        self.change_timer += dt;
        if self.change_timer >= self.change_interval {
            self.randomize_direction(rng);
            self.change_interval = rng.random_range(ROAMER_MIN_INTERVAL..ROAMER_MAX_INTERVAL);
            self.change_timer = 0.0;
        }

        let speed = rng.random_range(ROAMER_MIN_SPEED..ROAMER_MAX_SPEED);
        self.pos += self.dir * speed * dt;

        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.dir.x = -self.dir.x;
        } else if self.pos.x > FIELD_WIDTH - ROAMER_SIZE {
            self.pos.x = FIELD_WIDTH - ROAMER_SIZE;
            self.dir.x = -self.dir.x;
        }

        if self.pos.y < HEADER_HEIGHT {
            self.pos.y = HEADER_HEIGHT;
            self.dir.y = -self.dir.y;
        } else if self.pos.y > FIELD_HEIGHT - ROAMER_SIZE {
            self.pos.y = FIELD_HEIGHT - ROAMER_SIZE;
            self.dir.y = -self.dir.y;
        }
    }
}

/// The user-steered craft, constrained to the field below the HUD band
#[derive(Debug, Clone)]
pub struct PlayerCraft {
    /// Top-left corner
    pub pos: Vec2,
    pub moving_left: bool,
    pub moving_right: bool,
    pub moving_up: bool,
    pub moving_down: bool,
    start: Vec2,
}

impl PlayerCraft {
    pub fn new() -> Self {
        let start = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        Self {
            pos: start,
            moving_left: false,
            moving_right: false,
            moving_up: false,
            moving_down: false,
            start,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(PLAYER_SIZE))
    }

    /// Send the craft back to its start position (life lost or run reset)
    pub fn reset(&mut self) {
        self.pos = self.start;
    }

    /// Move along each intended axis, clamped to the field bounds, then let
    /// the first intersecting obstacle block motion along whichever axes
    /// were being moved.
    pub fn update(&mut self, dt: f32, obstacles: &[Obstacle]) {
        if self.moving_up {
            self.pos.y -= PLAYER_SPEED * dt;
            if self.pos.y <= HEADER_HEIGHT {
                self.pos.y = HEADER_HEIGHT;
            }
        }
        if self.moving_down {
            self.pos.y += PLAYER_SPEED * dt;
            if self.pos.y + PLAYER_SIZE >= FIELD_HEIGHT {
                self.pos.y = FIELD_HEIGHT - PLAYER_SIZE;
            }
        }
        if self.moving_left {
            self.pos.x -= PLAYER_SPEED * dt;
            if self.pos.x <= 0.0 {
                self.pos.x = 0.0;
            }
        }
        if self.moving_right {
            self.pos.x += PLAYER_SPEED * dt;
            if self.pos.x + PLAYER_SIZE >= FIELD_WIDTH {
                self.pos.x = FIELD_WIDTH - PLAYER_SIZE;
            }
        }

        for obstacle in obstacles {
            if self.rect().intersects(&obstacle.rect()) {
                let o = obstacle.rect();
                if self.moving_up {
                    self.pos.y = o.bottom();
                }
                if self.moving_down {
                    self.pos.y = o.top() - PLAYER_SIZE;
                }
                if self.moving_left {
                    self.pos.x = o.right();
                }
                if self.moving_right {
                    self.pos.x = o.left() - PLAYER_SIZE;
                }
                break;
            }
        }
    }
}

impl Default for PlayerCraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: i32,
    pub player: PlayerCraft,
    pub chains: Vec<Chain>,
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    pub roamer: Roamer,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh state in the menu phase
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let roamer = Roamer::new(&mut rng);
        Self {
            seed,
            phase: GamePhase::Menu,
            score: 0,
            lives: START_LIVES,
            player: PlayerCraft::new(),
            chains: Vec::new(),
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            roamer,
            rng,
        }
    }

    /// Reset everything for a new run and enter the running phase
    pub fn start_run(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.player.reset();
        self.projectiles.clear();
        // Spawn just below the HUD band so the fresh lead starts inside its
        // sweep rect.
        self.chains = vec![Chain::spawn(
            FIELD_WIDTH,
            HEADER_HEIGHT + 20.0,
            CHAIN_BODY_LEN,
        )];
        self.roamer.reset();
        self.obstacles = generate_obstacle_field(&mut self.rng);
        self.phase = GamePhase::Running;
        log::info!("run started (seed {})", self.seed);
    }
}

/// Sample a fresh obstacle field: uniform positions inside the obstacle
/// band, snapped to the placement grid.
pub fn generate_obstacle_field(rng: &mut Pcg32) -> Vec<Obstacle> {
    let max_x_cell = ((FIELD_WIDTH - OBSTACLE_SIZE) / OBSTACLE_GRID) as u32;
    let min_y_cell = ((HEADER_HEIGHT + 2.0 * OBSTACLE_GRID) / OBSTACLE_GRID) as u32;
    let max_y_cell = ((OBSTACLE_FREE_BELOW - OBSTACLE_SIZE) / OBSTACLE_GRID) as u32;

    (0..OBSTACLE_COUNT)
        .map(|_| {
            let x = rng.random_range(1..=max_x_cell) as f32 * OBSTACLE_GRID;
            let y = rng.random_range(min_y_cell..=max_y_cell) as f32 * OBSTACLE_GRID;
            Obstacle::new(Vec2::new(x, y))
        })
        .collect()
}
