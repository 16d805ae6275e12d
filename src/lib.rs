//! Myriapod - a segmented-chain arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (chain movement, collisions, game state)
//!
//! Rendering, window/event polling and audio live outside this crate; they
//! consume the read-only snapshots exposed by [`sim::snapshot`] and feed
//! intents back in through [`sim::TickInput`].

pub mod sim;

pub use sim::{GamePhase, GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth chain following)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 1920.0;
    pub const FIELD_HEIGHT: f32 = 1080.0;
    /// HUD band at the top of the field; nothing simulates above it
    pub const HEADER_HEIGHT: f32 = 75.0;

    /// Chain segment defaults
    pub const SEGMENT_SIZE: f32 = 40.0;
    pub const SEGMENT_SPEED: f32 = 1000.0;
    /// Movement signs a fresh segment is constructed with
    pub const SEGMENT_DIR_X: f32 = -0.4;
    pub const SEGMENT_DIR_Y: f32 = 0.4;
    /// Seconds of vertical descent before the lead resumes sweeping
    pub const AXIS_SWITCH_INTERVAL: f32 = 0.1;
    /// Exponential smoothing constant for follower interpolation
    pub const FOLLOW_SMOOTHING: f32 = 18.0;
    /// How far the lead is pushed off an obstacle it runs into
    pub const OBSTACLE_NUDGE: f32 = 5.0;
    /// Sweep clamp rect for the lead segment
    pub const CHAIN_MIN_X: f32 = 20.0;
    pub const CHAIN_MAX_X: f32 = 1900.0;
    pub const CHAIN_MIN_Y: f32 = 80.0;
    pub const CHAIN_MAX_Y: f32 = 1070.0;
    /// Followers behind the lead in a fresh chain
    pub const CHAIN_BODY_LEN: usize = 11;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE: f32 = 30.0;
    pub const OBSTACLE_MAX_HITS: u8 = 2;
    pub const OBSTACLE_COUNT: usize = 30;
    /// Obstacles snap to this grid when the field is generated
    pub const OBSTACLE_GRID: f32 = 30.0;
    /// Bottom of the obstacle band (the player zone below stays clear)
    pub const OBSTACLE_FREE_BELOW: f32 = FIELD_HEIGHT * 0.8;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 3.0;
    pub const PROJECTILE_LENGTH: f32 = 75.0;
    pub const PROJECTILE_SPEED: f32 = 1000.0;
    /// Projectiles above this y are gone for good
    pub const PROJECTILE_CULL_Y: f32 = -100.0;

    /// Roamer defaults
    pub const ROAMER_SIZE: f32 = 40.0;
    pub const ROAMER_START_X: f32 = 0.0;
    pub const ROAMER_START_Y: f32 = 800.0;
    pub const ROAMER_MIN_SPEED: f32 = 400.0;
    pub const ROAMER_MAX_SPEED: f32 = 600.0;
    pub const ROAMER_MIN_INTERVAL: f32 = 1.0;
    pub const ROAMER_MAX_INTERVAL: f32 = 3.0;

    /// Player craft defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 1000.0;
    pub const PLAYER_START_X: f32 = FIELD_WIDTH / 2.0;
    pub const PLAYER_START_Y: f32 = FIELD_HEIGHT - 50.0;

    /// Scoring
    pub const SCORE_SEGMENT_HIT: u32 = 10;
    pub const SCORE_OBSTACLE_HIT: u32 = 1;
    pub const SCORE_ROAMER_BONUS: u32 = 10;
    /// Spare lives at the start of a run; the run ends when lives go negative
    pub const START_LIVES: i32 = 2;
}
