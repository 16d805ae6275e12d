//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (owned by `GameState`)
//! - Fixed collision resolution order
//! - No rendering or platform dependencies

pub mod chain;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use chain::{Chain, Facing, HitOutcome, MoveAxis, Segment, SegmentRole};
pub use rect::Rect;
pub use snapshot::{Frame, build_frame};
pub use state::{GamePhase, GameState, Obstacle, PlayerCraft, Projectile, Roamer};
pub use tick::{TickInput, tick};
