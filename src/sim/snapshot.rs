//! Read-only render snapshots
//!
//! The renderer contract: after a tick completes, the loop builds a `Frame`
//! and hands it out. A frame owns plain copies of shape/position data, so a
//! renderer (same process or across a pipe, via serde) never aliases live
//! simulation state. This module never mutates the world.

use serde::{Deserialize, Serialize};

use super::chain::{Facing, SegmentRole};
use super::rect::Rect;
use super::state::{GamePhase, GameState};

/// One chain segment as the renderer sees it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentView {
    pub rect: Rect,
    pub facing: Facing,
    pub role: SegmentRole,
}

/// One obstacle, with damage state for texture selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub rect: Rect,
    pub hits_left: u8,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: i32,
    pub player: Rect,
    /// One inner vec per live chain, segments lead-to-tail
    pub chains: Vec<Vec<SegmentView>>,
    pub obstacles: Vec<ObstacleView>,
    pub projectiles: Vec<Rect>,
    /// Absent while the roamer is waiting to respawn
    pub roamer: Option<Rect>,
}

/// Capture the current state as an immutable frame
pub fn build_frame(state: &GameState) -> Frame {
    Frame {
        phase: state.phase,
        score: state.score,
        lives: state.lives,
        player: state.player.rect(),
        chains: state
            .chains
            .iter()
            .map(|chain| {
                chain
                    .segments()
                    .iter()
                    .map(|s| SegmentView {
                        rect: s.rect(),
                        facing: s.facing,
                        role: s.role,
                    })
                    .collect()
            })
            .collect(),
        obstacles: state
            .obstacles
            .iter()
            .map(|o| ObstacleView {
                rect: o.rect(),
                hits_left: o.hits_left,
            })
            .collect(),
        projectiles: state.projectiles.iter().map(|p| p.rect()).collect(),
        roamer: state.roamer.alive.then(|| state.roamer.rect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_mirrors_state() {
        let mut state = GameState::new(3);
        state.start_run();
        let frame = build_frame(&state);

        assert_eq!(frame.phase, GamePhase::Running);
        assert_eq!(frame.chains.len(), 1);
        assert_eq!(frame.chains[0].len(), state.chains[0].len());
        assert_eq!(frame.obstacles.len(), state.obstacles.len());
        assert_eq!(frame.chains[0][0].role, SegmentRole::Lead);
        assert!(frame.roamer.is_some());

        state.roamer.alive = false;
        let frame = build_frame(&state);
        assert!(frame.roamer.is_none());
    }

    #[test]
    fn test_frame_serializes() {
        let mut state = GameState::new(3);
        state.start_run();
        let frame = build_frame(&state);
        let json = serde_json::to_string(&frame).unwrap();
        let back: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, frame.score);
        assert_eq!(back.chains[0].len(), frame.chains[0].len());
    }
}
