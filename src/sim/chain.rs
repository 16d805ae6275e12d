//! Chain movement, splitting and hit handling
//!
//! The tricky part of Myriapod: a chain is an ordered run of segments where
//! only the front segment (the lead) has autonomous motion. Followers chase
//! the segment ahead of them with lag-behind interpolation, and a projectile
//! hit anywhere in the interior must split the chain into two independent
//! chains without a frame of inconsistent state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::Obstacle;
use crate::consts::*;

/// One of the four cardinal directions a segment can face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
    Up,
    Down,
}

/// Whether a segment drives the chain or trails it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentRole {
    Lead,
    Follower,
}

/// Active movement axis of a lead segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAxis {
    Horizontal,
    Vertical,
}

/// One body unit of a chain
///
/// Every segment carries the full movement policy; only the lead consults
/// it. That keeps promotion on lead-loss a plain field mutation: the
/// promoted segment resumes from the axis/direction/timer values it has
/// held since construction.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Top-left corner of the segment's box
    pub pos: Vec2,
    pub facing: Facing,
    pub role: SegmentRole,
    axis: MoveAxis,
    dir_x: f32,
    dir_y: f32,
    axis_timer: f32,
    axis_interval: f32,
    speed: f32,
}

impl Segment {
    pub fn new(role: SegmentRole, pos: Vec2) -> Self {
        let mut seg = Self {
            pos,
            facing: Facing::Left,
            role,
            axis: MoveAxis::Horizontal,
            dir_x: SEGMENT_DIR_X,
            dir_y: SEGMENT_DIR_Y,
            axis_timer: 0.0,
            axis_interval: AXIS_SWITCH_INTERVAL,
            speed: SEGMENT_SPEED,
        };
        seg.recompute_facing();
        seg
    }

    /// Collision box for this segment
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(SEGMENT_SIZE))
    }

    /// Derive facing from the active axis and its direction sign
    fn recompute_facing(&mut self) {
        self.facing = match self.axis {
            MoveAxis::Horizontal => {
                if self.dir_x > 0.0 {
                    Facing::Right
                } else {
                    Facing::Left
                }
            }
            MoveAxis::Vertical => {
                if self.dir_y > 0.0 {
                    Facing::Down
                } else {
                    Facing::Up
                }
            }
        };
    }

    /// Autonomous sweep-and-descend motion. Lead segments only.
    ///
    /// Sweeps along the horizontal axis until a field boundary flips it into
    /// a short vertical descent; the descent ends when the axis-switch timer
    /// expires, producing the "sweep a row, drop a row" pattern.
    pub fn advance(&mut self, dt: f32) {
        debug_assert_eq!(self.role, SegmentRole::Lead);

        match self.axis {
            MoveAxis::Horizontal => {
                self.pos.x += self.dir_x * self.speed * dt;
            }
            MoveAxis::Vertical => {
                self.axis_timer += dt;
                self.pos.y += self.dir_y * self.speed * dt;
                if self.axis_timer >= self.axis_interval {
                    self.axis_timer = 0.0;
                    self.axis = MoveAxis::Horizontal;
                    self.recompute_facing();
                }
            }
        }

        // Field boundary checks apply on both axes regardless of which one
        // moved this frame.
        if self.pos.x < CHAIN_MIN_X {
            self.pos.x = CHAIN_MIN_X;
            self.axis = MoveAxis::Vertical;
            self.dir_x = -self.dir_x;
            self.recompute_facing();
        } else if self.pos.x > CHAIN_MAX_X {
            self.pos.x = CHAIN_MAX_X;
            self.axis = MoveAxis::Vertical;
            self.dir_x = -self.dir_x;
            self.recompute_facing();
        }

        if self.pos.y < CHAIN_MIN_Y {
            self.pos.y = CHAIN_MIN_Y;
            self.axis = MoveAxis::Horizontal;
            self.dir_y = -self.dir_y;
            self.recompute_facing();
        } else if self.pos.y > CHAIN_MAX_Y {
            self.pos.y = CHAIN_MAX_Y;
            self.axis = MoveAxis::Horizontal;
            self.dir_y = -self.dir_y;
            self.recompute_facing();
        }
    }

    /// Lag-behind interpolation toward the segment ahead. Followers only.
    pub fn follow_target(&mut self, target: Vec2, dt: f32) {
        debug_assert_eq!(self.role, SegmentRole::Follower);
        self.pos += (target - self.pos) * FOLLOW_SMOOTHING * dt;
    }

    /// Bounce the lead off an obstacle it ran into
    ///
    /// Nudges the segment a short distance straight away from the contact
    /// point and flips the movement axis; entering the vertical axis also
    /// flips the vertical direction sign. If the contact point coincides
    /// with the segment's own position the nudge is skipped but the axis
    /// still flips.
    pub fn on_obstacle_contact(&mut self, contact: Vec2) {
        debug_assert_eq!(self.role, SegmentRole::Lead);

        let away = (self.pos - contact).normalize_or_zero();
        if away != Vec2::ZERO {
            self.pos += away * OBSTACLE_NUDGE;
        }

        match self.axis {
            MoveAxis::Horizontal => {
                self.axis = MoveAxis::Vertical;
                self.dir_y = -self.dir_y;
            }
            MoveAxis::Vertical => {
                self.axis = MoveAxis::Horizontal;
            }
        }
        self.recompute_facing();
    }

    /// Turn this segment into the lead of its chain
    ///
    /// A field mutation only: the movement policy fields carried since
    /// construction stay untouched, so the new lead picks up from there
    /// without a visible twitch.
    pub fn promote_to_lead(&mut self) {
        self.role = SegmentRole::Lead;
    }
}

/// Result of a projectile hit landing on a chain
#[derive(Debug)]
pub enum HitOutcome {
    /// One segment removed from an end; no new chain produced
    Trimmed,
    /// Interior hit: the consumed segment's tail half re-rooted as a new chain
    Split(Chain),
    /// Index was outside the chain; nothing changed
    OutOfRange,
}

/// The segmented creature: an ordered run of segments, front-to-back
/// = lead-to-tail. Invariant: when non-empty, exactly segment 0 is the lead.
#[derive(Debug, Clone)]
pub struct Chain {
    segments: Vec<Segment>,
}

impl Chain {
    /// Spawn a fresh chain of `body_len` followers behind a lead, laid out
    /// in a horizontal line ending at `(start_x, start_y)`.
    pub fn spawn(start_x: f32, start_y: f32, body_len: usize) -> Self {
        let mut segments = Vec::with_capacity(body_len + 1);
        segments.push(Segment::new(
            SegmentRole::Lead,
            Vec2::new(start_x - SEGMENT_SIZE * (body_len + 1) as f32, start_y),
        ));
        for i in (1..=body_len).rev() {
            segments.push(Segment::new(
                SegmentRole::Follower,
                Vec2::new(start_x - SEGMENT_SIZE * i as f32, start_y),
            ));
        }
        Self { segments }
    }

    /// Re-root a run of segments salvaged from a split
    fn from_segments(mut segments: Vec<Segment>) -> Self {
        if let Some(first) = segments.first_mut() {
            first.promote_to_lead();
        }
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Advance the whole chain by one timestep
    ///
    /// Followers are updated strictly tail-to-lead, each reading its
    /// neighbor's position as stored before that neighbor's own update this
    /// frame. The ordering is what keeps the chain from collapsing onto a
    /// single point: every follower chases last frame's neighbor position.
    /// The lead moves last, then gets at most one obstacle interaction,
    /// against the first obstacle it overlaps in input order.
    pub fn update(&mut self, dt: f32, obstacles: &[Obstacle]) {
        for i in (1..self.segments.len()).rev() {
            let target = self.segments[i - 1].pos;
            self.segments[i].follow_target(target, dt);
        }

        let Some(lead) = self.segments.first_mut() else {
            return;
        };
        lead.advance(dt);

        for obstacle in obstacles {
            if lead.rect().intersects(&obstacle.rect()) {
                lead.on_obstacle_contact(obstacle.rect().center());
                break;
            }
        }
    }

    /// Resolve a projectile hit on the segment at `index`
    ///
    /// Lead or tail hits trim one segment (promoting a new lead when the
    /// old one is consumed); interior hits split the chain in two. An index
    /// outside the chain is reported and leaves it untouched.
    pub fn handle_hit(&mut self, index: usize) -> HitOutcome {
        if index >= self.len() {
            return HitOutcome::OutOfRange;
        }

        if index == 0 {
            self.segments.remove(0);
            if let Some(first) = self.segments.first_mut() {
                first.promote_to_lead();
            }
            HitOutcome::Trimmed
        } else if index == self.len() - 1 {
            self.segments.pop();
            HitOutcome::Trimmed
        } else {
            HitOutcome::Split(self.split(index))
        }
    }

    /// Split the chain at an interior index
    ///
    /// Segments `[0, index)` stay; the segment at `index` is consumed by the
    /// hit; segments `(index, len)` move into the returned chain in order,
    /// with their first segment promoted to lead.
    ///
    /// Strictly interior indices only; boundary hits are handled by
    /// [`Chain::handle_hit`] directly and never reach here.
    pub fn split(&mut self, index: usize) -> Chain {
        debug_assert!(index > 0 && index < self.len() - 1);

        let tail = self.segments.split_off(index + 1);
        self.segments.truncate(index);
        Chain::from_segments(tail)
    }
}
