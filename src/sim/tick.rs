//! Fixed timestep simulation tick
//!
//! One call to [`tick`] advances the whole world by `dt`: entity physics
//! first, then collision resolution in a fixed order, then pruning. The
//! resolution order is part of the contract — it decides which entity wins
//! a simultaneous multi-way hit, so reordering steps is an observable
//! behavior change, not a refactor.

use glam::Vec2;

use super::chain::HitOutcome;
use super::state::{GamePhase, GameState, Projectile};
use crate::consts::*;

/// Input intents for a single tick
///
/// `fire` and `start` are one-shot: the caller clears them after the tick
/// they were delivered in. The movement intents are held levels.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    /// Fire one projectile from the craft's nose
    pub fire: bool,
    /// Start (or restart) a run
    pub start: bool,
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Start input is honored in every phase and always performs a full
    // run reset.
    if input.start {
        state.start_run();
    }

    if state.phase != GamePhase::Running {
        return;
    }

    // Apply intents before the frame's physics.
    state.player.moving_left = input.move_left;
    state.player.moving_right = input.move_right;
    state.player.moving_up = input.move_up;
    state.player.moving_down = input.move_down;
    if input.fire {
        let craft = state.player.rect();
        state.projectiles.push(Projectile::new(Vec2::new(
            craft.center().x - PROJECTILE_WIDTH / 2.0,
            craft.top() - PROJECTILE_LENGTH,
        )));
    }

    // 1. Player moves, bounded by the field and blocked by obstacles.
    state.player.update(dt, &state.obstacles);

    // 2. Every chain propagates tail-to-lead and advances its lead.
    for chain in &mut state.chains {
        chain.update(dt, &state.obstacles);
    }

    // 3. The roamer wanders, or respawns if it was destroyed last frame.
    if state.roamer.alive {
        state.roamer.update(dt, &mut state.rng);
    } else {
        state.roamer.reset();
    }

    // 4. Projectiles fly.
    for projectile in &mut state.projectiles {
        projectile.advance(dt);
    }

    // 5. The roamer tramples any obstacle it overlaps.
    if state.roamer.alive {
        let roamer_rect = state.roamer.rect();
        state.obstacles.retain(|o| !roamer_rect.intersects(&o.rect()));
    }

    // 6. First projectile to touch the roamer destroys it; the rest keep
    //    flying and are re-tested next frame.
    if state.roamer.alive {
        let roamer_rect = state.roamer.rect();
        if let Some(i) = state
            .projectiles
            .iter()
            .position(|p| p.rect().intersects(&roamer_rect))
        {
            state.roamer.alive = false;
            state.score += SCORE_ROAMER_BONUS;
            state.projectiles.remove(i);
            log::debug!("roamer destroyed, bonus {}", SCORE_ROAMER_BONUS);
        }
    }

    // 7. Each projectile against obstacles in order; first match absorbs it.
    let mut pi = 0;
    while pi < state.projectiles.len() {
        let rect = state.projectiles[pi].rect();
        let mut consumed = false;
        for oi in 0..state.obstacles.len() {
            if rect.intersects(&state.obstacles[oi].rect()) {
                state.score += SCORE_OBSTACLE_HIT;
                state.obstacles[oi].take_hit();
                if !state.obstacles[oi].alive() {
                    state.obstacles.remove(oi);
                }
                consumed = true;
                break;
            }
        }
        if consumed {
            state.projectiles.remove(pi);
        } else {
            pi += 1;
        }
    }

    // 8. Remaining projectiles against chain segments, chains in order,
    //    segments lead-to-tail. A hit consumes the projectile, may split
    //    the chain, and drops the chain once it is empty.
    let mut pi = 0;
    'projectiles: while pi < state.projectiles.len() {
        let rect = state.projectiles[pi].rect();
        for ci in 0..state.chains.len() {
            let hit_index = state.chains[ci]
                .segments()
                .iter()
                .position(|s| rect.intersects(&s.rect()));
            let Some(index) = hit_index else {
                continue;
            };

            state.score += SCORE_SEGMENT_HIT;
            match state.chains[ci].handle_hit(index) {
                HitOutcome::Split(new_chain) => {
                    log::debug!(
                        "chain {} split at {} into {} + {}",
                        ci,
                        index,
                        state.chains[ci].len(),
                        new_chain.len()
                    );
                    state.chains.push(new_chain);
                }
                HitOutcome::Trimmed => {}
                HitOutcome::OutOfRange => {}
            }
            if state.chains[ci].is_empty() {
                state.chains.remove(ci);
            }
            state.projectiles.remove(pi);
            continue 'projectiles;
        }
        pi += 1;
    }

    // 9. The roamer rams the craft.
    if state.roamer.alive && state.roamer.rect().intersects(&state.player.rect()) {
        state.player.reset();
        state.lives -= 1;
        log::debug!("craft rammed by roamer, lives {}", state.lives);
    }

    // 10. Any chain segment touching the craft costs a life. Simultaneous
    //     hits each cost one; that is accepted, not deduplicated.
    for chain in &state.chains {
        for segment in chain.segments() {
            if segment.rect().intersects(&state.player.rect()) {
                state.player.reset();
                state.lives -= 1;
            }
        }
    }

    // 11. Drop projectiles that have left the play area.
    state.projectiles.retain(|p| !p.is_gone());

    // 12. Terminal transitions.
    if state.chains.is_empty() {
        state.phase = GamePhase::Won;
        log::info!("all chains destroyed, run won with score {}", state.score);
    } else if state.lives < 0 {
        state.phase = GamePhase::Lost;
        log::info!("out of lives, run lost with score {}", state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::chain::Chain;
    use crate::sim::state::Obstacle;

    /// A running state with the random obstacle field cleared so tests can
    /// place entities deterministically. Collision-only tests tick with
    /// dt = 0 to freeze all motion.
    fn running_state() -> GameState {
        let mut state = GameState::new(42);
        state.start_run();
        state.obstacles.clear();
        state
    }

    /// Top-left of segment `index` in the freshly spawned chain.
    fn segment_pos(state: &GameState, index: usize) -> Vec2 {
        state.chains[0].segments()[index].pos
    }

    #[test]
    fn test_start_input_resets_run() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        tick(&mut state, &TickInput { start: true, ..Default::default() }, 0.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.chains.len(), 1);
        assert_eq!(state.chains[0].len(), CHAIN_BODY_LEN + 1);
        assert!(!state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_terminal_phase_holds_until_start() {
        let mut state = running_state();
        state.phase = GamePhase::Won;
        tick(&mut state, &TickInput::default(), 1.0 / 120.0);
        assert_eq!(state.phase, GamePhase::Won);
        tick(&mut state, &TickInput { start: true, ..Default::default() }, 0.0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_fire_spawns_projectile_at_nose() {
        let mut state = running_state();
        tick(&mut state, &TickInput { fire: true, ..Default::default() }, 0.0);
        assert_eq!(state.projectiles.len(), 1);
        let p = &state.projectiles[0];
        let craft = state.player.rect();
        assert!((p.rect().center().x - craft.center().x).abs() < 1e-3);
        assert_eq!(p.rect().bottom(), craft.top());
    }

    #[test]
    fn test_projectile_wears_down_obstacle() {
        let mut state = running_state();
        state.chains[0] = Chain::spawn(400.0, 95.0, 2); // keep the chain out of the way
        state.obstacles.push(Obstacle::new(Vec2::new(900.0, 600.0)));
        state.projectiles.push(Projectile::new(Vec2::new(910.0, 590.0)));

        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.score, SCORE_OBSTACLE_HIT);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].hits_left, 1);
        assert!(state.projectiles.is_empty());

        state.projectiles.push(Projectile::new(Vec2::new(910.0, 590.0)));
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.score, 2 * SCORE_OBSTACLE_HIT);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_obstacle_shields_chain_from_projectile() {
        // A projectile overlapping both an obstacle and a segment resolves
        // against the obstacle: step order, not proximity, decides.
        let mut state = running_state();
        let seg = segment_pos(&state, 5);
        state.obstacles.push(Obstacle::new(seg + Vec2::new(0.0, 25.0)));
        state.projectiles.push(Projectile::new(seg + Vec2::new(10.0, 5.0)));

        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.score, SCORE_OBSTACLE_HIT);
        assert_eq!(state.chains[0].len(), CHAIN_BODY_LEN + 1);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_interior_hit_splits_chain_in_world() {
        let mut state = running_state();
        state.chains = vec![Chain::spawn(1920.0, 500.0, 10)]; // length 11
        let seg = segment_pos(&state, 5);
        state.projectiles.push(Projectile::new(seg + Vec2::new(10.0, 5.0)));

        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.score, SCORE_SEGMENT_HIT);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.chains.len(), 2);
        assert_eq!(state.chains[0].len(), 5);
        assert_eq!(state.chains[1].len(), 5);
    }

    #[test]
    fn test_last_segment_destroyed_wins_run() {
        let mut state = running_state();
        state.chains = vec![Chain::spawn(400.0, 500.0, 0)];
        let seg = segment_pos(&state, 0);
        state.projectiles.push(Projectile::new(seg + Vec2::new(10.0, 5.0)));

        tick(&mut state, &TickInput::default(), 0.0);
        assert!(state.chains.is_empty());
        assert_eq!(state.phase, GamePhase::Won);
    }

    #[test]
    fn test_roamer_tramples_obstacles() {
        let mut state = running_state();
        state.obstacles.push(Obstacle::new(state.roamer.pos));
        state.obstacles.push(Obstacle::new(Vec2::new(900.0, 600.0)));

        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos, Vec2::new(900.0, 600.0));
    }

    #[test]
    fn test_only_first_projectile_hits_roamer() {
        let mut state = running_state();
        let r = state.roamer.pos;
        state.projectiles.push(Projectile::new(r + Vec2::new(5.0, 5.0)));
        state.projectiles.push(Projectile::new(r + Vec2::new(15.0, 5.0)));

        tick(&mut state, &TickInput::default(), 0.0);
        assert!(!state.roamer.alive);
        assert_eq!(state.score, SCORE_ROAMER_BONUS);
        // Second projectile survives to be re-tested next frame.
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_roamer_respawns_after_destruction() {
        let mut state = running_state();
        state.roamer.alive = false;
        state.roamer.pos = Vec2::new(500.0, 500.0);
        tick(&mut state, &TickInput::default(), 0.0);
        assert!(state.roamer.alive);
        assert_eq!(state.roamer.pos, Vec2::new(ROAMER_START_X, ROAMER_START_Y));
    }

    #[test]
    fn test_roamer_ramming_costs_life_and_can_lose_run() {
        let mut state = running_state();
        state.lives = 0;
        state.roamer.pos = state.player.pos;

        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.lives, -1);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert_eq!(state.phase, GamePhase::Lost);
    }

    #[test]
    fn test_segment_contact_costs_life() {
        let mut state = running_state();
        state.player.pos = segment_pos(&state, 3);
        // Freeze the roamer far away from the action.
        state.roamer.pos = Vec2::new(0.0, 800.0);

        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
    }

    #[test]
    fn test_projectiles_pruned_off_field() {
        let mut state = running_state();
        state.projectiles.push(Projectile::new(Vec2::new(500.0, -150.0)));
        state.projectiles.push(Projectile::new(Vec2::new(500.0, 500.0)));

        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, Vec2::new(500.0, 500.0));
    }
}
