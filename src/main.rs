//! Myriapod demo entry point
//!
//! Runs the simulation headless with a scripted pilot and prints the final
//! frame as JSON. Real frontends poll input devices and draw every frame;
//! this binary exercises the same contract with canned intents.

use myriapod::consts::*;
use myriapod::sim::{GamePhase, GameState, TickInput, build_frame, tick};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(30.0);

    let mut state = GameState::new(seed);
    let mut input = TickInput {
        start: true,
        ..Default::default()
    };

    let total_ticks = (seconds / SIM_DT) as u64;
    for frame in 0..total_ticks {
        scripted_pilot(frame, &mut input);
        tick(&mut state, &input, SIM_DT);

        // Clear one-shot inputs after processing.
        input.start = false;
        input.fire = false;

        if matches!(state.phase, GamePhase::Won | GamePhase::Lost) {
            break;
        }
    }

    log::info!(
        "finished in phase {:?} with score {} and {} lives",
        state.phase,
        state.score,
        state.lives
    );

    let frame = build_frame(&state);
    match serde_json::to_string_pretty(&frame) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("snapshot serialization failed: {e}"),
    }
}

/// A crude pilot: sweep across the bottom band, firing a few shots a second
fn scripted_pilot(frame: u64, input: &mut TickInput) {
    let sweeping_right = (frame / 240) % 2 == 0;
    input.move_right = sweeping_right;
    input.move_left = !sweeping_right;
    input.fire = frame % 30 == 0;
}
