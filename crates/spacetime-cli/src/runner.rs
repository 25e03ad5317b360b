//! Headless tick loop

use tracing::info;

use spacetime::scheduler::run_frames;
use spacetime::state::SimulationState;

fn log_progress(state: &SimulationState, tick: u32) {
    let analytics = state.analytics();
    info!(
        tick,
        time = analytics.simulation_time,
        bodies = analytics.body_count,
        energy = analytics.energy.total,
        angular_momentum = analytics.angular_momentum,
        "progress"
    );
}

/// Run `frames` ticks in chunks of `report_every`, logging after each chunk
///
/// A zero `report_every` runs everything in one chunk without progress
/// lines. Returns the number of merges.
pub fn run(state: &mut SimulationState, frames: u32, report_every: u32) -> usize {
    let chunk = if report_every > 0 { report_every } else { frames };
    let mut merges = 0;
    let mut done = 0;
    while done < frames {
        let ticks = chunk.min(frames - done);
        merges += run_frames(state, ticks).merges;
        done += ticks;

        if report_every > 0 {
            log_progress(state, done);
        }
    }
    merges
}
