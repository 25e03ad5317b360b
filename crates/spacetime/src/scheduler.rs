//! Fixed-tick driver for the simulation
//!
//! The host reports how much wall-clock time each rendered frame took; the
//! scheduler turns that into whole simulation ticks. When the host falls
//! behind, ticks beyond `max_ticks_per_frame` are dropped instead of
//! piling up.

use tracing::warn;

use crate::settings::SimulationParameters;
use crate::state::SimulationState;

/// Work done for one rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub ticks_run: u32,
    pub ticks_dropped: u32,
    /// Bodies absorbed by collisions during the frame
    pub merges: usize,
}

#[derive(Debug, Clone)]
pub struct FixedTickScheduler {
    /// Wall-clock seconds per tick
    pub tick_interval: f64,
    /// Catch-up limit for a single frame
    pub max_ticks_per_frame: u32,
    accumulator: f64,
}

impl FixedTickScheduler {
    pub fn new(tick_interval: f64, max_ticks_per_frame: u32) -> Self {
        Self {
            tick_interval,
            max_ticks_per_frame,
            accumulator: 0.0,
        }
    }

    /// One tick per `time_step` of wall-clock time, catching up at most 4
    pub fn for_parameters(params: &SimulationParameters) -> Self {
        Self::new(params.time_step, 4)
    }

    /// Wall-clock time carried over to the next frame
    pub fn pending(&self) -> f64 {
        self.accumulator
    }

    /// Run the ticks due after `elapsed` seconds of wall-clock time
    ///
    /// Nothing runs while the simulation is paused, and paused time is not
    /// banked. A non-positive `tick_interval` runs exactly one tick per
    /// frame.
    ///
    /// # Examples
    ///
    /// ```
    /// use spacetime::body::BodyTemplate;
    /// use spacetime::scheduler::FixedTickScheduler;
    /// use spacetime::state::SimulationState;
    ///
    /// let mut state = SimulationState::default();
    /// state.add_body(BodyTemplate::new("Probe", 1.0, 0.1, [0.0, 0.0, 0.0]));
    /// state.set_running(true);
    ///
    /// let mut scheduler = FixedTickScheduler::new(0.01, 3);
    /// let report = scheduler.frame(&mut state, 0.055);
    ///
    /// assert_eq!(report.ticks_run, 3);
    /// assert_eq!(report.ticks_dropped, 2);
    /// ```
    pub fn frame(&mut self, state: &mut SimulationState, elapsed: f64) -> FrameReport {
        if !state.is_running() {
            self.accumulator = 0.0;
            return FrameReport::default();
        }

        let due = if self.tick_interval > 0.0 {
            self.accumulator += elapsed.max(0.0);
            let due = (self.accumulator / self.tick_interval).floor();
            self.accumulator -= due * self.tick_interval;
            due as u32
        } else {
            1
        };

        let allowed = due.min(self.max_ticks_per_frame);
        let mut report = FrameReport {
            ticks_dropped: due - allowed,
            ..Default::default()
        };

        for _ in 0..allowed {
            let Some(tick) = state.tick() else {
                break;
            };
            report.ticks_run += 1;
            report.merges += tick.merges();
        }

        if report.ticks_dropped > 0 {
            warn!(
                dropped = report.ticks_dropped,
                ran = report.ticks_run,
                "simulation falling behind, dropping ticks"
            );
        }

        report
    }
}

/// Run exactly `n` ticks, ignoring the running flag
///
/// For headless use where there is no wall clock to follow.
pub fn run_frames(state: &mut SimulationState, n: u32) -> FrameReport {
    let mut report = FrameReport::default();
    for _ in 0..n {
        let tick = state.advance();
        report.ticks_run += 1;
        report.merges += tick.merges();
    }
    report
}
