//! Simulation clock.
//!
//! Decouples the frame rate from the number of integration steps per frame
//! and tracks how much simulated time passes per wall-clock second.

use std::collections::VecDeque;

use bevy::log::info;

use crate::types::{SECONDS_PER_DAY, SECONDS_PER_YEAR};

/// Fewest integration steps per frame.
pub const MIN_STEPS_PER_FRAME: u32 = 1;

/// Most integration steps per frame.
pub const MAX_STEPS_PER_FRAME: u32 = 120;

/// Steps per frame at startup.
pub const DEFAULT_STEPS_PER_FRAME: u32 = 30;

/// Number of samples in the rolling speedup average.
pub const SPEEDUP_SAMPLES: usize = 25;

#[derive(Clone, Debug)]
pub struct SimulationClock {
    /// Simulated seconds since the start of the run.
    elapsed_simulation_time: f64,
    /// Simulated seconds per integration step.
    base_time_step: f64,
    steps_per_frame: u32,
    paused: bool,
    /// Wall-clock timestamp of the previous update, in seconds.
    last_wall_time: Option<f64>,
    /// Simulated seconds per wall-clock second, newest last.
    speedup_samples: VecDeque<f64>,
}

impl SimulationClock {
    pub fn new(base_time_step: f64) -> Self {
        Self {
            elapsed_simulation_time: 0.0,
            base_time_step,
            steps_per_frame: DEFAULT_STEPS_PER_FRAME,
            paused: false,
            last_wall_time: None,
            speedup_samples: VecDeque::with_capacity(SPEEDUP_SAMPLES),
        }
    }

    pub fn base_time_step(&self) -> f64 {
        self.base_time_step
    }

    pub fn steps_per_frame(&self) -> u32 {
        self.steps_per_frame
    }

    /// Steps to run this frame; zero while paused.
    pub fn steps_this_frame(&self) -> u32 {
        if self.paused { 0 } else { self.steps_per_frame }
    }

    pub fn elapsed_simulation_time(&self) -> f64 {
        self.elapsed_simulation_time
    }

    pub fn elapsed_years(&self) -> f64 {
        self.elapsed_simulation_time / SECONDS_PER_YEAR
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!("Simulation {}", if self.paused { "paused" } else { "running" });
    }

    /// Double the steps per frame, up to [`MAX_STEPS_PER_FRAME`].
    pub fn faster(&mut self) {
        self.steps_per_frame = (self.steps_per_frame * 2).min(MAX_STEPS_PER_FRAME);
        info!("Steps per frame: {}", self.steps_per_frame);
    }

    /// Halve the steps per frame, down to [`MIN_STEPS_PER_FRAME`].
    pub fn slower(&mut self) {
        self.steps_per_frame = (self.steps_per_frame / 2).max(MIN_STEPS_PER_FRAME);
        info!("Steps per frame: {}", self.steps_per_frame);
    }

    /// Account for one frame's steps at wall-clock time `wall_time` (seconds).
    ///
    /// A zero wall-clock delta is discarded instead of producing an infinite
    /// sample.
    pub fn update(&mut self, wall_time: f64) {
        let simulated = f64::from(self.steps_this_frame()) * self.base_time_step;
        self.elapsed_simulation_time += simulated;

        if let Some(last) = self.last_wall_time {
            let wall_delta = wall_time - last;
            if wall_delta > 0.0 {
                if self.speedup_samples.len() == SPEEDUP_SAMPLES {
                    self.speedup_samples.pop_front();
                }
                self.speedup_samples.push_back(simulated / wall_delta);
            }
        }
        self.last_wall_time = Some(wall_time);
    }

    /// Rolling average of simulated seconds per wall-clock second.
    pub fn speedup_factor(&self) -> f64 {
        if self.speedup_samples.is_empty() {
            return 0.0;
        }
        self.speedup_samples.iter().sum::<f64>() / self.speedup_samples.len() as f64
    }

    /// Simulated days per wall-clock second.
    pub fn days_per_second(&self) -> f64 {
        self.speedup_factor() / SECONDS_PER_DAY
    }
}
