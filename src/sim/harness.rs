//! Fixed-step loop driver
//!
//! Bundles a [`FixedStepClock`], a [`RandomSource`] and a tick counter. With a
//! seeded source and a scripted delta sequence, every tick is reproducible.

use crate::consts::DEFAULT_MAX_FRAME_MS;
use crate::rng::{RandomSource, random_int};
use crate::settings::Settings;
use crate::time::FixedStepClock;

/// Per-step view handed to gameplay code
pub struct StepContext<'a, R: ?Sized> {
    /// 1-based index of this step since the simulation started
    pub tick: u64,
    /// Fixed step duration (ms)
    pub step_ms: f64,
    pub rng: &'a mut R,
}

impl<R: RandomSource + ?Sized> StepContext<'_, R> {
    /// Integer in `[0, max_exclusive)` from the simulation's source
    pub fn random_int(&mut self, max_exclusive: u32) -> u32 {
        random_int(&mut *self.rng, max_exclusive)
    }

    /// Step duration in seconds, for velocity integration
    pub fn dt(&self) -> f32 {
        (self.step_ms / 1000.0) as f32
    }
}

#[derive(Debug, Clone)]
pub struct Simulation<R> {
    clock: FixedStepClock,
    rng: R,
    tick: u64,
    /// Frame deltas above this are clamped (spiral-of-death guard)
    max_frame_ms: f64,
}

impl<R: RandomSource> Simulation<R> {
    pub fn new(tick_rate_hz: f64, rng: R) -> Self {
        Self {
            clock: FixedStepClock::new(tick_rate_hz),
            rng,
            tick: 0,
            max_frame_ms: DEFAULT_MAX_FRAME_MS,
        }
    }

    pub fn from_settings(settings: &Settings, rng: R) -> Self {
        Self::new(settings.tick_rate_hz, rng).with_max_frame_ms(settings.max_frame_ms)
    }

    /// Override the frame clamp; non-positive or non-finite values disable it
    pub fn with_max_frame_ms(mut self, max_frame_ms: f64) -> Self {
        self.max_frame_ms = if max_frame_ms.is_finite() && max_frame_ms > 0.0 {
            max_frame_ms
        } else {
            f64::INFINITY
        };
        self
    }

    /// Advance by one rendered frame, running `step` once per fixed step.
    /// Returns the number of steps run.
    pub fn frame<F>(&mut self, delta_ms: f64, mut step: F) -> u32
    where
        F: FnMut(&mut StepContext<'_, R>),
    {
        let delta_ms = if delta_ms > self.max_frame_ms {
            log::debug!("Clamping frame delta {delta_ms:.1} ms to {:.1} ms", self.max_frame_ms);
            self.max_frame_ms
        } else {
            delta_ms
        };

        let step_ms = self.clock.step_ms();
        let Self { clock, rng, tick, .. } = self;
        clock.advance(delta_ms, || {
            *tick += 1;
            let mut ctx = StepContext {
                tick: *tick,
                step_ms,
                rng: &mut *rng,
            };
            step(&mut ctx);
        })
    }

    /// Steps run so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn clock(&self) -> &FixedStepClock {
        &self.clock
    }

    /// Render interpolation factor between the last and next step
    pub fn alpha(&self) -> f64 {
        self.clock.alpha()
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Drop carried time, e.g. when resuming from a pause
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }
}
