//! Fixed timestep accumulator
//!
//! Converts irregular frame deltas into whole simulation steps, carrying the
//! remainder between calls so no time is lost or counted twice.

use crate::consts::DEFAULT_TICK_RATE_HZ;

/// Fixed-rate step clock driven by frame deltas in milliseconds
#[derive(Debug, Clone, PartialEq)]
pub struct FixedStepClock {
    /// Duration of one step (ms)
    step_ms: f64,
    /// Time carried into the next call, always in `[0, step_ms)`
    leftover_ms: f64,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE_HZ)
    }
}

impl FixedStepClock {
    /// Create a clock firing `hz` steps per simulated second
    pub fn new(hz: f64) -> Self {
        let hz = if hz.is_finite() && hz > 0.0 {
            hz
        } else {
            log::warn!("Invalid tick rate {hz} Hz, using {DEFAULT_TICK_RATE_HZ} Hz");
            DEFAULT_TICK_RATE_HZ
        };
        Self {
            step_ms: 1000.0 / hz,
            leftover_ms: 0.0,
        }
    }

    /// Feed one frame delta and run `on_step` once per whole step that fits.
    ///
    /// Returns the number of steps fired. There is no cap here: a huge delta
    /// fires every step it covers, so callers clamp before calling. Zero,
    /// negative and non-finite deltas fire nothing.
    pub fn advance<F: FnMut()>(&mut self, delta_ms: f64, mut on_step: F) -> u32 {
        if !(delta_ms.is_finite() && delta_ms > 0.0) {
            return 0;
        }
        self.leftover_ms += delta_ms;

        let mut steps = 0;
        while self.leftover_ms >= self.step_ms {
            self.leftover_ms -= self.step_ms;
            steps += 1;
            on_step();
        }
        steps
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    pub fn leftover_ms(&self) -> f64 {
        self.leftover_ms
    }

    /// Fraction of the next step already elapsed, for render interpolation
    pub fn alpha(&self) -> f64 {
        self.leftover_ms / self.step_ms
    }

    /// Drop carried time (e.g. after a pause)
    pub fn reset(&mut self) {
        self.leftover_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_step_duration_from_frequency() {
        assert_eq!(FixedStepClock::new(10.0).step_ms(), 100.0);
        assert_eq!(FixedStepClock::new(50.0).step_ms(), 20.0);
        assert!((FixedStepClock::default().step_ms() - 1000.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_frequency_falls_back() {
        for hz in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            assert_eq!(FixedStepClock::new(hz), FixedStepClock::default());
        }
    }

    #[test]
    fn test_partial_steps_carry_over() {
        let mut clock = FixedStepClock::new(10.0);
        let mut ticks = 0;
        assert_eq!(clock.advance(50.0, || ticks += 1), 0);
        assert_eq!(clock.advance(60.0, || ticks += 1), 1);
        assert_eq!(ticks, 1);
        assert!((clock.leftover_ms() - 10.0).abs() < 1e-9);
        assert!((clock.alpha() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_zero_delta_fires_nothing() {
        let mut clock = FixedStepClock::new(10.0);
        let mut ticks = 0;
        assert_eq!(clock.advance(0.0, || ticks += 1), 0);
        assert_eq!(ticks, 0);
        assert_eq!(clock.leftover_ms(), 0.0);
    }

    #[test]
    fn test_bad_deltas_leave_leftover_untouched() {
        let mut clock = FixedStepClock::new(10.0);
        clock.advance(30.0, || {});
        for delta in [-50.0, f64::NAN, f64::INFINITY] {
            assert_eq!(clock.advance(delta, || panic!("no step expected")), 0);
            assert_eq!(clock.leftover_ms(), 30.0);
        }
    }

    #[test]
    fn test_large_delta_is_not_capped() {
        let mut clock = FixedStepClock::new(10.0);
        let mut ticks = 0;
        assert_eq!(clock.advance(10_050.0, || ticks += 1), 100);
        assert_eq!(ticks, 100);
        assert_eq!(clock.leftover_ms(), 50.0);
    }

    #[test]
    fn test_exact_step_leaves_no_remainder() {
        let mut clock = FixedStepClock::new(20.0);
        assert_eq!(clock.advance(50.0, || {}), 1);
        assert_eq!(clock.leftover_ms(), 0.0);
    }

    #[test]
    fn test_reset_drops_carried_time() {
        let mut clock = FixedStepClock::new(10.0);
        clock.advance(90.0, || {});
        clock.reset();
        assert_eq!(clock.advance(20.0, || {}), 0);
        assert_eq!(clock.leftover_ms(), 20.0);
    }

    proptest! {
        #[test]
        fn prop_time_is_conserved(
            hz in prop::sample::select(vec![1.0, 10.0, 20.0, 25.0, 40.0, 50.0, 100.0, 125.0, 250.0, 500.0]),
            deltas in prop::collection::vec(0u16..2000, 0..64),
        ) {
            let mut clock = FixedStepClock::new(hz);
            let step = clock.step_ms();
            let mut total = 0.0;
            let mut fired = 0u64;
            for delta in deltas {
                total += f64::from(delta);
                fired += u64::from(clock.advance(f64::from(delta), || {}));
                prop_assert!(clock.leftover_ms() >= 0.0);
                prop_assert!(clock.leftover_ms() < step);
            }
            let consumed = fired as f64 * step;
            prop_assert!(consumed <= total);
            prop_assert!(total < consumed + step);
        }

        #[test]
        fn prop_leftover_bounded_for_any_rate(
            hz in 1.0f64..240.0,
            deltas in prop::collection::vec(0.0f64..500.0, 0..64),
        ) {
            let mut clock = FixedStepClock::new(hz);
            let mut callbacks = 0u32;
            let mut returned = 0u32;
            for delta in deltas {
                returned += clock.advance(delta, || callbacks += 1);
                prop_assert!(clock.leftover_ms() >= 0.0);
                prop_assert!(clock.leftover_ms() < clock.step_ms());
            }
            prop_assert_eq!(callbacks, returned);
        }
    }
}
