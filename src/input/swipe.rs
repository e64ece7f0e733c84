//! Swipe/tap classification
//!
//! Two states: idle, or tracking one pointer from its down event. A matching
//! up event either produces a [`GestureSample`] or is discarded as a tap or
//! sub-threshold drag. Completed swipes land in a small FIFO for polling
//! consumers and are also pushed to an optional listener.

use std::collections::VecDeque;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Direction;
use crate::consts::{DEFAULT_MAX_TAP_TIME_MS, DEFAULT_MIN_SWIPE_DISTANCE, SWIPE_QUEUE_CAPACITY};

/// Opaque pointer identity from the host input system
pub type PointerId = i32;

/// Classifier tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeOptions {
    /// Minimum travel on either axis (px, before DPR scaling)
    pub min_distance: f32,
    /// Sub-threshold releases within this window are taps (ms)
    pub max_tap_time_ms: f64,
    /// Multiply `min_distance` by the device pixel ratio
    pub scale_with_dpr: bool,
}

impl Default for SwipeOptions {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_SWIPE_DISTANCE,
            max_tap_time_ms: DEFAULT_MAX_TAP_TIME_MS,
            scale_with_dpr: true,
        }
    }
}

impl SwipeOptions {
    /// Effective distance threshold for a display with the given pixel ratio.
    /// A zero, negative or non-finite `min_distance` falls back to the default.
    pub fn threshold(&self, device_pixel_ratio: f32) -> f32 {
        let min_distance = if self.min_distance.is_finite() && self.min_distance > 0.0 {
            self.min_distance
        } else {
            log::warn!(
                "Invalid swipe distance {}, using {DEFAULT_MIN_SWIPE_DISTANCE}",
                self.min_distance
            );
            DEFAULT_MIN_SWIPE_DISTANCE
        };
        if !self.scale_with_dpr {
            return min_distance;
        }
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        (min_distance * dpr).round()
    }
}

/// One classified swipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    /// Horizontal delta (+ right)
    pub dx: f32,
    /// Vertical delta (+ down)
    pub dy: f32,
    pub abs_x: f32,
    pub abs_y: f32,
    /// Time between down and up (ms)
    pub duration_ms: f64,
    /// Dominant-axis direction
    pub dir: Direction,
}

/// In-progress gesture
#[derive(Debug, Clone, Copy, PartialEq)]
struct GestureStart {
    pos: Vec2,
    t_ms: f64,
    pointer: PointerId,
}

type Listener = Box<dyn FnMut(Direction)>;

/// Pointer down/up pairs in, swipe samples out
pub struct GestureClassifier {
    threshold: f32,
    max_tap_time_ms: f64,
    start: Option<GestureStart>,
    queue: VecDeque<GestureSample>,
    listener: Option<Listener>,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(SwipeOptions::default(), 1.0)
    }
}

impl fmt::Debug for GestureClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureClassifier")
            .field("threshold", &self.threshold)
            .field("max_tap_time_ms", &self.max_tap_time_ms)
            .field("start", &self.start)
            .field("queue", &self.queue)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl GestureClassifier {
    pub fn new(options: SwipeOptions, device_pixel_ratio: f32) -> Self {
        Self {
            threshold: options.threshold(device_pixel_ratio),
            max_tap_time_ms: options.max_tap_time_ms,
            start: None,
            queue: VecDeque::with_capacity(SWIPE_QUEUE_CAPACITY + 1),
            listener: None,
        }
    }

    /// Builder form of [`set_listener`](Self::set_listener)
    pub fn with_listener(mut self, listener: impl FnMut(Direction) + 'static) -> Self {
        self.set_listener(listener);
        self
    }

    /// Called synchronously with the direction of every accepted swipe
    pub fn set_listener(&mut self, listener: impl FnMut(Direction) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Start tracking. A second down replaces the first, whatever its pointer.
    pub fn on_down(&mut self, pos: Vec2, t_ms: f64, pointer: PointerId) {
        self.start = Some(GestureStart { pos, t_ms, pointer });
    }

    /// Finish the tracked gesture.
    ///
    /// Ups from another pointer (or with nothing tracked) are ignored and
    /// leave tracking intact. Returns the queued sample, if any.
    pub fn on_up(&mut self, pos: Vec2, t_ms: f64, pointer: PointerId) -> Option<GestureSample> {
        let start = match self.start {
            Some(start) if start.pointer == pointer => start,
            _ => return None,
        };
        self.start = None;

        let delta = pos - start.pos;
        let duration_ms = t_ms - start.t_ms;
        let abs_x = delta.x.abs();
        let abs_y = delta.y.abs();

        let qualifies = abs_x >= self.threshold || abs_y >= self.threshold;
        let short_tap =
            duration_ms <= self.max_tap_time_ms && abs_x < self.threshold && abs_y < self.threshold;
        if !qualifies || short_tap {
            return None;
        }

        // Ties go vertical
        let dir = if abs_x > abs_y {
            if delta.x > 0.0 { Direction::Right } else { Direction::Left }
        } else if delta.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };

        let sample = GestureSample {
            dx: delta.x,
            dy: delta.y,
            abs_x,
            abs_y,
            duration_ms,
            dir,
        };
        self.queue.push_back(sample);
        if self.queue.len() > SWIPE_QUEUE_CAPACITY {
            self.queue.pop_front();
        }
        log::debug!("Swipe {:?} ({:.0}, {:.0}) in {:.0} ms", dir, delta.x, delta.y, duration_ms);

        if let Some(listener) = self.listener.as_mut() {
            listener(dir);
        }
        Some(sample)
    }

    /// Remove and return the oldest queued swipe
    pub fn consume(&mut self) -> Option<GestureSample> {
        self.queue.pop_front()
    }

    /// Oldest queued swipe, left in place
    pub fn peek(&self) -> Option<&GestureSample> {
        self.queue.front()
    }

    /// Drop queued swipes; an in-progress gesture keeps tracking
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Back to idle with an empty queue and no listener. Safe to repeat.
    pub fn detach(&mut self) {
        self.start = None;
        self.queue.clear();
        self.listener = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Effective distance threshold (px)
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn swipe(c: &mut GestureClassifier, from: (f32, f32), to: (f32, f32), ms: f64) -> Option<GestureSample> {
        c.on_down(Vec2::new(from.0, from.1), 0.0, 1);
        c.on_up(Vec2::new(to.0, to.1), ms, 1)
    }

    #[test]
    fn test_short_tap_suppressed() {
        let mut c = GestureClassifier::default();
        assert_eq!(swipe(&mut c, (0.0, 0.0), (5.0, 5.0), 50.0), None);
        assert!(c.is_empty());
        assert!(!c.is_tracking());
    }

    #[test]
    fn test_slow_small_drag_is_also_noop() {
        let mut c = GestureClassifier::default();
        assert_eq!(swipe(&mut c, (0.0, 0.0), (10.0, -12.0), 2000.0), None);
        assert!(c.is_empty());
    }

    #[test]
    fn test_vertical_swipe_classified() {
        let mut c = GestureClassifier::default();
        let sample = swipe(&mut c, (0.0, 0.0), (0.0, 40.0), 300.0).unwrap();
        assert_eq!(sample.dir, Direction::Down);
        assert_eq!(sample.abs_y, 40.0);
        assert_eq!(sample.duration_ms, 300.0);
        assert_eq!(c.peek(), Some(&sample));
        assert_eq!(c.consume(), Some(sample));
        assert_eq!(c.consume(), None);
    }

    #[test]
    fn test_fast_swipe_over_threshold_counts() {
        let mut c = GestureClassifier::default();
        let sample = swipe(&mut c, (100.0, 100.0), (60.0, 95.0), 40.0).unwrap();
        assert_eq!(sample.dir, Direction::Left);
        assert_eq!(sample.dx, -40.0);
        assert_eq!(sample.abs_x, 40.0);
    }

    #[test]
    fn test_dominant_axis_and_tie_break() {
        let mut c = GestureClassifier::default();
        assert_eq!(swipe(&mut c, (0.0, 0.0), (50.0, 10.0), 200.0).unwrap().dir, Direction::Right);
        assert_eq!(swipe(&mut c, (0.0, 0.0), (5.0, -30.0), 200.0).unwrap().dir, Direction::Up);
        assert_eq!(swipe(&mut c, (0.0, 0.0), (30.0, 30.0), 200.0).unwrap().dir, Direction::Down);
        assert_eq!(swipe(&mut c, (0.0, 0.0), (-30.0, -30.0), 200.0).unwrap().dir, Direction::Up);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut c = GestureClassifier::default();
        assert!(swipe(&mut c, (0.0, 0.0), (24.0, 0.0), 10.0).is_some());
        assert!(swipe(&mut c, (0.0, 0.0), (23.9, 0.0), 10.0).is_none());
    }

    #[test]
    fn test_queue_keeps_newest_four() {
        let mut c = GestureClassifier::default();
        for i in 1..=6 {
            swipe(&mut c, (0.0, 0.0), (0.0, 30.0 * i as f32), 200.0).unwrap();
        }
        assert_eq!(c.len(), SWIPE_QUEUE_CAPACITY);
        let drained: Vec<f32> = std::iter::from_fn(|| c.consume()).map(|s| s.abs_y).collect();
        assert_eq!(drained, vec![90.0, 120.0, 150.0, 180.0]);
    }

    #[test]
    fn test_mismatched_pointer_up_is_ignored() {
        let mut c = GestureClassifier::default();
        c.on_down(Vec2::ZERO, 0.0, 7);
        assert_eq!(c.on_up(Vec2::new(100.0, 0.0), 100.0, 8), None);
        assert!(c.is_tracking());
        assert!(c.is_empty());

        let sample = c.on_up(Vec2::new(100.0, 0.0), 150.0, 7).unwrap();
        assert_eq!(sample.dir, Direction::Right);
        assert_eq!(sample.duration_ms, 150.0);
        assert!(!c.is_tracking());
    }

    #[test]
    fn test_up_without_down_is_noop() {
        let mut c = GestureClassifier::default();
        assert_eq!(c.on_up(Vec2::new(0.0, 100.0), 100.0, 1), None);
        assert!(c.is_empty());
    }

    #[test]
    fn test_second_down_replaces_start() {
        let mut c = GestureClassifier::default();
        c.on_down(Vec2::ZERO, 0.0, 1);
        c.on_down(Vec2::new(0.0, 100.0), 50.0, 2);
        assert_eq!(c.on_up(Vec2::new(0.0, 200.0), 60.0, 1), None);

        let sample = c.on_up(Vec2::new(0.0, 60.0), 250.0, 2).unwrap();
        assert_eq!(sample.dir, Direction::Up);
        assert_eq!(sample.abs_y, 40.0);
        assert_eq!(sample.duration_ms, 200.0);
    }

    #[test]
    fn test_listener_receives_directions() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut c = GestureClassifier::default().with_listener(move |dir| sink.borrow_mut().push(dir));

        swipe(&mut c, (0.0, 0.0), (-50.0, 0.0), 100.0);
        swipe(&mut c, (0.0, 0.0), (2.0, 2.0), 100.0);
        swipe(&mut c, (0.0, 0.0), (0.0, -50.0), 100.0);
        assert_eq!(*seen.borrow(), vec![Direction::Left, Direction::Up]);
    }

    #[test]
    fn test_clear_keeps_tracking() {
        let mut c = GestureClassifier::default();
        swipe(&mut c, (0.0, 0.0), (0.0, 50.0), 100.0);
        c.on_down(Vec2::ZERO, 200.0, 3);
        c.clear();
        assert!(c.is_empty());
        assert!(c.is_tracking());
        assert!(c.on_up(Vec2::new(50.0, 0.0), 300.0, 3).is_some());
    }

    #[test]
    fn test_detach_resets_everything_and_is_idempotent() {
        let hits = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&hits);
        let mut c = GestureClassifier::default().with_listener(move |_| *sink.borrow_mut() += 1);

        swipe(&mut c, (0.0, 0.0), (0.0, 50.0), 100.0);
        c.on_down(Vec2::ZERO, 200.0, 1);
        c.detach();
        c.detach();
        assert!(!c.is_tracking());
        assert!(c.is_empty());
        assert_eq!(Rc::strong_count(&hits), 1);

        swipe(&mut c, (0.0, 0.0), (0.0, 50.0), 100.0);
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_threshold_scales_with_dpr() {
        assert_eq!(GestureClassifier::new(SwipeOptions::default(), 2.0).threshold(), 48.0);
        assert_eq!(GestureClassifier::new(SwipeOptions::default(), 1.5).threshold(), 36.0);
        assert_eq!(GestureClassifier::new(SwipeOptions::default(), f32::NAN).threshold(), 24.0);

        let fixed = SwipeOptions {
            scale_with_dpr: false,
            ..SwipeOptions::default()
        };
        assert_eq!(GestureClassifier::new(fixed, 3.0).threshold(), 24.0);

        let mut hi_dpi = GestureClassifier::new(SwipeOptions::default(), 2.0);
        assert!(swipe(&mut hi_dpi, (0.0, 0.0), (0.0, 40.0), 300.0).is_none());
    }

    #[test]
    fn test_unusable_distance_falls_back_to_default() {
        for json in [r#"{ "min_distance": 0 }"#, r#"{ "min_distance": -5 }"#] {
            let opts: SwipeOptions = serde_json::from_str(json).unwrap();
            let mut c = GestureClassifier::new(opts, 2.0);
            assert_eq!(c.threshold(), 48.0);

            c.on_down(Vec2::new(10.0, 10.0), 0.0, 1);
            assert_eq!(c.on_up(Vec2::new(10.0, 10.0), 30.0, 1), None);
            c.on_down(Vec2::new(10.0, 10.0), 0.0, 1);
            assert_eq!(c.on_up(Vec2::new(11.0, 10.0), 30.0, 1), None);
            assert!(c.is_empty());
        }

        let nan = SwipeOptions {
            min_distance: f32::NAN,
            scale_with_dpr: false,
            ..SwipeOptions::default()
        };
        assert_eq!(nan.threshold(1.0), DEFAULT_MIN_SWIPE_DISTANCE);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let opts: SwipeOptions = serde_json::from_str(r#"{ "min_distance": 32 }"#).unwrap();
        assert_eq!(opts.min_distance, 32.0);
        assert_eq!(opts.max_tap_time_ms, DEFAULT_MAX_TAP_TIME_MS);
        assert!(opts.scale_with_dpr);
    }
}
