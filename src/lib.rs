//! PWA Game Kit - primitives for small browser/PWA games
//!
//! Core modules:
//! - `rng`: Pluggable random sources (system, seeded xorshift, scripted replay)
//! - `time`: Fixed-step accumulator clock
//! - `config`: Host engine configuration merged over defaults
//! - `input`: Swipe/tap gesture classification
//! - `ui`: On-screen directional pad layout and hit testing
//! - `platform`: Browser/native platform abstraction
//! - `sim`: Deterministic simulation harness (clock + RNG + tick counter)
//! - `settings`: Persisted player input preferences

pub mod config;
pub mod error;
pub mod input;
pub mod platform;
pub mod rng;
pub mod settings;
pub mod sim;
pub mod time;
pub mod ui;

pub use config::{HostConfig, HostConfigOverrides, PhysicsConfig, ScaleMode};
pub use error::ConfigError;
pub use rng::{RandomSource, RngSource, SequenceRandom, SystemRandom, XorShiftRandom, random_int};
pub use time::FixedStepClock;
pub use input::{Direction, GestureClassifier, GestureSample, SwipeOptions};
pub use settings::Settings;
pub use sim::{Simulation, StepContext};
pub use ui::{DPadAnchor, DPadOptions, DPadOverlay, SafeArea};

/// Framework default constants
pub mod consts {
    /// Default simulation rate (Hz)
    pub const DEFAULT_TICK_RATE_HZ: f64 = 60.0;
    /// Largest frame delta fed to the clock by the harness (ms).
    /// Backgrounded tabs report huge deltas; anything above this is dropped.
    pub const DEFAULT_MAX_FRAME_MS: f64 = 250.0;

    /// Default xorshift seed
    pub const DEFAULT_SEED: u32 = 123_456_789;

    /// Minimum swipe distance before DPR scaling (px)
    pub const DEFAULT_MIN_SWIPE_DISTANCE: f32 = 24.0;
    /// Pointer releases within this window that stay under threshold are taps (ms)
    pub const DEFAULT_MAX_TAP_TIME_MS: f64 = 180.0;
    /// Completed swipes kept for polling consumers
    pub const SWIPE_QUEUE_CAPACITY: usize = 4;

    /// D-pad button radius (px)
    pub const DPAD_RADIUS: f32 = 26.0;
    /// D-pad gap between pad center and button edge (px)
    pub const DPAD_GAP: f32 = 10.0;
    /// Smallest margin kept between the pad and the viewport edge (px)
    pub const DPAD_MIN_EDGE_MARGIN: f32 = 8.0;
    /// How long a pressed button stays highlighted (ms)
    pub const DPAD_PRESS_FLASH_MS: f64 = 80.0;
}
