//! On-screen overlays
//!
//! Layout and hit testing only; drawing belongs to the host engine.

pub mod dpad;

pub use dpad::{DPadAnchor, DPadEvents, DPadLayout, DPadOptions, DPadOverlay, DPadPress, SafeArea};
