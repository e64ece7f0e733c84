//! Input classification
//!
//! Raw pointer samples go in, cardinal directions come out.

pub mod direction;
pub mod swipe;

pub use direction::Direction;
pub use swipe::{GestureClassifier, GestureSample, PointerId, SwipeOptions};
