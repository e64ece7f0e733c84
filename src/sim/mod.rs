//! Deterministic simulation harness
//!
//! Gameplay code that runs inside [`Simulation::frame`] must stay pure:
//! - Fixed timestep only
//! - Randomness only from the step context's source
//! - No rendering or platform dependencies

pub mod harness;

pub use harness::{Simulation, StepContext};
