//! Conway's Game of Life on a fixed, non-wrapping grid.
//!
//! [`simulation`] holds the double-buffered grid engine. [`control`] holds the
//! host-side pieces that drive it: the step timer, pointer-to-cell mapping and
//! the pause/edit state machine. Rendering lives in the binary.

pub mod config;
pub mod control;
pub mod simulation;

pub use config::LifeConfig;
pub use simulation::{Cell, Grid, GridError};
