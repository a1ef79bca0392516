mod controller;
mod input;
mod timer;

pub use controller::{Command, Controller, RunState};
pub use input::{pointer_to_cell, EditGesture};
pub use timer::StepTimer;
