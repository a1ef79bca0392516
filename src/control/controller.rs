use std::time::Instant;

use crate::config::LifeConfig;
use crate::control::input::{pointer_to_cell, EditGesture};
use crate::control::timer::StepTimer;
use crate::simulation::{Grid, GridError};

/// Whether the timer advances the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// Host-level actions (keyboard shortcuts in the window)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Reseed the grid at the configured density
    Restart,
    TogglePause,
    /// Kill every cell
    Clear,
}

/// Owns the grid and drives it: timed steps, commands and pointer edits.
///
/// Editing only happens while paused. Each gesture toggles a cell at most
/// once and ends with a single `sync_buffer`; leaving the paused state syncs
/// again if anything was edited, so the next `advance` starts from a
/// committed snapshot.
#[derive(Debug)]
pub struct Controller {
    grid: Grid,
    state: RunState,
    timer: StepTimer,
    alive_probability: f64,
    cursor: Option<(f64, f64)>,
    gesture: Option<EditGesture>,
    edited_while_paused: bool,
}

impl Controller {
    /// Build the grid from `config` and seed it, starting in the running state.
    pub fn new(config: &LifeConfig, now: Instant) -> Result<Self, GridError> {
        let (width, height) = config.grid_size();
        let mut grid = Grid::new(width, height)?;
        grid.randomize(config.alive_probability);
        grid.sync_buffer();

        Ok(Self::with_grid(grid, config, now))
    }

    /// Wrap an existing grid without reseeding it.
    pub fn with_grid(grid: Grid, config: &LifeConfig, now: Instant) -> Self {
        Self {
            grid,
            state: RunState::Running,
            timer: StepTimer::new(config.step_interval, now),
            alive_probability: config.alive_probability,
            cursor: None,
            gesture: None,
            edited_while_paused: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    /// Advance one generation if running and the step interval has elapsed.
    /// Returns whether a generation was computed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.state != RunState::Running || !self.timer.is_due(now) {
            return false;
        }
        self.grid.advance();
        self.timer.mark(now);
        log::trace!(
            "Generation {}: {} alive",
            self.grid.generation(),
            self.grid.population()
        );
        true
    }

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Restart => {
                self.grid.randomize(self.alive_probability);
                log::info!(
                    "Restarted at {:.0}% density: {} alive",
                    self.alive_probability,
                    self.grid.population()
                );
            }
            Command::TogglePause => match self.state {
                RunState::Running => {
                    self.state = RunState::Paused;
                    log::info!("Paused at generation {}", self.grid.generation());
                }
                RunState::Paused => {
                    self.end_gesture();
                    if self.edited_while_paused {
                        self.grid.sync_buffer();
                        self.edited_while_paused = false;
                    }
                    self.state = RunState::Running;
                    log::info!("Resumed");
                }
            },
            Command::Clear => {
                self.grid.clear();
                log::info!("Grid cleared");
            }
        }
    }

    /// Pointer pressed at the last known cursor position.
    pub fn pointer_pressed(&mut self, canvas: (f64, f64)) {
        if !self.is_paused() {
            return;
        }
        self.gesture = Some(EditGesture::new());
        if let Some(position) = self.cursor {
            self.edit_at(position, canvas);
        }
    }

    /// Pointer moved; edits the cell under it when a gesture is active.
    pub fn pointer_moved(&mut self, position: (f64, f64), canvas: (f64, f64)) {
        self.cursor = Some(position);
        if self.gesture.is_some() {
            self.edit_at(position, canvas);
        }
    }

    /// Pointer released: commit the gesture's edits to the scratch buffer.
    pub fn pointer_released(&mut self) {
        self.end_gesture();
    }

    /// Pointer left the canvas
    pub fn pointer_left(&mut self) {
        self.cursor = None;
    }

    fn end_gesture(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            if gesture.has_edits() {
                self.grid.sync_buffer();
            }
        }
    }

    fn edit_at(&mut self, position: (f64, f64), canvas: (f64, f64)) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        let Some((x, y)) = pointer_to_cell(position, canvas, self.grid.width(), self.grid.height())
        else {
            return;
        };
        if !gesture.visit((x, y)) {
            return;
        }

        // pointer_to_cell clamps, so the cell is always in bounds
        match self.grid.toggle(x, y) {
            Ok(state) => {
                self.edited_while_paused = true;
                log::debug!("Cell ({}, {}) -> {:?}", x, y, state);
            }
            Err(err) => log::warn!("Edit ignored: {}", err),
        }
    }
}
