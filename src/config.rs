use std::time::Duration;

/// Canvas dimensions in pixels (1280x720 window)
pub const CANVAS_WIDTH: u32 = 1280;
pub const CANVAS_HEIGHT: u32 = 720;

/// Side of one cell in pixels. Min value = 2, max value = min(CANVAS_WIDTH, CANVAS_HEIGHT)
pub const CELL_SIZE: u32 = 20;

/// Time between two generations while running
pub const STEP_INTERVAL: Duration = Duration::from_millis(100);

/// How likely a cell is to be alive after a restart (in percent)
pub const DEFAULT_ALIVE_PROBABILITY: f64 = 10.0;

// ============================================
// Palette (sRGB, 0-255)
// ============================================

pub const ALIVE_COLOR: [u8; 3] = [204, 102, 0];
pub const DEAD_COLOR: [u8; 3] = [0, 0, 0];
pub const GRID_LINE_COLOR: [u8; 3] = [50, 50, 50];

/// Colors used by the renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub alive: [u8; 3],
    pub dead: [u8; 3],
    pub grid_line: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            alive: ALIVE_COLOR,
            dead: DEAD_COLOR,
            grid_line: GRID_LINE_COLOR,
        }
    }
}

/// Host configuration, built from the constants above
#[derive(Clone, Debug, PartialEq)]
pub struct LifeConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_size: u32,
    pub step_interval: Duration,
    pub alive_probability: f64,
    pub palette: Palette,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            cell_size: CELL_SIZE,
            step_interval: STEP_INTERVAL,
            alive_probability: DEFAULT_ALIVE_PROBABILITY,
            palette: Palette::default(),
        }
    }
}

impl LifeConfig {
    /// Grid dimensions in cells: canvas size divided by cell size.
    ///
    /// A zero cell size yields a 0x0 grid, which `Grid::new` rejects.
    pub fn grid_size(&self) -> (u32, u32) {
        if self.cell_size == 0 {
            return (0, 0);
        }
        (
            self.canvas_width / self.cell_size,
            self.canvas_height / self.cell_size,
        )
    }
}
