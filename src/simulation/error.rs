use thiserror::Error;

/// Errors returned by the grid engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Construction with a side of 0 cells, or one too large to address
    /// with `i32` coordinates.
    #[error("invalid grid dimension {width}x{height}: each side must be in 1..={max}")]
    InvalidDimension { width: u32, height: u32, max: u32 },

    /// A `get`/`set` outside the grid. Never clamped by the engine.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}
