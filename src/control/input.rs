use std::collections::HashSet;

/// Map a pointer position on the canvas to a grid cell.
///
/// Each axis maps as `clamp(floor(p / extent * cells), 0, cells - 1)`, so
/// positions outside the canvas land on the nearest edge cell. Returns `None`
/// for an empty or non-finite canvas, or a non-finite pointer.
pub fn pointer_to_cell(
    pointer: (f64, f64),
    canvas: (f64, f64),
    width_cells: u32,
    height_cells: u32,
) -> Option<(i32, i32)> {
    let x = map_axis(pointer.0, canvas.0, width_cells)?;
    let y = map_axis(pointer.1, canvas.1, height_cells)?;
    Some((x, y))
}

fn map_axis(position: f64, extent: f64, cells: u32) -> Option<i32> {
    if cells == 0 || !position.is_finite() || !extent.is_finite() || extent <= 0.0 {
        return None;
    }
    let last = cells.min(i32::MAX as u32) as i32 - 1;
    let cell = (position / extent * cells as f64).floor();
    Some(cell.clamp(0.0, last as f64) as i32)
}

/// One press-drag-release edit.
///
/// Every cell is toggled at most once per gesture, however long the pointer
/// stays on it.
#[derive(Debug, Default)]
pub struct EditGesture {
    visited: HashSet<(i32, i32)>,
}

impl EditGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `cell` is seen in this gesture.
    pub fn visit(&mut self, cell: (i32, i32)) -> bool {
        self.visited.insert(cell)
    }

    /// Whether the gesture touched any cell
    pub fn has_edits(&self) -> bool {
        !self.visited.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: (f64, f64) = (1280.0, 720.0);

    #[test]
    fn test_maps_inside_canvas() {
        assert_eq!(pointer_to_cell((0.0, 0.0), CANVAS, 64, 36), Some((0, 0)));
        assert_eq!(pointer_to_cell((19.9, 21.0), CANVAS, 64, 36), Some((0, 1)));
        assert_eq!(pointer_to_cell((645.0, 365.0), CANVAS, 64, 36), Some((32, 18)));
    }

    #[test]
    fn test_clamps_to_edges() {
        assert_eq!(pointer_to_cell((1280.0, 720.0), CANVAS, 64, 36), Some((63, 35)));
        assert_eq!(pointer_to_cell((5000.0, -40.0), CANVAS, 64, 36), Some((63, 0)));
        assert_eq!(pointer_to_cell((-1.0, 9999.0), CANVAS, 64, 36), Some((0, 35)));
    }

    #[test]
    fn test_degenerate_canvas() {
        assert_eq!(pointer_to_cell((10.0, 10.0), (0.0, 720.0), 64, 36), None);
        assert_eq!(pointer_to_cell((10.0, 10.0), CANVAS, 0, 36), None);
        assert_eq!(pointer_to_cell((f64::NAN, 10.0), CANVAS, 64, 36), None);
    }

    #[test]
    fn test_gesture_visits_once() {
        let mut gesture = EditGesture::new();
        assert!(!gesture.has_edits());
        assert!(gesture.visit((3, 4)));
        assert!(!gesture.visit((3, 4)));
        assert!(gesture.visit((4, 4)));
        assert!(gesture.has_edits());
    }
}
