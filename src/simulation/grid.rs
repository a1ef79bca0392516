use rand::Rng;

use crate::simulation::cell::Cell;
use crate::simulation::error::GridError;

/// The 8 neighbour offsets: N, S, W, E, NW, NE, SW, SE.
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Fixed-size Game of Life grid with a double buffer.
///
/// `cells` is the authoritative generation. `scratch` is a copy of it taken at
/// the start of every [`advance`](Grid::advance) (or by
/// [`sync_buffer`](Grid::sync_buffer) at the end of an edit gesture); neighbour
/// counts read only from `scratch` while results are written only to `cells`.
///
/// Both buffers are row-major (`y * width + x`) and are allocated once.
/// The grid does not wrap: neighbours past an edge are skipped.
///
/// Single-writer: the grid does no locking, callers drive it from one thread.
#[derive(Clone, Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    scratch: Vec<Cell>,
    generation: u64,
}

impl Grid {
    /// Largest side that still fits `i32` coordinates.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create an all-dead grid of `width` x `height` cells.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 || width > Self::MAX_DIM || height > Self::MAX_DIM {
            return Err(GridError::InvalidDimension {
                width,
                height,
                max: Self::MAX_DIM,
            });
        }

        let cell_count = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; cell_count],
            scratch: vec![Cell::Dead; cell_count],
            generation: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Generations advanced since the last `randomize` or `clear`
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Current generation in row-major order, for bulk rendering
    pub fn cells(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Whether the scratch snapshot matches the current generation.
    pub fn is_synced(&self) -> bool {
        self.cells == self.scratch
    }

    /// Reseed every cell: alive when a uniform draw in `[0, 100)` is below
    /// `probability_alive_percent`, clamped to `[0, 100]`.
    pub fn randomize(&mut self, probability_alive_percent: f64) {
        self.randomize_with(probability_alive_percent, &mut rand::thread_rng());
    }

    /// [`randomize`](Grid::randomize) with a caller-supplied RNG. NaN counts as 0.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, probability_alive_percent: f64, rng: &mut R) {
        let probability = if probability_alive_percent.is_nan() {
            0.0
        } else {
            probability_alive_percent.clamp(0.0, 100.0)
        };

        for cell in &mut self.cells {
            let draw: f64 = rng.gen_range(0.0..100.0);
            *cell = Cell::from_alive(draw < probability);
        }
        self.generation = 0;

        log::debug!(
            "Randomized {}x{} grid at {:.1}%: {} alive",
            self.width,
            self.height,
            probability,
            self.population()
        );
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
        self.generation = 0;
        log::debug!("Cleared {}x{} grid", self.width, self.height);
    }

    /// State of `(x, y)` in the current generation.
    pub fn get(&self, x: i32, y: i32) -> Result<Cell, GridError> {
        let index = self.index(x, y)?;
        Ok(self.cells[index])
    }

    /// Overwrite `(x, y)` in the current generation.
    pub fn set(&mut self, x: i32, y: i32, state: Cell) -> Result<(), GridError> {
        let index = self.index(x, y)?;
        self.cells[index] = state;
        Ok(())
    }

    /// Flip `(x, y)` and return its new state.
    pub fn toggle(&mut self, x: i32, y: i32) -> Result<Cell, GridError> {
        let index = self.index(x, y)?;
        let state = self.cells[index].toggled();
        self.cells[index] = state;
        Ok(state)
    }

    /// State of `(x, y)` in the scratch snapshot, i.e. as of the last
    /// `advance` or `sync_buffer`.
    pub fn committed(&self, x: i32, y: i32) -> Result<Cell, GridError> {
        let index = self.index(x, y)?;
        Ok(self.scratch[index])
    }

    /// Copy the current generation into the scratch snapshot.
    pub fn sync_buffer(&mut self) {
        self.scratch.copy_from_slice(&self.cells);
    }

    /// Advance exactly one generation.
    pub fn advance(&mut self) {
        self.sync_buffer();

        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let live = self.live_neighbours(x, y);
                let index = self.offset(x, y);
                self.cells[index] = self.scratch[index].next(live);
            }
        }

        self.generation += 1;
    }

    /// Count alive neighbours of `(x, y)` in the scratch buffer, skipping
    /// coordinates past the edges.
    fn live_neighbours(&self, x: i32, y: i32) -> u8 {
        let mut count = 0;
        for (dx, dy) in NEIGHBOUR_OFFSETS {
            let (nx, ny) = (x + dx, y + dy);
            if !self.contains(nx, ny) {
                continue;
            }
            if self.scratch[self.offset(nx, ny)].is_alive() {
                count += 1;
            }
        }
        count
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Row-major offset of an in-bounds coordinate
    fn offset(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn index(&self, x: i32, y: i32) -> Result<usize, GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.offset(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_with(width: u32, height: u32, alive: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for &(x, y) in alive {
            grid.set(x, y, Cell::Alive).unwrap();
        }
        grid
    }

    fn alive_cells(grid: &Grid) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                if grid.get(x, y).unwrap().is_alive() {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(64, 36).unwrap();
        assert_eq!(grid.width(), 64);
        assert_eq!(grid.height(), 36);
        assert_eq!(grid.cells().len(), 64 * 36);
        assert_eq!(grid.population(), 0);
        assert!(grid.is_synced());
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(Grid::new(0, 5), Err(GridError::InvalidDimension { .. })));
        assert!(matches!(Grid::new(5, 0), Err(GridError::InvalidDimension { .. })));
        assert!(matches!(
            Grid::new(Grid::MAX_DIM + 1, 1),
            Err(GridError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_single_cell_grid() {
        let mut grid = grid_with(1, 1, &[(0, 0)]);
        grid.advance();
        assert_eq!(grid.get(0, 0).unwrap(), Cell::Dead);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(4, 3).unwrap();
        for (x, y) in [(4, 0), (0, 3), (-1, 0), (0, -1), (i32::MAX, i32::MIN)] {
            assert_eq!(
                grid.get(x, y),
                Err(GridError::OutOfBounds { x, y, width: 4, height: 3 })
            );
            assert!(grid.set(x, y, Cell::Alive).is_err());
            assert!(grid.toggle(x, y).is_err());
            assert!(grid.committed(x, y).is_err());
        }
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_toggle() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.toggle(1, 2).unwrap(), Cell::Alive);
        assert_eq!(grid.get(1, 2).unwrap(), Cell::Alive);
        assert_eq!(grid.toggle(1, 2).unwrap(), Cell::Dead);
    }

    #[test]
    fn test_randomize_degenerate_probabilities() {
        let mut grid = Grid::new(20, 10).unwrap();
        grid.randomize(100.0);
        assert_eq!(grid.population(), 200);
        grid.randomize(0.0);
        assert_eq!(grid.population(), 0);
        grid.randomize(250.0);
        assert_eq!(grid.population(), 200);
        grid.randomize(-5.0);
        assert_eq!(grid.population(), 0);
        grid.randomize(f64::NAN);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_randomize_density() {
        let mut grid = Grid::new(100, 100).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        grid.randomize_with(10.0, &mut rng);
        let population = grid.population();
        // ~1000 expected out of 10000
        assert!(
            (700..1300).contains(&population),
            "population {} far from 10% density",
            population
        );
    }

    #[test]
    fn test_randomize_is_seeded() {
        let mut a = Grid::new(16, 16).unwrap();
        let mut b = Grid::new(16, 16).unwrap();
        a.randomize_with(50.0, &mut StdRng::seed_from_u64(42));
        b.randomize_with(50.0, &mut StdRng::seed_from_u64(42));
        assert!(a.cells().eq(b.cells()));
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::new(8, 8).unwrap();
        grid.randomize(50.0);
        grid.advance();
        grid.clear();
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.generation(), 0);
        assert_eq!((grid.width(), grid.height()), (8, 8));
    }

    #[test]
    fn test_empty_grid_is_fixed_point() {
        let mut grid = Grid::new(10, 10).unwrap();
        for _ in 0..5 {
            grid.advance();
            assert_eq!(grid.population(), 0);
        }
        assert_eq!(grid.generation(), 5);
    }

    #[test]
    fn test_block_still_life() {
        let block = [(3, 3), (4, 3), (3, 4), (4, 4)];
        let mut grid = grid_with(8, 8, &block);
        grid.advance();
        assert_eq!(alive_cells(&grid), vec![(3, 3), (4, 3), (3, 4), (4, 4)]);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = vec![(2, 3), (3, 3), (4, 3)];
        let vertical = vec![(3, 2), (3, 3), (3, 4)];
        let mut grid = grid_with(7, 7, &horizontal);

        grid.advance();
        assert_eq!(alive_cells(&grid), vertical);
        grid.advance();
        assert_eq!(alive_cells(&grid), horizontal);
    }

    #[test]
    fn test_corner_cell_dies() {
        let mut grid = grid_with(5, 5, &[(0, 0)]);
        grid.advance();
        assert_eq!(grid.get(0, 0).unwrap(), Cell::Dead);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_edges_do_not_wrap() {
        // On a torus the right column would feed (0, 1); here it must stay dead.
        let mut grid = grid_with(5, 5, &[(4, 0), (4, 1), (4, 2)]);
        grid.advance();
        assert_eq!(grid.get(0, 1).unwrap(), Cell::Dead);
        assert_eq!(alive_cells(&grid), vec![(3, 1), (4, 1)]);
    }

    #[test]
    fn test_corner_block_is_stable() {
        let mut grid = grid_with(4, 4, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        grid.advance();
        assert_eq!(alive_cells(&grid), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_neighbour_counts_use_snapshot() {
        // Glider: an in-place sweep without the snapshot would corrupt later rows.
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut grid = grid_with(8, 8, &glider);
        grid.advance();
        assert_eq!(alive_cells(&grid), vec![(0, 1), (2, 1), (1, 2), (2, 2), (1, 3)]);
    }

    #[test]
    fn test_advance_leaves_snapshot_of_previous_generation() {
        let mut grid = grid_with(7, 7, &[(2, 3), (3, 3), (4, 3)]);
        grid.advance();
        assert_eq!(grid.committed(2, 3).unwrap(), Cell::Alive);
        assert_eq!(grid.get(2, 3).unwrap(), Cell::Dead);
        assert!(!grid.is_synced());
    }

    #[test]
    fn test_sync_buffer() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(1, 1, Cell::Alive).unwrap();
        assert_eq!(grid.committed(1, 1).unwrap(), Cell::Dead);
        grid.sync_buffer();
        assert_eq!(grid.committed(1, 1).unwrap(), Cell::Alive);
        assert!(grid.is_synced());
    }

    #[test]
    fn test_sync_then_advance_matches_advance() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut a = Grid::new(30, 20).unwrap();
        a.randomize_with(35.0, &mut rng);
        let mut b = a.clone();

        a.sync_buffer();
        a.advance();
        b.advance();
        assert!(a.cells().eq(b.cells()));
    }

    proptest! {
        #[test]
        fn prop_set_then_get(
            width in 1u32..24,
            height in 1u32..24,
            seed in any::<u64>(),
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
            alive in any::<bool>(),
        ) {
            let mut grid = Grid::new(width, height).unwrap();
            grid.randomize_with(50.0, &mut StdRng::seed_from_u64(seed));
            let before: Vec<Cell> = grid.cells().collect();

            let x = (fx * width as f64) as i32;
            let y = (fy * height as f64) as i32;
            let state = Cell::from_alive(alive);
            grid.set(x, y, state).unwrap();
            prop_assert_eq!(grid.get(x, y).unwrap(), state);

            let target = y as usize * width as usize + x as usize;
            for (i, (old, new)) in before.iter().zip(grid.cells()).enumerate() {
                if i != target {
                    prop_assert_eq!(*old, new);
                }
            }
        }

        #[test]
        fn prop_outside_is_out_of_bounds(
            width in 1u32..24,
            height in 1u32..24,
            x in any::<i32>(),
            y in any::<i32>(),
        ) {
            let inside = x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height;
            let grid = Grid::new(width, height).unwrap();
            match grid.get(x, y) {
                Ok(_) => prop_assert!(inside),
                Err(err) => {
                    prop_assert!(!inside);
                    let is_out_of_bounds = matches!(err, GridError::OutOfBounds { .. });
                    prop_assert!(is_out_of_bounds);
                }
            }
        }
    }
}
