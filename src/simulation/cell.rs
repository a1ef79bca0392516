/// State of a single cell. Cells are plain values addressed by coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn from_alive(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }

    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// The opposite state
    pub fn toggled(self) -> Self {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }

    /// State in the next generation given the number of live neighbours (B3/S23).
    pub fn next(self, live_neighbours: u8) -> Self {
        match (self, live_neighbours) {
            (Cell::Alive, 2..=3) => Cell::Alive, // Survives
            (Cell::Dead, 3) => Cell::Alive,      // Birth
            _ => Cell::Dead,                     // Under/overpopulation, or stays dead
        }
    }

    /// Encoding used by the render storage buffer (1 = alive, 0 = dead)
    pub fn to_gpu(self) -> u32 {
        self.is_alive() as u32
    }
}

impl std::ops::Not for Cell {
    type Output = Cell;

    fn not(self) -> Cell {
        self.toggled()
    }
}
