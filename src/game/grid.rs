/// A position on the game grid, in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by a delta, without wrapping.
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Toroidal cell geometry derived from a pixel surface.
///
/// Columns and rows are fixed for the lifetime of a session. Positions stay
/// inside `[0, cols) x [0, rows)` by wrap-around arithmetic, never by
/// rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cell_size: u32,
    cols: i32,
    rows: i32,
}

impl Grid {
    /// Derive the grid from surface pixel dimensions and a cell size.
    ///
    /// # Panics
    ///
    /// `cell_size` must be non-zero and the surface must hold at least one
    /// cell on each axis. Callers validate user-supplied dimensions before
    /// constructing a grid.
    pub fn new(width_px: u32, height_px: u32, cell_size: u32) -> Self {
        assert!(cell_size > 0, "cell size must be non-zero");
        let cols = (width_px / cell_size) as i32;
        let rows = (height_px / cell_size) as i32;
        assert!(cols > 0 && rows > 0, "surface smaller than one cell");
        Self {
            cell_size,
            cols,
            rows,
        }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Wrap a position back into range, one edge crossing per axis.
    pub fn wrap(&self, pos: Position) -> Position {
        Position {
            x: wrap_axis(pos.x, self.cols),
            y: wrap_axis(pos.y, self.rows),
        }
    }

    /// Top-left pixel of a cell.
    pub fn to_pixel(&self, pos: Position) -> (u32, u32) {
        (
            pos.x as u32 * self.cell_size,
            pos.y as u32 * self.cell_size,
        )
    }
}

fn wrap_axis(v: i32, range: i32) -> i32 {
    if v == range {
        0
    } else if v == -1 {
        range - 1
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_dimensions_truncate() {
        let grid = Grid::new(810, 600, 20);
        assert_eq!(grid.cols(), 40);
        assert_eq!(grid.rows(), 30);
    }

    #[test]
    fn test_wrap_at_edges() {
        let grid = Grid::new(200, 100, 10);
        // cols = 20, rows = 10
        assert_eq!(grid.wrap(Position::new(20, 5)), Position::new(0, 5));
        assert_eq!(grid.wrap(Position::new(-1, 5)), Position::new(19, 5));
        assert_eq!(grid.wrap(Position::new(5, 10)), Position::new(5, 0));
        assert_eq!(grid.wrap(Position::new(5, -1)), Position::new(5, 9));
        assert_eq!(grid.wrap(Position::new(5, 5)), Position::new(5, 5));
    }

    #[test]
    fn test_to_pixel() {
        let grid = Grid::new(200, 100, 10);
        assert_eq!(grid.to_pixel(Position::new(3, 7)), (30, 70));
    }

    #[test]
    #[should_panic]
    fn test_zero_cell_size_rejected() {
        Grid::new(200, 100, 0);
    }

    proptest! {
        // Wrap-around law: one single-axis step from any in-range position
        // lands back in range, with the two edge cases crossing over.
        #[test]
        fn wrapped_step_stays_in_range(
            x in 0i32..20,
            y in 0i32..10,
            step in prop_oneof![
                Just((1, 0)), Just((-1, 0)), Just((0, 1)), Just((0, -1)),
            ],
        ) {
            let grid = Grid::new(200, 100, 10);
            let next = grid.wrap(Position::new(x, y).moved_by(step.0, step.1));
            prop_assert!(next.x >= 0 && next.x < grid.cols());
            prop_assert!(next.y >= 0 && next.y < grid.rows());
            if x == grid.cols() - 1 && step == (1, 0) {
                prop_assert_eq!(next.x, 0);
            }
            if x == 0 && step == (-1, 0) {
                prop_assert_eq!(next.x, grid.cols() - 1);
            }
        }
    }
}
