use super::{
    block::{Block, BlockContent},
    color::Color,
    geometry::Quadrant,
};

/// A block tree flattened into unit cells at its finest resolution.
///
/// The grid of a block at `depth` has side `2^(max_depth - depth)`, whatever its
/// subdivision pattern: a leaf above `max_depth` simply covers several cells.
/// Cells are stored row-major and `(0, 0)` is the upper-left corner of the block.
///
/// # Example
///
/// ```
/// use quadblock_engine::{Block, Color, Grid, Position};
///
/// let mut block = Block::new(Position::ORIGIN, 100, Color::BLACK, 0, 2)?;
/// block.subdivide_with([Color::WHITE, Color::BLACK, Color::BLACK, Color::BLACK]);
///
/// let grid = Grid::from_block(&block);
/// assert_eq!(grid.side(), 4);
/// assert_eq!(grid.cell(3, 0), Color::WHITE);
/// assert_eq!(grid.cell(0, 3), Color::BLACK);
/// # Ok::<(), quadblock_engine::BlockError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    side: usize,
    cells: Vec<Color>,
}

impl Grid {
    /// Rasterizes `block`, touching every cell exactly once.
    #[must_use]
    pub fn from_block(block: &Block) -> Self {
        let side = 1 << (block.max_depth() - block.depth());
        // Every cell is overwritten by exactly one leaf below.
        let mut grid = Self {
            side,
            cells: vec![Color::BLACK; side * side],
        };
        grid.fill_block(block, 0, 0, side);
        grid
    }

    /// Builds a grid from its rows, mostly useful to score hand-made layouts.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a non-empty square.
    #[must_use]
    pub fn from_rows(rows: &[Vec<Color>]) -> Self {
        let side = rows.len();
        assert!(side > 0, "grid must not be empty");
        assert!(
            rows.iter().all(|row| row.len() == side),
            "grid must be square"
        );
        Self {
            side,
            cells: rows.concat(),
        }
    }

    fn fill_block(&mut self, block: &Block, x: usize, y: usize, span: usize) {
        match block.content() {
            BlockContent::Leaf(color) => {
                for row in y..y + span {
                    self.cells[row * self.side + x..][..span].fill(*color);
                }
            }
            BlockContent::Split(children) => {
                let half = span / 2;
                for (quadrant, child) in Quadrant::ALL.into_iter().zip(children.iter()) {
                    let (dx, dy) = match quadrant {
                        Quadrant::UpperRight => (half, 0),
                        Quadrant::UpperLeft => (0, 0),
                        Quadrant::LowerLeft => (0, half),
                        Quadrant::LowerRight => (half, half),
                    };
                    self.fill_block(child, x + dx, y + dy, half);
                }
            }
        }
    }

    /// Number of cells along each side.
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Returns the color of the cell at column `x` and row `y`.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Color {
        self.cells[y * self.side + x]
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks_exact(self.side)
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Color> + '_ {
        self.cells.iter().copied()
    }
}
