//! Goals: how a player's board is scored.
//!
//! Every player owns one [`Goal`]: a target color plus a scoring rule. Scoring
//! always runs on the rasterized board ([`Grid`]), so the shape of the block
//! tree only matters through the unit cells it covers.
//!
//! # Goal Kinds
//!
//! ## Perimeter Goal
//!
//! Counts target-colored cells along the four edges of the grid:
//!
//! ```text
//! score = Σ top row + Σ bottom row + Σ left column + Σ right column
//! ```
//!
//! Corner cells lie on two edges and are counted once per edge, so each
//! matching corner contributes 2. For a grid of side `S` the score lies in `[0, 4S]`.
//!
//! ## Blob Goal
//!
//! Size of the largest group of target-colored cells connected up, down, left
//! or right (no diagonals). For a grid of side `S` the score lies in `[0, S²]`.
//!
//! # Usage
//!
//! ```
//! use quadblock_engine::{Color, Grid};
//! use quadblock_evaluator::goal::{BlobGoal, Goal, PerimeterGoal};
//!
//! const R: Color = Color::REAL_RED;
//! const G: Color = Color::OLD_OLIVE;
//! let grid = Grid::from_rows(&[vec![R, G], vec![G, R]]);
//!
//! // Diagonal cells are not connected
//! assert_eq!(BlobGoal::new(R).score_grid(&grid), 1);
//! // Both red cells are corners, each counted on two edges
//! assert_eq!(PerimeterGoal::new(R).score_grid(&grid), 4);
//! ```

use std::fmt;

use quadblock_engine::{Block, Color, Grid};
use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

/// Scores a board for one target color.
///
/// Implementations only define [`Goal::score_grid`]; [`Goal::score`] rasterizes
/// the block first.
pub trait Goal: fmt::Debug + Send + Sync {
    /// Which scoring rule this goal follows.
    fn kind(&self) -> GoalKind;

    /// The color this goal rewards.
    fn color(&self) -> Color;

    /// Scores an already rasterized board.
    fn score_grid(&self, grid: &Grid) -> usize;

    /// Human readable description shown to the player.
    fn description(&self) -> String;

    /// Scores `block` (usually the board root) for this goal.
    fn score(&self, block: &Block) -> usize {
        self.score_grid(&Grid::from_block(block))
    }
}

pub type BoxedGoal = Box<dyn Goal>;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    #[display("perimeter")]
    Perimeter,
    #[display("blob")]
    Blob,
}

impl GoalKind {
    /// Creates a goal of this kind for `color`.
    #[must_use]
    pub fn new_goal(self, color: Color) -> BoxedGoal {
        match self {
            GoalKind::Perimeter => Box::new(PerimeterGoal::new(color)),
            GoalKind::Blob => Box::new(BlobGoal::new(color)),
        }
    }
}

impl Distribution<GoalKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GoalKind {
        if rng.random_bool(0.5) {
            GoalKind::Perimeter
        } else {
            GoalKind::Blob
        }
    }
}

/// Rewards covering the outer edge of the board with the target color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerimeterGoal {
    color: Color,
}

impl PerimeterGoal {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Goal for PerimeterGoal {
    fn kind(&self) -> GoalKind {
        GoalKind::Perimeter
    }

    fn color(&self) -> Color {
        self.color
    }

    fn score_grid(&self, grid: &Grid) -> usize {
        let last = grid.side() - 1;
        let matches = |x, y| usize::from(grid.cell(x, y) == self.color);
        (0..grid.side())
            .map(|i| matches(i, 0) + matches(i, last) + matches(0, i) + matches(last, i))
            .sum()
    }

    fn description(&self) -> String {
        format!(
            "Cover as much of the board's outer edge as possible with {}",
            self.color
        )
    }
}

/// Rewards the largest 4-connected region of the target color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobGoal {
    color: Color,
}

/// Flood fill bookkeeping for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellState {
    Unvisited,
    /// Visited, target color.
    Target,
    /// Visited, any other color.
    Other,
}

impl BlobGoal {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    /// Size of the blob around `(x, y)`, counting only cells not visited yet.
    ///
    /// Marks every cell it looks at, so each cell is expanded at most once
    /// across all calls sharing `visited`.
    fn blob_size_from(
        &self,
        grid: &Grid,
        (x, y): (usize, usize),
        visited: &mut [CellState],
        stack: &mut Vec<(usize, usize)>,
    ) -> usize {
        let side = grid.side();
        let index = |x: usize, y: usize| y * side + x;
        if visited[index(x, y)] != CellState::Unvisited {
            return 0;
        }
        if grid.cell(x, y) != self.color {
            visited[index(x, y)] = CellState::Other;
            return 0;
        }

        visited[index(x, y)] = CellState::Target;
        stack.push((x, y));
        let mut size = 0;
        while let Some((x, y)) = stack.pop() {
            size += 1;
            let neighbors = [
                x.checked_sub(1).map(|nx| (nx, y)),
                (x + 1 < side).then_some((x + 1, y)),
                y.checked_sub(1).map(|ny| (x, ny)),
                (y + 1 < side).then_some((x, y + 1)),
            ];
            for (nx, ny) in neighbors.into_iter().flatten() {
                let state = &mut visited[index(nx, ny)];
                if *state != CellState::Unvisited {
                    continue;
                }
                if grid.cell(nx, ny) == self.color {
                    *state = CellState::Target;
                    stack.push((nx, ny));
                } else {
                    *state = CellState::Other;
                }
            }
        }
        size
    }
}

impl Goal for BlobGoal {
    fn kind(&self) -> GoalKind {
        GoalKind::Blob
    }

    fn color(&self) -> Color {
        self.color
    }

    fn score_grid(&self, grid: &Grid) -> usize {
        let side = grid.side();
        let mut visited = vec![CellState::Unvisited; side * side];
        let mut stack = Vec::new();
        let mut largest = 0;
        for y in 0..side {
            for x in 0..side {
                let size = self.blob_size_from(grid, (x, y), &mut visited, &mut stack);
                largest = largest.max(size);
            }
        }
        largest
    }

    fn description(&self) -> String {
        format!("Build the largest connected blob of {} cells", self.color)
    }
}
