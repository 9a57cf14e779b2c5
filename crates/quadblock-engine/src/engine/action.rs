use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board_seed::BoardSeed;
use crate::core::{
    block::Block,
    color::{Color, Palette},
    geometry::{Position, Rotation, SwapAxis},
};

/// Addresses one block of a board by a point inside it and a depth.
///
/// Resolution follows [`Block::locate`]: the block at `depth` containing `point`,
/// or the deepest block containing it when the tree is shallower there. A
/// selection built from a block's own corner and depth (see [`Selection::of`])
/// addresses that same block on the board and on every copy of it, which is what
/// lets a move chosen on a simulated copy be replayed on the real board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub point: Position,
    pub depth: u8,
}

impl Selection {
    #[must_use]
    pub const fn new(point: Position, depth: u8) -> Self {
        Self { point, depth }
    }

    /// Selection addressing exactly `block`.
    #[must_use]
    pub fn of(block: &Block) -> Self {
        Self::new(block.position(), block.depth())
    }
}

/// A transform a player can apply to a block.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[display("rotate {_0}")]
    Rotate(Rotation),
    #[display("swap {_0}")]
    Swap(SwapAxis),
    #[display("smash")]
    Smash,
    #[display("combine")]
    Combine,
    #[display("paint {_0}")]
    Paint(Color),
    #[display("pass")]
    Pass,
}

impl Action {
    /// Number of distinct transforms, excluding [`Action::Pass`].
    pub const TRANSFORM_COUNT: usize = 7;

    /// Picks one of the seven transforms uniformly at random.
    ///
    /// Painting always uses `paint_color`, the only color a player ever paints with.
    pub fn random_transform<R>(paint_color: Color, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        match rng.random_range(0..Self::TRANSFORM_COUNT) {
            0 => Self::Rotate(Rotation::Clockwise),
            1 => Self::Rotate(Rotation::CounterClockwise),
            2 => Self::Swap(SwapAxis::Horizontal),
            3 => Self::Swap(SwapAxis::Vertical),
            4 => Self::Smash,
            5 => Self::Combine,
            _ => Self::Paint(paint_color),
        }
    }
}

/// An action together with the block it targets.
///
/// A move carrying a `seed` draws its randomness (the colors of a smash) from
/// that seed instead of the caller's generator, so applying it to equal boards
/// always gives equal results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display("{action} at ({}, {}) depth {}", target.point.x, target.point.y, target.depth)]
pub struct Move {
    pub action: Action,
    pub target: Selection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<BoardSeed>,
}

impl Move {
    #[must_use]
    pub const fn new(action: Action, target: Selection) -> Self {
        Self {
            action,
            target,
            seed: None,
        }
    }

    /// This move, replayed with randomness from `seed`.
    #[must_use]
    pub fn with_seed(self, seed: BoardSeed) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// A move that does nothing.
    #[must_use]
    pub const fn pass() -> Self {
        Self::new(Action::Pass, Selection::new(Position::ORIGIN, 0))
    }
}

impl Block {
    /// Applies `action` to this block, returning whether it was performed.
    ///
    /// [`Action::Pass`] is always performed and changes nothing. `palette` and
    /// `rng` are only used by [`Action::Smash`].
    pub fn apply<R>(&mut self, action: Action, palette: &Palette, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        match action {
            Action::Rotate(rotation) => self.rotate(rotation),
            Action::Swap(axis) => self.swap(axis),
            Action::Smash => self.smash(palette, rng),
            Action::Combine => self.combine(),
            Action::Paint(color) => self.paint(color),
            Action::Pass => true,
        }
    }
}
