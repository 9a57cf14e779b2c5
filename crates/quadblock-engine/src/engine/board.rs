use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::{
    BlockError,
    core::{block::Block, color::Palette, geometry::Position, grid::Grid},
};

use super::action::{Move, Selection};

/// The game board: a block tree rooted at the canvas origin, and the palette
/// its leaves are painted from.
///
/// All structural changes go through [`Board::apply`], which resolves a
/// [`Move`]'s selection and runs the matching block operation.
///
/// # Example
///
/// ```
/// use quadblock_engine::{Board, BoardSeed, Palette};
///
/// let mut rng = BoardSeed::from(7).rng();
/// let board = Board::generate(3, 750, Palette::classic(), &mut rng)?;
///
/// assert_eq!(board.root().max_depth(), 3);
/// assert_eq!(board.root().size(), 750);
/// assert_eq!(board.flatten().side(), 8);
/// # Ok::<(), quadblock_engine::BlockError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    root: Block,
    palette: Palette,
}

impl Board {
    /// Generates a random board of side `size` that may be subdivided down to `max_depth`.
    ///
    /// The root starts as a single leaf of a random palette color and is smashed
    /// once; the smash keeps subdividing with a chance that decays with depth, so
    /// the result is an irregular tree. With `max_depth == 0` the board stays a
    /// single leaf.
    pub fn generate<R>(
        max_depth: u8,
        size: u32,
        palette: Palette,
        rng: &mut R,
    ) -> Result<Self, BlockError>
    where
        R: Rng + ?Sized,
    {
        let mut root = Block::new(Position::ORIGIN, size, palette.choose(rng), 0, max_depth)?;
        root.smash(&palette, rng);
        debug!(
            max_depth,
            size,
            leaves = root.blocks().filter(|b| b.is_leaf()).count(),
            "generated board"
        );
        Ok(Self { root, palette })
    }

    /// Wraps an existing block tree.
    #[must_use]
    pub fn from_root(root: Block, palette: Palette) -> Self {
        Self { root, palette }
    }

    #[must_use]
    pub fn root(&self) -> &Block {
        &self.root
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub fn max_depth(&self) -> u8 {
        self.root.max_depth()
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.root.size()
    }

    /// Resolves `selection` to a block, see [`Block::locate`].
    #[must_use]
    pub fn locate(&self, selection: Selection) -> Option<&Block> {
        self.root.locate(selection.point, selection.depth)
    }

    /// Rasterizes the whole board.
    #[must_use]
    pub fn flatten(&self) -> Grid {
        Grid::from_block(&self.root)
    }

    /// Applies `mv` to the selected block and returns whether it was performed.
    ///
    /// A move whose selection resolves to no block is not performed. `rng` is
    /// only drawn from when the move carries no seed of its own.
    pub fn apply<R>(&mut self, mv: &Move, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        let Some(block) = self.root.locate_mut(mv.target.point, mv.target.depth) else {
            return false;
        };
        let performed = match mv.seed {
            Some(seed) => block.apply(mv.action, &self.palette, &mut seed.rng()),
            None => block.apply(mv.action, &self.palette, rng),
        };
        debug_assert!(self.root.is_well_formed());
        performed
    }
}
