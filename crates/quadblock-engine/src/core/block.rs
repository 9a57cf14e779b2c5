use std::fmt;

use arrayvec::ArrayVec;
use rand::Rng;
use serde::Serialize;

use crate::BlockError;

use super::{
    color::{Color, Palette},
    geometry::{Position, Quadrant, Rotation, SwapAxis, child_size},
};

/// Decay rate of the chance that a freshly smashed child is smashed again.
const SMASH_DECAY_RATE: f64 = 0.25;

/// Probability that a new child at `depth` keeps subdividing while a board is smashed.
fn smash_again_probability(depth: u8) -> f64 {
    (-SMASH_DECAY_RATE * f64::from(depth)).exp()
}

/// One square region of the canvas, recursively subdivided into four children.
///
/// A block is either a leaf filled with a single [`Color`], or split into exactly
/// four children of half its size stored in [`Quadrant`] order (upper-right,
/// upper-left, lower-left, lower-right). Children carry absolute canvas
/// coordinates; geometry is always pushed down from parent to children and no
/// child knows its parent.
///
/// # Invariants
///
/// Every public operation preserves the following:
///
/// - a block has either a color or four children, never both
/// - children have `size == child_size(parent.size)`, `depth == parent.depth + 1`,
///   the parent's `max_depth`, and the position of their quadrant
/// - `depth <= max_depth` everywhere
///
/// Structural operations check their preconditions and return `false` without
/// touching the block when they do not apply, so speculative moves never need
/// error handling.
///
/// # Example
///
/// ```
/// use quadblock_engine::{Block, Color, Position, Rotation};
///
/// let mut block = Block::new(Position::ORIGIN, 8, Color::BLACK, 0, 1)?;
/// assert!(block.subdivide_with([Color::REAL_RED, Color::BLACK, Color::BLACK, Color::WHITE]));
///
/// let before = block.clone();
/// for _ in 0..4 {
///     assert!(block.rotate(Rotation::Clockwise));
/// }
/// assert_eq!(block, before);
/// # Ok::<(), quadblock_engine::BlockError>(())
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Block {
    position: Position,
    size: u32,
    depth: u8,
    max_depth: u8,
    content: BlockContent,
}

/// What fills a block: a color, or four children.
#[derive(Debug, Clone, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum BlockContent {
    Leaf(Color),
    Split(Box<[Block; 4]>),
}

/// Whether a block of side `size` can be split `levels` times with every
/// descendant's corner still inside it.
///
/// Rounding halves up makes children overhang, and the corner of the
/// lower-right-most descendant drifts right by one child size per level.
fn fits_levels(size: u32, levels: u8) -> bool {
    let mut child = size;
    let mut corner = 0_u64;
    for _ in 0..levels {
        child = child_size(child);
        corner += u64::from(child);
    }
    corner < u64::from(size)
}

impl Block {
    /// Largest supported `max_depth`. A board rasterizes to a grid of side
    /// `2^max_depth`.
    pub const DEPTH_LIMIT: u8 = 10;

    /// Creates a leaf block.
    ///
    /// Fails when `size` is zero, `depth` exceeds `max_depth`, `max_depth`
    /// exceeds [`Block::DEPTH_LIMIT`], or `size` is too small for the
    /// descendants down to `max_depth` to keep their corners inside the block
    /// (which would leave them unreachable by [`Block::locate`]).
    pub fn new(
        position: Position,
        size: u32,
        color: Color,
        depth: u8,
        max_depth: u8,
    ) -> Result<Self, BlockError> {
        if size == 0 {
            return Err(BlockError::ZeroSize);
        }
        if max_depth > Self::DEPTH_LIMIT {
            return Err(BlockError::DepthTooLarge { max_depth });
        }
        if depth > max_depth {
            return Err(BlockError::DepthExceedsMax { depth, max_depth });
        }
        let levels = max_depth - depth;
        if !fits_levels(size, levels) {
            return Err(BlockError::SizeTooSmall { size, levels });
        }
        Ok(Self {
            position,
            size,
            depth,
            max_depth,
            content: BlockContent::Leaf(color),
        })
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[must_use]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    #[must_use]
    pub fn content(&self) -> &BlockContent {
        &self.content
    }

    /// Returns the color of a leaf, or `None` for a split block.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match self.content {
            BlockContent::Leaf(color) => Some(color),
            BlockContent::Split(_) => None,
        }
    }

    /// Returns the four children of a split block, or `None` for a leaf.
    #[must_use]
    pub fn children(&self) -> Option<&[Block; 4]> {
        match &self.content {
            BlockContent::Leaf(_) => None,
            BlockContent::Split(children) => Some(children),
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.content.is_leaf()
    }

    /// Returns whether `point` lies inside this block.
    ///
    /// The top and left edges belong to the block, the bottom and right edges
    /// do not, so adjacent blocks never both contain a boundary point.
    #[must_use]
    pub fn contains(&self, point: Position) -> bool {
        let Position { x, y } = self.position;
        (x..x + self.size).contains(&point.x) && (y..y + self.size).contains(&point.y)
    }

    /// Returns this block and all its descendants, parents before children.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let block = stack.pop()?;
            if let BlockContent::Split(children) = &block.content {
                stack.extend(children.iter().rev());
            }
            Some(block)
        })
    }

    /// Returns whether the block tree satisfies all structural invariants.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        if self.size == 0 || self.depth > self.max_depth {
            return false;
        }
        let Some(children) = self.children() else {
            return true;
        };
        let size = child_size(self.size);
        Quadrant::ALL.into_iter().zip(children).all(|(quadrant, child)| {
            child.size == size
                && child.depth == self.depth + 1
                && child.max_depth == self.max_depth
                && child.position == quadrant.child_position(self.position, size)
                && child.is_well_formed()
        })
    }

    /// Finds the block at `depth` that contains `point`.
    ///
    /// When the tree is shallower than `depth` around `point`, the deepest block
    /// containing it is returned. Returns `None` when `point` lies outside this block.
    #[must_use]
    pub fn locate(&self, point: Position, depth: u8) -> Option<&Block> {
        if !self.contains(point) {
            return None;
        }
        if self.depth >= depth || self.is_leaf() {
            return Some(self);
        }
        match &self.content {
            BlockContent::Split(children) => children.iter().find_map(|c| c.locate(point, depth)),
            BlockContent::Leaf(_) => None,
        }
    }

    /// Like [`Self::locate`], but returns a mutable reference.
    pub fn locate_mut(&mut self, point: Position, depth: u8) -> Option<&mut Block> {
        if !self.contains(point) {
            return None;
        }
        if self.depth >= depth || self.is_leaf() {
            return Some(self);
        }
        match &mut self.content {
            BlockContent::Split(children) => children
                .iter_mut()
                .find_map(|c| c.locate_mut(point, depth)),
            BlockContent::Leaf(_) => None,
        }
    }

    /// Moves this block to `position`, carrying all descendants along.
    pub fn move_to(&mut self, position: Position) {
        self.position = position;
        let size = child_size(self.size);
        if let BlockContent::Split(children) = &mut self.content {
            for (quadrant, child) in Quadrant::ALL.into_iter().zip(children.iter_mut()) {
                child.move_to(quadrant.child_position(position, size));
            }
        }
    }

    /// Re-seats every child at the position of the slot it now occupies.
    fn reseat_children(&mut self) {
        self.move_to(self.position);
    }

    /// Returns whether the block can be subdivided.
    #[must_use]
    pub fn can_smash(&self) -> bool {
        self.is_leaf() && self.depth < self.max_depth
    }

    /// Subdivides a leaf into four leaves of the given colors, in quadrant order.
    ///
    /// Does nothing and returns `false` unless the block is a leaf above
    /// `max_depth`. Unlike [`Self::smash`], the new children are never subdivided further.
    pub fn subdivide_with(&mut self, colors: [Color; 4]) -> bool {
        if !self.can_smash() {
            return false;
        }
        let size = child_size(self.size);
        let children = Quadrant::ALL.map(|quadrant| Block {
            position: quadrant.child_position(self.position, size),
            size,
            depth: self.depth + 1,
            max_depth: self.max_depth,
            content: BlockContent::Leaf(colors[quadrant.index()]),
        });
        self.content = BlockContent::Split(Box::new(children));
        true
    }

    /// Subdivides a leaf into four randomly colored children.
    ///
    /// Each new child is then smashed again with probability `e^(-0.25 * depth)`,
    /// so the process recursively produces an irregular subtree that thins out
    /// with depth. Does nothing and returns `false` unless the block is a leaf
    /// above `max_depth`.
    pub fn smash<R>(&mut self, palette: &Palette, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        if !self.can_smash() {
            return false;
        }
        let colors = [(); 4].map(|()| palette.choose(rng));
        self.subdivide_with(colors);
        if let BlockContent::Split(children) = &mut self.content {
            for child in children.iter_mut() {
                if child.can_smash() && rng.random_bool(smash_again_probability(child.depth)) {
                    child.smash(palette, rng);
                }
            }
        }
        true
    }

    /// Turns a block at `max_depth - 1` into a leaf of its children's majority color.
    ///
    /// The majority must be strict: with a tie for the most frequent color
    /// (2-2, or 1-1-1-1) nothing happens and `false` is returned.
    pub fn combine(&mut self) -> bool {
        if self.max_depth.checked_sub(1) != Some(self.depth) {
            return false;
        }
        let BlockContent::Split(children) = &self.content else {
            return false;
        };
        let Some(color) = majority_color(children) else {
            return false;
        };
        self.content = BlockContent::Leaf(color);
        true
    }

    /// Rotates the children of this block, and recursively all their descendants.
    ///
    /// Returns `false` for a leaf.
    pub fn rotate(&mut self, rotation: Rotation) -> bool {
        let BlockContent::Split(children) = &mut self.content else {
            return false;
        };
        match rotation {
            // The upper-left child moves to the upper-right slot, and so on around.
            Rotation::Clockwise => children.rotate_left(1),
            Rotation::CounterClockwise => children.rotate_right(1),
        }
        for child in children.iter_mut() {
            child.rotate(rotation);
        }
        self.reseat_children();
        true
    }

    /// Mirrors the children of this block across `axis`.
    ///
    /// Only the direct children trade places; their own subtrees keep their
    /// internal arrangement. Returns `false` for a leaf.
    pub fn swap(&mut self, axis: SwapAxis) -> bool {
        let BlockContent::Split(children) = &mut self.content else {
            return false;
        };
        match axis {
            SwapAxis::Horizontal => {
                children.swap(0, 1);
                children.swap(2, 3);
            }
            SwapAxis::Vertical => {
                children.swap(0, 3);
                children.swap(1, 2);
            }
        }
        self.reseat_children();
        true
    }

    /// Recolors a leaf at `max_depth`.
    ///
    /// Returns `true` only when the color actually changed.
    pub fn paint(&mut self, color: Color) -> bool {
        if self.depth != self.max_depth {
            return false;
        }
        match &mut self.content {
            BlockContent::Leaf(current) if *current != color => {
                *current = color;
                true
            }
            _ => false,
        }
    }
}

/// Returns the color held by strictly more children than any other color.
fn majority_color(children: &[Block; 4]) -> Option<Color> {
    let mut counts = ArrayVec::<(Color, usize), 4>::new();
    for color in children.iter().filter_map(Block::color) {
        match counts.iter_mut().find(|(c, _)| *c == color) {
            Some((_, count)) => *count += 1,
            None => counts.push((color, 1)),
        }
    }
    let max = counts.iter().map(|(_, count)| *count).max()?;
    let mut winners = counts.iter().filter(|(_, count)| *count == max);
    let (color, _) = *winners.next()?;
    winners.next().is_none().then_some(color)
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        match (&self.content, &other.content) {
            (BlockContent::Leaf(a), BlockContent::Leaf(b)) => {
                a == b
                    && self.position == other.position
                    && self.size == other.size
                    && self.depth == other.depth
                    && self.max_depth == other.max_depth
            }
            (BlockContent::Split(a), BlockContent::Split(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Block {}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = "\t".repeat(usize::from(self.depth));
        let Position { x, y } = self.position;
        match &self.content {
            BlockContent::Leaf(color) => writeln!(
                f,
                "{indent}Leaf: color={color}, pos=({x}, {y}), size={}, depth={}",
                self.size, self.depth
            ),
            BlockContent::Split(children) => {
                writeln!(
                    f,
                    "{indent}Parent: pos=({x}, {y}), size={}, depth={}",
                    self.size, self.depth
                )?;
                children.iter().try_for_each(|child| write!(f, "{child}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    const R: Color = Color::REAL_RED;
    const G: Color = Color::OLD_OLIVE;
    const B: Color = Color::PACIFIC_POINT;
    const Y: Color = Color::DAFFODIL_DELIGHT;

    fn leaf(size: u32, max_depth: u8) -> Block {
        Block::new(Position::ORIGIN, size, B, 0, max_depth).unwrap()
    }

    /// A depth-2 tree whose upper-left child is split further.
    fn two_level() -> Block {
        let mut block = leaf(16, 2);
        assert!(block.subdivide_with([R, G, B, Y]));
        let upper_left = block.locate_mut(Position::new(0, 0), 1).unwrap();
        assert!(upper_left.subdivide_with([Y, B, G, R]));
        block
    }

    fn child_colors(block: &Block) -> [Option<Color>; 4] {
        block.children().unwrap().each_ref().map(Block::color)
    }

    #[test]
    fn test_new_rejects_malformed_arguments() {
        assert_eq!(
            Block::new(Position::ORIGIN, 0, R, 0, 2),
            Err(BlockError::ZeroSize)
        );
        assert_eq!(
            Block::new(Position::ORIGIN, 8, R, 3, 2),
            Err(BlockError::DepthExceedsMax {
                depth: 3,
                max_depth: 2
            })
        );
        assert!(Block::new(Position::new(4, 4), 8, R, 2, 2).is_ok());
    }

    #[test]
    fn test_new_rejects_depth_above_limit() {
        assert_eq!(
            Block::new(Position::ORIGIN, u32::MAX, R, 0, 64),
            Err(BlockError::DepthTooLarge { max_depth: 64 })
        );
        assert_eq!(
            Block::new(Position::ORIGIN, 4096, R, 0, Block::DEPTH_LIMIT + 1),
            Err(BlockError::DepthTooLarge { max_depth: 11 })
        );
        assert!(Block::new(Position::ORIGIN, 4096, R, 0, Block::DEPTH_LIMIT).is_ok());
    }

    #[test]
    fn test_new_rejects_size_leaving_blocks_outside() {
        // Size 3 splits into children of 2, grandchildren of 1 at x = 2 + 1.
        assert_eq!(
            Block::new(Position::ORIGIN, 3, R, 0, 2),
            Err(BlockError::SizeTooSmall { size: 3, levels: 2 })
        );
        assert!(Block::new(Position::ORIGIN, 3, R, 0, 1).is_ok());
        // 2^max_depth alone is not enough: 5 -> 3 -> 2 puts a corner at x = 5.
        assert!(Block::new(Position::ORIGIN, 5, R, 0, 2).is_err());
        assert!(Block::new(Position::ORIGIN, 6, R, 0, 2).is_ok());
        // 750 halves to a corner at 751 on the ninth level.
        assert!(Block::new(Position::ORIGIN, 750, R, 0, 8).is_ok());
        assert_eq!(
            Block::new(Position::ORIGIN, 750, R, 0, 9),
            Err(BlockError::SizeTooSmall {
                size: 750,
                levels: 9
            })
        );
        // Only the levels below the block's own depth count.
        assert!(Block::new(Position::new(1, 1), 1, R, 2, 2).is_ok());
    }

    #[test]
    fn test_accepted_sizes_keep_every_block_reachable() {
        for (size, max_depth) in [(6, 2), (12, 3), (100, 5), (750, 8)] {
            let mut block = leaf(size, max_depth);
            loop {
                let splittable: Vec<_> = block
                    .blocks()
                    .filter(|b| b.can_smash())
                    .map(|b| (b.position(), b.depth()))
                    .collect();
                if splittable.is_empty() {
                    break;
                }
                for (position, depth) in splittable {
                    let target = block.locate_mut(position, depth).unwrap();
                    assert!(target.subdivide_with([R, G, B, Y]));
                }
            }
            for b in block.blocks() {
                assert!(b.position().x < size && b.position().y < size);
                let found = block.locate(b.position(), b.depth()).unwrap();
                assert_eq!((found.position(), found.depth()), (b.position(), b.depth()));
            }
        }
    }

    #[test]
    fn test_subdivide_with_geometry() {
        let mut block = Block::new(Position::new(10, 20), 750, R, 0, 3).unwrap();
        assert!(block.subdivide_with([R, G, B, Y]));
        assert!(block.color().is_none());
        assert!(block.is_well_formed());

        let children = block.children().unwrap();
        let positions = children.each_ref().map(Block::position);
        assert_eq!(
            positions,
            [
                Position::new(385, 20),
                Position::new(10, 20),
                Position::new(10, 395),
                Position::new(385, 395),
            ]
        );
        for child in children {
            assert_eq!(child.size(), 375);
            assert_eq!(child.depth(), 1);
            assert_eq!(child.max_depth(), 3);
        }
        assert_eq!(child_colors(&block), [Some(R), Some(G), Some(B), Some(Y)]);
    }

    #[test]
    fn test_subdivide_with_preconditions() {
        let mut at_max = Block::new(Position::ORIGIN, 8, R, 2, 2).unwrap();
        assert!(!at_max.subdivide_with([R, G, B, Y]));
        assert!(at_max.is_leaf());

        let mut split = two_level();
        let before = split.clone();
        assert!(!split.subdivide_with([R, R, R, R]));
        assert_eq!(split, before);
    }

    #[test]
    fn test_smash_is_deterministic_with_seed() {
        let palette = Palette::classic();
        let mut a = leaf(750, 4);
        let mut b = leaf(750, 4);
        assert!(a.smash(&palette, &mut Pcg32::seed_from_u64(42)));
        assert!(b.smash(&palette, &mut Pcg32::seed_from_u64(42)));
        assert_eq!(a, b);
        assert!(a.is_well_formed());
        assert!(
            a.blocks()
                .filter_map(Block::color)
                .all(|color| palette.contains(color))
        );
    }

    #[test]
    fn test_smash_respects_preconditions() {
        let palette = Palette::classic();
        let mut rng = Pcg32::seed_from_u64(1);

        let mut at_max = leaf(8, 0);
        assert!(!at_max.smash(&palette, &mut rng));
        assert!(at_max.is_leaf());

        let mut split = two_level();
        let before = split.clone();
        assert!(!split.smash(&palette, &mut rng));
        assert_eq!(split, before);
    }

    #[test]
    fn test_smash_never_exceeds_max_depth() {
        let palette = Palette::classic();
        for seed in 0..50 {
            let mut block = leaf(64, 3);
            block.smash(&palette, &mut Pcg32::seed_from_u64(seed));
            assert!(block.is_well_formed());
            assert!(block.blocks().all(|b| b.depth() <= 3));
            assert!(block.blocks().filter(|b| b.depth() == 3).all(Block::is_leaf));
        }
    }

    #[test]
    fn test_combine_strict_majority() {
        let mut block = leaf(8, 1);
        block.subdivide_with([R, R, G, R]);
        assert!(block.combine());
        assert_eq!(block.color(), Some(R));
        assert!(block.is_well_formed());

        let mut block = leaf(8, 1);
        block.subdivide_with([R, G, R, B]);
        assert!(block.combine());
        assert_eq!(block.color(), Some(R));
    }

    #[test]
    fn test_combine_tie_is_noop() {
        for colors in [[R, G, R, G], [R, G, B, Y]] {
            let mut block = leaf(8, 1);
            block.subdivide_with(colors);
            let before = block.clone();
            assert!(!block.combine());
            assert_eq!(block, before);
        }
    }

    #[test]
    fn test_combine_requires_split_block_above_max_depth() {
        // Leaf
        let mut block = leaf(8, 1);
        assert!(!block.combine());
        assert!(block.is_leaf());

        // Split, but not at max_depth - 1
        let mut block = two_level();
        let before = block.clone();
        assert!(!block.combine());
        assert_eq!(block, before);

        // Root with max_depth 0
        let mut block = leaf(8, 0);
        assert!(!block.combine());
    }

    #[test]
    fn test_rotate_clockwise_moves_upper_left_to_upper_right() {
        let mut block = leaf(8, 1);
        block.subdivide_with([R, G, B, Y]);
        assert!(block.rotate(Rotation::Clockwise));
        assert_eq!(child_colors(&block), [Some(G), Some(B), Some(Y), Some(R)]);
        assert!(block.is_well_formed());

        let mut block = leaf(8, 1);
        block.subdivide_with([R, G, B, Y]);
        assert!(block.rotate(Rotation::CounterClockwise));
        assert_eq!(child_colors(&block), [Some(Y), Some(R), Some(G), Some(B)]);
        assert!(block.is_well_formed());
    }

    #[test]
    fn test_rotate_recurses_into_descendants() {
        let mut block = two_level();
        assert!(block.rotate(Rotation::Clockwise));
        assert!(block.is_well_formed());

        // The split upper-left child now sits in the upper-right slot, rotated as well.
        let moved = &block.children().unwrap()[Quadrant::UpperRight.index()];
        assert_eq!(moved.position(), Position::new(8, 0));
        assert_eq!(child_colors(moved), [Some(B), Some(G), Some(R), Some(Y)]);
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        let palette = Palette::classic();
        for seed in 0..20 {
            let mut block = leaf(256, 4);
            block.smash(&palette, &mut Pcg32::seed_from_u64(seed));
            let before = block.clone();
            for rotation in [Rotation::Clockwise, Rotation::CounterClockwise] {
                for _ in 0..4 {
                    assert!(block.rotate(rotation));
                }
                assert_eq!(block, before);
            }
            assert!(block.rotate(Rotation::Clockwise));
            assert!(block.rotate(Rotation::CounterClockwise));
            assert_eq!(block, before);
        }
    }

    #[test]
    fn test_rotate_and_swap_on_leaf_fail() {
        let mut block = leaf(8, 2);
        assert!(!block.rotate(Rotation::Clockwise));
        assert!(!block.swap(SwapAxis::Horizontal));
        assert!(!block.swap(SwapAxis::Vertical));
        assert_eq!(block, leaf(8, 2));
    }

    #[test]
    fn test_swap_horizontal_and_vertical() {
        let mut block = leaf(8, 1);
        block.subdivide_with([R, G, B, Y]);
        assert!(block.swap(SwapAxis::Horizontal));
        assert_eq!(child_colors(&block), [Some(G), Some(R), Some(Y), Some(B)]);
        assert!(block.is_well_formed());

        let mut block = leaf(8, 1);
        block.subdivide_with([R, G, B, Y]);
        assert!(block.swap(SwapAxis::Vertical));
        assert_eq!(child_colors(&block), [Some(Y), Some(B), Some(G), Some(R)]);
        assert!(block.is_well_formed());
    }

    #[test]
    fn test_swap_does_not_rearrange_grandchildren() {
        let mut block = two_level();
        assert!(block.swap(SwapAxis::Horizontal));
        let moved = &block.children().unwrap()[Quadrant::UpperRight.index()];
        assert_eq!(moved.position(), Position::new(8, 0));
        assert_eq!(child_colors(moved), [Some(Y), Some(B), Some(G), Some(R)]);
        assert!(block.is_well_formed());
    }

    #[test]
    fn test_swap_twice_is_identity() {
        let palette = Palette::classic();
        for seed in 0..20 {
            let mut block = leaf(256, 4);
            block.smash(&palette, &mut Pcg32::seed_from_u64(seed));
            let before = block.clone();
            for axis in [SwapAxis::Horizontal, SwapAxis::Vertical] {
                assert!(block.swap(axis));
                assert!(block.swap(axis));
                assert_eq!(block, before);
            }
        }
    }

    #[test]
    fn test_paint() {
        let mut block = Block::new(Position::ORIGIN, 8, R, 1, 1).unwrap();
        assert!(!block.paint(R));
        assert!(block.paint(G));
        assert_eq!(block.color(), Some(G));

        // Leaf above max depth
        let mut block = leaf(8, 1);
        assert!(!block.paint(G));
        assert_eq!(block.color(), Some(B));

        // Split block
        let mut block = two_level();
        assert!(!block.paint(G));
    }

    #[test]
    fn test_move_to_shifts_descendants() {
        let mut block = two_level();
        block.move_to(Position::new(100, 50));
        assert_eq!(block.position(), Position::new(100, 50));
        assert!(block.is_well_formed());
        let deepest = block.locate(Position::new(100, 50), 2).unwrap();
        assert_eq!(deepest.position(), Position::new(100, 50));
        assert_eq!(deepest.depth(), 2);
    }

    #[test]
    fn test_locate_half_open_edges() {
        let block = two_level();

        // Boundary between upper-left and upper-right children belongs to the right one.
        let found = block.locate(Position::new(8, 0), 1).unwrap();
        assert_eq!(found.position(), Position::new(8, 0));
        let found = block.locate(Position::new(7, 7), 1).unwrap();
        assert_eq!(found.position(), Position::new(0, 0));

        // Bottom and right canvas edges are outside.
        assert!(block.locate(Position::new(16, 0), 0).is_none());
        assert!(block.locate(Position::new(0, 16), 1).is_none());
        assert!(block.locate(Position::new(15, 15), 0).is_some());
    }

    #[test]
    fn test_locate_returns_deepest_available() {
        let block = two_level();

        // The lower-right child is a leaf at depth 1.
        let found = block.locate(Position::new(12, 12), 2).unwrap();
        assert_eq!(found.depth(), 1);
        assert_eq!(found.color(), Some(Y));

        // The upper-left child is split down to depth 2.
        let found = block.locate(Position::new(5, 5), 2).unwrap();
        assert_eq!(found.depth(), 2);
        assert_eq!(found.position(), Position::new(4, 4));
        assert_eq!(found.color(), Some(R));

        let root = block.locate(Position::new(5, 5), 0).unwrap();
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = two_level();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.rotate(Rotation::Clockwise);
        copy.locate_mut(Position::new(12, 12), 1)
            .unwrap()
            .subdivide_with([R, R, R, R]);
        assert_ne!(copy, original);
        assert_eq!(original, two_level());
    }

    #[test]
    fn test_equality_differs_on_arity() {
        let leaf_block = leaf(8, 1);
        let mut split = leaf(8, 1);
        split.subdivide_with([B, B, B, B]);
        assert_ne!(leaf_block, split);
        assert_ne!(split, leaf_block);
    }

    #[test]
    fn test_blocks_visits_every_node() {
        let block = two_level();
        assert_eq!(block.blocks().count(), 9);
        assert_eq!(block.blocks().filter(|b| b.is_leaf()).count(), 7);
        assert_eq!(block.blocks().next().unwrap().depth(), 0);
    }

    #[test]
    fn test_display() {
        let mut block = Block::new(Position::ORIGIN, 750, Color::BLACK, 0, 1).unwrap();
        assert_eq!(
            block.to_string(),
            "Leaf: color=Black, pos=(0, 0), size=750, depth=0\n"
        );

        block.subdivide_with([R, G, B, Y]);
        let text = block.to_string();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Parent: pos=(0, 0), size=750, depth=0")
        );
        assert_eq!(
            lines.next(),
            Some("\tLeaf: color=Real Red, pos=(375, 0), size=375, depth=1")
        );
        assert_eq!(lines.count(), 3);
    }
}
