use serde::{Deserialize, Serialize};

/// Canvas coordinates of a point or of a block's upper-left corner.
///
/// - (0, 0) is the upper-left corner of the canvas
/// - X increases rightward
/// - Y increases downward
///
/// Coordinates are unsigned, so a block can never sit at a negative position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for Position {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

/// Size of the children of a block of side `size`.
///
/// Halves are rounded half-up, so odd sides produce children that slightly
/// overhang the parent. Subdividing and repositioning both go through this
/// function, keeping geometry identical across repeated transforms.
#[must_use]
pub const fn child_size(size: u32) -> u32 {
    size.div_ceil(2)
}

/// Slot of a child within its parent, in child-index order.
///
/// The index order is fixed: upper-right, upper-left, lower-left, lower-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Quadrant {
    UpperRight = 0,
    UpperLeft = 1,
    LowerLeft = 2,
    LowerRight = 3,
}

impl Quadrant {
    /// All quadrants in child-index order.
    pub const ALL: [Self; 4] = [
        Self::UpperRight,
        Self::UpperLeft,
        Self::LowerLeft,
        Self::LowerRight,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Position of the child in this slot, given the parent's upper-left corner
    /// and the child side length.
    #[must_use]
    pub const fn child_position(self, parent: Position, child_size: u32) -> Position {
        let (dx, dy) = match self {
            Self::UpperRight => (child_size, 0),
            Self::UpperLeft => (0, 0),
            Self::LowerLeft => (0, child_size),
            Self::LowerRight => (child_size, child_size),
        };
        Position::new(parent.x + dx, parent.y + dy)
    }
}

/// Direction of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Rotation {
    #[display("clockwise")]
    Clockwise,
    #[display("counter-clockwise")]
    CounterClockwise,
}

impl Rotation {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// Axis a swap mirrors the children across.
///
/// - `Horizontal` exchanges left and right children
/// - `Vertical` exchanges diagonally opposite children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum SwapAxis {
    #[display("horizontally")]
    Horizontal,
    #[display("vertically")]
    Vertical,
}
