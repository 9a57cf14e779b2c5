//! Spatial data structures: colors, canvas geometry, the block tree and its rasterized grid.

pub use self::{block::*, color::*, geometry::*, grid::*};

pub(crate) mod block;
pub(crate) mod color;
pub(crate) mod geometry;
pub(crate) mod grid;
