pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BlockError {
    #[display("block size must be positive")]
    ZeroSize,
    #[display("block depth {depth} exceeds maximum depth {max_depth}")]
    DepthExceedsMax { depth: u8, max_depth: u8 },
    #[display("maximum depth {max_depth} exceeds the supported limit {}", crate::Block::DEPTH_LIMIT)]
    DepthTooLarge { max_depth: u8 },
    #[display("block size {size} is too small to split {levels} times")]
    SizeTooSmall { size: u32, levels: u8 },
}
