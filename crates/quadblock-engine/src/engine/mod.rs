//! Game board logic built on the core block tree.
//!
//! This module turns the core data structures into a playable board:
//!
//! - [`Board`] - Block tree plus palette, generation and move application
//! - [`Move`] - An [`Action`] applied to a [`Selection`]
//! - [`Selection`] - Point-and-depth address of a block, stable across copies
//! - [`BoardSeed`] - Seed for deterministic boards and computer moves
//!
//! # Move Flow
//!
//! 1. Generate a [`Board`] from a seeded random number generator
//! 2. A player picks a [`Move`] (human intent or move search)
//! 3. [`Board::apply`] resolves the selection and runs the block operation
//! 4. The returned flag tells whether the move was legal and performed
//!
//! # Example
//!
//! ```
//! use quadblock_engine::{Action, Board, BoardSeed, Move, Palette, Position, Rotation, Selection};
//!
//! let mut rng = BoardSeed::from(1).rng();
//! let mut board = Board::generate(2, 512, Palette::classic(), &mut rng)?;
//!
//! // The root of a generated board with positive depth is always split
//! let mv = Move::new(
//!     Action::Rotate(Rotation::Clockwise),
//!     Selection::new(Position::ORIGIN, 0),
//! );
//! assert!(board.apply(&mv, &mut rng));
//! # Ok::<(), quadblock_engine::BlockError>(())
//! ```

pub use self::{action::*, board::*, board_seed::*};

mod action;
mod board;
mod board_seed;
