//! Goal evaluation for quadblock boards.
//!
//! A player wins by maximizing the score of their private goal. This crate has
//! two parts:
//!
//! 1. **Goals** ([`goal`]) - The [`goal::Goal`] trait and its two rules:
//!    perimeter coverage and largest connected blob. Both score the rasterized
//!    board, never the block tree directly.
//!
//! 2. **Goal Assignment** ([`goal_assignment`]) - Draws one goal kind per game
//!    and a distinct target color per player.
//!
//! # Architecture
//!
//! ```text
//! Board (block tree)
//!     ↓ Grid::from_block
//! Grid (unit cells)
//!     ↓ Goal::score_grid
//! Score
//! ```
//!
//! # Example
//!
//! ```
//! use quadblock_engine::{Board, BoardSeed, Palette};
//! use quadblock_evaluator::goal_assignment::generate_goals;
//!
//! let mut rng = BoardSeed::from(1).rng();
//! let board = Board::generate(3, 750, Palette::classic(), &mut rng)?;
//! let goals = generate_goals(2, board.palette(), &mut rng)?;
//!
//! for goal in &goals {
//!     let score = goal.score(board.root());
//!     assert!(score <= 64);
//!     println!("{} => {score}", goal.description());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod goal;
pub mod goal_assignment;
