//! Players and game flow for quadblock.
//!
//! - [`move_search`] - How computer players pick moves: uniformly random
//!   legal moves, or the best of `K` simulated candidates.
//! - [`player`] - Human, random and smart players, each owning a goal.
//! - [`game`] - A seeded, turn-based game over one board, ending in a
//!   serializable [`game::GameReport`].

pub mod game;
pub mod move_search;
pub mod player;
