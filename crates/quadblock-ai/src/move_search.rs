//! Move selection for computer players.
//!
//! Both strategies sample candidate moves the same way: a random depth in
//! `[0, max_depth]`, a random point on the canvas, the block found there, and
//! one of the seven transforms. A candidate only counts if simulating it on a
//! copy of that block reports it as performed. Smash candidates carry their own
//! seed, so the board a candidate was scored on is exactly the board it
//! produces when played.
//!
//! - [`random_move`] returns the first legal candidate.
//! - [`best_of_k_move`] scores `K` legal candidates on full board copies and
//!   keeps the best one only if it beats passing.
//!
//! Sampling is capped by [`SearchLimits`]; a search that runs out of attempts
//! passes.

use quadblock_engine::{Action, Board, Color, Move, Position, Selection};
use quadblock_evaluator::goal::Goal;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Bounds on how hard a search tries to find legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Sampling attempts allowed for each legal candidate.
    pub max_attempts: usize,
}

impl SearchLimits {
    pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Samples one candidate, returning it if it is legal.
fn sample_candidate<R>(board: &Board, paint_color: Color, rng: &mut R) -> Option<Move>
where
    R: Rng + ?Sized,
{
    let depth = rng.random_range(0..=board.max_depth());
    let point = Position::new(
        rng.random_range(0..board.size()),
        rng.random_range(0..board.size()),
    );
    let block = board.locate(Selection::new(point, depth))?;
    let action = Action::random_transform(paint_color, rng);
    let mut mv = Move::new(action, Selection::of(block));
    if action.is_smash() {
        mv = mv.with_seed(rng.random());
    }

    let mut simulated = block.clone();
    let performed = match mv.seed {
        Some(seed) => simulated.apply(action, board.palette(), &mut seed.rng()),
        None => simulated.apply(action, board.palette(), rng),
    };
    performed.then_some(mv)
}

/// Samples candidates until one is legal, giving up after `limits.max_attempts`.
pub fn random_legal_move<R>(
    board: &Board,
    paint_color: Color,
    limits: SearchLimits,
    rng: &mut R,
) -> Option<Move>
where
    R: Rng + ?Sized,
{
    let found = (0..limits.max_attempts).find_map(|_| sample_candidate(board, paint_color, rng));
    if found.is_none() {
        debug!(
            max_attempts = limits.max_attempts,
            "no legal move found within attempt limit"
        );
    }
    found
}

/// Picks a uniformly random legal move for `goal`'s owner, or passes if none
/// is found within `limits`.
///
/// The board itself is never modified.
///
/// # Example
///
/// ```
/// use quadblock_ai::move_search::{SearchLimits, random_move};
/// use quadblock_engine::{Board, BoardSeed, Palette};
/// use quadblock_evaluator::goal::BlobGoal;
///
/// let mut rng = BoardSeed::from(3).rng();
/// let mut board = Board::generate(3, 750, Palette::classic(), &mut rng)?;
/// let goal = BlobGoal::new(board.palette().colors()[0]);
///
/// let mv = random_move(&board, &goal, SearchLimits::default(), &mut rng);
/// assert!(board.apply(&mv, &mut rng));
/// # Ok::<(), quadblock_engine::BlockError>(())
/// ```
pub fn random_move<R>(board: &Board, goal: &dyn Goal, limits: SearchLimits, rng: &mut R) -> Move
where
    R: Rng + ?Sized,
{
    let mv = random_legal_move(board, goal.color(), limits, rng).unwrap_or_else(Move::pass);
    debug!(%mv, "random move");
    mv
}

/// Scores `difficulty` random legal moves and returns the best one if it
/// strictly improves on the current score, otherwise passes.
///
/// Each candidate is applied to its own copy of the board. Among candidates
/// with equal scores the first one wins.
pub fn best_of_k_move<R>(
    board: &Board,
    goal: &dyn Goal,
    difficulty: usize,
    limits: SearchLimits,
    rng: &mut R,
) -> Move
where
    R: Rng + ?Sized,
{
    let current = goal.score(board.root());
    let mut best: Option<(usize, Move)> = None;

    for _ in 0..difficulty {
        let Some(candidate) = random_legal_move(board, goal.color(), limits, rng) else {
            break;
        };
        let mut simulated = board.clone();
        simulated.apply(&candidate, rng);
        let score = goal.score(simulated.root());
        trace!(%candidate, score, "scored candidate");
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, candidate));
        }
    }

    let mv = match best {
        Some((score, mv)) if score > current => mv,
        _ => Move::pass(),
    };
    debug!(%mv, current, difficulty, "best-of-k move");
    mv
}
