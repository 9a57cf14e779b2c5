//! Hands out one goal per player.
//!
//! All goals of a game share one [`GoalKind`] and each player gets a distinct
//! target color, so a game needs at least as many palette colors as players.

use quadblock_engine::Palette;
use rand::{Rng, seq::SliceRandom as _};

use crate::goal::{BoxedGoal, GoalKind};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GoalAssignmentError {
    #[display("cannot assign {requested} distinct goal colors from a palette of {available}")]
    PaletteExhausted { requested: usize, available: usize },
}

/// Generates `count` goals of a randomly chosen kind, each with a distinct
/// palette color.
///
/// # Errors
///
/// Returns [`GoalAssignmentError::PaletteExhausted`] if `count` exceeds the
/// number of palette colors.
pub fn generate_goals<R>(
    count: usize,
    palette: &Palette,
    rng: &mut R,
) -> Result<Vec<BoxedGoal>, GoalAssignmentError>
where
    R: Rng + ?Sized,
{
    let kind: GoalKind = rng.random();
    generate_goals_of_kind(kind, count, palette, rng)
}

/// Generates `count` goals of `kind`, each with a distinct palette color.
///
/// # Errors
///
/// Returns [`GoalAssignmentError::PaletteExhausted`] if `count` exceeds the
/// number of palette colors.
pub fn generate_goals_of_kind<R>(
    kind: GoalKind,
    count: usize,
    palette: &Palette,
    rng: &mut R,
) -> Result<Vec<BoxedGoal>, GoalAssignmentError>
where
    R: Rng + ?Sized,
{
    if count > palette.len() {
        return Err(GoalAssignmentError::PaletteExhausted {
            requested: count,
            available: palette.len(),
        });
    }
    let mut colors = palette.colors().to_vec();
    colors.shuffle(rng);
    Ok(colors
        .into_iter()
        .take(count)
        .map(|color| kind.new_goal(color))
        .collect())
}
