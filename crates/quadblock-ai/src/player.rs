use std::iter;

use quadblock_engine::{Action, Block, Board, Move, Palette, Position, Selection};
use quadblock_evaluator::{
    goal::{BoxedGoal, Goal, GoalKind},
    goal_assignment::{GoalAssignmentError, generate_goals, generate_goals_of_kind},
};
use rand::Rng;

use crate::move_search::{SearchLimits, best_of_k_move, random_move};

/// The selection and action a human has entered so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HumanIntent {
    selection: Option<Selection>,
    action: Option<Action>,
}

impl HumanIntent {
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    #[must_use]
    pub fn action(&self) -> Option<Action> {
        self.action
    }

    /// Yields a move once both parts are present.
    ///
    /// The action is consumed, the selection stays so the next move can target
    /// the same block.
    fn take_move(&mut self) -> Option<Move> {
        let selection = self.selection?;
        let action = self.action.take()?;
        Some(Move::new(action, selection))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum PlayerKind {
    #[display("human")]
    Human(HumanIntent),
    #[display("random")]
    Random,
    #[display("smart (difficulty {difficulty})")]
    Smart { difficulty: usize },
}

#[derive(Debug)]
pub struct Player {
    id: usize,
    goal: BoxedGoal,
    kind: PlayerKind,
}

impl Player {
    #[must_use]
    pub fn new(id: usize, goal: BoxedGoal, kind: PlayerKind) -> Self {
        Self { id, goal, kind }
    }

    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn goal(&self) -> &dyn Goal {
        &*self.goal
    }

    #[must_use]
    pub fn kind(&self) -> &PlayerKind {
        &self.kind
    }

    /// Score of this player's goal on `board`.
    #[must_use]
    pub fn score(&self, board: &Board) -> usize {
        self.goal.score(board.root())
    }

    /// The block a human has selected, if any. Computer players select nothing.
    #[must_use]
    pub fn selected_block<'a>(&self, board: &'a Board) -> Option<&'a Block> {
        match &self.kind {
            PlayerKind::Human(intent) => board.locate(intent.selection?),
            PlayerKind::Random | PlayerKind::Smart { .. } => None,
        }
    }

    /// Records the block a human pointed at. Returns `false` for computer players.
    pub fn select(&mut self, point: Position, depth: u8) -> bool {
        let PlayerKind::Human(intent) = &mut self.kind else {
            return false;
        };
        intent.selection = Some(Selection::new(point, depth));
        true
    }

    /// Records the action a human chose. Returns `false` for computer players.
    pub fn set_action(&mut self, action: Action) -> bool {
        let PlayerKind::Human(intent) = &mut self.kind else {
            return false;
        };
        intent.action = Some(action);
        true
    }

    /// The move this player makes now.
    ///
    /// Computer players always produce a move (possibly a pass). Humans produce
    /// one only after both a selection and an action were entered.
    pub fn next_move<R>(&mut self, board: &Board, limits: SearchLimits, rng: &mut R) -> Option<Move>
    where
        R: Rng + ?Sized,
    {
        match &mut self.kind {
            PlayerKind::Human(intent) => intent.take_move(),
            PlayerKind::Random => Some(random_move(board, &*self.goal, limits, rng)),
            PlayerKind::Smart { difficulty } => Some(best_of_k_move(
                board,
                &*self.goal,
                *difficulty,
                limits,
                rng,
            )),
        }
    }
}

fn player_kinds(num_human: usize, num_random: usize, smart_difficulties: &[usize]) -> Vec<PlayerKind> {
    iter::repeat_n(PlayerKind::Human(HumanIntent::default()), num_human)
        .chain(iter::repeat_n(PlayerKind::Random, num_random))
        .chain(
            smart_difficulties
                .iter()
                .map(|&difficulty| PlayerKind::Smart { difficulty }),
        )
        .collect()
}

fn seat_players(kinds: Vec<PlayerKind>, goals: Vec<BoxedGoal>) -> Vec<Player> {
    goals
        .into_iter()
        .zip(kinds)
        .enumerate()
        .map(|(id, (goal, kind))| Player::new(id, goal, kind))
        .collect()
}

/// Creates the players of a game: humans first, then random players, then
/// smart players with the given difficulties, numbered from 0 in that order.
///
/// # Errors
///
/// Fails if the palette has fewer colors than there are players.
pub fn create_players<R>(
    num_human: usize,
    num_random: usize,
    smart_difficulties: &[usize],
    palette: &Palette,
    rng: &mut R,
) -> Result<Vec<Player>, GoalAssignmentError>
where
    R: Rng + ?Sized,
{
    let kinds = player_kinds(num_human, num_random, smart_difficulties);
    let goals = generate_goals(kinds.len(), palette, rng)?;
    Ok(seat_players(kinds, goals))
}

/// Like [`create_players`], with every goal of `goal_kind`.
///
/// # Errors
///
/// Fails if the palette has fewer colors than there are players.
pub fn create_players_with_goal_kind<R>(
    goal_kind: GoalKind,
    num_human: usize,
    num_random: usize,
    smart_difficulties: &[usize],
    palette: &Palette,
    rng: &mut R,
) -> Result<Vec<Player>, GoalAssignmentError>
where
    R: Rng + ?Sized,
{
    let kinds = player_kinds(num_human, num_random, smart_difficulties);
    let goals = generate_goals_of_kind(goal_kind, kinds.len(), palette, rng)?;
    Ok(seat_players(kinds, goals))
}
