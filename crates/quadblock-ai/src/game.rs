use chrono::{DateTime, Utc};
use quadblock_engine::{Block, BlockError, Board, BoardSeed, Color, Move, Palette};
use quadblock_evaluator::{goal::GoalKind, goal_assignment::GoalAssignmentError};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    move_search::SearchLimits,
    player::{Player, create_players, create_players_with_goal_kind},
};

/// Setup of one game.
///
/// Missing fields take their defaults when deserialized, so a config file
/// only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_depth: u8,
    pub size: u32,
    /// Rounds to play; every player moves once per round.
    pub max_turns: usize,
    pub num_human: usize,
    pub num_random: usize,
    pub smart_difficulties: Vec<usize>,
    /// Goal kind shared by all players, drawn at random when unset.
    pub goal_kind: Option<GoalKind>,
    pub palette: Palette,
    pub search_limits: SearchLimits,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            size: 750,
            max_turns: 10,
            num_human: 0,
            num_random: 1,
            smart_difficulties: vec![5],
            goal_kind: None,
            palette: Palette::classic(),
            search_limits: SearchLimits::default(),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.num_human + self.num_random + self.smart_difficulties.len()
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum GameError {
    #[display("failed to generate board: {_0}")]
    #[from]
    Board(BlockError),
    #[display("failed to assign goals: {_0}")]
    #[from]
    Goals(GoalAssignmentError),
    #[display("a game needs at least one player")]
    NoPlayers,
    #[display("player {player} is waiting for human input")]
    AwaitingHuman { player: usize },
}

/// Per-player move counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStats {
    pub performed: usize,
    pub passed: usize,
}

/// What happened when a player submitted a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub player: usize,
    pub mv: Move,
    pub performed: bool,
}

/// A turn-based game: one board, players taking turns in id order.
///
/// All randomness (board, goals, computer moves, smash colors) comes from
/// one generator seeded by [`BoardSeed`], so a seed and a config replay the
/// same game.
///
/// # Example
///
/// ```
/// use quadblock_ai::game::{Game, GameConfig};
/// use quadblock_engine::BoardSeed;
///
/// let game = Game::new(GameConfig::default(), BoardSeed::from(12))?;
/// let report = game.play()?;
///
/// assert_eq!(report.turns, 10);
/// assert_eq!(report.players.len(), 2);
/// # Ok::<(), quadblock_ai::game::GameError>(())
/// ```
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    seed: BoardSeed,
    rng: Pcg32,
    board: Board,
    players: Vec<Player>,
    stats: Vec<MoveStats>,
    current: usize,
    turn: usize,
}

impl Game {
    /// Generates the board and players for `config`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid board size or depth, when there are no players,
    /// or when the palette has fewer colors than players.
    pub fn new(config: GameConfig, seed: BoardSeed) -> Result<Self, GameError> {
        if config.num_players() == 0 {
            return Err(GameError::NoPlayers);
        }
        let mut rng = seed.rng();
        let board = Board::generate(
            config.max_depth,
            config.size,
            config.palette.clone(),
            &mut rng,
        )?;
        let players = match config.goal_kind {
            Some(kind) => create_players_with_goal_kind(
                kind,
                config.num_human,
                config.num_random,
                &config.smart_difficulties,
                &config.palette,
                &mut rng,
            )?,
            None => create_players(
                config.num_human,
                config.num_random,
                &config.smart_difficulties,
                &config.palette,
                &mut rng,
            )?,
        };
        for player in &players {
            info!(
                player = player.id(),
                kind = %player.kind(),
                goal = %player.goal().description(),
                "player joined"
            );
        }
        let stats = vec![MoveStats::default(); players.len()];
        Ok(Self {
            config,
            seed,
            rng,
            board,
            players,
            stats,
            current: 0,
            turn: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> BoardSeed {
        self.seed
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// The player whose turn it is, for feeding human intents.
    pub fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.current]
    }

    /// Completed rounds.
    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.turn >= self.config.max_turns
    }

    /// Lets the current player move.
    ///
    /// Returns `None` if the game is over or a human has not finished entering
    /// a move. A move that is not performed keeps the turn with the same
    /// player; otherwise play passes to the next player.
    pub fn step(&mut self) -> Option<MoveOutcome> {
        if self.is_over() {
            return None;
        }
        let player = &mut self.players[self.current];
        let mv = player.next_move(&self.board, self.config.search_limits, &mut self.rng)?;
        let performed = self.board.apply(&mv, &mut self.rng);
        let outcome = MoveOutcome {
            player: player.id(),
            mv,
            performed,
        };
        debug!(turn = self.turn, player = outcome.player, %mv, performed, "move");
        if !performed {
            return Some(outcome);
        }

        let stats = &mut self.stats[self.current];
        if mv.action.is_pass() {
            stats.passed += 1;
        } else {
            stats.performed += 1;
        }
        self.current += 1;
        if self.current == self.players.len() {
            self.current = 0;
            self.turn += 1;
            debug!(turn = self.turn, scores = ?self.scores(), "round finished");
        }
        Some(outcome)
    }

    /// Current score of every player, indexed by id.
    #[must_use]
    pub fn scores(&self) -> Vec<usize> {
        self.players.iter().map(|p| p.score(&self.board)).collect()
    }

    /// Ids of the players with the highest score.
    #[must_use]
    pub fn winners(&self) -> Vec<usize> {
        let scores = self.scores();
        let best = scores.iter().copied().max().unwrap_or(0);
        scores
            .iter()
            .enumerate()
            .filter(|&(_, &score)| score == best)
            .map(|(id, _)| id)
            .collect()
    }

    /// Plays until the last round and reports the result.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::AwaitingHuman`] if a human player is due to move,
    /// since nobody can enter their moves here.
    pub fn play(mut self) -> Result<GameReport, GameError> {
        while !self.is_over() {
            if self.step().is_none() {
                return Err(GameError::AwaitingHuman {
                    player: self.current,
                });
            }
        }
        let report = self.report();
        info!(winners = ?report.winners, "game finished");
        Ok(report)
    }

    #[must_use]
    pub fn report(&self) -> GameReport {
        let players = self
            .players
            .iter()
            .zip(&self.stats)
            .map(|(player, stats)| PlayerReport {
                id: player.id(),
                kind: player.kind().to_string(),
                goal_kind: player.goal().kind(),
                color: player.goal().color(),
                goal: player.goal().description(),
                score: player.score(&self.board),
                moves: *stats,
            })
            .collect();
        GameReport {
            played_at: Utc::now(),
            seed: self.seed,
            config: self.config.clone(),
            turns: self.turn,
            players,
            winners: self.winners(),
            board: self.board.root().clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    pub id: usize,
    pub kind: String,
    pub goal_kind: GoalKind,
    pub color: Color,
    pub goal: String,
    pub score: usize,
    pub moves: MoveStats,
}

/// Final state of a game, written as JSON by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub played_at: DateTime<Utc>,
    pub seed: BoardSeed,
    pub config: GameConfig,
    pub turns: usize,
    pub players: Vec<PlayerReport>,
    pub winners: Vec<usize>,
    pub board: Block,
}
