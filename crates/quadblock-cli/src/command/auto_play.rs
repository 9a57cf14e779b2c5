use std::path::PathBuf;

use anyhow::{Context, ensure};
use quadblock_ai::game::{Game, GameConfig};
use quadblock_engine::BoardSeed;
use quadblock_evaluator::goal::GoalKind;
use rand::Rng as _;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Game configuration file (JSON); the flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed as 32 hex characters (random if omitted)
    #[arg(long)]
    seed: Option<BoardSeed>,
    /// Deepest level blocks may be subdivided to
    #[arg(long)]
    max_depth: Option<u8>,
    /// Side length of the board
    #[arg(long)]
    size: Option<u32>,
    /// Number of rounds to play
    #[arg(long)]
    max_turns: Option<usize>,
    /// Number of players making random moves
    #[arg(long)]
    random_players: Option<usize>,
    /// Difficulty of each smart player, comma separated (e.g. `3,5`)
    #[arg(long, value_delimiter = ',')]
    smart: Option<Vec<usize>>,
    /// Goal kind shared by all players: `perimeter` or `blob`
    #[arg(long)]
    goal: Option<GoalKind>,
    /// Print the final block tree to stderr
    #[arg(long)]
    show_board: bool,
    /// Output file path for the game report
    #[arg(long)]
    output: Option<PathBuf>,
}

impl AutoPlayArg {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(max_turns) = self.max_turns {
            config.max_turns = max_turns;
        }
        if let Some(random_players) = self.random_players {
            config.num_random = random_players;
        }
        if let Some(smart) = &self.smart {
            config.smart_difficulties.clone_from(smart);
        }
        if let Some(goal) = self.goal {
            config.goal_kind = Some(goal);
        }
        ensure!(
            config.num_human == 0,
            "auto-play cannot read moves of human players (num_human = {})",
            config.num_human
        );
        Ok(config)
    }
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let config = arg.game_config()?;
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());

    eprintln!(
        "Playing {} rounds with {} players (seed: {seed})...",
        config.max_turns,
        config.num_players()
    );
    let game = Game::new(config, seed).context("Failed to set up game")?;
    let report = game.play().context("Game did not finish")?;

    for player in &report.players {
        eprintln!(
            "Player {} [{}, {}]: score {} ({} moves, {} passes)",
            player.id,
            player.kind,
            player.goal_kind,
            player.score,
            player.moves.performed,
            player.moves.passed,
        );
        eprintln!("  {}", player.goal);
    }
    let winners = report
        .winners
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    eprintln!("Winner: player {winners}");
    if arg.show_board {
        eprintln!();
        eprint!("{}", report.board);
    }

    Output::save_json(&report, arg.output.clone())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let arg = AutoPlayArg {
            max_turns: Some(4),
            smart: Some(vec![2, 9]),
            goal: Some(GoalKind::Perimeter),
            ..AutoPlayArg::default()
        };
        let config = arg.game_config().unwrap();
        assert_eq!(
            config,
            GameConfig {
                max_turns: 4,
                smart_difficulties: vec![2, 9],
                goal_kind: Some(GoalKind::Perimeter),
                ..GameConfig::default()
            }
        );
    }

    #[test]
    fn test_missing_config_file() {
        let arg = AutoPlayArg {
            config: Some(PathBuf::from("/nonexistent/quadblock-config.json")),
            ..AutoPlayArg::default()
        };
        let err = arg.game_config().unwrap_err();
        assert!(err.to_string().contains("Failed to open config file"));
    }
}
