use clap::{Parser, Subcommand};

use self::{auto_play::AutoPlayArg, generate_board::GenerateBoardArg};

mod auto_play;
mod generate_board;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game between computer players and write the JSON report
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Generate a random board and print it
    GenerateBoard(#[clap(flatten)] GenerateBoardArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args
        .mode
        .unwrap_or_else(|| Mode::AutoPlay(AutoPlayArg::default()))
    {
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
        Mode::GenerateBoard(arg) => generate_board::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_auto_play_flags() {
        let args = CommandArgs::try_parse_from([
            "quadblock",
            "auto-play",
            "--smart",
            "3,7",
            "--goal",
            "blob",
            "--max-turns",
            "4",
        ])
        .unwrap();
        assert!(matches!(args.mode, Some(Mode::AutoPlay(_))));
    }

    #[test]
    fn test_parse_generate_board_flags() {
        let args = CommandArgs::try_parse_from([
            "quadblock",
            "generate-board",
            "--format",
            "grid",
            "--seed",
            "0123456789abcdef0123456789abcdef",
        ])
        .unwrap();
        assert!(matches!(args.mode, Some(Mode::GenerateBoard(_))));

        let bad_seed = CommandArgs::try_parse_from(["quadblock", "generate-board", "--seed", "12"]);
        assert!(bad_seed.is_err());
    }
}
