use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use quadblock_engine::{Board, BoardSeed, Color, Grid, Palette};
use rand::Rng as _;
use serde::Serialize;

use crate::util::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
enum BoardFormat {
    /// Indented block tree
    Tree,
    /// One line of `#rrggbb` cells per grid row
    Grid,
    /// Block tree and palette as JSON
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateBoardArg {
    /// Deepest level blocks may be subdivided to
    #[arg(long, default_value_t = 3)]
    max_depth: u8,
    /// Side length of the board
    #[arg(long, default_value_t = 750)]
    size: u32,
    /// Seed as 32 hex characters (random if omitted)
    #[arg(long)]
    seed: Option<BoardSeed>,
    /// Output format: `tree`, `grid` or `json`
    #[arg(long, default_value = "tree")]
    format: BoardFormat,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct GeneratedBoard<'a> {
    generated_at: DateTime<Utc>,
    seed: BoardSeed,
    board: &'a Board,
}

pub(crate) fn run(arg: &GenerateBoardArg) -> anyhow::Result<()> {
    let GenerateBoardArg {
        max_depth,
        size,
        seed,
        format,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("Generating board (max depth {max_depth}, size {size}, seed: {seed})...");
    let board = Board::generate(*max_depth, *size, Palette::classic(), &mut seed.rng())
        .context("Failed to generate board")?;
    eprintln!(
        "Generated {} leaves",
        board.root().blocks().filter(|b| b.is_leaf()).count()
    );

    let mut output = Output::from_output_path(output.clone())?;
    match format {
        BoardFormat::Tree => output.write_text(board.root().to_string().trim_end()),
        BoardFormat::Grid => output.write_text(&grid_text(&board.flatten())),
        BoardFormat::Json => output.write_json(&GeneratedBoard {
            generated_at: Utc::now(),
            seed,
            board: &board,
        }),
    }
}

fn grid_text(grid: &Grid) -> String {
    grid.rows()
        .map(|row| row.iter().copied().map(Color::hex).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
