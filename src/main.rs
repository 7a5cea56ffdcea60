//! Sliding-Tile Puzzle Solver
//!
//! Solves the eight-puzzle (and the 2x2 and 4x4 variants) with A* search,
//! printing every board on a shortest path followed by the move sequence.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use eightpuzzle::board::EIGHT_PUZZLE_START;
use eightpuzzle::config::DEFAULT_MAX_ITERATIONS;
use eightpuzzle::{grid, puzzle_for_side, PuzzleOps, Report, SearchConfig, SolveError};

/// Solves sliding-tile puzzles with A* search.
#[derive(Parser)]
#[command(name = "eightpuzzle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle and print every board on a shortest path.
    Solve(SolveArgs),
    /// Print a single board with its heuristic cost.
    Show(BoardArgs),
}

#[derive(Args, Clone, Default)]
struct BoardArgs {
    /// Board side length (2, 3 or 4).
    #[arg(long, default_value_t = 3)]
    size: usize,
    /// Start tiles, row by row, 0 for the blank (e.g. "6,4,8,1,5,7,0,3,2").
    #[arg(long)]
    start: Option<String>,
    /// Goal tiles; defaults to 1..N followed by the blank.
    #[arg(long)]
    goal: Option<String>,
}

#[derive(Args, Clone)]
struct SolveArgs {
    #[command(flatten)]
    board: BoardArgs,
    /// Give up after expanding this many nodes.
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,
    /// Drop queued duplicates that cannot improve on an earlier copy.
    #[arg(long)]
    prune_duplicates: bool,
    /// Print search statistics after the solution.
    #[arg(long)]
    stats: bool,
}

impl Default for SolveArgs {
    fn default() -> Self {
        Self {
            board: BoardArgs {
                size: 3,
                ..BoardArgs::default()
            },
            max_iterations: DEFAULT_MAX_ITERATIONS,
            prune_duplicates: false,
            stats: false,
        }
    }
}

/// Tiles and puzzle selected by the board arguments.
struct Board {
    puzzle: &'static dyn PuzzleOps,
    start: Vec<u8>,
    goal: Option<Vec<u8>>,
}

impl BoardArgs {
    fn resolve(&self) -> Result<Board, String> {
        let puzzle = puzzle_for_side(self.size)
            .ok_or_else(|| format!("unsupported board size {}", self.size))?;

        let start = match (&self.start, self.size) {
            (Some(text), _) => grid::parse_tiles(text).map_err(|e| e.to_string())?,
            (None, 3) => EIGHT_PUZZLE_START.to_vec(),
            (None, size) => return Err(format!("--start is required for size {size}")),
        };
        let goal = self
            .goal
            .as_deref()
            .map(grid::parse_tiles)
            .transpose()
            .map_err(|e| e.to_string())?;

        Ok(Board {
            puzzle,
            start,
            goal,
        })
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Some(Command::Solve(args)) => run_solver(&args),
        Some(Command::Show(args)) => run_show(&args),
        None => run_solver(&SolveArgs::default()),
    };

    match outcome {
        Ok(text) => {
            print!("{}", text);
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

/// Solves the selected puzzle and formats the result.
fn run_solver(args: &SolveArgs) -> Result<String, String> {
    let board = args.board.resolve()?;
    let config = SearchConfig::default()
        .with_max_iterations(args.max_iterations)
        .with_prune_duplicates(args.prune_duplicates);

    let report = board
        .puzzle
        .solve(&board.start, board.goal.as_deref(), &config)
        .map_err(|e| match e {
            SolveError::InvalidState(_) => e.to_string(),
            SolveError::Unsolved { iterations } => {
                format!("No solution found within budget ({} iterations)", iterations)
            }
        })?;

    let mut output = format_report(&report);
    if args.stats {
        output.push_str(&format!("Search: {}\n", report.stats));
    }
    Ok(output)
}

/// Renders the selected start board.
fn run_show(args: &BoardArgs) -> Result<String, String> {
    let board = args.resolve()?;
    board
        .puzzle
        .render(&board.start, board.goal.as_deref())
        .map_err(|e| e.to_string())
}

/// Formats every board on the path, then the move count and directions.
fn format_report(report: &Report) -> String {
    let mut output = String::new();
    for board in &report.boards {
        output.push_str(board);
        output.push('\n');
    }
    output.push_str(&format!("Solution: {} steps\n", report.moves));
    output.push_str(&report.path);
    output.push('\n');
    output
}
