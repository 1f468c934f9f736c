use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use tilemerge_engine::{Board, BoardConfig, SpawnPolicy, SpawnSeed};

use crate::{
    bot::{Bot, Strategy},
    command::BoardArg,
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    pub(crate) board: BoardArg,
    /// Number of games to play
    #[clap(long, default_value_t = 100)]
    games: usize,
    /// Move selection strategy (random, greedy)
    #[clap(long, default_value = "greedy")]
    strategy: Strategy,
    /// Output file for the report (stdout when omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct GameResult {
    seed: SpawnSeed,
    score: u64,
    max_tile: u32,
    moves: usize,
    won: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Summary {
    games: usize,
    wins: usize,
    mean_score: f64,
    max_score: u64,
    max_tile: u32,
    mean_moves: f64,
}

impl Summary {
    #[expect(clippy::cast_precision_loss)]
    fn from_results(results: &[GameResult]) -> Self {
        let games = results.len();
        let mean = |total: f64| {
            if games == 0 { 0.0 } else { total / games as f64 }
        };
        Self {
            games,
            wins: results.iter().filter(|r| r.won).count(),
            mean_score: mean(results.iter().map(|r| r.score as f64).sum()),
            max_score: results.iter().map(|r| r.score).max().unwrap_or(0),
            max_tile: results.iter().map(|r| r.max_tile).max().unwrap_or(0),
            mean_moves: mean(results.iter().map(|r| r.moves as f64).sum()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct SimulationReport {
    generated_at: DateTime<Utc>,
    strategy: Strategy,
    spawn_policy: SpawnPolicy,
    summary: Summary,
    results: Vec<GameResult>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        board,
        games,
        strategy,
        output,
    } = arg;

    let config = board.board_config()?;
    let base_seed = board.seed().unwrap_or_else(|| rand::rng().random());
    info!("simulating {games} games with {strategy} strategy (seed {base_seed})");

    let results = simulate(&config, base_seed, *strategy, *games);
    let summary = Summary::from_results(&results);
    info!(
        "mean score {:.1}, max score {}, max tile {}, {} wins",
        summary.mean_score, summary.max_score, summary.max_tile, summary.wins
    );

    let report = SimulationReport {
        generated_at: Utc::now(),
        strategy: *strategy,
        spawn_policy: config.spawn_policy,
        summary,
        results,
    };
    Output::save_json(&report, output.clone())
}

/// Plays `games` games; per-game seeds and bot randomness derive from `base_seed`.
fn simulate(
    config: &BoardConfig,
    base_seed: SpawnSeed,
    strategy: Strategy,
    games: usize,
) -> Vec<GameResult> {
    let mut rng = Pcg32::from_seed(base_seed.to_bytes());
    (0..games)
        .map(|index| {
            let seed: SpawnSeed = rng.random();
            let bot = Bot::new(strategy, Pcg32::from_rng(&mut rng));
            let result = play_game(config, seed, bot);
            debug!(
                "game {index}: score {}, max tile {}, {} moves",
                result.score, result.max_tile, result.moves
            );
            result
        })
        .collect()
}

fn play_game(config: &BoardConfig, seed: SpawnSeed, mut bot: Bot) -> GameResult {
    let mut board = Board::with_config(BoardConfig {
        seed: Some(seed),
        ..*config
    });
    let mut moves = 0;
    while let Some(direction) = bot.choose(&board) {
        if board.step(direction).is_some() {
            moves += 1;
        }
    }
    GameResult {
        seed,
        score: board.score(),
        max_tile: board.max_tile(),
        moves,
        won: board.has_won(),
    }
}
