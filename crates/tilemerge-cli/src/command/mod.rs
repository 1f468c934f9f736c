use std::{fs::File, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use env_logger::{Env, Target};
use tilemerge_engine::{BoardConfig, SpawnPolicy, SpawnSeed};

use self::{
    play::{AutoPlayArg, ManualPlayArg},
    simulate::SimulateArg,
};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Write log output to this file (interactive modes log nothing without it)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    #[command(name = "play")]
    ManualPlay(#[clap(flatten)] ManualPlayArg),
    /// Watch a bot play in the terminal
    #[command(name = "auto-play")]
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Play many games with a bot and write a JSON report
    Simulate(#[clap(flatten)] SimulateArg),
}

impl Mode {
    fn is_interactive(&self) -> bool {
        !matches!(self, Mode::Simulate(_))
    }
}

/// Board options shared by every mode.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BoardArg {
    /// Spawn seed (32 hex digits); random when omitted
    #[clap(long)]
    seed: Option<SpawnSeed>,
    /// Number of moves that can be undone
    #[clap(long, default_value_t = 1)]
    undo_depth: usize,
    /// Probability that a spawned tile is a 4
    #[clap(long, default_value_t = SpawnPolicy::DEFAULT_FOUR_PROBABILITY)]
    four_probability: f64,
}

impl Default for BoardArg {
    fn default() -> Self {
        Self {
            seed: None,
            undo_depth: 1,
            four_probability: SpawnPolicy::DEFAULT_FOUR_PROBABILITY,
        }
    }
}

impl BoardArg {
    pub(crate) fn seed(&self) -> Option<SpawnSeed> {
        self.seed
    }

    pub(crate) fn board_config(&self) -> anyhow::Result<BoardConfig> {
        let spawn_policy =
            SpawnPolicy::new(self.four_probability).context("Invalid --four-probability")?;
        Ok(BoardConfig {
            seed: self.seed,
            undo_depth: self.undo_depth,
            spawn_policy,
        })
    }
}

fn init_logger(log_file: Option<&PathBuf>, interactive: bool) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        // stderr would corrupt the terminal UI
        None if interactive => return Ok(()),
        None => {}
    }
    builder.init();
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args
        .mode
        .unwrap_or(Mode::ManualPlay(ManualPlayArg::default()));
    init_logger(args.log_file.as_ref(), mode.is_interactive())?;

    match mode {
        Mode::ManualPlay(arg) => play::run_manual(&arg)?,
        Mode::AutoPlay(arg) => play::run_auto(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
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
    fn test_default_mode_is_play() {
        let args = CommandArgs::try_parse_from(["tilemerge"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_board_options() {
        let args = CommandArgs::try_parse_from([
            "tilemerge",
            "simulate",
            "--seed",
            "00112233445566778899aabbccddeeff",
            "--undo-depth",
            "3",
            "--four-probability",
            "0.25",
        ])
        .unwrap();
        let Some(Mode::Simulate(arg)) = args.mode else {
            panic!("expected simulate");
        };
        let config = arg.board.board_config().unwrap();
        assert_eq!(
            config.seed.unwrap().to_string(),
            "00112233445566778899aabbccddeeff"
        );
        assert_eq!(config.undo_depth, 3);
        assert_eq!(config.spawn_policy.four_probability(), 0.25);
    }

    #[test]
    fn test_rejects_bad_options() {
        assert!(CommandArgs::try_parse_from(["tilemerge", "play", "--seed", "xyz"]).is_err());

        let args =
            CommandArgs::try_parse_from(["tilemerge", "simulate", "--four-probability", "2"])
                .unwrap();
        let Some(Mode::Simulate(arg)) = args.mode else {
            panic!("expected simulate");
        };
        assert!(arg.board.board_config().is_err());
    }

    #[test]
    fn test_log_file_is_global() {
        let args =
            CommandArgs::try_parse_from(["tilemerge", "auto-play", "--log-file", "out.log"])
                .unwrap();
        assert_eq!(args.log_file, Some(PathBuf::from("out.log")));
        assert!(args.mode.unwrap().is_interactive());
    }
}
