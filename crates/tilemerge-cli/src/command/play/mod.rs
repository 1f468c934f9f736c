use std::path::PathBuf;

use log::info;
use tilemerge_engine::{Board, GameSession, MemoryBestScore};

use crate::{
    bot::{Bot, Strategy},
    command::BoardArg,
    store::JsonFileBestScore,
    tui::Tui,
};

use self::app::PlayApp;

mod app;
mod screens;

const DEFAULT_ANIM_FRAMES: u32 = 6;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    #[clap(flatten)]
    pub(crate) board: BoardArg,
    /// JSON file holding the best score
    #[clap(long, default_value = "./data/best_score.json")]
    best_score_file: PathBuf,
    /// Frames per move animation (0 disables animation)
    #[clap(long, default_value_t = DEFAULT_ANIM_FRAMES)]
    anim_frames: u32,
}

impl Default for ManualPlayArg {
    fn default() -> Self {
        Self {
            board: BoardArg::default(),
            best_score_file: PathBuf::from("./data/best_score.json"),
            anim_frames: DEFAULT_ANIM_FRAMES,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    #[clap(flatten)]
    pub(crate) board: BoardArg,
    /// Move selection strategy (random, greedy)
    #[clap(long, default_value = "greedy")]
    strategy: Strategy,
    /// Skip animations and play as fast as possible
    #[clap(long, default_value_t = false)]
    turbo: bool,
    /// Frames per move animation outside turbo mode
    #[clap(long, default_value_t = DEFAULT_ANIM_FRAMES)]
    anim_frames: u32,
}

pub(crate) fn run_manual(arg: &ManualPlayArg) -> anyhow::Result<()> {
    let ManualPlayArg {
        board,
        best_score_file,
        anim_frames,
    } = arg;

    let board = Board::with_config(board.board_config()?);
    let store = JsonFileBestScore::new(best_score_file.clone());
    let session = GameSession::new(board, Box::new(store), *anim_frames);
    info!("starting manual play, best score {}", session.best_score());

    let mut app = PlayApp::manual(session);
    Tui::new().run(&mut app)?;

    info!("finished with score {}", app.session().board().score());
    Ok(())
}

pub(crate) fn run_auto(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        board,
        strategy,
        turbo,
        anim_frames,
    } = arg;

    let board = Board::with_config(board.board_config()?);
    // Bot games do not compete for the player's best score.
    let session = GameSession::new(board, Box::new(MemoryBestScore::default()), *anim_frames);
    info!("starting auto play with {strategy} strategy");

    let mut app = PlayApp::auto(session, Bot::from_entropy(*strategy), *turbo);
    Tui::new().run(&mut app)?;

    info!("bot finished with score {}", app.session().board().score());
    Ok(())
}
