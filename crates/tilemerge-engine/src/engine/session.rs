use log::{debug, info};

use crate::core::Direction;

use super::{BestScoreStore, Board, GameStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    /// A 2048 tile appeared; input is suppressed until [`GameSession::continue_playing`].
    Won,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum AnimationState {
    Idle,
    Animating { frame: u32, total_frames: u32 },
}

/// Ease-out cubic curve: fast start, slow landing.
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Frame-driven game session on top of a [`Board`].
///
/// Drives the move/finalize/spawn protocol of the board: a move starts an
/// animation of `anim_frames` frames, and [`increment_frame`](Self::increment_frame)
/// advances it and commits the move on the last frame. Moves requested while
/// an animation runs are ignored.
///
/// # Example
///
/// ```
/// use tilemerge_engine::{Board, BoardConfig, Direction, GameSession, MemoryBestScore};
///
/// let board = Board::from_values(
///     [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]],
///     BoardConfig::default(),
/// )
/// .unwrap();
/// let mut session = GameSession::new(board, Box::new(MemoryBestScore::default()), 3);
///
/// assert!(session.try_move(Direction::Left));
/// assert!(session.animation().is_animating());
/// assert!(!session.try_move(Direction::Right));
///
/// for _ in 0..3 {
///     session.increment_frame();
/// }
/// assert!(session.animation().is_idle());
/// assert_eq!(session.board().score(), 4);
/// assert_eq!(session.best_score(), 4);
/// assert_eq!(session.board().grid().tile_count(), 2);
/// ```
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    stats: GameStats,
    store: Box<dyn BestScoreStore>,
    best_score: u64,
    session_state: SessionState,
    animation: AnimationState,
    anim_frames: u32,
    win_acknowledged: bool,
}

impl GameSession {
    #[must_use]
    pub fn new(board: Board, mut store: Box<dyn BestScoreStore>, anim_frames: u32) -> Self {
        let best_score = store.load();
        let mut stats = GameStats::new();
        stats.observe_tile(board.max_tile());
        let mut session = Self {
            board,
            stats,
            store,
            best_score,
            session_state: SessionState::Playing,
            animation: AnimationState::Idle,
            anim_frames,
            win_acknowledged: false,
        };
        session.evaluate_state();
        session
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn animation(&self) -> AnimationState {
        self.animation
    }

    #[must_use]
    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    #[must_use]
    pub fn anim_frames(&self) -> u32 {
        self.anim_frames
    }

    /// Changes the animation length of subsequent moves (`0` commits immediately).
    pub fn set_anim_frames(&mut self, anim_frames: u32) {
        self.anim_frames = anim_frames;
    }

    /// Starts a move toward `direction`.
    ///
    /// Returns `false` if the move is ignored: an animation is running, the
    /// session is not [`SessionState::Playing`], or the move changes nothing.
    pub fn try_move(&mut self, direction: Direction) -> bool {
        if !self.session_state.is_playing() || self.animation.is_animating() {
            return false;
        }
        if !self.board.move_tiles(direction) {
            return false;
        }
        if self.anim_frames == 0 {
            self.complete_move();
        } else {
            self.animation = AnimationState::Animating {
                frame: 0,
                total_frames: self.anim_frames,
            };
        }
        true
    }

    pub fn increment_frame(&mut self) {
        let AnimationState::Animating { frame, total_frames } = self.animation else {
            return;
        };
        let frame = frame + 1;
        #[expect(clippy::cast_precision_loss)]
        let t = frame as f32 / total_frames as f32;
        self.board.set_motion_progress(ease_out_cubic(t));
        if frame >= total_frames {
            self.complete_move();
        } else {
            self.animation = AnimationState::Animating { frame, total_frames };
        }
    }

    pub fn undo(&mut self) -> bool {
        self.animation = AnimationState::Idle;
        if !self.board.undo() {
            return false;
        }
        self.stats.record_undo();
        self.evaluate_state();
        true
    }

    pub fn redo(&mut self) -> bool {
        self.animation = AnimationState::Idle;
        if !self.board.redo() {
            return false;
        }
        self.evaluate_state();
        true
    }

    /// Starts a new game on the same board configuration, keeping the best score.
    pub fn reset(&mut self) {
        self.animation = AnimationState::Idle;
        self.board.reset();
        self.stats = GameStats::new();
        self.stats.observe_tile(self.board.max_tile());
        self.win_acknowledged = false;
        self.evaluate_state();
    }

    /// Leaves the [`SessionState::Won`] state; the session never reports a win again
    /// until [`reset`](Self::reset).
    pub fn continue_playing(&mut self) {
        if self.session_state.is_won() {
            self.win_acknowledged = true;
            self.evaluate_state();
        }
    }

    fn complete_move(&mut self) {
        self.animation = AnimationState::Idle;
        let Some(merges) = self.board.pending_move().map(|plan| plan.merges()) else {
            return;
        };
        self.board.finalize();
        self.board.spawn_random(None);
        self.stats.complete_move(merges, self.board.max_tile());
        self.update_best_score();
        self.evaluate_state();
    }

    fn update_best_score(&mut self) {
        let score = self.board.score();
        if score > self.best_score {
            self.best_score = score;
            self.store.save(score);
        }
    }

    fn evaluate_state(&mut self) {
        let next = if self.board.has_won() && !self.win_acknowledged {
            SessionState::Won
        } else if self.board.is_game_over() {
            SessionState::GameOver
        } else {
            SessionState::Playing
        };
        if next != self.session_state {
            match next {
                SessionState::Won => info!(
                    "reached {} with score {}",
                    self.board.max_tile(),
                    self.board.score()
                ),
                SessionState::GameOver => info!("game over with score {}", self.board.score()),
                SessionState::Playing => debug!("back to playing"),
            }
            self.session_state = next;
        }
    }
}
