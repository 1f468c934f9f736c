use crossterm::event::{Event, KeyCode, KeyEventKind};
use log::info;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use tilemerge_engine::GameSession;

use crate::{
    bot::Bot,
    view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

/// Moves played per tick in turbo mode.
const TURBO_MOVES_PER_TICK: usize = 20;

const KEYS: &[KeyBinding] = &[
    (&["t"], "Turbo"),
    (&["p"], "Pause"),
    (&["n"], "New"),
    (&["q"], "Quit"),
];

#[derive(Debug)]
pub struct AutoPlayScreen {
    session: GameSession,
    bot: Bot,
    anim_frames: u32,
    turbo: bool,
    paused: bool,
    is_exiting: bool,
}

impl AutoPlayScreen {
    pub fn new(session: GameSession, bot: Bot, turbo: bool) -> Self {
        let mut screen = Self {
            anim_frames: session.anim_frames(),
            session,
            bot,
            turbo: false,
            paused: false,
            is_exiting: false,
        };
        screen.set_turbo(turbo);
        screen
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    fn set_turbo(&mut self, turbo: bool) {
        self.turbo = turbo;
        let frames = if turbo { 0 } else { self.anim_frames };
        self.session.set_anim_frames(frames);
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(19), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(
            SessionDisplay::new(&self.session).turbo(self.turbo),
            main_area,
        );
        frame.render_widget(KeyBindingDisplay::new(KEYS), help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        if event.kind != KeyEventKind::Press {
            return;
        }
        match event.code {
            KeyCode::Char('t') => self.set_turbo(!self.turbo),
            KeyCode::Char('p') => self.paused = !self.paused,
            KeyCode::Char('n') => self.session.reset(),
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    pub fn update(&mut self) {
        if self.paused {
            return;
        }
        self.session.increment_frame();
        let moves = if self.turbo { TURBO_MOVES_PER_TICK } else { 1 };
        for _ in 0..moves {
            if !self.play_one() {
                break;
            }
        }
    }

    /// Starts the bot's next move; returns `false` when no move was started.
    fn play_one(&mut self) -> bool {
        let state = self.session.session_state();
        if state.is_won() {
            info!("bot reached 2048, continuing");
            self.session.continue_playing();
        }
        if !self.session.session_state().is_playing() || self.session.animation().is_animating()
        {
            return false;
        }
        match self.bot.choose(self.session.board()) {
            Some(direction) => self.session.try_move(direction),
            None => false,
        }
    }
}
