use crossterm::event::{Event, KeyCode, KeyEventKind};
use log::debug;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use tilemerge_engine::{Direction, GameSession, SessionState};

use crate::view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay};

const PLAYING_KEYS: &[KeyBinding] = &[
    (&["←↑↓→", "hjkl", "wasd"], "Move"),
    (&["u"], "Undo"),
    (&["r"], "Redo"),
    (&["n"], "New"),
    (&["q"], "Quit"),
];
const WON_KEYS: &[KeyBinding] = &[
    (&["c"], "Continue"),
    (&["u"], "Undo"),
    (&["n"], "New"),
    (&["q"], "Quit"),
];
const GAME_OVER_KEYS: &[KeyBinding] = &[(&["u"], "Undo"), (&["n"], "New"), (&["q"], "Quit")];

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('h' | 'a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l' | 'd') => Some(Direction::Right),
        KeyCode::Up | KeyCode::Char('k' | 'w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('j' | 's') => Some(Direction::Down),
        _ => None,
    }
}

#[derive(Debug)]
pub struct ManualPlayScreen {
    session: GameSession,
    is_exiting: bool,
}

impl ManualPlayScreen {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let bindings = match self.session.session_state() {
            SessionState::Playing => PLAYING_KEYS,
            SessionState::Won => WON_KEYS,
            SessionState::GameOver => GAME_OVER_KEYS,
        };

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(19), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(SessionDisplay::new(&self.session), main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        if event.kind != KeyEventKind::Press {
            return;
        }

        if let Some(direction) = direction_for(event.code) {
            if !self.session.try_move(direction) {
                debug!("move {direction} ignored");
            }
            return;
        }
        match event.code {
            KeyCode::Char('u') => _ = self.session.undo(),
            KeyCode::Char('r') => _ = self.session.redo(),
            KeyCode::Char('n') => self.session.reset(),
            KeyCode::Char('c') => self.session.continue_playing(),
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    pub fn update(&mut self) {
        self.session.increment_frame();
    }
}
