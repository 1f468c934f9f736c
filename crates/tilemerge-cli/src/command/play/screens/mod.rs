use crossterm::event::Event;
use ratatui::Frame;
use tilemerge_engine::GameSession;

use crate::{
    bot::Bot,
    command::play::screens::{auto::AutoPlayScreen, manual::ManualPlayScreen},
};

mod auto;
mod manual;

#[derive(Debug)]
pub enum Screen {
    Manual(ManualPlayScreen),
    Auto(AutoPlayScreen),
}

impl Screen {
    pub fn manual(session: GameSession) -> Self {
        Screen::Manual(ManualPlayScreen::new(session))
    }

    pub fn auto(session: GameSession, bot: Bot, turbo: bool) -> Self {
        Screen::Auto(AutoPlayScreen::new(session, bot, turbo))
    }

    pub fn session(&self) -> &GameSession {
        match self {
            Screen::Manual(screen) => screen.session(),
            Screen::Auto(screen) => screen.session(),
        }
    }

    pub fn is_exiting(&self) -> bool {
        match self {
            Screen::Manual(screen) => screen.is_exiting(),
            Screen::Auto(screen) => screen.is_exiting(),
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        match self {
            Screen::Manual(screen) => screen.draw(frame),
            Screen::Auto(screen) => screen.draw(frame),
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        match self {
            Screen::Manual(screen) => screen.handle_event(event),
            Screen::Auto(screen) => screen.handle_event(event),
        }
    }

    pub fn update(&mut self) {
        match self {
            Screen::Manual(screen) => screen.update(),
            Screen::Auto(screen) => screen.update(),
        }
    }
}
