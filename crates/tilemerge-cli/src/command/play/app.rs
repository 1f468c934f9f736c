use crossterm::event::Event;
use ratatui::Frame;
use tilemerge_engine::GameSession;

use crate::{
    bot::Bot,
    command::play::screens::Screen,
    tui::{App, Tui},
};

const FPS: f64 = 60.0;

#[derive(Debug)]
pub struct PlayApp {
    screen: Screen,
}

impl PlayApp {
    pub fn manual(session: GameSession) -> Self {
        Self {
            screen: Screen::manual(session),
        }
    }

    pub fn auto(session: GameSession, bot: Bot, turbo: bool) -> Self {
        Self {
            screen: Screen::auto(session, bot, turbo),
        }
    }

    pub fn session(&self) -> &GameSession {
        self.screen.session()
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_frame_rate(FPS);
        tui.set_tick_rate(Some(FPS));
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.screen.update();
    }
}
