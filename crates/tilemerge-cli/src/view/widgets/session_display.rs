use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use tilemerge_engine::{GameSession, SessionState};

use crate::view::widgets::{BoardDisplay, StatsDisplay, color, style};

/// Whole game view: stats panel, board, and a banner on win or game over.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    turbo: bool,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            turbo: false,
        }
    }

    pub fn turbo(self, turbo: bool) -> Self {
        Self { turbo, ..self }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = match self.session.session_state() {
            SessionState::Playing if self.turbo => color::MAGENTA,
            SessionState::Playing => color::WHITE,
            SessionState::Won => color::GOLD,
            SessionState::GameOver => color::RED,
        };

        let board = BoardDisplay::new(self.session.board()).block(
            Block::bordered()
                .title(Line::from("2048").centered())
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let stats = StatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [stats_column, board_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);
        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(stats_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(board_column);

        let board_width = board.width();
        stats.render(stats_area, buf);
        board.render(board_area, buf);

        let banner = match self.session.session_state() {
            SessionState::Playing => None,
            SessionState::Won => Some((
                "YOU WIN! c: continue",
                Style::new().fg(color::BLACK).bg(color::GOLD),
            )),
            SessionState::GameOver => Some((
                "GAME OVER! n: new game",
                Style::new().fg(color::WHITE).bg(color::RED),
            )),
        };
        if let Some((text, style)) = banner {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
