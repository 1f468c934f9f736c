use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, key_binding_display::*, session_display::*, stats_display::*,
};

mod board_display;
mod key_binding_display;
mod session_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const BACKGROUND: Color = Color::Rgb(205, 192, 180);
    pub const OUTLINE: Color = Color::Rgb(187, 173, 160);
    pub const DARK_TEXT: Color = Color::Rgb(119, 110, 101);
    pub const LIGHT_TEXT: Color = Color::Rgb(249, 246, 242);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GOLD: Color = Color::Rgb(237, 194, 46);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);

    /// Background of a tile carrying `value`.
    pub const fn tile(value: u32) -> Color {
        match value {
            2 => Color::Rgb(237, 225, 218),
            4 => Color::Rgb(238, 225, 201),
            8 => Color::Rgb(243, 178, 122),
            16 => Color::Rgb(246, 150, 101),
            32 => Color::Rgb(247, 124, 95),
            64 => Color::Rgb(247, 95, 59),
            128 => Color::Rgb(237, 208, 115),
            256 => Color::Rgb(237, 204, 99),
            512 => Color::Rgb(236, 202, 80),
            _ => BLACK,
        }
    }
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::view::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const GRID: Style = fg_bg(color::DARK_TEXT, color::OUTLINE);
    pub const EMPTY_CELL: Style = fg_bg(color::DARK_TEXT, color::BACKGROUND);

    pub const fn tile(value: u32) -> Style {
        let fg = if value <= 4 {
            color::DARK_TEXT
        } else {
            color::LIGHT_TEXT
        };
        fg_bg(fg, color::tile(value))
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
