use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tilemerge_engine::{Board, COLS, CellPos, Point, ROWS, Tile};

use crate::view::widgets::style;

/// Terminal cells covered by one tile.
const TILE_WIDTH: u16 = 8;
const TILE_HEIGHT: u16 = 3;
/// Outline between tiles and around the grid.
const GAP: u16 = 1;

/// Draws the grid with every tile at its continuous position, so tiles
/// slide between cells while a move is animating.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        COLS as u16 * (TILE_WIDTH + GAP) + GAP + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS as u16 * (TILE_HEIGHT + GAP) + GAP + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Terminal rectangle of a tile at `point`, relative to the grid origin.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn tile_rect(origin: Rect, point: Point) -> Rect {
    let x = (point.x * f32::from(TILE_WIDTH + GAP)).round().max(0.0) as u16;
    let y = (point.y * f32::from(TILE_HEIGHT + GAP)).round().max(0.0) as u16;
    Rect::new(
        origin.x + GAP + x,
        origin.y + GAP + y,
        TILE_WIDTH,
        TILE_HEIGHT,
    )
}

fn fill(buf: &mut Buffer, area: Rect, style: Style) {
    for position in area.positions() {
        if let Some(cell) = buf.cell_mut(position) {
            cell.reset();
            cell.set_style(style);
        }
    }
}

fn render_tile(tile: &Tile, grid_area: Rect, buf: &mut Buffer) {
    let rect = tile_rect(grid_area, tile.point()).intersection(grid_area);
    if rect.is_empty() {
        return;
    }
    let style = style::tile(tile.value());
    fill(buf, rect, style);
    Line::styled(tile.value().to_string(), style.add_modifier(Modifier::BOLD))
        .centered()
        .render(rect.centered_vertically(Constraint::Length(1)), buf);
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let grid_area = area.centered(
            Constraint::Length(self.width() - super::block_horizontal_margin(self.block.as_ref())),
            Constraint::Length(self.height() - super::block_vertical_margin(self.block.as_ref())),
        );
        fill(buf, grid_area, style::GRID);

        for row in 0..ROWS {
            for col in 0..COLS {
                let rect =
                    tile_rect(grid_area, CellPos::new(row, col).point()).intersection(grid_area);
                fill(buf, rect, style::EMPTY_CELL);
            }
        }

        // Tiles that stay in place go first so that sliding tiles are drawn on top.
        let motions = self.board.motions();
        let (moving, resting): (Vec<_>, Vec<_>) = self.board.tiles().partition(|tile| {
            motions
                .iter()
                .any(|m| m.tile_id == tile.id() && !m.is_stationary())
        });
        for tile in resting.into_iter().chain(moving) {
            render_tile(tile, grid_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use tilemerge_engine::{BoardConfig, Direction};

    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_owned())
            .collect()
    }

    #[test]
    fn test_dimensions() {
        let board = Board::new();
        let display = BoardDisplay::new(&board);
        assert_eq!(display.width(), 37);
        assert_eq!(display.height(), 17);
        let display = display.block(BlockWidget::bordered());
        assert_eq!(display.width(), 39);
        assert_eq!(display.height(), 19);
    }

    #[test]
    fn test_renders_tile_values() {
        let board = Board::from_values(
            [[2, 0, 0, 2048], [0; 4], [0; 4], [0, 0, 16, 0]],
            BoardConfig::default(),
        )
        .unwrap();
        let display = BoardDisplay::new(&board);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        // Middle line of the first tile row.
        let line = row_text(&buf, 2);
        assert!(line.contains('2'));
        assert!(line.contains("2048"));
        assert!(row_text(&buf, 14).contains("16"));
        assert_eq!(buf[(2, 2)].bg, crate::view::widgets::color::tile(2));
    }

    #[test]
    fn test_renders_sliding_tile_between_cells() {
        let mut board = Board::from_values(
            [[0, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 64]],
            BoardConfig::default(),
        )
        .unwrap();
        assert!(board.move_tiles(Direction::Up));
        board.set_motion_progress(0.5);

        let display = BoardDisplay::new(&board);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        // Halfway between row 3 (top 13) and row 0 (top 1): top at 7, label at 8.
        assert!(row_text(&buf, 8).contains("64"));
        assert!(!row_text(&buf, 14).contains("64"));
    }
}
