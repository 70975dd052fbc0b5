use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    GLYPH_FOOD, GLYPH_SNAKE_SEGMENT, GameConfig, Palette, TERMINAL_COLUMNS_PER_CELL,
};
use crate::game::{GameState, GameStatus};
use crate::snake::Position;
use crate::ui::hud::{HUD_HEIGHT, render_hud};
use crate::ui::menu::{render_game_over_menu, render_too_small_notice};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, palette: &Palette) {
    let area = frame.area();
    let needed = required_terminal_size(state.config());
    if area.width < needed.0 || area.height < needed.1 {
        render_too_small_notice(frame, area, needed, palette);
        return;
    }

    let play_area = render_hud(frame, area, state, palette);
    let field = field_rect(play_area, state.config());

    let block = Block::bordered()
        .border_style(Style::new().fg(palette.border))
        .style(Style::new().bg(palette.field_bg));
    let inner = block.inner(field);
    frame.render_widget(block, field);

    render_snake(frame, inner, state, palette);
    render_food(frame, inner, state, palette);

    if state.status() == GameStatus::GameOver {
        render_game_over_menu(frame, field, state.score(), state.death_reason(), palette);
    }
}

/// Smallest terminal (columns, rows) that fits the bordered field and HUD.
#[must_use]
pub fn required_terminal_size(config: &GameConfig) -> (u16, u16) {
    let (width, height) = field_size(config);
    (width, height.saturating_add(HUD_HEIGHT))
}

fn field_size(config: &GameConfig) -> (u16, u16) {
    let width = config
        .columns()
        .saturating_mul(TERMINAL_COLUMNS_PER_CELL)
        .saturating_add(2);
    let height = config.rows().saturating_add(2);
    (width, height)
}

fn field_rect(area: Rect, config: &GameConfig) -> Rect {
    let (width, height) = field_size(config);

    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [field] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);

    field
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, palette: &Palette) {
    let head = state.head();
    let buffer = frame.buffer_mut();

    for segment in state.body() {
        let Some((x, y)) = cell_to_terminal(inner, state.config(), *segment) else {
            continue;
        };

        let mut style = Style::new().fg(palette.snake).bg(palette.field_bg);
        if *segment == head {
            style = style.add_modifier(Modifier::BOLD);
        }
        buffer.set_string(x, y, GLYPH_SNAKE_SEGMENT, style);
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, palette: &Palette) {
    let Some((x, y)) = cell_to_terminal(inner, state.config(), state.food().position) else {
        return;
    };

    frame.buffer_mut().set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::new()
            .fg(palette.food)
            .bg(palette.field_bg)
            .add_modifier(Modifier::BOLD),
    );
}

/// Maps a grid position to the top-left terminal cell that draws it.
///
/// Positions off the grid (a head that just crashed into the wall) map to
/// `None`.
fn cell_to_terminal(inner: Rect, config: &GameConfig, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(config) {
        return None;
    }

    let (column, row) = position.cell(config);
    let column = u16::try_from(column).ok()?;
    let row = u16::try_from(row).ok()?;

    let x = inner
        .x
        .saturating_add(column.saturating_mul(TERMINAL_COLUMNS_PER_CELL));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(TERMINAL_COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
