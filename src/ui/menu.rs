use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Palette;
use crate::game::DeathReason;

const GAME_OVER_POPUP_WIDTH: u16 = 30;
const GAME_OVER_POPUP_HEIGHT: u16 = 9;

/// Draws the game-over screen as a centered popup over the field.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    death_reason: Option<DeathReason>,
    palette: &Palette,
) {
    let popup = centered_popup(area, GAME_OVER_POPUP_WIDTH, GAME_OVER_POPUP_HEIGHT);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::styled(
            "GAME OVER",
            Style::new()
                .fg(palette.game_over)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::styled(
            match death_reason {
                Some(DeathReason::WallCollision) => "Cause: hit wall",
                Some(DeathReason::SelfCollision) => "Cause: hit yourself",
                None => "",
            },
            Style::new().fg(palette.hint),
        ),
        Line::from(""),
        Line::from("Press R to restart"),
        Line::styled("Press Q to quit", Style::new().fg(palette.hint)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::new().fg(palette.text).bg(palette.field_bg))
            .block(Block::bordered().border_style(Style::new().fg(palette.border))),
        popup,
    );
}

/// Replaces the whole frame with a notice when the field cannot fit.
pub fn render_too_small_notice(
    frame: &mut Frame<'_>,
    area: Rect,
    needed: (u16, u16),
    palette: &Palette,
) {
    let [row] = Layout::vertical([Constraint::Length(2)])
        .flex(Flex::Center)
        .areas(area);

    let lines = vec![
        Line::from("Terminal too small"),
        Line::from(format!("need {}x{}", needed.0, needed.1)),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::new().fg(palette.text)),
        row,
    );
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [mid] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);

    let [center] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(mid);

    center
}
