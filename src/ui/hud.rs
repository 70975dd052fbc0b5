use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Palette;
use crate::game::GameState;

/// Rows the HUD takes from the frame: score above, key hints below.
pub const HUD_HEIGHT: u16 = 2;

const KEY_HINTS: &str = "arrows/WASD move  R restart  Q quit";

/// Renders the score line and key hints, returning the area left between them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, palette: &Palette) -> Rect {
    let [score_area, play_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(state.score(), palette)).alignment(Alignment::Center),
        score_area,
    );

    frame.render_widget(
        Paragraph::new(Line::from(KEY_HINTS))
            .alignment(Alignment::Center)
            .style(Style::new().fg(palette.hint)),
        hint_area,
    );

    play_area
}

fn score_line(score: u32, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled("Score: ", Style::new().fg(palette.text)),
        Span::styled(
            score.to_string(),
            Style::new().fg(palette.text).add_modifier(Modifier::BOLD),
        ),
    ])
}
