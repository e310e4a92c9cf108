use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::app::{App, HomeState, Tile, GRID_COLUMNS};

use super::{bold, dim, inner, italic, red_bold, screen::View, title_style};

/// Letter picker plus the A-Z game
pub struct HomeView;

fn tile_span(home: &HomeState, tile: Tile) -> Span<'static> {
    let label = format!(" {:^3} ", tile.label());
    let style = if !home.is_enabled(tile) {
        dim().fg(Color::DarkGray)
    } else if tile == Tile::Random {
        bold().fg(Color::Magenta)
    } else {
        bold()
    };
    let style = if home.selected() == tile {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    };
    Span::styled(label, style)
}

fn grid_lines(home: &HomeState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for row in &HomeState::tiles().chunks(GRID_COLUMNS) {
        lines.push(Line::from(
            row.map(|tile| tile_span(home, tile)).collect::<Vec<_>>(),
        ));
        lines.push(Line::default());
    }
    lines
}

impl View for HomeView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let area = inner(area);
        let rows = HomeState::tiles().count().div_ceil(GRID_COLUMNS) as u16 * 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(rows),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        Paragraph::new(Span::styled("Spelling Bee", title_style()))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            "Pick a letter to practice, or play the A-Z game",
            italic(),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);

        Paragraph::new(grid_lines(app.home()))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        if let Some(notice) = app.notice() {
            Paragraph::new(Span::styled(notice.to_string(), red_bold()))
                .alignment(Alignment::Center)
                .render(chunks[3], buf);
        }

        Paragraph::new(Span::styled(
            "(←↑↓→) move / (enter) start / (a-z) letter / (space) A-Z game / (esc) quit",
            Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[5], buf);
    }
}
