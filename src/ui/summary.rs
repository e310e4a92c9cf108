use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::celebration::Celebration;
use crate::router::Screen;
use crate::session::Summary;

use super::{bold, dim, green_bold, inner, italic, red_bold, screen::View, title_style};

const COLORS: [Color; 6] = [
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::Red,
    Color::Blue,
];

/// End of game: score, the words spelled right and the ones to practice
pub struct SummaryView;

fn score_lines(summary: &Summary) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Game Over!", title_style())),
        Line::default(),
        Line::from(vec![
            Span::raw("You spelled "),
            Span::styled(summary.score().to_string(), green_bold()),
            Span::raw(" out of "),
            Span::styled(summary.total().to_string(), bold()),
            Span::raw(" words right"),
        ]),
    ];
    if summary.is_perfect() {
        lines.push(Line::from(Span::styled(
            "Perfect score!",
            title_style().add_modifier(Modifier::SLOW_BLINK),
        )));
    } else if summary.total() == 0 {
        lines.push(Line::from(Span::styled("No words answered", italic())));
    }
    lines
}

fn word_lines(summary: &Summary) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if summary.correct_words().next().is_some() {
        lines.push(Line::from(Span::styled("Great job!", green_bold())));
        lines.extend(summary.correct_words().map(|result| {
            Line::from(vec![
                Span::styled("  ✓ ", green_bold()),
                Span::raw(result.word.clone()),
            ])
        }));
        lines.push(Line::default());
    }

    if summary.words_to_practice().next().is_some() {
        lines.push(Line::from(Span::styled("Words to Practice", red_bold())));
        lines.extend(summary.words_to_practice().map(|result| {
            Line::from(vec![
                Span::styled("  ✗ ", red_bold()),
                Span::styled(result.word.clone(), bold()),
                Span::styled("  You spelled: ", dim()),
                Span::styled(result.user_spelling.clone(), italic()),
            ])
        }));
    }
    lines
}

fn render_celebration(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    for piece in &celebration.confetti {
        if piece.x < 0.0 || piece.y < 0.0 {
            continue;
        }
        let (x, y) = (piece.x as u16, piece.y as u16);
        if x >= area.width || y >= area.height {
            continue;
        }
        let style = Style::default()
            .fg(COLORS[piece.color_index % COLORS.len()])
            .add_modifier(Modifier::BOLD);
        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&piece.symbol.to_string());
            cell.set_style(style);
        }
    }

    let cheer = celebration.cheer;
    let width = cheer.width() as u16;
    if width <= area.width && area.height > 0 {
        buf.set_string(
            area.x + (area.width - width) / 2,
            area.y + area.height / 3,
            cheer,
            title_style().add_modifier(Modifier::REVERSED),
        );
    }
}

impl View for SummaryView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let Screen::Summary(summary) = app.router().screen() else {
            return;
        };
        let content = inner(area);
        let score = score_lines(summary);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(score.len() as u16 + 1),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(content);

        Paragraph::new(score)
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Paragraph::new(word_lines(summary))
            .wrap(Wrap { trim: false })
            .render(chunks[1], buf);

        if let Some(notice) = app.notice() {
            Paragraph::new(Span::styled(notice.to_string(), red_bold()))
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
        }

        Paragraph::new(Span::styled(
            "(p) play again / (h) home / (esc) quit",
            Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        if app.celebration().is_active() {
            render_celebration(app.celebration(), area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Config;
    use crate::router::Router;
    use crate::session::WordResult;
    use crate::sound::SilentSound;
    use crate::speech::SilentSpeaker;
    use crate::ui::test_support::text;
    use std::sync::Arc;

    fn summary_app(results: Vec<WordResult>) -> App {
        let router = Router::new(
            Arc::new(Catalog::from_words(["cat", "dog", "bee"]).unwrap()),
            Arc::new(SilentSpeaker),
            Arc::new(SilentSound),
        );
        let mut app = App::new(router, Config::default());
        app.router_mut().finish(results);
        app
    }

    fn render(app: &App) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        SummaryView.render(app, area, &mut buf);
        text(&buf)
    }

    #[test]
    fn test_mixed_results() {
        let app = summary_app(vec![
            WordResult::grade("cat", "cat"),
            WordResult::grade("dog", "dgo"),
        ]);

        let rendered = render(&app);
        assert!(rendered.contains("Game Over!"));
        assert!(rendered.contains("You spelled 1 out of 2 words right"));
        assert!(rendered.contains("Great job!"));
        assert!(rendered.contains("Words to Practice"));
        assert!(rendered.contains("You spelled: dgo"));
        assert!(!rendered.contains("Perfect score!"));
    }

    #[test]
    fn test_perfect_results() {
        let app = summary_app(vec![WordResult::grade("cat", "CAT")]);

        let rendered = render(&app);
        assert!(rendered.contains("Perfect score!"));
        assert!(!rendered.contains("Words to Practice"));
    }

    #[test]
    fn test_nothing_answered() {
        let rendered = render(&summary_app(Vec::new()));

        assert!(rendered.contains("You spelled 0 out of 0 words right"));
        assert!(rendered.contains("No words answered"));
        assert!(!rendered.contains("Great job!"));
    }

    #[test]
    fn test_celebration_overlay_draws_cheer() {
        let mut celebration = Celebration::new();
        celebration.start(80, 24);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);

        render_celebration(&celebration, area, &mut buf);

        assert!(text(&buf).contains(celebration.cheer));
    }
}
