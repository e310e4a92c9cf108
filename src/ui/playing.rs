use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::quiz::Quiz;
use crate::router::Screen;
use crate::session::Feedback;

use super::{bold, centered, dim, green_bold, inner, italic, red_bold, screen::View, title_style};

/// One word at a time: listen, type, get feedback
pub struct PlayingView;

fn header(quiz: &Quiz, area: Rect, buf: &mut Buffer) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let (index, total) = quiz.progress();

    Paragraph::new(Line::from(vec![
        Span::styled("Score: ", dim()),
        Span::styled(quiz.score().to_string(), title_style()),
    ]))
    .render(halves[0], buf);

    Paragraph::new(Span::styled(
        format!("Word {} / {}", (index + 1).min(total), total),
        bold(),
    ))
    .alignment(Alignment::Right)
    .render(halves[1], buf);
}

fn input_box(quiz: &Quiz, area: Rect, buf: &mut Buffer) {
    let mut spans = vec![Span::styled(quiz.input().to_string(), bold())];
    if !quiz.is_submitting() && !quiz.is_finished() {
        spans.push(Span::styled(
            "_",
            Style::default().add_modifier(Modifier::SLOW_BLINK | Modifier::DIM),
        ));
    }

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Your spelling "),
        )
        .render(area, buf);
}

fn feedback_lines(quiz: &Quiz) -> Vec<Line<'static>> {
    match quiz.feedback() {
        Feedback::None => Vec::new(),
        Feedback::Correct => vec![Line::from(Span::styled("Correct!", green_bold()))],
        Feedback::Incorrect => {
            let mut lines = vec![Line::from(Span::styled("Not quite!", red_bold()))];
            if let Some(word) = quiz.current_word() {
                lines.push(Line::from(vec![
                    Span::styled("The word is ", italic()),
                    Span::styled(word.to_string(), green_bold()),
                ]));
            }
            lines
        }
    }
}

fn confirm_dialog(area: Rect, buf: &mut Buffer) {
    let dialog = centered(area, 44, 7);
    Clear.render(dialog, buf);
    Paragraph::new(vec![
        Line::from(Span::styled("Are you sure?", title_style())),
        Line::default(),
        Line::from(Span::styled(
            "Your answers so far go to the summary.",
            italic(),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("(y)", bold()),
            Span::raw(" yes, quit   "),
            Span::styled("(n)", bold()),
            Span::raw(" keep playing"),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    )
    .render(dialog, buf);
}

impl View for PlayingView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let Screen::Playing(quiz) = app.router().screen() else {
            return;
        };
        let content = inner(area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(content);

        header(quiz, chunks[0], buf);

        Paragraph::new(Line::from(vec![
            Span::raw("Listen and spell the word  "),
            Span::styled("(tab) hear it again", italic()),
        ]))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

        input_box(quiz, chunks[3], buf);

        Paragraph::new(feedback_lines(quiz))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        Paragraph::new(Span::styled(
            "(enter) check / (tab) repeat / (esc) quit",
            Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .render(chunks[7], buf);

        if app.is_confirming_quit() {
            confirm_dialog(area, buf);
        }
    }
}
