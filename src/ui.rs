pub mod home;
pub mod playing;
pub mod screen;
pub mod summary;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    Frame,
};

use crate::app::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub(crate) fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn title_style() -> Style {
    bold().fg(Color::Yellow)
}

pub(crate) fn green_bold() -> Style {
    bold().fg(Color::Green)
}

pub(crate) fn red_bold() -> Style {
    bold().fg(Color::Red)
}

pub(crate) fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub(crate) fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

/// Area inside the standard screen margins
pub(crate) fn inner(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Min(0)])
        .split(area)[0]
}

/// A `width` x `height` box centered in `area`, clipped to it
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

impl ratatui::widgets::Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_view(self.router().screen()).render(self, area, buf);
    }
}

/// Draw the whole app into a frame
pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
