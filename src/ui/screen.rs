use ratatui::{buffer::Buffer, layout::Rect};

use crate::app::App;
use crate::router::Screen;

use super::{home::HomeView, playing::PlayingView, summary::SummaryView};

/// A UI screen boundary: renders one router screen
pub trait View {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// The view for whatever screen the router is on
pub fn current_view(screen: &Screen) -> Box<dyn View> {
    match screen {
        Screen::Home => Box::new(HomeView),
        Screen::Playing(_) => Box::new(PlayingView),
        Screen::Summary(_) => Box::new(SummaryView),
    }
}
