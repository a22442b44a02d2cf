//! # Home Page Component
//!
//! Landing screen: a panning world map with the title and a start hint
//! underneath.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::components::map_view::Globe;

pub const HOME_TITLE: &str = "welcome to eco-score!";
pub const HOME_HINT: &str = "press Enter to start";

pub struct HomePage {
    frame_index: usize,
}

impl HomePage {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }
}

impl Component for HomePage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text_lines = vec![
            Line::from(Span::styled(
                HOME_TITLE,
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(HOME_HINT, Style::default().fg(Color::DarkGray))),
        ];
        let text_height = text_lines.len() as u16;

        // Globe takes whatever height is left, capped so it stays map-shaped
        let globe_height = area.height.saturating_sub(text_height + 2).min(area.width / 3);

        let [globe_area, _, text_area] = Layout::vertical([
            Constraint::Length(globe_height),
            Constraint::Length(1),
            Constraint::Length(text_height),
        ])
        .flex(Flex::Center)
        .areas(area);

        if globe_height >= 4 {
            Globe::new(self.frame_index, false).render(frame, globe_area);
        }

        frame.render_widget(
            Paragraph::new(text_lines).alignment(Alignment::Center),
            text_area,
        );
    }
}
