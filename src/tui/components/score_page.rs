//! # Score Page Component
//!
//! Result screen. Map on the left, stats panel on the right (stacked on
//! narrow terminals).
//!
//! The panel always renders something: the details, the error banner, or the
//! "No result to display." placeholder. A fetch still in flight shows
//! "Loading..." instead.

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::map_view::MapView;
use crate::tui::components::score_details::{ScoreDetails, ScoreDetailsState};

pub const NO_RESULT_TEXT: &str = "No result to display.";
pub const NO_LOCATION_TEXT: &str = "No location data available.";
const TWO_COLUMN_MIN_WIDTH: u16 = 90;

/// Header text for the stats panel.
pub fn header_text(zip: &str) -> String {
    if zip.is_empty() {
        "ECO-SCORE".to_string()
    } else {
        format!("ECO-SCORE FOR {zip}")
    }
}

fn fetched_at_text(fetched_at: Option<DateTime<Local>>) -> Option<String> {
    fetched_at.map(|t| format!("Fetched at {}", t.format("%H:%M:%S")))
}

pub struct ScorePage<'a> {
    pub app: &'a App,
    pub details: &'a mut ScoreDetailsState,
    pub highlight_radius_m: f64,
}

impl<'a> ScorePage<'a> {
    pub fn new(app: &'a App, details: &'a mut ScoreDetailsState, highlight_radius_m: f64) -> Self {
        Self {
            app,
            details,
            highlight_radius_m,
        }
    }

    fn render_map(&mut self, frame: &mut Frame, area: Rect) {
        match &self.app.result {
            Some(result) => {
                MapView::new(Some(result.coordinates), self.highlight_radius_m).render(frame, area)
            }
            None => frame.render_widget(
                Paragraph::new(NO_LOCATION_TEXT)
                    .style(Style::default().fg(Color::Gray))
                    .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray))),
                area,
            ),
        }
    }

    fn render_panel(&mut self, frame: &mut Frame, area: Rect) {
        let banner = self.app.error.as_deref();
        let banner_height = if banner.is_some() { 2 } else { 0 };

        let [header_area, banner_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(banner_height),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                header_text(&self.app.zip),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
            header_area,
        );

        if let Some(message) = banner {
            frame.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(Color::LightRed)))
                    .wrap(Wrap { trim: true }),
                banner_area,
            );
        }

        if self.app.is_loading {
            frame.render_widget(Paragraph::new("Loading..."), body_area);
        } else if let Some(result) = &self.app.result {
            ScoreDetails::new(self.details, result, self.app.show_note).render(frame, body_area);
        } else {
            frame.render_widget(
                Paragraph::new(NO_RESULT_TEXT).style(Style::default().fg(Color::Gray)),
                body_area,
            );
        }

        let mut footer = vec![Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(Color::Cyan)),
            Span::raw("calculate another score  "),
            Span::styled("[Esc] ", Style::default().fg(Color::Cyan)),
            Span::raw("home"),
        ])];
        if let Some(text) = fetched_at_text(self.app.fetched_at) {
            footer.push(Line::from(Span::styled(
                text,
                Style::default().fg(Color::DarkGray),
            )));
        }
        frame.render_widget(
            Paragraph::new(footer).block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
            footer_area,
        );
    }
}

impl Component for ScorePage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width >= TWO_COLUMN_MIN_WIDTH {
            let [map_area, panel_area] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .spacing(1)
                    .areas(area);
            self.render_map(frame, map_area);
            self.render_panel(frame, panel_area);
        } else {
            let [map_area, panel_area] =
                Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)])
                    .areas(area);
            self.render_map(frame, map_area);
            self.render_panel(frame, panel_area);
        }
    }
}
