//! # Input Page Component
//!
//! ZIP entry screen. Left column: orbiting globe. Right column: title,
//! explanation, the `InputBox` and the inline validation error.
//!
//! ```text
//! ┌──────────────┬──────────────────────────────┐
//! │              │ calculate an eco-score:      │
//! │    globe     │ Enter any 5-digit U.S. ...   │
//! │              │ ╭ ZIP ─────────────────────╮ │
//! │              │ ╰──────── [Enter] CALCULATE╯ │
//! │              │ <zip error>                  │
//! └──────────────┴──────────────────────────────┘
//! ```
//!
//! Narrow terminals drop the globe.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::components::input_box::InputBox;
use crate::tui::components::map_view::Globe;

pub const INPUT_TITLE: &str = "calculate an eco-score:";
const LEAD_TEXT: &str = "Enter any 5-digit U.S. ZIP code.";
const DESCRIPTION: &str = "This tool calculates how 'green' your neighborhood is through \
consideration of the following factors: air quality, tree canopy cover, pavement \
percentage, flood risk, traffic conditions, number of toxic sites, and green spaces. \
These aren't the only factors to consider, but they are a good starting point.";
const SLOW_LOOKUP_HINT: &str =
    "First-time lookups outside Greater Houston may take up to ~15 seconds.";

/// Below this width the globe column is dropped.
const TWO_COLUMN_MIN_WIDTH: u16 = 90;
const FORM_MAX_WIDTH: u16 = 60;

pub struct InputPage<'a> {
    pub input_box: &'a mut InputBox,
    pub zip_error: Option<&'a str>,
    pub frame_index: usize,
}

impl<'a> InputPage<'a> {
    pub fn new(input_box: &'a mut InputBox, zip_error: Option<&'a str>, frame_index: usize) -> Self {
        Self {
            input_box,
            zip_error,
            frame_index,
        }
    }

    /// Wraps the explanatory text to `width` columns.
    fn description_lines(width: u16) -> Vec<Line<'static>> {
        let options = textwrap::Options::new(width.max(1) as usize)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let mut lines = vec![Line::from(LEAD_TEXT)];
        let muted = Style::default().fg(Color::DarkGray);
        for text in [DESCRIPTION, SLOW_LOOKUP_HINT] {
            lines.push(Line::default());
            lines.extend(
                textwrap::wrap(text, &options)
                    .into_iter()
                    .map(|l| Line::from(Span::styled(l.into_owned(), muted))),
            );
        }
        lines
    }

    fn render_form(&mut self, frame: &mut Frame, area: Rect) {
        let [form] = Layout::horizontal([Constraint::Max(FORM_MAX_WIDTH)])
            .flex(Flex::Center)
            .areas(area);

        let description = Self::description_lines(form.width);
        let [title_area, _, text_area, _, input_area, error_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(description.len() as u16),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(form);

        frame.render_widget(
            Paragraph::new(Span::styled(
                INPUT_TITLE,
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            )),
            title_area,
        );
        frame.render_widget(Paragraph::new(description), text_area);

        self.input_box.render(frame, input_area);

        if let Some(error) = self.zip_error {
            frame.render_widget(
                Paragraph::new(Span::styled(error, Style::default().fg(Color::LightRed))),
                error_area,
            );
        }
    }
}

impl Component for InputPage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width >= TWO_COLUMN_MIN_WIDTH {
            let [globe_area, form_area] =
                Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .areas(area);
            Globe::new(self.frame_index, true).render(frame, globe_area);
            self.render_form(frame, form_area);
        } else {
            self.render_form(frame, area);
        }
    }
}
