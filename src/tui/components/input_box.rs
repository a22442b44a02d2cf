//! # InputBox Component
//!
//! Single-line ZIP code field.
//!
//! ## Responsibilities
//!
//! - Capture digits (anything else is dropped, as is input past five digits)
//! - Handle backspace and paste
//! - Handle submission (Enter)
//! - Show whether an existence check is outstanding
//!
//! The buffer is internal state. `checking` and `has_error` are props from
//! the application state. Submitting does not clear the buffer, so a
//! rejected ZIP stays in place for correction.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::zip::ZIP_LEN;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PLACEHOLDER: &str = "ZIP code (e.g., 77005)";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text content changed
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// An existence check is running (Prop)
    pub checking: bool,
    /// The last submission was rejected (Prop)
    pub has_error: bool,
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            checking: false,
            has_error: false,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Appends the digits of `text`, up to the ZIP length. Returns true if
    /// anything was added.
    fn push_digits(&mut self, text: &str) -> bool {
        let room = ZIP_LEN.saturating_sub(self.buffer.len());
        let before = self.buffer.len();
        self.buffer
            .extend(text.chars().filter(|c| c.is_ascii_digit()).take(room));
        self.buffer.len() != before
    }

    fn submit_label(&self) -> &'static str {
        if self.checking { "CHECKING…" } else { "CALCULATE" }
    }
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.has_error {
            Color::LightRed
        } else {
            Color::Cyan
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(" ZIP ")
            .title_bottom(format!(" [Enter] {} ", self.submit_label()));

        let input = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.buffer.as_str()).style(Style::default().fg(Color::White))
        };
        frame.render_widget(input.block(block), area);

        if !self.checking {
            let cursor_x = area.x + 1 + self.buffer.len() as u16;
            frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self
                .push_digits(c.encode_utf8(&mut [0; 4]))
                .then_some(InputEvent::ContentChanged),
            TuiEvent::Paste(text) => self.push_digits(text).then_some(InputEvent::ContentChanged),
            TuiEvent::Backspace => self.buffer.pop().map(|_| InputEvent::ContentChanged),
            TuiEvent::Submit => {
                if self.checking {
                    None
                } else {
                    Some(InputEvent::Submit(self.buffer.clone()))
                }
            }
            _ => None,
        }
    }
}
