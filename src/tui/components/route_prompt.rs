//! # Route Prompt Component
//!
//! Small overlay for jumping straight to a path, the terminal stand-in for
//! typing a URL. Opened with Ctrl+G, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RoutePromptState` lives in `TuiState`
//! - `RoutePrompt` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

/// Persistent state for the route prompt overlay.
pub struct RoutePromptState {
    pub buffer: String,
}

/// Events emitted by the route prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteEvent {
    Go(String),
    Dismiss,
}

impl RoutePromptState {
    pub fn new() -> Self {
        Self {
            buffer: String::from("/"),
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<RouteEvent> {
        match event {
            TuiEvent::Escape => Some(RouteEvent::Dismiss),
            TuiEvent::Submit => Some(RouteEvent::Go(self.buffer.trim().to_string())),
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                None
            }
            TuiEvent::Paste(text) => {
                self.buffer.push_str(text.trim());
                None
            }
            TuiEvent::Backspace => {
                self.buffer.pop();
                None
            }
            _ => None,
        }
    }
}

impl Default for RoutePromptState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RoutePrompt<'a> {
    pub state: &'a RoutePromptState,
}

impl<'a> RoutePrompt<'a> {
    pub fn new(state: &'a RoutePromptState) -> Self {
        Self { state }
    }
}

impl Component for RoutePrompt<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [row] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::horizontal([Constraint::Max(60)])
            .flex(Flex::Center)
            .areas(row);

        frame.render_widget(Clear, popup);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Go to ")
            .title_bottom(Line::from(vec![
                Span::styled(" Enter ", Style::default().fg(Color::Cyan)),
                Span::raw("go  "),
                Span::styled("Esc ", Style::default().fg(Color::Cyan)),
                Span::raw("cancel "),
            ]));
        frame.render_widget(Paragraph::new(self.state.buffer.as_str()).block(block), popup);

        let cursor_x = popup.x + 1 + self.state.buffer.chars().count() as u16;
        frame.set_cursor_position((cursor_x.min(popup.right().saturating_sub(2)), popup.y + 1));
    }
}
