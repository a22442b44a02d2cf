//! # TitleBar Component
//!
//! Top status bar showing the current route and status.
//!
//! ## Responsibilities
//!
//! - Display the path of the current page (e.g. `/score`)
//! - Display status messages (e.g. "Checking 77005…")
//! - Warn loudly when no scoring backend is configured
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"Eco-Score (/input) | Checking 77005…"`
//! 2. **Default**: `"Eco-Score (/input)"`
//!
//! The missing-backend warning is appended in red after either form.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const NO_BACKEND_WARNING: &str = "⚠ No backend configured (set ECOSCORE_BASE_URL)";

/// Top status bar component.
///
/// All fields are props from the parent: the path comes from the current
/// page, the rest from `App`.
pub struct TitleBar {
    pub path: &'static str,
    pub status_message: String,
    pub backend_configured: bool,
}

impl TitleBar {
    pub fn new(path: &'static str, status_message: String, backend_configured: bool) -> Self {
        Self {
            path,
            status_message,
            backend_configured,
        }
    }

    fn title_text(&self) -> String {
        if self.status_message.is_empty() {
            format!("Eco-Score ({})", self.path)
        } else {
            format!("Eco-Score ({}) | {}", self.path, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(self.title_text())];
        if !self.backend_configured {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                NO_BACKEND_WARNING,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
