//! # Loading Page Component
//!
//! Shown while a score fetch is outstanding: a title plus a ship sailing
//! back and forth along a quadratic Bézier arc.
//!
//! Points are in unit space (`0.0..=1.0` both ways, y up) so the arc scales
//! with the terminal.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::widgets::canvas::{Canvas, Points};

use crate::tui::component::Component;

pub const LOADING_TITLE: &str = "CALCULATING YOUR ECO-SCORE...";

const START: (f64, f64) = (0.08, 0.12);
const CONTROL: (f64, f64) = (0.50, 0.84);
const END: (f64, f64) = (0.92, 0.12);

/// Frames for one leg of the trip (~3.8s at the animation rate).
const LEG_FRAMES: usize = 46;
const TRAIL_STEPS: usize = 90;

/// Point on the arc at `t` in `0.0..=1.0`.
pub fn bezier_point(t: f64) -> (f64, f64) {
    let mt = 1.0 - t;
    (
        mt * mt * START.0 + 2.0 * mt * t * CONTROL.0 + t * t * END.0,
        mt * mt * START.1 + 2.0 * mt * t * CONTROL.1 + t * t * END.1,
    )
}

/// Direction of travel at `t`, as `(dx, dy)`.
fn bezier_tangent(t: f64) -> (f64, f64) {
    let mt = 1.0 - t;
    (
        2.0 * mt * (CONTROL.0 - START.0) + 2.0 * t * (END.0 - CONTROL.0),
        2.0 * mt * (CONTROL.1 - START.1) + 2.0 * t * (END.1 - CONTROL.1),
    )
}

/// Ping-pong progress along the arc with ease-in-out.
/// Returns `(t, forward)`.
pub fn ship_progress(frame_index: usize) -> (f64, bool) {
    let step = frame_index % (LEG_FRAMES * 2);
    let forward = step < LEG_FRAMES;
    let leg = if forward { step } else { LEG_FRAMES * 2 - step };
    let x = leg as f64 / LEG_FRAMES as f64;
    (x * x * (3.0 - 2.0 * x), forward)
}

/// Arrow glyph pointing along `(dx, dy)`.
fn heading_glyph(dx: f64, dy: f64) -> &'static str {
    let angle = dy.atan2(dx).to_degrees();
    match angle {
        a if (-22.5..22.5).contains(&a) => "→",
        a if (22.5..67.5).contains(&a) => "↗",
        a if (67.5..112.5).contains(&a) => "↑",
        a if (112.5..157.5).contains(&a) => "↖",
        a if (-67.5..-22.5).contains(&a) => "↘",
        a if (-112.5..-67.5).contains(&a) => "↓",
        a if (-157.5..-112.5).contains(&a) => "↙",
        _ => "←",
    }
}

pub struct LoadingPage<'a> {
    pub zip: &'a str,
    pub frame_index: usize,
}

impl<'a> LoadingPage<'a> {
    pub fn new(zip: &'a str, frame_index: usize) -> Self {
        Self { zip, frame_index }
    }
}

impl Component for LoadingPage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [_, title_area, sub_area, arc_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                LOADING_TITLE,
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            title_area,
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("ZIP {}", self.zip), Style::default().fg(Color::White)),
                Span::styled("  ·  Esc to cancel", Style::default().fg(Color::DarkGray)),
            ]))
            .alignment(Alignment::Center),
            sub_area,
        );

        if arc_area.height < 3 {
            return;
        }

        let trail: Vec<(f64, f64)> = (0..=TRAIL_STEPS)
            .map(|i| bezier_point(i as f64 / TRAIL_STEPS as f64))
            .collect();
        let (t, forward) = ship_progress(self.frame_index);
        let (x, y) = bezier_point(t);
        let (dx, dy) = bezier_tangent(t);
        let glyph = if forward {
            heading_glyph(dx, dy)
        } else {
            heading_glyph(-dx, -dy)
        };

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, 1.0])
            .y_bounds([0.0, 1.0])
            .paint(move |ctx| {
                ctx.draw(&Points {
                    coords: &trail,
                    color: Color::DarkGray,
                });
                ctx.layer();
                ctx.print(
                    x,
                    y,
                    Span::styled(
                        glyph,
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            });
        frame.render_widget(canvas, arc_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_bezier_endpoints_and_apex() {
        assert_eq!(bezier_point(0.0), START);
        assert_eq!(bezier_point(1.0), END);
        let (x, y) = bezier_point(0.5);
        assert!((x - 0.5).abs() < 1e-9);
        assert!(y > START.1 && y < CONTROL.1);
    }

    #[test]
    fn test_ship_ping_pongs() {
        assert_eq!(ship_progress(0), (0.0, true));
        let (t, forward) = ship_progress(LEG_FRAMES);
        assert!((t - 1.0).abs() < 1e-9);
        assert!(!forward);
        assert_eq!(ship_progress(LEG_FRAMES * 2), (0.0, true));
        for frame_index in 0..LEG_FRAMES * 4 {
            let (t, _) = ship_progress(frame_index);
            assert!((0.0..=1.0).contains(&t));
        }
    }

    #[test]
    fn test_heading_glyphs() {
        assert_eq!(heading_glyph(1.0, 0.0), "→");
        assert_eq!(heading_glyph(1.0, 1.0), "↗");
        assert_eq!(heading_glyph(1.0, -1.0), "↘");
        assert_eq!(heading_glyph(-1.0, 0.0), "←");
    }

    #[test]
    fn test_loading_page_shows_title_and_zip() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| LoadingPage::new("77005", 10).render(f, f.area()))
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains(LOADING_TITLE));
        assert!(text.contains("ZIP 77005"));
    }
}
