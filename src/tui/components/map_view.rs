//! # Map Components
//!
//! World-map canvases built on ratatui's `Map` shape.
//!
//! - `MapView`: zoomed on a result's coordinates with a marker and a
//!   highlight circle around it (Score page)
//! - `Globe`: slowly panning world map used as decoration (Home and Input)
//!
//! Canvas coordinates are plain degrees: x is longitude, y is latitude.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Map, MapResolution};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::api::Coordinates;
use crate::tui::component::Component;

/// Meters per degree of latitude (and of longitude at the equator).
const METERS_PER_DEGREE: f64 = 111_320.0;
/// Smallest half-width of the map viewport, in degrees.
const MIN_HALF_SPAN_DEG: f64 = 1.5;
/// Longitude window shown by the globe, in degrees.
const GLOBE_SPAN_DEG: f64 = 140.0;

/// Highlight radius expressed in degrees of latitude.
pub fn radius_in_degrees(radius_m: f64) -> f64 {
    radius_m / METERS_PER_DEGREE
}

/// Viewport bounds `([x_min, x_max], [y_min, y_max])` centred on `center`.
///
/// The viewport is wide enough to show the highlight circle four times over,
/// and never narrower than `MIN_HALF_SPAN_DEG` either side.
pub fn viewport(center: Coordinates, radius_m: f64) -> ([f64; 2], [f64; 2]) {
    let half = (radius_in_degrees(radius_m) * 4.0).max(MIN_HALF_SPAN_DEG);
    (
        [center.lng - half * 2.0, center.lng + half * 2.0],
        [center.lat - half, center.lat + half],
    )
}

fn has_valid_center(center: Option<Coordinates>) -> Option<Coordinates> {
    center.filter(|c| {
        c.lat.is_finite()
            && c.lng.is_finite()
            && (-90.0..=90.0).contains(&c.lat)
            && (-180.0..=180.0).contains(&c.lng)
    })
}

/// Map zoomed on a location.
pub struct MapView {
    pub center: Option<Coordinates>,
    pub radius_m: f64,
}

impl MapView {
    pub fn new(center: Option<Coordinates>, radius_m: f64) -> Self {
        Self { center, radius_m }
    }
}

impl Component for MapView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Map ");

        let Some(center) = has_valid_center(self.center) else {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let [row] = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(inner);
            frame.render_widget(
                Paragraph::new("Map will appear when location is available")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::LightCyan)),
                row,
            );
            return;
        };

        let (x_bounds, y_bounds) = viewport(center, self.radius_m);
        let radius = radius_in_degrees(self.radius_m);
        let show_radius = radius.is_finite() && radius > 0.0;

        let canvas = Canvas::default()
            .block(block.title_bottom(format!(
                " {:.4}, {:.4} ",
                center.lat, center.lng
            )))
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(move |ctx| {
                ctx.draw(&Map {
                    color: Color::Green,
                    resolution: MapResolution::High,
                });
                ctx.layer();
                if show_radius {
                    ctx.draw(&Circle {
                        x: center.lng,
                        y: center.lat,
                        radius,
                        color: Color::LightBlue,
                    });
                }
                ctx.print(
                    center.lng,
                    center.lat,
                    Span::styled("●", Style::default().fg(Color::White)),
                );
            });
        frame.render_widget(canvas, area);
    }
}

/// Decorative world map panning back and forth.
pub struct Globe {
    pub frame_index: usize,
    /// Draw a small ship circling the map.
    pub orbit: bool,
}

impl Globe {
    pub fn new(frame_index: usize, orbit: bool) -> Self {
        Self { frame_index, orbit }
    }

    /// Centre longitude for a frame: ping-pongs across the map.
    fn center_lng(frame_index: usize) -> f64 {
        let travel = 360.0 - GLOBE_SPAN_DEG;
        let period = (travel * 2.0) as usize;
        let step = (frame_index % period) as f64;
        let offset = if step <= travel { step } else { travel * 2.0 - step };
        -180.0 + GLOBE_SPAN_DEG / 2.0 + offset
    }
}

impl Component for Globe {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let center = Self::center_lng(self.frame_index);
        let half = GLOBE_SPAN_DEG / 2.0;
        let orbit = self.orbit;
        let angle = self.frame_index as f64 * 0.12;

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([center - half, center + half])
            .y_bounds([-60.0, 80.0])
            .paint(move |ctx| {
                ctx.draw(&Map {
                    color: Color::Cyan,
                    resolution: MapResolution::Low,
                });
                if orbit {
                    ctx.layer();
                    ctx.print(
                        center + angle.cos() * half * 0.8,
                        10.0 + angle.sin() * 55.0,
                        Span::styled("➤", Style::default().fg(Color::LightCyan)),
                    );
                }
            });
        frame.render_widget(canvas, area);
    }
}
