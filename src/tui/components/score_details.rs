//! # ScoreDetails Component
//!
//! Scrollable breakdown of a `GreenScoreResult`.
//!
//! ```text
//! ╭ Overall Score ──────────╮
//! │ 82                      │
//! ╰─────────────────────────╯
//! ╭ Note ───────────────────╮   (until dismissed with x)
//! ╰─────────────────────────╯
//! ╭ Air Quality ────────────╮
//! │ Score: 90               │   one card per category,
//! │ Max AQI: 42 (PM2.5)     │   in display order
//! ╰─────────────────────────╯
//! ```
//!
//! Card text comes from [`category_lines`], which is pure and tested on its
//! own. Card heights are measured with `Paragraph::line_count` so the scroll
//! canvas is exactly as tall as its content.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::{CategoryKey, CategoryMetrics, GreenScoreResult, ScoreCategory};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const NOTE_TEXT: &str =
    "Score may not be accurate. Some data may be outdated or incorrect. This is a general idea.";
pub const UNAVAILABLE_TEXT: &str = "Data unavailable for this category.";

/// Formats a number the way a browser prints it: no trailing `.0`.
pub fn fmt_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Formats with thousands separators and at most three decimals.
pub fn fmt_grouped(value: f64) -> String {
    if !value.is_finite() {
        return fmt_number(value);
    }
    let fixed = format!("{:.3}", value.abs());
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (trimmed, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    if value < 0.0 && trimmed != "0" {
        grouped.insert(0, '-');
    }
    grouped
}

/// Fixed-point formatting that rounds exact ties away from zero, as a
/// browser's `toFixed` does. `{:.N}` alone rounds ties to even.
pub fn fmt_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return fmt_number(value);
    }
    let abs = value.abs();
    let abs = if is_decimal_tie(abs, digits) {
        // One ulp up lands strictly past the tie
        f64::from_bits(abs.to_bits() + 1)
    } else {
        abs
    };
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{abs:.digits$}")
}

/// True when `abs` sits exactly halfway between two `digits`-place decimals,
/// i.e. `abs * 2 * 10^digits` is an odd integer.
fn is_decimal_tie(abs: f64, digits: usize) -> bool {
    let bits = abs.to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exp) = if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exp_bits - 1075)
    };
    if mantissa == 0 {
        return false;
    }
    // mantissa * 5^digits stays odd, so only the power of two matters
    exp + mantissa.trailing_zeros() as i64 == -(digits as i64 + 1)
}

/// Detail lines for one category card.
pub fn category_lines(key: CategoryKey, category: &ScoreCategory) -> Vec<String> {
    match category {
        ScoreCategory::Failure(_) => vec![UNAVAILABLE_TEXT.to_string()],
        ScoreCategory::Success(metrics) => metric_lines(key, metrics),
    }
}

fn metric_lines(key: CategoryKey, m: &CategoryMetrics) -> Vec<String> {
    let mut lines = Vec::new();

    if key != CategoryKey::Demographics {
        lines.push(format!(
            "Score: {}",
            m.score.map(fmt_number).unwrap_or_else(|| "N/A".to_string())
        ));
        if let Some(pct) = m.percentage {
            lines.push(format!("Percentage: {}%", fmt_fixed(pct, 1)));
        }
    }

    if key == CategoryKey::AirQuality
        && let Some(aqi) = m.max_aqi
    {
        let pollutant = m
            .primary_pollutant
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!(" ({p})"))
            .unwrap_or_default();
        lines.push(format!("Max AQI: {}{}", fmt_number(aqi), pollutant));
    }

    if let Some(km) = m.nearest_flood_distance_km {
        lines.push(format!("Nearest Flood: {} km", fmt_fixed(km, 1)));
    }
    if let Some(in_100_year) = m.in_100_year {
        lines.push(format!(
            "100 Year Flood? {}",
            if in_100_year { "Yes" } else { "No" }
        ));
    }

    match key {
        CategoryKey::Traffic => {
            if let Some(len) = m.weighted_road_length {
                lines.push(format!("Weighted Road Length: {} m", fmt_fixed(len, 0)));
            }
        }
        CategoryKey::GreenSpace => {
            if let Some(dist) = m.nearest_distance_m {
                lines.push(format!("Nearest Park: {} m", fmt_fixed(dist, 0)));
            }
            if let Some(parks) = m.num_parks {
                lines.push(format!("Parks Count: {}", fmt_number(parks)));
            }
        }
        CategoryKey::ToxicSites => {
            if let Some(sites) = m.num_sites {
                lines.push(format!("Number of Sites: {}", fmt_number(sites)));
            }
            if let Some(miles) = m.nearest_distance_miles {
                lines.push(format!("Nearest Site: {} miles", fmt_fixed(miles, 2)));
            }
        }
        CategoryKey::TransitAccess => {
            if let Some(stops) = m.stops_count {
                lines.push(format!("Stops Count: {}", fmt_number(stops)));
            }
        }
        CategoryKey::WaterAvailability => {
            if let Some(features) = m.water_features {
                lines.push(format!("Water Features: {}", fmt_number(features)));
            }
        }
        CategoryKey::SeaLevelRise => {
            if m.inundated_feet.as_ref().is_some_and(|v| !v.is_null()) {
                let levels = m.inundated_levels();
                let text = if levels.is_empty() {
                    "None".to_string()
                } else {
                    levels
                        .iter()
                        .map(|ft| format!("{ft}ft"))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                lines.push(format!("Inundated At: {text}"));
            }
        }
        CategoryKey::Demographics => {
            if let Some(pop) = m.total_population {
                lines.push(format!("Total Population: {}", fmt_grouped(pop)));
            }
            if let Some(v) = m.percent_male {
                lines.push(format!("Percent Male: {}%", fmt_fixed(v, 1)));
            }
            if let Some(v) = m.percent_female {
                lines.push(format!("Percent Female: {}%", fmt_fixed(v, 1)));
            }
            if let Some(v) = m.median_age {
                lines.push(format!("Median Age: {}", fmt_fixed(v, 1)));
            }
            if let Some(v) = m.median_income {
                lines.push(format!("Median Income: ${}", fmt_grouped(v)));
            }
            if let Some(v) = m.poverty_rate {
                lines.push(format!("Poverty Rate: {}%", fmt_fixed(v, 1)));
            }
        }
        _ => {}
    }

    lines
}

/// Scroll state for the details panel. Lives in `TuiState`.
#[derive(Default)]
pub struct ScoreDetailsState {
    pub scroll_state: ScrollViewState,
    viewport_height: u16,
    content_height: u16,
}

impl ScoreDetailsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.scroll_state = ScrollViewState::default();
    }

    fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for ScoreDetailsState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

pub struct ScoreDetails<'a> {
    pub state: &'a mut ScoreDetailsState,
    pub result: &'a GreenScoreResult,
    pub show_note: bool,
}

impl<'a> ScoreDetails<'a> {
    pub fn new(
        state: &'a mut ScoreDetailsState,
        result: &'a GreenScoreResult,
        show_note: bool,
    ) -> Self {
        Self {
            state,
            result,
            show_note,
        }
    }

    fn hero(&self) -> Paragraph<'static> {
        let score = self
            .result
            .overall_score
            .map(fmt_number)
            .unwrap_or_else(|| "N/A".to_string());
        Paragraph::new(Line::from(Span::styled(
            score,
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Overall Score "),
        )
    }

    fn note() -> Paragraph<'static> {
        Paragraph::new(Line::from(vec![
            Span::styled("Note: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(NOTE_TEXT),
        ]))
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Yellow))
                .title_bottom(" [x] dismiss "),
        )
    }

    fn card(key: CategoryKey, category: &ScoreCategory) -> Paragraph<'static> {
        let style = match category {
            ScoreCategory::Failure(_) => Style::default().fg(Color::LightRed),
            ScoreCategory::Success(_) => Style::default().fg(Color::White),
        };
        let lines: Vec<Line> = category_lines(key, category)
            .into_iter()
            .map(Line::from)
            .collect();
        Paragraph::new(lines)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(Span::styled(
                        format!(" {} ", key.label()),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )),
            )
    }
}

impl Component for ScoreDetails<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // -1 for the scrollbar
        let content_width = area.width.saturating_sub(1);

        let mut blocks = vec![self.hero()];
        if self.show_note {
            blocks.push(Self::note());
        }
        blocks.extend(
            self.result
                .categories()
                .into_iter()
                .map(|(key, category)| Self::card(key, category)),
        );

        // line_count includes the block's borders
        let heights: Vec<u16> = blocks
            .iter()
            .map(|p| p.line_count(content_width).min(u16::MAX as usize) as u16)
            .collect();
        let total_height: u16 = heights.iter().fold(0u16, |acc, h| acc.saturating_add(*h));

        self.state.viewport_height = area.height;
        self.state.content_height = total_height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y = 0u16;
        for (paragraph, height) in blocks.into_iter().zip(heights) {
            scroll_view.render_widget(paragraph, Rect::new(0, y, content_width, height));
            y = y.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
