//! Frame layout: title bar on top, the current page below, and the route
//! prompt overlay when it is open.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::route::Page;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    HomePage, InputPage, LoadingPage, RoutePrompt, ScorePage, TitleBar,
};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, frame_index: usize) {
    use Constraint::{Length, Min};
    let [title_area, main_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    TitleBar::new(
        app.page.path(),
        app.status_message.clone(),
        app.backend_configured,
    )
    .render(frame, title_area);

    match app.page {
        Page::Home => HomePage::new(frame_index).render(frame, main_area),
        Page::Input => InputPage::new(
            &mut tui.input_box,
            app.zip_error.as_deref(),
            frame_index,
        )
        .render(frame, main_area),
        Page::Loading => LoadingPage::new(&app.zip, frame_index).render(frame, main_area),
        Page::Score => ScorePage::new(app, &mut tui.score_details, tui.highlight_radius_m)
            .render(frame, main_area),
    }

    if let Some(prompt) = &tui.route_prompt {
        RoutePrompt::new(prompt).render(frame, frame.area());
    }
}
