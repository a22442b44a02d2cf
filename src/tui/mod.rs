//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the pages,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Effects
//!
//! `update()` returns an `Effect`; network effects are spawned as tokio
//! tasks that run `Services::perform` and send the completion `Action` back
//! over an mpsc channel. Only one request is ever live: when the reducer
//! moves `App::generation` past the running task's generation, the task is
//! aborted. Its completion would be dropped as stale anyway.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (home, input, loading): draws every ~80ms.
//! - **Idle** (score): sleeps up to 500ms, only redraws on events, completions
//!   or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::api::Services;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::route::{Page, Route};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    InputBox, InputEvent, RouteEvent, RoutePromptState, ScoreDetailsState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub input_box: InputBox,
    pub score_details: ScoreDetailsState,
    // Go-to overlay (None = hidden)
    pub route_prompt: Option<RoutePromptState>,
    // Page drawn last frame, to detect transitions
    pub last_page: Page,
    pub highlight_radius_m: f64,
}

impl TuiState {
    pub fn new(highlight_radius_m: f64) -> Self {
        Self {
            input_box: InputBox::new(),
            score_details: ScoreDetailsState::new(),
            route_prompt: None,
            last_page: Page::Home,
            highlight_radius_m,
        }
    }

    /// Resets per-page component state when the page changes.
    fn sync_page(&mut self, page: Page) {
        if page == self.last_page {
            return;
        }
        debug!("Page {} -> {}", self.last_page.path(), page.path());
        match page {
            Page::Input => self.input_box.clear(),
            Page::Score => self.score_details.reset(),
            Page::Home | Page::Loading => {}
        }
        self.last_page = page;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// The request currently in flight.
struct ActiveRequest {
    generation: u64,
    handle: AbortHandle,
}

/// Owns the app state plus everything needed to carry out effects.
struct Driver {
    app: App,
    services: Services,
    tx: mpsc::Sender<Action>,
    active: Option<ActiveRequest>,
}

impl Driver {
    /// Runs one action through the reducer and carries out its effect.
    /// Returns true when the app should quit.
    fn dispatch(&mut self, action: Action) -> bool {
        let effect = update(&mut self.app, action);

        if let Some(active) = &self.active
            && active.generation != self.app.generation
        {
            debug!("Aborting superseded request (generation {})", active.generation);
            active.handle.abort();
            self.active = None;
        }

        match effect {
            Effect::Quit => true,
            Effect::None => false,
            effect => {
                self.active = spawn_effect(&self.services, effect, self.tx.clone());
                false
            }
        }
    }
}

pub fn run(config: ResolvedConfig, initial_route: Option<Route>) -> std::io::Result<()> {
    let (tx, rx) = mpsc::channel();
    let services = Services::from_config(&config);
    let mut app = App::new();
    app.backend_configured = services.backend_configured();
    let mut driver = Driver {
        app,
        services,
        tx,
        active: None,
    };
    let mut tui = TuiState::new(config.highlight_radius_m);

    if let Some(route) = initial_route {
        info!("Opening initial route {route}");
        driver.dispatch(Action::Navigate(route));
        tui.sync_page(driver.app.page);
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true;

    loop {
        // Sync InputBox props with App state
        tui.input_box.checking = driver.app.checking_zip;
        tui.input_box.has_error = driver.app.zip_error.is_some();

        let animating = driver.app.page != Page::Score;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let frame_index = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &driver.app, &mut tui, frame_index))?;
            needs_redraw = false;
        }

        // Short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            should_quit |= handle_event(&mut driver, &mut tui, event);
            tui.sync_page(driver.app.page);
            if should_quit {
                break;
            }
        }

        if should_quit {
            break;
        }

        // Completions from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if driver.dispatch(action) {
                should_quit = true;
            }
            tui.sync_page(driver.app.page);
        }

        if should_quit {
            break;
        }
    }

    if let Some(active) = driver.active.take() {
        active.handle.abort();
    }

    ratatui::restore();
    Ok(())
}

/// Routes one terminal event. Returns true when the app should quit.
fn handle_event(driver: &mut Driver, tui: &mut TuiState, event: TuiEvent) -> bool {
    match event {
        TuiEvent::Resize => return false,
        TuiEvent::ForceQuit => return driver.dispatch(Action::Quit),
        _ => {}
    }

    // When the route prompt is open, it gets every event
    if let Some(prompt) = tui.route_prompt.as_mut() {
        match prompt.handle_event(&event) {
            Some(RouteEvent::Go(path)) => {
                tui.route_prompt = None;
                return driver.dispatch(Action::Navigate(Route::parse(&path)));
            }
            Some(RouteEvent::Dismiss) => tui.route_prompt = None,
            None => {}
        }
        return false;
    }

    match event {
        TuiEvent::OpenRoutePrompt => {
            tui.route_prompt = Some(RoutePromptState::new());
            return false;
        }
        TuiEvent::Escape if driver.app.page == Page::Home => {
            return driver.dispatch(Action::Quit);
        }
        TuiEvent::Escape => return driver.dispatch(Action::GoHome),
        _ => {}
    }

    match driver.app.page {
        Page::Home => match event {
            TuiEvent::Submit => driver.dispatch(Action::Start),
            _ => false,
        },
        Page::Input => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Submit(text)) => driver.dispatch(Action::SubmitZip(text)),
            Some(InputEvent::ContentChanged) | None => false,
        },
        Page::Loading => false,
        Page::Score => match event {
            TuiEvent::Submit | TuiEvent::InputChar('n') => {
                driver.dispatch(Action::CalculateAnother)
            }
            TuiEvent::InputChar('x') => driver.dispatch(Action::DismissNote),
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown => {
                tui.score_details.handle_event(&event);
                false
            }
            _ => false,
        },
    }
}

/// Spawns the task that carries out a network effect.
fn spawn_effect(
    services: &Services,
    effect: Effect,
    tx: mpsc::Sender<Action>,
) -> Option<ActiveRequest> {
    let generation = effect.generation()?;
    info!("Spawning {:?}", effect);
    let services = services.clone();
    let handle = tokio::spawn(async move {
        if let Some(action) = services.perform(effect).await
            && tx.send(action).is_err()
        {
            warn!("Failed to send completion: receiver dropped");
        }
    });
    Some(ActiveRequest {
        generation,
        handle: handle.abort_handle(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DEFAULT_SCORE_TIMEOUT, ScoreError};
    use crate::test_support::{FakeScores, FakeZips, sample_result, test_app};
    use std::sync::Arc;

    fn driver(exists: bool) -> (Driver, mpsc::Receiver<Action>) {
        let (tx, rx) = mpsc::channel();
        let services = Services::new(
            Arc::new(FakeScores::new(Ok(sample_result("77005")))),
            Arc::new(FakeZips::new(exists)),
            DEFAULT_SCORE_TIMEOUT,
        );
        (
            Driver {
                app: test_app(),
                services,
                tx,
                active: None,
            },
            rx,
        )
    }

    fn recv(rx: &mpsc::Receiver<Action>) -> Action {
        rx.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_keyboard_flow_reaches_score() {
        let (mut driver, rx) = driver(true);
        let mut tui = TuiState::new(6_000.0);

        handle_event(&mut driver, &mut tui, TuiEvent::Submit);
        tui.sync_page(driver.app.page);
        assert_eq!(driver.app.page, Page::Input);

        for c in "77005".chars() {
            handle_event(&mut driver, &mut tui, TuiEvent::InputChar(c));
        }
        handle_event(&mut driver, &mut tui, TuiEvent::Submit);
        assert!(driver.app.checking_zip);

        let checked = recv(&rx);
        assert!(!driver.dispatch(checked));
        assert_eq!(driver.app.page, Page::Loading);

        let loaded = recv(&rx);
        assert!(!driver.dispatch(loaded));
        assert_eq!(driver.app.page, Page::Score);
        assert_eq!(driver.app.result.as_ref().unwrap().overall_score, Some(82.0));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_escape_goes_home_then_quits() {
        let (mut driver, _rx) = driver(true);
        let mut tui = TuiState::new(6_000.0);
        driver.app.page = Page::Input;

        assert!(!handle_event(&mut driver, &mut tui, TuiEvent::Escape));
        assert_eq!(driver.app.page, Page::Home);
        assert!(handle_event(&mut driver, &mut tui, TuiEvent::Escape));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_force_quit_from_any_page() {
        let (mut driver, _rx) = driver(true);
        let mut tui = TuiState::new(6_000.0);
        driver.app.page = Page::Loading;
        assert!(handle_event(&mut driver, &mut tui, TuiEvent::ForceQuit));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_route_prompt_navigates() {
        let (mut driver, rx) = driver(true);
        let mut tui = TuiState::new(6_000.0);

        handle_event(&mut driver, &mut tui, TuiEvent::OpenRoutePrompt);
        assert!(tui.route_prompt.is_some());
        for c in "score?zip=77005".chars() {
            handle_event(&mut driver, &mut tui, TuiEvent::InputChar(c));
        }
        handle_event(&mut driver, &mut tui, TuiEvent::Submit);
        assert!(tui.route_prompt.is_none());
        assert_eq!(driver.app.page, Page::Score);
        assert!(driver.app.is_loading);

        let loaded = recv(&rx);
        driver.dispatch(loaded);
        assert!(driver.app.has_result_for("77005"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_leaving_loading_aborts_request() {
        let (mut driver, _rx) = driver(true);
        driver.app.set_zip("77005");
        driver.dispatch(Action::Navigate(Route::Loading));
        assert!(driver.active.is_some());

        driver.dispatch(Action::GoHome);
        assert!(driver.active.is_none());
        assert!(!driver.app.is_loading);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_score_page_keys() {
        let (mut driver, _rx) = driver(true);
        let mut tui = TuiState::new(6_000.0);
        driver.app.page = Page::Score;
        driver.app.set_zip("77005");
        driver.app.set_result(Some(sample_result("77005")));

        handle_event(&mut driver, &mut tui, TuiEvent::InputChar('x'));
        assert!(!driver.app.show_note);

        handle_event(&mut driver, &mut tui, TuiEvent::InputChar('n'));
        assert_eq!(driver.app.page, Page::Input);
        assert!(driver.app.result.is_none());
    }

    #[test]
    fn test_entering_input_clears_buffer() {
        let mut tui = TuiState::new(6_000.0);
        tui.input_box.buffer = "123".to_string();
        tui.sync_page(Page::Score);
        assert_eq!(tui.input_box.buffer, "123");
        tui.sync_page(Page::Input);
        assert!(tui.input_box.buffer.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_fetch_reports_error() {
        let (tx, rx) = mpsc::channel();
        let mut driver = Driver {
            app: test_app(),
            services: Services::new(
                Arc::new(FakeScores::new(Err(ScoreError::Timeout))),
                Arc::new(FakeZips::new(true)),
                DEFAULT_SCORE_TIMEOUT,
            ),
            tx,
            active: None,
        };
        driver.dispatch(Action::Navigate(Route::parse("/score?zip=10001")));
        let loaded = recv(&rx);
        driver.dispatch(loaded);
        assert_eq!(
            driver.app.error.as_deref(),
            Some("Request timed out. Please try again.")
        );
        assert_eq!(driver.app.page, Page::Score);
    }
}
