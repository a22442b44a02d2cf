//! # Actions
//!
//! Everything that can happen in the eco-score flow becomes an `Action`.
//! User presses Enter on the input page? That's `Action::SubmitZip(text)`.
//! The backend answers? That's `Action::ScoreLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns the `Effect` the adapter must carry out. No I/O
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Page flow
//!
//! ```text
//!            Start            ZipChecked(true)         ScoreLoaded
//!   Home ───────────▶ Input ─────────────────▶ Loading ────────────▶ Score
//!    ▲                 ▲  │ SubmitZip (invalid /                        │
//!    │                 │  └─ nonexistent: stay, inline error)           │
//!    │                 └────────────── CalculateAnother ────────────────┘
//!    └── GoHome / unknown route (from anywhere)
//!
//!   Navigate(/score?zip=Z) from anywhere → Score, fetching Z unless cached
//! ```
//!
//! Each request carries the `generation` it was started under. Leaving a
//! page or starting another request bumps `App::generation`, so a late
//! completion is recognised as stale and dropped.

use log::{debug, info, warn};

use crate::api::{GreenScoreResult, ScoreError};
use crate::core::route::{Page, Route};
use crate::core::state::App;
use crate::core::zip::{self, INVALID_ZIP_MESSAGE, UNKNOWN_ZIP_MESSAGE};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Leave the home page for the input page.
    Start,
    /// Submit the text typed on the input page.
    SubmitZip(String),
    /// Existence check finished.
    ZipChecked {
        zip: String,
        exists: bool,
        generation: u64,
    },
    /// Score fetch finished.
    ScoreLoaded {
        zip: String,
        generation: u64,
        outcome: Result<GreenScoreResult, ScoreError>,
    },
    /// "Calculate another score" on the score page.
    CalculateAnother,
    /// Direct navigation to a path.
    Navigate(Route),
    GoHome,
    DismissNote,
    Quit,
}

/// Work the adapter must perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    CheckZip { zip: String, generation: u64 },
    FetchScore { zip: String, generation: u64 },
}

impl Effect {
    /// Generation of the request this effect starts, if any.
    pub fn generation(&self) -> Option<u64> {
        match self {
            Effect::CheckZip { generation, .. } | Effect::FetchScore { generation, .. } => {
                Some(*generation)
            }
            Effect::None | Effect::Quit => None,
        }
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Start => {
            if app.page == Page::Home {
                app.page = Page::Input;
                app.zip_error = None;
            }
            Effect::None
        }

        Action::SubmitZip(input) => submit_zip(app, &input),

        Action::ZipChecked {
            zip,
            exists,
            generation,
        } => {
            if generation != app.generation || !app.checking_zip {
                debug!("Dropping stale ZIP check for {zip} (generation {generation})");
                return Effect::None;
            }
            app.checking_zip = false;
            app.status_message.clear();

            if !exists {
                info!("ZIP {zip} does not exist");
                app.zip_error = Some(UNKNOWN_ZIP_MESSAGE.to_string());
                return Effect::None;
            }

            app.set_zip(zip);
            enter_loading(app)
        }

        Action::ScoreLoaded {
            zip,
            generation,
            outcome,
        } => {
            if generation != app.generation || !app.is_loading {
                debug!("Dropping stale score for {zip} (generation {generation})");
                return Effect::None;
            }
            app.set_loading(false);

            match outcome {
                Ok(result) => {
                    info!("Loaded eco-score for {zip}: overall={:?}", result.overall_score);
                    app.set_result(Some(result));
                    app.set_error(None);
                    app.status_message = format!("Loaded {zip}");
                }
                Err(e) => {
                    warn!("Eco-score fetch for {zip} failed: {e}");
                    app.set_result(None);
                    app.set_error(Some(e.user_message().to_string()));
                    app.status_message.clear();
                }
            }
            app.show_note = true;
            app.page = Page::Score;
            Effect::None
        }

        Action::CalculateAnother => {
            if app.page == Page::Score {
                abandon_requests(app);
                app.set_zip("");
                app.set_result(None);
                app.set_error(None);
                app.zip_error = None;
                app.status_message.clear();
                app.page = Page::Input;
            }
            Effect::None
        }

        Action::Navigate(route) => navigate(app, route),

        Action::GoHome => {
            abandon_requests(app);
            app.page = Page::Home;
            Effect::None
        }

        Action::DismissNote => {
            app.show_note = false;
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

fn submit_zip(app: &mut App, input: &str) -> Effect {
    if app.page != Page::Input {
        return Effect::None;
    }
    if app.is_busy() {
        debug!("Ignoring submit while a request is outstanding");
        return Effect::None;
    }

    let Some(zip) = zip::normalize(input) else {
        app.zip_error = Some(INVALID_ZIP_MESSAGE.to_string());
        return Effect::None;
    };

    app.zip_error = None;
    app.checking_zip = true;
    app.status_message = format!("Checking {zip}…");
    let generation = app.next_generation();
    Effect::CheckZip {
        zip: zip.to_string(),
        generation,
    }
}

/// Loading page entry: fetch for the current ZIP, or bounce back to Input.
fn enter_loading(app: &mut App) -> Effect {
    if app.zip.is_empty() {
        debug!("Loading entered without a ZIP, redirecting to input");
        app.page = Page::Input;
        return Effect::None;
    }
    app.page = Page::Loading;
    start_fetch(app)
}

/// Every fetch starts from a clean slate: no stale result or error.
fn start_fetch(app: &mut App) -> Effect {
    app.set_result(None);
    app.set_error(None);
    app.set_loading(true);
    app.status_message = format!("Fetching eco-score for {}…", app.zip);
    let generation = app.next_generation();
    Effect::FetchScore {
        zip: app.zip.clone(),
        generation,
    }
}

/// Forget any outstanding check or fetch; its completion will be stale.
fn abandon_requests(app: &mut App) {
    if app.is_busy() {
        debug!("Abandoning in-flight request (generation {})", app.generation);
        app.next_generation();
        app.checking_zip = false;
        app.set_loading(false);
        app.status_message.clear();
    }
}

fn navigate(app: &mut App, route: Route) -> Effect {
    info!("Navigating to {route}");
    match route {
        Route::Home => {
            abandon_requests(app);
            app.page = Page::Home;
            Effect::None
        }
        Route::Input => {
            abandon_requests(app);
            app.page = Page::Input;
            Effect::None
        }
        Route::Loading => {
            abandon_requests(app);
            enter_loading(app)
        }
        Route::Score { zip: None } => {
            abandon_requests(app);
            app.page = Page::Score;
            Effect::None
        }
        Route::Score { zip: Some(raw) } => deep_link_score(app, &raw),
        Route::NotFound(raw) => {
            warn!("Unknown route {raw:?}, redirecting home");
            abandon_requests(app);
            app.page = Page::Home;
            Effect::None
        }
    }
}

fn deep_link_score(app: &mut App, raw: &str) -> Effect {
    let Some(zip) = zip::normalize(raw) else {
        warn!("Deep link with malformed ZIP {raw:?}");
        abandon_requests(app);
        app.zip_error = Some(INVALID_ZIP_MESSAGE.to_string());
        app.page = Page::Input;
        return Effect::None;
    };

    // Re-entry for a ZIP already shown or already being fetched is a no-op.
    let fetching_same = app.is_loading && app.page == Page::Score && app.zip == zip;
    if fetching_same {
        return Effect::None;
    }
    if app.has_result_for(zip) {
        abandon_requests(app);
        app.set_zip(zip);
        app.page = Page::Score;
        return Effect::None;
    }

    abandon_requests(app);
    app.set_zip(zip);
    app.zip_error = None;
    app.page = Page::Score;
    start_fetch(app)
}
