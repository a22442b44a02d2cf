//! # Application State
//!
//! Core business state for the eco-score flow. This module contains domain
//! logic only, no TUI-specific types. Presentation state lives in the `tui`
//! module.
//!
//! ```text
//! App
//! ├── zip: String                      // requested ZIP ("" when unset)
//! ├── result: Option<GreenScoreResult> // last fetched score
//! ├── is_loading: bool                 // fetch outstanding
//! ├── error: Option<String>            // user-facing fetch failure
//! ├── page: Page                       // current page
//! ├── zip_error: Option<String>        // inline validation message (Input)
//! ├── checking_zip: bool               // existence check outstanding
//! ├── generation: u64                  // token of the current request
//! ├── fetched_at: Option<DateTime>     // when `result` arrived
//! ├── show_note: bool                  // accuracy note visible on Score
//! ├── status_message: String           // title bar text
//! └── backend_configured: bool         // false when no base URL was given
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use chrono::{DateTime, Local};

use crate::api::GreenScoreResult;
use crate::core::route::Page;

pub struct App {
    pub zip: String,
    pub result: Option<GreenScoreResult>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub page: Page,
    pub zip_error: Option<String>,
    pub checking_zip: bool,
    /// Incremented whenever a request starts or is abandoned. Completions
    /// carrying any other value are stale and dropped.
    pub generation: u64,
    pub fetched_at: Option<DateTime<Local>>,
    pub show_note: bool,
    pub status_message: String,
    pub backend_configured: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            zip: String::new(),
            result: None,
            is_loading: false,
            error: None,
            page: Page::Home,
            zip_error: None,
            checking_zip: false,
            generation: 0,
            fetched_at: None,
            show_note: true,
            status_message: String::new(),
            backend_configured: true,
        }
    }

    pub fn set_zip(&mut self, zip: impl Into<String>) {
        self.zip = zip.into();
    }

    pub fn set_result(&mut self, result: Option<GreenScoreResult>) {
        self.fetched_at = result.as_ref().map(|_| Local::now());
        self.result = result;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// True while an existence check or a score fetch is outstanding.
    pub fn is_busy(&self) -> bool {
        self.checking_zip || self.is_loading
    }

    /// Invalidates whatever request is in flight and returns the new token.
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// True when `result` already holds the score for `zip`.
    pub fn has_result_for(&self, zip: &str) -> bool {
        self.result.as_ref().is_some_and(|r| r.zip == zip)
    }
}
