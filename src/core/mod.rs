//! # Core Application Logic
//!
//! This module contains the eco-score flow's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │ ── spawns ──────────────▶│    API     │
//!     │  Adapter   │ ◀── completion Action ── │ (services) │
//!     │ (ratatui)  │                          │ (reqwest)  │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`route`]: Pages and the path strings that address them
//! - [`zip`]: ZIP code syntax
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod route;
pub mod state;
pub mod zip;

pub use action::{Action, Effect, update};
pub use route::{Page, Route};
pub use state::App;
