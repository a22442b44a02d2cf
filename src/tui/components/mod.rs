//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters and are created
//! fresh each frame:
//! - `TitleBar`: Top status bar showing the current path and status
//! - `HomePage`, `LoadingPage`: Animated screens driven by a frame index
//! - `MapView`, `Globe`: World-map canvases
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state across frames and emit events:
//! - `InputBox`: ZIP entry field
//! - `RoutePromptState`: Go-to overlay
//! - `ScoreDetailsState`: Scroll position of the score breakdown
//!
//! Page wrappers (`InputPage`, `ScorePage`) borrow that state for one frame.
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props" (function parameters), not by
//! reaching into `App`. This keeps dependencies explicit and components
//! testable with `TestBackend`.
//!
//! ```rust,ignore
//! // Dependencies are explicit
//! TitleBar::new(app.page.path(), app.status_message.clone(), app.backend_configured)
//!     .render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (Top status bar)
//! ├── home_page.rs      (Landing screen)
//! ├── input_page.rs     (ZIP entry screen)
//! ├── input_box.rs      (ZIP field)
//! ├── loading_page.rs   (Bézier ship animation)
//! ├── score_page.rs     (Map + stats panel)
//! ├── score_details.rs  (Scrollable category cards)
//! ├── map_view.rs       (MapView, Globe)
//! └── route_prompt.rs   (Ctrl+G overlay)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod home_page;
pub mod input_box;
pub mod input_page;
pub mod loading_page;
pub mod map_view;
pub mod route_prompt;
pub mod score_details;
pub mod score_page;

pub use home_page::HomePage;
pub use input_box::{InputBox, InputEvent};
pub use input_page::InputPage;
pub use loading_page::LoadingPage;
pub use route_prompt::{RouteEvent, RoutePrompt, RoutePromptState};
pub use score_details::ScoreDetailsState;
pub use score_page::ScorePage;
