//! # Network Services
//!
//! The two outbound collaborators of the flow, each behind a trait so the
//! flow can be driven against fakes or mock servers:
//!
//! - [`client`]: `ScoreClient`, the scoring backend
//! - [`zip_lookup`]: `ZipLookup`, the ZIP existence directory
//!
//! [`Services::perform`] turns an [`Effect`] from the core reducer into the
//! completion [`Action`] that reports its outcome.

pub mod client;
pub mod types;
pub mod zip_lookup;

use std::sync::Arc;
use std::time::Duration;

use log::debug;

pub use client::{DEFAULT_SCORE_TIMEOUT, GreenScoreClient, ScoreClient, ScoreError};
pub use types::{
    CategoryFailure, CategoryKey, CategoryMetrics, Coordinates, GreenScoreResult, ScoreCategory,
};
pub use zip_lookup::{SkipLookup, ZipLookup, ZippopotamLookup};

use crate::core::action::{Action, Effect};
use crate::core::config::ResolvedConfig;

/// The services an effect may need, shareable across spawned tasks.
#[derive(Clone)]
pub struct Services {
    pub scores: Arc<dyn ScoreClient>,
    pub zips: Arc<dyn ZipLookup>,
    pub score_timeout: Duration,
}

impl Services {
    pub fn new(
        scores: Arc<dyn ScoreClient>,
        zips: Arc<dyn ZipLookup>,
        score_timeout: Duration,
    ) -> Self {
        Self {
            scores,
            zips,
            score_timeout,
        }
    }

    /// Build the HTTP-backed services described by a resolved config.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let zips: Arc<dyn ZipLookup> = if config.zip_lookup_enabled {
            Arc::new(ZippopotamLookup::new(
                Some(config.zip_lookup_base_url.clone()),
                config.zip_lookup_timeout,
            ))
        } else {
            Arc::new(SkipLookup)
        };
        Self::new(
            Arc::new(GreenScoreClient::new(config.score_base_url.clone())),
            zips,
            config.score_timeout,
        )
    }

    /// Whether the score backend has a base URL to talk to.
    pub fn backend_configured(&self) -> bool {
        self.scores.is_configured()
    }

    /// Carry out one effect and return the action that reports its outcome.
    ///
    /// Returns `None` for effects that involve no I/O.
    pub async fn perform(&self, effect: Effect) -> Option<Action> {
        match effect {
            Effect::CheckZip { zip, generation } => {
                let exists = self.zips.exists(&zip).await;
                debug!("ZIP check for {zip} (generation {generation}): exists={exists}");
                Some(Action::ZipChecked {
                    zip,
                    exists,
                    generation,
                })
            }
            Effect::FetchScore { zip, generation } => {
                let outcome = self.scores.fetch_score(&zip, self.score_timeout).await;
                Some(Action::ScoreLoaded {
                    zip,
                    generation,
                    outcome,
                })
            }
            Effect::None | Effect::Quit => None,
        }
    }
}
