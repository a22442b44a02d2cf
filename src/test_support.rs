//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{
    CategoryFailure, CategoryMetrics, Coordinates, GreenScoreResult, ScoreCategory, ScoreClient,
    ScoreError, ZipLookup,
};
use crate::core::state::App;

/// Score client that returns a canned outcome and counts calls.
pub struct FakeScores {
    outcome: Result<GreenScoreResult, ScoreError>,
    calls: AtomicUsize,
}

impl FakeScores {
    pub fn new(outcome: Result<GreenScoreResult, ScoreError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScoreClient for FakeScores {
    async fn fetch_score(
        &self,
        _zip: &str,
        _timeout: Duration,
    ) -> Result<GreenScoreResult, ScoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// ZIP directory with a fixed answer.
pub struct FakeZips {
    exists: bool,
}

impl FakeZips {
    pub fn new(exists: bool) -> Self {
        Self { exists }
    }
}

#[async_trait]
impl ZipLookup for FakeZips {
    async fn exists(&self, _zip: &str) -> bool {
        self.exists
    }
}

/// Creates a test App with the default fetch timeout.
pub fn test_app() -> App {
    App::new()
}

/// A small but varied result: a success, a failure and a demographics card.
pub fn sample_result(zip: &str) -> GreenScoreResult {
    let mut scores = BTreeMap::new();
    scores.insert(
        "air_quality".to_string(),
        ScoreCategory::Success(CategoryMetrics {
            score: Some(74.0),
            max_aqi: Some(48.0),
            primary_pollutant: Some("O3".to_string()),
            ..Default::default()
        }),
    );
    scores.insert(
        "tree_canopy".to_string(),
        ScoreCategory::Success(CategoryMetrics {
            score: Some(61.0),
            percentage: Some(23.456),
            ..Default::default()
        }),
    );
    scores.insert(
        "traffic".to_string(),
        ScoreCategory::Failure(CategoryFailure {
            error: "upstream unavailable".to_string(),
            timeout: true,
        }),
    );
    scores.insert(
        "demographics".to_string(),
        ScoreCategory::Success(CategoryMetrics {
            total_population: Some(24_567.0),
            median_income: Some(98_250.0),
            ..Default::default()
        }),
    );

    GreenScoreResult {
        zip: zip.to_string(),
        coordinates: Coordinates {
            lat: 29.71,
            lng: -95.40,
        },
        scores,
        overall_score: Some(82.0),
    }
}
