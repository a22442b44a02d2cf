//! # Routes
//!
//! Path strings that address pages directly, as a browser URL would.
//!
//! ```text
//! /                 → Home
//! /input            → Input
//! /loading          → Loading
//! /score            → Score
//! /score?zip=10001  → Score, deep-linked to a ZIP
//! anything else     → Home
//! ```

use std::fmt;

/// The four pages of the lookup flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Input,
    Loading,
    Score,
}

impl Page {
    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Input => "/input",
            Page::Loading => "/loading",
            Page::Score => "/score",
        }
    }
}

/// A parsed navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Input,
    Loading,
    Score { zip: Option<String> },
    /// Unrecognized path; redirects to Home.
    NotFound(String),
}

impl Route {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (raw, None),
        };

        let path = path.trim_end_matches('/');
        match path {
            "" => Route::Home,
            "/input" => Route::Input,
            "/loading" => Route::Loading,
            "/score" => Route::Score {
                zip: query.and_then(|q| query_param(q, "zip")),
            },
            _ => Route::NotFound(raw.to_string()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Input => write!(f, "/input"),
            Route::Loading => write!(f, "/loading"),
            Route::Score { zip: Some(zip) } => write!(f, "/score?zip={zip}"),
            Route::Score { zip: None } => write!(f, "/score"),
            Route::NotFound(raw) => write!(f, "{raw}"),
        }
    }
}

/// First non-empty value of `key` in a `a=1&b=2` query string.
fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
