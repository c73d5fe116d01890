//! Where raw match records come from.
//!
//! The engine never fetches anything itself. A [`MatchDataSource`] hands
//! over raw records; [`FixtureSource`] serves them from JSON, by default the
//! fixture set compiled into the binary.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{RawMatchDetail, RawMatchSummary};

/// Fixture JSON embedded at compile time.
pub const EMBEDDED_FIXTURES_JSON: &str = include_str!("../data/fixtures.json");

static EMBEDDED_FIXTURES: Lazy<FixtureSet> = Lazy::new(|| match serde_json::from_str(EMBEDDED_FIXTURES_JSON) {
    Ok(set) => set,
    Err(err) => {
        log::error!("embedded fixtures are unreadable: {err}");
        FixtureSet::default()
    }
});

pub trait MatchDataSource {
    /// Every match on the live list, scores as raw text.
    fn list_live_matches(&self) -> Vec<RawMatchSummary>;

    /// Full record for one match; `None` when the id is unknown.
    fn get_match_detail(&self, id: u32) -> Option<RawMatchDetail>;
}

impl<S: MatchDataSource + ?Sized> MatchDataSource for &S {
    fn list_live_matches(&self) -> Vec<RawMatchSummary> {
        (**self).list_live_matches()
    }

    fn get_match_detail(&self, id: u32) -> Option<RawMatchDetail> {
        (**self).get_match_detail(id)
    }
}

impl<S: MatchDataSource + ?Sized> MatchDataSource for Box<S> {
    fn list_live_matches(&self) -> Vec<RawMatchSummary> {
        (**self).list_live_matches()
    }

    fn get_match_detail(&self, id: u32) -> Option<RawMatchDetail> {
        (**self).get_match_detail(id)
    }
}

/// On-disk fixture shape: the list and the detail records side by side.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FixtureSet {
    #[serde(default)]
    pub matches: Vec<RawMatchSummary>,
    #[serde(default)]
    pub details: Vec<RawMatchDetail>,
}

#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    set: FixtureSet,
}

impl FixtureSource {
    pub fn new(set: FixtureSet) -> Self {
        Self { set }
    }

    /// Three list entries, details for matches 1 and 2.
    pub fn embedded() -> Self {
        Self::new(EMBEDDED_FIXTURES.clone())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn fixtures(&self) -> &FixtureSet {
        &self.set
    }
}

impl MatchDataSource for FixtureSource {
    fn list_live_matches(&self) -> Vec<RawMatchSummary> {
        self.set.matches.clone()
    }

    fn get_match_detail(&self, id: u32) -> Option<RawMatchDetail> {
        self.set.details.iter().find(|d| d.summary.id == id).cloned()
    }
}
