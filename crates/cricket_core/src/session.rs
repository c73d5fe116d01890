//! A live viewing session: the match list and any open match details, each
//! refreshed on its own cadence.
//!
//! Nothing here runs in the background. The host calls [`LiveSession::poll`]
//! (or the individual refresh methods) with the current time; every cycle
//! that is due runs to completion before the call returns.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::models::{MatchSnapshot, MatchSummary, TeamSide};
use crate::sim::{CancelHandle, LiveScoreSimulator, PollOutcome, RefreshTask, TickOutcome};
use crate::source::MatchDataSource;
use crate::stats::{run_rate, MatchAnalytics};

/// One open match detail.
#[derive(Debug)]
pub struct DetailView {
    pub snapshot: MatchSnapshot,
    pub analytics: MatchAnalytics,
    task: RefreshTask,
}

impl DetailView {
    /// False once the view has been closed or its match stopped being live.
    pub fn is_refreshing(&self) -> bool {
        !self.task.is_cancelled()
    }

    pub fn cycles(&self) -> u64 {
        self.task.cycles()
    }
}

/// What one [`LiveSession::poll`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPoll {
    pub list: PollOutcome,
    pub details: Vec<(u32, PollOutcome)>,
}

pub struct LiveSession<S: MatchDataSource, R: Rng = ChaCha8Rng> {
    source: S,
    config: EngineConfig,
    simulator: LiveScoreSimulator<R>,
    list_task: RefreshTask,
    matches: Vec<MatchSummary>,
    last_ticks: Vec<TickOutcome>,
    last_updated: Option<DateTime<Utc>>,
    details: BTreeMap<u32, DetailView>,
}

impl<S: MatchDataSource> LiveSession<S, ChaCha8Rng> {
    /// A session whose first list refresh is due at `now`.
    pub fn new(source: S, config: EngineConfig, seed: u64, now: DateTime<Utc>) -> Self {
        let simulator = LiveScoreSimulator::from_seed(seed, &config);
        Self::with_simulator(source, config, simulator, now)
    }
}

impl<S: MatchDataSource, R: Rng> LiveSession<S, R> {
    pub fn with_simulator(
        source: S,
        config: EngineConfig,
        simulator: LiveScoreSimulator<R>,
        now: DateTime<Utc>,
    ) -> Self {
        let (list_task, _) = RefreshTask::new(config.refresh.list_interval(), now);
        Self {
            source,
            config,
            simulator,
            list_task,
            matches: Vec::new(),
            last_ticks: Vec::new(),
            last_updated: None,
            details: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The match list as of the last list refresh.
    pub fn matches(&self) -> &[MatchSummary] {
        &self.matches
    }

    /// Simulator outcomes from the last list refresh, one per match.
    pub fn last_ticks(&self) -> &[TickOutcome] {
        &self.last_ticks
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn list_cancel_handle(&self) -> CancelHandle {
        self.list_task.cancel_handle()
    }

    /// Run every cycle that is due at `now`: the list first, so open details
    /// see this cycle's simulated scores.
    pub fn poll(&mut self, now: DateTime<Utc>) -> SessionPoll {
        let list = self.refresh_list(now);
        let ids: Vec<u32> = self.details.keys().copied().collect();
        let details = ids
            .into_iter()
            .filter_map(|id| self.refresh_detail(id, now).map(|outcome| (id, outcome)))
            .collect();
        SessionPoll { list, details }
    }

    /// Re-fetch the list when due, normalize it, advance the simulator one
    /// tick per live match and replace the held list.
    pub fn refresh_list(&mut self, now: DateTime<Utc>) -> PollOutcome {
        let Self { source, config, simulator, list_task, matches, last_ticks, last_updated, .. } = self;
        list_task.poll(now, || {
            let mut fresh: Vec<MatchSummary> =
                source.list_live_matches().iter().map(MatchSummary::normalize).collect();
            for summary in fresh.iter_mut() {
                if let Some(held) = matches.iter().find(|m| m.id == summary.id) {
                    keep_higher_runs(summary, held);
                }
            }
            *last_ticks = if config.simulator.enabled {
                simulator.tick_all(&mut fresh)
            } else {
                Vec::new()
            };
            log::debug!("match list refreshed: {} matches", fresh.len());
            *matches = fresh;
            *last_updated = Some(now);
        })
    }

    /// Fetch a match and start refreshing it. Returns `None` when the source
    /// does not know the id. Opening an already open match returns its
    /// existing handle.
    pub fn open_detail(&mut self, id: u32, now: DateTime<Utc>) -> Option<CancelHandle> {
        if let Some(view) = self.details.get(&id) {
            return Some(view.task.cancel_handle());
        }
        let Some(raw) = self.source.get_match_detail(id) else {
            log::debug!("{}; no detail view opened", CoreError::MatchNotFound(id));
            return None;
        };

        let mut snapshot = MatchSnapshot::normalize(&raw);
        self.overlay_list_scores(&mut snapshot);
        let analytics = MatchAnalytics::derive(&snapshot, &self.config);
        let interval = self.config.refresh.detail_interval();
        let (task, handle) = RefreshTask::new(interval, now + interval);
        if !snapshot.is_live() {
            handle.cancel();
        }
        self.details.insert(id, DetailView { snapshot, analytics, task });
        Some(handle)
    }

    /// Re-fetch and re-derive one open match when due. `None` when no view
    /// is open for `id`.
    pub fn refresh_detail(&mut self, id: u32, now: DateTime<Utc>) -> Option<PollOutcome> {
        let view = self.details.get_mut(&id)?;
        let DetailView { snapshot, analytics, task } = view;
        let source = &self.source;
        let config = &self.config;
        let matches = &self.matches;
        let outcome = task.poll(now, || match source.get_match_detail(id) {
            Some(raw) => {
                let mut fresh = MatchSnapshot::normalize(&raw);
                if let Some(held) = matches.iter().find(|m| m.id == id) {
                    keep_higher_runs(&mut fresh.summary, held);
                }
                *analytics = MatchAnalytics::derive(&fresh, config);
                *snapshot = fresh;
            }
            None => log::warn!("{}; keeping the last snapshot", CoreError::MatchNotFound(id)),
        });
        if outcome == PollOutcome::Ran && !snapshot.is_live() {
            log::debug!("match {id} is no longer live; detail refresh stopped");
            task.cancel_handle().cancel();
        }
        Some(outcome)
    }

    pub fn detail(&self, id: u32) -> Option<&DetailView> {
        self.details.get(&id)
    }

    /// Stop refreshing a match and drop its view.
    pub fn close_detail(&mut self, id: u32) -> bool {
        match self.details.remove(&id) {
            Some(view) => {
                view.task.cancel_handle().cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel every task the session owns.
    pub fn shutdown(&mut self) {
        self.list_task.cancel_handle().cancel();
        for view in self.details.values() {
            view.task.cancel_handle().cancel();
        }
    }

    fn overlay_list_scores(&self, snapshot: &mut MatchSnapshot) {
        if let Some(held) = self.matches.iter().find(|m| m.id == snapshot.id()) {
            keep_higher_runs(&mut snapshot.summary, held);
        }
    }
}

impl<S: MatchDataSource, R: Rng> Drop for LiveSession<S, R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Keep runs the session has already shown when the source reports fewer
/// for the same innings, so simulated runs survive a re-fetch.
fn keep_higher_runs(fresh: &mut MatchSummary, held: &MatchSummary) {
    for side in [TeamSide::Team1, TeamSide::Team2] {
        let Some(held_runs) = held.score(side).score_line().map(|line| line.runs) else {
            continue;
        };
        let Some(line) = fresh.score_mut(side).score_line_mut() else {
            continue;
        };
        if line.runs < held_runs {
            line.runs = held_runs;
            let rate = run_rate::run_rate(line.runs, line.overs.as_notation());
            *fresh.run_rate_mut(side) = Some(rate);
        }
    }
}
