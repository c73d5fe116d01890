//! Ball-by-ball timeline reconstruction.
//!
//! Turns a list of overs into a chronological stream of scoring events with
//! the running total attached to each one. Ball positions use the overs
//! notation (`10.3` is the third ball of over 10), not base-6 fractions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::TimelineConfig;
use crate::error::CoreError;
use crate::models::{BallOutcome, Over, BALLS_PER_OVER, MAX_WICKETS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventKind {
    Wicket,
    Four,
    Six,
    OverEnd,
    Milestone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimelineEvent {
    pub ball_fraction: f64,
    pub over_number: u32,
    pub kind: TimelineEventKind,
    pub cumulative_runs: u32,
    pub cumulative_wickets: u32,
    /// Runs in the over, on `OverEnd` events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub over_runs: Option<u32>,
    /// Boundary reached, on `Milestone` events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u32>,
    pub note: String,
}

/// Cumulative score at the end of one over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OverProgress {
    pub over_number: u32,
    pub runs: u32,
    pub over_runs: u32,
    pub wickets: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Timeline {
    pub events: Vec<TimelineEvent>,
    pub cumulative_runs: u32,
    pub wickets: u32,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events_of(&self, kind: TimelineEventKind) -> impl Iterator<Item = &TimelineEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    /// Runs progression: one point per completed over.
    pub fn runs_progression(&self) -> Vec<OverProgress> {
        self.events_of(TimelineEventKind::OverEnd)
            .map(|e| OverProgress {
                over_number: e.over_number,
                runs: e.cumulative_runs,
                over_runs: e.over_runs.unwrap_or(0),
                wickets: e.cumulative_wickets,
            })
            .collect()
    }
}

pub struct TimelineReconstructor {
    milestone_step: u32,
    base_runs: u32,
    base_wickets: u32,
}

impl Default for TimelineReconstructor {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineReconstructor {
    pub const DEFAULT_MILESTONE_STEP: u32 = 50;

    pub fn new() -> Self {
        Self { milestone_step: Self::DEFAULT_MILESTONE_STEP, base_runs: 0, base_wickets: 0 }
    }

    pub fn from_config(config: &TimelineConfig) -> Self {
        Self { milestone_step: config.milestone_step, ..Self::new() }
    }

    pub fn with_milestone_step(mut self, step: u32) -> Self {
        self.milestone_step = step;
        self
    }

    /// Start from the score before the first supplied over instead of 0/0.
    /// Feeds usually only carry the last few overs of an innings. Wickets
    /// are capped at 10.
    pub fn with_baseline(mut self, runs: u32, wickets: u32) -> Self {
        self.base_runs = runs;
        self.base_wickets = wickets.min(MAX_WICKETS as u32);
        self
    }

    /// Rebuild the event stream. Overs are processed in ascending
    /// `over_number` order whatever order they arrive in.
    ///
    /// Milestones fire at most once per over: an over that jumps past two
    /// boundaries reports only the highest. That is a known approximation.
    pub fn reconstruct(&self, overs: &[Over]) -> Timeline {
        let mut timeline = Timeline {
            events: Vec::new(),
            cumulative_runs: self.base_runs,
            wickets: self.base_wickets,
        };
        if overs.is_empty() {
            log::debug!("{}; timeline left empty", CoreError::EmptyOverData);
            return timeline;
        }

        let mut ordered: Vec<&Over> = overs.iter().collect();
        ordered.sort_by_key(|over| over.over_number);

        for over in ordered {
            self.push_over(&mut timeline, over);
        }
        timeline
    }

    fn push_over(&self, timeline: &mut Timeline, over: &Over) {
        let balls = if over.is_well_formed() {
            &over.balls[..]
        } else {
            log::warn!(
                "over {} has {} balls; only the first {} are used",
                over.over_number,
                over.balls.len(),
                BALLS_PER_OVER
            );
            &over.balls[..BALLS_PER_OVER as usize]
        };

        let n = over.over_number;
        let mut over_runs = 0;
        for (i, ball) in balls.iter().enumerate() {
            let ball_fraction = ball_fraction(n, i);
            over_runs += ball.run_value();
            let running = timeline.cumulative_runs.saturating_add(over_runs);
            let (kind, note) = match ball {
                BallOutcome::Wicket => {
                    if timeline.wickets < MAX_WICKETS as u32 {
                        timeline.wickets += 1;
                    } else {
                        log::warn!("wicket at {ball_fraction} after {MAX_WICKETS} down; count held at {MAX_WICKETS}");
                    }
                    (TimelineEventKind::Wicket, format!("Wicket at {n}.{}", i + 1))
                }
                BallOutcome::Runs(4) => (TimelineEventKind::Four, format!("Four hit at {n}.{}", i + 1)),
                BallOutcome::Runs(6) => (TimelineEventKind::Six, format!("Six hit at {n}.{}", i + 1)),
                BallOutcome::Runs(_) => continue,
            };
            timeline.events.push(TimelineEvent {
                ball_fraction,
                over_number: n,
                kind,
                cumulative_runs: running,
                cumulative_wickets: timeline.wickets,
                over_runs: None,
                milestone: None,
                note,
            });
        }

        timeline.cumulative_runs = timeline.cumulative_runs.saturating_add(over_runs);
        let cumulative = timeline.cumulative_runs;
        let end_fraction = match balls.len() {
            0 => n as f64,
            len => ball_fraction(n, len - 1),
        };

        timeline.events.push(TimelineEvent {
            ball_fraction: end_fraction,
            over_number: n,
            kind: TimelineEventKind::OverEnd,
            cumulative_runs: cumulative,
            cumulative_wickets: timeline.wickets,
            over_runs: Some(over_runs),
            milestone: None,
            note: format!("End of over {n}: {cumulative} runs, {} wickets", timeline.wickets),
        });

        let step = self.milestone_step;
        if step > 0 && cumulative / step > (cumulative - over_runs) / step {
            let reached = cumulative / step * step;
            timeline.events.push(TimelineEvent {
                ball_fraction: end_fraction,
                over_number: n,
                kind: TimelineEventKind::Milestone,
                cumulative_runs: cumulative,
                cumulative_wickets: timeline.wickets,
                over_runs: None,
                milestone: Some(reached),
                note: format!("Team reached {reached} runs"),
            });
        }
    }
}

/// `over + (index + 1) / 10`, computed from integers so `40.1` is exact.
fn ball_fraction(over_number: u32, index: usize) -> f64 {
    (over_number as f64 * 10.0 + (index + 1) as f64) / 10.0
}
