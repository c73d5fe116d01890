use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Legal deliveries in one over.
pub const BALLS_PER_OVER: u8 = 6;

/// Most wickets an innings can lose.
pub const MAX_WICKETS: u8 = 10;

/// Cricket overs notation: `completed` full overs plus `balls` (0..=5) of the
/// current one. `42.3` is 42 overs and 3 balls, not 42.3 decimal overs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "OversRepr", into = "f64")]
pub struct Overs {
    completed: u32,
    balls: u8,
}

impl Overs {
    pub fn new(completed: u32, balls: u8) -> Result<Self, CoreError> {
        if balls >= BALLS_PER_OVER {
            return Err(CoreError::malformed(
                &format!("{completed}.{balls}"),
                format!("ball digit {balls} is outside 0..=5"),
            ));
        }
        Ok(Self { completed, balls })
    }

    /// Whole overs only.
    pub fn whole(completed: u32) -> Self {
        Self { completed, balls: 0 }
    }

    /// Overs covering `total_balls` legal deliveries.
    pub fn from_balls(total_balls: u32) -> Self {
        Self {
            completed: total_balls / BALLS_PER_OVER as u32,
            balls: (total_balls % BALLS_PER_OVER as u32) as u8,
        }
    }

    /// Read a notation value such as `9.3`. More than one fractional digit,
    /// a ball digit above 5, or a negative value is rejected.
    pub fn from_notation(value: f64) -> Result<Self, CoreError> {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::malformed(&value.to_string(), "overs must be a non-negative number"));
        }
        let tenths = value * 10.0;
        let rounded = tenths.round();
        if (tenths - rounded).abs() > 1e-6 {
            return Err(CoreError::malformed(
                &value.to_string(),
                "overs take at most one fractional digit",
            ));
        }
        let tenths = rounded as u64;
        let completed = u32::try_from(tenths / 10)
            .map_err(|_| CoreError::malformed(&value.to_string(), "overs value too large"))?;
        Self::new(completed, (tenths % 10) as u8)
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn balls(&self) -> u8 {
        self.balls
    }

    /// Legal deliveries bowled, saturating at `u32::MAX`.
    pub fn total_balls(&self) -> u32 {
        self.completed.saturating_mul(BALLS_PER_OVER as u32).saturating_add(self.balls as u32)
    }

    /// The notation value, e.g. `42.3`.
    pub fn as_notation(&self) -> f64 {
        (self.completed as f64 * 10.0 + self.balls as f64) / 10.0
    }

    pub fn is_partial(&self) -> bool {
        self.balls > 0
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.balls == 0 {
            write!(f, "{}", self.completed)
        } else {
            write!(f, "{}.{}", self.completed, self.balls)
        }
    }
}

impl From<Overs> for f64 {
    fn from(overs: Overs) -> Self {
        overs.as_notation()
    }
}

/// Wire form of [`Overs`]: bowling cards send `"8.3"`, score payloads send `8.3`.
#[derive(Deserialize)]
#[serde(untagged)]
enum OversRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<OversRepr> for Overs {
    type Error = CoreError;

    fn try_from(repr: OversRepr) -> Result<Self, Self::Error> {
        match repr {
            OversRepr::Number(value) => Overs::from_notation(value),
            OversRepr::Text(text) => crate::notation::parse_overs(&text),
        }
    }
}

impl JsonSchema for Overs {
    fn schema_name() -> String {
        "Overs".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        f64::json_schema(gen)
    }
}

/// Runs, wickets and overs for one innings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "ScoreLineRepr")]
pub struct ScoreLine {
    pub runs: u32,
    pub wickets: u8,
    pub overs: Overs,
}

impl ScoreLine {
    pub fn new(runs: u32, wickets: u8, overs: Overs) -> Result<Self, CoreError> {
        if wickets > MAX_WICKETS {
            return Err(CoreError::malformed(
                &format!("{runs}/{wickets}"),
                format!("wickets {wickets} exceed {MAX_WICKETS}"),
            ));
        }
        Ok(Self { runs, wickets, overs })
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_all_out(&self) -> bool {
        self.wickets >= MAX_WICKETS
    }
}

#[derive(Deserialize, JsonSchema)]
struct ScoreLineRepr {
    runs: u32,
    wickets: u8,
    overs: Overs,
}

impl TryFrom<ScoreLineRepr> for ScoreLine {
    type Error = CoreError;

    fn try_from(repr: ScoreLineRepr) -> Result<Self, Self::Error> {
        ScoreLine::new(repr.runs, repr.wickets, repr.overs)
    }
}

/// An innings is either under way (or finished) with a score, or has not
/// begun. `"--"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InningsScore {
    #[default]
    NotStarted,
    Batting(ScoreLine),
}

impl InningsScore {
    pub fn score_line(&self) -> Option<&ScoreLine> {
        match self {
            InningsScore::NotStarted => None,
            InningsScore::Batting(line) => Some(line),
        }
    }

    pub fn score_line_mut(&mut self) -> Option<&mut ScoreLine> {
        match self {
            InningsScore::NotStarted => None,
            InningsScore::Batting(line) => Some(line),
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, InningsScore::Batting(_))
    }

    /// Score line with `NotStarted` read as zeros.
    pub fn or_zero(&self) -> ScoreLine {
        self.score_line().copied().unwrap_or_default()
    }
}
