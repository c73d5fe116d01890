use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::score::BALLS_PER_OVER;
use crate::error::CoreError;

/// What happened on one delivery. Extras (wides, no-balls) are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BallRepr", into = "BallRepr")]
pub enum BallOutcome {
    /// Runs off the bat, 0..=6.
    Runs(u8),
    Wicket,
}

impl BallOutcome {
    pub const MAX_RUNS: u8 = 6;

    pub fn runs(value: u8) -> Result<Self, CoreError> {
        if value > Self::MAX_RUNS {
            return Err(CoreError::malformed(&value.to_string(), "a ball scores at most 6 runs"));
        }
        Ok(BallOutcome::Runs(value))
    }

    /// Runs this ball added to the total.
    pub fn run_value(&self) -> u32 {
        match self {
            BallOutcome::Runs(runs) => *runs as u32,
            BallOutcome::Wicket => 0,
        }
    }

    pub fn is_wicket(&self) -> bool {
        matches!(self, BallOutcome::Wicket)
    }

    pub fn is_boundary(&self) -> bool {
        matches!(self, BallOutcome::Runs(4) | BallOutcome::Runs(6))
    }
}

/// Wire form: a number for runs, `"W"` for a wicket.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum BallRepr {
    Runs(u8),
    Mark(String),
}

impl TryFrom<BallRepr> for BallOutcome {
    type Error = CoreError;

    fn try_from(repr: BallRepr) -> Result<Self, Self::Error> {
        match repr {
            BallRepr::Runs(runs) => BallOutcome::runs(runs),
            BallRepr::Mark(mark) if mark.trim().eq_ignore_ascii_case("w") => Ok(BallOutcome::Wicket),
            BallRepr::Mark(mark) => Err(CoreError::malformed(&mark, "expected runs or \"W\"")),
        }
    }
}

impl From<BallOutcome> for BallRepr {
    fn from(outcome: BallOutcome) -> Self {
        match outcome {
            BallOutcome::Runs(runs) => BallRepr::Runs(runs),
            BallOutcome::Wicket => BallRepr::Mark("W".to_string()),
        }
    }
}

impl JsonSchema for BallOutcome {
    fn schema_name() -> String {
        "BallOutcome".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        // number of runs, or "W"
        serde_json::Value::json_schema(gen)
    }
}

/// One over of the live innings, balls in bowling order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Over {
    #[serde(rename = "over")]
    pub over_number: u32,
    #[serde(rename = "runs", alias = "balls", default)]
    pub balls: Vec<BallOutcome>,
}

impl Over {
    pub fn new(over_number: u32, balls: Vec<BallOutcome>) -> Self {
        Self { over_number, balls }
    }

    /// Runs scored in this over.
    pub fn runs(&self) -> u32 {
        self.balls.iter().map(BallOutcome::run_value).sum()
    }

    /// Wickets that fell in this over.
    pub fn wickets(&self) -> u32 {
        self.balls.iter().filter(|b| b.is_wicket()).count() as u32
    }

    /// An over holds at most six deliveries.
    pub fn is_well_formed(&self) -> bool {
        self.balls.len() <= BALLS_PER_OVER as usize
    }

    pub fn is_maiden(&self) -> bool {
        self.balls.len() == BALLS_PER_OVER as usize && self.runs() == 0
    }
}
