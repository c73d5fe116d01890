//! Score notation codec.
//!
//! Reads and writes the `"<runs>/<wickets> (<overs> ov)"` form used by match
//! feeds, e.g. `"275/4 (42.3 ov)"`. `"--"` marks an innings that has not
//! begun. Overs use cricket notation: the digit after the point counts balls
//! of the current over and runs 0..=5.

use crate::error::CoreError;
use crate::models::{InningsScore, Overs, ScoreLine, MAX_WICKETS};

/// Wire marker for an innings that has not started.
pub const NOT_STARTED: &str = "--";

/// Parse a score string.
///
/// The wickets segment is optional: without it an innings that names whole
/// overs (`"250 (50 ov)"`) reads as all out, anything else as no wickets
/// down. The overs parenthetical is optional and defaults to zero overs.
pub fn parse_score(text: &str) -> Result<InningsScore, CoreError> {
    let trimmed = text.trim();
    if trimmed == NOT_STARTED {
        return Ok(InningsScore::NotStarted);
    }
    if trimmed.is_empty() {
        return Err(CoreError::malformed(text, "empty score"));
    }

    let (head, overs_text) = split_overs(trimmed).map_err(|reason| CoreError::malformed(text, reason))?;

    let overs = match overs_text {
        Some(inner) => overs_from_text(inner).map_err(|reason| CoreError::malformed(text, reason))?,
        None => Overs::default(),
    };

    let (runs_text, wickets_text) = match head.split_once('/') {
        Some((runs, wickets)) => (runs.trim(), Some(wickets.trim())),
        None => (head.trim(), None),
    };

    let runs = parse_count(runs_text).ok_or_else(|| CoreError::malformed(text, "runs group is not a number"))?;

    let wickets = match wickets_text {
        Some(w) => {
            let wickets =
                parse_count(w).ok_or_else(|| CoreError::malformed(text, "wickets group is not a number"))?;
            if wickets > MAX_WICKETS as u32 {
                return Err(CoreError::malformed(text, format!("wickets {wickets} exceed {MAX_WICKETS}")));
            }
            wickets as u8
        }
        None if overs_text.is_some() && overs.completed() > 0 && !overs.is_partial() => MAX_WICKETS,
        None => 0,
    };

    Ok(InningsScore::Batting(ScoreLine { runs, wickets, overs }))
}

/// Parse a score, substituting a zero score for anything unreadable so the
/// caller can keep rendering.
pub fn parse_score_or_default(text: &str) -> InningsScore {
    match parse_score(text) {
        Ok(score) => score,
        Err(err) => {
            log::warn!("{err}; substituting 0/0 (0 ov)");
            InningsScore::Batting(ScoreLine::zero())
        }
    }
}

/// Write a score line as `"R/W (O ov)"`. Whole overs carry no fraction.
pub fn format_score(score: &ScoreLine) -> String {
    format!("{}/{} ({} ov)", score.runs, score.wickets, score.overs)
}

/// Write an innings score, `"--"` when it has not started.
pub fn format_innings(score: &InningsScore) -> String {
    match score {
        InningsScore::NotStarted => NOT_STARTED.to_string(),
        InningsScore::Batting(line) => format_score(line),
    }
}

/// Parse bowling-card overs such as `"8.3"` or `"10"`.
pub fn parse_overs(text: &str) -> Result<Overs, CoreError> {
    overs_from_text(text).map_err(|reason| CoreError::malformed(text, reason))
}

fn split_overs(text: &str) -> Result<(&str, Option<&str>), String> {
    let Some(open) = text.find('(') else {
        if text.contains(')') {
            return Err("unmatched ')'".to_string());
        }
        return Ok((text, None));
    };
    let rest = &text[open + 1..];
    let close = rest.find(')').ok_or_else(|| "unclosed overs parenthesis".to_string())?;
    if !rest[close + 1..].trim().is_empty() {
        return Err("unexpected text after overs".to_string());
    }
    Ok((&text[..open], Some(&rest[..close])))
}

fn overs_from_text(text: &str) -> Result<Overs, String> {
    let mut body = text.trim();
    for suffix in ["overs", "over", "ov"] {
        if let Some(stripped) = body.strip_suffix(suffix) {
            body = stripped.trim_end();
            break;
        }
    }
    if body.is_empty() {
        return Err("overs group is empty".to_string());
    }

    let (whole, balls) = match body.split_once('.') {
        Some((whole, fraction)) => {
            if fraction.len() != 1 {
                return Err(format!("overs '{body}' must have exactly one ball digit"));
            }
            let balls = parse_count(fraction).ok_or_else(|| format!("ball digit in '{body}' is not a number"))?;
            (whole, balls)
        }
        None => (body, 0),
    };
    let completed = parse_count(whole).ok_or_else(|| format!("overs '{body}' are not a number"))?;
    Overs::new(completed, balls as u8).map_err(|_| format!("ball digit {balls} in '{body}' is outside 0..=5"))
}

/// Unsigned decimal made only of ASCII digits.
fn parse_count(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
