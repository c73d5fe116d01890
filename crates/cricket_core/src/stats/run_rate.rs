//! Shared cricket rate formulas.
//!
//! All functions are pure and return 0 instead of dividing by zero.

use crate::models::{Over, BALLS_PER_OVER};

// Absorbs binary representation error so that e.g. 1.005 rounds up.
const ROUNDING_EPSILON: f64 = 1e-9;

/// Round half-up to two decimal places.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let scaled = value.abs() * 100.0 + ROUNDING_EPSILON;
    value.signum() * scaled.round() / 100.0
}

/// Round half-up to a whole count.
pub fn round_count(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value + ROUNDING_EPSILON).round() as u32
}

/// Runs per over, two decimals. `overs` is the notation value as reported
/// (`42.3`), matching how feeds publish current run rate.
pub fn run_rate(runs: u32, overs: f64) -> f64 {
    if overs > 0.0 {
        round2(runs as f64 / overs)
    } else {
        0.0
    }
}

/// Runs per 100 balls faced.
pub fn strike_rate(runs: u32, balls: u32) -> f64 {
    if balls > 0 {
        runs as f64 / balls as f64 * 100.0
    } else {
        0.0
    }
}

/// Runs conceded per over bowled.
pub fn economy(runs_conceded: u32, overs_bowled: f64) -> f64 {
    if overs_bowled > 0.0 {
        runs_conceded as f64 / overs_bowled
    } else {
        0.0
    }
}

/// Ball count for an overs notation value: `9.3` is 9 overs and 3 balls,
/// so 57 balls. Saturates at `u32::MAX`.
pub fn overs_to_balls(overs: f64) -> u32 {
    if !overs.is_finite() || overs <= 0.0 {
        return 0;
    }
    let whole = overs.floor();
    let balls = ((overs - whole) * 10.0).round();
    (whole as u32).saturating_mul(BALLS_PER_OVER as u32).saturating_add(balls as u32)
}

/// Runs per six legal balls, two decimals. Unlike [`run_rate`] this treats
/// a partial over as the fraction of six balls it really is.
pub fn balls_per_over_rate(runs: u32, balls: u32) -> f64 {
    if balls > 0 {
        round2(runs as f64 * BALLS_PER_OVER as f64 / balls as f64)
    } else {
        0.0
    }
}

/// Average runs per over across the supplied overs, two decimals.
pub fn average_runs_per_over(overs: &[Over]) -> f64 {
    if overs.is_empty() {
        return 0.0;
    }
    let total: u32 = overs.iter().map(Over::runs).sum();
    round2(total as f64 / overs.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BallOutcome;

    #[test]
    fn test_run_rate_two_decimals() {
        assert_eq!(run_rate(275, 42.3), 6.50);
        assert_eq!(run_rate(120, 21.4), 5.61);
        assert_eq!(run_rate(10, 0.0), 0.0);
    }

    #[test]
    fn test_round2_is_half_up() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(2.675), 2.68);
        assert_eq!(round2(4.6049), 4.6);
        assert_eq!(round2(f64::NAN), 0.0);
    }

    #[test]
    fn test_strike_rate_and_economy() {
        assert_eq!(strike_rate(82, 0), 0.0);
        assert!((strike_rate(82, 78) - 105.128_205).abs() < 1e-5);
        assert_eq!(economy(45, 10.0), 4.5);
        assert_eq!(economy(45, 0.0), 0.0);
    }

    #[test]
    fn test_overs_to_balls_uses_ball_digit() {
        assert_eq!(overs_to_balls(9.3), 57);
        assert_eq!(overs_to_balls(10.0), 60);
        assert_eq!(overs_to_balls(0.5), 5);
        assert_eq!(overs_to_balls(0.0), 0);
    }

    #[test]
    fn test_overs_to_balls_saturates() {
        assert_eq!(overs_to_balls(1.0e9), u32::MAX);
        assert_eq!(overs_to_balls(f64::MAX), u32::MAX);
    }

    #[test]
    fn test_balls_per_over_rate() {
        // 275 off 42.3 overs is 275 off 255 balls
        assert_eq!(balls_per_over_rate(275, 255), 6.47);
        assert_eq!(balls_per_over_rate(5, 0), 0.0);
    }

    #[test]
    fn test_average_runs_per_over() {
        let overs = vec![
            Over::new(42, vec![1, 4, 0, 2, 1, 6].into_iter().map(BallOutcome::Runs).collect()),
            Over::new(41, vec![0, 1, 0, 1, 4, 1].into_iter().map(BallOutcome::Runs).collect()),
            Over::new(40, vec![1, 0, 2, 0, 0, 1].into_iter().map(BallOutcome::Runs).collect()),
        ];
        assert_eq!(average_runs_per_over(&overs), 8.33);
        assert_eq!(average_runs_per_over(&[]), 0.0);
    }

    #[test]
    fn test_round_count() {
        assert_eq!(round_count(2.5), 3);
        assert_eq!(round_count(1.4999), 1);
        assert_eq!(round_count(-3.0), 0);
    }
}
