//! Linear interpolation across the sparse anchor points of a rollout plan.
//!
//! Months before the first anchor take the first stage's value and months
//! after the last anchor take the last stage's value, so the series is
//! total over the whole horizon. Callers validate that anchors are sorted
//! and strictly increasing; on an empty stage list the helpers fall back
//! to zero rather than panic.

use crate::domain::stage::{AdoptionStage, RolloutPhase};

pub fn interpolate_at(
    stages: &[AdoptionStage],
    month: u32,
    value: impl Fn(&AdoptionStage) -> f64,
) -> f64 {
    let before = stages
        .iter()
        .filter(|stage| stage.anchor_month <= month)
        .next_back();
    let after = stages.iter().find(|stage| stage.anchor_month > month);
    match (before, after) {
        (None, None) => 0.0,
        (None, Some(after)) => value(after),
        (Some(before), None) => value(before),
        (Some(before), Some(after)) => {
            let span = (after.anchor_month - before.anchor_month) as f64;
            let progress = (month - before.anchor_month) as f64 / span;
            value(before) + (value(after) - value(before)) * progress
        }
    }
}

/// Interpolated head count, rounded to whole users.
pub fn users_at(stages: &[AdoptionStage], month: u32) -> u32 {
    interpolate_at(stages, month, |stage| stage.total_users as f64).round() as u32
}

/// Interpolated share of users active on a given day. Stays fractional.
pub fn daily_active_fraction_at(stages: &[AdoptionStage], month: u32) -> f64 {
    interpolate_at(stages, month, |stage| stage.daily_active_fraction)
}

/// Phase of the last stage whose anchor is at or before the month. Months
/// before the first anchor borrow the first stage's phase.
pub fn phase_at(stages: &[AdoptionStage], month: u32) -> Option<RolloutPhase> {
    stages
        .iter()
        .rev()
        .find(|stage| stage.anchor_month <= month)
        .or_else(|| stages.first())
        .map(|stage| stage.phase)
}
