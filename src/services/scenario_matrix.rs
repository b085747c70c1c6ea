//! Steady-state scenario matrix.
//!
//! Expands the cross product of user counts, agent-count labels and
//! complexity ratios into flat records comparing a year of pay-as-you-go
//! billing against a year of flat seats. Row order is fixed: user counts
//! outermost, then labels, then ratios.

use thiserror::Error;

use crate::domain::pricing::PricingConstants;
use crate::services::complexity::{ComplexityMix, ComplexityRatioError};
use crate::services::projection_types::{ScenarioRecord, ScenarioReport};
use crate::services::validation::{sanitize_pricing, validate_non_negative, validate_number};

#[derive(Error, Debug, PartialEq)]
pub enum ScenarioMatrixError {
    #[error("invalid complexity ratio: {0}")]
    ComplexityRatio(#[from] ComplexityRatioError),
    #[error("user count 0 has no flat-seat baseline to compare against")]
    ZeroUserCount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioGrid {
    pub user_counts: Vec<u32>,
    pub agent_count_labels: Vec<String>,
    pub complexity_ratios: Vec<String>,
    pub simple_credits_per_user: f64,
    pub complex_credits_per_user: f64,
    pub steady_state_adoption_percent: f64,
}

impl ScenarioGrid {
    fn sanitized(&self) -> ScenarioGrid {
        ScenarioGrid {
            user_counts: self.user_counts.clone(),
            agent_count_labels: self.agent_count_labels.clone(),
            complexity_ratios: self.complexity_ratios.clone(),
            simple_credits_per_user: validate_non_negative(self.simple_credits_per_user),
            complex_credits_per_user: validate_non_negative(self.complex_credits_per_user),
            steady_state_adoption_percent: validate_number(
                self.steady_state_adoption_percent,
                0.0,
                100.0,
            ),
        }
    }
}

pub fn generate_scenarios(
    grid: &ScenarioGrid,
    pricing: &PricingConstants,
) -> Result<Vec<ScenarioRecord>, ScenarioMatrixError> {
    let grid = grid.sanitized();
    let pricing = sanitize_pricing(pricing);
    if grid.user_counts.iter().any(|count| *count == 0) {
        return Err(ScenarioMatrixError::ZeroUserCount);
    }
    // Parse every ratio up front so a malformed entry fails the whole
    // matrix before any record is built.
    let mixes = grid
        .complexity_ratios
        .iter()
        .map(|ratio| Ok((ratio.clone(), ComplexityMix::parse(ratio)?)))
        .collect::<Result<Vec<(String, ComplexityMix)>, ComplexityRatioError>>()?;

    let mut scenarios = Vec::with_capacity(
        grid.user_counts.len() * grid.agent_count_labels.len() * mixes.len(),
    );
    for user_count in &grid.user_counts {
        for label in &grid.agent_count_labels {
            for (ratio, mix) in &mixes {
                scenarios.push(build_record(*user_count, label, ratio, mix, &grid, &pricing));
            }
        }
    }
    Ok(scenarios)
}

pub fn build_scenario_report(
    grid: &ScenarioGrid,
    pricing: &PricingConstants,
) -> Result<ScenarioReport, ScenarioMatrixError> {
    let scenarios = generate_scenarios(grid, pricing)?;
    Ok(ScenarioReport {
        data_source: String::new(),
        steady_state_adoption_percent: grid.steady_state_adoption_percent,
        breakeven_credits_per_user: sanitize_pricing(pricing).breakeven_credits_per_user(),
        scenarios,
    })
}

fn build_record(
    user_count: u32,
    label: &str,
    ratio: &str,
    mix: &ComplexityMix,
    grid: &ScenarioGrid,
    pricing: &PricingConstants,
) -> ScenarioRecord {
    let active_users = (user_count as f64 * grid.steady_state_adoption_percent / 100.0).round();
    // The displayed per-user figure is rounded; the money math keeps the
    // unrounded mix.
    let credits_per_user = mix.blend(grid.simple_credits_per_user, grid.complex_credits_per_user);
    let monthly_credits = active_users * credits_per_user;
    let monthly_payg_cost = (monthly_credits * pricing.payg_rate_per_credit).round();
    let yearly_payg_cost = (monthly_credits * 12.0 * pricing.payg_rate_per_credit).round();
    let yearly_flat_seat_cost = user_count as f64 * pricing.flat_seat_price * 12.0;
    let savings = (yearly_flat_seat_cost - yearly_payg_cost).round();
    let savings_percent = (savings / yearly_flat_seat_cost * 100.0).round();
    ScenarioRecord {
        user_count,
        agent_count_label: label.to_string(),
        complexity_ratio: ratio.to_string(),
        active_users: active_users as u32,
        credits_per_user_per_month: credits_per_user.round(),
        monthly_payg_cost,
        yearly_payg_cost,
        yearly_flat_seat_cost,
        savings,
        savings_percent,
    }
}
