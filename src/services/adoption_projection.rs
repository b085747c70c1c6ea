//! 24-month adoption and cost projection.
//!
//! Adoption ramps linearly through year one and freezes at the month-12
//! value for year two. Each month is priced under pay-as-you-go, prepaid
//! credit packs and flat seats, with the savings of usage billing over
//! seats alongside.

use thiserror::Error;

use crate::domain::pricing::PricingConstants;
use crate::services::complexity::{ComplexityMix, ComplexityRatioError};
use crate::services::projection_types::{AdoptionMonth, ProjectionReport, year_label};
use crate::services::validation::{sanitize_pricing, validate_non_negative, validate_number};

/// The projection always covers two years.
pub const PROJECTION_MONTHS: u32 = 24;
/// Adoption starts at 10% of the user base in month 1.
pub const INITIAL_ADOPTION_PERCENT: f64 = 10.0;

#[derive(Error, Debug, PartialEq)]
pub enum AdoptionProjectionError {
    #[error("invalid complexity ratio: {0}")]
    ComplexityRatio(#[from] ComplexityRatioError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionParams {
    pub user_count: u32,
    pub complexity_ratio: String,
    pub simple_credits_per_user: f64,
    pub complex_credits_per_user: f64,
    pub year1_monthly_growth_percent: f64,
    pub adoption_ceiling_percent: f64,
    pub steady_state_adoption_percent: f64,
}

impl ProjectionParams {
    fn sanitized(&self) -> ProjectionParams {
        ProjectionParams {
            user_count: self.user_count,
            complexity_ratio: self.complexity_ratio.clone(),
            simple_credits_per_user: validate_non_negative(self.simple_credits_per_user),
            complex_credits_per_user: validate_non_negative(self.complex_credits_per_user),
            year1_monthly_growth_percent: validate_number(
                self.year1_monthly_growth_percent,
                0.0,
                100.0,
            ),
            adoption_ceiling_percent: validate_number(self.adoption_ceiling_percent, 0.0, 100.0),
            steady_state_adoption_percent: validate_number(
                self.steady_state_adoption_percent,
                0.0,
                100.0,
            ),
        }
    }
}

pub fn project_monthly(
    params: &ProjectionParams,
    pricing: &PricingConstants,
) -> Result<Vec<AdoptionMonth>, AdoptionProjectionError> {
    let params = params.sanitized();
    let pricing = sanitize_pricing(pricing);
    let mix = ComplexityMix::parse(&params.complexity_ratio)?;
    // The credit mix stays unrounded so the money math keeps full precision.
    let credits_per_user = mix.blend(
        params.simple_credits_per_user,
        params.complex_credits_per_user,
    );

    let mut months = Vec::with_capacity(PROJECTION_MONTHS as usize);
    for month in 1..=PROJECTION_MONTHS {
        let adoption_percent = adoption_for_month(
            month,
            params.year1_monthly_growth_percent,
            params.adoption_ceiling_percent,
        );
        let active_users = (params.user_count as f64 * adoption_percent / 100.0).round() as u32;
        let total_credits = active_users as f64 * credits_per_user;
        let payg_cost = (total_credits * pricing.payg_rate_per_credit).round();
        let prepaid_packs = if pricing.prepaid_pack_credits > 0.0 {
            (total_credits / pricing.prepaid_pack_credits).ceil() as u64
        } else {
            0
        };
        // Flat seats license the whole user base, not just active users.
        let flat_seat_cost = params.user_count as f64 * pricing.flat_seat_price;
        let savings = (flat_seat_cost - payg_cost).round();
        months.push(AdoptionMonth {
            month,
            year_label: year_label(month),
            adoption_percent,
            active_users,
            credits_per_user,
            total_credits,
            payg_cost,
            prepaid_packs,
            prepaid_pack_cost: prepaid_packs as f64 * pricing.prepaid_pack_price,
            flat_seat_cost,
            savings,
        });
    }
    Ok(months)
}

pub fn build_projection_report(
    params: &ProjectionParams,
    pricing: &PricingConstants,
) -> Result<ProjectionReport, AdoptionProjectionError> {
    let months = project_monthly(params, pricing)?;
    Ok(ProjectionReport {
        data_source: String::new(),
        user_count: params.user_count,
        complexity_ratio: params.complexity_ratio.clone(),
        steady_state_adoption_percent: params.steady_state_adoption_percent,
        breakeven_credits_per_user: sanitize_pricing(pricing).breakeven_credits_per_user(),
        months,
    })
}

/// Year one re-applies the linear ramp from the base every month; it does
/// not compound. Year two holds the month-12 value.
fn adoption_for_month(month: u32, growth_percent: f64, ceiling_percent: f64) -> f64 {
    let ramp_month = month.min(12);
    let ramped = INITIAL_ADOPTION_PERCENT + (ramp_month - 1) as f64 * growth_percent;
    ramped.min(ceiling_percent)
}
