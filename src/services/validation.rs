//! Numeric guards applied to every engine input before any formula runs.
//!
//! A NaN collapses to the minimum bound (a cleared or unparseable field
//! means "lowest allowed", never a poisoned series), and out-of-range
//! values clamp to the nearest bound. Downstream arithmetic can then
//! assume finite, in-range numbers.

use crate::domain::agent::Agent;
use crate::domain::pricing::{FLAT_SEAT_PRICE_MAX, FLAT_SEAT_PRICE_MIN, PricingConstants};
use crate::domain::stage::AdoptionStage;

pub fn validate_number(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    if value < min {
        return min;
    }
    if value > max {
        return max;
    }
    value
}

pub fn validate_fraction(value: f64) -> f64 {
    validate_number(value, 0.0, 1.0)
}

pub fn validate_non_negative(value: f64) -> f64 {
    validate_number(value, 0.0, f64::INFINITY)
}

pub fn sanitize_pricing(pricing: &PricingConstants) -> PricingConstants {
    PricingConstants {
        payg_rate_per_credit: validate_non_negative(pricing.payg_rate_per_credit),
        prepaid_pack_price: validate_non_negative(pricing.prepaid_pack_price),
        prepaid_pack_credits: validate_non_negative(pricing.prepaid_pack_credits),
        flat_seat_price: validate_number(
            pricing.flat_seat_price,
            FLAT_SEAT_PRICE_MIN,
            FLAT_SEAT_PRICE_MAX,
        ),
        prepaid_discount: validate_fraction(pricing.prepaid_discount),
    }
}

pub fn sanitize_agent(agent: &Agent) -> Agent {
    Agent {
        id: agent.id,
        name: agent.name.clone(),
        purpose: agent.purpose.clone(),
        conversations_per_day: validate_non_negative(agent.conversations_per_day),
        turns_per_conversation: validate_non_negative(agent.turns_per_conversation),
        generative_ratio: validate_fraction(agent.generative_ratio),
        actions_per_conversation: validate_non_negative(agent.actions_per_conversation),
        tenant_grounding: agent.tenant_grounding,
        deploy_month: agent.deploy_month.max(1),
        segments: agent.segments.clone(),
        enabled: agent.enabled,
    }
}

pub fn sanitize_stage(stage: &AdoptionStage) -> AdoptionStage {
    AdoptionStage {
        label: stage.label.clone(),
        anchor_month: stage.anchor_month,
        total_users: stage.total_users,
        daily_active_fraction: validate_fraction(stage.daily_active_fraction),
        phase: stage.phase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stage::RolloutPhase;

    #[test]
    fn in_range_values_pass_through() {
        assert_eq!(validate_number(42.0, 0.0, 100.0), 42.0);
    }

    #[test]
    fn boundary_values_are_kept() {
        assert_eq!(validate_number(0.0, 0.0, 100.0), 0.0);
        assert_eq!(validate_number(100.0, 0.0, 100.0), 100.0);
    }

    #[test]
    fn out_of_range_values_clamp_to_the_nearest_bound() {
        assert_eq!(validate_number(-3.0, 0.0, 100.0), 0.0);
        assert_eq!(validate_number(250.0, 0.0, 100.0), 100.0);
    }

    #[test]
    fn nan_collapses_to_the_minimum() {
        assert_eq!(validate_number(f64::NAN, 5.0, 100.0), 5.0);
    }

    #[test]
    fn fractions_clamp_to_the_unit_interval() {
        assert_eq!(validate_fraction(1.7), 1.0);
        assert_eq!(validate_fraction(-0.2), 0.0);
    }

    #[test]
    fn seat_price_clamps_to_the_negotiable_band() {
        let low = sanitize_pricing(&PricingConstants {
            flat_seat_price: 10.0,
            ..PricingConstants::default()
        });
        let high = sanitize_pricing(&PricingConstants {
            flat_seat_price: 99.0,
            ..PricingConstants::default()
        });

        assert_eq!(low.flat_seat_price, 25.0);
        assert_eq!(high.flat_seat_price, 35.0);
    }

    #[test]
    fn agent_deploy_month_is_at_least_one() {
        let agent = Agent {
            id: 1,
            name: "Shift planner".to_string(),
            purpose: "answers shift questions".to_string(),
            conversations_per_day: -2.0,
            turns_per_conversation: 6.0,
            generative_ratio: 1.4,
            actions_per_conversation: 1.0,
            tenant_grounding: false,
            deploy_month: 0,
            segments: vec![],
            enabled: true,
        };

        let sanitized = sanitize_agent(&agent);

        assert_eq!(sanitized.deploy_month, 1);
        assert_eq!(sanitized.conversations_per_day, 0.0);
        assert_eq!(sanitized.generative_ratio, 1.0);
    }

    #[test]
    fn stage_daily_active_fraction_clamps_to_one() {
        let stage = AdoptionStage {
            label: "Pilot".to_string(),
            anchor_month: 1,
            total_users: 100,
            daily_active_fraction: 1.3,
            phase: RolloutPhase::Pilot,
        };

        assert_eq!(sanitize_stage(&stage).daily_active_fraction, 1.0);
    }
}
