//! 36-month staged rollout projection.
//!
//! The user base is interpolated between plan anchors, each agent's
//! reachable audience is derived from its segments and the current
//! rollout phase, and the resulting credit volume is priced under five
//! models side by side. A breakpoint search then asks how many more
//! average agents it would take for usage billing to overtake flat
//! seats.

use thiserror::Error;

use crate::domain::agent::{Agent, Segment};
use crate::domain::pricing::{
    ACTION_CREDITS, FLAT_SEAT_PRICE_MAX, FLAT_SEAT_PRICE_MIN, PricingConstants,
};
use crate::domain::stage::{AdoptionStage, RolloutPhase};
use crate::services::interpolation::{daily_active_fraction_at, phase_at, users_at};
use crate::services::projection_types::{
    AgentCostSummary, AgentMonthCosts, BreakpointOutcome, LicensingBreakpoint, ModelTotals,
    RolloutMonth, RolloutReport, year_label,
};
use crate::services::validation::{
    sanitize_agent, sanitize_pricing, sanitize_stage, validate_fraction, validate_non_negative,
    validate_number,
};

/// The rollout horizon is fixed at three years.
pub const ROLLOUT_MONTHS: u32 = 36;
/// Agent costing uses a 30-day month.
pub const AGENT_COSTING_DAYS_PER_MONTH: f64 = 30.0;
/// The breakpoint search gives up after this many simulated agents.
pub const BREAKPOINT_AGENT_CAP: u32 = 200;
/// Every sixth month is a seasonal peak.
const PEAK_MONTH_INTERVAL: u32 = 6;
/// Share of the audience management-facing agents reach during Expansion.
const MANAGEMENT_EXPANSION_SHARE: f64 = 0.4;
/// HQ staff as a share of the audience once rollout widens past them.
const HQ_WIDE_AUDIENCE_SHARE: f64 = 0.15;

#[derive(Error, Debug, PartialEq)]
pub enum RolloutProjectionError {
    #[error("a rollout needs at least one adoption stage")]
    EmptyStages,
    #[error("stage anchors must be strictly increasing: month {current} follows month {previous}")]
    UnsortedStages { previous: u32, current: u32 },
}

/// Plan-level knobs that are not part of any single stage or agent.
#[derive(Debug, Clone, PartialEq)]
pub struct RolloutParams {
    pub hybrid_seat_user_count: u32,
    pub flat_seat_price: f64,
    pub autonomous_action_fraction: f64,
    pub peak_month_multiplier: f64,
}

impl Default for RolloutParams {
    fn default() -> Self {
        RolloutParams {
            hybrid_seat_user_count: 0,
            flat_seat_price: 30.0,
            autonomous_action_fraction: 0.3,
            peak_month_multiplier: 1.4,
        }
    }
}

impl RolloutParams {
    fn sanitized(&self) -> RolloutParams {
        RolloutParams {
            hybrid_seat_user_count: self.hybrid_seat_user_count,
            flat_seat_price: validate_number(
                self.flat_seat_price,
                FLAT_SEAT_PRICE_MIN,
                FLAT_SEAT_PRICE_MAX,
            ),
            autonomous_action_fraction: validate_fraction(self.autonomous_action_fraction),
            peak_month_multiplier: validate_non_negative(self.peak_month_multiplier),
        }
    }
}

/// Resolved state of one projection month, shared by every per-agent
/// computation for that month.
struct MonthContext {
    month: u32,
    total_users: u32,
    daily_active_fraction: f64,
    phase: RolloutPhase,
    peak_multiplier: f64,
}

/// The slice of an agent that drives its monthly volume. The breakpoint
/// search builds one of these from averages instead of a real agent.
struct CostProfile {
    credits_per_conversation: f64,
    conversations_per_day: f64,
    deploy_month: u32,
    segments: Vec<Segment>,
}

impl CostProfile {
    fn from_agent(agent: &Agent) -> CostProfile {
        CostProfile {
            credits_per_conversation: agent.credits_per_conversation(),
            conversations_per_day: agent.conversations_per_day,
            deploy_month: agent.deploy_month,
            segments: agent.segments.clone(),
        }
    }

    fn month_conversations(&self, context: &MonthContext) -> f64 {
        if context.month < self.deploy_month {
            return 0.0;
        }
        let eligible = eligible_users(&self.segments, context);
        let active = (eligible * context.daily_active_fraction).round();
        active * self.conversations_per_day * AGENT_COSTING_DAYS_PER_MONTH * context.peak_multiplier
    }

    fn month_credits(&self, context: &MonthContext) -> f64 {
        self.month_conversations(context) * self.credits_per_conversation
    }
}

/// How much of the current user base an agent with these segments can
/// reach. "All" and "Stores" agents address everyone from day one;
/// management- and HQ-facing agents grow or shrink with the phase.
fn eligible_users(segments: &[Segment], context: &MonthContext) -> f64 {
    let users = context.total_users as f64;
    if segments.contains(&Segment::All) || segments.contains(&Segment::Stores) {
        return users;
    }
    if segments.contains(&Segment::Management) {
        return match context.phase {
            RolloutPhase::Management | RolloutPhase::Stores | RolloutPhase::Enterprise => users,
            RolloutPhase::Expansion => users * MANAGEMENT_EXPANSION_SHARE,
            RolloutPhase::Pilot => 0.0,
        };
    }
    if segments.contains(&Segment::Hq) {
        return match context.phase {
            RolloutPhase::Pilot | RolloutPhase::Expansion => users,
            _ => users * HQ_WIDE_AUDIENCE_SHARE,
        };
    }
    0.0
}

pub fn project_rollout(
    stages: &[AdoptionStage],
    agents: &[Agent],
    params: &RolloutParams,
    pricing: &PricingConstants,
) -> Result<RolloutReport, RolloutProjectionError> {
    validate_stages(stages)?;
    let stages: Vec<AdoptionStage> = stages.iter().map(sanitize_stage).collect();
    let agents: Vec<Agent> = agents.iter().map(sanitize_agent).collect();
    let params = params.sanitized();
    let pricing = sanitize_pricing(pricing);

    let contexts: Vec<MonthContext> = (1..=ROLLOUT_MONTHS)
        .map(|month| MonthContext {
            month,
            total_users: users_at(&stages, month),
            daily_active_fraction: daily_active_fraction_at(&stages, month),
            phase: phase_at(&stages, month).unwrap_or(RolloutPhase::Pilot),
            peak_multiplier: if month % PEAK_MONTH_INTERVAL == 0 {
                params.peak_month_multiplier
            } else {
                1.0
            },
        })
        .collect();

    let profiles: Vec<Option<CostProfile>> = agents
        .iter()
        .map(|agent| agent.enabled.then(|| CostProfile::from_agent(agent)))
        .collect();

    let mut monthly = Vec::with_capacity(contexts.len());
    let mut agent_monthly_costs = Vec::with_capacity(contexts.len());
    for context in &contexts {
        let mut conversations = 0.0;
        let mut total_credits = 0.0;
        let mut action_volume = 0.0;
        let mut costs = Vec::with_capacity(agents.len());
        for (agent, profile) in agents.iter().zip(&profiles) {
            let cost = match profile {
                Some(profile) => {
                    let agent_conversations = profile.month_conversations(context);
                    let agent_credits = agent_conversations * profile.credits_per_conversation;
                    conversations += agent_conversations;
                    action_volume += agent_conversations * agent.actions_per_conversation;
                    total_credits += agent_credits;
                    agent_credits * pricing.payg_rate_per_credit
                }
                None => 0.0,
            };
            costs.push(cost);
        }
        let total = costs.iter().sum();
        agent_monthly_costs.push(AgentMonthCosts {
            month: context.month,
            costs,
            total,
        });

        let models = month_model_costs(total_credits, action_volume, context, &params, &pricing);
        monthly.push(RolloutMonth {
            month: context.month,
            year_label: year_label(context.month),
            phase: context.phase,
            total_users: context.total_users,
            daily_active_fraction: context.daily_active_fraction,
            active_users: (context.total_users as f64 * context.daily_active_fraction).round()
                as u32,
            conversations,
            total_credits,
            payg_cost: models.payg,
            prepaid_cost: models.prepaid,
            hybrid_payg_cost: models.hybrid_payg,
            hybrid_prepaid_cost: models.hybrid_prepaid,
            flat_seat_cost: models.flat_seat,
        });
    }

    let agent_summaries = summarize_agents(&agents, &agent_monthly_costs);
    let three_year_totals = ModelTotals {
        payg: monthly.iter().map(|month| month.payg_cost).sum(),
        prepaid: monthly.iter().map(|month| month.prepaid_cost).sum(),
        hybrid_payg: monthly.iter().map(|month| month.hybrid_payg_cost).sum(),
        hybrid_prepaid: monthly.iter().map(|month| month.hybrid_prepaid_cost).sum(),
        flat_seat: monthly.iter().map(|month| month.flat_seat_cost).sum(),
    };
    let licensing_breakpoint =
        find_licensing_breakpoint(&agents, &contexts, &three_year_totals, &pricing);

    Ok(RolloutReport {
        data_source: String::new(),
        start_month: None,
        monthly,
        agent_monthly_costs,
        agent_summaries,
        three_year_totals,
        licensing_breakpoint,
    })
}

/// Prices one month's credit volume under all five models.
///
/// The hybrid models put the first `hybrid_seat_user_count` users on
/// seats; the rest pay per credit. Seat-covered users still generate
/// autonomous agent actions, which bill as action credits.
fn month_model_costs(
    total_credits: f64,
    action_volume: f64,
    context: &MonthContext,
    params: &RolloutParams,
    pricing: &PricingConstants,
) -> ModelTotals {
    let payg = total_credits * pricing.payg_rate_per_credit;
    let prepaid = payg * (1.0 - pricing.prepaid_discount);

    let total_users = context.total_users as f64;
    let seats = (params.hybrid_seat_user_count as f64).min(total_users);
    let seat_cost = seats * params.flat_seat_price;
    let payg_user_ratio = if context.total_users == 0 {
        0.0
    } else {
        (total_users - seats) / total_users
    };
    let metered_credits = total_credits * payg_user_ratio;
    let autonomous_credits = action_volume
        * (1.0 - payg_user_ratio)
        * params.autonomous_action_fraction
        * ACTION_CREDITS;
    let hybrid_usage_cost = (metered_credits + autonomous_credits) * pricing.payg_rate_per_credit;
    let hybrid_payg = seat_cost + hybrid_usage_cost;
    let hybrid_prepaid = seat_cost + hybrid_usage_cost * (1.0 - pricing.prepaid_discount);

    let flat_seat = total_users * params.flat_seat_price;

    ModelTotals {
        payg,
        prepaid,
        hybrid_payg,
        hybrid_prepaid,
        flat_seat,
    }
}

fn summarize_agents(
    agents: &[Agent],
    agent_monthly_costs: &[AgentMonthCosts],
) -> Vec<AgentCostSummary> {
    agents
        .iter()
        .enumerate()
        .map(|(index, agent)| {
            let mut years = [0.0_f64; 3];
            for month_costs in agent_monthly_costs {
                let year = ((month_costs.month - 1) / 12) as usize;
                if let Some(bucket) = years.get_mut(year) {
                    *bucket += month_costs.costs.get(index).copied().unwrap_or(0.0);
                }
            }
            AgentCostSummary {
                id: agent.id,
                name: agent.name.clone(),
                year1: years[0],
                year2: years[1],
                year3: years[2],
                total: years.iter().sum(),
            }
        })
        .collect()
}

/// Simulates adding "average" agents one at a time until the
/// pay-as-you-go total reaches the flat-seat total, or the cap is hit.
/// The scan is linear on purpose; the cap keeps it bounded when each
/// extra agent adds little or nothing.
fn find_licensing_breakpoint(
    agents: &[Agent],
    contexts: &[MonthContext],
    totals: &ModelTotals,
    pricing: &PricingConstants,
) -> LicensingBreakpoint {
    let payg_three_year_cost = totals.payg;
    let flat_seat_three_year_cost = totals.flat_seat;
    if payg_three_year_cost >= flat_seat_three_year_cost {
        return LicensingBreakpoint {
            payg_three_year_cost,
            flat_seat_three_year_cost,
            outcome: BreakpointOutcome::AlreadyExceeded,
        };
    }

    let enabled: Vec<&Agent> = agents.iter().filter(|agent| agent.enabled).collect();
    if enabled.is_empty() {
        return LicensingBreakpoint {
            payg_three_year_cost,
            flat_seat_three_year_cost,
            outcome: BreakpointOutcome::NoEnabledAgents,
        };
    }

    let average = average_profile(&enabled);
    let simulated_credits: f64 = contexts
        .iter()
        .map(|context| average.month_credits(context))
        .sum();
    let simulated_agent_cost = simulated_credits * pricing.payg_rate_per_credit;

    for count in 1..=BREAKPOINT_AGENT_CAP {
        let projected = payg_three_year_cost + count as f64 * simulated_agent_cost;
        if projected >= flat_seat_three_year_cost {
            return LicensingBreakpoint {
                payg_three_year_cost,
                flat_seat_three_year_cost,
                outcome: BreakpointOutcome::AdditionalAgents { count },
            };
        }
    }
    LicensingBreakpoint {
        payg_three_year_cost,
        flat_seat_three_year_cost,
        outcome: BreakpointOutcome::NotReachedWithinCap {
            cap: BREAKPOINT_AGENT_CAP,
        },
    }
}

/// The hypothetical next agent: mean credit cost and conversation rate,
/// rounded mean deploy month, and the portfolio's most common segment.
fn average_profile(enabled: &[&Agent]) -> CostProfile {
    let count = enabled.len() as f64;
    let credits_per_conversation = enabled
        .iter()
        .map(|agent| agent.credits_per_conversation())
        .sum::<f64>()
        / count;
    let conversations_per_day = enabled
        .iter()
        .map(|agent| agent.conversations_per_day)
        .sum::<f64>()
        / count;
    let deploy_month = (enabled
        .iter()
        .map(|agent| agent.deploy_month as f64)
        .sum::<f64>()
        / count)
        .round() as u32;
    CostProfile {
        credits_per_conversation,
        conversations_per_day,
        deploy_month: deploy_month.max(1),
        segments: vec![most_common_segment(enabled)],
    }
}

/// Ties resolve in a fixed order so reruns never flip the result.
fn most_common_segment(enabled: &[&Agent]) -> Segment {
    const ORDER: [Segment; 4] = [Segment::All, Segment::Stores, Segment::Management, Segment::Hq];
    let mut counts = [0usize; 4];
    for agent in enabled {
        for segment in &agent.segments {
            if let Some(position) = ORDER.iter().position(|candidate| candidate == segment) {
                counts[position] += 1;
            }
        }
    }
    let mut best = 0;
    for index in 1..ORDER.len() {
        if counts[index] > counts[best] {
            best = index;
        }
    }
    ORDER[best]
}

fn validate_stages(stages: &[AdoptionStage]) -> Result<(), RolloutProjectionError> {
    if stages.is_empty() {
        return Err(RolloutProjectionError::EmptyStages);
    }
    for pair in stages.windows(2) {
        if pair[1].anchor_month <= pair[0].anchor_month {
            return Err(RolloutProjectionError::UnsortedStages {
                previous: pair[0].anchor_month,
                current: pair[1].anchor_month,
            });
        }
    }
    Ok(())
}
