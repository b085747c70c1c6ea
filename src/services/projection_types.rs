use serde::Serialize;

use crate::domain::stage::RolloutPhase;

/// Months 1-12 report as "Year 1", 13-24 as "Year 2", and so on.
pub fn year_label(month: u32) -> String {
    format!("Year {}", (month.saturating_sub(1)) / 12 + 1)
}

/// One month of the 24-month adoption projection.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AdoptionMonth {
    pub month: u32,
    pub year_label: String,
    pub adoption_percent: f64,
    pub active_users: u32,
    pub credits_per_user: f64,
    pub total_credits: f64,
    pub payg_cost: f64,
    pub prepaid_packs: u64,
    pub prepaid_pack_cost: f64,
    pub flat_seat_cost: f64,
    pub savings: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProjectionReport {
    pub data_source: String,
    pub user_count: u32,
    pub complexity_ratio: String,
    pub steady_state_adoption_percent: f64,
    pub breakeven_credits_per_user: f64,
    pub months: Vec<AdoptionMonth>,
}

/// One cell of the steady-state scenario matrix.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ScenarioRecord {
    pub user_count: u32,
    /// Display tag only; it never enters a cost formula.
    pub agent_count_label: String,
    pub complexity_ratio: String,
    pub active_users: u32,
    pub credits_per_user_per_month: f64,
    pub monthly_payg_cost: f64,
    pub yearly_payg_cost: f64,
    pub yearly_flat_seat_cost: f64,
    pub savings: f64,
    pub savings_percent: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub data_source: String,
    pub steady_state_adoption_percent: f64,
    pub breakeven_credits_per_user: f64,
    pub scenarios: Vec<ScenarioRecord>,
}

/// One month of the 36-month rollout projection with all five pricing
/// models priced side by side.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RolloutMonth {
    pub month: u32,
    pub year_label: String,
    pub phase: RolloutPhase,
    pub total_users: u32,
    pub daily_active_fraction: f64,
    pub active_users: u32,
    pub conversations: f64,
    pub total_credits: f64,
    pub payg_cost: f64,
    pub prepaid_cost: f64,
    pub hybrid_payg_cost: f64,
    pub hybrid_prepaid_cost: f64,
    pub flat_seat_cost: f64,
}

/// Pay-as-you-go cost of each agent in one month, in plan order. Disabled
/// agents and agents not yet deployed contribute zero.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AgentMonthCosts {
    pub month: u32,
    pub costs: Vec<f64>,
    pub total: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AgentCostSummary {
    pub id: u32,
    pub name: String,
    pub year1: f64,
    pub year2: f64,
    pub year3: f64,
    pub total: f64,
}

/// Cost of each pricing model summed over the same months.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ModelTotals {
    pub payg: f64,
    pub prepaid: f64,
    pub hybrid_payg: f64,
    pub hybrid_prepaid: f64,
    pub flat_seat: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakpointOutcome {
    /// Usage billing already costs at least as much as seats for everyone.
    AlreadyExceeded,
    /// This many additional average agents push usage past the seat total.
    AdditionalAgents { count: u32 },
    /// The search hit its cap without usage ever reaching the seat total.
    NotReachedWithinCap { cap: u32 },
    /// No enabled agent exists to derive an average profile from.
    NoEnabledAgents,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LicensingBreakpoint {
    pub payg_three_year_cost: f64,
    pub flat_seat_three_year_cost: f64,
    pub outcome: BreakpointOutcome,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RolloutReport {
    pub data_source: String,
    pub start_month: Option<String>,
    pub monthly: Vec<RolloutMonth>,
    pub agent_monthly_costs: Vec<AgentMonthCosts>,
    pub agent_summaries: Vec<AgentCostSummary>,
    pub three_year_totals: ModelTotals,
    pub licensing_breakpoint: LicensingBreakpoint,
}
