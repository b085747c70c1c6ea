use crate::services::projection_types::{
    BreakpointOutcome, ProjectionReport, RolloutReport, ScenarioReport,
};

pub fn format_projection_report(report: &ProjectionReport) -> String {
    let mut lines = Vec::new();
    lines.push("Adoption Cost Projection".to_string());
    lines.push(format!("Data source: {}", report.data_source));
    lines.push(format!("User base: {}", report.user_count));
    lines.push(format!("Complexity ratio: {}", report.complexity_ratio));
    lines.push(format!(
        "Breakeven credits/user/month: {:.0}",
        report.breakeven_credits_per_user
    ));
    lines.push(String::new());
    lines.push("Month | Adoption % | Active users | Credits | PAYG | Flat seats | Savings".to_string());
    lines.push("------|------------|--------------|---------|------|------------|--------".to_string());
    for month in &report.months {
        lines.push(format!(
            "{} | {:.0} | {} | {:.0} | {:.0} | {:.0} | {:.0}",
            month.month,
            month.adoption_percent,
            month.active_users,
            month.total_credits,
            month.payg_cost,
            month.flat_seat_cost,
            month.savings
        ));
    }
    lines.join("\n")
}

pub fn format_scenario_report(report: &ScenarioReport) -> String {
    let mut lines = Vec::new();
    lines.push("Scenario Cost Matrix".to_string());
    lines.push(format!("Data source: {}", report.data_source));
    lines.push(format!(
        "Steady-state adoption: {:.0}%",
        report.steady_state_adoption_percent
    ));
    lines.push(format!(
        "Breakeven credits/user/month: {:.0}",
        report.breakeven_credits_per_user
    ));
    lines.push(String::new());
    lines.push("Users | Agents | Ratio | Active | Credits/user | Yearly PAYG | Yearly seats | Savings %".to_string());
    lines.push("------|--------|-------|--------|--------------|-------------|--------------|----------".to_string());
    for scenario in &report.scenarios {
        lines.push(format!(
            "{} | {} | {} | {} | {:.0} | {:.0} | {:.0} | {:.0}",
            scenario.user_count,
            scenario.agent_count_label,
            scenario.complexity_ratio,
            scenario.active_users,
            scenario.credits_per_user_per_month,
            scenario.yearly_payg_cost,
            scenario.yearly_flat_seat_cost,
            scenario.savings_percent
        ));
    }
    lines.join("\n")
}

pub fn format_rollout_report(report: &RolloutReport) -> String {
    let start_month = match &report.start_month {
        Some(value) => value.clone(),
        None => "n/a".to_string(),
    };

    let mut lines = Vec::new();
    lines.push("Rollout Cost Projection".to_string());
    lines.push(format!("Data source: {}", report.data_source));
    lines.push(format!("Start month: {}", start_month));
    lines.push(format!("Months: {}", report.monthly.len()));
    lines.push(String::new());
    lines.push("Three-year totals:".to_string());
    lines.push("Model | Cost".to_string());
    lines.push("------|-----".to_string());
    lines.push(format!(
        "Pay-as-you-go | {:.0}",
        report.three_year_totals.payg
    ));
    lines.push(format!("Prepaid packs | {:.0}", report.three_year_totals.prepaid));
    lines.push(format!(
        "Hybrid (payg) | {:.0}",
        report.three_year_totals.hybrid_payg
    ));
    lines.push(format!(
        "Hybrid (prepaid) | {:.0}",
        report.three_year_totals.hybrid_prepaid
    ));
    lines.push(format!(
        "Flat seats | {:.0}",
        report.three_year_totals.flat_seat
    ));
    lines.push(String::new());
    lines.push("Per-agent pay-as-you-go cost:".to_string());
    lines.push("Agent | Year 1 | Year 2 | Year 3 | Total".to_string());
    lines.push("------|--------|--------|--------|------".to_string());
    for summary in &report.agent_summaries {
        lines.push(format!(
            "{} | {:.0} | {:.0} | {:.0} | {:.0}",
            summary.name, summary.year1, summary.year2, summary.year3, summary.total
        ));
    }
    lines.push(String::new());
    lines.push(format_breakpoint(report));
    lines.join("\n")
}

fn format_breakpoint(report: &RolloutReport) -> String {
    match report.licensing_breakpoint.outcome {
        BreakpointOutcome::AlreadyExceeded => {
            "Licensing breakpoint: usage billing already meets the flat-seat total.".to_string()
        }
        BreakpointOutcome::AdditionalAgents { count } => format!(
            "Licensing breakpoint: {count} more average agents until flat seats win."
        ),
        BreakpointOutcome::NotReachedWithinCap { cap } => format!(
            "Licensing breakpoint: not reached within {cap} additional agents."
        ),
        BreakpointOutcome::NoEnabledAgents => {
            "Licensing breakpoint: no enabled agents to extrapolate from.".to_string()
        }
    }
}
