use chrono::{Months, NaiveDate};
use thiserror::Error;

use crate::domain::agent::Agent;
use crate::domain::stage::AdoptionStage;

#[derive(Error, Debug, PartialEq)]
pub enum TimelineDiagramError {
    #[error("a timeline needs at least one adoption stage")]
    EmptyStages,
}

/// Renders the rollout as a mermaid gantt document: stage anchors as
/// milestones, enabled agents as bars from their deploy month to the end
/// of the horizon.
pub fn generate_timeline_diagram(
    stages: &[AdoptionStage],
    agents: &[Agent],
    start_month: NaiveDate,
    months: u32,
) -> Result<String, TimelineDiagramError> {
    if stages.is_empty() {
        return Err(TimelineDiagramError::EmptyStages);
    }
    let mut lines: Vec<String> = vec![
        String::new(),
        "# Rollout Timeline".to_string(),
        "```mermaid".to_string(),
        "gantt".to_string(),
        "    dateFormat  DD-MM-YYYY".to_string(),
        "    section Stages".to_string(),
    ];
    for stage in stages {
        let anchor = month_date(start_month, stage.anchor_month);
        lines.push(format!(
            "    {} ({}) :milestone, {}, 0d",
            stage.label,
            stage.phase.label(),
            anchor.format("%d-%m-%Y")
        ));
    }
    lines.push("    section Agents".to_string());
    for agent in agents.iter().filter(|agent| agent.enabled) {
        let from = month_date(start_month, agent.deploy_month.min(months));
        let to = month_date(start_month, months);
        lines.push(format!(
            "    {} :agent{}, {}, {}",
            agent.name,
            agent.id,
            from.format("%d-%m-%Y"),
            to.format("%d-%m-%Y")
        ));
    }
    lines.push("```".to_string());
    Ok(lines.join("\n"))
}

fn month_date(start_month: NaiveDate, month: u32) -> NaiveDate {
    start_month
        .checked_add_months(Months::new(month.saturating_sub(1)))
        .unwrap_or(start_month)
}
