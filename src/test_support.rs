use crate::domain::agent::{Agent, Segment};
use crate::domain::stage::{AdoptionStage, RolloutPhase};

/// A minimal agent: one conversation a day, one classic turn, no actions
/// or grounding, deployed from month 1. Tests tweak what they care about.
pub fn build_agent(id: u32, name: &str, segments: &[Segment]) -> Agent {
    Agent {
        id,
        name: name.to_string(),
        purpose: format!("{name} support"),
        conversations_per_day: 1.0,
        turns_per_conversation: 1.0,
        generative_ratio: 0.0,
        actions_per_conversation: 0.0,
        tenant_grounding: false,
        deploy_month: 1,
        segments: segments.to_vec(),
        enabled: true,
    }
}

pub fn build_stage(
    label: &str,
    anchor_month: u32,
    total_users: u32,
    daily_active_fraction: f64,
    phase: RolloutPhase,
) -> AdoptionStage {
    AdoptionStage {
        label: label.to_string(),
        anchor_month,
        total_users,
        daily_active_fraction,
        phase,
    }
}
