use serde::Serialize;

/// Organisational reach of the rollout at a given point in time.
///
/// Phases are ordered by how wide the audience is; segment eligibility
/// rules key off them.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RolloutPhase {
    Pilot,
    Expansion,
    Management,
    Stores,
    Enterprise,
}

impl RolloutPhase {
    pub fn label(&self) -> &'static str {
        match self {
            RolloutPhase::Pilot => "Pilot",
            RolloutPhase::Expansion => "Expansion",
            RolloutPhase::Management => "Management",
            RolloutPhase::Stores => "Stores",
            RolloutPhase::Enterprise => "Enterprise",
        }
    }
}

/// One anchor point of the rollout curve. Months between anchors are
/// interpolated linearly.
#[derive(Debug, Clone, PartialEq)]
pub struct AdoptionStage {
    pub label: String,
    pub anchor_month: u32,
    pub total_users: u32,
    pub daily_active_fraction: f64,
    pub phase: RolloutPhase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_labels_are_human_readable() {
        assert_eq!(RolloutPhase::Pilot.label(), "Pilot");
        assert_eq!(RolloutPhase::Enterprise.label(), "Enterprise");
    }
}
