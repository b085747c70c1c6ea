/// Usage assumptions an agent starts from when the plan does not override
/// them. Values describe one active user on one working day.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageDefaults {
    pub conversations_per_day: f64,
    pub turns_per_conversation: f64,
    pub generative_ratio: f64,
    pub actions_per_conversation: f64,
    pub tenant_grounding: bool,
}

impl Default for UsageDefaults {
    fn default() -> Self {
        UsageDefaults {
            conversations_per_day: 2.0,
            turns_per_conversation: 6.0,
            generative_ratio: 0.3,
            actions_per_conversation: 1.0,
            tenant_grounding: false,
        }
    }
}
