use thiserror::Error;

use crate::domain::pricing::{
    ACTION_CREDITS, CLASSIC_TURN_CREDITS, GENERATIVE_TURN_CREDITS, TENANT_GROUNDING_CREDITS,
};

/// Workforce segment an agent is built for. Which share of the user base a
/// segment can reach depends on the current rollout phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Hq,
    Management,
    Stores,
    All,
}

/// A deployed (or planned) assistant with its usage profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: u32,
    pub name: String,
    pub purpose: String,
    pub conversations_per_day: f64,
    pub turns_per_conversation: f64,
    pub generative_ratio: f64,
    pub actions_per_conversation: f64,
    pub tenant_grounding: bool,
    pub deploy_month: u32,
    pub segments: Vec<Segment>,
    pub enabled: bool,
}

impl Agent {
    /// Credit cost of one conversation, built from the per-turn credit
    /// prices. Tenant grounding bills once per conversation, not per turn.
    pub fn credits_per_conversation(&self) -> f64 {
        let classic_turns = self.turns_per_conversation * (1.0 - self.generative_ratio);
        let generative_turns = self.turns_per_conversation * self.generative_ratio;
        let grounding = if self.tenant_grounding {
            TENANT_GROUNDING_CREDITS
        } else {
            0.0
        };
        classic_turns * CLASSIC_TURN_CREDITS
            + generative_turns * GENERATIVE_TURN_CREDITS
            + self.actions_per_conversation * ACTION_CREDITS
            + grounding
    }
}

/// Agent fields as entered, before an id has been assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentDraft {
    pub name: String,
    pub purpose: String,
    pub conversations_per_day: f64,
    pub turns_per_conversation: f64,
    pub generative_ratio: f64,
    pub actions_per_conversation: f64,
    pub tenant_grounding: bool,
    pub deploy_month: u32,
    pub segments: Vec<Segment>,
    pub enabled: bool,
}

impl AgentDraft {
    fn into_agent(self, id: u32) -> Agent {
        Agent {
            id,
            name: self.name,
            purpose: self.purpose,
            conversations_per_day: self.conversations_per_day,
            turns_per_conversation: self.turns_per_conversation,
            generative_ratio: self.generative_ratio,
            actions_per_conversation: self.actions_per_conversation,
            tenant_grounding: self.tenant_grounding,
            deploy_month: self.deploy_month,
            segments: self.segments,
            enabled: self.enabled,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum PortfolioError {
    #[error("agent name must not be empty")]
    EmptyName,
    #[error("agent purpose must not be empty")]
    EmptyPurpose,
    #[error("no agent with id {0}")]
    UnknownAgent(u32),
    #[error("agent id {0} is already taken")]
    DuplicateAgent(u32),
}

/// The set of agents a rollout plan is costed over. Insertion order is
/// preserved so reports stay in plan order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    pub agents: Vec<Agent>,
}

impl Portfolio {
    pub fn new() -> Self {
        Portfolio::default()
    }

    /// One past the highest id currently in the portfolio.
    pub fn next_id(&self) -> u32 {
        self.agents
            .iter()
            .map(|agent| agent.id)
            .max()
            .map_or(1, |highest| highest + 1)
    }

    pub fn add(&mut self, draft: AgentDraft) -> Result<u32, PortfolioError> {
        validate_draft(&draft)?;
        let id = self.next_id();
        self.agents.push(draft.into_agent(id));
        Ok(id)
    }

    /// Adds an agent under a caller-chosen id, used when loading plans that
    /// carry explicit ids.
    pub fn insert(&mut self, id: u32, draft: AgentDraft) -> Result<(), PortfolioError> {
        validate_draft(&draft)?;
        if self.agents.iter().any(|agent| agent.id == id) {
            return Err(PortfolioError::DuplicateAgent(id));
        }
        self.agents.push(draft.into_agent(id));
        Ok(())
    }

    pub fn update(&mut self, id: u32, draft: AgentDraft) -> Result<(), PortfolioError> {
        validate_draft(&draft)?;
        let agent = self
            .agents
            .iter_mut()
            .find(|agent| agent.id == id)
            .ok_or(PortfolioError::UnknownAgent(id))?;
        *agent = draft.into_agent(id);
        Ok(())
    }

    pub fn remove(&mut self, id: u32) -> Result<(), PortfolioError> {
        let position = self
            .agents
            .iter()
            .position(|agent| agent.id == id)
            .ok_or(PortfolioError::UnknownAgent(id))?;
        self.agents.remove(position);
        Ok(())
    }
}

fn validate_draft(draft: &AgentDraft) -> Result<(), PortfolioError> {
    if draft.name.trim().is_empty() {
        return Err(PortfolioError::EmptyName);
    }
    if draft.purpose.trim().is_empty() {
        return Err(PortfolioError::EmptyPurpose);
    }
    Ok(())
}
