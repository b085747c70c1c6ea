//! YAML rollout plans: stages, agents and plan-level knobs.
//!
//! Stage anchors and agent deploy months accept either a plain month
//! number (1-based) or a calendar month like "2026-09"; calendar months
//! need the plan's `start_month` to resolve against. Agents inherit any
//! usage field they leave out from the plan's defaults block.

use std::io;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::agent::{AgentDraft, Portfolio, PortfolioError, Segment};
use crate::domain::stage::{AdoptionStage, RolloutPhase};
use crate::domain::usage::UsageDefaults;
use crate::services::rollout_projection::RolloutParams;

#[derive(Error, Debug)]
pub enum PlanYamlError {
    #[error("failed to read plan yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse plan yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid start month: {0:?} (expected YYYY-MM)")]
    InvalidStartMonth(String),
    #[error("invalid month for {context}: {value:?} (expected a month number or YYYY-MM)")]
    InvalidMonth { context: String, value: String },
    #[error("{context} uses a calendar month but the plan has no start_month")]
    MissingStartMonth { context: String },
    #[error("invalid rollout phase for stage {label:?}: {value:?}")]
    InvalidPhase { label: String, value: String },
    #[error("invalid segment for agent {name:?}: {value:?}")]
    InvalidSegment { name: String, value: String },
    #[error("invalid agent: {0}")]
    Portfolio(#[from] PortfolioError),
}

#[derive(Deserialize)]
struct PlanRecord {
    start_month: Option<String>,
    hybrid_seat_user_count: Option<u32>,
    flat_seat_price: Option<f64>,
    autonomous_action_fraction: Option<f64>,
    peak_month_multiplier: Option<f64>,
    defaults: Option<DefaultsRecord>,
    stages: Vec<StageRecord>,
    agents: Option<Vec<AgentRecord>>,
}

#[derive(Deserialize)]
struct DefaultsRecord {
    conversations_per_day: Option<f64>,
    turns_per_conversation: Option<f64>,
    generative_ratio: Option<f64>,
    actions_per_conversation: Option<f64>,
    tenant_grounding: Option<bool>,
}

#[derive(Deserialize)]
struct StageRecord {
    label: String,
    month: MonthRecord,
    total_users: u32,
    daily_active_fraction: f64,
    phase: String,
}

#[derive(Deserialize)]
struct AgentRecord {
    id: Option<u32>,
    name: String,
    purpose: String,
    conversations_per_day: Option<f64>,
    turns_per_conversation: Option<f64>,
    generative_ratio: Option<f64>,
    actions_per_conversation: Option<f64>,
    tenant_grounding: Option<bool>,
    deploy_month: Option<MonthRecord>,
    segments: Option<Vec<String>>,
    enabled: Option<bool>,
}

/// A month in a plan file: either a 1-based index or a calendar month.
#[derive(Deserialize)]
#[serde(untagged)]
enum MonthRecord {
    Index(u32),
    Calendar(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RolloutPlan {
    pub start_month: Option<NaiveDate>,
    pub params: RolloutParams,
    pub stages: Vec<AdoptionStage>,
    pub portfolio: Portfolio,
}

pub fn load_rollout_plan_from_yaml_file(path: &str) -> Result<RolloutPlan, PlanYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_rollout_plan_from_yaml_str(&contents)
}

pub fn deserialize_rollout_plan_from_yaml_str(input: &str) -> Result<RolloutPlan, PlanYamlError> {
    let record: PlanRecord = serde_yaml::from_str(input)?;

    let start_month = match &record.start_month {
        Some(value) => Some(parse_month_string(value.trim())
            .ok_or_else(|| PlanYamlError::InvalidStartMonth(value.clone()))?),
        None => None,
    };

    let defaults = usage_defaults(record.defaults);

    let mut stages = Vec::with_capacity(record.stages.len());
    for stage in record.stages {
        stages.push(stage_from_record(stage, start_month)?);
    }

    let mut portfolio = Portfolio::new();
    for agent in record.agents.unwrap_or_default() {
        add_agent_from_record(&mut portfolio, agent, &defaults, start_month)?;
    }

    let fallback = RolloutParams::default();
    let params = RolloutParams {
        hybrid_seat_user_count: record
            .hybrid_seat_user_count
            .unwrap_or(fallback.hybrid_seat_user_count),
        flat_seat_price: record.flat_seat_price.unwrap_or(fallback.flat_seat_price),
        autonomous_action_fraction: record
            .autonomous_action_fraction
            .unwrap_or(fallback.autonomous_action_fraction),
        peak_month_multiplier: record
            .peak_month_multiplier
            .unwrap_or(fallback.peak_month_multiplier),
    };

    Ok(RolloutPlan {
        start_month,
        params,
        stages,
        portfolio,
    })
}

fn usage_defaults(record: Option<DefaultsRecord>) -> UsageDefaults {
    let fallback = UsageDefaults::default();
    let Some(record) = record else {
        return fallback;
    };
    UsageDefaults {
        conversations_per_day: record
            .conversations_per_day
            .unwrap_or(fallback.conversations_per_day),
        turns_per_conversation: record
            .turns_per_conversation
            .unwrap_or(fallback.turns_per_conversation),
        generative_ratio: record.generative_ratio.unwrap_or(fallback.generative_ratio),
        actions_per_conversation: record
            .actions_per_conversation
            .unwrap_or(fallback.actions_per_conversation),
        tenant_grounding: record.tenant_grounding.unwrap_or(fallback.tenant_grounding),
    }
}

fn stage_from_record(
    record: StageRecord,
    start_month: Option<NaiveDate>,
) -> Result<AdoptionStage, PlanYamlError> {
    let context = format!("stage {:?}", record.label);
    let anchor_month = resolve_month(&record.month, start_month, &context)?;
    let phase = parse_phase(&record.phase).ok_or_else(|| PlanYamlError::InvalidPhase {
        label: record.label.clone(),
        value: record.phase.clone(),
    })?;
    Ok(AdoptionStage {
        label: record.label,
        anchor_month,
        total_users: record.total_users,
        daily_active_fraction: record.daily_active_fraction,
        phase,
    })
}

fn add_agent_from_record(
    portfolio: &mut Portfolio,
    record: AgentRecord,
    defaults: &UsageDefaults,
    start_month: Option<NaiveDate>,
) -> Result<(), PlanYamlError> {
    let context = format!("agent {:?}", record.name);
    let deploy_month = match &record.deploy_month {
        Some(month) => resolve_month(month, start_month, &context)?,
        None => 1,
    };
    let segments = match record.segments {
        Some(names) => {
            let mut segments = Vec::with_capacity(names.len());
            for name in names {
                segments.push(parse_segment(&name).ok_or_else(|| {
                    PlanYamlError::InvalidSegment {
                        name: record.name.clone(),
                        value: name.clone(),
                    }
                })?);
            }
            segments
        }
        None => vec![Segment::All],
    };
    let draft = AgentDraft {
        name: record.name,
        purpose: record.purpose,
        conversations_per_day: record
            .conversations_per_day
            .unwrap_or(defaults.conversations_per_day),
        turns_per_conversation: record
            .turns_per_conversation
            .unwrap_or(defaults.turns_per_conversation),
        generative_ratio: record.generative_ratio.unwrap_or(defaults.generative_ratio),
        actions_per_conversation: record
            .actions_per_conversation
            .unwrap_or(defaults.actions_per_conversation),
        tenant_grounding: record.tenant_grounding.unwrap_or(defaults.tenant_grounding),
        deploy_month,
        segments,
        enabled: record.enabled.unwrap_or(true),
    };
    match record.id {
        Some(id) => portfolio.insert(id, draft)?,
        None => {
            portfolio.add(draft)?;
        }
    }
    Ok(())
}

fn resolve_month(
    month: &MonthRecord,
    start_month: Option<NaiveDate>,
    context: &str,
) -> Result<u32, PlanYamlError> {
    match month {
        MonthRecord::Index(index) => {
            if *index == 0 {
                return Err(PlanYamlError::InvalidMonth {
                    context: context.to_string(),
                    value: "0".to_string(),
                });
            }
            Ok(*index)
        }
        MonthRecord::Calendar(value) => {
            let date =
                parse_month_string(value.trim()).ok_or_else(|| PlanYamlError::InvalidMonth {
                    context: context.to_string(),
                    value: value.clone(),
                })?;
            let start = start_month.ok_or_else(|| PlanYamlError::MissingStartMonth {
                context: context.to_string(),
            })?;
            let offset = months_between(start, date);
            if offset < 0 {
                return Err(PlanYamlError::InvalidMonth {
                    context: context.to_string(),
                    value: value.clone(),
                });
            }
            Ok(offset as u32 + 1)
        }
    }
}

/// Parses "YYYY-MM" into the first day of that month.
fn parse_month_string(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").ok()
}

fn months_between(start: NaiveDate, date: NaiveDate) -> i32 {
    (date.year() - start.year()) * 12 + date.month() as i32 - start.month() as i32
}

fn parse_phase(value: &str) -> Option<RolloutPhase> {
    match value.trim().to_lowercase().as_str() {
        "pilot" => Some(RolloutPhase::Pilot),
        "expansion" => Some(RolloutPhase::Expansion),
        "management" => Some(RolloutPhase::Management),
        "stores" => Some(RolloutPhase::Stores),
        "enterprise" => Some(RolloutPhase::Enterprise),
        _ => None,
    }
}

fn parse_segment(value: &str) -> Option<Segment> {
    match value.trim().to_lowercase().as_str() {
        "hq" | "headquarters" => Some(Segment::Hq),
        "management" => Some(Segment::Management),
        "stores" => Some(Segment::Stores),
        "all" | "everyone" => Some(Segment::All),
        _ => None,
    }
}
