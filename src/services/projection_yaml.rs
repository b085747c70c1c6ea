//! YAML inputs for the adoption projection and the scenario matrix.
//!
//! Each file maps through a private serde record onto the engine-facing
//! params, so the on-disk shape can drift without touching the engines.
//! An optional `flat_seat_price` overrides the price book within its
//! negotiable band; every other price is a fixed list price.

use std::io;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::pricing::PricingConstants;
use crate::services::adoption_projection::ProjectionParams;
use crate::services::scenario_matrix::ScenarioGrid;

#[derive(Error, Debug)]
pub enum ProjectionYamlError {
    #[error("failed to read projection input: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse projection yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Deserialize)]
struct ProjectionParamsRecord {
    user_count: u32,
    complexity_ratio: String,
    simple_credits_per_user: f64,
    complex_credits_per_user: f64,
    year1_monthly_growth_percent: f64,
    adoption_ceiling_percent: f64,
    steady_state_adoption_percent: f64,
    flat_seat_price: Option<f64>,
}

#[derive(Deserialize)]
struct ScenarioGridRecord {
    user_counts: Vec<u32>,
    agent_count_labels: Vec<String>,
    complexity_ratios: Vec<String>,
    simple_credits_per_user: f64,
    complex_credits_per_user: f64,
    steady_state_adoption_percent: f64,
    flat_seat_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionInput {
    pub params: ProjectionParams,
    pub pricing: PricingConstants,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioInput {
    pub grid: ScenarioGrid,
    pub pricing: PricingConstants,
}

pub fn load_projection_input_from_yaml_file(
    path: &str,
) -> Result<ProjectionInput, ProjectionYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_projection_input_from_yaml_str(&contents)
}

pub fn deserialize_projection_input_from_yaml_str(
    input: &str,
) -> Result<ProjectionInput, ProjectionYamlError> {
    let record: ProjectionParamsRecord = serde_yaml::from_str(input)?;
    Ok(ProjectionInput {
        params: ProjectionParams {
            user_count: record.user_count,
            complexity_ratio: record.complexity_ratio,
            simple_credits_per_user: record.simple_credits_per_user,
            complex_credits_per_user: record.complex_credits_per_user,
            year1_monthly_growth_percent: record.year1_monthly_growth_percent,
            adoption_ceiling_percent: record.adoption_ceiling_percent,
            steady_state_adoption_percent: record.steady_state_adoption_percent,
        },
        pricing: pricing_with_seat_price(record.flat_seat_price),
    })
}

pub fn load_scenario_input_from_yaml_file(
    path: &str,
) -> Result<ScenarioInput, ProjectionYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_scenario_input_from_yaml_str(&contents)
}

pub fn deserialize_scenario_input_from_yaml_str(
    input: &str,
) -> Result<ScenarioInput, ProjectionYamlError> {
    let record: ScenarioGridRecord = serde_yaml::from_str(input)?;
    Ok(ScenarioInput {
        grid: ScenarioGrid {
            user_counts: record.user_counts,
            agent_count_labels: record.agent_count_labels,
            complexity_ratios: record.complexity_ratios,
            simple_credits_per_user: record.simple_credits_per_user,
            complex_credits_per_user: record.complex_credits_per_user,
            steady_state_adoption_percent: record.steady_state_adoption_percent,
        },
        pricing: pricing_with_seat_price(record.flat_seat_price),
    })
}

fn pricing_with_seat_price(flat_seat_price: Option<f64>) -> PricingConstants {
    let defaults = PricingConstants::default();
    PricingConstants {
        flat_seat_price: flat_seat_price.unwrap_or(defaults.flat_seat_price),
        ..defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_projection_params_file() {
        let yaml = "\
user_count: 1300
complexity_ratio: 80/20
simple_credits_per_user: 75
complex_credits_per_user: 600
year1_monthly_growth_percent: 15
adoption_ceiling_percent: 80
steady_state_adoption_percent: 60
";

        let input = deserialize_projection_input_from_yaml_str(yaml).unwrap();

        assert_eq!(input.params.user_count, 1300);
        assert_eq!(input.params.complexity_ratio, "80/20");
        assert_eq!(input.params.simple_credits_per_user, 75.0);
        assert_eq!(input.params.complex_credits_per_user, 600.0);
        assert_eq!(input.params.year1_monthly_growth_percent, 15.0);
        assert_eq!(input.params.adoption_ceiling_percent, 80.0);
        assert_eq!(input.params.steady_state_adoption_percent, 60.0);
        assert_eq!(input.pricing, PricingConstants::default());
    }

    #[test]
    fn a_quoted_ratio_parses_the_same_as_a_bare_one() {
        let yaml = "\
user_count: 100
complexity_ratio: \"50/50\"
simple_credits_per_user: 75
complex_credits_per_user: 600
year1_monthly_growth_percent: 10
adoption_ceiling_percent: 70
steady_state_adoption_percent: 60
";

        let input = deserialize_projection_input_from_yaml_str(yaml).unwrap();

        assert_eq!(input.params.complexity_ratio, "50/50");
    }

    #[test]
    fn a_seat_price_override_lands_in_the_pricing() {
        let yaml = "\
user_count: 100
complexity_ratio: 80/20
simple_credits_per_user: 75
complex_credits_per_user: 600
year1_monthly_growth_percent: 10
adoption_ceiling_percent: 70
steady_state_adoption_percent: 60
flat_seat_price: 25
";

        let input = deserialize_projection_input_from_yaml_str(yaml).unwrap();

        assert_eq!(input.pricing.flat_seat_price, 25.0);
        assert_eq!(input.pricing.payg_rate_per_credit, 0.01);
    }

    #[test]
    fn a_missing_field_is_a_parse_error() {
        let yaml = "user_count: 100\n";

        let result = deserialize_projection_input_from_yaml_str(yaml);

        assert!(matches!(result, Err(ProjectionYamlError::Parse(_))));
    }

    #[test]
    fn parses_a_scenario_grid_file() {
        let yaml = "\
user_counts:
  - 1300
  - 30000
agent_count_labels:
  - pilot fleet
  - full fleet
complexity_ratios:
  - 80/20
  - 50/50
simple_credits_per_user: 75
complex_credits_per_user: 600
steady_state_adoption_percent: 60
";

        let input = deserialize_scenario_input_from_yaml_str(yaml).unwrap();

        assert_eq!(input.grid.user_counts, vec![1300, 30000]);
        assert_eq!(input.grid.agent_count_labels.len(), 2);
        assert_eq!(
            input.grid.complexity_ratios,
            vec!["80/20".to_string(), "50/50".to_string()]
        );
        assert_eq!(input.grid.steady_state_adoption_percent, 60.0);
    }

    #[test]
    fn garbage_yaml_is_a_parse_error() {
        let result = deserialize_scenario_input_from_yaml_str(": not yaml :");

        assert!(matches!(result, Err(ProjectionYamlError::Parse(_))));
    }
}
