pub mod adoption_projection;
pub mod complexity;
pub mod cost_plot;
pub mod interpolation;
pub mod plan_yaml;
pub mod projection_types;
pub mod projection_yaml;
pub mod report_output;
pub mod rollout_projection;
pub mod scenario_matrix;
pub mod timeline_diagram;
pub mod validation;
