pub mod base_commands;
pub mod project_cmd;
pub mod report_format;
pub mod rollout_cmd;
pub mod scenarios_cmd;
