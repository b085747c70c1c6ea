use std::path::Path;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportOutputError {
    #[error("failed to serialize report to yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize report to json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output encoding, picked from the output file's extension. Anything
/// that is not `.json` serializes as YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Yaml,
    Json,
}

impl ReportFormat {
    pub fn from_path(path: &str) -> ReportFormat {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("json") => ReportFormat::Json,
            _ => ReportFormat::Yaml,
        }
    }
}

pub fn serialize_report<T: Serialize>(
    report: &T,
    format: ReportFormat,
) -> Result<String, ReportOutputError> {
    match format {
        ReportFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        ReportFormat::Json => {
            let mut contents = serde_json::to_string_pretty(report)?;
            contents.push('\n');
            Ok(contents)
        }
    }
}

/// The file name of an input path, used to stamp reports with where
/// their numbers came from.
pub fn data_source_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        months: u32,
        label: String,
    }

    fn sample() -> Sample {
        Sample {
            months: 24,
            label: "projection".to_string(),
        }
    }

    #[test]
    fn json_extension_selects_json() {
        assert_eq!(ReportFormat::from_path("report.json"), ReportFormat::Json);
    }

    #[test]
    fn anything_else_selects_yaml() {
        assert_eq!(ReportFormat::from_path("report.yaml"), ReportFormat::Yaml);
        assert_eq!(ReportFormat::from_path("report.yml"), ReportFormat::Yaml);
        assert_eq!(ReportFormat::from_path("report"), ReportFormat::Yaml);
    }

    #[test]
    fn yaml_output_has_plain_keys() {
        let contents = serialize_report(&sample(), ReportFormat::Yaml).unwrap();

        assert!(contents.contains("months: 24"));
        assert!(contents.contains("label: projection"));
    }

    #[test]
    fn json_output_is_pretty_printed_with_a_trailing_newline() {
        let contents = serialize_report(&sample(), ReportFormat::Json).unwrap();

        assert!(contents.starts_with("{\n"));
        assert!(contents.ends_with("}\n"));
        assert!(contents.contains("\"months\": 24"));
    }

    #[test]
    fn data_source_is_the_file_name_only() {
        assert_eq!(data_source_name("inputs/retail/plan.yaml"), "plan.yaml");
        assert_eq!(data_source_name("plan.yaml"), "plan.yaml");
    }
}
