use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_scenario_report;
use crate::services::projection_yaml::load_scenario_input_from_yaml_file;
use crate::services::report_output::{ReportFormat, data_source_name, serialize_report};
use crate::services::scenario_matrix::build_scenario_report;

pub fn scenarios_command(cmd: Commands) {
    if let Commands::Scenarios { input, output } = cmd {
        let scenario_input = match load_scenario_input_from_yaml_file(&input) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("Failed to load scenario grid: {e:?}");
                return;
            }
        };

        let mut report =
            match build_scenario_report(&scenario_input.grid, &scenario_input.pricing) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Failed to generate scenarios: {e:?}");
                    return;
                }
            };
        report.data_source = data_source_name(&input);

        let contents = match serialize_report(&report, ReportFormat::from_path(&output)) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to serialize scenario report: {e:?}");
                return;
            }
        };

        if let Err(e) = std::fs::write(&output, contents) {
            eprintln!("Failed to write scenario report: {e:?}");
        } else {
            println!("{}", format_scenario_report(&report));
            println!();
            println!("Scenario report written to {output}");
        }
    }
}
