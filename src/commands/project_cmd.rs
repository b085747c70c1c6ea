use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_projection_report;
use crate::services::adoption_projection::build_projection_report;
use crate::services::cost_plot::{CostSeries, write_cost_plot_png};
use crate::services::projection_yaml::load_projection_input_from_yaml_file;
use crate::services::report_output::{ReportFormat, data_source_name, serialize_report};

pub fn project_command(cmd: Commands) {
    if let Commands::Project { input, output } = cmd {
        let projection_input = match load_projection_input_from_yaml_file(&input) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("Failed to load projection params: {e:?}");
                return;
            }
        };

        let mut report =
            match build_projection_report(&projection_input.params, &projection_input.pricing) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Failed to project monthly costs: {e:?}");
                    return;
                }
            };
        report.data_source = data_source_name(&input);

        let chart_path = format!("{output}.png");
        let series = [
            CostSeries {
                label: "Pay-as-you-go".to_string(),
                values: report.months.iter().map(|month| month.payg_cost).collect(),
            },
            CostSeries {
                label: "Prepaid packs".to_string(),
                values: report
                    .months
                    .iter()
                    .map(|month| month.prepaid_pack_cost)
                    .collect(),
            },
            CostSeries {
                label: "Flat seats".to_string(),
                values: report
                    .months
                    .iter()
                    .map(|month| month.flat_seat_cost)
                    .collect(),
            },
        ];
        if let Err(e) = write_cost_plot_png(&chart_path, "Adoption Cost Projection", &series) {
            eprintln!("Failed to write cost chart: {e:?}");
        }

        let contents = match serialize_report(&report, ReportFormat::from_path(&output)) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to serialize projection report: {e:?}");
                return;
            }
        };

        if let Err(e) = std::fs::write(&output, contents) {
            eprintln!("Failed to write projection report: {e:?}");
        } else {
            println!("{}", format_projection_report(&report));
            println!();
            println!("Projection report written to {output}");
            println!("Cost chart written to {chart_path}");
        }
    }
}
