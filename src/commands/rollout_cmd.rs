use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_rollout_report;
use crate::domain::pricing::PricingConstants;
use crate::services::cost_plot::{CostSeries, write_cost_plot_png};
use crate::services::plan_yaml::{RolloutPlan, load_rollout_plan_from_yaml_file};
use crate::services::projection_types::RolloutReport;
use crate::services::report_output::{ReportFormat, data_source_name, serialize_report};
use crate::services::rollout_projection::{ROLLOUT_MONTHS, project_rollout};
use crate::services::timeline_diagram::generate_timeline_diagram;

pub fn rollout_command(cmd: Commands) {
    if let Commands::Rollout {
        input,
        output,
        start_month,
    } = cmd
    {
        let plan = match load_rollout_plan_from_yaml_file(&input) {
            Ok(plan) => plan,
            Err(e) => {
                eprintln!("Failed to load rollout plan: {e:?}");
                return;
            }
        };

        // The plan's own start month wins over the command-line fallback.
        let effective_start = match plan.start_month {
            Some(date) => date,
            None => {
                match chrono::NaiveDate::parse_from_str(&format!("{start_month}-01"), "%Y-%m-%d") {
                    Ok(date) => date,
                    Err(e) => {
                        eprintln!("Failed to parse start month {start_month:?}: {e:?}");
                        return;
                    }
                }
            }
        };

        let mut report = match project_rollout(
            &plan.stages,
            &plan.portfolio.agents,
            &plan.params,
            &plan_pricing(&plan),
        ) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Failed to project rollout: {e:?}");
                return;
            }
        };
        report.data_source = data_source_name(&input);
        report.start_month = Some(effective_start.format("%Y-%m").to_string());

        let chart_path = format!("{output}.png");
        if let Err(e) = write_cost_plot_png(
            &chart_path,
            "Rollout Cost by Pricing Model",
            &model_series(&report),
        ) {
            eprintln!("Failed to write cost chart: {e:?}");
        }

        let timeline_path = format!("{output}.timeline.md");
        match generate_timeline_diagram(
            &plan.stages,
            &plan.portfolio.agents,
            effective_start,
            ROLLOUT_MONTHS,
        ) {
            Ok(diagram) => {
                if let Err(e) = std::fs::write(&timeline_path, diagram) {
                    eprintln!("Failed to write rollout timeline: {e:?}");
                }
            }
            Err(e) => eprintln!("Failed to generate rollout timeline: {e:?}"),
        }

        let contents = match serialize_report(&report, ReportFormat::from_path(&output)) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to serialize rollout report: {e:?}");
                return;
            }
        };

        if let Err(e) = std::fs::write(&output, contents) {
            eprintln!("Failed to write rollout report: {e:?}");
        } else {
            println!("{}", format_rollout_report(&report));
            println!();
            println!("Rollout report written to {output}");
            println!("Cost chart written to {chart_path}");
            println!("Rollout timeline written to {timeline_path}");
        }
    }
}

/// The plan's seat price applies to the price book as well, so the
/// flat-seat column and the breakpoint use the negotiated price.
fn plan_pricing(plan: &RolloutPlan) -> PricingConstants {
    PricingConstants {
        flat_seat_price: plan.params.flat_seat_price,
        ..PricingConstants::default()
    }
}

fn model_series(report: &RolloutReport) -> Vec<CostSeries> {
    vec![
        CostSeries {
            label: "Pay-as-you-go".to_string(),
            values: report.monthly.iter().map(|month| month.payg_cost).collect(),
        },
        CostSeries {
            label: "Prepaid".to_string(),
            values: report
                .monthly
                .iter()
                .map(|month| month.prepaid_cost)
                .collect(),
        },
        CostSeries {
            label: "Hybrid (payg)".to_string(),
            values: report
                .monthly
                .iter()
                .map(|month| month.hybrid_payg_cost)
                .collect(),
        },
        CostSeries {
            label: "Hybrid (prepaid)".to_string(),
            values: report
                .monthly
                .iter()
                .map(|month| month.hybrid_prepaid_cost)
                .collect(),
        },
        CostSeries {
            label: "Flat seats".to_string(),
            values: report
                .monthly
                .iter()
                .map(|month| month.flat_seat_cost)
                .collect(),
        },
    ]
}
