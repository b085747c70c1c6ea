use chrono::Local;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project 24 months of adoption with pay-as-you-go, prepaid and seat costs
    Project {
        /// Projection params YAML file
        #[arg(short, long)]
        input: String,
        /// Output report file (.yaml or .json)
        #[arg(short, long)]
        output: String,
    },
    /// Expand a scenario grid into steady-state cost comparisons
    Scenarios {
        /// Scenario grid YAML file
        #[arg(short, long)]
        input: String,
        /// Output report file (.yaml or .json)
        #[arg(short, long)]
        output: String,
    },
    /// Project a staged 36-month rollout under five pricing models
    Rollout {
        /// Rollout plan YAML file
        #[arg(short, long)]
        input: String,
        /// Output report file (.yaml or .json)
        #[arg(short, long)]
        output: String,
        /// First calendar month when the plan does not set one (YYYY-MM)
        #[arg(short, long, default_value_t = default_start_month())]
        start_month: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn default_start_month() -> String {
    Local::now().date_naive().format("%Y-%m").to_string()
}
