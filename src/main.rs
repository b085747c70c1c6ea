mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use clap::{CommandFactory, Parser};

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::project_cmd::project_command;
use crate::commands::rollout_cmd::rollout_command;
use crate::commands::scenarios_cmd::scenarios_command;

fn main() {
    let args = CliArgs::parse();
    match args.command {
        Commands::Project { .. } => project_command(args.command),
        Commands::Scenarios { .. } => scenarios_command(args.command),
        Commands::Rollout { .. } => rollout_command(args.command),
        Commands::Completions { shell } => {
            let mut cmd = CliArgs::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }
}
