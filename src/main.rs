use clap::Parser;
use std::process;

use calmtask::cli;
use calmtask::cli::commands::{Cli, Commands};

fn main() {
    let cli_args = Cli::parse();

    let exit_code = match cli_args.command {
        Commands::Shell => cli::shell::run(&cli_args.global),
        Commands::Demo => cli::demo::run(&cli_args.global),
    };

    process::exit(exit_code);
}
