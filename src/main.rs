use clap::Parser;
use owo_colors::OwoColorize;
use std::process::ExitCode;

use command_centre::cli::Cli;
use command_centre::logging::{self, LogTarget};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(if cli.command.is_interactive() {
        LogTarget::File
    } else {
        LogTarget::Stderr
    });

    match cli.command.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
