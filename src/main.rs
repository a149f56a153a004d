use anyhow::Result;

use basketball_pbp::cli::Command;
use basketball_pbp::{handle_analyze, handle_completions, handle_display, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Analyze { xml_file } => handle_analyze(xml_file.as_deref()),
        Command::Display { compact } => handle_display(*compact),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
