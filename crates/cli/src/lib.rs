pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "ballpark",
    about = "Ballpark operator CLI",
    long_about = "Run offline quote estimates and inspect runtime configuration.",
    after_help = "Examples:\n  ballpark estimate --service web\n  ballpark estimate --service apps --feature \"Online Payments\"\n  ballpark config\n  ballpark doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Compute a quote estimate offline and print the result JSON")]
    Estimate {
        #[arg(long, help = "Service id (apps|web|uiux|seo|ecom|cloud)")]
        service: String,
        #[arg(long = "feature", help = "Feature add-on label (repeatable)")]
        features: Vec<String>,
        #[arg(long, default_value = "", help = "Free-text project description")]
        description: String,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config and report chat-backend readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Estimate { service, features, description } => {
            commands::estimate::run(&service, &features, &description)
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
