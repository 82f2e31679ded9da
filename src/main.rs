use anyhow::Result;

use open_soup_rating::cli::Command;
use open_soup_rating::{
    CalculateOptions, handle_calculate, handle_completions, handle_components, handle_fit,
    handle_list, interpret,
};

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
        Command::Calculate {
            input,
            output,
            weights,
            normalization,
            components,
            pretty,
            engine,
        } => handle_calculate(
            CalculateOptions {
                input,
                output: output.as_deref(),
                weights: weights.as_deref(),
                normalization: normalization.as_deref(),
                components,
                pretty: *pretty,
            },
            engine,
        ),
        Command::Components {
            input,
            output,
            components,
            pretty,
            engine,
        } => handle_components(input, output.as_deref(), components, *pretty, engine),
        Command::Fit {
            input,
            weights,
            output,
            engine,
        } => handle_fit(input, weights.as_deref(), output.as_deref(), engine),
        Command::List => handle_list(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
