pub mod cli;
pub mod components;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod rating;
pub mod services;
pub mod storage;
pub mod tables;

use std::io;
use std::path::Path;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use log::info;

use crate::cli::{Command, EngineArgs};
use crate::components::ComponentRegistry;
use crate::config::files::{
    self, NORMALIZATION_FILE, WEIGHTS_FILE, load_normalization, load_or_default, load_weights,
};
use crate::config::settings::AppConfig;
use crate::services::RatingService;
use crate::storage::MatchStore;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub struct CalculateOptions<'a> {
    pub input: &'a Path,
    pub output: Option<&'a Path>,
    pub weights: Option<&'a Path>,
    pub normalization: Option<&'a Path>,
    pub components: &'a [String],
    pub pretty: bool,
}

pub fn handle_calculate(options: CalculateOptions, engine: &EngineArgs) -> Result<()> {
    let data_dir = files::data_dir();
    let mut config = engine_config(engine);
    load_rating_files(&mut config, options.weights, options.normalization, &data_dir)?;

    let service = build_service(config, engine, options.components, &data_dir)?;
    service.run_calculate(options.input, options.output, options.pretty)
}

pub fn handle_components(
    input: &Path,
    output: Option<&Path>,
    components: &[String],
    pretty: bool,
    engine: &EngineArgs,
) -> Result<()> {
    let data_dir = files::data_dir();
    let service = build_service(engine_config(engine), engine, components, &data_dir)?;
    service.run_components(input, output, pretty)
}

pub fn handle_fit(
    input: &Path,
    weights: Option<&Path>,
    output: Option<&Path>,
    engine: &EngineArgs,
) -> Result<()> {
    let data_dir = files::data_dir();
    let mut config = engine_config(engine);
    if let Some(weights) = load_or_default(weights, &data_dir, WEIGHTS_FILE, "weights", load_weights)? {
        config.rating.weights = weights;
    }

    let service = build_service(config, engine, &[], &data_dir)?;
    service.run_fit(input, output)
}

pub fn handle_list() -> Result<()> {
    println!("Available rating components:");
    for name in ComponentRegistry::builtin().list() {
        println!("  - {}", name);
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}

fn engine_config(engine: &EngineArgs) -> AppConfig {
    let mut config = AppConfig::new();
    config.engine.spike_timing = engine.spike_timing;
    config
}

fn load_rating_files(
    config: &mut AppConfig,
    weights: Option<&Path>,
    normalization: Option<&Path>,
    data_dir: &Path,
) -> Result<()> {
    if let Some(weights) = load_or_default(weights, data_dir, WEIGHTS_FILE, "weights", load_weights)? {
        config.rating.weights = weights;
    }
    if let Some(params) = load_or_default(
        normalization,
        data_dir,
        NORMALIZATION_FILE,
        "normalization parameters",
        load_normalization,
    )? {
        config.rating.normalization = params;
    }
    Ok(())
}

fn build_service(
    config: AppConfig,
    engine: &EngineArgs,
    components: &[String],
    data_dir: &Path,
) -> Result<RatingService> {
    let registry = ComponentRegistry::select(components)?;
    info!("Using components: {}", registry.list().join(", "));

    let tables = files::load_tables(
        engine.win_table.as_deref(),
        engine.economy_table.as_deref(),
        data_dir,
    )?;

    Ok(RatingService::new(config, tables, registry).with_store(MatchStore::with_limit(engine.max_matches)))
}
