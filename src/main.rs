mod cli;
mod config;
mod factory;
mod schema;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use cli::{estimate::estimate_cmd, list::list_cmd, ColorMode};
use schema::ModelKind;

#[derive(
    Parser, Default, Clone, Copy, ValueEnum, strum_macros::Display, strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum RequestedColorMode {
    #[default]
    Auto,
    On,
    Off,
}

#[derive(Parser)]
#[command(name = "modelkit")]
#[command(
    about = "Model catalog and factory wiring for model-backed applications",
    version = "0.1.0"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(long, default_value_t = RequestedColorMode::default())]
    color: RequestedColorMode,
    /// Use the specified config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog models or model kinds
    List(ListArgs),
    /// Estimate the cost of a request against a catalog model
    Estimate(EstimateArgs),
}

/// Possible listings
#[derive(Subcommand)]
pub(crate) enum ListObject {
    /// Models in the catalog
    Models(ListModelArgs),
    /// Model kinds
    Kinds,
}

/// Output formats
#[derive(
    Parser, ValueEnum, Default, Clone, Copy, strum_macros::Display, strum_macros::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum ListingFormat {
    /// Format the output as a table
    #[default]
    Table,
    /// Format the output as JSON
    Json,
    /// Format the output as a table without a header
    HeaderlessTable,
}

#[derive(Parser)]
pub(crate) struct ListArgs {
    /// Output the listing with the specified format
    #[arg(short, long, default_value_t = ListingFormat::default())]
    format: ListingFormat,
    /// List the specified object
    #[command(subcommand)]
    object: ListObject,
}

#[derive(Parser, Default)]
pub(crate) struct ListModelArgs {
    /// Limit the listing to the specified kind
    #[arg(short, long)]
    kind: Option<ModelKind>,
}

#[derive(Parser)]
pub(crate) struct EstimateArgs {
    /// The catalog name of the model
    #[arg(short, long)]
    model: String,
    /// The number of tokens in the prompt
    #[arg(long, default_value_t = 0)]
    prompt_tokens: u64,
    /// The number of tokens in the completion
    #[arg(long, default_value_t = 0)]
    completion_tokens: u64,
}

fn main() {
    let cli = Cli::parse();

    let color = ColorMode::resolve_auto(cli.color);
    let config = config::read_config(cli.config);

    match &cli.command {
        Commands::List(args) => list_cmd(&config, args),
        Commands::Estimate(args) => estimate_cmd(color, &config, args),
    }
}
