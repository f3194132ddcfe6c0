//! oaspipe cli interface

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the fleet pipeline on a document
    ///
    /// Reads from stdin unless --input-file is given
    #[command(alias = "run")]
    Transform(TransformCommand),

    /// Print the value at a dotted path
    Get(GetCommand),

    /// Print debug information for development
    Dev(DevCommand),
}

#[derive(Parser, Debug)]
pub struct TransformCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct GetCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub output: OutputArgs,

    /// Run the pipeline before looking up the path
    #[clap(short = 't', long = "transformed")]
    pub transformed: bool,

    /// Dotted path, e.g. paths./outputs.post
    pub path: String,
}

#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Load a file (.yaml/.yml as YAML, anything else as JSON)
    #[clap(short = 'f', long = "input-file")]
    pub file: Option<PathBuf>,

    /// Format of stdin
    #[arg(long = "input-format", default_value_t)]
    pub format: InputFormat,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[clap(short = 'o', long = "output-file")]
    pub file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum InputFormat {
    #[default]
    Json,
    Yaml,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Json => f.write_str("json"),
            InputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

#[derive(Parser, Debug)]
pub struct DevCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[command(subcommand)]
    pub command: DevSubCommand,
}

#[derive(Subcommand, Debug)]
pub enum DevSubCommand {
    /// List the pipeline steps in order
    Steps,
    /// Debug-print the loaded document
    Document,
}
