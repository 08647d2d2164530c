//! hcljson cli interface

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
    /// Convert a whole document into JSON
    ///
    /// Reads HCL from stdin unless a file is provided
    Convert(ConvertCommand),

    /// Convert the root attributes of a document (e.g. .tfvars)
    ///
    /// Attributes that are not static values and blocks are reported on stderr and left out.
    #[command(alias = "tfvars")]
    Attributes(AttributesCommand),

    /// Check the syntax of a document
    Validate(ValidateCommand),
}

#[derive(Parser, Debug)]
pub struct ConvertCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub output: OutputArgs,

    /// Keep `${...}` around references
    #[clap(short = 'k', long = "keep-interpolation")]
    pub keep_interpolation: bool,

    /// Maximum nesting of expressions and blocks
    #[clap(long = "max-depth", default_value_t = hcljson::convert::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

#[derive(Parser, Debug)]
pub struct AttributesCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct ValidateCommand {
    #[clap(flatten)]
    pub input: InputArgs,
}

#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Load a file instead of reading stdin
    pub file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
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
