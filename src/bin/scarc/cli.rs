//! CLI argument parsing for `scarc` (§A.2).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Specify the log level of the compiler.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    #[default]
    #[value(alias("0"))]
    Error,

    #[value(alias("1"))]
    Warn,

    #[value(alias("2"))]
    Info,

    #[value(alias("3"))]
    Debug,

    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile a Scar source file to C (and, unless `--emit-c-only`, to
    /// a native binary via the system C compiler).
    Build(BuildArgs),

    /// Run the pipeline up through resolution without emitting C.
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// The path to the Scar source file.
    #[arg(index = 1)]
    pub file: PathBuf,

    /// Whether to dump the cleaned source text (for debugging).
    #[arg(long)]
    pub dump_cleaned: bool,

    /// Whether to dump the parsed AST (for debugging).
    #[arg(long)]
    pub dump_parsed: bool,

    /// Stop after writing the `.c` file; do not invoke a C compiler.
    #[arg(long)]
    pub emit_c_only: bool,

    /// The path to the output binary (ignored with `--emit-c-only`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// The path to the Scar source file.
    #[arg(index = 1)]
    pub file: PathBuf,
}
