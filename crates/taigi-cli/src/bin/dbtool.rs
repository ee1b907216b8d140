use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use taigi_cli::commands::build_ops::{self, BuildOptions};
use taigi_cli::commands::{config_ops, inspect_ops};
use taigi_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(
    name = "dbtool",
    about = "Taiwanese dictionary lookup database build tool",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    // Build options used when no subcommand is given.
    #[command(flatten)]
    build: BuildArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Debug, Default)]
struct BuildArgs {
    /// Tab-separated input file (default: db2.csv)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,
    /// Output database file (default: TalmageOverride.db)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Custom settings TOML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Write JSON trace events to DIR/dbtool-trace.jsonl
    #[arg(long, value_name = "DIR")]
    trace_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the lookup database from a dictionary source
    Build(BuildArgs),
    /// Transliterate ROC syllables to POJ
    Translit {
        /// ROC syllables with optional tone digits
        #[arg(required = true)]
        syllables: Vec<String>,
    },
    /// Show the query keys generated for a reading
    Qstrings {
        /// Hyphen-separated ROC reading
        reading: String,
    },
    /// Reconcile an original reading against its corrected form
    Reconcile {
        /// Original reading
        original: String,
        /// Corrected reading
        corrected: String,
    },
    /// Show row counts and build information of a database
    Info {
        /// Database file
        db_file: String,
    },
    /// Look up word entries by query key
    Lookup {
        /// Database file
        db_file: String,
        /// Query key
        qstring: String,
        /// Match every key starting with QSTRING
        #[arg(long)]
        prefix: bool,
        /// Maximum number of entries
        #[arg(short, long, default_value = "20")]
        n: usize,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Build(cli.build));

    let trace_dir = match &command {
        Command::Build(args) => args.trace_dir.clone(),
        _ => None,
    };
    let _guard = init_tracing(trace_dir.as_deref());

    match command {
        Command::Build(args) => build_ops::build(&BuildOptions {
            input: args.input,
            output: args.output,
            config: args.config,
        }),
        Command::Translit { syllables } => inspect_ops::translit(&syllables),
        Command::Qstrings { reading } => inspect_ops::qstrings(&reading),
        Command::Reconcile {
            original,
            corrected,
        } => inspect_ops::reconcile_cmd(&original, &corrected),
        Command::Info { db_file } => inspect_ops::info(&db_file),
        Command::Lookup {
            db_file,
            qstring,
            prefix,
            n,
        } => inspect_ops::lookup(&db_file, &qstring, prefix, n),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
