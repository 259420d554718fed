mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use commands::check::cmd_check;
use commands::mark::cmd_mark;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Verifier instrumentation classifier for IR modules.
#[derive(Parser)]
#[command(
    name = "verimark",
    version,
    about = "Classifies IR operations as verifier instrumentation or program code"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a module and write the marked interchange JSON
    Mark {
        /// Path to the interchange module JSON file
        module: PathBuf,
        /// Output file (default: stdout)
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
        /// Verifier-API name prefix (repeatable; overrides the default set)
        #[arg(long)]
        prefix: Vec<String>,
    },

    /// Classify a module and print the classification report
    Check {
        /// Path to the interchange module JSON file
        module: PathBuf,
        /// Verifier-API name prefix (repeatable; overrides the default set)
        #[arg(long)]
        prefix: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Mark {
            module,
            out,
            prefix,
        } => {
            cmd_mark(&module, out.as_deref(), &prefix, cli.output, cli.quiet);
        }
        Commands::Check { module, prefix } => {
            cmd_check(&module, &prefix, cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}
