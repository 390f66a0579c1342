use anyhow::Context;
use clap::{Parser, Subcommand};
use memoq_prep::cli;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "memoq-prep")]
#[command(about = "Prepare translation spreadsheets for memoQ")]
#[command(long_about = "memoQ Prep - translation spreadsheet preparation

COMMANDS:
  extract  - Keep source text plus yellow-highlighted target cells
  gaps     - Split untranslated termbase entries into per-language files

EXAMPLES:
  memoq-prep extract strings.xlsx                  # → strings_memoQ.xlsx
  memoq-prep extract strings.xlsx -l FR EN --all
  memoq-prep gaps \"TB General.xlsx\" -d missing_translations

Set RUST_LOG=debug for detailed diagnostics.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Extract yellow-highlighted cells into a memoQ-ready workbook.

Scans the first worksheet for cells with a solid yellow fill. Every row with
a highlighted cell and non-empty source text becomes one output row:

  Komponente | Source | FR | IT | EN

Target cells are filled only where the original cell was highlighted; all
other target cells are left empty.

COLUMN MAPPING (default aliases, case-insensitive):
  DE, DEU, GERMAN, DEUTSCH      → Source
  FR, FRA, FRENCH, FRANÇAIS     → FR
  IT, ITA, ITALIAN, ITALIANO    → IT
  EN, ENG, ENGLISH              → EN
  Komponente                    → kept when not empty

Use --config to supply a YAML alias file.")]
    /// Extract yellow-highlighted cells
    Extract {
        /// Input Excel file (.xlsx)
        input: PathBuf,

        /// Output file (default: <input>_memoQ.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target language codes, in output order
        #[arg(short, long, num_args = 1..)]
        languages: Option<Vec<String>>,

        /// Export all rows when no highlighted rows are found
        #[arg(long)]
        all: bool,

        /// YAML alias configuration
        #[arg(short, long, env = "MEMOQ_PREP_CONFIG")]
        config: Option<PathBuf>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Find termbase entries with missing translations.

The first column named exactly after the source language holds the term.
For each target language, rows with a source term but an empty target term
are written to Missing_<Language>.xlsx in the output directory. Languages
with no missing entries produce no file.")]
    /// Find missing termbase translations
    Gaps {
        /// Termbase export (.xlsx)
        input: PathBuf,

        /// Source language column name
        #[arg(short, long, default_value = "German")]
        source: String,

        /// Comma-separated target language column names
        #[arg(
            short,
            long,
            value_delimiter = ',',
            default_value = "English,French,Italian"
        )]
        targets: Vec<String>,

        /// Output directory
        #[arg(short = 'd', long, default_value = "missing_translations")]
        output_dir: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Extract { verbose, .. } | Commands::Gaps { verbose, .. } => *verbose,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "memoq_prep=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.verbose());

    match cli.command {
        Commands::Extract {
            input,
            output,
            languages,
            all,
            config,
            verbose,
        } => cli::extract(input.clone(), output, languages, all, config, verbose)
            .with_context(|| format!("extract failed for {}", input.display())),

        Commands::Gaps {
            input,
            source,
            targets,
            output_dir,
            verbose,
        } => cli::gaps(input.clone(), source, targets, output_dir, verbose)
            .with_context(|| format!("gap analysis failed for {}", input.display())),
    }
}
