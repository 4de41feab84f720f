//! genegraph CLI
//!
//! Loads a `.metta` dataset directory into the in-memory fact store and runs
//! relationship queries against it:
//! - `transcripts` / `proteins`: the canonical gene → transcript → protein
//!   lookups, emitted as `{edge, source, target}` JSON records
//! - `query`: ad-hoc conjunctive queries from pattern text
//! - `stats`: fact counts per predicate

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use genegraph_factdb::{project, FactStore, Pattern, Term};
use genegraph_ingest_metta::load_dataset;

mod pattern_text;

#[derive(Parser)]
#[command(name = "genegraph")]
#[command(
    version,
    about = "Conjunctive queries over biological relationship facts"
)]
struct Cli {
    /// Dataset directory containing `.metta` files.
    #[arg(short, long, global = true, default_value = "./Data")]
    data: PathBuf,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcripts transcribed from a gene.
    Transcripts {
        /// Gene accession, e.g. ENSG00000166913
        gene: String,
    },

    /// Proteins translated from a gene's transcripts.
    Proteins {
        /// Gene accession, e.g. ENSG00000166913
        gene: String,
    },

    /// Run an ad-hoc conjunctive query, one pattern per argument,
    /// e.g. 'transcribed_to(gene ENSG00000166913, $t)' 'translates_to($t, $p)'
    Query {
        #[arg(required = true)]
        patterns: Vec<String>,
    },

    /// Fact counts per predicate.
    Stats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut store = FactStore::new();
    let stats = load_dataset(&mut store, &cli.data)
        .with_context(|| format!("loading dataset from `{}`", cli.data.display()))?;
    tracing::debug!(
        files = stats.files_loaded,
        skipped = stats.files_skipped,
        facts = stats.facts_loaded,
        "dataset loaded"
    );

    match cli.command {
        Commands::Transcripts { gene } => {
            let query = [Pattern::new(
                "transcribed_to",
                vec![Term::lit(format!("gene {gene}")), Term::var("transcript")],
            )];
            emit_records(&store, &query, cli.pretty)
        }
        Commands::Proteins { gene } => {
            let query = [
                Pattern::new(
                    "transcribed_to",
                    vec![Term::lit(format!("gene {gene}")), Term::var("transcript")],
                ),
                Pattern::new(
                    "translates_to",
                    vec![Term::var("transcript"), Term::var("protein")],
                ),
            ];
            emit_records(&store, &query, cli.pretty)
        }
        Commands::Query { patterns } => {
            let query = patterns
                .iter()
                .map(|text| pattern_text::parse_pattern(text))
                .collect::<Result<Vec<Pattern>>>()?;
            emit_records(&store, &query, cli.pretty)
        }
        Commands::Stats => {
            println!("{}", "facts by predicate".bold());
            for predicate in store.predicates() {
                println!("  {predicate}: {}", store.count_for_predicate(predicate));
            }
            println!("  {}: {}", "total".bold(), store.len());
            Ok(())
        }
    }
}

fn emit_records(store: &FactStore, query: &[Pattern], pretty: bool) -> Result<()> {
    let matches = store.run_query(query)?;
    let records = project(&matches)?;

    let json = if pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    println!("{json}");
    eprintln!("{}", format!("{} record(s)", records.len()).green());
    Ok(())
}
