//! Taxograph CLI
//!
//! Command-line interface for:
//! - Validating taxonomy input (`check`: rooted-DAG status)
//! - Semantic-distance queries (`distance`, `ancestor`)
//! - Outcast detection over a noun list (`outcast`)
//!
//! Taxonomy input is the two comma-delimited WordNet tables
//! (`synsets.txt`, `hypernyms.txt`).

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use taxograph_wordnet::{Outcast, WordNet};

#[derive(Parser)]
#[command(name = "taxograph")]
#[command(author, version, about = "Semantic distance over a WordNet taxonomy")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TaxonomyArgs {
    /// Synsets table: `id,noun noun ...,gloss` records.
    #[arg(long)]
    synsets: PathBuf,

    /// Hypernyms table: `id,hypernym-id,...` records.
    #[arg(long)]
    hypernyms: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the taxonomy and report its rooted-DAG status.
    Check {
        #[command(flatten)]
        taxonomy: TaxonomyArgs,
    },

    /// Semantic distance between two nouns (shortest ancestral path length).
    Distance {
        #[command(flatten)]
        taxonomy: TaxonomyArgs,

        noun_a: String,
        noun_b: String,

        /// Emit the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Common ancestor of two nouns on a shortest ancestral path.
    Ancestor {
        #[command(flatten)]
        taxonomy: TaxonomyArgs,

        noun_a: String,
        noun_b: String,

        #[arg(long)]
        json: bool,
    },

    /// Find the outcast (least related noun) of a list.
    Outcast {
        #[command(flatten)]
        taxonomy: TaxonomyArgs,

        /// Nouns to rank; alternatively use --file.
        nouns: Vec<String>,

        /// Read nouns from a file, one per line.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct QueryReport<'a> {
    noun_a: &'a str,
    noun_b: &'a str,
    distance: i64,
    ancestor: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check { taxonomy } => cmd_check(&taxonomy),
        Commands::Distance {
            taxonomy,
            noun_a,
            noun_b,
            json,
        } => cmd_query(&taxonomy, &noun_a, &noun_b, json, false),
        Commands::Ancestor {
            taxonomy,
            noun_a,
            noun_b,
            json,
        } => cmd_query(&taxonomy, &noun_a, &noun_b, json, true),
        Commands::Outcast {
            taxonomy,
            nouns,
            file,
        } => cmd_outcast(&taxonomy, nouns, file.as_deref()),
    }
}

fn load(taxonomy: &TaxonomyArgs) -> Result<WordNet> {
    WordNet::from_paths(&taxonomy.synsets, &taxonomy.hypernyms)
}

fn cmd_check(taxonomy: &TaxonomyArgs) -> Result<()> {
    match load(taxonomy) {
        Ok(wordnet) => {
            println!(
                "{} rooted DAG: {} synsets, {} nouns",
                "ok:".green().bold(),
                wordnet.synset_count(),
                wordnet.noun_count()
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("{} {err:#}", "malformed taxonomy:".red().bold());
            std::process::exit(1);
        }
    }
}

fn cmd_query(
    taxonomy: &TaxonomyArgs,
    noun_a: &str,
    noun_b: &str,
    json: bool,
    ancestor_only: bool,
) -> Result<()> {
    let wordnet = load(taxonomy)?;

    let report = QueryReport {
        noun_a,
        noun_b,
        distance: wordnet.distance(noun_a, noun_b)?,
        ancestor: wordnet.common_ancestor_label(noun_a, noun_b)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if ancestor_only {
        match &report.ancestor {
            Some(label) => println!("{label}"),
            None => println!("{}", "no common ancestor".yellow()),
        }
    } else {
        println!("{}", report.distance);
    }
    Ok(())
}

fn cmd_outcast(taxonomy: &TaxonomyArgs, nouns: Vec<String>, file: Option<&std::path::Path>) -> Result<()> {
    let nouns = match file {
        Some(path) => {
            if !nouns.is_empty() {
                return Err(anyhow!("pass nouns either as arguments or via --file, not both"));
            }
            fs::read_to_string(path)?
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        }
        None => nouns,
    };

    let wordnet = load(taxonomy)?;
    let refs: Vec<&str> = nouns.iter().map(String::as_str).collect();
    let outcast = Outcast::new(&wordnet).outcast(&refs)?;

    println!("{} {}", "outcast:".bold(), outcast);
    Ok(())
}
