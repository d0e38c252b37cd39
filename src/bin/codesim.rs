// src/bin/codesim.rs
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process;

use codesim_core::config::Config;
use codesim_core::extract;
use codesim_core::keywords;
use codesim_core::report;
use codesim_core::similarity;

/// Default config file picked up from the working directory.
const LOCAL_CONFIG: &str = "codesim.toml";

#[derive(Parser)]
#[command(name = "codesim", version, about = "Near-duplicate detector for code submissions")]
struct Cli {
    /// Batch file of submissions (id + functions per record)
    #[arg(value_name = "CODES_FILE", default_value = "codes.txt")]
    codes: PathBuf,

    /// Newline-separated reserved-word list
    #[arg(long, value_name = "FILE", default_value = "keywords.txt")]
    keywords: PathBuf,

    /// Similarity threshold (a pair must score strictly above it)
    #[arg(long)]
    threshold: Option<f64>,

    /// Output format: "terminal" or "json"
    #[arg(long, default_value = "terminal")]
    format: String,

    /// Ceiling on submissions per batch
    #[arg(long)]
    max_submissions: Option<usize>,

    /// Ceiling on function definitions per submission
    #[arg(long)]
    max_functions: Option<usize>,

    /// Ceiling on identifier length
    #[arg(long)]
    max_ident_len: Option<usize>,

    /// Ceiling on prefix-map nodes
    #[arg(long)]
    max_trie_nodes: Option<usize>,

    /// Config file (defaults to ./codesim.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Per-submission extraction diagnostics on stderr
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(rejected_count) => {
            if rejected_count > 0 {
                eprintln!(
                    "{}",
                    format!("{rejected_count} submission(s) skipped.").red()
                );
                process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> Result<usize> {
    let config = build_config(cli)?;

    let keyword_text = std::fs::read_to_string(&cli.keywords)
        .with_context(|| format!("reading keyword list {}", cli.keywords.display()))?;
    let codes_text = std::fs::read_to_string(&cli.codes)
        .with_context(|| format!("reading submissions {}", cli.codes.display()))?;

    let keyword_set = keywords::build_keyword_set(&keyword_text, config.max_trie_nodes)?;

    if config.verbose {
        eprintln!(
            "{} {} bytes of submissions, threshold {}",
            "::".dimmed(),
            codes_text.len(),
            config.threshold
        );
    }

    let outcome = extract::parse_batch(&codes_text, &keyword_set, &config)?;

    for rejection in &outcome.rejected {
        eprintln!(
            "{} submission {}: {}",
            "skipped".yellow().bold(),
            rejection.id,
            rejection.reason
        );
    }

    let groups = similarity::find_groups(&outcome.submissions, config.threshold);
    print!("{}", report::format_report(&groups, &cli.format));

    Ok(outcome.rejected.len())
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::new();

    // File first, CLI flags win.
    if let Some(path) = &cli.config {
        config.load_file(path)?;
    } else if Path::new(LOCAL_CONFIG).exists() {
        config.load_file(Path::new(LOCAL_CONFIG))?;
    }

    if let Some(v) = cli.threshold {
        config.threshold = v;
    }
    if let Some(v) = cli.max_submissions {
        config.max_submissions = v;
    }
    if let Some(v) = cli.max_functions {
        config.max_functions = v;
    }
    if let Some(v) = cli.max_ident_len {
        config.max_ident_len = v;
    }
    if let Some(v) = cli.max_trie_nodes {
        config.max_trie_nodes = v;
    }
    config.verbose = cli.verbose;

    config.validate()?;
    Ok(config)
}
