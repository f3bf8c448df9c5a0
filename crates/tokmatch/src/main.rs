//! tokmatch - ranked token-overlap search over a pattern file
//!
//! Usage:
//!     tokmatch --patterns raven.tsv while i pondered
//!     tokmatch --patterns raven.tsv --group 1 --group 2 --no-stop-words chamber door
//!     tokmatch --patterns raven.tsv --json tapping

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tokmatch::{load_config, logging, parse_patterns, Catalog};
use tokmatch_core::{EngineConfig, GroupId, PatternId, SearchEngine, SharedInterner};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tokmatch")]
#[command(about = "Ranked token-overlap search over grouped text patterns")]
#[command(version)]
struct Args {
    /// Pattern file: one `<group>\t<id>\t<text>` entry per line
    #[arg(short, long)]
    patterns: PathBuf,

    /// JSON engine configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Built-in stop word list to use (overrides the config file)
    #[arg(long, conflicts_with = "no_stop_words")]
    locale: Option<String>,

    /// Disable stop word filtering
    #[arg(long)]
    no_stop_words: bool,

    /// Restrict the search to a group; repeat for several groups
    #[arg(short, long = "group")]
    groups: Vec<GroupId>,

    /// Print at most this many results
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Emit results as JSON
    #[arg(long)]
    json: bool,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Query words; with none, every pattern is listed
    query: Vec<String>,
}

#[derive(Serialize)]
struct ResultRow<'a> {
    pattern_id: PatternId,
    hits: u32,
    text: &'a str,
}

fn engine_config(args: &Args) -> tokmatch::Result<EngineConfig> {
    if args.no_stop_words {
        return Ok(EngineConfig::without_stop_words());
    }
    if let Some(locale) = &args.locale {
        return Ok(EngineConfig::with_locale(locale.clone()));
    }
    match &args.config {
        Some(path) => load_config(path),
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init_with_filter(&args.log_level);

    info!("Starting tokmatch v{}", env!("CARGO_PKG_VERSION"));

    let config = engine_config(&args)?;
    let entries = parse_patterns(BufReader::new(File::open(&args.patterns)?))?;
    let engine = SearchEngine::from_config(SharedInterner::new(), &config);
    let catalog = Catalog::load(engine, entries);

    let query = args.query.join(" ");
    let tokens = catalog.engine().tokenizer().tokenize(&query, false);
    let mut hits = catalog.engine().search_with_hits(&tokens, &args.groups);
    if let Some(limit) = args.limit {
        hits.truncate(limit);
    }

    let rows: Vec<ResultRow<'_>> = hits
        .iter()
        .map(|hit| ResultRow {
            pattern_id: hit.pattern_id,
            hits: hit.hits,
            text: catalog.text(hit.pattern_id).unwrap_or(""),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            println!("{}\t{}\t{}", row.pattern_id, row.hits, row.text);
        }
    }

    Ok(())
}
