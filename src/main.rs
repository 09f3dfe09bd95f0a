use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use colloquy::{
    DEFAULT_FALLBACK_ENCODING, RecordSet, SegmenterConfig, SourceSpec, load_cues,
    parse_manifest_file, segment_source, write_tables,
};

#[derive(Parser)]
#[command(name = "colloquy")]
#[command(author, version, about = "Subtitle-to-conversation dataset extraction pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment subtitle sources into conversation datasets
    Process {
        /// JSON manifest listing sources: [{"name": ..., "path": ...}, ...]
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Subtitle files to process (name taken from the file stem)
        inputs: Vec<PathBuf>,

        /// Directory the CSV tables are written into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Maximum gap in seconds for a cue to count as a response
        #[arg(long, default_value = "5.0")]
        max_gap_seconds: f64,

        /// Encoding used when detection fails or is ambiguous
        #[arg(long, default_value = DEFAULT_FALLBACK_ENCODING)]
        fallback_encoding: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Segment sources and print per-source statistics without writing output
    Analyze {
        /// JSON manifest listing sources
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Subtitle files to analyze
        inputs: Vec<PathBuf>,

        /// Maximum gap in seconds for a cue to count as a response
        #[arg(long, default_value = "5.0")]
        max_gap_seconds: f64,

        /// Encoding used when detection fails or is ambiguous
        #[arg(long, default_value = DEFAULT_FALLBACK_ENCODING)]
        fallback_encoding: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            manifest,
            inputs,
            out_dir,
            max_gap_seconds,
            fallback_encoding,
            verbose,
        } => {
            setup_logging(verbose);
            let sources = collect_sources(manifest, inputs)?;
            process_sources(sources, out_dir, max_gap_seconds, &fallback_encoding)
        }
        Commands::Analyze {
            manifest,
            inputs,
            max_gap_seconds,
            fallback_encoding,
            verbose,
        } => {
            setup_logging(verbose);
            let sources = collect_sources(manifest, inputs)?;
            analyze_sources(sources, max_gap_seconds, &fallback_encoding)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// Build the source list from the manifest and/or positional inputs
fn collect_sources(manifest: Option<PathBuf>, inputs: Vec<PathBuf>) -> Result<Vec<SourceSpec>> {
    let mut sources = match manifest {
        Some(path) => parse_manifest_file(&path)?,
        None => Vec::new(),
    };
    sources.extend(inputs.into_iter().map(SourceSpec::from_path));

    if sources.is_empty() {
        bail!("No sources given: pass subtitle files or --manifest");
    }
    Ok(sources)
}

fn process_sources(
    sources: Vec<SourceSpec>,
    out_dir: PathBuf,
    max_gap_seconds: f64,
    fallback_encoding: &str,
) -> Result<()> {
    let config = SegmenterConfig { max_gap_seconds };
    let total = sources.len();
    let mut records = RecordSet::new();
    let mut skipped = 0usize;

    info!("Processing {} source(s)", total);

    for (idx, source) in sources.iter().enumerate() {
        info!("[{}/{}] Processing '{}'...", idx + 1, total, source.name);

        let cues = match load_cues(&source.path, fallback_encoding) {
            Ok(cues) => cues,
            Err(e) => {
                error!("Skipping '{}': {}", source.name, e);
                skipped += 1;
                continue;
            }
        };

        let result = segment_source(&source.name, &cues, &config);
        info!(
            "'{}': {} cues ({} empty), {} pairs, {} chain lines, {} orphans",
            source.name,
            result.stats.total_cues,
            result.stats.skipped_empty,
            result.stats.pairs,
            result.stats.chain_lines,
            result.stats.orphans
        );
        records.extend(result.records);
    }

    let written = write_tables(&records, &out_dir)?;
    for path in &written {
        info!("Wrote {:?}", path);
    }
    if written.is_empty() {
        info!("No records produced, nothing written");
    }

    info!(
        "Complete: {}/{} sources processed, {} pairs, {} chain lines, {} orphans",
        total - skipped,
        total,
        records.pairs.len(),
        records.chains.len(),
        records.orphans.len()
    );

    Ok(())
}

fn analyze_sources(
    sources: Vec<SourceSpec>,
    max_gap_seconds: f64,
    fallback_encoding: &str,
) -> Result<()> {
    let config = SegmenterConfig { max_gap_seconds };

    for source in &sources {
        let cues = match load_cues(&source.path, fallback_encoding) {
            Ok(cues) => cues,
            Err(e) => {
                error!("Skipping '{}': {}", source.name, e);
                continue;
            }
        };

        let result = segment_source(&source.name, &cues, &config);
        let stats = &result.stats;

        println!("{}", source.name);
        println!("{}", "=".repeat(source.name.len()));
        println!("Cues:                {}", stats.total_cues);
        println!("Empty after clean:   {}", stats.skipped_empty);
        println!("Out-of-order gaps:   {}", stats.out_of_order);
        println!("Pair records:        {}", stats.pairs);
        println!("Chain lines:         {}", stats.chain_lines);
        println!("Orphan records:      {}", stats.orphans);
        println!();
    }

    Ok(())
}
