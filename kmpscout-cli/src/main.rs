use clap::{Parser, Subcommand};
use colored::Colorize;
use kmpscout::{
    config::{default_log_level, BenchConfig, BenchOverrides},
    generator::{generate_text, TextSpec},
    search::{effective_segments, sequential_search, ParallelMatcher},
    MatchSet, SearchError,
};
use std::{fs, path::PathBuf, time::Duration, time::Instant};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, SearchError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct CliSearchArgs {
    /// Pattern to search for
    #[arg(short = 'p', long)]
    pattern: String,

    /// Text to search in
    #[arg(short = 't', long, conflicts_with = "file")]
    text: Option<String>,

    /// File whose bytes are searched
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Number of segments to split the text into (values below 1 mean 1)
    #[arg(short = 'j', long, default_value = "1", allow_negative_numbers = true)]
    segments: i64,

    /// Use the single-threaded matcher
    #[arg(long)]
    sequential: bool,

    /// Show only the match count, not offsets
    #[arg(short, long)]
    stats: bool,

    /// Maximum number of offsets to print
    #[arg(long, default_value = "10")]
    limit: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a text or file for a pattern
    Search(Box<CliSearchArgs>),

    /// Compare sequential and parallel search on generated texts
    Bench {
        /// Configuration file with scenarios
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for the text generator
        #[arg(long)]
        seed: Option<u64>,

        /// Segment counts to compare (e.g. 1,2,4,8)
        #[arg(short = 'j', long = "segments", value_delimiter = ',')]
        segments: Vec<usize>,
    },
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => {
            init_logging(cli.log_level.as_deref().unwrap_or("warn"));
            run_search(&args)
        }
        Commands::Bench {
            config,
            seed,
            segments,
        } => {
            let bench_config = BenchConfig::load_from(config.as_deref())?.merge_with_cli(
                BenchOverrides {
                    segment_counts: Some(segments),
                    seed,
                    log_level: cli.log_level,
                },
            );
            init_logging(&bench_config.log_level);
            run_bench(&bench_config)
        }
    }
}

fn init_logging(level: &str) {
    let level = if level.is_empty() {
        default_log_level()
    } else {
        level.to_string()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_search(args: &CliSearchArgs) -> Result<()> {
    let text: Vec<u8> = match (&args.text, &args.file) {
        (Some(text), _) => text.clone().into_bytes(),
        (None, Some(path)) => fs::read(path)?,
        (None, None) => {
            return Err(SearchError::config_error(
                "Either --text (-t) or --file (-f) is required",
            ))
        }
    };
    let pattern = args.pattern.as_bytes();

    // Negative counts fall through to 0, which the engine treats as 1
    let hint = usize::try_from(args.segments).unwrap_or(0);

    let started = Instant::now();
    let matches = if args.sequential {
        sequential_search(text.as_slice(), pattern)?
    } else {
        let matcher = ParallelMatcher::new(pattern)?;
        let matches = matcher.search(text.as_slice(), hint);
        matcher.metrics().log_stats();
        matches
    };
    debug!("Search took {:?}", started.elapsed());

    print_search_results(&matches, args.stats, args.limit);
    Ok(())
}

fn run_bench(config: &BenchConfig) -> Result<()> {
    info!(
        "Running {} scenarios with seed {}",
        config.scenarios.len(),
        config.seed
    );

    for (i, spec) in config.scenarios.iter().enumerate() {
        // Each scenario gets its own stream so adding one does not shift the others
        let generated = generate_text(spec, &config.alphabet, config.seed.wrapping_add(i as u64))?;
        run_scenario(config, spec, generated.text.as_bytes())?;
    }
    Ok(())
}

fn run_scenario(config: &BenchConfig, spec: &TextSpec, text: &[u8]) -> Result<()> {
    println!("\n{}", "--- Test Scenario ---".blue());
    println!("Text length: {}", spec.length);
    if spec.pattern.is_empty() {
        println!("No pattern to search for, skipping");
        return Ok(());
    }
    println!("Pattern: {}", spec.pattern);

    let pattern = spec.pattern.as_bytes();
    let started = Instant::now();
    let sequential = sequential_search(text, pattern)?;
    let sequential_time = started.elapsed();

    println!("\nSequential search");
    println!("Matches found: {}", sequential.len());
    println!("Time: {}", format_duration(sequential_time));
    for offset in sequential.iter().take(config.display_limit) {
        println!("Pattern found at index: {}", offset.to_string().green());
    }

    println!("\nParallel search");
    let matcher = ParallelMatcher::new(pattern)?;
    for &segments in &config.segment_counts {
        let started = Instant::now();
        let parallel = matcher.search(text, segments);
        let parallel_time = started.elapsed();

        println!(
            "Segments: {} (effective {})",
            segments,
            effective_segments(segments)
        );
        println!("  Time: {}", format_duration(parallel_time));
        println!(
            "  Speedup: {:.2}x",
            speedup(sequential_time, parallel_time)
        );
        let counts = format!(
            "  Matches sequential/parallel: {}/{}",
            sequential.len(),
            parallel.len()
        );
        if parallel == sequential {
            println!("{}", counts);
        } else {
            println!("{}", counts.red());
        }
    }
    matcher.metrics().log_stats();
    Ok(())
}

fn speedup(sequential: Duration, parallel: Duration) -> f64 {
    let parallel = parallel.as_secs_f64();
    if parallel > 0.0 {
        sequential.as_secs_f64() / parallel
    } else {
        f64::INFINITY
    }
}

fn format_duration(duration: Duration) -> String {
    format!("{:.3} ms", duration.as_secs_f64() * 1000.0)
}

fn print_search_results(matches: &MatchSet, stats_only: bool, limit: usize) {
    if !stats_only {
        for offset in matches.iter().take(limit) {
            println!("{}", offset.to_string().green());
        }
        if matches.len() > limit {
            println!("... {} more", matches.len() - limit);
        }
    }
    println!("Found {} matches", matches.len());
}
