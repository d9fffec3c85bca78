use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, Level};

use limvoc::{process_rng, rewrite_file, CommitStrategy, ExitStatus, RewriteConfig, DEFAULT_STAGING_PATH};

#[derive(Parser, Debug)]
#[command(name = "limvoc")]
#[command(about = "Rewrite a document in place, replacing each word with a random synonym")]
#[command(version)]
struct Args {
    /// Document to rewrite in place
    input: PathBuf,

    /// Vocabulary table: one comma-separated synonym group per line
    vocabulary: PathBuf,

    /// Staging file the rewritten document is written to before commit
    #[arg(long, default_value = DEFAULT_STAGING_PATH)]
    staging: PathBuf,

    /// How the staging file replaces the document: rename or copy
    #[arg(long, default_value = "rename")]
    commit: CommitStrategy,

    /// Drop a final word that has no trailing space or newline
    #[arg(long)]
    drop_trailing: bool,

    /// Load the vocabulary into memory once instead of rescanning it per word
    #[arg(long)]
    indexed: bool,

    /// Seed the random source for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Write run statistics as JSON to this path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Log level for diagnostics on stderr
    #[arg(long, default_value = "warn")]
    log_level: Level,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn rewrite_config(&self) -> RewriteConfig {
        RewriteConfig {
            staging_path: self.staging.clone(),
            commit: self.commit,
            flush_trailing: !self.drop_trailing,
            indexed: self.indexed,
            ..RewriteConfig::default()
        }
    }
}

fn init_logging(args: &Args) {
    // stdout is reserved for the one-line user message
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr);
    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            kind => {
                println!("Input document and vocabulary table paths are required ({kind})");
                process::exit(ExitStatus::BadArguments.code());
            }
        },
    };

    init_logging(&args);
    info!(?args, "Parsed CLI arguments");

    let stats = match rewrite_file(&args.input, &args.vocabulary, &args.rewrite_config(), process_rng(args.seed)) {
        Ok(stats) => stats,
        Err(e) => {
            error!("Rewrite failed: {}", e);
            println!("{e}");
            process::exit(e.exit_status().code());
        }
    };

    if let Some(stats_path) = &args.stats_out {
        if let Err(e) = stats.write_json(stats_path) {
            error!("{:#}", e);
            println!("{e:#}");
            process::exit(ExitStatus::IoFailure.code());
        }
    }

    process::exit(ExitStatus::Success.code());
}
