use clap::Parser;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use otu_table::{build_otu_table, OtuTableConfig};

/// Builds a contingency OTU table.
#[derive(Parser, Debug)]
#[command(author, version, about = "Builds a contingency OTU table.", long_about = None)]
struct CliArgs {
    /// Per sample fasta files.
    #[arg(required = true)]
    per_sample_fasta_files: Vec<PathBuf>,

    /// Clustering statistics file.
    #[arg(long, required = true)]
    stats: PathBuf,

    /// Swarms file.
    #[arg(long, required = true)]
    swarms: PathBuf,

    /// Cluster representatives (fasta). Enables 'length' and 'sequence' columns.
    #[arg(long)]
    reps: Option<PathBuf>,

    /// UCHIME file. Enables 'chimera' column.
    #[arg(long)]
    uchime: Option<PathBuf>,

    /// Quality file. Enables 'quality' column.
    #[arg(long)]
    quality: Option<PathBuf>,

    /// Assignments file. Enables 'identity', 'taxonomy' and 'references' columns.
    #[arg(long)]
    assignments: Option<PathBuf>,

    /// Number of threads used to read the per sample files.
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Increase output verbosity.
    #[arg(long)]
    verbose: bool,
}

impl From<CliArgs> for OtuTableConfig {
    fn from(args: CliArgs) -> Self {
        let mut config = OtuTableConfig::new(args.per_sample_fasta_files, args.stats, args.swarms);
        config.representatives = args.reps;
        config.uchime = args.uchime;
        config.quality = args.quality;
        config.assignments = args.assignments;
        config.threads = args.threads;
        config
    }
}

fn spinner(verbose: bool, msg: &'static str) -> ProgressBar {
    if !verbose {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn main() {
    let args = CliArgs::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();
    log::debug!("{:?}", args);

    let verbose = args.verbose;
    let config = OtuTableConfig::from(args);

    let progress = spinner(verbose, "Building OTU table...");
    let stdout = io::stdout();
    let result = build_otu_table(&config, BufWriter::new(stdout.lock()));

    match result {
        Ok(summary) => {
            progress.finish_with_message(format!(
                "Wrote {} OTUs over {} samples.",
                summary.otus, summary.samples
            ));
        }
        Err(e) => {
            progress.abandon();
            log::error!("{e}");
            process::exit(1);
        }
    }
}
