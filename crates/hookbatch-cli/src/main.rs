// Rust guideline compliant 2026-02-06

//! hookbatch CLI Application
//!
//! Runs a command once per identifier in resumable slices, persisting
//! progress between invocations.

use clap::Parser;
use hookbatch_cli::{commands, logging, Context, ExecWork, IdSource, JobArgs};
use hookbatch_core::BatchConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hookbatch",
    version,
    about = "hookbatch: resumable chunked processing for update routines",
    long_about = "hookbatch processes a list of identifiers in bounded slices. Each invocation handles one slice and records its position, so a scheduler can re-invoke it until the run reports finished.",
    after_help = "Examples:\n  hookbatch step reindex_nodes --range 5000 --exec ./reindex.sh --limit 200\n  hookbatch run import_terms --ids-file terms.txt --exec ./import-term\n  hookbatch status reindex_nodes\n  hookbatch reset reindex_nodes\n"
)]
struct Cli {
    /// Directory holding progress records
    #[arg(long, global = true, default_value = ".hookbatch")]
    state_dir: PathBuf,

    /// Directory containing hookbatch.toml (defaults to the state directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args)]
struct JobOpts {
    /// Run identifier, e.g. the update routine name
    run_id: String,

    /// File with one identifier per line ('-' for stdin)
    #[arg(long)]
    ids_file: Option<String>,

    /// Use the identifiers 1..=N
    #[arg(long)]
    range: Option<u64>,

    /// Command to run per identifier; the identifier is appended
    #[arg(long)]
    exec: String,

    /// Maximum identifiers per invocation
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Process one slice and exit
    Step(JobOpts),

    /// Process slices until the run is finished
    Run(JobOpts),

    /// Show the persisted progress record
    Status {
        /// Run identifier
        run_id: String,
    },

    /// Delete the persisted progress record
    Reset {
        /// Run identifier
        run_id: String,
    },
}

impl JobOpts {
    fn into_args(self) -> anyhow::Result<JobArgs> {
        Ok(JobArgs {
            source: IdSource::from_args(self.ids_file, self.range)?,
            work: ExecWork::parse(&self.exec)?,
            run_id: self.run_id,
            limit: self.limit,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_dir = cli.config.clone().unwrap_or_else(|| cli.state_dir.clone());
    let mut config = BatchConfig::load(&config_dir)?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    logging::init_tracing(&config.log_level, cli.log_json)?;

    let ctx = Context {
        state_dir: cli.state_dir,
        config,
        json: cli.json,
    };

    match cli.command {
        Commands::Step(opts) => {
            commands::step::execute(&ctx, &opts.into_args()?)?;
        }
        Commands::Run(opts) => {
            commands::run::execute(&ctx, &opts.into_args()?)?;
        }
        Commands::Status { run_id } => {
            commands::status::execute(&ctx, &run_id)?;
        }
        Commands::Reset { run_id } => {
            commands::reset::execute(&ctx, &run_id)?;
        }
    }

    Ok(())
}
