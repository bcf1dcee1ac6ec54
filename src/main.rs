//! u-partition CLI: generate the next grouping of participants.
//!
//! Reads the relationship graph, the exclusion list, and the solution
//! history, then writes one or more new solutions into the solution
//! directory and logs a `finish` summary.
//!
//! Exit codes: 0 when a solution was written, 2 when the run was
//! infeasible or timed out, 1 on input or I/O errors.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use u_partition::constraints::{ConstraintBuilder, ExclusionSet, HistoryWindow};
use u_partition::enumerate::SolutionEnumerator;
use u_partition::io::{load_adjlist, load_exclusions, SolutionStore};
use u_partition::solver::{ParticipantOrder, SolverConfig, SolverStatus};
use u_partition::stats::StatisticsReporter;

/// Partition participants into groups, avoiding managers with their
/// reports and recently repeated pairings.
#[derive(Debug, Parser)]
#[command(name = "u-partition", version, about, long_about = None)]
struct Cli {
    /// Participants in adjacency-list format; a manager's line lists their
    /// direct reports so they are never grouped together
    #[arg(long, default_value = "participant-adjlist")]
    participant_adjlist: PathBuf,

    /// Participants to leave out of this run (one per line)
    #[arg(long)]
    participant_excluded: Option<PathBuf>,

    /// Directory holding historical solutions; new solutions go here too
    #[arg(long, default_value = "solutions")]
    solution_dir: PathBuf,

    /// Desired size of each group (at least 2)
    #[arg(long, default_value_t = 2)]
    desired_group_size: usize,

    /// How many of the most recent solutions to avoid repeating pairs
    /// from; omit for all of them, 0 disables the constraint
    #[arg(long)]
    historical_solution_limit: Option<usize>,

    /// Maximum number of solutions to generate; normally 1. With more
    /// than 1 the run is exploratory and its files stay out of the history
    #[arg(long, default_value_t = 1)]
    solution_limit: usize,

    /// Give up on a search after this many milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Branching order over participants
    #[arg(long, value_enum, default_value_t = OrderArg::MostConstrained)]
    order: OrderArg,

    /// Seed for the shuffled order
    #[arg(long, env = "U_PARTITION_SEED")]
    seed: Option<u64>,

    /// Minimum log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log renderer; auto picks console on a terminal and JSON otherwise
    #[arg(long, value_enum, default_value_t = LogFormat::Auto)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderArg {
    Lexical,
    MostConstrained,
    Shuffled,
}

impl From<OrderArg> for ParticipantOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Lexical => ParticipantOrder::Lexical,
            OrderArg::MostConstrained => ParticipantOrder::MostConstrained,
            OrderArg::Shuffled => ParticipantOrder::Shuffled,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Auto,
    Console,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format);

    match run(&cli) {
        Ok(SolverStatus::Feasible) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let json = match format {
        LogFormat::Auto => !std::io::stdout().is_terminal(),
        LogFormat::Console => false,
        LogFormat::Json => true,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: &Cli) -> anyhow::Result<SolverStatus> {
    let graph = load_adjlist(&cli.participant_adjlist)
        .with_context(|| format!("reading {}", cli.participant_adjlist.display()))?;
    tracing::debug!(
        participants = graph.len(),
        relationships = graph.edges().count(),
        "participants loaded"
    );

    let exclusions = match &cli.participant_excluded {
        Some(path) => load_exclusions(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => ExclusionSet::new(),
    };
    tracing::debug!(excluded = exclusions.len(), "exclusions loaded");

    let store = SolutionStore::open(&cli.solution_dir)
        .with_context(|| format!("opening {}", cli.solution_dir.display()))?;
    let history = store.history()?;

    let problem = match ConstraintBuilder::new(&graph)
        .with_exclusions(&exclusions)
        .with_history(&history, HistoryWindow::from(cli.historical_solution_limit))
        .build(cli.desired_group_size)
    {
        Ok(problem) => problem,
        Err(e) if e.is_infeasible() => {
            tracing::warn!(reason = %e, "no partition possible");
            StatisticsReporter::summarize(&[]).log();
            return Ok(SolverStatus::Infeasible);
        }
        Err(e) => return Err(e.into()),
    };

    let mut config = SolverConfig::default().with_order(cli.order.into());
    if let Some(ms) = cli.time_limit_ms {
        config = config.with_time_limit_ms(ms);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let mut enumerator = SolutionEnumerator::new(&problem, &config, cli.solution_limit)?;
    let results: Vec<_> = enumerator.by_ref().collect();
    let solutions = enumerator.into_solutions();
    if !solutions.is_empty() {
        store.write(&solutions, cli.solution_limit)?;
    }

    let summary = StatisticsReporter::summarize(&results);
    summary.log();
    Ok(summary.status)
}
