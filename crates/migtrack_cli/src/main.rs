//! Command-line front end for the migration tracker.
//!
//! # Responsibility
//! - Render dashboard, task, blocker, board, timeline and comment views
//!   over the seed dataset.
//! - Load optional metrics configuration and file logging settings.
//!
//! # Invariants
//! - Every computation happens in `migtrack_core`; this crate only formats.
//! - Output for a fixed `--now` is deterministic.

mod render;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use migtrack_core::{
    init_logging, BoardFilter, ConfigError, DashboardService, InMemoryTrackerRepository,
    LoggingError, MetricsConfig, Phase, RepoError, RiskLevel, TaskId, TaskService,
    TaskServiceError, TimelineWindow,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Migration portfolio dashboard.
#[derive(Debug, Parser)]
#[command(name = "migtrack")]
#[command(about = "Derived metrics for a migration project portfolio", long_about = None)]
struct Cli {
    /// Directory for rotating log files (relative paths resolve from cwd)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the dashboard snapshot.
    Summary(ViewArgs),

    /// Print every task with its urgency.
    Tasks(ViewArgs),

    /// Print blocker SLA impact and per-entity accountability.
    Blockers(ViewArgs),

    /// Print the kanban board, optionally filtered.
    Board {
        #[command(flatten)]
        view: ViewArgs,

        /// Case-insensitive match on name, manager or description
        #[arg(long, default_value = "")]
        search: String,

        /// Only projects led by this manager
        #[arg(long)]
        manager: Option<String>,

        /// Only projects at this risk level (HEALTHY, WARNING, CRITICAL)
        #[arg(long)]
        risk: Option<RiskLevel>,

        /// Only this phase column
        #[arg(long)]
        phase: Option<Phase>,
    },

    /// Print Gantt bar positions for every project.
    Timeline {
        #[command(flatten)]
        view: ViewArgs,

        /// Window start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Window end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Print comment threads and the activity feed of one task.
    Comments {
        #[command(flatten)]
        view: ViewArgs,

        /// Task id, e.g. t2
        #[arg(long)]
        task: String,
    },
}

#[derive(Debug, Args)]
struct ViewArgs {
    /// JSON file with metrics thresholds; missing keys use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Evaluation instant (RFC 3339); defaults to the current time
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Emit pretty-printed JSON instead of key=value lines
    #[arg(long)]
    json: bool,
}

#[derive(Debug)]
enum CliError {
    ReadConfig { path: PathBuf, source: std::io::Error },
    ParseConfig { path: PathBuf, source: serde_json::Error },
    Config(ConfigError),
    Logging(LoggingError),
    Repo(RepoError),
    Task(TaskServiceError),
    Render(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadConfig { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            Self::ParseConfig { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
            Self::Config(err) => write!(f, "invalid config: {err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Task(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "cannot render output: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadConfig { source, .. } => Some(source),
            Self::ParseConfig { source, .. } => Some(source),
            Self::Config(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Task(err) => Some(err),
            Self::Render(err) => Some(err),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<TaskServiceError> for CliError {
    fn from(value: TaskServiceError) -> Self {
        Self::Task(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Render(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("migtrack: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    if let Some(dir) = cli.log_dir.as_deref() {
        init_logging(log_level(cli.log_level.as_deref()), &absolute_dir(dir))?;
    }

    match cli.command {
        Commands::Summary(view) => {
            let service = open_service(&view)?;
            let snapshot = service.snapshot(view.instant())?;
            if view.json {
                Ok(serde_json::to_string_pretty(&snapshot)?)
            } else {
                Ok(render::summary_lines(&snapshot))
            }
        }
        Commands::Tasks(view) => {
            let service = open_service(&view)?;
            let rows = service.task_urgencies(view.instant())?;
            if view.json {
                Ok(serde_json::to_string_pretty(&rows)?)
            } else {
                Ok(render::task_lines(&rows))
            }
        }
        Commands::Blockers(view) => {
            let service = open_service(&view)?;
            let now = view.instant();
            let impacts = service.blocker_impacts(now)?;
            let accountability = service.accountability(now)?;
            if view.json {
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "blockers": impacts,
                    "accountability": accountability,
                }))?)
            } else {
                Ok(render::blocker_lines(&impacts, &accountability))
            }
        }
        Commands::Board {
            view,
            search,
            manager,
            risk,
            phase,
        } => {
            let service = open_service(&view)?;
            let board = service.board()?;
            let filter = BoardFilter {
                search,
                project_manager: manager,
                risk,
                phase,
            };
            let columns = render::board_columns(&board, &filter, &service.config().risk);
            if view.json {
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "totals": board.totals(),
                    "columns": columns,
                }))?)
            } else {
                Ok(render::board_lines(&board.totals(), &columns))
            }
        }
        Commands::Timeline { view, from, to } => {
            let service = open_service(&view)?;
            let default = TimelineWindow::default();
            let window =
                TimelineWindow::new(from.unwrap_or(default.start), to.unwrap_or(default.end));
            let bars = service.timeline(&window)?;
            if view.json {
                Ok(serde_json::to_string_pretty(&bars)?)
            } else {
                Ok(render::timeline_lines(&window, &bars))
            }
        }
        Commands::Comments { view, task } => {
            let service = TaskService::new(InMemoryTrackerRepository::seeded()?);
            let task_id = TaskId::new(task);
            let threads = service.comments(&task_id)?;
            let feed = service.activity(Some(&task_id))?;
            if view.json {
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "comments": threads,
                    "activity": feed,
                }))?)
            } else {
                Ok(render::comment_lines(&threads, &feed))
            }
        }
    }
}

/// Requested level, or the build-profile default.
fn log_level(requested: Option<&str>) -> &str {
    requested.unwrap_or_else(|| migtrack_core::default_log_level())
}

impl ViewArgs {
    fn instant(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

fn open_service(view: &ViewArgs) -> Result<DashboardService<InMemoryTrackerRepository>, CliError> {
    let config = match view.config.as_deref() {
        Some(path) => load_config(path)?,
        None => MetricsConfig::default(),
    };
    let repo = InMemoryTrackerRepository::seeded()?;
    let service = DashboardService::new(repo, config)?;
    info!(
        "event=cli_open module=cli status=ok config={}",
        view.config
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "default".to_string())
    );
    Ok(service)
}

/// Reads a JSON `MetricsConfig`; absent keys keep their defaults.
fn load_config(path: &Path) -> Result<MetricsConfig, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let config: MetricsConfig =
        serde_json::from_str(&raw).map_err(|source| CliError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

fn absolute_dir(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(dir),
        Err(_) => dir.to_path_buf(),
    }
}
