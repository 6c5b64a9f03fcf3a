use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use taskboard_core::domain::{
    FilterValue, TaskDraft, TaskFilterPatch, TaskId, TaskPriority, TaskStatus, UserId,
};
use taskboard_core::ports::{Clock, SystemClock};
use taskboard_core::view::{BoardView, overdue_tasks};
use taskboard_core::{BoardBuilder, BoardConfig, LatencyConfig, TaskBoard};

#[derive(Parser, Debug)]
#[command(author, version, about = "In-memory task board")]
struct Cli {
    /// Board config (TOML). Missing file means defaults.
    #[arg(long, default_value = "taskboard.toml")]
    config: PathBuf,

    /// Skip the simulated store latency.
    #[arg(long)]
    no_latency: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the filtered board grouped by status.
    List {
        #[arg(long, default_value = "all")]
        status: FilterValue<TaskStatus>,
        #[arg(long, default_value = "all")]
        priority: FilterValue<TaskPriority>,
        #[arg(long, default_value = "all")]
        assignee: FilterValue<UserId>,
        #[arg(long, default_value = "")]
        search: String,
        /// Emit the view as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print one task with its assignee.
    Show { id: String },
    /// Run a scripted create / update / delete session.
    Demo,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_env("TASKBOARD_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "taskboard_core=debug,info"
        } else {
            "info"
        })
    });
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

async fn open_board(cli: &Cli) -> Result<TaskBoard> {
    let mut config = BoardConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if cli.no_latency {
        config.latency = LatencyConfig::none();
    }
    let board = BoardBuilder::from_config(&config, Arc::new(SystemClock)).build()?;
    if let Err(err) = board.initialize().await {
        bail!("{} ({err})", err.user_message());
    }
    Ok(board)
}

fn print_view(board: &TaskBoard, view: &BoardView) {
    for status in TaskStatus::ALL {
        let bucket = view.tasks_by_status.bucket(status);
        println!("== {status} ({})", bucket.len());
        for task in bucket {
            let assignee = board
                .user(&task.assigned_to)
                .map_or_else(|| task.assigned_to.to_string(), |user| user.name);
            println!(
                "  [{:>3}] {:<32} {:<6} {} due {}",
                task.id,
                task.title,
                task.priority,
                assignee,
                task.due_date.format("%Y-%m-%d")
            );
        }
    }
    let stats = view.task_stats;
    println!(
        "-- {} tasks: {} todo, {} in progress, {} completed ({}% done)",
        stats.total, stats.todo, stats.in_progress, stats.completed, stats.percent_completed
    );
}

async fn run_demo(board: &TaskBoard, clock: &dyn Clock) -> Result<()> {
    let draft = TaskDraft {
        title: "Write release notes".to_string(),
        description: "Summarize the changes shipped this sprint".to_string(),
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        assigned_to: UserId::new("4"),
        due_date: clock.now() + Duration::days(7),
    };
    draft.validate()?;

    let created = board.create_task(draft).await?;
    info!(task_id = %created.id, "demo task created");

    let mut edited = created.clone();
    edited.status = TaskStatus::InProgress;
    edited.priority = TaskPriority::High;
    board.update_task(edited).await?;

    board.delete_task(&TaskId::new("7")).await?;
    board.delete_task(&TaskId::new("does-not-exist")).await?;

    println!("toasts:");
    for toast in board.toasts() {
        println!("  {:?}: {}", toast.kind, toast.message);
    }
    println!("operations:");
    for op in board.snapshot().operations {
        println!("  {} {:?} -> {:?}", op.id, op.kind, op.state);
    }

    board.set_filters(TaskFilterPatch::default().priority(FilterValue::Only(TaskPriority::High)));
    print_view(board, &board.view());
    board.reset_filters();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let board = open_board(&cli).await?;
    match &cli.command {
        Command::List {
            status,
            priority,
            assignee,
            search,
            json,
        } => {
            board.set_filters(
                TaskFilterPatch::default()
                    .status(status.clone())
                    .priority(priority.clone())
                    .assigned_to(assignee.clone())
                    .search(search.clone()),
            );
            let view = board.view();
            if *json {
                println!("{}", serde_json::to_string_pretty(&*view)?);
            } else {
                print_view(&board, &view);
                let snapshot = board.snapshot();
                let overdue = overdue_tasks(&snapshot.tasks, Utc::now());
                if !overdue.is_empty() {
                    println!("-- {} overdue", overdue.len());
                }
            }
        }
        Command::Show { id } => {
            let id = TaskId::new(id.as_str());
            let Some(task) = board.get_task(&id) else {
                bail!("task {id} not found");
            };
            let assignee = board.user(&task.assigned_to);
            println!("{}", serde_json::to_string_pretty(&task)?);
            if let Some(user) = assignee {
                println!("assigned to {} <{}>", user.name, user.email);
            }
            if task.is_overdue(Utc::now()) {
                println!("overdue");
            }
        }
        Command::Demo => run_demo(&board, &SystemClock).await?,
    }
    Ok(())
}
