use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

const VERSION: &str = env!("CALMTASK_VERSION");

#[derive(Parser)]
#[command(
    name = "calmtask",
    version = VERSION,
    about = "Calm, in-memory task board",
    after_help = "\
NOTE:
  Tasks live only for the lifetime of the process. `calmtask shell` reads one
  command per line from stdin and runs them all against the same board.

SESSION COMMANDS:
  add <title> [--description D] [--deadline today|tomorrow|next-week|YYYY-MM-DD[ HH:MM]] [--priority low|medium|high]
  toggle <id>     list [--completed|--all]     show <id>     home
  calendar [--month YYYY-MM]     agenda [--date YYYY-MM-DD]     dates     stats
  edit <id> / delete <id> (not supported yet)     help     quit
  Lines starting with '#' are skipped. Quote any text containing '#'; an
  unquoted '#word' is rejected rather than dropped.

EXIT CODES:
  0  Session finished (command errors are reported and the session continues)
  1  Startup failed (bad config, bad --today) or stdin/stdout failed"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Output as JSON (one document per line)
    #[arg(long, global = true)]
    pub json: bool,

    /// Pin "today" (YYYY-MM-DD) instead of reading the local clock
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Path to a JSON config file
    #[arg(long, global = true, env = "CALMTASK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Load the sample tasks before running
    #[arg(long, global = true)]
    pub seed: bool,

    /// More log output (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read session commands from stdin until EOF or `quit`
    Shell,

    /// Show the sample board on its home and calendar views
    Demo,
}

/// One line typed into a session.
#[derive(Parser, Debug)]
#[command(
    name = "calmtask",
    no_binary_name = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Create a task
    Add {
        /// Task title
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// today, tomorrow, next-week, YYYY-MM-DD or "YYYY-MM-DD HH:MM"
        #[arg(long)]
        deadline: Option<String>,
        /// low, medium or high
        #[arg(long)]
        priority: Option<String>,
    },
    /// Flip a task between active and completed
    Toggle {
        /// Task ID or prefix
        id: String,
    },
    /// List active tasks
    List {
        #[arg(long, conflicts_with = "all")]
        completed: bool,
        #[arg(long)]
        all: bool,
    },
    /// Show task details
    Show {
        /// Task ID or prefix
        id: String,
    },
    /// Summary with active and completed sections
    Home,
    /// Month grid with task markers and today's agenda
    Calendar {
        /// YYYY-MM, defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
    /// Tasks due on one day
    Agenda {
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Tasks grouped by deadline date
    Dates,
    /// Completion counts
    Stats,
    /// Edit a task (not supported yet)
    Edit { id: String },
    /// Delete a task (not supported yet)
    Delete { id: String },
    /// Show session help
    Help,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}
