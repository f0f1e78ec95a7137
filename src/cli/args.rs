use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "tasker")]
#[command(about = "A personal task manager with natural language due dates")]
#[command(long_about = "tasker - tasks, lists and groups from the command line

Type tasks the way you think them. Dates, times and priority markers are
picked out of the text and the rest becomes the title.

QUICK START:
  tasker add \"Buy milk tomorrow at 5pm!\"     Add a task to the default list
  tasker parse \"call mom 22nd of november\"   Preview what would be stored
  tasker tasks --open                        Show unfinished tasks
  tasker done 3                              Toggle task 3

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

Data lives in ~/.tasker (override with --home or TASKER_HOME).")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Falls back to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Data directory holding config.yaml and tasker.db
    #[arg(long, value_name = "DIR", env = "TASKER_HOME", global = true)]
    pub home: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show how a line of task input would be understood
    ///
    /// Nothing is stored. Useful for checking a phrase before adding it.
    ///
    /// # Examples
    ///
    ///   tasker parse "Buy milk tomorrow at 5pm!"
    ///   tasker parse "urgent renew passport in 2 months" -o json
    ///   tasker parse "standup monday 9:30" --now "2024-03-11 08:00"
    #[command(alias = "p")]
    Parse(ParseArgs),

    /// Add a task using natural language
    ///
    /// The text is parsed for a due date, a time and priority markers.
    /// Whatever is left becomes the title.
    ///
    /// # Supported Patterns
    ///
    ///   Dates:     today, tomorrow, tonight, this morning, next week,
    ///              this weekend, monday, in 3 days, in 2 months,
    ///              3/25, 12/31/2025, nov 22, 22nd of november
    ///   Times:     at 5, 5pm, 17:30, at 9:15am
    ///   Priority:  important, urgent, priority, critical, asap, !
    ///
    /// # Examples
    ///
    ///   tasker add "Buy milk tomorrow at 5pm!"
    ///   tasker add "Pay invoice 3/25" --list Bills
    ///   tasker add "Weekly report friday" -d "include Q1 numbers"
    #[command(alias = "a")]
    Add(AddArgs),

    /// List tasks
    ///
    /// Tasks are shown per list in list order, each list in position order.
    ///
    /// # Examples
    ///
    ///   tasker tasks                  All tasks
    ///   tasker tasks --list Inbox     One list
    ///   tasker tasks --open -o json   Unfinished tasks as JSON
    #[command(alias = "ls")]
    Tasks {
        /// Only show tasks in this list
        #[arg(long, short = 'l')]
        list: Option<String>,

        /// Hide completed tasks
        #[arg(long)]
        open: bool,
    },

    /// Toggle a task between open and completed
    Done {
        /// Task ID
        id: i64,
    },

    /// Change fields of a task
    ///
    /// # Examples
    ///
    ///   tasker edit 4 --title "Buy oat milk"
    ///   tasker edit 4 --due "friday at 9am"
    ///   tasker edit 4 --clear-due --priority false
    Edit(EditArgs),

    /// Move a task to another position or list
    ///
    /// Positions start at 0. A position past the end appends the task.
    ///
    /// # Examples
    ///
    ///   tasker move 7 --position 0
    ///   tasker move 7 --position 2 --list Work
    #[command(alias = "mv")]
    Move {
        /// Task ID
        id: i64,

        /// Zero-based position in the target list
        #[arg(long, short = 'p')]
        position: usize,

        /// Target list (defaults to the task's current list)
        #[arg(long, short = 'l')]
        list: Option<String>,
    },

    /// Delete a task
    Rm {
        /// Task ID
        id: i64,
    },

    /// Manage task lists
    Lists(ListsArgs),

    /// Manage list groups
    Groups(GroupsArgs),

    /// Export all data as JSON
    ///
    /// Writes to stdout unless --file is given.
    Export {
        /// Write the export to this file
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Replace all data with a JSON export
    Import {
        /// File produced by `tasker export`
        path: PathBuf,
    },

    /// Delete every task, list and group
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Generate shell completions
    ///
    /// Example: tasker completions bash > ~/.bash_completion.d/tasker
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// The task text in natural language
    pub text: String,

    /// Parse relative to this moment instead of now (YYYY-MM-DD [HH:MM])
    #[arg(long)]
    pub now: Option<String>,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// The task text in natural language
    pub text: String,

    /// List to add the task to (created if missing)
    #[arg(long, short = 'l')]
    pub list: Option<String>,

    /// Longer description stored with the task
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Display color
    #[arg(long)]
    pub color: Option<String>,

    /// Parse relative to this moment instead of now (YYYY-MM-DD [HH:MM])
    #[arg(long)]
    pub now: Option<String>,
}

/// Arguments for the edit command.
#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: i64,

    /// New title, taken verbatim
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New due date in natural language
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<String>,

    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,

    /// Set or unset the priority flag
    #[arg(long)]
    pub priority: Option<bool>,

    /// New display color
    #[arg(long)]
    pub color: Option<String>,

    /// Resolve --due relative to this moment instead of now
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Args)]
pub struct ListsArgs {
    #[command(subcommand)]
    pub command: ListCommands,
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// Show all lists
    Ls,

    /// Create a list
    ///
    /// Example: tasker lists add "Q1 reports" --group Work
    Add {
        /// List name
        name: String,

        /// Group to put the list in
        #[arg(long, short = 'g')]
        group: Option<String>,

        /// Description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Display color
        #[arg(long)]
        color: Option<String>,
    },

    /// Rename a list
    Rename {
        /// List ID
        id: i64,

        /// New name
        name: String,
    },

    /// Move a list into a group, or out of its group when --group is omitted
    Regroup {
        /// List ID
        id: i64,

        /// Target group
        #[arg(long, short = 'g')]
        group: Option<String>,
    },

    /// Delete a list and all of its tasks
    Rm {
        /// List ID
        id: i64,
    },
}

#[derive(Args)]
pub struct GroupsArgs {
    #[command(subcommand)]
    pub command: GroupCommands,
}

#[derive(Subcommand)]
pub enum GroupCommands {
    /// Show all groups
    Ls,

    /// Create a group
    Add {
        /// Group name
        name: String,

        /// Description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Display color
        #[arg(long)]
        color: Option<String>,
    },

    /// Rename a group
    Rename {
        /// Group ID
        id: i64,

        /// New name
        name: String,
    },

    /// Delete a group; its lists become ungrouped
    Rm {
        /// Group ID
        id: i64,
    },
}
