pub mod check;
pub mod openapi;
pub mod stage;
pub mod tasks;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "refdiff",
    about = "Author and check refdiff blueprint plans",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a blueprint plan and summarize it
    Check {
        /// Plan file (reads stdin when omitted or "-")
        file: Option<PathBuf>,
        /// Print the summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// List the subtasks a selection would run
    Tasks {
        /// Subtask names to select (defaults when omitted)
        #[arg(long = "select")]
        select: Vec<String>,
    },
    /// Print a one-stage refdiff plan
    Stage(StageArgs),
    /// Print the OpenAPI document for the plugin routes
    Openapi {
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
}

#[derive(Args, Debug)]
pub struct StageArgs {
    /// Repository domain id (e.g. github:GithubRepo:1:384111310)
    #[arg(long, conflicts_with_all = ["plugin", "connection", "source"])]
    pub repo_id: Option<String>,
    /// Data-source plugin used to build the repo id
    #[arg(long, requires_all = ["connection", "source"])]
    pub plugin: Option<String>,
    /// Connection id used to build the repo id
    #[arg(long)]
    pub connection: Option<u64>,
    /// Repository id in the data source
    #[arg(long)]
    pub source: Option<String>,
    /// Ref pair to compare, as NEW:OLD (repeatable)
    #[arg(long = "pair")]
    pub pairs: Vec<String>,
    /// Subtask to run (repeatable)
    #[arg(long = "task")]
    pub tasks: Vec<String>,
    /// Tag pattern handed to the engine
    #[arg(long)]
    pub tags_pattern: Option<String>,
    /// Maximum number of matched tags
    #[arg(long)]
    pub tags_limit: Option<u32>,
    /// Tag ordering rule handed to the engine
    #[arg(long)]
    pub tags_order: Option<String>,
    /// Project name
    #[arg(long)]
    pub project_name: Option<String>,
    /// Single-line output
    #[arg(long)]
    pub compact: bool,
}
