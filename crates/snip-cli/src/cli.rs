use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const DEFAULT_API_URL: &str = "https://wufeng98.cn/codeSnippetApi";

#[derive(Parser)]
#[command(name = "snip")]
#[command(about = "Manage code snippets and tags, online or offline")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory for local data (defaults to the platform data dir)
    #[arg(long, global = true, env = "SNIP_DATA_DIR", value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the snippet API
    #[arg(long, global = true, env = "SNIP_API_URL", default_value = DEFAULT_API_URL, value_name = "URL")]
    pub api_url: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new snippet
    #[command(alias = "new")]
    Add {
        /// Snippet title
        title: String,
        /// Snippet content (stdin is read when omitted)
        content: Vec<String>,
        /// Snippet language
        #[arg(short, long, default_value = "text")]
        language: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
        /// Tag ids to attach
        #[arg(short, long, value_name = "ID")]
        tag: Vec<i64>,
    },
    /// List visible snippets
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Skip the remote refresh and list the cached view only
        #[arg(long)]
        offline: bool,
    },
    /// Show a single snippet
    Show {
        /// Snippet id
        id: i64,
    },
    /// Delete a snippet
    Delete {
        /// Snippet id
        id: i64,
    },
    /// Show session and sync status
    Status,
    /// Manage tags
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Store an API session for authenticated sync
    Login {
        /// API access token
        #[arg(long, value_name = "TOKEN")]
        token: String,
        /// Account user id
        #[arg(long, value_name = "ID")]
        user_id: i64,
        /// Account username
        #[arg(long, value_name = "NAME")]
        username: String,
    },
    /// Clear the stored session
    Logout,
    /// Push queued work to the remote and refresh the local view
    Sync {
        /// Keep running and retry on an interval until interrupted
        #[arg(long)]
        watch: bool,
    },
}

#[derive(Subcommand)]
pub enum TagCommands {
    /// Create a new tag
    Add {
        /// Tag name
        name: String,
        /// Create the tag hidden from default listings
        #[arg(long)]
        hidden: bool,
    },
    /// List visible tags
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Skip the remote refresh and list the cached view only
        #[arg(long)]
        offline: bool,
    },
    /// Hide a tag from default listings
    Hide {
        /// Tag id
        id: i64,
    },
    /// Make a hidden tag visible again
    Unhide {
        /// Tag id
        id: i64,
    },
    /// Delete a tag
    Delete {
        /// Tag id
        id: i64,
    },
}
