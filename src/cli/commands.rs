use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::todo::ListKey;

#[derive(Parser)]
#[command(name = "td", about = concat!("td v", env!("CARGO_PKG_VERSION"), " - two lists and a search box"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read settings from this file instead of ./todos.toml
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Start with empty lists instead of the fixture data
    #[arg(long, global = true)]
    pub no_seed: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a filtered, sorted view of one list
    List(ListArgs),
    /// Edit the lists interactively, one command per line on stdin
    Shell(ShellArgs),
    /// List the available sort orders
    Sorts,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which list to show
    #[arg(value_enum, default_value_t = ListKey::Uncompleted)]
    pub list: ListKey,
    /// Keep items whose description contains any of these words
    #[arg(long)]
    pub search: Option<String>,
    /// recent, recently-added, older, A-Z or Z-A
    #[arg(long = "sort-by")]
    pub sort_by: Option<String>,
}

#[derive(Args)]
pub struct ShellArgs {
    /// Initial search text
    #[arg(long)]
    pub search: Option<String>,
    /// Initial sort order
    #[arg(long = "sort-by")]
    pub sort_by: Option<String>,
}
