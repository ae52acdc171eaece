mod shell;
pub use shell::{ShellError, run_shell};

use std::io::{self, IsTerminal};

use chrono::Utc;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::model::config::{Config, FilterConfig};
use crate::model::todo::ListKey;
use crate::ops::filter::{FilterError, FilteredView, TodoFilter, apply_filter};
use crate::ops::seed::seed_store;
use crate::ops::store::TodoStore;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let store = build_store(!cli.no_seed && config.store.seed);

    match cli.command {
        Commands::List(args) => cmd_list(args, &store, &config.filter, json),
        Commands::Shell(args) => cmd_shell(args, store, &config.filter),
        Commands::Sorts => cmd_sorts(json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_store(seed: bool) -> TodoStore {
    if seed {
        seed_store(Utc::now())
    } else {
        TodoStore::new()
    }
}

/// Flags win over the config's default view; each half is overridden on its own.
pub fn build_filter(
    search: Option<&str>,
    sort_by: Option<&str>,
    defaults: &FilterConfig,
) -> Result<TodoFilter, FilterError> {
    let search = search.or(defaults.search.as_deref()).unwrap_or("");
    let filter = TodoFilter::new().with_search(search)?;
    match (sort_by, defaults.sort_by) {
        (Some(key), _) => filter.with_sort(key),
        (None, Some(sort)) => Ok(filter.with_sort_by(sort)),
        (None, None) => Ok(filter),
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_list(
    args: ListArgs,
    store: &TodoStore,
    defaults: &FilterConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = build_filter(args.search.as_deref(), args.sort_by.as_deref(), defaults)?;
    let source = store.list(args.list);
    let todos = apply_filter(source, &filter);

    if json {
        let out = list_to_json(args.list, &filter, source.len(), &todos);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", format_list(args.list, &todos, source.len()));
    }
    Ok(())
}

fn cmd_shell(
    args: ShellArgs,
    mut store: TodoStore,
    defaults: &FilterConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = build_filter(args.search.as_deref(), args.sort_by.as_deref(), defaults)?;
    let mut view = FilteredView::new(ListKey::Uncompleted, filter);
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut stdout = io::stdout();
    run_shell(&mut store, &mut view, stdin.lock(), &mut stdout, prompt)?;
    Ok(())
}

fn cmd_sorts(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let keys: Vec<&str> = crate::ops::filter::SortBy::ALL
            .iter()
            .map(|s| s.as_str())
            .collect();
        println!("{}", serde_json::to_string(&keys)?);
    } else {
        println!("{}", format_sorts());
    }
    Ok(())
}
