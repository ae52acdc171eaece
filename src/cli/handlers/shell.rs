use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use crate::cli::output::{describe_event, format_list};
use crate::model::todo::ListKey;
use crate::ops::filter::{FilterError, FilteredView, SortBy};
use crate::ops::store::{StoreEvent, TodoStore};

const HELP: &str = "\
add <text>        add an open todo
done <id>         complete an open todo
undo <id>         reopen a completed todo
rm <list> <id>    delete from completed|uncompleted
ls [list]         show the current view (optionally switch list)
search [text]     set or clear the search text
sort [key]        set or clear the sort order
help              this text
quit              leave";

/// Error for a single shell line; the session keeps going after one.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("unknown list: {0} (use completed or uncompleted)")]
    UnknownList(String),
    #[error("no {list} todo matches '{id}'")]
    NoMatch { list: ListKey, id: String },
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand<'a> {
    Add(&'a str),
    Done(&'a str),
    Undo(&'a str),
    Remove(ListKey, &'a str),
    Show(Option<ListKey>),
    Search(&'a str),
    Sort(Option<&'a str>),
    Help,
    Quit,
}

fn parse_line(line: &str) -> Result<Option<ShellCommand<'_>>, ShellError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = |name: &'static str| {
        if rest.is_empty() {
            Err(ShellError::MissingArgument(name))
        } else {
            Ok(rest)
        }
    };

    let cmd = match word {
        "add" => ShellCommand::Add(rest),
        "done" => ShellCommand::Done(arg("id")?),
        "undo" => ShellCommand::Undo(arg("id")?),
        "rm" => {
            let (list, id) = arg("list")?
                .split_once(char::is_whitespace)
                .ok_or(ShellError::MissingArgument("id"))?;
            ShellCommand::Remove(parse_list(list)?, id.trim())
        }
        "ls" => ShellCommand::Show(if rest.is_empty() {
            None
        } else {
            Some(parse_list(rest)?)
        }),
        "search" => ShellCommand::Search(rest),
        "sort" => ShellCommand::Sort(if rest.is_empty() { None } else { Some(rest) }),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(ShellError::UnknownCommand(other.to_string())),
    };
    Ok(Some(cmd))
}

fn parse_list(s: &str) -> Result<ListKey, ShellError> {
    ListKey::parse(s).ok_or_else(|| ShellError::UnknownList(s.to_string()))
}

/// Read commands from `input` until EOF or `quit`, mutating `store` and
/// printing feedback and views to `out`.
///
/// Store changes are reported through a store observer, so a command that
/// turns out to be a no-op prints nothing from that channel.
pub fn run_shell<R: BufRead, W: Write>(
    store: &mut TodoStore,
    view: &mut FilteredView,
    input: R,
    out: &mut W,
    prompt: bool,
) -> io::Result<()> {
    let pending: Rc<RefCell<Vec<StoreEvent>>> = Rc::default();
    let sink = Rc::clone(&pending);
    let subscription = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let result = read_eval(store, view, input, out, prompt, &pending);
    store.unsubscribe(subscription);
    result
}

fn read_eval<R: BufRead, W: Write>(
    store: &mut TodoStore,
    view: &mut FilteredView,
    input: R,
    out: &mut W,
    prompt: bool,
    pending: &RefCell<Vec<StoreEvent>>,
) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };

        let result = match parse_line(&line) {
            Ok(Some(cmd)) => execute(cmd, store, view, out),
            Ok(None) => Ok(Flow::Continue),
            Err(e) => Err(e),
        };
        match result {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => return Ok(()),
            Err(ShellError::Io(e)) => return Err(e),
            Err(e) => writeln!(out, "error: {}", e)?,
        }

        for event in pending.borrow_mut().drain(..) {
            writeln!(out, "{}", describe_event(&event))?;
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

fn execute<W: Write>(
    cmd: ShellCommand<'_>,
    store: &mut TodoStore,
    view: &mut FilteredView,
    out: &mut W,
) -> Result<Flow, ShellError> {
    match cmd {
        ShellCommand::Add(text) => {
            store.add(text);
        }
        ShellCommand::Done(id) => {
            let id = resolve(store, ListKey::Uncompleted, id)?;
            store.complete(&id);
        }
        ShellCommand::Undo(id) => {
            let id = resolve(store, ListKey::Completed, id)?;
            store.uncomplete(&id);
        }
        ShellCommand::Remove(list, id) => {
            let id = resolve(store, list, id)?;
            store.remove(list, &id);
        }
        ShellCommand::Show(list) => {
            if let Some(list) = list {
                view.set_list(list);
            }
            let total = store.list(view.list()).len();
            let list = view.list();
            writeln!(out, "{}", format_list(list, view.get(store), total))?;
        }
        ShellCommand::Search(text) => {
            view.set_search(text)?;
            if text.is_empty() {
                writeln!(out, "search cleared")?;
            } else {
                writeln!(out, "search: {}", text)?;
            }
        }
        ShellCommand::Sort(key) => {
            let sort = key.map(str::parse::<SortBy>).transpose()?;
            view.set_sort_by(sort);
            match sort {
                Some(sort) => writeln!(out, "sort: {}", sort)?,
                None => writeln!(out, "sort cleared")?,
            }
        }
        ShellCommand::Help => writeln!(out, "{}", HELP)?,
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Full id for `id`, which may be a unique prefix.
fn resolve(store: &TodoStore, list: ListKey, id: &str) -> Result<String, ShellError> {
    store
        .resolve_prefix(list, id)
        .map(|id| id.to_string())
        .ok_or_else(|| ShellError::NoMatch {
            list,
            id: id.to_string(),
        })
}
