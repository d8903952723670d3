//! Line-oriented driver for the Shelfmark engine.
//!
//! A thin REPL over stdin that exists to exercise the engine end to end: it
//! owns the [`AppState`], feeds raw query text through the debouncer, runs
//! catalog fetches as spawned tasks, and funnels everything back through the
//! single event channel. All business logic lives in the library; this binary
//! only parses commands and prints state.
//!
//! Type `help` at the prompt for the command list.

use shelfmark::catalog::{CatalogClient, Debouncer};
use shelfmark::domain::ReadingStatus;
use shelfmark::observability::init_tracing;
use shelfmark::{
    handle_event, Action, AppState, Config, Event, Result, SortKey, StatusFilter,
};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Depth of the internal event channel carrying search completions.
const EVENT_BUFFER: usize = 16;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    init_tracing(&config);

    let mut state = shelfmark::initialize(&config)?;
    let client = CatalogClient::new(config.catalog_url.clone(), config.max_results);
    let (debouncer, mut effective) =
        Debouncer::spawn(Duration::from_millis(config.debounce_ms));
    let (event_tx, mut event_rx) = mpsc::channel::<Event>(EVENT_BUFFER);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("shelfmark (type `help` for commands)");
    render(&state);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line, &state) {
                    Command::Quit => break,
                    Command::Help => print_help(),
                    Command::Noop => {}
                    Command::Invalid(message) => println!("{message}"),
                    Command::Query(text) => {
                        dispatch(&mut state, Event::QueryChanged(text.clone()), &client, &event_tx)?;
                        debouncer.input(text).await?;
                    }
                    Command::Dispatch(event) => {
                        dispatch(&mut state, event, &client, &event_tx)?;
                    }
                }
            }
            Some(query) = effective.recv() => {
                dispatch(&mut state, Event::EffectiveQuery(query), &client, &event_tx)?;
            }
            Some(event) = event_rx.recv() => {
                dispatch(&mut state, event, &client, &event_tx)?;
            }
        }
    }

    Ok(())
}

/// Runs one event through the engine, executes the returned actions, and
/// re-renders when state changed.
fn dispatch(
    state: &mut AppState,
    event: Event,
    client: &CatalogClient,
    event_tx: &mpsc::Sender<Event>,
) -> Result<()> {
    let (changed, actions) = handle_event(state, &event)?;

    for action in actions {
        let Action::FetchCatalog { query, generation } = action;
        let client = client.clone();
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            let result = client
                .search(&query)
                .await
                .map_err(|e| e.to_string());
            // Receiver gone means the driver is shutting down.
            let _ = event_tx
                .send(Event::SearchCompleted { generation, result })
                .await;
        });
    }

    if changed {
        render(state);
    }
    Ok(())
}

/// One parsed line of input.
enum Command {
    Dispatch(Event),
    Query(String),
    Help,
    Quit,
    Noop,
    Invalid(String),
}

fn parse_command(line: &str, state: &AppState) -> Command {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "" => Command::Noop,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "find" => Command::Query(rest.to_string()),
        "clear" => Command::Dispatch(Event::ClearSearch),
        "dismiss" => Command::Dispatch(Event::ClearValidationErrors),
        "theme" => Command::Dispatch(Event::ToggleTheme),
        "ls" => {
            render(state);
            Command::Noop
        }
        "add" => match result_at(state, rest) {
            Ok(entry) => Command::Dispatch(Event::AddFavorite(entry)),
            Err(message) => Command::Invalid(message),
        },
        "rm" => match favorite_at(state, rest) {
            Ok(id) => Command::Dispatch(Event::RemoveFavorite(id)),
            Err(message) => Command::Invalid(message),
        },
        "rate" => {
            let (index, value) = split_arg(rest);
            match (favorite_at(state, index), value.parse::<u8>()) {
                (Ok(id), Ok(rating)) => Command::Dispatch(Event::SetRating { id, rating }),
                (Err(message), _) => Command::Invalid(message),
                (_, Err(_)) => Command::Invalid("usage: rate <n> <0-5>".to_string()),
            }
        }
        "status" => {
            let (index, value) = split_arg(rest);
            match (favorite_at(state, index), ReadingStatus::parse(value)) {
                (Ok(id), Some(status)) => Command::Dispatch(Event::SetStatus { id, status }),
                (Err(message), _) => Command::Invalid(message),
                (_, None) => Command::Invalid(
                    "usage: status <n> <want-to-read|reading|finished>".to_string(),
                ),
            }
        }
        "note" => {
            let (index, text) = split_arg(rest);
            match favorite_at(state, index) {
                Ok(id) => Command::Dispatch(Event::SetNotes {
                    id,
                    notes: text.to_string(),
                }),
                Err(message) => Command::Invalid(message),
            }
        }
        "sort" => match SortKey::parse(rest) {
            Some(key) => Command::Dispatch(Event::SetSort(key)),
            None => Command::Invalid("usage: sort <title|author|rating|added>".to_string()),
        },
        "filter" => match StatusFilter::parse(rest) {
            Some(filter) => Command::Dispatch(Event::SetFilter(filter)),
            None => Command::Invalid(
                "usage: filter <all|want-to-read|reading|finished>".to_string(),
            ),
        },
        other => Command::Invalid(format!("unknown command `{other}`, try `help`")),
    }
}

/// Splits `"<index> <remainder>"`, tolerating a missing remainder.
fn split_arg(rest: &str) -> (&str, &str) {
    match rest.split_once(char::is_whitespace) {
        Some((first, remainder)) => (first, remainder.trim()),
        None => (rest, ""),
    }
}

/// Resolves a 1-based index into the current search results.
fn result_at(state: &AppState, arg: &str) -> std::result::Result<shelfmark::CatalogEntry, String> {
    let index: usize = arg
        .parse()
        .map_err(|_| "usage: add <result number>".to_string())?;
    state
        .session
        .results
        .get(index.wrapping_sub(1))
        .cloned()
        .ok_or_else(|| format!("no search result #{index}"))
}

/// Resolves a 1-based index into the projected shelf, returning the book id.
fn favorite_at(state: &AppState, arg: &str) -> std::result::Result<String, String> {
    let index: usize = arg
        .parse()
        .map_err(|_| "expected a shelf number".to_string())?;
    state
        .shelf()
        .get(index.wrapping_sub(1))
        .map(|book| book.id().to_string())
        .ok_or_else(|| format!("no shelf entry #{index}"))
}

/// Prints the current search results, shelf, and any validation errors.
fn render(state: &AppState) {
    use shelfmark::app::SearchStatus;

    match state.session.status {
        SearchStatus::Idle => {}
        SearchStatus::Pending => println!("searching `{}`...", state.session.query),
        SearchStatus::Failed => {
            if let Some(error) = &state.session.error {
                println!("search failed: {error}");
            }
        }
        SearchStatus::Succeeded => {
            println!("results for `{}`:", state.session.query);
            for (i, entry) in state.session.results.iter().enumerate() {
                let marker = if state.is_favorite(&entry.id) { "*" } else { " " };
                println!(
                    "{marker}{:>3}. {} - {}",
                    i + 1,
                    entry.title,
                    entry.authors.join(", ")
                );
            }
        }
    }

    let shelf = state.shelf();
    println!("shelf ({} of {}) [{}]:", shelf.len(), state.store.favorites().len(), state.theme.as_str());
    for (i, book) in shelf.iter().enumerate() {
        let stars = "★".repeat(usize::from(book.personal_rating));
        println!(
            "{:>4}. {} - {} [{}] {}",
            i + 1,
            book.entry.title,
            book.entry.authors.join(", "),
            book.reading_status.as_str(),
            stars
        );
        if !book.notes.is_empty() {
            println!("      note: {}", book.notes);
        }
    }

    for (category, message) in &state.validation_errors {
        println!("! {category}: {message}");
    }
}

fn print_help() {
    println!(
        "\
commands:
  find <text>          search the catalog (debounced)
  clear                clear the current search
  add <n>              add search result n to the shelf
  ls                   show the shelf
  rm <n>               remove shelf entry n
  rate <n> <0-5>       set your rating for shelf entry n
  status <n> <status>  want-to-read | reading | finished
  note <n> <text>      set notes for shelf entry n
  sort <key>           title | author | rating | added
  filter <key>         all | want-to-read | reading | finished
  theme                toggle light/dark
  dismiss              dismiss validation errors
  quit                 exit"
    );
}
