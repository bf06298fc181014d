//! Command implementations.
//!
//! Each command renders its whole output to a string; the binary prints it.

pub mod calendar;
pub mod chart;
pub mod describe;
pub mod matches;
pub mod person;
pub mod place;
pub mod relatives;
pub mod search;
pub mod timeline;

pub use self::calendar::execute_calendar;
pub use self::chart::execute_chart;
pub use self::describe::execute_describe;
pub use self::matches::execute_matches;
pub use self::person::execute_person;
pub use self::place::execute_place;
pub use self::relatives::{execute_ancestors, execute_descendants};
pub use self::search::execute_search;
pub use self::timeline::execute_timeline;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lineage_domain::traits::PlaceRepository;
use lineage_domain::{Person, PersonId, PlaceId};
use lineage_store::InMemoryStore;
use std::path::Path;
use tracing::info;

/// Run a parsed command line against a loaded configuration.
pub fn execute(cli: Cli, config: &Config) -> Result<String> {
    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let color_enabled = !cli.no_color && config.output.color;
    let formatter = Formatter::new(format, color_enabled);
    let data = cli.data.as_deref().or(config.dataset.as_deref());

    match cli.command {
        Command::Calendar(args) => execute_calendar(args, &formatter),
        Command::Place(args) => {
            let store = data.map(open_dataset).transpose()?;
            execute_place(args, store.as_ref(), &formatter)
        }
        cmd => {
            let store = open_dataset(data.ok_or_else(|| {
                CliError::Config("No dataset given. Pass --data <file> or set `dataset` in the config file".into())
            })?)?;

            match cmd {
                Command::Describe(args) => execute_describe(args, &store, config, &formatter),
                Command::Chart(args) => execute_chart(args, &store, config, &formatter),
                Command::Person(args) => execute_person(args, &store, &formatter),
                Command::Ancestors(args) => execute_ancestors(args, &store, config, &formatter),
                Command::Descendants(args) => execute_descendants(args, &store, config, &formatter),
                Command::Timeline(args) => execute_timeline(args, &store, &formatter),
                Command::Matches(args) => execute_matches(args, &store, &formatter),
                Command::Search(args) => execute_search(args, &store, &formatter),
                Command::Calendar(_) | Command::Place(_) => unreachable!(),
            }
        }
    }
}

/// Load a JSON dataset.
pub fn open_dataset(path: &Path) -> Result<InMemoryStore> {
    let store = InMemoryStore::load_json(path)?;
    info!(path = %path.display(), persons = store.person_count(), "Loaded dataset");
    Ok(store)
}

fn require_person(store: &InMemoryStore, id: PersonId) -> Result<Person> {
    store
        .person(id)
        .cloned()
        .ok_or_else(|| CliError::NotFound(format!("Person {}", id)))
}

/// Name of a referenced place, or an empty string.
pub(crate) fn place_name(store: &InMemoryStore, id: Option<PlaceId>) -> Result<String> {
    let Some(id) = id else {
        return Ok(String::new());
    };
    Ok(store.get_place(id)?.map(|p| p.name).unwrap_or_default())
}
