//! Search command implementation.

use crate::cli::SearchArgs;
use crate::error::Result;
use crate::output::Formatter;
use lineage_domain::Person;
use lineage_store::{InMemoryStore, SearchOptions};

/// Execute the search command.
pub fn execute_search(args: SearchArgs, store: &InMemoryStore, formatter: &Formatter) -> Result<String> {
    let options = SearchOptions {
        limit: args.limit,
        offset: args.offset,
        include_maiden_name: !args.no_maiden,
    };
    let found: Vec<Person> = store
        .search_persons(&args.query, &options)
        .into_iter()
        .cloned()
        .collect();
    formatter.people(&found)
}
