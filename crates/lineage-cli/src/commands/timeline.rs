//! Timeline command implementation.

use super::{place_name, require_person};
use crate::cli::PersonArgs;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::{display_date, label, Formatter};
use lineage_store::InMemoryStore;
use tabled::builder::Builder;

/// Execute the timeline command.
pub fn execute_timeline(args: PersonArgs, store: &InMemoryStore, formatter: &Formatter) -> Result<String> {
    let person = require_person(store, args.id)?;
    let timeline = store.timeline(args.id)?;

    match formatter.format() {
        OutputFormat::Json => formatter.json(&timeline),
        OutputFormat::Quiet => Ok(timeline
            .iter()
            .map(|entry| entry.event_type.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Table => {
            let heading = formatter.heading(&format!("Timeline for {}", label(&person)));
            if timeline.is_empty() {
                return Ok(format!("{}\n{}", heading, formatter.warning("No dated events recorded")));
            }

            let mut builder = Builder::default();
            builder.push_record(["Date", "Event", "Place", "Description"]);
            for entry in &timeline {
                builder.push_record([
                    display_date(entry.date.as_ref()),
                    entry.label.clone(),
                    place_name(store, entry.place)?,
                    entry.description.clone().unwrap_or_default(),
                ]);
            }
            Ok(format!("{}\n{}", heading, formatter.table(builder)))
        }
    }
}
