//! Duplicate-match command implementation.

use super::require_person;
use crate::cli::PersonArgs;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::{display_date, label, Formatter};
use lineage_domain::NameFormat;
use lineage_store::InMemoryStore;
use tabled::builder::Builder;

/// Execute the matches command.
///
/// Candidates are listed best first with their similarity score.
pub fn execute_matches(args: PersonArgs, store: &InMemoryStore, formatter: &Formatter) -> Result<String> {
    let person = require_person(store, args.id)?;
    let matches = store.find_potential_matches(args.id)?;

    match formatter.format() {
        OutputFormat::Json => formatter.json(&matches),
        OutputFormat::Quiet => Ok(matches
            .iter()
            .map(|m| m.person.id.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Table => {
            if matches.is_empty() {
                return Ok(formatter.info(&format!("No likely duplicates of {}", label(&person))));
            }

            let mut builder = Builder::default();
            builder.push_record(["Score", "ID", "Name", "Born"]);
            for m in &matches {
                builder.push_record([
                    m.score.to_string(),
                    m.person.id.to_string(),
                    m.person.display_name(NameFormat::Full),
                    display_date(m.person.birth_date.as_ref()),
                ]);
            }
            Ok(format!(
                "{}\n{}",
                formatter.heading(&format!("Possible duplicates of {}", label(&person))),
                formatter.table(builder)
            ))
        }
    }
}
