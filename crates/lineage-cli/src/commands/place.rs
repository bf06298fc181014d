//! Place command implementation.

use crate::cli::PlaceArgs;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lineage_domain::{Place, PlaceComponents, PlaceId};
use lineage_store::{InMemoryStore, PlaceStats};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct PlaceReport {
    name: String,
    key: String,
    components: PlaceComponents,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<PlaceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<PlaceStats>,
}

/// Execute the place command.
///
/// With a dataset, a place sharing the normalized key is looked up and its
/// event counts reported.
pub fn execute_place(args: PlaceArgs, store: Option<&InMemoryStore>, formatter: &Formatter) -> Result<String> {
    let parsed = Place::from_name(PlaceId::new(0), &args.name);
    if parsed.normalized_name.is_empty() {
        return Err(CliError::InvalidInput("Place name is empty".to_string()));
    }

    let mut report = PlaceReport {
        name: parsed.name,
        key: parsed.normalized_name,
        components: parsed.components,
        id: None,
        stats: None,
    };
    if let Some(store) = store {
        if let Some(known) = store.find_place_by_name(&args.name) {
            report.id = Some(known.id);
            report.stats = Some(store.place_stats(known.id)?);
        }
    }

    match formatter.format() {
        OutputFormat::Json => formatter.json(&report),
        OutputFormat::Quiet => Ok(report.key),
        OutputFormat::Table => {
            let part = |value: &Option<String>| value.clone().unwrap_or_default();
            let mut rows = vec![
                ("Name", report.name.clone()),
                ("Key", report.key.clone()),
                ("City", part(&report.components.city)),
                ("State/Province", part(&report.components.state_province)),
                ("Country", part(&report.components.country)),
            ];
            if let (Some(id), Some(stats)) = (report.id, report.stats) {
                rows.push(("Dataset id", id.to_string()));
                rows.push(("Births", stats.births.to_string()));
                rows.push(("Deaths", stats.deaths.to_string()));
                rows.push(("Marriages", stats.marriages.to_string()));
                rows.push(("People", stats.total_people.to_string()));
            }
            Ok(formatter.key_values(&rows))
        }
    }
}
