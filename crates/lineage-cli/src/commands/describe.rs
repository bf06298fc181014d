//! Describe command implementation.

use super::require_person;
use crate::cli::DescribeArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::{label, Formatter};
use lineage_domain::PersonId;
use lineage_kinship::{Hop, RelationshipResolver, ResolverConfig, Step};
use lineage_store::InMemoryStore;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Description {
    from: PersonId,
    to: PersonId,
    relationship: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<Hop>>,
}

/// Execute the describe command.
pub fn execute_describe(
    args: DescribeArgs,
    store: &InMemoryStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<String> {
    let from = require_person(store, args.from)?;
    let to = require_person(store, args.to)?;

    let resolver_config = match args.max_depth {
        Some(depth) => ResolverConfig::with_max_depth(depth),
        None => config.kinship.clone(),
    };
    let resolver = RelationshipResolver::new(store, resolver_config);
    let relationship = resolver.describe(from.id, to.id);

    let path = if args.path {
        Some(
            resolver
                .relationship_path(from.id, to.id)?
                .map(|p| p.hops)
                .unwrap_or_default(),
        )
    } else {
        None
    };

    match formatter.format() {
        OutputFormat::Json => formatter.json(&Description {
            from: from.id,
            to: to.id,
            relationship,
            path,
        }),
        OutputFormat::Quiet => Ok(relationship),
        OutputFormat::Table => {
            let mut rows = vec![
                ("From", label(&from)),
                ("To", label(&to)),
                ("Relationship", relationship),
            ];
            if let Some(hops) = path {
                rows.push(("Path", render_path(store, from.id, &hops)));
            }
            Ok(formatter.key_values(&rows))
        }
    }
}

/// "Ava Moss (#9) → parent → Ken Moss (#5)" style rendering of a hop list
fn render_path(store: &InMemoryStore, start: PersonId, hops: &[Hop]) -> String {
    let name = |id: PersonId| store.person(id).map(label).unwrap_or_else(|| format!("#{}", id));

    let mut out = name(start);
    for hop in hops {
        let step = match hop.step {
            Step::Up => "parent",
            Step::Down => "child",
            Step::Spouse => "spouse",
        };
        out.push_str(&format!(" → {} → {}", step, name(hop.to)));
    }
    out
}
