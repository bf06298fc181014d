//! Person command implementation.

use crate::cli::PersonArgs;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::{display_date, Formatter};
use super::place_name;
use lineage_domain::{NameFormat, Person};
use lineage_graph::GenealogyGraph;
use lineage_store::InMemoryStore;
use serde::Serialize;
use tabled::builder::Builder;

/// A person with their immediate family
#[derive(Debug, Serialize)]
struct FamilyView {
    person: Person,
    father: Option<Person>,
    mother: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    other_parent: Option<Person>,
    siblings: Vec<Person>,
    spouses: Vec<Person>,
    children: Vec<Person>,
}

impl FamilyView {
    fn relatives(&self) -> Vec<(&'static str, &Person)> {
        let mut out = Vec::new();
        out.extend(self.father.iter().map(|p| ("Father", p)));
        out.extend(self.mother.iter().map(|p| ("Mother", p)));
        out.extend(self.other_parent.iter().map(|p| ("Parent", p)));
        out.extend(self.siblings.iter().map(|p| ("Sibling", p)));
        out.extend(self.spouses.iter().map(|p| ("Spouse", p)));
        out.extend(self.children.iter().map(|p| ("Child", p)));
        out
    }
}

/// Execute the person command.
pub fn execute_person(args: PersonArgs, store: &InMemoryStore, formatter: &Formatter) -> Result<String> {
    let graph = GenealogyGraph::new(store);
    let person = graph.require_person(args.id)?;
    let parents = graph.get_parents(args.id)?;

    let view = FamilyView {
        father: parents.father,
        mother: parents.mother,
        other_parent: parents.other,
        siblings: graph.get_siblings(args.id)?,
        spouses: graph.get_spouses(args.id)?,
        children: graph.get_children(args.id)?,
        person,
    };

    match formatter.format() {
        OutputFormat::Json => formatter.json(&view),
        OutputFormat::Quiet => Ok(view
            .relatives()
            .iter()
            .map(|(_, p)| p.id.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Table => {
            let details = details(store, &view.person, formatter)?;
            let relatives = view.relatives();
            if relatives.is_empty() {
                return Ok(format!("{}\n{}", details, formatter.warning("No relatives recorded")));
            }

            let mut builder = Builder::default();
            builder.push_record(["Relation", "ID", "Name", "Born", "Died"]);
            for (relation, p) in relatives {
                builder.push_record([
                    relation.to_string(),
                    p.id.to_string(),
                    p.display_name(NameFormat::Full),
                    display_date(p.birth_date.as_ref()),
                    display_date(p.death_date.as_ref()),
                ]);
            }
            Ok(format!(
                "{}\n{}\n{}",
                details,
                formatter.heading("Family"),
                formatter.table(builder)
            ))
        }
    }
}

fn details(store: &InMemoryStore, person: &Person, formatter: &Formatter) -> Result<String> {
    let mut rows = vec![
        ("ID", person.id.to_string()),
        ("UUID", person.uuid.to_string()),
        ("Name", person.display_name(NameFormat::Full)),
        ("Gender", person.gender.to_string()),
        ("Born", display_date(person.birth_date.as_ref())),
        ("Birth place", place_name(store, person.birth_place)?),
        ("Died", display_date(person.death_date.as_ref())),
        ("Death place", place_name(store, person.death_place)?),
        ("Living", if person.living { "yes" } else { "no" }.to_string()),
    ];
    if let Some(occupation) = &person.occupation {
        rows.push(("Occupation", occupation.clone()));
    }
    rows.retain(|(_, value)| !value.is_empty());
    Ok(formatter.key_values(&rows))
}
