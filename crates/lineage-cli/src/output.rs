//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use lineage_calendar::format_for_display;
use lineage_domain::{DateValue, NameFormat, Person};
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Pretty JSON for any serializable value.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Format a list of people.
    pub fn people(&self, people: &[Person]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(people),
            OutputFormat::Quiet => Ok(ids(people.iter())),
            OutputFormat::Table => {
                if people.is_empty() {
                    return Ok(self.colorize("No people found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Gender", "Born", "Died"]);
                for person in people {
                    builder.push_record(person_row(person));
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format people grouped by generation.
    pub fn generations(&self, generations: &BTreeMap<u32, Vec<Person>>) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(generations),
            OutputFormat::Quiet => Ok(ids(generations.values().flatten())),
            OutputFormat::Table => {
                if generations.is_empty() {
                    return Ok(self.colorize("No relatives found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Generation", "ID", "Name", "Gender", "Born", "Died"]);
                for (generation, people) in generations {
                    for person in people {
                        let mut row = vec![generation.to_string()];
                        row.extend(person_row(person));
                        builder.push_record(row);
                    }
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Two-column table of labelled values.
    pub fn key_values(&self, rows: &[(&str, String)]) -> String {
        let mut builder = Builder::default();
        for (key, value) in rows {
            builder.push_record([self.colorize(key, "cyan"), value.clone()]);
        }
        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }

    /// Render a table with the house style.
    pub fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a section heading.
    pub fn heading(&self, title: &str) -> String {
        self.colorize(title, "magenta")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Short name with the id, e.g. "Ada Moss (#4)".
pub fn label(person: &Person) -> String {
    format!("{} (#{})", person.display_name(NameFormat::Short), person.id)
}

/// Stored date rendered for reading, or an empty string.
pub fn display_date(date: Option<&DateValue>) -> String {
    date.map(|d| format_for_display(&d.value, d.calendar, d.approximate))
        .unwrap_or_default()
}

fn person_row(person: &Person) -> Vec<String> {
    vec![
        person.id.to_string(),
        person.display_name(NameFormat::Full),
        person.gender.to_string(),
        display_date(person.birth_date.as_ref()),
        display_date(person.death_date.as_ref()),
    ]
}

fn ids<'a>(people: impl Iterator<Item = &'a Person>) -> String {
    people
        .map(|p| p.id.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_domain::{Gender, PersonId};

    fn create_test_person() -> Person {
        let mut person = Person::new(PersonId::new(4), Gender::Female).named("Ada", "Moss");
        person.birth_date = Some(DateValue::gregorian("1990-01-05"));
        person
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.people(&[create_test_person()]).unwrap();
        assert!(output.contains("\"first_name\": \"Ada\""));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.people(&[create_test_person()]).unwrap();
        assert_eq!(output, "4");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.people(&[create_test_person()]).unwrap();
        assert!(output.contains("Name"));
        assert!(output.contains("Ada Moss"));
        assert!(output.contains("January 5, 1990"));
    }

    #[test]
    fn test_empty_people() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.people(&[]).unwrap();
        assert!(output.contains("No people found"));
    }

    #[test]
    fn test_generations_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let generations = BTreeMap::from([(1, vec![create_test_person()])]);
        let output = formatter.generations(&generations).unwrap();
        assert!(output.contains("Generation"));
        assert!(output.contains("Ada Moss"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(label(&create_test_person()), "Ada Moss (#4)");
    }
}
