//! Calendar command implementation.

use crate::cli::{CalendarAction, CalendarArgs};
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use lineage_calendar::{format_for_display, parse_user_input, try_convert};
use lineage_domain::CalendarSystem;

/// Execute a calendar action.
///
/// Conversion is strict here: a date that cannot be read is an error rather
/// than being echoed back.
pub fn execute_calendar(args: CalendarArgs, formatter: &Formatter) -> Result<String> {
    match args.action {
        CalendarAction::Convert { date, from, to } => convert(&date, from, to, formatter),
        CalendarAction::Parse { input } => parse(&input, formatter),
        CalendarAction::Format {
            date,
            calendar,
            approximate,
        } => {
            let display = format_for_display(&date, calendar, approximate);
            match formatter.format() {
                OutputFormat::Json => formatter.json(&serde_json::json!({
                    "date": date,
                    "calendar": calendar,
                    "approximate": approximate,
                    "display": display,
                })),
                _ => Ok(display),
            }
        }
    }
}

fn convert(date: &str, from: CalendarSystem, to: CalendarSystem, formatter: &Formatter) -> Result<String> {
    let result = try_convert(date, from, to)?;
    match formatter.format() {
        OutputFormat::Json => formatter.json(&serde_json::json!({
            "date": date,
            "from": from,
            "to": to,
            "result": result,
        })),
        OutputFormat::Quiet => Ok(result),
        OutputFormat::Table => Ok(formatter.key_values(&[
            ("Input", format!("{} ({})", date, from.display_name())),
            ("Result", format!("{} ({})", result, to.display_name())),
        ])),
    }
}

fn parse(input: &str, formatter: &Formatter) -> Result<String> {
    let parsed = parse_user_input(input);
    match formatter.format() {
        OutputFormat::Json => formatter.json(&parsed),
        OutputFormat::Quiet => Ok(parsed.date),
        OutputFormat::Table => {
            let reads_as = format_for_display(&parsed.date, CalendarSystem::Gregorian, parsed.approximate);
            Ok(formatter.key_values(&[
                ("Input", input.to_string()),
                ("Date", parsed.date),
                ("Approximate", if parsed.approximate { "yes" } else { "no" }.to_string()),
                ("Reads as", reads_as),
            ]))
        }
    }
}
