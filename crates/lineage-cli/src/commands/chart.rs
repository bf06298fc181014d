//! Chart command implementation.

use crate::cli::ChartArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lineage_chart::{layout, Chart, ChartConfig, ChartGenerator, Layout};
use lineage_store::InMemoryStore;
use serde::Serialize;
use tabled::builder::Builder;

#[derive(Serialize)]
struct ChartOutput<'a> {
    #[serde(flatten)]
    chart: &'a Chart,
    #[serde(skip_serializing_if = "Option::is_none")]
    layout: Option<&'a Layout>,
}

/// Execute the chart command.
pub fn execute_chart(
    args: ChartArgs,
    store: &InMemoryStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<String> {
    let chart_config = chart_config(&args, &config.chart);
    let chart = ChartGenerator::new(store)
        .generate(args.id, &chart_config)
        .ok_or_else(|| CliError::NotFound(format!("Person {}", args.id)))?;
    let placed = args.layout.then(|| layout(&chart, &config.layout));

    match formatter.format() {
        OutputFormat::Json => formatter.json(&ChartOutput {
            chart: &chart,
            layout: placed.as_ref(),
        }),
        OutputFormat::Quiet => Ok(rows(&chart)
            .into_iter()
            .map(|(_, id)| id.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Table => Ok(chart_table(&chart, placed.as_ref(), formatter)),
    }
}

/// Stored chart defaults with command-line overrides applied
pub fn chart_config(args: &ChartArgs, base: &ChartConfig) -> ChartConfig {
    ChartConfig {
        chart_type: args.chart_type.unwrap_or(base.chart_type),
        direction: args.direction.unwrap_or(base.direction),
        generations: args.generations.unwrap_or(base.generations),
        show_photos: base.show_photos && !args.no_photos,
        show_dates: base.show_dates && !args.no_dates,
        show_places: base.show_places || args.places,
    }
}

/// Node ids oldest generation first, each row in chart order
fn rows(chart: &Chart) -> Vec<(i32, lineage_domain::PersonId)> {
    chart
        .generations()
        .into_iter()
        .rev()
        .flat_map(|(generation, ids)| ids.into_iter().map(move |id| (generation, id)))
        .collect()
}

fn chart_table(chart: &Chart, placed: Option<&Layout>, formatter: &Formatter) -> String {
    let root = chart
        .nodes
        .get(&chart.root)
        .map(|n| n.full_name.clone())
        .unwrap_or_default();
    let title = format!(
        "{} for {} ({}, {} generations)",
        chart.chart_type.label(),
        root,
        chart.direction.label(),
        chart.config.effective_generations()
    );

    let mut header = vec!["Generation", "ID", "Name", "Born", "Died"];
    if chart.config.show_places {
        header.extend(["Birth place", "Death place"]);
    }
    if placed.is_some() {
        header.extend(["X", "Y"]);
    }

    let mut builder = Builder::default();
    builder.push_record(header);
    for (generation, id) in rows(chart) {
        let Some(node) = chart.nodes.get(&id) else {
            continue;
        };
        let mut row = vec![
            generation.to_string(),
            id.to_string(),
            node.name.clone(),
            node.birth_date.clone().unwrap_or_default(),
            node.death_date.clone().unwrap_or_default(),
        ];
        if chart.config.show_places {
            row.push(node.birth_place.clone().unwrap_or_default());
            row.push(node.death_place.clone().unwrap_or_default());
        }
        if let Some(b) = placed.and_then(|p| p.boxes.get(&id)) {
            row.push(format!("{:.0}", b.x));
            row.push(format!("{:.0}", b.y));
        }
        builder.push_record(row);
    }

    format!(
        "{}\n{}\n{}",
        formatter.heading(&title),
        formatter.table(builder),
        formatter.info(&format!("{} people, {} links", chart.nodes.len(), chart.edges.len()))
    )
}
