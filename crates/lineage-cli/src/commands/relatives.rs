//! Ancestors and descendants command implementations.

use crate::cli::GenerationsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use lineage_graph::GenealogyGraph;
use lineage_store::InMemoryStore;

/// Execute the ancestors command.
pub fn execute_ancestors(
    args: GenerationsArgs,
    store: &InMemoryStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<String> {
    let graph = GenealogyGraph::new(store);
    graph.require_person(args.id)?;
    let generations = graph.ancestors(args.id, args.generations.unwrap_or(config.chart.generations))?;
    formatter.generations(&generations)
}

/// Execute the descendants command.
pub fn execute_descendants(
    args: GenerationsArgs,
    store: &InMemoryStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<String> {
    let graph = GenealogyGraph::new(store);
    graph.require_person(args.id)?;
    let generations = graph.descendants(args.id, args.generations.unwrap_or(config.chart.generations))?;
    formatter.generations(&generations)
}
