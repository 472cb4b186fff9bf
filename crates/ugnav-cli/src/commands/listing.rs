//! Map inspection command handlers.

use anyhow::{bail, Result};

use ugnav_lib::{AllPairs, Graph};

use ugnav_cli::output::OutputFormat;

/// Handle the locations subcommand.
pub fn handle_locations_command(graph: &Graph, format: OutputFormat) -> Result<()> {
    if graph.is_empty() {
        bail!("the campus map has no locations");
    }
    format.render_locations(&graph.locations())
}

/// Handle the all-pairs subcommand.
pub fn handle_all_pairs_command(graph: &Graph, format: OutputFormat) -> Result<()> {
    let table = AllPairs::compute(graph);
    tracing::debug!(
        "computed all-pairs table over {} locations",
        table.locations().len()
    );
    format.render_all_pairs(graph, &table)
}
