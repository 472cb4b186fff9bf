//! Route, alternatives, and comparison command handlers.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;

use ugnav_lib::{
    compare_algorithms, find_divide_and_conquer_routes, find_greedy_route,
    find_multiple_route_options, find_optimal_routes, Graph, RouteAnalysis, RouteRequest,
};

use ugnav_cli::output::OutputFormat;

/// Handle the route subcommand.
///
/// Runs every algorithm between two named locations and reports the best.
pub fn handle_route_command(
    graph: &Graph,
    request: &RouteRequest,
    format: OutputFormat,
) -> Result<()> {
    let analysis = find_optimal_routes(graph, request).context("failed to plan route")?;
    ensure_route_found(graph, &analysis)?;
    format.render_analysis(&analysis, Vec::new())
}

/// Search used to produce alternative routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlternativeStrategy {
    /// A* re-run with one edge of the previous route banned.
    #[default]
    AStar,
    /// Dijkstra legs joined at intermediate locations.
    DivideAndConquer,
    /// Nearest-neighbour walk; at most one route.
    Greedy,
}

/// Handle the alternatives subcommand.
pub fn handle_alternatives_command(
    graph: &Graph,
    request: &RouteRequest,
    count: usize,
    strategy: AlternativeStrategy,
    format: OutputFormat,
) -> Result<()> {
    if count == 0 {
        bail!("--count must be at least 1");
    }

    let mut analysis = match strategy {
        AlternativeStrategy::AStar => find_multiple_route_options(graph, request, count),
        AlternativeStrategy::DivideAndConquer => find_divide_and_conquer_routes(graph, request),
        AlternativeStrategy::Greedy => find_greedy_route(graph, request),
    }
    .context("failed to find alternative routes")?;
    ensure_route_found(graph, &analysis)?;

    analysis.routes.truncate(count);
    if analysis.routes.len() < count {
        tracing::info!(
            "only {} distinct routes available (requested {})",
            analysis.routes.len(),
            count
        );
    }

    format.render_analysis(&analysis, Vec::new())
}

/// Handle the compare subcommand.
pub fn handle_compare_command(
    graph: &Graph,
    request: &RouteRequest,
    format: OutputFormat,
) -> Result<()> {
    let groups = compare_algorithms(graph, request).context("failed to compare algorithms")?;
    if groups.is_empty() {
        bail!(format_route_not_found_message(
            &request.start,
            &request.goal,
            graph.is_directed()
        ));
    }
    format.render_groups(&groups)
}

pub(crate) fn ensure_route_found(graph: &Graph, analysis: &RouteAnalysis) -> Result<()> {
    if analysis.has_route() {
        Ok(())
    } else {
        bail!(format_route_not_found_message(
            &analysis.start,
            &analysis.goal,
            graph.is_directed()
        ))
    }
}

fn format_route_not_found_message(start: &str, goal: &str, directed: bool) -> String {
    let mut message = format!("No route found between {start} and {goal}.");
    if directed {
        message.push_str(" Paths on this map are one-way; try swapping --from and --to.");
    } else {
        message.push_str(" Run `locations` to check the map.");
    }
    message
}
