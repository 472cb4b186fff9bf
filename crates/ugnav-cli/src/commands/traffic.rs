//! Traffic-adjusted route command handler.

use anyhow::{Context, Result};

use ugnav_lib::{
    optimize_for_traffic, CongestionTable, Graph, Route, RouteAdjuster, RouteRequest,
};

use super::route::ensure_route_found;
use ugnav_cli::output::OutputFormat;

/// Handle the traffic subcommand.
///
/// Scales every candidate's time by `factor`, then annotates the optimum with
/// the campus congestion table's advisories.
pub fn handle_traffic_command(
    graph: &Graph,
    request: &RouteRequest,
    factor: f64,
    format: OutputFormat,
) -> Result<()> {
    let analysis =
        optimize_for_traffic(graph, request, factor).context("failed to plan traffic route")?;
    ensure_route_found(graph, &analysis)?;

    let advisories = match &analysis.optimal {
        Some(route) => congestion_advisories(&CongestionTable::campus_defaults(), route),
        None => Vec::new(),
    };

    format.render_analysis(&analysis, advisories)
}

fn congestion_advisories(adjuster: &dyn RouteAdjuster, route: &Route) -> Vec<String> {
    let adjustment = adjuster.adjust_route(route);
    tracing::debug!(
        "{} adjuster factor {:.3} for {}",
        adjuster.name(),
        adjustment.factor,
        route
    );

    let mut advisories = vec![format!(
        "Congestion-adjusted time: {:.1}s ({:.2}x)",
        adjustment.adjusted_time, adjustment.factor
    )];
    advisories.extend(adjustment.advisories);
    advisories
}
