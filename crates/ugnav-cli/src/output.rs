//! Output formatting for CLI results.
//!
//! Route analyses are rendered through the library's [`RouteReport`]. The
//! listing commands (locations, comparisons, all pairs) format here.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use ugnav_lib::{
    AllPairs, Graph, Location, LocationId, Route, RouteAlgorithm, RouteAnalysis, RouteRenderMode,
    RouteReport,
};

use crate::terminal::{format_metres, ColorPalette};

/// Output style selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text report.
    #[default]
    Text,
    /// Markdown-flavoured report.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

/// One reachable pair, with names resolved for display.
#[derive(Debug, Clone, Serialize)]
pub struct NamedPair {
    pub from: String,
    pub to: String,
    pub distance: f64,
    pub path: Vec<String>,
}

impl OutputFormat {
    /// Render a route analysis that found at least one route.
    pub fn render_analysis(&self, analysis: &RouteAnalysis, advisories: Vec<String>) -> Result<()> {
        let report = RouteReport::from_analysis(analysis)
            .context("failed to build route report for display")?
            .with_advisories(advisories);

        match self {
            OutputFormat::Text => print!("{}", report.render(RouteRenderMode::PlainText)),
            OutputFormat::Rich => print!("{}", report.render(RouteRenderMode::RichText)),
            OutputFormat::Json => print_json(&report)?,
        }
        Ok(())
    }

    /// Render candidates grouped by the algorithm that produced them.
    pub fn render_groups(&self, groups: &BTreeMap<RouteAlgorithm, Vec<Route>>) -> Result<()> {
        if *self == OutputFormat::Json {
            return print_json(groups);
        }

        let palette = ColorPalette::detect();
        for (algorithm, routes) in groups {
            match self {
                OutputFormat::Rich => println!("**{algorithm}**"),
                _ => println!("{}{algorithm}{}", palette.cyan, palette.reset),
            }
            for route in routes {
                println!(
                    "  {} {}({} explored){}",
                    route,
                    palette.gray,
                    route.nodes_explored,
                    palette.reset
                );
            }
        }
        Ok(())
    }

    /// Render the location table.
    pub fn render_locations(&self, locations: &[Location]) -> Result<()> {
        if *self == OutputFormat::Json {
            return print_json(&locations);
        }

        let palette = ColorPalette::detect();
        for location in locations {
            match self {
                OutputFormat::Rich => println!("* `{}` **{}**", location.id, location.name),
                _ => println!(
                    "{}{:>4}{}  {}{}{}",
                    palette.gray,
                    location.id,
                    palette.reset,
                    palette.white_bold,
                    location.name,
                    palette.reset
                ),
            }
        }
        Ok(())
    }

    /// Render every reachable ordered pair from a Floyd-Warshall table.
    pub fn render_all_pairs(&self, graph: &Graph, table: &AllPairs) -> Result<()> {
        let pairs = named_pairs(graph, table);
        if *self == OutputFormat::Json {
            return print_json(&pairs);
        }

        let palette = ColorPalette::detect();
        for pair in &pairs {
            match self {
                OutputFormat::Rich => println!(
                    "* **{}** → **{}**: {:.2}m ({})",
                    pair.from,
                    pair.to,
                    pair.distance,
                    pair.path.join(" → ")
                ),
                _ => println!(
                    "{} -> {}: {}{:.2}m{} {}({}){}",
                    pair.from,
                    pair.to,
                    palette.green,
                    pair.distance,
                    palette.reset,
                    palette.gray,
                    pair.path.join(" -> "),
                    palette.reset
                ),
            }
        }
        println!();
        println!(
            "{} reachable pairs across {} locations (longest {})",
            pairs.len(),
            table.locations().len(),
            format_metres(
                pairs
                    .iter()
                    .map(|pair| pair.distance)
                    .fold(0.0, f64::max)
            )
        );
        Ok(())
    }
}

/// Every reachable pair with location names in place of ids.
pub fn named_pairs(graph: &Graph, table: &AllPairs) -> Vec<NamedPair> {
    table
        .all_paths()
        .into_iter()
        .map(|pair| NamedPair {
            from: display_name(graph, pair.from),
            to: display_name(graph, pair.to),
            distance: pair.distance,
            path: graph.names_for(&pair.path),
        })
        .collect()
}

fn display_name(graph: &Graph, id: LocationId) -> String {
    graph
        .location_name(id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("<{id}>"))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{text}");
    Ok(())
}
