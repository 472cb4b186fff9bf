mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ugnav_cli::output::OutputFormat;
use ugnav_lib::{load_campus, OptimizerConfig, RouteRequest};

use commands::listing::{handle_all_pairs_command, handle_locations_command};
use commands::route::{
    handle_alternatives_command, handle_compare_command, handle_route_command,
    AlternativeStrategy,
};
use commands::traffic::handle_traffic_command;

#[derive(Parser, Debug)]
#[command(author, version, about = "University of Ghana campus route planner")]
struct Cli {
    /// Campus map JSON file. Falls back to UGNAV_MAP, then the config directory,
    /// then the built-in campus table.
    #[arg(long, global = true)]
    map: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Weight applied to distance when scoring candidates.
    #[arg(long, global = true)]
    distance_weight: Option<f64>,

    /// Weight applied to travel time when scoring candidates.
    #[arg(long, global = true)]
    time_weight: Option<f64>,

    /// Walking speed in metres per second.
    #[arg(long, global = true)]
    speed: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

/// Start and destination shared by the route-planning subcommands.
#[derive(Args, Debug, Clone)]
struct RouteArgs {
    /// Starting location name.
    #[arg(long = "from")]
    from: String,
    /// Destination location name.
    #[arg(long = "to")]
    to: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every algorithm and report the optimal route.
    Route {
        #[command(flatten)]
        route: RouteArgs,
        /// Landmark to pass through; may be repeated.
        #[arg(long = "via")]
        via: Vec<String>,
    },
    /// List distinct alternative routes, shortest first.
    Alternatives {
        #[command(flatten)]
        route: RouteArgs,
        /// Number of routes to return (at most 3).
        #[arg(long, default_value_t = 3)]
        count: usize,
        /// Search used to produce the alternatives.
        #[arg(long, value_enum, default_value_t = AlternativeStrategy::AStar)]
        strategy: AlternativeStrategy,
    },
    /// Show each algorithm's candidate side by side.
    Compare {
        #[command(flatten)]
        route: RouteArgs,
        /// Landmark to pass through; may be repeated.
        #[arg(long = "via")]
        via: Vec<String>,
    },
    /// Re-rank routes with travel times scaled by a traffic factor.
    Traffic {
        #[command(flatten)]
        route: RouteArgs,
        /// Multiplier applied to every route's travel time.
        #[arg(long)]
        factor: f64,
    },
    /// List every location on the campus map.
    Locations,
    /// Print shortest distances between every reachable pair.
    AllPairs,
}

impl Cli {
    fn optimizer_config(&self) -> Result<OptimizerConfig> {
        let defaults = OptimizerConfig::default();
        let config = OptimizerConfig {
            distance_weight: self.distance_weight.unwrap_or(defaults.distance_weight),
            time_weight: self.time_weight.unwrap_or(defaults.time_weight),
            speed: self.speed.unwrap_or(defaults.speed),
        };
        config.validate().context("invalid scoring options")?;
        Ok(config)
    }

    fn request(&self, route: &RouteArgs, via: &[String]) -> Result<RouteRequest> {
        Ok(RouteRequest::new(route.from.clone(), route.to.clone())
            .with_waypoints(via.iter().cloned())
            .with_config(self.optimizer_config()?))
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let (graph, source) = load_campus(cli.map.as_deref()).context("failed to load campus map")?;
    tracing::debug!(
        "campus map from {} ({} locations, {} edges)",
        source,
        graph.len(),
        graph.edge_count()
    );

    let format = cli.format;
    match &cli.command {
        Command::Route { route, via } => {
            handle_route_command(&graph, &cli.request(route, via)?, format)
        }
        Command::Alternatives {
            route,
            count,
            strategy,
        } => handle_alternatives_command(
            &graph,
            &cli.request(route, &[])?,
            *count,
            *strategy,
            format,
        ),
        Command::Compare { route, via } => {
            handle_compare_command(&graph, &cli.request(route, via)?, format)
        }
        Command::Traffic { route, factor } => {
            handle_traffic_command(&graph, &cli.request(route, &[])?, *factor, format)
        }
        Command::Locations => handle_locations_command(&graph, format),
        Command::AllPairs => handle_all_pairs_command(&graph, format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
