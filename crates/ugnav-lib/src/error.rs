use std::path::PathBuf;

use thiserror::Error;

use crate::graph::LocationId;

/// Convenient result alias for the UG Navigate library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// A missing path between two locations is not an error: searches report it
/// through an empty [`PathResult`](crate::path::PathResult) instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a location name could not be found in the graph.
    #[error("unknown location name: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a campus map declares the same location id twice.
    #[error("duplicate location id {id} in campus map ({first} and {second})")]
    DuplicateLocation {
        id: LocationId,
        first: String,
        second: String,
    },

    /// Raised when a campus map edge references a location that was never declared.
    #[error("campus map edge references undeclared location id {id}")]
    UnknownEdgeEndpoint { id: LocationId },

    /// Raised when a campus map edge carries a NaN or infinite distance.
    #[error("edge {from} -> {to} has non-finite distance {distance}")]
    InvalidWeight {
        from: LocationId,
        to: LocationId,
        distance: f64,
    },

    /// Raised when a traffic multiplier is not a positive finite number.
    #[error("traffic factor must be positive and finite, got {factor}")]
    InvalidTrafficFactor { factor: f64 },

    /// Raised when optimizer settings fail validation.
    #[error("invalid optimizer configuration: {message}")]
    InvalidConfig { message: String },

    /// Raised when a report is requested for a route without any locations.
    #[error("route was empty")]
    EmptyRoute,

    /// Raised when the campus map file could not be read.
    #[error("failed to read campus map at {path}: {source}")]
    MapRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the campus map")]
    ProjectDirsUnavailable,

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
