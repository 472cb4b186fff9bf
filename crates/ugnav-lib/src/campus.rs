//! Campus map tables and how they are located on disk.
//!
//! A map is a JSON document:
//!
//! ```json
//! {
//!   "directed": true,
//!   "locations": [{ "id": 0, "name": "Main Gate" }],
//!   "edges": [{ "from": 0, "to": 1, "distance": 50.0 }]
//! }
//! ```
//!
//! When no map file is found the built-in University of Ghana table is used.

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{Graph, GraphMode, Location, LocationId};

/// Environment variable naming a campus map file.
pub const MAP_ENV_VAR: &str = "UGNAV_MAP";

/// Filename looked up in the platform config directory.
const MAP_FILENAME: &str = "campus.json";

/// Declared edge in a campus map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEdge {
    pub from: LocationId,
    pub to: LocationId,
    /// Walking distance in metres.
    pub distance: f64,
}

/// Declarative location and edge table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampusMap {
    #[serde(default = "default_directed")]
    pub directed: bool,
    pub locations: Vec<Location>,
    #[serde(default)]
    pub edges: Vec<MapEdge>,
}

fn default_directed() -> bool {
    true
}

/// Where a campus map was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapSource {
    /// Path given explicitly by the caller.
    Explicit(PathBuf),
    /// Path taken from [`MAP_ENV_VAR`].
    Environment(PathBuf),
    /// `campus.json` in the platform config directory.
    ConfigDir(PathBuf),
    /// The compiled-in campus table.
    BuiltIn,
}

impl MapSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            MapSource::Explicit(path) | MapSource::Environment(path) | MapSource::ConfigDir(path) => {
                Some(path)
            }
            MapSource::BuiltIn => None,
        }
    }
}

impl std::fmt::Display for MapSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{}", path.display()),
            None => f.write_str("built-in campus map"),
        }
    }
}

const UG_LOCATIONS: &[(LocationId, &str)] = &[
    (0, "Engineering School"),
    (1, "CS Department"),
    (2, "Law Faculty"),
    (3, "JQB"),
    (4, "Main Gate"),
    (5, "School of Performing Arts"),
    (6, "Math Department"),
    (7, "Balme Library"),
    (8, "UGCS"),
    (9, "Business School"),
    (10, "Volta Hall"),
    (11, "Commonwealth"),
    (12, "Great Hall"),
    (13, "Akuafo Hall"),
    (14, "Legon Hall"),
    (15, "Bush Canteen"),
    (16, "Sarbah Park"),
    (17, "Fire Station"),
    (18, "Banking Square"),
    (19, "Night Market"),
    (20, "Basic School"),
    (21, "Diaspora Halls"),
];

const UG_EDGES: &[(LocationId, LocationId, f64)] = &[
    (0, 1, 270.12),
    (0, 2, 420.88),
    (0, 3, 502.43),
    (1, 2, 346.45),
    (2, 3, 289.39),
    (1, 6, 208.65),
    (6, 8, 653.88),
    (8, 9, 407.81),
    (9, 10, 346.82),
    (10, 11, 536.69),
    (11, 12, 586.81),
    (4, 5, 50.00),
    (5, 7, 992.04),
    (8, 7, 269.71),
    (7, 13, 316.59),
    (7, 11, 520.00),
    (5, 13, 701.74),
    (7, 14, 586.81),
    (14, 13, 100.00),
    (14, 20, 1015.00),
    (14, 16, 500.00),
    (13, 16, 200.00),
    (20, 19, 591.36),
    (19, 21, 645.28),
    (19, 18, 957.14),
    (15, 17, 122.85),
    (17, 18, 957.14),
    (4, 0, 800.00),
    (4, 3, 750.00),
    (3, 6, 400.00),
    (12, 13, 300.00),
    (12, 14, 400.00),
    (16, 15, 350.00),
    (21, 20, 800.00),
    (18, 15, 600.00),
];

static UG_CAMPUS: Lazy<CampusMap> = Lazy::new(|| CampusMap {
    directed: true,
    locations: UG_LOCATIONS
        .iter()
        .map(|(id, name)| Location::new(*id, *name))
        .collect(),
    edges: UG_EDGES
        .iter()
        .map(|(from, to, distance)| MapEdge {
            from: *from,
            to: *to,
            distance: *distance,
        })
        .collect(),
});

impl CampusMap {
    /// The built-in University of Ghana campus table.
    pub fn university_of_ghana() -> Self {
        UG_CAMPUS.clone()
    }

    /// Parse a map from JSON text and validate it.
    pub fn from_json(text: &str) -> Result<Self> {
        let map: CampusMap = serde_json::from_str(text)?;
        map.validate()?;
        Ok(map)
    }

    /// Read, parse, and validate a map file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::MapRead {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::from_json(&text)?;
        debug!(
            "loaded campus map {} ({} locations, {} edges)",
            path.display(),
            map.locations.len(),
            map.edges.len()
        );
        Ok(map)
    }

    /// Reject duplicate ids, undeclared edge endpoints, and non-finite distances.
    pub fn validate(&self) -> Result<()> {
        let mut names: HashMap<LocationId, &str> = HashMap::new();
        for location in &self.locations {
            if let Some(first) = names.insert(location.id, &location.name) {
                return Err(Error::DuplicateLocation {
                    id: location.id,
                    first: first.to_string(),
                    second: location.name.clone(),
                });
            }
        }

        for edge in &self.edges {
            for endpoint in [edge.from, edge.to] {
                if !names.contains_key(&endpoint) {
                    return Err(Error::UnknownEdgeEndpoint { id: endpoint });
                }
            }
            if !edge.distance.is_finite() {
                return Err(Error::InvalidWeight {
                    from: edge.from,
                    to: edge.to,
                    distance: edge.distance,
                });
            }
        }

        Ok(())
    }

    pub fn mode(&self) -> GraphMode {
        if self.directed {
            GraphMode::Directed
        } else {
            GraphMode::Undirected
        }
    }

    /// Build the search graph. Locations without edges are still registered.
    pub fn build_graph(&self) -> Graph {
        let mut graph = Graph::new(self.mode());
        let by_id: HashMap<LocationId, &Location> = self
            .locations
            .iter()
            .map(|location| (location.id, location))
            .collect();

        for location in &self.locations {
            graph.add_location(location);
        }

        for edge in &self.edges {
            let (Some(from), Some(to)) = (by_id.get(&edge.from), by_id.get(&edge.to)) else {
                continue;
            };
            graph.add_edge(from, to, edge.distance);
        }

        graph
    }
}

/// Graph of the built-in campus table.
pub fn campus_graph() -> Graph {
    UG_CAMPUS.build_graph()
}

/// `campus.json` inside the platform-specific config directory.
pub fn default_map_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("gh", "ugnavigate", "ugnav").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.config_dir().join(MAP_FILENAME))
}

/// Decide where the campus map comes from.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `UGNAV_MAP` environment variable.
/// 3. `campus.json` in the platform config directory, if it exists.
/// 4. The built-in campus table.
pub fn resolve_map_source(target: Option<&Path>) -> MapSource {
    let config_candidate = match default_map_path() {
        Ok(path) => Some(path),
        Err(err) => {
            debug!("{err}; skipping config directory lookup");
            None
        }
    };
    resolve_map_source_from(target, env::var_os(MAP_ENV_VAR), config_candidate)
}

fn resolve_map_source_from(
    target: Option<&Path>,
    env_value: Option<OsString>,
    config_candidate: Option<PathBuf>,
) -> MapSource {
    if let Some(explicit) = target {
        return MapSource::Explicit(explicit.to_path_buf());
    }

    if let Some(value) = env_value.filter(|value| !value.is_empty()) {
        return MapSource::Environment(PathBuf::from(value));
    }

    match config_candidate {
        Some(path) if path.is_file() => MapSource::ConfigDir(path),
        _ => MapSource::BuiltIn,
    }
}

/// Resolve, load, and build the campus graph.
pub fn load_campus(target: Option<&Path>) -> Result<(Graph, MapSource)> {
    let source = resolve_map_source(target);
    let map = match source.path() {
        Some(path) => CampusMap::load(path)?,
        None => CampusMap::university_of_ghana(),
    };
    info!("using {}", source);
    Ok((map.build_graph(), source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_map_is_valid() {
        let map = CampusMap::university_of_ghana();
        assert!(map.validate().is_ok());
        assert_eq!(map.locations.len(), 22);
        assert_eq!(map.edges.len(), 35);
    }

    #[test]
    fn campus_graph_is_directed() {
        let graph = campus_graph();
        assert!(graph.is_directed());
        assert_eq!(graph.edge_weight(4, 5), Some(50.0));
        assert_eq!(graph.edge_weight(5, 4), None);
    }

    #[test]
    fn from_json_defaults_to_directed() {
        let map = CampusMap::from_json(
            r#"{"locations":[{"id":1,"name":"A"},{"id":2,"name":"B"}],
                "edges":[{"from":1,"to":2,"distance":3.5}]}"#,
        )
        .expect("valid map");
        assert!(map.directed);
        let graph = map.build_graph();
        assert_eq!(graph.edge_weight(1, 2), Some(3.5));
        assert!(!graph.has_edge(2, 1));
    }

    #[test]
    fn undirected_map_mirrors_edges() {
        let map = CampusMap::from_json(
            r#"{"directed":false,"locations":[{"id":1,"name":"A"},{"id":2,"name":"B"}],
                "edges":[{"from":1,"to":2,"distance":3.0}]}"#,
        )
        .expect("valid map");
        assert_eq!(map.build_graph().edge_weight(2, 1), Some(3.0));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = CampusMap::from_json(
            r#"{"locations":[{"id":1,"name":"A"},{"id":1,"name":"B"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateLocation { id: 1, .. }));
    }

    #[test]
    fn undeclared_endpoint_is_rejected() {
        let err = CampusMap::from_json(
            r#"{"locations":[{"id":1,"name":"A"}],
                "edges":[{"from":1,"to":9,"distance":1.0}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownEdgeEndpoint { id: 9 }));
    }

    #[test]
    fn non_finite_distance_is_rejected() {
        let mut map = CampusMap::university_of_ghana();
        map.edges[0].distance = f64::NAN;
        assert!(matches!(map.validate(), Err(Error::InvalidWeight { .. })));
    }

    #[test]
    fn isolated_locations_are_kept() {
        let map = CampusMap::from_json(r#"{"locations":[{"id":5,"name":"Lonely"}]}"#)
            .expect("valid map");
        let graph = map.build_graph();
        assert_eq!(graph.len(), 1);
        assert!(graph.neighbours(5).is_empty());
    }

    #[test]
    fn explicit_path_wins() {
        let source = resolve_map_source_from(
            Some(Path::new("/tmp/explicit.json")),
            Some(OsString::from("/tmp/env.json")),
            None,
        );
        assert_eq!(source, MapSource::Explicit(PathBuf::from("/tmp/explicit.json")));
    }

    #[test]
    fn environment_beats_config_dir() {
        let source = resolve_map_source_from(None, Some(OsString::from("/tmp/env.json")), None);
        assert_eq!(source, MapSource::Environment(PathBuf::from("/tmp/env.json")));
    }

    #[test]
    fn empty_environment_value_is_ignored() {
        let source = resolve_map_source_from(None, Some(OsString::new()), None);
        assert_eq!(source, MapSource::BuiltIn);
    }

    #[test]
    fn missing_config_file_falls_back_to_built_in() {
        let source = resolve_map_source_from(
            None,
            None,
            Some(PathBuf::from("/definitely/not/here/campus.json")),
        );
        assert_eq!(source, MapSource::BuiltIn);
        assert_eq!(source.to_string(), "built-in campus map");
    }

    #[test]
    fn existing_config_file_is_used() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("campus.json");
        fs::write(&path, r#"{"locations":[]}"#).expect("write map");

        let source = resolve_map_source_from(None, None, Some(path.clone()));
        assert_eq!(source, MapSource::ConfigDir(path));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = CampusMap::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::MapRead { .. }));
    }
}
