use hashbrown::HashSet;
use log::{info, warn};

use super::config::DatasetConfig;
use super::dataset::{open_dataset_file, read_edges, read_nodes};
use crate::{Edge, Error, Node, store::InMemoryStore};

/// Creates an in-memory graph store from the configured dataset
///
/// # Errors
///
/// Returns an error if files are missing or unreadable, or ids repeat
pub fn create_graph_store(config: &DatasetConfig) -> Result<InMemoryStore, Error> {
    validate_config(config)?;

    info!("Loading intersections: {}", config.nodes_path.display());
    let nodes = read_nodes(open_dataset_file(&config.nodes_path)?)?;

    info!("Loading streets: {}", config.edges_path.display());
    let edges = read_edges(open_dataset_file(&config.edges_path)?)?;

    validate_edge_endpoints(&nodes, &edges);

    let store = InMemoryStore::from_parts(nodes, edges)?;
    info!(
        "Graph store ready: {} intersections, {} streets",
        store.node_count()?,
        store.edge_count()?
    );
    Ok(store)
}

fn validate_config(config: &DatasetConfig) -> Result<(), Error> {
    for path in [&config.nodes_path, &config.edges_path] {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Dataset file not found: {}", path.display()),
            )));
        }
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn validate_edge_endpoints(nodes: &[Node], edges: &[Edge]) {
    let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

    let dangling = edges
        .iter()
        .filter(|e| !known.contains(e.a.as_str()) || !known.contains(e.b.as_str()))
        .count();

    if dangling > 0 {
        let percentage = (dangling as f64 / edges.len() as f64) * 100.0;
        warn!(
            "{dangling} of {} streets ({percentage:.1}%) reference unknown intersections. \
        These streets will never be routable.",
            edges.len()
        );
    }
}
