use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use hashbrown::HashMap;
use itertools::Itertools;

use super::{GraphStore, missing_edge};
use crate::{Edge, EdgeId, Error, Node, NodeId};

#[derive(Debug, Default)]
struct Collections {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_index: HashMap<NodeId, usize>,
    edge_index: HashMap<EdgeId, usize>,
}

/// Insertion-ordered store kept entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from complete node and edge sets
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if node or edge ids repeat
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, Error> {
        if let Some(id) = nodes.iter().map(|n| &n.id).duplicates().next() {
            return Err(Error::InvalidData(format!("Duplicate node id '{id}'")));
        }
        if let Some(id) = edges.iter().map(|e| &e.id).duplicates().next() {
            return Err(Error::InvalidData(format!("Duplicate edge id '{id}'")));
        }

        let node_index = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id.clone(), idx))
            .collect();
        let edge_index = edges
            .iter()
            .enumerate()
            .map(|(idx, edge)| (edge.id.clone(), idx))
            .collect();

        Ok(Self {
            inner: RwLock::new(Collections {
                nodes,
                edges,
                node_index,
                edge_index,
            }),
        })
    }

    /// Inserts a node, replacing any node with the same id in place
    pub fn upsert_node(&self, node: Node) -> Result<(), Error> {
        let mut inner = self.write()?;
        match inner.node_index.get(&node.id).copied() {
            Some(idx) => inner.nodes[idx] = node,
            None => {
                let idx = inner.nodes.len();
                inner.node_index.insert(node.id.clone(), idx);
                inner.nodes.push(node);
            }
        }
        Ok(())
    }

    /// Inserts an edge, replacing any edge with the same id in place
    pub fn upsert_edge(&self, edge: Edge) -> Result<(), Error> {
        let mut inner = self.write()?;
        match inner.edge_index.get(&edge.id).copied() {
            Some(idx) => inner.edges[idx] = edge,
            None => {
                let idx = inner.edges.len();
                inner.edge_index.insert(edge.id.clone(), idx);
                inner.edges.push(edge);
            }
        }
        Ok(())
    }

    pub fn node_count(&self) -> Result<usize, Error> {
        Ok(self.read()?.nodes.len())
    }

    pub fn edge_count(&self) -> Result<usize, Error> {
        Ok(self.read()?.edges.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, Error> {
        self.inner
            .read()
            .map_err(|_| Error::Store("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, Error> {
        self.inner
            .write()
            .map_err(|_| Error::Store("store lock poisoned".to_string()))
    }
}

impl GraphStore for InMemoryStore {
    fn list_nodes(&self) -> Result<Vec<Node>, Error> {
        Ok(self.read()?.nodes.clone())
    }

    fn list_edges(&self) -> Result<Vec<Edge>, Error> {
        Ok(self.read()?.edges.clone())
    }

    fn get_edge(&self, id: &str) -> Result<Option<Edge>, Error> {
        let inner = self.read()?;
        Ok(inner.edge_index.get(id).map(|&idx| inner.edges[idx].clone()))
    }

    fn update_edge_danger(
        &self,
        id: &str,
        expected_version: u64,
        new_score: f64,
    ) -> Result<bool, Error> {
        let mut inner = self.write()?;
        let idx = *inner.edge_index.get(id).ok_or_else(|| missing_edge(id))?;
        let edge = &mut inner.edges[idx];

        if edge.version != expected_version {
            return Ok(false);
        }

        edge.danger_score = new_score;
        edge.version += 1;
        edge.updated_at = Some(Utc::now());
        Ok(true)
    }
}
