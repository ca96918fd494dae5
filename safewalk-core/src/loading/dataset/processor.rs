use std::io::Read;

use log::warn;

use super::{
    de::{deserialize_records, parse_flag, parse_number},
    raw_types::{RawEdge, RawNode},
};
use crate::{Edge, Error, Node};

/// Reads intersections from CSV with `id,lon,lat,name,tags` columns.
/// Rows without an id or with unusable coordinates are skipped.
pub fn read_nodes<R: Read>(reader: R) -> Result<Vec<Node>, Error> {
    let raw: Vec<RawNode> = deserialize_records(reader, "nodes")?;
    let total = raw.len();

    let nodes: Vec<Node> = raw.into_iter().filter_map(node_from_raw).collect();
    if nodes.len() < total {
        warn!("Dropped {} of {total} node rows", total - nodes.len());
    }
    Ok(nodes)
}

/// Reads street segments from CSV with
/// `id,a,b,name,distance_m,danger_score,base_weight,bidirectional,is_accessible`
/// columns. `distance_m` is required; everything after it may be blank.
pub fn read_edges<R: Read>(reader: R) -> Result<Vec<Edge>, Error> {
    let raw: Vec<RawEdge> = deserialize_records(reader, "edges")?;
    let total = raw.len();

    let edges: Vec<Edge> = raw.into_iter().filter_map(edge_from_raw).collect();
    if edges.len() < total {
        warn!("Dropped {} of {total} edge rows", total - edges.len());
    }
    Ok(edges)
}

fn node_from_raw(raw: RawNode) -> Option<Node> {
    if raw.id.is_empty() {
        return None;
    }
    let (Some(lon), Some(lat)) = (parse_number(&raw.lon, None), parse_number(&raw.lat, None))
    else {
        log::trace!("Node {} has invalid coordinates ({}, {})", raw.id, raw.lon, raw.lat);
        return None;
    };

    let tags = raw
        .tags
        .split(';')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>();

    Some(Node::new(raw.id, lon, lat).with_name(raw.name).with_tags(tags))
}

fn edge_from_raw(raw: RawEdge) -> Option<Edge> {
    if raw.id.is_empty() || raw.a.is_empty() || raw.b.is_empty() {
        return None;
    }

    let Some(distance_m) = parse_number(&raw.distance_m, None) else {
        log::trace!("Edge {} has invalid distance '{}'", raw.id, raw.distance_m);
        return None;
    };
    let danger_score = parse_number(&raw.danger_score, Some(0.0))?;
    let base_weight = parse_number(&raw.base_weight, Some(0.0))?;
    let bidirectional = parse_flag(&raw.bidirectional, true)?;
    let is_accessible = parse_flag(&raw.is_accessible, true)?;

    if distance_m <= 0.0 {
        warn!("Edge {} has non-positive distance {distance_m}", raw.id);
    }

    let mut edge = Edge::new(raw.id, raw.a, raw.b, distance_m)
        .with_name(raw.name)
        .with_danger(danger_score)
        .with_base_weight(base_weight);
    edge.bidirectional = bidirectional;
    edge.is_accessible = is_accessible;
    Some(edge)
}
