use geo::{Coord, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use hashbrown::HashMap;
use serde_json::json;

use crate::{Edge, Error, routing::PathResult};

impl PathResult {
    /// Converts the route to a `GeoJSON` Feature.
    ///
    /// A multi-node route becomes a `LineString`; a trivial route
    /// (origin equals destination) becomes a `Point`.
    pub fn to_geojson(&self) -> Result<Feature, Error> {
        let geometry = match self.coordinates.as_slice() {
            [] => {
                return Err(Error::GeoJsonError(
                    "route has no coordinates".to_string(),
                ));
            }
            [[x, y]] => Geometry::new(GeoJsonValue::from(&Point::new(*x, *y))),
            _ => Geometry::new(GeoJsonValue::from(&self.line_string())),
        };

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "mode": self.mode,
                "total_cost": self.total_cost,
                "ada_required": self.ada_required,
                "hazards_bypassed": self.hazards_bypassed,
                "path": self.path,
                "edges": self.edges,
            }
        });

        Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    /// One Feature per traversed street segment, carrying the segment's
    /// name, length and danger so a map can color the route.
    ///
    /// `edges` is any superset of the traversed edges, e.g. a store listing.
    pub fn segments_to_geojson(&self, edges: &[Edge]) -> Result<FeatureCollection, Error> {
        let by_id: HashMap<&str, &Edge> = edges.iter().map(|e| (e.id.as_str(), e)).collect();

        let features = self
            .edges
            .iter()
            .zip(self.coordinates.windows(2))
            .enumerate()
            .map(|(idx, (edge_id, pair))| {
                let edge = by_id
                    .get(edge_id.as_str())
                    .ok_or_else(|| Error::EdgeNotFound(edge_id.clone()))?;
                let [from, to] = [pair[0], pair[1]];
                let segment = LineString::new(vec![
                    Coord { x: from[0], y: from[1] },
                    Coord { x: to[0], y: to[1] },
                ]);

                let value = json!({
                    "type": "Feature",
                    "geometry": Geometry::new(GeoJsonValue::from(&segment)),
                    "properties": {
                        "segment_index": idx,
                        "edge_id": edge.id,
                        "name": edge.name,
                        "distance_m": edge.distance_m,
                        "danger_score": edge.danger_score,
                        "is_accessible": edge.is_accessible,
                    }
                });
                Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }
}
