use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{EdgeId, Error, MAX_DANGER, store::GraphStore};

/// Share of the previous score kept by a blend
const HISTORY_WEIGHT: f64 = 0.6;
/// Share of the new observation's severity
const OBSERVATION_WEIGHT: f64 = 0.4;
/// Decimal places kept in a blended score
const SCORE_PRECISION: i32 = 2;
/// Compare-and-swap attempts per edge before giving up
pub const MAX_BLEND_ATTEMPTS: usize = 5;

/// External severity signal about a named street
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardObservation {
    /// Case-insensitive fragment of the street name
    pub street: String,
    /// 1 (minor) to 100 (critical)
    pub severity: i64,
}

impl HazardObservation {
    pub fn new(street: impl Into<String>, severity: i64) -> Self {
        Self {
            street: street.into(),
            severity,
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if !(1..=100).contains(&self.severity) {
            return Err(Error::InvalidSeverity(self.severity));
        }
        if self.street.trim().is_empty() {
            return Err(Error::InvalidData(
                "Street name pattern must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DangerUpdate {
    pub edge_id: EdgeId,
    pub old_score: f64,
    pub new_score: f64,
}

/// Outcome of one hazard observation. Zero updates is a valid result.
///
/// Edges listed in `conflicts` were matched but left untouched, either
/// because they kept changing underneath or because they vanished; every
/// edge in `updates` has been committed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlendReport {
    pub updated_count: usize,
    pub updates: Vec<DangerUpdate>,
    #[serde(default)]
    pub conflicts: Vec<EdgeId>,
}

/// Exponential blend of an edge's danger score with a new severity,
/// rounded to two decimals and kept within `0..=100`.
/// A non-finite previous score counts as zero.
pub fn blend_score(old_score: f64, severity: i64) -> f64 {
    let old_score = if old_score.is_finite() { old_score } else { 0.0 };
    #[allow(clippy::cast_precision_loss)]
    let blended = HISTORY_WEIGHT * old_score + OBSERVATION_WEIGHT * severity as f64;
    crate::round_to(blended, SCORE_PRECISION).clamp(0.0, MAX_DANGER)
}

/// Blends `observation` into every edge whose name contains the street
/// pattern.
///
/// Each edge is updated with a versioned compare-and-swap: on conflict the
/// edge is re-read and the blend recomputed from its fresh score, so
/// concurrent observations compound instead of overwriting each other.
/// An edge that still conflicts after [`MAX_BLEND_ATTEMPTS`], or that was
/// removed meanwhile, is reported in [`BlendReport::conflicts`] and the
/// remaining edges are still blended, so the report always describes
/// exactly what was written.
///
/// # Errors
///
/// [`Error::InvalidSeverity`] / [`Error::InvalidData`] for a bad observation,
/// or a store failure while listing edges or writing.
pub fn apply_hazard_observation<S: GraphStore + ?Sized>(
    store: &S,
    observation: &HazardObservation,
) -> Result<BlendReport, Error> {
    observation.validate()?;

    let pattern = observation.street.trim();
    let matched: Vec<_> = store
        .list_edges()?
        .into_iter()
        .filter(|edge| edge.name_matches(pattern))
        .collect();

    if matched.is_empty() {
        debug!("No street matches '{pattern}', nothing to update");
    }

    let mut report = BlendReport::default();
    for edge in matched {
        match blend_edge(store, edge, observation.severity) {
            Ok(update) => {
                info!(
                    "Updated edge {} danger_score: {:.1} -> {:.1}",
                    update.edge_id, update.old_score, update.new_score
                );
                report.updates.push(update);
            }
            Err(Error::ConcurrentUpdate(id) | Error::EdgeNotFound(id)) => {
                warn!("Edge {id} left unchanged, it was modified or removed concurrently");
                report.conflicts.push(id);
            }
            Err(e) => return Err(e),
        }
    }
    report.updated_count = report.updates.len();

    Ok(report)
}

fn blend_edge<S: GraphStore + ?Sized>(
    store: &S,
    mut edge: crate::Edge,
    severity: i64,
) -> Result<DangerUpdate, Error> {
    for attempt in 1..=MAX_BLEND_ATTEMPTS {
        let new_score = blend_score(edge.danger_score, severity);
        if store.update_edge_danger(&edge.id, edge.version, new_score)? {
            return Ok(DangerUpdate {
                edge_id: edge.id,
                old_score: edge.danger_score,
                new_score,
            });
        }

        debug!(
            "Edge {} changed concurrently (attempt {attempt}/{MAX_BLEND_ATTEMPTS}), re-reading",
            edge.id
        );
        edge = store
            .get_edge(&edge.id)?
            .ok_or_else(|| Error::EdgeNotFound(edge.id.clone()))?;
    }

    Err(Error::ConcurrentUpdate(edge.id))
}
