//! Hazard observations and their effect on street danger scores

mod blend;

pub use blend::{
    BlendReport, DangerUpdate, HazardObservation, MAX_BLEND_ATTEMPTS, apply_hazard_observation,
    blend_score,
};
