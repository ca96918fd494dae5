//! Data model for pedestrian safety routing
//!
//! Contains the street network records as they live in a graph store.

pub mod streets;

pub use streets::{Edge, Node};
