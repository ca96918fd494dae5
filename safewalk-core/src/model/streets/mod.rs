//! Pedestrian street network model

pub mod components;

pub use components::{Edge, Node};
