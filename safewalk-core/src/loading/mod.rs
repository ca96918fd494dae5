//! This module is responsible for loading street network datasets
//! and building a graph store from them.

mod builder;
mod config;
pub mod dataset;

pub use builder::create_graph_store;
pub use config::DatasetConfig;
