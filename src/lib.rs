//! Safety-weighted pedestrian routing.
//!
//! Re-exports the routing core and adds batch operations that share one
//! graph snapshot across many searches.

pub use safewalk_core::prelude;
pub use safewalk_core::prelude::*;

pub mod matrix;

pub use matrix::{CostMatrix, cost_matrix};
