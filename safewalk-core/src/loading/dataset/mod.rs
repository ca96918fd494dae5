//! Processing raw CSV street network data

mod de;
mod processor;
mod raw_types;

pub use de::open_dataset_file;
pub use processor::{read_edges, read_nodes};
pub use raw_types::{RawEdge, RawNode};
