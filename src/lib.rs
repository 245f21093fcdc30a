pub mod types;
pub mod util;
pub mod error;
pub mod graph;
pub mod cost;
pub mod heap;
pub mod bundle;
pub mod edge_heap;

pub use cost::{Cost, CostModel, FnCostModel};
pub use edge_heap::{EdgeHeap, HeapSnapshot};
pub use error::{CostKind, Error, Result};
pub use graph::{GraphBuilder, SparseGraph, StaticSparseGraph};
