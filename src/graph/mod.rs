//! Graph representation module

pub mod builder;
pub mod compressed;
pub mod dangling;

pub use builder::GraphBuilder;
pub use compressed::{Airport, RouteGraph};
pub use dangling::compute_dangling_set;
