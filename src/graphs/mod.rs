pub mod cursor;
pub mod directed;
pub mod edge;
pub mod edges;
pub mod graph;
pub mod ordered;
pub mod vertices;
