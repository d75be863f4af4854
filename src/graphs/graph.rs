use crate::graphs::{edges::ReadEdges, vertices::Vertices};

/// High level abstraction for a finite graph.
///
/// Graph composes two separate components a vertex store and an edge store.
/// The Vertices type is responsible for describing the vertex set.
/// The Edges type is responsible for describing the edge set and structural
/// properties such as connectivity and degrees.
///
/// Concrete graph types can use a single structure for both roles, as
/// [`OrderedGraph`](crate::OrderedGraph) does, or separate structures.
pub trait Graph {
    /// Vertex storage component.
    type Vertices: Vertices;

    /// Edge storage component.
    type Edges: ReadEdges;

    /// Returns a shared reference to the edge storage.
    fn edge_store(&self) -> &Self::Edges;

    /// Returns a shared reference to the vertex storage.
    fn vertex_store(&self) -> &Self::Vertices;

    /// Size measure for the whole graph: vertices plus edges.
    fn size(&self) -> usize {
        self.vertex_store().vertex_count() + self.edge_store().edge_count()
    }

    /// Returns true when the graph is empty.
    ///
    /// Edges need both endpoints present, so this is the case exactly when
    /// there are no vertices.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}
