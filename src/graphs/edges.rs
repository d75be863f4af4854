use crate::graphs::edge::Edge;

/// Vertex and weight types shared by the edge-related traits.
///
/// Edges are [`Edge`] records over these two types: a directed pair of
/// vertices that may or may not carry a weight.
pub trait Edges {
    /// Type of the vertex values edges connect.
    type Vertex: Eq;

    /// Type of the optional edge weight.
    type Weight: Eq;
}

/// A graph that supports read-only access to its edges.
///
/// Edges can be enumerated via [`ReadEdges::all_edges`]. Self-loops and
/// several edges between one pair of vertices (differing in weight) are
/// permitted; the handling of anything beyond that is left to the
/// implementation.
pub trait ReadEdges: Edges {
    /// Iterator over all edges in the graph.
    ///
    /// The order of edges depends on the implementation, but should be stable
    /// for a given graph instance unless the graph is mutated.
    type Edges<'a>: Iterator<Item = &'a Edge<Self::Vertex, Self::Weight>>
    where
        Self: 'a,
        Self::Vertex: 'a,
        Self::Weight: 'a;

    /// Returns an iterator over all edges in the graph.
    fn all_edges(&self) -> Self::Edges<'_>;

    /// Returns the number of edges.
    fn edge_count(&self) -> usize {
        self.all_edges().count()
    }
}
