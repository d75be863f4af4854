use crate::graphs::{edge::Edge, edges::ReadEdges};

/// Core abstraction for finite directed graphs over value vertices.
///
/// The trait focuses on structural access to outgoing collections and
/// degrees. Queries that can fail, such as asking about a vertex that is
/// not present, belong to the concrete graph type; here an absent vertex
/// simply has no edges.
pub trait Directed: ReadEdges {
    /// Returns all outgoing edges of the given source vertex, in the
    /// graph's local edge order.
    ///
    /// Empty when the vertex has no outgoing edges or is not present.
    fn outgoing(&self, source: &Self::Vertex) -> &[Edge<Self::Vertex, Self::Weight>];

    /// Returns the number of edges with the given source vertex.
    fn outgoing_degree(&self, vertex: &Self::Vertex) -> usize {
        self.outgoing(vertex).len()
    }

    /// Returns the number of edges with the given destination vertex.
    fn ingoing_degree(&self, vertex: &Self::Vertex) -> usize {
        self.all_edges()
            .filter(|edge| edge.target() == vertex)
            .count()
    }

    /// Returns the number of edges with the same source and destination vertex.
    fn loop_degree(&self, vertex: &Self::Vertex) -> usize {
        self.outgoing(vertex)
            .iter()
            .filter(|edge| edge.target() == vertex)
            .count()
    }
}

/// Returns an iterator over all edges whose source is `from`
/// and whose destination is `to`.
///
/// The edges come in the graph's local order, so for a graph that keeps
/// outgoing collections sorted the unweighted edge (if any) comes first.
pub fn connecting<'a, G>(
    g: &'a G,
    from: &G::Vertex,
    to: &'a G::Vertex,
) -> impl Iterator<Item = &'a Edge<G::Vertex, G::Weight>> + use<'a, G>
where
    G: Directed,
{
    g.outgoing(from)
        .iter()
        .filter(move |edge| edge.target() == to)
}
