use std::{
    cmp::Ordering,
    fmt::{self, Display},
    slice,
};

use tracing::{debug, trace};

use crate::{
    error::{GraphError, Result},
    graphs::{
        cursor::{self, Cursor, Iter},
        directed::{Directed, connecting},
        edge::{Edge, EdgeValue, outgoing_order},
        edges::{Edges, ReadEdges},
        graph::Graph,
        vertices::Vertices,
    },
};

/// One node together with its outgoing edge collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Adjacency<N, E> {
    pub(crate) node: N,
    /// Kept sorted by [`outgoing_order`].
    pub(crate) edges: Vec<Edge<N, E>>,
}

impl<N, E> Adjacency<N, E> {
    fn new(node: N) -> Self {
        Self {
            node,
            edges: Vec::new(),
        }
    }
}

/// Directed weighted graph with value semantics and deterministic order.
///
/// Nodes are unique values kept in ascending order. Each node owns its
/// outgoing edges, kept sorted by destination, then unweighted before
/// weighted, then by weight. No node holds two equal edges and no edge
/// ever refers to a node that is not present.
///
/// The node store is one contiguous vector sorted by node, so node
/// lookups are binary searches and a [`Cursor`] is a plain pair of
/// indices into it. Cloning produces an independent deep copy.
///
/// ```text
/// (src, dst, weight)
/// (1, 1, 4)
/// (1, 7, -)
/// (1, 7, 2)
/// (1, 12, 3)
/// (7, 21, -)
/// (14, 14, 7)
/// ```
///
/// Every mutation invalidates all outstanding cursors. Nothing detects
/// a stale cursor; using one afterwards yields unspecified positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedGraph<N, E> {
    adjacency: Vec<Adjacency<N, E>>,
}

impl<N, E> Default for OrderedGraph<N, E> {
    /// Empty graph with no nodes and no edges.
    fn default() -> Self {
        Self {
            adjacency: Vec::new(),
        }
    }
}

impl<N, E> OrderedGraph<N, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty graph with room for `nodes` nodes before reallocating.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            adjacency: Vec::with_capacity(nodes),
        }
    }

    /// Removes all nodes and edges.
    pub fn clear(&mut self) {
        debug!(nodes = self.adjacency.len(), "clearing graph");
        self.adjacency.clear();
    }

    /// Cursor at the first edge of the first node that has any.
    ///
    /// Equal to [`OrderedGraph::end`] when the graph has no edges.
    pub fn begin(&self) -> Cursor {
        cursor::seek_forward(&self.adjacency, 0)
    }

    /// Past-the-end cursor.
    pub fn end(&self) -> Cursor {
        Cursor::END
    }

    /// Moves a cursor to the next edge in flattened order.
    ///
    /// Advancing the end cursor leaves it at the end.
    pub fn advance(&self, cursor: Cursor) -> Cursor {
        cursor::step_forward(&self.adjacency, cursor)
    }

    /// Moves a cursor to the previous edge in flattened order.
    ///
    /// Retreating from the end yields the last edge. Retreating from
    /// [`OrderedGraph::begin`] has no meaning and leaves the cursor unchanged.
    pub fn retreat(&self, cursor: Cursor) -> Cursor {
        cursor::step_back(&self.adjacency, cursor)
    }

    pub(crate) fn store(&self) -> &[Adjacency<N, E>] {
        &self.adjacency
    }

    fn total_edges(&self) -> usize {
        self.adjacency
            .iter()
            .map(|adjacency| adjacency.edges.len())
            .sum()
    }
}

impl<N: Clone, E: Clone> OrderedGraph<N, E> {
    /// Detached `(from, to, weight)` triple at the cursor.
    ///
    /// `None` for the end cursor and for an unset cursor.
    pub fn get(&self, cursor: Cursor) -> Option<EdgeValue<N, E>> {
        let (node, edge) = cursor.indices()?;
        let adjacency = self.adjacency.get(node)?;
        let edge = adjacency.edges.get(edge)?;

        Some(EdgeValue {
            from: adjacency.node.clone(),
            to: edge.target().clone(),
            weight: edge.weight().cloned(),
        })
    }

    /// Iterator over every edge in flattened order.
    pub fn iter(&self) -> Iter<'_, N, E> {
        Iter::new(self, self.begin(), self.total_edges())
    }

    /// All nodes in ascending order.
    pub fn nodes(&self) -> Vec<N> {
        self.adjacency
            .iter()
            .map(|adjacency| adjacency.node.clone())
            .collect()
    }
}

impl<N, E> OrderedGraph<N, E>
where
    N: Ord + Clone + Display,
    E: Ord + Clone + Display,
{
    /// Index of `value` in the node store, or where it would be inserted.
    fn locate(&self, value: &N) -> std::result::Result<usize, usize> {
        self.adjacency
            .binary_search_by(|adjacency| adjacency.node.cmp(value))
    }

    fn require(&self, operation: &'static str, value: &N) -> Result<usize> {
        self.locate(value)
            .map_err(|_| GraphError::node_not_found(operation, value))
    }

    /// True when a node equal to `value` is stored. O(log n).
    pub fn is_node(&self, value: &N) -> bool {
        self.locate(value).is_ok()
    }

    /// Adds `value` as a node with no edges.
    ///
    /// Returns false, changing nothing, when an equal node already exists.
    pub fn insert_node(&mut self, value: N) -> bool {
        match self.locate(&value) {
            Ok(_) => false,
            Err(slot) => {
                trace!(node = %value, "inserting node");
                self.adjacency.insert(slot, Adjacency::new(value));
                true
            }
        }
    }

    /// Adds the edge `src -> dst`, weighted when `weight` is present.
    ///
    /// Returns false when `src` already holds an equal edge, that is one
    /// with the same destination, weight presence, and weight. Self-loops
    /// are allowed.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] when `src` or `dst` is not a node.
    pub fn insert_edge(&mut self, src: &N, dst: &N, weight: Option<E>) -> Result<bool> {
        let source = self.require("insert_edge", src)?;
        self.require("insert_edge", dst)?;

        let edge = Edge::new(src.clone(), dst.clone(), weight);
        let edges = &mut self.adjacency[source].edges;

        match edges.binary_search_by(|probe| outgoing_order(probe, &edge)) {
            Ok(_) => Ok(false),
            Err(slot) => {
                trace!(edge = %edge, "inserting edge");
                edges.insert(slot, edge);
                Ok(true)
            }
        }
    }

    /// Renames node `old` to `new`, carrying every edge along.
    ///
    /// Outgoing edges of `old` become outgoing edges of `new` and every edge
    /// pointing at `old` points at `new` instead. This is a raw relabel: no
    /// de-duplication takes place, unlike
    /// [`OrderedGraph::merge_replace_node`].
    ///
    /// Returns false, changing nothing, when `new` is already a node.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] when `old` is not a node.
    pub fn replace_node(&mut self, old: &N, new: N) -> Result<bool> {
        let index = self.require("replace_node", old)?;
        if self.is_node(&new) {
            return Ok(false);
        }

        let mut moved = self.adjacency.remove(index);
        for edge in &mut moved.edges {
            edge.relabel(old, &new);
        }
        moved.edges.sort_by(outgoing_order);

        let relabelled = self.retarget_all(old, &new);

        let slot = match self.locate(&new) {
            Ok(slot) | Err(slot) => slot,
        };
        debug!(
            old = %old,
            new = %new,
            outgoing = moved.edges.len(),
            incoming = relabelled,
            "replaced node"
        );
        moved.node = new;
        self.adjacency.insert(slot, moved);

        Ok(true)
    }

    /// Fuses node `old` into node `new`.
    ///
    /// Every outgoing edge of `old` is re-homed under `new` and every edge
    /// pointing at `old` points at `new`. Former edges between the two
    /// become self-loops on `new`. Edges that end up equal within one
    /// outgoing collection are collapsed to one. `old` is then removed.
    ///
    /// ```text
    /// merge_replace_node(A, B)
    /// before: (A, B, 1), (A, C, 2), (A, D, 3), (B, B, 1)
    /// after:  (B, B, 1), (B, C, 2), (B, D, 3)
    /// ```
    ///
    /// Merging a node into itself changes nothing.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] when `old` or `new` is not a node.
    pub fn merge_replace_node(&mut self, old: &N, new: &N) -> Result<()> {
        let index = self.require("merge_replace_node", old)?;
        self.require("merge_replace_node", new)?;
        if old == new {
            return Ok(());
        }

        let removed = self.adjacency.remove(index);
        let target = self.require("merge_replace_node", new)?;

        let moved = removed.edges.len();
        let rehomed = removed.edges.iter().map(|edge| {
            let to = if edge.target() == old { new } else { edge.target() };
            edge.with_endpoints(new.clone(), to.clone())
        });
        self.adjacency[target].edges.extend(rehomed);

        let mut collapsed = 0;
        for (position, adjacency) in self.adjacency.iter_mut().enumerate() {
            let mut touched = position == target && moved > 0;
            for edge in &mut adjacency.edges {
                touched |= edge.retarget(old, new);
            }

            if touched {
                let before = adjacency.edges.len();
                adjacency.edges.sort_by(outgoing_order);
                adjacency
                    .edges
                    .dedup_by(|a, b| outgoing_order(a, b) == Ordering::Equal);
                collapsed += before - adjacency.edges.len();
            }
        }

        debug!(old = %old, new = %new, moved, collapsed, "merged node");
        Ok(())
    }

    /// Removes node `value` together with every edge into or out of it.
    ///
    /// Returns false when `value` is not a node.
    pub fn erase_node(&mut self, value: &N) -> bool {
        let Ok(index) = self.locate(value) else {
            return false;
        };

        let removed = self.adjacency.remove(index);
        let mut incoming = 0;
        for adjacency in &mut self.adjacency {
            let before = adjacency.edges.len();
            adjacency.edges.retain(|edge| edge.target() != value);
            incoming += before - adjacency.edges.len();
        }

        debug!(
            node = %value,
            outgoing = removed.edges.len(),
            incoming,
            "erased node"
        );
        true
    }

    /// Removes the edge `src -> dst` whose weight presence and value are
    /// exactly `weight`.
    ///
    /// Returns false when no such edge exists.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] when `src` or `dst` is not a node.
    pub fn erase_edge(&mut self, src: &N, dst: &N, weight: Option<&E>) -> Result<bool> {
        let source = self.require("erase_edge", src)?;
        self.require("erase_edge", dst)?;

        let edges = &mut self.adjacency[source].edges;
        match edges.iter().position(|edge| edge.matches(dst, weight)) {
            Some(position) => {
                let edge = edges.remove(position);
                trace!(edge = %edge, "erased edge");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes the edge at `cursor`.
    ///
    /// Returns a cursor at the edge that followed the removed one, or the
    /// end cursor when it was the last. Passing the end cursor (or an unset
    /// one) removes nothing and returns the end cursor.
    pub fn erase_edge_at(&mut self, cursor: Cursor) -> Cursor {
        let Some((node, edge)) = cursor.indices() else {
            return self.end();
        };
        let Some(adjacency) = self.adjacency.get_mut(node) else {
            return self.end();
        };
        if edge >= adjacency.edges.len() {
            return self.end();
        }

        let removed = adjacency.edges.remove(edge);
        trace!(edge = %removed, "erased edge at cursor");

        if edge < adjacency.edges.len() {
            Cursor::at(node, edge)
        } else {
            cursor::seek_forward(&self.adjacency, node + 1)
        }
    }

    /// Removes every edge in the half-open cursor range `[first, last)`.
    ///
    /// Returns a cursor at the edge `last` denoted before the removal, or
    /// the end cursor.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidRange`] when `first` comes after `last`.
    pub fn erase_edge_range(&mut self, first: Cursor, last: Cursor) -> Result<Cursor> {
        if first > last {
            return Err(GraphError::InvalidRange);
        }

        let mut count = 0usize;
        let mut position = first;
        while position != last && position.indices().is_some() {
            position = self.advance(position);
            count += 1;
        }

        if count == 0 {
            return Ok(last);
        }

        let mut position = first;
        for _ in 0..count {
            position = self.erase_edge_at(position);
        }

        debug!(count, "erased edge range");
        Ok(position)
    }

    /// True when at least one edge `src -> dst` exists, of any weight.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] when `src` or `dst` is not a node.
    pub fn is_connected(&self, src: &N, dst: &N) -> Result<bool> {
        self.require("is_connected", src)?;
        self.require("is_connected", dst)?;

        Ok(connecting(self, src, dst).next().is_some())
    }

    /// Copies of every edge `src -> dst`: the unweighted one first when
    /// present, then the weighted ones by ascending weight.
    ///
    /// Empty when both nodes exist but nothing connects them.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] when `src` or `dst` is not a node.
    pub fn edges(&self, src: &N, dst: &N) -> Result<Vec<Edge<N, E>>> {
        self.require("edges", src)?;
        self.require("edges", dst)?;

        Ok(connecting(self, src, dst).cloned().collect())
    }

    /// Cursor at the edge `src -> dst` with exactly `weight`, or the end
    /// cursor.
    ///
    /// A missing endpoint is not an error here; it is simply not found.
    pub fn find(&self, src: &N, dst: &N, weight: Option<&E>) -> Cursor {
        let Ok(source) = self.locate(src) else {
            return self.end();
        };
        if !self.is_node(dst) {
            return self.end();
        }

        let edges = &self.adjacency[source].edges;
        let start = edges.partition_point(|edge| edge.target() < dst);
        edges[start..]
            .iter()
            .take_while(|edge| edge.target() == dst)
            .position(|edge| edge.matches(dst, weight))
            .map_or(self.end(), |offset| Cursor::at(source, start + offset))
    }

    /// Destinations of every outgoing edge of `src`, in the order of its
    /// outgoing collection. A destination repeats once per parallel edge.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] when `src` is not a node.
    pub fn connections(&self, src: &N) -> Result<Vec<N>> {
        let source = self.require("connections", src)?;

        Ok(self.adjacency[source]
            .edges
            .iter()
            .map(|edge| edge.target().clone())
            .collect())
    }

    /// Points every edge aimed at `old` at `new` instead and restores the
    /// order of each collection that changed. Returns how many edges moved.
    fn retarget_all(&mut self, old: &N, new: &N) -> usize {
        let mut relabelled = 0;
        for adjacency in &mut self.adjacency {
            let before = relabelled;
            for edge in &mut adjacency.edges {
                if edge.retarget(old, new) {
                    relabelled += 1;
                }
            }
            if relabelled > before {
                adjacency.edges.sort_by(outgoing_order);
            }
        }
        relabelled
    }
}

impl<N, E> Display for OrderedGraph<N, E>
where
    N: Display,
    E: Display,
{
    /// One block per node in ascending order:
    ///
    /// ```text
    /// 1 (
    ///   1 -> 7 | U
    ///   1 -> 7 | W | 2
    /// )
    /// 7 (
    /// )
    /// ```
    ///
    /// An empty graph renders as nothing at all.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for adjacency in &self.adjacency {
            writeln!(f, "{} (", adjacency.node)?;
            for edge in &adjacency.edges {
                writeln!(f, "  {edge}")?;
            }
            writeln!(f, ")")?;
        }
        Ok(())
    }
}

impl<N, E> FromIterator<N> for OrderedGraph<N, E>
where
    N: Ord + Clone + Display,
    E: Ord + Clone + Display,
{
    /// Graph whose nodes are the given values; duplicates collapse.
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl<N, E> Extend<N> for OrderedGraph<N, E>
where
    N: Ord + Clone + Display,
    E: Ord + Clone + Display,
{
    fn extend<I: IntoIterator<Item = N>>(&mut self, iter: I) {
        for node in iter {
            self.insert_node(node);
        }
    }
}

impl<N, E, const K: usize> From<[N; K]> for OrderedGraph<N, E>
where
    N: Ord + Clone + Display,
    E: Ord + Clone + Display,
{
    fn from(nodes: [N; K]) -> Self {
        nodes.into_iter().collect()
    }
}

impl<'a, N: Clone, E: Clone> IntoIterator for &'a OrderedGraph<N, E> {
    type Item = EdgeValue<N, E>;
    type IntoIter = Iter<'a, N, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the nodes of an [`OrderedGraph`] in ascending order.
pub struct NodeIter<'a, N, E> {
    inner: slice::Iter<'a, Adjacency<N, E>>,
}

impl<'a, N, E> Iterator for NodeIter<'a, N, E> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|adjacency| &adjacency.node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Iterator over the stored edges of an [`OrderedGraph`] in flattened order.
pub struct EdgeIter<'a, N, E> {
    inner: std::iter::Flatten<slice::Iter<'a, Adjacency<N, E>>>,
}

impl<'a, N, E> IntoIterator for &'a Adjacency<N, E> {
    type Item = &'a Edge<N, E>;
    type IntoIter = slice::Iter<'a, Edge<N, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

impl<'a, N, E> Iterator for EdgeIter<'a, N, E> {
    type Item = &'a Edge<N, E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<N, E> Vertices for OrderedGraph<N, E> {
    type Vertex = N;

    type Vertices<'a>
        = NodeIter<'a, N, E>
    where
        Self: 'a;

    /// Nodes in ascending order.
    fn vertices(&self) -> Self::Vertices<'_> {
        NodeIter {
            inner: self.adjacency.iter(),
        }
    }

    /// Number of nodes.
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }
}

impl<N: Eq, E: Eq> Edges for OrderedGraph<N, E> {
    type Vertex = N;

    type Weight = E;
}

impl<N: Eq, E: Eq> ReadEdges for OrderedGraph<N, E> {
    type Edges<'a>
        = EdgeIter<'a, N, E>
    where
        Self: 'a;

    /// Stored edges in flattened order.
    fn all_edges(&self) -> Self::Edges<'_> {
        EdgeIter {
            inner: self.adjacency.iter().flatten(),
        }
    }

    /// Number of edges.
    fn edge_count(&self) -> usize {
        self.total_edges()
    }
}

impl<N: Ord, E: Eq> Directed for OrderedGraph<N, E> {
    fn outgoing(&self, source: &N) -> &[Edge<N, E>] {
        match self
            .adjacency
            .binary_search_by(|adjacency| adjacency.node.cmp(source))
        {
            Ok(index) => &self.adjacency[index].edges,
            Err(_) => &[],
        }
    }
}

impl<N: Eq, E: Eq> Graph for OrderedGraph<N, E> {
    type Vertices = Self;
    type Edges = Self;

    /// Access to the edge store.
    fn edge_store(&self) -> &Self::Edges {
        self
    }

    /// Access to the vertex store.
    fn vertex_store(&self) -> &Self::Vertices {
        self
    }
}
