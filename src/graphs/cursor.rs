use std::iter::FusedIterator;

use crate::graphs::{
    edge::EdgeValue,
    ordered::{Adjacency, OrderedGraph},
};

/// Position inside the flattened edge sequence of an [`OrderedGraph`].
///
/// The flattened sequence is the concatenation, over nodes in ascending
/// order, of each node's outgoing edges in their local order. A cursor is
/// either unset (the default), positioned at one edge, or at the end.
///
/// A cursor owns nothing and borrows nothing. It stays meaningful only
/// until the graph it came from is mutated; after that it must not be
/// used. Nothing detects a stale cursor.
///
/// Cursors order like the positions they denote, with the end greater
/// than every edge position and the unset cursor below all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    position: Position,
}

// Variant order is significant: it gives the derived `Ord` of `Cursor`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Position {
    #[default]
    Unset,
    /// Outer index into the node store, inner index into that node's edges.
    At { node: usize, edge: usize },
    End,
}

impl Cursor {
    pub(crate) const END: Cursor = Cursor {
        position: Position::End,
    };

    pub(crate) fn at(node: usize, edge: usize) -> Self {
        Self {
            position: Position::At { node, edge },
        }
    }

    /// True for the past-the-end position.
    pub fn is_end(&self) -> bool {
        self.position == Position::End
    }

    /// True for a default-constructed cursor that denotes no position.
    pub fn is_unset(&self) -> bool {
        self.position == Position::Unset
    }

    /// `(node, edge)` indices when the cursor denotes an edge.
    pub(crate) fn indices(&self) -> Option<(usize, usize)> {
        match self.position {
            Position::At { node, edge } => Some((node, edge)),
            Position::Unset | Position::End => None,
        }
    }
}

/// First edge of the first node at or after `node` with a non-empty
/// outgoing collection, or the end.
pub(crate) fn seek_forward<N, E>(store: &[Adjacency<N, E>], node: usize) -> Cursor {
    store
        .iter()
        .enumerate()
        .skip(node)
        .find(|(_, adjacency)| !adjacency.edges.is_empty())
        .map_or(Cursor::END, |(index, _)| Cursor::at(index, 0))
}

/// Next position in flattened order. The end and unset cursors stay put.
pub(crate) fn step_forward<N, E>(store: &[Adjacency<N, E>], cursor: Cursor) -> Cursor {
    let Some((node, edge)) = cursor.indices() else {
        return cursor;
    };

    let len = store.get(node).map_or(0, |adjacency| adjacency.edges.len());
    if edge + 1 < len {
        Cursor::at(node, edge + 1)
    } else {
        seek_forward(store, node + 1)
    }
}

/// Previous position in flattened order.
///
/// From the end this lands on the last edge of the last non-empty node.
/// There is no position before the first edge; retreating from it leaves
/// the cursor where it is.
pub(crate) fn step_back<N, E>(store: &[Adjacency<N, E>], cursor: Cursor) -> Cursor {
    let upto = match cursor.position {
        Position::Unset => return cursor,
        Position::At { node, edge } if edge > 0 => return Cursor::at(node, edge - 1),
        Position::At { node, .. } => node,
        Position::End => store.len(),
    };

    let previous = store[..upto.min(store.len())]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, adjacency)| !adjacency.edges.is_empty())
        .map(|(index, adjacency)| Cursor::at(index, adjacency.edges.len() - 1));

    previous.unwrap_or(cursor)
}

/// Lazy double-ended iterator over the edges of an [`OrderedGraph`].
///
/// Yields detached [`EdgeValue`] triples in flattened order. Built on a
/// front and a back [`Cursor`]; the back cursor is exclusive.
pub struct Iter<'a, N, E> {
    graph: &'a OrderedGraph<N, E>,
    front: Cursor,
    back: Cursor,
    remaining: usize,
}

impl<'a, N, E> Iter<'a, N, E> {
    pub(crate) fn new(graph: &'a OrderedGraph<N, E>, front: Cursor, remaining: usize) -> Self {
        Self {
            graph,
            front,
            back: Cursor::END,
            remaining,
        }
    }

    /// Position of the next edge [`Iterator::next`] would yield.
    pub fn cursor(&self) -> Cursor {
        self.front
    }
}

impl<N: Clone, E: Clone> Iterator for Iter<'_, N, E> {
    type Item = EdgeValue<N, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let value = self.graph.get(self.front)?;
        self.front = step_forward(self.graph.store(), self.front);
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<N: Clone, E: Clone> DoubleEndedIterator for Iter<'_, N, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.back = step_back(self.graph.store(), self.back);
        self.remaining -= 1;
        self.graph.get(self.back)
    }
}

impl<N: Clone, E: Clone> ExactSizeIterator for Iter<'_, N, E> {}

impl<N: Clone, E: Clone> FusedIterator for Iter<'_, N, E> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OrderedGraph<i32, i32> {
        // 1 has edges, 2 is empty, 3 has edges, 4 is empty.
        let mut g: OrderedGraph<i32, i32> = [1, 2, 3, 4].into();
        g.insert_edge(&1, &3, Some(2)).unwrap();
        g.insert_edge(&1, &1, None).unwrap();
        g.insert_edge(&3, &1, Some(7)).unwrap();
        g
    }

    #[test]
    fn default_cursors_compare_equal_only_to_each_other() {
        let g = sample();
        let a = Cursor::default();
        let b = Cursor::default();

        assert_eq!(a, b);
        assert!(a.is_unset());
        assert_ne!(a, g.begin());
        assert_ne!(a, g.end());
    }

    #[test]
    fn begin_skips_leading_empty_nodes() {
        let mut g: OrderedGraph<i32, i32> = [1, 2, 3].into();
        g.insert_edge(&3, &1, None).unwrap();

        assert_eq!(g.begin(), Cursor::at(2, 0));
        assert_eq!(
            g.get(g.begin()),
            Some(EdgeValue { from: 3, to: 1, weight: None })
        );
    }

    #[test]
    fn empty_graph_begin_equals_end() {
        let g: OrderedGraph<i32, i32> = OrderedGraph::new();
        assert_eq!(g.begin(), g.end());

        let only_nodes: OrderedGraph<i32, i32> = [1, 2].into();
        assert_eq!(only_nodes.begin(), only_nodes.end(), "nodes without edges");
    }

    #[test]
    fn forward_and_backward_steps_skip_empty_nodes() {
        let g = sample();
        let store = g.store();

        let first = g.begin();
        assert_eq!(first, Cursor::at(0, 0));

        let second = step_forward(store, first);
        assert_eq!(second, Cursor::at(0, 1));

        let third = step_forward(store, second);
        assert_eq!(third, Cursor::at(2, 0), "node 2 has no edges");

        assert!(step_forward(store, third).is_end(), "node 4 has no edges");
        assert!(step_forward(store, Cursor::END).is_end(), "end stays put");

        assert_eq!(step_back(store, Cursor::END), third);
        assert_eq!(step_back(store, third), second);
        assert_eq!(step_back(store, second), first);
    }

    #[test]
    fn unset_cursor_does_not_move() {
        let g = sample();
        let unset = Cursor::default();

        assert_eq!(step_forward(g.store(), unset), unset);
        assert_eq!(step_back(g.store(), unset), unset);
        assert_eq!(g.get(unset), None);
    }

    #[test]
    fn cursors_order_like_positions() {
        assert!(Cursor::at(0, 5) < Cursor::at(1, 0));
        assert!(Cursor::at(1, 0) < Cursor::at(1, 1));
        assert!(Cursor::at(9, 9) < Cursor::END);
        assert!(Cursor::default() < Cursor::at(0, 0));
    }

    #[test]
    fn iterator_runs_both_directions() {
        let g = sample();

        let forward: Vec<_> = g.iter().collect();
        let mut backward: Vec<_> = g.iter().rev().collect();
        backward.reverse();

        assert_eq!(forward.len(), 3);
        assert_eq!(forward, backward);
        assert_eq!(g.iter().len(), 3, "exact size");
    }

    #[test]
    fn iterator_meets_in_the_middle() {
        let g = sample();
        let mut it = g.iter();

        assert_eq!(it.next().map(|v| (v.from, v.to)), Some((1, 1)));
        assert_eq!(it.next_back().map(|v| (v.from, v.to)), Some((3, 1)));
        assert_eq!(it.next().map(|v| (v.from, v.to)), Some((1, 3)));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
        assert_eq!(it.cursor(), Cursor::at(2, 0), "front met back");
    }
}
