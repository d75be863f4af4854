use std::{cmp::Ordering, fmt};

/// A directed edge record, either weighted or unweighted.
///
/// An unweighted edge means "weight absent", not "weight equal to some
/// default". Two edges are equal when their endpoints, their kind, and
/// their weight (if any) are all equal.
///
/// Edges handed out by [`OrderedGraph`](crate::OrderedGraph) queries are
/// detached copies, so mutating one never affects the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Edge<N, E> {
    /// Edge without a weight.
    Unweighted { from: N, to: N },
    /// Edge carrying a weight.
    Weighted { from: N, to: N, weight: E },
}

impl<N, E> Edge<N, E> {
    /// Builds the unweighted variant when `weight` is `None`
    /// and the weighted variant otherwise.
    pub fn new(from: N, to: N, weight: Option<E>) -> Self {
        match weight {
            Some(weight) => Self::Weighted { from, to, weight },
            None => Self::Unweighted { from, to },
        }
    }

    /// Source node of the edge.
    pub fn source(&self) -> &N {
        match self {
            Self::Unweighted { from, .. } | Self::Weighted { from, .. } => from,
        }
    }

    /// Destination node of the edge.
    pub fn target(&self) -> &N {
        match self {
            Self::Unweighted { to, .. } | Self::Weighted { to, .. } => to,
        }
    }

    /// Returns the source and destination nodes.
    pub fn nodes(&self) -> (&N, &N) {
        (self.source(), self.target())
    }

    pub fn is_weighted(&self) -> bool {
        matches!(self, Self::Weighted { .. })
    }

    /// Weight of the edge, or `None` for an unweighted edge.
    pub fn weight(&self) -> Option<&E> {
        match self {
            Self::Unweighted { .. } => None,
            Self::Weighted { weight, .. } => Some(weight),
        }
    }

    /// Text form of the edge, `from -> to | U` or `from -> to | W | weight`.
    pub fn print_edge(&self) -> String
    where
        N: fmt::Display,
        E: fmt::Display,
    {
        self.to_string()
    }

    /// Detached `(from, to, weight)` triple for this edge.
    pub fn to_value(&self) -> EdgeValue<N, E>
    where
        N: Clone,
        E: Clone,
    {
        EdgeValue {
            from: self.source().clone(),
            to: self.target().clone(),
            weight: self.weight().cloned(),
        }
    }

    /// Same edge kind and weight, with new endpoints.
    pub(crate) fn with_endpoints(&self, from: N, to: N) -> Self
    where
        E: Clone,
    {
        Self::new(from, to, self.weight().cloned())
    }

    /// True when this edge points at `dst` and its weight presence and
    /// value are exactly `weight`.
    pub(crate) fn matches(&self, dst: &N, weight: Option<&E>) -> bool
    where
        N: PartialEq,
        E: PartialEq,
    {
        self.target() == dst && self.weight() == weight
    }

    /// Relabels every endpoint equal to `old` as `new`.
    ///
    /// Returns true when at least one endpoint changed.
    pub(crate) fn relabel(&mut self, old: &N, new: &N) -> bool
    where
        N: PartialEq + Clone,
    {
        let (from, to) = match self {
            Self::Unweighted { from, to } | Self::Weighted { from, to, .. } => (from, to),
        };

        let mut changed = false;
        if from == old {
            *from = new.clone();
            changed = true;
        }
        if to == old {
            *to = new.clone();
            changed = true;
        }
        changed
    }

    /// Relabels the destination only, leaving the source untouched.
    pub(crate) fn retarget(&mut self, old: &N, new: &N) -> bool
    where
        N: PartialEq + Clone,
    {
        let to = match self {
            Self::Unweighted { to, .. } | Self::Weighted { to, .. } => to,
        };

        if to == old {
            *to = new.clone();
            true
        } else {
            false
        }
    }
}

/// Order of edges inside one node's outgoing collection.
///
/// Destination ascending, then unweighted before weighted, then weight
/// ascending. The source is ignored since every edge in a collection
/// shares it. Two edges of one collection compare `Equal` exactly when
/// they are equal edges, so the same comparator drives sorting,
/// duplicate detection, and de-duplication.
pub(crate) fn outgoing_order<N: Ord, E: Ord>(a: &Edge<N, E>, b: &Edge<N, E>) -> Ordering {
    a.target()
        .cmp(b.target())
        .then_with(|| a.is_weighted().cmp(&b.is_weighted()))
        .then_with(|| a.weight().cmp(&b.weight()))
}

impl<N: fmt::Display, E: fmt::Display> fmt::Display for Edge<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unweighted { from, to } => write!(f, "{from} -> {to} | U"),
            Self::Weighted { from, to, weight } => write!(f, "{from} -> {to} | W | {weight}"),
        }
    }
}

/// Detached `(from, to, weight)` triple yielded by cursors and iterators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeValue<N, E> {
    pub from: N,
    pub to: N,
    pub weight: Option<E>,
}

impl<N, E> From<Edge<N, E>> for EdgeValue<N, E> {
    fn from(edge: Edge<N, E>) -> Self {
        match edge {
            Edge::Unweighted { from, to } => Self {
                from,
                to,
                weight: None,
            },
            Edge::Weighted { from, to, weight } => Self {
                from,
                to,
                weight: Some(weight),
            },
        }
    }
}

impl<N, E> From<EdgeValue<N, E>> for Edge<N, E> {
    fn from(value: EdgeValue<N, E>) -> Self {
        Edge::new(value.from, value.to, value.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_edge_formats_both_kinds() {
        let weighted: Edge<&str, i32> = Edge::new("A", "B", Some(5));
        let unweighted: Edge<&str, i32> = Edge::new("A", "B", None);

        assert_eq!(weighted.print_edge(), "A -> B | W | 5");
        assert_eq!(unweighted.print_edge(), "A -> B | U");
        assert_eq!(weighted.to_string(), weighted.print_edge());
    }

    #[test]
    fn accessors_report_kind_weight_and_nodes() {
        let weighted: Edge<i32, i32> = Edge::new(1, 2, Some(3));
        let unweighted: Edge<i32, i32> = Edge::new(4, 4, None);

        assert!(weighted.is_weighted());
        assert_eq!(weighted.weight(), Some(&3));
        assert_eq!(weighted.nodes(), (&1, &2));

        assert!(!unweighted.is_weighted());
        assert_eq!(unweighted.weight(), None);
        assert_eq!(unweighted.nodes(), (&4, &4), "self loops are allowed");
    }

    #[test]
    fn equality_requires_same_kind_and_weight() {
        let a: Edge<i32, i32> = Edge::new(1, 2, Some(3));
        let b: Edge<i32, i32> = Edge::new(1, 2, Some(3));
        let c: Edge<i32, i32> = Edge::new(1, 2, Some(4));
        let d: Edge<i32, i32> = Edge::new(1, 2, None);
        let e: Edge<i32, i32> = Edge::new(2, 1, Some(3));

        assert_eq!(a, b);
        assert_ne!(a, c, "different weight");
        assert_ne!(a, d, "weighted vs unweighted");
        assert_ne!(a, e, "reversed endpoints");
    }

    #[test]
    fn outgoing_order_is_destination_then_kind_then_weight() {
        let mut edges: Vec<Edge<i32, i32>> = vec![
            Edge::new(1, 7, Some(2)),
            Edge::new(1, 12, Some(3)),
            Edge::new(1, 7, None),
            Edge::new(1, 1, Some(4)),
            Edge::new(1, 7, Some(1)),
        ];
        edges.sort_by(outgoing_order);

        let triples: Vec<_> = edges.iter().map(Edge::to_value).collect();
        let expected = vec![
            EdgeValue { from: 1, to: 1, weight: Some(4) },
            EdgeValue { from: 1, to: 7, weight: None },
            EdgeValue { from: 1, to: 7, weight: Some(1) },
            EdgeValue { from: 1, to: 7, weight: Some(2) },
            EdgeValue { from: 1, to: 12, weight: Some(3) },
        ];
        assert_eq!(triples, expected);
    }

    #[test]
    fn outgoing_order_equal_iff_edges_equal() {
        let a: Edge<i32, i32> = Edge::new(1, 2, Some(3));
        let b: Edge<i32, i32> = Edge::new(1, 2, Some(3));
        let c: Edge<i32, i32> = Edge::new(1, 2, None);

        assert_eq!(outgoing_order(&a, &b), Ordering::Equal);
        assert_eq!(outgoing_order(&c, &a), Ordering::Less);
        assert_eq!(outgoing_order(&a, &c), Ordering::Greater);
    }

    #[test]
    fn matches_checks_weight_presence_exactly() {
        let weighted: Edge<i32, i32> = Edge::new(1, 2, Some(3));
        let unweighted: Edge<i32, i32> = Edge::new(1, 2, None);

        assert!(weighted.matches(&2, Some(&3)));
        assert!(!weighted.matches(&2, None));
        assert!(!weighted.matches(&2, Some(&4)));
        assert!(unweighted.matches(&2, None));
        assert!(!unweighted.matches(&2, Some(&3)));
        assert!(!unweighted.matches(&3, None));
    }

    #[test]
    fn relabel_touches_both_endpoints_and_retarget_only_destination() {
        let mut edge: Edge<i32, i32> = Edge::new(1, 1, Some(9));
        assert!(edge.relabel(&1, &5));
        assert_eq!(edge.nodes(), (&5, &5));
        assert!(!edge.relabel(&1, &6), "nothing left to relabel");

        let mut edge: Edge<i32, i32> = Edge::new(1, 1, None);
        assert!(edge.retarget(&1, &5));
        assert_eq!(edge.nodes(), (&1, &5));
    }

    #[test]
    fn value_conversions_preserve_kind() {
        let edge: Edge<&str, i32> = Edge::new("x", "y", None);
        let value: EdgeValue<&str, i32> = edge.clone().into();
        assert_eq!(value, EdgeValue { from: "x", to: "y", weight: None });
        assert_eq!(Edge::from(value), edge);

        let copy = edge.to_value();
        assert_eq!(copy, edge.clone().into());
    }
}
