//! Ordered directed weighted graphs with value semantics.
//!
//! [`OrderedGraph`] stores unique node values in ascending order, each with
//! an ordered collection of outgoing [`Edge`]s that are either weighted or
//! unweighted. Copies are deep, output is deterministic, and a [`Cursor`]
//! walks every `(from, to, weight)` triple in both directions.
//!
//! ```
//! use ordgraph::OrderedGraph;
//!
//! let mut g: OrderedGraph<&str, i32> = ["A", "B", "C"].into();
//! g.insert_edge(&"A", &"B", Some(1))?;
//! g.insert_edge(&"A", &"C", Some(2))?;
//! g.insert_edge(&"B", &"C", Some(3))?;
//!
//! g.merge_replace_node(&"A", &"B")?;
//! assert_eq!(g.nodes(), vec!["B", "C"]);
//! assert_eq!(
//!     g.to_string(),
//!     "B (\n  B -> B | W | 1\n  B -> C | W | 2\n  B -> C | W | 3\n)\nC (\n)\n"
//! );
//! # Ok::<(), ordgraph::GraphError>(())
//! ```

pub mod error;
pub mod graphs;

pub use error::{GraphError, Result};
pub use graphs::{
    cursor::{Cursor, Iter},
    directed::{Directed, connecting},
    edge::{Edge, EdgeValue},
    edges::{Edges, ReadEdges},
    graph::Graph,
    ordered::{EdgeIter, NodeIter, OrderedGraph},
    vertices::Vertices,
};
