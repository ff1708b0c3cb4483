//! The graph model: labelled nodes, directed weighted edges and a static
//! heuristic table.

use std::collections::HashMap;
use std::fmt;

use crate::error::Error;
use crate::path::Path;
use crate::traits::{BeamPather, Pather};

/// Edge cost.
pub type Cost = u32;

/// Heuristic estimate used to rank candidates. Lower is better.
pub type Score = u32;

/// Dense index of a node, assigned in definition order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A directed edge as seen from its source node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub to: NodeId,
    pub cost: Cost,
}

#[derive(Clone, Debug)]
struct NodeData {
    label: String,
    heuristic: Score,
    edges: Vec<Edge>,
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// An immutable weighted directed graph with a per-node heuristic.
///
/// Built once through [`GraphBuilder`] and read-only afterwards, so it can be
/// shared freely between searches.
#[derive(Clone, Debug)]
pub struct Graph {
    nodes: Vec<NodeData>,
    by_label: HashMap<String, NodeId>,
}

impl Graph {
    /// Start building a new graph.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// The example graph used by the route-finding demo.
    ///
    /// ```text
    /// me -3-> B -4-> D -7-> you
    ///  |      `-5-> E -2----^
    ///  `-6-> C -9-> F
    /// ```
    pub fn reference() -> Graph {
        let built = Graph::builder()
            .node("me", 10)
            .node("B", 8)
            .node("C", 9)
            .node("D", 5)
            .node("E", 3)
            .node("F", 7)
            .node("you", 0)
            .edge("me", "B", 3)
            .edge("me", "C", 6)
            .edge("B", "D", 4)
            .edge("B", "E", 5)
            .edge("C", "F", 9)
            .edge("D", "you", 7)
            .edge("E", "you", 2)
            .build();
        match built {
            Ok(graph) => graph,
            Err(e) => unreachable!("reference graph is well-formed: {e}"),
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by label.
    pub fn node(&self, label: &str) -> Result<NodeId, Error> {
        self.by_label
            .get(label)
            .copied()
            .ok_or_else(|| Error::UnknownNode(label.to_owned()))
    }

    /// The label of `node`.
    pub fn label(&self, node: NodeId) -> Result<&str, Error> {
        self.data(node).map(|d| d.label.as_str())
    }

    /// Outgoing edges of `node` in definition order. Empty for sinks.
    pub fn neighbors(&self, node: NodeId) -> Result<&[Edge], Error> {
        self.data(node).map(|d| d.edges.as_slice())
    }

    /// The static heuristic estimate of `node`.
    pub fn heuristic(&self, node: NodeId) -> Result<Score, Error> {
        self.data(node).map(|d| d.heuristic)
    }

    /// All node ids in definition order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId(i as u32))
    }

    /// All edges as `(from, edge)` pairs, grouped by source in definition order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, Edge)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .flat_map(|(i, d)| d.edges.iter().map(move |&e| (NodeId(i as u32), e)))
    }

    /// Whether a direct edge `from -> to` exists.
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.neighbors(from)
            .map(|edges| edges.iter().any(|e| e.to == to))
            .unwrap_or(false)
    }

    /// Render a path with node labels, e.g. `me → B → E → you`.
    ///
    /// Ids that do not belong to this graph are shown in their `#n` form.
    pub fn format_path(&self, path: &Path) -> String {
        path.nodes()
            .iter()
            .map(|&n| match self.label(n) {
                Ok(label) => label.to_owned(),
                Err(_) => n.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" → ")
    }

    fn data(&self, node: NodeId) -> Result<&NodeData, Error> {
        self.nodes
            .get(node.index())
            .ok_or(Error::UnknownNodeId(node))
    }
}

impl Pather for Graph {
    #[inline]
    fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    fn neighbors(&self, node: NodeId, buf: &mut Vec<Edge>) {
        if let Some(d) = self.nodes.get(node.index()) {
            buf.extend_from_slice(&d.edges);
        }
    }
}

impl BeamPather for Graph {
    #[inline]
    fn estimate(&self, node: NodeId) -> Score {
        self.nodes.get(node.index()).map_or(Score::MAX, |d| d.heuristic)
    }
}

// ---------------------------------------------------------------------------
// GraphBuilder
// ---------------------------------------------------------------------------

/// Builder for [`Graph`]. Nodes and edges are recorded in call order; errors
/// are reported once, from [`build`](GraphBuilder::build).
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<(String, Score)>,
    edges: Vec<(String, String, Cost)>,
}

impl GraphBuilder {
    /// Define a node with its heuristic estimate.
    pub fn node(mut self, label: impl Into<String>, heuristic: Score) -> Self {
        self.nodes.push((label.into(), heuristic));
        self
    }

    /// Define a directed edge. Both endpoints must be defined as nodes by the
    /// time [`build`](GraphBuilder::build) is called.
    pub fn edge(mut self, from: impl Into<String>, to: impl Into<String>, cost: Cost) -> Self {
        self.edges.push((from.into(), to.into(), cost));
        self
    }

    pub fn build(self) -> Result<Graph, Error> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        let mut by_label = HashMap::with_capacity(self.nodes.len());

        for (label, heuristic) in self.nodes {
            let id = NodeId(nodes.len() as u32);
            if by_label.insert(label.clone(), id).is_some() {
                return Err(Error::DuplicateNode(label));
            }
            nodes.push(NodeData {
                label,
                heuristic,
                edges: Vec::new(),
            });
        }

        for (from, to, cost) in self.edges {
            let Some(&src) = by_label.get(&from) else {
                return Err(Error::UnknownNode(from));
            };
            let Some(&dst) = by_label.get(&to) else {
                return Err(Error::UnknownNode(to));
            };
            nodes[src.index()].edges.push(Edge { to: dst, cost });
        }

        log::debug!(
            "built graph with {} nodes and {} edges",
            nodes.len(),
            nodes.iter().map(|d| d.edges.len()).sum::<usize>()
        );

        Ok(Graph { nodes, by_label })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(g: &Graph, edges: &[Edge]) -> Vec<(String, Cost)> {
        edges
            .iter()
            .map(|e| (g.label(e.to).unwrap().to_owned(), e.cost))
            .collect()
    }

    #[test]
    fn reference_neighbors_keep_definition_order() {
        let g = Graph::reference();
        let me = g.node("me").unwrap();
        assert_eq!(
            labels(&g, g.neighbors(me).unwrap()),
            vec![("B".to_owned(), 3), ("C".to_owned(), 6)]
        );
        let b = g.node("B").unwrap();
        assert_eq!(
            labels(&g, g.neighbors(b).unwrap()),
            vec![("D".to_owned(), 4), ("E".to_owned(), 5)]
        );
    }

    #[test]
    fn sinks_have_no_neighbors() {
        let g = Graph::reference();
        for label in ["F", "you"] {
            let n = g.node(label).unwrap();
            assert!(g.neighbors(n).unwrap().is_empty());
        }
    }

    #[test]
    fn reference_heuristics() {
        let g = Graph::reference();
        let expected = [
            ("me", 10),
            ("B", 8),
            ("C", 9),
            ("D", 5),
            ("E", 3),
            ("F", 7),
            ("you", 0),
        ];
        for (label, h) in expected {
            assert_eq!(g.heuristic(g.node(label).unwrap()), Ok(h), "{label}");
        }
        assert_eq!(g.len(), 7);
        assert_eq!(g.edges().count(), 7);
    }

    #[test]
    fn unknown_nodes_are_rejected() {
        let g = Graph::reference();
        assert_eq!(g.node("Z"), Err(Error::UnknownNode("Z".into())));
        let bogus = NodeId(99);
        assert_eq!(g.neighbors(bogus), Err(Error::UnknownNodeId(bogus)));
        assert_eq!(g.heuristic(bogus), Err(Error::UnknownNodeId(bogus)));
        assert!(!Pather::contains(&g, bogus));
    }

    #[test]
    fn builder_rejects_duplicates_and_dangling_edges() {
        let dup = Graph::builder().node("a", 1).node("a", 2).build();
        assert_eq!(dup.unwrap_err(), Error::DuplicateNode("a".into()));

        let dangling = Graph::builder().node("a", 1).edge("a", "b", 1).build();
        assert_eq!(dangling.unwrap_err(), Error::UnknownNode("b".into()));
    }

    #[test]
    fn has_edge_and_format_path() {
        let g = Graph::reference();
        let id = |l| g.node(l).unwrap();
        assert!(g.has_edge(id("E"), id("you")));
        assert!(!g.has_edge(id("you"), id("E")));

        let path = Path::try_from(vec![id("me"), id("B"), id("E"), id("you")]).unwrap();
        assert_eq!(g.format_path(&path), "me → B → E → you");
    }
}
