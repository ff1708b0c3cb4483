use crate::error::Error;
use crate::graph::{NodeId, Score};

/// A walk through the graph, starting at the search's start node.
///
/// Never empty. Nodes may repeat: no cycle check is applied when a path is
/// extended.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<NodeId>"))]
pub struct Path(Vec<NodeId>);

impl Path {
    /// A one-node path.
    pub fn single(node: NodeId) -> Self {
        Self(vec![node])
    }

    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    #[inline]
    pub fn first(&self) -> NodeId {
        self.0[0]
    }

    #[inline]
    pub fn last(&self) -> NodeId {
        self.0[self.0.len() - 1]
    }

    /// Number of nodes (one more than the number of edges walked).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: every constructor rejects an empty node list.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.0.contains(&node)
    }

    /// A copy of this path extended by one node.
    pub fn extended(&self, node: NodeId) -> Self {
        let mut nodes = Vec::with_capacity(self.0.len() + 1);
        nodes.extend_from_slice(&self.0);
        nodes.push(node);
        Self(nodes)
    }

    /// Consecutive `(from, to)` pairs along the path.
    pub fn steps(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }
}

impl TryFrom<Vec<NodeId>> for Path {
    type Error = Error;

    fn try_from(nodes: Vec<NodeId>) -> Result<Self, Error> {
        if nodes.is_empty() {
            return Err(Error::EmptyPath);
        }
        Ok(Self(nodes))
    }
}

/// A scored frontier entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub score: Score,
    pub path: Path,
}

/// The frontier and explored set as they stand before a round expands.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// 1-based round number.
    pub round: usize,
    pub frontier: Vec<Candidate>,
    /// Nodes expanded so far, in the order they were first expanded.
    pub explored: Vec<NodeId>,
}

/// Terminal result of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// A path from start to goal.
    Found(Path),
    /// The frontier ran dry (or the round limit was hit) before the goal
    /// was reached.
    NoRoute,
}

impl Outcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::NoRoute => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::NoRoute => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_leaves_original_untouched() {
        let p = Path::single(NodeId(0));
        let q = p.extended(NodeId(2)).extended(NodeId(5));
        assert_eq!(p.nodes(), &[NodeId(0)]);
        assert_eq!(q.nodes(), &[NodeId(0), NodeId(2), NodeId(5)]);
        assert_eq!(q.first(), NodeId(0));
        assert_eq!(q.last(), NodeId(5));
        assert_eq!(
            q.steps().collect::<Vec<_>>(),
            vec![(NodeId(0), NodeId(2)), (NodeId(2), NodeId(5))]
        );
    }

    #[test]
    fn try_from_rejects_empty() {
        assert_eq!(Path::try_from(Vec::new()), Err(Error::EmptyPath));
        let p = Path::try_from(vec![NodeId(3)]).unwrap();
        assert_eq!((p.first(), p.last(), p.len()), (NodeId(3), NodeId(3), 1));
        assert!(!p.is_empty());
    }

    #[test]
    fn into_path_only_for_found() {
        let found = Outcome::Found(Path::single(NodeId(1)));
        assert_eq!(found.into_path(), Some(Path::single(NodeId(1))));
        assert_eq!(Outcome::NoRoute.into_path(), None);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn outcome_round_trip() {
        let found = Outcome::Found(Path::try_from(vec![NodeId(0), NodeId(1)]).unwrap());
        let json = serde_json::to_string(&found).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, found);
    }

    #[test]
    fn empty_path_does_not_deserialize() {
        assert!(serde_json::from_str::<Path>("[]").is_err());
        assert!(serde_json::from_str::<Outcome>(r#"{"Found":[]}"#).is_err());
        assert!(serde_json::from_str::<Candidate>(r#"{"score":1,"path":[]}"#).is_err());

        let p: Path = serde_json::from_str("[0,2]").unwrap();
        assert_eq!(p.last(), NodeId(2));
    }

    #[test]
    fn snapshot_round_trip() {
        let snap = Snapshot {
            round: 2,
            frontier: vec![Candidate {
                score: 3,
                path: Path::try_from(vec![NodeId(0), NodeId(1), NodeId(4)]).unwrap(),
            }],
            explored: vec![NodeId(0), NodeId(1)],
        };
        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
