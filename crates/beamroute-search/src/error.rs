//! The [`Error`] type shared by graph construction, search setup and path
//! conversion.

use crate::graph::NodeId;

/// Invalid input to the graph builder, the search engine or a path.
///
/// Running out of candidates is not an error; it is reported as
/// [`Outcome::NoRoute`](crate::Outcome::NoRoute).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A label that names no node in the graph.
    #[error("unknown node: {0:?}")]
    UnknownNode(String),

    /// A node id that does not belong to the graph.
    #[error("unknown node id: {0}")]
    UnknownNodeId(NodeId),

    /// The beam must keep at least one candidate per round.
    #[error("invalid beam width {0}: must be at least 1")]
    InvalidWidth(usize),

    /// The same label was defined twice while building a graph.
    #[error("duplicate node: {0:?}")]
    DuplicateNode(String),

    /// A path must hold at least one node.
    #[error("empty path")]
    EmptyPath,
}

impl Error {
    /// Whether this error reports a node that is not part of the graph,
    /// whether it was given by label or by id.
    pub fn is_unknown_node(&self) -> bool {
        matches!(self, Self::UnknownNode(_) | Self::UnknownNodeId(_))
    }
}
