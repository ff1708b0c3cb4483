use std::rc::Rc;
use std::sync::Arc;

use crate::graph::{Edge, NodeId, Score};

/// Minimal search interface: node membership and successor enumeration.
pub trait Pather {
    /// Whether `node` belongs to the graph.
    fn contains(&self, node: NodeId) -> bool;

    /// Append the outgoing edges of `node` into `buf`, in definition order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, node: NodeId, buf: &mut Vec<Edge>);
}

/// Pather with a static heuristic used to rank beam candidates.
pub trait BeamPather: Pather {
    /// Estimated remaining distance from `node` to the goal.
    ///
    /// This is a fixed per-node value, not goal-relative: the same estimate
    /// is used whichever goal the search is run against.
    fn estimate(&self, node: NodeId) -> Score;
}

macro_rules! forward_pather {
    ($($ptr:ty),*) => {$(
        impl<P: Pather + ?Sized> Pather for $ptr {
            #[inline]
            fn contains(&self, node: NodeId) -> bool {
                (**self).contains(node)
            }

            #[inline]
            fn neighbors(&self, node: NodeId, buf: &mut Vec<Edge>) {
                (**self).neighbors(node, buf)
            }
        }

        impl<P: BeamPather + ?Sized> BeamPather for $ptr {
            #[inline]
            fn estimate(&self, node: NodeId) -> Score {
                (**self).estimate(node)
            }
        }
    )*};
}

forward_pather!(&P, Rc<P>, Arc<P>);
