//! Beam search over a small weighted directed graph.
//!
//! The crate has two parts:
//!
//! - the **graph model** ([`Graph`], built with [`GraphBuilder`]): labelled
//!   nodes, directed edges with a cost, and a static heuristic per node;
//! - the **beam search engine** ([`BeamSearch`], [`search`]): a bounded-width
//!   greedy search that ranks candidate paths by the heuristic of their last
//!   node and keeps only the best `beam_width` of them each round.
//!
//! [`BeamSearch`] is an iterator. Before every round it yields a
//! [`Snapshot`] of the frontier and the explored nodes, and it ends with the
//! [`Outcome`], so a front end can animate the search without the engine
//! knowing anything about drawing.
//!
//! Beam search is not optimal: the heuristic alone drives pruning, edge costs
//! are never summed, and a narrow beam can discard every route to the goal.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | node membership, successor edges |
//! | [`BeamPather`] : [`Pather`] | static heuristic estimate |

mod beam;
mod error;
mod graph;
mod path;
mod traits;

pub use beam::{BeamConfig, BeamSearch, SearchEvent, search};
pub use error::Error;
pub use graph::{Cost, Edge, Graph, GraphBuilder, NodeId, Score};
pub use path::{Candidate, Outcome, Path, Snapshot};
pub use traits::{BeamPather, Pather};
