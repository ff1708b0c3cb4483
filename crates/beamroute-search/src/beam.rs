use std::collections::HashSet;

use crate::error::Error;
use crate::graph::{Edge, NodeId};
use crate::path::{Candidate, Outcome, Path, Snapshot};
use crate::traits::BeamPather;

/// Beam search configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeamConfig {
    /// Number of candidates kept after each round. Must be at least 1.
    pub beam_width: usize,
    /// Give up with [`Outcome::NoRoute`] after this many rounds. `None`
    /// places no limit, which only terminates on graphs where every walk
    /// from the start is finite.
    pub max_rounds: Option<usize>,
}

impl BeamConfig {
    pub const DEFAULT_WIDTH: usize = 2;

    pub fn with_width(beam_width: usize) -> Self {
        Self {
            beam_width,
            ..Self::default()
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            beam_width: Self::DEFAULT_WIDTH,
            max_rounds: None,
        }
    }
}

/// One step of a running search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    /// The state observed before a round expands.
    Round(Snapshot),
    /// The search is over. No further events follow.
    Finished(Outcome),
}

/// Find a route from `start` to `goal`, keeping at most `beam_width`
/// candidates per round.
pub fn search<P: BeamPather>(
    pather: P,
    start: NodeId,
    goal: NodeId,
    beam_width: usize,
) -> Result<Outcome, Error> {
    BeamSearch::new(pather, start, goal, BeamConfig::with_width(beam_width)).map(BeamSearch::run)
}

/// A beam search in progress.
///
/// Iterating yields one [`SearchEvent::Round`] per expansion round and a
/// final [`SearchEvent::Finished`]. Dropping the iterator early cancels the
/// search.
///
/// Each round, every frontier path is visited in order: its last node is
/// marked explored, and if it is the goal the search ends with that path.
/// Otherwise each outgoing edge yields a candidate one node longer, scored by
/// the heuristic of its new last node alone (edge costs are not summed). The
/// pooled candidates are sorted stably by score and the first `beam_width`
/// become the next frontier, so equal scores keep frontier order, then edge
/// order.
pub struct BeamSearch<P> {
    pather: P,
    goal: NodeId,
    config: BeamConfig,
    frontier: Vec<Candidate>,
    explored: Vec<NodeId>,
    explored_set: HashSet<NodeId>,
    rounds: usize,
    done: bool,
    // scratch buffer for neighbor queries
    nbuf: Vec<Edge>,
}

impl<P: BeamPather> BeamSearch<P> {
    /// Validate the inputs and seed the frontier with `[start]`.
    pub fn new(pather: P, start: NodeId, goal: NodeId, config: BeamConfig) -> Result<Self, Error> {
        if config.beam_width < 1 {
            return Err(Error::InvalidWidth(config.beam_width));
        }
        for node in [start, goal] {
            if !pather.contains(node) {
                return Err(Error::UnknownNodeId(node));
            }
        }

        let seed = Candidate {
            score: pather.estimate(start),
            path: Path::single(start),
        };
        log::debug!(
            "beam search {start} -> {goal}, width {}, round limit {:?}",
            config.beam_width,
            config.max_rounds
        );

        Ok(Self {
            pather,
            goal,
            config,
            frontier: vec![seed],
            explored: Vec::new(),
            explored_set: HashSet::new(),
            rounds: 0,
            done: false,
            nbuf: Vec::with_capacity(4),
        })
    }

    /// Nodes expanded so far, in first-expansion order.
    pub fn explored(&self) -> &[NodeId] {
        &self.explored
    }

    /// Number of rounds started so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Run to completion, discarding intermediate snapshots.
    pub fn run(self) -> Outcome {
        for event in self {
            if let SearchEvent::Finished(outcome) = event {
                return outcome;
            }
        }
        // The iterator always yields `Finished` before `None`.
        Outcome::NoRoute
    }

    /// Expand the current frontier. Returns the goal path if one of the
    /// frontier paths already ends there.
    fn expand(&mut self) -> Option<Path> {
        let frontier = std::mem::take(&mut self.frontier);
        let mut pool: Vec<Candidate> = Vec::new();

        for cand in frontier {
            let node = cand.path.last();
            if self.explored_set.insert(node) {
                self.explored.push(node);
            }
            if node == self.goal {
                return Some(cand.path);
            }

            self.nbuf.clear();
            self.pather.neighbors(node, &mut self.nbuf);
            for edge in &self.nbuf {
                pool.push(Candidate {
                    score: self.pather.estimate(edge.to),
                    path: cand.path.extended(edge.to),
                });
            }
        }

        // Stable: ties keep pool order.
        pool.sort_by_key(|c| c.score);
        let pooled = pool.len();
        pool.truncate(self.config.beam_width);
        log::trace!(
            "round {}: pruned {} candidates to {}",
            self.rounds,
            pooled,
            pool.len()
        );
        self.frontier = pool;
        None
    }

    fn finish(&mut self, outcome: Outcome) -> SearchEvent {
        self.done = true;
        self.frontier.clear();
        match &outcome {
            Outcome::Found(path) => log::info!(
                "route found after {} rounds: {} nodes, {} explored",
                self.rounds,
                path.len(),
                self.explored.len()
            ),
            Outcome::NoRoute => log::info!(
                "no route after {} rounds, {} explored",
                self.rounds,
                self.explored.len()
            ),
        }
        SearchEvent::Finished(outcome)
    }
}

impl<P: BeamPather> Iterator for BeamSearch<P> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        if self.done {
            return None;
        }

        // The previous round (if any) has run; check for a result first.
        if self.rounds > 0 {
            if let Some(path) = self.expand() {
                return Some(self.finish(Outcome::Found(path)));
            }
        }

        if self.frontier.is_empty() {
            return Some(self.finish(Outcome::NoRoute));
        }
        if let Some(limit) = self.config.max_rounds {
            if self.rounds >= limit {
                log::warn!("beam search gave up after {limit} rounds");
                return Some(self.finish(Outcome::NoRoute));
            }
        }

        self.rounds += 1;
        log::debug!(
            "round {}: {} candidates, {} explored",
            self.rounds,
            self.frontier.len(),
            self.explored.len()
        );
        Some(SearchEvent::Round(Snapshot {
            round: self.rounds,
            frontier: self.frontier.clone(),
            explored: self.explored.clone(),
        }))
    }
}

impl<P: BeamPather> std::iter::FusedIterator for BeamSearch<P> {}
