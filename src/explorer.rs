//! Private module for selective re-export.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use crate::config::{Config, ConfigSet, Transition, TransitionSet};
use crate::error::{Error, Result};

/// The worklist discipline of one run. The final sets are identical either
/// way; only the order of intermediate expansions differs.
#[derive(Clone, Copy, Debug)]
enum Order {
    Bfs,
    Dfs,
}

/// Builds and runs one exploration of a reachable state space.
///
/// The worklist, visited set, and transition set live for exactly one call
/// to [`Explorer::run_bfs`] or [`Explorer::run_dfs`] and are never exposed
/// mid-run; nothing is shared across runs, so independent models can be
/// explored back to back without interference.
pub struct Explorer {
    initial: Config,
    ceiling: Option<NonZeroUsize>,
}

impl Explorer {
    /// Starts an exploration rooted at the given configuration.
    pub fn new(initial: Config) -> Explorer {
        Explorer {
            initial,
            ceiling: None,
        }
    }

    /// Bounds the visited set: once admitting a newly discovered
    /// configuration would exceed the limit, the run aborts with
    /// [`Error::StateSpaceExceeded`] rather than exhausting memory. Zero
    /// disables the bound.
    ///
    /// Termination is otherwise the model author's responsibility — a model
    /// with an infinite reachable set never drains its frontier.
    pub fn ceiling(mut self, limit: usize) -> Explorer {
        self.ceiling = NonZeroUsize::new(limit);
        self
    }

    /// Explores breadth-first. The default choice: the frontier drains
    /// level by level, which makes progress logging interpretable.
    pub fn run_bfs(self) -> Result<StateGraph> {
        self.traverse(Order::Bfs)
    }

    /// Explores depth-first. Produces the same final graph as
    /// [`Explorer::run_bfs`].
    pub fn run_dfs(self) -> Result<StateGraph> {
        self.traverse(Order::Dfs)
    }

    fn traverse(self, order: Order) -> Result<StateGraph> {
        let start = Instant::now();
        let mut visited = ConfigSet::default();
        let mut transitions = TransitionSet::default();
        let mut frontier = VecDeque::new();
        visited.insert(self.initial.clone());
        frontier.push_back(self.initial);

        loop {
            let popped = match order {
                Order::Bfs => frontier.pop_front(),
                Order::Dfs => frontier.pop_back(),
            };
            let Some(config) = popped else { break };

            for next in config.successors()? {
                transitions.insert(Transition {
                    start: config.clone(),
                    end: next.clone(),
                });
                if visited.contains(&next) {
                    continue;
                }
                if let Some(ceiling) = self.ceiling {
                    if visited.len() >= ceiling.get() {
                        log::debug!(
                            "aborting at ceiling {}: transitions={}",
                            ceiling,
                            transitions.len()
                        );
                        return Err(Error::StateSpaceExceeded {
                            ceiling,
                            partial: Box::new(StateGraph {
                                visited,
                                transitions,
                                duration: start.elapsed(),
                            }),
                        });
                    }
                }
                visited.insert(next.clone());
                frontier.push_back(next);
            }
            log::trace!("pending={} visited={}", frontier.len(), visited.len());
        }

        let graph = StateGraph {
            visited,
            transitions,
            duration: start.elapsed(),
        };
        log::debug!(
            "exploration complete: configs={} transitions={} sec={}",
            graph.config_count(),
            graph.transition_count(),
            graph.duration().as_secs()
        );
        Ok(graph)
    }
}

/// The result of one exploration: the full visited set and transition
/// relation, owned by the caller once the run ends.
///
/// A completed graph is a fix-point — every visited configuration's
/// successors are themselves visited, each reachable configuration was
/// expanded exactly once however many predecessors reach it, and any
/// traversal order produces the same sets. The graph inside
/// [`Error::StateSpaceExceeded`] is the partial exception: it holds whatever
/// had been discovered when the ceiling was hit.
#[derive(Debug)]
pub struct StateGraph {
    pub(crate) visited: ConfigSet,
    pub(crate) transitions: TransitionSet,
    pub(crate) duration: Duration,
}

impl StateGraph {
    /// The reachable configurations.
    pub fn configs(&self) -> &ConfigSet {
        &self.visited
    }

    /// The single-step transitions between reachable configurations.
    pub fn transitions(&self) -> &TransitionSet {
        &self.transitions
    }

    pub fn config_count(&self) -> usize {
        self.visited.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Whether a configuration was reached.
    pub fn contains(&self, config: &Config) -> bool {
        self.visited.contains(config)
    }

    /// How long the run took.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}
