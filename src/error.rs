//! Error types for model construction and exploration.

use std::num::NonZeroUsize;

use crate::explorer::StateGraph;

/// Errors raised by a malformed model or an aborted exploration.
///
/// Every variant is fatal to the current run. Reachability results are only
/// meaningful as a complete fix-point, so there is no partial-success or
/// retry surface; the one variant that carries data,
/// [`Error::StateSpaceExceeded`], hands back what was discovered before the
/// abort.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two processes in one configuration share a name.
    #[error("duplicate process name {name:?}")]
    DuplicateName {
        /// The name that appeared more than once.
        name: String,
    },

    /// A process was defined with no transition rules.
    #[error("process {name:?} has an empty transition table")]
    EmptyTable {
        /// The process with the empty table.
        name: String,
    },

    /// A running process's program counter landed outside its table, either
    /// at construction or as the result of a transition rule.
    #[error("process {name:?} reached program counter {pc}, outside its table of {len} rules")]
    PcOutOfRange {
        /// The process whose counter went out of range.
        name: String,
        /// The offending program counter.
        pc: usize,
        /// The length of the process's transition table.
        len: usize,
    },

    /// One atomic assignment wrote the same variable twice.
    #[error("variable {key:?} repeated within one atomic assignment")]
    RepeatedAssignment {
        /// The repeated variable name.
        key: String,
    },

    /// The visited set outgrew the configured ceiling before the frontier
    /// drained.
    #[error("state space exceeded the ceiling of {ceiling} configurations")]
    StateSpaceExceeded {
        /// The ceiling that was hit.
        ceiling: NonZeroUsize,
        /// The partial reachability graph accumulated before the abort.
        partial: Box<StateGraph>,
    },
}

/// Result type for model construction and exploration.
pub type Result<T> = std::result::Result<T, Error>;
