//! A library for enumerating the reachable state space of an interleaved
//! shared-memory concurrency model.
//!
//! A model is a fixed set of named [`Process`]es — deterministic state
//! machines reading and writing a private and a shared [`Memory`] — plus an
//! initial shared memory. Exactly one process advances per step, so the
//! global [`Config`]urations form a branching graph. The [`Explorer`]
//! computes that graph in full: every configuration reachable from the
//! initial one, and every single-step [`Transition`] between them.
//!
//! ```rust
//! use statereach::*;
//!
//! // One process that raises a flag, then spins.
//! let table = vec![
//!     rule(|shared, local| Ok(Outcome {
//!         shared: shared.with("x", 1),
//!         local: local.clone(),
//!         pc: 1,
//!         running: true,
//!     })),
//!     rule(|shared, local| Ok(Outcome {
//!         shared: shared.clone(),
//!         local: local.clone(),
//!         pc: 1,
//!         running: true,
//!     })),
//! ];
//! let p = Process::new("P", Memory::default(), table, 0).unwrap();
//! let initial = Config::new(Memory::new([("x", 0)]), vec![p]).unwrap();
//!
//! let graph = initial.explorer().run_bfs().unwrap();
//! assert_eq!(graph.config_count(), 2);     // {x:0} at pc 0, {x:1} at pc 1
//! assert_eq!(graph.transition_count(), 2); // the raise, then the pc-1 self-loop
//! ```

mod config;
mod error;
mod explorer;
mod memory;
mod process;
pub mod report;
#[cfg(test)]
mod test_util;

pub use config::{Config, ConfigSet, Transition, TransitionSet};
pub use error::{Error, Result};
pub use explorer::{Explorer, StateGraph};
pub use memory::{Memory, Value};
pub use process::{rule, Outcome, Process, TransitionFn};

use std::hash::{Hash, Hasher};

/// A compact stand-in for a [`Config`]'s full contents: a stable hash over
/// its shared memory and every process. Fingerprints accelerate set
/// membership; identity always falls back to structural equality, so a
/// colliding pair of distinct configurations is still kept apart.
pub type Fingerprint = u64;

pub(crate) fn fingerprint<T: Hash>(value: &T) -> Fingerprint {
    let mut hasher = stable::hasher();
    value.hash(&mut hasher);
    hasher.finish()
}

pub(crate) mod stable {
    //! Fixed-seed hashing. The standard library's hasher randomizes per
    //! process, which would make fingerprints differ between otherwise
    //! identical runs.
    use ahash::{AHasher, RandomState};
    use std::hash::BuildHasher;

    pub(crate) fn hasher() -> AHasher {
        RandomState::with_seeds(
            0x243f_6a88_85a3_08d3,
            0x1319_8a2e_0370_7344,
            0xa409_3822_299f_31d0,
            0x082e_fa98_ec4e_6c89,
        )
        .build_hasher()
    }
}
