//! Private module for selective re-export.

use nohash_hasher::NoHashHasher;
use std::collections::HashSet;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasherDefault, Hash, Hasher};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::explorer::Explorer;
use crate::memory::Memory;
use crate::process::Process;
use crate::Fingerprint;

/// A set of configurations. [`Config`] hashes as its precomputed
/// fingerprint, so the set skips rehashing entirely.
pub type ConfigSet = HashSet<Config, BuildHasherDefault<NoHashHasher<u64>>>;

/// A set of transitions, keyed the same way.
pub type TransitionSet = HashSet<Transition, BuildHasherDefault<NoHashHasher<u64>>>;

/// One point in the modeled system's state space: the shared memory plus
/// every process's state, in a fixed order.
///
/// The process order is part of a configuration's identity — index `i`
/// denotes the same logical process across every configuration derived from
/// one model. Equality and hashing are structural over
/// `(shared, processes)`; the precomputed fingerprint only short-circuits
/// them.
#[derive(Clone)]
pub struct Config {
    shared: Memory,
    processes: Arc<[Process]>,
    fingerprint: Fingerprint,
}

impl Config {
    /// Builds the initial configuration of a model from its shared memory
    /// and process list. Process names must be unique within the list.
    pub fn new(shared: Memory, processes: Vec<Process>) -> Result<Config> {
        let mut seen = HashSet::with_capacity(processes.len());
        for process in &processes {
            if !seen.insert(process.name().to_string()) {
                return Err(Error::DuplicateName {
                    name: process.name().to_string(),
                });
            }
        }
        Ok(Self::assemble(shared, processes.into()))
    }

    fn assemble(shared: Memory, processes: Arc<[Process]>) -> Config {
        let fingerprint = crate::fingerprint(&(&shared, &*processes));
        Config {
            shared,
            processes,
            fingerprint,
        }
    }

    /// The shared memory.
    pub fn shared(&self) -> &Memory {
        &self.shared
    }

    /// The processes, in table order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// The configuration's stable fingerprint.
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Whether no process is enabled. A terminal configuration is a leaf of
    /// the reachability graph — expected for protocols that halt, not an
    /// error.
    pub fn is_terminal(&self) -> bool {
        !self.processes.iter().any(Process::is_running)
    }

    /// Computes every configuration reachable in exactly one step: for each
    /// enabled process, the receiver with that process advanced and the
    /// shared memory it produced, all other processes untouched.
    /// Interleaving is the only source of nondeterminism in the model, so
    /// this is the complete successor set.
    ///
    /// The result has set semantics: two processes that happen to produce
    /// the same configuration collapse to one element, since identity is
    /// content, not the step that produced it. A terminal configuration
    /// yields the empty set.
    pub fn successors(&self) -> Result<ConfigSet> {
        let mut result = ConfigSet::default();
        for (i, process) in self.processes.iter().enumerate() {
            if !process.is_running() {
                continue;
            }
            let (stepped, shared) = process.step(&self.shared)?;
            let mut processes = self.processes.to_vec();
            processes[i] = stepped;
            result.insert(Self::assemble(shared, processes.into()));
        }
        Ok(result)
    }

    /// Starts building an exploration of the state space rooted here.
    pub fn explorer(self) -> Explorer {
        Explorer::new(self)
    }
}

impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
            && self.shared == other.shared
            && self.processes == other.processes
    }
}

impl Eq for Config {}

// A single `write_u64` pairs with the `NoHashHasher` build hasher of
// `ConfigSet`.
impl Hash for Config {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fingerprint);
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("shared", &self.shared)
            .field("processes", &self.processes)
            .finish()
    }
}

/// Renders `[P1,Q2,0,1]`: each process's name and program counter in table
/// order, then the shared values sorted by variable name. A pure function of
/// content, so equal configurations always render identically.
impl Display for Config {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[")?;
        for process in self.processes.iter() {
            write!(f, "{}{},", process.name(), process.pc())?;
        }
        let mut sep = "";
        for (_, value) in self.shared.vars() {
            write!(f, "{sep}{value}")?;
            sep = ",";
        }
        write!(f, "]")
    }
}

/// One admissible single-process step between two configurations. The
/// explorer keeps transitions in a set, so steps by different processes that
/// connect the same pair of configurations collapse.
#[derive(Clone, Eq, PartialEq)]
pub struct Transition {
    pub start: Config,
    pub end: Config,
}

impl Hash for Transition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut mix = crate::stable::hasher();
        self.start.fingerprint.hash(&mut mix);
        self.end.fingerprint.hash(&mut mix);
        state.write_u64(mix.finish());
    }
}

impl Debug for Transition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Transition")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}
