//! Private module for selective re-export.

use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::memory::Memory;

/// What a transition rule yields: replacement shared and local memories, the
/// next program counter, and whether the process is still running.
pub struct Outcome {
    pub shared: Memory,
    pub local: Memory,
    pub pc: usize,
    pub running: bool,
}

/// A per-program-counter step rule: `(shared, local)` in, [`Outcome`] out.
///
/// Rules must be pure and deterministic — the same inputs always yield the
/// same outcome. The explorer deduplicates configurations by content, which
/// is only sound under this assumption. Impurity cannot be detected
/// mechanically; it is a precondition on the model author.
pub type TransitionFn = Arc<dyn Fn(&Memory, &Memory) -> Result<Outcome> + Send + Sync>;

/// Wraps a closure into a [`TransitionFn`].
pub fn rule<F>(f: F) -> TransitionFn
where
    F: Fn(&Memory, &Memory) -> Result<Outcome> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// One modeled concurrent actor: a deterministic state machine over its
/// private memory and the shared memory, with a fixed table of transition
/// rules indexed by program counter.
///
/// A process is *enabled* while its running flag is set. Guards live inside
/// the rules, which may clear the flag to model blocking or termination;
/// once cleared, nothing sets it again.
#[derive(Clone)]
pub struct Process {
    name: Arc<str>,
    local: Memory,
    pc: usize,
    running: bool,
    table: Arc<[TransitionFn]>,
}

impl Process {
    /// Builds a process from its definition: a name (unique within a
    /// configuration), its initial private memory, its transition table, and
    /// its starting program counter.
    pub fn new(
        name: impl Into<Arc<str>>,
        local: Memory,
        table: Vec<TransitionFn>,
        pc: usize,
    ) -> Result<Process> {
        let name = name.into();
        if table.is_empty() {
            return Err(Error::EmptyTable {
                name: name.to_string(),
            });
        }
        if pc >= table.len() {
            return Err(Error::PcOutOfRange {
                name: name.to_string(),
                pc,
                len: table.len(),
            });
        }
        Ok(Process {
            name,
            local,
            pc,
            running: true,
            table: table.into(),
        })
    }

    /// Advances the process one step against the given shared memory,
    /// returning its successor and the replacement shared memory.
    ///
    /// A rule that keeps the process running must return a counter inside
    /// the table. A halting rule may park the counter anywhere — a halted
    /// process's counter is never consulted again.
    ///
    /// # Panics
    ///
    /// Panics if the process is halted. Callers check
    /// [`Process::is_running`] first; stepping a halted process is a caller
    /// bug, not a modeled outcome.
    pub fn step(&self, shared: &Memory) -> Result<(Process, Memory)> {
        assert!(
            self.running,
            "step() called on halted process {:?}",
            self.name
        );
        let transition = self.table[self.pc].as_ref();
        let Outcome {
            shared,
            local,
            pc,
            running,
        } = transition(shared, &self.local)?;
        if running && pc >= self.table.len() {
            return Err(Error::PcOutOfRange {
                name: self.name.to_string(),
                pc,
                len: self.table.len(),
            });
        }
        Ok((
            Process {
                name: Arc::clone(&self.name),
                local,
                pc,
                running,
                table: Arc::clone(&self.table),
            },
            shared,
        ))
    }

    /// The process name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current program counter.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// The process's private memory.
    pub fn local(&self) -> &Memory {
        &self.local
    }

    /// Whether the process is still enabled.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

// Identity is (name, pc, local, running). The table is fixed at construction
// and shared by every descendant of one process definition, so it carries no
// distinguishing information within a model.
impl PartialEq for Process {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.pc == other.pc
            && self.running == other.running
            && self.local == other.local
    }
}

impl Eq for Process {}

impl Hash for Process {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.pc.hash(state);
        self.running.hash(state);
        self.local.hash(state);
    }
}

impl Debug for Process {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Process")
            .field("name", &self.name)
            .field("pc", &self.pc)
            .field("local", &self.local)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::memory::Value;

    fn raise_then_spin() -> Vec<TransitionFn> {
        vec![
            rule(|shared, local| {
                Ok(Outcome {
                    shared: shared.with("x", 1),
                    local: local.clone(),
                    pc: 1,
                    running: true,
                })
            }),
            rule(|shared, local| {
                Ok(Outcome {
                    shared: shared.clone(),
                    local: local.clone(),
                    pc: 1,
                    running: true,
                })
            }),
        ]
    }

    #[test]
    fn step_applies_the_rule_at_the_current_counter() {
        let p = Process::new("P", Memory::default(), raise_then_spin(), 0).unwrap();
        let shared = Memory::new([("x", 0)]);
        let (next, shared) = p.step(&shared).unwrap();
        assert_eq!(shared.get("x"), Some(&Value::Int(1)));
        assert_eq!(next.pc(), 1);
        assert_eq!(next.name(), "P");
        assert!(next.is_running());
        // The receiver is untouched.
        assert_eq!(p.pc(), 0);
    }

    #[test]
    fn step_is_deterministic() {
        let p = Process::new("P", Memory::default(), raise_then_spin(), 0).unwrap();
        let shared = Memory::new([("x", 0)]);
        let (a, shared_a) = p.step(&shared).unwrap();
        let (b, shared_b) = p.step(&shared).unwrap();
        assert_eq!(a, b);
        assert_eq!(shared_a, shared_b);
    }

    #[test]
    fn empty_table_is_rejected() {
        let err = Process::new("P", Memory::default(), Vec::new(), 0).unwrap_err();
        assert!(matches!(err, Error::EmptyTable { name } if name == "P"));
    }

    #[test]
    fn initial_counter_outside_the_table_is_rejected() {
        let err = Process::new("P", Memory::default(), raise_then_spin(), 2).unwrap_err();
        assert!(matches!(err, Error::PcOutOfRange { pc: 2, len: 2, .. }));
    }

    #[test]
    fn rule_returning_a_counter_outside_the_table_is_rejected() {
        let table = vec![rule(|shared, local| {
            Ok(Outcome {
                shared: shared.clone(),
                local: local.clone(),
                pc: 7,
                running: true,
            })
        })];
        let p = Process::new("P", Memory::default(), table, 0).unwrap();
        match p.step(&Memory::default()).unwrap_err() {
            Error::PcOutOfRange { name, pc, len } => {
                assert_eq!(name, "P");
                assert_eq!(pc, 7);
                assert_eq!(len, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn halting_rule_may_park_the_counter_past_the_table() {
        let table = vec![rule(|shared, local| {
            Ok(Outcome {
                shared: shared.clone(),
                local: local.clone(),
                pc: 9,
                running: false,
            })
        })];
        let p = Process::new("P", Memory::default(), table, 0).unwrap();
        let (halted, _) = p.step(&Memory::default()).unwrap();
        assert!(!halted.is_running());
        assert_eq!(halted.pc(), 9);
    }

    #[test]
    #[should_panic(expected = "halted process")]
    fn stepping_a_halted_process_panics() {
        let table = vec![rule(|shared, local| {
            Ok(Outcome {
                shared: shared.clone(),
                local: local.clone(),
                pc: 0,
                running: false,
            })
        })];
        let p = Process::new("P", Memory::default(), table, 0).unwrap();
        let (halted, shared) = p.step(&Memory::default()).unwrap();
        let _ = halted.step(&shared);
    }
}
