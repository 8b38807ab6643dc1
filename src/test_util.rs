//! Utilities for tests.

use crate::{rule, Config, Memory, Outcome, Process, TransitionFn, Value};

fn nop(next: usize) -> TransitionFn {
    rule(move |shared, local| {
        Ok(Outcome {
            shared: shared.clone(),
            local: local.clone(),
            pc: next,
            running: true,
        })
    })
}

/// One process that raises a shared flag, then spins at its final counter.
pub mod flag_raiser {
    use super::*;

    pub fn initial() -> Config {
        let table = vec![
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
        ];
        let p = Process::new("P", Memory::default(), table, 0).unwrap();
        Config::new(Memory::new([("x", 0)]), vec![p]).unwrap()
    }
}

/// Two independent counters flipping disjoint shared variables through a
/// two-state raise/lower loop.
pub mod twin_counters {
    use super::*;

    fn counter(var: &'static str) -> Vec<TransitionFn> {
        vec![
            rule(move |shared, local| {
                Ok(Outcome {
                    shared: shared.with(var, 1),
                    local: local.clone(),
                    pc: 1,
                    running: true,
                })
            }),
            rule(move |shared, local| {
                Ok(Outcome {
                    shared: shared.with(var, 0),
                    local: local.clone(),
                    pc: 0,
                    running: true,
                })
            }),
        ]
    }

    pub fn initial() -> Config {
        let p = Process::new("P", Memory::default(), counter("a"), 0).unwrap();
        let q = Process::new("Q", Memory::default(), counter("b"), 0).unwrap();
        Config::new(Memory::new([("a", 0), ("b", 0)]), vec![p, q]).unwrap()
    }
}

/// A process that halts for good once it observes its own flag raised.
pub mod guarded_halt {
    use super::*;

    pub fn initial() -> Config {
        let table = vec![rule(|shared, local| {
            if shared.get("x") == Some(&Value::Int(1)) {
                Ok(Outcome {
                    shared: shared.clone(),
                    local: local.clone(),
                    pc: 0,
                    running: false,
                })
            } else {
                Ok(Outcome {
                    shared: shared.with("x", 1),
                    local: local.clone(),
                    pc: 0,
                    running: true,
                })
            }
        })];
        let p = Process::new("P", Memory::default(), table, 0).unwrap();
        Config::new(Memory::new([("x", 0)]), vec![p]).unwrap()
    }
}

/// The two-process flag protocol this crate was first pointed at: P raises
/// `a` and spins while `b` is raised before entering its critical region;
/// Q raises `b` but halts for good the moment it observes `a` lowered.
pub mod handshake {
    use super::*;

    pub fn initial() -> Config {
        let p_table = vec![
            nop(1),
            rule(|shared, local| {
                Ok(Outcome {
                    shared: shared.with("a", 1),
                    local: local.clone(),
                    pc: 2,
                    running: true,
                })
            }),
            rule(|shared, local| {
                let pc = if shared.get("b") != Some(&Value::Int(0)) { 2 } else { 3 };
                Ok(Outcome {
                    shared: shared.clone(),
                    local: local.clone(),
                    pc,
                    running: true,
                })
            }),
            nop(4),
            rule(|shared, local| {
                Ok(Outcome {
                    shared: shared.with("a", 0),
                    local: local.clone(),
                    pc: 1,
                    running: true,
                })
            }),
        ];
        let q_table = vec![
            nop(1),
            rule(|shared, local| {
                Ok(Outcome {
                    shared: shared.with("b", 1),
                    local: local.clone(),
                    pc: 2,
                    running: true,
                })
            }),
            // Halts with its counter parked past the table, preserved
            // verbatim from the protocol as modeled.
            rule(|shared, local| {
                if shared.get("a") == Some(&Value::Int(0)) {
                    Ok(Outcome {
                        shared: shared.clone(),
                        local: local.clone(),
                        pc: 4,
                        running: false,
                    })
                } else {
                    Ok(Outcome {
                        shared: shared.clone(),
                        local: local.clone(),
                        pc: 3,
                        running: true,
                    })
                }
            }),
            rule(|shared, local| {
                Ok(Outcome {
                    shared: shared.with("b", 0),
                    local: local.clone(),
                    pc: 1,
                    running: true,
                })
            }),
        ];
        let p = Process::new("P", Memory::default(), p_table, 1).unwrap();
        let q = Process::new("Q", Memory::default(), q_table, 1).unwrap();
        Config::new(Memory::new([("a", 0), ("b", 0)]), vec![p, q]).unwrap()
    }
}
