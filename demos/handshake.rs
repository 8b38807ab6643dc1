//! # This Demo
//!
//! A two-process flag protocol over shared variables `a` and `b`:
//!
//! - `P` raises `a`, busy-waits while `b` is raised, passes through its
//!   critical region, lowers `a`, and loops.
//! - `Q` raises `b`, but gives up for good the moment it observes `a`
//!   lowered; otherwise it lowers `b` and loops.
//!
//! Exploring the protocol enumerates every interleaving of the two
//! processes: every reachable configuration and every single-process step
//! between them. Q's guard means part of the state space ends in
//! configurations where Q is permanently halted while P keeps cycling.

use statereach::report::{JsonReporter, Reporter, WriteReporter};
use statereach::*;

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

fn protocol() -> Result<Config> {
    let p = Process::new(
        "P",
        Memory::default(),
        vec![
            nop(1),
            rule(|shared, local| {
                Ok(Outcome {
                    shared: shared.with("a", 1),
                    local: local.clone(),
                    pc: 2,
                    running: true,
                })
            }),
            // Busy-wait while Q's flag is raised.
            rule(|shared, local| {
                let pc = if shared.get("b") != Some(&Value::Int(0)) { 2 } else { 3 };
                Ok(Outcome {
                    shared: shared.clone(),
                    local: local.clone(),
                    pc,
                    running: true,
                })
            }),
            // Critical region.
            nop(4),
            rule(|shared, local| {
                Ok(Outcome {
                    shared: shared.with("a", 0),
                    local: local.clone(),
                    pc: 1,
                    running: true,
                })
            }),
        ],
        1,
    )?;
    let q = Process::new(
        "Q",
        Memory::default(),
        vec![
            nop(1),
            rule(|shared, local| {
                Ok(Outcome {
                    shared: shared.with("b", 1),
                    local: local.clone(),
                    pc: 2,
                    running: true,
                })
            }),
            // Gives up for good when P's flag is down.
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
        ],
        1,
    )?;
    Config::new(Memory::new([("a", 0), ("b", 0)]), vec![p, q])
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(
        env_logger::Env::default().default_filter_or("info"), // `RUST_LOG=${LEVEL}` env variable to override
    );

    let mut args = pico_args::Arguments::from_env();
    match args.subcommand()?.as_deref() {
        Some("explore") => {
            let graph = protocol()?.explorer().run_bfs()?;
            WriteReporter::new(&mut std::io::stdout()).report(&graph);
        }
        Some("json") => {
            let graph = protocol()?.explorer().run_bfs()?;
            JsonReporter::new(&mut std::io::stdout()).report(&graph);
        }
        _ => {
            println!("USAGE:");
            println!("  ./handshake explore");
            println!("  ./handshake json");
        }
    }

    Ok(())
}
