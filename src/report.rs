//! Rendering of completed explorations.
//!
//! A [`StateGraph`] is a pair of sets, so any faithful rendering must be a
//! pure function of its content: equal graphs print identically, whatever
//! order exploration happened to discover their elements in. Both reporters
//! sort their output to guarantee this.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::fmt::Display;
use std::io::Write;

use crate::config::{Config, Transition};
use crate::explorer::StateGraph;

/// A consumer of exploration results.
pub trait Reporter {
    /// Report a completed exploration.
    fn report(&mut self, graph: &StateGraph);
}

/// Writes a plain-text report: a summary line, then every configuration and
/// every transition, one per line.
pub struct WriteReporter<'a, W> {
    writer: &'a mut W,
}

impl<'a, W> WriteReporter<'a, W> {
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }
}

impl<'a, W> Reporter for WriteReporter<'a, W>
where
    W: Write,
{
    fn report(&mut self, graph: &StateGraph) {
        let _ = writeln!(
            self.writer,
            "Done. configs={}, transitions={}, sec={}",
            graph.config_count(),
            graph.transition_count(),
            graph.duration().as_secs(),
        );
        for line in sorted_lines(graph.configs().iter()) {
            let _ = writeln!(self.writer, "{line}");
        }
        for line in sorted_lines(graph.transitions().iter()) {
            let _ = writeln!(self.writer, "{line}");
        }
    }
}

fn sorted_lines<T: Display>(items: impl Iterator<Item = T>) -> Vec<String> {
    let mut lines: Vec<_> = items.map(|item| item.to_string()).collect();
    lines.sort();
    lines
}

/// Writes the same content as a JSON document.
pub struct JsonReporter<'a, W> {
    writer: &'a mut W,
}

impl<'a, W> JsonReporter<'a, W> {
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }
}

impl<'a, W> Reporter for JsonReporter<'a, W>
where
    W: Write,
{
    fn report(&mut self, graph: &StateGraph) {
        let _ = serde_json::to_writer_pretty(&mut *self.writer, &GraphView::new(graph));
        let _ = writeln!(self.writer);
    }
}

struct GraphView<'a> {
    graph: &'a StateGraph,
    configs: Vec<&'a Config>,
    transitions: Vec<&'a Transition>,
}

impl<'a> GraphView<'a> {
    fn new(graph: &'a StateGraph) -> Self {
        let mut configs: Vec<_> = graph.configs().iter().collect();
        configs.sort_by_cached_key(|c| c.to_string());
        let mut transitions: Vec<_> = graph.transitions().iter().collect();
        transitions.sort_by_cached_key(|t| t.to_string());
        GraphView {
            graph,
            configs,
            transitions,
        }
    }
}

impl Serialize for GraphView<'_> {
    fn serialize<S: Serializer>(&self, ser: S) -> std::result::Result<S::Ok, S::Error> {
        let mut out = ser.serialize_struct("StateGraph", 4)?;
        out.serialize_field("config_count", &self.graph.config_count())?;
        out.serialize_field("transition_count", &self.graph.transition_count())?;
        let configs: Vec<_> = self.configs.iter().map(|c| ConfigView(c)).collect();
        out.serialize_field("configs", &configs)?;
        let transitions: Vec<_> = self.transitions.iter().map(|t| TransitionView(t)).collect();
        out.serialize_field("transitions", &transitions)?;
        out.end()
    }
}

/// Summarizes a configuration: its processes as name/pc records, its shared
/// variables as a map, and its fingerprint as a hex string.
struct ConfigView<'a>(&'a Config);

#[derive(Serialize)]
struct ProcessView<'a> {
    name: &'a str,
    pc: usize,
    running: bool,
}

impl Serialize for ConfigView<'_> {
    fn serialize<S: Serializer>(&self, ser: S) -> std::result::Result<S::Ok, S::Error> {
        let mut out = ser.serialize_struct("Config", 3)?;
        let processes: Vec<_> = self
            .0
            .processes()
            .iter()
            .map(|p| ProcessView {
                name: p.name(),
                pc: p.pc(),
                running: p.is_running(),
            })
            .collect();
        out.serialize_field("processes", &processes)?;
        out.serialize_field("shared", self.0.shared())?;
        out.serialize_field("fingerprint", &format!("{:016x}", self.0.fingerprint()))?;
        out.end()
    }
}

struct TransitionView<'a>(&'a Transition);

impl Serialize for TransitionView<'_> {
    fn serialize<S: Serializer>(&self, ser: S) -> std::result::Result<S::Ok, S::Error> {
        let mut out = ser.serialize_struct("Transition", 2)?;
        out.serialize_field("start", &ConfigView(&self.0.start))?;
        out.serialize_field("end", &ConfigView(&self.0.end))?;
        out.end()
    }
}
