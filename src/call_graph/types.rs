use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::io::Read;
use std::path::Path;

/// Caller identifier mapped to the identifiers it invokes.
///
/// Serialized as a JSON object whose values are arrays:
/// `{"Parser.parse": ["Lexer.next", "Ast.push"]}`. Duplicate callees
/// collapse, so each caller-method → callee-method pair counts once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallGraph {
    calls: BTreeMap<String, BTreeSet<String>>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `caller` invokes `callee`
    pub fn add_call(&mut self, caller: impl Into<String>, callee: impl Into<String>) {
        self.calls
            .entry(caller.into())
            .or_default()
            .insert(callee.into());
    }

    /// Register a caller even if it invokes nothing
    pub fn add_caller(&mut self, caller: impl Into<String>) {
        self.calls.entry(caller.into()).or_default();
    }

    pub fn callees(&self, caller: &str) -> Option<&BTreeSet<String>> {
        self.calls.get(caller)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.calls
            .iter()
            .map(|(caller, callees)| (caller.as_str(), callees))
    }

    /// Number of callers
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Number of distinct caller → callee pairs
    pub fn relation_count(&self) -> usize {
        self.calls.values().map(BTreeSet::len).sum()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a call graph from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| Error::input(path, e))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// One line per caller: `<caller> calls: [<callee>, ...]`
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (caller, callees) in &self.calls {
            let list = callees
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "{} calls: [{}]", caller, list);
        }
        out
    }
}

impl<S: Into<String>> FromIterator<(S, S)> for CallGraph {
    fn from_iter<I: IntoIterator<Item = (S, S)>>(iter: I) -> Self {
        let mut graph = CallGraph::new();
        for (caller, callee) in iter {
            graph.add_call(caller, callee);
        }
        graph
    }
}
