//! Report-view: reactive view-model engine for test-execution reports
//!
//! This library parses JSON test-execution data into an immutable data model,
//! maintains toggle-based filter state (pass/fail/skip, show/hide), and
//! notifies a registered renderer whenever the filtered projection changes.
//! Rendering itself is left to the renderer; the binary ships a console one.

pub mod filter;
pub mod parser;
pub mod reporter;
pub mod state;
pub mod toggle;
pub mod viewmodel;

use serde::{Deserialize, Serialize};

/// Outcome of a step, an execution, or (derived) a whole test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single step within an execution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// Object key from the report document, used as the display id
    pub id: String,
    pub description: String,
    pub outcome: Outcome,
}

/// One execution of a test on a device
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Execution {
    /// Object key from the report document, used as the display id
    pub id: String,
    pub device: String,
    pub outcome: Outcome,
    /// Duration in seconds
    pub duration: f64,
    pub steps: Vec<Step>,
}

/// A test with all of its executions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Test {
    /// Sequential id assigned by the parser, in document order
    pub id: usize,
    pub node_id: String,
    pub name: String,
    pub description: String,
    pub self_test: String,
    pub executions: Vec<Execution>,
}

impl Test {
    /// Derived outcome: the first execution's outcome in sequence order.
    /// `None` when the test has no executions.
    pub fn outcome(&self) -> Option<Outcome> {
        self.executions.first().map(|e| e.outcome)
    }

    /// True iff every execution shares the derived outcome.
    /// Vacuously true for a test without executions.
    pub fn has_same_outcome(&self) -> bool {
        match self.outcome() {
            Some(outcome) => self.executions.iter().all(|e| e.outcome == outcome),
            None => true,
        }
    }
}
