//! Pure filter transforms over the data model
//!
//! Two granularities exist on purpose and must not be unified:
//! [`filter_execution`] (list view) drops a whole execution whose outcome is
//! filtered out, while [`filter_execution_detail`] (detail view) always keeps
//! the execution and narrows only its step rows.

use crate::{Execution, Outcome, Step, Test};

/// Which outcome categories are active. Also used to record which categories
/// are present among a set of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeFlags {
    pub passed: bool,
    pub failed: bool,
    pub skipped: bool,
}

impl OutcomeFlags {
    pub const ALL: Self = Self {
        passed: true,
        failed: true,
        skipped: true,
    };

    pub const NONE: Self = Self {
        passed: false,
        failed: false,
        skipped: false,
    };

    /// Collect the categories occurring in an outcome sequence.
    pub fn collect(outcomes: impl Iterator<Item = Outcome>) -> Self {
        let mut flags = Self::NONE;
        for outcome in outcomes {
            match outcome {
                Outcome::Passed => flags.passed = true,
                Outcome::Failed => flags.failed = true,
                Outcome::Skipped => flags.skipped = true,
            }
        }
        flags
    }

    pub fn allows(&self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Passed => self.passed,
            Outcome::Failed => self.failed,
            Outcome::Skipped => self.skipped,
        }
    }

    pub fn any(&self) -> bool {
        self.passed || self.failed || self.skipped
    }
}

/// Keep the step iff its outcome's flag is active.
pub fn filter_step(step: &Step, flags: OutcomeFlags) -> Option<Step> {
    if flags.allows(step.outcome) {
        Some(step.clone())
    } else {
        None
    }
}

/// Detail-view filter: the execution is always kept (the detail table shows
/// its header regardless), only the step rows are narrowed. The resulting
/// step sequence may be empty.
pub fn filter_execution_detail(execution: &Execution, flags: OutcomeFlags) -> Execution {
    let steps = execution
        .steps
        .iter()
        .filter_map(|step| filter_step(step, flags))
        .collect();
    Execution {
        steps,
        ..execution.clone()
    }
}

/// List-view filter: drop the whole execution when its own outcome is
/// filtered out; otherwise keep it with steps untouched (list filtering works
/// at execution granularity, not step granularity).
pub fn filter_execution(execution: &Execution, flags: OutcomeFlags) -> Option<Execution> {
    if flags.allows(execution.outcome) {
        Some(execution.clone())
    } else {
        None
    }
}

/// Keep the test with only its surviving executions; `None` when no
/// execution survives.
pub fn filter_test(test: &Test, flags: OutcomeFlags) -> Option<Test> {
    let executions: Vec<Execution> = test
        .executions
        .iter()
        .filter_map(|execution| filter_execution(execution, flags))
        .collect();

    if executions.is_empty() {
        return None;
    }

    Some(Test {
        executions,
        ..test.clone()
    })
}

/// Filter a test sequence, preserving order among survivors.
pub fn filter_tests(tests: &[Test], flags: OutcomeFlags) -> Vec<Test> {
    tests
        .iter()
        .filter_map(|test| filter_test(test, flags))
        .collect()
}
