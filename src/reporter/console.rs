//! Console renderer with colored output
//!
//! Implements [`Renderable`]: every `update()` re-renders the whole report
//! from the model's read accessors, never incrementally.

use colored::Colorize;
use std::rc::Weak;

use crate::viewmodel::{IndividualTestModel, Model, Renderable};
use crate::{Outcome, Test};

/// Renderer for terminal output
pub struct ConsoleReporter {
    model: Weak<Model>,
    /// Whether to use colors
    use_colors: bool,
}

impl ConsoleReporter {
    /// Create a reporter over a model. The reporter does not keep the model
    /// alive; it renders nothing once the model is gone.
    pub fn new(model: Weak<Model>) -> Self {
        Self {
            model,
            use_colors: true,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn render(&self, model: &Model) {
        self.print_overview(model);
        for test_model in model.test_models() {
            self.print_test(model, test_model);
        }
    }

    fn print_overview(&self, model: &Model) {
        let overview = model.overview();
        if !overview.filter_state().visible() {
            return;
        }

        let filtered = overview.filtered_tests();
        println!(
            "Overview: {} of {} tests",
            filtered.len(),
            overview.tests().len()
        );
        for test in filtered.iter() {
            let outcome = test
                .outcome()
                .map(|o| self.colorize_outcome(o))
                .unwrap_or_else(|| "unknown".to_string());
            let uniform = if test.has_same_outcome() { "" } else { " *" };
            println!(
                "  {} [{}]{} — {} execution(s)",
                test.name,
                outcome,
                uniform,
                test.executions.len()
            );
        }
        println!();
    }

    fn print_test(&self, model: &Model, test_model: &IndividualTestModel) {
        let filtered = test_model.filtered_test();
        let Some(test) = filtered.as_ref() else {
            // every execution filtered out: the section disappears entirely
            return;
        };

        println!("{} ({})", test.name, test.node_id);
        if !test.description.is_empty() {
            println!("  {}", test.description);
        }
        self.print_executions(model, test, test_model);
        drop(filtered);
        self.print_selected_execution(test_model);
        println!();
    }

    fn print_executions(&self, model: &Model, test: &Test, test_model: &IndividualTestModel) {
        // tally against the unfiltered test, e.g. "2/5"
        let total = model
            .overview()
            .tests()
            .iter()
            .find(|t| t.id == test.id)
            .map(|t| t.executions.len())
            .unwrap_or(test.executions.len());
        let selected = test_model.selected_execution_id();

        println!("  executions ({}/{}):", test.executions.len(), total);
        for execution in &test.executions {
            let marker = if selected.as_deref() == Some(execution.id.as_str()) {
                ">"
            } else {
                " "
            };
            println!(
                "  {} {} on {} [{}] {:.2}s",
                marker,
                execution.id,
                execution.device,
                self.colorize_outcome(execution.outcome),
                execution.duration
            );
        }
    }

    fn print_selected_execution(&self, test_model: &IndividualTestModel) {
        let visible = test_model
            .selected_execution_filter_state()
            .map(|state| state.visible())
            .unwrap_or(false);
        if !visible {
            return;
        }

        let Some(execution) = test_model.filtered_selected_execution() else {
            return;
        };
        println!("  steps of execution {}:", execution.id);
        for step in &execution.steps {
            println!(
                "    {} {} [{}]",
                step.id,
                step.description,
                self.colorize_outcome(step.outcome)
            );
        }
    }

    fn colorize_outcome(&self, outcome: Outcome) -> String {
        if !self.use_colors {
            return outcome.to_string();
        }
        match outcome {
            Outcome::Passed => outcome.to_string().green().to_string(),
            Outcome::Failed => outcome.to_string().red().to_string(),
            Outcome::Skipped => outcome.to_string().yellow().to_string(),
        }
    }
}

impl Renderable for ConsoleReporter {
    fn update(&self) {
        if let Some(model) = self.model.upgrade() {
            self.render(&model);
        }
    }
}
