//! View-model for one test's detail section

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::filter;
use crate::state::FilterState;
use crate::viewmodel::{ExecutionModel, Observer};
use crate::{Execution, Test};

/// Holds one test, an [`ExecutionModel`] per execution, and the execution
/// selected for the detail table. The executions list itself is filtered by
/// the overview's flags, never by local state — see
/// [`overview_filters_changed`](IndividualTestModel::overview_filters_changed).
pub struct IndividualTestModel {
    test: Test,
    execution_models: Vec<ExecutionModel>,
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    /// `None` once the overview filter removes every execution of this test
    filtered: Option<Test>,
    selected_execution_id: Option<String>,
    observer: Option<Observer>,
}

impl IndividualTestModel {
    pub fn new(test: Test) -> Self {
        let execution_models = test
            .executions
            .iter()
            .cloned()
            .map(ExecutionModel::new)
            .collect();
        // the first execution is selected by default
        let selected_execution_id = test.executions.first().map(|e| e.id.clone());

        let inner = Rc::new(RefCell::new(Inner {
            filtered: Some(test.clone()),
            selected_execution_id,
            observer: None,
        }));

        Self {
            test,
            execution_models,
            inner,
        }
    }

    /// Register the renderer here and on every child execution model,
    /// replacing any previous registration.
    pub fn register(&self, observer: Observer) {
        self.inner.borrow_mut().observer = Some(Rc::clone(&observer));
        for model in &self.execution_models {
            model.register(Rc::clone(&observer));
        }
    }

    pub fn test(&self) -> &Test {
        &self.test
    }

    pub fn filtered_test(&self) -> Ref<'_, Option<Test>> {
        Ref::map(self.inner.borrow(), |inner| &inner.filtered)
    }

    pub fn execution_models(&self) -> &[ExecutionModel] {
        &self.execution_models
    }

    pub fn selected_execution_id(&self) -> Option<String> {
        self.inner.borrow().selected_execution_id.clone()
    }

    /// The selection UI guarantees the id exists; no validation here.
    pub fn set_selected_execution_id(&self, id: &str) {
        self.inner.borrow_mut().selected_execution_id = Some(id.to_string());
    }

    pub fn selected_execution_model(&self) -> Option<&ExecutionModel> {
        let selected = self.inner.borrow().selected_execution_id.clone()?;
        self.execution_models
            .iter()
            .find(|model| model.execution().id == selected)
    }

    /// The selected execution's detail projection. A lookup miss is handled
    /// defensively: a diagnostic goes to stderr and the caller gets `None`.
    pub fn filtered_selected_execution(&self) -> Option<Execution> {
        match self.selected_execution_model() {
            Some(model) => Some(model.filtered_execution().clone()),
            None => {
                eprintln!(
                    "report-view: no execution with id {:?} among {} executions of `{}`",
                    self.selected_execution_id(),
                    self.execution_models.len(),
                    self.test.name,
                );
                None
            }
        }
    }

    /// Filter state of the selected execution's step table.
    pub fn selected_execution_filter_state(&self) -> Option<&FilterState> {
        self.selected_execution_model()
            .map(ExecutionModel::filter_state)
    }

    /// Overview cascade entry point: re-derive the filtered view from the
    /// overview's flags and repair the selection when the selected execution
    /// was filtered out. When the whole test filters away the selection is
    /// left as-is.
    pub fn overview_filters_changed(&self, overview: &FilterState) {
        let filtered = filter::filter_test(&self.test, overview.active_flags());
        {
            let mut inner = self.inner.borrow_mut();
            if let Some(filtered) = &filtered {
                let selected_survives = match &inner.selected_execution_id {
                    Some(id) => filtered.executions.iter().any(|e| &e.id == id),
                    None => false,
                };
                if !selected_survives {
                    // filter_test never returns an empty execution list
                    inner.selected_execution_id =
                        filtered.executions.first().map(|e| e.id.clone());
                }
            }
            inner.filtered = filtered;
        }
        self.notify();
    }

    fn notify(&self) {
        let observer = self.inner.borrow().observer.clone();
        if let Some(observer) = observer {
            observer.update();
        }
    }
}
