//! View-model for one execution's step-detail table

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::filter::{self, OutcomeFlags};
use crate::state::FilterState;
use crate::toggle::OnChange;
use crate::viewmodel::Observer;
use crate::Execution;

/// Holds one execution and the filtered projection of its steps. The filter
/// state is derived from the outcomes present among the steps; its filtering
/// is independent per execution and never touched by the overview cascade.
pub struct ExecutionModel {
    execution: Rc<Execution>,
    filters: Rc<FilterState>,
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    filtered: Execution,
    observer: Option<Observer>,
}

impl ExecutionModel {
    pub fn new(execution: Execution) -> Self {
        let execution = Rc::new(execution);
        let inner = Rc::new(RefCell::new(Inner {
            filtered: (*execution).clone(),
            observer: None,
        }));

        let present = OutcomeFlags::collect(execution.steps.iter().map(|s| s.outcome));
        let filters = Rc::new_cyclic(|weak: &Weak<FilterState>| {
            let on_visible: OnChange = {
                let inner = Rc::clone(&inner);
                Rc::new(move || notify(&inner))
            };
            let on_filter: OnChange = {
                let weak = weak.clone();
                let inner = Rc::clone(&inner);
                let execution = Rc::clone(&execution);
                Rc::new(move || {
                    let Some(filters) = weak.upgrade() else { return };
                    let filtered =
                        filter::filter_execution_detail(&execution, filters.active_flags());
                    inner.borrow_mut().filtered = filtered;
                    notify(&inner);
                })
            };
            FilterState::from_categories(present, on_visible, on_filter)
        });

        Self {
            execution,
            filters,
            inner,
        }
    }

    /// Register the renderer, replacing any previous registration.
    pub fn register(&self, observer: Observer) {
        self.inner.borrow_mut().observer = Some(observer);
    }

    pub fn execution(&self) -> &Execution {
        &self.execution
    }

    /// The detail projection: always the same execution, with only the step
    /// rows narrowed (possibly to none).
    pub fn filtered_execution(&self) -> Ref<'_, Execution> {
        Ref::map(self.inner.borrow(), |inner| &inner.filtered)
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filters
    }
}

fn notify(inner: &Rc<RefCell<Inner>>) {
    // clone out of the borrow so the renderer can read accessors freely
    let observer = inner.borrow().observer.clone();
    if let Some(observer) = observer {
        observer.update();
    }
}
