//! View-model for the overview table

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::filter::{self, OutcomeFlags};
use crate::state::FilterState;
use crate::toggle::OnChange;
use crate::viewmodel::Observer;
use crate::Test;

/// Callback fanning a filter change out to the individual-test models.
pub type CascadeFn = Rc<dyn Fn(&FilterState)>;

/// Holds the full test list and its filtered projection. The filter state is
/// derived from the tests' derived outcomes. On every filter change the
/// cache is replaced, the observer notified, and the cascade invoked — in
/// that order, so per-test views read a consistent overview.
pub struct OverviewModel {
    tests: Rc<Vec<Test>>,
    filters: Rc<FilterState>,
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    filtered: Vec<Test>,
    observer: Option<Observer>,
}

impl OverviewModel {
    pub fn new(tests: Vec<Test>, on_filters_changed: CascadeFn) -> Self {
        let tests = Rc::new(tests);
        let inner = Rc::new(RefCell::new(Inner {
            filtered: (*tests).clone(),
            observer: None,
        }));

        let present = OutcomeFlags::collect(tests.iter().filter_map(Test::outcome));
        let filters = Rc::new_cyclic(|weak: &Weak<FilterState>| {
            let on_visible: OnChange = {
                let inner = Rc::clone(&inner);
                Rc::new(move || notify(&inner))
            };
            let on_filter: OnChange = {
                let weak = weak.clone();
                let inner = Rc::clone(&inner);
                let tests = Rc::clone(&tests);
                let cascade = Rc::clone(&on_filters_changed);
                Rc::new(move || {
                    let Some(filters) = weak.upgrade() else { return };
                    let filtered = filter::filter_tests(&tests, filters.active_flags());
                    inner.borrow_mut().filtered = filtered;
                    notify(&inner);
                    cascade(&filters);
                })
            };
            FilterState::from_categories(present, on_visible, on_filter)
        });

        Self {
            tests,
            filters,
            inner,
        }
    }

    /// Register the renderer, replacing any previous registration.
    pub fn register(&self, observer: Observer) {
        self.inner.borrow_mut().observer = Some(observer);
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn filtered_tests(&self) -> Ref<'_, Vec<Test>> {
        Ref::map(self.inner.borrow(), |inner| &inner.filtered)
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filters
    }
}

fn notify(inner: &Rc<RefCell<Inner>>) {
    let observer = inner.borrow().observer.clone();
    if let Some(observer) = observer {
        observer.update();
    }
}
