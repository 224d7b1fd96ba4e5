//! View-models: entity + filter state + filtered cache + change notification
//!
//! Each view-model owns one immutable entity, a `FilterState` derived from
//! the outcomes its children actually have, and a filtered cache seeded to
//! the unfiltered value. Toggle callbacks replace the cache wholesale and
//! then notify the registered renderer. Everything is single-threaded; state
//! lives behind `Rc<RefCell<_>>` and borrows are always released before a
//! renderer runs, so `update()` may read any accessor.

mod execution;
mod individual;
mod overview;

pub use execution::ExecutionModel;
pub use individual::IndividualTestModel;
pub use overview::OverviewModel;

use std::rc::Rc;

use crate::state::FilterState;
use crate::Test;

/// Renderer contract: re-render idempotently from the current filtered
/// state. Never incremental; the view-model has already replaced its cache
/// when this runs.
pub trait Renderable {
    fn update(&self);
}

/// A registered renderer. The view-model does not manage its lifetime.
pub type Observer = Rc<dyn Renderable>;

/// Root of the view-model graph: one overview plus one individual-test model
/// per test. Overview filter changes cascade into every individual model.
pub struct Model {
    overview: OverviewModel,
    test_models: Rc<Vec<IndividualTestModel>>,
}

impl Model {
    pub fn new(tests: Vec<Test>) -> Self {
        let test_models: Rc<Vec<IndividualTestModel>> = Rc::new(
            tests
                .iter()
                .cloned()
                .map(IndividualTestModel::new)
                .collect(),
        );

        let cascade: Rc<dyn Fn(&FilterState)> = {
            let test_models = Rc::clone(&test_models);
            Rc::new(move |filters: &FilterState| {
                for model in test_models.iter() {
                    model.overview_filters_changed(filters);
                }
            })
        };

        let overview = OverviewModel::new(tests, cascade);
        Self {
            overview,
            test_models,
        }
    }

    pub fn overview(&self) -> &OverviewModel {
        &self.overview
    }

    pub fn test_models(&self) -> &[IndividualTestModel] {
        &self.test_models
    }
}
