//! Integration tests over the full view-model graph

use std::cell::RefCell;
use std::rc::Rc;

use report_view::parser::parse_report;
use report_view::viewmodel::{Model, Renderable};
use report_view::Outcome;

const REPORT: &str = r#"{
    "tests": {
        "boot_test": {
            "node_id": "suite.py::boot_test",
            "name": "boot_test",
            "description": "boots the device",
            "self_test": "false",
            "executions": {
                "0": {
                    "device": "dev-a",
                    "outcome": "passed",
                    "duration": 1.5,
                    "steps": {
                        "0": { "description": "power on", "outcome": "passed" },
                        "1": { "description": "wait for prompt", "outcome": "passed" }
                    }
                },
                "1": {
                    "device": "dev-b",
                    "outcome": "failed",
                    "duration": 2.0,
                    "steps": {
                        "0": { "description": "power on", "outcome": "passed" },
                        "1": { "description": "wait for prompt", "outcome": "failed" }
                    }
                }
            }
        },
        "probe_test": {
            "node_id": "suite.py::probe_test",
            "name": "probe_test",
            "description": "probes the bus",
            "self_test": "false",
            "executions": {
                "0": {
                    "device": "dev-a",
                    "outcome": "skipped",
                    "duration": 0.0,
                    "steps": {}
                }
            }
        }
    }
}"#;

fn model() -> Rc<Model> {
    Rc::new(Model::new(parse_report(REPORT).unwrap()))
}

struct Recorder {
    updates: RefCell<usize>,
}

impl Recorder {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            updates: RefCell::new(0),
        })
    }

    fn count(&self) -> usize {
        *self.updates.borrow()
    }
}

impl Renderable for Recorder {
    fn update(&self) {
        *self.updates.borrow_mut() += 1;
    }
}

#[test]
fn model_wraps_every_test() {
    let model = model();
    assert_eq!(model.overview().tests().len(), 2);
    assert_eq!(model.test_models().len(), 2);
    assert_eq!(model.overview().filtered_tests().len(), 2);
}

#[test]
fn overview_filter_state_reflects_derived_outcomes() {
    let model = model();
    let filters = model.overview().filter_state();
    // boot_test derives passed (first execution), probe_test skipped; no
    // test derives failed
    assert!(filters.passed_active());
    assert!(!filters.failed_active());
    assert!(filters.skipped_active());
    assert!(filters.total_active());
}

#[test]
fn overview_toggle_cascades_into_test_models() {
    let model = model();
    model.overview().filter_state().toggle_passed();

    // overview drops boot_test (derived passed)
    {
        let filtered = model.overview().filtered_tests();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "probe_test");
    }

    // the cascade re-filters each test with the overview's flags; with
    // passed off and no failed toggle, neither boot_test execution survives
    let boot = &model.test_models()[0];
    assert!(boot.filtered_test().is_none());

    let probe = &model.test_models()[1];
    let filtered = probe.filtered_test();
    assert_eq!(filtered.as_ref().unwrap().executions.len(), 1);
}

#[test]
fn selection_repair_scenario() {
    let model = model();
    let boot = &model.test_models()[0];
    boot.set_selected_execution_id("1");

    // no test derives failed, so the overview has no failed toggle and any
    // cascade filters with failed inactive: execution 1 (failed) disappears
    // and the selection falls back to the first survivor
    model.overview().filter_state().toggle_skipped();
    assert_eq!(boot.selected_execution_id().as_deref(), Some("0"));
    let filtered = boot.filtered_test();
    let executions = &filtered.as_ref().unwrap().executions;
    assert_eq!(executions.len(), 1);
    assert_eq!(executions[0].id, "0");
}

#[test]
fn overview_notifies_then_cascade_notifies_tests() {
    let model = model();
    let overview_renderer = Recorder::new();
    let boot_renderer = Recorder::new();
    model.overview().register(overview_renderer.clone());
    model.test_models()[0].register(boot_renderer.clone());

    model.overview().filter_state().toggle_skipped();
    // one category set; total stays (mixed) -> exactly one overview update
    // and one cascaded update per test model
    assert_eq!(overview_renderer.count(), 1);
    assert_eq!(boot_renderer.count(), 1);
}

#[test]
fn toggle_total_fans_out_per_category() {
    let model = model();
    let overview_renderer = Recorder::new();
    model.overview().register(overview_renderer.clone());

    // total + passed + skipped present (no failed-derived test): three sets,
    // each firing refilter + notify + cascade
    model.overview().filter_state().toggle_total();
    assert_eq!(overview_renderer.count(), 3);
    assert_eq!(model.overview().filtered_tests().len(), 0);

    model.overview().filter_state().toggle_total();
    assert_eq!(model.overview().filtered_tests().len(), 2);
}

#[test]
fn visibility_is_local_to_the_overview() {
    let model = model();
    let overview_renderer = Recorder::new();
    let boot_renderer = Recorder::new();
    model.overview().register(overview_renderer.clone());
    model.test_models()[0].register(boot_renderer.clone());

    model.overview().filter_state().toggle_visible();
    assert!(!model.overview().filter_state().visible());
    assert_eq!(overview_renderer.count(), 1);
    assert_eq!(boot_renderer.count(), 0);
    // no refiltering happened
    assert_eq!(model.overview().filtered_tests().len(), 2);
}

#[test]
fn execution_detail_filtering_is_independent_of_the_overview() {
    let model = model();
    let boot = &model.test_models()[0];

    // narrow the selected execution's steps to failures only
    let detail_filters = boot.selected_execution_filter_state().unwrap();
    detail_filters.toggle_passed();
    let detail = boot.filtered_selected_execution().unwrap();
    assert!(detail.steps.is_empty(), "execution 0 has only passed steps");

    // overview state untouched
    assert!(model.overview().filter_state().passed_active());
    assert_eq!(model.overview().filtered_tests().len(), 2);
}

#[test]
fn no_op_filter_preserves_all_values() {
    let tests = parse_report(REPORT).unwrap();
    let filtered =
        report_view::filter::filter_tests(&tests, report_view::filter::OutcomeFlags::ALL);
    assert_eq!(filtered, tests);
}

#[test]
fn derived_outcomes_from_parsed_report() {
    let tests = parse_report(REPORT).unwrap();
    assert_eq!(tests[0].outcome(), Some(Outcome::Passed));
    assert!(!tests[0].has_same_outcome());
    assert_eq!(tests[1].outcome(), Some(Outcome::Skipped));
    assert!(tests[1].has_same_outcome());
}
