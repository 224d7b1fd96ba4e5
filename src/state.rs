//! Aggregate filter state for one report table
//!
//! A table owns a `visible` toggle plus up to four category toggles. A
//! category toggle exists only when the table has at least one row with that
//! outcome; `total` exists iff any category does. Reading an absent toggle
//! yields `false`, toggling it is a no-op.

use crate::filter::OutcomeFlags;
use crate::toggle::{OnChange, Toggle};

/// Toggle aggregate governing one table's display.
///
/// Aggregate invariant, maintained lazily on every category edit: `total` is
/// forced active when all present categories are active and forced inactive
/// when none are; mixed states leave `total` at its previous value.
pub struct FilterState {
    visible: Toggle,
    total: Option<Toggle>,
    passed: Option<Toggle>,
    failed: Option<Toggle>,
    skipped: Option<Toggle>,
}

impl FilterState {
    pub fn new(
        visible: Toggle,
        total: Option<Toggle>,
        passed: Option<Toggle>,
        failed: Option<Toggle>,
        skipped: Option<Toggle>,
    ) -> Self {
        Self {
            visible,
            total,
            passed,
            failed,
            skipped,
        }
    }

    /// Build the toggle set for a table whose rows cover the categories in
    /// `present`. All toggles start active; `on_visible` fires for the
    /// visibility toggle, `on_filter` for total and every category toggle.
    pub fn from_categories(present: OutcomeFlags, on_visible: OnChange, on_filter: OnChange) -> Self {
        let category = |exists: bool| exists.then(|| Toggle::new(true, Some(on_filter.clone())));

        let passed = category(present.passed);
        let failed = category(present.failed);
        let skipped = category(present.skipped);
        let total = category(present.any());
        let visible = Toggle::new(true, Some(on_visible));

        Self::new(visible, total, passed, failed, skipped)
    }

    pub fn visible(&self) -> bool {
        self.visible.active()
    }

    pub fn total_active(&self) -> bool {
        active_or_false(&self.total)
    }

    pub fn passed_active(&self) -> bool {
        active_or_false(&self.passed)
    }

    pub fn failed_active(&self) -> bool {
        active_or_false(&self.failed)
    }

    pub fn skipped_active(&self) -> bool {
        active_or_false(&self.skipped)
    }

    /// Current category reads packed for the filter transforms.
    pub fn active_flags(&self) -> OutcomeFlags {
        OutcomeFlags {
            passed: self.passed_active(),
            failed: self.failed_active(),
            skipped: self.skipped_active(),
        }
    }

    /// Flip visibility. Fires only the visibility callback; category toggles
    /// are unaffected.
    pub fn toggle_visible(&self) {
        self.visible.set(!self.visible.active());
    }

    /// Flip `total`, then force every present category to the new value.
    /// Cascade order is total, passed, failed, skipped; each `set()` runs its
    /// callback to completion before the next fires.
    pub fn toggle_total(&self) {
        if let Some(total) = &self.total {
            let active = !total.active();
            total.set(active);
            set_if_present(&self.passed, active);
            set_if_present(&self.failed, active);
            set_if_present(&self.skipped, active);
        }
    }

    pub fn toggle_passed(&self) {
        if let Some(passed) = &self.passed {
            passed.set(!passed.active());
            self.recompute_total();
        }
    }

    pub fn toggle_failed(&self) {
        if let Some(failed) = &self.failed {
            failed.set(!failed.active());
            self.recompute_total();
        }
    }

    pub fn toggle_skipped(&self) {
        if let Some(skipped) = &self.skipped {
            skipped.set(!skipped.active());
            self.recompute_total();
        }
    }

    fn recompute_total(&self) {
        if self.all_categories_active() {
            set_if_present(&self.total, true);
        } else if self.no_categories_active() {
            set_if_present(&self.total, false);
        }
        // mixed: total keeps its previous boundary value
    }

    fn all_categories_active(&self) -> bool {
        let inactive = |toggle: &Option<Toggle>| matches!(toggle, Some(t) if !t.active());
        !inactive(&self.passed) && !inactive(&self.failed) && !inactive(&self.skipped)
    }

    fn no_categories_active(&self) -> bool {
        let active = |toggle: &Option<Toggle>| matches!(toggle, Some(t) if t.active());
        !active(&self.passed) && !active(&self.failed) && !active(&self.skipped)
    }
}

fn active_or_false(toggle: &Option<Toggle>) -> bool {
    toggle.as_ref().map(Toggle::active).unwrap_or(false)
}

fn set_if_present(toggle: &Option<Toggle>, active: bool) {
    if let Some(toggle) = toggle {
        toggle.set(active);
    }
}
