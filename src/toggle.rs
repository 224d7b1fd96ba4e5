//! Observable boolean primitive driving filter propagation

use std::cell::Cell;
use std::rc::Rc;

/// Change callback fired by [`Toggle::set`]
pub type OnChange = Rc<dyn Fn()>;

/// An observable boolean. `set()` always fires the callback, including on a
/// same-value set; propagation relies on that, callers decide what "change"
/// means.
pub struct Toggle {
    active: Cell<bool>,
    on_change: Option<OnChange>,
}

impl Toggle {
    pub fn new(active: bool, on_change: Option<OnChange>) -> Self {
        Self {
            active: Cell::new(active),
            on_change,
        }
    }

    pub fn active(&self) -> bool {
        self.active.get()
    }

    /// Assign the value, then fire the callback. The callback chain completes
    /// before this returns, keeping cascaded updates strictly sequential.
    pub fn set(&self, active: bool) {
        self.active.set(active);
        if let Some(on_change) = &self.on_change {
            on_change();
        }
    }
}

impl std::fmt::Debug for Toggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toggle")
            .field("active", &self.active.get())
            .field("has_callback", &self.on_change.is_some())
            .finish()
    }
}
