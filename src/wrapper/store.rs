//! Internal State Store - per-wrapper-instance value tracking.
//!
//! Holds the current value of every internally tracked prop. Entries
//! are the engine's per-instance state cells (signals), so embedders
//! can subscribe to a tracked value from outside without the wrapper
//! knowing. An absent entry means the prop was never given a value:
//! the wrapped control then receives no value at all.
//!
//! Mutation discipline: `seed` runs only while a render pass resolves
//! props; `set` runs only from the matching handler interceptor. No
//! other code writes these entries.

use crate::engine;
use crate::types::PropValue;

/// View over one wrapper instance's tracked values.
#[derive(Clone, Copy)]
pub(crate) struct ValueStore {
    index: usize,
}

impl ValueStore {
    pub(crate) fn new(index: usize) -> Self {
        Self { index }
    }

    /// Current entry for a tracked prop; `None` = unset.
    pub(crate) fn get(&self, name: &str) -> Option<PropValue> {
        engine::get_state(self.index, name)
    }

    /// Initialize an entry during a render pass. Never re-renders.
    pub(crate) fn seed(&self, name: &str, value: PropValue) {
        engine::seed_state(self.index, name, value);
    }

    /// Overwrite an entry and re-render the wrapper synchronously.
    ///
    /// Called only by the interceptor for `name`, after its tap and
    /// before the caller's handler.
    pub(crate) fn set(&self, name: &str, value: PropValue) {
        engine::set_state(self.index, name, value);
    }
}

// =============================================================================
// Tests
// =============================================================================
