//! Handler Interceptor - taps, internal tracking, caller handlers.
//!
//! Each handler prop named in the pair spec is replaced by an
//! interceptor before the wrapped component sees it. On invocation the
//! interceptor runs, in fixed order:
//!
//! 1. the tap registered for the handler, if any
//! 2. the internal-state update, when the prop is internally tracked
//!    this render (the engine may re-render the wrapper synchronously
//!    inside this step)
//! 3. the caller-supplied handler, if any
//!
//! The caller handler always runs last within the original invocation,
//! even when step 2's state write has already re-rendered the wrapper.
//! Panics from taps or caller handlers are not caught; interception
//! must not mask application errors.

use std::collections::HashMap;
use std::rc::Rc;

use crate::engine;
use crate::types::{HandlerFn, PropValue};

use super::store::ValueStore;

// =============================================================================
// Wrapper Handle
// =============================================================================

/// View of one mounted wrapper instance, handed to taps.
///
/// Taps receive the handle as an explicit first argument rather than an
/// ambient binding, so a tap can read the wrapper's tracked values and
/// reach the mounted inner instance.
#[derive(Clone, Copy, Debug)]
pub struct WrapperHandle {
    index: usize,
}

impl WrapperHandle {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Engine index of the wrapper instance.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Snapshot of all internally tracked values.
    pub fn values(&self) -> HashMap<String, PropValue> {
        engine::state_snapshot(self.index)
    }

    /// Current tracked value for one prop.
    pub fn value(&self, name: &str) -> Option<PropValue> {
        engine::get_state(self.index, name)
    }

    /// Engine index of the mounted wrapped component, once rendered.
    pub fn inner(&self) -> Option<usize> {
        engine::get_ref(self.index, "inner")
    }
}

// =============================================================================
// Taps
// =============================================================================

/// Interceptor function run before the normal handler chain.
pub type TapFn = Rc<dyn Fn(&WrapperHandle, &[PropValue])>;

/// Taps keyed by handler-prop name. Supplied once at wrap time.
pub type TapMap = HashMap<String, TapFn>;

/// Build a [`TapFn`] from a closure.
pub fn tap(tap: impl Fn(&WrapperHandle, &[PropValue]) + 'static) -> TapFn {
    Rc::new(tap)
}

// =============================================================================
// Interceptor Construction
// =============================================================================

/// Build the effective handler for one pair, for one render.
///
/// `tracked` is fixed per render: it reflects whether an explicit value
/// was supplied for the controlled prop when this render resolved.
pub(crate) fn make_interceptor(
    handle: WrapperHandle,
    controlled: String,
    tap: Option<TapFn>,
    tracked: bool,
    caller: Option<HandlerFn>,
) -> HandlerFn {
    Rc::new(move |args: &[PropValue]| {
        if let Some(ref tap) = tap {
            tap(&handle, args);
        }
        if tracked {
            let next = args.first().cloned().unwrap_or(PropValue::Null);
            ValueStore::new(handle.index()).set(&controlled, next);
        }
        if let Some(ref caller) = caller {
            caller(args);
        }
    })
}

// =============================================================================
// Tests
// =============================================================================
