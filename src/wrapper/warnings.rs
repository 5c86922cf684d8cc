//! Validation/Warning Layer - misuse diagnostics.
//!
//! An explicitly controlled prop without its handler renders a
//! read-only control; that is almost always a caller mistake, so each
//! render emits one warning per offending pair. Warnings flow through
//! an injectable sink (swappable per thread for deterministic tests,
//! defaulting to the process-wide `tracing` logger) and never affect
//! rendering.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::Props;

use super::pairs::PairSpec;

// =============================================================================
// Warning Sink
// =============================================================================

/// Destination for misuse warnings.
pub trait WarningSink {
    fn warn(&self, message: &str);
}

/// Default sink: forwards to the process-wide logger.
struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Sink collecting warnings in memory, for tests and embedders that
/// assert on diagnostics.
#[derive(Clone, Default)]
pub struct CollectingSink {
    messages: Rc<RefCell<Vec<String>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings collected so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Number of warnings collected so far.
    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl WarningSink for CollectingSink {
    fn warn(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

thread_local! {
    static SINK: RefCell<Rc<dyn WarningSink>> = RefCell::new(Rc::new(TracingSink));
}

/// Replace the current warning sink.
pub fn set_warning_sink(sink: Rc<dyn WarningSink>) {
    SINK.with(|current| *current.borrow_mut() = sink);
}

/// Restore the default logging sink (for testing).
pub fn reset_warning_sink() {
    SINK.with(|current| *current.borrow_mut() = Rc::new(TracingSink));
}

fn emit(message: &str) {
    let sink = SINK.with(|current| current.borrow().clone());
    sink.warn(message);
}

// =============================================================================
// Missing-Handler Check
// =============================================================================

/// Warn for every pair whose controlled prop was explicitly supplied
/// this render without its handler.
///
/// `explicit` holds one flag per pair, in spec order, from the pair
/// resolution step.
pub(crate) fn warn_missing_handlers(
    component_name: &str,
    props: &Props,
    pairs: &PairSpec,
    explicit: &[bool],
) {
    for (pair, &is_explicit) in pairs.iter().zip(explicit) {
        if is_explicit && props.handler(&pair.handler).is_none() {
            emit(&format!(
                "You have provided a `{}` prop to `{}` without an `{}` handler. \
                 This will render a read-only field.",
                pair.controlled, component_name, pair.handler
            ));
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
