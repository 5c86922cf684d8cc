//! # uncontrollable
//!
//! Controlled/uncontrolled prop bridging for reactive UI components.
//!
//! A *controlled* component's value props are owned by its parent: the
//! value arrives as a prop and changes only through a callback prop.
//! [`wrap`] turns such a component into one that also works
//! *uncontrolled*: whenever the parent supplies no explicit value for a
//! paired prop, the wrapper tracks the value internally, seeds it from
//! a `default`-prefixed prop, updates it from the pair's change
//! handler, and surfaces the new value on the next render.
//!
//! ## Architecture
//!
//! ```text
//! incoming props → link normalizer → pair resolver ⇄ internal store
//!                → validation → handler interception → wrapped render
//! ```
//!
//! The wrapper performs no rendering of its own: it only decides which
//! value and which handler the wrapped component receives. The host
//! [`engine`] supplies the contract the wrapper builds on: per-instance
//! state with synchronous re-render on change, named refs to mounted
//! instances, and mount/unmount lifecycle.
//!
//! ## Modules
//!
//! - [`types`] - Dynamic prop values, prop bags, links, callbacks
//! - [`engine`] - Host engine contract and reference implementation
//! - [`wrapper`] - `wrap()`, pair specs, taps, warning sink

pub mod engine;
pub mod types;
pub mod wrapper;

// Re-export commonly used items
pub use types::{
    default_prop_name, link_prop_name, Cleanup, HandlerFn, LinkValue, PropEntry, PropType,
    PropValue, Props,
};

pub use wrapper::{
    reset_warning_sink, set_warning_sink, tap, wrap, CollectingSink, Pair, PairSpec,
    PairSpecError, TapFn, TapMap, WarningSink, WrapperHandle,
};
