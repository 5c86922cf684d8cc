//! Host rendering-engine contract and reference implementation.
//!
//! The wrapper core consumes a small engine contract: per-instance
//! mutable state with a render function re-invoked synchronously on
//! state change, named refs to mounted child instances, and mount /
//! unmount lifecycle. This module provides that contract for a
//! single-threaded embedder. It performs no drawing; a render pass is
//! the invocation of a component's render function with its current
//! props.

mod component;
mod instance;
mod registry;

pub use component::{Component, RenderFn};
pub use instance::{
    component_name, get_ref, get_state, instance_handler, instance_props, mount, seed_state,
    set_ref, set_state, state_cell, state_snapshot, unmount, update_props, InstanceFlags,
    MountHandle, RenderCtx,
};
pub use registry::{is_mounted, mounted_count, reset_engine};
