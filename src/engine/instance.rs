//! Mounted instances and the synchronous render driver.
//!
//! The engine's contract with components:
//! - `mount` creates an instance and renders it immediately
//! - a props or state change re-invokes the render function
//!   synchronously, before the call that caused it returns
//! - mounted child instances are reachable through named refs
//!
//! Re-renders never coalesce: every state or props write produces its
//! own render pass, so an observer counting renders sees each
//! intermediate value. The only exception is a write landing while the
//! same instance is already mid-render; that marks the instance dirty
//! and one more pass runs at the tail of the in-progress render.
//!
//! # Example
//!
//! ```ignore
//! use uncontrollable::engine::{mount, set_state, Component};
//! use uncontrollable::Props;
//!
//! let counter = Component::new("Counter", |ctx| {
//!     let count = ctx.state("count");
//!     // ...
//! });
//!
//! let handle = mount(&counter, Props::new());
//! set_state(handle.index(), "count", 1); // re-renders before returning
//! handle.unmount();
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::types::{HandlerFn, Props, PropValue};

use super::component::Component;
use super::registry;

// =============================================================================
// Instance Flags
// =============================================================================

bitflags::bitflags! {
    /// Lifecycle flags for a mounted instance.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InstanceFlags: u8 {
        const MOUNTED = 1 << 0;
        /// A render pass for this instance is on the stack.
        const RENDERING = 1 << 1;
        /// A state write landed mid-render; one more pass is owed.
        const DIRTY = 1 << 2;
    }
}

// =============================================================================
// Instance Record
// =============================================================================

/// One mounted component instance.
pub(crate) struct Instance {
    pub(crate) component: Rc<Component>,
    /// Current props, replaced wholesale by the parent on update.
    pub(crate) props: RefCell<Props>,
    /// Per-key state cells. Absent key = state never written.
    ///
    /// Cells are real signals: embedder code may subscribe to them with
    /// `effect`/`derived` without the engine knowing.
    pub(crate) state: RefCell<HashMap<String, Signal<PropValue>>>,
    /// Named refs to mounted child instances.
    pub(crate) refs: RefCell<HashMap<String, usize>>,
    /// Child instances in render order.
    pub(crate) children: RefCell<Vec<usize>>,
    pub(crate) flags: Cell<InstanceFlags>,
    /// Child slot cursor, reset at the start of each render pass.
    pub(crate) render_cursor: Cell<usize>,
}

fn add_flag(instance: &Instance, flag: InstanceFlags) {
    instance.flags.set(instance.flags.get() | flag);
}

fn clear_flag(instance: &Instance, flag: InstanceFlags) {
    let mut flags = instance.flags.get();
    flags.remove(flag);
    instance.flags.set(flags);
}

fn create_instance(component: &Rc<Component>, props: Props) -> usize {
    let instance = Rc::new(Instance {
        component: component.clone(),
        props: RefCell::new(props),
        state: RefCell::new(HashMap::new()),
        refs: RefCell::new(HashMap::new()),
        children: RefCell::new(Vec::new()),
        flags: Cell::new(InstanceFlags::MOUNTED),
        render_cursor: Cell::new(0),
    });
    registry::insert_instance(instance)
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`] that unmounts on drop.
pub struct MountHandle {
    index: usize,
}

impl MountHandle {
    /// Index of the mounted root instance.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Unmount now. Equivalent to dropping the handle.
    pub fn unmount(self) {}
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        release_instance(self.index);
    }
}

/// Mount a component and render it once.
pub fn mount(component: &Rc<Component>, props: Props) -> MountHandle {
    let index = create_instance(component, props);
    render_instance(index);
    MountHandle { index }
}

/// Unmount a handle. Mirrors [`MountHandle::unmount`] as a free function.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

// =============================================================================
// Render Driver
// =============================================================================

/// Run a render pass for an instance, immediately and synchronously.
///
/// Re-entrant calls for the same instance (a state write during its own
/// render) defer to one extra pass after the current one completes.
pub(crate) fn render_instance(index: usize) {
    let Some(instance) = registry::instance(index) else {
        return;
    };

    if instance.flags.get().contains(InstanceFlags::RENDERING) {
        add_flag(&instance, InstanceFlags::DIRTY);
        return;
    }

    add_flag(&instance, InstanceFlags::RENDERING);
    loop {
        instance.render_cursor.set(0);
        let render = instance.component.render.clone();
        let ctx = RenderCtx {
            index,
            instance: instance.clone(),
        };
        render(&ctx);
        prune_children(&instance);

        if instance.flags.get().contains(InstanceFlags::DIRTY) {
            clear_flag(&instance, InstanceFlags::DIRTY);
            continue;
        }
        break;
    }
    clear_flag(&instance, InstanceFlags::RENDERING);
}

/// Release children the last render pass no longer produced.
fn prune_children(instance: &Rc<Instance>) {
    let keep = instance.render_cursor.get();
    let extra: Vec<usize> = {
        let mut children = instance.children.borrow_mut();
        if children.len() > keep {
            children.split_off(keep)
        } else {
            Vec::new()
        }
    };
    for child in extra {
        release_instance(child);
    }
}

/// Release an instance and, recursively, its children.
pub(crate) fn release_instance(index: usize) {
    let Some(instance) = registry::remove_instance(index) else {
        return;
    };
    let children: Vec<usize> = instance.children.borrow_mut().drain(..).collect();
    for child in children {
        release_instance(child);
    }
    instance.flags.set(InstanceFlags::empty());
}

// =============================================================================
// Props
// =============================================================================

/// Replace an instance's props and re-render it synchronously.
pub fn update_props(index: usize, props: Props) {
    let Some(instance) = registry::instance(index) else {
        return;
    };
    *instance.props.borrow_mut() = props;
    render_instance(index);
}

/// Snapshot of an instance's current props (imperative access).
pub fn instance_props(index: usize) -> Option<Props> {
    registry::instance(index).map(|instance| instance.props.borrow().clone())
}

/// Fetch a handler from an instance's current props (imperative access).
///
/// This is the imperative change path: calling the returned handler is
/// observationally identical to the control firing the event itself.
pub fn instance_handler(index: usize, name: &str) -> Option<HandlerFn> {
    registry::instance(index).and_then(|instance| instance.props.borrow().handler(name))
}

/// Name of the component mounted at an index.
pub fn component_name(index: usize) -> Option<String> {
    registry::instance(index).map(|instance| instance.component.name.clone())
}

// =============================================================================
// State
// =============================================================================

fn write_state_cell(instance: &Instance, key: &str, value: PropValue) {
    let existing = instance.state.borrow().get(key).cloned();
    match existing {
        // Set outside the borrow: subscribers may re-enter the engine.
        Some(cell) => {
            cell.set(value);
        }
        None => {
            instance
                .state
                .borrow_mut()
                .insert(key.to_string(), signal(value));
        }
    }
}

/// Write a state entry and re-render the instance synchronously.
pub fn set_state(index: usize, key: &str, value: impl Into<PropValue>) {
    let Some(instance) = registry::instance(index) else {
        return;
    };
    write_state_cell(&instance, key, value.into());
    render_instance(index);
}

/// Write a state entry without scheduling a render.
///
/// For initialization from within a render pass; a normal write there
/// would mark the instance dirty and force a spurious extra pass.
pub fn seed_state(index: usize, key: &str, value: impl Into<PropValue>) {
    let Some(instance) = registry::instance(index) else {
        return;
    };
    write_state_cell(&instance, key, value.into());
}

/// Current value of a state entry.
pub fn get_state(index: usize, key: &str) -> Option<PropValue> {
    let cell = registry::instance(index).and_then(|instance| instance.state.borrow().get(key).cloned());
    cell.map(|cell| cell.get())
}

/// The signal cell backing a state entry, for outside subscribers.
pub fn state_cell(index: usize, key: &str) -> Option<Signal<PropValue>> {
    registry::instance(index).and_then(|instance| instance.state.borrow().get(key).cloned())
}

/// Snapshot of all state entries for an instance.
pub fn state_snapshot(index: usize) -> HashMap<String, PropValue> {
    let Some(instance) = registry::instance(index) else {
        return HashMap::new();
    };
    let cells: Vec<(String, Signal<PropValue>)> = instance
        .state
        .borrow()
        .iter()
        .map(|(key, cell)| (key.clone(), cell.clone()))
        .collect();
    cells.into_iter().map(|(key, cell)| (key, cell.get())).collect()
}

// =============================================================================
// Refs
// =============================================================================

/// Register a named ref on an instance.
pub fn set_ref(index: usize, name: &str, target: usize) {
    if let Some(instance) = registry::instance(index) {
        instance.refs.borrow_mut().insert(name.to_string(), target);
    }
}

/// Look up a named ref on an instance.
pub fn get_ref(index: usize, name: &str) -> Option<usize> {
    registry::instance(index).and_then(|instance| instance.refs.borrow().get(name).copied())
}

// =============================================================================
// Render Context
// =============================================================================

/// Context handed to a component's render function.
pub struct RenderCtx {
    index: usize,
    instance: Rc<Instance>,
}

impl RenderCtx {
    /// Index of the instance being rendered.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Snapshot of the instance's current props.
    pub fn props(&self) -> Props {
        self.instance.props.borrow().clone()
    }

    /// Current value of a state entry.
    pub fn state(&self, key: &str) -> Option<PropValue> {
        let cell = self.instance.state.borrow().get(key).cloned();
        cell.map(|cell| cell.get())
    }

    /// Write a state entry without scheduling a render (see [`seed_state`]).
    pub fn seed_state(&self, key: &str, value: impl Into<PropValue>) {
        write_state_cell(&self.instance, key, value.into());
    }

    /// Register a named ref on the instance being rendered.
    pub fn set_ref(&self, name: &str, target: usize) {
        self.instance
            .refs
            .borrow_mut()
            .insert(name.to_string(), target);
    }

    /// Render a child component into the next child slot.
    ///
    /// The same slot keeps its instance across renders when the
    /// component matches (props are updated in place, which re-renders
    /// the child synchronously); a different component replaces the
    /// mounted instance. Returns the child's index.
    pub fn render_child(&self, component: &Rc<Component>, props: Props) -> usize {
        let cursor = self.instance.render_cursor.get();
        let existing = self.instance.children.borrow().get(cursor).copied();

        let child = match existing {
            Some(child) if same_component(child, component) => {
                update_props(child, props);
                child
            }
            Some(child) => {
                release_instance(child);
                let replacement = create_instance(component, props);
                self.instance.children.borrow_mut()[cursor] = replacement;
                render_instance(replacement);
                replacement
            }
            None => {
                let created = create_instance(component, props);
                self.instance.children.borrow_mut().push(created);
                render_instance(created);
                created
            }
        };

        self.instance.render_cursor.set(cursor + 1);
        child
    }
}

fn same_component(index: usize, component: &Rc<Component>) -> bool {
    registry::instance(index)
        .map(|instance| Rc::ptr_eq(&instance.component, component))
        .unwrap_or(false)
}

// =============================================================================
// Tests
// =============================================================================
