//! Wrapper - controlled components made optionally uncontrolled.
//!
//! [`wrap`] takes a component whose value props are normally owned by
//! its parent and returns a component that tracks those values
//! internally whenever the parent does not supply them. Per pair of
//! (controlled prop, handler prop), every render decides the value
//! source: an explicit incoming value is authoritative; otherwise the
//! internal store supplies the last value seen by the handler, seeded
//! from a `default`-prefixed prop on first use.
//!
//! Render pipeline, in order: link normalization, pair resolution
//! (reads and seeds the internal store), missing-handler validation,
//! handler interception, render of the wrapped component with the
//! effective props. The mounted inner instance is exposed under the
//! wrapper's `"inner"` ref.
//!
//! # Example
//!
//! ```ignore
//! use uncontrollable::{wrap, Props};
//! use uncontrollable::engine::mount;
//!
//! let toggle = wrap(&base, &[("open", "onToggle")], None)?;
//!
//! // Parent supplies nothing: `open` is tracked internally,
//! // seeded from `defaultOpen`.
//! let handle = mount(&toggle, Props::new().with_value("defaultOpen", false));
//! ```

mod intercept;
mod metadata;
mod normalize;
mod pairs;
mod store;
mod warnings;

pub use intercept::{tap, TapFn, TapMap, WrapperHandle};
pub use pairs::{Pair, PairSpec, PairSpecError};
pub use warnings::{reset_warning_sink, set_warning_sink, CollectingSink, WarningSink};

use std::rc::Rc;

use crate::engine::{Component, RenderCtx, RenderFn};
use crate::types::{default_prop_name, HandlerFn, Props};

use intercept::make_interceptor;
use metadata::derive_metadata;
use normalize::normalize_links;
use store::ValueStore;
use warnings::warn_missing_handlers;

// =============================================================================
// Pair Resolution
// =============================================================================

/// Resolve each pair's effective value for this render.
///
/// Returns one flag per pair, in spec order: `true` when the caller
/// supplied an explicit value (which is then authoritative), `false`
/// when the prop is internally tracked. Tracked props get their store
/// entry injected into the props (seeded from the default-prefixed
/// prop on first use); an unset entry leaves the prop absent entirely.
/// Default-prefixed props for spec'd pairs are consumed here.
fn resolve_pairs(store: &ValueStore, props: &mut Props, pairs: &PairSpec) -> Vec<bool> {
    let mut explicit = Vec::with_capacity(pairs.len());

    for pair in pairs.iter() {
        let default_name = default_prop_name(&pair.controlled);
        let is_explicit = props.value(&pair.controlled).is_some();

        if !is_explicit {
            if store.get(&pair.controlled).is_none() {
                if let Some(default_value) = props.value(&default_name).cloned() {
                    store.seed(&pair.controlled, default_value);
                }
            }
            if let Some(current) = store.get(&pair.controlled) {
                props.set_value(pair.controlled.clone(), current);
            }
        }

        props.remove(&default_name);
        explicit.push(is_explicit);
    }

    explicit
}

// =============================================================================
// wrap()
// =============================================================================

/// Wrap a component so its paired value props may go uncontrolled.
///
/// `pairs` maps each controlled prop name to its handler prop name;
/// `taps` optionally attaches a per-handler interceptor that runs
/// before the normal handler chain, receiving the wrapper's
/// [`WrapperHandle`] and the handler's arguments.
///
/// The returned component accepts all of the base's props plus, per
/// pair `(P, H)`: an optional `defaultP` seed value and the legacy
/// `P + "Link"` prop as sugar for `{P, H}`.
///
/// An invalid pair spec is reported here, at creation time, never at
/// render time.
pub fn wrap(
    base: &Rc<Component>,
    pairs: &[(&str, &str)],
    taps: Option<TapMap>,
) -> Result<Rc<Component>, PairSpecError> {
    let spec = Rc::new(PairSpec::new(pairs)?);
    let metadata = derive_metadata(base, &spec);
    let base = base.clone();
    let taps = taps.unwrap_or_default();

    let render: RenderFn = {
        let spec = spec.clone();
        Rc::new(move |ctx: &RenderCtx| {
            let store = ValueStore::new(ctx.index());
            let handle = WrapperHandle::new(ctx.index());

            let mut props = ctx.props();
            normalize_links(&mut props, &spec);
            let explicit = resolve_pairs(&store, &mut props, &spec);
            warn_missing_handlers(&base.name, &props, &spec, &explicit);

            // Caller handlers are captured for every pair before any
            // interceptor is installed, so pairs sharing one handler
            // name each chain to the caller's handler (the last pair's
            // interceptor wins the slot).
            let callers: Vec<Option<HandlerFn>> = spec
                .iter()
                .map(|pair| props.handler(&pair.handler))
                .collect();

            for ((pair, caller), &is_explicit) in spec.iter().zip(callers).zip(&explicit) {
                let interceptor = make_interceptor(
                    handle,
                    pair.controlled.clone(),
                    taps.get(&pair.handler).cloned(),
                    !is_explicit,
                    caller,
                );
                props.set_handler_rc(pair.handler.clone(), interceptor);
            }

            let child = ctx.render_child(&base, props);
            ctx.set_ref("inner", child);
        })
    };

    Ok(Component::with_prop_types(
        metadata.display_name,
        metadata.prop_types,
        render,
    ))
}

// =============================================================================
// Tests
// =============================================================================
