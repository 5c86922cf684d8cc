//! Link Normalizer - rewrites legacy `*Link` props.
//!
//! A link bundles a value and a change-request callback in one prop.
//! Before any other processing, each `P + "Link"` prop for a spec'd
//! pair is consumed and replaced by the equivalent value prop plus a
//! handler that forwards the new value to `request_change`.

use crate::types::{link_prop_name, PropEntry, Props, PropValue};

use super::pairs::PairSpec;

/// Rewrite `P + "Link"` entries into `P` + forwarding handler pairs.
///
/// Caller-supplied `P` or `H` entries are never overwritten: a link
/// only fills the slots it can claim. Link props for names outside the
/// pair spec pass through untouched.
pub(crate) fn normalize_links(props: &mut Props, pairs: &PairSpec) {
    for pair in pairs.iter() {
        let link_name = link_prop_name(&pair.controlled);
        if !matches!(props.get(&link_name), Some(PropEntry::Link(_))) {
            continue;
        }
        let Some(PropEntry::Link(link)) = props.remove(&link_name) else {
            continue;
        };

        if props.value(&pair.controlled).is_none() {
            props.set_value(pair.controlled.clone(), link.value.clone());
        }
        if props.handler(&pair.handler).is_none() {
            let request_change = link.request_change.clone();
            props.set_handler(pair.handler.clone(), move |args: &[PropValue]| {
                let next = args.first().cloned().unwrap_or(PropValue::Null);
                request_change(&next);
            });
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
