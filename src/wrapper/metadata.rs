//! Metadata Deriver - wrapper identity computed at wrap time.
//!
//! The wrapper's display name and prop-type table are derived once from
//! the wrapped component, never per render. For each pair the table
//! gains an optional default-prefixed entry typed like the controlled
//! prop itself.

use std::collections::HashMap;

use crate::engine::Component;
use crate::types::{default_prop_name, PropType};

use super::pairs::PairSpec;

pub(crate) struct WrapperMetadata {
    pub(crate) display_name: String,
    pub(crate) prop_types: HashMap<String, PropType>,
}

/// Derive the wrapper's display name and prop-type table.
pub(crate) fn derive_metadata(base: &Component, pairs: &PairSpec) -> WrapperMetadata {
    let mut prop_types = base.prop_types.clone();

    for pair in pairs.iter() {
        let declared = base.prop_type(&pair.controlled).unwrap_or(PropType::Any);
        prop_types.insert(default_prop_name(&pair.controlled), declared);
    }

    WrapperMetadata {
        display_name: format!("Uncontrolled{}", base.name),
        prop_types,
    }
}

// =============================================================================
// Tests
// =============================================================================
