//! Component type - name, declared prop types, render function.
//!
//! A component is data: the engine mounts it into an instance and
//! re-invokes its render function whenever that instance's props or
//! state change. Rendering here means computing and propagating props;
//! the engine draws nothing.

use std::collections::HashMap;
use std::rc::Rc;

use crate::types::PropType;

use super::instance::RenderCtx;

/// Render function invoked by the engine for every render pass.
pub type RenderFn = Rc<dyn Fn(&RenderCtx)>;

/// A mountable component.
///
/// # Example
///
/// ```ignore
/// use uncontrollable::engine::Component;
///
/// let base = Component::new("Base", |ctx| {
///     let props = ctx.props();
///     // Inspect props, render children via ctx.render_child(..)
/// });
/// ```
pub struct Component {
    /// Component name, used in diagnostics and derived display names.
    pub name: String,
    /// Declared prop types, keyed by prop name.
    pub prop_types: HashMap<String, PropType>,
    /// Render function, re-invoked on every props/state change.
    pub render: RenderFn,
}

impl Component {
    /// Create a component with no declared prop types.
    pub fn new(name: impl Into<String>, render: impl Fn(&RenderCtx) + 'static) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            prop_types: HashMap::new(),
            render: Rc::new(render),
        })
    }

    /// Create a component with a declared prop-type table.
    pub fn with_prop_types(
        name: impl Into<String>,
        prop_types: HashMap<String, PropType>,
        render: RenderFn,
    ) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            prop_types,
            render,
        })
    }

    /// Declared type for a prop, if the component declares one.
    pub fn prop_type(&self, name: &str) -> Option<PropType> {
        self.prop_types.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PropType;

    #[test]
    fn test_component_prop_type_lookup() {
        let mut prop_types = HashMap::new();
        prop_types.insert("value".to_string(), PropType::Number);

        let component = Component::with_prop_types("Base", prop_types, Rc::new(|_| {}));

        assert_eq!(component.prop_type("value"), Some(PropType::Number));
        assert_eq!(component.prop_type("missing"), None);
        assert_eq!(component.name, "Base");
    }
}
