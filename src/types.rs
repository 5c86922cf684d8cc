//! Core types - dynamic prop values, prop bags, and callback aliases.
//!
//! Components exchange props through a dynamically keyed [`Props`] bag.
//! Each slot is a [`PropEntry`]: a plain value, an event handler, or a
//! legacy two-field link. Values are dynamic ([`PropValue`]) because the
//! wrapper routes them between parent and internal state without caring
//! about their concrete type.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by mounts.
///
/// Call this to unmount and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Callback Types
// =============================================================================

/// Event handler callback (Rc for shared ownership in closures).
///
/// Using Rc<dyn Fn> instead of Box<dyn Fn> allows cloning callbacks
/// into closures without ownership issues. Handlers receive the event's
/// positional arguments as a slice.
pub type HandlerFn = Rc<dyn Fn(&[PropValue])>;

// =============================================================================
// Prop Value - Dynamic value carried by a prop
// =============================================================================

/// A dynamic prop value.
///
/// The wrapper never interprets values beyond equality and cloning, so a
/// small scalar enum covers what flows through value props.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl PropValue {
    /// Get the boolean payload, if this is a Bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the integer payload, if this is an Int.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the string payload, if this is a Str.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Int(value as i64)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

// =============================================================================
// Prop Type - Declared type for metadata
// =============================================================================

/// Declared type of a prop, for component metadata.
///
/// `Any` is the unrestricted declaration used when a component declares
/// nothing for a prop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropType {
    Number,
    Bool,
    Str,
    Func,
    Any,
}

// =============================================================================
// Link Value - Legacy combined value + change-request callback
// =============================================================================

/// A legacy combined prop bundling a value and a change-request callback.
///
/// Passed under a `*Link` prop name and consumed entirely by the link
/// normalizer; it never reaches the wrapped component.
#[derive(Clone)]
pub struct LinkValue {
    /// The current value (the `checked` payload for boolean controls).
    pub value: PropValue,
    /// Callback requesting the owner to adopt a new value.
    pub request_change: Rc<dyn Fn(&PropValue)>,
}

impl LinkValue {
    /// Create a link from a value and a change-request callback.
    pub fn new(value: impl Into<PropValue>, request_change: impl Fn(&PropValue) + 'static) -> Self {
        Self {
            value: value.into(),
            request_change: Rc::new(request_change),
        }
    }
}

impl fmt::Debug for LinkValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkValue")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl PartialEq for LinkValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && Rc::ptr_eq(&self.request_change, &other.request_change)
    }
}

// =============================================================================
// Prop Entry - One slot in a prop bag
// =============================================================================

/// One prop slot: a value, a handler, or a link.
#[derive(Clone)]
pub enum PropEntry {
    Value(PropValue),
    Handler(HandlerFn),
    Link(LinkValue),
}

impl fmt::Debug for PropEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropEntry::Value(v) => f.debug_tuple("Value").field(v).finish(),
            PropEntry::Handler(_) => f.write_str("Handler(..)"),
            PropEntry::Link(link) => f.debug_tuple("Link").field(link).finish(),
        }
    }
}

impl PartialEq for PropEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropEntry::Value(a), PropEntry::Value(b)) => a == b,
            // Handlers compare by identity; closures have no structural equality.
            (PropEntry::Handler(a), PropEntry::Handler(b)) => Rc::ptr_eq(a, b),
            (PropEntry::Link(a), PropEntry::Link(b)) => a == b,
            _ => false,
        }
    }
}

// =============================================================================
// Props - Dynamically keyed prop bag
// =============================================================================

/// The props handed to a component for one render.
///
/// # Example
///
/// ```ignore
/// use uncontrollable::Props;
///
/// let props = Props::new()
///     .with_value("value", 5)
///     .with_handler("onChange", |args| println!("{args:?}"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    entries: HashMap<String, PropEntry>,
}

impl Props {
    /// Create an empty prop bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw entry for a prop name.
    pub fn get(&self, name: &str) -> Option<&PropEntry> {
        self.entries.get(name)
    }

    /// Get the value carried by a prop, if the slot holds a value.
    pub fn value(&self, name: &str) -> Option<&PropValue> {
        match self.entries.get(name) {
            Some(PropEntry::Value(v)) => Some(v),
            _ => None,
        }
    }

    /// Get the handler installed under a prop name, if any.
    pub fn handler(&self, name: &str) -> Option<HandlerFn> {
        match self.entries.get(name) {
            Some(PropEntry::Handler(h)) => Some(h.clone()),
            _ => None,
        }
    }

    /// Get the link carried by a prop, if the slot holds one.
    pub fn link(&self, name: &str) -> Option<&LinkValue> {
        match self.entries.get(name) {
            Some(PropEntry::Link(link)) => Some(link),
            _ => None,
        }
    }

    /// Check whether any entry exists under a prop name.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Install a value prop.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        self.entries
            .insert(name.into(), PropEntry::Value(value.into()));
    }

    /// Install a handler prop.
    pub fn set_handler(&mut self, name: impl Into<String>, handler: impl Fn(&[PropValue]) + 'static) {
        self.entries
            .insert(name.into(), PropEntry::Handler(Rc::new(handler)));
    }

    /// Install an already shared handler prop.
    pub fn set_handler_rc(&mut self, name: impl Into<String>, handler: HandlerFn) {
        self.entries.insert(name.into(), PropEntry::Handler(handler));
    }

    /// Install a link prop.
    pub fn set_link(&mut self, name: impl Into<String>, link: LinkValue) {
        self.entries.insert(name.into(), PropEntry::Link(link));
    }

    /// Remove and return an entry.
    pub fn remove(&mut self, name: &str) -> Option<PropEntry> {
        self.entries.remove(name)
    }

    /// Builder-style [`Props::set_value`].
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.set_value(name, value);
        self
    }

    /// Builder-style [`Props::set_handler`].
    pub fn with_handler(
        mut self,
        name: impl Into<String>,
        handler: impl Fn(&[PropValue]) + 'static,
    ) -> Self {
        self.set_handler(name, handler);
        self
    }

    /// Builder-style [`Props::set_handler_rc`].
    pub fn with_handler_rc(mut self, name: impl Into<String>, handler: HandlerFn) -> Self {
        self.set_handler_rc(name, handler);
        self
    }

    /// Builder-style [`Props::set_link`].
    pub fn with_link(mut self, name: impl Into<String>, link: LinkValue) -> Self {
        self.set_link(name, link);
        self
    }

    /// Iterate prop names (unordered).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check for an empty bag.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Derived Prop Names
// =============================================================================

/// Derive the default-prefixed prop name: `value` -> `defaultValue`.
pub fn default_prop_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 7);
    out.push_str("default");
    let mut chars = name.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
    out
}

/// Derive the legacy link prop name: `value` -> `valueLink`.
pub fn link_prop_name(name: &str) -> String {
    format!("{name}Link")
}

// =============================================================================
// Tests
// =============================================================================
