//! Pair spec - the static controlled-prop / handler-prop association.
//!
//! Built once when a wrapper type is created and never re-derived per
//! render: the spec is a fixed, ordered list of pairs.

use thiserror::Error;

// =============================================================================
// Pair
// =============================================================================

/// One controlled-prop / handler-prop association, e.g. `value` / `onChange`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pair {
    /// Name of the value prop whose source of truth is negotiated.
    pub controlled: String,
    /// Name of the change-handler prop for that value.
    pub handler: String,
}

// =============================================================================
// Pair Spec
// =============================================================================

/// Invalid pair spec, reported when the wrapper type is created.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PairSpecError {
    #[error("controlled prop name is empty")]
    EmptyControlledName,
    #[error("handler prop name for `{controlled}` is empty")]
    EmptyHandlerName { controlled: String },
    #[error("`{name}` is paired with itself; controlled and handler prop names must differ")]
    SelfPaired { name: String },
    #[error("duplicate controlled prop `{name}`")]
    DuplicateControlled { name: String },
}

/// Validated, ordered set of [`Pair`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PairSpec {
    pairs: Vec<Pair>,
}

impl PairSpec {
    /// Validate and build a pair spec from `(controlled, handler)` tuples.
    ///
    /// Controlled names must be unique, both names non-empty and
    /// distinct within a pair. The same handler may serve several
    /// controlled props; the later pair wins when the handler prop is
    /// assembled.
    pub fn new(pairs: &[(&str, &str)]) -> Result<Self, PairSpecError> {
        let mut validated: Vec<Pair> = Vec::with_capacity(pairs.len());

        for &(controlled, handler) in pairs {
            if controlled.is_empty() {
                return Err(PairSpecError::EmptyControlledName);
            }
            if handler.is_empty() {
                return Err(PairSpecError::EmptyHandlerName {
                    controlled: controlled.to_string(),
                });
            }
            if controlled == handler {
                return Err(PairSpecError::SelfPaired {
                    name: controlled.to_string(),
                });
            }
            if validated.iter().any(|pair| pair.controlled == controlled) {
                return Err(PairSpecError::DuplicateControlled {
                    name: controlled.to_string(),
                });
            }
            validated.push(Pair {
                controlled: controlled.to_string(),
                handler: handler.to_string(),
            });
        }

        Ok(Self { pairs: validated })
    }

    /// Iterate pairs in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pair> {
        self.pairs.iter()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check for an empty spec.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Check whether a prop name is one of the controlled names.
    pub fn controls(&self, name: &str) -> bool {
        self.pairs.iter().any(|pair| pair.controlled == name)
    }
}

// =============================================================================
// Tests
// =============================================================================
