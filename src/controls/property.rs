//! Property descriptors.
//!
//! Every control declares its fields as a const table of [`Property`]
//! descriptors: accepted value kinds (one kind or a closed union), a default,
//! a nullability flag, and two independent invalidation rules (measure and
//! paint). Every property access goes through the descriptor, which enforces
//! the declared kinds before anything is stored.
//!
//! An [`Invalidate`] rule is either a constant (always/never dirty on any
//! change) or a predicate over `(old, new)` deciding per assignment - e.g. a
//! string-valued bullet only forces re-measure when its rendered width
//! changes.

use crate::drawing::{Color, Style};

use super::primitives::{Bullet, Orientation, Placement};

// =============================================================================
// Value
// =============================================================================

/// A property value: the closed union of everything the toolkit stores.
///
/// `None` is the null value, accepted only by nullable properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Str(String),
    Color(Color),
    Style(Style),
    Orientation(Orientation),
    Placement(Placement),
    Bullet(Bullet),
}

/// Discriminant of a non-null [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Str,
    Color,
    Style,
    Orientation,
    Placement,
    Bullet,
}

impl Value {
    /// The kind of this value; `None` for the null value.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::None => None,
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::Int(_) => Some(ValueKind::Int),
            Value::Str(_) => Some(ValueKind::Str),
            Value::Color(_) => Some(ValueKind::Color),
            Value::Style(_) => Some(ValueKind::Style),
            Value::Orientation(_) => Some(ValueKind::Orientation),
            Value::Placement(_) => Some(ValueKind::Placement),
            Value::Bullet(_) => Some(ValueKind::Bullet),
        }
    }

    /// Short human-readable description, used in constraint errors.
    pub fn describe(&self) -> String {
        match self.kind() {
            Some(kind) => format!("a {kind:?} value"),
            None => "null".to_string(),
        }
    }

    /// The integer payload, or `default` when this is not an `Int`.
    pub fn int_or(&self, default: i64) -> i64 {
        match self {
            Value::Int(n) => *n,
            _ => default,
        }
    }

    /// The string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

// =============================================================================
// Invalidation rules
// =============================================================================

/// When a property assignment dirties a flag.
#[derive(Clone, Copy)]
pub enum Invalidate {
    /// Every assignment dirties.
    Always,
    /// No assignment dirties.
    Never,
    /// The predicate decides per assignment, given `(old, new)`.
    When(fn(&Value, &Value) -> bool),
}

impl Invalidate {
    /// Evaluate the rule against an assignment.
    pub fn fires(&self, old: &Value, new: &Value) -> bool {
        match self {
            Invalidate::Always => true,
            Invalidate::Never => false,
            Invalidate::When(predicate) => predicate(old, new),
        }
    }
}

// =============================================================================
// Property
// =============================================================================

/// A declarative field definition attached to a control type.
pub struct Property {
    /// Field name, unique within the control's table.
    pub name: &'static str,
    /// Accepted value kinds; more than one entry is a closed union.
    pub kinds: &'static [ValueKind],
    /// Constructor for the declared default value.
    pub default: fn() -> Value,
    /// Whether [`Value::None`] is an acceptable value.
    pub nullable: bool,
    /// Rule deciding whether an assignment dirties measure state.
    pub measure: Invalidate,
    /// Rule deciding whether an assignment dirties paint state.
    pub paint: Invalidate,
}

impl Property {
    /// Whether `value` satisfies the declared kinds and nullability.
    pub fn accepts(&self, value: &Value) -> bool {
        match value.kind() {
            Some(kind) => self.kinds.contains(&kind),
            None => self.nullable,
        }
    }
}
