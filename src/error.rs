//! Error types.
//!
//! All faults are local, synchronous and non-retryable: they surface directly
//! to the caller and the core performs no recovery. Correctness is enforced
//! by construction-time contracts (descriptor tables, trait overrides), not
//! runtime fallback.

use crate::types::NodeId;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Every fault the core can raise.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A property was assigned a value outside its declared kinds, or null
    /// on a non-nullable property. The property is left unmodified.
    #[error("property `{property}` on `{control}` does not accept {given}")]
    TypeConstraint {
        control: &'static str,
        property: &'static str,
        given: String,
    },

    /// A property name not present in the control's descriptor table.
    #[error("`{control}` has no property `{property}`")]
    UnknownProperty {
        control: &'static str,
        property: String,
    },

    /// A concrete control did not override `measure_core`/`render_core`.
    /// Raised on first invocation; a programming defect, fatal to the cycle.
    #[error("`{control}` does not implement `{method}`")]
    NotImplemented {
        control: &'static str,
        method: &'static str,
    },

    /// Illegal style composition: combining with `Style::RESET`. Callers
    /// must emit the reset style directly instead of composing it.
    #[error("cannot combine a style with `Style::RESET`")]
    StyleComposition,

    /// The node id is not present in the tree (stale handle, removed
    /// subtree, or reentrant access to a node mid-measure).
    #[error("node {0} is not in the tree")]
    InvalidNode(NodeId),
}
