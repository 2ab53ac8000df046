//! Keel core value types: the condition vocabulary, reference records, and
//! policies shared by every resource kind in the control plane.
//!
//! Everything here is a plain owned value. Cloning any of these types yields
//! a structurally independent copy (no shared mutable substructure), which is
//! the contract required when resources move between a shared cache and a
//! worker's private mutable copy.

#![forbid(unsafe_code)]

mod condition;
mod reference;
mod resource;

pub use condition::{Condition, ConditionStatus, ConditionType, ConditionedStatus};
pub use reference::{Reference, SecretReference};
pub use resource::{
    BindingPhase, BindingStatus, DeletionPolicy, ResourceClaimSpec, ResourceClaimStatus,
    ResourceSpec, ResourceStatus,
};

pub mod prelude {
    pub use super::{
        Condition, ConditionStatus, ConditionType, ConditionedStatus, DeletionPolicy, Reference,
        SecretReference,
    };
}
