//! Keel unstructured managed resources.
//!
//! [`Managed`] wraps one resource document whose schema is only known at
//! runtime and exposes typed accessors for the well-known fields every
//! managed resource carries, built on `keel-fieldpath` and `keel-core`.
//!
//! A `Managed` is not safe for concurrent mutation. The sharing discipline is
//! single writer per instance: a worker that intends to mutate clones the
//! cached instance first (`Managed` is `Clone`, and the clone shares nothing
//! mutable with its source), mutates its private copy, and publishes the
//! result back as a new snapshot. Readers may share one frozen snapshot
//! freely.

#![forbid(unsafe_code)]

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::trace;

use keel_core::{
    Condition, ConditionType, ConditionedStatus, DeletionPolicy, Reference, SecretReference,
};
use keel_fieldpath::{self as fieldpath, Error, Paved, Result};

/// The well-known field paths: the resource schema contract, fixed by
/// convention and auditable in one place.
pub mod paths {
    /// Reference to the secret the resource writes connection details to.
    pub const WRITE_CONNECTION_SECRET_REF: &str = "spec.writeConnectionSecretToRef";
    /// What happens to the external resource when this one is removed.
    pub const DELETION_POLICY: &str = "spec.deletionPolicy";
    /// Reference to the provider configuration in use.
    pub const PROVIDER_CONFIG_REF: &str = "spec.providerConfigRef";
    /// Historical address of the provider configuration reference.
    pub const PROVIDER_REF: &str = "spec.providerRef";
    /// The status region; conditions live inline here.
    pub const STATUS: &str = "status";
    /// The condition list within the status region.
    pub const STATUS_CONDITIONS: &str = "status.conditions";
}

/// An unstructured managed resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Managed {
    object: Value,
}

impl Default for Managed {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Value> for Managed {
    type Error = Error;

    fn try_from(object: Value) -> Result<Self> {
        if !object.is_object() {
            return Err(Error::Invalid {
                path: String::new(),
                reason: "document root must be an object".to_string(),
            });
        }
        Ok(Self { object })
    }
}

impl Managed {
    /// Returns a new, empty managed resource document.
    pub fn new() -> Self {
        Self {
            object: Value::Object(serde_json::Map::new()),
        }
    }

    /// Builder: merge the supplied conditions during construction.
    pub fn with_conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Result<Self> {
        self.set_conditions(conditions)?;
        Ok(self)
    }

    /// Builder: set the deletion policy during construction.
    pub fn with_deletion_policy(mut self, policy: DeletionPolicy) -> Result<Self> {
        self.set_deletion_policy(policy)?;
        Ok(self)
    }

    /// The underlying document.
    pub fn as_value(&self) -> &Value {
        &self.object
    }

    pub fn into_value(self) -> Value {
        self.object
    }

    /// Escape hatch for fields outside the well-known set: the document
    /// paved for generic field-path access.
    pub fn paved(&mut self) -> Paved<'_> {
        Paved::new(&mut self.object)
    }

    /// Typed read of a field outside the well-known set.
    pub fn get_raw_into<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        fieldpath::get_into(&self.object, path)
    }

    /// Reads an optional well-known field, absorbing absence into `None`.
    /// Decode failures propagate: a corrupted stored value is never silently
    /// treated as unset.
    fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match fieldpath::get_into(&self.object, path) {
            Ok(v) => Ok(Some(v)),
            Err(e) if e.is_not_found() => {
                trace!(path, "optional field absent");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn conditioned(&self) -> Result<ConditionedStatus> {
        match fieldpath::get_into(&self.object, paths::STATUS) {
            Ok(c) => Ok(c),
            Err(e) if e.is_not_found() => Ok(ConditionedStatus::default()),
            Err(e) => Err(e),
        }
    }

    /// The connection secret reference, or `None` when unset. Absence means
    /// "do not publish a connection secret", not a fault.
    pub fn get_write_connection_secret_to_reference(&self) -> Result<Option<SecretReference>> {
        self.get_optional(paths::WRITE_CONNECTION_SECRET_REF)
    }

    pub fn set_write_connection_secret_to_reference(
        &mut self,
        reference: &SecretReference,
    ) -> Result<()> {
        fieldpath::set_value(&mut self.object, paths::WRITE_CONNECTION_SECRET_REF, reference)
    }

    /// The condition of the supplied type, or the Unknown sentinel when the
    /// status region records nothing for it. A malformed status region is a
    /// decode error, not an unknown reading.
    pub fn get_condition(&self, t: &ConditionType) -> Result<Condition> {
        Ok(self.conditioned()?.get_condition(t))
    }

    /// Merge the supplied conditions into the status region and write back
    /// only the condition list. Status fields outside the modeled shape are
    /// left untouched.
    pub fn set_conditions(&mut self, conditions: impl IntoIterator<Item = Condition>) -> Result<()> {
        let mut conditioned = self.conditioned()?;
        conditioned.set_conditions(conditions);
        fieldpath::set_value(
            &mut self.object,
            paths::STATUS_CONDITIONS,
            &conditioned.conditions,
        )
    }

    /// The deletion policy, or `None` when unset; callers supply their
    /// default. A stored value outside the enumeration is a decode error.
    pub fn get_deletion_policy(&self) -> Result<Option<DeletionPolicy>> {
        self.get_optional(paths::DELETION_POLICY)
    }

    pub fn set_deletion_policy(&mut self, policy: DeletionPolicy) -> Result<()> {
        fieldpath::set_value(&mut self.object, paths::DELETION_POLICY, &policy)
    }

    /// The provider configuration reference, or `None` when unset.
    pub fn get_provider_config_reference(&self) -> Result<Option<Reference>> {
        self.get_optional(paths::PROVIDER_CONFIG_REF)
    }

    pub fn set_provider_config_reference(&mut self, reference: &Reference) -> Result<()> {
        fieldpath::set_value(&mut self.object, paths::PROVIDER_CONFIG_REF, reference)
    }

    /// The provider reference at its historical address. Independent of
    /// [`Managed::get_provider_config_reference`]; the accessor never
    /// migrates one address to the other.
    #[deprecated(note = "use get_provider_config_reference")]
    pub fn get_provider_reference(&self) -> Result<Option<Reference>> {
        self.get_optional(paths::PROVIDER_REF)
    }

    #[deprecated(note = "use set_provider_config_reference")]
    pub fn set_provider_reference(&mut self, reference: &Reference) -> Result<()> {
        fieldpath::set_value(&mut self.object, paths::PROVIDER_REF, reference)
    }

    /// Generic write for fields outside the well-known set.
    pub fn set_raw<T: Serialize + ?Sized>(&mut self, path: &str, value: &T) -> Result<()> {
        fieldpath::set_value(&mut self.object, path, value)
    }
}
