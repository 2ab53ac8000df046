use k8s_openapi::api::core::v1::{LocalObjectReference, ObjectReference};
use serde::{Deserialize, Serialize};

use crate::condition::ConditionedStatus;
use crate::reference::SecretReference;

/// Controls what happens to the external resource when its managed resource
/// is removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeletionPolicy {
    /// Delete the external resource.
    #[default]
    Delete,
    /// Leave the external resource in place.
    Orphan,
}

/// Phase of the binding between a resource claim and a managed resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingPhase {
    #[default]
    Unbindable,
    Unbound,
    Bound,
    Released,
}

/// The observed binding state of a bindable resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingStatus {
    #[serde(rename = "bindingPhase", skip_serializing_if = "Option::is_none")]
    pub phase: Option<BindingPhase>,
}

/// Spec fields every managed resource carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceSpec {
    #[serde(rename = "writeConnectionSecretToRef")]
    pub write_connection_secret_to_reference: SecretReference,
    #[serde(rename = "deletionPolicy", skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<DeletionPolicy>,
    #[serde(rename = "claimRef", skip_serializing_if = "Option::is_none")]
    pub claim_reference: Option<ObjectReference>,
    #[serde(rename = "classRef", skip_serializing_if = "Option::is_none")]
    pub class_reference: Option<ObjectReference>,
    #[serde(rename = "providerRef", skip_serializing_if = "Option::is_none")]
    pub provider_reference: Option<ObjectReference>,
}

/// Status fields every managed resource carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceStatus {
    #[serde(flatten)]
    pub conditioned: ConditionedStatus,
    #[serde(flatten)]
    pub binding: BindingStatus,
}

/// Spec fields every resource claim carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceClaimSpec {
    #[serde(rename = "writeConnectionSecretToRef")]
    pub write_connection_secret_to_reference: LocalObjectReference,
    #[serde(rename = "classRef", skip_serializing_if = "Option::is_none")]
    pub class_reference: Option<LocalObjectReference>,
    #[serde(rename = "resourceRef", skip_serializing_if = "Option::is_none")]
    pub resource_reference: Option<ObjectReference>,
}

/// Status fields every resource claim carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceClaimStatus {
    #[serde(flatten)]
    pub conditioned: ConditionedStatus,
    #[serde(flatten)]
    pub binding: BindingStatus,
}
