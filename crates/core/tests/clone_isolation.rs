//! Clones of resource values must share no mutable substructure with their
//! source: resources are cached and handed concurrently to multiple workers,
//! so a worker mutating its private copy must never be visible through the
//! cached original.

#![forbid(unsafe_code)]

use chrono::{TimeZone, Utc};
use k8s_openapi::api::core::v1::{LocalObjectReference, ObjectReference};

use keel_core::{
    BindingPhase, Condition, ConditionStatus, ConditionType, ConditionedStatus, ResourceClaimSpec,
    ResourceSpec, ResourceStatus, SecretReference,
};

fn ready_at(secs: i64) -> Condition {
    Condition {
        type_: ConditionType::ready(),
        status: ConditionStatus::True,
        last_transition_time: Utc.timestamp_opt(secs, 0).single().unwrap(),
        reason: "Available".to_string(),
        message: String::new(),
    }
}

#[test]
fn cloned_status_conditions_do_not_alias() {
    let a = ResourceStatus {
        conditioned: ConditionedStatus::new([ready_at(10)]),
        binding: Default::default(),
    };
    let mut b = a.clone();

    // Mutate a nested condition's timestamp and grow the sequence.
    b.conditioned.conditions[0].last_transition_time = Utc.timestamp_opt(99, 0).single().unwrap();
    b.conditioned.conditions[0].reason = "Changed".to_string();
    b.conditioned.conditions.push(Condition::reconcile_success());
    b.binding.phase = Some(BindingPhase::Bound);

    assert_eq!(a.conditioned.conditions.len(), 1);
    assert_eq!(
        a.conditioned.conditions[0].last_transition_time,
        Utc.timestamp_opt(10, 0).single().unwrap()
    );
    assert_eq!(a.conditioned.conditions[0].reason, "Available");
    assert_eq!(a.binding.phase, None);
}

#[test]
fn cloned_spec_references_do_not_alias() {
    let a = ResourceSpec {
        write_connection_secret_to_reference: SecretReference::new("db-creds", "default"),
        claim_reference: Some(ObjectReference {
            name: Some("claim-a".to_string()),
            ..Default::default()
        }),
        provider_reference: Some(ObjectReference {
            name: Some("provider-a".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let mut b = a.clone();

    b.write_connection_secret_to_reference.name = "other".to_string();
    if let Some(r) = b.claim_reference.as_mut() {
        r.name = Some("claim-b".to_string());
    }
    b.provider_reference = None;

    assert_eq!(a.write_connection_secret_to_reference.name, "db-creds");
    assert_eq!(
        a.claim_reference.as_ref().and_then(|r| r.name.as_deref()),
        Some("claim-a")
    );
    assert!(a.provider_reference.is_some());
    // Absent stays absent in the copy.
    assert!(b.class_reference.is_none() && a.class_reference.is_none());
}

#[test]
fn cloned_claim_spec_references_do_not_alias() {
    let a = ResourceClaimSpec {
        write_connection_secret_to_reference: LocalObjectReference {
            name: Some("creds".to_string()),
        },
        class_reference: Some(LocalObjectReference {
            name: Some("standard".to_string()),
        }),
        resource_reference: None,
    };
    let mut b = a.clone();

    b.write_connection_secret_to_reference.name = Some("changed".to_string());
    b.class_reference = None;

    assert_eq!(
        a.write_connection_secret_to_reference.name.as_deref(),
        Some("creds")
    );
    assert!(a.class_reference.is_some());
}
