use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const REASON_AVAILABLE: &str = "Available";
const REASON_UNAVAILABLE: &str = "Unavailable";
const REASON_CREATING: &str = "Creating";
const REASON_DELETING: &str = "Deleting";
const REASON_RECONCILE_SUCCESS: &str = "ReconcileSuccess";
const REASON_RECONCILE_ERROR: &str = "ReconcileError";

/// A type of condition: the dedup key within a [`ConditionedStatus`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionType(String);

impl ConditionType {
    pub fn new(t: impl Into<String>) -> Self {
        Self(t.into())
    }

    /// The resource is believed ready for use.
    pub fn ready() -> Self {
        Self::new("Ready")
    }

    /// The desired state has been applied to the external system.
    pub fn synced() -> Self {
        Self::new("Synced")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConditionType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a condition currently holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

/// A timestamped observation of one aspect of a resource's health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: ConditionType,
    pub status: ConditionStatus,
    pub last_transition_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl Default for Condition {
    fn default() -> Self {
        Self {
            type_: ConditionType::default(),
            status: ConditionStatus::Unknown,
            last_transition_time: DateTime::UNIX_EPOCH,
            reason: String::new(),
            message: String::new(),
        }
    }
}

impl Condition {
    fn new(type_: ConditionType, status: ConditionStatus, reason: &str) -> Self {
        Self {
            type_,
            status,
            last_transition_time: Utc::now(),
            reason: reason.to_string(),
            message: String::new(),
        }
    }

    /// The resource is available for use.
    pub fn available() -> Self {
        Self::new(ConditionType::ready(), ConditionStatus::True, REASON_AVAILABLE)
    }

    /// The resource exists but is not currently available for use.
    pub fn unavailable() -> Self {
        Self::new(ConditionType::ready(), ConditionStatus::False, REASON_UNAVAILABLE)
    }

    /// The resource is being created.
    pub fn creating() -> Self {
        Self::new(ConditionType::ready(), ConditionStatus::False, REASON_CREATING)
    }

    /// The resource is being deleted.
    pub fn deleting() -> Self {
        Self::new(ConditionType::ready(), ConditionStatus::False, REASON_DELETING)
    }

    /// The last reconcile pass completed successfully.
    pub fn reconcile_success() -> Self {
        Self::new(
            ConditionType::synced(),
            ConditionStatus::True,
            REASON_RECONCILE_SUCCESS,
        )
    }

    /// The last reconcile pass failed; the message carries the error.
    pub fn reconcile_error(err: impl fmt::Display) -> Self {
        Self::new(
            ConditionType::synced(),
            ConditionStatus::False,
            REASON_RECONCILE_ERROR,
        )
        .with_message(err.to_string())
    }

    /// Returns a copy of this condition with the supplied message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// The deduplicated, ordered collection of a resource's conditions: at most
/// one condition per distinct type, in first-set order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionedStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl ConditionedStatus {
    pub fn new(conditions: impl IntoIterator<Item = Condition>) -> Self {
        let mut s = Self::default();
        s.set_conditions(conditions);
        s
    }

    /// Returns the condition of the supplied type, or the zero-value Unknown
    /// condition when none has been observed yet. The sentinel is a
    /// legitimate "unknown" reading, never an error.
    pub fn get_condition(&self, t: &ConditionType) -> Condition {
        self.conditions
            .iter()
            .find(|c| &c.type_ == t)
            .cloned()
            .unwrap_or_default()
    }

    /// Merge the supplied conditions into the collection.
    ///
    /// An unchanged status is not a transition: the existing timestamp is
    /// kept and only reason/message are refreshed. A changed status replaces
    /// the whole condition in place at its existing position. Unseen types
    /// are appended. Later items in one call win over earlier items of the
    /// same type.
    pub fn set_conditions(&mut self, conditions: impl IntoIterator<Item = Condition>) {
        for mut new in conditions {
            match self.conditions.iter_mut().find(|c| c.type_ == new.type_) {
                Some(existing) => {
                    if existing.status == new.status {
                        new.last_transition_time = existing.last_transition_time;
                    }
                    *existing = new;
                }
                None => self.conditions.push(new),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    fn cond(t: &str, status: ConditionStatus, reason: &str, secs: i64) -> Condition {
        Condition {
            type_: ConditionType::new(t),
            status,
            last_transition_time: at(secs),
            reason: reason.to_string(),
            message: String::new(),
        }
    }

    #[test]
    fn conditions_are_unique_by_type() {
        let mut s = ConditionedStatus::default();
        s.set_conditions([cond("Ready", ConditionStatus::False, "Creating", 1)]);
        s.set_conditions([cond("Synced", ConditionStatus::True, "ReconcileSuccess", 2)]);
        s.set_conditions([cond("Ready", ConditionStatus::True, "Available", 3)]);
        assert_eq!(s.conditions.len(), 2);
        // Replacement happens in place; first-set order is preserved.
        assert_eq!(s.conditions[0].type_, ConditionType::ready());
        assert_eq!(s.conditions[1].type_, ConditionType::synced());
    }

    #[test]
    fn unchanged_status_keeps_the_transition_time() {
        let mut s = ConditionedStatus::new([cond("Ready", ConditionStatus::True, "Available", 10)]);
        s.set_conditions([cond("Ready", ConditionStatus::True, "StillAvailable", 99)]);

        let got = s.get_condition(&ConditionType::ready());
        assert_eq!(got.last_transition_time, at(10));
        assert_eq!(got.reason, "StillAvailable");
    }

    #[test]
    fn changed_status_takes_the_new_transition_time() {
        let mut s = ConditionedStatus::new([cond("Ready", ConditionStatus::True, "Available", 10)]);
        s.set_conditions([cond("Ready", ConditionStatus::False, "Unavailable", 99)]);

        let got = s.get_condition(&ConditionType::ready());
        assert_eq!(got.status, ConditionStatus::False);
        assert_eq!(got.last_transition_time, at(99));
    }

    #[test]
    fn later_arguments_win_within_one_call() {
        let mut s = ConditionedStatus::default();
        s.set_conditions([
            cond("Ready", ConditionStatus::False, "Creating", 1),
            cond("Ready", ConditionStatus::False, "Deleting", 2),
        ]);
        assert_eq!(s.conditions.len(), 1);
        let got = s.get_condition(&ConditionType::ready());
        assert_eq!(got.reason, "Deleting");
        // Same status within the call, so the first argument's time sticks.
        assert_eq!(got.last_transition_time, at(1));
    }

    #[test]
    fn missing_condition_reads_as_the_unknown_sentinel() {
        let s = ConditionedStatus::default();
        let got = s.get_condition(&ConditionType::ready());
        assert_eq!(got.status, ConditionStatus::Unknown);
        assert_eq!(got.type_.as_str(), "");
        assert!(got.reason.is_empty());
    }

    #[test]
    fn wire_shape_is_camel_case_with_type_keyword() {
        let c = cond("Ready", ConditionStatus::True, "Available", 0);
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["type"], "Ready");
        assert_eq!(v["status"], "True");
        assert_eq!(v["reason"], "Available");
        assert_eq!(v["lastTransitionTime"], "1970-01-01T00:00:00Z");
        assert!(v.get("message").is_none());

        // Documents may omit fields; decode falls back to zero values.
        let c: Condition = serde_json::from_value(serde_json::json!({"type": "Ready"})).unwrap();
        assert_eq!(c.status, ConditionStatus::Unknown);
    }

    #[test]
    fn canned_constructors_carry_the_expected_vocabulary() {
        assert_eq!(Condition::available().type_, ConditionType::ready());
        assert_eq!(Condition::available().status, ConditionStatus::True);
        assert_eq!(Condition::creating().reason, "Creating");
        assert_eq!(Condition::reconcile_success().type_, ConditionType::synced());
        let c = Condition::reconcile_error("boom");
        assert_eq!(c.status, ConditionStatus::False);
        assert_eq!(c.message, "boom");
    }
}
