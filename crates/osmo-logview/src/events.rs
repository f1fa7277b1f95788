//! Classification of backend event reasons for the event timeline.
//!
//! Backends emit free-form event reasons ("Scheduled", "BackOff", ...). The
//! timeline buckets them into stages and severities for rendering. Unknown
//! reasons land in a default bucket; a new backend value must never crash
//! the timeline.

use serde::{Deserialize, Serialize};

/// Timeline stage an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStage {
    /// Placement decisions (scheduling, preemption).
    Scheduling,
    /// Image pulls and container creation.
    Initializing,
    /// Steady-state execution.
    Running,
    /// Shutdown and cleanup.
    Terminating,
    /// Default bucket for unrecognized reasons.
    #[default]
    Other,
}

/// Severity of a timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventSeverity {
    /// Routine lifecycle event.
    #[default]
    Normal,
    /// Something to keep an eye on.
    Warning,
    /// A failure.
    Error,
}

/// Stage and severity assigned to one event reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventClass {
    /// Timeline stage.
    pub stage: EventStage,
    /// Severity for coloring.
    pub severity: EventSeverity,
}

/// Buckets an event reason. Matching is case-insensitive; anything
/// unrecognized falls back to the default class.
#[must_use]
pub fn classify_reason(reason: &str) -> EventClass {
    let class = |stage, severity| EventClass { stage, severity };
    match reason.to_ascii_lowercase().as_str() {
        "scheduled" => class(EventStage::Scheduling, EventSeverity::Normal),
        "failedscheduling" => class(EventStage::Scheduling, EventSeverity::Warning),
        "preempted" => class(EventStage::Scheduling, EventSeverity::Warning),
        "pulling" | "pulled" | "created" => class(EventStage::Initializing, EventSeverity::Normal),
        "backoff" | "errimagepull" | "imagepullbackoff" => {
            class(EventStage::Initializing, EventSeverity::Warning)
        }
        "started" => class(EventStage::Running, EventSeverity::Normal),
        "unhealthy" => class(EventStage::Running, EventSeverity::Warning),
        "oomkilled" | "failed" => class(EventStage::Running, EventSeverity::Error),
        "killing" => class(EventStage::Terminating, EventSeverity::Normal),
        _ => EventClass::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Scheduled", EventStage::Scheduling, EventSeverity::Normal)]
    #[test_case("FailedScheduling", EventStage::Scheduling, EventSeverity::Warning)]
    #[test_case("Pulling", EventStage::Initializing, EventSeverity::Normal)]
    #[test_case("BackOff", EventStage::Initializing, EventSeverity::Warning)]
    #[test_case("Started", EventStage::Running, EventSeverity::Normal)]
    #[test_case("OOMKilled", EventStage::Running, EventSeverity::Error)]
    #[test_case("Killing", EventStage::Terminating, EventSeverity::Normal)]
    fn known_reasons_are_bucketed(reason: &str, stage: EventStage, severity: EventSeverity) {
        assert_eq!(classify_reason(reason), EventClass { stage, severity });
    }

    #[test]
    fn unknown_reason_falls_back_to_default() {
        let class = classify_reason("SomethingNewFromTheBackend");
        assert_eq!(class.stage, EventStage::Other);
        assert_eq!(class.severity, EventSeverity::Normal);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify_reason("started"), classify_reason("STARTED"));
    }
}
