//! Diagnostics emitted by an audit run.
//!
//! The orchestrator reports through an injected [`AuditObserver`] instead of
//! a process-wide logger. [`TracingObserver`] forwards to `tracing`;
//! [`RecordingObserver`] keeps events in memory for assertions.

use crate::audit::AuditStage;
use crate::core::ModuleId;
use parking_lot::Mutex;

/// A diagnostic produced while auditing.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditEvent {
    StageEntered {
        stage: AuditStage,
    },
    StageFailed {
        stage: AuditStage,
        error: String,
    },
    /// An edge referenced a module outside the analyzed set.
    EdgeDropped {
        source: ModuleId,
        target: ModuleId,
    },
    /// No coordinates could be recovered; the graph is built without them.
    LayoutUnavailable {
        reason: String,
    },
    /// The run stopped at `stage` and ended in `outcome`.
    RunEmpty {
        stage: AuditStage,
        outcome: AuditStage,
        reason: String,
    },
    RunCompleted {
        modules: usize,
        edges: usize,
        communities: usize,
    },
}

pub trait AuditObserver: Send + Sync {
    fn on_event(&self, event: &AuditEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AuditObserver for TracingObserver {
    fn on_event(&self, event: &AuditEvent) {
        match event {
            AuditEvent::StageEntered { stage } => {
                tracing::debug!(%stage, "entering audit stage");
            }
            AuditEvent::StageFailed { stage, error } => {
                tracing::error!(%stage, %error, "audit stage failed");
            }
            AuditEvent::EdgeDropped { source, target } => {
                tracing::debug!(%source, %target, "dropping edge to unknown module");
            }
            AuditEvent::LayoutUnavailable { reason } => {
                tracing::debug!(%reason, "layout coordinates unavailable");
            }
            AuditEvent::RunEmpty {
                stage,
                outcome,
                reason,
            } => {
                tracing::warn!(%stage, %outcome, %reason, "modularity audit produced no result");
            }
            AuditEvent::RunCompleted {
                modules,
                edges,
                communities,
            } => {
                tracing::info!(modules, edges, communities, "modularity audit complete");
            }
        }
    }
}

/// Stores every event it receives.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<AuditEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().clone()
    }

    pub fn any(&self, predicate: impl Fn(&AuditEvent) -> bool) -> bool {
        self.events.lock().iter().any(predicate)
    }

    pub fn count(&self, predicate: impl Fn(&AuditEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|e| predicate(e)).count()
    }
}

impl AuditObserver for RecordingObserver {
    fn on_event(&self, event: &AuditEvent) {
        self.events.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer_keeps_order() {
        let observer = RecordingObserver::new();
        observer.on_event(&AuditEvent::StageEntered {
            stage: AuditStage::Start,
        });
        observer.on_event(&AuditEvent::LayoutUnavailable {
            reason: "no diagram".into(),
        });

        let events = observer.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            AuditEvent::StageEntered {
                stage: AuditStage::Start
            }
        );
        assert!(observer.any(|e| matches!(e, AuditEvent::LayoutUnavailable { .. })));
        assert_eq!(
            observer.count(|e| matches!(e, AuditEvent::StageEntered { .. })),
            1
        );
    }

    #[test]
    fn test_tracing_observer_accepts_every_event() {
        let observer = TracingObserver;
        observer.on_event(&AuditEvent::RunCompleted {
            modules: 3,
            edges: 2,
            communities: 1,
        });
        observer.on_event(&AuditEvent::StageFailed {
            stage: AuditStage::GraphBuilt,
            error: "boom".into(),
        });
    }
}
