//! Diagnostics for audit runs and logging setup for the binary.
//!
//! Library code reports through an injected [`AuditObserver`]:
//!
//! ```ignore
//! use std::sync::Arc;
//! use modmap::observability::RecordingObserver;
//!
//! let observer = Arc::new(RecordingObserver::new());
//! let audit = ModularityAudit::new(config).with_observer(observer.clone());
//! audit.run(&extractor);
//! assert!(observer.events().iter().any(|e| matches!(e, AuditEvent::RunCompleted { .. })));
//! ```

pub mod logging;
pub mod observer;

pub use logging::{init_logging, LOG_ENV};
pub use observer::{AuditEvent, AuditObserver, RecordingObserver, TracingObserver};
