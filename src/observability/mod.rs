//! Observability for userstore
//!
//! - Structured logging (JSON lines)
//! - Monotonic request counters
//! - Typed lifecycle and request events
//!
//! # Usage
//!
//! ```ignore
//! use userstore::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::UserStored, &[("user_id", "1")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_users_created();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
