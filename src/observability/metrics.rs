//! Request counters
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Atomic increments with relaxed ordering; exact per counter, not across counters

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters shared by the request adapter and the metrics route
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Puts that created a new id
    users_created: AtomicU64,
    /// Puts that overwrote an existing id
    users_replaced: AtomicU64,
    users_deleted: AtomicU64,
    lookups_hit: AtomicU64,
    lookups_missed: AtomicU64,
    /// 4xx responses
    requests_rejected: AtomicU64,
    /// 5xx responses
    internal_errors: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_users_created(&self) {
        self.users_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_users_replaced(&self) {
        self.users_replaced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_users_deleted(&self) {
        self.users_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lookups_hit(&self) {
        self.lookups_hit.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lookups_missed(&self) {
        self.lookups_missed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_requests_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_internal_errors(&self) {
        self.internal_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            users_created: self.users_created.load(Ordering::Relaxed),
            users_replaced: self.users_replaced.load(Ordering::Relaxed),
            users_deleted: self.users_deleted.load(Ordering::Relaxed),
            lookups_hit: self.lookups_hit.load(Ordering::Relaxed),
            lookups_missed: self.lookups_missed.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            internal_errors: self.internal_errors.load(Ordering::Relaxed),
        }
    }

    /// Current counters as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        // Plain struct of u64s; serialization cannot fail
        serde_json::to_value(self.snapshot()).unwrap_or_default()
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub users_created: u64,
    pub users_replaced: u64,
    pub users_deleted: u64,
    pub lookups_hit: u64,
    pub lookups_missed: u64,
    pub requests_rejected: u64,
    pub internal_errors: u64,
}
