//! Correlation table for checks that have been requested but not rolled.
//!
//! A check request is broadcast to other players and answered later by
//! whoever rolls it. Each request is issued a [`CheckId`]; the answer is
//! matched back by completing that id, which removes the entry.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::check::CheckRequest;

/// Identifier correlating a check request with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckId(pub Uuid);

impl CheckId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CheckId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A request waiting for its roll.
#[derive(Debug, Clone)]
pub struct PendingCheck {
    /// The outbound request.
    pub request: CheckRequest,
    /// When the request was issued.
    pub issued_at: DateTime<Utc>,
}

/// Outstanding check requests keyed by id.
#[derive(Debug, Default)]
pub struct PendingChecks {
    entries: HashMap<CheckId, PendingCheck>,
}

impl PendingChecks {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a request and return its id.
    pub fn issue(&mut self, request: CheckRequest) -> CheckId {
        self.issue_at(request, Utc::now())
    }

    /// Register a request with an explicit issue time.
    pub fn issue_at(&mut self, request: CheckRequest, issued_at: DateTime<Utc>) -> CheckId {
        let id = CheckId::new();
        tracing::debug!(%id, check = %request.kind, item = %request.item_name, "check requested");
        self.entries.insert(
            id,
            PendingCheck {
                request,
                issued_at,
            },
        );
        id
    }

    /// Look up an outstanding request.
    pub fn get(&self, id: CheckId) -> Option<&PendingCheck> {
        self.entries.get(&id)
    }

    /// Remove and return a request once its result is in.
    ///
    /// Returns `None` if the id is unknown or was already completed.
    pub fn complete(&mut self, id: CheckId) -> Option<CheckRequest> {
        let pending = self.entries.remove(&id)?;
        tracing::debug!(%id, "check completed");
        Some(pending.request)
    }

    /// Drop every request issued more than `max_age` before `now`.
    /// Returns how many were removed.
    pub fn expire(&mut self, now: DateTime<Utc>, max_age: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, p| now - p.issued_at <= max_age);
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::info!(removed, "expired stale check requests");
        }
        removed
    }

    /// Number of outstanding requests.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no requests are outstanding.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
