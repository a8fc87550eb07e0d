//! USSD session store
//!
//! The telecom gateway re-sends the whole dialog text on every step, so the
//! only state that must survive between steps is what cannot be derived from
//! the text itself: the vehicle registration captured mid-dialog. Sessions
//! the gateway abandons without a terminating step would otherwise
//! accumulate forever, so entries expire after a TTL since last touch and
//! stale ones are swept on access.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct SessionEntry {
    vehicle: String,
    touched: Instant,
}

/// TTL-bounded map from gateway session id to in-progress dialog state
#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    inner: Mutex<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Record the vehicle registration entered in this dialog
    pub fn put_vehicle(&self, session_id: &str, vehicle: &str) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Self::sweep(&mut inner, self.ttl);
        inner.insert(
            session_id.to_string(),
            SessionEntry {
                vehicle: vehicle.to_string(),
                touched: Instant::now(),
            },
        );
    }

    /// Remove and return the vehicle registration for a finished dialog
    pub fn take_vehicle(&self, session_id: &str) -> Option<String> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Self::sweep(&mut inner, self.ttl);
        inner.remove(session_id).map(|entry| entry.vehicle)
    }

    /// Discard any state for a terminated dialog
    pub fn end(&self, session_id: &str) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.remove(session_id);
        Self::sweep(&mut inner, self.ttl);
    }

    /// Number of live sessions (stale entries excluded)
    pub fn len(&self) -> usize {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Self::sweep(&mut inner, self.ttl);
        inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sweep(inner: &mut HashMap<String, SessionEntry>, ttl: Duration) {
        inner.retain(|_, entry| entry.touched.elapsed() < ttl);
    }
}
