//! Commuter report store
//!
//! Append-only collection of commuter-submitted reports. Reports are created
//! by both the SMS interpreter and the REST layer; the two paths share one
//! counter, allocated under the same lock as the append so ids are strictly
//! increasing and never reused.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Lifecycle state of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Investigating,
    Resolved,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "pending"),
            ReportStatus::Investigating => write!(f, "investigating"),
            ReportStatus::Resolved => write!(f, "resolved"),
        }
    }
}

/// A commuter-submitted complaint about a vehicle/route/issue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: u64,
    /// Vehicle registration, normalized to uppercase by the store
    pub vehicle: String,
    /// Route reference as submitted (a number or a name); never validated
    /// against the catalog
    pub route: String,
    pub issue: String,
    /// Reporter phone number, or "Anonymous"
    pub reporter: String,
    pub status: ReportStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields for a report about to be created
#[derive(Debug, Clone)]
pub struct NewReport {
    pub vehicle: String,
    pub route: String,
    pub issue: String,
    pub reporter: String,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    reports: Vec<Report>,
}

/// Shared, append-only report collection with a process-lifetime id counter
#[derive(Debug)]
pub struct ReportStore {
    inner: Mutex<Inner>,
}

impl Default for ReportStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                reports: Vec::new(),
            }),
        }
    }

    /// Create a report, assigning the next id.
    ///
    /// Id allocation and append happen under one lock acquisition.
    pub fn create(&self, new: NewReport) -> Report {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let report = Report {
            id: inner.next_id,
            vehicle: new.vehicle.to_uppercase(),
            route: new.route,
            issue: new.issue,
            reporter: new.reporter,
            status: ReportStatus::Pending,
            timestamp: Utc::now(),
            updated_at: None,
        };
        inner.next_id += 1;
        inner.reports.push(report.clone());
        tracing::info!(report_id = report.id, vehicle = %report.vehicle, "Report created");
        report
    }

    /// All reports in creation order
    pub fn list(&self) -> Vec<Report> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .reports
            .clone()
    }

    pub fn count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .reports
            .len()
    }

    /// Update a report's status, stamping `updated_at`.
    ///
    /// Returns the updated report, or `None` when the id is unknown.
    pub fn update_status(&self, id: u64, status: ReportStatus) -> Option<Report> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let report = inner.reports.iter_mut().find(|r| r.id == id)?;
        report.status = status;
        report.updated_at = Some(Utc::now());
        Some(report.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_report(vehicle: &str) -> NewReport {
        NewReport {
            vehicle: vehicle.to_string(),
            route: "46".to_string(),
            issue: "overcharging".to_string(),
            reporter: "+254700000001".to_string(),
        }
    }

    #[test]
    fn test_ids_are_strictly_increasing_without_gaps() {
        let store = ReportStore::new();
        let ids: Vec<u64> = (0..5).map(|_| store.create(new_report("kca123a")).id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_vehicle_is_normalized_to_uppercase() {
        let store = ReportStore::new();
        let report = store.create(new_report("kca999z"));
        assert_eq!(report.vehicle, "KCA999Z");
    }

    #[test]
    fn test_update_status_stamps_updated_at() {
        let store = ReportStore::new();
        let id = store.create(new_report("KDA001B")).id;

        let updated = store.update_status(id, ReportStatus::Resolved).unwrap();
        assert_eq!(updated.status, ReportStatus::Resolved);
        assert!(updated.updated_at.is_some());

        assert!(store.update_status(999, ReportStatus::Resolved).is_none());
    }

    #[test]
    fn test_ids_unique_across_concurrent_writers() {
        let store = Arc::new(ReportStore::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                (0..25).map(|_| store.create(new_report("kbz555x")).id).collect::<Vec<_>>()
            }));
        }

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 200);
        assert_eq!(*ids.last().unwrap(), 200);
    }
}
