//! Shared mutable state
//!
//! The report store and the USSD session store are the only mutable
//! collaborators in the service. Both are shared across handlers behind an
//! `Arc` and serialize access internally, so the strictly-increasing report
//! id invariant holds under concurrent requests.

pub mod reports;
pub mod sessions;

pub use reports::{NewReport, Report, ReportStatus, ReportStore};
pub use sessions::SessionStore;
