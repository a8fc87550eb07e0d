//! Commuter Server Library
//!
//! HTTP service for Nairobi matatu commuter information, reachable over
//! three channels that share one in-memory state:
//!
//! - **USSD**: a menu dialog driven by telecom gateway callbacks
//! - **SMS**: a keyword command channel replying through an SMS gateway
//! - **REST**: a JSON API for routes, traffic, reports, and statistics
//!
//! # Architecture
//!
//! Each channel is a vertical feature slice under [`features`], routing into
//! the same [`catalog::RouteCatalog`] (read-only seed data), [`store`]
//! (reports and USSD sessions), and [`gateway`] (outbound SMS delivery).
//! USSD and SMS webhooks speak the Africa's Talking callback formats; the
//! REST API wraps replies in a `{success, count?, data}` envelope.
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework for webhooks and the REST API
//! - **Tower / tower-http**: middleware (tracing, CORS, compression)
//! - **Reqwest**: outbound SMS transport client
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use commuter_server::{catalog::RouteCatalog, features, gateway::SimulatedGateway,
//!     store::{ReportStore, SessionStore}};
//!
//! let state = features::AppState {
//!     catalog: Arc::new(RouteCatalog::nairobi()),
//!     reports: Arc::new(ReportStore::new()),
//!     sessions: Arc::new(SessionStore::new(std::time::Duration::from_secs(300))),
//!     gateway: Arc::new(SimulatedGateway),
//! };
//! let app = features::router(state);
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod features;
pub mod gateway;
pub mod middleware;
pub mod store;

// Re-export commonly used types
pub use error::{AppError, AppResult};
