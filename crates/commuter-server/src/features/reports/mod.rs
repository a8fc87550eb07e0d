//! Commuter report REST endpoints

mod routes;


pub use routes::reports_routes;
