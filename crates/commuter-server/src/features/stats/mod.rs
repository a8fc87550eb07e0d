//! Service statistics REST endpoint

mod routes;


pub use routes::stats_routes;
