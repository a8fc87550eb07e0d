//! Route catalog REST endpoints

mod routes;


pub use routes::catalog_routes;
