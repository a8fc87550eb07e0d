//! Traffic update REST endpoints

mod routes;

#[cfg(test)]
mod routes_test;

pub use routes::traffic_routes;
