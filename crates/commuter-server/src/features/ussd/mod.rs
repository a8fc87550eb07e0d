//! USSD menu channel

pub mod engine;
mod routes;


pub use engine::{UssdEngine, UssdResponse};
pub use routes::handle_ussd;
