//! SMS command channel

pub mod interpreter;
mod routes;

#[cfg(test)]
mod routes_test;

pub use interpreter::SmsInterpreter;
pub use routes::handle_sms;
