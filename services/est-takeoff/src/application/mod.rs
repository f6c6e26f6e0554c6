pub mod commands;
pub mod handler;
pub mod queries;

pub use handler::ServiceHandler;
