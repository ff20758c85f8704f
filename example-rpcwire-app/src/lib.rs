mod client;
mod error;
mod server;
pub mod service_definition;

pub use client::CalculatorClient;
pub use error::CallError;
pub use server::CalculatorServer;
pub use service_definition::{Add, CalculatorMethod, Mult};
