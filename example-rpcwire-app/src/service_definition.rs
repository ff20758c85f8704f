mod add;
mod mult;

pub use add::Add;
pub use mult::Mult;

use std::io;

pub const SERVICE_NAME: &str = "Calculator";

/// A calculator method whose arguments and result travel as bitcode
/// payloads.
pub trait CalculatorMethod {
    const METHOD_NAME: &'static str;

    fn encode_request(numbers: &[f64]) -> Vec<u8>;

    fn decode_request(bytes: &[u8]) -> Result<Vec<f64>, io::Error>;

    fn encode_response(result: f64) -> Vec<u8>;

    fn decode_response(bytes: &[u8]) -> Result<f64, io::Error>;

    fn compute(numbers: &[f64]) -> f64;
}
