use super::CalculatorMethod;
use bitcode::{Decode, Encode};
use std::io;

#[derive(Encode, Decode, PartialEq, Debug)]
struct AddRequestParams {
    numbers: Vec<f64>,
}

#[derive(Encode, Decode, PartialEq, Debug)]
struct AddResponseParams {
    result: f64,
}

pub struct Add;

impl CalculatorMethod for Add {
    const METHOD_NAME: &'static str = "Add";

    fn encode_request(numbers: &[f64]) -> Vec<u8> {
        bitcode::encode(&AddRequestParams {
            numbers: numbers.to_vec(),
        })
    }

    fn decode_request(bytes: &[u8]) -> Result<Vec<f64>, io::Error> {
        let raw = bitcode::decode::<AddRequestParams>(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(raw.numbers)
    }

    fn encode_response(result: f64) -> Vec<u8> {
        bitcode::encode(&AddResponseParams { result })
    }

    fn decode_response(bytes: &[u8]) -> Result<f64, io::Error> {
        let raw = bitcode::decode::<AddResponseParams>(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(raw.result)
    }

    fn compute(numbers: &[f64]) -> f64 {
        numbers.iter().sum()
    }
}
