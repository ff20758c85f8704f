use super::CalculatorMethod;
use bitcode::{Decode, Encode};
use std::io;

#[derive(Encode, Decode, PartialEq, Debug)]
struct MultRequestParams {
    numbers: Vec<f64>,
}

#[derive(Encode, Decode, PartialEq, Debug)]
struct MultResponseParams {
    result: f64,
}

pub struct Mult;

impl CalculatorMethod for Mult {
    const METHOD_NAME: &'static str = "Mult";

    fn encode_request(numbers: &[f64]) -> Vec<u8> {
        bitcode::encode(&MultRequestParams {
            numbers: numbers.to_vec(),
        })
    }

    fn decode_request(bytes: &[u8]) -> Result<Vec<f64>, io::Error> {
        let raw = bitcode::decode::<MultRequestParams>(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(raw.numbers)
    }

    fn encode_response(result: f64) -> Vec<u8> {
        bitcode::encode(&MultResponseParams { result })
    }

    fn decode_response(bytes: &[u8]) -> Result<f64, io::Error> {
        let raw = bitcode::decode::<MultResponseParams>(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(raw.result)
    }

    fn compute(numbers: &[f64]) -> f64 {
        numbers.iter().product()
    }
}
