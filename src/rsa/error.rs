// RSA Error Types
// Every fallible operation in the crate reports one of these

use thiserror::Error;

/// Errors produced by prime generation, key generation and the transforms
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RsaError {
    #[error("{value} has no inverse modulo {modulus}")]
    NoInverse { value: String, modulus: String },

    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("message block does not fit a {modulus_bits}-bit modulus")]
    MessageTooLarge { modulus_bits: u64 },

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("no {bits}-bit prime found after {attempts} attempts")]
    PrimeSearchExhausted { bits: u64, attempts: usize },

    #[error("bit length {bits} is invalid (minimum {min})")]
    InvalidBitLength { bits: u64, min: u64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::string::FromUtf8Error> for RsaError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        RsaError::Decoding(format!("invalid UTF-8: {}", err))
    }
}

impl From<hex::FromHexError> for RsaError {
    fn from(err: hex::FromHexError) -> Self {
        RsaError::Decoding(format!("invalid hex: {}", err))
    }
}

/// Result alias used throughout the RSA module
pub type Result<T> = std::result::Result<T, RsaError>;
