use thiserror::Error;

#[derive(Debug, Error)]
pub enum BloomError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Only detectable when the value is wider than the filter.
    #[error("Raw value has {value_bits} bits but the filter holds {filter_bits}")]
    ParameterMismatch { value_bits: u64, filter_bits: u64 },

    #[error("Hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, BloomError>;
