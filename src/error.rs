//! Error type shared by the encoders, the transport and the config loader.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DnsError {
    /// A label exceeded the 63 byte limit
    #[error("label '{0}' is too long ({1} bytes, max 63)")]
    LabelTooLong(String, usize),

    /// Two dots in a row, or a leading dot
    #[error("name '{0}' contains an empty label")]
    EmptyLabel(String),

    #[error("name '{0}' is too long ({1} bytes encoded, max 255)")]
    NameTooLong(String, usize),

    /// An encoder produced a different length than the name implies
    #[error("buffer length is {actual}, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("unable to generate 2 bytes of random bits: {0}")]
    IdGeneration(String),

    #[error("packet truncated: {needed} bytes needed at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("compressed name at offset {0} is not supported")]
    CompressedName(usize),

    #[error("invalid label at offset {0}")]
    InvalidLabel(usize),

    #[error("unable to write full request: sent {sent} of {len} bytes")]
    ShortWrite { sent: usize, len: usize },

    #[error("network error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DnsError>;
