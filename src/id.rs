use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::{DnsError, Result};

/// Supplies the 16-bit ID stamped into each query header.
pub trait IdSource {
    fn next_id(&mut self) -> Result<u16>;
}

/// IDs drawn from the operating system's secure random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomId;

impl IdSource for OsRandomId {
    fn next_id(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| DnsError::IdGeneration(e.to_string()))?;

        Ok(u16::from_be_bytes(buf))
    }
}

/// Always hands out the same ID.
#[derive(Debug, Clone, Copy)]
pub struct FixedId(pub u16);

impl IdSource for FixedId {
    fn next_id(&mut self) -> Result<u16> {
        Ok(self.0)
    }
}
