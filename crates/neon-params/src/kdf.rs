//! Key derivation parameters for NEP-2 encrypted keys

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Length of the scrypt output split into the XOR mask and the AES key
pub const NEP2_DERIVED_KEY_LENGTH: usize = 64;

/// scrypt cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScryptParams {
    /// log2 of the CPU/memory cost `N`
    pub log_n: u8,
    /// Block size
    pub r: u32,
    /// Parallelization
    pub p: u32,
}

impl ScryptParams {
    /// Parameters mandated by NEP-2 (N = 16384, r = 8, p = 8)
    pub const NEP2: Self = Self {
        log_n: 14,
        r: 8,
        p: 8,
    };

    /// Cost parameter `N`
    pub fn n(&self) -> u64 {
        1u64 << self.log_n
    }

    /// Check the parameters are usable
    pub fn validate(&self) -> Result<()> {
        if self.log_n == 0 || self.log_n > 24 {
            return Err(Error::InvalidScryptParams(format!(
                "log_n must be within 1..=24, got {}",
                self.log_n
            )));
        }
        if self.r == 0 || self.p == 0 {
            return Err(Error::InvalidScryptParams(
                "r and p must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ScryptParams {
    fn default() -> Self {
        Self::NEP2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nep2_defaults() {
        let params = ScryptParams::default();
        assert_eq!(params.n(), 16_384);
        assert_eq!(params.r, 8);
        assert_eq!(params.p, 8);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_params() {
        assert!(ScryptParams { log_n: 0, r: 8, p: 8 }.validate().is_err());
        assert!(ScryptParams { log_n: 30, r: 8, p: 8 }.validate().is_err());
        assert!(ScryptParams { log_n: 10, r: 0, p: 8 }.validate().is_err());
        assert!(ScryptParams { log_n: 10, r: 8, p: 0 }.validate().is_err());
    }
}
