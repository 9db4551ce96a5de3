// Generation Parameters
// Tunables for the prime search and the key engine

use super::error::{Result, RsaError};

/// Default Miller-Rabin rounds (false-positive probability <= 4^-20)
pub const DEFAULT_ROUNDS: u32 = 20;

/// Default cap on candidates drawn by a single prime search
pub const DEFAULT_MAX_ATTEMPTS: usize = 100_000;

/// Default public exponent (F4)
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 65537;

/// Exponents tried, in order, when the preferred one shares a factor with φ(n)
pub const FALLBACK_EXPONENTS: [u64; 10] = [3, 5, 7, 11, 13, 17, 257, 65537, 65539, 65543];

/// Default closeness threshold for RSA prime pairs: |p - q| >= 2^(bits/2 - 10)
pub const DEFAULT_DISTANCE_GAP_BITS: u64 = 10;

/// Configuration for primality testing and prime search
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeConfig {
    pub rounds: u32,
    pub max_attempts: usize,
}

impl Default for PrimeConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl PrimeConfig {
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(RsaError::InvalidConfig("rounds must be at least 1".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(RsaError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for RSA key pair generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyGenConfig {
    pub prime: PrimeConfig,
    pub public_exponent: u64,
    pub fallback_exponents: Vec<u64>,
    pub distance_gap_bits: u64,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            prime: PrimeConfig::default(),
            public_exponent: DEFAULT_PUBLIC_EXPONENT,
            fallback_exponents: FALLBACK_EXPONENTS.to_vec(),
            distance_gap_bits: DEFAULT_DISTANCE_GAP_BITS,
        }
    }
}

impl KeyGenConfig {
    pub fn with_prime_config(mut self, prime: PrimeConfig) -> Self {
        self.prime = prime;
        self
    }

    pub fn with_public_exponent(mut self, e: u64) -> Self {
        self.public_exponent = e;
        self
    }

    pub fn with_fallback_exponents(mut self, exponents: Vec<u64>) -> Self {
        self.fallback_exponents = exponents;
        self
    }

    pub fn with_distance_gap_bits(mut self, gap: u64) -> Self {
        self.distance_gap_bits = gap;
        self
    }

    /// Preferred exponent first, then the fallbacks, without repeats
    pub fn exponent_candidates(&self) -> Vec<u64> {
        let mut candidates = vec![self.public_exponent];
        for &e in &self.fallback_exponents {
            if !candidates.contains(&e) {
                candidates.push(e);
            }
        }
        candidates
    }

    pub fn validate(&self) -> Result<()> {
        self.prime.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KeyGenConfig::default();
        assert_eq!(config.prime.rounds, 20);
        assert_eq!(config.public_exponent, 65537);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_exponent_candidates_dedup() {
        let config = KeyGenConfig::default().with_public_exponent(17);
        let candidates = config.exponent_candidates();
        assert_eq!(candidates[0], 17);
        assert_eq!(candidates.iter().filter(|&&e| e == 17).count(), 1);
        assert!(candidates.contains(&65537));
    }

    #[test]
    fn test_invalid_config() {
        let config = PrimeConfig::default().with_rounds(0);
        assert!(matches!(config.validate(), Err(RsaError::InvalidConfig(_))));

        let config = KeyGenConfig::default()
            .with_prime_config(PrimeConfig::default().with_max_attempts(0));
        assert!(config.validate().is_err());
    }
}
