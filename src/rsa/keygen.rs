// RSA Key Generation
// Derives (n, e) and (n, d) from a prime pair; p, q and φ(n) never leave this module

use std::fmt;

use log::{debug, info, warn};
use num_traits::One;
use rand::{thread_rng, Rng};

use super::bigint::{from_u64, gcd, mod_inverse, RsaBigInt};
use super::config::KeyGenConfig;
use super::error::{Result, RsaError};
use super::prime::{generate_rsa_primes_with, is_prime};

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    n: RsaBigInt,
    e: RsaBigInt,
}

/// RSA Private Key
///
/// Holds only the modulus and the private exponent. `Debug` output
/// redacts the exponent.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    n: RsaBigInt,
    d: RsaBigInt,
}

/// RSA Key Pair (both public and private keys, same modulus)
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

impl RsaPublicKey {
    pub fn new(n: RsaBigInt, e: RsaBigInt) -> Self {
        Self { n, e }
    }

    /// Modulus
    pub fn n(&self) -> &RsaBigInt {
        &self.n
    }

    /// Public exponent
    pub fn e(&self) -> &RsaBigInt {
        &self.e
    }

    /// Get the bit length of the modulus
    pub fn bits(&self) -> u64 {
        self.n.bits()
    }

    /// Encrypt a string using this public key
    pub fn encrypt(&self, text: &str) -> Result<Vec<RsaBigInt>> {
        super::encrypt::encrypt_string(text, self)
    }
}

impl RsaPrivateKey {
    pub fn new(n: RsaBigInt, d: RsaBigInt) -> Self {
        Self { n, d }
    }

    /// Modulus
    pub fn n(&self) -> &RsaBigInt {
        &self.n
    }

    /// Private exponent
    pub fn d(&self) -> &RsaBigInt {
        &self.d
    }

    /// Get the bit length of the modulus
    pub fn bits(&self) -> u64 {
        self.n.bits()
    }

    /// Decrypt ciphertext blocks back to a string
    pub fn decrypt(&self, blocks: &[RsaBigInt]) -> Result<String> {
        super::decrypt::decrypt_string(blocks, self)
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", &self.n)
            .field("d", &"<redacted>")
            .finish()
    }
}

impl RsaKeyPair {
    /// Build a key pair from caller-chosen primes
    ///
    /// Both inputs must be distinct probable primes. The exponent is chosen
    /// from `config` exactly as in `generate_keypair_with`.
    pub fn from_primes(p: RsaBigInt, q: RsaBigInt, config: &KeyGenConfig) -> Result<Self> {
        config.validate()?;
        if p == q {
            return Err(RsaError::KeyGeneration("p and q must be distinct".to_string()));
        }
        for (name, value) in [("p", &p), ("q", &q)] {
            if !is_prime(value, config.prime.rounds) {
                return Err(RsaError::KeyGeneration(format!("{} = {} is not prime", name, value)));
            }
        }
        derive_keys(p, q, config)
    }

    /// Get the bit length of the modulus
    pub fn bits(&self) -> u64 {
        self.public_key.bits()
    }
}

/// First exponent candidate with 1 < e < φ(n) and gcd(e, φ(n)) = 1
fn select_public_exponent(phi: &RsaBigInt, config: &KeyGenConfig) -> Result<RsaBigInt> {
    let one = RsaBigInt::one();
    for candidate in config.exponent_candidates() {
        let e = from_u64(candidate);
        if e <= one || &e >= phi {
            debug!("exponent {} out of range for φ(n), skipping", candidate);
            continue;
        }
        if gcd(&e, phi).is_one() {
            return Ok(e);
        }
        if candidate == config.public_exponent {
            warn!("public exponent {} shares a factor with φ(n), trying fallbacks", candidate);
        }
    }

    Err(RsaError::KeyGeneration(
        "no candidate public exponent is coprime with φ(n)".to_string(),
    ))
}

/// Steps 2-5 of key generation. Consumes p and q so that neither they nor
/// φ(n) outlive this call.
fn derive_keys(p: RsaBigInt, q: RsaBigInt, config: &KeyGenConfig) -> Result<RsaKeyPair> {
    let n = &p * &q;
    let phi = (&p - 1u8) * (&q - 1u8);
    drop((p, q));

    let e = select_public_exponent(&phi, config)?;
    let d = mod_inverse(&e, &phi)
        .map_err(|err| RsaError::KeyGeneration(format!("private exponent: {}", err)))?;

    if !((&e * &d) % &phi).is_one() {
        return Err(RsaError::KeyGeneration("e * d is not 1 mod φ(n)".to_string()));
    }

    info!("generated {}-bit RSA key pair (e = {})", n.bits(), e);

    Ok(RsaKeyPair {
        public_key: RsaPublicKey { n: n.clone(), e },
        private_key: RsaPrivateKey { n, d },
    })
}

/// Generate RSA key pair with a modulus of about `bits` bits
/// (`bits` must be even and at least 16)
pub fn generate_keypair_with<R: Rng + ?Sized>(
    rng: &mut R,
    bits: u64,
    config: &KeyGenConfig,
) -> Result<RsaKeyPair> {
    let (p, q) = generate_rsa_primes_with(rng, bits, config)?;
    derive_keys(p, q, config)
}

/// Generate RSA key pair with default settings (e = 65537, 20 rounds)
pub fn generate_keypair(bits: u64) -> Result<RsaKeyPair> {
    generate_keypair_with(&mut thread_rng(), bits, &KeyGenConfig::default())
}
