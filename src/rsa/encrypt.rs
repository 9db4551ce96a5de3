// RSA Encryption Implementation
// c = m^e mod n per block; no padding scheme is applied

use super::bigint::{mod_pow, RsaBigInt};
use super::encoding::{encode_blocks, to_hex};
use super::error::{Result, RsaError};
use super::keygen::RsaPublicKey;

/// Encrypt a single block; requires m < n
pub fn encrypt_block(m: &RsaBigInt, public_key: &RsaPublicKey) -> Result<RsaBigInt> {
    if m >= public_key.n() {
        return Err(RsaError::MessageTooLarge {
            modulus_bits: public_key.bits(),
        });
    }
    Ok(mod_pow(m, public_key.e(), public_key.n()))
}

/// Encrypt bytes as an ordered sequence of ciphertext blocks
pub fn encrypt_bytes(plaintext: &[u8], public_key: &RsaPublicKey) -> Result<Vec<RsaBigInt>> {
    encode_blocks(plaintext, public_key.n())?
        .iter()
        .map(|block| encrypt_block(block, public_key))
        .collect()
}

/// Encrypt a string (UTF-8) as an ordered sequence of ciphertext blocks
pub fn encrypt_string(plaintext: &str, public_key: &RsaPublicKey) -> Result<Vec<RsaBigInt>> {
    encrypt_bytes(plaintext.as_bytes(), public_key)
}

/// Encrypt a string, rendering each ciphertext block as hex
pub fn encrypt_hex(plaintext: &str, public_key: &RsaPublicKey) -> Result<Vec<String>> {
    Ok(encrypt_string(plaintext, public_key)?
        .iter()
        .map(to_hex)
        .collect())
}
