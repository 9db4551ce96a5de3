// RSA Decryption Implementation
// m = c^d mod n per block, then block decoding back to bytes/text

use super::bigint::{mod_pow, RsaBigInt};
use super::encoding::{decode_blocks, from_hex};
use super::error::{Result, RsaError};
use super::keygen::RsaPrivateKey;

/// Decrypt a single block; requires c < n
pub fn decrypt_block(c: &RsaBigInt, private_key: &RsaPrivateKey) -> Result<RsaBigInt> {
    if c >= private_key.n() {
        return Err(RsaError::MessageTooLarge {
            modulus_bits: private_key.bits(),
        });
    }
    Ok(mod_pow(c, private_key.d(), private_key.n()))
}

/// Decrypt ordered ciphertext blocks back to bytes
pub fn decrypt_bytes(blocks: &[RsaBigInt], private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let plain: Vec<RsaBigInt> = blocks
        .iter()
        .map(|c| decrypt_block(c, private_key))
        .collect::<Result<_>>()?;
    decode_blocks(&plain, private_key.n())
}

/// Decrypt ordered ciphertext blocks back to a string
pub fn decrypt_string(blocks: &[RsaBigInt], private_key: &RsaPrivateKey) -> Result<String> {
    let plaintext = decrypt_bytes(blocks, private_key)?;
    Ok(String::from_utf8(plaintext)?)
}

/// Decrypt hex-rendered ciphertext blocks back to a string
pub fn decrypt_hex<S: AsRef<str>>(blocks: &[S], private_key: &RsaPrivateKey) -> Result<String> {
    let blocks: Vec<RsaBigInt> = blocks
        .iter()
        .map(|b| from_hex(b.as_ref()))
        .collect::<Result<_>>()?;
    decrypt_string(&blocks, private_key)
}
