// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod config;
pub mod decrypt;
pub mod encoding;
pub mod encrypt;
pub mod error;
pub mod keygen;
pub mod prime;

pub use bigint::{extended_gcd, gcd, lcm, mod_inverse, mod_pow, RsaBigInt};
pub use config::{KeyGenConfig, PrimeConfig};
pub use decrypt::{decrypt_block, decrypt_bytes, decrypt_hex, decrypt_string};
pub use encoding::{int_to_string, string_to_int};
pub use encrypt::{encrypt_block, encrypt_bytes, encrypt_hex, encrypt_string};
pub use error::{Result, RsaError};
pub use keygen::{generate_keypair, generate_keypair_with, RsaKeyPair, RsaPrivateKey, RsaPublicKey};
pub use prime::{
    generate_prime, generate_prime_pair, generate_prime_pair_with, generate_prime_with,
    generate_rsa_primes, generate_rsa_primes_with, generate_safe_prime, generate_safe_prime_with,
    generate_strong_prime, generate_strong_prime_with, is_prime, is_probable_prime,
};
