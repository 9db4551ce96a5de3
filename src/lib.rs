//! Textbook RSA from first principles.
//!
//! Miller-Rabin primality testing, random/safe/strong prime generation,
//! key-pair derivation and block-wise encryption over `num-bigint`. There is
//! no padding and no constant-time arithmetic; this is for experimentation.
//!
//! ```no_run
//! let keypair = rsa_lab::generate_keypair(1024)?;
//! let blocks = rsa_lab::encrypt_string("Hello, RSA!", &keypair.public_key)?;
//! assert_eq!(rsa_lab::decrypt_string(&blocks, &keypair.private_key)?, "Hello, RSA!");
//! # Ok::<(), rsa_lab::RsaError>(())
//! ```

pub mod cli;
pub mod rsa;

pub use rsa::*;
