// Demonstration Commands
// Prints keys and round-trips; all arithmetic lives in crate::rsa

use std::io::Write;

use anyhow::{ensure, Context};

use super::{make_rng, PrimeKind};
use crate::rsa::bigint::from_u64;
use crate::rsa::config::{KeyGenConfig, PrimeConfig};
use crate::rsa::keygen::{generate_keypair_with, RsaKeyPair};
use crate::rsa::prime::{generate_prime_with, generate_safe_prime_with, generate_strong_prime_with};
use crate::rsa::{decrypt_block, decrypt_string, encrypt_block, encrypt_string};

fn banner<W: Write>(out: &mut W, title: &str) -> anyhow::Result<()> {
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(60))?;
    Ok(())
}

pub fn run_demo<W: Write>(out: &mut W, bits: u64, message: &str, seed: Option<u64>) -> anyhow::Result<()> {
    banner(out, "RSA Encryption Demonstration")?;

    let mut rng = make_rng(seed);
    let keypair = generate_keypair_with(&mut rng, bits, &KeyGenConfig::default())
        .with_context(|| format!("generating {}-bit key pair", bits))?;

    writeln!(out, "\nPublic Key (n, e):")?;
    writeln!(out, "n = {}", keypair.public_key.n())?;
    writeln!(out, "e = {}", keypair.public_key.e())?;
    writeln!(out, "\nPrivate Key (n, d):")?;
    writeln!(out, "n = {}", keypair.private_key.n())?;
    writeln!(out, "d = {}", keypair.private_key.d())?;

    writeln!(out, "\nOriginal message: '{}'", message)?;
    let blocks = encrypt_string(message, &keypair.public_key).context("encrypting message")?;
    writeln!(out, "Encrypted message ({} blocks):", blocks.len())?;
    for block in &blocks {
        writeln!(out, "  {}", block)?;
    }
    let decrypted = decrypt_string(&blocks, &keypair.private_key).context("decrypting message")?;
    writeln!(out, "Decrypted message: '{}'", decrypted)?;
    writeln!(out, "Verification: {}", verdict(decrypted == message))?;

    writeln!(out, "\n{}", "-".repeat(40))?;
    let number = from_u64(42);
    let encrypted = encrypt_block(&number, &keypair.public_key)?;
    let recovered = decrypt_block(&encrypted, &keypair.private_key)?;
    writeln!(out, "Original number: {}", number)?;
    writeln!(out, "Encrypted number: {}", encrypted)?;
    writeln!(out, "Decrypted number: {}", recovered)?;
    writeln!(out, "Verification: {}", verdict(recovered == number))?;

    ensure!(decrypted == message && recovered == number, "round-trip mismatch");
    Ok(())
}

pub fn run_textbook<W: Write>(out: &mut W) -> anyhow::Result<()> {
    banner(out, "Textbook RSA: p = 61, q = 53, e = 17")?;

    let config = KeyGenConfig::default().with_public_exponent(17);
    let keypair = RsaKeyPair::from_primes(from_u64(61), from_u64(53), &config)?;
    writeln!(out, "n = {}", keypair.public_key.n())?;
    writeln!(out, "e = {}", keypair.public_key.e())?;
    writeln!(out, "d = {}", keypair.private_key.d())?;

    let m = from_u64(65);
    let c = encrypt_block(&m, &keypair.public_key)?;
    let back = decrypt_block(&c, &keypair.private_key)?;
    writeln!(out, "encrypt(65) = {}", c)?;
    writeln!(out, "decrypt({}) = {}", c, back)?;

    ensure!(back == m, "textbook round-trip mismatch");
    Ok(())
}

pub fn run_prime<W: Write>(out: &mut W, bits: u64, kind: PrimeKind, rounds: u32) -> anyhow::Result<()> {
    let config = PrimeConfig::default().with_rounds(rounds);
    let mut rng = make_rng(None);
    let p = match kind {
        PrimeKind::Plain => generate_prime_with(&mut rng, bits, &config),
        PrimeKind::Safe => generate_safe_prime_with(&mut rng, bits, &config),
        PrimeKind::Strong => generate_strong_prime_with(&mut rng, bits, &config),
    }
    .with_context(|| format!("generating {:?} prime of {} bits", kind, bits))?;

    writeln!(out, "prime_bits={}", p.bits())?;
    writeln!(out, "{}", p)?;
    Ok(())
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "SUCCESS"
    } else {
        "FAILED"
    }
}
