// Benchmark Command
// Wall-clock timing of key generation, encryption and decryption per key size

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context};

use crate::rsa::{decrypt_string, encrypt_string, generate_keypair};

const BENCH_MESSAGE: &str = "Benchmark message for RSA performance testing!";

/// Mean timings for one key size
#[derive(Clone, Debug)]
pub struct BenchResult {
    pub bits: u64,
    pub keygen: Duration,
    pub encrypt: Duration,
    pub decrypt: Duration,
}

pub fn bench_size(bits: u64, iterations: u32) -> anyhow::Result<BenchResult> {
    ensure!(iterations > 0, "iterations must be at least 1");

    let (mut keygen, mut encrypt, mut decrypt) = (Duration::ZERO, Duration::ZERO, Duration::ZERO);
    for _ in 0..iterations {
        let start = Instant::now();
        let keypair = generate_keypair(bits).with_context(|| format!("{}-bit key generation", bits))?;
        keygen += start.elapsed();

        let start = Instant::now();
        let blocks = encrypt_string(BENCH_MESSAGE, &keypair.public_key)?;
        encrypt += start.elapsed();

        let start = Instant::now();
        let plain = decrypt_string(&blocks, &keypair.private_key)?;
        decrypt += start.elapsed();

        ensure!(plain == BENCH_MESSAGE, "{}-bit round-trip mismatch", bits);
    }

    Ok(BenchResult {
        bits,
        keygen: keygen / iterations,
        encrypt: encrypt / iterations,
        decrypt: decrypt / iterations,
    })
}

pub fn run_benchmark<W: Write>(out: &mut W, sizes: &[u64], iterations: u32) -> anyhow::Result<()> {
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "RSA Performance Benchmark ({} iteration(s) per size)", iterations)?;
    writeln!(out, "{}", "=".repeat(60))?;

    for &bits in sizes {
        let result = bench_size(bits, iterations)?;
        writeln!(out, "\nTesting {}-bit keys:", result.bits)?;
        writeln!(out, "{}", "-".repeat(30))?;
        writeln!(out, "Key generation: {:.3} seconds", result.keygen.as_secs_f64())?;
        writeln!(out, "Encryption: {:.6} seconds", result.encrypt.as_secs_f64())?;
        writeln!(out, "Decryption: {:.6} seconds", result.decrypt.as_secs_f64())?;
    }
    Ok(())
}
