// Primality Testing and Prime Generation
// Miller-Rabin plus random, safe, strong and RSA-pair prime searches

use log::debug;
use num_bigint::RandBigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::{thread_rng, Rng};

use super::bigint::{from_u64, mod_inverse, mod_pow, RsaBigInt};
use super::config::{KeyGenConfig, PrimeConfig};
use super::error::{Result, RsaError};

/// Smallest bit length accepted by `generate_prime`
pub const MIN_PRIME_BITS: u64 = 2;

/// Smallest bit length accepted by `generate_safe_prime` (7 = 2*3 + 1)
pub const MIN_SAFE_PRIME_BITS: u64 = 3;

/// Smallest bit length accepted by `generate_strong_prime`
pub const MIN_STRONG_PRIME_BITS: u64 = 64;

/// Smallest modulus bit length accepted by `generate_rsa_primes`
pub const MIN_RSA_BITS: u64 = 16;

/// Bits below half the target kept free for the Gordon multiplier j
const STRONG_FACTOR_SLACK_BITS: u64 = 16;

/// Small primes for trial division of candidates
const SMALL_PRIMES: [u64; 24] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Miller-Rabin primality test
/// Returns true if n is probably prime; a composite survives with
/// probability at most 4^-rounds.
pub fn is_probable_prime<R: Rng + ?Sized>(n: &RsaBigInt, rounds: u32, rng: &mut R) -> bool {
    let two = from_u64(2);
    if n < &two {
        return false;
    }
    if n == &two || n == &from_u64(3) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    'witness: for _ in 0..rounds {
        // Random witness a in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = mod_pow(&a, &d, n);

        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = mod_pow(&x, &two, n);
            if x == n_minus_one {
                continue 'witness;
            }
            if x.is_one() {
                // Nontrivial square root of 1
                return false;
            }
        }

        return false;
    }

    true
}

/// Miller-Rabin with the thread-local generator
pub fn is_prime(n: &RsaBigInt, rounds: u32) -> bool {
    is_probable_prime(n, rounds, &mut thread_rng())
}

/// Cheap rejection of candidates with a small factor
fn passes_trial_division(n: &RsaBigInt) -> bool {
    for &p in &SMALL_PRIMES {
        let rem = (n % p).to_u64().unwrap_or(1);
        if rem == 0 {
            return n == &from_u64(p);
        }
    }
    true
}

fn check_bits(bits: u64, min: u64) -> Result<()> {
    if bits < min {
        return Err(RsaError::InvalidBitLength { bits, min });
    }
    Ok(())
}

/// Random odd integer with exactly `bits` bits
fn random_candidate<R: Rng + ?Sized>(rng: &mut R, bits: u64) -> RsaBigInt {
    let mut n = rng.gen_biguint(bits);
    n |= RsaBigInt::one() << (bits - 1);
    n |= RsaBigInt::one();
    n
}

fn is_candidate_prime<R: Rng + ?Sized>(n: &RsaBigInt, config: &PrimeConfig, rng: &mut R) -> bool {
    passes_trial_division(n) && is_probable_prime(n, config.rounds, rng)
}

/// Generate a random prime of exactly `bits` bits
pub fn generate_prime_with<R: Rng + ?Sized>(
    rng: &mut R,
    bits: u64,
    config: &PrimeConfig,
) -> Result<RsaBigInt> {
    check_bits(bits, MIN_PRIME_BITS)?;
    config.validate()?;

    for attempt in 1..=config.max_attempts {
        let candidate = random_candidate(rng, bits);
        if is_candidate_prime(&candidate, config, rng) {
            debug!("found {}-bit prime after {} candidates", bits, attempt);
            return Ok(candidate);
        }
    }

    Err(RsaError::PrimeSearchExhausted {
        bits,
        attempts: config.max_attempts,
    })
}

/// Generate a random prime of exactly `bits` bits with default settings
pub fn generate_prime(bits: u64) -> Result<RsaBigInt> {
    generate_prime_with(&mut thread_rng(), bits, &PrimeConfig::default())
}

/// Generate a safe prime p = 2q + 1 (q prime) of exactly `bits` bits
pub fn generate_safe_prime_with<R: Rng + ?Sized>(
    rng: &mut R,
    bits: u64,
    config: &PrimeConfig,
) -> Result<RsaBigInt> {
    check_bits(bits, MIN_SAFE_PRIME_BITS)?;
    config.validate()?;

    for attempt in 1..=config.max_attempts {
        let q = generate_prime_with(rng, bits - 1, config)?;
        let p = (&q << 1usize) + 1u8;
        if is_candidate_prime(&p, config, rng) {
            debug!("found {}-bit safe prime after {} Sophie Germain candidates", bits, attempt);
            return Ok(p);
        }
    }

    Err(RsaError::PrimeSearchExhausted {
        bits,
        attempts: config.max_attempts,
    })
}

/// Generate a safe prime of exactly `bits` bits with default settings
pub fn generate_safe_prime(bits: u64) -> Result<RsaBigInt> {
    generate_safe_prime_with(&mut thread_rng(), bits, &PrimeConfig::default())
}

/// A strong prime together with the large factors of p-1 and p+1
#[derive(Debug, Clone, PartialEq, Eq)]
struct GordonPrime {
    p: RsaBigInt,
    /// Prime dividing p - 1
    r: RsaBigInt,
    /// Prime dividing p + 1
    s: RsaBigInt,
}

/// Gordon's construction
///
/// 1. pick primes s and t of roughly half the target size
/// 2. find the first prime r = 2it + 1 (so r - 1 has the large factor t)
/// 3. p0 = 2 (s^-1 mod r) s - 1, which is 1 mod r and -1 mod s
/// 4. search p = p0 + 2jrs for j placing p in [2^(bits-1), 2^bits)
fn gordon<R: Rng + ?Sized>(rng: &mut R, bits: u64, config: &PrimeConfig) -> Result<GordonPrime> {
    let factor_bits = bits / 2 - STRONG_FACTOR_SLACK_BITS;
    let lower = RsaBigInt::one() << (bits - 1);
    let upper = RsaBigInt::one() << bits;

    for _ in 0..config.max_attempts {
        let s = generate_prime_with(rng, factor_bits, config)?;
        let t = generate_prime_with(rng, factor_bits, config)?;

        let two_t = &t << 1usize;
        let mut r = &two_t + 1u8;
        let mut found_r = false;
        for _ in 0..config.max_attempts {
            if is_candidate_prime(&r, config, rng) {
                found_r = true;
                break;
            }
            r += &two_t;
        }
        if !found_r || r == s {
            continue;
        }

        let s_inv = mod_inverse(&s, &r)?;
        let p0 = ((&s_inv * &s) << 1usize) - 1u8;
        let step = (&r * &s) << 1usize;

        // j_lo = ceil((lower - p0) / step), j_hi = floor((upper - 1 - p0) / step)
        let j_lo = if lower > p0 {
            (&lower - &p0).div_ceil(&step)
        } else {
            RsaBigInt::zero()
        };
        let j_hi = (&upper - 1u8 - &p0) / &step;
        if j_lo > j_hi {
            continue;
        }

        for attempt in 1..=config.max_attempts {
            let j = rng.gen_biguint_range(&j_lo, &(&j_hi + 1u8));
            let p = &p0 + &j * &step;
            if is_candidate_prime(&p, config, rng) {
                debug!("found {}-bit strong prime after {} multipliers", bits, attempt);
                return Ok(GordonPrime { p, r, s });
            }
        }
    }

    Err(RsaError::PrimeSearchExhausted {
        bits,
        attempts: config.max_attempts,
    })
}

/// Generate a strong prime of exactly `bits` bits: p - 1 and p + 1 each
/// carry a prime factor of roughly half of p's size
pub fn generate_strong_prime_with<R: Rng + ?Sized>(
    rng: &mut R,
    bits: u64,
    config: &PrimeConfig,
) -> Result<RsaBigInt> {
    check_bits(bits, MIN_STRONG_PRIME_BITS)?;
    config.validate()?;
    gordon(rng, bits, config).map(|g| g.p)
}

/// Generate a strong prime of exactly `bits` bits with default settings
pub fn generate_strong_prime(bits: u64) -> Result<RsaBigInt> {
    generate_strong_prime_with(&mut thread_rng(), bits, &PrimeConfig::default())
}

/// Two distinct primes of `bits` bits each, no further constraint
pub fn generate_prime_pair_with<R: Rng + ?Sized>(
    rng: &mut R,
    bits: u64,
    config: &PrimeConfig,
) -> Result<(RsaBigInt, RsaBigInt)> {
    let p = generate_prime_with(rng, bits, config)?;
    for _ in 0..config.max_attempts {
        let q = generate_prime_with(rng, bits, config)?;
        if q != p {
            return Ok((p, q));
        }
    }

    Err(RsaError::PrimeSearchExhausted {
        bits,
        attempts: config.max_attempts,
    })
}

/// Two distinct primes of `bits` bits each with default settings
pub fn generate_prime_pair(bits: u64) -> Result<(RsaBigInt, RsaBigInt)> {
    generate_prime_pair_with(&mut thread_rng(), bits, &PrimeConfig::default())
}

/// Smallest |p - q| accepted for a modulus of `bits` bits
pub fn min_prime_distance(bits: u64, gap_bits: u64) -> RsaBigInt {
    RsaBigInt::one() << (bits / 2).saturating_sub(gap_bits)
}

/// Primes p, q of `bits / 2` bits each for an RSA modulus of about `bits` bits
///
/// `q` is redrawn while it equals `p` or lies closer to it than
/// `min_prime_distance(bits, config.distance_gap_bits)`.
pub fn generate_rsa_primes_with<R: Rng + ?Sized>(
    rng: &mut R,
    bits: u64,
    config: &KeyGenConfig,
) -> Result<(RsaBigInt, RsaBigInt)> {
    check_bits(bits, MIN_RSA_BITS)?;
    if bits % 2 != 0 {
        return Err(RsaError::InvalidBitLength {
            bits,
            min: MIN_RSA_BITS,
        });
    }
    config.validate()?;

    let half_bits = bits / 2;
    let threshold = min_prime_distance(bits, config.distance_gap_bits);
    let p = generate_prime_with(rng, half_bits, &config.prime)?;

    for _ in 0..config.prime.max_attempts {
        let q = generate_prime_with(rng, half_bits, &config.prime)?;
        let distance = if p > q { &p - &q } else { &q - &p };
        if distance.is_zero() {
            debug!("second prime equals the first, redrawing");
            continue;
        }
        if distance < threshold {
            debug!("prime pair closer than 2^{} apart, redrawing", threshold.bits() - 1);
            continue;
        }
        return Ok((p, q));
    }

    Err(RsaError::PrimeSearchExhausted {
        bits: half_bits,
        attempts: config.prime.max_attempts,
    })
}

/// RSA prime pair with default settings
pub fn generate_rsa_primes(bits: u64) -> Result<(RsaBigInt, RsaBigInt)> {
    generate_rsa_primes_with(&mut thread_rng(), bits, &KeyGenConfig::default())
}
