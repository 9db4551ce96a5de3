// RSA Big Integer Operations
// Number theory on top of num-bigint: gcd, Bézout coefficients, inverses, exponentiation

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use super::error::{Result, RsaError};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (big-endian)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert big integer to bytes (big-endian)
pub fn to_bytes(n: &RsaBigInt) -> Vec<u8> {
    n.to_bytes_be()
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply, reducing after every multiplication.
///
/// Panics if `modulus` is zero.
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Greatest common divisor (Euclid). `gcd(a, 0) == a`.
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Least common multiple
pub fn lcm(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    if a.is_zero() || b.is_zero() {
        return RsaBigInt::zero();
    }
    (a / gcd(a, b)) * b
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd = gcd(a, b)
pub fn extended_gcd(a: &RsaBigInt, b: &RsaBigInt) -> (RsaBigInt, BigInt, BigInt) {
    let mut old_r = BigInt::from_biguint(Sign::Plus, a.clone());
    let mut r = BigInt::from_biguint(Sign::Plus, b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = &old_t - &q * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    (old_r.magnitude().clone(), old_s, old_t)
}

/// Compute modular inverse: a^(-1) mod m
/// Returns x with 0 <= x < m and (a * x) mod m == 1.
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Result<RsaBigInt> {
    let no_inverse = || RsaError::NoInverse {
        value: a.to_string(),
        modulus: m.to_string(),
    };

    // Nothing is congruent to 1 modulo 0 or 1
    if m <= &RsaBigInt::one() {
        return Err(no_inverse());
    }

    let (g, x, _) = extended_gcd(&(a % m), m);
    if !g.is_one() {
        return Err(no_inverse());
    }

    let m_signed = BigInt::from_biguint(Sign::Plus, m.clone());
    let (_, inverse) = x.mod_floor(&m_signed).into_parts();
    Ok(inverse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mod_pow() {
        // 3^5 mod 7 = 243 mod 7 = 5
        let base = from_u64(3);
        let exp = from_u64(5);
        let modulus = from_u64(7);
        let result = mod_pow(&base, &exp, &modulus);
        assert_eq!(result, from_u64(5));
    }

    #[test]
    fn test_mod_pow_edges() {
        assert_eq!(mod_pow(&from_u64(12), &from_u64(0), &from_u64(7)), from_u64(1));
        assert_eq!(mod_pow(&from_u64(12), &from_u64(9), &from_u64(1)), from_u64(0));
        assert_eq!(mod_pow(&from_u64(0), &from_u64(4), &from_u64(7)), from_u64(0));
        // Textbook RSA: 65^17 mod 3233
        assert_eq!(mod_pow(&from_u64(65), &from_u64(17), &from_u64(3233)), from_u64(2790));
    }

    #[test]
    fn test_mod_pow_matches_num_bigint() {
        let base = from_bytes(b"some reasonably long base value");
        let exp = from_bytes(b"exponent");
        let modulus = from_bytes(b"an odd-ish modulus!");
        assert_eq!(mod_pow(&base, &exp, &modulus), base.modpow(&exp, &modulus));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(&from_u64(48), &from_u64(18)), from_u64(6));
        assert_eq!(gcd(&from_u64(17), &from_u64(0)), from_u64(17));
        assert_eq!(gcd(&from_u64(0), &from_u64(17)), from_u64(17));
        assert_eq!(gcd(&from_u64(65537), &from_u64(3120)), from_u64(1));
    }

    #[test]
    fn test_lcm() {
        assert_eq!(lcm(&from_u64(4), &from_u64(6)), from_u64(12));
        assert_eq!(lcm(&from_u64(0), &from_u64(6)), from_u64(0));
    }

    #[test]
    fn test_extended_gcd() {
        let (g, x, y) = extended_gcd(&from_u64(240), &from_u64(46));
        assert_eq!(g, from_u64(2));
        assert_eq!(BigInt::from(240) * x + BigInt::from(46) * y, BigInt::from(2));

        let (g, x, y) = extended_gcd(&from_u64(9), &from_u64(0));
        assert_eq!(g, from_u64(9));
        assert_eq!(x, BigInt::one());
        assert_eq!(y, BigInt::zero());
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7, so inverse of 3 mod 7 is 5
        let a = from_u64(3);
        let m = from_u64(7);
        let inv = mod_inverse(&a, &m).unwrap();
        assert_eq!(inv, from_u64(5));

        // Verify: 3 * 5 = 15 ≡ 1 (mod 7)
        assert_eq!((a * inv) % m, from_u64(1));

        // Textbook RSA private exponent
        assert_eq!(mod_inverse(&from_u64(17), &from_u64(3120)).unwrap(), from_u64(2753));
    }

    #[test]
    fn test_mod_inverse_reduces_input() {
        // 10 ≡ 3 (mod 7)
        assert_eq!(mod_inverse(&from_u64(10), &from_u64(7)).unwrap(), from_u64(5));
    }

    #[test]
    fn test_mod_inverse_not_coprime() {
        let err = mod_inverse(&from_u64(6), &from_u64(9)).unwrap_err();
        assert!(matches!(err, RsaError::NoInverse { .. }));
        assert!(mod_inverse(&from_u64(0), &from_u64(9)).is_err());
        assert!(mod_inverse(&from_u64(5), &from_u64(1)).is_err());
        assert!(mod_inverse(&from_u64(5), &from_u64(0)).is_err());
    }

    proptest! {
        #[test]
        fn prop_bezout_identity(a in any::<u64>(), b in any::<u64>()) {
            let (g, x, y) = extended_gcd(&from_u64(a), &from_u64(b));
            prop_assert_eq!(&g, &gcd(&from_u64(a), &from_u64(b)));
            prop_assert_eq!(
                BigInt::from(a) * x + BigInt::from(b) * y,
                BigInt::from_biguint(Sign::Plus, g)
            );
        }

        #[test]
        fn prop_inverse_when_coprime(a in 1u64.., m in 2u64..) {
            let (a, m) = (from_u64(a), from_u64(m));
            match mod_inverse(&a, &m) {
                Ok(inv) => {
                    prop_assert!(inv < m);
                    prop_assert_eq!((&a * &inv) % &m, from_u64(1));
                }
                Err(err) => {
                    prop_assert!(!gcd(&a, &m).is_one());
                    prop_assert!(matches!(err, RsaError::NoInverse { .. }), "unexpected error variant");
                }
            }
        }
    }
}
