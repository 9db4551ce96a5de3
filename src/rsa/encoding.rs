// Message Encoding
// Bytes <-> message blocks bounded by a modulus, plus hex and single-integer helpers
//
// A chunk c of k bytes becomes the integer 2^(8k) + c (big-endian). The marker
// bit keeps leading zero bytes and makes the value smaller than 2^(8k+1), which
// is at most 2^(bits(n)-1) <= n when k = (bits(n) - 2) / 8.

use num_traits::One;

use super::bigint::{from_bytes, to_bytes, RsaBigInt};
use super::error::{Result, RsaError};

/// Number of data bytes carried by each block under modulus `n`
pub fn block_capacity(n: &RsaBigInt) -> Result<usize> {
    let bits = n.bits();
    if bits < 10 {
        return Err(RsaError::MessageTooLarge { modulus_bits: bits });
    }
    Ok(((bits - 2) / 8) as usize)
}

fn marker(len: usize) -> RsaBigInt {
    RsaBigInt::one() << (8 * len)
}

/// Encode one chunk of at most `block_capacity` bytes
pub fn encode_block(chunk: &[u8]) -> RsaBigInt {
    marker(chunk.len()) | from_bytes(chunk)
}

/// Decode one block produced by `encode_block`
pub fn decode_block(block: &RsaBigInt) -> Result<Vec<u8>> {
    let bits = block.bits();
    if bits == 0 || (bits - 1) % 8 != 0 {
        return Err(RsaError::Decoding(format!(
            "block of {} bits has no valid length marker",
            bits
        )));
    }

    let len = ((bits - 1) / 8) as usize;
    let data = block - marker(len);
    let bytes = to_bytes(&data);

    // to_bytes drops leading zeros (and renders zero as [0])
    let significant = bytes.iter().skip_while(|&&b| b == 0).count();
    let mut out = vec![0u8; len - significant];
    out.extend_from_slice(&bytes[bytes.len() - significant..]);
    Ok(out)
}

/// Split bytes into ordered blocks, each strictly smaller than `n`
pub fn encode_blocks(bytes: &[u8], n: &RsaBigInt) -> Result<Vec<RsaBigInt>> {
    let capacity = block_capacity(n)?;
    Ok(bytes.chunks(capacity).map(encode_block).collect())
}

/// Reassemble bytes from ordered blocks encoded for modulus `n`
pub fn decode_blocks(blocks: &[RsaBigInt], n: &RsaBigInt) -> Result<Vec<u8>> {
    let capacity = block_capacity(n)?;
    let mut bytes = Vec::with_capacity(blocks.len() * capacity);
    for block in blocks {
        let chunk = decode_block(block)?;
        if chunk.len() > capacity {
            return Err(RsaError::Decoding(format!(
                "block carries {} bytes, modulus allows {}",
                chunk.len(),
                capacity
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Convert a string to a single integer (big-endian UTF-8 bytes)
pub fn string_to_int(text: &str) -> RsaBigInt {
    from_bytes(text.as_bytes())
}

/// Convert an integer back to a string (inverse of `string_to_int`)
pub fn int_to_string(number: &RsaBigInt) -> Result<String> {
    let bytes = to_bytes(number);
    let bytes: Vec<u8> = bytes.into_iter().skip_while(|&b| b == 0).collect();
    Ok(String::from_utf8(bytes)?)
}

/// Big-endian lowercase hex
pub fn to_hex(number: &RsaBigInt) -> String {
    hex::encode(to_bytes(number))
}

/// Parse big-endian hex produced by `to_hex`
pub fn from_hex(text: &str) -> Result<RsaBigInt> {
    Ok(from_bytes(&hex::decode(text)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use proptest::prelude::*;

    #[test]
    fn test_block_capacity() {
        assert_eq!(block_capacity(&from_u64(3233)).unwrap(), 1);
        assert_eq!(block_capacity(&(RsaBigInt::one() << 511u32)).unwrap(), 63);
        assert!(matches!(
            block_capacity(&from_u64(511)),
            Err(RsaError::MessageTooLarge { modulus_bits: 9 })
        ));
    }

    #[test]
    fn test_encode_block_keeps_leading_zeros() {
        let block = encode_block(&[0, 0, 7]);
        assert_eq!(block, from_u64(0x0100_0007));
        assert_eq!(decode_block(&block).unwrap(), vec![0, 0, 7]);
    }

    #[test]
    fn test_blocks_fit_modulus() {
        // Smallest modulus with the given capacity is the worst case
        let n = from_u64(3233);
        for block in encode_blocks(&[0xff; 5], &n).unwrap() {
            assert!(block < n);
        }
        let n = RsaBigInt::one() << 129u32;
        for block in encode_blocks(&[0xff; 100], &n).unwrap() {
            assert!(block < n);
        }
    }

    #[test]
    fn test_encode_blocks_order_and_count() {
        let n = from_u64(3233);
        let blocks = encode_blocks(b"abc", &n).unwrap();
        assert_eq!(blocks, vec![from_u64(0x161), from_u64(0x162), from_u64(0x163)]);
        assert_eq!(decode_blocks(&blocks, &n).unwrap(), b"abc".to_vec());
        assert!(encode_blocks(b"", &n).unwrap().is_empty());
    }

    #[test]
    fn test_decode_block_rejects_bad_marker() {
        assert!(matches!(decode_block(&from_u64(0)), Err(RsaError::Decoding(_))));
        assert!(matches!(decode_block(&from_u64(0x61)), Err(RsaError::Decoding(_))));
    }

    #[test]
    fn test_decode_blocks_rejects_oversized_block() {
        let n = from_u64(3233);
        let block = encode_block(b"ab");
        assert!(matches!(decode_blocks(&[block], &n), Err(RsaError::Decoding(_))));
    }

    #[test]
    fn test_string_int_conversion() {
        let n = string_to_int("Hi");
        assert_eq!(n, from_u64(0x4869));
        assert_eq!(int_to_string(&n).unwrap(), "Hi");
        assert_eq!(int_to_string(&from_u64(0)).unwrap(), "");
        assert!(int_to_string(&from_u64(0xff)).is_err());
    }

    #[test]
    fn test_hex() {
        assert_eq!(to_hex(&from_u64(2790)), "0ae6");
        assert_eq!(from_hex("0ae6").unwrap(), from_u64(2790));
        assert!(matches!(from_hex("xyz"), Err(RsaError::Decoding(_))));
    }

    proptest! {
        #[test]
        fn prop_blocks_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..200), shift in 10u32..300) {
            let n = (RsaBigInt::one() << (shift - 1)) + 1u8;
            let blocks = encode_blocks(&bytes, &n).unwrap();
            for block in &blocks {
                prop_assert!(block < &n);
            }
            prop_assert_eq!(decode_blocks(&blocks, &n).unwrap(), bytes);
        }
    }
}
