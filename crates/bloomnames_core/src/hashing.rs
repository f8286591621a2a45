//! Bit positions for a name, cut from SHA-1 digests.
//!
//! The digest is read as its 40-digit lowercase hex rendering and chopped into
//! windows of `bits_per_hash_value / 4` digits. Window `i` starts at digit
//! `i * width`; its value modulo `filter_size_bits` is one bit position. With
//! the default tuning that is seven 5-digit (20-bit) windows, 35 of the 40
//! digits, reduced modulo 30000.
//!
//! When one digest cannot supply `hash_count` windows, the next digest is
//! SHA-1 over the previous digest followed by the name.

use crate::consts::{SHA1_DIGEST_BYTES, SHA1_DIGEST_NIBBLES};
use crate::params::FilterParams;
use sha1::{Digest, Sha1};

type Sha1Bytes = [u8; SHA1_DIGEST_BYTES];

#[inline]
fn first_digest(name: &[u8]) -> Sha1Bytes {
    let mut out = [0u8; SHA1_DIGEST_BYTES];
    out.copy_from_slice(&Sha1::digest(name));
    out
}

#[inline]
fn next_digest(prev: &Sha1Bytes, name: &[u8]) -> Sha1Bytes {
    let mut h = Sha1::new();
    h.update(prev);
    h.update(name);
    let mut out = [0u8; SHA1_DIGEST_BYTES];
    out.copy_from_slice(&h.finalize());
    out
}

/// Same value as parsing hex digits `[start, start + len)` of the digest.
#[inline]
fn window(digest: &Sha1Bytes, start: usize, len: usize) -> u64 {
    debug_assert!(start + len <= SHA1_DIGEST_NIBBLES as usize);
    (start..start + len).fold(0u64, |acc, d| {
        let byte = digest[d / 2];
        let nibble = if d % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        (acc << 4) | nibble as u64
    })
}

/// Exactly `params.hash_count()` positions, each in `[0, filter_size_bits)`.
pub fn hash_positions(params: &FilterParams, name: &[u8]) -> Vec<u64> {
    let k = params.hash_count() as usize;
    let per_digest = params.hashes_per_digest() as usize;
    let width = params.window_nibbles() as usize;
    let m = params.filter_size_bits();

    let mut out = Vec::with_capacity(k);
    let mut digest = first_digest(name);
    loop {
        let take = per_digest.min(k - out.len());
        out.extend((0..take).map(|i| window(&digest, i * width, width) % m));
        if out.len() == k {
            return out;
        }
        digest = next_digest(&digest, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_windows(name: &str, k: usize, width: usize, m: u64) -> Vec<u64> {
        let digits = hex::encode(Sha1::digest(name.as_bytes()));
        (0..k)
            .map(|i| u64::from_str_radix(&digits[i * width..i * width + width], 16).unwrap() % m)
            .collect()
    }

    #[test]
    fn known_digest_windows() {
        // sha1("abc") = a9993e364706816aba3e25717850c26c9cd0d89d
        let p = FilterParams::with_defaults();
        assert_eq!(
            hash_positions(&p, b"abc"),
            vec![4675, 1399, 26646, 13038, 3367, 4962, 24877]
        );
    }

    #[test]
    fn matches_hex_parsing() {
        let p = FilterParams::with_defaults();
        for name in ["", "bitworking", "austin", "fred", "ünïcödé", "a much longer name than usual"] {
            assert_eq!(hash_positions(&p, name.as_bytes()), hex_windows(name, 7, 5, 30_000));
        }
    }

    #[test]
    fn empty_name_is_hashed() {
        let p = FilterParams::with_defaults();
        assert_eq!(
            hash_positions(&p, b""),
            vec![23850, 17630, 19472, 24853, 6169, 22280, 22637]
        );
    }

    #[test]
    fn chained_digests_cover_large_hash_count() {
        let p = FilterParams::new(1000, 1e-6).unwrap();
        assert_eq!(p.digest_invocations(), 3);
        let pos = hash_positions(&p, b"bitworking");
        assert_eq!(pos.len(), 21);
        assert!(pos.iter().all(|&x| x < p.filter_size_bits()));
        // first digest contributes exactly like the single-digest case
        assert_eq!(pos[..8], hex_windows("bitworking", 8, 5, 30_000)[..]);
        assert_eq!(pos, hash_positions(&p, b"bitworking"));
    }

    #[test]
    fn positions_stay_in_range() {
        for (n, rate) in [(10, 0.1), (3000, 0.01), (77, 0.3), (1, 0.5)] {
            let p = FilterParams::new(n, rate).unwrap();
            for i in 0..200 {
                let name = format!("name-{i}");
                let pos = hash_positions(&p, name.as_bytes());
                assert_eq!(pos.len(), p.hash_count() as usize);
                assert!(pos.iter().all(|&x| x < p.filter_size_bits()));
            }
        }
    }
}
