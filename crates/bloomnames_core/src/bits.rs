//! Fixed-length packed bit array backing the filter.
use crate::errors::{BloomError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitArray {
    len: u64,
    words: Vec<u64>,
    ones: u64,
}

impl BitArray {
    pub fn new(len: u64) -> Self {
        let words = len.div_ceil(64) as usize;
        Self { len, words: vec![0u64; words], ones: 0 }
    }

    /// Rebuilds from little-endian bytes (bit `i` of the integer is position `i`).
    /// Fails when a bit at or past `len` is set.
    pub fn from_le_bytes(len: u64, bytes: &[u8]) -> Result<Self> {
        let value_bits = le_bit_len(bytes);
        if value_bits > len {
            return Err(BloomError::ParameterMismatch { value_bits, filter_bits: len });
        }
        let mut out = Self::new(len);
        for (i, chunk) in bytes.chunks(8).enumerate() {
            if i >= out.words.len() {
                break; // only zero bytes remain
            }
            let mut buf = [0u8; 8];
            buf[..chunk.len()].copy_from_slice(chunk);
            out.words[i] = u64::from_le_bytes(buf);
        }
        out.ones = out.words.iter().map(|w| w.count_ones() as u64).sum();
        Ok(out)
    }

    #[inline]
    pub fn len(&self) -> u64 { self.len }

    #[inline]
    pub fn is_empty(&self) -> bool { self.ones == 0 }

    /// Number of set bits, tracked incrementally.
    #[inline]
    pub fn count_ones(&self) -> u64 { self.ones }

    /// Returns true when the bit was previously clear.
    #[inline]
    pub fn set(&mut self, idx: u64) -> bool {
        debug_assert!(idx < self.len, "bit {idx} out of range {}", self.len);
        let word = &mut self.words[(idx >> 6) as usize];
        let mask = 1u64 << (idx & 63);
        let fresh = *word & mask == 0;
        *word |= mask;
        self.ones += fresh as u64;
        fresh
    }

    #[inline]
    pub fn get(&self, idx: u64) -> bool {
        idx < self.len && self.words[(idx >> 6) as usize] & (1u64 << (idx & 63)) != 0
    }

    /// Little-endian bytes without high zero bytes; empty when no bit is set.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out: Vec<u8> = self.words.iter().flat_map(|w| w.to_le_bytes()).collect();
        while out.last() == Some(&0) {
            out.pop();
        }
        out
    }
}

/// Index of the highest set bit + 1 for a little-endian integer.
pub(crate) fn le_bit_len(bytes: &[u8]) -> u64 {
    match bytes.iter().rposition(|b| *b != 0) {
        Some(i) => i as u64 * 8 + (8 - bytes[i].leading_zeros() as u64),
        None => 0,
    }
}
