//! Filter sizing derived from a target capacity and false-positive rate.
//!
//! Every quantity here is computed once, at construction, from the pair
//! `(expected_members, false_positive_rate)`. Two filters built from the same
//! pair always agree on size and hashing, which is what makes a persisted raw
//! value reusable.

use crate::consts::{
    BITS_PER_DECADE, DEFAULT_EXPECTED_MEMBERS, DEFAULT_FALSE_POSITIVE_RATE, HASH_RATIO_DEN,
    HASH_RATIO_NUM, MAX_FILTER_BITS, SHA1_DIGEST_BITS, WINDOW_SAFETY_BITS,
};
use crate::errors::{BloomError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredParams", into = "StoredParams")]
pub struct FilterParams {
    expected_members: u64,
    false_positive_rate: f64,
    bits_per_member: f64,
    filter_size_bits: u64,
    hash_count: u32,
    bits_per_hash_value: u32,
    hashes_per_digest: u32,
    digest_invocations: u32,
}

/// On-disk shape: only the inputs, derived fields are recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredParams {
    expected_members: u64,
    false_positive_rate: f64,
}

impl TryFrom<StoredParams> for FilterParams {
    type Error = BloomError;

    fn try_from(stored: StoredParams) -> Result<Self> {
        FilterParams::new(stored.expected_members, stored.false_positive_rate)
    }
}

impl From<FilterParams> for StoredParams {
    fn from(p: FilterParams) -> Self {
        StoredParams {
            expected_members: p.expected_members,
            false_positive_rate: p.false_positive_rate,
        }
    }
}

impl Default for FilterParams {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FilterParams {
    pub fn new(expected_members: u64, false_positive_rate: f64) -> Result<Self> {
        if expected_members == 0 {
            return Err(BloomError::InvalidParameter(
                "expected_members must be greater than 0".to_string(),
            ));
        }
        if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
            return Err(BloomError::InvalidParameter(format!(
                "false_positive_rate must be in (0, 1), got {false_positive_rate}"
            )));
        }

        let size = (bits_per_member(false_positive_rate) * expected_members as f64).round();
        if size > MAX_FILTER_BITS as f64 {
            return Err(BloomError::InvalidParameter(format!(
                "filter would need {size} bits, at most {MAX_FILTER_BITS} supported"
            )));
        }
        Ok(Self::derive(expected_members, false_positive_rate))
    }

    /// Inputs must already be validated.
    fn derive(expected_members: u64, false_positive_rate: f64) -> Self {
        let bits_per_member = bits_per_member(false_positive_rate);
        let filter_size_bits = ((bits_per_member * expected_members as f64).round() as u64).max(1);

        // ceil(0.7 * m / n), kept in integers so the default tuning lands on 7 exactly.
        let num = HASH_RATIO_NUM as u128 * filter_size_bits as u128;
        let den = HASH_RATIO_DEN as u128 * expected_members as u128;
        let hash_count = num.div_ceil(den).max(1) as u32;

        let nibbles = (((filter_size_bits as f64).log2() + WINDOW_SAFETY_BITS) / 4.0).ceil();
        let bits_per_hash_value = (nibbles as u32).max(1) * 4;
        let hashes_per_digest = SHA1_DIGEST_BITS / bits_per_hash_value;
        let digest_invocations = hash_count.div_ceil(hashes_per_digest);

        tracing::debug!(
            n = expected_members,
            p = false_positive_rate,
            m = filter_size_bits,
            k = hash_count,
            window_bits = bits_per_hash_value,
            digests = digest_invocations,
            "derived filter parameters"
        );
        Self {
            expected_members,
            false_positive_rate,
            bits_per_member,
            filter_size_bits,
            hash_count,
            bits_per_hash_value,
            hashes_per_digest,
            digest_invocations,
        }
    }

    /// n = 3000, p = 0.01: m = 30000, k = 7.
    pub fn with_defaults() -> Self {
        Self::derive(DEFAULT_EXPECTED_MEMBERS, DEFAULT_FALSE_POSITIVE_RATE)
    }

    pub fn expected_members(&self) -> u64 { self.expected_members }
    pub fn false_positive_rate(&self) -> f64 { self.false_positive_rate }
    pub fn bits_per_member(&self) -> f64 { self.bits_per_member }
    pub fn filter_size_bits(&self) -> u64 { self.filter_size_bits }
    pub fn hash_count(&self) -> u32 { self.hash_count }
    pub fn bits_per_hash_value(&self) -> u32 { self.bits_per_hash_value }
    pub fn hashes_per_digest(&self) -> u32 { self.hashes_per_digest }
    pub fn digest_invocations(&self) -> u32 { self.digest_invocations }

    /// Hex digits per digest window.
    pub fn window_nibbles(&self) -> u32 { self.bits_per_hash_value / 4 }

    /// Probability that a never-added name tests positive with `set_bits` ones.
    pub fn estimated_fpp(&self, set_bits: u64) -> f64 {
        let fill = set_bits as f64 / self.filter_size_bits as f64;
        fill.powi(self.hash_count as i32)
    }

    /// Swamidass-Baldi estimate of distinct members from the number of set bits.
    pub fn estimated_members(&self, set_bits: u64) -> f64 {
        let m = self.filter_size_bits as f64;
        let x = set_bits as f64;
        if x >= m {
            return f64::INFINITY;
        }
        -(m / self.hash_count as f64) * (1.0 - x / m).ln()
    }
}

fn bits_per_member(false_positive_rate: f64) -> f64 {
    -false_positive_rate.log10() * BITS_PER_DECADE
}
