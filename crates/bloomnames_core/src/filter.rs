//! Bloom filter over names (any text or byte strings).
//!
//! Sized for a population of `expected_members` names at a target
//! false-positive rate. Adding more names keeps working but the rate climbs
//! past the target. Members cannot be removed: bits are only ever set.
//!
//! ```
//! use bloomnames_core::BloomNames;
//!
//! let mut names = BloomNames::default();
//! names.add("bitworking");
//! assert!(names.contains("bitworking"));
//! assert!(!names.contains("fred"));
//!
//! // persist `raw` together with (3000, 0.01), restore later
//! let raw = names.raw_value();
//! let again = BloomNames::new(raw, 3000, 0.01).unwrap();
//! assert!(again.contains("bitworking"));
//! ```

use crate::bits::BitArray;
use crate::errors::Result;
use crate::hashing;
use crate::params::FilterParams;
use crate::raw::RawValue;

#[derive(Clone, Debug, PartialEq)]
pub struct BloomNames {
    params: FilterParams,
    bits: BitArray,
}

impl Default for BloomNames {
    fn default() -> Self {
        Self::with_params(FilterParams::with_defaults())
    }
}

impl BloomNames {
    /// Empty filter when `initial` is zero, otherwise resumes a filter whose
    /// raw value was produced with the same `(expected_members, false_positive_rate)`.
    /// A value from another parameterization is only caught when it is wider
    /// than this filter; any other mismatch silently breaks membership.
    pub fn new(initial: RawValue, expected_members: u64, false_positive_rate: f64) -> Result<Self> {
        let params = FilterParams::new(expected_members, false_positive_rate)?;
        Self::from_raw(params, &initial)
    }

    pub fn with_params(params: FilterParams) -> Self {
        let bits = BitArray::new(params.filter_size_bits());
        Self { params, bits }
    }

    pub fn from_raw(params: FilterParams, raw: &RawValue) -> Result<Self> {
        let bits = BitArray::from_le_bytes(params.filter_size_bits(), raw.as_le_bytes())?;
        if !raw.is_zero() {
            tracing::debug!(
                m = params.filter_size_bits(),
                set_bits = bits.count_ones(),
                "restored filter from raw value"
            );
        }
        Ok(Self { params, bits })
    }

    pub fn hash_positions(&self, name: impl AsRef<[u8]>) -> Vec<u64> {
        hashing::hash_positions(&self.params, name.as_ref())
    }

    pub fn add(&mut self, name: impl AsRef<[u8]>) {
        let before = self.bits.count_ones();
        for pos in self.hash_positions(name) {
            self.bits.set(pos);
        }
        let after = self.bits.count_ones();
        if after != before {
            self.warn_on_capacity(before, after);
        }
    }

    /// False means definitely never added; true means probably added.
    pub fn contains(&self, name: impl AsRef<[u8]>) -> bool {
        self.hash_positions(name).into_iter().all(|pos| self.bits.get(pos))
    }

    pub fn raw_value(&self) -> RawValue {
        RawValue::from_le_bytes(self.bits.to_le_bytes())
    }

    pub fn params(&self) -> &FilterParams { &self.params }
    pub fn filter_size_bits(&self) -> u64 { self.params.filter_size_bits() }
    pub fn hash_count(&self) -> u32 { self.params.hash_count() }
    pub fn set_bits(&self) -> u64 { self.bits.count_ones() }
    pub fn is_empty(&self) -> bool { self.bits.is_empty() }

    pub fn fill_ratio(&self) -> f64 {
        self.bits.count_ones() as f64 / self.bits.len() as f64
    }

    /// False-positive probability at the current fill.
    pub fn estimated_fpp(&self) -> f64 {
        self.params.estimated_fpp(self.bits.count_ones())
    }

    /// Approximate number of distinct names added so far.
    pub fn estimated_members(&self) -> f64 {
        self.params.estimated_members(self.bits.count_ones())
    }

    fn warn_on_capacity(&self, before: u64, after: u64) {
        let cap = self.params.expected_members() as f64;
        if self.params.estimated_members(before) < cap && self.params.estimated_members(after) >= cap {
            tracing::warn!(
                expected_members = self.params.expected_members(),
                set_bits = after,
                "filter reached its design capacity, false-positive rate will rise above target"
            );
        }
    }
}

impl<T: AsRef<[u8]>> Extend<T> for BloomNames {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for name in iter {
            self.add(name);
        }
    }
}
