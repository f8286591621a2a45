// crates/bloomnames_core/src/consts.rs

pub const DEFAULT_EXPECTED_MEMBERS: u64 = 3000;
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;

/// Array bits spent per decade of false-positive rate, per member.
pub const BITS_PER_DECADE: f64 = 5.0;

/// `k = ceil(HASH_RATIO_NUM * m / (HASH_RATIO_DEN * n))`, i.e. 0.7 * m / n.
pub const HASH_RATIO_NUM: u64 = 7;
pub const HASH_RATIO_DEN: u64 = 10;

/// Extra bits carried by each digest window above log2(m).
pub const WINDOW_SAFETY_BITS: f64 = 5.0;

pub const SHA1_DIGEST_BITS: u32 = 160;
pub const SHA1_DIGEST_BYTES: usize = 20;
pub const SHA1_DIGEST_NIBBLES: u32 = 40;

pub const MAX_FILTER_BITS: u64 = u32::MAX as u64;

const _: () = { assert!(SHA1_DIGEST_BYTES * 8 == SHA1_DIGEST_BITS as usize); };
