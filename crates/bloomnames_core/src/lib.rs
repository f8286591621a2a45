pub mod consts;
pub mod errors;
pub mod params;
pub mod bits;
pub mod raw;
pub mod hashing;
pub mod filter;
pub mod shared;

pub use errors::{BloomError, Result};
pub use filter::BloomNames;
pub use params::FilterParams;
pub use raw::RawValue;
pub use shared::SharedBloomNames;
