//! On-disk state for the CLI: the raw filter value plus the parameters that
//! produced it. The core crate only hands out the raw value; remembering
//! `(expected_members, false_positive_rate)` is our job.
use anyhow::{Context, Result};
use bloomnames_core::{BloomNames, FilterParams, RawValue};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterState {
    pub expected_members: u64,
    pub false_positive_rate: f64,
    pub filter: RawValue,
}

impl FilterState {
    pub fn from_filter(bloom: &BloomNames) -> Self {
        let p = bloom.params();
        Self {
            expected_members: p.expected_members(),
            false_positive_rate: p.false_positive_rate(),
            filter: bloom.raw_value(),
        }
    }

    pub fn into_filter(self) -> Result<BloomNames> {
        let params = FilterParams::new(self.expected_members, self.false_positive_rate)?;
        Ok(BloomNames::from_raw(params, &self.filter)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)
            .with_context(|| format!("reading state {}", path.display()))?;
        let st: FilterState = serde_json::from_str(&s)
            .with_context(|| format!("parsing state {}", path.display()))?;
        Ok(st)
    }

    /// Write to a temp file in the same directory, then rename over `path`.
    pub fn save_atomic(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        let mut tmp = tempfile::Builder::new().prefix(".bloomnames_").tempfile_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)
            .with_context(|| format!("publishing state {}", path.display()))?;
        Ok(())
    }
}
