use anyhow::{bail, Result};
use bloomnames_core::consts::{DEFAULT_EXPECTED_MEMBERS, DEFAULT_FALSE_POSITIVE_RATE};
use bloomnames_core::{BloomNames, FilterParams};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

mod state;

use state::FilterState;

#[derive(Parser)]
#[command(name = "bloomnames", about = "Bloom filter for tracking names")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Args, Clone, Copy)]
struct Tuning {
    /// Design capacity of the filter
    #[arg(long, default_value_t = DEFAULT_EXPECTED_MEMBERS)]
    members: u64,
    /// Target false-positive rate at capacity
    #[arg(long = "fp-rate", default_value_t = DEFAULT_FALSE_POSITIVE_RATE)]
    fp_rate: f64,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create an empty filter
    Init {
        #[arg(long)]
        state: PathBuf,
        #[command(flatten)]
        tuning: Tuning,
        /// Overwrite an existing state file
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    Add {
        #[arg(long)]
        state: PathBuf,
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print `maybe` or `no` for each name
    Check {
        #[arg(long)]
        state: PathBuf,
        #[arg(required = true)]
        names: Vec<String>,
    },

    Info {
        #[arg(long)]
        state: PathBuf,
    },

    /// Print the raw filter value in hex
    Raw {
        #[arg(long)]
        state: PathBuf,
    },

    /// Print the bit positions a name maps to
    Positions {
        #[command(flatten)]
        tuning: Tuning,
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn open_filter(state: &Path) -> Result<BloomNames> {
    FilterState::load(state)?.into_filter()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Init { state, tuning, force } => {
            if state.exists() && !force {
                bail!("{} already exists (use --force to replace it)", state.display());
            }
            let params = FilterParams::new(tuning.members, tuning.fp_rate)?;
            let bloom = BloomNames::with_params(params);
            FilterState::from_filter(&bloom).save_atomic(&state)?;
            println!(
                "init: {} (m={} k={})",
                state.display(),
                bloom.filter_size_bits(),
                bloom.hash_count()
            );
        }
        Cmd::Add { state, names } => {
            let mut bloom = open_filter(&state)?;
            bloom.extend(names.iter());
            FilterState::from_filter(&bloom).save_atomic(&state)?;
            tracing::info!(added = names.len(), set_bits = bloom.set_bits(), "saved filter");
            println!("added: {}", names.len());
        }
        Cmd::Check { state, names } => {
            let bloom = open_filter(&state)?;
            for name in &names {
                let verdict = if bloom.contains(name) { "maybe" } else { "no" };
                println!("{name}\t{verdict}");
            }
        }
        Cmd::Info { state } => {
            let bloom = open_filter(&state)?;
            let p = bloom.params();
            println!("expected_members:    {}", p.expected_members());
            println!("false_positive_rate: {}", p.false_positive_rate());
            println!("bits_per_member:     {:.2}", p.bits_per_member());
            println!("filter_size_bits:    {}", p.filter_size_bits());
            println!("hash_count:          {}", p.hash_count());
            println!("bits_per_hash_value: {}", p.bits_per_hash_value());
            println!("digest_invocations:  {}", p.digest_invocations());
            println!("set_bits:            {}", bloom.set_bits());
            println!("fill_ratio:          {:.4}", bloom.fill_ratio());
            println!("estimated_members:   {:.1}", bloom.estimated_members());
            println!("estimated_fpp:       {:.6}", bloom.estimated_fpp());
        }
        Cmd::Raw { state } => {
            let bloom = open_filter(&state)?;
            println!("{:#x}", bloom.raw_value());
        }
        Cmd::Positions { tuning, names } => {
            let params = FilterParams::new(tuning.members, tuning.fp_rate)?;
            let bloom = BloomNames::with_params(params);
            for name in &names {
                let pos: Vec<String> =
                    bloom.hash_positions(name).iter().map(u64::to_string).collect();
                println!("{name}\t{}", pos.join(","));
            }
        }
    }
    Ok(())
}
