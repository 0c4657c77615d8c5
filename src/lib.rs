//! A cache-hostile memory benchmark for power and performance experiments.
//!
//! A large array is filled so that every slot holds the index of some other slot, then every core
//! follows that chain of indices for a fixed amount of wall-clock time. Each step is a dependent
//! load at an unpredictable address, so the prefetchers cannot help and the memory subsystem
//! stays saturated. Nothing is measured or reported; the point is the load.

use log::{debug, info};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use rayon::{ThreadPool, ThreadPoolBuilder};

pub mod array;
pub mod chase;
pub mod config;
pub mod error;
pub mod init;

pub use crate::array::BackingArray;
pub use crate::config::{Config, DURATION_DEFAULT, LARGE_ARRAY_SIZE};
pub use crate::error::{Error, Result};

/// Build the worker pool both phases run on. `workers == 0` gives one thread per hardware thread.
pub fn build_pool(workers: usize) -> Result<ThreadPool> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("mem-chase-{}", i))
        .build()?;

    Ok(pool)
}

/// Run the whole benchmark: allocate, populate, then chase for `config.duration`.
pub fn run(config: &Config) -> Result<()> {
    let pool = build_pool(config.workers)?;

    info!(
        "allocating {} slots ({} MiB)",
        config.array_len,
        config.array_len.saturating_mul(std::mem::size_of::<u64>()) >> 20
    );
    let mut array = BackingArray::allocate(config.array_len)?;

    debug!("seed {:#x}", config.seed);
    init::populate(&pool, &mut array, config.seed);
    info!("array initialized");

    info!(
        "chasing on {} workers for {:?}",
        pool.current_num_threads(),
        config.duration
    );
    chase::run(&pool, &array, config.duration, config.seed);
    info!("done");

    Ok(())
}

/// An independent generator for stream `index` of family `salt`, derived from `seed`.
pub(crate) fn stream_rng(seed: u64, salt: u64, index: usize) -> SmallRng {
    const GOLDEN: u64 = 0x9e37_79b9_7f4a_7c15;

    let mixed = seed
        .wrapping_add(salt.wrapping_mul(GOLDEN))
        .wrapping_add((index as u64).wrapping_add(1).wrapping_mul(GOLDEN.rotate_left(17)));

    SmallRng::seed_from_u64(mixed)
}
