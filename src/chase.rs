//! The timed pointer chase.
//!
//! Every thread of the pool starts at its own random slot and follows the mapping until the
//! shared deadline passes. The clock is read after every step; a step is a dependent load that
//! will usually miss in cache, so the check is noise next to it.

use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::Rng;
use rayon::ThreadPool;

use crate::array::BackingArray;

/// Salt separating the chase streams from the initialization streams.
const CHASE_STREAM: u64 = 0xc4a5e;

/// Chase `array` on every thread of `pool` for `duration`, measured from just before the workers
/// are started. Returns once all of them have passed the deadline.
///
/// The array is only read.
pub fn run(pool: &ThreadPool, array: &BackingArray, duration: Duration, seed: u64) {
    let len = array.len() as u64;
    let slots: &[u64] = array;

    let start = Instant::now();

    pool.broadcast(|ctx| {
        let mut rng = crate::stream_rng(seed, CHASE_STREAM, ctx.index());
        let index = rng.gen_range(0..len);

        black_box(chase(slots, index, start, duration));
    });
}

/// Follow the mapping from `index` until `duration` has passed since `start`. Returns the cursor
/// the worker stopped at.
#[inline(never)]
fn chase(slots: &[u64], mut index: u64, start: Instant, duration: Duration) -> u64 {
    loop {
        index = slots[index as usize];

        if start.elapsed() >= duration {
            return index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chase_follows_the_mapping() {
        // 0 -> 2 -> 1 -> 0 ...
        let slots = [2, 0, 1];

        // Already past the deadline: exactly one step is taken.
        let end = chase(&slots, 0, Instant::now(), Duration::from_secs(0));
        assert_eq!(end, 2);

        let end = chase(&slots, 2, Instant::now(), Duration::from_secs(0));
        assert_eq!(end, 1);
    }

    #[test]
    fn chase_waits_for_the_deadline() {
        let slots = [1, 0];
        let duration = Duration::from_millis(50);

        let start = Instant::now();
        let end = chase(&slots, 0, start, duration);

        assert!(start.elapsed() >= duration);
        assert!(end < 2);
    }
}
