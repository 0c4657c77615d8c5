//! Fill the backing array with a self-avoiding random mapping: every slot points at some other
//! slot of the same array.

use rand::Rng;
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::array::BackingArray;

/// Number of slots handled by one parallel task. Each chunk gets its own generator, so the
/// contents depend only on the seed and not on how the chunks land on threads.
pub const CHUNK_LEN: usize = 1 << 16;

/// Rejected draws tolerated for one slot before falling back to its successor.
pub const MAX_DRAWS: usize = 64;

/// Salt separating the initialization streams from the chase streams.
const INIT_STREAM: u64 = 0x1a17;

/// Pick the value to store at `index` in an array of `len` slots.
///
/// Draws from `draw` until a candidate differs from `index`. After `MAX_DRAWS` rejections the
/// slot gets `(index + 1) % len`. `len` must be at least 2 and `draw` must stay below `len`.
pub fn pick_target<F>(index: u64, len: u64, mut draw: F) -> u64
where
    F: FnMut() -> u64,
{
    for _ in 0..MAX_DRAWS {
        let candidate = draw();
        if candidate != index {
            return candidate;
        }
    }

    (index + 1) % len
}

/// Populate `array` on `pool`.
///
/// On return `array[i] != i` and `array[i] < array.len()` for every `i`.
pub fn populate(pool: &ThreadPool, array: &mut BackingArray, seed: u64) {
    let len = array.len() as u64;

    pool.install(|| {
        array
            .par_chunks_mut(CHUNK_LEN)
            .enumerate()
            .for_each(|(chunk, slots)| {
                let mut rng = crate::stream_rng(seed, INIT_STREAM, chunk);
                let base = (chunk * CHUNK_LEN) as u64;

                for (offset, slot) in slots.iter_mut().enumerate() {
                    *slot = pick_target(base + offset as u64, len, || rng.gen_range(0..len));
                }
            });
    });
}
