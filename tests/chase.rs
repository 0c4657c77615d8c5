//! Tests for the timed chase

use std::time::{Duration, Instant};

use memchase::{build_pool, chase, init, run, BackingArray, Config};

const MARGIN: Duration = Duration::from_millis(500);

fn populated(len: usize, seed: u64) -> BackingArray {
    let pool = build_pool(2).unwrap();
    let mut array = BackingArray::allocate(len).unwrap();
    init::populate(&pool, &mut array, seed);
    array
}

#[test]
fn test_runs_for_the_requested_duration() {
    let array = populated(1 << 18, 11);
    let duration = Duration::from_millis(200);

    for &workers in &[1, 2, 4] {
        let pool = build_pool(workers).unwrap();

        let start = Instant::now();
        chase::run(&pool, &array, duration, 12);
        let elapsed = start.elapsed();

        assert!(elapsed >= duration, "{} workers stopped after {:?}", workers, elapsed);
        assert!(
            elapsed < duration + MARGIN,
            "{} workers ran for {:?}",
            workers,
            elapsed
        );
    }
}

#[test]
fn test_chase_does_not_write() {
    let array = populated(1 << 16, 21);
    let before: Vec<u64> = array.to_vec();

    let pool = build_pool(4).unwrap();
    chase::run(&pool, &array, Duration::from_millis(100), 22);

    assert_eq!(before, &array[..]);
}

#[test]
fn test_default_pool_uses_every_hardware_thread() {
    let pool = build_pool(0).unwrap();
    let expected = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    assert_eq!(pool.current_num_threads(), expected);
}

#[test]
fn test_full_run_with_small_config() {
    let config = Config {
        array_len: 1 << 16,
        duration: Duration::from_millis(100),
        workers: 2,
        seed: 31,
    };

    let start = Instant::now();
    run(&config).unwrap();

    assert!(start.elapsed() >= config.duration);
}

#[test]
fn test_full_run_rejects_tiny_array() {
    let config = Config {
        array_len: 1,
        duration: Duration::from_millis(10),
        workers: 1,
        seed: 0,
    };

    assert!(run(&config).is_err());
}
