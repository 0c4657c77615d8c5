//! What a run looks like, and how the command line turns into one.

use std::ffi::OsString;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::clap_app;

use crate::error::Result;

/// Default number of `u64` slots in the backing array (512 MiB).
pub const LARGE_ARRAY_SIZE: usize = 1 << 26;

/// Default chase duration in seconds.
pub const DURATION_DEFAULT: f64 = 30.0;

/// Everything the core needs for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Number of slots in the backing array.
    pub array_len: usize,

    /// How long the chase runs.
    pub duration: Duration,

    /// Size of the worker pool. 0 means one worker per hardware thread.
    pub workers: usize,

    /// Base seed every random stream is derived from.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            array_len: LARGE_ARRAY_SIZE,
            duration: Duration::from_secs_f64(DURATION_DEFAULT),
            workers: 0,
            seed: time_seed(),
        }
    }
}

impl Config {
    /// Build a config from command-line arguments (including the program name).
    ///
    /// Accepts at most one positional argument, the duration in seconds. Anything else is an
    /// `Error::Usage`.
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = clap_app! { mem_chase =>
            (about: "Keeps every core busy chasing pointers through a large array in random order,
                     so that nearly every access misses in cache")
            (@arg DURATION: {is_duration} "How long to run, in seconds (default 30)")
        }
        .get_matches_from_safe(args)?;

        let mut config = Config::default();

        if let Some(arg) = matches.value_of("DURATION") {
            // Already checked by the validator.
            config.duration = parse_duration(arg).map_err(|msg| {
                clap::Error::with_description(&msg, clap::ErrorKind::InvalidValue)
            })?;
        }

        Ok(config)
    }
}

/// Parse a duration in seconds. It has to be a finite number strictly greater than zero;
/// negative values are refused rather than treated as zero.
pub fn parse_duration(arg: &str) -> std::result::Result<Duration, String> {
    let secs = arg
        .trim()
        .parse::<f64>()
        .map_err(|_| "Not a valid number of seconds".to_owned())?;

    if !(secs > 0.0) {
        return Err("Duration must be greater than zero".to_owned());
    }

    Duration::try_from_secs_f64(secs).map_err(|_| "Duration is too large".to_owned())
}

fn is_duration(arg: String) -> std::result::Result<(), String> {
    parse_duration(&arg).map(|_| ())
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_positive_numbers() {
        assert_eq!(parse_duration("2.5"), Ok(Duration::from_millis(2500)));
        assert_eq!(parse_duration("1"), Ok(Duration::from_secs(1)));
    }

    #[test]
    fn parse_rejects_everything_else() {
        for bad in &["0", "0.0", "-0", "-1", "-2.5", "NaN", "inf", "abc", "", "1e300"] {
            assert!(parse_duration(bad).is_err(), "{} was accepted", bad);
        }
    }
}
