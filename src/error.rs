use thiserror::Error;

/// Everything that can stop a benchmark run before the chase starts.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad command line. Carries clap's message, which already includes usage.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    /// A self-avoiding mapping needs at least two cells.
    #[error("array of {len} entries is too small, need at least 2")]
    ArrayTooSmall { len: usize },

    #[error("unable to map {bytes} bytes for the backing array: {errno}")]
    Allocation { bytes: usize, errno: errno::Errno },

    #[error("unable to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
