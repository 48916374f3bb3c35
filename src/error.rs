use thiserror::Error;

/// Failures surfaced by [`crate::parse`].
///
/// Unrecognized lines are never errors; only the input source failing is.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read input at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
