//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum TrajectError {
    /// An episode's observation and action streams do not line up.
    #[error("malformed episode: {n_obs} observations, {n_act} actions")]
    MalformedEpisode {
        /// Number of recorded observations.
        n_obs: usize,
        /// Number of recorded actions.
        n_act: usize,
    },

    /// The accumulated row sequences are of unequal length.
    #[error("row count mismatch: now_state {now}, next_state {next}, action {act}")]
    RowCountMismatch {
        /// Rows in `now_state`.
        now: usize,
        /// Rows in `next_state`.
        next: usize,
        /// Rows in `action`.
        act: usize,
    },

    /// A row has a different width than the rest of its array.
    #[error("row {row} has width {got}, expected {expected}")]
    RowWidthMismatch {
        /// Expected feature width.
        expected: usize,
        /// Width of the offending row.
        got: usize,
        /// Index of the offending row.
        row: usize,
    },

    /// Finalization was requested with no accumulated transitions.
    #[error("no transitions accumulated")]
    EmptyDataset,

    /// A rendered frame buffer does not match its declared dimensions.
    #[error("frame buffer of {len} bytes does not match {width}x{height} RGB")]
    BadFrameBuffer {
        /// Declared frame width.
        width: u32,
        /// Declared frame height.
        height: u32,
        /// Actual buffer length.
        len: usize,
    },
}
