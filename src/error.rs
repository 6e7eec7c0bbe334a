use thiserror::Error;

pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// The id doesn't fit in the tracker. The caller's id space is bigger than the tracker
    /// was configured for.
    #[error("transaction id {id} is out of range for capacity {capacity}")]
    OutOfRange { id: i64, capacity: usize },
}
