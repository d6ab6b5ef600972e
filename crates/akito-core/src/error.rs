//! Error type for batch fetching

use crate::range::InvalidRange;

/// Error from a batch fetch.
///
/// Generic over the fetch capability's own error type `E`, which is carried
/// untouched as the source of [`BatchError::Fetch`].
#[derive(Debug)]
pub enum BatchError<E> {
    /// Range rejected before any task was scheduled
    InvalidRange(InvalidRange),
    /// The first failure recorded for the batch
    Fetch { index: usize, source: E },
    /// A slot was left empty without any recorded failure
    Unfilled { index: usize },
}

impl<E: std::fmt::Display> std::fmt::Display for BatchError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange(e) => write!(f, "{e}"),
            Self::Fetch { index, source } => write!(f, "item {index}: {source}"),
            Self::Unfilled { index } => write!(f, "item {index}: no result produced"),
        }
    }
}

impl<E> std::error::Error for BatchError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRange(e) => Some(e),
            Self::Fetch { source, .. } => Some(source),
            Self::Unfilled { .. } => None,
        }
    }
}

impl<E> From<InvalidRange> for BatchError<E> {
    fn from(e: InvalidRange) -> Self {
        Self::InvalidRange(e)
    }
}

impl<E> BatchError<E> {
    /// Index of the failing item, if the error came from a task.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::InvalidRange(_) => None,
            Self::Fetch { index, .. } | Self::Unfilled { index } => Some(*index),
        }
    }

    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Self::InvalidRange(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    fn fetch_err(index: usize) -> BatchError<io::Error> {
        BatchError::Fetch {
            index,
            source: io::Error::new(io::ErrorKind::ConnectionReset, "reset"),
        }
    }

    #[test]
    fn display_fetch() {
        assert_eq!(fetch_err(3).to_string(), "item 3: reset");
    }

    #[test]
    fn display_invalid_range() {
        let err: BatchError<io::Error> = InvalidRange {
            start: 4,
            end: 2,
            len: 10,
        }
        .into();
        assert!(err.is_invalid_range());
        assert!(err.to_string().contains("[4, 2]"));
        assert_eq!(err.index(), None);
    }

    #[test]
    fn index_of_task_errors() {
        assert_eq!(fetch_err(7).index(), Some(7));
        assert_eq!(BatchError::<io::Error>::Unfilled { index: 2 }.index(), Some(2));
    }

    #[test]
    fn source_chain() {
        let err = fetch_err(1);
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "reset");
        assert!(BatchError::<io::Error>::Unfilled { index: 0 }
            .source()
            .is_none());
    }
}
