//! Errors raised while reading WuxiaWorld.co pages

use akito_core::HttpError;

#[derive(Debug)]
pub enum SourceError {
    /// Network or HTTP status failure
    Request(HttpError),
    /// A page lacked an element the parser depends on
    MissingElement { what: &'static str },
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request(e) => write!(f, "error performing request: {e}"),
            Self::MissingElement { what } => write!(f, "missing expected element: {what}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(e) => Some(e),
            Self::MissingElement { .. } => None,
        }
    }
}

impl From<HttpError> for SourceError {
    fn from(e: HttpError) -> Self {
        Self::Request(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_element() {
        let err = SourceError::MissingElement {
            what: "chapter title",
        };
        assert_eq!(err.to_string(), "missing expected element: chapter title");
    }

    #[test]
    fn display_request() {
        let err: SourceError = HttpError::Http {
            status: Some(503),
            message: "unavailable".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "error performing request: HTTP 503: unavailable"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
