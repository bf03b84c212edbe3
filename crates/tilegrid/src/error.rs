#![forbid(unsafe_code)]

//! Unified error type.
//!
//! Each subsystem keeps its own typed error so callers can match on what
//! matters; [`Error`] wraps them for `?` at the host boundary.

use std::fmt;

use tilegrid_layout::LayoutError;
use tilegrid_reorder::ReorderConfigError;

/// Top-level error type for tilegrid hosts.
#[derive(Debug)]
pub enum Error {
    /// Cluster configuration or container width rejected.
    Layout(LayoutError),
    /// Reorder interaction settings rejected.
    Reorder(ReorderConfigError),
    /// Settings document could not be parsed.
    Parse(serde_json::Error),
}

/// Standard result type for tilegrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Short label for logs and metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Layout(_) => "layout",
            Self::Reorder(_) => "reorder",
            Self::Parse(_) => "parse",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "{err}"),
            Self::Reorder(err) => write!(f, "{err}"),
            Self::Parse(err) => write!(f, "settings: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Reorder(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<ReorderConfigError> for Error {
    fn from(err: ReorderConfigError) -> Self {
        Self::Reorder(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn error_type_labels() {
        assert_eq!(Error::from(LayoutError::InvalidWidth(-1.0)).error_type(), "layout");
        assert_eq!(
            Error::from(ReorderConfigError::ZeroPressDuration).error_type(),
            "reorder"
        );
        let parse = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated");
        assert_eq!(Error::from(parse).error_type(), "parse");
    }

    #[test]
    fn display_delegates_and_source_is_set() {
        let err = Error::from(ReorderConfigError::InvalidAlpha(1.5));
        assert_eq!(err.to_string(), "preview alpha out of range: 1.5");
        assert!(err.source().is_some());
    }

    #[test]
    fn question_mark_converts() {
        fn check() -> Result<()> {
            Err(LayoutError::InvalidWidth(f64::NAN))?;
            Ok(())
        }
        assert!(matches!(check(), Err(Error::Layout(LayoutError::InvalidWidth(_)))));
    }
}
