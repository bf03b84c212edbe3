#![forbid(unsafe_code)]

//! Layout configuration errors.

use std::fmt;

/// Errors raised while validating layout inputs.
///
/// Slot arithmetic never produces an error: an impossible slot is an
/// internal fault and panics instead.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A [`ClusterConfig`](crate::ClusterConfig) field is out of range.
    InvalidConfig { field: &'static str, value: f64 },
    /// A container width that is negative or not finite.
    InvalidWidth(f64),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { field, value } => {
                write!(f, "invalid cluster config: {field} = {value}")
            }
            Self::InvalidWidth(width) => write!(f, "invalid container width: {width}"),
        }
    }
}

impl std::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = LayoutError::InvalidConfig {
            field: "spacing",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "invalid cluster config: spacing = -1");
        assert_eq!(
            LayoutError::InvalidWidth(f64::INFINITY).to_string(),
            "invalid container width: inf"
        );
    }
}
