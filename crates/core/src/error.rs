use crate::hex::Scalar;
use derive_more::Display;
use strum::Display as StrumDisplay;
use validator::ValidationErrors;

/// Result type used by every fallible kernel operation
pub type Result<T> = std::result::Result<T, HexError>;

/// Everything that can go wrong when calling into the kernel. Every variant
/// represents a broken caller contract; the kernel has no I/O and therefore no
/// transient failures, so none of these are worth retrying.
///
/// Missing graph edges and unreachable goals are **not** errors. Those are
/// reported as data (see [crate::GraphMatrix::get_movement_cost] and the
/// search methods).
#[derive(Clone, Debug, Display, PartialEq)]
pub enum HexError {
    /// A coordinate component, scalar argument or container had the wrong
    /// type, or a fixed-arity tuple had the wrong length
    #[display(fmt = "type error: {}", _0)]
    Type(String),

    /// An object input was missing a named coordinate or cost field
    #[display(fmt = "attribute error: {}", _0)]
    Attribute(String),

    /// A cube coordinate triple is off the plane `q + r + s = 0`
    #[display(
        fmt = "constraint violation: ({}, {}, {}) is not on the plane q + r + s = 0",
        q,
        r,
        s
    )]
    Constraint { q: Scalar, r: Scalar, s: Scalar },

    /// An out-of-domain configuration value
    #[display(fmt = "value error: {}", _0)]
    Value(String),
}

/// The class of a [HexError], without its payload
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Type,
    Attribute,
    Constraint,
    Value,
}

impl HexError {
    pub(crate) fn type_error(message: impl Into<String>) -> Self {
        Self::Type(message.into())
    }

    pub(crate) fn attribute(message: impl Into<String>) -> Self {
        Self::Attribute(message.into())
    }

    pub(crate) fn value(message: impl Into<String>) -> Self {
        Self::Value(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Type(_) => ErrorKind::Type,
            Self::Attribute(_) => ErrorKind::Attribute,
            Self::Constraint { .. } => ErrorKind::Constraint,
            Self::Value(_) => ErrorKind::Value,
        }
    }

    /// A constraint violation is a specialized value error, so this is true
    /// for both [ErrorKind::Value] and [ErrorKind::Constraint].
    pub fn is_value_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Value | ErrorKind::Constraint)
    }
}

impl std::error::Error for HexError {}

impl From<ValidationErrors> for HexError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Value(format!("invalid configuration: {}", errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let err = HexError::Constraint {
            q: 1.into(),
            r: 1.into(),
            s: 1.into(),
        };
        assert_eq!(err.kind(), ErrorKind::Constraint);
        assert!(err.is_value_error());
        assert_eq!(
            err.to_string(),
            "constraint violation: (1, 1, 1) is not on the plane q + r + s = 0"
        );

        assert!(HexError::value("bad arity").is_value_error());
        assert!(!HexError::type_error("not a number").is_value_error());
        assert!(!HexError::attribute("missing q").is_value_error());
        assert_eq!(ErrorKind::Attribute.to_string(), "attribute");
    }
}
