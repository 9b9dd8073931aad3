//! Decode errors.
//!
//! Every failure carries the position of the offending value. Failures that
//! do not stop the walk are gathered in an [`ErrorCollector`] owned by the
//! list being decoded and handed back to the caller as one [`MultiError`].

use std::fmt;

use thiserror::Error;

use crate::hcl::Pos;

/// What went wrong, independent of where.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A block expected to contain attributes is a bare scalar or list.
    #[error("{0} not an object")]
    NotAnObject(&'static str),

    /// A named sub-block is missing its label.
    #[error("{0} requires a name")]
    MissingLabel(&'static str),

    /// A `policy` block without both of its labels.
    #[error("policy requires a type and name")]
    MissingTypeAndName,

    /// A required attribute is absent or empty.
    #[error("{what} requires a {field} value")]
    MissingField {
        what: &'static str,
        field: &'static str,
    },

    /// An attribute holds a value outside its allowed set.
    #[error("{what} requires a valid {field} value [{allowed}]")]
    InvalidValue {
        what: &'static str,
        field: &'static str,
        allowed: String,
    },

    /// An attribute has the wrong shape for the field it maps to.
    #[error("{key} must be {expected}, found {found}")]
    AttributeType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// An error tagged with a source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("At {pos}: {kind}")]
pub struct PosError {
    pub pos: Pos,
    pub kind: ErrorKind,
}

impl PosError {
    pub fn new(pos: Pos, kind: ErrorKind) -> Self {
        Self { pos, kind }
    }
}

/// An ordered set of independent failures.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultiError {
    errors: Vec<PosError>,
}

impl MultiError {
    pub fn errors(&self) -> &[PosError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.len() == 1 {
            write!(f, "1 error occurred:")?;
        } else {
            write!(f, "{} errors occurred:", self.errors.len())?;
        }
        for err in &self.errors {
            write!(f, "\n\t* {}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for MultiError {}

/// Any failure returned by a decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Pos(#[from] PosError),

    #[error(transparent)]
    Multi(#[from] MultiError),
}

impl DecodeError {
    /// Shorthand for a single positioned error.
    pub fn at(pos: Pos, kind: ErrorKind) -> Self {
        DecodeError::Pos(PosError::new(pos, kind))
    }

    /// The individual failures, flattened.
    pub fn errors(&self) -> &[PosError] {
        match self {
            DecodeError::Pos(err) => std::slice::from_ref(err),
            DecodeError::Multi(multi) => multi.errors(),
        }
    }

    pub fn len(&self) -> usize {
        self.errors().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors().is_empty()
    }
}

/// Accumulates non-fatal failures while a list is walked.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<PosError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. Aggregates are flattened into their parts.
    pub fn push(&mut self, err: impl Into<DecodeError>) {
        match err.into() {
            DecodeError::Pos(err) => self.errors.push(err),
            DecodeError::Multi(multi) => self.errors.extend(multi.errors),
        }
    }

    /// `Ok(value)` when nothing was recorded, the combined failure otherwise.
    pub fn finish<T>(self, value: T) -> Result<T, DecodeError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(DecodeError::Multi(MultiError {
                errors: self.errors,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize) -> Pos {
        Pos {
            offset: 0,
            line,
            column: 1,
        }
    }

    #[test]
    fn test_empty_collector_is_ok() {
        let errors = ErrorCollector::new();
        assert_eq!(errors.finish(7), Ok(7));
    }

    #[test]
    fn test_collector_flattens_nested_aggregates() {
        let mut inner = ErrorCollector::new();
        inner.push(PosError::new(pos(1), ErrorKind::MissingLabel("header")));
        inner.push(PosError::new(pos(2), ErrorKind::MissingLabel("variable")));
        let inner = inner.finish(()).unwrap_err();

        let mut outer = ErrorCollector::new();
        outer.push(inner);
        outer.push(DecodeError::at(pos(3), ErrorKind::MissingTypeAndName));

        let err = outer.finish(()).unwrap_err();
        assert_eq!(err.len(), 3);
        assert_eq!(err.errors()[2].kind, ErrorKind::MissingTypeAndName);
    }

    #[test]
    fn test_display() {
        let err = PosError::new(
            pos(5),
            ErrorKind::InvalidValue {
                what: "statistic",
                field: "type",
                allowed: "string, integer".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "At 5:1: statistic requires a valid type value [string, integer]"
        );

        let mut errors = ErrorCollector::new();
        errors.push(err);
        errors.push(PosError::new(pos(6), ErrorKind::MissingField { what: "statistic", field: "ref" }));
        let multi = errors.finish(()).unwrap_err();
        assert_eq!(
            multi.to_string(),
            "2 errors occurred:\n\t* At 5:1: statistic requires a valid type value [string, integer]\
             \n\t* At 6:1: statistic requires a ref value"
        );
    }
}
