//! Errors raised when operators are looked up or invoked.
//!
//! All of these are detected eagerly, at the moment an operator or method
//! is called. Nothing here is raised halfway through an iteration, and
//! failures inside caller-supplied functions are never wrapped.

use std::fmt;

/// The table an operator name was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// A sequence generator (builder-level entry point).
    Generator,
    /// A lazy sequence-to-sequence operator.
    Transform,
    /// An eager sequence-to-value operator.
    Reducer,
    /// Any chainable method, transform or reducer.
    Method,
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Generator => "generator",
            Self::Transform => "transform",
            Self::Reducer => "reducer",
            Self::Method => "method",
        };
        formatter.write_str(name)
    }
}

/// An error produced by operator lookup or argument handling.
///
/// # Examples
///
/// ```rust
/// use lazychain::error::{OperatorError, OperatorKind};
///
/// let error = OperatorError::UnknownOperator {
///     kind: OperatorKind::Method,
///     name: "shuffle".to_string(),
/// };
/// assert_eq!(error.to_string(), "no method named `shuffle` is registered");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperatorError {
    /// No operator of this name exists in the relevant table.
    #[error("no {kind} named `{name}` is registered")]
    UnknownOperator {
        /// Which table was searched.
        kind: OperatorKind,
        /// The requested name.
        name: String,
    },
    /// A required positional argument was not supplied.
    #[error("`{operator}` expects an argument at position {position}")]
    MissingArgument {
        /// The operator being invoked.
        operator: String,
        /// Zero-based argument position.
        position: usize,
    },
    /// A positional argument has the wrong type.
    #[error("`{operator}` expects {expected} at position {position}, found {found}")]
    ArgumentType {
        /// The operator being invoked.
        operator: String,
        /// Zero-based argument position.
        position: usize,
        /// A description of the accepted type.
        expected: &'static str,
        /// The type name of the supplied value.
        found: &'static str,
    },
    /// A value that cannot be iterated was used where a sequence is needed.
    #[error("`{operator}` expects an iterable, found {found}")]
    NotIterable {
        /// The operator or conversion that needed a sequence.
        operator: String,
        /// The type name of the supplied value.
        found: &'static str,
    },
}

impl OperatorError {
    /// Shorthand for [`OperatorError::UnknownOperator`].
    pub fn unknown(kind: OperatorKind, name: &str) -> Self {
        Self::UnknownOperator {
            kind,
            name: name.to_string(),
        }
    }
}
