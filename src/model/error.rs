//! Errors raised while resolving arguments and building effective statements.
//!
//! Construction-time failures ([`NamespaceConflict`], [`BuildError`]) abort
//! the enclosing build. Argument failures ([`ArgumentError`]) surface to the
//! caller resolving that one argument.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::base::{QName, SourceLocation};

use super::keyword::{ArgumentKind, StatementKind};

/// Boxed underlying cause of an argument error.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

// ============================================================================
// ARGUMENT ERRORS
// ============================================================================

/// A raw argument is not well-formed.
#[derive(Debug, Error)]
#[error("{message}{}", at_position(.position))]
pub struct ArgumentSyntaxError {
    message: String,
    position: usize,
    #[source]
    cause: Option<BoxError>,
}

impl ArgumentSyntaxError {
    /// Create a syntax error at an unknown position.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: 0,
            cause: None,
        }
    }

    /// Set the 1-based character position of the error.
    #[must_use]
    pub fn at(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    /// Attach an underlying cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 1-based character position, `0` if unknown.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// A well-formed argument cannot be bound to a value (e.g. an unknown prefix).
#[derive(Debug, Error)]
#[error("{message}{}", at_position(.position))]
pub struct ArgumentBindingError {
    message: String,
    position: usize,
    #[source]
    cause: Option<BoxError>,
}

impl ArgumentBindingError {
    /// Create a binding error at an unknown position.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: 0,
            cause: None,
        }
    }

    /// Set the 1-based character position of the error.
    #[must_use]
    pub fn at(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    /// Attach an underlying cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 1-based character position, `0` if unknown.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl From<ArgumentSyntaxError> for ArgumentBindingError {
    fn from(error: ArgumentSyntaxError) -> Self {
        Self {
            message: error.message.clone(),
            position: error.position,
            cause: Some(Box::new(error)),
        }
    }
}

/// Failure to turn a raw argument into a typed one.
#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error(transparent)]
    Syntax(#[from] ArgumentSyntaxError),
    #[error(transparent)]
    Binding(#[from] ArgumentBindingError),
}

impl ArgumentError {
    /// 1-based character position, `0` if unknown.
    pub fn position(&self) -> usize {
        match self {
            Self::Syntax(e) => e.position(),
            Self::Binding(e) => e.position(),
        }
    }
}

fn at_position(position: &usize) -> String {
    if *position == 0 {
        String::new()
    } else {
        format!(" at position {position}")
    }
}

// ============================================================================
// NAMESPACE CONFLICTS
// ============================================================================

/// The namespaces maintained by effective statements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamespaceKind {
    SchemaTree,
    DataTree,
    Typedef,
}

impl fmt::Display for NamespaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SchemaTree => "schema tree",
            Self::DataTree => "data tree",
            Self::Typedef => "typedef",
        })
    }
}

/// Two children of one statement claim the same name in the same namespace.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("conflict in {kind} namespace: {name} is defined more than once")]
pub struct NamespaceConflict {
    /// The namespace in which the clash occurred.
    pub kind: NamespaceKind,
    /// The clashing name.
    pub name: QName,
}

// ============================================================================
// BUILD ERRORS
// ============================================================================

/// Stable diagnostic codes for build errors.
pub mod codes {
    /// Namespace conflict.
    pub const NAMESPACE_CONFLICT: &str = "E0101";
    /// Argument could not be parsed or bound.
    pub const INVALID_ARGUMENT: &str = "E0102";
    /// Argument does not have the shape the keyword requires.
    pub const ARGUMENT_MISMATCH: &str = "E0103";
    /// Keyword is neither builtin nor an extension.
    pub const UNKNOWN_KEYWORD: &str = "E0104";
    /// `config true` below a node whose effective config is false.
    pub const CONFIG_UNDER_STATE: &str = "E0105";
}

/// Failure to build a declared or effective statement.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{conflict}{}", at_location(.location))]
    Conflict {
        #[source]
        conflict: NamespaceConflict,
        location: Option<SourceLocation>,
    },
    #[error("invalid argument of '{keyword}': {source}{}", at_location(.location))]
    Argument {
        keyword: String,
        #[source]
        source: ArgumentError,
        location: Option<SourceLocation>,
    },
    #[error("'{kind}' requires an argument of kind {expected:?}{}", at_location(.location))]
    ArgumentMismatch {
        kind: StatementKind,
        expected: ArgumentKind,
        location: Option<SourceLocation>,
    },
    #[error("unknown keyword '{keyword}'{}", at_location(.location))]
    UnknownKeyword {
        keyword: String,
        location: Option<SourceLocation>,
    },
    #[error("'{kind}' cannot be config true under config false{}", at_location(.location))]
    ConfigUnderState {
        kind: StatementKind,
        location: Option<SourceLocation>,
    },
}

impl BuildError {
    /// The diagnostic code of this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Conflict { .. } => codes::NAMESPACE_CONFLICT,
            Self::Argument { .. } => codes::INVALID_ARGUMENT,
            Self::ArgumentMismatch { .. } => codes::ARGUMENT_MISMATCH,
            Self::UnknownKeyword { .. } => codes::UNKNOWN_KEYWORD,
            Self::ConfigUnderState { .. } => codes::CONFIG_UNDER_STATE,
        }
    }

    /// Where the failing statement was written, if known.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Conflict { location, .. }
            | Self::Argument { location, .. }
            | Self::ArgumentMismatch { location, .. }
            | Self::UnknownKeyword { location, .. }
            | Self::ConfigUnderState { location, .. } => location.as_ref(),
        }
    }
}

fn at_location(location: &Option<SourceLocation>) -> String {
    match location {
        Some(location) => format!(" at {location}"),
        None => String::new(),
    }
}
