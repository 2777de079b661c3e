//! Typed statement arguments and the parsers producing them.

use std::fmt;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{QName, QNameModule, Revision, check_identifier};

use super::error::{ArgumentBindingError, ArgumentError, ArgumentSyntaxError};
use super::keyword::{ArgumentKind, StatementKind};

/// Lifecycle status of a definition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
    #[default]
    Current,
    Deprecated,
    Obsolete,
}

impl Status {
    /// The status as written in source.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Deprecated => "deprecated",
            Self::Obsolete => "obsolete",
        }
    }
}

/// Who orders the entries of a list or leaf-list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OrderedBy {
    #[default]
    System,
    User,
}

impl OrderedBy {
    /// The ordering as written in source.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// The typed argument of a statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Argument {
    /// The statement takes no argument.
    Empty,
    String(SmolStr),
    QName(QName),
    Boolean(bool),
    Status(Status),
    OrderedBy(OrderedBy),
    Revision(Revision),
    Unsigned(u32),
    /// An upper bound; `None` is `unbounded`.
    UpperBound(Option<u32>),
}

impl Argument {
    /// The shape of this argument.
    pub fn kind(&self) -> ArgumentKind {
        match self {
            Self::Empty => ArgumentKind::None,
            Self::String(_) => ArgumentKind::String,
            Self::QName(_) => ArgumentKind::Identifier,
            Self::Boolean(_) => ArgumentKind::Boolean,
            Self::Status(_) => ArgumentKind::Status,
            Self::OrderedBy(_) => ArgumentKind::OrderedBy,
            Self::Revision(_) => ArgumentKind::Revision,
            Self::Unsigned(_) => ArgumentKind::Unsigned,
            Self::UpperBound(_) => ArgumentKind::UpperBound,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_qname(&self) -> Option<&QName> {
        match self {
            Self::QName(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_status(&self) -> Option<Status> {
        match self {
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }

    pub fn as_ordered_by(&self) -> Option<OrderedBy> {
        match self {
            Self::OrderedBy(ordered_by) => Some(*ordered_by),
            _ => None,
        }
    }

    pub fn as_revision(&self) -> Option<&Revision> {
        match self {
            Self::Revision(revision) => Some(revision),
            _ => None,
        }
    }

    pub fn as_unsigned(&self) -> Option<u32> {
        match self {
            Self::Unsigned(value) => Some(*value),
            _ => None,
        }
    }

    /// The bound of an upper-bound argument: `Some(None)` is `unbounded`.
    pub fn as_upper_bound(&self) -> Option<Option<u32>> {
        match self {
            Self::UpperBound(bound) => Some(*bound),
            _ => None,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::String(s) => f.write_str(s),
            Self::QName(name) => fmt::Display::fmt(name, f),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Status(status) => f.write_str(status.as_str()),
            Self::OrderedBy(ordered_by) => f.write_str(ordered_by.as_str()),
            Self::Revision(revision) => fmt::Display::fmt(revision, f),
            Self::Unsigned(value) => write!(f, "{value}"),
            Self::UpperBound(Some(bound)) => write!(f, "{bound}"),
            Self::UpperBound(None) => f.write_str("unbounded"),
        }
    }
}

// ============================================================================
// PARSERS
// ============================================================================

/// Turns the raw textual argument of a statement into a typed value.
pub trait ArgumentParser {
    /// The typed argument.
    type Output;

    /// Parse `raw`, reporting malformed input as a syntax error and input that
    /// cannot be resolved in context as a binding error.
    fn parse(&self, raw: &str) -> Result<Self::Output, ArgumentError>;
}

/// Accepts any text verbatim.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringParser;

impl ArgumentParser for StringParser {
    type Output = SmolStr;

    fn parse(&self, raw: &str) -> Result<SmolStr, ArgumentError> {
        Ok(SmolStr::new(raw))
    }
}

/// Accepts `true` and `false`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BooleanParser;

impl ArgumentParser for BooleanParser {
    type Output = bool;

    fn parse(&self, raw: &str) -> Result<bool, ArgumentError> {
        match raw {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ArgumentSyntaxError::new(format!("'{raw}' is not a boolean"))
                .at(1)
                .into()),
        }
    }
}

/// Accepts `current`, `deprecated` and `obsolete`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusParser;

impl ArgumentParser for StatusParser {
    type Output = Status;

    fn parse(&self, raw: &str) -> Result<Status, ArgumentError> {
        match raw {
            "current" => Ok(Status::Current),
            "deprecated" => Ok(Status::Deprecated),
            "obsolete" => Ok(Status::Obsolete),
            _ => Err(ArgumentSyntaxError::new(format!("'{raw}' is not a valid status"))
                .at(1)
                .into()),
        }
    }
}

/// Accepts `system` and `user`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderedByParser;

impl ArgumentParser for OrderedByParser {
    type Output = OrderedBy;

    fn parse(&self, raw: &str) -> Result<OrderedBy, ArgumentError> {
        match raw {
            "system" => Ok(OrderedBy::System),
            "user" => Ok(OrderedBy::User),
            _ => Err(ArgumentSyntaxError::new(format!("'{raw}' is not a valid ordering"))
                .at(1)
                .into()),
        }
    }
}

/// Accepts `YYYY-MM-DD` dates.
#[derive(Clone, Copy, Debug, Default)]
pub struct RevisionParser;

impl ArgumentParser for RevisionParser {
    type Output = Revision;

    fn parse(&self, raw: &str) -> Result<Revision, ArgumentError> {
        Revision::parse(raw).map_err(|e| {
            ArgumentSyntaxError::new(format!("'{raw}' is not a revision date"))
                .at(1)
                .with_cause(e)
                .into()
        })
    }
}

/// Accepts non-negative decimal integers.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsignedParser;

impl ArgumentParser for UnsignedParser {
    type Output = u32;

    fn parse(&self, raw: &str) -> Result<u32, ArgumentError> {
        let offending = raw
            .chars()
            .position(|c| !c.is_ascii_digit())
            .or(raw.is_empty().then_some(0));
        if let Some(offset) = offending {
            return Err(ArgumentSyntaxError::new(format!("'{raw}' is not a non-negative integer"))
                .at(offset + 1)
                .into());
        }
        raw.parse().map_err(|e| {
            ArgumentSyntaxError::new(format!("'{raw}' is out of range"))
                .at(1)
                .with_cause(e)
                .into()
        })
    }
}

/// Accepts a positive integer or `unbounded`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UpperBoundParser;

impl ArgumentParser for UpperBoundParser {
    type Output = Option<u32>;

    fn parse(&self, raw: &str) -> Result<Option<u32>, ArgumentError> {
        if raw == "unbounded" {
            return Ok(None);
        }
        match UnsignedParser.parse(raw)? {
            0 => Err(ArgumentSyntaxError::new("an upper bound must be positive")
                .at(1)
                .into()),
            bound => Ok(Some(bound)),
        }
    }
}

/// Prefix to module bindings visible while parsing one module.
pub type PrefixTable = FxHashMap<SmolStr, QNameModule>;

/// Binds `name` or `prefix:name` to a [`QName`].
///
/// Unprefixed names bind to the current module; prefixed names are resolved
/// through the prefix table.
#[derive(Clone, Copy, Debug)]
pub struct IdentifierParser<'a> {
    module: &'a QNameModule,
    prefixes: &'a PrefixTable,
}

impl<'a> IdentifierParser<'a> {
    /// Create a parser binding to `module`.
    pub fn new(module: &'a QNameModule, prefixes: &'a PrefixTable) -> Self {
        Self { module, prefixes }
    }
}

impl ArgumentParser for IdentifierParser<'_> {
    type Output = QName;

    fn parse(&self, raw: &str) -> Result<QName, ArgumentError> {
        let (module, local, offset) = match raw.split_once(':') {
            Some((prefix, local)) => {
                check_identifier(prefix).map_err(|position| {
                    ArgumentSyntaxError::new(format!("'{raw}' has an invalid prefix")).at(position)
                })?;
                let module = self.prefixes.get(prefix).ok_or_else(|| {
                    ArgumentBindingError::new(format!("prefix '{prefix}' is not bound")).at(1)
                })?;
                (module, local, prefix.chars().count() + 1)
            }
            None => (self.module, raw, 0),
        };

        check_identifier(local).map_err(|position| {
            ArgumentSyntaxError::new(format!("'{raw}' is not a valid identifier")).at(offset + position)
        })?;
        module.bind(local).map_err(|e| {
            ArgumentBindingError::new(format!("cannot bind '{raw}'"))
                .with_cause(e)
                .into()
        })
    }
}

/// Parses the argument of any statement by dispatching on its kind.
#[derive(Clone, Copy, Debug)]
pub struct StatementArgumentParser<'a> {
    kind: StatementKind,
    identifiers: IdentifierParser<'a>,
}

impl<'a> StatementArgumentParser<'a> {
    /// Create a parser for statements of `kind`.
    pub fn new(kind: StatementKind, identifiers: IdentifierParser<'a>) -> Self {
        Self { kind, identifiers }
    }
}

impl ArgumentParser for StatementArgumentParser<'_> {
    type Output = Argument;

    fn parse(&self, raw: &str) -> Result<Argument, ArgumentError> {
        Ok(match self.kind.argument_kind() {
            ArgumentKind::None => Argument::Empty,
            ArgumentKind::Identifier => Argument::QName(self.identifiers.parse(raw)?),
            ArgumentKind::String => Argument::String(StringParser.parse(raw)?),
            ArgumentKind::Boolean => Argument::Boolean(BooleanParser.parse(raw)?),
            ArgumentKind::Status => Argument::Status(StatusParser.parse(raw)?),
            ArgumentKind::OrderedBy => Argument::OrderedBy(OrderedByParser.parse(raw)?),
            ArgumentKind::Revision => Argument::Revision(RevisionParser.parse(raw)?),
            ArgumentKind::Unsigned => Argument::Unsigned(UnsignedParser.parse(raw)?),
            ArgumentKind::UpperBound => Argument::UpperBound(UpperBoundParser.parse(raw)?),
        })
    }
}
