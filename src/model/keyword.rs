//! Statement keywords.

use std::fmt;

/// The shape of a statement's argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    /// No argument.
    None,
    /// An identifier bound to a module, yielding a [`QName`](crate::base::QName).
    Identifier,
    /// Free-form text (descriptions, XPath expressions, paths, ...).
    String,
    /// `true` or `false`.
    Boolean,
    /// `current`, `deprecated` or `obsolete`.
    Status,
    /// `system` or `user`.
    OrderedBy,
    /// A `YYYY-MM-DD` date.
    Revision,
    /// A non-negative integer.
    Unsigned,
    /// A positive integer or `unbounded`.
    UpperBound,
}

/// The statement keywords understood by the effective model.
///
/// Extension statements (`prefix:keyword`) are all [`StatementKind::Unknown`];
/// their keyword text lives on the declared statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatementKind {
    Action,
    Anydata,
    Anyxml,
    Augment,
    Base,
    Case,
    Choice,
    Config,
    Container,
    Default,
    Description,
    Enum,
    ErrorAppTag,
    ErrorMessage,
    Grouping,
    IfFeature,
    Import,
    Input,
    Key,
    Leaf,
    LeafList,
    Length,
    List,
    Mandatory,
    MaxElements,
    MinElements,
    Module,
    Must,
    Namespace,
    Notification,
    OrderedBy,
    Output,
    Path,
    Pattern,
    Prefix,
    Presence,
    Range,
    Reference,
    Revision,
    RevisionDate,
    Rpc,
    Status,
    Type,
    Typedef,
    Units,
    Unknown,
    Uses,
    When,
    YangVersion,
}

impl StatementKind {
    /// Every builtin kind, in keyword order.
    pub const BUILTIN: [StatementKind; 48] = [
        Self::Action,
        Self::Anydata,
        Self::Anyxml,
        Self::Augment,
        Self::Base,
        Self::Case,
        Self::Choice,
        Self::Config,
        Self::Container,
        Self::Default,
        Self::Description,
        Self::Enum,
        Self::ErrorAppTag,
        Self::ErrorMessage,
        Self::Grouping,
        Self::IfFeature,
        Self::Import,
        Self::Input,
        Self::Key,
        Self::Leaf,
        Self::LeafList,
        Self::Length,
        Self::List,
        Self::Mandatory,
        Self::MaxElements,
        Self::MinElements,
        Self::Module,
        Self::Must,
        Self::Namespace,
        Self::Notification,
        Self::OrderedBy,
        Self::Output,
        Self::Path,
        Self::Pattern,
        Self::Prefix,
        Self::Presence,
        Self::Range,
        Self::Reference,
        Self::Revision,
        Self::RevisionDate,
        Self::Rpc,
        Self::Status,
        Self::Type,
        Self::Typedef,
        Self::Units,
        Self::Uses,
        Self::When,
        Self::YangVersion,
    ];

    /// The keyword as written in source. Unknown statements report `"unknown"`.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Anydata => "anydata",
            Self::Anyxml => "anyxml",
            Self::Augment => "augment",
            Self::Base => "base",
            Self::Case => "case",
            Self::Choice => "choice",
            Self::Config => "config",
            Self::Container => "container",
            Self::Default => "default",
            Self::Description => "description",
            Self::Enum => "enum",
            Self::ErrorAppTag => "error-app-tag",
            Self::ErrorMessage => "error-message",
            Self::Grouping => "grouping",
            Self::IfFeature => "if-feature",
            Self::Import => "import",
            Self::Input => "input",
            Self::Key => "key",
            Self::Leaf => "leaf",
            Self::LeafList => "leaf-list",
            Self::Length => "length",
            Self::List => "list",
            Self::Mandatory => "mandatory",
            Self::MaxElements => "max-elements",
            Self::MinElements => "min-elements",
            Self::Module => "module",
            Self::Must => "must",
            Self::Namespace => "namespace",
            Self::Notification => "notification",
            Self::OrderedBy => "ordered-by",
            Self::Output => "output",
            Self::Path => "path",
            Self::Pattern => "pattern",
            Self::Prefix => "prefix",
            Self::Presence => "presence",
            Self::Range => "range",
            Self::Reference => "reference",
            Self::Revision => "revision",
            Self::RevisionDate => "revision-date",
            Self::Rpc => "rpc",
            Self::Status => "status",
            Self::Type => "type",
            Self::Typedef => "typedef",
            Self::Units => "units",
            Self::Unknown => "unknown",
            Self::Uses => "uses",
            Self::When => "when",
            Self::YangVersion => "yang-version",
        }
    }

    /// Look up a builtin keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::BUILTIN.iter().copied().find(|kind| kind.keyword() == keyword)
    }

    /// The argument shape this kind requires.
    pub const fn argument_kind(self) -> ArgumentKind {
        match self {
            Self::Action
            | Self::Anydata
            | Self::Anyxml
            | Self::Base
            | Self::Case
            | Self::Choice
            | Self::Container
            | Self::Grouping
            | Self::Leaf
            | Self::LeafList
            | Self::List
            | Self::Module
            | Self::Notification
            | Self::Rpc
            | Self::Type
            | Self::Typedef
            | Self::Uses => ArgumentKind::Identifier,
            Self::Augment
            | Self::Default
            | Self::Description
            | Self::Enum
            | Self::ErrorAppTag
            | Self::ErrorMessage
            | Self::IfFeature
            | Self::Import
            | Self::Key
            | Self::Length
            | Self::Must
            | Self::Namespace
            | Self::Path
            | Self::Pattern
            | Self::Prefix
            | Self::Presence
            | Self::Range
            | Self::Reference
            | Self::Units
            | Self::Unknown
            | Self::When
            | Self::YangVersion => ArgumentKind::String,
            Self::Config | Self::Mandatory => ArgumentKind::Boolean,
            Self::Status => ArgumentKind::Status,
            Self::OrderedBy => ArgumentKind::OrderedBy,
            Self::Revision | Self::RevisionDate => ArgumentKind::Revision,
            Self::MinElements => ArgumentKind::Unsigned,
            Self::MaxElements => ArgumentKind::UpperBound,
            Self::Input | Self::Output => ArgumentKind::None,
        }
    }

    /// Whether statements of this kind are schema tree children of their parent.
    pub const fn is_schema_tree(self) -> bool {
        matches!(
            self,
            Self::Action
                | Self::Anydata
                | Self::Anyxml
                | Self::Case
                | Self::Choice
                | Self::Container
                | Self::Input
                | Self::Leaf
                | Self::LeafList
                | Self::List
                | Self::Notification
                | Self::Output
                | Self::Rpc
        )
    }

    /// Whether statements of this kind are data tree children of their parent.
    ///
    /// Every data tree kind is also a schema tree kind.
    pub const fn is_data_tree(self) -> bool {
        matches!(
            self,
            Self::Anydata | Self::Anyxml | Self::Container | Self::Leaf | Self::LeafList | Self::List
        )
    }

    /// Whether this kind may appear directly under `choice` as a shorthand case.
    pub const fn is_shorthand_case(self) -> bool {
        matches!(
            self,
            Self::Anydata
                | Self::Anyxml
                | Self::Choice
                | Self::Container
                | Self::Leaf
                | Self::LeafList
                | Self::List
        )
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for kind in StatementKind::BUILTIN {
            assert_eq!(StatementKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(StatementKind::from_keyword("unknown"), None);
        assert_eq!(StatementKind::from_keyword("foo:bar"), None);
    }

    #[test]
    fn test_data_tree_implies_schema_tree() {
        for kind in StatementKind::BUILTIN {
            if kind.is_data_tree() {
                assert!(kind.is_schema_tree(), "{kind} is data tree but not schema tree");
            }
        }
    }

    #[test]
    fn test_transparent_kinds() {
        assert!(StatementKind::Choice.is_schema_tree());
        assert!(!StatementKind::Choice.is_data_tree());
        assert!(StatementKind::Case.is_schema_tree());
        assert!(!StatementKind::Case.is_data_tree());
        assert!(!StatementKind::Description.is_schema_tree());
    }

    #[test]
    fn test_header_and_constraint_keywords() {
        for (keyword, argument) in [
            ("namespace", ArgumentKind::String),
            ("prefix", ArgumentKind::String),
            ("yang-version", ArgumentKind::String),
            ("import", ArgumentKind::String),
            ("revision", ArgumentKind::Revision),
            ("revision-date", ArgumentKind::Revision),
            ("min-elements", ArgumentKind::Unsigned),
            ("max-elements", ArgumentKind::UpperBound),
            ("base", ArgumentKind::Identifier),
            ("if-feature", ArgumentKind::String),
        ] {
            let kind = StatementKind::from_keyword(keyword).unwrap();
            assert_eq!(kind.argument_kind(), argument, "{keyword}");
            assert!(!kind.is_schema_tree(), "{keyword}");
        }
    }
}
