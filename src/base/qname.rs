//! Namespaced names.
//!
//! Every schema node is identified by a [`QName`]: the identity of the module
//! that defines it ([`QNameModule`]) plus a local identifier.

use std::cmp::Ordering;
use std::fmt;

use smol_str::SmolStr;
use thiserror::Error;

/// Errors raised while constructing or parsing names.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QNameError {
    /// The local name is not a valid identifier.
    #[error("invalid identifier '{identifier}' at position {position}")]
    InvalidIdentifier {
        /// The offending input.
        identifier: String,
        /// 1-based position of the first offending character.
        position: usize,
    },
    /// The revision is not a `YYYY-MM-DD` date.
    #[error("invalid revision '{0}', expected YYYY-MM-DD")]
    InvalidRevision(String),
    /// The input does not follow `(namespace?revision=YYYY-MM-DD)local`.
    #[error("malformed qualified name '{0}'")]
    Malformed(String),
}

/// Check that `input` is a valid identifier.
///
/// Identifiers start with a letter or underscore, followed by letters, digits,
/// underscores, hyphens or dots. On failure returns the 1-based character
/// position of the first offending character (1 for an empty input).
pub fn check_identifier(input: &str) -> Result<(), usize> {
    let mut chars = input.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return Err(1),
    }
    for (offset, c) in chars.enumerate() {
        if !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
            return Err(offset + 2);
        }
    }
    Ok(())
}

/// A module revision date, `YYYY-MM-DD`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Revision(SmolStr);

impl Revision {
    /// Parse a revision date.
    pub fn parse(input: &str) -> Result<Self, QNameError> {
        let bytes = input.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !well_formed {
            return Err(QNameError::InvalidRevision(input.to_owned()));
        }

        let month = &input[5..7];
        let day = &input[8..10];
        if !("01"..="12").contains(&month) || !("01"..="31").contains(&day) {
            return Err(QNameError::InvalidRevision(input.to_owned()));
        }
        Ok(Self(SmolStr::new(input)))
    }

    /// The revision as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Revision {
    type Error = QNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Revision> for String {
    fn from(revision: Revision) -> Self {
        revision.0.into()
    }
}

impl fmt::Debug for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Revision({})", self.0)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The identity of a module: its namespace and optional revision.
///
/// Cloning is cheap; the namespace text is reference counted. Use
/// [`ModuleInterner`](super::ModuleInterner) to share one allocation between
/// all names of a module.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QNameModule {
    namespace: SmolStr,
    revision: Option<Revision>,
}

impl QNameModule {
    /// Create a module identity.
    pub fn new(namespace: impl Into<SmolStr>, revision: Option<Revision>) -> Self {
        Self {
            namespace: namespace.into(),
            revision,
        }
    }

    /// The module namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The module revision, if any.
    pub fn revision(&self) -> Option<&Revision> {
        self.revision.as_ref()
    }

    /// Bind a local name to this module.
    pub fn bind(&self, local_name: &str) -> Result<QName, QNameError> {
        QName::new(self.clone(), local_name)
    }
}

impl PartialOrd for QNameModule {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QNameModule {
    // Modules without a revision sort before any revised module.
    fn cmp(&self, other: &Self) -> Ordering {
        self.namespace
            .cmp(&other.namespace)
            .then_with(|| self.revision.cmp(&other.revision))
    }
}

impl fmt::Debug for QNameModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for QNameModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.revision {
            Some(revision) => write!(f, "{}?revision={}", self.namespace, revision),
            None => f.write_str(&self.namespace),
        }
    }
}

/// A namespaced name: module identity plus local identifier.
///
/// With the `serde` feature a name serializes as its canonical text form.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct QName {
    module: QNameModule,
    local_name: SmolStr,
}

impl QName {
    /// Create a name, validating the local identifier.
    pub fn new(module: QNameModule, local_name: &str) -> Result<Self, QNameError> {
        check_identifier(local_name).map_err(|position| QNameError::InvalidIdentifier {
            identifier: local_name.to_owned(),
            position,
        })?;
        Ok(Self {
            module,
            local_name: SmolStr::new(local_name),
        })
    }

    /// Parse the canonical `(namespace?revision=YYYY-MM-DD)local` form.
    ///
    /// The revision part is optional: `(namespace)local`.
    pub fn parse(input: &str) -> Result<Self, QNameError> {
        let malformed = || QNameError::Malformed(input.to_owned());

        let rest = input.strip_prefix('(').ok_or_else(malformed)?;
        let (module, local_name) = rest.split_once(')').ok_or_else(malformed)?;
        let module = match module.split_once("?revision=") {
            Some((namespace, revision)) => {
                QNameModule::new(namespace, Some(Revision::parse(revision)?))
            }
            None => QNameModule::new(module, None),
        };
        if module.namespace().is_empty() {
            return Err(malformed());
        }
        Self::new(module, local_name)
    }

    /// A name in the same module with a different local name.
    pub fn with_local_name(&self, local_name: &str) -> Result<Self, QNameError> {
        Self::new(self.module.clone(), local_name)
    }

    /// The defining module.
    pub fn module(&self) -> &QNameModule {
        &self.module
    }

    /// The local identifier.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }
}

impl TryFrom<String> for QName {
    type Error = QNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<QName> for String {
    fn from(name: QName) -> Self {
        name.to_string()
    }
}

impl fmt::Debug for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}){}", self.module, self.local_name)
    }
}
