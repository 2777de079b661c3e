//! Declared statements: statements as written in source.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{ModuleInterner, QNameModule, Revision, SourceLocation};

use super::argument::{
    Argument, ArgumentParser, IdentifierParser, PrefixTable, StatementArgumentParser,
};
use super::error::BuildError;
use super::keyword::{ArgumentKind, StatementKind};

/// A statement as produced by the parsing layer.
///
/// Declared statements are immutable and shared: every effective statement
/// derived from source keeps an `Arc` to the declared statement it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredStatement {
    kind: StatementKind,
    keyword: SmolStr,
    argument: Argument,
    raw_argument: Option<SmolStr>,
    substatements: Vec<Arc<DeclaredStatement>>,
    location: Option<SourceLocation>,
}

impl DeclaredStatement {
    /// Create a builtin statement.
    pub fn new(
        kind: StatementKind,
        argument: Argument,
        raw_argument: Option<&str>,
        substatements: Vec<Arc<DeclaredStatement>>,
    ) -> Self {
        Self {
            kind,
            keyword: SmolStr::new_static(kind.keyword()),
            argument,
            raw_argument: raw_argument.map(SmolStr::new),
            substatements,
            location: None,
        }
    }

    /// Create an extension statement with its `prefix:name` keyword.
    pub fn extension(
        keyword: &str,
        raw_argument: Option<&str>,
        substatements: Vec<Arc<DeclaredStatement>>,
    ) -> Self {
        let argument = raw_argument.map_or(Argument::Empty, |raw| Argument::String(raw.into()));
        Self {
            kind: StatementKind::Unknown,
            keyword: SmolStr::new(keyword),
            argument,
            raw_argument: raw_argument.map(SmolStr::new),
            substatements,
            location: None,
        }
    }

    /// Attach a source location.
    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// The keyword as written, including the prefix of extension statements.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn argument(&self) -> &Argument {
        &self.argument
    }

    /// The argument text as written, for error reporting.
    pub fn raw_argument(&self) -> Option<&str> {
        self.raw_argument.as_deref()
    }

    pub fn declared_substatements(&self) -> &[Arc<DeclaredStatement>] {
        &self.substatements
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}

/// Creates declared statements for one module, resolving raw arguments
/// through [`StatementArgumentParser`].
///
/// This is the entry point the parsing layer drives: one call per statement,
/// children first.
#[derive(Debug)]
pub struct DeclaredFactory {
    interner: Arc<ModuleInterner>,
    module: QNameModule,
    prefixes: PrefixTable,
}

impl DeclaredFactory {
    /// Create a factory for the module with `namespace` and `revision`.
    pub fn new(interner: Arc<ModuleInterner>, namespace: &str, revision: Option<Revision>) -> Self {
        let module = interner.intern(namespace, revision);
        Self {
            interner,
            module,
            prefixes: PrefixTable::default(),
        }
    }

    /// Bind `prefix` to another module (`import`) or to this one.
    pub fn bind_prefix(&mut self, prefix: &str, namespace: &str, revision: Option<Revision>) {
        let module = self.interner.intern(namespace, revision);
        self.prefixes.insert(SmolStr::new(prefix), module);
    }

    /// The module statements are bound to.
    pub fn module(&self) -> &QNameModule {
        &self.module
    }

    /// Create a statement from its keyword and raw argument.
    ///
    /// Builtin keywords have their argument parsed; `prefix:name` keywords
    /// become extension statements carrying their argument as text.
    pub fn statement(
        &self,
        keyword: &str,
        raw_argument: Option<&str>,
        substatements: Vec<Arc<DeclaredStatement>>,
        location: Option<SourceLocation>,
    ) -> Result<Arc<DeclaredStatement>, BuildError> {
        let Some(kind) = StatementKind::from_keyword(keyword) else {
            if keyword.contains(':') {
                let mut stmt = DeclaredStatement::extension(keyword, raw_argument, substatements);
                stmt.location = location;
                return Ok(Arc::new(stmt));
            }
            return Err(BuildError::UnknownKeyword {
                keyword: keyword.to_owned(),
                location,
            });
        };

        let argument = match (kind.argument_kind(), raw_argument) {
            // input and output are named after their keyword
            (ArgumentKind::None, None) if kind.is_schema_tree() => self
                .module
                .bind(kind.keyword())
                .map_or(Argument::Empty, Argument::QName),
            (ArgumentKind::None, None) => Argument::Empty,
            (ArgumentKind::None, Some(_)) | (_, None) => {
                return Err(BuildError::ArgumentMismatch {
                    kind,
                    expected: kind.argument_kind(),
                    location,
                });
            }
            (_, Some(raw)) => {
                let identifiers = IdentifierParser::new(&self.module, &self.prefixes);
                StatementArgumentParser::new(kind, identifiers)
                    .parse(raw)
                    .map_err(|source| BuildError::Argument {
                        keyword: keyword.to_owned(),
                        source,
                        location: location.clone(),
                    })?
            }
        };

        let mut stmt = DeclaredStatement::new(kind, argument, raw_argument, substatements);
        stmt.location = location;
        Ok(Arc::new(stmt))
    }

    /// Shorthand for [`DeclaredFactory::statement`] without a location.
    pub fn stmt(
        &self,
        keyword: &str,
        raw_argument: Option<&str>,
        substatements: Vec<Arc<DeclaredStatement>>,
    ) -> Result<Arc<DeclaredStatement>, BuildError> {
        self.statement(keyword, raw_argument, substatements, None)
    }
}
