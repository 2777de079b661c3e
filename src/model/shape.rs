//! Base shapes of effective statements.
//!
//! Every concrete statement type embeds one [`StatementBase`], chosen along
//! two independent axes:
//!
//! - the link axis ([`LinkShape`]): [`Declared`] statements mirror the
//!   argument of the declared statement they were built from, [`Undeclared`]
//!   statements were synthesized and carry their own argument;
//! - the tree axis ([`TreeShape`]): [`NoTree`], [`SchemaTree`] or
//!   [`DataTree`] (which implies a schema tree).
//!
//! Both axes are closed: the traits are sealed.

use std::fmt;
use std::sync::Arc;

use super::argument::Argument;
use super::declared::DeclaredStatement;
use super::error::NamespaceConflict;
use super::index::{StatementNamespace, TreeNamespaces, index_schema_tree, index_trees};
use super::keyword::StatementKind;
use super::stmt::EffectiveStatement;
use super::substatements::CompactList;

mod sealed {
    pub trait Sealed {}
}

/// Where an effective statement came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatementOrigin {
    /// Built from a statement written in source.
    Declaration,
    /// Synthesized by semantic processing, e.g. an implicit `case`.
    Context,
}

// ============================================================================
// LINK AXIS
// ============================================================================

/// How an effective statement relates to its declared statement.
pub trait LinkShape: sealed::Sealed + fmt::Debug + Send + Sync {
    fn kind(&self) -> StatementKind;
    fn argument(&self) -> &Argument;
    /// The declared statement, or `None` for synthesized statements.
    fn declared(&self) -> Option<&Arc<DeclaredStatement>>;
    fn origin(&self) -> StatementOrigin;
}

/// Link to the declared statement; kind and argument are read from it.
#[derive(Clone, Debug)]
pub struct Declared(Arc<DeclaredStatement>);

impl Declared {
    pub fn new(declared: Arc<DeclaredStatement>) -> Self {
        Self(declared)
    }

    pub fn get(&self) -> &Arc<DeclaredStatement> {
        &self.0
    }
}

impl sealed::Sealed for Declared {}

impl LinkShape for Declared {
    fn kind(&self) -> StatementKind {
        self.0.kind()
    }

    fn argument(&self) -> &Argument {
        self.0.argument()
    }

    fn declared(&self) -> Option<&Arc<DeclaredStatement>> {
        Some(&self.0)
    }

    fn origin(&self) -> StatementOrigin {
        StatementOrigin::Declaration
    }
}

/// No declared statement; kind and argument are held directly.
#[derive(Clone, Debug)]
pub struct Undeclared {
    kind: StatementKind,
    argument: Argument,
}

impl Undeclared {
    pub fn new(kind: StatementKind, argument: Argument) -> Self {
        Self { kind, argument }
    }
}

impl sealed::Sealed for Undeclared {}

impl LinkShape for Undeclared {
    fn kind(&self) -> StatementKind {
        self.kind
    }

    fn argument(&self) -> &Argument {
        &self.argument
    }

    fn declared(&self) -> Option<&Arc<DeclaredStatement>> {
        None
    }

    fn origin(&self) -> StatementOrigin {
        StatementOrigin::Context
    }
}

// ============================================================================
// TREE AXIS
// ============================================================================

/// Which tree namespaces a statement maintains.
pub trait TreeShape: sealed::Sealed + fmt::Debug + Send + Sync + Sized {
    /// Index `substatements`, failing on a name clash.
    fn index(substatements: &[EffectiveStatement]) -> Result<Self, NamespaceConflict>;
}

/// Tree shapes with a schema tree namespace.
pub trait HasSchemaTree: TreeShape {
    fn schema_tree(&self) -> &StatementNamespace;
}

/// Tree shapes with a data tree namespace.
pub trait HasDataTree: HasSchemaTree {
    fn data_tree(&self) -> &StatementNamespace;
}

/// No tree namespaces. Occupies no storage.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTree;

impl sealed::Sealed for NoTree {}

impl TreeShape for NoTree {
    fn index(_: &[EffectiveStatement]) -> Result<Self, NamespaceConflict> {
        Ok(Self)
    }
}

/// A schema tree namespace only.
#[derive(Clone, Debug)]
pub struct SchemaTree(StatementNamespace);

impl sealed::Sealed for SchemaTree {}

impl TreeShape for SchemaTree {
    fn index(substatements: &[EffectiveStatement]) -> Result<Self, NamespaceConflict> {
        index_schema_tree(substatements).map(Self)
    }
}

impl HasSchemaTree for SchemaTree {
    fn schema_tree(&self) -> &StatementNamespace {
        &self.0
    }
}

/// Schema tree and data tree namespaces.
#[derive(Clone, Debug)]
pub struct DataTree(TreeNamespaces);

impl DataTree {
    /// Whether the data tree namespace is the schema tree namespace.
    pub fn is_shared(&self) -> bool {
        self.0.is_shared()
    }
}

impl sealed::Sealed for DataTree {}

impl TreeShape for DataTree {
    fn index(substatements: &[EffectiveStatement]) -> Result<Self, NamespaceConflict> {
        index_trees(substatements).map(Self)
    }
}

impl HasSchemaTree for DataTree {
    fn schema_tree(&self) -> &StatementNamespace {
        self.0.schema_tree()
    }
}

impl HasDataTree for DataTree {
    fn data_tree(&self) -> &StatementNamespace {
        self.0.data_tree()
    }
}

// ============================================================================
// STATEMENT BASE
// ============================================================================

/// The state shared by all effective statements: link, tree namespaces and
/// compacted substatements. Built once, immutable afterwards.
#[derive(Clone, Debug)]
pub struct StatementBase<L, T> {
    link: L,
    tree: T,
    substatements: CompactList<EffectiveStatement>,
}

impl<L: LinkShape, T: TreeShape> StatementBase<L, T> {
    /// Index and compact `substatements`.
    pub fn new(link: L, substatements: Vec<EffectiveStatement>) -> Result<Self, NamespaceConflict> {
        let tree = T::index(&substatements)?;
        Ok(Self {
            link,
            tree,
            substatements: CompactList::compact(substatements),
        })
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn substatements(&self) -> &[EffectiveStatement] {
        self.substatements.as_slice()
    }
}

impl<T> StatementBase<Declared, T> {
    /// The declared statement. Always present on this shape.
    pub fn declared_statement(&self) -> &Arc<DeclaredStatement> {
        self.link.get()
    }
}

/// Implemented by every concrete statement type to expose its base.
///
/// The statement accessor traits in [`mixins`](super::mixins) are provided
/// for all `Shaped` types from this single method.
pub trait Shaped {
    type Link: LinkShape;
    type Tree: TreeShape;

    fn base(&self) -> &StatementBase<Self::Link, Self::Tree>;
}
