use std::sync::Arc;

use crate::base::{QName, QNameModule, Revision};
use crate::model::argument::Argument;
use crate::model::config::TypedefIndexing;
use crate::model::declared::DeclaredStatement;
use crate::model::error::NamespaceConflict;
use crate::model::keyword::StatementKind;
use crate::model::mixins::{EffectiveState, SchemaTreeAware, TypedefAware};
use crate::model::shape::{DataTree, Declared, NoTree, Shaped, StatementBase};
use crate::model::typedef::{TypedefIndex, TypedefNamespace};

use super::{AugmentStatement, EffectiveStatement, OperationStatement};

/// The root of an effective tree.
#[derive(Debug)]
pub struct ModuleStatement {
    base: StatementBase<Declared, DataTree>,
    typedefs: TypedefIndex,
}

impl ModuleStatement {
    pub(crate) fn new(
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
        indexing: TypedefIndexing,
    ) -> Result<Self, NamespaceConflict> {
        let base = StatementBase::new(Declared::new(declared), substatements)?;
        let typedefs = TypedefIndex::build(indexing, StatementKind::Module, base.substatements())?;
        Ok(Self { base, typedefs })
    }

    /// The module name, bound to the module's own namespace.
    pub fn name(&self) -> Option<&QName> {
        self.argument().as_qname()
    }

    /// The namespace and revision definitions of this module are bound to.
    pub fn namespace(&self) -> Option<&QNameModule> {
        self.name().map(QName::module)
    }

    pub fn rpcs(&self) -> impl Iterator<Item = &OperationStatement> {
        self.effective_substatements()
            .iter()
            .filter(|stmt| stmt.kind() == StatementKind::Rpc)
            .filter_map(EffectiveStatement::as_operation)
    }

    pub fn find_rpc(&self, name: &QName) -> Option<&OperationStatement> {
        self.schema_tree_child(name)
            .filter(|stmt| stmt.kind() == StatementKind::Rpc)
            .and_then(EffectiveStatement::as_operation)
    }

    /// The prefix the module uses for its own definitions.
    pub fn prefix(&self) -> Option<&str> {
        self.find_first_argument(StatementKind::Prefix)
            .and_then(Argument::as_str)
    }

    /// The declared `yang-version`, `"1"` when absent.
    pub fn yang_version(&self) -> &str {
        self.find_first_argument(StatementKind::YangVersion)
            .and_then(Argument::as_str)
            .unwrap_or("1")
    }

    /// The most recent `revision`.
    pub fn revision(&self) -> Option<&Revision> {
        self.effective_substatements()
            .iter()
            .filter(|stmt| stmt.kind() == StatementKind::Revision)
            .filter_map(|stmt| stmt.argument().as_revision())
            .max()
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportStatement> {
        self.effective_substatements()
            .iter()
            .filter_map(EffectiveStatement::as_import)
    }

    /// Top-level `augment` statements.
    pub fn augmentations(&self) -> impl Iterator<Item = &AugmentStatement> {
        self.effective_substatements()
            .iter()
            .filter_map(EffectiveStatement::as_augment)
    }
}

impl Shaped for ModuleStatement {
    type Link = Declared;
    type Tree = DataTree;

    fn base(&self) -> &StatementBase<Declared, DataTree> {
        &self.base
    }
}

impl TypedefAware for ModuleStatement {
    fn typedefs(&self) -> TypedefNamespace<'_> {
        self.typedefs.view(self.base.substatements())
    }
}

capabilities!(ModuleStatement => DocumentedNode, DataNodeContainer, NotificationNodeContainer);

/// An `import` of another module under a local prefix.
#[derive(Debug)]
pub struct ImportStatement {
    base: StatementBase<Declared, NoTree>,
}

impl ImportStatement {
    pub(crate) fn new(
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
    ) -> Result<Self, NamespaceConflict> {
        Ok(Self {
            base: StatementBase::new(Declared::new(declared), substatements)?,
        })
    }

    /// The name of the imported module.
    pub fn module_name(&self) -> &str {
        self.argument().as_str().unwrap_or_default()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.find_first_argument(StatementKind::Prefix)
            .and_then(Argument::as_str)
    }

    /// The pinned revision, if the import names one.
    pub fn revision_date(&self) -> Option<&Revision> {
        self.find_first_argument(StatementKind::RevisionDate)
            .and_then(Argument::as_revision)
    }
}

impl Shaped for ImportStatement {
    type Link = Declared;
    type Tree = NoTree;

    fn base(&self) -> &StatementBase<Declared, NoTree> {
        &self.base
    }
}

capabilities!(ImportStatement => DocumentedNode);
