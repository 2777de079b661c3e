//! `rpc`, `action`, their `input`/`output`, and `notification`.

use std::sync::Arc;

use crate::model::config::TypedefIndexing;
use crate::model::declared::DeclaredStatement;
use crate::model::error::NamespaceConflict;
use crate::model::flags::Flags;
use crate::model::keyword::StatementKind;
use crate::model::mixins::{EffectiveState, TypedefAware};
use crate::model::shape::{DataTree, Declared, SchemaTree, Shaped, StatementBase};
use crate::model::typedef::{TypedefIndex, TypedefNamespace};

use super::EffectiveStatement;

/// `rpc` or `action`.
#[derive(Debug)]
pub struct OperationStatement {
    base: StatementBase<Declared, SchemaTree>,
    flags: Flags,
    typedefs: TypedefIndex,
}

impl OperationStatement {
    pub(crate) fn new(
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
        flags: Flags,
        indexing: TypedefIndexing,
    ) -> Result<Self, NamespaceConflict> {
        let kind = declared.kind();
        let base = StatementBase::new(Declared::new(declared), substatements)?;
        let typedefs = TypedefIndex::build(indexing, kind, base.substatements())?;
        Ok(Self {
            base,
            flags,
            typedefs,
        })
    }

    pub fn is_action(&self) -> bool {
        self.kind() == StatementKind::Action
    }
}

impl Shaped for OperationStatement {
    type Link = Declared;
    type Tree = SchemaTree;

    fn base(&self) -> &StatementBase<Declared, SchemaTree> {
        &self.base
    }
}

impl TypedefAware for OperationStatement {
    fn typedefs(&self) -> TypedefNamespace<'_> {
        self.typedefs.view(self.base.substatements())
    }
}

with_flags!(OperationStatement);
capabilities!(OperationStatement =>
    DocumentedNode, WithStatus, SchemaNode, CopyableNode, OperationDefinition,
);

/// `input` or `output`. Named after its keyword in the defining module.
#[derive(Debug)]
pub struct OperationContainerStatement {
    base: StatementBase<Declared, DataTree>,
    flags: Flags,
    typedefs: TypedefIndex,
}

impl OperationContainerStatement {
    pub(crate) fn new(
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
        flags: Flags,
        indexing: TypedefIndexing,
    ) -> Result<Self, NamespaceConflict> {
        let kind = declared.kind();
        let base = StatementBase::new(Declared::new(declared), substatements)?;
        let typedefs = TypedefIndex::build(indexing, kind, base.substatements())?;
        Ok(Self {
            base,
            flags,
            typedefs,
        })
    }

    pub fn is_input(&self) -> bool {
        self.kind() == StatementKind::Input
    }
}

impl Shaped for OperationContainerStatement {
    type Link = Declared;
    type Tree = DataTree;

    fn base(&self) -> &StatementBase<Declared, DataTree> {
        &self.base
    }
}

impl TypedefAware for OperationContainerStatement {
    fn typedefs(&self) -> TypedefNamespace<'_> {
        self.typedefs.view(self.base.substatements())
    }
}

with_flags!(OperationContainerStatement);
capabilities!(OperationContainerStatement =>
    DocumentedNode, WithStatus, SchemaNode, CopyableNode, WhenConditionAware, DataSchemaNode,
    MustConstraintAware, DataNodeContainer,
);

#[derive(Debug)]
pub struct NotificationStatement {
    base: StatementBase<Declared, DataTree>,
    flags: Flags,
    typedefs: TypedefIndex,
}

impl NotificationStatement {
    pub(crate) fn new(
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
        flags: Flags,
        indexing: TypedefIndexing,
    ) -> Result<Self, NamespaceConflict> {
        let base = StatementBase::new(Declared::new(declared), substatements)?;
        let typedefs =
            TypedefIndex::build(indexing, StatementKind::Notification, base.substatements())?;
        Ok(Self {
            base,
            flags,
            typedefs,
        })
    }
}

impl Shaped for NotificationStatement {
    type Link = Declared;
    type Tree = DataTree;

    fn base(&self) -> &StatementBase<Declared, DataTree> {
        &self.base
    }
}

impl TypedefAware for NotificationStatement {
    fn typedefs(&self) -> TypedefNamespace<'_> {
        self.typedefs.view(self.base.substatements())
    }
}

with_flags!(NotificationStatement);
capabilities!(NotificationStatement =>
    DocumentedNode, WithStatus, SchemaNode, CopyableNode, MustConstraintAware, DataNodeContainer,
);
