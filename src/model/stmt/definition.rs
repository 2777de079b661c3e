//! Reusable definitions: `grouping`, `uses`, `augment` and `typedef`.

use std::sync::Arc;

use crate::base::QName;
use crate::model::argument::Argument;
use crate::model::config::TypedefIndexing;
use crate::model::declared::DeclaredStatement;
use crate::model::error::NamespaceConflict;
use crate::model::flags::Flags;
use crate::model::keyword::StatementKind;
use crate::model::mixins::{EffectiveState, SchemaNode, TypedefAware};
use crate::model::shape::{DataTree, Declared, NoTree, Shaped, StatementBase};
use crate::model::typedef::{TypedefIndex, TypedefNamespace};

use super::EffectiveStatement;

#[derive(Debug)]
pub struct GroupingStatement {
    base: StatementBase<Declared, DataTree>,
    flags: Flags,
    typedefs: TypedefIndex,
}

impl GroupingStatement {
    pub(crate) fn new(
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
        flags: Flags,
        indexing: TypedefIndexing,
    ) -> Result<Self, NamespaceConflict> {
        let base = StatementBase::new(Declared::new(declared), substatements)?;
        let typedefs = TypedefIndex::build(indexing, StatementKind::Grouping, base.substatements())?;
        Ok(Self {
            base,
            flags,
            typedefs,
        })
    }
}

impl Shaped for GroupingStatement {
    type Link = Declared;
    type Tree = DataTree;

    fn base(&self) -> &StatementBase<Declared, DataTree> {
        &self.base
    }
}

impl TypedefAware for GroupingStatement {
    fn typedefs(&self) -> TypedefNamespace<'_> {
        self.typedefs.view(self.base.substatements())
    }
}

with_flags!(GroupingStatement);
capabilities!(GroupingStatement =>
    DocumentedNode, WithStatus, SchemaNode, CopyableNode, DataNodeContainer, ActionNodeContainer,
    NotificationNodeContainer,
);

/// A reference to a grouping. The grouping's content is not expanded here.
#[derive(Debug)]
pub struct UsesStatement {
    base: StatementBase<Declared, NoTree>,
    flags: Flags,
}

impl UsesStatement {
    pub(crate) fn new(
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
        flags: Flags,
    ) -> Result<Self, NamespaceConflict> {
        Ok(Self {
            base: StatementBase::new(Declared::new(declared), substatements)?,
            flags,
        })
    }

    /// The name of the referenced grouping.
    pub fn source_grouping(&self) -> Option<&QName> {
        self.argument().as_qname()
    }

    /// `augment` statements refining the grouping content.
    pub fn augmentations(&self) -> impl Iterator<Item = &AugmentStatement> {
        self.effective_substatements()
            .iter()
            .filter_map(EffectiveStatement::as_augment)
    }
}

impl Shaped for UsesStatement {
    type Link = Declared;
    type Tree = NoTree;

    fn base(&self) -> &StatementBase<Declared, NoTree> {
        &self.base
    }
}

with_flags!(UsesStatement);
capabilities!(UsesStatement => DocumentedNode, WithStatus, CopyableNode, WhenConditionAware);

#[derive(Debug)]
pub struct AugmentStatement {
    base: StatementBase<Declared, DataTree>,
    flags: Flags,
}

impl AugmentStatement {
    pub(crate) fn new(
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
        flags: Flags,
    ) -> Result<Self, NamespaceConflict> {
        Ok(Self {
            base: StatementBase::new(Declared::new(declared), substatements)?,
            flags,
        })
    }

    /// The schema node path being augmented, as written.
    pub fn target_path(&self) -> Option<&str> {
        self.argument().as_str()
    }
}

impl Shaped for AugmentStatement {
    type Link = Declared;
    type Tree = DataTree;

    fn base(&self) -> &StatementBase<Declared, DataTree> {
        &self.base
    }
}

with_flags!(AugmentStatement);
capabilities!(AugmentStatement =>
    DocumentedNode, WithStatus, CopyableNode, WhenConditionAware, DataNodeContainer,
    ActionNodeContainer, NotificationNodeContainer,
);

#[derive(Debug)]
pub struct TypedefStatement {
    base: StatementBase<Declared, NoTree>,
    flags: Flags,
}

impl TypedefStatement {
    pub(crate) fn new(
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
        flags: Flags,
    ) -> Result<Self, NamespaceConflict> {
        Ok(Self {
            base: StatementBase::new(Declared::new(declared), substatements)?,
            flags,
        })
    }

    pub fn name(&self) -> &QName {
        self.qname()
    }

    /// The base type this typedef derives from.
    pub fn type_name(&self) -> Option<&QName> {
        self.find_first_argument(StatementKind::Type)
            .and_then(Argument::as_qname)
    }

    pub fn units(&self) -> Option<&str> {
        self.find_first_argument(StatementKind::Units)
            .and_then(Argument::as_str)
    }

    pub fn default_value(&self) -> Option<&str> {
        self.find_first_argument(StatementKind::Default)
            .and_then(Argument::as_str)
    }
}

impl Shaped for TypedefStatement {
    type Link = Declared;
    type Tree = NoTree;

    fn base(&self) -> &StatementBase<Declared, NoTree> {
        &self.base
    }
}

with_flags!(TypedefStatement);
capabilities!(TypedefStatement => DocumentedNode, WithStatus, SchemaNode);
