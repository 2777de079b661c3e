//! Data definition statements: `container`, `list`, `leaf`, `leaf-list`,
//! `choice`, `case`, `anydata` and `anyxml`.

use std::sync::Arc;

use crate::base::QName;
use crate::model::argument::Argument;
use crate::model::config::TypedefIndexing;
use crate::model::declared::DeclaredStatement;
use crate::model::error::NamespaceConflict;
use crate::model::flags::Flags;
use crate::model::keyword::StatementKind;
use crate::model::mixins::{EffectiveState, SchemaTreeAware, TypedefAware};
use crate::model::shape::{
    DataTree, Declared, LinkShape, NoTree, SchemaTree, Shaped, StatementBase, Undeclared,
};
use crate::model::typedef::{TypedefIndex, TypedefNamespace};

use super::EffectiveStatement;

fn string_argument(stmt: &impl EffectiveState, kind: StatementKind) -> Option<&str> {
    stmt.find_first_argument(kind).and_then(Argument::as_str)
}

fn type_name(stmt: &impl EffectiveState) -> Option<&QName> {
    stmt.find_first_argument(StatementKind::Type)
        .and_then(Argument::as_qname)
}

// ============================================================================
// CONTAINER
// ============================================================================

#[derive(Debug)]
pub struct ContainerStatement {
    base: StatementBase<Declared, DataTree>,
    flags: Flags,
    typedefs: TypedefIndex,
}

impl ContainerStatement {
    pub(crate) fn new(
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
        flags: Flags,
        indexing: TypedefIndexing,
    ) -> Result<Self, NamespaceConflict> {
        let base = StatementBase::new(Declared::new(declared), substatements)?;
        let typedefs = TypedefIndex::build(indexing, StatementKind::Container, base.substatements())?;
        Ok(Self {
            base,
            flags,
            typedefs,
        })
    }

    /// The `presence` meaning, if this is a presence container.
    pub fn presence(&self) -> Option<&str> {
        string_argument(self, StatementKind::Presence)
    }
}

impl Shaped for ContainerStatement {
    type Link = Declared;
    type Tree = DataTree;

    fn base(&self) -> &StatementBase<Declared, DataTree> {
        &self.base
    }
}

impl TypedefAware for ContainerStatement {
    fn typedefs(&self) -> TypedefNamespace<'_> {
        self.typedefs.view(self.base.substatements())
    }
}

with_flags!(ContainerStatement);
capabilities!(ContainerStatement =>
    DocumentedNode, WithStatus, SchemaNode, CopyableNode, WhenConditionAware, DataSchemaNode,
    MustConstraintAware, PresenceAware, AugmentationTarget, ActionNodeContainer,
    NotificationNodeContainer, DataNodeContainer,
);

// ============================================================================
// LIST
// ============================================================================

#[derive(Debug)]
pub struct ListStatement {
    base: StatementBase<Declared, DataTree>,
    flags: Flags,
    typedefs: TypedefIndex,
}

impl ListStatement {
    pub(crate) fn new(
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
        flags: Flags,
        indexing: TypedefIndexing,
    ) -> Result<Self, NamespaceConflict> {
        let base = StatementBase::new(Declared::new(declared), substatements)?;
        let typedefs = TypedefIndex::build(indexing, StatementKind::List, base.substatements())?;
        Ok(Self {
            base,
            flags,
            typedefs,
        })
    }

    /// Names of the key leaves, as written.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        string_argument(self, StatementKind::Key)
            .into_iter()
            .flat_map(str::split_whitespace)
    }
}

impl Shaped for ListStatement {
    type Link = Declared;
    type Tree = DataTree;

    fn base(&self) -> &StatementBase<Declared, DataTree> {
        &self.base
    }
}

impl TypedefAware for ListStatement {
    fn typedefs(&self) -> TypedefNamespace<'_> {
        self.typedefs.view(self.base.substatements())
    }
}

with_flags!(ListStatement);
capabilities!(ListStatement =>
    DocumentedNode, WithStatus, SchemaNode, CopyableNode, WhenConditionAware, DataSchemaNode,
    MustConstraintAware, UserOrderedAware, ElementCountAware, AugmentationTarget,
    ActionNodeContainer, NotificationNodeContainer, DataNodeContainer,
);

// ============================================================================
// LEAF / LEAF-LIST
// ============================================================================

#[derive(Debug)]
pub struct LeafStatement {
    base: StatementBase<Declared, NoTree>,
    flags: Flags,
}

impl LeafStatement {
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

    pub fn type_name(&self) -> Option<&QName> {
        type_name(self)
    }

    pub fn units(&self) -> Option<&str> {
        string_argument(self, StatementKind::Units)
    }

    pub fn default_value(&self) -> Option<&str> {
        string_argument(self, StatementKind::Default)
    }
}

impl Shaped for LeafStatement {
    type Link = Declared;
    type Tree = NoTree;

    fn base(&self) -> &StatementBase<Declared, NoTree> {
        &self.base
    }
}

with_flags!(LeafStatement);
capabilities!(LeafStatement =>
    DocumentedNode, WithStatus, SchemaNode, CopyableNode, WhenConditionAware, DataSchemaNode,
    MustConstraintAware, MandatoryAware,
);

#[derive(Debug)]
pub struct LeafListStatement {
    base: StatementBase<Declared, NoTree>,
    flags: Flags,
}

impl LeafListStatement {
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

    pub fn type_name(&self) -> Option<&QName> {
        type_name(self)
    }

    pub fn units(&self) -> Option<&str> {
        string_argument(self, StatementKind::Units)
    }

    /// Every `default` value, in declaration order.
    pub fn default_values(&self) -> impl Iterator<Item = &str> {
        self.effective_substatements()
            .iter()
            .filter(|stmt| stmt.kind() == StatementKind::Default)
            .filter_map(|stmt| stmt.argument().as_str())
    }
}

impl Shaped for LeafListStatement {
    type Link = Declared;
    type Tree = NoTree;

    fn base(&self) -> &StatementBase<Declared, NoTree> {
        &self.base
    }
}

with_flags!(LeafListStatement);
capabilities!(LeafListStatement =>
    DocumentedNode, WithStatus, SchemaNode, CopyableNode, WhenConditionAware, DataSchemaNode,
    MustConstraintAware, UserOrderedAware, ElementCountAware,
);

// ============================================================================
// CHOICE / CASE
// ============================================================================

#[derive(Debug)]
pub struct ChoiceStatement {
    base: StatementBase<Declared, SchemaTree>,
    flags: Flags,
}

impl ChoiceStatement {
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

    /// The cases, declared and implicit, in declaration order.
    pub fn cases(&self) -> impl Iterator<Item = &EffectiveStatement> {
        self.schema_tree()
            .values()
            .filter(|stmt| stmt.kind() == StatementKind::Case)
    }

    pub fn find_case(&self, name: &QName) -> Option<&EffectiveStatement> {
        self.schema_tree_child(name)
            .filter(|stmt| stmt.kind() == StatementKind::Case)
    }

    /// The case named by the `default` statement.
    pub fn default_case(&self) -> Option<&EffectiveStatement> {
        let default = string_argument(self, StatementKind::Default)?;
        let local = default.rsplit(':').next().unwrap_or(default);
        self.cases().find(|case| {
            case.argument()
                .as_qname()
                .is_some_and(|name| name.local_name() == local)
        })
    }
}

impl Shaped for ChoiceStatement {
    type Link = Declared;
    type Tree = SchemaTree;

    fn base(&self) -> &StatementBase<Declared, SchemaTree> {
        &self.base
    }
}

with_flags!(ChoiceStatement);
capabilities!(ChoiceStatement =>
    DocumentedNode, WithStatus, SchemaNode, CopyableNode, WhenConditionAware, DataSchemaNode,
    MandatoryAware, AugmentationTarget,
);

/// A `case`, either written in source or implied by a shorthand choice child.
#[derive(Debug)]
pub struct CaseStatement<L> {
    base: StatementBase<L, DataTree>,
    flags: Flags,
}

/// A `case` written in source.
pub type DeclaredCase = CaseStatement<Declared>;
/// A `case` implied by a shorthand `choice` child. It has no declared statement.
pub type ImplicitCase = CaseStatement<Undeclared>;

impl DeclaredCase {
    pub(crate) fn from_declared(
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
        flags: Flags,
    ) -> Result<Self, NamespaceConflict> {
        Self::new(Declared::new(declared), substatements, flags)
    }
}

impl ImplicitCase {
    /// Wrap a shorthand choice child named `name`.
    pub(crate) fn wrapping(
        name: QName,
        child: EffectiveStatement,
        flags: Flags,
    ) -> Result<Self, NamespaceConflict> {
        let link = Undeclared::new(StatementKind::Case, Argument::QName(name));
        Self::new(link, vec![child], flags)
    }
}

impl<L: LinkShape> CaseStatement<L> {
    fn new(
        link: L,
        substatements: Vec<EffectiveStatement>,
        flags: Flags,
    ) -> Result<Self, NamespaceConflict> {
        Ok(Self {
            base: StatementBase::new(link, substatements)?,
            flags,
        })
    }
}

impl<L: LinkShape> Shaped for CaseStatement<L> {
    type Link = L;
    type Tree = DataTree;

    fn base(&self) -> &StatementBase<L, DataTree> {
        &self.base
    }
}

with_flags!(impl<L: LinkShape> CaseStatement<L>);
capabilities!(impl<L: LinkShape> CaseStatement<L> =>
    DocumentedNode, WithStatus, SchemaNode, CopyableNode, WhenConditionAware, DataSchemaNode,
    AugmentationTarget, DataNodeContainer,
);

// ============================================================================
// ANYDATA / ANYXML
// ============================================================================

/// `anydata` or `anyxml`: a node whose content is not modeled.
#[derive(Debug)]
pub struct OpaqueStatement {
    base: StatementBase<Declared, NoTree>,
    flags: Flags,
}

impl OpaqueStatement {
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

    pub fn is_anyxml(&self) -> bool {
        self.kind() == StatementKind::Anyxml
    }
}

impl Shaped for OpaqueStatement {
    type Link = Declared;
    type Tree = NoTree;

    fn base(&self) -> &StatementBase<Declared, NoTree> {
        &self.base
    }
}

with_flags!(OpaqueStatement);
capabilities!(OpaqueStatement =>
    DocumentedNode, WithStatus, SchemaNode, CopyableNode, WhenConditionAware, DataSchemaNode,
    MustConstraintAware, MandatoryAware,
);
