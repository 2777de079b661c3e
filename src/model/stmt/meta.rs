//! `must`, extension statements, and argument-only statements.

use std::sync::Arc;

use crate::model::declared::DeclaredStatement;
use crate::model::error::NamespaceConflict;
use crate::model::flags::Flags;
use crate::model::mixins::EffectiveState;
use crate::model::shape::{Declared, NoTree, Shaped, StatementBase};

use super::EffectiveStatement;

#[derive(Debug)]
pub struct MustStatement {
    base: StatementBase<Declared, NoTree>,
}

impl MustStatement {
    pub(crate) fn new(
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
    ) -> Result<Self, NamespaceConflict> {
        Ok(Self {
            base: StatementBase::new(Declared::new(declared), substatements)?,
        })
    }

    /// The XPath condition, as written.
    pub fn xpath(&self) -> &str {
        self.argument().as_str().unwrap_or_default()
    }
}

impl Shaped for MustStatement {
    type Link = Declared;
    type Tree = NoTree;

    fn base(&self) -> &StatementBase<Declared, NoTree> {
        &self.base
    }
}

capabilities!(MustStatement => DocumentedNode, ConstraintMetaDefinition);

/// An extension statement (`prefix:keyword`).
#[derive(Debug)]
pub struct UnknownStatement {
    base: StatementBase<Declared, NoTree>,
    flags: Flags,
}

impl UnknownStatement {
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
}

impl Shaped for UnknownStatement {
    type Link = Declared;
    type Tree = NoTree;

    fn base(&self) -> &StatementBase<Declared, NoTree> {
        &self.base
    }
}

with_flags!(UnknownStatement);
capabilities!(UnknownStatement => DocumentedNode, WithStatus, CopyableNode, UnknownSchemaNode);

/// Any statement whose meaning is its argument: `description`, `config`,
/// `type`, `key` and the like.
#[derive(Debug)]
pub struct MetaStatement {
    base: StatementBase<Declared, NoTree>,
}

impl MetaStatement {
    pub(crate) fn new(
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
    ) -> Result<Self, NamespaceConflict> {
        Ok(Self {
            base: StatementBase::new(Declared::new(declared), substatements)?,
        })
    }
}

impl Shaped for MetaStatement {
    type Link = Declared;
    type Tree = NoTree;

    fn base(&self) -> &StatementBase<Declared, NoTree> {
        &self.base
    }
}
