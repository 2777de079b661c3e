//! Schema tree and data tree namespace construction.
//!
//! The schema tree namespace of a statement holds its direct schema tree
//! children, `choice` and `case` included. The data tree namespace holds the
//! same children with every `choice`/`case` replaced by the data nodes found
//! beneath it, at any nesting depth.

use std::ptr;

use indexmap::map::Entry;

use super::error::{NamespaceConflict, NamespaceKind};
use super::keyword::StatementKind;
use super::namespace::{Namespace, NamespaceMap};
use super::stmt::EffectiveStatement;

/// A namespace of effective statements.
pub type StatementNamespace = Namespace<EffectiveStatement>;

/// The schema tree and data tree namespaces of one statement.
///
/// When no child needed flattening the data tree namespace is the schema tree
/// namespace: both accessors return the same object.
#[derive(Clone, Debug, Default)]
pub struct TreeNamespaces {
    schema_tree: StatementNamespace,
    data_tree: Option<StatementNamespace>,
}

impl TreeNamespaces {
    pub fn schema_tree(&self) -> &StatementNamespace {
        &self.schema_tree
    }

    pub fn data_tree(&self) -> &StatementNamespace {
        self.data_tree.as_ref().unwrap_or(&self.schema_tree)
    }

    /// Whether the data tree namespace is backed by the schema tree namespace.
    pub fn is_shared(&self) -> bool {
        ptr::eq(self.schema_tree(), self.data_tree())
    }
}

/// Insert `child` under `name`, failing if the name is already taken.
pub(crate) fn put_child(
    map: &mut NamespaceMap<EffectiveStatement>,
    name: &crate::base::QName,
    child: &EffectiveStatement,
    kind: NamespaceKind,
) -> Result<(), NamespaceConflict> {
    match map.entry(name.clone()) {
        Entry::Occupied(_) => {
            tracing::debug!(namespace = %kind, %name, "namespace conflict");
            Err(NamespaceConflict {
                kind,
                name: name.clone(),
            })
        }
        Entry::Vacant(entry) => {
            entry.insert(child.clone());
            Ok(())
        }
    }
}

fn schema_tree_map(
    substatements: &[EffectiveStatement],
) -> Result<NamespaceMap<EffectiveStatement>, NamespaceConflict> {
    let mut map = NamespaceMap::default();
    for child in substatements {
        if let Some(name) = child.schema_tree_name() {
            put_child(&mut map, name, child, NamespaceKind::SchemaTree)?;
        }
    }
    Ok(map)
}

/// Build the schema tree namespace of `substatements`.
pub fn index_schema_tree(
    substatements: &[EffectiveStatement],
) -> Result<StatementNamespace, NamespaceConflict> {
    schema_tree_map(substatements).map(Namespace::from_map)
}

/// Build both the schema tree and the data tree namespaces of `substatements`.
pub fn index_trees(substatements: &[EffectiveStatement]) -> Result<TreeNamespaces, NamespaceConflict> {
    let schema = schema_tree_map(substatements)?;

    let mut data = NamespaceMap::default();
    let mut same_as_schema = true;
    for child in schema.values() {
        if !index_data_child(&mut data, child)? {
            same_as_schema = false;
        }
    }

    let schema_tree = Namespace::from_map(schema);
    let data_tree = if same_as_schema {
        tracing::trace!(entries = schema_tree.len(), "data tree shares schema tree namespace");
        None
    } else {
        Some(Namespace::from_map(data))
    };
    Ok(TreeNamespaces {
        schema_tree,
        data_tree,
    })
}

/// Index one schema tree child into the data tree. Returns `true` if the child
/// itself was inserted, `false` if it was flattened or skipped.
fn index_data_child(
    map: &mut NamespaceMap<EffectiveStatement>,
    child: &EffectiveStatement,
) -> Result<bool, NamespaceConflict> {
    let kind = child.kind();
    if kind.is_data_tree() {
        if let Some(name) = child.schema_tree_name() {
            put_child(map, name, child, NamespaceKind::DataTree)?;
            return Ok(true);
        }
        return Ok(false);
    }

    match kind {
        StatementKind::Choice => {
            for case in schema_tree_children(child) {
                if case.kind() == StatementKind::Case {
                    index_case(map, case)?;
                }
            }
        }
        StatementKind::Case => index_case(map, child)?,
        _ => {}
    }
    Ok(false)
}

fn index_case(
    map: &mut NamespaceMap<EffectiveStatement>,
    case: &EffectiveStatement,
) -> Result<(), NamespaceConflict> {
    for child in schema_tree_children(case) {
        index_data_child(map, child)?;
    }
    Ok(())
}

fn schema_tree_children(stmt: &EffectiveStatement) -> impl Iterator<Item = &EffectiveStatement> {
    stmt.schema_tree().into_iter().flat_map(Namespace::values)
}
