//! The typedef namespace.
//!
//! Statements that commonly define many typedefs (`module`, `grouping`) index
//! them eagerly into a [`StatementNamespace`]. The remaining typedef holders
//! keep no index and scan their substatements on lookup. Both strategies check
//! name uniqueness at construction time and answer lookups identically.

use rustc_hash::FxHashSet;

use crate::base::QName;

use super::config::TypedefIndexing;
use super::error::{NamespaceConflict, NamespaceKind};
use super::keyword::StatementKind;
use super::index::{StatementNamespace, put_child};
use super::namespace::{self, Namespace, NamespaceMap};
use super::stmt::{EffectiveStatement, TypedefStatement};

fn typedef_name(stmt: &EffectiveStatement) -> Option<&QName> {
    stmt.as_typedef().map(TypedefStatement::name)
}

/// Index the typedefs among `substatements`.
pub fn index_typedefs(
    substatements: &[EffectiveStatement],
) -> Result<StatementNamespace, NamespaceConflict> {
    let mut map = NamespaceMap::default();
    for child in substatements {
        if let Some(name) = typedef_name(child) {
            put_child(&mut map, name, child, NamespaceKind::Typedef)?;
        }
    }
    Ok(Namespace::from_map(map))
}

/// Check that the typedefs among `substatements` have distinct names, without
/// keeping an index.
pub fn check_typedefs(substatements: &[EffectiveStatement]) -> Result<(), NamespaceConflict> {
    let mut seen = FxHashSet::default();
    for name in substatements.iter().filter_map(typedef_name) {
        if !seen.insert(name) {
            tracing::debug!(namespace = %NamespaceKind::Typedef, %name, "namespace conflict");
            return Err(NamespaceConflict {
                kind: NamespaceKind::Typedef,
                name: name.clone(),
            });
        }
    }
    Ok(())
}

/// The typedef storage of one statement: nothing for linear lookup, a boxed
/// index for packed lookup.
#[derive(Clone, Debug, Default)]
pub struct TypedefIndex(Option<Box<StatementNamespace>>);

impl TypedefIndex {
    /// Validate the typedefs among `substatements` and index them if
    /// `indexing` packs statements of `kind`.
    pub fn build(
        indexing: TypedefIndexing,
        kind: StatementKind,
        substatements: &[EffectiveStatement],
    ) -> Result<Self, NamespaceConflict> {
        if indexing.packs(kind) {
            index_typedefs(substatements).map(|index| Self(Some(Box::new(index))))
        } else {
            check_typedefs(substatements).map(|()| Self(None))
        }
    }

    pub fn is_packed(&self) -> bool {
        self.0.is_some()
    }

    /// View the typedefs, scanning `substatements` if no index was built.
    pub fn view<'a>(&'a self, substatements: &'a [EffectiveStatement]) -> TypedefNamespace<'a> {
        match &self.0 {
            Some(index) => TypedefNamespace::Packed(index),
            None => TypedefNamespace::Linear(substatements),
        }
    }
}

/// A read-only view of the typedefs defined by one statement.
#[derive(Clone, Copy, Debug)]
pub enum TypedefNamespace<'a> {
    /// Backed by a prebuilt index.
    Packed(&'a StatementNamespace),
    /// Backed by the substatement list.
    Linear(&'a [EffectiveStatement]),
}

impl<'a> TypedefNamespace<'a> {
    pub fn get(&self, name: &QName) -> Option<&'a TypedefStatement> {
        match *self {
            Self::Packed(index) => index.get(name).and_then(EffectiveStatement::as_typedef),
            Self::Linear(substatements) => substatements
                .iter()
                .filter_map(EffectiveStatement::as_typedef)
                .find(|typedef| typedef.name() == name),
        }
    }

    pub fn contains_key(&self, name: &QName) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        match *self {
            Self::Packed(index) => index.len(),
            Self::Linear(_) => self.iter().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Typedefs in definition order.
    pub fn iter(&self) -> Iter<'a> {
        match *self {
            Self::Packed(index) => Iter::Packed(index.iter()),
            Self::Linear(substatements) => Iter::Linear(substatements.iter()),
        }
    }
}

impl PartialEq for TypedefNamespace<'_> {
    /// Two views are equal when they map the same names to the same statements.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|typedef| {
                other
                    .get(typedef.name())
                    .is_some_and(|found| std::ptr::eq(found, typedef))
            })
    }
}

impl<'a> IntoIterator for TypedefNamespace<'a> {
    type Item = &'a TypedefStatement;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over the typedefs of a [`TypedefNamespace`].
pub enum Iter<'a> {
    Packed(namespace::Iter<'a, EffectiveStatement>),
    Linear(std::slice::Iter<'a, EffectiveStatement>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a TypedefStatement;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Packed(iter) => iter.find_map(|(_, stmt)| stmt.as_typedef()),
            Self::Linear(iter) => iter.find_map(EffectiveStatement::as_typedef),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::*;

    fn substatements() -> Vec<EffectiveStatement> {
        vec![typedef("a"), leaf("x"), typedef("b")]
    }

    #[test]
    fn test_strategies_agree() {
        let subs = substatements();
        let packed = TypedefIndex::build(TypedefIndexing::Packed, StatementKind::Container, &subs)
            .unwrap();
        let linear = TypedefIndex::build(TypedefIndexing::Linear, StatementKind::Container, &subs)
            .unwrap();
        assert!(packed.is_packed());
        assert!(!linear.is_packed());

        let packed = packed.view(&subs);
        let linear = linear.view(&subs);
        assert_eq!(packed, linear);
        assert_eq!(packed.len(), 2);
        assert_eq!(linear.len(), 2);
        for name in ["a", "b"] {
            let from_packed = packed.get(&qname(name)).unwrap();
            let from_linear = linear.get(&qname(name)).unwrap();
            assert!(std::ptr::eq(from_packed, from_linear));
        }
        assert!(!linear.contains_key(&qname("x")));
    }

    #[test]
    fn test_iteration_in_definition_order() {
        let subs = substatements();
        let index = TypedefIndex::build(TypedefIndexing::Auto, StatementKind::Module, &subs).unwrap();
        let names: Vec<_> = index.view(&subs).iter().map(|t| t.name().local_name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_duplicates_rejected_by_both_strategies() {
        let subs = vec![typedef("a"), typedef("a")];
        for indexing in [TypedefIndexing::Packed, TypedefIndexing::Linear] {
            let err = TypedefIndex::build(indexing, StatementKind::Grouping, &subs).unwrap_err();
            assert_eq!(err.kind, NamespaceKind::Typedef);
            assert_eq!(err.name, qname("a"));
        }
    }

    #[test]
    fn test_empty() {
        let view = TypedefNamespace::Linear(&[]);
        assert!(view.is_empty());
        assert_eq!(view.iter().count(), 0);
    }
}
