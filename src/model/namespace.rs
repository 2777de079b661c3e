//! Read-only name → statement maps.
//!
//! A [`Namespace`] picks its representation from its size: no storage for an
//! empty namespace, an inline pair for a single entry, and an insertion-ordered
//! hash map only from two entries up. The representation is not observable:
//! equality and hashing treat all three as plain maps.

use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FusedIterator;
use std::{fmt, option};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::base::QName;

/// The mutable accumulator namespaces are built from.
pub type NamespaceMap<V> = IndexMap<QName, V, FxBuildHasher>;

/// An immutable mapping from [`QName`] to `V`.
#[derive(Clone)]
pub enum Namespace<V> {
    Empty,
    Single(QName, V),
    Map(NamespaceMap<V>),
}

impl<V> Namespace<V> {
    /// The empty namespace. Allocates nothing.
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// Freeze an accumulated map, choosing the smallest representation.
    pub fn from_map(mut map: NamespaceMap<V>) -> Self {
        match map.len() {
            0 => Self::Empty,
            1 => match map.pop() {
                Some((name, value)) => Self::Single(name, value),
                None => Self::Empty,
            },
            _ => {
                map.shrink_to_fit();
                Self::Map(map)
            }
        }
    }

    pub fn get(&self, name: &QName) -> Option<&V> {
        match self {
            Self::Empty => None,
            Self::Single(key, value) => (key == name).then_some(value),
            Self::Map(map) => map.get(name),
        }
    }

    pub fn contains_key(&self, name: &QName) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(..) => 1,
            Self::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> Iter<'_, V> {
        match self {
            Self::Empty => Iter::Single(None.into_iter()),
            Self::Single(key, value) => Iter::Single(Some((key, value)).into_iter()),
            Self::Map(map) => Iter::Map(map.iter()),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &QName> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }
}

impl<V> Default for Namespace<V> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<V> FromIterator<(QName, V)> for Namespace<V> {
    /// Later entries replace earlier ones with the same name.
    fn from_iter<I: IntoIterator<Item = (QName, V)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl<'a, V> IntoIterator for &'a Namespace<V> {
    type Item = (&'a QName, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<V: PartialEq> PartialEq for Namespace<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl<V: Eq> Eq for Namespace<V> {}

impl<V: Hash> Hash for Namespace<V> {
    /// Order-independent: the wrapping sum of each entry's key hash XOR value
    /// hash, so every representation of the same mapping hashes alike.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sum = self.iter().fold(0u64, |acc, (key, value)| {
            acc.wrapping_add(FxBuildHasher.hash_one(key) ^ FxBuildHasher.hash_one(value))
        });
        state.write_u64(sum);
    }
}

impl<V: fmt::Debug> fmt::Debug for Namespace<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over the entries of a [`Namespace`].
pub enum Iter<'a, V> {
    Single(option::IntoIter<(&'a QName, &'a V)>),
    Map(indexmap::map::Iter<'a, QName, V>),
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a QName, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Single(iter) => iter.next(),
            Self::Map(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Single(iter) => iter.size_hint(),
            Self::Map(iter) => iter.size_hint(),
        }
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::QNameModule;
    use std::hash::DefaultHasher;

    fn name(local: &str) -> QName {
        QNameModule::new("urn:test", None).bind(local).unwrap()
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_representation_by_size() {
        assert!(matches!(Namespace::<u32>::from_map(NamespaceMap::default()), Namespace::Empty));
        assert!(matches!(
            [(name("a"), 1)].into_iter().collect::<Namespace<u32>>(),
            Namespace::Single(..)
        ));
        assert!(matches!(
            [(name("a"), 1), (name("b"), 2)].into_iter().collect::<Namespace<u32>>(),
            Namespace::Map(_)
        ));
    }

    #[test]
    fn test_single_entry_lookup() {
        let ns: Namespace<u32> = [(name("a"), 1)].into_iter().collect();
        assert_eq!(ns.get(&name("a")), Some(&1));
        assert_eq!(ns.get(&name("b")), None);
        assert!(ns.contains_key(&name("a")));
        assert_eq!(ns.keys().collect::<Vec<_>>(), vec![&name("a")]);
        assert_eq!(ns.values().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(ns.len(), 1);
    }

    #[test]
    fn test_single_equals_general_map() {
        let single: Namespace<u32> = [(name("a"), 1)].into_iter().collect();
        let mut map = NamespaceMap::default();
        map.insert(name("a"), 1);
        let general = Namespace::Map(map);

        assert_eq!(single, general);
        assert_eq!(general, single);
        assert_eq!(hash_of(&single), hash_of(&general));
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: Namespace<u32> = [(name("a"), 1), (name("b"), 2)].into_iter().collect();
        let b: Namespace<u32> = [(name("b"), 2), (name("a"), 1)].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let c: Namespace<u32> = [(name("a"), 1), (name("b"), 3)].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let ns: Namespace<u32> =
            [(name("z"), 1), (name("a"), 2), (name("m"), 3)].into_iter().collect();
        let keys: Vec<_> = ns.keys().map(QName::local_name).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
