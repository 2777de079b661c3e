//! Compact storage for substatement lists.
//!
//! Most statements have no children or exactly one, so [`CompactList`] keeps
//! those cases free of any sequence allocation.

use std::fmt;
use std::ops::Deref;
use std::slice;

/// An immutable ordered list stored as nothing, a single element, or a boxed
/// slice, depending on its length.
#[derive(Clone)]
pub enum CompactList<T> {
    Empty,
    One(T),
    Many(Box<[T]>),
}

impl<T> CompactList<T> {
    /// Compact an ordered sequence.
    ///
    /// A vector without spare capacity is kept as-is; otherwise it is shrunk
    /// once into its final allocation.
    pub fn compact(mut items: Vec<T>) -> Self {
        match items.len() {
            0 => Self::Empty,
            1 => match items.pop() {
                Some(item) => Self::One(item),
                None => Self::Empty,
            },
            _ => Self::Many(items.into_boxed_slice()),
        }
    }

    /// View the list as a slice. Never copies.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Empty => &[],
            Self::One(item) => slice::from_ref(item),
            Self::Many(items) => items,
        }
    }

    /// Expand back into an owned vector.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Empty => Vec::new(),
            Self::One(item) => vec![item],
            Self::Many(items) => items.into_vec(),
        }
    }
}

impl<T> Default for CompactList<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> Deref for CompactList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> From<Vec<T>> for CompactList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::compact(items)
    }
}

impl<T> FromIterator<T> for CompactList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::compact(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a CompactList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<T: PartialEq> PartialEq for CompactList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for CompactList<T> {}

impl<T: fmt::Debug> fmt::Debug for CompactList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
