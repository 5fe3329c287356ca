//! Restartable snapshot sequences
//!
//! An [`Enumerator`] captures the entries of a map at creation time. Every
//! call to [`Enumerator::iter`] starts a fresh cursor at the first element,
//! and later mutation of the source map is not observed.

use std::fmt;
use std::sync::Arc;

/// Snapshot sequence produced by the visitor-less iteration calls
#[derive(Clone)]
pub struct Enumerator<T> {
    items: Arc<[T]>,
}

impl<T> Enumerator<T> {
    /// Fresh cursor positioned at the first element
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Clone> Enumerator<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.to_vec()
    }
}

impl<T> FromIterator<T> for Enumerator<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Enumerator {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Enumerator<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Enumerator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
