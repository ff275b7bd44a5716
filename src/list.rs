//! Immutable, finite views materialized from a sequence.
//!
//! A [`SequenceList`] is what [`Sequence::sub_list`](crate::traits::Sequence::sub_list)
//! returns: a snapshot of `[from, to)` that remembers which sequence it came
//! from. Contents are shared through an `Arc<[E]>`, so cloning a list never
//! copies elements and reads need no lock. [`SequenceList::sub_list`] copies
//! the selected range into fresh storage.
//!
//! Every mutator fails with [`SequenceError::UnsupportedOperation`].

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::cursor::{ListCursor, SliceStep};
use crate::error::SequenceError;

/// Finite, read-only list of sequence elements.
///
/// # Example
///
/// ```
/// use num_bigint::BigInt;
/// use seqkit::prelude::*;
///
/// let list = LucasNumber::new().sub_list(0, 6).unwrap();
/// assert_eq!(list.len(), 6);
/// assert_eq!(list.catalog_id(), "A000032");
/// assert_eq!(list.index_of(&BigInt::from(11)), Some(5));
///
/// let small: SequenceList<u8> = list.convert().unwrap();
/// assert_eq!(&small[..], &[2, 1, 3, 4, 7, 11]);
/// ```
#[derive(Clone)]
pub struct SequenceList<E> {
    elements: Arc<[E]>,
    catalog_id: Arc<str>,
    unique: bool,
}

impl<E> SequenceList<E> {
    /// Wraps `elements` under the given catalog id.
    pub fn new(elements: Vec<E>, catalog_id: &str, unique: bool) -> Self {
        Self {
            elements: elements.into(),
            catalog_id: Arc::from(catalog_id),
            unique,
        }
    }

    /// Catalog id of the originating sequence.
    #[inline]
    pub fn catalog_id(&self) -> &str {
        &self.catalog_id
    }

    /// Uniqueness flag inherited from the originating sequence.
    #[inline]
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at `i`, if in range.
    #[inline]
    pub fn get(&self, i: usize) -> Option<&E> {
        self.elements.get(i)
    }

    /// Bidirectional cursor over the list.
    pub fn cursor(&self) -> ListCursor<SliceStep<E>>
    where
        E: Clone,
    {
        ListCursor::bounded(SliceStep::new(self.elements.clone()), 0, self.len())
    }

    /// Returns `[from, to)` of this list under the same catalog id.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InvalidArgument`] unless
    /// `from < to <= len()`.
    pub fn sub_list(&self, from: usize, to: usize) -> Result<Self, SequenceError>
    where
        E: Clone,
    {
        if from >= to || to > self.len() {
            return Err(SequenceError::invalid(format!(
                "range [{from}, {to}) is not within [0, {})",
                self.len()
            )));
        }
        Ok(Self {
            elements: self.elements[from..to].to_vec().into(),
            catalog_id: self.catalog_id.clone(),
            unique: self.unique,
        })
    }

    /// Converts every element to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InvalidArgument`] naming the first element
    /// that does not fit in `T`.
    pub fn convert<T>(&self) -> Result<SequenceList<T>, SequenceError>
    where
        E: Clone + fmt::Display,
        T: TryFrom<E>,
    {
        let converted = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| {
                T::try_from(e.clone()).map_err(|_| {
                    SequenceError::invalid(format!(
                        "element {i} ({e}) does not fit in {}",
                        std::any::type_name::<T>()
                    ))
                })
            })
            .collect::<Result<Vec<T>, _>>()?;
        Ok(SequenceList {
            elements: converted.into(),
            catalog_id: self.catalog_id.clone(),
            unique: self.unique,
        })
    }

    /// Always fails; lists are immutable.
    pub fn try_push(&mut self, _value: E) -> Result<(), SequenceError> {
        Err(SequenceError::UnsupportedOperation("push"))
    }

    /// Always fails; lists are immutable.
    pub fn try_set(&mut self, _index: usize, _value: E) -> Result<E, SequenceError> {
        Err(SequenceError::UnsupportedOperation("set"))
    }

    /// Always fails; lists are immutable.
    pub fn try_remove(&mut self, _index: usize) -> Result<E, SequenceError> {
        Err(SequenceError::UnsupportedOperation("remove"))
    }

    /// Always fails; lists are immutable.
    pub fn try_clear(&mut self) -> Result<(), SequenceError> {
        Err(SequenceError::UnsupportedOperation("clear"))
    }
}

impl<E: PartialEq> SequenceList<E> {
    /// Returns `true` if `value` is in the list.
    #[inline]
    pub fn contains(&self, value: &E) -> bool {
        self.elements.contains(value)
    }

    /// Index of the first occurrence of `value`.
    pub fn index_of(&self, value: &E) -> Option<usize> {
        self.elements.iter().position(|e| e == value)
    }

    /// Index of the last occurrence of `value`.
    pub fn last_index_of(&self, value: &E) -> Option<usize> {
        self.elements.iter().rposition(|e| e == value)
    }
}

impl<E> Deref for SequenceList<E> {
    type Target = [E];

    #[inline]
    fn deref(&self) -> &[E] {
        &self.elements
    }
}

impl<E: PartialEq> PartialEq for SequenceList<E> {
    fn eq(&self, other: &Self) -> bool {
        self.catalog_id == other.catalog_id && self.elements == other.elements
    }
}

impl<E: Eq> Eq for SequenceList<E> {}

impl<E: fmt::Debug> fmt::Debug for SequenceList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceList")
            .field("catalog_id", &self.catalog_id)
            .field("elements", &self.elements)
            .finish()
    }
}

impl<'a, E> IntoIterator for &'a SequenceList<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn padovan_prefix() -> SequenceList<u32> {
        SequenceList::new(vec![1, 0, 0, 1, 0, 1, 1, 1, 2, 2], "A000931", false)
    }

    #[test]
    fn lookups_on_repeated_values() {
        let list = padovan_prefix();
        assert_eq!(list.index_of(&1), Some(0));
        assert_eq!(list.last_index_of(&1), Some(7));
        assert_eq!(list.index_of(&0), Some(1));
        assert_eq!(list.last_index_of(&0), Some(4));
        assert_eq!(list.index_of(&9), None);
        assert!(list.contains(&2));
        assert!(!list.is_unique());
    }

    #[test]
    fn sub_list_checks_range() {
        let list = padovan_prefix();
        let middle = list.sub_list(3, 6).unwrap();
        assert_eq!(&middle[..], &[1, 0, 1]);
        assert_eq!(middle.catalog_id(), "A000931");

        assert!(matches!(
            list.sub_list(6, 6),
            Err(SequenceError::InvalidArgument(_))
        ));
        assert!(matches!(
            list.sub_list(0, 11),
            Err(SequenceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn mutators_are_unsupported() {
        let mut list = padovan_prefix();
        assert_eq!(
            list.try_push(3),
            Err(SequenceError::UnsupportedOperation("push"))
        );
        assert_eq!(
            list.try_set(0, 3),
            Err(SequenceError::UnsupportedOperation("set"))
        );
        assert_eq!(
            list.try_remove(0),
            Err(SequenceError::UnsupportedOperation("remove"))
        );
        assert_eq!(
            list.try_clear(),
            Err(SequenceError::UnsupportedOperation("clear"))
        );
        assert_eq!(list.len(), 10);
    }

    #[test]
    fn cursor_walks_both_ways() {
        let list = padovan_prefix();
        let mut cursor = list.cursor();
        let forward: Vec<u32> = cursor.by_ref().collect();
        assert_eq!(forward, list.to_vec());

        let mut backward = Vec::new();
        while cursor.has_previous() {
            backward.push(cursor.previous().unwrap());
        }
        backward.reverse();
        assert_eq!(backward, forward);
    }

    #[test]
    fn convert_reports_overflowing_element() {
        let big = BigInt::from(u64::MAX) + 1;
        let list = SequenceList::new(vec![BigInt::from(7), big], "A000000", true);

        let wide: SequenceList<u128> = list.convert().unwrap();
        assert_eq!(wide[1], u128::from(u64::MAX) + 1);

        let err = list.convert::<u64>().unwrap_err();
        assert!(err.to_string().contains("element 1"));
    }

    #[test]
    fn clones_share_storage() {
        let list = padovan_prefix();
        let copy = list.clone();
        assert!(std::ptr::eq(list.as_ptr(), copy.as_ptr()));
        assert_eq!(list, copy);
    }

    #[test]
    fn sub_list_owns_its_range() {
        let list = padovan_prefix();
        let tail = list.sub_list(8, 10).unwrap();
        assert_eq!(&tail[..], &[2, 2]);
        assert!(!std::ptr::eq(tail.as_ptr(), list[8..].as_ptr()));
        drop(list);
        assert_eq!(tail.len(), 2);
    }
}
