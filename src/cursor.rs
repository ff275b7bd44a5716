//! Bidirectional cursors over sequences.
//!
//! A cursor is split in two: [`ListCursor`] owns the bookkeeping every
//! sequence shares (the index, optional upper bound, boundary checks, refusal
//! to mutate), and a [`Step`] strategy owns the sequence-specific window of
//! recent values that turns each move into O(1) work.
//!
//! ## Architecture
//!
//! ```text
//!   ListCursor<S>
//!   ┌──────────────────────────────────────────────┐
//!   │ idx: usize          end: Option<usize>       │
//!   │                                              │
//!   │ next_element():  check bound                 │
//!   │                  v = step.forward(idx)       │
//!   │                  idx += 1                    │
//!   │                                              │
//!   │ previous():      check idx > 0               │
//!   │                  idx -= 1                    │
//!   │                  v = step.backward(idx)      │
//!   └───────────────────────┬──────────────────────┘
//!                           │ S: Step
//!          ┌────────────────┼───────────────┬──────────────┐
//!          ▼                ▼               ▼              ▼
//!     LinearStep      FactorialStep      PrimeStep     SliceStep
//!   window [a_i ..]    window i!         current p_i   backing slice
//! ```
//!
//! ## Cursor Positions
//!
//! The cursor sits *between* elements, like a text caret. With `idx == 3`,
//! `next_element()` yields element 3 and `previous()` yields element 2:
//!
//! ```text
//!     a0   a1   a2 | a3   a4   ...
//!                  ^
//!          previous_index() = 2, next_index() = 3
//! ```

use num_bigint::BigInt;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::error::{InvariantError, SequenceError};

/// Sequence-specific movement rule driven by a [`ListCursor`].
///
/// Implementations keep a window positioned at the cursor. `forward(i)` is
/// called with the cursor at `i`: it returns element `i` and slides the window
/// to `i + 1`. `backward(i)` is called after the cursor has moved back to `i`:
/// it slides the window to `i` and returns element `i`.
pub trait Step {
    /// Element type produced by this step.
    type Item;

    /// Returns element `index` and advances the window past it.
    fn forward(&mut self, index: usize) -> Result<Self::Item, SequenceError>;

    /// Moves the window back to `index` and returns element `index`.
    fn backward(&mut self, index: usize) -> Result<Self::Item, SequenceError>;
}

impl<S: Step + ?Sized> Step for Box<S> {
    type Item = S::Item;

    #[inline]
    fn forward(&mut self, index: usize) -> Result<Self::Item, SequenceError> {
        (**self).forward(index)
    }

    #[inline]
    fn backward(&mut self, index: usize) -> Result<Self::Item, SequenceError> {
        (**self).backward(index)
    }
}

/// Type-erased step used by [`Sequence`](crate::traits::Sequence) cursors.
pub type BoxedStep<E> = Box<dyn Step<Item = E> + Send>;

/// Cursor type returned by [`Sequence::cursor`](crate::traits::Sequence::cursor).
pub type SequenceCursor<E> = ListCursor<BoxedStep<E>>;

/// Read-only bidirectional cursor.
///
/// # Example
///
/// ```
/// use seqkit::prelude::*;
///
/// let mut cursor = FibonacciNumber::new().cursor();
/// let forward: Vec<i64> = (0..6)
///     .map(|_| i64::try_from(cursor.next_element().unwrap()).unwrap())
///     .collect();
/// assert_eq!(forward, vec![0, 1, 1, 2, 3, 5]);
///
/// assert_eq!(cursor.next_index(), 6);
/// assert_eq!(i64::try_from(cursor.previous().unwrap()).unwrap(), 5);
/// assert_eq!(cursor.previous_index(), Some(4));
/// ```
#[derive(Debug)]
pub struct ListCursor<S> {
    idx: usize,
    end: Option<usize>,
    step: S,
}

impl<S: Step> ListCursor<S> {
    /// Unbounded cursor positioned before element 0.
    #[inline]
    pub fn new(step: S) -> Self {
        Self::starting_at(step, 0)
    }

    /// Unbounded cursor positioned before element `idx`.
    ///
    /// `step` must already be seeded for position `idx`.
    #[inline]
    pub fn starting_at(step: S, idx: usize) -> Self {
        Self {
            idx,
            end: None,
            step,
        }
    }

    /// Cursor positioned before `idx` that never moves past `end`.
    #[inline]
    pub fn bounded(step: S, idx: usize, end: usize) -> Self {
        Self {
            idx,
            end: Some(end),
            step,
        }
    }

    /// Returns `true` unless the cursor sits at its upper bound.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.end.map_or(true, |end| self.idx < end)
    }

    /// Returns `true` unless the cursor sits before element 0.
    #[inline]
    pub fn has_previous(&self) -> bool {
        self.idx > 0
    }

    /// Index of the element [`next_element`](Self::next_element) would return.
    #[inline]
    pub fn next_index(&self) -> usize {
        self.idx
    }

    /// Index of the element [`previous`](Self::previous) would return.
    #[inline]
    pub fn previous_index(&self) -> Option<usize> {
        self.idx.checked_sub(1)
    }

    /// Upper bound, if any.
    #[inline]
    pub fn end(&self) -> Option<usize> {
        self.end
    }

    /// Returns the next element and advances.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::NoSuchElement`] at the upper bound.
    pub fn next_element(&mut self) -> Result<S::Item, SequenceError> {
        if !self.has_next() {
            return Err(SequenceError::NoSuchElement);
        }
        let value = self.step.forward(self.idx)?;
        self.idx += 1;
        Ok(value)
    }

    /// Moves back one position and returns that element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::NoSuchElement`] before element 0.
    pub fn previous(&mut self) -> Result<S::Item, SequenceError> {
        if self.idx == 0 {
            return Err(SequenceError::NoSuchElement);
        }
        self.idx -= 1;
        self.step.backward(self.idx)
    }

    /// Always fails; cursors are read-only.
    pub fn remove(&mut self) -> Result<(), SequenceError> {
        Err(SequenceError::UnsupportedOperation("remove"))
    }

    /// Always fails; cursors are read-only.
    pub fn add(&mut self, _value: S::Item) -> Result<(), SequenceError> {
        Err(SequenceError::UnsupportedOperation("add"))
    }

    /// Always fails; cursors are read-only.
    pub fn set(&mut self, _value: S::Item) -> Result<(), SequenceError> {
        Err(SequenceError::UnsupportedOperation("set"))
    }
}

impl<S: Step + Send + 'static> ListCursor<S> {
    /// Erases the step type so cursors of different sequences share a type.
    pub fn boxed(self) -> SequenceCursor<S::Item> {
        ListCursor {
            idx: self.idx,
            end: self.end,
            step: Box::new(self.step),
        }
    }
}

/// Yields elements until the upper bound or the first error.
///
/// An error ends iteration and is logged; use
/// [`next_element`](ListCursor::next_element) to observe it directly.
impl<S: Step> Iterator for ListCursor<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }
        match self.next_element() {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(index = self.idx, error = %err, "sequence cursor stopped");
                None
            },
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.end {
            Some(end) => {
                let remaining = end.saturating_sub(self.idx);
                (0, Some(remaining))
            },
            None => (usize::MAX, None),
        }
    }
}

// ---------------------------------------------------------------------------
// LinearStep
// ---------------------------------------------------------------------------

/// Window over a linear recurrence `a(i + k) = Σ c_j · a(i + j)` with `c_0 = 1`.
///
/// The leading coefficient of one lets the window also run backwards exactly:
/// `a(i − 1) = a(i + k − 1) − Σ_{j ≥ 1} c_j · a(i + j − 1)`.
#[derive(Debug, Clone)]
pub struct LinearStep {
    coefficients: &'static [i64],
    window: VecDeque<BigInt>,
}

impl LinearStep {
    /// Creates a step whose window holds `a(i) .. a(i + k)` for the cursor
    /// position `i`.
    pub fn new(coefficients: &'static [i64], window: VecDeque<BigInt>) -> Self {
        debug_assert_eq!(coefficients.first(), Some(&1), "leading coefficient must be 1");
        debug_assert_eq!(coefficients.len(), window.len(), "window must match order");
        Self {
            coefficients,
            window,
        }
    }

    /// Creates a step positioned at 0 from the recurrence's seed values.
    pub fn from_seeds(coefficients: &'static [i64], seeds: &[i64]) -> Self {
        Self::new(coefficients, seeds.iter().map(|&s| BigInt::from(s)).collect())
    }

    fn empty_window() -> SequenceError {
        InvariantError::new("recurrence window is empty").into()
    }
}

impl Step for LinearStep {
    type Item = BigInt;

    fn forward(&mut self, _index: usize) -> Result<BigInt, SequenceError> {
        let next: BigInt = self
            .coefficients
            .iter()
            .zip(&self.window)
            .map(|(c, w)| w * *c)
            .sum();
        self.window.push_back(next);
        self.window.pop_front().ok_or_else(Self::empty_window)
    }

    fn backward(&mut self, _index: usize) -> Result<BigInt, SequenceError> {
        let last = self.window.pop_back().ok_or_else(Self::empty_window)?;
        let tail: BigInt = self.coefficients[1..]
            .iter()
            .zip(&self.window)
            .map(|(c, w)| w * *c)
            .sum();
        let previous = last - tail;
        self.window.push_front(previous.clone());
        Ok(previous)
    }
}

// ---------------------------------------------------------------------------
// SliceStep
// ---------------------------------------------------------------------------

/// Step over a materialized slice.
#[derive(Debug, Clone)]
pub struct SliceStep<E> {
    elements: Arc<[E]>,
}

impl<E> SliceStep<E> {
    /// Creates a step over `elements`.
    pub fn new(elements: Arc<[E]>) -> Self {
        Self { elements }
    }

    fn at(&self, index: usize) -> Result<E, SequenceError>
    where
        E: Clone,
    {
        self.elements
            .get(index)
            .cloned()
            .ok_or(SequenceError::NoSuchElement)
    }
}

impl<E: Clone> Step for SliceStep<E> {
    type Item = E;

    #[inline]
    fn forward(&mut self, index: usize) -> Result<E, SequenceError> {
        self.at(index)
    }

    #[inline]
    fn backward(&mut self, index: usize) -> Result<E, SequenceError> {
        self.at(index)
    }
}
