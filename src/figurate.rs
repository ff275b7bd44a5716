//! # Polygonal Numbers
//!
//! The `s`-gonal numbers `P(s, x) = x·((s − 2)·x − (s − 4)) / 2` for `s >= 3`:
//! triangular (`s = 3`), square, pentagonal and so on.
//!
//! ## Membership
//!
//! `x` is `s`-gonal exactly when `D = 8(s − 2)·x + (s − 4)²` is a perfect
//! square `d²` and `2(s − 2)` divides `d + s − 4`. The quotient is the rank:
//!
//! ```text
//!   rank = (d + s − 4) / (2(s − 2))
//! ```
//!
//! [`PolygonalNumber::index_of`] recomputes `P(s, rank)` and reports a mismatch
//! as [`SequenceError::Invariant`]: passing both tests while failing to
//! reproduce `x` can only be an arithmetic fault.
//!
//! ## Ranges
//!
//! A [`PolygonalNumber`] may be a bounded view `[start, end)` of ranks. Its
//! element `r` is `P(s, start + r)`, [`size`](Sequence::size) is
//! `end − start`, and its cursors stop at the end.
//!
//! Values are `u64`; a rank whose value does not fit fails with
//! [`SequenceError::InvalidArgument`].

use crate::cursor::{ListCursor, SequenceCursor, Step};
use crate::error::{InvariantError, SequenceError};
use crate::sieve::isqrt;
use crate::traits::Sequence;

/// Polygonal numbers with a fixed number of sides.
///
/// ```
/// use seqkit::prelude::*;
///
/// let pentagonal = PolygonalNumber::pentagonal();
/// let first: Vec<u64> = pentagonal.cursor().take(6).collect();
/// assert_eq!(first, vec![0, 1, 5, 12, 22, 35]);
/// assert_eq!(pentagonal.index_of(35).unwrap(), Some(5));
/// assert_eq!(pentagonal.index_of(2).unwrap(), None);
///
/// let window = PolygonalNumber::with_range(3, 10, 13).unwrap();
/// assert_eq!(window.size(), Some(3));
/// assert_eq!(window.cursor().collect::<Vec<_>>(), vec![55, 66, 78]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolygonalNumber {
    sides: u64,
    start: usize,
    end: Option<usize>,
}

impl PolygonalNumber {
    /// Unbounded `s`-gonal numbers.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InvalidArgument`] if `sides < 3`.
    pub fn new(sides: u64) -> Result<Self, SequenceError> {
        Self::check_sides(sides)?;
        Ok(Self {
            sides,
            start: 0,
            end: None,
        })
    }

    /// The ranks `[start, end)` of the `s`-gonal numbers.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InvalidArgument`] if `sides < 3` or
    /// `start > end`.
    pub fn with_range(sides: u64, start: usize, end: usize) -> Result<Self, SequenceError> {
        Self::check_sides(sides)?;
        if start > end {
            return Err(SequenceError::invalid(format!(
                "start ({start}) must not exceed end ({end})"
            )));
        }
        Ok(Self {
            sides,
            start,
            end: Some(end),
        })
    }

    const fn fixed(sides: u64) -> Self {
        Self {
            sides,
            start: 0,
            end: None,
        }
    }

    pub const fn triangular() -> Self {
        Self::fixed(3)
    }

    pub const fn square() -> Self {
        Self::fixed(4)
    }

    pub const fn pentagonal() -> Self {
        Self::fixed(5)
    }

    pub const fn hexagonal() -> Self {
        Self::fixed(6)
    }

    pub const fn heptagonal() -> Self {
        Self::fixed(7)
    }

    pub const fn octagonal() -> Self {
        Self::fixed(8)
    }

    fn check_sides(sides: u64) -> Result<(), SequenceError> {
        if sides < 3 {
            return Err(SequenceError::invalid(format!(
                "a polygon needs at least 3 sides, got {sides}"
            )));
        }
        Ok(())
    }

    /// Number of sides.
    pub fn sides(&self) -> u64 {
        self.sides
    }

    /// `P(s, rank)` for an absolute rank.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InvalidArgument`] if the value exceeds `u64`.
    pub fn value(sides: u64, rank: usize) -> Result<u64, SequenceError> {
        Self::check_sides(sides)?;
        polygonal(sides, rank as u128)
    }

    /// Position of `x` in this sequence, or `None` if `x` is not a member.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Invariant`] if the derived rank does not
    /// reproduce `x`.
    pub fn index_of(&self, x: u64) -> Result<Option<usize>, SequenceError> {
        let Some(rank) = self.rank_of(x)? else {
            return Ok(None);
        };
        let in_range = rank >= self.start && self.end.map_or(true, |end| rank < end);
        Ok(in_range.then(|| rank - self.start))
    }

    /// Returns `true` if `x` is a member of this sequence.
    ///
    /// # Errors
    ///
    /// See [`index_of`](Self::index_of).
    pub fn contains(&self, x: u64) -> Result<bool, SequenceError> {
        Ok(self.index_of(x)?.is_some())
    }

    /// Absolute rank of `x` among all `s`-gonal numbers.
    fn rank_of(&self, x: u64) -> Result<Option<usize>, SequenceError> {
        if x == 0 {
            return Ok(Some(0));
        }

        let s = u128::from(self.sides);
        let x = u128::from(x);
        let offset = s.abs_diff(4);
        let discriminant = (8 * (s - 2))
            .checked_mul(x)
            .and_then(|d| d.checked_add(offset * offset));
        let Some(discriminant) = discriminant else {
            return Ok(None);
        };

        let root = isqrt(discriminant);
        if root * root != discriminant {
            return Ok(None);
        }

        // root + (s - 4), with s = 3 contributing -1
        let numerator = if s >= 4 {
            root + offset
        } else {
            match root.checked_sub(offset) {
                Some(n) => n,
                None => return Ok(None),
            }
        };
        let denominator = 2 * (s - 2);
        if numerator % denominator != 0 {
            return Ok(None);
        }

        let rank = usize::try_from(numerator / denominator)
            .map_err(|_| InvariantError::new(format!("rank of {x} exceeds usize")))?;
        let check = polygonal(self.sides, rank as u128)?;
        if u128::from(check) != x {
            return Err(InvariantError::new(format!(
                "rank {rank} of {x} reproduces {check} for {}-gonal numbers",
                self.sides
            ))
            .into());
        }
        Ok(Some(rank))
    }

    fn rank(&self, r: usize) -> Result<usize, SequenceError> {
        if let Some(size) = self.size() {
            if r >= size {
                return Err(SequenceError::invalid(format!(
                    "index {r} is outside a view of {size} elements"
                )));
            }
        }
        self.start
            .checked_add(r)
            .ok_or_else(|| SequenceError::invalid(format!("index {r} overflows")))
    }
}

/// `x·((s − 2)·x − (s − 4)) / 2`, checked against `u64`.
fn polygonal(sides: u64, x: u128) -> Result<u64, SequenceError> {
    let overflow = || SequenceError::invalid(format!("{sides}-gonal number of rank {x} exceeds u64"));
    if x == 0 {
        return Ok(0);
    }
    let s = u128::from(sides);
    // (s - 2)·x + 4 - s stays positive for x >= 1
    let factor = (s - 2)
        .checked_mul(x)
        .and_then(|v| v.checked_add(4))
        .and_then(|v| v.checked_sub(s))
        .ok_or_else(overflow)?;
    let doubled = x.checked_mul(factor).ok_or_else(overflow)?;
    u64::try_from(doubled / 2).map_err(|_| overflow())
}

impl Sequence<u64> for PolygonalNumber {
    fn catalog_id(&self) -> &str {
        match self.sides {
            3 => "A000217",
            4 => "A000290",
            5 => "A000326",
            6 => "A000384",
            7 => "A000566",
            8 => "A000567",
            _ => "",
        }
    }

    fn size(&self) -> Option<usize> {
        self.end.map(|end| end - self.start)
    }

    fn get(&self, r: usize) -> Result<u64, SequenceError> {
        polygonal(self.sides, self.rank(r)? as u128)
    }

    fn cursor(&self) -> SequenceCursor<u64> {
        let step = PolygonalStep::new(self.sides, self.start);
        match self.size() {
            Some(size) => ListCursor::bounded(step, 0, size).boxed(),
            None => ListCursor::new(step).boxed(),
        }
    }

    fn cursor_from(&self, start: usize) -> Result<SequenceCursor<u64>, SequenceError> {
        let step = PolygonalStep::new(self.sides, self.start);
        match self.size() {
            Some(size) if start > size => Err(SequenceError::invalid(format!(
                "start {start} is outside a view of {size} elements"
            ))),
            Some(size) => Ok(ListCursor::bounded(step, start, size).boxed()),
            None => Ok(ListCursor::starting_at(step, start).boxed()),
        }
    }
}

/// Stateless step evaluating `P(s, offset + i)` directly.
#[derive(Debug, Clone, Copy)]
pub struct PolygonalStep {
    sides: u64,
    offset: usize,
}

impl PolygonalStep {
    pub fn new(sides: u64, offset: usize) -> Self {
        Self { sides, offset }
    }

    fn at(&self, index: usize) -> Result<u64, SequenceError> {
        let rank = self
            .offset
            .checked_add(index)
            .ok_or_else(|| SequenceError::invalid(format!("index {index} overflows")))?;
        polygonal(self.sides, rank as u128)
    }
}

impl Step for PolygonalStep {
    type Item = u64;

    fn forward(&mut self, index: usize) -> Result<u64, SequenceError> {
        self.at(index)
    }

    fn backward(&mut self, index: usize) -> Result<u64, SequenceError> {
        self.at(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn all_types() -> [PolygonalNumber; 6] {
        [
            PolygonalNumber::triangular(),
            PolygonalNumber::square(),
            PolygonalNumber::pentagonal(),
            PolygonalNumber::hexagonal(),
            PolygonalNumber::heptagonal(),
            PolygonalNumber::octagonal(),
        ]
    }

    // ==============================================
    // Values
    // ==============================================

    mod values {
        use super::*;

        #[test]
        fn first_terms_of_each_type() {
            let expected: [[u64; 6]; 6] = [
                [0, 1, 3, 6, 10, 15],
                [0, 1, 4, 9, 16, 25],
                [0, 1, 5, 12, 22, 35],
                [0, 1, 6, 15, 28, 45],
                [0, 1, 7, 18, 34, 55],
                [0, 1, 8, 21, 40, 65],
            ];
            for (seq, want) in all_types().iter().zip(expected) {
                let got: Vec<u64> = (0..6).map(|r| seq.get(r).unwrap()).collect();
                assert_eq!(got, want, "{}-gonal", seq.sides());
            }
        }

        #[test]
        fn catalog_ids() {
            let types = all_types();
            let ids: Vec<&str> = types.iter().map(|s| s.catalog_id()).collect();
            assert_eq!(
                ids,
                ["A000217", "A000290", "A000326", "A000384", "A000566", "A000567"]
            );
            assert_eq!(PolygonalNumber::new(12).unwrap().catalog_id(), "");
        }

        #[test]
        fn rejects_degenerate_polygons() {
            assert!(matches!(
                PolygonalNumber::new(2),
                Err(SequenceError::InvalidArgument(_))
            ));
            assert!(PolygonalNumber::value(0, 4).is_err());
        }

        #[test]
        fn overflow_is_invalid_argument() {
            let square = PolygonalNumber::square();
            assert_eq!(square.get(4_294_967_295).unwrap(), 18_446_744_065_119_617_025);
            assert!(matches!(
                square.get(4_294_967_296),
                Err(SequenceError::InvalidArgument(_))
            ));
        }
    }

    // ==============================================
    // Membership
    // ==============================================

    mod membership {
        use super::*;

        #[test]
        fn non_members_are_none() {
            let pentagonal = PolygonalNumber::pentagonal();
            for x in [2u64, 3, 4, 6, 11, 13, 34, 36] {
                assert_eq!(pentagonal.index_of(x).unwrap(), None, "{x}");
                assert!(!pentagonal.contains(x).unwrap());
            }
            assert_eq!(PolygonalNumber::square().index_of(26).unwrap(), None);
        }

        #[test]
        fn index_is_relative_to_view() {
            let view = PolygonalNumber::with_range(6, 4, 8).unwrap();
            assert_eq!(view.get(0).unwrap(), 28);
            assert_eq!(view.index_of(28).unwrap(), Some(0));
            assert_eq!(view.index_of(15).unwrap(), None, "rank 3 is before the view");
            assert_eq!(view.index_of(120).unwrap(), None, "rank 8 is past the view");
            assert!(view.get(4).is_err());
        }

        #[test]
        fn bounded_cursor_stops_at_view_end() {
            let view = PolygonalNumber::with_range(4, 2, 5).unwrap();
            let mut cursor = view.cursor_from(1).unwrap();
            assert_eq!(cursor.next_element().unwrap(), 9);
            assert_eq!(cursor.next_element().unwrap(), 16);
            assert!(!cursor.has_next());
            assert_eq!(cursor.previous().unwrap(), 16);
            assert!(view.cursor_from(4).is_err());
        }

        proptest! {
            /// Property: index_of inverts get for every polygon type
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_index_of_inverts_get(sides in 3u64..20, rank in 0usize..100_000) {
                let seq = PolygonalNumber::new(sides).unwrap();
                let x = seq.get(rank).unwrap();
                prop_assert_eq!(seq.index_of(x).unwrap(), Some(rank));
            }

            /// Property: values between consecutive members are not members
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_gaps_are_not_members(sides in 3u64..12, rank in 1usize..5_000) {
                let seq = PolygonalNumber::new(sides).unwrap();
                let lo = seq.get(rank).unwrap();
                let hi = seq.get(rank + 1).unwrap();
                for x in (lo + 1)..hi.min(lo + 50) {
                    prop_assert_eq!(seq.index_of(x).unwrap(), None);
                }
            }
        }
    }
}
