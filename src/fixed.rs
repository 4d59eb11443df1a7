// Copyright © 2016–2018 University of Malta

// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public License
// as published by the Free Software Foundation, either version 3 of
// the License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License and a copy of the GNU General Public License along with
// this program. If not, see <http://www.gnu.org/licenses/>.

use crate::Integer;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};

/// An immutable integer that avoids allocating when it fits in an
/// `i32`.
///
/// A value that fits in an `i32` is always stored inline, so two equal
/// cells always have the same representation.
///
/// # Examples
///
/// ```rust
/// use radixnum::{FixedCell, Integer};
/// let a = FixedCell::from_i32(i32::MAX);
/// let b = a.add_i32(1);
/// assert!(!b.can_fit_in_i32());
/// assert_eq!(b.subtract_i32(1), a);
/// assert_eq!(b.to_integer(), Integer::from(1u64 << 31));
/// ```
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct FixedCell {
    inner: Cell,
}

#[derive(Clone, Eq, Hash, PartialEq)]
enum Cell {
    Small(i32),
    Big(Integer),
}

impl FixedCell {
    pub const ZERO: FixedCell = FixedCell::from_i32(0);
    pub const ONE: FixedCell = FixedCell::from_i32(1);

    #[inline]
    pub const fn from_i32(value: i32) -> FixedCell {
        FixedCell {
            inner: Cell::Small(value),
        }
    }

    pub fn from_i64(value: i64) -> FixedCell {
        match i32::try_from(value) {
            Ok(v) => FixedCell::from_i32(v),
            Err(_) => FixedCell {
                inner: Cell::Big(Integer::from(value)),
            },
        }
    }

    pub fn from_integer(value: Integer) -> FixedCell {
        match value.to_i32() {
            Some(v) => FixedCell::from_i32(v),
            None => FixedCell {
                inner: Cell::Big(value),
            },
        }
    }

    pub fn to_integer(&self) -> Integer {
        match self.inner {
            Cell::Small(v) => Integer::from(v),
            Cell::Big(ref b) => b.clone(),
        }
    }

    #[inline]
    pub fn can_fit_in_i32(&self) -> bool {
        matches!(self.inner, Cell::Small(_))
    }

    #[inline]
    pub fn to_i32(&self) -> Option<i32> {
        match self.inner {
            Cell::Small(v) => Some(v),
            Cell::Big(_) => None,
        }
    }

    pub fn sign(&self) -> i32 {
        match self.inner {
            Cell::Small(v) => v.signum(),
            Cell::Big(ref b) => b.sign(),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self.inner, Cell::Small(0))
    }

    pub fn is_even(&self) -> bool {
        match self.inner {
            Cell::Small(v) => v & 1 == 0,
            Cell::Big(ref b) => b.is_even(),
        }
    }

    pub fn add(&self, other: &FixedCell) -> FixedCell {
        match (&self.inner, &other.inner) {
            (&Cell::Small(a), &Cell::Small(b)) => FixedCell::from_i64(i64::from(a) + i64::from(b)),
            _ => FixedCell::from_integer(self.to_integer() + other.to_integer()),
        }
    }

    pub fn subtract(&self, other: &FixedCell) -> FixedCell {
        match (&self.inner, &other.inner) {
            (&Cell::Small(a), &Cell::Small(b)) => FixedCell::from_i64(i64::from(a) - i64::from(b)),
            _ => FixedCell::from_integer(self.to_integer() - other.to_integer()),
        }
    }

    pub fn add_i32(&self, value: i32) -> FixedCell {
        match self.inner {
            Cell::Small(a) => FixedCell::from_i64(i64::from(a) + i64::from(value)),
            Cell::Big(ref b) => FixedCell::from_integer(b + value),
        }
    }

    pub fn subtract_i32(&self, value: i32) -> FixedCell {
        match self.inner {
            Cell::Small(a) => FixedCell::from_i64(i64::from(a) - i64::from(value)),
            Cell::Big(ref b) => FixedCell::from_integer(b - value),
        }
    }

    pub fn add_integer(&self, value: &Integer) -> FixedCell {
        match value.to_i32() {
            Some(v) => self.add_i32(v),
            None => FixedCell::from_integer(self.to_integer() + value),
        }
    }

    pub fn multiply(&self, other: &FixedCell) -> FixedCell {
        match (&self.inner, &other.inner) {
            (&Cell::Small(a), &Cell::Small(b)) => FixedCell::from_i64(i64::from(a) * i64::from(b)),
            _ => FixedCell::from_integer(self.to_integer() * other.to_integer()),
        }
    }

    pub fn negate(&self) -> FixedCell {
        match self.inner {
            Cell::Small(a) => FixedCell::from_i64(-i64::from(a)),
            Cell::Big(ref b) => FixedCell::from_integer(-b),
        }
    }

    pub fn abs(&self) -> FixedCell {
        if self.sign() < 0 {
            self.negate()
        } else {
            self.clone()
        }
    }

    #[inline]
    pub fn increment(&self) -> FixedCell {
        self.add_i32(1)
    }

    #[inline]
    pub fn decrement(&self) -> FixedCell {
        self.subtract_i32(1)
    }

    pub fn compare_to(&self, other: &FixedCell) -> Ordering {
        match (&self.inner, &other.inner) {
            (Cell::Small(a), Cell::Small(b)) => a.cmp(b),
            // a big value is outside the i32 range
            (Cell::Small(_), Cell::Big(b)) => 0.cmp(&b.sign()),
            (Cell::Big(a), Cell::Small(_)) => a.sign().cmp(&0),
            (Cell::Big(a), Cell::Big(b)) => a.cmp(b),
        }
    }

    pub fn compare_to_i32(&self, value: i32) -> Ordering {
        match self.inner {
            Cell::Small(a) => a.cmp(&value),
            Cell::Big(ref b) => b.sign().cmp(&0),
        }
    }
}

impl Default for FixedCell {
    #[inline]
    fn default() -> FixedCell {
        FixedCell::ZERO
    }
}

impl Ord for FixedCell {
    #[inline]
    fn cmp(&self, other: &FixedCell) -> Ordering {
        self.compare_to(other)
    }
}

impl PartialOrd for FixedCell {
    #[inline]
    fn partial_cmp(&self, other: &FixedCell) -> Option<Ordering> {
        Some(self.compare_to(other))
    }
}

impl From<i32> for FixedCell {
    #[inline]
    fn from(value: i32) -> FixedCell {
        FixedCell::from_i32(value)
    }
}

impl From<Integer> for FixedCell {
    #[inline]
    fn from(value: Integer) -> FixedCell {
        FixedCell::from_integer(value)
    }
}

impl From<&FixedCell> for Integer {
    #[inline]
    fn from(value: &FixedCell) -> Integer {
        value.to_integer()
    }
}

impl Display for FixedCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.inner {
            Cell::Small(v) => Display::fmt(&v, f),
            Cell::Big(ref b) => Display::fmt(b, f),
        }
    }
}

impl Debug for FixedCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_normalized() {
        let big = FixedCell::from_integer(Integer::from(5));
        assert!(big.can_fit_in_i32());
        assert_eq!(big, FixedCell::from_i32(5));
        let min = FixedCell::from_i32(i32::MIN);
        let neg = min.negate();
        assert!(!neg.can_fit_in_i32());
        assert_eq!(neg.to_integer(), Integer::from(1u64 << 31));
        assert_eq!(neg.negate(), min);
        assert_eq!(min.abs(), neg);
    }

    #[test]
    fn check_compare() {
        let huge = FixedCell::from_integer(Integer::from(1) << 40u32);
        let tiny = huge.negate();
        let five = FixedCell::from_i32(5);
        assert_eq!(five.compare_to(&huge), Ordering::Less);
        assert_eq!(tiny.compare_to(&five), Ordering::Less);
        assert_eq!(huge.compare_to_i32(i32::MAX), Ordering::Greater);
        assert_eq!(tiny.compare_to_i32(i32::MIN), Ordering::Less);
        assert!(tiny < huge);
    }

    #[test]
    fn check_arith() {
        let a = FixedCell::from_i32(i32::MAX);
        let b = a.multiply(&a);
        assert_eq!(b.to_integer(), Integer::from(i64::from(i32::MAX) * i64::from(i32::MAX)));
        assert!(!b.is_even());
        assert!(a.increment().is_even());
        assert_eq!(a.add(&a).subtract(&a), a);
        assert_eq!(FixedCell::ZERO.decrement().sign(), -1);
        assert!(FixedCell::ZERO.is_zero());
    }
}
