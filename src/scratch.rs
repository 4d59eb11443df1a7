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

//! A mutable integer for allocation-free arithmetic in hot loops.

use crate::error::{Error, Result};
use crate::Integer;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};

/// A nonnegative integer in base 2^32 that grows in place.
#[derive(Clone, Debug, Eq, PartialEq)]
struct Buffer {
    words: Vec<u32>,
}

impl Buffer {
    fn from_u64(v: u64) -> Buffer {
        let mut words = Vec::with_capacity(4);
        words.push(v as u32);
        if v >> 32 != 0 {
            words.push((v >> 32) as u32);
        }
        Buffer { words }
    }

    fn trim(&mut self) {
        while self.words.len() > 1 && *self.words.last().unwrap_or(&1) == 0 {
            self.words.pop();
        }
    }

    fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    fn to_u64(&self) -> Option<u64> {
        match self.words.len() {
            0 => Some(0),
            1 => Some(u64::from(self.words[0])),
            2 => Some(u64::from(self.words[0]) | (u64::from(self.words[1]) << 32)),
            _ => None,
        }
    }

    /// `self = self * m + a`
    fn mul_add(&mut self, m: u32, a: u32) {
        let mut carry = u64::from(a);
        for w in self.words.iter_mut() {
            let p = u64::from(*w) * u64::from(m) + carry;
            *w = p as u32;
            carry = p >> 32;
        }
        if carry != 0 {
            self.words.push(carry as u32);
        }
        self.trim();
    }

    fn add(&mut self, a: u32) {
        self.mul_add(1, a);
    }

    fn add_buffer(&mut self, other: &Buffer) {
        if self.words.len() < other.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        let mut carry = 0u64;
        for i in 0..self.words.len() {
            let o = other.words.get(i).copied().unwrap_or(0);
            if o == 0 && carry == 0 && i >= other.words.len() {
                break;
            }
            let s = u64::from(self.words[i]) + u64::from(o) + carry;
            self.words[i] = s as u32;
            carry = s >> 32;
        }
        if carry != 0 {
            self.words.push(carry as u32);
        }
    }

    /// `self -= a`; returns false, leaving `self` untouched, if the
    /// result would be negative.
    fn sub(&mut self, a: u32) -> bool {
        if self.words.len() == 1 && self.words[0] < a {
            return false;
        }
        let mut borrow = a;
        for w in self.words.iter_mut() {
            let (d, b) = w.overflowing_sub(borrow);
            *w = d;
            borrow = u32::from(b);
            if borrow == 0 {
                break;
            }
        }
        self.trim();
        true
    }

    /// `self /= d`, returning the remainder.
    fn div(&mut self, d: u32) -> u32 {
        let mut rem = 0u64;
        for w in self.words.iter_mut().rev() {
            let cur = (rem << 32) | u64::from(*w);
            *w = (cur / u64::from(d)) as u32;
            rem = cur % u64::from(d);
        }
        self.trim();
        rem as u32
    }

    fn to_integer(&self) -> Integer {
        let bytes: Vec<u8> = self.words.iter().flat_map(|w| w.to_le_bytes()).collect();
        // the extra zero byte keeps the value nonnegative
        let mut bytes = bytes;
        bytes.push(0);
        Integer::from_bytes(&bytes, true)
    }
}

#[derive(Clone, Eq, PartialEq)]
enum Repr {
    Small(i32),
    Buffer(Buffer),
    Big(Integer),
}

/// A mutable integer that starts as a native `i32` and widens to a
/// growable nonnegative buffer, then to an [`Integer`], only when a
/// result no longer fits.
///
/// This is scratch space for parsing and exponent bookkeeping, where
/// many small in-place steps would otherwise allocate a new `Integer`
/// each time. A frozen instance panics on any in-place mutation.
///
/// # Examples
///
/// ```rust
/// use radixnum::{Integer, ScratchInt};
/// let mut s = ScratchInt::new(i32::MAX);
/// s.add_int(1).multiply(10);
/// assert_eq!(s.to_integer(), Integer::from(21_474_836_480_i64));
/// s.divide(10).unwrap();
/// assert_eq!(s.to_i32(), None);
/// s.subtract_int(1);
/// assert_eq!(s.to_i32(), Some(i32::MAX));
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct ScratchInt {
    repr: Repr,
    frozen: bool,
}

impl ScratchInt {
    #[inline]
    pub fn new(value: i32) -> ScratchInt {
        ScratchInt {
            repr: Repr::Small(value),
            frozen: false,
        }
    }

    pub fn from_i64(value: i64) -> ScratchInt {
        if let Ok(v) = i32::try_from(value) {
            ScratchInt::new(v)
        } else if value >= 0 {
            ScratchInt {
                repr: Repr::Buffer(Buffer::from_u64(value as u64)),
                frozen: false,
            }
        } else {
            ScratchInt::from_integer(Integer::from(value))
        }
    }

    pub fn from_integer(value: Integer) -> ScratchInt {
        let repr = match value.to_i32() {
            Some(v) => Repr::Small(v),
            None => Repr::Big(value),
        };
        ScratchInt {
            repr,
            frozen: false,
        }
    }

    /// Marks the value as shared; in-place mutation will panic.
    #[inline]
    pub fn freeze(mut self) -> ScratchInt {
        self.frozen = true;
        self
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[inline]
    fn check_frozen(&self) {
        assert!(!self.frozen, "mutation of a frozen ScratchInt");
    }

    fn set_big(&mut self, value: Integer) {
        self.repr = Repr::Big(value);
    }

    /// Adds a native integer in place.
    pub fn add_int(&mut self, value: i32) -> &mut Self {
        self.check_frozen();
        self.add_i64(i64::from(value));
        self
    }

    /// Subtracts a native integer in place.
    pub fn subtract_int(&mut self, value: i32) -> &mut Self {
        self.check_frozen();
        self.add_i64(-i64::from(value));
        self
    }

    fn add_i64(&mut self, value: i64) {
        match self.repr {
            Repr::Small(s) => {
                let sum = i64::from(s) + value;
                *self = ScratchInt::from_i64(sum);
            }
            Repr::Buffer(ref mut buf) => {
                if value >= 0 && value <= i64::from(u32::MAX) {
                    buf.add(value as u32);
                } else if value < 0 && -value <= i64::from(u32::MAX) && buf.sub((-value) as u32) {
                    // still nonnegative
                } else {
                    let big = buf.to_integer() + Integer::from(value);
                    self.set_big(big);
                }
            }
            Repr::Big(ref b) => {
                let big = b + Integer::from(value);
                self.set_big(big);
            }
        }
    }

    /// Adds another scratch value in place.
    pub fn add(&mut self, other: &ScratchInt) -> &mut Self {
        self.check_frozen();
        match (&mut self.repr, &other.repr) {
            (_, Repr::Small(v)) => {
                let v = i64::from(*v);
                self.add_i64(v);
            }
            (Repr::Buffer(a), Repr::Buffer(b)) => a.add_buffer(b),
            _ => {
                let sum = self.to_integer() + other.to_integer();
                self.set_big(sum);
            }
        }
        self
    }

    /// Subtracts another scratch value in place.
    pub fn subtract(&mut self, other: &ScratchInt) -> &mut Self {
        self.check_frozen();
        match other.repr {
            Repr::Small(v) => self.add_i64(-i64::from(v)),
            _ => {
                let diff = self.to_integer() - other.to_integer();
                self.set_big(diff);
            }
        }
        self
    }

    /// Adds an `Integer` in place.
    pub fn add_integer(&mut self, other: &Integer) -> &mut Self {
        self.check_frozen();
        match other.to_i32() {
            Some(v) => self.add_i64(i64::from(v)),
            None => {
                let sum = self.to_integer() + other;
                self.set_big(sum);
            }
        }
        self
    }

    /// Subtracts an `Integer` in place.
    pub fn subtract_integer(&mut self, other: &Integer) -> &mut Self {
        self.check_frozen();
        match other.to_i32() {
            Some(v) => self.add_i64(-i64::from(v)),
            None => {
                let diff = self.to_integer() - other;
                self.set_big(diff);
            }
        }
        self
    }

    /// Multiplies by a native integer in place.
    pub fn multiply(&mut self, value: i32) -> &mut Self {
        self.check_frozen();
        match self.repr {
            Repr::Small(s) => {
                let p = i64::from(s) * i64::from(value);
                *self = ScratchInt::from_i64(p);
            }
            Repr::Buffer(ref mut buf) if value >= 0 => buf.mul_add(value as u32, 0),
            _ => {
                let p = self.to_integer() * value;
                self.set_big(p);
            }
        }
        self
    }

    /// Divides by a native integer in place, truncating toward zero.
    ///
    /// This is the only operation that can narrow the representation.
    pub fn divide(&mut self, divisor: i32) -> Result<&mut Self> {
        self.check_frozen();
        if divisor == 0 {
            return Err(Error::DivisionByZero);
        }
        match self.repr {
            Repr::Small(s) => {
                let q = i64::from(s) / i64::from(divisor);
                *self = ScratchInt::from_i64(q);
            }
            Repr::Buffer(ref mut buf) if divisor > 0 => {
                buf.div(divisor as u32);
                if let Some(v) = buf.to_u64().and_then(|v| i32::try_from(v).ok()) {
                    self.repr = Repr::Small(v);
                }
            }
            _ => {
                let q = self.to_integer() / divisor;
                *self = ScratchInt::from_integer(q);
            }
        }
        Ok(self)
    }

    /// Remainder after division by a positive native integer; the
    /// result has the sign of the value.
    pub fn remainder_int(&self, divisor: i32) -> Result<i32> {
        if divisor == 0 {
            return Err(Error::DivisionByZero);
        }
        match self.repr {
            Repr::Small(s) => Ok((i64::from(s) % i64::from(divisor)) as i32),
            Repr::Buffer(ref buf) if divisor > 0 => {
                let mut copy = buf.clone();
                Ok(copy.div(divisor as u32) as i32)
            }
            _ => {
                let r = self.to_integer() % divisor;
                Ok(r.to_i32_wrapping())
            }
        }
    }

    pub fn increment(&mut self) -> &mut Self {
        self.add_int(1)
    }

    pub fn decrement(&mut self) -> &mut Self {
        self.add_int(-1)
    }

    pub fn negate(&mut self) -> &mut Self {
        self.check_frozen();
        match self.repr {
            Repr::Small(s) if s != i32::MIN => self.repr = Repr::Small(-s),
            Repr::Small(s) => {
                self.repr = Repr::Buffer(Buffer::from_u64(u64::from(s.unsigned_abs())));
            }
            Repr::Buffer(ref buf) if buf.is_zero() => {}
            Repr::Buffer(ref buf) => {
                let n = buf.to_integer().into_neg();
                self.set_big(n);
            }
            Repr::Big(ref mut b) => {
                let n = std::mem::take(b).into_neg();
                *b = n;
            }
        }
        self
    }

    pub fn abs(&mut self) -> &mut Self {
        if self.sign() < 0 {
            self.negate();
        }
        self
    }

    /// Returns -1, 0 or 1.
    pub fn sign(&self) -> i32 {
        match self.repr {
            Repr::Small(s) => s.signum(),
            Repr::Buffer(ref b) => {
                if b.is_zero() {
                    0
                } else {
                    1
                }
            }
            Repr::Big(ref b) => b.sign(),
        }
    }

    #[inline]
    pub fn is_value_zero(&self) -> bool {
        self.sign() == 0
    }

    pub fn compare_to_int(&self, value: i32) -> Ordering {
        match self.repr {
            Repr::Small(s) => s.cmp(&value),
            Repr::Buffer(ref b) => match b.to_u64() {
                Some(v) => i64::try_from(v).map_or(Ordering::Greater, |v| v.cmp(&i64::from(value))),
                None => Ordering::Greater,
            },
            Repr::Big(ref b) => b.cmp(&Integer::from(value)),
        }
    }

    pub fn compare_to(&self, other: &ScratchInt) -> Ordering {
        match (&self.repr, &other.repr) {
            (Repr::Small(a), Repr::Small(b)) => a.cmp(b),
            (_, Repr::Small(b)) => self.compare_to_int(*b),
            (Repr::Small(a), _) => other.compare_to_int(*a).reverse(),
            _ => self.to_integer().cmp(&other.to_integer()),
        }
    }

    pub fn can_fit_in_i32(&self) -> bool {
        self.to_i32().is_some()
    }

    pub fn to_i32(&self) -> Option<i32> {
        match self.repr {
            Repr::Small(s) => Some(s),
            Repr::Buffer(ref b) => b.to_u64().and_then(|v| i32::try_from(v).ok()),
            Repr::Big(ref b) => b.to_i32(),
        }
    }

    pub fn to_integer(&self) -> Integer {
        match self.repr {
            Repr::Small(s) => Integer::from(s),
            Repr::Buffer(ref b) => b.to_integer(),
            Repr::Big(ref b) => b.clone(),
        }
    }

    /// Returns the tier name, for diagnostics.
    pub(crate) fn tier(&self) -> &'static str {
        match self.repr {
            Repr::Small(_) => "small",
            Repr::Buffer(_) => "buffer",
            Repr::Big(_) => "big",
        }
    }
}

impl From<i32> for ScratchInt {
    #[inline]
    fn from(value: i32) -> ScratchInt {
        ScratchInt::new(value)
    }
}

impl From<Integer> for ScratchInt {
    #[inline]
    fn from(value: Integer) -> ScratchInt {
        ScratchInt::from_integer(value)
    }
}

impl Display for ScratchInt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.repr {
            Repr::Small(s) => Display::fmt(&s, f),
            _ => Display::fmt(&self.to_integer(), f),
        }
    }
}

impl Debug for ScratchInt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ScratchInt({}, {})", self.tier(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_widening() {
        let mut s = ScratchInt::new(i32::MAX);
        assert_eq!(s.tier(), "small");
        s.add_int(1);
        assert_eq!(s.tier(), "buffer");
        s.multiply(1 << 20);
        assert_eq!(s.tier(), "buffer");
        assert_eq!(s.to_integer(), Integer::from(1i64 << 51));
        s.multiply(-1);
        assert_eq!(s.tier(), "big");
        assert_eq!(s.to_integer(), Integer::from(-(1i64 << 51)));
    }

    #[test]
    fn check_negative_overflow_goes_big() {
        let mut s = ScratchInt::new(i32::MIN);
        s.subtract_int(1);
        assert_eq!(s.tier(), "big");
        assert_eq!(s.to_integer(), i64::from(i32::MIN) - 1);
        let mut m = ScratchInt::new(i32::MIN);
        m.negate();
        assert_eq!(m.to_integer(), 2_147_483_648_i64);
        assert_eq!(m.tier(), "buffer");
    }

    #[test]
    fn check_divide_narrows() {
        let mut s = ScratchInt::from_i64(10_000_000_000);
        assert_eq!(s.tier(), "buffer");
        s.divide(10).unwrap();
        assert_eq!(s.tier(), "small");
        assert_eq!(s.to_i32(), Some(1_000_000_000));
        let mut b = ScratchInt::from_integer(Integer::from(-1) << 80u32);
        b.divide(1 << 30).unwrap().divide(1 << 30).unwrap().divide(1 << 19).unwrap();
        assert_eq!(b.tier(), "small");
        assert_eq!(b.to_i32(), Some(-2));
        assert_eq!(s.divide(0).unwrap_err(), Error::DivisionByZero);
    }

    #[test]
    fn check_compare_and_remainder() {
        let s = ScratchInt::from_i64(1 << 40);
        assert_eq!(s.compare_to_int(i32::MAX), Ordering::Greater);
        assert_eq!(ScratchInt::new(-5).compare_to(&s), Ordering::Less);
        assert_eq!(s.remainder_int(1000).unwrap(), ((1i64 << 40) % 1000) as i32);
        let mut t = s.clone();
        t.subtract(&s);
        assert!(t.is_value_zero());
    }

    #[test]
    fn check_negate_and_zero_keep_tier() {
        let mut b = ScratchInt::from_integer(Integer::from(1i64 << 40));
        assert_eq!(b.tier(), "big");
        b.negate();
        assert_eq!(b.tier(), "big");
        assert_eq!(b.to_integer(), -(1i64 << 40));
        b.negate();
        assert_eq!(b.tier(), "big");
        assert_eq!(b.to_integer(), 1i64 << 40);
        b.multiply(0);
        assert_eq!(b.tier(), "big");
        assert!(b.is_value_zero());

        let mut buf = ScratchInt::from_i64(1 << 40);
        assert_eq!(buf.tier(), "buffer");
        buf.multiply(0);
        assert_eq!(buf.tier(), "buffer");
        assert!(buf.is_value_zero());
        assert_eq!(buf.to_integer(), 0);
        buf.add_int(7);
        assert_eq!(buf.to_i32(), Some(7));

        let mut n = ScratchInt::from_i64(1 << 40);
        n.negate();
        assert_eq!(n.tier(), "big");
        assert_eq!(n.to_integer(), -(1i64 << 40));
    }

    #[test]
    #[should_panic(expected = "frozen")]
    fn check_frozen() {
        let mut s = ScratchInt::new(1).freeze();
        s.increment();
    }
}
