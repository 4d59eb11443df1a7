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

use crate::error::{Error, ParseErrorKind, Result};
use crate::integer::limbs::{self, Limb, LIMB_BITS};
use crate::integer::{digits, division, gcd, mul, sqrt};
use std::cmp::Ordering;

/// An arbitrary-precision integer.
///
/// The value is stored as a sign and a magnitude of base-65536 limbs,
/// least significant first. There is no negative zero, and the
/// magnitude never has a zero most significant limb, so two equal
/// values always have the same representation.
///
/// An `Integer` is never modified in place by the arithmetic methods;
/// every operation returns a new value.
///
/// # Examples
///
/// ```rust
/// use radixnum::Integer;
/// let a = Integer::from(123_456_789_012_345_i64);
/// let b = a * 2;
/// assert_eq!(b, "246913578024690".parse::<Integer>().unwrap());
/// ```
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct Integer {
    negative: bool,
    words: Vec<Limb>,
}

impl Integer {
    /// Constructs a new arbitrary-precision integer with value 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// let i = Integer::new();
    /// assert_eq!(i, 0);
    /// ```
    #[inline]
    pub const fn new() -> Integer {
        Integer {
            negative: false,
            words: Vec::new(),
        }
    }

    /// Builds a value from a sign and an untrimmed magnitude.
    pub(crate) fn from_limbs(negative: bool, mut words: Vec<Limb>) -> Integer {
        limbs::trim(&mut words);
        let negative = negative && !words.is_empty();
        Integer { negative, words }
    }

    #[inline]
    pub(crate) fn limbs(&self) -> &[Limb] {
        &self.words
    }

    /// Returns `true` if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns `true` if the value is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Compares to zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// use std::cmp::Ordering;
    /// assert_eq!(Integer::from(-5).cmp0(), Ordering::Less);
    /// assert_eq!(Integer::from(0).cmp0(), Ordering::Equal);
    /// ```
    #[inline]
    pub fn cmp0(&self) -> Ordering {
        if self.words.is_empty() {
            Ordering::Equal
        } else if self.negative {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Returns -1, 0 or 1 according to the sign of the value.
    #[inline]
    pub fn sign(&self) -> i32 {
        self.cmp0() as i32
    }

    #[inline]
    pub fn is_even(&self) -> bool {
        self.words.first().map_or(true, |&w| w & 1 == 0)
    }

    /// Returns `true` if the absolute value is a power of two.
    pub fn is_power_of_two(&self) -> bool {
        match self.words.split_last() {
            None => false,
            Some((top, rest)) => top.is_power_of_two() && rest.iter().all(|&w| w == 0),
        }
    }

    /// Returns the number of bits needed to represent the absolute
    /// value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// assert_eq!(Integer::from(0).significant_bits(), 0);
    /// assert_eq!(Integer::from(-255).significant_bits(), 8);
    /// assert_eq!(Integer::from(256).significant_bits(), 9);
    /// ```
    #[inline]
    pub fn significant_bits(&self) -> u64 {
        limbs::bit_length(&self.words)
    }

    /// Returns the index of the lowest set bit of the absolute value,
    /// or `None` for zero.
    #[inline]
    pub fn lowest_set_bit(&self) -> Option<u64> {
        limbs::trailing_zeros(&self.words)
    }

    /// Returns bit `index` of the two's-complement representation.
    pub fn get_bit(&self, index: u64) -> bool {
        let word = (index / u64::from(LIMB_BITS)) as usize;
        let bit = (index % u64::from(LIMB_BITS)) as u32;
        if !self.negative {
            return self
                .words
                .get(word)
                .map_or(false, |&w| (w >> bit) & 1 != 0);
        }
        // -x == !(x - 1)
        let m = limbs::sub(&self.words, &[1]);
        let w = m.get(word).copied().unwrap_or(0);
        (w >> bit) & 1 == 0
    }

    /// Returns the number of decimal digits of the absolute value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// assert_eq!(Integer::from(0).digit_count(), 1);
    /// assert_eq!(Integer::from(-10).digit_count(), 2);
    /// ```
    #[inline]
    pub fn digit_count(&self) -> u64 {
        digits::digit_count(&self.words)
    }

    /// Returns the absolute value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// let i = Integer::from(i32::MIN);
    /// assert_eq!(i.abs(), "2147483648".parse::<Integer>().unwrap());
    /// ```
    #[inline]
    pub fn abs(&self) -> Integer {
        Integer {
            negative: false,
            words: self.words.clone(),
        }
    }

    #[inline]
    pub(crate) fn into_abs(mut self) -> Integer {
        self.negative = false;
        self
    }

    #[inline]
    pub(crate) fn into_neg(mut self) -> Integer {
        self.negative = !self.negative && !self.words.is_empty();
        self
    }

    /// Returns -1, 0 or 1 as an `Integer`.
    pub fn signum(&self) -> Integer {
        Integer::from(self.sign())
    }

    pub(crate) fn add_ref(&self, rhs: &Integer) -> Integer {
        let (a, b) = (&self.words, &rhs.words);
        if a.len() <= 2 && b.len() <= 2 {
            let x = self.small_value();
            let y = rhs.small_value();
            return Integer::from(x + y);
        }
        if self.negative == rhs.negative {
            return Integer::from_limbs(self.negative, limbs::add(a, b));
        }
        match limbs::compare(a, b) {
            Ordering::Equal => Integer::new(),
            Ordering::Greater => Integer::from_limbs(self.negative, limbs::sub(a, b)),
            Ordering::Less => Integer::from_limbs(rhs.negative, limbs::sub(b, a)),
        }
    }

    pub(crate) fn sub_ref(&self, rhs: &Integer) -> Integer {
        let (a, b) = (&self.words, &rhs.words);
        if a.len() <= 2 && b.len() <= 2 {
            return Integer::from(self.small_value() - rhs.small_value());
        }
        if self.negative != rhs.negative {
            return Integer::from_limbs(self.negative, limbs::add(a, b));
        }
        match limbs::compare(a, b) {
            Ordering::Equal => Integer::new(),
            Ordering::Greater => Integer::from_limbs(self.negative, limbs::sub(a, b)),
            Ordering::Less => Integer::from_limbs(!self.negative, limbs::sub(b, a)),
        }
    }

    pub(crate) fn mul_ref(&self, rhs: &Integer) -> Integer {
        let (a, b) = (&self.words, &rhs.words);
        if a.len() == 1 && b.len() == 1 {
            let p = u32::from(a[0]) * u32::from(b[0]);
            return Integer::from_limbs(self.negative != rhs.negative, limbs::from_u64(u64::from(p)));
        }
        let product = if std::ptr::eq(self, rhs) {
            mul::square(a)
        } else {
            mul::mul(a, b)
        };
        Integer::from_limbs(self.negative != rhs.negative, product)
    }

    /// Value of an integer of at most two limbs.
    #[inline]
    fn small_value(&self) -> i64 {
        let m = limbs::low_u64(&self.words) as i64;
        if self.negative {
            -m
        } else {
            m
        }
    }

    /// Returns the square of the value.
    #[inline]
    pub fn square(&self) -> Integer {
        Integer::from_limbs(false, mul::square(&self.words))
    }

    /// Divides and returns the truncated quotient and the remainder,
    /// which has the sign of the dividend.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// let (q, r) = Integer::from(100).div_rem(&Integer::from(7)).unwrap();
    /// assert_eq!((q, r), (Integer::from(14), Integer::from(2)));
    /// let (q, r) = Integer::from(-100).div_rem(&Integer::from(7)).unwrap();
    /// assert_eq!((q, r), (Integer::from(-14), Integer::from(-2)));
    /// ```
    pub fn div_rem(&self, divisor: &Integer) -> Result<(Integer, Integer)> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(self.div_rem_nonzero(divisor))
    }

    /// Like `div_rem`, for divisors already known to be nonzero.
    pub(crate) fn div_rem_nonzero(&self, divisor: &Integer) -> (Integer, Integer) {
        let (q, r) = division::div_rem(&self.words, &divisor.words);
        (
            Integer::from_limbs(self.negative != divisor.negative, q),
            Integer::from_limbs(self.negative, r),
        )
    }

    /// Truncated division, or `Err(DivisionByZero)`.
    #[inline]
    pub fn checked_div(&self, divisor: &Integer) -> Result<Integer> {
        self.div_rem(divisor).map(|(q, _)| q)
    }

    /// Remainder of truncated division, or `Err(DivisionByZero)`.
    pub fn checked_rem(&self, divisor: &Integer) -> Result<Integer> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if divisor.words.len() == 1 {
            let r = division::rem_single(&self.words, divisor.words[0]);
            return Ok(Integer::from_limbs(self.negative, vec![r]));
        }
        self.div_rem(divisor).map(|(_, r)| r)
    }

    /// Remainder with the sign of the divisor's absolute value, that
    /// is, always nonnegative.
    pub fn modulo(&self, divisor: &Integer) -> Result<Integer> {
        let r = self.checked_rem(divisor)?;
        if r.negative {
            Ok(r.add_ref(&divisor.abs()))
        } else {
            Ok(r)
        }
    }

    /// Divides by a small divisor, returning the quotient and the
    /// remainder of the magnitude.
    pub(crate) fn div_rem_small(&self, d: Limb) -> (Integer, Limb) {
        let (q, r) = division::div_rem_single(&self.words, d);
        (Integer::from_limbs(self.negative, q), r)
    }

    /// Raises to a power.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// assert_eq!(Integer::from(-3).pow(3), -27);
    /// assert_eq!(Integer::from(10).pow(20), "100000000000000000000".parse::<Integer>().unwrap());
    /// ```
    pub fn pow(&self, exp: u64) -> Integer {
        let negative = self.negative && exp & 1 != 0;
        Integer::from_limbs(negative, digits::pow(&self.words, exp))
    }

    /// Computes `self^exp mod modulus`, with the result in
    /// `0..|modulus|`.
    pub fn mod_pow(&self, exp: &Integer, modulus: &Integer) -> Result<Integer> {
        if modulus.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if exp.negative {
            return Err(Error::ArgumentInvalid("negative exponent".into()));
        }
        let mut result = Integer::from(1).modulo(modulus)?;
        let mut base = self.modulo(modulus)?;
        let bits = exp.significant_bits();
        for i in 0..bits {
            if exp.get_bit(i) {
                result = result.mul_ref(&base).modulo(modulus)?;
            }
            if i + 1 < bits {
                base = base.square().modulo(modulus)?;
            }
        }
        Ok(result)
    }

    /// Greatest common divisor; the result is never negative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// assert_eq!(Integer::from(-12).gcd(&Integer::from(18)), 6);
    /// assert_eq!(Integer::from(-12).gcd(&Integer::from(0)), 12);
    /// ```
    pub fn gcd(&self, other: &Integer) -> Integer {
        Integer::from_limbs(false, gcd::gcd(&self.words, &other.words))
    }

    /// Floor square root.
    ///
    /// Fails with `ArgumentInvalid` for a negative value.
    pub fn sqrt(&self) -> Result<Integer> {
        if self.negative {
            return Err(Error::ArgumentInvalid("square root of negative".into()));
        }
        Ok(Integer::from_limbs(false, sqrt::sqrt(&self.words)))
    }

    /// Floor square root and remainder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// let (s, r) = Integer::from(23).sqrt_rem().unwrap();
    /// assert_eq!((s, r), (Integer::from(4), Integer::from(7)));
    /// ```
    pub fn sqrt_rem(&self) -> Result<(Integer, Integer)> {
        if self.negative {
            return Err(Error::ArgumentInvalid("square root of negative".into()));
        }
        let (s, r) = sqrt::sqrt_rem(&self.words);
        Ok((Integer::from_limbs(false, s), Integer::from_limbs(false, r)))
    }

    /// Shifts left by `bits`.
    pub fn shl_bits(&self, bits: u64) -> Integer {
        Integer::from_limbs(self.negative, limbs::shl_bits(&self.words, bits))
    }

    /// Arithmetic right shift by `bits`, rounding toward negative
    /// infinity.
    pub fn shr_bits(&self, bits: u64) -> Integer {
        if !self.negative {
            return Integer::from_limbs(false, limbs::shr_bits(&self.words, bits));
        }
        // -((|a| - 1) >> n) - 1
        let m = limbs::sub(&self.words, &[1]);
        let shifted = limbs::shr_bits(&m, bits);
        Integer::from_limbs(true, limbs::add(&shifted, &[1]))
    }

    /// The lowest `bits` bits of the magnitude.
    pub(crate) fn low_bits(&self, bits: u64) -> Integer {
        Integer::from_limbs(false, limbs::low_bits(&self.words, bits))
    }

    /// Two's-complement limbs, sign extended to `len` limbs.
    fn to_twos(&self, len: usize) -> Vec<Limb> {
        let mut out = self.words.clone();
        out.resize(len, 0);
        if self.negative {
            for w in out.iter_mut() {
                *w = !*w;
            }
            limbs::add_in_place(&mut out, &[1]);
        }
        out
    }

    fn from_twos(mut words: Vec<Limb>) -> Integer {
        let negative = words.last().map_or(false, |&w| w & 0x8000 != 0);
        if negative {
            for w in words.iter_mut() {
                *w = !*w;
            }
            limbs::add_in_place(&mut words, &[1]);
        }
        Integer::from_limbs(negative, words)
    }

    pub(crate) fn bitwise(&self, rhs: &Integer, op: fn(Limb, Limb) -> Limb) -> Integer {
        let len = self.words.len().max(rhs.words.len()) + 1;
        let a = self.to_twos(len);
        let b = rhs.to_twos(len);
        let words = a.iter().zip(b.iter()).map(|(&x, &y)| op(x, y)).collect();
        Integer::from_twos(words)
    }

    /// Bitwise complement, that is `-self - 1`.
    pub fn not(&self) -> Integer {
        Integer::from(-1).sub_ref(self)
    }

    /// Converts to a string with the given radix.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// assert_eq!(Integer::from(-255).to_string_radix(16).unwrap(), "-ff");
    /// assert_eq!(Integer::from(0).to_string_radix(2).unwrap(), "0");
    /// ```
    pub fn to_string_radix(&self, radix: u32) -> Result<String> {
        if !(2..=36).contains(&radix) {
            return Err(Error::ArgumentInvalid(format!("radix {} out of range", radix)));
        }
        let mut s = String::new();
        self.append_to_string(&mut s, radix);
        Ok(s)
    }

    pub(crate) fn append_to_string(&self, s: &mut String, radix: u32) {
        if self.negative {
            s.push('-');
        }
        digits::write_radix(&self.words, radix, s);
    }

    /// Parses an `Integer` using the given radix.
    ///
    /// The string can start with an optional minus or plus sign.
    /// Whitespace is not allowed anywhere in the string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// let i = Integer::from_str_radix("-ff", 16).unwrap();
    /// assert_eq!(i, -0xff);
    /// assert!(Integer::from_str_radix("12", 2).is_err());
    /// ```
    pub fn from_str_radix(src: &str, radix: u32) -> Result<Integer> {
        Integer::from_bytes_radix(src.as_bytes(), radix)
    }

    pub(crate) fn from_bytes_radix(bytes: &[u8], radix: u32) -> Result<Integer> {
        if bytes.is_empty() {
            return Err(Error::format(ParseErrorKind::Empty));
        }
        let (negative, digits) = match bytes[0] {
            b'-' => (true, &bytes[1..]),
            b'+' => (false, &bytes[1..]),
            _ => (false, bytes),
        };
        let words = digits::parse_radix(digits, radix).map_err(Error::format)?;
        Ok(Integer::from_limbs(negative, words))
    }

    /// Returns the two's-complement representation with the minimum
    /// number of bytes needed to hold the sign bit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// assert_eq!(Integer::from(128).to_bytes(true), [0x80, 0x00]);
    /// assert_eq!(Integer::from(-128).to_bytes(false), [0x80]);
    /// assert_eq!(Integer::from(0).to_bytes(true), [0x00]);
    /// ```
    pub fn to_bytes(&self, little_endian: bool) -> Vec<u8> {
        let len = self.words.len() + 1;
        let twos = self.to_twos(len);
        let mut bytes: Vec<u8> = twos
            .iter()
            .flat_map(|&w| [w as u8, (w >> 8) as u8])
            .collect();
        let fill = if self.negative { 0xff } else { 0x00 };
        while bytes.len() > 1 {
            let top = bytes[bytes.len() - 1];
            let next = bytes[bytes.len() - 2];
            if top == fill && (next & 0x80 != 0) == self.negative {
                bytes.pop();
            } else {
                break;
            }
        }
        if !little_endian {
            bytes.reverse();
        }
        bytes
    }

    /// Builds a value from its two's-complement representation.
    ///
    /// An empty slice is zero.
    pub fn from_bytes(bytes: &[u8], little_endian: bool) -> Integer {
        if bytes.is_empty() {
            return Integer::new();
        }
        let mut le = bytes.to_vec();
        if !little_endian {
            le.reverse();
        }
        let fill = if le[le.len() - 1] & 0x80 != 0 { 0xff } else { 0x00 };
        if le.len() % 2 == 1 {
            le.push(fill);
        }
        let words = le
            .chunks(2)
            .map(|c| Limb::from(c[0]) | (Limb::from(c[1]) << 8))
            .collect();
        Integer::from_twos(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_canonical_zero() {
        let z = Integer::from(5).sub_ref(&Integer::from(5));
        assert_eq!(z, Integer::new());
        assert!(!z.is_negative());
        let big = Integer::from(1).shl_bits(100);
        let z = big.sub_ref(&big);
        assert!(z.limbs().is_empty());
        assert!(!Integer::from_limbs(true, vec![0, 0]).is_negative());
    }

    #[test]
    fn check_div_rem_signs() {
        for &(a, b) in &[(7, 2), (-7, 2), (7, -2), (-7, -2), (0, 3)] {
            let (q, r) = Integer::from(a).div_rem(&Integer::from(b)).unwrap();
            assert_eq!(q, a / b);
            assert_eq!(r, a % b);
        }
        assert_eq!(Integer::from(1).div_rem(&Integer::new()), Err(Error::DivisionByZero));
    }

    #[test]
    fn check_shifts() {
        assert_eq!(Integer::from(-7).shr_bits(1), -4);
        assert_eq!(Integer::from(-8).shr_bits(3), -1);
        assert_eq!(Integer::from(-1).shr_bits(100), -1);
        assert_eq!(Integer::from(7).shr_bits(1), 3);
        assert_eq!(Integer::from(-3).shl_bits(70).shr_bits(70), -3);
    }

    #[test]
    fn check_bits() {
        assert!(Integer::from(-1).get_bit(1000));
        assert!(!Integer::from(-2).get_bit(0));
        assert!(Integer::from(-2).get_bit(1));
        assert!(Integer::from(5).get_bit(2));
        assert!(Integer::from(1).shl_bits(64).is_power_of_two());
        assert!(!Integer::from(3).is_power_of_two());
        assert_eq!(Integer::from(0x50).lowest_set_bit(), Some(4));
    }

    #[test]
    fn check_bytes() {
        for &v in &[0i64, 1, -1, 127, 128, -128, -129, 255, 256, -65536, i64::MIN, i64::MAX] {
            let i = Integer::from(v);
            assert_eq!(i.to_bytes(true), v.to_le_bytes()[..i.to_bytes(true).len()].to_vec());
            assert_eq!(Integer::from_bytes(&i.to_bytes(true), true), i);
            assert_eq!(Integer::from_bytes(&i.to_bytes(false), false), i);
        }
        assert_eq!(Integer::from_bytes(&[0xff, 0xff, 0xff], true), -1);
        assert_eq!(Integer::from_bytes(&[0x01, 0x00], false), 256);
    }

    #[test]
    fn check_mod_pow() {
        let r = Integer::from(4)
            .mod_pow(&Integer::from(13), &Integer::from(497))
            .unwrap();
        assert_eq!(r, 445);
        let r = Integer::from(-2)
            .mod_pow(&Integer::from(3), &Integer::from(5))
            .unwrap();
        assert_eq!(r, 2);
    }

    #[test]
    fn check_sqrt() {
        assert!(Integer::from(-1).sqrt().is_err());
        let big = Integer::from(10).pow(40);
        assert_eq!(big.sqrt().unwrap(), Integer::from(10).pow(20));
    }
}
