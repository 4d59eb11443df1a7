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

use crate::context::{Context, Round};
use crate::decimal::DecimalHelper;
use crate::error::{Error, Result};
use crate::radix::{flags, powers, RadixMath};
use crate::{FixedCell, Integer};

pub(crate) const MATH: RadixMath<DecimalHelper> = RadixMath::new();

/// An arbitrary-precision decimal floating-point number.
///
/// A finite value is ±mantissa × 10<sup>exponent</sup>, where the
/// mantissa is a nonnegative integer. The mantissa and exponent are not
/// normalized, so `1.50` and `1.5` are distinct values that compare
/// numerically equal. There are also signed zeros, signed infinities
/// and quiet and signaling NaNs, each NaN with an optional integer
/// payload.
///
/// Operations without a [`Context`] are exact: `add`, `subtract` and
/// `multiply` always are, and `divide` gives NaN when the quotient has
/// no terminating decimal expansion. The `_ctx` variants round to the
/// context and report conditions through its flags and traps.
///
/// Equality, hashing and [`Ord`] look at the representation, not just
/// the numeric value; [`Ord`] is the IEEE 754 total order. Use
/// [`compare_to`](Decimal::compare_to) for numeric comparison.
///
/// # Examples
///
/// ```rust
/// use radixnum::Decimal;
/// let a: Decimal = "1.50".parse().unwrap();
/// let b: Decimal = "2.5".parse().unwrap();
/// let sum = &a + &b;
/// assert_eq!(sum.to_string(), "4.00");
/// assert_eq!(sum.exponent(), -2);
/// ```
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Decimal {
    pub(crate) mantissa: FixedCell,
    pub(crate) exponent: FixedCell,
    pub(crate) flags: u8,
    pub(crate) sign: i8,
}

const fn cached_sign(mantissa_zero: bool, fl: u8) -> i8 {
    if fl & flags::SPECIAL == 0 && mantissa_zero {
        0
    } else if fl & flags::NEGATIVE != 0 {
        -1
    } else {
        1
    }
}

impl Decimal {
    pub const ZERO: Decimal = Decimal::from_const(0, 0, 0);
    pub const NEGATIVE_ZERO: Decimal = Decimal::from_const(0, 0, flags::NEGATIVE);
    pub const ONE: Decimal = Decimal::from_const(1, 0, 0);
    pub const TEN: Decimal = Decimal::from_const(10, 0, 0);
    pub const NAN: Decimal = Decimal::from_const(0, 0, flags::QUIET_NAN);
    pub const SIGNALING_NAN: Decimal = Decimal::from_const(0, 0, flags::SIGNALING_NAN);
    pub const POSITIVE_INFINITY: Decimal = Decimal::from_const(0, 0, flags::INFINITY);
    pub const NEGATIVE_INFINITY: Decimal =
        Decimal::from_const(0, 0, flags::INFINITY | flags::NEGATIVE);

    const fn from_const(mantissa: i32, exponent: i32, fl: u8) -> Decimal {
        Decimal {
            mantissa: FixedCell::from_i32(mantissa),
            exponent: FixedCell::from_i32(exponent),
            flags: fl,
            sign: cached_sign(mantissa == 0, fl),
        }
    }

    /// Builds a value from an unsigned mantissa.
    pub(crate) fn from_raw(mantissa: FixedCell, exponent: FixedCell, fl: u8) -> Decimal {
        debug_assert!(mantissa.sign() >= 0);
        let sign = cached_sign(mantissa.is_zero(), fl);
        Decimal {
            mantissa,
            exponent,
            flags: fl,
            sign,
        }
    }

    pub(crate) fn from_parts(mantissa: Integer, exponent: Integer, negative: bool) -> Decimal {
        let fl = if negative { flags::NEGATIVE } else { 0 };
        Decimal::from_raw(
            FixedCell::from_integer(mantissa),
            FixedCell::from_integer(exponent),
            fl,
        )
    }

    /// Creates mantissa × 10<sup>exponent</sup> from a signed mantissa.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::{Decimal, Integer};
    /// let d = Decimal::create(&Integer::from(-314), &Integer::from(-2));
    /// assert_eq!(d.to_string(), "-3.14");
    /// ```
    pub fn create(mantissa: &Integer, exponent: &Integer) -> Decimal {
        Decimal::from_parts(mantissa.abs(), exponent.clone(), mantissa.is_negative())
    }

    /// Creates mantissa × 10<sup>exponent</sup> from native integers.
    pub fn create_i64(mantissa: i64, exponent: i32) -> Decimal {
        Decimal::from_raw(
            FixedCell::from_integer(Integer::from(mantissa).into_abs()),
            FixedCell::from_i32(exponent),
            if mantissa < 0 { flags::NEGATIVE } else { 0 },
        )
    }

    /// Creates a NaN with a diagnostic payload.
    ///
    /// Fails with `ArgumentInvalid` if the payload is negative.
    pub fn create_nan(payload: &Integer, signaling: bool, negative: bool) -> Result<Decimal> {
        if payload.is_negative() {
            return Err(Error::ArgumentInvalid("NaN payload is negative".into()));
        }
        let mut fl = if signaling {
            flags::SIGNALING_NAN
        } else {
            flags::QUIET_NAN
        };
        if negative {
            fl |= flags::NEGATIVE;
        }
        Ok(Decimal::from_raw(
            FixedCell::from_integer(payload.clone()),
            FixedCell::ZERO,
            fl,
        ))
    }

    /// Creates a NaN whose payload is cut to the low digits that fit
    /// the context precision.
    pub fn create_nan_ctx(
        payload: &Integer,
        signaling: bool,
        negative: bool,
        ctx: &Context,
    ) -> Result<Decimal> {
        let mut payload = payload.clone();
        let p = ctx.precision();
        if p > 0 && !payload.is_negative() && payload.digit_count() > p {
            payload = payload.div_rem_nonzero(&powers::pow10(p)).1;
        }
        Decimal::create_nan(&payload, signaling, negative)
    }

    /// The unsigned mantissa; for a NaN this is the payload.
    #[inline]
    pub fn unsigned_mantissa(&self) -> Integer {
        self.mantissa.to_integer()
    }

    /// The mantissa with the sign applied.
    pub fn mantissa(&self) -> Integer {
        let m = self.mantissa.to_integer();
        if self.is_negative() {
            -m
        } else {
            m
        }
    }

    #[inline]
    pub fn exponent(&self) -> Integer {
        self.exponent.to_integer()
    }

    #[inline]
    pub fn is_nan(&self) -> bool {
        self.flags & flags::NAN != 0
    }

    #[inline]
    pub fn is_quiet_nan(&self) -> bool {
        self.flags & flags::QUIET_NAN != 0
    }

    #[inline]
    pub fn is_signaling_nan(&self) -> bool {
        self.flags & flags::SIGNALING_NAN != 0
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.flags & flags::INFINITY != 0
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.flags & flags::SPECIAL == 0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.is_finite() && self.mantissa.is_zero()
    }

    /// Returns `true` for negative values, including negative zero,
    /// negative infinity and NaNs with the sign bit set.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.flags & flags::NEGATIVE != 0
    }

    /// Returns -1, 0 or 1; NaNs give ±1 by their sign bit.
    #[inline]
    pub fn sign(&self) -> i32 {
        i32::from(self.sign)
    }

    /// Returns `true` if the value is finite and has no fractional
    /// part.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Decimal;
    /// assert!("12.000".parse::<Decimal>().unwrap().is_integer());
    /// assert!(!"12.001".parse::<Decimal>().unwrap().is_integer());
    /// ```
    pub fn is_integer(&self) -> bool {
        if !self.is_finite() {
            return false;
        }
        if self.mantissa.is_zero() || self.exponent.sign() >= 0 {
            return true;
        }
        let frac = self.exponent.negate().to_integer();
        match frac.to_u64() {
            Some(n) if n < self.mantissa.to_integer().digit_count() => self
                .mantissa
                .to_integer()
                .div_rem_nonzero(&powers::pow10(n))
                .1
                .is_zero(),
            _ => false,
        }
    }

    /// The number of decimal digits in the mantissa; zero has one digit
    /// and non-finite values have none.
    pub fn precision(&self) -> u64 {
        if !self.is_finite() {
            return 0;
        }
        match self.mantissa.to_i32() {
            Some(m) => u64::from(m.unsigned_abs()).max(1).ilog10() as u64 + 1,
            None => self.mantissa.to_integer().digit_count(),
        }
    }

    fn with_flags(&self, fl: u8) -> Decimal {
        Decimal::from_raw(self.mantissa.clone(), self.exponent.clone(), fl)
    }

    /// The absolute value, clearing the sign of NaNs too.
    pub fn abs(&self) -> Decimal {
        self.with_flags(self.flags & !flags::NEGATIVE)
    }

    pub fn negate(&self) -> Decimal {
        self.with_flags(self.flags ^ flags::NEGATIVE)
    }

    /// This value with the sign of `other`.
    pub fn copy_sign(&self, other: &Decimal) -> Decimal {
        self.with_flags((self.flags & !flags::NEGATIVE) | (other.flags & flags::NEGATIVE))
    }

    /// Adds exactly.
    ///
    /// Values with equal exponents are added directly. If the exponents
    /// are too far apart for the exact sum to be formed, the result is
    /// NaN; [`add_ctx`](Decimal::add_ctx) with an unlimited context
    /// reports that case as `Error::Unsupported` instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::{Context, Decimal, Error};
    /// let huge: Decimal = "1E+3000000000".parse().unwrap();
    /// assert!(huge.add(&Decimal::ONE).is_nan());
    /// let err = huge.add_ctx(&Decimal::ONE, &mut Context::unlimited()).unwrap_err();
    /// assert!(matches!(err, Error::Unsupported(_)));
    /// ```
    pub fn add(&self, other: &Decimal) -> Decimal {
        if self.flags & flags::SPECIAL == 0
            && other.flags & flags::SPECIAL == 0
            && self.exponent == other.exponent
        {
            let a = self.signed_mantissa_cell();
            let b = other.signed_mantissa_cell();
            let sum = a.add(&b);
            let negative = match sum.sign() {
                0 => self.is_negative() && other.is_negative(),
                s => s < 0,
            };
            let fl = if negative { flags::NEGATIVE } else { 0 };
            return Decimal::from_raw(sum.abs(), self.exponent.clone(), fl);
        }
        MATH.add(self, other, &mut Context::unlimited())
            .unwrap_or(Decimal::NAN)
    }

    fn signed_mantissa_cell(&self) -> FixedCell {
        if self.is_negative() {
            self.mantissa.negate()
        } else {
            self.mantissa.clone()
        }
    }

    pub fn add_ctx(&self, other: &Decimal, ctx: &mut Context) -> Result<Decimal> {
        MATH.add(self, other, ctx)
    }

    pub fn subtract(&self, other: &Decimal) -> Decimal {
        if other.is_nan() {
            return self.add(other);
        }
        self.add(&other.negate())
    }

    pub fn subtract_ctx(&self, other: &Decimal, ctx: &mut Context) -> Result<Decimal> {
        MATH.subtract(self, other, ctx)
    }

    /// Multiplies exactly. An engine error, which only the special-value
    /// path can raise, maps to NaN; use
    /// [`multiply_ctx`](Decimal::multiply_ctx) to see it.
    pub fn multiply(&self, other: &Decimal) -> Decimal {
        if (self.flags | other.flags) & flags::SPECIAL == 0 {
            let fl = (self.flags ^ other.flags) & flags::NEGATIVE;
            return Decimal::from_raw(
                self.mantissa.multiply(&other.mantissa),
                self.exponent.add(&other.exponent),
                fl,
            );
        }
        MATH.multiply(self, other, &mut Context::unlimited())
            .unwrap_or(Decimal::NAN)
    }

    pub fn multiply_ctx(&self, other: &Decimal, ctx: &mut Context) -> Result<Decimal> {
        MATH.multiply(self, other, ctx)
    }

    /// Divides exactly, giving NaN if the quotient has no terminating
    /// decimal expansion or the exponents are too far apart to form it.
    /// [`divide_ctx`](Decimal::divide_ctx) returns those failures as
    /// errors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Decimal;
    /// let one = Decimal::ONE;
    /// assert_eq!(one.divide(&Decimal::from(8)).to_string(), "0.125");
    /// assert!(one.divide(&Decimal::from(3)).is_nan());
    /// ```
    pub fn divide(&self, other: &Decimal) -> Decimal {
        MATH.divide(self, other, &mut Context::unlimited())
            .unwrap_or(Decimal::NAN)
    }

    pub fn divide_ctx(&self, other: &Decimal, ctx: &mut Context) -> Result<Decimal> {
        MATH.divide(self, other, ctx)
    }

    /// Rounds to the context; a negative zero becomes positive.
    pub fn plus(&self, ctx: &mut Context) -> Result<Decimal> {
        MATH.plus(self, ctx)
    }

    pub fn round_to_precision(&self, ctx: &mut Context) -> Result<Decimal> {
        MATH.round_to_precision(self, ctx)
    }

    /// Gives this value the exponent of `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::{Context, Decimal};
    /// let v: Decimal = "2.17".parse().unwrap();
    /// let q = v.quantize(&"0.1".parse().unwrap(), &mut Context::unlimited()).unwrap();
    /// assert_eq!(q.to_string(), "2.2");
    /// ```
    pub fn quantize(&self, other: &Decimal, ctx: &mut Context) -> Result<Decimal> {
        MATH.quantize(self, other, ctx)
    }

    pub fn quantize_exponent(&self, exponent: i32, ctx: &mut Context) -> Result<Decimal> {
        MATH.quantize(self, &Decimal::create_i64(1, exponent), ctx)
    }

    /// Rounds to `exponent` if this value's exponent is smaller.
    pub fn round_to_exponent(&self, exponent: &Integer, ctx: &mut Context) -> Result<Decimal> {
        MATH.round_to_exponent(self, exponent, ctx)
    }

    /// Like `round_to_exponent` with an unlimited context, taking a
    /// shortcut for values with a small mantissa when rounding half to
    /// even or toward zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::{Decimal, Round};
    /// let v: Decimal = "12.345".parse().unwrap();
    /// assert_eq!(v.round_to_exponent_fast(-2, Round::HalfEven).to_string(), "12.34");
    /// assert_eq!(v.round_to_exponent_fast(0, Round::Down).to_string(), "12");
    /// ```
    pub fn round_to_exponent_fast(&self, exponent: i32, rounding: Round) -> Decimal {
        if let (true, Some(m), Some(e)) = (
            self.is_finite() && matches!(rounding, Round::HalfEven | Round::Down),
            self.mantissa.to_i32(),
            self.exponent.to_i32(),
        ) {
            if e >= exponent {
                return self.clone();
            }
            let diff = i64::from(exponent) - i64::from(e);
            let q = if diff >= powers::POW10_I32.len() as i64 {
                // the divisor exceeds every i32, so the quotient is zero
                // and the remainder is below half
                0
            } else {
                let div = powers::POW10_I32[diff as usize];
                let (q, r) = (m / div, m % div);
                let half = div / 2;
                let up = rounding == Round::HalfEven && (r > half || (r == half && q & 1 == 1));
                if up {
                    q + 1
                } else {
                    q
                }
            };
            return Decimal::from_raw(FixedCell::from_i32(q), FixedCell::from_i32(exponent), self.flags);
        }
        let mut ctx = Context::unlimited().with_rounding(rounding);
        MATH.round_to_exponent(self, &Integer::from(exponent), &mut ctx)
            .unwrap_or(Decimal::NAN)
    }

    /// Rounds to the context and removes trailing zeros from the
    /// mantissa.
    pub fn reduce(&self, ctx: &mut Context) -> Result<Decimal> {
        MATH.reduce(self, ctx)
    }

    /// The numerically smaller value, or the non-NaN operand if one is a
    /// quiet NaN. Named apart from `Ord::min`, which uses the total order.
    pub fn min_ctx(&self, other: &Decimal, ctx: &mut Context) -> Result<Decimal> {
        MATH.min(self, other, ctx)
    }

    pub fn max_ctx(&self, other: &Decimal, ctx: &mut Context) -> Result<Decimal> {
        MATH.max(self, other, ctx)
    }

    /// Moves the decimal point right, scaling the mantissa instead if the
    /// exponent would become positive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Decimal;
    /// let v: Decimal = "1.2345".parse().unwrap();
    /// assert_eq!(v.move_point_right(2).to_string(), "123.45");
    /// assert_eq!(v.move_point_right(6).to_string(), "1234500");
    /// assert_eq!(v.move_point_left(1).to_string(), "0.12345");
    /// ```
    pub fn move_point_right(&self, places: i32) -> Decimal {
        self.move_point(i64::from(places))
    }

    pub fn move_point_left(&self, places: i32) -> Decimal {
        self.move_point(-i64::from(places))
    }

    fn move_point(&self, places: i64) -> Decimal {
        if places == 0 || !self.is_finite() {
            return self.clone();
        }
        let exp = self.exponent.to_integer() + places;
        if exp.cmp0() == std::cmp::Ordering::Greater {
            if let Some(n) = exp.to_u64() {
                let m = self.mantissa.to_integer() * powers::pow10(n);
                return Decimal::from_raw(FixedCell::from_integer(m), FixedCell::ZERO, self.flags);
            }
        }
        Decimal::from_raw(self.mantissa.clone(), FixedCell::from_integer(exp), self.flags)
    }

    /// Multiplies by 10<sup>`power`</sup> by adjusting the exponent.
    pub fn scale_by_power_of_ten(&self, power: i32) -> Decimal {
        if !self.is_finite() {
            return self.clone();
        }
        Decimal::from_raw(self.mantissa.clone(), self.exponent.add_i32(power), self.flags)
    }

    pub fn scale_by_power_of_ten_big(&self, power: &Integer) -> Decimal {
        if !self.is_finite() {
            return self.clone();
        }
        Decimal::from_raw(self.mantissa.clone(), self.exponent.add_integer(power), self.flags)
    }
}

impl Default for Decimal {
    #[inline]
    fn default() -> Decimal {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn check_sign_cache() {
        assert_eq!(Decimal::ZERO.sign(), 0);
        assert_eq!(Decimal::NEGATIVE_ZERO.sign(), 0);
        assert_eq!(Decimal::NEGATIVE_INFINITY.sign(), -1);
        assert_eq!(dec("-0.5").sign(), -1);
        assert!(Decimal::NEGATIVE_ZERO.is_negative());
        assert_eq!(Decimal::NAN.negate().sign(), -1);
    }

    #[test]
    fn check_exact_add() {
        let sum = dec("1.50").add(&dec("2.5"));
        assert_eq!(sum, dec("4.00"));
        assert_eq!(sum.exponent(), -2);
        assert_eq!(dec("1.5").add(&dec("-1.5")), Decimal::ZERO.scale_by_power_of_ten(-1));
        assert_eq!(dec("-0").add(&dec("-0")), Decimal::NEGATIVE_ZERO);
        assert_eq!(dec("1E+5").add(&dec("1E-5")).to_string(), "100000.00001");
        assert_eq!(dec("-2").subtract(&dec("3")).to_string(), "-5");
    }

    #[test]
    fn check_special_add() {
        assert!(Decimal::NAN.add(&Decimal::ONE).is_nan());
        assert!(Decimal::POSITIVE_INFINITY
            .add(&Decimal::NEGATIVE_INFINITY)
            .is_quiet_nan());
        assert_eq!(
            Decimal::POSITIVE_INFINITY.add(&Decimal::ONE),
            Decimal::POSITIVE_INFINITY
        );
        let snan = Decimal::create_nan(&Integer::from(12), true, false).unwrap();
        let r = snan.add(&Decimal::ONE);
        assert!(r.is_quiet_nan());
        assert_eq!(r.unsigned_mantissa(), 12);
    }

    #[test]
    fn check_multiply() {
        assert_eq!(dec("1.20").multiply(&dec("3")).to_string(), "3.60");
        assert_eq!(dec("-0").multiply(&dec("5")), Decimal::NEGATIVE_ZERO);
        assert!(Decimal::POSITIVE_INFINITY.multiply(&Decimal::ZERO).is_nan());
        let big = dec("123456789012345678901234567890");
        assert_eq!(
            big.multiply(&big).to_string(),
            "15241578753238836750495351562536198787501905199875019052100"
        );
    }

    #[test]
    fn check_divide() {
        assert_eq!(dec("1").divide(&dec("4")).to_string(), "0.25");
        assert_eq!(dec("2.40").divide(&dec("2")).to_string(), "1.20");
        assert_eq!(dec("1000").divide(&dec("10")).to_string(), "100");
        assert!(dec("1").divide(&dec("3")).is_nan());
        assert!(dec("0").divide(&dec("0")).is_nan());
        assert_eq!(dec("1").divide(&dec("-0")), Decimal::NEGATIVE_INFINITY);
    }

    #[test]
    fn check_round_to_exponent_fast() {
        let v = dec("2.5");
        assert_eq!(v.round_to_exponent_fast(0, Round::HalfEven).to_string(), "2");
        assert_eq!(dec("3.5").round_to_exponent_fast(0, Round::HalfEven).to_string(), "4");
        assert_eq!(dec("-3.5").round_to_exponent_fast(0, Round::Down).to_string(), "-3");
        assert_eq!(dec("3.5").round_to_exponent_fast(0, Round::HalfUp).to_string(), "4");
        assert_eq!(dec("7").round_to_exponent_fast(20, Round::HalfEven).to_string(), "0E+20");
        assert_eq!(dec("7E+3").round_to_exponent_fast(0, Round::HalfEven).to_string(), "7E+3");
    }

    #[test]
    fn check_is_integer_and_precision() {
        assert!(dec("1E+3").is_integer());
        assert!(dec("0.000").is_integer());
        assert!(!dec("0.1").is_integer());
        assert!(!Decimal::POSITIVE_INFINITY.is_integer());
        assert_eq!(dec("0").precision(), 1);
        assert_eq!(dec("123.45").precision(), 5);
        assert_eq!(dec("12345678901234567890").precision(), 20);
    }
}
