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

use crate::binary::BinaryHelper;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::radix::{flags, RadixMath};
use crate::Integer;

pub(crate) const MATH: RadixMath<BinaryHelper> = RadixMath::new();

/// An arbitrary-precision binary floating-point number.
///
/// A finite value is ±mantissa × 2<sup>exponent</sup> with a
/// nonnegative integer mantissa. Special values, context handling and
/// equality follow [`Decimal`](crate::Decimal); only the radix differs.
///
/// # Examples
///
/// ```rust
/// use radixnum::{Binary, Context};
/// let x = Binary::from_f64(0.75);
/// assert_eq!(x.mantissa(), 3);
/// assert_eq!(x.exponent(), -2);
/// let y = x.multiply_ctx(&Binary::from_f64(1.0 / 3.0), &mut Context::binary64()).unwrap();
/// assert_eq!(y.to_f64(), 0.25);
/// ```
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Binary {
    pub(crate) mantissa: Integer,
    pub(crate) exponent: Integer,
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

impl Binary {
    pub const ZERO: Binary = Binary::from_const(0);
    pub const NEGATIVE_ZERO: Binary = Binary::from_const(flags::NEGATIVE);
    pub const NAN: Binary = Binary::from_const(flags::QUIET_NAN);
    pub const SIGNALING_NAN: Binary = Binary::from_const(flags::SIGNALING_NAN);
    pub const POSITIVE_INFINITY: Binary = Binary::from_const(flags::INFINITY);
    pub const NEGATIVE_INFINITY: Binary = Binary::from_const(flags::INFINITY | flags::NEGATIVE);

    // Only a zero mantissa fits in a const `Integer`.
    const fn from_const(fl: u8) -> Binary {
        Binary {
            mantissa: Integer::new(),
            exponent: Integer::new(),
            flags: fl,
            sign: cached_sign(true, fl),
        }
    }

    /// The value one.
    pub fn one() -> Binary {
        Binary::from_raw(Integer::from(1), Integer::new(), 0)
    }

    pub(crate) fn from_raw(mantissa: Integer, exponent: Integer, fl: u8) -> Binary {
        debug_assert!(!mantissa.is_negative());
        let sign = cached_sign(mantissa.is_zero(), fl);
        Binary {
            mantissa,
            exponent,
            flags: fl,
            sign,
        }
    }

    /// Creates mantissa × 2<sup>exponent</sup> from a signed mantissa.
    pub fn create(mantissa: &Integer, exponent: &Integer) -> Binary {
        Binary::from_raw(
            mantissa.abs(),
            exponent.clone(),
            if mantissa.is_negative() { flags::NEGATIVE } else { 0 },
        )
    }

    /// Creates a NaN with a diagnostic payload.
    pub fn create_nan(payload: &Integer, signaling: bool, negative: bool) -> Result<Binary> {
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
        Ok(Binary::from_raw(payload.clone(), Integer::new(), fl))
    }

    /// Creates a NaN whose payload is cut to the low bits that fit the
    /// context precision.
    pub fn create_nan_ctx(
        payload: &Integer,
        signaling: bool,
        negative: bool,
        ctx: &Context,
    ) -> Result<Binary> {
        let p = ctx.precision();
        if p > 0 && !payload.is_negative() && payload.significant_bits() > p {
            return Binary::create_nan(&payload.low_bits(p), signaling, negative);
        }
        Binary::create_nan(payload, signaling, negative)
    }

    #[inline]
    pub fn unsigned_mantissa(&self) -> Integer {
        self.mantissa.clone()
    }

    pub fn mantissa(&self) -> Integer {
        if self.is_negative() {
            -&self.mantissa
        } else {
            self.mantissa.clone()
        }
    }

    #[inline]
    pub fn exponent(&self) -> Integer {
        self.exponent.clone()
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

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.flags & flags::NEGATIVE != 0
    }

    #[inline]
    pub fn sign(&self) -> i32 {
        i32::from(self.sign)
    }

    pub fn is_integer(&self) -> bool {
        if !self.is_finite() {
            return false;
        }
        if self.mantissa.is_zero() || !self.exponent.is_negative() {
            return true;
        }
        let frac = -&self.exponent;
        match (self.mantissa.lowest_set_bit(), frac.to_u64()) {
            (Some(tz), Some(n)) => tz >= n,
            _ => false,
        }
    }

    /// The number of bits in the mantissa; zero has one bit and
    /// non-finite values have none.
    pub fn precision(&self) -> u64 {
        if !self.is_finite() {
            return 0;
        }
        self.mantissa.significant_bits().max(1)
    }

    fn with_flags(&self, fl: u8) -> Binary {
        Binary::from_raw(self.mantissa.clone(), self.exponent.clone(), fl)
    }

    pub fn abs(&self) -> Binary {
        self.with_flags(self.flags & !flags::NEGATIVE)
    }

    pub fn negate(&self) -> Binary {
        self.with_flags(self.flags ^ flags::NEGATIVE)
    }

    pub fn copy_sign(&self, other: &Binary) -> Binary {
        self.with_flags((self.flags & !flags::NEGATIVE) | (other.flags & flags::NEGATIVE))
    }

    /// Adds exactly. If the exponents are too far apart for the exact
    /// sum, the result is NaN; [`add_ctx`](Binary::add_ctx) returns the
    /// error instead. The other exact methods and the operators do the
    /// same.
    pub fn add(&self, other: &Binary) -> Binary {
        MATH.add(self, other, &mut Context::unlimited())
            .unwrap_or(Binary::NAN)
    }

    pub fn add_ctx(&self, other: &Binary, ctx: &mut Context) -> Result<Binary> {
        MATH.add(self, other, ctx)
    }

    pub fn subtract(&self, other: &Binary) -> Binary {
        MATH.subtract(self, other, &mut Context::unlimited())
            .unwrap_or(Binary::NAN)
    }

    pub fn subtract_ctx(&self, other: &Binary, ctx: &mut Context) -> Result<Binary> {
        MATH.subtract(self, other, ctx)
    }

    /// Multiplies exactly.
    pub fn multiply(&self, other: &Binary) -> Binary {
        if (self.flags | other.flags) & flags::SPECIAL == 0 {
            let fl = (self.flags ^ other.flags) & flags::NEGATIVE;
            return Binary::from_raw(
                &self.mantissa * &other.mantissa,
                &self.exponent + &other.exponent,
                fl,
            );
        }
        MATH.multiply(self, other, &mut Context::unlimited())
            .unwrap_or(Binary::NAN)
    }

    pub fn multiply_ctx(&self, other: &Binary, ctx: &mut Context) -> Result<Binary> {
        MATH.multiply(self, other, ctx)
    }

    /// Divides exactly, giving NaN if the quotient has no terminating
    /// binary expansion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Binary;
    /// let q = Binary::from(3).divide(&Binary::from(8));
    /// assert_eq!(q.to_f64(), 0.375);
    /// assert!(Binary::one().divide(&Binary::from(10)).is_nan());
    /// ```
    pub fn divide(&self, other: &Binary) -> Binary {
        MATH.divide(self, other, &mut Context::unlimited())
            .unwrap_or(Binary::NAN)
    }

    pub fn divide_ctx(&self, other: &Binary, ctx: &mut Context) -> Result<Binary> {
        MATH.divide(self, other, ctx)
    }

    pub fn plus(&self, ctx: &mut Context) -> Result<Binary> {
        MATH.plus(self, ctx)
    }

    pub fn round_to_precision(&self, ctx: &mut Context) -> Result<Binary> {
        MATH.round_to_precision(self, ctx)
    }

    pub fn quantize(&self, other: &Binary, ctx: &mut Context) -> Result<Binary> {
        MATH.quantize(self, other, ctx)
    }

    pub fn round_to_exponent(&self, exponent: &Integer, ctx: &mut Context) -> Result<Binary> {
        MATH.round_to_exponent(self, exponent, ctx)
    }

    pub fn reduce(&self, ctx: &mut Context) -> Result<Binary> {
        MATH.reduce(self, ctx)
    }

    /// The numerically smaller value, or the non-NaN operand if one is a
    /// quiet NaN. Named apart from `Ord::min`, which uses the total order.
    pub fn min_ctx(&self, other: &Binary, ctx: &mut Context) -> Result<Binary> {
        MATH.min(self, other, ctx)
    }

    pub fn max_ctx(&self, other: &Binary, ctx: &mut Context) -> Result<Binary> {
        MATH.max(self, other, ctx)
    }

    /// Moves the binary point right, shifting the mantissa instead if
    /// the exponent would become positive.
    pub fn move_point_right(&self, places: i32) -> Binary {
        self.move_point(i64::from(places))
    }

    pub fn move_point_left(&self, places: i32) -> Binary {
        self.move_point(-i64::from(places))
    }

    fn move_point(&self, places: i64) -> Binary {
        if places == 0 || !self.is_finite() {
            return self.clone();
        }
        let exp = &self.exponent + places;
        if exp.cmp0() == std::cmp::Ordering::Greater {
            if let Some(n) = exp.to_u64() {
                let m = self.mantissa.shl_bits(n);
                return Binary::from_raw(m, Integer::new(), self.flags);
            }
        }
        Binary::from_raw(self.mantissa.clone(), exp, self.flags)
    }

    /// Multiplies by 2<sup>`power`</sup> by adjusting the exponent.
    pub fn scale_by_power_of_two(&self, power: i32) -> Binary {
        if !self.is_finite() {
            return self.clone();
        }
        Binary::from_raw(self.mantissa.clone(), &self.exponent + power, self.flags)
    }
}

impl Default for Binary {
    #[inline]
    fn default() -> Binary {
        Binary::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_exact_arith() {
        let a = Binary::from_f64(1.5);
        let b = Binary::from_f64(0.25);
        assert_eq!(a.add(&b).to_f64(), 1.75);
        assert_eq!(a.subtract(&b).to_f64(), 1.25);
        assert_eq!(a.multiply(&b).to_f64(), 0.375);
        assert_eq!(a.divide(&b).to_f64(), 6.0);
        assert!(a.divide(&Binary::from(5)).is_nan());
        assert_eq!(Binary::one().divide(&Binary::NEGATIVE_ZERO), Binary::NEGATIVE_INFINITY);
    }

    #[test]
    fn check_context_arith() {
        let mut ctx = Context::binary64();
        let third = Binary::one().divide_ctx(&Binary::from(3), &mut ctx).unwrap();
        assert_eq!(third.to_f64(), 1.0 / 3.0);
        assert_eq!(third.precision(), 53);
        let tenth = Binary::one().divide_ctx(&Binary::from(10), &mut ctx).unwrap();
        assert_eq!(tenth.to_f64(), 0.1);
    }

    #[test]
    fn check_shape() {
        let v = Binary::from_f64(-6.0);
        assert_eq!(v.mantissa(), -3);
        assert_eq!(v.exponent(), 1);
        assert!(v.is_integer());
        assert!(!Binary::from_f64(2.5).is_integer());
        assert_eq!(v.move_point_left(3).to_f64(), -0.75);
        assert_eq!(v.move_point_right(2).to_f64(), -24.0);
        assert_eq!(v.scale_by_power_of_two(-1).to_f64(), -3.0);
        assert_eq!(v.abs().to_f64(), 6.0);
        assert!(Binary::one().copy_sign(&v).is_negative());
        assert_eq!(Binary::NEGATIVE_ZERO.sign(), 0);
    }

    #[test]
    fn check_integer_fields() {
        let m = Integer::from(1).shl_bits(100) + 1u32;
        let e = -Integer::from(1).shl_bits(40);
        let v = Binary::create(&-&m, &e);
        assert_eq!(v.mantissa, m);
        assert_eq!(v.exponent, e);
        assert_eq!(v.mantissa(), -&m);
        let sq = v.multiply(&v);
        assert_eq!(sq.mantissa, &m * &m);
        assert_eq!(sq.exponent, &e + &e);
        assert!(!sq.is_negative());
        assert_eq!(Binary::one().mantissa, 1);
        assert_eq!(Binary::one().exponent, 0);
        assert!(Binary::ZERO.mantissa.is_zero());
    }

    #[test]
    fn check_nan_payload_ctx() {
        let ctx = Context::binary32();
        let nan = Binary::create_nan_ctx(&Integer::from(0x1ff_ffff), false, true, &ctx).unwrap();
        assert_eq!(nan.unsigned_mantissa(), 0xff_ffff);
        assert!(nan.is_negative());
        assert!(Binary::create_nan(&Integer::from(-1), false, false).is_err());
    }
}
