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

use crate::binary::big::MATH as BINARY_MATH;
use crate::context::{Context, Flags, Round};
use crate::decimal::big::MATH;
use crate::error::{Error, Result};
use crate::radix::{flags, powers};
use crate::{Binary, Decimal, Integer};
use std::cmp::Ordering;

impl Decimal {
    #[inline]
    pub fn from_integer(value: &Integer) -> Decimal {
        Decimal::create(value, &Integer::new())
    }

    /// Converts exactly from an `f64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Decimal;
    /// assert_eq!(Decimal::from_f64(0.5).to_string(), "0.5");
    /// assert_eq!(Decimal::from_f64(-3.0).to_string(), "-3");
    /// assert_eq!(Decimal::from_f64(f64::NEG_INFINITY), Decimal::NEGATIVE_INFINITY);
    /// ```
    pub fn from_f64(value: f64) -> Decimal {
        Binary::from_f64(value).to_decimal().unwrap_or(Decimal::NAN)
    }

    pub fn from_f32(value: f32) -> Decimal {
        Binary::from_f32(value).to_decimal().unwrap_or(Decimal::NAN)
    }

    /// Rounds to the nearest `f64`, ties to even.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Decimal;
    /// let d: Decimal = "0.1".parse().unwrap();
    /// assert_eq!(d.to_f64(), 0.1);
    /// ```
    pub fn to_f64(&self) -> f64 {
        if let Some(quick) = self.saturate(309, -326) {
            let v = if quick { f64::INFINITY } else { 0.0 };
            return v.copysign(self.sign_f64());
        }
        match self.to_binary(&mut Context::binary64()) {
            Ok(b) => b.to_f64(),
            Err(_) => f64::NAN,
        }
    }

    /// Rounds to the nearest `f32`, ties to even.
    pub fn to_f32(&self) -> f32 {
        if let Some(quick) = self.saturate(39, -46) {
            let v = if quick { f32::INFINITY } else { 0.0 };
            return v.copysign(self.sign_f64() as f32);
        }
        match self.to_binary(&mut Context::binary32()) {
            Ok(b) => b.to_f32(),
            Err(_) => f32::NAN,
        }
    }

    fn sign_f64(&self) -> f64 {
        if self.is_negative() {
            -1.0
        } else {
            1.0
        }
    }

    // Some(true) if certainly beyond the largest finite value, Some(false)
    // if certainly below half the smallest subnormal.
    fn saturate(&self, high: i32, low: i32) -> Option<bool> {
        if !self.is_finite() || self.mantissa.is_zero() {
            return None;
        }
        let adjusted = self.exponent.to_integer() + Integer::from(self.precision() - 1);
        if adjusted > high {
            Some(true)
        } else if adjusted < low {
            Some(false)
        } else {
            None
        }
    }

    /// Converts to a `Binary` rounded to the context, with a single
    /// rounding.
    ///
    /// The quotient m / 5<sup>n</sup> is computed to two more bits than
    /// the precision, with the lowest bit set if anything was left over.
    /// Rounding that value to the context gives the same result as
    /// rounding the exact quotient. With an unlimited precision the
    /// conversion must be exact, and signals `Invalid` otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::{Context, Decimal};
    /// let d: Decimal = "1.1".parse().unwrap();
    /// let b = d.to_binary(&mut Context::binary32()).unwrap();
    /// assert_eq!(b.to_f32(), 1.1f32);
    /// assert_eq!(b.to_f64(), 1.1f32 as f64);
    /// ```
    pub fn to_binary(&self, ctx: &mut Context) -> Result<Binary> {
        if !self.is_finite() {
            return Ok(Binary::from_raw(
                self.mantissa.to_integer(),
                Integer::new(),
                self.flags,
            ));
        }
        let sign = self.flags & flags::NEGATIVE;
        let m = self.mantissa.to_integer();
        if m.is_zero() {
            let zero = Binary::from_raw(Integer::new(), Integer::new(), sign);
            return BINARY_MATH.round_to_precision(&zero, ctx);
        }
        let e = self.exponent.to_integer();
        let p = ctx.precision();
        if let Some((emin, emax)) = ctx.adjusted_range() {
            let etiny = if p > 0 {
                &emin - Integer::from(p - 1)
            } else {
                emin
            };
            let adjusted = &e + Integer::from(m.digit_count() - 1);
            // 332/100 is just below log2(10), so both bounds are safe
            if &adjusted * 332u32 > (&emax + 1u32) * 100u32 {
                let over = Binary::from_raw(Integer::from(1), emax + 2u32, sign);
                return BINARY_MATH.round_to_precision(&over, ctx);
            }
            if (&adjusted + 1u32) * 332u32 < (&etiny - 2u32) * 100u32 {
                let under = Binary::from_raw(Integer::from(1), etiny - 3u32, sign);
                return BINARY_MATH.round_to_precision(&under, ctx);
            }
        }
        if e.cmp0() != Ordering::Less {
            let n = e
                .to_u64()
                .ok_or(Error::Unsupported("decimal exponent too large for binary conversion"))?;
            let exact = Binary::from_raw(m * powers::pow10(n), Integer::new(), sign);
            return BINARY_MATH.round_to_precision(&exact, ctx);
        }
        let n = (-&e)
            .to_u64()
            .ok_or(Error::Unsupported("decimal exponent too large for binary conversion"))?;
        let den = powers::pow5(n);
        if p == 0 {
            let (q, r) = m.div_rem_nonzero(&den);
            if !r.is_zero() {
                ctx.signal(Flags::INVALID)?;
                return Ok(Binary::NAN);
            }
            let exact = Binary::from_raw(q, e, sign);
            return BINARY_MATH.round_to_precision(&exact, ctx);
        }
        let target = p + 2;
        // log2(5) is a little above 2.32, so this can fall short by a bit
        let estimate = (target + n.saturating_mul(232) / 100) as i128 - m.significant_bits() as i128;
        let mut k = u64::try_from(estimate.max(0)).unwrap_or(0);
        let (mut q, mut r) = m.shl_bits(k).div_rem_nonzero(&den);
        while q.significant_bits() < target {
            let missing = target - q.significant_bits();
            tracing::debug!(k, missing, "widening decimal to binary quotient");
            k += missing;
            let (q2, r2) = m.shl_bits(k).div_rem_nonzero(&den);
            q = q2;
            r = r2;
        }
        if !r.is_zero() && q.is_even() {
            q += 1u32;
        }
        let exponent = e - Integer::from(k);
        let odd = Binary::from_raw(q, exponent, sign);
        BINARY_MATH.round_to_precision(&odd, ctx)
    }

    /// Converts to a `Binary` without a context: exactly when possible,
    /// otherwise to at least 53 bits and about four bits per decimal
    /// digit, ties to even.
    pub fn to_binary_approx(&self) -> Binary {
        let mut exact = Context::unlimited();
        if let Ok(b) = self.to_binary(&mut exact) {
            if !b.is_nan() || self.is_nan() {
                return b;
            }
        }
        let bits = (self.precision() * 4 + 4).max(53);
        self.to_binary(&mut Context::new(bits, Round::HalfEven))
            .unwrap_or(Binary::NAN)
    }

    /// Truncates toward zero. Fails with `Overflow` for infinities and
    /// NaNs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::{Decimal, Error};
    /// let d: Decimal = "-12.75".parse().unwrap();
    /// assert_eq!(d.to_integer_truncating().unwrap(), -12);
    /// assert_eq!(d.to_integer_exact(), Err(Error::NotAnExactInteger));
    /// ```
    pub fn to_integer_truncating(&self) -> Result<Integer> {
        MATH.to_integer(self, false)
    }

    /// Converts to an integer, failing with `NotAnExactInteger` if there
    /// is a nonzero fractional part.
    pub fn to_integer_exact(&self) -> Result<Integer> {
        MATH.to_integer(self, true)
    }

    /// Truncates toward zero, failing with `Overflow` if the magnitude
    /// needs more than `max_bits` bits.
    pub fn to_integer_checked(&self, max_bits: u64) -> Result<Integer> {
        MATH.to_integer_checked(self, max_bits)
    }
}

impl From<i32> for Decimal {
    #[inline]
    fn from(value: i32) -> Decimal {
        Decimal::create_i64(i64::from(value), 0)
    }
}

macro_rules! from_int {
    { $($T:ty)* } => { $(
        impl From<$T> for Decimal {
            #[inline]
            fn from(value: $T) -> Decimal {
                Decimal::from_integer(&Integer::from(value))
            }
        }
    )* };
}

from_int! { i8 i16 i64 i128 u8 u16 u32 u64 u128 }

impl From<Integer> for Decimal {
    #[inline]
    fn from(value: Integer) -> Decimal {
        Decimal::from_integer(&value)
    }
}

impl From<&Integer> for Decimal {
    #[inline]
    fn from(value: &Integer) -> Decimal {
        Decimal::from_integer(value)
    }
}

impl From<f64> for Decimal {
    #[inline]
    fn from(value: f64) -> Decimal {
        Decimal::from_f64(value)
    }
}

impl From<f32> for Decimal {
    #[inline]
    fn from(value: f32) -> Decimal {
        Decimal::from_f32(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Context, Decimal, Error, Integer};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn check_from_ints() {
        assert_eq!(Decimal::from(-5).to_string(), "-5");
        assert_eq!(Decimal::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Decimal::from(i128::MIN).mantissa(), Integer::from(i128::MIN));
        assert_eq!(Decimal::from(Integer::from(7)).exponent(), 0);
    }

    #[test]
    fn check_from_f64_exact() {
        assert_eq!(
            Decimal::from_f64(0.1).to_string(),
            "0.1000000000000000055511151231257827021181583404541015625"
        );
        assert_eq!(Decimal::from_f64(1e22).to_string(), "10000000000000000000000");
        let neg_zero = Decimal::from_f64(-0.0);
        assert!(neg_zero.is_zero() && neg_zero.is_negative());
        assert!(Decimal::from_f32(f32::NAN).is_nan());
    }

    #[test]
    fn check_to_f64() {
        for s in ["0.1", "-2.5", "1E+308", "1.7976931348623157E+308", "4.9E-324", "123456.789"] {
            let expected: f64 = s.parse().unwrap();
            assert_eq!(dec(s).to_f64(), expected, "{}", s);
        }
        assert_eq!(dec("1.8E+308").to_f64(), f64::INFINITY);
        assert_eq!(dec("-1E+400").to_f64(), f64::NEG_INFINITY);
        assert_eq!(dec("2E-324").to_f64(), 0.0);
        assert_eq!(dec("3E-324").to_f64(), 5e-324);
        assert_eq!(dec("NaN").to_f64().is_nan(), true);
        assert_eq!(dec("-0").to_f64().to_bits(), (-0.0f64).to_bits());
        assert_eq!(dec("3.4028235E+38").to_f32(), f32::MAX);
        assert_eq!(dec("1E+39").to_f32(), f32::INFINITY);
    }

    #[test]
    fn check_to_binary_approx() {
        assert_eq!(dec("0.1").to_binary_approx().to_f64(), 0.1);
        let exact = dec("12.5").to_binary_approx();
        assert_eq!(exact.mantissa(), 25);
        assert_eq!(exact.exponent(), -1);
        assert_eq!(dec("1E+30").to_binary_approx().to_f64(), 1e30);
    }

    #[test]
    fn check_to_integer() {
        assert_eq!(dec("1.5E+3").to_integer_exact().unwrap(), 1500);
        assert_eq!(dec("-0.999").to_integer_truncating().unwrap(), 0);
        assert_eq!(dec("99.000").to_integer_exact().unwrap(), 99);
        assert!(matches!(
            Decimal::NAN.to_integer_truncating(),
            Err(Error::Overflow(_))
        ));
        assert_eq!(dec("255.9").to_integer_checked(8).unwrap(), 255);
        assert!(dec("256").to_integer_checked(8).is_err());
        assert!(dec("1E+1000000").to_integer_checked(64).is_err());
    }

    #[test]
    fn check_binary32_context() {
        let mut ctx = Context::binary32();
        let b = dec("16777217").to_binary(&mut ctx).unwrap();
        assert_eq!(b.to_f32(), 16777216.0);
    }
}
