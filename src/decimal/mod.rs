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

//! Arbitrary-precision decimal floating-point numbers.
//!
//! This module provides the [`Decimal`](../struct.Decimal.html) type,
//! following the General Decimal Arithmetic rules for rounding, special
//! values and exceptional conditions. Arithmetic is exact unless a
//! [`Context`](../struct.Context.html) is supplied.
//!
//! # Examples
//!
//! ```rust
//! use radixnum::{Context, Decimal, Round};
//! let price: Decimal = "19.99".parse().unwrap();
//! let qty = Decimal::from(3);
//! let total = &price * &qty;
//! assert_eq!(total.to_string(), "59.97");
//! let mut ctx = Context::new(3, Round::HalfUp);
//! assert_eq!(total.round_to_precision(&mut ctx).unwrap().to_string(), "60.0");
//! ```

mod arith;
pub(crate) mod big;
mod cmp;
mod convert;
mod fmt;
mod parse;
#[cfg(feature = "serde")]
mod serde;

pub use crate::decimal::big::Decimal;

use crate::radix::{self, ArithmeticSupport, DigitAccumulator, RadixHelper};
use crate::radix::powers;
use crate::{FixedCell, Integer, ScratchInt};

/// Describes [`Decimal`] to the radix-generic engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecimalHelper;

impl RadixHelper for DecimalHelper {
    type Value = Decimal;
    type Accumulator = DigitAccumulator;

    #[inline]
    fn radix() -> u32 {
        10
    }

    #[inline]
    fn sign(value: &Decimal) -> i32 {
        value.sign()
    }

    #[inline]
    fn flags(value: &Decimal) -> u8 {
        value.flags
    }

    #[inline]
    fn mantissa(value: &Decimal) -> Integer {
        value.mantissa.to_integer()
    }

    #[inline]
    fn exponent(value: &Decimal) -> Integer {
        value.exponent.to_integer()
    }

    #[inline]
    fn mantissa_fixed(value: &Decimal) -> FixedCell {
        value.mantissa.clone()
    }

    #[inline]
    fn exponent_fixed(value: &Decimal) -> FixedCell {
        value.exponent.clone()
    }

    fn create_with_flags(mantissa: Integer, exponent: Integer, flags: u8) -> Decimal {
        Decimal::from_raw(
            FixedCell::from_integer(mantissa),
            FixedCell::from_integer(exponent),
            flags,
        )
    }

    fn create_with_flags_fixed(mantissa: FixedCell, exponent: FixedCell, flags: u8) -> Decimal {
        Decimal::from_raw(mantissa, exponent, flags)
    }

    fn create_shift_accumulator(mantissa: Integer) -> DigitAccumulator {
        DigitAccumulator::new(mantissa)
    }

    fn create_shift_accumulator_with_digits(
        mantissa: Integer,
        last_digit: u32,
        older_digits: bool,
    ) -> DigitAccumulator {
        DigitAccumulator::with_digits(mantissa, last_digit, older_digits)
    }

    fn division_shift(num: &Integer, den: &Integer) -> Option<ScratchInt> {
        if den.is_zero() {
            return None;
        }
        let g = num.gcd(den);
        let mut d = if g.is_zero() {
            den.abs()
        } else {
            den.div_rem_nonzero(&g).0.into_abs()
        };
        let twos = radix::strip_factor(&mut d, 2);
        let fives = radix::strip_factor(&mut d, 5);
        if d != 1 {
            return None;
        }
        let k = twos.max(fives);
        Some(ScratchInt::from_i64(i64::try_from(k).ok()?))
    }

    fn multiply_by_radix_power(mantissa: &Integer, power: &FixedCell) -> Integer {
        match power.to_i32() {
            Some(p) if p > 0 => mantissa * powers::pow10(p as u64),
            _ => mantissa.clone(),
        }
    }

    #[inline]
    fn value_of(value: i32) -> Decimal {
        Decimal::from(value)
    }

    #[inline]
    fn arithmetic_support() -> ArithmeticSupport {
        ArithmeticSupport::BothPositiveAndNegative
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Binary, Context, Flags, Round};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn check_division_shift() {
        let shift = |a: i32, b: i32| {
            DecimalHelper::division_shift(&Integer::from(a), &Integer::from(b))
                .map(|s| s.to_i32().unwrap())
        };
        assert_eq!(shift(1, 8), Some(3));
        assert_eq!(shift(3, 6), Some(1));
        assert_eq!(shift(7, 7), Some(0));
        assert_eq!(shift(1, 40), Some(3));
        assert_eq!(shift(1, 3), None);
        assert_eq!(shift(6, 3), Some(0));
    }

    #[test]
    fn check_ideal_exponent_add() {
        let sum = &dec("1.50") + &dec("2.5");
        assert_eq!(sum.to_string(), "4.00");
        assert_eq!(sum.exponent(), -2);
    }

    #[test]
    fn check_decimal32_third() {
        let mut ctx = Context::decimal32().with_blank_flags();
        let third = Decimal::ONE.divide_ctx(&Decimal::from(3), &mut ctx).unwrap();
        assert_eq!(third.to_string(), "0.3333333");
        assert!(ctx.flags().contains(Flags::INEXACT | Flags::ROUNDED));
        let two_thirds = Decimal::from(2).divide_ctx(&Decimal::from(3), &mut ctx).unwrap();
        assert_eq!(two_thirds.to_string(), "0.6666667");
    }

    #[test]
    fn check_nan_and_infinity_propagation() {
        assert!((&Decimal::NAN + &Decimal::ONE).is_nan());
        let mut ctx = Context::unlimited().with_blank_flags();
        let r = Decimal::POSITIVE_INFINITY
            .add_ctx(&Decimal::NEGATIVE_INFINITY, &mut ctx)
            .unwrap();
        assert!(r.is_quiet_nan());
        assert!(ctx.flags().contains(Flags::INVALID));
    }

    #[test]
    fn check_trap() {
        let mut ctx = Context::basic();
        assert!(Decimal::ONE.divide_ctx(&Decimal::ZERO, &mut ctx).is_err());
        let mut ctx = Context::unlimited().with_blank_flags();
        let r = Decimal::ONE.divide_ctx(&Decimal::ZERO, &mut ctx).unwrap();
        assert_eq!(r, Decimal::POSITIVE_INFINITY);
        assert!(ctx.flags().contains(Flags::DIVIDE_BY_ZERO));
    }

    #[test]
    fn check_overflow_and_underflow() {
        let mut ctx = Context::decimal32().with_blank_flags();
        let big = dec("9.999999E+96");
        let r = big.multiply_ctx(&Decimal::TEN, &mut ctx).unwrap();
        assert_eq!(r, Decimal::POSITIVE_INFINITY);
        assert!(ctx.flags().contains(Flags::OVERFLOW | Flags::INEXACT));

        let mut ctx = Context::decimal32().with_rounding(Round::Down).with_blank_flags();
        let r = big.multiply_ctx(&Decimal::TEN, &mut ctx).unwrap();
        assert_eq!(r.to_string(), "9.999999E+96");

        let mut ctx = Context::decimal32().with_blank_flags();
        let tiny = dec("1E-100");
        let r = tiny.divide_ctx(&Decimal::from(3), &mut ctx).unwrap();
        assert_eq!(r.to_string(), "3E-101");
        assert!(ctx.flags().contains(Flags::SUBNORMAL | Flags::UNDERFLOW));
    }

    #[test]
    fn check_clamped_exponent() {
        let mut ctx = Context::decimal32().with_blank_flags();
        let r = dec("1E+96").plus(&mut ctx).unwrap();
        assert_eq!(r.to_string(), "1.000000E+96");
        assert_eq!(r.exponent(), 90);
        assert!(ctx.flags().contains(Flags::CLAMPED));
    }

    #[test]
    fn check_quantize_errors() {
        let mut ctx = Context::decimal32().with_blank_flags();
        let r = dec("123456789").quantize(&dec("1E-2"), &mut ctx).unwrap();
        assert!(r.is_nan());
        assert!(ctx.flags().contains(Flags::INVALID));
    }

    #[test]
    fn check_decimal_to_binary_to_f64() {
        let b = dec("0.1").to_binary(&mut Context::binary64()).unwrap();
        assert_eq!(b.to_f64(), 0.1);
        let b: Binary = "0.1".parse().unwrap();
        assert_eq!(b.to_f64(), 0.1);
    }

    #[test]
    fn check_total_order() {
        let mut values = vec![
            Decimal::NAN,
            dec("1.0"),
            Decimal::NEGATIVE_INFINITY,
            dec("1"),
            Decimal::NEGATIVE_ZERO,
            Decimal::SIGNALING_NAN,
            Decimal::ZERO,
            Decimal::NAN.negate(),
            dec("-2"),
            Decimal::POSITIVE_INFINITY,
        ];
        values.sort();
        let shown: Vec<String> = values.iter().map(Decimal::to_string).collect();
        assert_eq!(
            shown,
            ["-NaN", "-Infinity", "-2", "-0", "0", "1.0", "1", "Infinity", "sNaN", "NaN"]
        );
    }

    #[test]
    fn check_min_max() {
        let mut ctx = Context::unlimited();
        let a = dec("2.50");
        let b = dec("2.5");
        assert_eq!(a.min_ctx(&b, &mut ctx).unwrap().to_string(), "2.50");
        assert_eq!(a.max_ctx(&b, &mut ctx).unwrap().to_string(), "2.5");
        let n = a.min_ctx(&Decimal::NAN, &mut ctx).unwrap();
        assert_eq!(n, a);
        assert_eq!(dec("-0").max_ctx(&dec("0"), &mut ctx).unwrap().to_string(), "0");
        // Ord::min uses the total order
        assert_eq!(a.clone().min(b.clone()), a);
    }
}
