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

//! Arbitrary-precision binary floating-point numbers.
//!
//! [`Binary`](../struct.Binary.html) converts exactly from `f64` and
//! `f32`, and rounds back to them through the `binary64` and `binary32`
//! contexts. Conversions from decimal strings are correctly rounded.
//!
//! # Examples
//!
//! ```rust
//! use radixnum::{Binary, Context, Decimal};
//! let tenth: Decimal = "0.1".parse().unwrap();
//! let b = tenth.to_binary(&mut Context::binary32()).unwrap();
//! assert_eq!(b.to_f32(), 0.1f32);
//! assert_eq!(Binary::from_f64(0.1).to_string(), "0.1000000000000000055511151231257827021181583404541015625");
//! ```

mod arith;
pub(crate) mod big;
mod cmp;
pub(crate) mod convert;
mod fmt;
#[cfg(feature = "serde")]
mod serde;

pub use crate::binary::big::Binary;

use crate::radix::{self, ArithmeticSupport, BitAccumulator, RadixHelper};
use crate::{FixedCell, Integer, ScratchInt};

/// Describes [`Binary`] to the radix-generic engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryHelper;

impl RadixHelper for BinaryHelper {
    type Value = Binary;
    type Accumulator = BitAccumulator;

    #[inline]
    fn radix() -> u32 {
        2
    }

    #[inline]
    fn sign(value: &Binary) -> i32 {
        value.sign()
    }

    #[inline]
    fn flags(value: &Binary) -> u8 {
        value.flags
    }

    #[inline]
    fn mantissa(value: &Binary) -> Integer {
        value.mantissa.clone()
    }

    #[inline]
    fn exponent(value: &Binary) -> Integer {
        value.exponent.clone()
    }

    #[inline]
    fn mantissa_fixed(value: &Binary) -> FixedCell {
        FixedCell::from_integer(value.mantissa.clone())
    }

    #[inline]
    fn exponent_fixed(value: &Binary) -> FixedCell {
        FixedCell::from_integer(value.exponent.clone())
    }

    fn create_with_flags(mantissa: Integer, exponent: Integer, flags: u8) -> Binary {
        Binary::from_raw(mantissa, exponent, flags)
    }

    fn create_with_flags_fixed(mantissa: FixedCell, exponent: FixedCell, flags: u8) -> Binary {
        Binary::from_raw(mantissa.to_integer(), exponent.to_integer(), flags)
    }

    fn create_shift_accumulator(mantissa: Integer) -> BitAccumulator {
        BitAccumulator::new(mantissa)
    }

    fn create_shift_accumulator_with_digits(
        mantissa: Integer,
        last_digit: u32,
        older_digits: bool,
    ) -> BitAccumulator {
        BitAccumulator::with_digits(mantissa, last_digit, older_digits)
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
        if d != 1 {
            return None;
        }
        Some(ScratchInt::from_i64(i64::try_from(twos).ok()?))
    }

    fn multiply_by_radix_power(mantissa: &Integer, power: &FixedCell) -> Integer {
        match power.to_i32() {
            Some(p) if p > 0 => mantissa.shl_bits(p as u64),
            _ => mantissa.clone(),
        }
    }

    #[inline]
    fn value_of(value: i32) -> Binary {
        Binary::from(value)
    }

    #[inline]
    fn arithmetic_support() -> ArithmeticSupport {
        ArithmeticSupport::BothPositiveAndNegative
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, Decimal, Flags, Round};

    #[test]
    fn check_division_shift() {
        let shift = |a: i32, b: i32| {
            BinaryHelper::division_shift(&Integer::from(a), &Integer::from(b))
                .map(|s| s.to_i32().unwrap())
        };
        assert_eq!(shift(1, 8), Some(3));
        assert_eq!(shift(6, 4), Some(1));
        assert_eq!(shift(1, 10), None);
        assert_eq!(shift(10, 5), Some(0));
    }

    #[test]
    fn check_f64_round_trip() {
        for &v in &[
            0.0,
            -0.0,
            1.0,
            -2.5,
            0.1,
            1e308,
            f64::MAX,
            f64::MIN_POSITIVE,
            5e-324,
            -1.2345e-310,
            123456789.123456789,
        ] {
            let b = Binary::from_f64(v);
            assert_eq!(b.to_f64().to_bits(), v.to_bits(), "{}", v);
            let d = Decimal::from_f64(v);
            assert_eq!(d.to_f64().to_bits(), v.to_bits(), "{}", v);
        }
        assert!(Binary::from_f64(f64::NAN).to_f64().is_nan());
        assert_eq!(Binary::from_f64(f64::NEG_INFINITY).to_f64(), f64::NEG_INFINITY);
    }

    #[test]
    fn check_f32() {
        for &v in &[0.1f32, -3.75, f32::MAX, f32::MIN_POSITIVE, 1e-45] {
            assert_eq!(Binary::from_f32(v).to_f32().to_bits(), v.to_bits());
        }
        assert_eq!(Binary::from_f64(1e300).to_f32(), f32::INFINITY);
        assert_eq!(Binary::from_f64(1e-300).to_f32(), 0.0);
    }

    #[test]
    fn check_decimal_to_binary_rounding() {
        // halfway between two doubles: 2^53 + 1
        let d: Decimal = "9007199254740993".parse().unwrap();
        assert_eq!(d.to_f64(), 9007199254740992.0);
        let d: Decimal = "9007199254740993.0000000000000001".parse().unwrap();
        assert_eq!(d.to_f64(), 9007199254740994.0);
        let d: Decimal = "2.2250738585072011e-308".parse().unwrap();
        assert_eq!(d.to_f64(), 2.225073858507201e-308);
        let d: Decimal = "1e400".parse().unwrap();
        assert_eq!(d.to_f64(), f64::INFINITY);
        let d: Decimal = "-1e-400".parse().unwrap();
        assert_eq!(d.to_f64().to_bits(), (-0.0f64).to_bits());
    }

    #[test]
    fn check_to_binary_flags() {
        let mut ctx = Context::binary64().with_blank_flags();
        let d: Decimal = "0.1".parse().unwrap();
        d.to_binary(&mut ctx).unwrap();
        assert!(ctx.flags().contains(Flags::INEXACT));
        let mut ctx = Context::binary64().with_blank_flags();
        let d: Decimal = "0.5".parse().unwrap();
        assert_eq!(d.to_binary(&mut ctx).unwrap().to_f64(), 0.5);
        assert!(!ctx.flags().contains(Flags::INEXACT));
        let mut ctx = Context::new(0, Round::HalfEven).with_blank_flags();
        assert!(d.to_binary(&mut ctx).unwrap().is_finite());
        let third: Decimal = "0.3".parse().unwrap();
        assert!(third.to_binary(&mut ctx).unwrap().is_nan());
        assert!(ctx.flags().contains(Flags::INVALID));
    }

    #[test]
    fn check_directed_rounding() {
        let d: Decimal = "0.1".parse().unwrap();
        let mut down = Context::binary64().with_rounding(Round::Down);
        let mut up = Context::binary64().with_rounding(Round::Up);
        let lo = d.to_binary(&mut down).unwrap().to_f64();
        let hi = d.to_binary(&mut up).unwrap().to_f64();
        assert_eq!(lo, 0.09999999999999999);
        assert_eq!(hi, 0.1);
    }
}
