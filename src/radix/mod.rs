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

//! The radix-generic layer shared by [`Decimal`] and [`Binary`].
//!
//! Each floating-point type implements [`RadixHelper`] once on a
//! zero-sized helper type. [`RadixMath`] then provides the context-aware
//! arithmetic for both radices in terms of that trait alone.
//!
//! [`Decimal`]: crate::Decimal
//! [`Binary`]: crate::Binary

pub mod accum;
pub mod math;
pub mod powers;

pub use crate::radix::accum::{BitAccumulator, DigitAccumulator, ShiftAccumulator};
pub use crate::radix::math::RadixMath;

use crate::{FixedCell, Integer, ScratchInt};

/// Bits of the `flags` field of a floating-point value.
pub mod flags {
    pub const NEGATIVE: u8 = 1;
    pub const INFINITY: u8 = 2;
    pub const QUIET_NAN: u8 = 4;
    pub const SIGNALING_NAN: u8 = 8;
    /// Either kind of NaN.
    pub const NAN: u8 = QUIET_NAN | SIGNALING_NAN;
    /// Infinity or either kind of NaN.
    pub const SPECIAL: u8 = INFINITY | NAN;
}

/// Which mantissa signs a radix type can represent.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ArithmeticSupport {
    /// Mantissas are bounded by a fixed width.
    Bounded,
    /// Mantissas are unbounded but unsigned.
    Unbounded,
    /// Mantissas are unbounded and carry their own sign.
    BothPositiveAndNegative,
}

/// The operations [`RadixMath`] needs from a floating-point type.
///
/// Mantissas passed through this trait are always nonnegative; the sign
/// lives in the [`flags::NEGATIVE`] bit.
pub trait RadixHelper {
    type Value: Clone;
    type Accumulator: ShiftAccumulator;

    fn radix() -> u32;
    fn sign(value: &Self::Value) -> i32;
    fn flags(value: &Self::Value) -> u8;
    fn mantissa(value: &Self::Value) -> Integer;
    fn exponent(value: &Self::Value) -> Integer;
    fn mantissa_fixed(value: &Self::Value) -> FixedCell;
    fn exponent_fixed(value: &Self::Value) -> FixedCell;
    fn create_with_flags(mantissa: Integer, exponent: Integer, flags: u8) -> Self::Value;
    fn create_with_flags_fixed(mantissa: FixedCell, exponent: FixedCell, flags: u8)
        -> Self::Value;
    fn create_shift_accumulator(mantissa: Integer) -> Self::Accumulator;
    fn create_shift_accumulator_with_digits(
        mantissa: Integer,
        last_digit: u32,
        older_digits: bool,
    ) -> Self::Accumulator;

    fn create_shift_accumulator_fixed(mantissa: &FixedCell) -> Self::Accumulator {
        Self::create_shift_accumulator(mantissa.to_integer())
    }

    /// If `num / den` has a terminating expansion in this radix, returns
    /// the smallest `k` such that `den` divides `num * radix^k`.
    fn division_shift(num: &Integer, den: &Integer) -> Option<ScratchInt>;

    fn multiply_by_radix_power(mantissa: &Integer, power: &FixedCell) -> Integer;
    fn value_of(value: i32) -> Self::Value;
    fn arithmetic_support() -> ArithmeticSupport;
}

/// Removes all factors of `p` from `value`, returning how many there
/// were.
pub(crate) fn strip_factor(value: &mut Integer, p: u32) -> u64 {
    let mut count = 0;
    if p == 2 {
        if let Some(tz) = value.lowest_set_bit() {
            *value = value.shr_bits(tz);
            return tz;
        }
        return 0;
    }
    if value.is_zero() {
        return 0;
    }
    let (divisor, bits) = match p {
        5 => (625, 4),
        _ => (p, 1),
    };
    // strip in batches first, then single factors
    loop {
        let (q, r) = value.div_rem_small(divisor as u16);
        if r != 0 {
            break;
        }
        *value = q;
        count += bits;
    }
    loop {
        let (q, r) = value.div_rem_small(p as u16);
        if r != 0 {
            break;
        }
        *value = q;
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_strip_factor() {
        let mut v = Integer::from(5u64.pow(11) * 3);
        assert_eq!(strip_factor(&mut v, 5), 11);
        assert_eq!(v, 3);
        let mut w = Integer::from(96);
        assert_eq!(strip_factor(&mut w, 2), 5);
        assert_eq!(w, 3);
        let mut z = Integer::new();
        assert_eq!(strip_factor(&mut z, 5), 0);
    }
}
