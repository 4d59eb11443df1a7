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

//! Arithmetic contexts: precision, rounding, exponent range, flags and
//! traps.

use crate::error::{Error, Result};
use crate::Integer;
use std::fmt::{self, Debug, Formatter};
use std::ops::{BitOr, BitOrAssign};

/// The rounding methods.
///
/// # Examples
///
/// ```rust
/// use radixnum::{Context, Decimal, Round};
/// let ctx = Context::unlimited().with_precision(2);
/// let v: Decimal = "2.45".parse().unwrap();
/// let mut even = ctx.clone().with_rounding(Round::HalfEven);
/// assert_eq!(v.round_to_precision(&mut even).unwrap().to_string(), "2.4");
/// let mut up = ctx.with_rounding(Round::HalfUp);
/// assert_eq!(v.round_to_precision(&mut up).unwrap().to_string(), "2.5");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Round {
    /// Round to nearest, ties to even.
    HalfEven,
    /// Round to nearest, ties away from zero.
    HalfUp,
    /// Round to nearest, ties toward zero.
    HalfDown,
    /// Round away from zero.
    Up,
    /// Round toward zero.
    Down,
    /// Round toward plus infinity.
    Ceiling,
    /// Round toward minus infinity.
    Floor,
    /// Round toward zero unless that leaves a last digit of 0 or 5,
    /// in which case round away from zero.
    ZeroFiveUp,
    /// Round toward zero unless that leaves an even last digit, in
    /// which case round away from zero.
    Odd,
    /// `Odd` for binary numbers and `ZeroFiveUp` for decimal numbers.
    OddOrZeroFiveUp,
    /// Signal `Invalid` if any rounding would be needed.
    Unnecessary,
}

impl Default for Round {
    #[inline]
    fn default() -> Round {
        Round::HalfEven
    }
}

/// A set of conditions raised by an arithmetic operation.
///
/// # Examples
///
/// ```rust
/// use radixnum::Flags;
/// let f = Flags::INEXACT | Flags::ROUNDED;
/// assert!(f.contains(Flags::ROUNDED));
/// assert!(!f.contains(Flags::OVERFLOW));
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Flags(u32);

impl Flags {
    pub const NONE: Flags = Flags(0);
    pub const INEXACT: Flags = Flags(1);
    pub const ROUNDED: Flags = Flags(2);
    pub const SUBNORMAL: Flags = Flags(4);
    pub const UNDERFLOW: Flags = Flags(8);
    pub const OVERFLOW: Flags = Flags(16);
    pub const CLAMPED: Flags = Flags(32);
    pub const INVALID: Flags = Flags(64);
    pub const DIVIDE_BY_ZERO: Flags = Flags(128);
    pub const LOST_DIGITS: Flags = Flags(256);

    const NAMES: [(Flags, &'static str); 9] = [
        (Flags::INEXACT, "Inexact"),
        (Flags::ROUNDED, "Rounded"),
        (Flags::SUBNORMAL, "Subnormal"),
        (Flags::UNDERFLOW, "Underflow"),
        (Flags::OVERFLOW, "Overflow"),
        (Flags::CLAMPED, "Clamped"),
        (Flags::INVALID, "Invalid"),
        (Flags::DIVIDE_BY_ZERO, "DivideByZero"),
        (Flags::LOST_DIGITS, "LostDigits"),
    ];

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every flag in `other` is also set in `self`.
    #[inline]
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if any flag in `other` is also set in `self`.
    #[inline]
    pub const fn intersects(self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, other: Flags) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: Flags) {
        self.0 &= !other.0;
    }

    #[inline]
    pub const fn intersection(self, other: Flags) -> Flags {
        Flags(self.0 & other.0)
    }
}

impl BitOr for Flags {
    type Output = Flags;
    #[inline]
    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl Debug for Flags {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let mut first = true;
        for &(flag, name) in Flags::NAMES.iter() {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// The exponent range of a context.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct ExponentRange {
    pub(crate) emin: Integer,
    pub(crate) emax: Integer,
}

/// An arithmetic context.
///
/// A context holds the precision (in digits for decimal numbers and
/// bits for binary numbers, zero meaning unlimited), the rounding mode,
/// an optional exponent range, and the flags raised by the operations
/// that used it. If a raised flag is also one of the context's traps,
/// the operation fails with [`Error::Trap`] instead.
///
/// By default `emin` and `emax` bound the adjusted exponent, that is
/// the exponent the value has when written with a single digit before
/// the point. With [`with_adjust_exponent(false)`] they bound the
/// exponent of the last digit of a full-precision mantissa instead.
///
/// [`with_adjust_exponent(false)`]: Context::with_adjust_exponent
///
/// # Examples
///
/// ```rust
/// use radixnum::{Context, Decimal, Flags};
/// let mut ctx = Context::decimal32().with_blank_flags();
/// let third = Decimal::ONE.divide_ctx(&Decimal::from(3), &mut ctx).unwrap();
/// assert_eq!(third.to_string(), "0.3333333");
/// assert!(ctx.flags().contains(Flags::INEXACT | Flags::ROUNDED));
/// ```
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Context {
    precision: u64,
    rounding: Round,
    range: Option<ExponentRange>,
    adjust_exponent: bool,
    clamp: bool,
    simplified: bool,
    has_flags: bool,
    flags: Flags,
    traps: Flags,
}

impl Context {
    /// Creates a context with the given precision and rounding and no
    /// exponent range.
    pub fn new(precision: u64, rounding: Round) -> Context {
        Context {
            precision,
            rounding,
            range: None,
            adjust_exponent: true,
            clamp: false,
            simplified: false,
            has_flags: false,
            flags: Flags::NONE,
            traps: Flags::NONE,
        }
    }

    /// Unlimited precision, round half to even, no exponent range.
    pub fn unlimited() -> Context {
        Context::new(0, Round::HalfEven)
    }

    fn ieee(precision: u64, emin: i32, emax: i32, clamp: bool) -> Context {
        Context {
            clamp,
            ..Context::new(precision, Round::HalfEven).with_exponent_range(emin, emax)
        }
    }

    /// IEEE 754 decimal32 interchange format.
    pub fn decimal32() -> Context {
        Context::ieee(7, -95, 96, true)
    }

    /// IEEE 754 decimal64 interchange format.
    pub fn decimal64() -> Context {
        Context::ieee(16, -383, 384, true)
    }

    /// IEEE 754 decimal128 interchange format.
    pub fn decimal128() -> Context {
        Context::ieee(34, -6143, 6144, true)
    }

    /// IEEE 754 binary16 (half precision).
    pub fn binary16() -> Context {
        Context::ieee(11, -14, 15, false)
    }

    /// IEEE 754 binary32 (single precision).
    pub fn binary32() -> Context {
        Context::ieee(24, -126, 127, false)
    }

    /// IEEE 754 binary64 (double precision).
    pub fn binary64() -> Context {
        Context::ieee(53, -1022, 1023, false)
    }

    /// IEEE 754 binary128 (quadruple precision).
    pub fn binary128() -> Context {
        Context::ieee(113, -16382, 16383, false)
    }

    /// The General Decimal Arithmetic basic context: nine digits, round
    /// half up, and traps for invalid operations, division by zero and
    /// overflow.
    pub fn basic() -> Context {
        Context::new(9, Round::HalfUp)
            .with_exponent_range(-999_999_999, 999_999_999)
            .with_traps(Flags::INVALID | Flags::DIVIDE_BY_ZERO | Flags::OVERFLOW)
    }

    /// Common Language Infrastructure decimal: 29 digits, half even,
    /// and at most 28 digits after the point.
    pub fn cli_decimal() -> Context {
        Context {
            adjust_exponent: false,
            clamp: true,
            ..Context::new(29, Round::HalfEven).with_exponent_range(-28, 0)
        }
    }

    #[inline]
    pub fn with_precision(mut self, precision: u64) -> Context {
        self.precision = precision;
        self
    }

    /// Sets the precision from an `Integer`, failing with
    /// `ArgumentInvalid` if it is negative or too large.
    pub fn with_big_precision(self, precision: &Integer) -> Result<Context> {
        if precision.is_negative() {
            return Err(Error::ArgumentInvalid("precision is negative".into()));
        }
        let p = precision
            .to_u64()
            .ok_or_else(|| Error::ArgumentInvalid("precision is too large".into()))?;
        Ok(self.with_precision(p))
    }

    #[inline]
    pub fn with_rounding(mut self, rounding: Round) -> Context {
        self.rounding = rounding;
        self
    }

    /// Sets the exponent range; `emin` should be below `emax`.
    pub fn with_exponent_range(self, emin: i32, emax: i32) -> Context {
        self.with_big_exponent_range(Integer::from(emin), Integer::from(emax))
    }

    pub fn with_big_exponent_range(mut self, emin: Integer, emax: Integer) -> Context {
        self.range = Some(ExponentRange { emin, emax });
        self
    }

    pub fn with_unlimited_exponent_range(mut self) -> Context {
        self.range = None;
        self
    }

    #[inline]
    pub fn with_adjust_exponent(mut self, adjust: bool) -> Context {
        self.adjust_exponent = adjust;
        self
    }

    /// Clamps the exponent of large values so that a full-precision
    /// mantissa still fits below `emax`, padding with zeros.
    #[inline]
    pub fn with_clamp_normal_exponents(mut self, clamp: bool) -> Context {
        self.clamp = clamp;
        self
    }

    /// Enables simplified arithmetic: operands are rounded to the
    /// precision first, there are no subnormal numbers, and zero results
    /// are always positive.
    #[inline]
    pub fn with_simplified(mut self, simplified: bool) -> Context {
        self.simplified = simplified;
        self
    }

    /// Starts recording flags, clearing any recorded so far.
    #[inline]
    pub fn with_blank_flags(mut self) -> Context {
        self.has_flags = true;
        self.flags = Flags::NONE;
        self
    }

    #[inline]
    pub fn with_traps(mut self, traps: Flags) -> Context {
        self.traps = traps;
        self
    }

    #[inline]
    pub fn precision(&self) -> u64 {
        self.precision
    }

    #[inline]
    pub fn has_max_precision(&self) -> bool {
        self.precision != 0
    }

    #[inline]
    pub fn rounding(&self) -> Round {
        self.rounding
    }

    #[inline]
    pub fn emin(&self) -> Option<&Integer> {
        self.range.as_ref().map(|r| &r.emin)
    }

    #[inline]
    pub fn emax(&self) -> Option<&Integer> {
        self.range.as_ref().map(|r| &r.emax)
    }

    #[inline]
    pub fn has_exponent_range(&self) -> bool {
        self.range.is_some()
    }

    #[inline]
    pub fn adjust_exponent(&self) -> bool {
        self.adjust_exponent
    }

    #[inline]
    pub fn clamp_normal_exponents(&self) -> bool {
        self.clamp
    }

    #[inline]
    pub fn is_simplified(&self) -> bool {
        self.simplified
    }

    #[inline]
    pub fn has_flags(&self) -> bool {
        self.has_flags
    }

    /// The flags recorded so far.
    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    #[inline]
    pub fn traps(&self) -> Flags {
        self.traps
    }

    /// Clears the recorded flags.
    #[inline]
    pub fn clear_flags(&mut self) {
        self.flags = Flags::NONE;
    }

    /// The adjusted exponent range, or `None` if the range is unlimited.
    pub(crate) fn adjusted_range(&self) -> Option<(Integer, Integer)> {
        let r = self.range.as_ref()?;
        if self.adjust_exponent || self.precision == 0 {
            Some((r.emin.clone(), r.emax.clone()))
        } else {
            let shift = Integer::from(self.precision - 1);
            Some((&r.emin + &shift, &r.emax + &shift))
        }
    }

    /// Records `flags`, failing if any of them is trapped.
    pub(crate) fn signal(&mut self, flags: Flags) -> Result<()> {
        if flags.is_empty() {
            return Ok(());
        }
        if self.has_flags {
            self.flags |= flags;
        }
        let trapped = flags.intersection(self.traps);
        if trapped.is_empty() {
            Ok(())
        } else {
            tracing::debug!(flags = ?trapped, "context trap raised");
            Err(Error::Trap(trapped))
        }
    }
}

impl Default for Context {
    #[inline]
    fn default() -> Context {
        Context::unlimited()
    }
}

impl Debug for Context {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Context");
        s.field("precision", &self.precision)
            .field("rounding", &self.rounding);
        if let Some(ref r) = self.range {
            s.field("emin", &r.emin).field("emax", &r.emax);
        }
        s.field("adjust_exponent", &self.adjust_exponent)
            .field("clamp", &self.clamp)
            .field("simplified", &self.simplified)
            .field("flags", &self.flags)
            .field("traps", &self.traps)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_flags() {
        let mut f = Flags::NONE;
        assert!(f.is_empty());
        f.insert(Flags::OVERFLOW);
        f |= Flags::INEXACT;
        assert!(f.contains(Flags::OVERFLOW | Flags::INEXACT));
        assert!(f.intersects(Flags::INEXACT | Flags::CLAMPED));
        f.remove(Flags::OVERFLOW);
        assert_eq!(f, Flags::INEXACT);
        assert_eq!(format!("{:?}", Flags::INEXACT | Flags::CLAMPED), "Inexact | Clamped");
    }

    #[test]
    fn check_signal() {
        let mut ctx = Context::unlimited().with_blank_flags().with_traps(Flags::INVALID);
        assert!(ctx.signal(Flags::INEXACT).is_ok());
        assert_eq!(ctx.signal(Flags::INVALID | Flags::ROUNDED), Err(Error::Trap(Flags::INVALID)));
        assert!(ctx.flags().contains(Flags::INEXACT | Flags::INVALID | Flags::ROUNDED));
        ctx.clear_flags();
        assert!(ctx.flags().is_empty());

        let mut quiet = Context::unlimited();
        assert!(quiet.signal(Flags::INEXACT).is_ok());
        assert!(quiet.flags().is_empty());
    }

    #[test]
    fn check_presets() {
        let d = Context::binary64();
        assert_eq!(d.precision(), 53);
        assert_eq!(d.adjusted_range(), Some((Integer::from(-1022), Integer::from(1023))));
        let c = Context::cli_decimal();
        assert_eq!(c.adjusted_range(), Some((Integer::from(0), Integer::from(28))));
        assert!(Context::basic().traps().contains(Flags::OVERFLOW));
        assert!(Context::with_big_precision(Context::unlimited(), &Integer::from(-1)).is_err());
    }
}
