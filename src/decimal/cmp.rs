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

use crate::context::Context;
use crate::decimal::big::MATH;
use crate::decimal::DecimalHelper;
use crate::error::Result;
use crate::radix::RadixMath;
use crate::Decimal;
use std::cmp::Ordering;

// finite < infinity < signaling NaN < quiet NaN
fn class_rank(d: &Decimal) -> u8 {
    if d.is_quiet_nan() {
        3
    } else if d.is_signaling_nan() {
        2
    } else if d.is_infinity() {
        1
    } else {
        0
    }
}

impl Decimal {
    /// Compares numerically, returning `None` if either value is NaN.
    ///
    /// Values that differ only in representation compare equal, and so
    /// do the two zeros.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Decimal;
    /// use std::cmp::Ordering;
    /// let a: Decimal = "1.0".parse().unwrap();
    /// let b: Decimal = "1.00".parse().unwrap();
    /// assert_eq!(a.compare_to(&b), Some(Ordering::Equal));
    /// assert_eq!(a.compare_to(&Decimal::NAN), None);
    /// ```
    #[inline]
    pub fn compare_to(&self, other: &Decimal) -> Option<Ordering> {
        MATH.compare_to(self, other)
    }

    /// Compares numerically, giving −1, 0 or 1 as a `Decimal`, or a
    /// quiet NaN if either operand is NaN.
    pub fn compare_to_with_context(&self, other: &Decimal, ctx: &mut Context) -> Result<Decimal> {
        MATH.compare_to_with_context(self, other, ctx)
    }

    /// Compares using the IEEE 754 total order.
    ///
    /// Negative values order before positive ones, so −0 < +0 and a
    /// NaN with the sign bit set orders before everything. Among values
    /// of the same sign, finite numbers order before infinity, which
    /// orders before signaling NaNs, which order before quiet NaNs.
    /// Numerically equal finite values order by exponent, and NaNs by
    /// payload.
    pub fn compare_to_total(&self, other: &Decimal) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.compare_to_total_magnitude(other),
            (true, true) => self.compare_to_total_magnitude(other).reverse(),
        }
    }

    /// Like [`compare_to_total`](Decimal::compare_to_total) on the
    /// absolute values.
    pub fn compare_to_total_magnitude(&self, other: &Decimal) -> Ordering {
        let rank = class_rank(self);
        match rank.cmp(&class_rank(other)) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        match rank {
            0 => {
                let (ea, eb) = (self.exponent(), other.exponent());
                RadixMath::<DecimalHelper>::compare_magnitude(
                    &self.unsigned_mantissa(),
                    &ea,
                    &other.unsigned_mantissa(),
                    &eb,
                )
                .then_with(|| ea.cmp(&eb))
            }
            1 => Ordering::Equal,
            _ => self.mantissa.compare_to(&other.mantissa),
        }
    }
}

impl Ord for Decimal {
    #[inline]
    fn cmp(&self, other: &Decimal) -> Ordering {
        self.compare_to_total(other)
    }
}

impl PartialOrd for Decimal {
    #[inline]
    fn partial_cmp(&self, other: &Decimal) -> Option<Ordering> {
        Some(self.compare_to_total(other))
    }
}

// Primitives compare as values with exponent zero, in the same order
// as `Ord`, so `==` agrees with the derived `Eq`.
#[inline]
fn total(lhs: &Decimal, rhs: &Decimal) -> Option<Ordering> {
    Some(lhs.compare_to_total(rhs))
}

cmp_prim! { Decimal; total; i32 i64 u32 u64 }

#[cfg(test)]
mod tests {
    use crate::Decimal;
    use std::cmp::Ordering;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn check_numeric() {
        assert_eq!(dec("-0").compare_to(&dec("0.000")), Some(Ordering::Equal));
        assert_eq!(dec("1E+2").compare_to(&dec("99.9")), Some(Ordering::Greater));
        assert_eq!(dec("-5").compare_to(&dec("-4.99999")), Some(Ordering::Less));
        assert_eq!(
            Decimal::NEGATIVE_INFINITY.compare_to(&dec("-1E+999999")),
            Some(Ordering::Less)
        );
        assert_eq!(dec("12.0").compare_to(&Decimal::from(12)), Some(Ordering::Equal));
        assert!(dec("0.5") < 1);
        assert!(2u32 > dec("1.99"));
        assert!(Decimal::NAN != 0);
    }

    #[test]
    fn check_primitive_order_matches_ord() {
        assert_eq!(dec("12"), 12);
        assert_ne!(dec("12.0"), 12);
        assert!(dec("12.0") < 12);
        assert!(dec("-0") < 0);
        assert!(Decimal::NAN > i64::MAX);
        assert!(Decimal::NAN.negate() < i32::MIN);
        for s in ["-7", "-0", "0", "0.0", "3", "3.00", "1E+1", "NaN", "-sNaN3"] {
            let d = dec(s);
            for v in [-7i64, 0, 3, 10] {
                let w = Decimal::from(v);
                assert_eq!(d.partial_cmp(&v), Some(d.cmp(&w)), "{} vs {}", s, v);
                assert_eq!(d == v, d == w, "{} vs {}", s, v);
                assert_eq!(v.partial_cmp(&d), Some(w.cmp(&d)), "{} vs {}", v, s);
            }
        }
    }

    #[test]
    fn check_total() {
        assert_eq!(dec("1.0").cmp(&dec("1.00")), Ordering::Greater);
        assert_eq!(dec("-1.0").cmp(&dec("-1.00")), Ordering::Less);
        assert_eq!(dec("-0").cmp(&dec("0")), Ordering::Less);
        assert_eq!(dec("NaN2").cmp(&dec("NaN10")), Ordering::Less);
        assert_eq!(dec("sNaN99").cmp(&dec("NaN1")), Ordering::Less);
        assert_eq!(dec("-NaN").cmp(&dec("-Infinity")), Ordering::Less);
        assert_eq!(dec("Infinity").cmp(&dec("1E+999999999999")), Ordering::Greater);
        assert_eq!(dec("7.5").cmp(&dec("7.5")), Ordering::Equal);
        assert_eq!(
            dec("-3").compare_to_total_magnitude(&dec("2")),
            Ordering::Greater
        );
    }
}
