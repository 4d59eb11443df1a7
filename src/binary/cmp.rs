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

use crate::binary::big::MATH;
use crate::binary::BinaryHelper;
use crate::context::Context;
use crate::error::Result;
use crate::radix::RadixMath;
use crate::Binary;
use std::cmp::Ordering;

fn class_rank(b: &Binary) -> u8 {
    if b.is_quiet_nan() {
        3
    } else if b.is_signaling_nan() {
        2
    } else if b.is_infinity() {
        1
    } else {
        0
    }
}

impl Binary {
    /// Compares numerically, returning `None` if either value is NaN.
    #[inline]
    pub fn compare_to(&self, other: &Binary) -> Option<Ordering> {
        MATH.compare_to(self, other)
    }

    pub fn compare_to_with_context(&self, other: &Binary, ctx: &mut Context) -> Result<Binary> {
        MATH.compare_to_with_context(self, other, ctx)
    }

    /// Compares using the IEEE 754 total order, which `Ord` also uses.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Binary;
    /// let mut v = vec![Binary::NAN, Binary::from(1), Binary::NEGATIVE_ZERO, Binary::ZERO];
    /// v.sort();
    /// assert!(v[0].is_zero() && v[0].is_negative());
    /// assert!(v[3].is_nan());
    /// ```
    pub fn compare_to_total(&self, other: &Binary) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.compare_to_total_magnitude(other),
            (true, true) => self.compare_to_total_magnitude(other).reverse(),
        }
    }

    pub fn compare_to_total_magnitude(&self, other: &Binary) -> Ordering {
        let rank = class_rank(self);
        match rank.cmp(&class_rank(other)) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        match rank {
            0 => {
                let (ea, eb) = (self.exponent(), other.exponent());
                RadixMath::<BinaryHelper>::compare_magnitude(
                    &self.unsigned_mantissa(),
                    &ea,
                    &other.unsigned_mantissa(),
                    &eb,
                )
                .then_with(|| ea.cmp(&eb))
            }
            1 => Ordering::Equal,
            _ => self.mantissa.cmp(&other.mantissa),
        }
    }
}

impl Ord for Binary {
    #[inline]
    fn cmp(&self, other: &Binary) -> Ordering {
        self.compare_to_total(other)
    }
}

impl PartialOrd for Binary {
    #[inline]
    fn partial_cmp(&self, other: &Binary) -> Option<Ordering> {
        Some(self.compare_to_total(other))
    }
}

// Primitives compare as values with exponent zero, in the same order
// as `Ord`, so `==` agrees with the derived `Eq`.
#[inline]
fn total(lhs: &Binary, rhs: &Binary) -> Option<Ordering> {
    Some(lhs.compare_to_total(rhs))
}

cmp_prim! { Binary; total; i32 i64 u32 u64 f64 f32 }

#[cfg(test)]
mod tests {
    use crate::{Binary, Context};
    use std::cmp::Ordering;

    #[test]
    fn check_numeric() {
        let half = Binary::from_f64(0.5);
        assert_eq!(half.compare_to(&Binary::create(&1.into(), &(-1).into())), Some(Ordering::Equal));
        assert_eq!(Binary::NEGATIVE_ZERO.compare_to(&Binary::ZERO), Some(Ordering::Equal));
        assert_eq!(Binary::NAN.compare_to(&half), None);
        assert!(half < 1);
        assert!(half == 0.5);
        assert!(Binary::NEGATIVE_INFINITY < f64::MIN);
        let c = half
            .compare_to_with_context(&Binary::one(), &mut Context::unlimited())
            .unwrap();
        assert_eq!(c, -1);
    }

    #[test]
    fn check_total() {
        let two = Binary::from(2);
        let two_scaled = Binary::create(&4.into(), &(-1).into());
        assert_eq!(two.cmp(&two_scaled), Ordering::Greater);
        assert_eq!(Binary::SIGNALING_NAN.cmp(&Binary::NAN), Ordering::Less);
        assert_eq!(Binary::NAN.negate().cmp(&Binary::NEGATIVE_INFINITY), Ordering::Less);
        assert_eq!(Binary::POSITIVE_INFINITY.cmp(&Binary::from(i64::MAX)), Ordering::Greater);
    }
}
