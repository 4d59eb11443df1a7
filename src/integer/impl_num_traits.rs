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

use crate::error::Error;
use crate::Integer;
use num_traits::{
    cast::{FromPrimitive, ToPrimitive},
    identities::{One, Zero},
    ops::mul_add::{MulAdd, MulAddAssign},
    sign::Signed,
    Num,
};

impl Zero for Integer {
    #[inline]
    fn zero() -> Self {
        Integer::new()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        Integer::is_zero(self)
    }
}

impl One for Integer {
    #[inline]
    fn one() -> Self {
        Integer::from(1u8)
    }

    #[inline]
    fn is_one(&self) -> bool {
        *self == 1
    }
}

impl Num for Integer {
    type FromStrRadixErr = Error;

    #[inline]
    fn from_str_radix(src: &str, radix: u32) -> Result<Self, Error> {
        Integer::from_str_radix(src, radix)
    }
}

impl Signed for Integer {
    #[inline]
    fn abs(&self) -> Self {
        Integer::abs(self)
    }

    #[inline]
    fn abs_sub(&self, other: &Self) -> Self {
        if *self <= *other {
            Integer::new()
        } else {
            self - other
        }
    }

    #[inline]
    fn signum(&self) -> Self {
        Integer::signum(self)
    }

    #[inline]
    fn is_positive(&self) -> bool {
        self.sign() > 0
    }

    #[inline]
    fn is_negative(&self) -> bool {
        Integer::is_negative(self)
    }
}

impl MulAdd for Integer {
    type Output = Integer;

    #[inline]
    fn mul_add(self, a: Integer, b: Integer) -> Integer {
        &self * &a + b
    }
}

impl MulAddAssign for Integer {
    #[inline]
    fn mul_add_assign(&mut self, a: Integer, b: Integer) {
        *self = &*self * &a + b
    }
}

impl ToPrimitive for Integer {
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        Integer::to_i64(self)
    }
    #[inline]
    fn to_u64(&self) -> Option<u64> {
        Integer::to_u64(self)
    }
    #[inline]
    fn to_i32(&self) -> Option<i32> {
        Integer::to_i32(self)
    }
    #[inline]
    fn to_i128(&self) -> Option<i128> {
        Integer::to_i128(self)
    }
    #[inline]
    fn to_u32(&self) -> Option<u32> {
        Integer::to_u32(self)
    }
    #[inline]
    fn to_u128(&self) -> Option<u128> {
        Integer::to_u128(self)
    }
    #[inline]
    fn to_f64(&self) -> Option<f64> {
        Some(Integer::to_f64(self))
    }
}

impl FromPrimitive for Integer {
    #[inline]
    fn from_i64(n: i64) -> Option<Self> {
        Some(n.into())
    }
    #[inline]
    fn from_u64(n: u64) -> Option<Self> {
        Some(n.into())
    }
    #[inline]
    fn from_i128(n: i128) -> Option<Self> {
        Some(n.into())
    }
    #[inline]
    fn from_u128(n: u128) -> Option<Self> {
        Some(n.into())
    }
    #[inline]
    fn from_f64(n: f64) -> Option<Self> {
        Integer::from_f64(n).ok()
    }
}

#[cfg(test)]
mod tests {
    use crate::Integer;
    use num_traits::{FromPrimitive, Num, One, Signed, ToPrimitive, Zero};

    #[test]
    fn check_traits() {
        assert!(<Integer as Zero>::zero().is_zero());
        assert!(<Integer as One>::one().is_one());
        let i = <Integer as Num>::from_str_radix("-zz", 36).unwrap();
        assert_eq!(i, -(35 * 36 + 35));
        assert_eq!(Signed::abs(&i), 35 * 36 + 35);
        assert_eq!(Signed::signum(&i), -1);
        assert_eq!(ToPrimitive::to_i64(&i), Some(-1295));
        assert_eq!(ToPrimitive::to_u64(&i), None);
        assert_eq!(<Integer as FromPrimitive>::from_f64(-3.9), Some(Integer::from(-3)));
        assert_eq!(<Integer as FromPrimitive>::from_f64(f64::INFINITY), None);
    }
}
