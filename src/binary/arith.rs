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

use crate::Binary;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[inline]
fn add(lhs: &Binary, rhs: &Binary) -> Binary {
    Binary::add(lhs, rhs)
}

#[inline]
fn sub(lhs: &Binary, rhs: &Binary) -> Binary {
    lhs.subtract(rhs)
}

#[inline]
fn mul(lhs: &Binary, rhs: &Binary) -> Binary {
    lhs.multiply(rhs)
}

// NaN unless the quotient is a binary fraction
#[inline]
fn div(lhs: &Binary, rhs: &Binary) -> Binary {
    lhs.divide(rhs)
}

#[inline]
fn neg(val: &Binary) -> Binary {
    val.negate()
}

arith_unary! { Binary; neg; Neg neg }
arith_binary! { Binary; add; Add add; AddAssign add_assign }
arith_binary! { Binary; sub; Sub sub; SubAssign sub_assign }
arith_binary! { Binary; mul; Mul mul; MulAssign mul_assign }
arith_binary! { Binary; div; Div div; DivAssign div_assign }

arith_prim! { Binary; add; Add add; AddAssign add_assign; i32 i64 u32 u64 }
arith_prim! { Binary; mul; Mul mul; MulAssign mul_assign; i32 i64 u32 u64 }

impl Sum for Binary {
    fn sum<I>(iter: I) -> Binary
    where
        I: Iterator<Item = Binary>,
    {
        iter.fold(Binary::ZERO, |acc, x| add(&acc, &x))
    }
}

#[cfg(test)]
mod tests {
    use crate::Binary;

    #[test]
    fn check_ops() {
        let a = Binary::from_f64(1.5);
        let b = Binary::from_f64(0.25);
        assert_eq!((&a + &b).to_f64(), 1.75);
        assert_eq!((&a - &b).to_f64(), 1.25);
        assert_eq!((&a * &b).to_f64(), 0.375);
        assert_eq!((&a / &b).to_f64(), 6.0);
        assert_eq!((-a.clone()).to_f64(), -1.5);
        assert!((Binary::one() / Binary::from(3)).is_nan());
        assert_eq!((a.clone() + 2i32).to_f64(), 3.5);
        assert_eq!((4u32 * a).to_f64(), 6.0);
    }

    #[test]
    fn check_exact_sum() {
        // exact, unlike f64 addition
        let v = [Binary::from_f64(1e20), Binary::from_f64(1.0), Binary::from_f64(-1e20)];
        let s: Binary = v.into_iter().sum();
        assert_eq!(s.to_f64(), 1.0);
    }
}
