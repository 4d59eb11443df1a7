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

//! Operators on [`Decimal`] are exact: the result keeps every digit of
//! the operands. A quotient without a terminating decimal expansion is
//! NaN; use [`Decimal::divide_ctx`] to round it instead.
//!
//! Operators cannot return a `Result`, so every engine error becomes a
//! quiet NaN, including `Error::Unsupported` when two exponents are too
//! far apart for an exact sum. The `*_ctx` methods return the error.

use crate::Decimal;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[inline]
fn add(lhs: &Decimal, rhs: &Decimal) -> Decimal {
    Decimal::add(lhs, rhs)
}

#[inline]
fn sub(lhs: &Decimal, rhs: &Decimal) -> Decimal {
    lhs.subtract(rhs)
}

#[inline]
fn mul(lhs: &Decimal, rhs: &Decimal) -> Decimal {
    lhs.multiply(rhs)
}

#[inline]
fn div(lhs: &Decimal, rhs: &Decimal) -> Decimal {
    lhs.divide(rhs)
}

#[inline]
fn neg(val: &Decimal) -> Decimal {
    val.negate()
}

arith_unary! { Decimal; neg; Neg neg }
arith_binary! { Decimal; add; Add add; AddAssign add_assign }
arith_binary! { Decimal; sub; Sub sub; SubAssign sub_assign }
arith_binary! { Decimal; mul; Mul mul; MulAssign mul_assign }
arith_binary! { Decimal; div; Div div; DivAssign div_assign }

arith_prim! { Decimal; add; Add add; AddAssign add_assign; i32 i64 u32 u64 }
arith_prim! { Decimal; sub; Sub sub; SubAssign sub_assign; i32 i64 u32 u64 }
arith_prim! { Decimal; mul; Mul mul; MulAssign mul_assign; i32 i64 u32 u64 }
arith_prim! { Decimal; div; Div div; DivAssign div_assign; i32 i64 u32 u64 }

impl Sum for Decimal {
    fn sum<I>(iter: I) -> Decimal
    where
        I: Iterator<Item = Decimal>,
    {
        iter.fold(Decimal::ZERO, |acc, x| add(&acc, &x))
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I>(iter: I) -> Decimal
    where
        I: Iterator<Item = &'a Decimal>,
    {
        iter.fold(Decimal::ZERO, |acc, x| add(&acc, x))
    }
}

impl Product for Decimal {
    fn product<I>(iter: I) -> Decimal
    where
        I: Iterator<Item = Decimal>,
    {
        iter.fold(Decimal::ONE, |acc, x| mul(&acc, &x))
    }
}

impl<'a> Product<&'a Decimal> for Decimal {
    fn product<I>(iter: I) -> Decimal
    where
        I: Iterator<Item = &'a Decimal>,
    {
        iter.fold(Decimal::ONE, |acc, x| mul(&acc, x))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Context, Decimal, Error};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn check_ops() {
        let a = dec("1.25");
        let b = dec("0.5");
        assert_eq!((&a + &b).to_string(), "1.75");
        assert_eq!((&a - &b).to_string(), "0.75");
        assert_eq!((&a * &b).to_string(), "0.625");
        assert_eq!((&a / &b).to_string(), "2.5");
        assert_eq!((-&a).to_string(), "-1.25");
        assert!((Decimal::ONE / Decimal::from(7)).is_nan());
        assert!((Decimal::ONE / Decimal::ZERO).is_infinity());
    }

    #[test]
    fn check_assign_and_prim() {
        let mut x = dec("10.0");
        x += dec("0.05");
        assert_eq!(x.to_string(), "10.05");
        x -= 10;
        assert_eq!(x.to_string(), "0.05");
        x *= 4u32;
        assert_eq!(x.to_string(), "0.20");
        assert_eq!((3i32 - dec("0.5")).to_string(), "2.5");
        assert_eq!((dec("7") / 2i64).to_string(), "3.5");
    }

    #[test]
    fn check_sum_product() {
        let v = [dec("0.1"), dec("0.2"), dec("0.3")];
        let s: Decimal = v.iter().sum();
        assert_eq!(s.to_string(), "0.6");
        let p: Decimal = v.iter().product();
        assert_eq!(p.to_string(), "0.006");
        let empty: Vec<Decimal> = Vec::new();
        assert_eq!(empty.into_iter().sum::<Decimal>(), Decimal::ZERO);
    }

    #[test]
    fn check_engine_error_becomes_nan() {
        let huge = dec("1E+3000000000");
        assert!((&huge + 1i32).is_nan());
        assert!((&huge - &Decimal::ONE).is_nan());
        let err = huge
            .add_ctx(&Decimal::ONE, &mut Context::unlimited())
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn check_special_propagation() {
        let inf = Decimal::POSITIVE_INFINITY;
        assert!((&inf - &inf).is_nan());
        assert!((&inf * &Decimal::ZERO).is_nan());
        assert!((&Decimal::NAN + &Decimal::ONE).is_nan());
        assert!((&inf + &Decimal::ONE).is_infinity());
    }
}
