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

use crate::Integer;
use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor,
    BitXorAssign, Div, DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign,
    Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

#[inline]
fn add(lhs: &Integer, rhs: &Integer) -> Integer {
    lhs.add_ref(rhs)
}

#[inline]
fn sub(lhs: &Integer, rhs: &Integer) -> Integer {
    lhs.sub_ref(rhs)
}

#[inline]
fn mul(lhs: &Integer, rhs: &Integer) -> Integer {
    lhs.mul_ref(rhs)
}

// Panics on a zero divisor, like the primitive integers.
fn div(lhs: &Integer, rhs: &Integer) -> Integer {
    match lhs.checked_div(rhs) {
        Ok(q) => q,
        Err(_) => panic!("division by zero"),
    }
}

fn rem(lhs: &Integer, rhs: &Integer) -> Integer {
    match lhs.checked_rem(rhs) {
        Ok(r) => r,
        Err(_) => panic!("division by zero"),
    }
}

#[inline]
fn neg(val: &Integer) -> Integer {
    val.clone().into_neg()
}

#[inline]
fn not(val: &Integer) -> Integer {
    Integer::not(val)
}

fn bitand(lhs: &Integer, rhs: &Integer) -> Integer {
    lhs.bitwise(rhs, |a, b| a & b)
}

fn bitor(lhs: &Integer, rhs: &Integer) -> Integer {
    lhs.bitwise(rhs, |a, b| a | b)
}

fn bitxor(lhs: &Integer, rhs: &Integer) -> Integer {
    lhs.bitwise(rhs, |a, b| a ^ b)
}

arith_unary! { Integer; neg; Neg neg }
arith_unary! { Integer; not; Not not }
arith_binary! { Integer; add; Add add; AddAssign add_assign }
arith_binary! { Integer; sub; Sub sub; SubAssign sub_assign }
arith_binary! { Integer; mul; Mul mul; MulAssign mul_assign }
arith_binary! { Integer; div; Div div; DivAssign div_assign }
arith_binary! { Integer; rem; Rem rem; RemAssign rem_assign }
arith_binary! { Integer; bitand; BitAnd bitand; BitAndAssign bitand_assign }
arith_binary! { Integer; bitor; BitOr bitor; BitOrAssign bitor_assign }
arith_binary! { Integer; bitxor; BitXor bitxor; BitXorAssign bitxor_assign }

arith_prim! { Integer; add; Add add; AddAssign add_assign; i32 i64 u32 u64 }
arith_prim! { Integer; sub; Sub sub; SubAssign sub_assign; i32 i64 u32 u64 }
arith_prim! { Integer; mul; Mul mul; MulAssign mul_assign; i32 i64 u32 u64 }
arith_prim! { Integer; div; Div div; DivAssign div_assign; i32 i64 u32 u64 }
arith_prim! { Integer; rem; Rem rem; RemAssign rem_assign; i32 i64 u32 u64 }

macro_rules! shift {
    { $($T:ty)* } => { $(
        impl Shl<$T> for Integer {
            type Output = Integer;
            #[inline]
            fn shl(self, bits: $T) -> Integer {
                self.shl_bits(u64::from(bits))
            }
        }

        impl<'a> Shl<$T> for &'a Integer {
            type Output = Integer;
            #[inline]
            fn shl(self, bits: $T) -> Integer {
                self.shl_bits(u64::from(bits))
            }
        }

        impl ShlAssign<$T> for Integer {
            #[inline]
            fn shl_assign(&mut self, bits: $T) {
                *self = self.shl_bits(u64::from(bits));
            }
        }

        impl Shr<$T> for Integer {
            type Output = Integer;
            #[inline]
            fn shr(self, bits: $T) -> Integer {
                self.shr_bits(u64::from(bits))
            }
        }

        impl<'a> Shr<$T> for &'a Integer {
            type Output = Integer;
            #[inline]
            fn shr(self, bits: $T) -> Integer {
                self.shr_bits(u64::from(bits))
            }
        }

        impl ShrAssign<$T> for Integer {
            #[inline]
            fn shr_assign(&mut self, bits: $T) {
                *self = self.shr_bits(u64::from(bits));
            }
        }
    )* };
}

shift! { u32 u64 }

impl Sum for Integer {
    fn sum<I>(iter: I) -> Integer
    where
        I: Iterator<Item = Integer>,
    {
        iter.fold(Integer::new(), |acc, x| acc.add_ref(&x))
    }
}

impl<'a> Sum<&'a Integer> for Integer {
    fn sum<I>(iter: I) -> Integer
    where
        I: Iterator<Item = &'a Integer>,
    {
        iter.fold(Integer::new(), |acc, x| acc.add_ref(x))
    }
}

impl Product for Integer {
    fn product<I>(iter: I) -> Integer
    where
        I: Iterator<Item = Integer>,
    {
        iter.fold(Integer::from(1), |acc, x| acc.mul_ref(&x))
    }
}

impl<'a> Product<&'a Integer> for Integer {
    fn product<I>(iter: I) -> Integer
    where
        I: Iterator<Item = &'a Integer>,
    {
        iter.fold(Integer::from(1), |acc, x| acc.mul_ref(x))
    }
}

#[cfg(test)]
mod tests {
    use crate::Integer;

    #[test]
    fn check_arith_prim() {
        let large = [(1, 100), (-11, 200), (33, 150)];
        let s = [i32::MIN, -101, -100, -1, 0, 1, 100, 101, i32::MAX];
        for &op in &s {
            let iop = Integer::from(op);
            let against = large
                .iter()
                .map(|&(n, s)| Integer::from(n) << s as u32)
                .chain(s.iter().map(|&x| Integer::from(x)));
            for b in against {
                assert_eq!(b.clone() + op, b.clone() + &iop);
                assert_eq!(b.clone() - op, b.clone() - &iop);
                assert_eq!(b.clone() * op, b.clone() * &iop);
                if op != 0 {
                    assert_eq!(b.clone() / op, b.clone() / &iop);
                    assert_eq!(b.clone() % op, b.clone() % &iop);
                }
                assert_eq!(op + b.clone(), iop.clone() + &b);
                assert_eq!(op - b.clone(), iop.clone() - &b);
                assert_eq!(op * b.clone(), iop.clone() * &b);
                if !b.is_zero() {
                    assert_eq!(op / b.clone(), iop.clone() / &b);
                    assert_eq!(op % b.clone(), iop.clone() % &b);
                }
            }
        }
    }

    #[test]
    fn check_small_matches_i64() {
        let vals = [-70_000i64, -65_536, -65_535, -1, 0, 1, 65_535, 65_536, 4_294_967_295];
        for &a in &vals {
            for &b in &vals {
                assert_eq!(Integer::from(a) + Integer::from(b), a + b);
                assert_eq!(Integer::from(a) - Integer::from(b), a - b);
                assert_eq!(Integer::from(a) * Integer::from(b), i128::from(a) * i128::from(b));
                if b != 0 {
                    assert_eq!(Integer::from(a) / Integer::from(b), a / b);
                    assert_eq!(Integer::from(a) % Integer::from(b), a % b);
                }
            }
        }
    }

    #[test]
    fn check_bitwise() {
        for &a in &[-300i64, -1, 0, 5, 0x1_0000_ffff] {
            for &b in &[-7i64, 0, 3, -0x1_0000_0000] {
                assert_eq!(Integer::from(a) & Integer::from(b), a & b);
                assert_eq!(Integer::from(a) | Integer::from(b), a | b);
                assert_eq!(Integer::from(a) ^ Integer::from(b), a ^ b);
            }
            assert_eq!(!Integer::from(a), !a);
        }
    }

    #[test]
    fn check_scenarios() {
        let a = Integer::from(123_456_789_012_345_i64) * Integer::from(2);
        assert_eq!(a, "246913578024690".parse::<Integer>().unwrap());
        let hundred: Integer = "100".parse().unwrap();
        let seven: Integer = "7".parse().unwrap();
        assert_eq!(&hundred / &seven, 14);
        assert_eq!(&hundred % &seven, 2);
    }

    #[test]
    fn check_sum_product() {
        let v: Vec<Integer> = (1..=20).map(Integer::from).collect();
        assert_eq!(v.iter().sum::<Integer>(), 210);
        assert_eq!(v.iter().product::<Integer>(), 2_432_902_008_176_640_000u64);
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn check_div_zero_panics() {
        let _ = Integer::from(1) / Integer::new();
    }
}
