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

//! Integer square root with remainder.

use crate::integer::division;
use crate::integer::limbs::{self, bit_length, compare, trimmed, Limb};
use crate::integer::mul;
use std::cmp::Ordering;
use tracing::trace;

const RECURSIVE_LIMIT: usize = 4;

/// Floor square root of a native word.
pub fn sqrt_u64(x: u64) -> u64 {
    if x < 2 {
        return x;
    }
    let mut s = (x as f64).sqrt() as u64;
    while u128::from(s) * u128::from(s) > u128::from(x) {
        s -= 1;
    }
    while u128::from(s + 1) * u128::from(s + 1) <= u128::from(x) {
        s += 1;
    }
    s
}

/// Returns `(s, r)` with `s*s + r == a` and `s` the floor square root.
pub fn sqrt_rem(a: &[Limb]) -> (Vec<Limb>, Vec<Limb>) {
    let a = trimmed(a);
    let s = sqrt(a);
    let r = limbs::sub(a, &mul::square(&s));
    (s, r)
}

pub fn sqrt(a: &[Limb]) -> Vec<Limb> {
    let a = trimmed(a);
    if a.len() <= 2 {
        return limbs::from_u64(sqrt_u64(limbs::low_u64(a)));
    }
    if a.len() < RECURSIVE_LIMIT {
        return newton(a);
    }
    divide_and_conquer(a)
}

/// Newton iteration from an initial guess above the root; each step
/// costs one full division.
fn newton(a: &[Limb]) -> Vec<Limb> {
    let bits = bit_length(a);
    let mut x = limbs::shl_bits(&[1], (bits + 1) / 2);
    loop {
        let (q, _) = division::div_rem(a, &x);
        let sum = limbs::add(&x, &q);
        let y = limbs::shr_bits(&sum, 1);
        if compare(&y, &x) != Ordering::Less {
            return x;
        }
        x = y;
    }
}

/// Splits the normalized operand into four `k`-bit pieces
/// `a3 a2 a1 a0`, takes the root of `a3 a2` recursively and corrects
/// it with a single division.
fn divide_and_conquer(a: &[Limb]) -> Vec<Limb> {
    let len = bit_length(a);
    let k = (len + 3) / 4;
    let c = (4 * k - len) / 2;
    trace!(bits = len, piece_bits = k, "divide-and-conquer square root");
    let n = limbs::shl_bits(a, 2 * c);
    let a0 = limbs::low_bits(&n, k);
    let a1 = limbs::low_bits(&limbs::shr_bits(&n, k), k);
    let top = limbs::shr_bits(&n, 2 * k);

    let (s1, r1) = sqrt_rem(&top);
    let num = limbs::add(&limbs::shl_bits(&r1, k), &a1);
    let den = limbs::shl_bits(&s1, 1);
    let (q, u) = division::div_rem(&num, &den);
    let mut s = limbs::add(&limbs::shl_bits(&s1, k), &q);
    let t = limbs::add(&limbs::shl_bits(&u, k), &a0);
    if compare(&t, &mul::square(&q)) == Ordering::Less {
        s = limbs::sub(&s, &[1]);
    }
    limbs::shr_bits(&s, c)
}
