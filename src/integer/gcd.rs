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

//! Binary greatest common divisor.

use crate::integer::limbs::{self, compare, trimmed, Limb};
use std::cmp::Ordering;

/// Stein's algorithm on native words.
pub fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    if a == 0 {
        return b;
    }
    if b == 0 {
        return a;
    }
    let shift = (a | b).trailing_zeros();
    a >>= a.trailing_zeros();
    loop {
        b >>= b.trailing_zeros();
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }
        b -= a;
        if b == 0 {
            return a << shift;
        }
    }
}

/// Removes low zero bits from an odd-making pass, preferring whole
/// bytes, then nibbles, pairs and single bits.
fn strip_low_zeros(a: &mut Vec<Limb>) {
    loop {
        let words = a.iter().take_while(|&&w| w == 0).count();
        if words > 0 {
            a.drain(..words);
        }
        let low = match a.first() {
            Some(&w) => w,
            None => return,
        };
        let shift = if low & 0xff == 0 {
            8
        } else if low & 0x0f == 0 {
            4
        } else if low & 0x03 == 0 {
            2
        } else if low & 0x01 == 0 {
            1
        } else {
            return;
        };
        limbs::shr_small_in_place(a, shift);
    }
}

/// Greatest common divisor of two magnitudes.
pub fn gcd(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let a = trimmed(a);
    let b = trimmed(b);
    if a.is_empty() {
        return b.to_vec();
    }
    if b.is_empty() {
        return a.to_vec();
    }
    if a.len() <= 4 && b.len() <= 4 {
        return limbs::from_u64(gcd_u64(limbs::low_u64(a), limbs::low_u64(b)));
    }
    let za = limbs::trailing_zeros(a).unwrap_or(0);
    let zb = limbs::trailing_zeros(b).unwrap_or(0);
    let common = za.min(zb);
    let mut u = a.to_vec();
    let mut v = b.to_vec();
    strip_low_zeros(&mut u);
    loop {
        strip_low_zeros(&mut v);
        if u.len() <= 4 && v.len() <= 4 {
            let g = gcd_u64(limbs::low_u64(&u), limbs::low_u64(&v));
            return limbs::shl_bits(&limbs::from_u64(g), common);
        }
        // both odd here; subtract the smaller from the larger
        match compare(&u, &v) {
            Ordering::Equal => return limbs::shl_bits(&u, common),
            Ordering::Greater => std::mem::swap(&mut u, &mut v),
            Ordering::Less => {}
        }
        limbs::sub_in_place(&mut v, &u);
        limbs::trim(&mut v);
    }
}
