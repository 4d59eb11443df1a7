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

//! Magnitude primitives over little-endian base-65536 limb slices.
//!
//! Slices passed in may carry high zero limbs unless stated
//! otherwise; results returned as `Vec` are always trimmed.

use std::cmp::Ordering;

pub type Limb = u16;
pub type DoubleLimb = u32;

pub const LIMB_BITS: u32 = 16;

/// Length of `a` without high zero limbs.
#[inline]
pub fn count_words(a: &[Limb]) -> usize {
    let mut n = a.len();
    while n > 0 && a[n - 1] == 0 {
        n -= 1;
    }
    n
}

#[inline]
pub fn trimmed(a: &[Limb]) -> &[Limb] {
    &a[..count_words(a)]
}

#[inline]
pub fn trim(v: &mut Vec<Limb>) {
    let n = count_words(v);
    v.truncate(n);
}

pub fn compare(a: &[Limb], b: &[Limb]) -> Ordering {
    let a = trimmed(a);
    let b = trimmed(b);
    if a.len() != b.len() {
        return a.len().cmp(&b.len());
    }
    for i in (0..a.len()).rev() {
        if a[i] != b[i] {
            return a[i].cmp(&b[i]);
        }
    }
    Ordering::Equal
}

/// Adds `b` into `acc[..]`, returning the carry out of the top limb.
///
/// `acc` must be at least as long as `b`.
pub fn add_in_place(acc: &mut [Limb], b: &[Limb]) -> Limb {
    debug_assert!(acc.len() >= b.len());
    let mut carry: DoubleLimb = 0;
    for i in 0..b.len() {
        let s = DoubleLimb::from(acc[i]) + DoubleLimb::from(b[i]) + carry;
        acc[i] = s as Limb;
        carry = s >> LIMB_BITS;
    }
    let mut i = b.len();
    while carry != 0 && i < acc.len() {
        let s = DoubleLimb::from(acc[i]) + carry;
        acc[i] = s as Limb;
        carry = s >> LIMB_BITS;
        i += 1;
    }
    carry as Limb
}

/// Subtracts `b` from `acc[..]`, returning the borrow out of the top
/// limb.
pub fn sub_in_place(acc: &mut [Limb], b: &[Limb]) -> Limb {
    let b = trimmed(b);
    debug_assert!(acc.len() >= b.len());
    let mut borrow: DoubleLimb = 0;
    for i in 0..b.len() {
        let d = DoubleLimb::from(acc[i])
            .wrapping_sub(DoubleLimb::from(b[i]))
            .wrapping_sub(borrow);
        acc[i] = d as Limb;
        borrow = (d >> 31) & 1;
    }
    let mut i = b.len();
    while borrow != 0 && i < acc.len() {
        let d = DoubleLimb::from(acc[i]).wrapping_sub(borrow);
        acc[i] = d as Limb;
        borrow = (d >> 31) & 1;
        i += 1;
    }
    borrow as Limb
}

/// Adds `b` shifted up by `shift` limbs into `acc`, growing it as
/// needed.
pub fn add_shifted(acc: &mut Vec<Limb>, b: &[Limb], shift: usize) {
    let b = trimmed(b);
    if b.is_empty() {
        return;
    }
    let need = shift + b.len() + 1;
    if acc.len() < need {
        acc.resize(need, 0);
    }
    let carry = add_in_place(&mut acc[shift..], b);
    if carry != 0 {
        acc.push(carry);
    }
}

pub fn add(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(long.len() + 1);
    out.extend_from_slice(long);
    let carry = add_in_place(&mut out, short);
    if carry != 0 {
        out.push(carry);
    }
    trim(&mut out);
    out
}

/// Computes `a - b`; requires `a >= b`.
pub fn sub(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let mut out = trimmed(a).to_vec();
    let borrow = sub_in_place(&mut out, b);
    debug_assert_eq!(borrow, 0);
    trim(&mut out);
    out
}

/// Multiplies `acc` by `m` and adds `a` in place.
pub fn mul_small_add(acc: &mut Vec<Limb>, m: Limb, a: Limb) {
    let mut carry = DoubleLimb::from(a);
    for w in acc.iter_mut() {
        let p = DoubleLimb::from(*w) * DoubleLimb::from(m) + carry;
        *w = p as Limb;
        carry = p >> LIMB_BITS;
    }
    if carry != 0 {
        acc.push(carry as Limb);
    }
    trim(acc);
}

pub fn shl_bits(a: &[Limb], bits: u64) -> Vec<Limb> {
    let a = trimmed(a);
    if a.is_empty() {
        return Vec::new();
    }
    let words = (bits / u64::from(LIMB_BITS)) as usize;
    let rem = (bits % u64::from(LIMB_BITS)) as u32;
    let mut out = vec![0; words + a.len() + 1];
    if rem == 0 {
        out[words..words + a.len()].copy_from_slice(a);
    } else {
        let mut carry: Limb = 0;
        for (i, &w) in a.iter().enumerate() {
            out[words + i] = (w << rem) | carry;
            carry = w >> (LIMB_BITS - rem);
        }
        out[words + a.len()] = carry;
    }
    trim(&mut out);
    out
}

pub fn shr_bits(a: &[Limb], bits: u64) -> Vec<Limb> {
    let a = trimmed(a);
    let words = bits / u64::from(LIMB_BITS);
    if words >= a.len() as u64 {
        return Vec::new();
    }
    let words = words as usize;
    let rem = (bits % u64::from(LIMB_BITS)) as u32;
    let src = &a[words..];
    let mut out = Vec::with_capacity(src.len());
    if rem == 0 {
        out.extend_from_slice(src);
    } else {
        for i in 0..src.len() {
            let hi = if i + 1 < src.len() { src[i + 1] } else { 0 };
            out.push((src[i] >> rem) | (hi << (LIMB_BITS - rem)));
        }
    }
    trim(&mut out);
    out
}

/// The lowest `bits` bits of `a`.
pub fn low_bits(a: &[Limb], bits: u64) -> Vec<Limb> {
    let words = ((bits + u64::from(LIMB_BITS) - 1) / u64::from(LIMB_BITS)) as usize;
    let mut out = trimmed(a)[..words.min(count_words(a))].to_vec();
    let rem = (bits % u64::from(LIMB_BITS)) as u32;
    if rem != 0 && out.len() == words {
        out[words - 1] &= (1 << rem) - 1;
    }
    trim(&mut out);
    out
}

/// Shifts `a` right in place by fewer than `LIMB_BITS` bits.
pub fn shr_small_in_place(a: &mut Vec<Limb>, bits: u32) {
    debug_assert!(bits < LIMB_BITS);
    if bits == 0 {
        return;
    }
    let n = a.len();
    for i in 0..n {
        let hi = if i + 1 < n { a[i + 1] } else { 0 };
        a[i] = (a[i] >> bits) | (hi << (LIMB_BITS - bits));
    }
    trim(a);
}

/// Number of significant bits.
#[inline]
pub fn bit_length(a: &[Limb]) -> u64 {
    let a = trimmed(a);
    match a.last() {
        None => 0,
        Some(&top) => {
            (a.len() as u64 - 1) * u64::from(LIMB_BITS)
                + u64::from(LIMB_BITS - top.leading_zeros())
        }
    }
}

/// Index of the lowest set bit; `None` for zero.
pub fn trailing_zeros(a: &[Limb]) -> Option<u64> {
    a.iter()
        .position(|&w| w != 0)
        .map(|i| i as u64 * u64::from(LIMB_BITS) + u64::from(a[i].trailing_zeros()))
}

pub fn from_u64(mut v: u64) -> Vec<Limb> {
    let mut out = Vec::with_capacity(4);
    while v != 0 {
        out.push(v as Limb);
        v >>= LIMB_BITS;
    }
    out
}

pub fn from_u128(mut v: u128) -> Vec<Limb> {
    let mut out = Vec::with_capacity(8);
    while v != 0 {
        out.push(v as Limb);
        v >>= LIMB_BITS;
    }
    out
}

/// Low 64 bits of the magnitude.
pub fn low_u64(a: &[Limb]) -> u64 {
    a.iter()
        .take(4)
        .enumerate()
        .fold(0, |acc, (i, &w)| acc | (u64::from(w) << (16 * i)))
}

pub fn low_u128(a: &[Limb]) -> u128 {
    a.iter()
        .take(8)
        .enumerate()
        .fold(0, |acc, (i, &w)| acc | (u128::from(w) << (16 * i)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_add_sub() {
        let a = from_u64(0xffff_ffff_ffff);
        let b = from_u64(1);
        let s = add(&a, &b);
        assert_eq!(low_u64(&s), 0x1_0000_0000_0000);
        assert_eq!(sub(&s, &b), a);
        assert_eq!(compare(&s, &a), Ordering::Greater);
        assert_eq!(compare(&[1, 0, 0], &[1]), Ordering::Equal);
    }

    #[test]
    fn check_shifts() {
        let a = from_u64(0x1234_5678_9abc);
        assert_eq!(low_u64(&shl_bits(&a, 20)), 0x1234_5678_9abc << 20);
        assert_eq!(low_u64(&shr_bits(&a, 20)), 0x1234_5678_9abc >> 20);
        assert!(shr_bits(&a, 64).is_empty());
        assert_eq!(bit_length(&a), 45);
        assert_eq!(trailing_zeros(&from_u64(0x10_0000)), Some(20));
        assert_eq!(trailing_zeros(&[]), None);
    }

    #[test]
    fn check_mul_small_add() {
        let mut acc = from_u64(9999);
        mul_small_add(&mut acc, 10000, 9999);
        assert_eq!(low_u64(&acc), 99_999_999);
    }
}
