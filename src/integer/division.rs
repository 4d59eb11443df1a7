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

//! Magnitude division.
//!
//! Single-limb divisors use a short division. Divisors shorter than
//! `BURNIKEL_ZIEGLER_THRESHOLD` limbs use Knuth's algorithm D; longer
//! divisors use the block-recursive method of Burnikel and Ziegler,
//! which reduces a 2n/n division to two 3n/2n divisions, each of which
//! is a 2n/n division of half size plus a multiplication.

use crate::integer::limbs::{
    self, bit_length, compare, trimmed, DoubleLimb, Limb, LIMB_BITS,
};
use crate::integer::mul;
use std::cmp::Ordering;
use tracing::trace;

pub const BURNIKEL_ZIEGLER_THRESHOLD: usize = 40;
const BURNIKEL_ZIEGLER_OFFSET: usize = 20;

/// Divides `a` by a nonzero `b`, returning the quotient and remainder.
pub fn div_rem(a: &[Limb], b: &[Limb]) -> (Vec<Limb>, Vec<Limb>) {
    let a = trimmed(a);
    let b = trimmed(b);
    assert!(!b.is_empty(), "division by zero");
    if compare(a, b) == Ordering::Less {
        return (Vec::new(), a.to_vec());
    }
    if b.len() == 1 {
        let (q, r) = div_rem_single(a, b[0]);
        let r = if r == 0 { Vec::new() } else { vec![r] };
        return (q, r);
    }
    if b.len() < BURNIKEL_ZIEGLER_THRESHOLD
        || a.len() - b.len() < BURNIKEL_ZIEGLER_OFFSET
    {
        knuth(a, b)
    } else {
        trace!(
            dividend_limbs = a.len(),
            divisor_limbs = b.len(),
            "block-recursive division"
        );
        burnikel_ziegler(a, b)
    }
}

pub fn div_rem_single(a: &[Limb], d: Limb) -> (Vec<Limb>, Limb) {
    assert!(d != 0, "division by zero");
    let a = trimmed(a);
    let d = DoubleLimb::from(d);
    let mut q = vec![0; a.len()];
    let mut rem: DoubleLimb = 0;
    for i in (0..a.len()).rev() {
        let cur = (rem << LIMB_BITS) | DoubleLimb::from(a[i]);
        q[i] = (cur / d) as Limb;
        rem = cur % d;
    }
    limbs::trim(&mut q);
    (q, rem as Limb)
}

/// Remainder of `a` modulo a single limb, without building the
/// quotient.
pub fn rem_single(a: &[Limb], d: Limb) -> Limb {
    let d = DoubleLimb::from(d);
    let mut rem: DoubleLimb = 0;
    for &w in a.iter().rev() {
        rem = ((rem << LIMB_BITS) | DoubleLimb::from(w)) % d;
    }
    rem as Limb
}

/// Knuth's algorithm D; `b` has at least two limbs and `a >= b`.
pub fn knuth(a: &[Limb], b: &[Limb]) -> (Vec<Limb>, Vec<Limb>) {
    let a = trimmed(a);
    let b = trimmed(b);
    let n = b.len();
    if n == 1 {
        let (q, r) = div_rem_single(a, b[0]);
        return (q, if r == 0 { Vec::new() } else { vec![r] });
    }
    if compare(a, b) == Ordering::Less {
        return (Vec::new(), a.to_vec());
    }
    let m = a.len() - n;
    let shift = u64::from(b[n - 1].leading_zeros());
    let bn = limbs::shl_bits(b, shift);
    debug_assert_eq!(bn.len(), n);
    let mut an = limbs::shl_bits(a, shift);
    an.resize(a.len() + 1, 0);

    let base: u64 = 1 << LIMB_BITS;
    let top = u64::from(bn[n - 1]);
    let second = u64::from(bn[n - 2]);
    let mut q = vec![0 as Limb; m + 1];
    for j in (0..=m).rev() {
        let num = (u64::from(an[j + n]) << LIMB_BITS) | u64::from(an[j + n - 1]);
        let mut qhat = num / top;
        let mut rhat = num % top;
        while qhat >= base || qhat * second > ((rhat << LIMB_BITS) | u64::from(an[j + n - 2])) {
            qhat -= 1;
            rhat += top;
            if rhat >= base {
                break;
            }
        }
        // multiply and subtract
        let mut borrow: i64 = 0;
        let mut carry: u64 = 0;
        for i in 0..n {
            let p = qhat * u64::from(bn[i]) + carry;
            carry = p >> LIMB_BITS;
            let t = i64::from(an[i + j]) - borrow - (p & 0xffff) as i64;
            an[i + j] = t as Limb;
            borrow = if t < 0 { 1 } else { 0 };
        }
        let t = i64::from(an[j + n]) - borrow - carry as i64;
        an[j + n] = t as Limb;
        if t < 0 {
            // add back
            qhat -= 1;
            let mut c: DoubleLimb = 0;
            for i in 0..n {
                let s = DoubleLimb::from(an[i + j]) + DoubleLimb::from(bn[i]) + c;
                an[i + j] = s as Limb;
                c = s >> LIMB_BITS;
            }
            an[j + n] = an[j + n].wrapping_add(c as Limb);
        }
        q[j] = qhat as Limb;
    }
    limbs::trim(&mut q);
    an.truncate(n);
    let r = limbs::shr_bits(&an, shift);
    (q, r)
}

fn burnikel_ziegler(a: &[Limb], b: &[Limb]) -> (Vec<Limb>, Vec<Limb>) {
    let s = b.len();
    // block size n == j * m, with m a power of two and j below the
    // threshold, so that halving n reaches the base case evenly
    let mut m = 1;
    while m * BURNIKEL_ZIEGLER_THRESHOLD <= s {
        m <<= 1;
    }
    let j = (s + m - 1) / m;
    let n = j * m;
    let block_bits = (n as u64) * u64::from(LIMB_BITS);
    let sigma = block_bits - bit_length(b);
    let bs = limbs::shl_bits(b, sigma);
    let as_ = limbs::shl_bits(a, sigma);
    debug_assert_eq!(bs.len(), n);
    let t = ((bit_length(&as_) + 1 + block_bits - 1) / block_bits).max(2) as usize;
    let block = |i: usize| -> &[Limb] {
        let lo = (i * n).min(as_.len());
        let hi = ((i + 1) * n).min(as_.len());
        &as_[lo..hi]
    };

    let mut z = join(block(t - 1), block(t - 2), n);
    let mut q: Vec<Limb> = Vec::new();
    let mut r = Vec::new();
    for i in (0..=t - 2).rev() {
        let (qi, ri) = div_two_by_one(&z, &bs, n);
        limbs::add_shifted(&mut q, &qi, i * n);
        if i > 0 {
            z = join(&ri, block(i - 1), n);
        } else {
            r = ri;
        }
    }
    limbs::trim(&mut q);
    (q, limbs::shr_bits(&r, sigma))
}

/// `hi * B^n + lo`, where `lo` is at most `n` limbs.
fn join(hi: &[Limb], lo: &[Limb], n: usize) -> Vec<Limb> {
    let hi = trimmed(hi);
    let mut out = vec![0; n + hi.len()];
    out[..lo.len()].copy_from_slice(lo);
    out[n..].copy_from_slice(hi);
    limbs::trim(&mut out);
    out
}

fn split(a: &[Limb], at: usize) -> (&[Limb], &[Limb]) {
    if a.len() <= at {
        (a, &[])
    } else {
        let (lo, hi) = a.split_at(at);
        (lo, hi)
    }
}

/// Divides `a < b * B^n` by the normalized `n`-limb `b`.
fn div_two_by_one(a: &[Limb], b: &[Limb], n: usize) -> (Vec<Limb>, Vec<Limb>) {
    if n % 2 == 1 || n < BURNIKEL_ZIEGLER_THRESHOLD {
        return knuth(a, b);
    }
    let half = n / 2;
    let (a4, upper) = split(a, half);
    let (q1, r) = div_three_by_two(upper, b, half);
    let (q2, s) = div_three_by_two(&join(&r, a4, half), b, half);
    let mut q = q2;
    limbs::add_shifted(&mut q, &q1, half);
    limbs::trim(&mut q);
    (q, s)
}

/// Divides the `3n`-limb `a < b * B^n` by the `2n`-limb normalized `b`.
fn div_three_by_two(a: &[Limb], b: &[Limb], n: usize) -> (Vec<Limb>, Vec<Limb>) {
    let (a3, a12) = split(a, n);
    let (_, a1) = split(a12, n);
    let (b2, b1) = split(b, n);
    let (mut q, r1) = if compare(a1, b1) == Ordering::Less {
        div_two_by_one(a12, b1, n)
    } else {
        // q = B^n - 1, r1 = a12 - q * b1 = a12 + b1 - b1 * B^n
        let q = vec![Limb::MAX; n];
        let sum = limbs::add(a12, b1);
        let r1 = limbs::sub(&sum, &join(b1, &[], n));
        (q, r1)
    };
    let d = mul::mul(&q, b2);
    let mut rr = join(&r1, a3, n);
    while compare(&rr, &d) == Ordering::Less {
        q = limbs::sub(&q, &[1]);
        rr = limbs::add(&rr, b);
    }
    let r = limbs::sub(&rr, &d);
    (q, r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_limbs(rng: &mut StdRng, len: usize) -> Vec<Limb> {
        let mut v: Vec<Limb> = (0..len).map(|_| rng.gen()).collect();
        if let Some(top) = v.last_mut() {
            *top |= 1;
        }
        v
    }

    fn check(a: &[Limb], b: &[Limb], q: &[Limb], r: &[Limb]) {
        assert_eq!(compare(r, b), Ordering::Less);
        let mut back = mul::mul(q, b);
        limbs::add_shifted(&mut back, r, 0);
        limbs::trim(&mut back);
        assert_eq!(back, trimmed(a));
    }

    #[test]
    fn check_single() {
        let (q, r) = div_rem_single(&[100], 7);
        assert_eq!((q, r), (vec![14], 2));
        assert_eq!(rem_single(&limbs::from_u64(1_000_000_007), 10), 7);
    }

    #[test]
    fn check_knuth() {
        let mut rng = StdRng::seed_from_u64(11);
        for &(la, lb) in &[(2, 2), (5, 2), (12, 7), (30, 29), (64, 3)] {
            let a = random_limbs(&mut rng, la);
            let b = random_limbs(&mut rng, lb);
            let (q, r) = knuth(&a, &b);
            check(&a, &b, &q, &r);
        }
        // needs the add-back step
        let a = [0, 0, 0x8000, 0x7fff];
        let b = [1, 0, 0x8000];
        let (q, r) = knuth(&a, &b);
        check(&a, &b, &q, &r);
    }

    #[test]
    fn check_burnikel_ziegler_matches_knuth() {
        let mut rng = StdRng::seed_from_u64(42);
        for &(la, lb) in &[(100, 40), (200, 80), (333, 97), (600, 170), (181, 41)] {
            let a = random_limbs(&mut rng, la);
            let b = random_limbs(&mut rng, lb);
            let (q, r) = burnikel_ziegler(&a, &b);
            check(&a, &b, &q, &r);
            assert_eq!((q, r), knuth(&a, &b));
        }
    }

    #[test]
    fn check_dispatch() {
        let a = limbs::from_u64(100);
        let (q, r) = div_rem(&a, &limbs::from_u64(200));
        assert!(q.is_empty());
        assert_eq!(r, a);
    }
}
