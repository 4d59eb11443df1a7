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

//! Magnitude multiplication.
//!
//! Operands at most `SCHOOLBOOK_LIMIT` limbs long use the quadratic
//! method. Longer operands of the same size are split in halves
//! (Karatsuba); operands of different sizes have the longer one cut
//! into blocks of the shorter one's size.

use crate::integer::limbs::{
    self, add_in_place, add_shifted, sub_in_place, trimmed, DoubleLimb, Limb,
    LIMB_BITS,
};

pub const SCHOOLBOOK_LIMIT: usize = 10;

pub fn mul(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let a = trimmed(a);
    let b = trimmed(b);
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    if a.len() == 1 {
        return mul_single(b, a[0]);
    }
    if b.len() == 1 {
        return mul_single(a, b[0]);
    }
    if a.as_ptr() == b.as_ptr() && a.len() == b.len() {
        return square(a);
    }
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.len() <= SCHOOLBOOK_LIMIT {
        return schoolbook(long, short);
    }
    if long.len() == short.len() {
        return karatsuba(long, short);
    }
    chunked(long, short)
}

pub fn mul_single(a: &[Limb], m: Limb) -> Vec<Limb> {
    let a = trimmed(a);
    if m == 0 || a.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(a.len() + 1);
    let mut carry: DoubleLimb = 0;
    for &w in a {
        let p = DoubleLimb::from(w) * DoubleLimb::from(m) + carry;
        out.push(p as Limb);
        carry = p >> LIMB_BITS;
    }
    if carry != 0 {
        out.push(carry as Limb);
    }
    out
}

pub fn schoolbook(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let mut out = vec![0; a.len() + b.len()];
    for (j, &bw) in b.iter().enumerate() {
        if bw == 0 {
            continue;
        }
        let mut carry: DoubleLimb = 0;
        for (i, &aw) in a.iter().enumerate() {
            // max: 0xffff * 0xffff + 0xffff + 0xffff == 0xffff_ffff
            let p = DoubleLimb::from(aw) * DoubleLimb::from(bw)
                + DoubleLimb::from(out[i + j])
                + carry;
            out[i + j] = p as Limb;
            carry = p >> LIMB_BITS;
        }
        out[j + a.len()] = carry as Limb;
    }
    limbs::trim(&mut out);
    out
}

fn schoolbook_square(a: &[Limb]) -> Vec<Limb> {
    let n = a.len();
    let mut out = vec![0; 2 * n];
    // off-diagonal products, each computed once
    for i in 0..n {
        let mut carry: DoubleLimb = 0;
        let ai = DoubleLimb::from(a[i]);
        if ai == 0 {
            continue;
        }
        for j in i + 1..n {
            let p = ai * DoubleLimb::from(a[j]) + DoubleLimb::from(out[i + j]) + carry;
            out[i + j] = p as Limb;
            carry = p >> LIMB_BITS;
        }
        out[i + n] = carry as Limb;
    }
    // double them
    let mut carry: Limb = 0;
    for w in out.iter_mut() {
        let next = *w >> (LIMB_BITS - 1);
        *w = (*w << 1) | carry;
        carry = next;
    }
    // add the diagonal
    let mut carry: DoubleLimb = 0;
    for i in 0..n {
        let sq = DoubleLimb::from(a[i]) * DoubleLimb::from(a[i]);
        let lo = DoubleLimb::from(out[2 * i]) + (sq & 0xffff) + carry;
        out[2 * i] = lo as Limb;
        let hi = DoubleLimb::from(out[2 * i + 1]) + (sq >> LIMB_BITS) + (lo >> LIMB_BITS);
        out[2 * i + 1] = hi as Limb;
        carry = hi >> LIMB_BITS;
    }
    limbs::trim(&mut out);
    out
}

/// Recursive multiplication of two operands of equal length.
fn karatsuba(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let n = a.len();
    debug_assert_eq!(n, b.len());
    if n <= SCHOOLBOOK_LIMIT {
        return schoolbook(a, b);
    }
    let h = n / 2;
    let (a0, a1) = a.split_at(h);
    let (b0, b1) = b.split_at(h);
    let z0 = mul(a0, b0);
    let z2 = mul(a1, b1);
    let sa = limbs::add(a0, a1);
    let sb = limbs::add(b0, b1);
    let mut z1 = mul(&sa, &sb);
    z1.resize(z1.len().max(z0.len()).max(z2.len()) + 1, 0);
    sub_in_place(&mut z1, &z0);
    sub_in_place(&mut z1, &z2);
    let mut out = vec![0; 2 * n + 1];
    out[..z0.len()].copy_from_slice(&z0);
    add_shifted(&mut out, &z1, h);
    add_shifted(&mut out, &z2, 2 * h);
    limbs::trim(&mut out);
    out
}

/// Multiplies a long operand by a short one by cutting the long
/// operand into blocks of the short operand's length.
fn chunked(long: &[Limb], short: &[Limb]) -> Vec<Limb> {
    let block = short.len();
    let mut out = vec![0; long.len() + short.len() + 1];
    let mut offset = 0;
    while offset < long.len() {
        let end = (offset + block).min(long.len());
        let piece = trimmed(&long[offset..end]);
        if !piece.is_empty() {
            let product = if piece.len() == block {
                karatsuba(piece, short)
            } else {
                mul(piece, short)
            };
            let carry = add_in_place(&mut out[offset..], &product);
            debug_assert_eq!(carry, 0);
        }
        offset = end;
    }
    limbs::trim(&mut out);
    out
}

pub fn square(a: &[Limb]) -> Vec<Limb> {
    let a = trimmed(a);
    let n = a.len();
    if n == 0 {
        return Vec::new();
    }
    if n <= SCHOOLBOOK_LIMIT {
        return schoolbook_square(a);
    }
    // (a1 B^h + a0)^2 == a1^2 B^2h + 2 a0 a1 B^h + a0^2
    let h = n / 2;
    let (a0, a1) = a.split_at(h);
    let lo = square(a0);
    let hi = square(a1);
    let a0t = trimmed(a0);
    let cross = if a0t.is_empty() {
        Vec::new()
    } else {
        mul(a0t, a1)
    };
    let cross = limbs::shl_bits(&cross, 1);
    let mut out = vec![0; 2 * n + 1];
    out[..lo.len()].copy_from_slice(&lo);
    add_shifted(&mut out, &cross, h);
    add_shifted(&mut out, &hi, 2 * h);
    limbs::trim(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    fn random_limbs(rng: &mut StdRng, len: usize) -> Vec<Limb> {
        let mut v: Vec<Limb> = (0..len).map(|_| rng.gen()).collect();
        if let Some(top) = v.last_mut() {
            *top |= 1;
        }
        v
    }

    #[test]
    fn check_algorithms_agree() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for &(la, lb) in &[(11, 11), (25, 25), (64, 64), (90, 31), (200, 13), (41, 40)] {
            let a = random_limbs(&mut rng, la);
            let b = random_limbs(&mut rng, lb);
            let expected = schoolbook(&a, &b);
            assert_eq!(mul(&a, &b), expected, "{}x{}", la, lb);
            assert_eq!(mul(&b, &a), expected, "{}x{}", lb, la);
        }
    }

    #[test]
    fn check_square() {
        let mut rng = StdRng::seed_from_u64(7);
        for &len in &[1, 2, 10, 11, 33, 100] {
            let a = random_limbs(&mut rng, len);
            assert_eq!(square(&a), schoolbook(&a, &a), "len {}", len);
        }
        assert_eq!(square(&[0xffff, 0xffff]), schoolbook(&[0xffff, 0xffff], &[0xffff, 0xffff]));
    }
}
