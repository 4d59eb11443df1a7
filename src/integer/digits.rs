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

//! Radix conversion of magnitudes and decimal digit counting.

use crate::error::ParseErrorKind;
use crate::integer::division;
use crate::integer::limbs::{self, bit_length, compare, trimmed, Limb};
use crate::integer::mul;
use std::cmp::Ordering;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// floor(log10(2) * 2^64)
const LOG10_2_FIXED: u128 = 0x4d10_4d42_7de7_fbcc;

/// The largest power of `radix` that fits in a limb, and its exponent.
fn chunk(radix: u32) -> (Limb, usize) {
    if radix == 10 {
        return (10_000, 4);
    }
    let mut p: u32 = radix;
    let mut k = 1;
    while p * radix <= u32::from(Limb::MAX) {
        p *= radix;
        k += 1;
    }
    (p as Limb, k)
}

fn digit_value(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some(u32::from(b - b'0')),
        b'a'..=b'z' => Some(u32::from(b - b'a') + 10),
        b'A'..=b'Z' => Some(u32::from(b - b'A') + 10),
        _ => None,
    }
}

/// Appends the digits of a magnitude, most significant first.
pub fn write_radix(a: &[Limb], radix: u32, out: &mut String) {
    debug_assert!((2..=36).contains(&radix));
    let a = trimmed(a);
    if a.is_empty() {
        out.push('0');
        return;
    }
    if radix.is_power_of_two() {
        write_power_of_two(a, radix.trailing_zeros(), out);
        return;
    }
    let (divisor, width) = chunk(radix);
    let mut groups: Vec<Limb> = Vec::with_capacity(a.len() * 2);
    let mut rest = a.to_vec();
    while !rest.is_empty() {
        let (q, r) = division::div_rem_single(&rest, divisor);
        groups.push(r);
        rest = q;
    }
    let mut buf = [0u8; 16];
    for (i, &g) in groups.iter().rev().enumerate() {
        let mut g = u32::from(g);
        let mut n = 0;
        while g != 0 {
            buf[n] = DIGITS[(g % radix) as usize];
            g /= radix;
            n += 1;
        }
        if i > 0 {
            // inner groups are zero padded
            while n < width {
                buf[n] = b'0';
                n += 1;
            }
        }
        out.extend(buf[..n].iter().rev().map(|&b| char::from(b)));
    }
}

fn write_power_of_two(a: &[Limb], bits: u32, out: &mut String) {
    let total = bit_length(a);
    let bits = u64::from(bits);
    let ndigits = (total + bits - 1) / bits;
    for d in (0..ndigits).rev() {
        let start = d * bits;
        let mut v = 0u32;
        for b in 0..bits {
            let pos = start + b;
            let word = (pos / 16) as usize;
            if word < a.len() && (a[word] >> (pos % 16)) & 1 != 0 {
                v |= 1 << b;
            }
        }
        out.push(char::from(DIGITS[v as usize]));
    }
}

/// Parses unsigned digits; the slice must not be empty.
pub fn parse_radix(digits: &[u8], radix: u32) -> Result<Vec<Limb>, ParseErrorKind> {
    if !(2..=36).contains(&radix) {
        return Err(ParseErrorKind::InvalidRadix);
    }
    if digits.is_empty() {
        return Err(ParseErrorKind::NoDigits);
    }
    let mut values = Vec::with_capacity(digits.len());
    for &b in digits {
        match digit_value(b) {
            Some(v) if v < radix => values.push(v),
            _ => return Err(ParseErrorKind::InvalidDigit),
        }
    }
    if radix.is_power_of_two() {
        let bits = radix.trailing_zeros();
        let mut out = vec![0 as Limb; (values.len() * bits as usize + 15) / 16 + 1];
        for (i, &v) in values.iter().rev().enumerate() {
            let pos = i * bits as usize;
            for b in 0..bits as usize {
                if (v >> b) & 1 != 0 {
                    out[(pos + b) / 16] |= 1 << ((pos + b) % 16);
                }
            }
        }
        limbs::trim(&mut out);
        return Ok(out);
    }
    let (_, width) = chunk(radix);
    let mut out = Vec::with_capacity(values.len() / 4 + 1);
    for group in values.chunks(width) {
        let mut mult: u32 = 1;
        let mut add: u32 = 0;
        for &v in group {
            mult *= radix;
            add = add * radix + v;
        }
        limbs::mul_small_add(&mut out, mult as Limb, add as Limb);
    }
    Ok(out)
}

/// `base^exp` as a magnitude.
pub fn pow(base: &[Limb], mut exp: u64) -> Vec<Limb> {
    let mut result = vec![1];
    let mut b = trimmed(base).to_vec();
    while exp != 0 {
        if exp & 1 != 0 {
            result = mul::mul(&result, &b);
        }
        exp >>= 1;
        if exp != 0 {
            b = mul::square(&b);
        }
    }
    result
}

/// Number of decimal digits; zero has one digit.
///
/// The count is bracketed from the bit length scaled by log10(2);
/// only when the bracket is not tight is the magnitude compared with
/// a power of ten.
pub fn digit_count(a: &[Limb]) -> u64 {
    let a = trimmed(a);
    if a.is_empty() {
        return 1;
    }
    let bits = bit_length(a);
    if bits <= 128 {
        return u64::from(limbs::low_u128(a).ilog10()) + 1;
    }
    // 2^(bits-1) <= a < 2^bits
    let lo = ((u128::from(bits - 1) * LOG10_2_FIXED) >> 64) as u64 + 1;
    let hi = ((u128::from(bits) * (LOG10_2_FIXED + 1)) >> 64) as u64 + 1;
    if lo == hi {
        return lo;
    }
    let mut d = lo;
    let mut p = pow(&[10], d);
    while d < hi && compare(a, &p) != Ordering::Less {
        p = mul::mul_single(&p, 10);
        d += 1;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string(a: &[Limb], radix: u32) -> String {
        let mut s = String::new();
        write_radix(a, radix, &mut s);
        s
    }

    #[test]
    fn check_write() {
        let a = limbs::from_u64(246_913_578_024_690);
        assert_eq!(to_string(&a, 10), "246913578024690");
        assert_eq!(to_string(&a, 16), format!("{:x}", 246_913_578_024_690u64));
        assert_eq!(to_string(&a, 2), format!("{:b}", 246_913_578_024_690u64));
        assert_eq!(to_string(&a, 8), format!("{:o}", 246_913_578_024_690u64));
        assert_eq!(to_string(&limbs::from_u64(35 * 36 + 1), 36), "z1");
        assert_eq!(to_string(&limbs::from_u64(100_000_001), 10), "100000001");
        assert_eq!(to_string(&[], 7), "0");
    }

    #[test]
    fn check_parse() {
        assert_eq!(parse_radix(b"ff", 16), Ok(vec![255]));
        assert_eq!(parse_radix(b"FF", 16), Ok(vec![255]));
        assert_eq!(parse_radix(b"12", 2), Err(ParseErrorKind::InvalidDigit));
        assert_eq!(parse_radix(b"", 10), Err(ParseErrorKind::NoDigits));
        assert_eq!(parse_radix(b"1", 37), Err(ParseErrorKind::InvalidRadix));
        let v = parse_radix(b"123456789012345678901234567890", 10).unwrap();
        assert_eq!(to_string(&v, 10), "123456789012345678901234567890");
        let v = parse_radix(b"zyx0", 36).unwrap();
        assert_eq!(to_string(&v, 36), "zyx0");
    }

    #[test]
    fn check_digit_count() {
        assert_eq!(digit_count(&[]), 1);
        assert_eq!(digit_count(&[10]), 2);
        assert_eq!(digit_count(&limbs::from_u64(999_999_999_999_999_999)), 18);
        assert_eq!(digit_count(&limbs::from_u64(1_000_000_000_000_000_000)), 19);
        let p = pow(&[10], 2135);
        assert_eq!(digit_count(&p), 2136);
        let below = limbs::sub(&p, &[1]);
        assert_eq!(digit_count(&below), 2135);
        let above = limbs::add(&p, &[1]);
        assert_eq!(digit_count(&above), 2136);
        for e in [39u64, 40, 100, 308, 309, 1000] {
            let p = pow(&[10], e);
            assert_eq!(digit_count(&p), e + 1, "10^{}", e);
            assert_eq!(digit_count(&limbs::sub(&p, &[1])), e, "10^{}-1", e);
        }
    }
}
