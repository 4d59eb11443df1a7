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

//! Powers of two, five and ten.

use crate::Integer;
use once_cell::sync::Lazy;

const CACHED: usize = 64;

static POW10: Lazy<Vec<Integer>> = Lazy::new(|| table(10));
static POW5: Lazy<Vec<Integer>> = Lazy::new(|| table(5));

fn table(base: u32) -> Vec<Integer> {
    let mut v = Vec::with_capacity(CACHED);
    let mut p = Integer::from(1u32);
    for _ in 0..CACHED {
        v.push(p.clone());
        p *= base;
    }
    v
}

/// Powers of ten that fit in an `i32`.
pub(crate) const POW10_I32: [i32; 10] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

fn lookup(cache: &[Integer], base: u32, n: u64) -> Integer {
    if n < CACHED as u64 {
        return cache[n as usize].clone();
    }
    // 5^n = 5^(n mod 64) * (5^64)^(n / 64) keeps the cached entries useful
    let top = &cache[CACHED - 1] * base;
    let hi = top.pow(n / CACHED as u64);
    hi * &cache[(n % CACHED as u64) as usize]
}

/// Returns 10<sup>n</sup>.
///
/// # Examples
///
/// ```rust
/// use radixnum::radix::powers;
/// assert_eq!(powers::pow10(3), 1000);
/// assert_eq!(powers::pow10(100).digit_count(), 101);
/// ```
pub fn pow10(n: u64) -> Integer {
    lookup(&POW10, 10, n)
}

/// Returns 5<sup>n</sup>.
pub fn pow5(n: u64) -> Integer {
    lookup(&POW5, 5, n)
}

/// Returns 2<sup>n</sup>.
pub fn pow2(n: u64) -> Integer {
    Integer::from(1u32).shl_bits(n)
}

/// Returns `radix`<sup>n</sup> for radix 2 or 10.
pub fn radix_pow(radix: u32, n: u64) -> Integer {
    match radix {
        2 => pow2(n),
        10 => pow10(n),
        _ => Integer::from(radix).pow(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_powers() {
        assert_eq!(pow10(0), 1);
        assert_eq!(pow10(18), 1_000_000_000_000_000_000u64);
        assert_eq!(pow5(3), 125);
        assert_eq!(pow2(70), Integer::from(1u128 << 70));
        assert_eq!(pow10(200), Integer::from(10).pow(200));
        assert_eq!(pow5(129), Integer::from(5).pow(129));
        assert_eq!(radix_pow(2, 5), 32);
        assert_eq!(POW10_I32[9], 1_000_000_000);
    }
}
