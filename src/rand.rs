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

//! Random number generation for [`Integer`](../struct.Integer.html).

use crate::error::{Error, Result};
use crate::integer::limbs::{self, Limb};
use crate::Integer;
use rand::RngCore;
use std::cmp::Ordering;

impl Integer {
    /// Generates a nonnegative random number below `2^bits`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// use rand::SeedableRng;
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    /// let i = Integer::random_bits(70, &mut rng);
    /// assert!(i.significant_bits() <= 70);
    /// ```
    pub fn random_bits<R: RngCore + ?Sized>(bits: u64, rng: &mut R) -> Integer {
        let words = ((bits + 15) / 16) as usize;
        let mut v: Vec<Limb> = Vec::with_capacity(words);
        while v.len() < words {
            let r = rng.next_u32();
            v.push(r as Limb);
            if v.len() < words {
                v.push((r >> 16) as Limb);
            }
        }
        Integer::from_limbs(false, limbs::low_bits(&v, bits))
    }

    /// Generates a uniformly distributed random number in
    /// `0..bound`.
    ///
    /// Fails with `ArgumentInvalid` unless `bound` is positive.
    pub fn random_below<R: RngCore + ?Sized>(bound: &Integer, rng: &mut R) -> Result<Integer> {
        if bound.cmp0() != Ordering::Greater {
            return Err(Error::ArgumentInvalid("bound must be positive".into()));
        }
        let bits = bound.significant_bits();
        // rejection sampling, expected fewer than two rounds
        loop {
            let candidate = Integer::random_bits(bits, rng);
            if candidate < *bound {
                return Ok(candidate);
            }
        }
    }
}
