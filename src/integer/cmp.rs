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

use crate::integer::limbs;
use crate::Integer;
use std::cmp::Ordering;

impl Ord for Integer {
    fn cmp(&self, other: &Integer) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => limbs::compare(self.limbs(), other.limbs()),
            (true, true) => limbs::compare(other.limbs(), self.limbs()),
        }
    }
}

impl PartialOrd for Integer {
    #[inline]
    fn partial_cmp(&self, other: &Integer) -> Option<Ordering> {
        Some(<Integer as Ord>::cmp(self, other))
    }
}

impl Integer {
    /// Compares the absolute values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// use std::cmp::Ordering;
    /// let a = Integer::from(-10);
    /// let b = Integer::from(4);
    /// assert_eq!(a.cmp_abs(&b), Ordering::Greater);
    /// ```
    #[inline]
    pub fn cmp_abs(&self, other: &Integer) -> Ordering {
        limbs::compare(self.limbs(), other.limbs())
    }
}

#[inline]
fn partial(lhs: &Integer, rhs: &Integer) -> Option<Ordering> {
    Some(lhs.cmp(rhs))
}

cmp_prim! { Integer; partial; i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize }

#[cfg(test)]
mod tests {
    use crate::Integer;
    use std::cmp::Ordering;

    #[test]
    fn check_cmp() {
        let vals = [i64::MIN, -65_537, -65_536, -1, 0, 1, 65_535, 1 << 40, i64::MAX];
        for &a in &vals {
            for &b in &vals {
                assert_eq!(Integer::from(a).cmp(&Integer::from(b)), a.cmp(&b));
                assert_eq!(Integer::from(a).partial_cmp(&b), Some(a.cmp(&b)));
                assert_eq!(a.partial_cmp(&Integer::from(b)), Some(a.cmp(&b)));
            }
        }
        assert_eq!(Integer::from(-5).cmp_abs(&Integer::from(5)), Ordering::Equal);
    }
}
