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

//! Arbitrary-precision integers.
//!
//! This module provides support for arbitrary-precision integers of
//! type [`Integer`](../struct.Integer.html). An `Integer` is immutable
//! in the sense that every arithmetic operation produces a new value;
//! for hot loops over small values, the
//! [`ScratchInt`](../scratch/struct.ScratchInt.html) type can be
//! updated in place without allocating.
//!
//! # Examples
//!
//! ```rust
//! use radixnum::Integer;
//! let a = Integer::from(10).pow(30);
//! let b = Integer::from(7);
//! let (q, r) = a.div_rem(&b).unwrap();
//! assert_eq!(&q * &b + &r, a);
//! ```

mod arith;
mod big;
mod casts;
mod cmp;
pub(crate) mod digits;
pub(crate) mod division;
mod gcd;
#[cfg(feature = "num-traits")]
mod impl_num_traits;
pub(crate) mod limbs;
pub(crate) mod mul;
#[cfg(feature = "serde")]
mod serde;
mod sqrt;
mod traits;

pub use crate::integer::big::Integer;
