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

//! # Arbitrary-precision integers, decimals and binary floats
//!
//! The `radixnum` crate provides an arbitrary-precision [`Integer`] and
//! two arbitrary-precision floating-point types that share one
//! arithmetic engine:
//!
//!   * [`Decimal`], a decimal floating-point number following the
//!     General Decimal Arithmetic rules: the exponent of a result is
//!     chosen so that `1.50 + 2.5` is `4.00`, not `4`.
//!   * [`Binary`], a binary floating-point number that converts exactly
//!     from `f64` and `f32` and rounds back to them.
//!
//! Operations that round take a [`Context`], which holds a precision,
//! a [`Round`] mode, an optional exponent range, the [`Flags`] raised so
//! far and the flags that should trap. Without a context the
//! floating-point operators are exact.
//!
//! This crate is free software: you can redistribute it and/or modify
//! it under the terms of the GNU Lesser General Public License as
//! published by the Free Software Foundation, either version 3 of the
//! License, or (at your option) any later version.
//!
//! # Basic use
//!
//! ```rust
//! use radixnum::{Context, Decimal, Integer, Round};
//!
//! let a: Decimal = "1.50".parse().unwrap();
//! let b: Decimal = "2.5".parse().unwrap();
//! assert_eq!((&a + &b).to_string(), "4.00");
//!
//! // round a third to seven digits
//! let mut ctx = Context::decimal32();
//! let third = Decimal::ONE.divide_ctx(&Decimal::from(3), &mut ctx).unwrap();
//! assert_eq!(third.to_string(), "0.3333333");
//!
//! // a decimal string rounded once to the nearest double
//! let d: Decimal = "9007199254740993".parse().unwrap();
//! let b = d.to_binary(&mut Context::binary64().with_rounding(Round::HalfEven)).unwrap();
//! assert_eq!(b.to_f64(), 9007199254740992.0);
//!
//! let big = Integer::from(1) << 100u32;
//! assert_eq!(big.to_string(), "1267650600228229401496703205376");
//! ```
//!
//! # Optional features
//!
//!   * `serde` (default): serialization for [`Integer`], [`Decimal`]
//!     and [`Binary`].
//!   * `num-traits` (default): the `Zero`, `One`, `Num`, `Signed` and
//!     related traits for [`Integer`].
//!   * `rand`: random integers below a bound or of a given bit length.

#![warn(missing_debug_implementations)]

#[macro_use]
mod macros;

pub mod binary;
pub mod context;
pub mod decimal;
pub mod error;
pub mod fixed;
pub mod integer;
pub mod radix;
#[cfg(feature = "rand")]
mod rand;
pub mod scratch;
#[cfg(feature = "serde")]
mod serdeize;

pub use crate::binary::Binary;
pub use crate::context::{Context, Flags, Round};
pub use crate::decimal::Decimal;
pub use crate::error::{Error, ParseErrorKind, Result};
pub use crate::fixed::FixedCell;
pub use crate::integer::Integer;
pub use crate::scratch::ScratchInt;
