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

use crate::context::Flags;
use thiserror::Error;

/// The error type for all fallible operations of the crate.
///
/// Operations either succeed and return a new value, or fail with one
/// of these variants without modifying any of their inputs.
///
/// # Examples
///
/// ```rust
/// use radixnum::{Error, Integer};
/// let zero = Integer::new();
/// let err = Integer::from(7).checked_div(&zero).unwrap_err();
/// assert_eq!(err, Error::DivisionByZero);
/// ```
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum Error {
    /// A public argument was out of range.
    #[error("invalid argument: {0}")]
    ArgumentInvalid(String),

    /// A numeric or radix string was malformed.
    #[error("cannot parse number: {kind}")]
    Format {
        /// What was wrong with the string.
        kind: ParseErrorKind,
    },

    /// An integer division or remainder had a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// A checked narrowing conversion did not fit its target.
    #[error("value does not fit in {0}")]
    Overflow(&'static str),

    /// An exact integer conversion would discard a nonzero fraction.
    #[error("not an exact integer")]
    NotAnExactInteger,

    /// The operation exceeds a representable index or length.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),

    /// A context trap was enabled for a condition that occurred.
    #[error("trapped condition: {0:?}")]
    Trap(Flags),
}

/// What went wrong while parsing a number.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ParseErrorKind {
    /// The string was empty.
    Empty,
    /// A character was not valid at its position.
    InvalidDigit,
    /// A digit run was required but missing.
    NoDigits,
    /// The radix was outside 2 through 36.
    InvalidRadix,
    /// A NaN diagnostic payload was longer than the context precision.
    PayloadTooLong,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use self::ParseErrorKind::*;
        f.write_str(match *self {
            Empty => "string is empty",
            InvalidDigit => "invalid digit found in string",
            NoDigits => "string has no digits",
            InvalidRadix => "radix out of range",
            PayloadTooLong => "NaN payload exceeds precision",
        })
    }
}

impl Error {
    #[inline]
    pub(crate) fn format(kind: ParseErrorKind) -> Error {
        Error::Format { kind }
    }
}

/// A specialized `Result` for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_display() {
        assert_eq!(Error::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            Error::format(ParseErrorKind::NoDigits).to_string(),
            "cannot parse number: string has no digits"
        );
        assert_eq!(Error::Overflow("i32").to_string(), "value does not fit in i32");
    }
}
