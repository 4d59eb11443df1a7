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

use crate::context::Context;
use crate::error::{Error, Result};
use crate::{Binary, Decimal};
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

impl Binary {
    /// Formats the exact decimal value in scientific notation.
    ///
    /// If the exponent is too large for an exact decimal expansion, the
    /// value is written as the mantissa and a power of two, such as
    /// `3p-4000000000` for 3 × 2<sup>−4000000000</sup>.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Binary;
    /// assert_eq!(Binary::from_f64(0.375).to_sci_string(), "0.375");
    /// assert_eq!(Binary::from_f64(1.0 / 1024.0).to_sci_string(), "0.0009765625");
    /// assert_eq!(Binary::NAN.to_sci_string(), "NaN");
    /// ```
    pub fn to_sci_string(&self) -> String {
        match self.to_decimal() {
            Ok(d) => d.to_sci_string(),
            Err(_) => {
                let mut s = String::new();
                if self.is_negative() {
                    s.push('-');
                }
                self.unsigned_mantissa().append_to_string(&mut s, 10);
                s.push('p');
                let e = self.exponent();
                if !e.is_negative() {
                    s.push('+');
                }
                e.append_to_string(&mut s, 10);
                s
            }
        }
    }

    /// Parses a decimal string and rounds it correctly to the context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::{Binary, Context};
    /// let b = Binary::from_str_ctx("3.4028236e38", &mut Context::binary32()).unwrap();
    /// assert_eq!(b.to_f32(), f32::MAX);
    /// ```
    pub fn from_str_ctx(s: &str, ctx: &mut Context) -> Result<Binary> {
        s.parse::<Decimal>()?.to_binary(ctx)
    }

    /// Parses `length` bytes of `s` starting at `offset`, rounding to the
    /// context if one is given.
    pub fn from_str_range(
        s: &str,
        offset: usize,
        length: usize,
        ctx: Option<&mut Context>,
    ) -> Result<Binary> {
        let d = Decimal::from_str_range(s, offset, length, None)?;
        match ctx {
            Some(ctx) => d.to_binary(ctx),
            None => Ok(d.to_binary_approx()),
        }
    }
}

/// Parses exactly when the decimal value is a binary fraction, and
/// otherwise rounds to at least 53 bits.
impl FromStr for Binary {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Binary> {
        Ok(s.parse::<Decimal>()?.to_binary_approx())
    }
}

impl Display for Binary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_sci_string())
    }
}

impl Debug for Binary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Binary, Context, Integer};

    #[test]
    fn check_display() {
        assert_eq!(Binary::from(-12).to_string(), "-12");
        assert_eq!(Binary::from_f64(-0.0).to_string(), "-0");
        assert_eq!(Binary::from_f64(2f64.powi(-30)).to_string(), "9.31322574615478515625E-10");
        assert_eq!(Binary::NEGATIVE_INFINITY.to_string(), "-Infinity");
        assert_eq!(format!("{:>6}", Binary::from_f64(0.5)), "   0.5");
        let far = Binary::create(&Integer::from(3), &Integer::from(-5_000_000_000i64));
        assert_eq!(far.to_string(), "3p-5000000000");
    }

    #[test]
    fn check_parse() {
        let b: Binary = "0.625".parse().unwrap();
        assert_eq!(b.mantissa(), 5);
        assert_eq!(b.exponent(), -3);
        let third: Binary = "0.3333".parse().unwrap();
        assert_eq!(third.to_f64(), 0.3333);
        assert!("1.2.3".parse::<Binary>().is_err());
        assert!("-Inf".parse::<Binary>().unwrap().is_infinity());
        let r = Binary::from_str_range("[0.1]", 1, 3, Some(&mut Context::binary32())).unwrap();
        assert_eq!(r.to_f32(), 0.1f32);
        assert!(Binary::from_str_range("0.1", 2, 5, None).is_err());
    }
}
