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

use crate::{Decimal, Integer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::iter;

#[derive(Clone, Copy, Eq, PartialEq)]
enum Notation {
    Scientific,
    Engineering,
    Plain,
}

impl Decimal {
    /// Formats in scientific notation; this is also what
    /// [`Display`] prints.
    ///
    /// Values with a nonpositive exponent and an adjusted exponent of at
    /// least −6 are printed without an exponent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Decimal;
    /// let d = |m: i64, e: i32| Decimal::create_i64(m, e);
    /// assert_eq!(d(123, 0).to_sci_string(), "123");
    /// assert_eq!(d(-123, 1).to_sci_string(), "-1.23E+3");
    /// assert_eq!(d(123, -5).to_sci_string(), "0.00123");
    /// assert_eq!(d(123, -10).to_sci_string(), "1.23E-8");
    /// assert_eq!(d(0, 2).to_sci_string(), "0E+2");
    /// ```
    pub fn to_sci_string(&self) -> String {
        format(self, Notation::Scientific)
    }

    /// Formats like [`to_sci_string`](Decimal::to_sci_string), but with
    /// an exponent that is a multiple of three.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Decimal;
    /// let d = |m: i64, e: i32| Decimal::create_i64(m, e);
    /// assert_eq!(d(123, 3).to_engineering_string(), "123E+3");
    /// assert_eq!(d(123, -10).to_engineering_string(), "12.3E-9");
    /// assert_eq!(d(0, 1).to_engineering_string(), "0.00E+3");
    /// ```
    pub fn to_engineering_string(&self) -> String {
        format(self, Notation::Engineering)
    }

    /// Formats without an exponent.
    ///
    /// A zero with a positive exponent prints as `0`. If the exponent is
    /// too large to expand, scientific notation is used instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Decimal;
    /// assert_eq!(Decimal::create_i64(12, 3).to_plain_string(), "12000");
    /// assert_eq!(Decimal::create_i64(-12, -9).to_plain_string(), "-0.000000012");
    /// ```
    pub fn to_plain_string(&self) -> String {
        format(self, Notation::Plain)
    }
}

fn format(d: &Decimal, notation: Notation) -> String {
    let mut out = String::new();
    if d.is_negative() {
        out.push('-');
    }
    if d.is_infinity() {
        out.push_str("Infinity");
        return out;
    }
    if d.is_nan() {
        out.push_str(if d.is_signaling_nan() { "sNaN" } else { "NaN" });
        if !d.mantissa.is_zero() {
            d.mantissa.to_integer().append_to_string(&mut out, 10);
        }
        return out;
    }
    let mut digits = String::new();
    d.mantissa.to_integer().append_to_string(&mut digits, 10);
    let exponent = d.exponent.to_integer();
    let adjusted = &exponent + Integer::from(digits.len() - 1);
    let plain = match notation {
        Notation::Plain => true,
        _ => exponent.cmp0() != Ordering::Greater && adjusted >= -6,
    };
    if plain && push_plain(&mut out, &digits, &exponent).is_some() {
        return out;
    }
    if notation == Notation::Engineering {
        push_engineering(&mut out, &digits, &exponent, &adjusted);
    } else {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        push_exponent(&mut out, &adjusted);
    }
    out
}

fn zeros(n: usize) -> impl Iterator<Item = char> {
    iter::repeat('0').take(n)
}

fn to_usize(i: &Integer) -> Option<usize> {
    i.to_u64().and_then(|n| usize::try_from(n).ok())
}

fn push_plain(out: &mut String, digits: &str, exponent: &Integer) -> Option<()> {
    match exponent.cmp0() {
        Ordering::Equal => out.push_str(digits),
        Ordering::Greater => {
            if digits == "0" {
                out.push('0');
            } else {
                let n = to_usize(exponent)?;
                out.push_str(digits);
                out.extend(zeros(n));
            }
        }
        Ordering::Less => {
            let frac = to_usize(&-exponent)?;
            let len = digits.len();
            if len > frac {
                out.push_str(&digits[..len - frac]);
                out.push('.');
                out.push_str(&digits[len - frac..]);
            } else {
                out.push_str("0.");
                out.extend(zeros(frac - len));
                out.push_str(digits);
            }
        }
    }
    Some(())
}

// floor modulo 3 of the exponent, always in 0..3
fn mod3(i: &Integer) -> usize {
    let r = usize::from(i.div_rem_small(3).1);
    if i.is_negative() && r != 0 {
        3 - r
    } else {
        r
    }
}

fn push_engineering(out: &mut String, digits: &str, exponent: &Integer, adjusted: &Integer) {
    if digits == "0" {
        let pad = (3 - mod3(exponent)) % 3;
        out.push('0');
        if pad > 0 {
            out.push('.');
            out.extend(zeros(pad));
        }
        push_exponent(out, &(exponent + Integer::from(pad)));
        return;
    }
    let lead = mod3(adjusted) + 1;
    if digits.len() <= lead {
        out.push_str(digits);
        out.extend(zeros(lead - digits.len()));
    } else {
        out.push_str(&digits[..lead]);
        out.push('.');
        out.push_str(&digits[lead..]);
    }
    push_exponent(out, &(adjusted - Integer::from(lead - 1)));
}

fn push_exponent(out: &mut String, exponent: &Integer) {
    out.push('E');
    if !exponent.is_negative() {
        out.push('+');
    }
    exponent.append_to_string(out, 10);
}

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_sci_string())
    }
}

impl Debug for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::Decimal;

    fn d(m: i64, e: i32) -> Decimal {
        Decimal::create_i64(m, e)
    }

    #[test]
    fn check_sci() {
        assert_eq!(d(0, 0).to_string(), "0");
        assert_eq!(d(0, -2).to_string(), "0.00");
        assert_eq!(d(-1, -6).to_string(), "-0.000001");
        assert_eq!(d(1, -7).to_string(), "1E-7");
        assert_eq!(d(0, -7).to_string(), "0E-7");
        assert_eq!(d(5, 1).to_string(), "5E+1");
        assert_eq!(d(1234, 6).to_string(), "1.234E+9");
        assert_eq!(Decimal::NEGATIVE_ZERO.to_string(), "-0");
        assert_eq!(format!("{:>6}", d(15, -1)), "   1.5");
    }

    #[test]
    fn check_specials() {
        assert_eq!(Decimal::POSITIVE_INFINITY.to_string(), "Infinity");
        assert_eq!(Decimal::NEGATIVE_INFINITY.to_string(), "-Infinity");
        assert_eq!(Decimal::NAN.to_string(), "NaN");
        assert_eq!(Decimal::SIGNALING_NAN.negate().to_string(), "-sNaN");
        let payload = Decimal::create_nan(&123.into(), false, false).unwrap();
        assert_eq!(payload.to_string(), "NaN123");
        assert_eq!(payload.to_plain_string(), "NaN123");
    }

    #[test]
    fn check_eng() {
        assert_eq!(d(1, 4).to_engineering_string(), "10E+3");
        assert_eq!(d(123, 1).to_engineering_string(), "1.23E+3");
        assert_eq!(d(-123, -12).to_engineering_string(), "-123E-12");
        assert_eq!(d(0, -7).to_engineering_string(), "0.0E-6");
        assert_eq!(d(0, -8).to_engineering_string(), "0.00E-6");
        assert_eq!(d(0, 3).to_engineering_string(), "0E+3");
        assert_eq!(d(7, -2).to_engineering_string(), "0.07");
    }

    #[test]
    fn check_plain() {
        assert_eq!(d(0, 5).to_plain_string(), "0");
        assert_eq!(d(0, -3).to_plain_string(), "0.000");
        assert_eq!(d(12345, -2).to_plain_string(), "123.45");
        assert_eq!(d(1, 10).to_plain_string(), "10000000000");
    }

    #[test]
    fn check_round_trip() {
        for s in ["0", "-0.00", "1E+3", "1.000E-9", "123.456", "NaN17", "-sNaN", "-Infinity"] {
            let v: Decimal = s.parse().unwrap();
            assert_eq!(v.to_string(), s);
            assert_eq!(v.to_string().parse::<Decimal>().unwrap(), v);
        }
    }
}
