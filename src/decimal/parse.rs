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
use crate::decimal::big::MATH;
use crate::error::{Error, ParseErrorKind, Result};
use crate::radix::{flags, powers};
use crate::{Decimal, FixedCell, Integer, ScratchInt};
use std::str::FromStr;

// digits folded into the mantissa per multiply
const BATCH: usize = 9;

impl Decimal {
    /// Parses `length` bytes of `s` starting at `offset`.
    ///
    /// The accepted syntax is an optional sign followed by either a
    /// number with an optional fraction and exponent, `Infinity` or
    /// `Inf`, or `NaN` or `sNaN` with optional payload digits. Letters
    /// are case-insensitive. If a context is given the value is rounded
    /// to it, and a NaN payload with more digits than the precision is
    /// rejected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::{Context, Decimal};
    /// let d = Decimal::from_str_range("x=-1.25e3;", 2, 7, None).unwrap();
    /// assert_eq!(d.to_string(), "-1.25E+3");
    /// let mut ctx = Context::decimal32();
    /// let r = Decimal::from_str_range("3.14159265", 0, 10, Some(&mut ctx)).unwrap();
    /// assert_eq!(r.to_string(), "3.141593");
    /// ```
    pub fn from_str_range(
        s: &str,
        offset: usize,
        length: usize,
        ctx: Option<&mut Context>,
    ) -> Result<Decimal> {
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= s.len())
            .ok_or_else(|| {
                Error::ArgumentInvalid(format!(
                    "range {}+{} out of bounds for length {}",
                    offset,
                    length,
                    s.len()
                ))
            })?;
        parse(&s.as_bytes()[offset..end], ctx)
    }

    /// Parses a string and rounds the result to the context.
    pub fn from_str_ctx(s: &str, ctx: &mut Context) -> Result<Decimal> {
        parse(s.as_bytes(), Some(ctx))
    }
}

impl FromStr for Decimal {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Decimal> {
        parse(s.as_bytes(), None)
    }
}

fn parse(bytes: &[u8], ctx: Option<&mut Context>) -> Result<Decimal> {
    let (negative, rest) = match bytes.first() {
        None => return Err(Error::format(ParseErrorKind::Empty)),
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        Some(_) => (false, bytes),
    };
    let sign = if negative { flags::NEGATIVE } else { 0 };
    match rest.first() {
        None => Err(Error::format(ParseErrorKind::NoDigits)),
        Some(b) if b.is_ascii_alphabetic() => parse_special(rest, sign, ctx),
        Some(_) => {
            let value = parse_finite(rest, sign)?;
            match ctx {
                Some(ctx) => MATH.round_to_precision(&value, ctx),
                None => Ok(value),
            }
        }
    }
}

fn parse_special(bytes: &[u8], sign: u8, ctx: Option<&mut Context>) -> Result<Decimal> {
    if bytes.eq_ignore_ascii_case(b"infinity") || bytes.eq_ignore_ascii_case(b"inf") {
        return Ok(Decimal::from_raw(
            FixedCell::ZERO,
            FixedCell::ZERO,
            flags::INFINITY | sign,
        ));
    }
    let (kind, payload) = if starts_with_ignore_case(bytes, b"nan") {
        (flags::QUIET_NAN, &bytes[3..])
    } else if starts_with_ignore_case(bytes, b"snan") {
        (flags::SIGNALING_NAN, &bytes[4..])
    } else {
        return Err(Error::format(ParseErrorKind::InvalidDigit));
    };
    if !payload.iter().all(u8::is_ascii_digit) {
        return Err(Error::format(ParseErrorKind::InvalidDigit));
    }
    let significant = match payload.iter().position(|&b| b != b'0') {
        Some(start) => &payload[start..],
        None => &[][..],
    };
    if let Some(ctx) = ctx {
        let p = ctx.precision();
        if p > 0 && significant.len() as u64 > p {
            return Err(Error::format(ParseErrorKind::PayloadTooLong));
        }
    }
    let payload = if significant.is_empty() {
        Integer::new()
    } else {
        Integer::from_bytes_radix(significant, 10)?
    };
    Ok(Decimal::from_raw(
        FixedCell::from_integer(payload),
        FixedCell::ZERO,
        kind | sign,
    ))
}

fn starts_with_ignore_case(bytes: &[u8], prefix: &[u8]) -> bool {
    bytes.len() >= prefix.len() && bytes[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn parse_finite(bytes: &[u8], sign: u8) -> Result<Decimal> {
    let mut mantissa = ScratchInt::new(0);
    let (mut batch, mut batch_len) = (0i32, 0usize);
    let mut any_digits = false;
    let mut seen_point = false;
    let mut frac_digits = 0u64;
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b @ b'0'..=b'9' => {
                batch = batch * 10 + i32::from(b - b'0');
                batch_len += 1;
                if batch_len == BATCH {
                    mantissa.multiply(powers::POW10_I32[BATCH]).add_int(batch);
                    batch = 0;
                    batch_len = 0;
                }
                any_digits = true;
                if seen_point {
                    frac_digits += 1;
                }
            }
            b'.' if !seen_point => seen_point = true,
            b'e' | b'E' => break,
            _ => return Err(Error::format(ParseErrorKind::InvalidDigit)),
        }
        pos += 1;
    }
    if !any_digits {
        return Err(Error::format(ParseErrorKind::NoDigits));
    }
    if batch_len > 0 {
        mantissa.multiply(powers::POW10_I32[batch_len]).add_int(batch);
    }
    let mut exponent = ScratchInt::new(0);
    if pos < bytes.len() {
        let mut digits = &bytes[pos + 1..];
        let exp_negative = match digits.first() {
            Some(b'-') => {
                digits = &digits[1..];
                true
            }
            Some(b'+') => {
                digits = &digits[1..];
                false
            }
            _ => false,
        };
        if digits.is_empty() {
            return Err(Error::format(ParseErrorKind::NoDigits));
        }
        for &b in digits {
            if !b.is_ascii_digit() {
                return Err(Error::format(ParseErrorKind::InvalidDigit));
            }
            exponent.multiply(10).add_int(i32::from(b - b'0'));
        }
        if exp_negative {
            exponent.negate();
        }
    }
    if frac_digits > 0 {
        exponent.subtract_integer(&Integer::from(frac_digits));
    }
    Ok(Decimal::from_raw(
        FixedCell::from_integer(mantissa.to_integer()),
        FixedCell::from_integer(exponent.to_integer()),
        sign,
    ))
}
